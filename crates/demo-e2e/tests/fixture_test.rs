// Offline tests against the local fixture server
//
// Tests cover:
// - Every selection strategy resolves the intended element
// - List assertions pass on matching state and report expected vs actual
// - List assertions retry while the list re-renders under them
// - Storage polling waits for a delayed write, times out with context and
//   fails fast on malformed data
// - Failures surface with the right kind (action timeout, navigation)

mod common;

use demo_e2e::{
    Actions, By, ErrorKind, Locate, PageObject, Poll, Role, Session, SuiteConfig, TodoRecord,
    TodoStore, completed_count, expect_all, expect_page, scenario,
};
use playwright_rs::Page;
use std::time::{Duration, Instant};
use test_server::TestServer;

/// Opens `path` on a fresh fixture server and session, runs `body`, then
/// tears both down.
async fn with_fixture_page<F>(path: &str, body: F) -> anyhow::Result<()>
where
    F: AsyncFnOnce(&Page) -> anyhow::Result<()>,
{
    common::init_tracing();
    let server = TestServer::start().await;
    let session = Session::start(&common::config()).await?;

    let outcome = match session
        .page()
        .goto(&format!("{}{}", server.url(), path), None)
        .await
    {
        Ok(_) => body(session.page()).await,
        Err(e) => Err(e.into()),
    };

    session.close().await?;
    server.shutdown();
    outcome
}

#[tokio::test]
async fn test_selector_strategies_resolve() -> anyhow::Result<()> {
    with_fixture_page("/strategies.html", async |page: &Page| {
        let single = [
            By::role_named(Role::Heading, "Section heading"),
            By::role_named(Role::Button, "Close dialog"),
            By::role_named(Role::Button, "clear"),
            By::role_named(Role::Link, "Next page"),
            By::label("Email address"),
            By::placeholder("Search the catalogue"),
            By::title("Password"),
            By::text(r#"Say "hi" \o/"#),
            By::css("li.odd"),
        ];
        for by in &single {
            assert_eq!(page.find(by).await.count().await?, 1, "{}", by);
        }

        assert_eq!(page.find(&By::role(Role::Heading)).await.count().await?, 2);
        assert_eq!(page.find(&By::test_id("row")).await.count().await?, 3);

        // Exact matching is case-sensitive and whole-string
        let exact = By::role_named(Role::Button, "clear").exact();
        assert_eq!(page.find(&exact).await.count().await?, 0);

        let email = page.find(&By::label("Email address")).await;
        assert_eq!(email.get_attribute("id").await?, Some("email".to_string()));

        // Chained lookup stays inside the parent
        let list = page.find(&By::css("ul")).await;
        assert_eq!(list.find(&By::test_id("row")).await.count().await?, 3);
        assert_eq!(list.find(&By::role(Role::Button)).await.count().await?, 0);
        Ok(())
    })
    .await
}

#[tokio::test]
async fn test_list_assertions_pass_on_matching_state() -> anyhow::Result<()> {
    with_fixture_page("/strategies.html", async |page: &Page| {
        let rows = page.find(&By::test_id("row")).await;

        expect_all(rows.clone()).to_have_count(3).await?;
        expect_all(rows.clone()).not().to_have_count(2).await?;
        expect_all(rows.clone())
            .with_poll_interval(Duration::from_millis(20))
            .to_have_texts(&["alpha", "beta two", "gamma"])
            .await?;
        expect_all(rows.clone())
            .to_have_classes(&["odd", "", ""])
            .await?;
        expect_all(rows.first()).to_have_class("odd").await?;
        expect_all(rows.nth(1)).to_have_class("").await?;
        expect_all(rows.first()).to_contain_class("odd").await?;

        expect_page(page)
            .with_poll_interval(Duration::from_millis(20))
            .to_have_title("^Selector Strategies$")
            .await?;
        expect_page(page).to_have_url(r"/strategies\.html$").await?;
        expect_page(page).not().to_have_url("todomvc").await?;
        Ok(())
    })
    .await
}

#[tokio::test]
async fn test_list_assertions_survive_re_rendering() -> anyhow::Result<()> {
    with_fixture_page("/churn.html", async |page: &Page| {
        let rows = page.find(&By::test_id("churn-row")).await;

        // Rows vanish between the count and the per-row reads until the
        // list settles
        expect_all(rows.clone())
            .with_poll_interval(Duration::from_millis(1))
            .to_have_texts(&["alpha", "gamma"])
            .await?;
        expect_all(rows)
            .with_poll_interval(Duration::from_millis(1))
            .to_have_classes(&["row-alpha", "row-gamma"])
            .await?;
        Ok(())
    })
    .await
}

#[tokio::test]
async fn test_list_assertion_reports_expected_and_actual() -> anyhow::Result<()> {
    with_fixture_page("/strategies.html", async |page: &Page| {
        let rows = page.find(&By::test_id("row")).await;

        let err = expect_all(rows.clone())
            .with_timeout(Duration::from_millis(300))
            .to_have_count(2)
            .await
            .expect_err("count should not match");
        assert_eq!(err.kind(), ErrorKind::AssertionMismatch);
        let message = err.to_string();
        assert!(message.contains("row"), "{}", message);
        assert!(message.contains('2') && message.contains('3'), "{}", message);

        let err = expect_all(rows)
            .with_timeout(Duration::from_millis(300))
            .to_have_texts(&["alpha", "gamma"])
            .await
            .expect_err("texts should not match");
        assert_eq!(err.kind(), ErrorKind::AssertionMismatch);
        assert!(err.to_string().contains("beta two"), "{}", err);
        Ok(())
    })
    .await
}

#[tokio::test]
async fn test_storage_wait_observes_delayed_write() -> anyhow::Result<()> {
    with_fixture_page("/strategies.html", async |page: &Page| {
        let store = TodoStore::new(page, Poll::new(Duration::from_secs(5)));

        // Missing key reads as an empty list
        assert!(store.read().await?.is_empty());

        let actions = Actions::new(Duration::from_secs(5));
        actions.click(&page.find(&By::css("#save-later")).await).await?;

        store
            .wait_for_records(&[
                TodoRecord::new("alpha", false),
                TodoRecord::new("beta", true),
            ])
            .await?;
        store.wait_for_count(2).await?;
        store.wait_for_completed_count(1).await?;
        assert_eq!(completed_count(&store.read().await?), 1);
        Ok(())
    })
    .await
}

#[tokio::test]
async fn test_storage_wait_times_out_with_context() -> anyhow::Result<()> {
    with_fixture_page("/strategies.html", async |page: &Page| {
        let store = TodoStore::new(page, Poll::new(Duration::from_millis(300)));

        let err = store
            .wait_for_count(5)
            .await
            .expect_err("nothing is ever persisted");
        assert_eq!(err.kind(), ErrorKind::StoragePollTimeout);
        assert!(err.to_string().contains("react-todos"), "{}", err);
        Ok(())
    })
    .await
}

#[tokio::test]
async fn test_malformed_storage_fails_fast() -> anyhow::Result<()> {
    with_fixture_page("/strategies.html", async |page: &Page| {
        let actions = Actions::new(Duration::from_secs(5));
        actions.click(&page.find(&By::css("#corrupt")).await).await?;

        let store = TodoStore::new(page, Poll::new(Duration::from_secs(30)));
        let started = Instant::now();
        let err = store
            .wait_for_count(1)
            .await
            .expect_err("stored value is not JSON");

        assert_eq!(err.kind(), ErrorKind::StoragePollTimeout);
        assert!(err.to_string().contains("Malformed"), "{}", err);
        assert!(started.elapsed() < Duration::from_secs(10));
        Ok(())
    })
    .await
}

#[tokio::test]
async fn test_action_on_missing_element_times_out() -> anyhow::Result<()> {
    with_fixture_page("/strategies.html", async |page: &Page| {
        let actions = Actions::new(Duration::from_millis(500));
        let missing = page.find(&By::test_id("does-not-exist")).await;

        let err = actions.click(&missing).await.expect_err("nothing to click");
        assert!(
            matches!(
                err.kind(),
                ErrorKind::ActionTimeout | ErrorKind::ElementResolution
            ),
            "unexpected kind {:?}: {}",
            err.kind(),
            err
        );
        assert!(err.to_string().contains("does-not-exist"), "{}", err);
        Ok(())
    })
    .await
}

/// A page object for a URL the fixture server answers with 404.
struct MissingPage {
    page: Page,
    url: String,
}

impl PageObject for MissingPage {
    fn attach(page: Page, config: &SuiteConfig) -> Self {
        let url = config
            .todo_app_url
            .join("missing.html")
            .expect("Invalid fixture URL")
            .to_string();
        Self { page, url }
    }

    fn page(&self) -> &Page {
        &self.page
    }

    fn url(&self) -> &str {
        &self.url
    }
}

#[tokio::test]
async fn test_error_status_fails_navigation() -> anyhow::Result<()> {
    common::init_tracing();
    let server = TestServer::start().await;
    let config = common::config().with_todo_app_url(server.todo_url());

    let err = scenario::run(&config, "missing page", async |_: &MissingPage| Ok(()))
        .await
        .expect_err("404 should fail navigation");
    assert_eq!(err.kind(), ErrorKind::Navigation);
    assert!(err.to_string().contains("404"), "{}", err);
    assert!(err.to_string().contains("initial navigation"), "{}", err);

    server.shutdown();
    Ok(())
}
