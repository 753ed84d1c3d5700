// Scenario - Runs one independent test case against its own session
//
// Each scenario gets a fresh session and a fresh page object; nothing is
// shared with any other scenario. Actions inside the body run strictly in
// sequence. The session is closed whatever the body's outcome, and the
// body's own failure takes precedence over a close failure.

use crate::config::SuiteConfig;
use crate::error::Result;
use crate::page_object::PageObject;
use crate::session::Session;
use std::future::Future;
use tracing::Instrument;

/// Runs `body` against a freshly attached and navigated `P`.
///
/// ```ignore
/// scenario::run(&config, "has title", async |home: &PlaywrightHomePage| {
///     expect_page(home.page()).to_have_title("Playwright").await
/// })
/// .await?;
/// ```
pub async fn run<P, F>(config: &SuiteConfig, name: &str, body: F) -> Result<()>
where
    P: PageObject,
    F: AsyncFnOnce(&P) -> Result<()>,
{
    let span = tracing::info_span!("scenario", name);
    async move {
        tracing::info!("start");
        let session = Session::start(config).await?;
        let page_object = P::attach(session.page().clone(), config);

        let outcome = match page_object.navigate().await {
            Ok(()) => body(&page_object).await,
            Err(e) => Err(e.context("initial navigation")),
        };
        let closed = session.close().await;

        match &outcome {
            Ok(()) => tracing::info!("passed"),
            Err(e) => tracing::info!(kind = ?e.kind(), "failed: {}", e),
        }
        outcome?;
        closed
    }
    .instrument(span)
    .await
}

/// Runs a named sub-step of a scenario inside its own span.
///
/// Failures are tagged with the step name.
pub async fn step<T, Fut>(name: &str, fut: Fut) -> Result<T>
where
    Fut: Future<Output = Result<T>>,
{
    let span = tracing::info_span!("step", name);
    fut.instrument(span)
        .await
        .map_err(|e| e.context(format!("step '{}'", name)))
}
