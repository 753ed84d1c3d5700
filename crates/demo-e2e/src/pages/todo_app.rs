// TodoMVC demo app
//
// See: https://demo.playwright.dev/todomvc

use crate::actions::Actions;
use crate::assertions::expect_all;
use crate::config::SuiteConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::page_object::PageObject;
use crate::selector::{By, Locate, Role, has_text};
use crate::storage::TodoStore;
use crate::wait::{Attempt, Poll};
use playwright_rs::{Locator, Page, expect};

/// List filter shown in the footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    All,
    Active,
    Completed,
}

impl Filter {
    pub fn label(&self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::Active => "Active",
            Filter::Completed => "Completed",
        }
    }
}

/// How an in-progress edit is finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditCommit {
    /// Press Enter: saves the trimmed text, or deletes the item if empty
    Enter,
    /// Press Escape: discards the edit
    Escape,
    /// Dispatch `blur` on the edit field: saves like Enter
    Blur,
}

/// Page object for the TodoMVC app.
pub struct TodoApp {
    page: Page,
    url: String,
    actions: Actions,
    poll: Poll,
}

impl PageObject for TodoApp {
    fn attach(page: Page, config: &SuiteConfig) -> Self {
        Self {
            page,
            url: config.todo_app_url.to_string(),
            actions: Actions::new(config.action_timeout),
            poll: config.poll(),
        }
    }

    fn page(&self) -> &Page {
        &self.page
    }

    fn url(&self) -> &str {
        &self.url
    }
}

impl TodoApp {
    // Locators

    /// The "What needs to be done?" input.
    pub async fn new_todo(&self) -> Locator {
        self.page.find(&By::placeholder("What needs to be done?")).await
    }

    /// Title of every visible item.
    pub async fn titles(&self) -> Locator {
        self.page.find(&By::test_id("todo-title")).await
    }

    /// "N items left" counter.
    pub async fn todo_count(&self) -> Locator {
        self.page.find(&By::test_id("todo-count")).await
    }

    /// The "Mark all as complete" toggle.
    pub async fn toggle_all(&self) -> Locator {
        self.page.find(&By::label("Mark all as complete")).await
    }

    /// Every visible item row.
    pub async fn items(&self) -> Locator {
        self.page.find(&By::test_id("todo-item")).await
    }

    /// Visible item row at `index` (0-based).
    pub async fn item(&self, index: usize) -> Locator {
        self.items().await.nth(index as i32)
    }

    pub async fn item_checkbox(&self, index: usize) -> Locator {
        self.item(index).await.find(&By::role(Role::Checkbox)).await
    }

    /// Edit field of item `index`; only present while the item is being edited.
    pub async fn item_editor(&self, index: usize) -> Locator {
        self.item(index)
            .await
            .find(&By::role_named(Role::Textbox, "Edit"))
            .await
    }

    /// Label of item `index` containing `text`.
    pub async fn item_label(&self, index: usize, text: &str) -> Locator {
        self.item(index)
            .await
            .locator(&format!("label >> {}", has_text(text)))
    }

    /// Toggle of the first row, located by list structure.
    pub async fn first_toggle(&self) -> Locator {
        self.page
            .find(&By::css(".todo-list li .toggle"))
            .await
            .first()
    }

    pub async fn clear_completed(&self) -> Locator {
        self.page
            .find(&By::role_named(Role::Button, "Clear completed"))
            .await
    }

    pub async fn filter_link(&self, filter: Filter) -> Locator {
        self.page
            .find(&By::role_named(Role::Link, filter.label()))
            .await
    }

    /// Any element containing `text`.
    pub async fn text(&self, text: &str) -> Locator {
        self.page.find(&By::text(text)).await
    }

    // Actions

    /// Types `title` into the new-todo input and submits it.
    pub async fn add_todo(&self, title: &str) -> Result<()> {
        let input = self.new_todo().await;
        self.actions.fill(&input, title).await?;
        self.actions.press(&input, "Enter").await
    }

    /// Adds every title in order. Stops at the first failure.
    pub async fn create_todos(&self, titles: &[&str]) -> Result<()> {
        tracing::debug!(count = titles.len(), "create_todos");
        for title in titles {
            self.add_todo(title)
                .await
                .map_err(|e| e.context(format!("creating todo '{}'", title)))?;
        }
        Ok(())
    }

    /// Marks item `index` completed or active.
    pub async fn set_completed(&self, index: usize, completed: bool) -> Result<()> {
        let checkbox = self.item_checkbox(index).await;
        self.actions.set_checked(&checkbox, completed).await
    }

    /// Sets the "Mark all as complete" toggle.
    pub async fn mark_all(&self, completed: bool) -> Result<()> {
        let toggle = self.toggle_all().await;
        self.actions.set_checked(&toggle, completed).await
    }

    /// Checks the first row's toggle through its list position.
    pub async fn complete_first(&self) -> Result<()> {
        let toggle = self.first_toggle().await;
        self.actions.check(&toggle).await
    }

    /// Double-clicks item `index` and returns its edit field.
    pub async fn start_editing(&self, index: usize) -> Result<Locator> {
        let item = self.item(index).await;
        self.actions.dblclick(&item).await?;
        Ok(self.item_editor(index).await)
    }

    /// Replaces the text of item `index` and finishes the edit with `commit`.
    pub async fn edit_todo(&self, index: usize, text: &str, commit: EditCommit) -> Result<()> {
        self.start_editing(index).await?;
        self.finish_editing(index, text, commit).await
    }

    /// Replaces the text in item `index`'s open edit field and finishes the edit.
    pub async fn finish_editing(&self, index: usize, text: &str, commit: EditCommit) -> Result<()> {
        let editor = self.item_editor(index).await;
        self.actions.fill(&editor, text).await?;
        match commit {
            EditCommit::Enter => self.actions.press(&editor, "Enter").await,
            EditCommit::Escape => self.actions.press(&editor, "Escape").await,
            EditCommit::Blur => self.blur(&editor).await,
        }
    }

    /// Dispatches `blur` on `field`, which must hold focus.
    async fn blur(&self, field: &Locator) -> Result<()> {
        expect(field.clone())
            .with_timeout(self.poll.timeout())
            .to_be_focused()
            .await?;
        tracing::debug!(selector = field.selector(), "dispatch blur");
        self.page
            .evaluate_expression(
                "document.activeElement.dispatchEvent(\
                 new FocusEvent('blur', { bubbles: true, cancelable: true, composed: true }))",
            )
            .await?;
        Ok(())
    }

    /// Switches the list filter via its footer link.
    pub async fn show(&self, filter: Filter) -> Result<()> {
        let link = self.filter_link(filter).await;
        self.actions.click(&link).await
    }

    pub async fn clear_completed_items(&self) -> Result<()> {
        let button = self.clear_completed().await;
        self.actions.click(&button).await
    }

    // State

    /// Asserts the visible titles are exactly `titles`, in order.
    pub async fn titles_have_text(&self, titles: &[&str]) -> Result<()> {
        expect_all(self.titles().await)
            .with_poll(self.poll)
            .to_have_texts(titles)
            .await
    }

    /// Persisted list of this page.
    pub fn store(&self) -> TodoStore<'_> {
        TodoStore::new(&self.page, self.poll)
    }

    pub async fn wait_for_todo_count(&self, expected: usize) -> Result<()> {
        self.store().wait_for_count(expected).await
    }

    pub async fn wait_for_completed_count(&self, expected: usize) -> Result<()> {
        self.store().wait_for_completed_count(expected).await
    }

    pub async fn wait_for_todo_titled(&self, title: &str) -> Result<()> {
        self.store().wait_for_title(title).await
    }

    /// Waits until the persisted titles equal the visible titles, in order.
    ///
    /// Only meaningful under [`Filter::All`], where every item is visible.
    pub async fn assert_storage_matches_view(&self) -> Result<()> {
        let store = self.store();
        let titles = self.titles().await;
        let (titles, store) = (&titles, &store);
        self.poll
            .until(
                || async move {
                    let persisted: Vec<String> =
                        store.read().await?.into_iter().map(|r| r.title).collect();
                    let visible = match crate::assertions::inner_texts(titles).await {
                        Ok(visible) => visible,
                        // Re-rendering; read again
                        Err(e) if e.kind() == ErrorKind::ElementResolution => {
                            return Ok(Attempt::Pending(e.to_string()));
                        }
                        Err(e) => return Err(e),
                    };
                    Ok::<_, Error>(if persisted == visible {
                        Attempt::Ready(())
                    } else {
                        Attempt::Pending(format!("persisted {:?}, visible {:?}", persisted, visible))
                    })
                },
                |stalled| Error::StoragePollTimeout {
                    key: store.key().to_string(),
                    condition: "persisted titles match visible titles".to_string(),
                    last_seen: stalled.last_observed,
                    waited: stalled.waited,
                },
            )
            .await
    }
}
