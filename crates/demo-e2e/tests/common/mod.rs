// Shared helpers for the scenario test binaries
//
// Each file under tests/ compiles to its own binary, so not every helper is
// used everywhere.
#![allow(dead_code)]

use demo_e2e::pages::TodoApp;
use demo_e2e::{PageObject, Result, SuiteConfig, scenario};
use std::sync::Once;
use tracing_subscriber::EnvFilter;

/// Titles used by the standard three-item list.
pub const TODO_ITEMS: [&str; 3] = [
    "buy some cheese",
    "feed the cat",
    "book a doctors appointment",
];

static TRACING: Once = Once::new();

/// Installs a test-writer subscriber once per binary. `RUST_LOG` overrides
/// the default `demo_e2e=info` filter.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("demo_e2e=info"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// Suite configuration from the `E2E_*` environment.
pub fn config() -> SuiteConfig {
    SuiteConfig::from_env().expect("Invalid E2E_* environment")
}

/// Runs `body` as a scenario against page object `P` with the environment's
/// configuration.
pub async fn run_scenario<P, F>(name: &str, body: F) -> Result<()>
where
    P: PageObject,
    F: AsyncFnOnce(&P) -> Result<()>,
{
    init_tracing();
    scenario::run(&config(), name, body).await
}

/// Runs a TodoMVC scenario.
pub async fn todo_scenario<F>(name: &str, body: F) -> Result<()>
where
    F: AsyncFnOnce(&TodoApp) -> Result<()>,
{
    run_scenario::<TodoApp, F>(name, body).await
}

/// Runs a TodoMVC scenario that starts from the standard three-item list and
/// ends by checking three items are still persisted.
pub async fn todo_scenario_with_items<F>(name: &str, body: F) -> Result<()>
where
    F: AsyncFnOnce(&TodoApp) -> Result<()>,
{
    todo_scenario(name, async move |todo: &TodoApp| {
        create_default_todos(todo).await?;
        body(todo).await?;
        todo.wait_for_todo_count(TODO_ITEMS.len()).await
    })
    .await
}

/// Adds the standard list and waits until all three items are persisted.
pub async fn create_default_todos(todo: &TodoApp) -> Result<()> {
    todo.create_todos(&TODO_ITEMS).await?;
    todo.wait_for_todo_count(TODO_ITEMS.len()).await
}
