//! demo-e2e: Page objects and end-to-end scenarios for the Playwright demo sites
//!
//! Scenarios drive a real browser through [`playwright_rs`] against the
//! hosted TodoMVC demo, the Playwright documentation site and a demo store.
//! Page objects translate what a scenario means ("the second item's
//! checkbox", "create these three todos") into locators and driver actions;
//! scenarios sequence those actions and assert on what the browser reports.
//!
//! # Examples
//!
//! ## A TodoMVC scenario
//!
//! ```ignore
//! use demo_e2e::pages::TodoApp;
//! use demo_e2e::{SuiteConfig, expect_all, scenario};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SuiteConfig::from_env()?;
//!
//!     scenario::run(&config, "append items", async |todo: &TodoApp| {
//!         todo.create_todos(&["buy some cheese", "feed the cat"]).await?;
//!
//!         // DOM state
//!         todo.titles_have_text(&["buy some cheese", "feed the cat"]).await?;
//!         expect_all(todo.items().await).to_have_classes(&["", ""]).await?;
//!
//!         // Persisted state, written asynchronously by the app
//!         todo.wait_for_todo_count(2).await?;
//!         Ok(())
//!     })
//!     .await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Page-level assertions
//!
//! ```ignore
//! use demo_e2e::pages::PlaywrightHomePage;
//! use demo_e2e::{PageObject, SuiteConfig, expect_page, scenario};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SuiteConfig::new()?;
//!
//!     scenario::run(&config, "get started", async |home: &PlaywrightHomePage| {
//!         home.get_started().await?;
//!         expect_page(home.page()).to_have_url(".*intro").await
//!     })
//!     .await?;
//!     Ok(())
//! }
//! ```

mod actions;
mod assertions;
mod config;
mod error;
mod page_object;
mod selector;
mod session;
mod storage;
mod wait;

pub mod pages;
pub mod scenario;

// Re-export error types
pub use error::{Error, ErrorKind, Result};

// Re-export configuration
pub use config::{BrowserKind, Credentials, SuiteConfig};

// Re-export the page-object contract and session
pub use page_object::PageObject;
pub use session::Session;

// Re-export selection strategies and actions
pub use actions::Actions;
pub use selector::{By, Locate, Role, has_text};

// Re-export assertions and waiting
pub use assertions::{ListExpectation, PageExpectation, classes, expect_all, expect_page, inner_texts};
pub use wait::{Attempt, Poll, Stalled};

// Re-export persisted-state access
pub use storage::{TODO_STORAGE_KEY, TodoRecord, TodoStore, completed_count, parse_records};

// Single-element assertions come straight from the driver
pub use playwright_rs::expect;
