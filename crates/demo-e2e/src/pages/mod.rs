//! Page objects for the demo sites.

mod playwright_home;
mod shop;
mod todo_app;

pub use playwright_home::PlaywrightHomePage;
pub use shop::{ShopHomePage, ShopLoginPage};
pub use todo_app::{EditCommit, Filter, TodoApp};
