// Playwright documentation home page
//
// See: https://playwright.dev

use crate::actions::Actions;
use crate::config::SuiteConfig;
use crate::error::Result;
use crate::page_object::PageObject;
use crate::selector::{By, Locate, Role};
use playwright_rs::{Locator, Page};

pub struct PlaywrightHomePage {
    page: Page,
    url: String,
    actions: Actions,
}

impl PageObject for PlaywrightHomePage {
    fn attach(page: Page, config: &SuiteConfig) -> Self {
        Self {
            page,
            url: config.playwright_home_url.to_string(),
            actions: Actions::new(config.action_timeout),
        }
    }

    fn page(&self) -> &Page {
        &self.page
    }

    fn url(&self) -> &str {
        &self.url
    }
}

impl PlaywrightHomePage {
    pub async fn get_started_link(&self) -> Locator {
        self.page
            .find(&By::role_named(Role::Link, "Get started"))
            .await
    }

    pub async fn get_started(&self) -> Result<()> {
        let link = self.get_started_link().await;
        self.actions.click(&link).await
    }
}
