// Session - One isolated browser page per scenario
//
// A session owns the driver process, the browser, a fresh browser context
// and the single page a scenario drives. Contexts never share cookies or
// storage, so scenarios can run in parallel without seeing each other's
// state.

use crate::config::{BrowserKind, SuiteConfig};
use crate::error::Result;
use playwright_rs::{Browser, BrowserContext, LaunchOptions, Page, Playwright};

pub struct Session {
    playwright: Playwright,
    browser: Browser,
    context: BrowserContext,
    page: Page,
}

impl Session {
    /// Launches the driver and browser described by `config` and opens a page.
    pub async fn start(config: &SuiteConfig) -> Result<Self> {
        tracing::debug!(
            browser = config.browser.as_str(),
            headless = config.headless,
            "starting session"
        );

        let playwright = Playwright::launch().await?;
        let browser_type = match config.browser {
            BrowserKind::Chromium => playwright.chromium(),
            BrowserKind::Firefox => playwright.firefox(),
            BrowserKind::Webkit => playwright.webkit(),
        };

        let mut options = LaunchOptions::new().headless(config.headless);
        if let Some(ms) = config.slow_mo_ms {
            options = options.slow_mo(ms);
        }
        let browser = browser_type.launch_with_options(options).await?;
        let context = browser.new_context().await?;
        let page = context.new_page().await?;

        Ok(Self {
            playwright,
            browser,
            context,
            page,
        })
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Closes the context, the browser and the driver, in that order.
    ///
    /// Every step runs even if an earlier one fails; the first failure is
    /// returned.
    pub async fn close(self) -> Result<()> {
        let context = self.context.close().await;
        let browser = self.browser.close().await;
        let driver = self.playwright.shutdown().await;

        for (what, outcome) in [("context", &context), ("browser", &browser), ("driver", &driver)] {
            if let Err(e) = outcome {
                tracing::warn!("Failed to close {}: {}", what, e);
            }
        }

        context?;
        browser?;
        driver?;
        Ok(())
    }
}
