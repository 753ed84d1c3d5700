// Actions - Driver action primitives with a suite-wide timeout
//
// Every interaction a page object performs goes through here so that each
// one waits at most the configured action timeout and each failure names the
// selector it was aimed at.

use crate::error::{Error, Result};
use playwright_rs::{CheckOptions, ClickOptions, FillOptions, Locator, PressOptions};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Actions {
    timeout_ms: f64,
}

impl Actions {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout_ms: timeout.as_millis() as f64,
        }
    }

    pub async fn fill(&self, locator: &Locator, text: &str) -> Result<()> {
        tracing::debug!(selector = locator.selector(), text, "fill");
        let options = FillOptions {
            timeout: Some(self.timeout_ms),
            ..Default::default()
        };
        locator
            .fill(text, Some(options))
            .await
            .map_err(|e| Error::from_action(e, locator.selector()))
    }

    pub async fn press(&self, locator: &Locator, key: &str) -> Result<()> {
        tracing::debug!(selector = locator.selector(), key, "press");
        let options = PressOptions {
            timeout: Some(self.timeout_ms),
            ..Default::default()
        };
        locator
            .press(key, Some(options))
            .await
            .map_err(|e| Error::from_action(e, locator.selector()))
    }

    pub async fn click(&self, locator: &Locator) -> Result<()> {
        tracing::debug!(selector = locator.selector(), "click");
        locator
            .click(Some(self.click_options()))
            .await
            .map_err(|e| Error::from_action(e, locator.selector()))
    }

    pub async fn dblclick(&self, locator: &Locator) -> Result<()> {
        tracing::debug!(selector = locator.selector(), "dblclick");
        locator
            .dblclick(Some(self.click_options()))
            .await
            .map_err(|e| Error::from_action(e, locator.selector()))
    }

    /// Checks or unchecks a checkbox; a no-op if it is already in that state.
    pub async fn set_checked(&self, locator: &Locator, checked: bool) -> Result<()> {
        tracing::debug!(selector = locator.selector(), checked, "set_checked");
        let options = CheckOptions {
            timeout: Some(self.timeout_ms),
            ..Default::default()
        };
        locator
            .set_checked(checked, Some(options))
            .await
            .map_err(|e| Error::from_action(e, locator.selector()))
    }

    pub async fn check(&self, locator: &Locator) -> Result<()> {
        self.set_checked(locator, true).await
    }

    pub async fn uncheck(&self, locator: &Locator) -> Result<()> {
        self.set_checked(locator, false).await
    }

    fn click_options(&self) -> ClickOptions {
        ClickOptions {
            timeout: Some(self.timeout_ms),
            ..Default::default()
        }
    }
}
