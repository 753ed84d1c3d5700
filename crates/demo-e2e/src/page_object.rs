// Page object contract
//
// A page object is a facade over one logical page: it knows the page's URL,
// hands out locators for the elements scenarios care about, and bundles the
// multi-step actions scenarios repeat. It holds the session's page handle
// and nothing else that outlives a single call.

use crate::config::SuiteConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use playwright_rs::Page;

#[async_trait]
pub trait PageObject: Send + Sync + Sized {
    /// Binds the page object to a session's page. Does not navigate.
    fn attach(page: Page, config: &SuiteConfig) -> Self;

    fn page(&self) -> &Page;

    /// Canonical URL loaded by [`PageObject::navigate`].
    fn url(&self) -> &str;

    /// Loads the canonical URL.
    ///
    /// Fails if the driver reports a navigation error or the server answers
    /// with an error status. Not retried.
    async fn navigate(&self) -> Result<()> {
        let url = self.url();
        tracing::debug!(url, "navigate");
        let response = self
            .page()
            .goto(url, None)
            .await
            .map_err(|e| navigation_error(url, e))?;

        match response {
            Some(response) if response.status() >= 400 => Err(Error::Navigation {
                url: url.to_string(),
                reason: format!("HTTP {} {}", response.status(), response.status_text()),
            }),
            _ => Ok(()),
        }
    }

    /// Steps back one entry in the session history.
    async fn go_back(&self) -> Result<()> {
        tracing::debug!(from = %self.page().url(), "go_back");
        self.page().evaluate_expression("history.back()").await?;
        Ok(())
    }

    /// Reloads the current document.
    async fn reload(&self) -> Result<()> {
        let url = self.page().url();
        tracing::debug!(url = %url, "reload");
        self.page()
            .reload(None)
            .await
            .map_err(|e| navigation_error(&url, e))?;
        Ok(())
    }

    fn current_url(&self) -> String {
        self.page().url()
    }
}

fn navigation_error(url: &str, error: playwright_rs::Error) -> Error {
    match Error::from(error) {
        err @ Error::Navigation { .. } => err,
        other => Error::Navigation {
            url: url.to_string(),
            reason: other.to_string(),
        },
    }
}
