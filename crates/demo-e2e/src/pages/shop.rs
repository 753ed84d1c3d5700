// Demo e-commerce store: landing page and customer sign-in
//
// See: https://magento.softwaretestingboard.com/

use crate::actions::Actions;
use crate::config::{Credentials, SuiteConfig};
use crate::error::Result;
use crate::page_object::PageObject;
use crate::selector::{By, Locate, Role};
use playwright_rs::{Locator, Page};

/// Store landing page.
pub struct ShopHomePage {
    page: Page,
    url: String,
    actions: Actions,
}

impl PageObject for ShopHomePage {
    fn attach(page: Page, config: &SuiteConfig) -> Self {
        Self {
            page,
            url: config.shop_url.to_string(),
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

impl ShopHomePage {
    /// Promotional link or banner labelled `text`.
    pub async fn promo_link(&self, text: &str) -> Locator {
        self.page.find(&By::text(text)).await.first()
    }

    pub async fn heading(&self, name: &str) -> Locator {
        self.page
            .find(&By::role_named(Role::Heading, name))
            .await
    }

    pub async fn open_promo(&self, text: &str) -> Result<()> {
        let link = self.promo_link(text).await;
        self.actions.click(&link).await
    }
}

/// Customer sign-in form.
pub struct ShopLoginPage {
    page: Page,
    url: String,
    actions: Actions,
    credentials: Credentials,
}

impl PageObject for ShopLoginPage {
    fn attach(page: Page, config: &SuiteConfig) -> Self {
        Self {
            page,
            url: config.shop_login_url(),
            actions: Actions::new(config.action_timeout),
            credentials: config.shop_credentials.clone(),
        }
    }

    fn page(&self) -> &Page {
        &self.page
    }

    fn url(&self) -> &str {
        &self.url
    }
}

impl ShopLoginPage {
    pub async fn email(&self) -> Locator {
        self.page.find(&By::title("Email")).await
    }

    pub async fn password(&self) -> Locator {
        self.page.find(&By::title("Password")).await
    }

    pub async fn sign_in_button(&self) -> Locator {
        self.page
            .find(&By::role_named(Role::Button, "Sign In"))
            .await
    }

    /// Greeting shown in the header once signed in.
    pub async fn welcome_message(&self) -> Locator {
        self.page.find(&By::text("Welcome")).await.first()
    }

    /// Signs in with the configured account.
    pub async fn sign_in(&self) -> Result<()> {
        self.sign_in_as(&self.credentials).await
    }

    pub async fn sign_in_as(&self, credentials: &Credentials) -> Result<()> {
        tracing::debug!(email = %credentials.email, "sign_in");
        self.actions.fill(&self.email().await, &credentials.email).await?;
        self.actions
            .fill(&self.password().await, &credentials.password)
            .await?;
        self.actions.click(&self.sign_in_button().await).await
    }
}
