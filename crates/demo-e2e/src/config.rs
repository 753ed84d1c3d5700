// Suite configuration
//
// Defaults reproduce the hosted demo sites. Every value can be overridden
// from the environment so the same scenarios run against a local replica,
// in a headed browser, or with a slower action pace.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

/// Hosted TodoMVC demo
pub const DEFAULT_TODO_APP_URL: &str = "https://demo.playwright.dev/todomvc";

/// Playwright documentation site
pub const DEFAULT_PLAYWRIGHT_HOME_URL: &str = "https://playwright.dev";

/// Demo e-commerce store
pub const DEFAULT_SHOP_URL: &str = "https://magento.softwaretestingboard.com/";

/// Path of the store's sign-in form, relative to the store URL
const SHOP_LOGIN_PATH: &str = "customer/account/login/";

/// Default timeout for driver actions in milliseconds (the driver's own default)
pub const DEFAULT_ACTION_TIMEOUT_MS: u64 = 30_000;

/// Browser engine a session is launched with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrowserKind {
    #[default]
    Chromium,
    Firefox,
    Webkit,
}

impl BrowserKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BrowserKind::Chromium => "chromium",
            BrowserKind::Firefox => "firefox",
            BrowserKind::Webkit => "webkit",
        }
    }
}

impl FromStr for BrowserKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chromium" | "chrome" => Ok(BrowserKind::Chromium),
            "firefox" => Ok(BrowserKind::Firefox),
            "webkit" | "safari" => Ok(BrowserKind::Webkit),
            other => Err(Error::Config(format!(
                "unknown browser '{}', expected chromium, firefox or webkit",
                other
            ))),
        }
    }
}

/// Account used by the store sign-in scenario.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            email: "useremail@gmail.com".to_string(),
            password: "Password123".to_string(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Settings shared by every scenario in a run.
#[derive(Debug, Clone)]
pub struct SuiteConfig {
    pub browser: BrowserKind,
    pub headless: bool,
    pub slow_mo_ms: Option<f64>,
    pub todo_app_url: Url,
    pub playwright_home_url: Url,
    pub shop_url: Url,
    pub shop_credentials: Credentials,
    pub action_timeout: Duration,
    pub expect_timeout: Duration,
    pub poll_interval: Duration,
}

impl SuiteConfig {
    /// Built-in settings: the hosted demo sites, headless Chromium and the
    /// driver's default timeouts.
    pub fn new() -> Result<Self> {
        Ok(Self {
            browser: BrowserKind::default(),
            headless: true,
            slow_mo_ms: None,
            todo_app_url: parse_url("todo app URL", DEFAULT_TODO_APP_URL)?,
            playwright_home_url: parse_url("Playwright home URL", DEFAULT_PLAYWRIGHT_HOME_URL)?,
            shop_url: parse_url("shop URL", DEFAULT_SHOP_URL)?,
            shop_credentials: Credentials::default(),
            action_timeout: Duration::from_millis(DEFAULT_ACTION_TIMEOUT_MS),
            expect_timeout: crate::wait::DEFAULT_POLL_TIMEOUT,
            poll_interval: crate::wait::DEFAULT_POLL_INTERVAL,
        })
    }

    /// Reads overrides from the process environment.
    ///
    /// | Variable                | Meaning                                   |
    /// |-------------------------|-------------------------------------------|
    /// | `E2E_BROWSER`           | `chromium` (default), `firefox`, `webkit` |
    /// | `E2E_HEADLESS`          | `true` (default) / `false`                |
    /// | `E2E_SLOW_MO_MS`        | delay inserted before each driver action  |
    /// | `E2E_TODO_URL`          | TodoMVC app URL                           |
    /// | `E2E_PLAYWRIGHT_URL`    | documentation site URL                    |
    /// | `E2E_SHOP_URL`          | store URL                                 |
    /// | `E2E_SHOP_EMAIL`        | store account email                       |
    /// | `E2E_SHOP_PASSWORD`     | store account password                    |
    /// | `E2E_ACTION_TIMEOUT_MS` | per-action timeout                        |
    /// | `E2E_EXPECT_TIMEOUT_MS` | assertion and storage poll timeout        |
    /// | `E2E_POLL_INTERVAL_MS`  | interval between polls                    |
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`SuiteConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut config = Self::new()?;

        if let Some(raw) = get("E2E_BROWSER") {
            config.browser = raw.parse()?;
        }
        if let Some(raw) = get("E2E_HEADLESS") {
            config.headless = parse_bool("E2E_HEADLESS", &raw)?;
        }
        if let Some(raw) = get("E2E_SLOW_MO_MS") {
            config.slow_mo_ms = Some(parse_millis("E2E_SLOW_MO_MS", &raw)? as f64);
        }
        if let Some(raw) = get("E2E_TODO_URL") {
            config.todo_app_url = parse_url("E2E_TODO_URL", &raw)?;
        }
        if let Some(raw) = get("E2E_PLAYWRIGHT_URL") {
            config.playwright_home_url = parse_url("E2E_PLAYWRIGHT_URL", &raw)?;
        }
        if let Some(raw) = get("E2E_SHOP_URL") {
            config.shop_url = parse_url("E2E_SHOP_URL", &raw)?;
        }
        if let Some(email) = get("E2E_SHOP_EMAIL") {
            config.shop_credentials.email = email;
        }
        if let Some(password) = get("E2E_SHOP_PASSWORD") {
            config.shop_credentials.password = password;
        }
        if let Some(raw) = get("E2E_ACTION_TIMEOUT_MS") {
            config.action_timeout =
                Duration::from_millis(parse_millis("E2E_ACTION_TIMEOUT_MS", &raw)?);
        }
        if let Some(raw) = get("E2E_EXPECT_TIMEOUT_MS") {
            config.expect_timeout =
                Duration::from_millis(parse_millis("E2E_EXPECT_TIMEOUT_MS", &raw)?);
        }
        if let Some(raw) = get("E2E_POLL_INTERVAL_MS") {
            config.poll_interval =
                Duration::from_millis(parse_millis("E2E_POLL_INTERVAL_MS", &raw)?);
        }

        Ok(config)
    }

    pub fn with_browser(mut self, browser: BrowserKind) -> Self {
        self.browser = browser;
        self
    }

    pub fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    pub fn with_todo_app_url(mut self, url: Url) -> Self {
        self.todo_app_url = url;
        self
    }

    pub fn with_playwright_home_url(mut self, url: Url) -> Self {
        self.playwright_home_url = url;
        self
    }

    pub fn with_shop_url(mut self, url: Url) -> Self {
        self.shop_url = url;
        self
    }

    pub fn with_expect_timeout(mut self, timeout: Duration) -> Self {
        self.expect_timeout = timeout;
        self
    }

    pub fn with_action_timeout(mut self, timeout: Duration) -> Self {
        self.action_timeout = timeout;
        self
    }

    /// The store's sign-in form.
    pub fn shop_login_url(&self) -> String {
        format!(
            "{}/{}",
            self.shop_url.as_str().trim_end_matches('/'),
            SHOP_LOGIN_PATH
        )
    }

    /// Poll settings for assertions and persisted-state waits.
    pub fn poll(&self) -> crate::wait::Poll {
        crate::wait::Poll::new(self.expect_timeout).with_interval(self.poll_interval)
    }
}

fn parse_bool(name: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(Error::Config(format!(
            "{} must be a boolean, got '{}'",
            name, other
        ))),
    }
}

fn parse_millis(name: &str, raw: &str) -> Result<u64> {
    raw.trim().parse::<u64>().map_err(|e| {
        Error::Config(format!(
            "{} must be a whole number of milliseconds, got '{}': {}",
            name, raw, e
        ))
    })
}

fn parse_url(name: &str, raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())
        .map_err(|e| Error::Config(format!("{} is not a valid URL '{}': {}", name, raw, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(Error::Config(format!(
            "{} must be an http(s) URL, got scheme '{}'",
            name, scheme
        ))),
    }
}
