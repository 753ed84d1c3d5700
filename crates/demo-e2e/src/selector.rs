// Selector strategies - Semantic element selection
//
// Page objects describe elements by what a user perceives (role and
// accessible name, label, placeholder, test id) rather than by presentation
// classes. Each strategy renders into the selector-engine syntax that
// Playwright's own `getBy*` helpers produce, so the driver resolves it with
// the same semantics.
//
// See: https://playwright.dev/docs/locators

use async_trait::async_trait;
use playwright_rs::{Locator, Page};
use std::fmt;

/// ARIA roles used by the page objects in this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Button,
    Link,
    Checkbox,
    Textbox,
    Heading,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Button => "button",
            Role::Link => "link",
            Role::Checkbox => "checkbox",
            Role::Textbox => "textbox",
            Role::Heading => "heading",
        }
    }
}

/// A selection strategy for zero or more DOM elements.
///
/// Prefer the accessibility-based strategies; [`By::Css`] is kept for the
/// few places where no semantic handle exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum By {
    /// Element with the given ARIA role, optionally filtered by accessible name
    Role {
        role: Role,
        name: Option<String>,
        exact: bool,
    },
    /// Form control associated with a `<label>` or `aria-label`
    Label { text: String, exact: bool },
    /// Input with the given placeholder
    Placeholder { text: String, exact: bool },
    /// Element with the given `data-testid` (always exact)
    TestId(String),
    /// Element with the given `title` attribute
    Title { text: String, exact: bool },
    /// Element containing the given text
    Text { text: String, exact: bool },
    /// Raw CSS (or any other engine) selector
    Css(String),
}

impl By {
    pub fn role(role: Role) -> Self {
        By::Role {
            role,
            name: None,
            exact: false,
        }
    }

    pub fn role_named(role: Role, name: impl Into<String>) -> Self {
        By::Role {
            role,
            name: Some(name.into()),
            exact: false,
        }
    }

    pub fn label(text: impl Into<String>) -> Self {
        By::Label {
            text: text.into(),
            exact: false,
        }
    }

    pub fn placeholder(text: impl Into<String>) -> Self {
        By::Placeholder {
            text: text.into(),
            exact: false,
        }
    }

    pub fn test_id(id: impl Into<String>) -> Self {
        By::TestId(id.into())
    }

    pub fn title(text: impl Into<String>) -> Self {
        By::Title {
            text: text.into(),
            exact: false,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        By::Text {
            text: text.into(),
            exact: false,
        }
    }

    pub fn css(selector: impl Into<String>) -> Self {
        By::Css(selector.into())
    }

    /// Requires a full, case-sensitive match of the name or text.
    ///
    /// No effect on [`By::TestId`] (already exact) and [`By::Css`].
    pub fn exact(mut self) -> Self {
        match &mut self {
            By::Role { exact, .. }
            | By::Label { exact, .. }
            | By::Placeholder { exact, .. }
            | By::Title { exact, .. }
            | By::Text { exact, .. } => *exact = true,
            By::TestId(_) | By::Css(_) => {}
        }
        self
    }

    /// Renders the selector string understood by the driver.
    pub fn selector(&self) -> String {
        match self {
            By::Role { role, name, exact } => match name {
                Some(name) => format!(
                    "internal:role={}[name={}]",
                    role.as_str(),
                    quote_attribute(name, *exact)
                ),
                None => format!("internal:role={}", role.as_str()),
            },
            By::Label { text, exact } => format!("internal:label={}", quote_text(text, *exact)),
            By::Placeholder { text, exact } => {
                format!("internal:attr=[placeholder={}]", quote_attribute(text, *exact))
            }
            By::TestId(id) => format!("internal:testid=[data-testid={}]", quote_attribute(id, true)),
            By::Title { text, exact } => {
                format!("internal:attr=[title={}]", quote_attribute(text, *exact))
            }
            By::Text { text, exact } => format!("internal:text={}", quote_text(text, *exact)),
            By::Css(selector) => selector.clone(),
        }
    }
}

impl fmt::Display for By {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.selector())
    }
}

/// Filter that narrows a locator to elements containing `text` somewhere in
/// their subtree. Chain it after an element selector:
/// `format!("label >> {}", has_text("feed the cat"))`.
pub fn has_text(text: &str) -> String {
    format!("internal:has-text={}", quote_text(text, false))
}

fn suffix(exact: bool) -> char {
    if exact { 's' } else { 'i' }
}

// JSON string quoting; serializing a &str cannot fail.
fn quote_text(text: &str, exact: bool) -> String {
    let quoted = serde_json::to_string(text).unwrap_or_else(|_| format!("\"{}\"", text));
    format!("{}{}", quoted, suffix(exact))
}

fn quote_attribute(value: &str, exact: bool) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{}\"{}", escaped, suffix(exact))
}

/// Resolves a [`By`] strategy into a driver locator.
///
/// A fresh locator is built on every call; locators re-query the DOM on each
/// use, so nothing resolved here outlives a re-render.
#[async_trait]
pub trait Locate {
    async fn find(&self, by: &By) -> Locator;
}

#[async_trait]
impl Locate for Page {
    async fn find(&self, by: &By) -> Locator {
        self.locator(&by.selector()).await
    }
}

#[async_trait]
impl Locate for Locator {
    async fn find(&self, by: &By) -> Locator {
        self.locator(&by.selector())
    }
}
