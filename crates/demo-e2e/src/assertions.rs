// Assertions - Auto-retry assertions over element lists and pages
//
// The driver's `expect()` covers single-element state (visible, checked,
// text, value). Scenarios also assert on whole lists ("the three items read
// A, B, C", "item classes are completed, '', ''") and on the page itself
// (title, URL). Those live here with the same shape: retry until the
// condition holds or the timeout elapses, optionally negated.
//
// See: https://playwright.dev/docs/test-assertions

use crate::error::{Error, ErrorKind, Result};
use crate::wait::{Attempt, Poll, Stalled};
use playwright_rs::{Locator, Page};
use regex::Regex;
use std::future::Future;
use std::time::Duration;

/// Longest a read of one list element may take. Elements that exist answer
/// at once; a read that outlasts this means the list changed while it was
/// being read.
const ELEMENT_READ_TIMEOUT: Duration = Duration::from_secs(1);

/// Creates an expectation over every element a locator matches.
pub fn expect_all(locator: Locator) -> ListExpectation {
    ListExpectation {
        locator,
        poll: Poll::default(),
        negate: false,
    }
}

/// Creates an expectation over page-level state.
pub fn expect_page(page: &Page) -> PageExpectation<'_> {
    PageExpectation {
        page,
        poll: Poll::default(),
        negate: false,
    }
}

/// Expectation over the ordered list of elements a locator matches.
pub struct ListExpectation {
    locator: Locator,
    poll: Poll,
    negate: bool,
}

// to_* methods consume self, mirroring the driver's expect API
#[allow(clippy::wrong_self_convention)]
impl ListExpectation {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.poll = Poll::new(timeout).with_interval(self.poll.interval());
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll = self.poll.with_interval(interval);
        self
    }

    pub fn with_poll(mut self, poll: Poll) -> Self {
        self.poll = poll;
        self
    }

    /// Negates the assertion.
    #[allow(clippy::should_implement_trait)]
    pub fn not(mut self) -> Self {
        self.negate = true;
        self
    }

    /// Asserts the locator matches exactly `expected` elements.
    pub async fn to_have_count(self, expected: usize) -> Result<()> {
        let locator = &self.locator;
        self.check(&expected.to_string(), || async move {
            let count = locator.count().await?;
            Ok::<_, Error>((count == expected, count.to_string()))
        })
        .await
    }

    /// Asserts the matched elements' visible texts equal `expected`, in order.
    ///
    /// Whitespace is collapsed and trimmed before comparison.
    pub async fn to_have_texts(self, expected: &[&str]) -> Result<()> {
        let expected: Vec<String> = expected.iter().map(|t| normalize_whitespace(t)).collect();
        let rendered = format!("{:?}", expected);
        let locator = &self.locator;
        let expected = &expected;
        self.check(&rendered, || async move {
            let actual = inner_texts(locator).await?;
            Ok::<_, Error>((&actual == expected, format!("{:?}", actual)))
        })
        .await
    }

    /// Asserts each matched element's `class` attribute equals `expected`, in order.
    ///
    /// An element without a `class` attribute compares equal to `""`.
    pub async fn to_have_classes(self, expected: &[&str]) -> Result<()> {
        let expected: Vec<String> = expected.iter().map(|c| c.trim().to_string()).collect();
        let rendered = format!("{:?}", expected);
        let locator = &self.locator;
        let expected = &expected;
        self.check(&rendered, || async move {
            let actual = classes(locator).await?;
            Ok::<_, Error>((&actual == expected, format!("{:?}", actual)))
        })
        .await
    }

    /// Asserts the single matched element's `class` attribute equals `expected`.
    pub async fn to_have_class(self, expected: &str) -> Result<()> {
        let locator = &self.locator;
        let wanted = expected.trim();
        self.check(&format!("class '{}'", wanted), || async move {
            let actual = class_of(locator).await?;
            Ok::<_, Error>((actual == wanted, format!("class '{}'", actual)))
        })
        .await
    }

    /// Asserts the single matched element carries `token` among its classes.
    pub async fn to_contain_class(self, token: &str) -> Result<()> {
        let locator = &self.locator;
        self.check(&format!("class token '{}'", token), || async move {
            let actual = class_of(locator).await?;
            let has = actual.split_whitespace().any(|c| c == token);
            Ok::<_, Error>((has, format!("class '{}'", actual)))
        })
        .await
    }

    async fn check<F, Fut>(&self, expected: &str, mut observe: F) -> Result<()>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<(bool, String)>>,
    {
        let negate = self.negate;
        self.poll
            .until(
                || {
                    let observed = observe();
                    async move { settle(observed.await, negate) }
                },
                |stalled| self.mismatch(expected, stalled),
            )
            .await
    }

    fn mismatch(&self, expected: &str, stalled: Stalled) -> Error {
        mismatch(
            format!("'{}'", self.locator.selector()),
            expected,
            self.negate,
            stalled,
        )
    }
}

/// Expectation over page title and URL.
pub struct PageExpectation<'a> {
    page: &'a Page,
    poll: Poll,
    negate: bool,
}

#[allow(clippy::wrong_self_convention)]
impl<'a> PageExpectation<'a> {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.poll = Poll::new(timeout).with_interval(self.poll.interval());
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll = self.poll.with_interval(interval);
        self
    }

    pub fn with_poll(mut self, poll: Poll) -> Self {
        self.poll = poll;
        self
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(mut self) -> Self {
        self.negate = true;
        self
    }

    /// Asserts the document title matches the regex `pattern`.
    pub async fn to_have_title(self, pattern: &str) -> Result<()> {
        let re = compile(pattern)?;
        let page = self.page;
        let negate = self.negate;
        self.poll
            .until(
                || {
                    let re = &re;
                    async move {
                        let title = page.title().await?;
                        Ok::<_, Error>(if re.is_match(&title) != negate {
                            Attempt::Ready(())
                        } else {
                            Attempt::Pending(format!("title '{}'", title))
                        })
                    }
                },
                |stalled| {
                    mismatch(
                        "page title".to_string(),
                        &format!("/{}/", pattern),
                        negate,
                        stalled,
                    )
                },
            )
            .await
    }

    /// Asserts the current URL matches the regex `pattern`.
    pub async fn to_have_url(self, pattern: &str) -> Result<()> {
        let re = compile(pattern)?;
        let page = self.page;
        let negate = self.negate;
        self.poll
            .until(
                || {
                    let url = page.url();
                    let matched = re.is_match(&url);
                    async move {
                        Ok::<_, Error>(if matched != negate {
                            Attempt::Ready(())
                        } else {
                            Attempt::Pending(format!("url '{}'", url))
                        })
                    }
                },
                |stalled| {
                    mismatch(
                        "page URL".to_string(),
                        &format!("/{}/", pattern),
                        negate,
                        stalled,
                    )
                },
            )
            .await
    }
}

/// Turns one observation of a list into an attempt outcome.
///
/// A list element that vanished mid-read means the app is still
/// re-rendering, so the attempt is retried; any other error ends the wait.
fn settle(observed: Result<(bool, String)>, negate: bool) -> Result<Attempt<()>> {
    match observed {
        Ok((holds, _)) if holds != negate => Ok(Attempt::Ready(())),
        Ok((_, actual)) => Ok(Attempt::Pending(actual)),
        Err(e) if e.kind() == ErrorKind::ElementResolution => {
            Ok(Attempt::Pending(e.to_string()))
        }
        Err(e) => Err(e),
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| Error::InvalidArgument(format!("Invalid regex: {}", e)))
}

fn mismatch(description: String, expected: &str, negate: bool, stalled: Stalled) -> Error {
    let expected = if negate {
        format!("not {}", expected)
    } else {
        expected.to_string()
    };
    Error::AssertionMismatch {
        description,
        expected,
        actual: stalled.last_observed,
        waited: stalled.waited,
    }
}

/// Collapses runs of whitespace into a single space and trims the ends.
pub(crate) fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Visible text of every element the locator matches, in document order.
///
/// Fails with [`Error::ElementNotFound`] if an element counted at the start
/// is gone by the time it is read.
pub async fn inner_texts(locator: &Locator) -> Result<Vec<String>> {
    let count = locator.count().await?;
    let mut texts = Vec::with_capacity(count);
    for index in 0..count {
        let element = locator.nth(index as i32);
        let text = read_element(locator.selector(), index, element.inner_text()).await?;
        texts.push(normalize_whitespace(&text));
    }
    Ok(texts)
}

/// `class` attribute of every element the locator matches, in document order.
///
/// Fails like [`inner_texts`] when the list shrinks mid-read.
pub async fn classes(locator: &Locator) -> Result<Vec<String>> {
    let count = locator.count().await?;
    let mut classes = Vec::with_capacity(count);
    for index in 0..count {
        let element = locator.nth(index as i32);
        classes.push(class_of(&element).await?);
    }
    Ok(classes)
}

/// Reads element `index` of the list `selector`, bounded by
/// [`ELEMENT_READ_TIMEOUT`].
async fn read_element<T, Fut>(selector: &str, index: usize, read: Fut) -> Result<T>
where
    Fut: Future<Output = playwright_rs::Result<T>>,
{
    match tokio::time::timeout(ELEMENT_READ_TIMEOUT, read).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => match Error::from_action(e, selector) {
            err @ (Error::ElementNotFound(_) | Error::ActionTimeout(_)) => Err(
                Error::ElementNotFound(format!("'{}' element {}: {}", selector, index, err)),
            ),
            other => Err(other),
        },
        Err(_) => Err(Error::ElementNotFound(format!(
            "'{}' element {} disappeared while the list was read",
            selector, index
        ))),
    }
}

async fn class_of(locator: &Locator) -> Result<String> {
    let class = read_element(locator.selector(), 0, locator.get_attribute("class")).await?;
    Ok(class.unwrap_or_default().trim().to_string())
}
