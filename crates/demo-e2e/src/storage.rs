// Storage - Typed access to the todo app's persisted list
//
// The app writes its list to `localStorage` as a JSON array of records some
// time after each user action. This is the one place that parses that
// external format. Scenarios only ever wait for a condition on it; the
// single-snapshot `read()` exists for diagnostics.

use crate::error::{Error, Result};
use crate::wait::{Attempt, Poll};
use playwright_rs::Page;
use serde::{Deserialize, Serialize};

/// `localStorage` key under which the demo app persists its list
pub const TODO_STORAGE_KEY: &str = "react-todos";

/// One persisted todo item. Fields the app stores beyond these are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoRecord {
    pub title: String,
    pub completed: bool,
}

impl TodoRecord {
    pub fn new(title: impl Into<String>, completed: bool) -> Self {
        Self {
            title: title.into(),
            completed,
        }
    }
}

/// Parses the raw value stored under `key`.
///
/// A missing key means the app has not persisted anything yet and reads as
/// an empty list. A value that is not a list of records is an error: the
/// app's storage contract has changed and waiting will not fix it.
pub fn parse_records(key: &str, raw: Option<&str>) -> Result<Vec<TodoRecord>> {
    match raw {
        None => Ok(Vec::new()),
        Some(raw) => serde_json::from_str(raw).map_err(|source| Error::MalformedStorage {
            key: key.to_string(),
            source,
        }),
    }
}

/// Read-only view of the persisted todo list of one page.
#[derive(Clone)]
pub struct TodoStore<'a> {
    page: &'a Page,
    key: String,
    poll: Poll,
}

impl<'a> TodoStore<'a> {
    pub fn new(page: &'a Page, poll: Poll) -> Self {
        Self {
            page,
            key: TODO_STORAGE_KEY.to_string(),
            poll,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Single snapshot of the persisted list.
    pub async fn read(&self) -> Result<Vec<TodoRecord>> {
        let raw: Option<String> = self
            .page
            .evaluate("key => window.localStorage.getItem(key)", Some(&self.key))
            .await?;
        parse_records(&self.key, raw.as_deref())
    }

    /// Waits until the persisted list satisfies `predicate`.
    ///
    /// `condition` describes the predicate in the timeout error.
    pub async fn wait_until<P>(&self, condition: &str, predicate: P) -> Result<Vec<TodoRecord>>
    where
        P: Fn(&[TodoRecord]) -> bool,
    {
        tracing::debug!(key = %self.key, condition, "waiting for persisted state");
        let predicate = &predicate;
        self.poll
            .until(
                || async move {
                    let records = self.read().await?;
                    Ok::<_, Error>(if predicate(&records) {
                        Attempt::Ready(records)
                    } else {
                        Attempt::Pending(format!("{:?}", records))
                    })
                },
                |stalled| Error::StoragePollTimeout {
                    key: self.key.clone(),
                    condition: condition.to_string(),
                    last_seen: stalled.last_observed,
                    waited: stalled.waited,
                },
            )
            .await
    }

    /// Waits until exactly `expected` records are persisted.
    pub async fn wait_for_count(&self, expected: usize) -> Result<()> {
        self.wait_until(&format!("{} records", expected), |records| {
            records.len() == expected
        })
        .await
        .map(|_| ())
    }

    /// Waits until exactly `expected` persisted records are completed.
    pub async fn wait_for_completed_count(&self, expected: usize) -> Result<()> {
        self.wait_until(&format!("{} completed records", expected), |records| {
            completed_count(records) == expected
        })
        .await
        .map(|_| ())
    }

    /// Waits until a record titled `title` is persisted.
    pub async fn wait_for_title(&self, title: &str) -> Result<()> {
        self.wait_until(&format!("a record titled '{}'", title), |records| {
            records.iter().any(|r| r.title == title)
        })
        .await
        .map(|_| ())
    }

    /// Waits until the persisted list equals `expected`, order included.
    pub async fn wait_for_records(&self, expected: &[TodoRecord]) -> Result<()> {
        self.wait_until(&format!("records {:?}", expected), |records| {
            records == expected
        })
        .await
        .map(|_| ())
    }
}

pub fn completed_count(records: &[TodoRecord]) -> usize {
    records.iter().filter(|r| r.completed).count()
}
