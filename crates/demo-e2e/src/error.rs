// Error types for page objects and scenarios

use std::time::Duration;
use thiserror::Error;

/// Result type alias for page-object and scenario operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by page objects to the scenario that invoked them.
///
/// Every failure aborts the enclosing scenario. Nothing here is retried; the
/// polling helpers only wait for a condition, they never repeat an action.
#[derive(Debug, Error)]
pub enum Error {
    /// A locator matched no element (or not the one element an action needs)
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// An action's actionability precondition was never satisfied
    ///
    /// Includes the selector the action was aimed at.
    #[error("Action timed out: {0}")]
    ActionTimeout(String),

    /// Observed DOM or page state differs from the expected state
    #[error(
        "Assertion failed for {description}: expected {expected}, but observed {actual} after {waited:?}"
    )]
    AssertionMismatch {
        description: String,
        expected: String,
        actual: String,
        waited: Duration,
    },

    /// Single-element assertion failure reported by the driver's `expect`
    #[error("Assertion failed: {0}")]
    Assertion(String),

    /// Navigation did not complete
    #[error("Navigation to '{url}' failed: {reason}")]
    Navigation { url: String, reason: String },

    /// Persisted application state never reached the expected shape
    #[error(
        "Persisted state under '{key}' did not satisfy '{condition}' within {waited:?} (last seen: {last_seen})"
    )]
    StoragePollTimeout {
        key: String,
        condition: String,
        last_seen: String,
        waited: Duration,
    },

    /// Persisted state exists but is not a list of todo records
    #[error("Malformed persisted state under '{key}': {source}")]
    MalformedStorage {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Invalid suite configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Invalid argument provided to a helper (e.g. a bad regex pattern)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Any other driver failure (launch, transport, closed target, ...)
    #[error("Driver error: {0}")]
    Driver(#[source] playwright_rs::Error),

    /// Error with additional context
    #[error("{0}: {1}")]
    Context(String, #[source] Box<Error>),
}

/// Coarse classification of [`Error`], used by scenarios and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ElementResolution,
    ActionTimeout,
    AssertionMismatch,
    StoragePollTimeout,
    Navigation,
    Configuration,
    Driver,
}

impl Error {
    /// Adds context to the error
    pub fn context(self, msg: impl Into<String>) -> Self {
        Error::Context(msg.into(), Box::new(self))
    }

    /// Classifies the error, looking through any context wrappers.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::ElementNotFound(_) => ErrorKind::ElementResolution,
            Error::ActionTimeout(_) => ErrorKind::ActionTimeout,
            Error::AssertionMismatch { .. } | Error::Assertion(_) => ErrorKind::AssertionMismatch,
            Error::StoragePollTimeout { .. } | Error::MalformedStorage { .. } => {
                ErrorKind::StoragePollTimeout
            }
            Error::Navigation { .. } => ErrorKind::Navigation,
            Error::Config(_) | Error::InvalidArgument(_) => ErrorKind::Configuration,
            Error::Driver(_) => ErrorKind::Driver,
            Error::Context(_, inner) => inner.kind(),
        }
    }

    /// Converts a driver error raised while acting on `selector`.
    ///
    /// The selector is appended unless the driver already mentioned it.
    pub(crate) fn from_action(error: playwright_rs::Error, selector: &str) -> Self {
        let with_selector = |msg: String| {
            if msg.contains(selector) {
                msg
            } else {
                format!("{} [selector: {}]", msg, selector)
            }
        };
        match error {
            playwright_rs::Error::ElementNotFound(_) => {
                Error::ElementNotFound(format!("selector '{}'", selector))
            }
            playwright_rs::Error::Timeout(msg) => Error::ActionTimeout(with_selector(msg)),
            playwright_rs::Error::ProtocolError(msg) if is_timeout_message(&msg) => {
                Error::ActionTimeout(with_selector(msg))
            }
            other => Error::from(other).context(format!("acting on '{}'", selector)),
        }
    }
}

/// The driver reports actionability timeouts as protocol errors whose message
/// starts with "Timeout".
fn is_timeout_message(msg: &str) -> bool {
    msg.starts_with("Timeout") || msg.contains("TimeoutError")
}

impl From<playwright_rs::Error> for Error {
    fn from(error: playwright_rs::Error) -> Self {
        match error {
            playwright_rs::Error::ElementNotFound(selector) => {
                Error::ElementNotFound(format!("selector '{}'", selector))
            }
            playwright_rs::Error::Timeout(msg) => Error::ActionTimeout(msg),
            playwright_rs::Error::AssertionTimeout(msg) => Error::Assertion(msg),
            playwright_rs::Error::NavigationTimeout { url, duration_ms } => Error::Navigation {
                url,
                reason: format!("timed out after {}ms", duration_ms),
            },
            other => Error::Driver(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_driver_errors_are_classified() {
        let err = Error::from(playwright_rs::Error::ElementNotFound("#missing".into()));
        assert_eq!(err.kind(), ErrorKind::ElementResolution);
        assert!(err.to_string().contains("#missing"));

        let err = Error::from(playwright_rs::Error::AssertionTimeout(
            "Expected element '#btn' to be visible".into(),
        ));
        assert_eq!(err.kind(), ErrorKind::AssertionMismatch);

        let err = Error::from(playwright_rs::Error::NavigationTimeout {
            url: "https://demo.playwright.dev/todomvc".into(),
            duration_ms: 30000,
        });
        assert_eq!(err.kind(), ErrorKind::Navigation);
        assert!(err.to_string().contains("30000ms"));

        let err = Error::from(playwright_rs::Error::ChannelClosed);
        assert_eq!(err.kind(), ErrorKind::Driver);
    }

    #[test]
    fn test_action_errors_carry_selector() {
        let err = Error::from_action(
            playwright_rs::Error::Timeout("Timeout 1000ms exceeded".into()),
            "internal:testid=[data-testid=\"todo-item\"s]",
        );
        assert_eq!(err.kind(), ErrorKind::ActionTimeout);
        assert!(err.to_string().contains("data-testid"));

        let err = Error::from_action(
            playwright_rs::Error::ProtocolError("Timeout 500ms exceeded.".into()),
            "#toggle",
        );
        assert_eq!(err.kind(), ErrorKind::ActionTimeout);
        assert!(err.to_string().contains("[selector: #toggle]"));

        let err = Error::from_action(
            playwright_rs::Error::TargetClosed {
                target_type: "Page".into(),
                context: String::new(),
            },
            "#toggle",
        );
        assert_eq!(err.kind(), ErrorKind::Driver);
        assert!(err.to_string().starts_with("acting on '#toggle'"));
    }

    #[test]
    fn test_kind_looks_through_context() {
        let err = Error::StoragePollTimeout {
            key: "react-todos".into(),
            condition: "3 records".into(),
            last_seen: "[]".into(),
            waited: Duration::from_secs(5),
        }
        .context("standard list setup");
        assert_eq!(err.kind(), ErrorKind::StoragePollTimeout);
        assert!(err.to_string().starts_with("standard list setup: "));
    }
}
