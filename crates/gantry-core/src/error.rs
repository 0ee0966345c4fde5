//! Error types and result aliases for gantry.
//!
//! Errors are structured for programmatic handling: the consumer treats
//! [`Error::InvalidItem`] and [`Error::Serialization`] as discard-class
//! (an invalid payload can never become valid), while queue and storage
//! errors are transient-class and surfaced to retry/backoff policy.

/// The result type used throughout gantry.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in gantry operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A queue operation failed.
    #[error("queue error: {message}")]
    Queue {
        /// Description of the queue failure.
        message: String,
        /// The underlying cause, if any.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An object-store operation failed.
    #[error("storage error: {message}")]
    Storage {
        /// Description of the storage failure.
        message: String,
        /// The underlying cause, if any.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A work item was missing required fields or had blank values.
    #[error("invalid work item: missing required fields: {}", .missing.join(", "))]
    InvalidItem {
        /// The names of the missing or blank fields.
        missing: Vec<&'static str>,
    },

    /// A serialization or deserialization error occurred.
    #[error("serialization error: {message}")]
    Serialization {
        /// Description of the serialization failure.
        message: String,
    },

    /// Invalid configuration was provided.
    #[error("configuration error: {message}")]
    Configuration {
        /// Description of the configuration problem.
        message: String,
    },
}

impl Error {
    /// Creates a new queue error with the given message.
    #[must_use]
    pub fn queue(message: impl Into<String>) -> Self {
        Self::Queue {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new queue error with a source cause.
    #[must_use]
    pub fn queue_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Queue {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new storage error with the given message.
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new storage error with a source cause.
    #[must_use]
    pub fn storage_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Storage {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Creates a new configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Returns true if this error means the payload can never be
    /// processed and should be discarded rather than retried.
    #[must_use]
    pub const fn is_discard(&self) -> bool {
        matches!(self, Self::InvalidItem { .. } | Self::Serialization { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    #[test]
    fn invalid_item_lists_fields() {
        let err = Error::InvalidItem {
            missing: vec!["model", "task"],
        };
        assert_eq!(
            err.to_string(),
            "invalid work item: missing required fields: model, task"
        );
        assert!(err.is_discard());
    }

    #[test]
    fn queue_error_with_source() {
        let source = std::io::Error::new(std::io::ErrorKind::TimedOut, "receive timed out");
        let err = Error::queue_with_source("failed to poll", source);
        assert!(err.to_string().contains("queue error"));
        assert!(StdError::source(&err).is_some());
        assert!(!err.is_discard());
    }

    #[test]
    fn serialization_is_discard() {
        let err = Error::serialization("expected value at line 1");
        assert!(err.is_discard());
    }
}
