//! Observability infrastructure for gantry.
//!
//! Structured logging with consistent spans. This module provides
//! initialization helpers and span constructors shared by the producer
//! CLI and the worker service.

use std::sync::Once;
use tracing::Span;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Log output format.
#[derive(Debug, Clone, Copy, Default)]
pub enum LogFormat {
    /// JSON structured logs (for production).
    Json,
    /// Pretty-printed logs (for development).
    #[default]
    Pretty,
}

impl LogFormat {
    /// Resolves the log format from the `GANTRY_LOG_FORMAT` environment
    /// variable (`json` or `pretty`, defaulting to pretty).
    #[must_use]
    pub fn from_env() -> Self {
        match std::env::var("GANTRY_LOG_FORMAT") {
            Ok(value) if value.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Pretty,
        }
    }
}

/// Initializes the logging subsystem.
///
/// Call once at application startup. Safe to call multiple times;
/// subsequent calls are no-ops.
///
/// # Environment Variables
///
/// - `RUST_LOG`: Controls log levels (e.g., `info`, `gantry_worker=debug`)
pub fn init_logging(format: LogFormat) {
    INIT.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        match format {
            LogFormat::Json => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(fmt::layer().json())
                    .init();
            }
            LogFormat::Pretty => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(fmt::layer().pretty())
                    .init();
            }
        }
    });
}

/// Creates a span for one attempt execution with standard fields.
///
/// # Example
///
/// ```rust
/// use gantry_core::observability::attempt_span;
///
/// let span = attempt_span("claude-sonnet-4-thinking-32k", "jq", "nightly-01", "v1.2.0");
/// let _guard = span.enter();
/// // ... process the attempt
/// ```
#[must_use]
pub fn attempt_span(model: &str, task: &str, attempt_group: &str, repo_version: &str) -> Span {
    tracing::info_span!(
        "attempt",
        model = model,
        task = task,
        attempt_group = attempt_group,
        repo_version = repo_version,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_logging_is_idempotent() {
        init_logging(LogFormat::Pretty);
        init_logging(LogFormat::Pretty); // Second call should be no-op
    }

    #[test]
    fn attempt_span_carries_fields() {
        let span = attempt_span("model-a", "task-x", "group-1", "abc123");
        let _guard = span.enter();
        tracing::info!("test message in span");
    }
}
