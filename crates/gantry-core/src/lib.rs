//! # gantry-core
//!
//! Shared primitives for the gantry benchmark execution system.
//!
//! This crate provides the types and traits used by both sides of the
//! queue:
//!
//! - **Work Items**: The message payload describing one benchmark attempt
//! - **Queue Abstraction**: A backend-agnostic work queue with SQS and
//!   in-memory implementations
//! - **Artifact Store**: An object-store seam with S3 and in-memory
//!   implementations
//! - **Error Types**: Shared error definitions and result types
//! - **Observability**: Logging initialization and span helpers
//!
//! ## Example
//!
//! ```rust
//! use gantry_core::WorkItem;
//!
//! let item = WorkItem::from_json(
//!     r#"{"repo_version":"v1.2.0","attempt_group":"nightly",
//!         "model":"claude-sonnet-4-thinking-32k","task":"jq"}"#,
//! ).expect("valid work item");
//! assert_eq!(item.task, "jq");
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![warn(clippy::pedantic)]

pub mod aws;
pub mod error;
pub mod item;
pub mod observability;
pub mod queue;
pub mod store;

pub use error::{Error, Result};
pub use item::WorkItem;
pub use observability::{LogFormat, init_logging};
pub use queue::{InMemoryWorkQueue, QueueMessage, ReceiptHandle, SqsWorkQueue, WorkQueue};
pub use store::{ArtifactStore, InMemoryArtifactStore, S3ArtifactStore};
