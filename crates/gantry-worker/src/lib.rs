//! # gantry-worker
//!
//! The consuming side of gantry: claims benchmark attempts from the work
//! queue and executes them end to end.
//!
//! One attempt is: fetch the requested snapshot of the benchmark tool's
//! source into an ephemeral workspace, build the tool, run it for the
//! attempt's model/task/attempt-group into an ephemeral output
//! directory, and upload the output tree to the artifact store under the
//! `repo_version` prefix. Every step's filesystem state is destroyed
//! before the next message is handled, success or failure.
//!
//! ## Delivery Semantics
//!
//! Processing is at-least-once: the queue's visibility timeout is the
//! only cross-process exclusion, failed attempts are released for
//! immediate redelivery, and invalid payloads are discarded because they
//! can never become valid. Multiple worker processes may poll the same
//! queue; within one process the [`Throttle`] serializes attempts.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![warn(clippy::pedantic)]

pub mod bench;
pub mod checkout;
mod command;
pub mod consumer;
pub mod error;
pub mod publish;
pub mod runner;
pub mod throttle;
pub mod workspace;

pub use bench::BenchRunner;
pub use checkout::CheckoutFetcher;
pub use consumer::{Consumer, MessageDisposition};
pub use error::{Error, Result};
pub use publish::publish_directory;
pub use runner::{AttemptOutcome, AttemptRunner, BenchAttemptRunner};
pub use throttle::Throttle;
pub use workspace::{Workspace, WorkspaceFactory};
