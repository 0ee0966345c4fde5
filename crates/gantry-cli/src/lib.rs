//! # gantry-cli
//!
//! Command-line interface for gantry.
//!
//! ## Commands
//!
//! - `gantry send` - Enqueue a batch of benchmark attempts
//!   (models × tasks × repetitions) to the work queue
//!
//! ## Configuration
//!
//! Flags fall back to environment variables where noted:
//!
//! - `GANTRY_QUEUE_URL` - SQS queue URL
//! - `AWS_REGION` - AWS region override

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![warn(clippy::pedantic)]

pub mod commands;

use clap::{Parser, Subcommand};

/// Gantry CLI - distributed benchmark attempt coordination.
#[derive(Debug, Parser)]
#[command(name = "gantry")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Enqueue benchmark attempts (models × tasks × repetitions).
    Send(commands::send::SendArgs),
}
