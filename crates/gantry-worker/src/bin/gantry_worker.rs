//! Gantry worker service.
//!
//! Long-running process that polls the attempt queue and executes
//! benchmark attempts until signaled to stop.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tokio::signal::unix::{SignalKind, signal};
use tokio_util::sync::CancellationToken;
use tracing::info;

use gantry_core::{LogFormat, S3ArtifactStore, SqsWorkQueue, init_logging};
use gantry_worker::{BenchAttemptRunner, Consumer};

/// Gantry worker - executes benchmark attempts from the queue.
#[derive(Debug, Parser)]
#[command(name = "gantry-worker")]
#[command(author, version, about, long_about = None)]
struct WorkerArgs {
    /// SQS queue URL to poll for attempt requests.
    #[arg(long, env = "GANTRY_QUEUE_URL")]
    queue_url: String,

    /// S3 bucket name to upload results to.
    #[arg(long, env = "GANTRY_RESULTS_BUCKET")]
    bucket: String,

    /// Git repository URL of the benchmark tool.
    #[arg(long, env = "GANTRY_REPO_URL")]
    repo_url: String,

    /// Checkout subdirectory holding the tool's source.
    #[arg(long, env = "GANTRY_TOOL_DIR", default_value = gantry_worker::bench::DEFAULT_TOOL_DIR)]
    tool_dir: String,

    /// AWS region; the SDK's default provider chain applies when unset.
    #[arg(long, env = "AWS_REGION")]
    aws_region: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging(LogFormat::from_env());

    let args = WorkerArgs::parse();

    let config = gantry_core::aws::load_config(args.aws_region).await;
    let queue = Arc::new(SqsWorkQueue::new(
        aws_sdk_sqs::Client::new(&config),
        args.queue_url,
    ));
    let store = Arc::new(S3ArtifactStore::new(
        aws_sdk_s3::Client::new(&config),
        args.bucket,
    ));

    let runner = Arc::new(
        BenchAttemptRunner::new(args.repo_url, store).with_tool_dir(args.tool_dir),
    );
    let consumer = Consumer::new(queue.clone(), runner);

    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        let mut sigterm = signal(SignalKind::terminate()).expect("failed to register SIGTERM");
        let mut sigint = signal(SignalKind::interrupt()).expect("failed to register SIGINT");

        tokio::select! {
            _ = sigterm.recv() => info!("received SIGTERM, shutting down"),
            _ = sigint.recv() => info!("received SIGINT, shutting down"),
        }

        signal_token.cancel();
    });

    info!(queue_url = %queue.queue_url(), "polling attempt queue");
    consumer.run(shutdown).await;

    Ok(())
}
