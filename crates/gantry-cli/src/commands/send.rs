//! `gantry send` - fan a batch of attempts out to the work queue.
//!
//! Expands the full cross product of repetitions × models × tasks,
//! shuffles it uniformly so no model or task monopolizes the front of
//! the queue, and sends one message per attempt. Input validation fails
//! fast before anything is sent; individual send failures are logged and
//! counted but do not abort the remaining sends.

use clap::Args;
use rand::seq::SliceRandom;
use rand::thread_rng;
use tracing::{error, info};

use gantry_core::queue::{SqsWorkQueue, WorkQueue};
use gantry_core::{Error, Result, WorkItem};

/// Default comma-separated model list.
pub const DEFAULT_MODELS: &str = "claude-sonnet-4-thinking-32k,grok-code-fast-1";

/// Default comma-separated task list.
pub const DEFAULT_TASKS: &str = "cowsay,jq";

/// Arguments for `gantry send`.
#[derive(Debug, Args)]
pub struct SendArgs {
    /// Attempt group identifier.
    #[arg(long)]
    pub attempt_group: String,

    /// Git commit or tag of the benchmark tool to run.
    #[arg(long)]
    pub repo_version: String,

    /// Comma-separated models.
    #[arg(long, default_value = DEFAULT_MODELS)]
    pub models: String,

    /// Comma-separated tasks.
    #[arg(long, default_value = DEFAULT_TASKS)]
    pub tasks: String,

    /// How many times to repeat each model/task combination.
    #[arg(long, default_value_t = 2)]
    pub times: u32,

    /// SQS queue URL to send attempts to.
    #[arg(long, env = "GANTRY_QUEUE_URL")]
    pub queue_url: String,

    /// AWS region; the SDK's default provider chain applies when unset.
    #[arg(long, env = "AWS_REGION")]
    pub aws_region: Option<String>,
}

/// Outcome of a fan-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SendSummary {
    /// Messages accepted by the queue.
    pub sent: usize,
    /// Messages the queue rejected.
    pub failed: usize,
}

/// Splits a comma-separated list, trimming items and dropping blanks.
fn split_csv(csv: &str) -> Vec<String> {
    csv.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Expands the full cross product of repetitions × models × tasks in
/// canonical order.
///
/// # Errors
///
/// Returns a configuration error if `times` is zero or either list is
/// empty, before anything is sent.
pub fn expand_attempts(
    models: &[String],
    tasks: &[String],
    times: u32,
    attempt_group: &str,
    repo_version: &str,
) -> Result<Vec<WorkItem>> {
    if times < 1 {
        return Err(Error::configuration(format!(
            "--times must be >= 1, got {times}"
        )));
    }
    if models.is_empty() {
        return Err(Error::configuration("no models provided"));
    }
    if tasks.is_empty() {
        return Err(Error::configuration("no tasks provided"));
    }

    let mut attempts = Vec::with_capacity(models.len() * tasks.len() * times as usize);
    for _ in 0..times {
        for model in models {
            for task in tasks {
                attempts.push(WorkItem::new(
                    repo_version,
                    attempt_group,
                    model.as_str(),
                    task.as_str(),
                ));
            }
        }
    }
    Ok(attempts)
}

/// Sends every attempt as its own message, best effort.
///
/// Send failures are logged and counted; remaining sends continue.
pub async fn send_all(queue: &dyn WorkQueue, attempts: Vec<WorkItem>) -> SendSummary {
    let mut summary = SendSummary { sent: 0, failed: 0 };

    for item in attempts {
        let body = match item.to_json() {
            Ok(body) => body,
            Err(err) => {
                error!(model = %item.model, task = %item.task, error = %err, "failed to encode attempt");
                summary.failed += 1;
                continue;
            }
        };

        match queue.send(body).await {
            Ok(()) => {
                summary.sent += 1;
                info!(model = %item.model, task = %item.task, "enqueued attempt");
            }
            Err(err) => {
                summary.failed += 1;
                error!(model = %item.model, task = %item.task, error = %err, "failed to send attempt");
            }
        }
    }

    summary
}

/// Executes the `send` command.
///
/// # Errors
///
/// Fails fast on invalid inputs; send failures after that point are
/// reported in the summary instead.
pub async fn execute(args: SendArgs) -> anyhow::Result<()> {
    let models = split_csv(&args.models);
    let tasks = split_csv(&args.tasks);

    let mut attempts = expand_attempts(
        &models,
        &tasks,
        args.times,
        &args.attempt_group,
        &args.repo_version,
    )?;
    attempts.shuffle(&mut thread_rng());

    info!(total = attempts.len(), "sending attempts");

    let config = gantry_core::aws::load_config(args.aws_region).await;
    let queue = SqsWorkQueue::new(aws_sdk_sqs::Client::new(&config), args.queue_url);

    let summary = send_all(&queue, attempts).await;
    info!(sent = summary.sent, failed = summary.failed, "done");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gantry_core::queue::InMemoryWorkQueue;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashMap;

    fn models() -> Vec<String> {
        vec!["A".to_string(), "B".to_string()]
    }

    fn tasks() -> Vec<String> {
        vec!["X".to_string(), "Y".to_string()]
    }

    #[test]
    fn split_csv_trims_and_drops_blanks() {
        assert_eq!(split_csv(" a , b ,, c"), vec!["a", "b", "c"]);
        assert!(split_csv("  ,  ").is_empty());
    }

    #[test]
    fn expansion_covers_each_combination_times_times() {
        let attempts = expand_attempts(&models(), &tasks(), 2, "group", "v1").expect("expand");
        assert_eq!(attempts.len(), 8);

        let mut counts: HashMap<(String, String), usize> = HashMap::new();
        for item in &attempts {
            assert_eq!(item.repo_version, "v1");
            assert_eq!(item.attempt_group, "group");
            *counts.entry((item.model.clone(), item.task.clone())).or_default() += 1;
        }
        assert_eq!(counts.len(), 4);
        assert!(counts.values().all(|&count| count == 2));
    }

    #[test]
    fn shuffle_is_a_permutation_of_the_expansion() {
        let canonical = expand_attempts(&models(), &tasks(), 2, "group", "v1").expect("expand");

        let mut shuffled = canonical.clone();
        shuffled.shuffle(&mut StdRng::seed_from_u64(7));

        let sort_key =
            |item: &WorkItem| (item.model.clone(), item.task.clone(), item.repo_version.clone());
        let mut canonical_sorted = canonical;
        canonical_sorted.sort_by_key(sort_key);
        let mut shuffled_sorted = shuffled;
        shuffled_sorted.sort_by_key(sort_key);

        assert_eq!(canonical_sorted, shuffled_sorted);
    }

    #[test]
    fn zero_times_fails_fast() {
        let err = expand_attempts(&models(), &tasks(), 0, "group", "v1").expect_err("times");
        assert!(err.to_string().contains("--times"));
    }

    #[test]
    fn empty_lists_fail_fast() {
        assert!(expand_attempts(&[], &tasks(), 2, "g", "v1").is_err());
        assert!(expand_attempts(&models(), &[], 2, "g", "v1").is_err());
    }

    #[tokio::test]
    async fn send_all_enqueues_every_attempt() {
        let queue = InMemoryWorkQueue::new();
        let attempts = expand_attempts(&models(), &tasks(), 2, "group", "v1").expect("expand");

        let summary = send_all(&queue, attempts).await;

        assert_eq!(summary.sent, 8);
        assert_eq!(summary.failed, 0);

        let bodies = queue.drain().expect("drain");
        assert_eq!(bodies.len(), 8);
        for body in bodies {
            let item = WorkItem::from_json(&body).expect("valid work item on the wire");
            assert_eq!(item.attempt_group, "group");
        }
    }
}
