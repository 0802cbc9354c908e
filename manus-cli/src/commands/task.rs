//! Task command handlers
//!
//! Handles creating, inspecting and listing tasks, and the
//! submit-and-wait helper.

use std::time::Duration;

use anyhow::{Context, Result};
use colored::*;
use manus_client::{ManusClient, TaskPoller, WaitOptions};
use manus_core::domain::poll::PollResult;
use manus_core::dto::task::{TaskListQuery, TaskSubmission};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::print_json;

/// Join prompt words the way a shell user typed them
fn build_submission(prompt: &[String], connectors: Vec<String>) -> TaskSubmission {
    TaskSubmission::new(prompt.join(" ")).with_connectors(connectors)
}

/// Create a task and print the gateway response
pub async fn create_task(
    client: &ManusClient,
    prompt: &[String],
    connectors: Vec<String>,
) -> Result<()> {
    let submission = build_submission(prompt, connectors);
    let response = client
        .create_task(&submission)
        .await
        .context("Failed to create task")?;

    print_json(&response)
}

/// Print the status of a task
pub async fn get_task(client: &ManusClient, task_id: &str) -> Result<()> {
    let status = client
        .get_task(task_id)
        .await
        .with_context(|| format!("Failed to get task {}", task_id))?;

    debug!(task_id, state = %status.state(), "Fetched task");
    print_json(&status.into_value())
}

/// Print recent tasks
pub async fn list_tasks(client: &ManusClient, limit: u32) -> Result<()> {
    let tasks = client
        .list_tasks(TaskListQuery { limit })
        .await
        .context("Failed to list tasks")?;

    print_json(&tasks)
}

/// Create a task, wait for a terminal state and print the outcome
///
/// Ctrl-C stops the wait; the task keeps running on the gateway.
pub async fn run_and_wait(
    client: ManusClient,
    prompt: &[String],
    connectors: Vec<String>,
    timeout_secs: u64,
    interval_secs: u64,
) -> Result<()> {
    let submission = build_submission(prompt, connectors);
    let options = WaitOptions::new(
        Duration::from_secs(timeout_secs),
        Duration::from_secs(interval_secs),
    );

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupted, stopping wait");
            on_interrupt.cancel();
        }
    });

    let poller = TaskPoller::new(client);
    let result = poller
        .run_and_wait_with_cancel(submission, options, cancel)
        .await
        .context("Failed while waiting for task")?;

    report_outcome(&result);
    print_json(&result.to_json())
}

/// Summarise non-finished outcomes on stderr so stdout stays JSON
fn report_outcome(result: &PollResult) {
    match result {
        PollResult::Finished(_) => {}
        PollResult::Rejected(_) => eprintln!("{}", "Gateway refused the task".red()),
        PollResult::MissingTaskId { .. } => {
            eprintln!("{}", "Gateway response carried no task id".red())
        }
        PollResult::TimedOut { task } => eprintln!(
            "{} task {} may still be running; check it with `manus get {}`",
            "Timed out:".yellow(),
            task,
            task
        ),
        PollResult::Cancelled { task } => eprintln!(
            "{} task {} keeps running on the gateway",
            "Cancelled:".yellow(),
            task
        ),
    }
}
