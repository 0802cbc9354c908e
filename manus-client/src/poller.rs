//! Task poller
//!
//! Submits a task and polls its status at a fixed cadence until a terminal
//! state is observed, the deadline elapses, or the caller cancels.
//!
//! At most one request is in flight per session. The wait between polls lasts
//! the full interval unless cancelled, so the interval is a lower bound on the
//! cadence (the gateway round trip comes on top).

use std::time::Duration;

use manus_core::domain::poll::PollResult;
use manus_core::domain::task::TaskHandle;
use manus_core::dto::task::TaskSubmission;
use manus_core::fields::is_gateway_error;
use tokio::time::{self, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::{ClientError, Result};
use crate::gateway::TaskGateway;

/// Timing of one polling session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    /// How long to keep polling before giving up
    pub timeout: Duration,

    /// Pause between two status fetches
    pub poll_interval: Duration,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(300),
            poll_interval: Duration::from_secs(5),
        }
    }
}

impl WaitOptions {
    pub fn new(timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            timeout,
            poll_interval,
        }
    }

    /// Validates the options
    pub fn validate(&self) -> Result<()> {
        if self.timeout.is_zero() {
            return Err(ClientError::InvalidRequest(
                "timeout must be positive".to_string(),
            ));
        }

        if self.poll_interval.is_zero() {
            return Err(ClientError::InvalidRequest(
                "poll interval must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

/// Runs submit-and-wait sessions against a gateway
pub struct TaskPoller<G> {
    gateway: G,
}

impl<G: TaskGateway> TaskPoller<G> {
    /// Creates a new poller
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Submit a task and wait for it to reach a terminal state
    ///
    /// See [`TaskPoller::run_and_wait_with_cancel`].
    pub async fn run_and_wait(
        &self,
        submission: TaskSubmission,
        options: WaitOptions,
    ) -> Result<PollResult> {
        self.run_and_wait_with_cancel(submission, options, CancellationToken::new())
            .await
    }

    /// Submit a task and wait for it to reach a terminal state
    ///
    /// Protocol outcomes (refused task, missing id, timeout, cancellation) are
    /// returned as [`PollResult`]. Transport and decoding failures abort the
    /// session with an error; they are not retried.
    ///
    /// # Arguments
    /// * `submission` - The task to create
    /// * `options` - Deadline and poll interval
    /// * `cancel` - Interrupts the wait between polls
    pub async fn run_and_wait_with_cancel(
        &self,
        submission: TaskSubmission,
        options: WaitOptions,
        cancel: CancellationToken,
    ) -> Result<PollResult> {
        options.validate()?;
        if !submission.has_prompt() {
            return Err(ClientError::InvalidRequest(
                "prompt cannot be empty".to_string(),
            ));
        }
        if options.poll_interval > options.timeout {
            warn!(
                "Poll interval {:?} exceeds timeout {:?}; the task will be polled once",
                options.poll_interval, options.timeout
            );
        }

        let response = self.gateway.create_task(&submission).await?;

        if is_gateway_error(&response) {
            warn!("Gateway refused the task");
            return Ok(PollResult::Rejected(response));
        }

        let Some(task) = TaskHandle::from_response(&response) else {
            warn!("Create response carried no task id");
            return Ok(PollResult::MissingTaskId { response });
        };

        info!(task_id = %task, "Task created, waiting up to {:?}", options.timeout);

        let start = Instant::now();
        let mut polls: u32 = 0;

        while start.elapsed() < options.timeout {
            if cancel.is_cancelled() {
                warn!(task_id = %task, "Wait cancelled");
                return Ok(PollResult::Cancelled { task });
            }

            let status = self.gateway.get_task(&task.task_id).await?;
            polls += 1;

            let state = status.state();
            debug!(task_id = %task, state = %state, polls, "Polled task");

            if state.is_terminal() {
                info!(task_id = %task, state = %state, "Task reached terminal state after {} poll(s)", polls);
                return Ok(PollResult::Finished(status));
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    warn!(task_id = %task, "Wait cancelled");
                    return Ok(PollResult::Cancelled { task });
                }
                _ = time::sleep(options.poll_interval) => {}
            }
        }

        warn!(
            task_id = %task,
            polls,
            "Timed out after {:?}; the task may still be running", options.timeout
        );
        Ok(PollResult::TimedOut { task })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use manus_core::domain::task::TaskStatus;
    use serde_json::{Value, json};
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Gateway that replays canned responses and counts calls
    struct ScriptedGateway {
        create_response: Value,
        statuses: Mutex<VecDeque<Value>>,
        creates: AtomicUsize,
        fetches: AtomicUsize,
        fail_fetch: bool,
    }

    impl ScriptedGateway {
        fn new(create_response: Value, statuses: Vec<Value>) -> Self {
            Self {
                create_response,
                statuses: Mutex::new(statuses.into()),
                creates: AtomicUsize::new(0),
                fetches: AtomicUsize::new(0),
                fail_fetch: false,
            }
        }

        fn failing_fetch(create_response: Value) -> Self {
            Self {
                fail_fetch: true,
                ..Self::new(create_response, Vec::new())
            }
        }

        fn fetches(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TaskGateway for ScriptedGateway {
        async fn create_task(&self, _submission: &TaskSubmission) -> Result<Value> {
            self.creates.fetch_add(1, Ordering::SeqCst);
            Ok(self.create_response.clone())
        }

        async fn get_task(&self, task_id: &str) -> Result<TaskStatus> {
            assert_eq!(task_id, "t-1");
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if self.fail_fetch {
                return Err(ClientError::ParseError("connection reset".to_string()));
            }

            // The last scripted status repeats once the script runs out
            let mut statuses = self.statuses.lock().unwrap();
            let next = if statuses.len() > 1 {
                statuses.pop_front().unwrap()
            } else {
                statuses.front().cloned().unwrap_or(json!({ "status": "running" }))
            };
            Ok(TaskStatus::from_value(next).unwrap())
        }
    }

    fn created() -> Value {
        json!({ "task_id": "t-1" })
    }

    fn options(timeout_secs: u64, interval_secs: u64) -> WaitOptions {
        WaitOptions::new(
            Duration::from_secs(timeout_secs),
            Duration::from_secs(interval_secs),
        )
    }

    fn submission() -> TaskSubmission {
        TaskSubmission::new("write a haiku")
    }

    #[test]
    fn test_default_options() {
        let defaults = WaitOptions::default();
        assert_eq!(defaults.timeout, Duration::from_secs(300));
        assert_eq!(defaults.poll_interval, Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_gateway_error_is_returned_verbatim() {
        let response = json!({ "error": "quota exceeded", "detail": { "limit": 3 } });
        let poller = TaskPoller::new(ScriptedGateway::new(response.clone(), Vec::new()));

        let result = poller.run_and_wait(submission(), options(30, 5)).await.unwrap();

        assert_eq!(result, PollResult::Rejected(response.clone()));
        assert_eq!(result.to_json(), response);
        assert_eq!(poller.gateway().fetches(), 0);
        assert_eq!(poller.gateway().creates.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_task_id() {
        let response = json!({ "message": "accepted" });
        let poller = TaskPoller::new(ScriptedGateway::new(response.clone(), Vec::new()));

        let result = poller.run_and_wait(submission(), options(30, 5)).await.unwrap();

        assert_eq!(
            result.to_json(),
            json!({ "error": "No task_id in response", "response": response })
        );
        assert_eq!(poller.gateway().fetches(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_task_id_falls_back_to_id_field() {
        let gateway = ScriptedGateway::new(json!({ "id": "t-1" }), vec![json!({ "state": "done" })]);
        let poller = TaskPoller::new(gateway);

        let result = poller.run_and_wait(submission(), options(30, 5)).await.unwrap();

        assert!(result.is_finished());
        assert_eq!(poller.gateway().fetches(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stops_on_first_terminal_state() {
        let third = json!({ "status": "completed", "output": "a haiku" });
        let gateway = ScriptedGateway::new(
            created(),
            vec![
                json!({ "status": "running" }),
                json!({ "status": "running" }),
                third.clone(),
            ],
        );
        let poller = TaskPoller::new(gateway);
        let started = Instant::now();

        let result = poller.run_and_wait(submission(), options(300, 5)).await.unwrap();

        assert_eq!(result.to_json(), third);
        assert_eq!(poller.gateway().fetches(), 3);
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_secs(10) && elapsed < Duration::from_secs(11));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_is_terminal() {
        let failed = json!({ "state": "failed", "reason": "tool crashed" });
        let poller = TaskPoller::new(ScriptedGateway::new(created(), vec![failed.clone()]));

        let result = poller.run_and_wait(submission(), options(30, 5)).await.unwrap();

        assert_eq!(result.to_json(), failed);
        assert_eq!(poller.gateway().fetches(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_state_match_is_case_sensitive() {
        let poller = TaskPoller::new(ScriptedGateway::new(
            created(),
            vec![json!({ "status": "Completed" })],
        ));

        let result = poller.run_and_wait(submission(), options(12, 5)).await.unwrap();

        assert_eq!(
            result,
            PollResult::TimedOut {
                task: TaskHandle::new("t-1")
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_stops_fetching_at_deadline() {
        let poller = TaskPoller::new(ScriptedGateway::new(
            created(),
            vec![json!({ "status": "running" })],
        ));

        let result = poller.run_and_wait(submission(), options(30, 5)).await.unwrap();

        assert_eq!(result.to_json(), json!({ "error": "timeout", "task_id": "t-1" }));
        // polls at t = 0, 5, 10, 15, 20, 25
        assert_eq!(poller.gateway().fetches(), 6);
    }

    #[tokio::test(start_paused = true)]
    async fn test_interval_longer_than_timeout_polls_once() {
        let poller = TaskPoller::new(ScriptedGateway::new(created(), Vec::new()));

        let result = poller.run_and_wait(submission(), options(3, 5)).await.unwrap();

        assert!(matches!(result, PollResult::TimedOut { .. }));
        assert_eq!(poller.gateway().fetches(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_interrupts_wait() {
        let poller = TaskPoller::new(ScriptedGateway::new(created(), Vec::new()));
        let cancel = CancellationToken::new();

        let trigger = cancel.clone();
        tokio::spawn(async move {
            time::sleep(Duration::from_secs(12)).await;
            trigger.cancel();
        });

        let started = Instant::now();
        let result = poller
            .run_and_wait_with_cancel(submission(), options(300, 5), cancel)
            .await
            .unwrap();

        assert_eq!(
            result.to_json(),
            json!({ "error": "cancelled", "task_id": "t-1" })
        );
        // polls at t = 0, 5, 10; cancelled during the third wait
        assert_eq!(poller.gateway().fetches(), 3);
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_secs(12) && elapsed < Duration::from_secs(13));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_error_aborts_session() {
        let poller = TaskPoller::new(ScriptedGateway::failing_fetch(created()));

        let err = poller
            .run_and_wait(submission(), options(30, 5))
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::ParseError(_)));
        assert_eq!(poller.gateway().fetches(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_durations_are_rejected_before_creating() {
        let poller = TaskPoller::new(ScriptedGateway::new(created(), Vec::new()));

        for opts in [options(0, 5), options(30, 0)] {
            let err = poller.run_and_wait(submission(), opts).await.unwrap_err();
            assert!(matches!(err, ClientError::InvalidRequest(_)));
        }
        assert_eq!(poller.gateway().creates.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_prompt_is_rejected_before_creating() {
        let poller = TaskPoller::new(ScriptedGateway::new(created(), Vec::new()));

        for prompt in ["", "   ", "\n\t"] {
            let err = poller
                .run_and_wait(TaskSubmission::new(prompt), options(30, 5))
                .await
                .unwrap_err();
            assert!(matches!(err, ClientError::InvalidRequest(_)));
        }
        assert_eq!(poller.gateway().creates.load(Ordering::SeqCst), 0);
        assert_eq!(poller.gateway().fetches(), 0);
    }
}
