//! Repeated status queries for one task until it settles.
//!
//! The loop queries, and if the task is not terminal waits `interval` before querying
//! again. The whole loop runs under a single deadline measured from its start, and races
//! a [`CancellationToken`]; either ending drops the pending timer and any in-flight query.

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::{sleep, timeout_at, Instant};
use tokio_util::sync::CancellationToken;

use crate::app::models::api_error::ApiError;

use super::{
    apis::jimeng::{self, client::JimengClient, errors::JimengError},
    enums::task_status::TaskStatus,
    models::task_snapshot::TaskSnapshot,
};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);
pub const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Clone)]
pub struct PollConfig {
    pub interval: Duration,
    pub timeout: Duration,
    /// Added to the local progress estimate on every non-terminal snapshot that carries
    /// no progress figure of its own.
    pub progress_step: u8,
    pub progress_cap: u8,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            timeout: DEFAULT_POLL_TIMEOUT,
            progress_step: 5,
            progress_cap: 95,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PollError {
    #[error("Processing was cancelled.")]
    Cancelled,
    #[error("Processing timed out, please retry.")]
    TimedOut,
    #[error("{0}")]
    Failed(String),
    #[error(transparent)]
    Vendor(#[from] JimengError),
}

impl From<PollError> for ApiError {
    fn from(e: PollError) -> Self {
        ApiError::internal(e.to_string())
    }
}

#[async_trait]
pub trait TaskStatusSource: Send + Sync {
    async fn query_status(&self, task_id: &str) -> Result<TaskSnapshot, JimengError>;
}

#[async_trait]
impl TaskStatusSource for JimengClient {
    async fn query_status(&self, task_id: &str) -> Result<TaskSnapshot, JimengError> {
        jimeng::service::get_task_status(self, task_id).await
    }
}

/// Polls `task_id` until it succeeds, fails, times out or is cancelled. `on_update` sees
/// every snapshot, with the progress estimate filled in.
pub async fn await_task_completion<S, F>(
    source: &S,
    task_id: &str,
    config: &PollConfig,
    cancel: &CancellationToken,
    on_update: F,
) -> Result<TaskSnapshot, PollError>
where
    S: TaskStatusSource + ?Sized,
    F: FnMut(&TaskSnapshot) + Send,
{
    let deadline = Instant::now() + config.timeout;

    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            tracing::debug!(task_id, "polling cancelled");
            Err(PollError::Cancelled)
        }
        result = timeout_at(deadline, poll_until_terminal(source, task_id, config, on_update)) => {
            match result {
                Ok(result) => result,
                Err(_) => {
                    tracing::warn!(task_id, timeout = ?config.timeout, "polling timed out");
                    Err(PollError::TimedOut)
                }
            }
        }
    }
}

async fn poll_until_terminal<S, F>(
    source: &S,
    task_id: &str,
    config: &PollConfig,
    mut on_update: F,
) -> Result<TaskSnapshot, PollError>
where
    S: TaskStatusSource + ?Sized,
    F: FnMut(&TaskSnapshot) + Send,
{
    let mut estimate: u8 = 0;

    loop {
        let mut snapshot = source.query_status(task_id).await?;

        match snapshot.status {
            TaskStatus::Success => {
                snapshot.progress = Some(100);
                on_update(&snapshot);
                return Ok(snapshot);
            }
            TaskStatus::Failed => {
                on_update(&snapshot);
                let message = snapshot
                    .error_message
                    .unwrap_or_else(|| "Processing failed.".to_string());
                return Err(PollError::Failed(message));
            }
            TaskStatus::Pending | TaskStatus::Processing => {
                estimate = match snapshot.progress {
                    Some(progress) => progress.min(100),
                    None => estimate
                        .saturating_add(config.progress_step)
                        .min(config.progress_cap),
                };
                snapshot.progress = Some(estimate);
                tracing::debug!(task_id, status = snapshot.status.value(), progress = estimate, "task not finished");
                on_update(&snapshot);
            }
        }

        sleep(config.interval).await;
    }
}
