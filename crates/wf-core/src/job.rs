// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job identifier and state machine.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ValidationError;

crate::define_id! {
    /// Unique identifier for one run of one workflow.
    pub struct JobId("job-");
}

/// Status of a [`Job`].
///
/// `CANCELLING`/`CANCELLED` form a cooperative cancellation pair: a
/// `CANCELLING` job observed at the worker before dispatch is not
/// executed; observed mid-execution, cancellation takes effect after the
/// current step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    Scheduled,
    Queued,
    Running,
    Completed,
    Failed,
    Aborted,
    Cancelling,
    Cancelled,
}

crate::simple_display! {
    JobStatus {
        Pending => "pending",
        Scheduled => "scheduled",
        Queued => "queued",
        Running => "running",
        Completed => "completed",
        Failed => "failed",
        Aborted => "aborted",
        Cancelling => "cancelling",
        Cancelled => "cancelled",
    }
}

impl JobStatus {
    /// Terminal statuses are sinks: once entered, the job is not re-enqueued.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Completed | Self::Failed | Self::Aborted | Self::Cancelled
        )
    }
}

/// Configuration for creating a new job.
#[derive(Debug, Clone)]
pub struct JobConfig {
    pub id: JobId,
    pub workflow_name: String,
    pub initial_input_value: Value,
    pub user_context: Value,
    pub requested_start_time: Option<u64>,
}

impl JobConfig {
    pub fn builder(workflow_name: impl Into<String>) -> JobConfigBuilder {
        JobConfigBuilder {
            id: JobId::new(),
            workflow_name: workflow_name.into(),
            initial_input_value: Value::Null,
            user_context: Value::Null,
            requested_start_time: None,
        }
    }
}

pub struct JobConfigBuilder {
    id: JobId,
    workflow_name: String,
    initial_input_value: Value,
    user_context: Value,
    requested_start_time: Option<u64>,
}

impl JobConfigBuilder {
    crate::setters! {
        set {
            id: JobId,
            initial_input_value: Value,
            user_context: Value,
        }
        option {
            requested_start_time: u64,
        }
    }

    pub fn build(self) -> JobConfig {
        JobConfig {
            id: self.id,
            workflow_name: self.workflow_name,
            initial_input_value: self.initial_input_value,
            user_context: self.user_context,
            requested_start_time: self.requested_start_time,
        }
    }
}

/// Durable record of one run of one workflow.
///
/// Invariants: `0 <= steps_completed <= workflow.len()`,
/// `percent_completed` derives from `steps_completed` and a `total_steps`
/// denominator, `exception_traceback` non-empty implies
/// `status == Failed`, and terminal statuses are sinks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub workflow_name: String,
    pub status: JobStatus,
    pub steps_completed: usize,
    pub initial_input_value: Value,
    pub last_return_value: Option<Value>,
    pub user_context: Value,
    pub exception_traceback: Option<String>,
    /// Message recorded by an `AbortJob(msg)` outcome. Kept separate from
    /// `exception_traceback` since an aborted job is not a failed one —
    /// storing it there would violate the `traceback ⇒ FAILED` invariant.
    pub abort_message: Option<String>,
    pub step_name: Option<String>,
    pub requested_start_time: Option<u64>,
}

impl Job {
    pub fn new(config: JobConfig) -> Self {
        let status = if config.requested_start_time.is_some() {
            JobStatus::Scheduled
        } else {
            JobStatus::Pending
        };
        Self {
            id: config.id,
            workflow_name: config.workflow_name,
            status,
            steps_completed: 0,
            initial_input_value: config.initial_input_value,
            last_return_value: None,
            user_context: config.user_context,
            exception_traceback: None,
            abort_message: None,
            step_name: None,
            requested_start_time: config.requested_start_time,
        }
    }

    /// The value a step's `Input`-marked parameter receives: the initial
    /// input if no step has completed yet, else the last return value.
    pub fn current_input_value(&self) -> &Value {
        if self.steps_completed == 0 {
            &self.initial_input_value
        } else {
            self.last_return_value.as_ref().unwrap_or(&Value::Null)
        }
    }

    /// `round(100 * steps_completed / total_steps)`, clamped to `[0, 100]`.
    /// `total_steps == 0` (an empty workflow) reports 100.
    pub fn percent_completed(&self, total_steps: usize) -> f64 {
        if total_steps == 0 {
            return 100.0;
        }
        let raw = 100.0 * self.steps_completed as f64 / total_steps as f64;
        raw.round().clamp(0.0, 100.0)
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Whether the worker should write this job back to the queue after
    /// the current cycle. Mirrors `!status.is_terminal()`.
    pub fn should_be_requeued(&self) -> bool {
        !self.is_terminal()
    }

    pub fn mark_queued_for_dispatch(&mut self) {
        self.status = JobStatus::Queued;
    }

    pub fn mark_running(&mut self, step_name: impl Into<String>) {
        self.status = JobStatus::Running;
        self.step_name = Some(step_name.into());
    }

    /// Advance to an absolute `steps_completed` value and requeue, or mark
    /// completed if that value reaches `workflow_len`.
    pub fn mark_step_n_completed(&mut self, steps_completed: usize, retval: Value, workflow_len: usize) {
        self.steps_completed = steps_completed;
        self.last_return_value = Some(retval);
        self.step_name = None;
        if steps_completed >= workflow_len {
            self.status = JobStatus::Completed;
        } else {
            self.status = JobStatus::Queued;
        }
    }

    /// Terminate via `GoToEnd`: `steps_completed` jumps straight to
    /// `workflow_len` so `percent_completed` reports 100, matching every
    /// other path to `COMPLETED`.
    pub fn mark_completed(&mut self, retval: Value, workflow_len: usize) {
        self.steps_completed = workflow_len;
        self.last_return_value = Some(retval);
        self.step_name = None;
        self.status = JobStatus::Completed;
    }

    pub fn mark_aborted(&mut self, message: impl Into<String>) {
        self.abort_message = Some(message.into());
        self.step_name = None;
        self.status = JobStatus::Aborted;
    }

    pub fn mark_failed(&mut self, traceback: impl Into<String>) {
        self.exception_traceback = Some(traceback.into());
        self.step_name = None;
        self.status = JobStatus::Failed;
    }

    pub fn mark_cancelled(&mut self) {
        self.step_name = None;
        self.status = JobStatus::Cancelled;
    }

    pub fn request_cancellation(&mut self) {
        if !self.is_terminal() {
            self.status = JobStatus::Cancelling;
        }
    }

    pub fn is_cancelling(&self) -> bool {
        self.status == JobStatus::Cancelling
    }

    /// Checked against the persisted invariants from the data model.
    pub fn validate(&self, workflow_len: usize) -> Result<(), ValidationError> {
        if self.steps_completed > workflow_len {
            return Err(ValidationError::StepsCompletedOutOfRange {
                steps_completed: self.steps_completed,
                workflow_len,
            });
        }
        let percent = self.percent_completed(workflow_len);
        if !(0.0..=100.0).contains(&percent) {
            return Err(ValidationError::PercentOutOfRange { value: percent });
        }
        if self.exception_traceback.is_some() && self.status != JobStatus::Failed {
            return Err(ValidationError::TracebackWithoutFailedStatus { status: self.status });
        }
        Ok(())
    }
}

crate::builder! {
    pub struct JobBuilder => Job {
        into {
            workflow_name: String = "test-workflow",
        }
        set {
            id: JobId = JobId::new(),
            status: JobStatus = JobStatus::Pending,
            steps_completed: usize = 0,
            initial_input_value: Value = Value::Null,
            last_return_value: Option<Value> = None,
            user_context: Value = Value::Null,
        }
        option {
            exception_traceback: String = None,
            abort_message: String = None,
            step_name: String = None,
            requested_start_time: u64 = None,
        }
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
