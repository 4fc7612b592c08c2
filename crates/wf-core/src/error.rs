// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Crate-wide error types.

use thiserror::Error;

use crate::path::StepTarget;

/// Programmer errors raised while building a [`crate::workflow::Workflow`].
///
/// Fatal to startup: a workflow that fails to seal should never be registered.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidDefinitionError {
    #[error("duplicate step name '{name}'")]
    DuplicateStepName { name: String },

    #[error("step '{step}' declares GoToStep({target}) which is not a forward jump from index {from}")]
    BackwardJumpDeclared {
        step: String,
        target: StepTarget,
        from: usize,
    },

    #[error("provider '{name}' cycle detected while resolving dependencies")]
    ProviderCycle { name: String },

    #[error("continuation depth exceeded {cap} steps starting at step '{step}'; likely a cyclic declaration")]
    ContinuationDepthExceeded { step: String, cap: usize },
}

/// Lookup miss at dispatch time: a referenced step or workflow does not exist.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("unknown workflow '{name}'")]
    UnknownWorkflow { name: String },

    #[error("unknown step '{target}' in workflow '{workflow}'")]
    UnknownStep {
        workflow: String,
        target: StepTarget,
    },
}

/// A declared or runtime `GoToStep` whose target is not strictly ahead of
/// the current step index.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("GoToStep target index {target} is not greater than current index {current}")]
pub struct ReverseGoToError {
    pub current: usize,
    pub target: usize,
}

/// A persisted `Job` record fails one of its structural invariants.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("steps_completed {steps_completed} exceeds workflow length {workflow_len}")]
    StepsCompletedOutOfRange {
        steps_completed: usize,
        workflow_len: usize,
    },

    #[error("percent_completed {value} is outside [0, 100]")]
    PercentOutOfRange { value: f64 },

    #[error("exception_traceback is set but status is {status:?}, expected FAILED")]
    TracebackWithoutFailedStatus { status: crate::job::JobStatus },
}

/// Anything a step invocation can fail with that isn't a declared
/// [`crate::workflow_step::StepSignal`] control-flow variant.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct StepError {
    pub message: String,
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StepError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), source: None }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self { message: message.into(), source: Some(Box::new(source)) }
    }

    /// Render a traceback-shaped string for persistence in `Job::exception_traceback`.
    pub fn traceback(&self) -> String {
        match &self.source {
            Some(source) => format!("{}: {}", self.message, source),
            None => self.message.clone(),
        }
    }
}

/// Top-level error type for the engine crate's fallible operations.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    InvalidDefinition(#[from] InvalidDefinitionError),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    ReverseGoTo(#[from] ReverseGoToError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Step(#[from] StepError),

    #[error("queue error: {0}")]
    Queue(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("state store error: {0}")]
    StateStore(#[source] Box<dyn std::error::Error + Send + Sync>),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
