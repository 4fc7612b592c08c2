// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A single named, callable step within a workflow.

use std::sync::Arc;

use serde_json::Value;

use crate::di::{ParamKind, StepArgs};
use crate::error::StepError;
use crate::path::{StepTarget, WorkflowPath};

/// A control-flow signal a step may raise instead of returning normally.
///
/// Mirrors the step outcome table exactly, minus the normal-return row
/// (represented by `Ok(value)` from the step callable itself).
#[derive(Debug)]
pub enum StepSignal {
    /// `AbortJob(msg)` — terminal `ABORTED`.
    Abort(String),
    /// `GoToEnd(v)` — terminal `COMPLETED`, `last_return_value <- v`.
    GoToEnd(Value),
    /// `GoToStep(target, v)` — jump to `target`; rejected if not forward.
    GoToStep { target: StepTarget, retval: Value },
    /// `SkipNSteps(n, v)` — advance `n + 1` steps, clamped to workflow length.
    SkipN { n: usize, retval: Value },
    /// Any other exception — terminal `FAILED`, traceback recorded, error
    /// hooks invoked.
    Failure(StepError),
}

impl From<StepError> for StepSignal {
    fn from(err: StepError) -> Self {
        Self::Failure(err)
    }
}

/// The result of invoking a step: a normal return value, or a declared
/// (or undeclared) control-flow signal.
pub type StepResult = Result<Value, StepSignal>;

/// A step callable. Invoked inline by the worker; may block.
pub type StepFn = Arc<dyn Fn(&StepArgs) -> StepResult + Send + Sync>;

/// A named callable plus its declared paths, argument descriptor, and
/// position within the owning workflow.
///
/// Refers back to its workflow only by index (into the workflow's step
/// vector), never by owning reference, to avoid a cycle — the workflow
/// owns its steps, not the other way around.
#[derive(Clone)]
pub struct WorkflowStep {
    pub name: String,
    pub index: usize,
    pub params: Vec<ParamKind>,
    pub paths: Vec<WorkflowPath>,
    func: StepFn,
}

impl WorkflowStep {
    pub(crate) fn new(
        name: String,
        index: usize,
        params: Vec<ParamKind>,
        paths: Vec<WorkflowPath>,
        func: StepFn,
    ) -> Self {
        Self { name, index, params, paths, func }
    }

    pub fn invoke(&self, args: &StepArgs) -> StepResult {
        (self.func)(args)
    }
}

impl std::fmt::Debug for WorkflowStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkflowStep")
            .field("name", &self.name)
            .field("index", &self.index)
            .field("paths", &self.paths)
            .finish_non_exhaustive()
    }
}

/// A not-yet-indexed step definition, as supplied at registration time
/// before the owning workflow assigns it a position.
pub struct StepDef {
    pub name: String,
    pub params: Vec<ParamKind>,
    pub paths: Vec<WorkflowPath>,
    pub func: StepFn,
    /// Whether the underlying callable has a non-void return type. Rust
    /// has no reflection to infer this, so the builder takes it
    /// explicitly; `true` is the default, matching the common case.
    pub returns_value: bool,
}

impl StepDef {
    pub fn new(name: impl Into<String>, func: StepFn) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            paths: Vec::new(),
            func,
            returns_value: true,
        }
    }

    pub fn params(mut self, params: Vec<ParamKind>) -> Self {
        self.params = params;
        self
    }

    pub fn paths(mut self, paths: Vec<WorkflowPath>) -> Self {
        self.paths = paths;
        self
    }

    pub fn void(mut self) -> Self {
        self.returns_value = false;
        self
    }

    /// Append `NextStepPath` when the callable is non-void and no
    /// `NextStepPath` was explicitly declared.
    pub(crate) fn with_implied_next_step(mut self) -> Self {
        let has_next = self.paths.iter().any(|p| matches!(p, WorkflowPath::NextStep));
        if self.returns_value && !has_next {
            self.paths.push(WorkflowPath::NextStep);
        }
        self
    }
}

#[cfg(test)]
#[path = "workflow_step_tests.rs"]
mod tests;
