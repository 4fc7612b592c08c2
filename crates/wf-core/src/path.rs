// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Declared control-flow paths and static continuation enumeration.

use std::collections::HashMap;

/// The maximum continuation depth explored per starting step, used as a
/// safety net against ill-formed cyclic declarations on top of the static
/// forward-only check performed at workflow-seal time.
///
/// `max(5 * workflow_len, 100)`, computed per workflow in
/// [`enumerate_continuations`].
pub fn depth_cap(workflow_len: usize) -> usize {
    (5 * workflow_len).max(100)
}

/// A reference to a step by position or by name, as declared by a step's
/// `GoToStepPath`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum StepTarget {
    Index(usize),
    Name(String),
}

impl std::fmt::Display for StepTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Index(i) => write!(f, "#{i}"),
            Self::Name(n) => write!(f, "'{n}'"),
        }
    }
}

impl From<usize> for StepTarget {
    fn from(i: usize) -> Self {
        Self::Index(i)
    }
}

impl From<&str> for StepTarget {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for StepTarget {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

/// One declared outcome a step may produce.
///
/// The four ways a step can hand control to the next one:
/// `NextStepPath`, `GoToStepPath`, `GoToEndPath`, `SkipNStepsPath`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum WorkflowPath {
    /// Fall through to the next index.
    NextStep,
    /// Jump to a named or indexed step.
    GoToStep(StepTarget),
    /// Terminate the workflow (successful completion).
    GoToEnd,
    /// Advance `n + 1` steps from the current one.
    SkipNSteps(usize),
}

crate::simple_display!(WorkflowPath {
    NextStep => "NextStep",
    GoToStep(_) => "GoToStep",
    GoToEnd => "GoToEnd",
    SkipNSteps(_) => "SkipNSteps",
});

impl WorkflowPath {
    /// The discriminant kind of this path, ignoring any payload. Used to
    /// match a runtime outcome against a step's declared paths.
    pub fn kind(&self) -> PathKind {
        match self {
            Self::NextStep => PathKind::NextStep,
            Self::GoToStep(_) => PathKind::GoToStep,
            Self::GoToEnd => PathKind::GoToEnd,
            Self::SkipNSteps(_) => PathKind::SkipNSteps,
        }
    }
}

/// Discriminant-only companion to [`WorkflowPath`], used as a match key
/// independent of payload (a `GoToStep` to one target vs. another is still
/// "the same kind of path" for continuation lookups).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathKind {
    NextStep,
    GoToStep,
    GoToEnd,
    SkipNSteps,
}

/// One element of a continuation: the path taken, the step index it was
/// taken from, and the concrete index it resolves to (names already
/// resolved against the workflow's name table).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContinuationStep {
    pub path: WorkflowPath,
    pub from_index: usize,
    pub resolved_next: usize,
}

/// A reachable sequence of `(path, step)` pairs from a starting index,
/// terminating at an out-of-bounds index or a `GoToEndPath`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Continuation {
    pub steps: Vec<ContinuationStep>,
}

impl Continuation {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The path kind of the first element, if any — used to match a
    /// continuation against a runtime outcome's emitted path.
    pub fn head_kind(&self) -> Option<PathKind> {
        self.steps.first().map(|s| s.path.kind())
    }

    /// The resolved target index of the first element, if its path is a
    /// `GoToStep` — used to disambiguate among several continuations that
    /// share a head kind but target different steps.
    pub fn head_goto_target(&self) -> Option<usize> {
        match self.steps.first() {
            Some(s) if matches!(s.path, WorkflowPath::GoToStep(_)) => Some(s.resolved_next),
            _ => None,
        }
    }
}

/// Errors raised while enumerating continuations for a workflow.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum PathEnumerationError {
    #[error("GoToStep target index {target} is not greater than current index {from}")]
    ReverseGoTo { from: usize, target: usize },

    #[error("unknown step name '{name}' referenced by GoToStep")]
    UnknownStepName { name: String },

    #[error("continuation depth exceeded {cap} steps starting at index {from}; likely a cyclic declaration")]
    DepthExceeded { from: usize, cap: usize },
}

/// Resolve `next` to a concrete step index, given the current index and a
/// declared path.
fn next_index(
    path: &WorkflowPath,
    current: usize,
    name_to_index: &HashMap<String, usize>,
    workflow_len: usize,
) -> Result<usize, PathEnumerationError> {
    match path {
        WorkflowPath::NextStep => Ok(current + 1),
        WorkflowPath::GoToEnd => Ok(workflow_len),
        WorkflowPath::SkipNSteps(n) => Ok(current + 1 + n),
        WorkflowPath::GoToStep(StepTarget::Index(i)) => Ok(*i),
        WorkflowPath::GoToStep(StepTarget::Name(name)) => name_to_index
            .get(name)
            .copied()
            .ok_or_else(|| PathEnumerationError::UnknownStepName { name: name.clone() }),
    }
}

/// Depth-first expansion of every reachable continuation from `start`:
/// from `(path, i)` compute `next`; if `next >= workflow_len` emit the
/// single-element suffix, else recurse over each declared path of the
/// next step and prepend the current element.
///
/// Every declared jump must be forward (`next > current`); a backward
/// jump is rejected with [`PathEnumerationError::ReverseGoTo`]. Recursion
/// is additionally capped at [`depth_cap`] as a safety net — the forward-
/// only check alone rules out cycles among resolved targets, but an
/// unresolved by-name target validated lazily could in principle still
/// blow the stack on a pathological declaration, so both guards are kept.
pub fn enumerate_continuations(
    step_paths: &[Vec<WorkflowPath>],
    name_to_index: &HashMap<String, usize>,
) -> Result<Vec<Vec<Continuation>>, PathEnumerationError> {
    enumerate_continuations_with_cap(step_paths, name_to_index, depth_cap(step_paths.len()))
}

/// Same as [`enumerate_continuations`], but with an explicit depth cap
/// instead of the default `max(5 * workflow_len, 100)`. Used by
/// [`crate::workflow::WorkflowBuilder::seal_with_depth_cap`] to honor a
/// caller-supplied `WorkerConfig::depth_cap_override`.
pub fn enumerate_continuations_with_cap(
    step_paths: &[Vec<WorkflowPath>],
    name_to_index: &HashMap<String, usize>,
    cap: usize,
) -> Result<Vec<Vec<Continuation>>, PathEnumerationError> {
    let workflow_len = step_paths.len();
    let mut memo: HashMap<usize, Vec<Continuation>> = HashMap::new();

    fn expand(
        index: usize,
        step_paths: &[Vec<WorkflowPath>],
        name_to_index: &HashMap<String, usize>,
        workflow_len: usize,
        cap: usize,
        depth: usize,
        memo: &mut HashMap<usize, Vec<Continuation>>,
    ) -> Result<Vec<Continuation>, PathEnumerationError> {
        if let Some(cached) = memo.get(&index) {
            return Ok(cached.clone());
        }
        if depth > cap {
            return Err(PathEnumerationError::DepthExceeded { from: index, cap });
        }

        let mut out = Vec::new();
        for path in &step_paths[index] {
            let next = next_index(path, index, name_to_index, workflow_len)?;
            if next <= index {
                return Err(PathEnumerationError::ReverseGoTo { from: index, target: next });
            }
            let head = ContinuationStep { path: path.clone(), from_index: index, resolved_next: next };

            if next >= workflow_len {
                out.push(Continuation { steps: vec![head] });
                continue;
            }

            let tails = expand(next, step_paths, name_to_index, workflow_len, cap, depth + 1, memo)?;
            for tail in tails {
                let mut steps = Vec::with_capacity(tail.len() + 1);
                steps.push(head.clone());
                steps.extend(tail.steps);
                out.push(Continuation { steps });
            }
        }
        memo.insert(index, out.clone());
        Ok(out)
    }

    let mut table = Vec::with_capacity(workflow_len);
    for i in 0..workflow_len {
        table.push(expand(i, step_paths, name_to_index, workflow_len, cap, 0, &mut memo)?);
    }
    Ok(table)
}

#[cfg(test)]
#[path = "path_tests.rs"]
mod tests;
