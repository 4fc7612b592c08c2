// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Named, immutable workflow definitions and their builder.

use std::collections::HashMap;

use crate::error::{InvalidDefinitionError, LookupError};
use crate::path::{
    self, enumerate_continuations_with_cap, Continuation, PathEnumerationError, PathKind, StepTarget,
    WorkflowPath,
};
use crate::workflow_step::{StepDef, WorkflowStep};

/// Errors raised while sealing a [`WorkflowBuilder`] into a [`Workflow`].
/// Fatal to startup — a workflow that fails to seal is never registered.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowSealError {
    #[error(transparent)]
    InvalidDefinition(#[from] InvalidDefinitionError),
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

/// A named, ordered sequence of [`WorkflowStep`]s with a precomputed
/// *paths* table, immutable once sealed.
pub struct Workflow {
    name: String,
    steps: Vec<WorkflowStep>,
    name_to_index: HashMap<String, usize>,
    continuations: Vec<Vec<Continuation>>,
}

impl Workflow {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn step_by_index(&self, index: usize) -> Result<&WorkflowStep, LookupError> {
        self.steps.get(index).ok_or_else(|| LookupError::UnknownStep {
            workflow: self.name.clone(),
            target: StepTarget::Index(index),
        })
    }

    pub fn step_by_name(&self, name: &str) -> Result<&WorkflowStep, LookupError> {
        let index = self.index_of_name(name)?;
        self.step_by_index(index)
    }

    fn index_of_name(&self, name: &str) -> Result<usize, LookupError> {
        self.name_to_index
            .get(name)
            .copied()
            .ok_or_else(|| LookupError::UnknownStep {
                workflow: self.name.clone(),
                target: StepTarget::Name(name.to_string()),
            })
    }

    /// Resolve a [`StepTarget`] (by index or by name) to a concrete index.
    pub fn resolve_target(&self, target: &StepTarget) -> Result<usize, LookupError> {
        match target {
            StepTarget::Index(i) => {
                if *i < self.len() {
                    Ok(*i)
                } else {
                    Err(LookupError::UnknownStep {
                        workflow: self.name.clone(),
                        target: target.clone(),
                    })
                }
            }
            StepTarget::Name(name) => self.index_of_name(name),
        }
    }

    /// All continuations reachable from `index`, precomputed at seal time.
    pub fn continuations_from(&self, index: usize) -> &[Continuation] {
        &self.continuations[index]
    }

    /// The `remaining_steps` denominator contribution used for progress
    /// accounting: among the continuations from
    /// `from_index` whose head matches `emitted_kind` (and, for
    /// `GoToStep`, whose resolved target equals `goto_target`), the
    /// longest one's length; falling back to `len() - from_index` if none
    /// matches (the path was fired unexpectedly).
    pub fn remaining_steps(
        &self,
        from_index: usize,
        emitted_kind: PathKind,
        goto_target: Option<usize>,
    ) -> usize {
        let matching = self.continuations_from(from_index).iter().filter(|c| {
            c.head_kind() == Some(emitted_kind)
                && (emitted_kind != PathKind::GoToStep || c.head_goto_target() == goto_target)
        });
        matching
            .map(|c| c.len())
            .max()
            .unwrap_or_else(|| self.len().saturating_sub(from_index))
    }
}

/// Builder for a [`Workflow`]. Accumulates [`StepDef`]s in registration
/// order; [`WorkflowBuilder::seal`] assigns indices, validates uniqueness
/// and forward-only jumps, and precomputes the paths table.
pub struct WorkflowBuilder {
    name: String,
    defs: Vec<StepDef>,
}

impl WorkflowBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), defs: Vec::new() }
    }

    /// Append a step. Duplicate names are only rejected at [`Self::seal`]
    /// time — registration is the whole build-then-seal sequence, not
    /// each individual call.
    pub fn step(mut self, def: StepDef) -> Self {
        self.defs.push(def.with_implied_next_step());
        self
    }

    pub fn seal(self) -> Result<Workflow, WorkflowSealError> {
        self.seal_with_depth_cap(None)
    }

    /// Same as [`Self::seal`], but honoring an explicit depth-cap override
    /// (`WorkerConfig::depth_cap_override`) instead of the default
    /// `max(5 * workflow_len, 100)` computed by [`path::depth_cap`].
    pub fn seal_with_depth_cap(self, depth_cap_override: Option<usize>) -> Result<Workflow, WorkflowSealError> {
        let mut name_to_index = HashMap::with_capacity(self.defs.len());
        for (index, def) in self.defs.iter().enumerate() {
            if name_to_index.insert(def.name.clone(), index).is_some() {
                return Err(InvalidDefinitionError::DuplicateStepName { name: def.name.clone() }.into());
            }
        }

        let step_paths: Vec<Vec<WorkflowPath>> = self.defs.iter().map(|d| d.paths.clone()).collect();
        let cap = depth_cap_override.unwrap_or_else(|| path::depth_cap(step_paths.len()));

        let continuations = enumerate_continuations_with_cap(&step_paths, &name_to_index, cap).map_err(|err| {
            map_path_enumeration_error(err, &self.defs, &self.name)
        })?;

        let steps = self
            .defs
            .into_iter()
            .enumerate()
            .map(|(index, def)| WorkflowStep::new(def.name, index, def.params, def.paths, def.func))
            .collect();

        Ok(Workflow { name: self.name, steps, name_to_index, continuations })
    }
}

fn map_path_enumeration_error(
    err: PathEnumerationError,
    defs: &[StepDef],
    workflow_name: &str,
) -> WorkflowSealError {
    match err {
        PathEnumerationError::ReverseGoTo { from, target } => {
            InvalidDefinitionError::BackwardJumpDeclared {
                step: defs[from].name.clone(),
                target: StepTarget::Index(target),
                from,
            }
            .into()
        }
        PathEnumerationError::UnknownStepName { name } => LookupError::UnknownStep {
            workflow: workflow_name.to_string(),
            target: StepTarget::Name(name),
        }
        .into(),
        PathEnumerationError::DepthExceeded { from, cap } => {
            InvalidDefinitionError::ContinuationDepthExceeded {
                step: defs[from].name.clone(),
                cap,
            }
            .into()
        }
    }
}

#[cfg(test)]
#[path = "workflow_tests.rs"]
mod tests;
