// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Name-to-workflow registry.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::LookupError;
use crate::workflow::Workflow;

/// Write-once during bootstrap, read-only thereafter — safe for
/// concurrent reads without locking once construction is finished.
#[derive(Default, Clone)]
pub struct WorkflowRegistry {
    workflows: HashMap<String, Arc<Workflow>>,
}

impl WorkflowRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, workflow: Workflow) {
        self.workflows.insert(workflow.name().to_string(), Arc::new(workflow));
    }

    pub fn get(&self, name: &str) -> Result<&Arc<Workflow>, LookupError> {
        self.workflows
            .get(name)
            .ok_or_else(|| LookupError::UnknownWorkflow { name: name.to_string() })
    }

    pub fn len(&self) -> usize {
        self.workflows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workflows.is_empty()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
