// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A runnable `demo` worker/publisher pair, backed by `wf-memory`.
//!
//! Registered under the name `"demo"` so `wf run worker demo` and
//! `wf run publisher demo` have something to resolve against out of the
//! box. Production deployments replace this module's registration with
//! their own real `Queue`/`StateStore` backends and workflows; nothing
//! about [`crate::registry::ApplicationRegistry`] depends on this being
//! the only entry.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use wf_core::{NoopLifespan, PublisherConfig, StepDef, WorkerConfig, WorkflowBuilder, WorkflowRegistry};
use wf_engine::{PublisherRunner, WorkerRunner};
use wf_memory::{InMemoryQueue, InMemoryStateStore};

use crate::registry::{Application, ApplicationRegistry};

fn demo_workflow(depth_cap_override: Option<usize>) -> wf_core::Workflow {
    WorkflowBuilder::new("demo")
        .step(StepDef::new(
            "greet",
            Arc::new(|_args| Ok(json!("hello from the demo workflow"))),
        ))
        .seal_with_depth_cap(depth_cap_override)
        .unwrap_or_else(|err| unreachable!("demo workflow is statically valid: {err}"))
}

struct WorkerApplication {
    runner: WorkerRunner<InMemoryQueue, InMemoryStateStore>,
}

#[async_trait]
impl Application for WorkerApplication {
    async fn run(&self) -> anyhow::Result<()> {
        self.runner.run(&NoopLifespan).await?;
        Ok(())
    }
}

struct PublisherApplication {
    runner: PublisherRunner<InMemoryQueue, InMemoryStateStore>,
}

#[async_trait]
impl Application for PublisherApplication {
    async fn run(&self) -> anyhow::Result<()> {
        self.runner.run(&NoopLifespan).await?;
        Ok(())
    }
}

/// Register the `demo` worker and publisher into their respective
/// registries (`run worker` and `run publisher` resolve names against
/// separate tables, mirroring how the original locates a worker app and
/// a publisher app as distinct objects). Each factory call builds a
/// fresh in-memory queue/state store, so a worker and a publisher both
/// started under the name `demo` do **not** share jobs — this backend is
/// single-process only (see `wf-memory`'s own documentation). It exists
/// to make the binary runnable standalone, not as a deployment target.
pub fn register(workers: &mut ApplicationRegistry, publishers: &mut ApplicationRegistry) {
    workers.register("demo", || {
        let config = WorkerConfig::default();
        let mut workflows = WorkflowRegistry::new();
        workflows.register(demo_workflow(config.depth_cap_override));

        let queue = Arc::new(InMemoryQueue::new());
        let store = Arc::new(InMemoryStateStore::new());
        let runner = WorkerRunner::new(queue, store, Arc::new(workflows), config);
        Box::new(WorkerApplication { runner })
    });

    publishers.register("demo", || {
        let queue = Arc::new(InMemoryQueue::new());
        let store = Arc::new(InMemoryStateStore::new());
        let runner = PublisherRunner::new(queue, store, PublisherConfig::default());
        Box::new(PublisherApplication { runner })
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_workflow_seals_successfully() {
        let wf = demo_workflow(None);
        assert_eq!(wf.name(), "demo");
        assert_eq!(wf.len(), 1);
    }

    #[test]
    fn demo_workflow_honors_a_depth_cap_override() {
        let wf = demo_workflow(Some(1));
        assert_eq!(wf.len(), 1);
    }

    #[test]
    fn register_populates_both_registries_under_the_same_name() {
        let mut workers = ApplicationRegistry::new();
        let mut publishers = ApplicationRegistry::new();
        register(&mut workers, &mut publishers);

        assert_eq!(workers.names(), vec!["demo"]);
        assert_eq!(publishers.names(), vec!["demo"]);
    }

    #[test]
    fn each_registered_demo_application_resolves_independently() {
        let mut workers = ApplicationRegistry::new();
        let mut publishers = ApplicationRegistry::new();
        register(&mut workers, &mut publishers);

        assert!(workers.resolve("demo").is_ok());
        assert!(publishers.resolve("demo").is_ok());
        assert!(workers.resolve("ghost").is_err());
    }
}
