// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A small client wrapper for submitting jobs. Job submission is
//! otherwise-undocumented plumbing every caller needs, so it gets a
//! real type here instead of being left to callers to reinvent.

use std::sync::Arc;

use crate::job::{Job, JobId};
use crate::queue::Queue;
use crate::state_store::StateStore;

/// Either half of a [`Submitter::submit`] call failing.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError<QE, SE> {
    #[error("state store error: {0}")]
    StateStore(#[source] SE),
    #[error("queue error: {0}")]
    Queue(#[source] QE),
}

/// Submits jobs by persisting them to the state store and immediately
/// publishing them to the queue, bypassing the publisher's poll cycle —
/// appropriate for jobs with no `requested_start_time` in the future.
/// Scheduled jobs should go through `state_store.create` directly and let
/// the publisher pick them up once due.
pub struct Submitter<Q, S> {
    queue: Arc<Q>,
    state_store: Arc<S>,
}

impl<Q: Queue, S: StateStore> Submitter<Q, S> {
    pub fn new(queue: Arc<Q>, state_store: Arc<S>) -> Self {
        Self { queue, state_store }
    }

    /// Persist then enqueue a job, returning its id.
    pub async fn submit(&self, job: Job) -> Result<JobId, SubmitError<Q::Error, S::Error>> {
        let id = job.id;
        self.state_store
            .create(job.clone())
            .await
            .map_err(SubmitError::StateStore)?;
        self.queue.put(job).await.map_err(SubmitError::Queue)?;
        Ok(id)
    }

    /// Fetch a previously submitted job's current state.
    pub async fn get(&self, id: JobId) -> Result<Job, S::Error> {
        self.state_store.get(id).await
    }
}
