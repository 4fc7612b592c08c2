// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-process [`StateStore`], backed by a `Mutex<HashMap<JobId, Job>>`.
//!
//! `create`/`update` both simply insert-or-overwrite, which trivially
//! satisfies the idempotent-replay requirement on `update`: replaying
//! the same snapshot twice leaves the map in the same state.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;

use wf_core::{Clock, Job, JobId, JobStatus, StateStore, SystemClock};

/// Failure modes of [`InMemoryStateStore`]. The only one that can
/// actually occur is [`Self::NotFound`]; `create`/`update` never fail.
#[derive(Debug, thiserror::Error)]
pub enum InMemoryStateStoreError {
    #[error("job '{0}' not found")]
    NotFound(JobId),
}

/// A single-process [`StateStore`]. Generic over [`Clock`] so tests can
/// drive `requested_start_time` comparisons deterministically with
/// [`wf_core::FakeClock`]; production callers use the default
/// [`SystemClock`].
pub struct InMemoryStateStore<C: Clock = SystemClock> {
    jobs: Mutex<HashMap<JobId, Job>>,
    // Preserves submission order so `fetch_many_and_transition_to_queued`
    // is deterministic — `HashMap` iteration order is not.
    order: Mutex<Vec<JobId>>,
    clock: C,
}

impl InMemoryStateStore<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for InMemoryStateStore<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> InMemoryStateStore<C> {
    pub fn with_clock(clock: C) -> Self {
        Self { jobs: Mutex::new(HashMap::new()), order: Mutex::new(Vec::new()), clock }
    }

    pub fn len(&self) -> usize {
        self.jobs.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.lock().is_empty()
    }

    fn upsert(&self, job: Job) {
        let mut jobs = self.jobs.lock();
        if !jobs.contains_key(&job.id) {
            self.order.lock().push(job.id);
        }
        jobs.insert(job.id, job);
    }
}

#[async_trait]
impl<C: Clock> StateStore for InMemoryStateStore<C> {
    type Error = InMemoryStateStoreError;

    async fn create(&self, job: Job) -> Result<(), Self::Error> {
        self.upsert(job);
        Ok(())
    }

    async fn get(&self, id: JobId) -> Result<Job, Self::Error> {
        self.jobs.lock().get(&id).cloned().ok_or(InMemoryStateStoreError::NotFound(id))
    }

    async fn update(&self, job: Job) -> Result<(), Self::Error> {
        self.upsert(job);
        Ok(())
    }

    async fn fetch_many_and_transition_to_queued(&self, limit: usize) -> Result<Vec<Job>, Self::Error> {
        let now = self.clock.epoch_ms();
        let order = self.order.lock().clone();
        let mut jobs = self.jobs.lock();

        let mut out = Vec::with_capacity(limit.min(order.len()));
        for id in order {
            if out.len() >= limit {
                break;
            }
            let Some(job) = jobs.get_mut(&id) else { continue };
            let publishable = matches!(job.status, JobStatus::Pending | JobStatus::Scheduled)
                && job.requested_start_time.map(|t| t <= now).unwrap_or(true);
            if publishable {
                job.mark_queued_for_dispatch();
                out.push(job.clone());
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "state_store_tests.rs"]
mod tests;
