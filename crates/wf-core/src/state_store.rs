// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The state-store contract: external persistence of [`Job`] records.

use async_trait::async_trait;

use crate::job::{Job, JobId};

/// Worker-, client-, and publisher-facing persistence contract.
///
/// `update` must be idempotent: it may be replayed with the same
/// contents after a crash between update and the worker's subsequent
/// queue publish, under an at-least-once delivery assumption.
#[async_trait]
pub trait StateStore: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Persist a newly-submitted job (client side).
    async fn create(&self, job: Job) -> Result<(), Self::Error>;

    /// Fetch a job by id (client side).
    async fn get(&self, id: JobId) -> Result<Job, Self::Error>;

    /// Idempotent persistence of the current snapshot (worker side).
    async fn update(&self, job: Job) -> Result<(), Self::Error>;

    /// Atomically select a batch of publishable jobs (`PENDING`/`SCHEDULED`
    /// whose `requested_start_time` is past), transition them to
    /// `QUEUED`, and return them (publisher side).
    async fn fetch_many_and_transition_to_queued(&self, limit: usize) -> Result<Vec<Job>, Self::Error>;
}
