// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The queue contract: an external FIFO-ish transport for due jobs.

use async_trait::async_trait;

use crate::job::Job;

/// Raised by [`Queue::get_one`] when the blocking wait is interrupted by a
/// process-level termination signal rather than by a job arriving.
#[derive(Debug, thiserror::Error)]
#[error("queue wait interrupted")]
pub struct QueueInterrupted;

/// Worker- and publisher-facing queue contract. Implementations are
/// assumed thread/process-safe; multiple worker processes may share one
/// queue.
#[async_trait]
pub trait Queue: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Block until a job is available or the wait is interrupted.
    async fn get_one(&self) -> Result<Job, Self::Error>;

    /// Enqueue a single job (worker side: re-publish after a non-terminal
    /// step; client side: initial submission).
    async fn put(&self, job: Job) -> Result<(), Self::Error>;

    /// Enqueue a batch of jobs (publisher side).
    async fn put_many(&self, jobs: Vec<Job>) -> Result<(), Self::Error>;
}
