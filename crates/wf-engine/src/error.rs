// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fatal, loop-stopping errors for the worker and publisher runners.
//!
//! Per-job failures (a step raising, an unknown workflow, a reverse
//! `GoToStep`) are *not* represented here — those are recorded on the
//! `Job` itself (`FAILED` + traceback) and handled entirely within one
//! dispatch cycle. Only genuine infrastructure failures — the queue or
//! state store erroring, or a `Lifespan` hook failing — stop the loop.

use thiserror::Error;

/// Fatal error from one [`crate::worker::WorkerRunner::run`] loop.
#[derive(Debug, Error)]
pub enum WorkerRunError<QE, SE>
where
    QE: std::error::Error + Send + Sync + 'static,
    SE: std::error::Error + Send + Sync + 'static,
{
    #[error("queue error: {0}")]
    Queue(#[source] QE),
    #[error("state store error: {0}")]
    StateStore(#[source] SE),
    #[error("lifespan error: {0}")]
    Lifespan(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Fatal error from one [`crate::publisher::PublisherRunner::run`] loop.
#[derive(Debug, Error)]
pub enum PublisherRunError<QE, SE>
where
    QE: std::error::Error + Send + Sync + 'static,
    SE: std::error::Error + Send + Sync + 'static,
{
    #[error("queue error: {0}")]
    Queue(#[source] QE),
    #[error("state store error: {0}")]
    StateStore(#[source] SE),
    #[error("lifespan error: {0}")]
    Lifespan(#[source] Box<dyn std::error::Error + Send + Sync>),
}
