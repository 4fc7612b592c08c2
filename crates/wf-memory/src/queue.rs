// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-process FIFO queue, backed by a `Mutex<VecDeque<Job>>` and a
//! `Notify` for the blocking `get_one` wait.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Notify;

use wf_core::{Job, Queue};

/// Raised by [`InMemoryQueue::get_one`] once the queue has been closed —
/// this backend's stand-in for the "interrupted" case in the [`Queue`]
/// contract ([`wf_core::QueueInterrupted`]).
#[derive(Debug, thiserror::Error)]
pub enum InMemoryQueueError {
    #[error("queue closed")]
    Closed,
}

/// A single-process FIFO [`Queue`]. Cloning the `Arc` it's typically
/// wrapped in is how multiple in-process workers share one instance;
/// across real process boundaries this backend is not usable at all.
#[derive(Default)]
pub struct InMemoryQueue {
    items: Mutex<VecDeque<Job>>,
    notify: Notify,
    closed: AtomicBool,
}

impl InMemoryQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wake every blocked `get_one` caller with [`InMemoryQueueError::Closed`].
    /// Idempotent.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
        self.notify.notify_waiters();
    }

    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }
}

#[async_trait]
impl Queue for InMemoryQueue {
    type Error = InMemoryQueueError;

    async fn get_one(&self) -> Result<Job, Self::Error> {
        loop {
            // Register interest before re-checking state, so a `put`/`close`
            // racing with this loop iteration can't be missed between the
            // check below and the `await`.
            let notified = self.notify.notified();

            if let Some(job) = self.items.lock().pop_front() {
                return Ok(job);
            }
            if self.closed.load(Ordering::SeqCst) {
                return Err(InMemoryQueueError::Closed);
            }

            notified.await;
        }
    }

    async fn put(&self, job: Job) -> Result<(), Self::Error> {
        self.items.lock().push_back(job);
        self.notify.notify_one();
        Ok(())
    }

    async fn put_many(&self, jobs: Vec<Job>) -> Result<(), Self::Error> {
        if jobs.is_empty() {
            return Ok(());
        }
        let mut items = self.items.lock();
        items.extend(jobs);
        drop(items);
        self.notify.notify_waiters();
        Ok(())
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
