// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The publisher runner: periodically move due jobs from the state store
//! onto the queue.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use wf_core::{InterruptShield, Lifespan, PublisherConfig, Queue, StateStore};

use crate::error::PublisherRunError;
use crate::signal;

/// Polls [`StateStore::fetch_many_and_transition_to_queued`] on a fixed
/// interval and republishes whatever comes back onto the queue.
///
/// Each poll cycle runs inside the [`InterruptShield`] so a termination
/// signal observed mid-batch is buffered until the batch (transition +
/// publish) is entirely persisted, mirroring the worker's per-job
/// shielding at batch granularity instead.
pub struct PublisherRunner<Q, S> {
    queue: Arc<Q>,
    state_store: Arc<S>,
    shield: Arc<InterruptShield>,
    config: PublisherConfig,
}

impl<Q, S> PublisherRunner<Q, S>
where
    Q: Queue + 'static,
    S: StateStore + 'static,
{
    pub fn new(queue: Arc<Q>, state_store: Arc<S>, config: PublisherConfig) -> Self {
        Self { queue, state_store, shield: InterruptShield::new(), config }
    }

    pub async fn run<L: Lifespan>(&self, lifespan: &L) -> Result<(), PublisherRunError<Q::Error, S::Error>> {
        lifespan
            .startup()
            .await
            .map_err(|err| PublisherRunError::Lifespan(Box::new(err)))?;

        let cancel = CancellationToken::new();
        let listener = signal::spawn_listener(self.shield.clone(), cancel.clone());

        let result = self.run_loop(&cancel).await;

        listener.abort();
        lifespan
            .shutdown()
            .await
            .map_err(|err| PublisherRunError::Lifespan(Box::new(err)))?;

        result
    }

    async fn run_loop(&self, cancel: &CancellationToken) -> Result<(), PublisherRunError<Q::Error, S::Error>> {
        loop {
            self.fetch_and_queue(cancel).await?;

            if cancel.is_cancelled() {
                return Ok(());
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Ok(()),
                _ = tokio::time::sleep(self.config.poll_interval) => {}
            }
        }
    }

    async fn fetch_and_queue(&self, cancel: &CancellationToken) -> Result<(), PublisherRunError<Q::Error, S::Error>> {
        let guard = self.shield.enter();

        let jobs = self
            .state_store
            .fetch_many_and_transition_to_queued(self.config.batch_size)
            .await
            .map_err(PublisherRunError::StateStore)?;

        if !jobs.is_empty() {
            tracing::info!(publisher = %self.config.name, count = jobs.len(), "publishing due jobs");
            self.queue.put_many(jobs).await.map_err(PublisherRunError::Queue)?;
        }

        let buffered = guard.take_buffered();
        drop(guard);
        if !buffered.is_empty() {
            tracing::info!(count = buffered.len(), "re-delivering buffered termination signal(s)");
            cancel.cancel();
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "publisher_tests.rs"]
mod tests;
