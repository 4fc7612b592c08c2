// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scoped startup/teardown hook consumed by both runners.
//!
//! Both `wf-engine::WorkerRunner::run` and `wf-engine::PublisherRunner::run`
//! accept a `Lifespan`, enter it once before the main loop, then release
//! it once after, even if the loop exits via error or interrupt.

use async_trait::async_trait;

/// A scoped-acquisition resource keyed on the application instance —
/// e.g. opening database handles before the loop starts and closing them
/// after it stops.
#[async_trait]
pub trait Lifespan: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn startup(&self) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn shutdown(&self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// A [`Lifespan`] with nothing to acquire or release, for runners started
/// without any bootstrap/teardown needs.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLifespan;

#[async_trait]
impl Lifespan for NoopLifespan {
    type Error = std::convert::Infallible;
}
