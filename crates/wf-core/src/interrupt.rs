// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Interrupt shield: a scoped region during which termination signals are
//! buffered instead of acted on immediately.
//!
//! This module holds the signal-agnostic buffering core; `wf-engine`
//! wires actual OS signal delivery (`SIGINT`/`SIGTERM` via
//! `tokio::signal`) into [`InterruptShield::record`]. Splitting it this
//! way keeps `wf-core` free of any runtime/IO dependency while still
//! letting the worker and publisher loops share one buffering
//! implementation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

/// A process-level termination signal observed by the runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminationSignal {
    Sigint,
    Sigterm,
}

/// Buffers termination signals observed while a critical section (one job
/// dispatch, one publisher batch) is in progress, and hands them back
/// once the section ends so the caller can act on them in order.
#[derive(Default)]
pub struct InterruptShield {
    active: AtomicBool,
    buffered: Mutex<Vec<TerminationSignal>>,
}

impl InterruptShield {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Enter the shielded critical section.
    pub fn enter(self: &Arc<Self>) -> ShieldGuard {
        self.active.store(true, Ordering::SeqCst);
        ShieldGuard { shield: self.clone() }
    }

    /// Record an observed termination signal.
    ///
    /// Returns `true` if the signal was buffered (the shield is
    /// currently active) and the caller should take no further action
    /// right now, or `false` if the shield is idle and the caller should
    /// act on the signal immediately (e.g. exit the idle `get_one` wait).
    pub fn record(&self, signal: TerminationSignal) -> bool {
        if self.active.load(Ordering::SeqCst) {
            self.buffered.lock().push(signal);
            true
        } else {
            false
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

/// Held for the duration of a shielded critical section. Dropping it
/// exits the shield; buffered signals must be drained explicitly via
/// [`ShieldGuard::take_buffered`] before (or after) dropping, since the
/// drop itself only restores "idle" behavior for `record`.
pub struct ShieldGuard {
    shield: Arc<InterruptShield>,
}

impl ShieldGuard {
    /// Drain and return signals buffered during this section, in arrival
    /// order.
    pub fn take_buffered(&self) -> Vec<TerminationSignal> {
        std::mem::take(&mut *self.shield.buffered.lock())
    }
}

impl Drop for ShieldGuard {
    fn drop(&mut self) {
        self.shield.active.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
#[path = "interrupt_tests.rs"]
mod tests;
