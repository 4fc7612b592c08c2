// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wires real OS termination signals into [`wf_core::InterruptShield`].
//!
//! `wf-core`'s shield is signal-agnostic buffering; this module is the
//! one place in the workspace that actually listens for `SIGINT`/`SIGTERM`
//! (`tokio::signal`) and decides what to do with them: record them if a
//! critical section is active, or cancel the owning runner's loop
//! immediately if it's idle. The worker's blocking `get_one` sits
//! outside the shield so an idle worker reacts to the cancellation right
//! away.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use wf_core::{InterruptShield, TerminationSignal};

/// Spawn a background task that listens for `SIGINT`/`SIGTERM` for the
/// lifetime of the returned handle. Each observed signal is recorded on
/// `shield`; if the shield was idle (not inside a critical section), the
/// signal is acted on immediately by cancelling `cancel`.
pub fn spawn_listener(shield: Arc<InterruptShield>, cancel: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let Some(signal) = wait_for_next_signal().await else {
                return;
            };
            handle_signal(&shield, &cancel, signal);
        }
    })
}

/// Record one observed signal on the shield; cancel the loop immediately
/// if the shield was idle. Split out from [`spawn_listener`]'s loop so it
/// can be exercised without depending on real OS signal delivery.
fn handle_signal(shield: &InterruptShield, cancel: &CancellationToken, signal: TerminationSignal) {
    tracing::debug!(?signal, "termination signal observed");
    if !shield.record(signal) {
        cancel.cancel();
    }
}

#[cfg(unix)]
async fn wait_for_next_signal() -> Option<TerminationSignal> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(s) => s,
        Err(err) => {
            tracing::error!(%err, "failed to install SIGTERM handler");
            return None;
        }
    };

    tokio::select! {
        _ = tokio::signal::ctrl_c() => Some(TerminationSignal::Sigint),
        _ = sigterm.recv() => Some(TerminationSignal::Sigterm),
    }
}

#[cfg(not(unix))]
async fn wait_for_next_signal() -> Option<TerminationSignal> {
    match tokio::signal::ctrl_c().await {
        Ok(()) => Some(TerminationSignal::Sigint),
        Err(err) => {
            tracing::error!(%err, "failed to install Ctrl-C handler");
            None
        }
    }
}

#[cfg(test)]
#[path = "signal_tests.rs"]
mod tests;
