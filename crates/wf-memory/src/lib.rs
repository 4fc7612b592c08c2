// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! In-process reference implementations of [`wf_core::Queue`] and
//! [`wf_core::StateStore`], used by the test suites of `wf-engine` and
//! `wf-cli` and as a runnable single-process backend. Not meant for
//! production multi-process use: state lives in a `Mutex`-guarded
//! in-memory map with no durability across process restarts, which
//! violates the "durable" half of the state-store contract the moment
//! the process exits.

mod queue;
mod state_store;

pub use queue::{InMemoryQueue, InMemoryQueueError};
pub use state_store::{InMemoryStateStore, InMemoryStateStoreError};
