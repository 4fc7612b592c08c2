// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lifecycle signal dispatch and typed error-hook dispatch.
//!
//! Two distinct registries, since they key on different things (a
//! lifecycle enum vs. a failure classifier) and fail independently.
//! Both swallow observer/hook errors: a misbehaving callback never
//! affects the job it was notified about.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::StepError;
use crate::job::Job;

/// Named lifecycle events fired by the worker around a step dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleSignal {
    JobRunStart,
    JobRunEnd,
    JobRunFail,
}

crate::simple_display! {
    LifecycleSignal {
        JobRunStart => "JOB_RUN_START",
        JobRunEnd => "JOB_RUN_END",
        JobRunFail => "JOB_RUN_FAIL",
    }
}

type ObserverResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// A registered lifecycle observer.
pub type SignalObserver = Arc<dyn Fn(&Job) -> ObserverResult + Send + Sync>;

/// Dispatches named lifecycle signals to every registered observer.
#[derive(Default, Clone)]
pub struct SignalHandler {
    observers: HashMap<LifecycleSignal, Vec<SignalObserver>>,
}

impl SignalHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, signal: LifecycleSignal, observer: SignalObserver) {
        self.observers.entry(signal).or_default().push(observer);
    }

    /// Fire `signal` to every registered observer, in registration order.
    /// An observer's error is logged and swallowed; it never reaches the
    /// caller or affects other observers.
    pub fn fire(&self, signal: LifecycleSignal, job: &Job) {
        let Some(observers) = self.observers.get(&signal) else {
            return;
        };
        for observer in observers {
            if let Err(err) = observer(job) {
                tracing::warn!(%signal, job_id = %job.id, error = %err, "signal observer failed");
            }
        }
    }
}

/// Matches a [`StepError`] to decide whether a hook applies. Stands in
/// for the original's exception-type (MRO) walk: Rust has no runtime type
/// hierarchy to walk, so hooks are matched by an ordered list of
/// caller-supplied predicates instead, first match wins.
pub type ErrorClassifier = Arc<dyn Fn(&StepError) -> bool + Send + Sync>;

/// A registered error hook, invoked with the failed job and its error.
pub type ErrorHook = Arc<dyn Fn(&Job, &StepError) -> ObserverResult + Send + Sync>;

/// Ordered table of `(classifier, hook)` pairs. On a step failure the
/// runner walks the table in registration order and invokes the first
/// hook whose classifier matches.
#[derive(Default, Clone)]
pub struct ErrorHookHandler {
    hooks: Vec<(ErrorClassifier, ErrorHook)>,
}

impl ErrorHookHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, classifier: ErrorClassifier, hook: ErrorHook) {
        self.hooks.push((classifier, hook));
    }

    /// Dispatch to the first matching hook, if any. The hook's own error
    /// is logged and swallowed; it does not affect the job.
    pub fn dispatch(&self, job: &Job, error: &StepError) {
        for (classifier, hook) in &self.hooks {
            if classifier(error) {
                if let Err(err) = hook(job, error) {
                    tracing::warn!(job_id = %job.id, error = %err, "error hook failed");
                }
                return;
            }
        }
    }
}

#[cfg(test)]
#[path = "signals_tests.rs"]
mod tests;
