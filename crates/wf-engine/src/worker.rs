// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The worker runner: fetch → execute → update → re-enqueue.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use wf_core::di::{self, DependsCache, ScopeStack};
use wf_core::path::PathKind;
use wf_core::{
    DependencyRegistry, ErrorHookHandler, InterruptShield, Job, Lifespan, LifecycleSignal, Queue,
    SignalHandler, StateStore, StepError, StepSignal, WorkerConfig, WorkflowRegistry,
};

use crate::error::WorkerRunError;
use crate::signal;

/// Resolves a workflow's next step, invokes it, and persists the result
/// for one job per loop iteration.
///
/// `Q`/`S` are the external queue/state-store collaborators; everything
/// else (registries, hook tables, the shield) is shared, immutable after
/// construction, and safe to read concurrently if multiple
/// `WorkerRunner`s are driven from the same process.
pub struct WorkerRunner<Q, S> {
    queue: Arc<Q>,
    state_store: Arc<S>,
    workflows: Arc<WorkflowRegistry>,
    dependencies: Arc<DependencyRegistry>,
    signals: Arc<SignalHandler>,
    error_hooks: Arc<ErrorHookHandler>,
    shield: Arc<InterruptShield>,
    config: WorkerConfig,
}

impl<Q, S> WorkerRunner<Q, S>
where
    Q: Queue + 'static,
    S: StateStore + 'static,
{
    pub fn new(
        queue: Arc<Q>,
        state_store: Arc<S>,
        workflows: Arc<WorkflowRegistry>,
        config: WorkerConfig,
    ) -> Self {
        Self {
            queue,
            state_store,
            workflows,
            dependencies: Arc::new(DependencyRegistry::new()),
            signals: Arc::new(SignalHandler::new()),
            error_hooks: Arc::new(ErrorHookHandler::new()),
            shield: InterruptShield::new(),
            config,
        }
    }

    pub fn with_dependencies(mut self, dependencies: Arc<DependencyRegistry>) -> Self {
        self.dependencies = dependencies;
        self
    }

    pub fn with_signal_handler(mut self, signals: Arc<SignalHandler>) -> Self {
        self.signals = signals;
        self
    }

    pub fn with_error_hooks(mut self, error_hooks: Arc<ErrorHookHandler>) -> Self {
        self.error_hooks = error_hooks;
        self
    }

    /// Run the main loop until a termination signal is observed while
    /// idle, or a queue/state-store/lifespan error occurs. Entered and
    /// exited through `lifespan`'s scoped-acquisition interface.
    pub async fn run<L: Lifespan>(&self, lifespan: &L) -> Result<(), WorkerRunError<Q::Error, S::Error>> {
        lifespan
            .startup()
            .await
            .map_err(|err| WorkerRunError::Lifespan(Box::new(err)))?;

        let cancel = CancellationToken::new();
        let listener = signal::spawn_listener(self.shield.clone(), cancel.clone());

        let result = self.run_loop(&cancel).await;

        listener.abort();
        lifespan
            .shutdown()
            .await
            .map_err(|err| WorkerRunError::Lifespan(Box::new(err)))?;

        result
    }

    async fn run_loop(&self, cancel: &CancellationToken) -> Result<(), WorkerRunError<Q::Error, S::Error>> {
        loop {
            tracing::debug!(worker = %self.config.name, "listening for next job");
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::info!(worker = %self.config.name, "termination observed, idle worker stopping");
                    return Ok(());
                }
                job = self.queue.get_one() => {
                    let job = job.map_err(WorkerRunError::Queue)?;
                    self.dispatch(job, cancel).await?;
                }
            }
        }
    }

    /// Process one job inside the interrupt shield: resolve, run, persist,
    /// and (if non-terminal) re-publish. Buffered termination signals are
    /// acted on only once this cycle is complete.
    async fn dispatch(
        &self,
        mut job: Job,
        cancel: &CancellationToken,
    ) -> Result<(), WorkerRunError<Q::Error, S::Error>> {
        let guard = self.shield.enter();

        let span = tracing::info_span!(
            "job_dispatch",
            job_id = %job.id,
            workflow = %job.workflow_name,
            step = job.steps_completed,
        );
        let _entered = span.enter();

        let should_requeue = self.run_one_cycle(&mut job).await?;

        if should_requeue {
            self.queue.put(job).await.map_err(WorkerRunError::Queue)?;
        }

        let buffered = guard.take_buffered();
        drop(guard);
        if !buffered.is_empty() {
            tracing::info!(count = buffered.len(), "re-delivering buffered termination signal(s)");
            cancel.cancel();
        }

        Ok(())
    }

    /// Returns whether the job should be re-published to the queue.
    async fn run_one_cycle(&self, job: &mut Job) -> Result<bool, WorkerRunError<Q::Error, S::Error>> {
        let workflow = match self.workflows.get(&job.workflow_name) {
            Ok(workflow) => workflow.clone(),
            Err(err) => {
                tracing::warn!(error = %err, "unknown workflow, failing job");
                return self.fail_and_persist(job, StepError::new(err.to_string())).await;
            }
        };

        if job.is_cancelling() {
            job.mark_cancelled();
            self.state_store.update(job.clone()).await.map_err(WorkerRunError::StateStore)?;
            tracing::info!("job cancelled before dispatch");
            return Ok(false);
        }

        self.signals.fire(LifecycleSignal::JobRunStart, job);

        let step_index = job.steps_completed;
        let step = match workflow.step_by_index(step_index) {
            Ok(step) => step,
            Err(err) => {
                tracing::warn!(error = %err, "unknown step, failing job");
                return self.fail_and_persist(job, StepError::new(err.to_string())).await;
            }
        };

        job.mark_running(step.name.clone());
        self.state_store.update(job.clone()).await.map_err(WorkerRunError::StateStore)?;

        let params = step.params.clone();
        let input_value = job.current_input_value().clone();
        let context_value = job.user_context.clone();

        let mut cache = DependsCache::new();
        let mut scope = ScopeStack::new();
        let outcome = match di::resolve(&params, &input_value, &context_value, &self.dependencies, &mut cache, &mut scope) {
            Ok(args) => {
                let workflow = workflow.clone();
                tokio::task::spawn_blocking(move || match workflow.step_by_index(step_index) {
                    Ok(step) => step.invoke(&args),
                    Err(err) => Err(StepSignal::Failure(StepError::new(err.to_string()))),
                })
                .await
                .unwrap_or_else(|join_err| {
                    Err(StepSignal::Failure(StepError::new(format!("step task panicked: {join_err}"))))
                })
            }
            Err(err) => Err(StepSignal::Failure(err)),
        };
        drop(scope);

        let requeue = self.interpret_outcome(job, &workflow, step_index, outcome).await?;

        self.state_store.update(job.clone()).await.map_err(WorkerRunError::StateStore)?;
        self.signals.fire(LifecycleSignal::JobRunEnd, job);

        Ok(requeue)
    }

    async fn fail_and_persist(
        &self,
        job: &mut Job,
        error: StepError,
    ) -> Result<bool, WorkerRunError<Q::Error, S::Error>> {
        job.mark_failed(error.traceback());
        self.error_hooks.dispatch(job, &error);
        self.signals.fire(LifecycleSignal::JobRunFail, job);
        self.state_store.update(job.clone()).await.map_err(WorkerRunError::StateStore)?;
        self.signals.fire(LifecycleSignal::JobRunEnd, job);
        Ok(false)
    }

    /// Interpret a step's [`wf_core::StepResult`] and mutate `job`
    /// accordingly, per the step outcome table. Returns whether the job
    /// should be re-published.
    async fn interpret_outcome(
        &self,
        job: &mut Job,
        workflow: &wf_core::Workflow,
        current_index: usize,
        outcome: wf_core::StepResult,
    ) -> Result<bool, WorkerRunError<Q::Error, S::Error>> {
        match outcome {
            Ok(retval) => {
                let next_index = current_index + 1;
                let remaining = workflow.remaining_steps(current_index, PathKind::NextStep, None);
                let total = current_index + remaining;
                job.mark_step_n_completed(next_index, retval, total);
                tracing::info!(percent = job.percent_completed(total), "step completed");
                Ok(job.should_be_requeued())
            }
            Err(StepSignal::Abort(msg)) => {
                tracing::info!(message = %msg, "job aborted by step");
                job.mark_aborted(msg);
                Ok(false)
            }
            Err(StepSignal::GoToEnd(retval)) => {
                tracing::info!("step requested go-to-end");
                job.mark_completed(retval, workflow.len());
                Ok(false)
            }
            Err(StepSignal::GoToStep { target, retval }) => {
                let resolved = match workflow.resolve_target(&target) {
                    Ok(index) => index,
                    Err(err) => {
                        return self.fail_and_persist(job, StepError::new(err.to_string())).await;
                    }
                };
                if resolved <= current_index {
                    let err = wf_core::ReverseGoToError { current: current_index, target: resolved };
                    return self.fail_and_persist(job, StepError::with_source("reverse go-to-step rejected", err)).await;
                }
                let total = total_steps_from(workflow, resolved);
                job.mark_step_n_completed(resolved, retval, total);
                tracing::info!(percent = job.percent_completed(total), target = resolved, "step jumped forward");
                Ok(job.should_be_requeued())
            }
            Err(StepSignal::SkipN { n, retval }) => {
                let next_index = (current_index + 1 + n).min(workflow.len());
                let total = total_steps_from(workflow, next_index);
                job.mark_step_n_completed(next_index, retval, total);
                tracing::info!(percent = job.percent_completed(total), "step skipped ahead");
                Ok(job.should_be_requeued())
            }
            Err(StepSignal::Failure(err)) => {
                tracing::warn!(error = %err, "step raised an exception");
                job.mark_failed(err.traceback());
                self.error_hooks.dispatch(job, &err);
                self.signals.fire(LifecycleSignal::JobRunFail, job);
                Ok(false)
            }
        }
    }
}

/// The `total_steps` denominator for a job that has just landed on
/// `landed_index` via a jump (`GoToStep`/`SkipNSteps`): `landed_index`
/// plus the longest `NextStep`-only continuation from there, or just
/// `landed_index` if the jump already lands at or past the end of the
/// workflow. Measuring from the landed position (rather than the
/// current one) avoids double-counting the jump itself — the jump
/// already advanced `steps_completed` past everything it skipped, so
/// the remainder only needs to cover what's left from where it landed.
fn total_steps_from(workflow: &wf_core::Workflow, landed_index: usize) -> usize {
    if landed_index >= workflow.len() {
        landed_index
    } else {
        landed_index + workflow.remaining_steps(landed_index, PathKind::NextStep, None)
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod tests;
