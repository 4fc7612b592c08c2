// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dependency-injection resolver.
//!
//! A step's parameters are classified once at registration time into
//! [`ParamKind`] markers. At dispatch time, [`resolve`] builds a fresh
//! [`StepArgs`] for one invocation: `Input`/`Context` markers are cloned
//! directly from the job; `Depends` markers are resolved recursively
//! through a per-invocation [`DependsCache`], acquiring each provider at
//! most once and releasing them in LIFO order via [`ScopeStack`] when the
//! invocation ends — on success or failure alike.

use std::any::Any;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde_json::Value;

use crate::error::{InvalidDefinitionError, StepError};

crate::define_id! {
    /// Identity of a registered dependency provider.
    pub struct ProviderId("prv-");
}

/// The marker a step (or a provider's own) parameter carries.
///
/// A parameter carries exactly one marker; the representation itself
/// rules out combining markers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParamKind {
    /// Receives the job's current input value (initial input if no step
    /// has completed yet, else the last return value).
    Input,
    /// Receives the job's `user_context`.
    Context,
    /// Receives a value constructed by the named provider.
    Depends(ProviderId),
}

/// One resolved parameter value, ready to hand to a step or a provider.
pub enum ResolvedArg {
    Input(Value),
    Context(Value),
    Depends(Arc<dyn Any + Send + Sync>),
}

/// A scoped-resource factory. Providers may themselves declare
/// dependencies (including on other providers), resolved recursively in
/// registration order before `acquire` is called.
pub trait Provider: Send + Sync {
    fn id(&self) -> ProviderId;

    /// This provider's own declared parameter list.
    fn params(&self) -> &[ParamKind];

    /// Construct the resource from its already-resolved parameters.
    fn acquire(&self, args: &[ResolvedArg]) -> Result<Arc<dyn Any + Send + Sync>, StepError>;

    /// Release the resource. Called once per invocation, in LIFO order,
    /// regardless of whether the step (or a later provider) failed.
    fn release(&self, _value: &Arc<dyn Any + Send + Sync>) {}
}

/// Write-once, read-many table of registered providers, keyed by
/// [`ProviderId`]. Populated during bootstrap, read concurrently
/// thereafter — mirrors the workflow registry's own concurrency story.
#[derive(Default, Clone)]
pub struct DependencyRegistry {
    providers: HashMap<ProviderId, Arc<dyn Provider>>,
}

impl DependencyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, provider: Arc<dyn Provider>) {
        self.providers.insert(provider.id(), provider);
    }

    pub fn get(&self, id: ProviderId) -> Option<&Arc<dyn Provider>> {
        self.providers.get(&id)
    }
}

/// Per-invocation cache of already-acquired provider values, keyed by
/// provider identity. Two steps never share a cache.
#[derive(Default)]
pub struct DependsCache {
    values: HashMap<ProviderId, Arc<dyn Any + Send + Sync>>,
}

impl DependsCache {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Records providers acquired during one invocation so they can be
/// released in LIFO order when the invocation ends, regardless of
/// outcome. Dropping the stack (or calling [`ScopeStack::release_all`]
/// explicitly) performs the release.
#[derive(Default)]
pub struct ScopeStack {
    acquired: Vec<(Arc<dyn Provider>, Arc<dyn Any + Send + Sync>)>,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, provider: Arc<dyn Provider>, value: Arc<dyn Any + Send + Sync>) {
        self.acquired.push((provider, value));
    }

    /// Release every acquired provider in LIFO order. Idempotent: a
    /// second call is a no-op since the list is drained.
    pub fn release_all(&mut self) {
        while let Some((provider, value)) = self.acquired.pop() {
            provider.release(&value);
        }
    }
}

impl Drop for ScopeStack {
    fn drop(&mut self) {
        self.release_all();
    }
}

/// Arguments resolved for one step invocation, in the step's declared
/// parameter order.
pub struct StepArgs {
    values: Vec<ResolvedArg>,
}

impl StepArgs {
    /// The `Input`-marked parameter at `index`.
    pub fn input(&self, index: usize) -> Result<&Value, StepError> {
        match self.values.get(index) {
            Some(ResolvedArg::Input(v)) => Ok(v),
            _ => Err(StepError::new(format!("parameter {index} is not an Input parameter"))),
        }
    }

    /// The `Context`-marked parameter at `index`.
    pub fn context(&self, index: usize) -> Result<&Value, StepError> {
        match self.values.get(index) {
            Some(ResolvedArg::Context(v)) => Ok(v),
            _ => Err(StepError::new(format!("parameter {index} is not a Context parameter"))),
        }
    }

    /// The `Depends`-marked parameter at `index`, downcast to `T`.
    pub fn depends<T: 'static>(&self, index: usize) -> Result<&T, StepError> {
        match self.values.get(index) {
            Some(ResolvedArg::Depends(v)) => v
                .downcast_ref::<T>()
                .ok_or_else(|| StepError::new(format!("parameter {index} has unexpected type"))),
            _ => Err(StepError::new(format!("parameter {index} is not a Depends parameter"))),
        }
    }
}

/// Resolve a full parameter list for one invocation (a step's or a
/// provider's own), acquiring any `Depends` providers along the way.
pub fn resolve(
    params: &[ParamKind],
    input: &Value,
    context: &Value,
    registry: &DependencyRegistry,
    cache: &mut DependsCache,
    scope: &mut ScopeStack,
) -> Result<StepArgs, StepError> {
    let mut in_progress = HashSet::new();
    let mut values = Vec::with_capacity(params.len());
    for param in params {
        values.push(resolve_one(param, input, context, registry, cache, scope, &mut in_progress)?);
    }
    Ok(StepArgs { values })
}

fn resolve_one(
    param: &ParamKind,
    input: &Value,
    context: &Value,
    registry: &DependencyRegistry,
    cache: &mut DependsCache,
    scope: &mut ScopeStack,
    in_progress: &mut HashSet<ProviderId>,
) -> Result<ResolvedArg, StepError> {
    match param {
        ParamKind::Input => Ok(ResolvedArg::Input(input.clone())),
        ParamKind::Context => Ok(ResolvedArg::Context(context.clone())),
        ParamKind::Depends(id) => {
            if let Some(existing) = cache.values.get(id) {
                return Ok(ResolvedArg::Depends(existing.clone()));
            }
            let provider = registry
                .get(*id)
                .ok_or_else(|| StepError::new(format!("unknown provider '{id}'")))?
                .clone();

            if !in_progress.insert(*id) {
                return Err(StepError::with_source(
                    format!("provider '{id}' cycle detected while resolving dependencies"),
                    InvalidDefinitionError::ProviderCycle { name: id.to_string() },
                ));
            }

            let mut sub_values = Vec::with_capacity(provider.params().len());
            for sub_param in provider.params() {
                sub_values.push(resolve_one(sub_param, input, context, registry, cache, scope, in_progress)?);
            }

            in_progress.remove(id);

            let value = provider.acquire(&sub_values)?;
            cache.values.insert(*id, value.clone());
            scope.push(provider, value.clone());
            Ok(ResolvedArg::Depends(value))
        }
    }
}

#[cfg(test)]
#[path = "di_tests.rs"]
mod tests;
