// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `run worker <name>` / `run publisher <name>` surface's Rust
//! resolution of a dynamic `module:object` loader.
//!
//! A statically-linked binary has nothing equivalent to resolving a
//! dotted path at runtime. Each runnable is instead registered under a
//! name by [`crate::demo`] (or by whatever wires up this binary for a
//! given deployment) before `main` ever looks at argv, and `<name>` is
//! resolved against that table.

use std::collections::HashMap;

use async_trait::async_trait;

/// One runnable worker or publisher, type-erased behind a single
/// `run` entry point so the CLI doesn't need to be generic over the
/// backend's `Queue`/`StateStore` types.
#[async_trait]
pub trait Application: Send + Sync {
    async fn run(&self) -> anyhow::Result<()>;
}

/// Raised when `<name>` doesn't match any registered factory.
#[derive(Debug, thiserror::Error)]
#[error("no application registered under the name '{0}'")]
pub struct UnknownApplicationError(pub String);

type Factory = Box<dyn Fn() -> Box<dyn Application> + Send + Sync>;

/// A name-to-factory table, populated once at startup. A factory rather
/// than a live instance per entry, so `run worker demo` run twice in a
/// process (e.g. from tests) gets two independent runners instead of
/// sharing one mid-loop.
#[derive(Default)]
pub struct ApplicationRegistry {
    factories: HashMap<String, Factory>,
}

impl ApplicationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        name: impl Into<String>,
        factory: impl Fn() -> Box<dyn Application> + Send + Sync + 'static,
    ) {
        self.factories.insert(name.into(), Box::new(factory));
    }

    pub fn resolve(&self, name: &str) -> Result<Box<dyn Application>, UnknownApplicationError> {
        self.factories
            .get(name)
            .map(|factory| factory())
            .ok_or_else(|| UnknownApplicationError(name.to_string()))
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
