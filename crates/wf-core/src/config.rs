// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runner configuration, loadable via `toml` + `serde`.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_depth_cap_override() -> Option<usize> {
    None
}

/// Failure modes of `*_from_file` config loaders.
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file {path:?}: {source}")]
    Read { path: std::path::PathBuf, source: std::io::Error },
    #[error(transparent)]
    Parse(#[from] toml::de::Error),
}

/// Configuration for a [`crate::workflow::Workflow`]-dispatching worker.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkerConfig {
    /// Logical name, surfaced in `tracing` spans and the CLI's
    /// `ApplicationRegistry`.
    pub name: String,
    /// Override for the continuation-enumeration depth cap
    /// (`max(5 * workflow_len, 100)` if unset), consumed by
    /// [`crate::workflow::WorkflowBuilder::seal_with_depth_cap`] when this
    /// worker's caller builds its workflows.
    #[serde(default = "default_depth_cap_override")]
    pub depth_cap_override: Option<usize>,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self { name: "worker".to_string(), depth_cap_override: None }
    }
}

impl WorkerConfig {
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load from a TOML file on disk, e.g. one the `wf` binary was pointed
    /// at on startup.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigLoadError> {
        load_toml_file(path)
    }
}

/// Configuration for the publisher's periodic pending-job poll loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PublisherConfig {
    /// Logical name, surfaced in `tracing` spans and the CLI's
    /// `ApplicationRegistry`.
    pub name: String,
    /// Poll interval between `fetch_many_and_transition_to_queued` calls.
    #[serde(with = "duration_secs")]
    pub poll_interval: Duration,
    /// Maximum batch size per poll.
    pub batch_size: usize,
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            name: "publisher".to_string(),
            poll_interval: Duration::from_secs(5),
            batch_size: 100,
        }
    }
}

impl PublisherConfig {
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load from a TOML file on disk, e.g. one the `wf` binary was pointed
    /// at on startup.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigLoadError> {
        load_toml_file(path)
    }
}

fn load_toml_file<T: for<'de> Deserialize<'de>>(path: impl AsRef<Path>) -> Result<T, ConfigLoadError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .map_err(|source| ConfigLoadError::Read { path: path.to_path_buf(), source })?;
    Ok(toml::from_str(&text)?)
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_secs(u64::deserialize(d)?))
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
