// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Top-level `wf` argument parsing.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "wf", version, about = "Durable workflow execution engine")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run a registered worker or publisher application
    Run {
        #[command(subcommand)]
        kind: RunKind,
    },
    /// List the applications registered under this binary
    List,
}

#[derive(Subcommand)]
pub enum RunKind {
    /// Run the worker registered under `name`
    Worker {
        /// Name the application was registered under
        name: String,
    },
    /// Run the publisher registered under `name`
    Publisher {
        /// Name the application was registered under
        name: String,
    },
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
