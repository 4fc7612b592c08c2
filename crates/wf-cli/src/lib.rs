// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! `wf`: a thin binary exposing the `run worker <name>` /
//! `run publisher <name>` surface over an in-binary
//! [`registry::ApplicationRegistry`].

pub mod cli;
pub mod demo;
pub mod registry;

use cli::{Cli, Command, RunKind};
use registry::ApplicationRegistry;

/// The two independent name tables `run worker`/`run publisher` resolve
/// against, plus whatever registration a deployment wires in before
/// calling [`dispatch`].
pub struct Registries {
    pub workers: ApplicationRegistry,
    pub publishers: ApplicationRegistry,
}

impl Registries {
    pub fn with_demo_applications() -> Self {
        let mut workers = ApplicationRegistry::new();
        let mut publishers = ApplicationRegistry::new();
        demo::register(&mut workers, &mut publishers);
        Self { workers, publishers }
    }
}

/// Resolve and run the application named by `cli`, or print the
/// registered names for `wf list`.
pub async fn dispatch(cli: Cli, registries: &Registries) -> anyhow::Result<()> {
    match cli.command {
        Command::Run { kind: RunKind::Worker { name } } => {
            let app = registries.workers.resolve(&name)?;
            app.run().await
        }
        Command::Run { kind: RunKind::Publisher { name } } => {
            let app = registries.publishers.resolve(&name)?;
            app.run().await
        }
        Command::List => {
            println!("workers:");
            for name in registries.workers.names() {
                println!("  {name}");
            }
            println!("publishers:");
            for name in registries.publishers.names() {
                println!("  {name}");
            }
            Ok(())
        }
    }
}
