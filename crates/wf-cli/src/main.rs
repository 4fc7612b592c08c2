// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use wf::cli::Cli;
use wf::{dispatch, Registries};

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry().with(filter).with(fmt::layer()).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let cli = Cli::parse();
    let registries = Registries::with_demo_applications();

    if let Err(err) = dispatch(cli, &registries).await {
        tracing::error!(%err, "application exited with an error");
        return Err(err);
    }

    Ok(())
}
