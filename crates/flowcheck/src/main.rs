// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! flowcheck entry point.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use flowcheck::cli::Cli;
use flowcheck::config::HarnessConfig;
use flowcheck::diagnostic::{print_error, set_verbose};
use flowcheck::harness::run;
use flowcheck::registry::{catalog, write_listing};
use flowcheck::time::SystemClock;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    set_verbose(cli.verbose);

    let cases = catalog();
    if cli.list {
        write_listing(&mut io::stdout().lock(), &cases)?;
        return Ok(());
    }

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            print_error(format_args!("{:#}", e));
            std::process::exit(1);
        }
    };

    let clock = SystemClock;
    let mut stdout = io::stdout();
    if let Err(e) = run(&config, &cases, &clock, cli.run_options(), &mut stdout).await {
        print_error(e);
        std::process::exit(1);
    }
    Ok(())
}

fn load_config(cli: &Cli) -> Result<HarnessConfig> {
    let mut config = match cli.config {
        Some(ref path) => HarnessConfig::load(path)?,
        None => {
            let dir = cli.working_dir.clone().unwrap_or_else(|| PathBuf::from("."));
            HarnessConfig::discover(&dir)?
        }
    };
    cli.apply(&mut config);
    config.working_dir = std::path::absolute(&config.working_dir)
        .with_context(|| format!("resolving {}", config.working_dir.display()))?;
    Ok(config)
}
