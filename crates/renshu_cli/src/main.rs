//! CLI entry point for Renshu.

mod cli;
mod commands;
mod output;
mod render;
mod web;

use std::path::PathBuf;

use clap::Parser;
use renshu_observability::ObservabilityConfig;

use crate::cli::Cli;

/// Load env files. Variables already in the environment are never overridden,
/// so the first file to define a key wins.
/// Order: 1) .env (nearest project root)  2) ~/.renshu/env
fn load_renshu_config() {
    if let Some(env_file) = find_upwards(".env") {
        let _ = dotenvy::from_path(&env_file);
    }
    if let Some(home) = dirs::home_dir() {
        let config_path = home.join(".renshu").join("env");
        if config_path.exists() {
            let _ = dotenvy::from_path(&config_path);
        }
    }
}

fn find_upwards(name: &str) -> Option<PathBuf> {
    let mut dir = std::env::current_dir().ok()?;
    for _ in 0..32 {
        let candidate = dir.join(name);
        if candidate.exists() {
            return Some(candidate);
        }
        dir = dir.parent()?.to_path_buf();
    }
    None
}

/// `--verbose` beats `RUST_LOG`/`OTEL_LOG_LEVEL`, which beat the per-command default.
fn observability_config(cli: &Cli, from_env: ObservabilityConfig) -> ObservabilityConfig {
    let mut config = from_env.with_resource_attribute("renshu.command", cli.command.name());
    if config.service_version.is_none() {
        config = config.with_version(env!("CARGO_PKG_VERSION"));
    }
    if cli.verbose {
        config = config.with_log_level("debug");
    } else if config.log_level.is_none() {
        config = config.with_log_level(cli.command.default_log_level());
    }
    config
}

#[tokio::main]
async fn main() {
    load_renshu_config();
    let cli = Cli::parse();
    output::init(cli.output);

    if let Err(e) = renshu_observability::init(observability_config(&cli, ObservabilityConfig::from_env())) {
        output::warning(&format!("Logging disabled: {e}"));
    }

    let result = commands::handle(cli).await;
    renshu_observability::shutdown();

    if let Err(e) = result {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
