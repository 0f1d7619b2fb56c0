//! CLI argument definitions using clap derive macros.

use std::net::SocketAddr;

use clap::{Args, Parser, Subcommand, ValueEnum};
use renshu_runtime::SamplingParams;

/// Renshu (練習): a streaming Japanese tutor backed by a hosted LLM
#[derive(Parser)]
#[command(name = "renshu", about, version, propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format: text (human-readable) or json (machine-readable)
    #[arg(short, long, global = true, default_value = "text")]
    pub output: OutputFormat,

    /// Model to use instead of RENSHU_MODEL / the default
    #[arg(long, global = true)]
    pub model: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored terminal output for humans
    #[default]
    Text,
    /// Structured JSON lines for machine consumption
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Serve the web chat UI
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:7860")]
        addr: SocketAddr,
    },
    /// Chat interactively in the terminal
    Chat {
        #[command(flatten)]
        sampling: SamplingArgs,
    },
    /// Ask a single question and stream the answer
    Ask {
        /// The question to send
        prompt: String,
        #[command(flatten)]
        sampling: SamplingArgs,
    },
    /// Show the resolved configuration
    Config,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Serve { .. } => "serve",
            Command::Chat { .. } => "chat",
            Command::Ask { .. } => "ask",
            Command::Config => "config",
        }
    }

    /// Log filter used when neither --verbose nor RUST_LOG/OTEL_LOG_LEVEL is set.
    pub fn default_log_level(&self) -> &'static str {
        match self {
            Command::Serve { .. } => "info",
            Command::Chat { .. } | Command::Ask { .. } | Command::Config => "warn",
        }
    }
}

/// Sampling overrides; anything unset falls back to the configured defaults.
#[derive(Args, Debug, Default, Clone)]
pub struct SamplingArgs {
    /// Maximum tokens to generate (128-1024)
    #[arg(long)]
    pub max_tokens: Option<u32>,
    /// Sampling temperature (0.1-2.0)
    #[arg(long)]
    pub temperature: Option<f32>,
    /// Nucleus sampling mass (0.1-1.0)
    #[arg(long)]
    pub top_p: Option<f32>,
}

impl SamplingArgs {
    pub fn resolve(&self, defaults: SamplingParams) -> SamplingParams {
        defaults
            .overridden_by(self.max_tokens, self.temperature, self.top_p)
            .clamped()
    }
}
