//! Command dispatch.

pub mod ask;
pub mod chat;
pub mod config;
pub mod serve;

use anyhow::Result;
use renshu_runtime::RenshuConfig;

use crate::cli::{Cli, Command};

pub async fn handle(cli: Cli) -> Result<()> {
    let mut config = RenshuConfig::from_env();
    if let Some(model) = cli.model {
        config = config.with_model(model);
    }

    match cli.command {
        Command::Serve { addr } => serve::handle(config, addr).await,
        Command::Chat { sampling } => {
            let params = sampling.resolve(config.sampling);
            chat::handle(config, params).await
        }
        Command::Ask { prompt, sampling } => {
            let params = sampling.resolve(config.sampling);
            ask::handle(config, &prompt, params).await
        }
        Command::Config => config::handle(config).await,
    }
}
