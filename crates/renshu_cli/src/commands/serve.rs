//! `renshu serve`: the web chat UI.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use renshu_runtime::{RenshuConfig, Responder};

use crate::output;
use crate::web::{self, AppState};

pub async fn handle(config: RenshuConfig, addr: SocketAddr) -> Result<()> {
    let responder = Responder::from_config(&config);
    if !responder.has_credential() {
        output::warning("HF_TOKEN is not set; every message will get the setup error.");
    }

    let state = AppState::new(Arc::new(responder), config.sampling);
    web::serve(addr, state).await
}
