//! `renshu ask`: one question, one streamed answer.

use anyhow::{anyhow, Result};
use futures::StreamExt;
use renshu_runtime::{RenshuConfig, ReplyUpdate, Responder, SamplingParams};

use crate::output;
use crate::render::TerminalRenderer;

pub async fn handle(config: RenshuConfig, prompt: &str, params: SamplingParams) -> Result<()> {
    let responder = Responder::from_config(&config);
    let mut updates = responder.respond(prompt, &[], params);
    let mut renderer = TerminalRenderer::new();

    while let Some(update) = updates.next().await {
        if output::is_json() {
            output::data(update.kind(), &update);
        }

        match update {
            // main reports it, so the process exits non-zero
            ReplyUpdate::Failed(text) => {
                renderer.finish();
                return Err(anyhow!(text));
            }
            other if !output::is_json() => renderer.render(&other),
            _ => {}
        }
    }

    renderer.finish();
    Ok(())
}
