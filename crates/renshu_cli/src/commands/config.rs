//! `renshu config`: show the resolved configuration.

use anyhow::Result;
use renshu_runtime::{Credential, RenshuConfig};

use crate::output;

pub async fn handle(config: RenshuConfig) -> Result<()> {
    output::header("Renshu configuration");

    let rows = rows(&config);
    let mut table = output::table("Setting", "Value");
    for (name, value) in &rows {
        output::table_row(&mut table, name, value);
    }
    output::table_print(&table, &rows);

    if !config.has_credential() {
        println!();
        output::warning("HF_TOKEN is not set. Add it to ~/.renshu/env or the project .env file.");
    }

    Ok(())
}

fn rows(config: &RenshuConfig) -> Vec<(&'static str, String)> {
    let token = config
        .credential
        .as_ref()
        .map(mask_credential)
        .unwrap_or_else(|| "(not set)".to_string());

    let prompt_preview: String = config.system_prompt.chars().take(60).collect();
    let prompt_preview = if config.system_prompt.chars().count() > 60 {
        format!("{prompt_preview}…")
    } else {
        prompt_preview
    };

    vec![
        ("HF_TOKEN", token),
        ("model", config.model.clone()),
        ("fallback_model", config.fallback_model.clone()),
        ("base_url", config.base_url.clone()),
        ("system_prompt", prompt_preview),
        ("max_tokens", config.sampling.max_tokens.to_string()),
        ("temperature", config.sampling.temperature.to_string()),
        ("top_p", config.sampling.top_p.to_string()),
    ]
}

fn mask_credential(credential: &Credential) -> String {
    let key: Vec<char> = credential.expose().chars().collect();
    if key.len() <= 8 {
        return "*".repeat(key.len());
    }
    let head: String = key[..4].iter().collect();
    let tail: String = key[key.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}
