//! `renshu chat`: interactive terminal conversation.
//!
//! History lives only in this loop; `/reset` forgets it.

use std::io::Write;

use anyhow::Result;
use console::style;
use futures::StreamExt;
use renshu_core::{HistoryEntry, EXAMPLE_PROMPTS};
use renshu_runtime::{RenshuConfig, ReplyUpdate, Responder, SamplingParams};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::output;
use crate::render::TerminalRenderer;

const PROMPT: &str = "あなた> ";

/// What one line of input asks the loop to do.
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Skip,
    Quit,
    Reset,
    Help,
    Send(&'a str),
}

fn parse_input(line: &str) -> Input<'_> {
    let line = line.trim();
    match line {
        "" => Input::Skip,
        "/quit" | "/exit" => Input::Quit,
        "/reset" => Input::Reset,
        "/help" => Input::Help,
        _ => match line
            .strip_prefix('/')
            .and_then(|n| n.parse::<usize>().ok())
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| EXAMPLE_PROMPTS.get(i))
        {
            Some(example) => Input::Send(example),
            None => Input::Send(line),
        },
    }
}

/// Keep a finished exchange; failed or empty replies leave history untouched.
fn record_exchange(history: &mut Vec<HistoryEntry>, message: &str, last: Option<ReplyUpdate>) {
    if let Some(ReplyUpdate::Partial(reply)) = last {
        history.push(HistoryEntry::user(message));
        history.push(HistoryEntry::assistant(reply));
    }
}

fn print_help() {
    output::dim("Type a message and press Enter. Commands:");
    for (i, example) in EXAMPLE_PROMPTS.iter().enumerate() {
        output::kv(&format!("/{}", i + 1), example);
    }
    output::kv("/reset", "forget the conversation");
    output::kv("/quit", "leave");
}

pub async fn handle(config: RenshuConfig, params: SamplingParams) -> Result<()> {
    let responder = Responder::from_config(&config);

    output::header("Renshu (練習) - AI Tutor");
    output::dim(&format!("Model: {}", responder.model()));
    if !responder.has_credential() {
        output::warning("HF_TOKEN is not set; replies will show the setup error.");
    }
    print_help();
    println!();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut history: Vec<HistoryEntry> = Vec::new();

    loop {
        print!("{}", style(PROMPT).green().bold());
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };

        let message = match parse_input(&line) {
            Input::Skip => continue,
            Input::Quit => break,
            Input::Reset => {
                history.clear();
                output::dim("Conversation cleared.");
                continue;
            }
            Input::Help => {
                print_help();
                continue;
            }
            Input::Send(message) => message.to_string(),
        };

        let mut updates = responder.respond(&message, &history, params);
        let mut renderer = TerminalRenderer::new();
        let mut last = None;
        while let Some(update) = updates.next().await {
            renderer.render(&update);
            last = Some(update);
        }
        renderer.finish();

        record_exchange(&mut history, &message, last);
        tracing::debug!(history.len = history.len(), "Turn recorded");
    }

    Ok(())
}
