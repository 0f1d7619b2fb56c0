//! Incremental terminal rendering of a turn.
//!
//! Every update carries the whole reply so far; the terminal cannot redraw,
//! so only the part not yet printed is written.

use std::io::Write;

use console::style;
use indicatif::ProgressBar;
use renshu_runtime::ReplyUpdate;

use crate::output;

/// The text `next` adds on top of `previous`, if it extends it.
pub fn appended_suffix<'a>(previous: &str, next: &'a str) -> Option<&'a str> {
    next.strip_prefix(previous)
}

/// Draws the updates of one turn on stdout.
#[derive(Default)]
pub struct TerminalRenderer {
    printed: String,
    spinner: Option<ProgressBar>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, update: &ReplyUpdate) {
        match update {
            ReplyUpdate::Status(text) => {
                self.clear_spinner();
                self.spinner = Some(output::spinner(text));
            }
            ReplyUpdate::Partial(text) => {
                self.clear_spinner();
                self.write_partial(text);
            }
            ReplyUpdate::Failed(text) => {
                self.clear_spinner();
                if !self.printed.is_empty() {
                    println!();
                    self.printed.clear();
                }
                output::error(text);
            }
        }
    }

    /// End the turn's output line.
    pub fn finish(&mut self) {
        self.clear_spinner();
        if !self.printed.is_empty() {
            println!();
        }
        self.printed.clear();
    }

    fn write_partial(&mut self, text: &str) {
        let mut stdout = std::io::stdout().lock();
        match appended_suffix(&self.printed, text) {
            Some(suffix) => {
                let _ = write!(stdout, "{suffix}");
            }
            None => {
                // Reply was rewritten; start over on a fresh line
                let _ = write!(stdout, "\n{}\n{text}", style("↻").dim());
            }
        }
        let _ = stdout.flush();
        self.printed = text.to_string();
    }

    fn clear_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}
