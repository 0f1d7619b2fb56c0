//! Prompt assembly: system instruction, then the valid history, then the new
//! user message.

use crate::turn::{ConversationTurn, HistoryEntry};

/// Persona prepended to every request.
pub const RENSHU_SYSTEM_PROMPT: &str = "
You are Renshu (練習), a helpful Japanese language tutor.
Current Task: Explain Japanese concepts to the user.

Guidelines:
1. Explain primarily in English, but use Japanese examples.
2. If the user asks for a translation, provide: [Japanese Text] -> [Romaji] -> [English].
3. Be polite and encouraging.
";

/// Canned prompts offered by the chat surfaces.
pub const EXAMPLE_PROMPTS: [&str; 2] = [
    "How do I say 'I've been studying Japanese for 3 years'?",
    "What is the difference between は (wa) and が (ga)?",
];

#[derive(Debug, Clone)]
pub struct PromptAssembler {
    system_instruction: String,
}

impl Default for PromptAssembler {
    fn default() -> Self {
        Self::new(RENSHU_SYSTEM_PROMPT)
    }
}

impl PromptAssembler {
    pub fn new(system_instruction: impl Into<String>) -> Self {
        Self {
            system_instruction: system_instruction.into(),
        }
    }

    pub fn system_instruction(&self) -> &str {
        &self.system_instruction
    }

    /// Build the message list for one turn.
    ///
    /// History entries without a usable role or with missing/empty content are
    /// dropped silently. The result always starts with the system instruction and
    /// ends with `message` as a user turn.
    pub fn assemble(&self, history: &[HistoryEntry], message: &str) -> Vec<ConversationTurn> {
        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(ConversationTurn::system(self.system_instruction.as_str()));
        messages.extend(history.iter().filter_map(HistoryEntry::to_turn));
        messages.push(ConversationTurn::user(message));
        messages
    }
}
