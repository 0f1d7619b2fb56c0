pub mod prompt;
pub mod turn;

pub use prompt::{PromptAssembler, EXAMPLE_PROMPTS, RENSHU_SYSTEM_PROMPT};
pub use turn::{ConversationTurn, HistoryEntry, Role};
