//! Answer generation: prompt composition and the completion call

pub mod answer;
pub mod prompt;

pub use answer::AnswerPipeline;
pub use prompt::{PromptBuilder, PromptPayload};
