use crate::models::domain::QuizQuestion;

use super::prompts::QUIZ_SYSTEM_PROMPT;

pub const MAX_TOPIC_LENGTH: usize = 100;

/// Substrings that disqualify a topic, matched case-insensitively.
pub const FORBIDDEN_TOPIC_TERMS: [&str; 5] = ["gambling", "politics", "violence", "porn", "drugs"];

pub const FALLBACK_ANSWER: &str = "(Error parsing quiz)";
pub const EMPTY_RESPONSE_MARKER: &str = "(Empty model response)";

/// Number of raw model characters written to the debug log.
pub const RAW_OUTPUT_PREVIEW_CHARS: usize = 300;

/// Base system turn for quiz sessions: the instructions plus the JSON schema
/// of one quiz item.
pub fn quiz_system_turn_content() -> String {
    let schema = schemars::schema_for!(QuizQuestion);
    match serde_json::to_string(&schema) {
        Ok(schema) => format!("{QUIZ_SYSTEM_PROMPT}\nEach array item must match this JSON schema: {schema}"),
        Err(err) => {
            log::warn!("Could not render quiz item schema: {}", err);
            QUIZ_SYSTEM_PROMPT.to_string()
        }
    }
}
