use serde::{Deserialize, Serialize};
use validator::Validate;

pub const DEFAULT_DIFFICULTY: &str = "medium";

/// Body of `POST /quiz` and `POST /generate_pdf`. Topic and difficulty rules
/// are checked by the prompt composer so each violation keeps its own rule.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct QuizRequestDto {
    pub topic: String,

    #[serde(default)]
    pub difficulties: Option<Vec<String>>,

    #[serde(default)]
    pub hide_answers: bool,

    /// Blank or absent starts a new session; the format is checked by
    /// `SessionId::resolve`.
    #[serde(default)]
    pub session_id: Option<String>,
}

impl QuizRequestDto {
    pub fn new(topic: impl Into<String>, difficulties: &[&str]) -> Self {
        Self {
            topic: topic.into(),
            difficulties: Some(difficulties.iter().map(|d| d.to_string()).collect()),
            hide_answers: false,
            session_id: None,
        }
    }

    /// Requested difficulty labels, `["medium"]` when the field was omitted.
    pub fn difficulty_labels(&self) -> Vec<String> {
        self.difficulties
            .clone()
            .unwrap_or_else(|| vec![DEFAULT_DIFFICULTY.to_string()])
    }
}

/// Body of `POST /chat`.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct ChatRequestDto {
    #[validate(length(min = 1, max = 8000))]
    pub message: String,

    #[serde(default)]
    pub session_id: Option<String>,
}
