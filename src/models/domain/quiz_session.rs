use serde::Serialize;

use crate::models::domain::{Difficulty, QuizQuestion, SessionId};

/// Outcome of one generation request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QuizSession {
    pub topic: String,
    pub difficulties: Vec<Difficulty>,
    pub session_id: SessionId,
    pub questions: Vec<QuizQuestion>,
}

impl QuizSession {
    /// Marks every question so renderers keep the answer hidden.
    pub fn hide_answers(&mut self) {
        for question in &mut self.questions {
            question.show_answer = false;
        }
    }
}
