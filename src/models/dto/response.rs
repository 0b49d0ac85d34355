use serde::{Deserialize, Serialize};

use crate::models::domain::{ConversationTurn, QuizQuestion, QuizSession, SessionId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizResponse {
    pub topic: String,
    pub quiz: Vec<QuizQuestion>,
    pub session_id: String,
}

impl From<QuizSession> for QuizResponse {
    fn from(session: QuizSession) -> Self {
        QuizResponse {
            topic: session.topic,
            quiz: session.questions,
            session_id: session.session_id.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub session_id: String,
    pub reply: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionListResponse {
    pub sessions: Vec<String>,
}

impl From<Vec<SessionId>> for SessionListResponse {
    fn from(ids: Vec<SessionId>) -> Self {
        SessionListResponse {
            sessions: ids.into_iter().map(String::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptResponse {
    pub session_id: String,
    pub turns: Vec<ConversationTurn>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::domain::Difficulty, test_utils::fixtures::rome_question};

    #[test]
    fn quiz_response_from_session() {
        let session_id = SessionId::parse("rome-1").expect("valid id");
        let session = QuizSession {
            topic: "Ancient Rome".to_string(),
            difficulties: vec![Difficulty::Easy, Difficulty::Hard],
            session_id,
            questions: vec![rome_question()],
        };

        let response: QuizResponse = session.into();
        assert_eq!(response.topic, "Ancient Rome");
        assert_eq!(response.session_id, "rome-1");
        assert_eq!(response.quiz.len(), 1);
    }

    #[test]
    fn session_list_preserves_order() {
        let ids = vec![
            SessionId::parse("a").expect("valid id"),
            SessionId::parse("b").expect("valid id"),
        ];

        let response: SessionListResponse = ids.into();
        assert_eq!(response.sessions, vec!["a", "b"]);
    }
}
