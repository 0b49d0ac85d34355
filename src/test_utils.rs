use crate::models::domain::{quiz_question::MULTIPLE_CHOICE, QuizQuestion};

#[cfg(test)]
pub mod fixtures {
    use super::*;
    use crate::models::domain::quiz_question::SHORT_ANSWER;

    pub const ROME_FENCED_OUTPUT: &str = "```json\n[{\"question\":\"Who founded Rome?\",\"type\":\"multiple-choice\",\"options\":[\"Romulus\",\"Caesar\",\"Nero\"],\"answer\":\"Romulus\",\"difficulty\":\"easy\"}]\n```";

    /// The question `ROME_FENCED_OUTPUT` normalizes to.
    pub fn rome_question() -> QuizQuestion {
        QuizQuestion {
            question: "Who founded Rome?".to_string(),
            question_type: MULTIPLE_CHOICE.to_string(),
            options: Some(vec![
                "Romulus".to_string(),
                "Caesar".to_string(),
                "Nero".to_string(),
            ]),
            answer: "Romulus".to_string(),
            difficulty: Some("easy".to_string()),
            show_answer: true,
        }
    }

    pub fn multiple_choice(options: &[&str], answer: &str) -> QuizQuestion {
        QuizQuestion {
            question: "Pick one".to_string(),
            question_type: MULTIPLE_CHOICE.to_string(),
            options: Some(options.iter().map(|o| o.to_string()).collect()),
            answer: answer.to_string(),
            difficulty: Some("medium".to_string()),
            show_answer: true,
        }
    }

    pub fn short_answer(question: &str, answer: &str) -> QuizQuestion {
        QuizQuestion {
            question: question.to_string(),
            question_type: SHORT_ANSWER.to_string(),
            options: None,
            answer: answer.to_string(),
            difficulty: Some("medium".to_string()),
            show_answer: true,
        }
    }
}

#[cfg(test)]
pub mod in_memory {
    use std::collections::HashMap;

    use async_trait::async_trait;
    use tokio::sync::RwLock;

    use crate::{
        errors::AppResult,
        models::domain::{ConversationTurn, SessionId},
        repositories::ConversationRepository,
    };

    /// Map-backed repository for service tests.
    pub struct InMemoryConversationRepository {
        default_system_prompt: String,
        sessions: RwLock<HashMap<SessionId, Vec<ConversationTurn>>>,
    }

    impl InMemoryConversationRepository {
        pub fn new(default_system_prompt: &str) -> Self {
            Self {
                default_system_prompt: default_system_prompt.to_string(),
                sessions: RwLock::new(HashMap::new()),
            }
        }

        pub async fn stored(&self, session_id: &SessionId) -> Option<Vec<ConversationTurn>> {
            self.sessions.read().await.get(session_id).cloned()
        }

        pub async fn session_count(&self) -> usize {
            self.sessions.read().await.len()
        }
    }

    #[async_trait]
    impl ConversationRepository for InMemoryConversationRepository {
        async fn save(&self, session_id: &SessionId, history: &[ConversationTurn]) -> AppResult<()> {
            self.sessions
                .write()
                .await
                .insert(session_id.clone(), history.to_vec());
            Ok(())
        }

        async fn load(&self, session_id: &SessionId) -> AppResult<Vec<ConversationTurn>> {
            Ok(self
                .sessions
                .read()
                .await
                .get(session_id)
                .cloned()
                .unwrap_or_else(|| {
                    vec![ConversationTurn::system(self.default_system_prompt.clone())]
                }))
        }

        async fn exists(&self, session_id: &SessionId) -> AppResult<bool> {
            Ok(self.sessions.read().await.contains_key(session_id))
        }

        async fn list_sessions(&self) -> AppResult<Vec<SessionId>> {
            let mut ids: Vec<SessionId> = self.sessions.read().await.keys().cloned().collect();
            ids.sort();
            Ok(ids)
        }
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_rome_question() {
        let question = rome_question();
        assert!(question.is_multiple_choice());
        assert_eq!(question.answer, "Romulus");
    }

    #[test]
    fn test_fixtures_multiple_choice() {
        let question = multiple_choice(&["a", "b"], "c");
        assert_eq!(question.options.map(|o| o.len()), Some(2));
        assert_eq!(question.answer, "c");
    }
}
