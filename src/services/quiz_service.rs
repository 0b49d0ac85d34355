use std::sync::Arc;

use validator::Validate;

use crate::{
    constants::quiz_prompt::RAW_OUTPUT_PREVIEW_CHARS,
    errors::{AppError, AppResult},
    models::{
        domain::{ConversationTurn, QuizSession, SessionId},
        dto::request::QuizRequestDto,
    },
    repositories::ConversationRepository,
    services::{
        model_gateway::ModelGateway,
        prompt_composer::{compose_quiz_prompt, QuizPrompt},
        quiz_normalizer::normalize,
        quiz_shuffler::shuffle_multiple_choice,
    },
};

pub struct QuizService {
    gateway: Arc<dyn ModelGateway>,
    conversations: Arc<dyn ConversationRepository>,
}

impl QuizService {
    pub fn new(
        gateway: Arc<dyn ModelGateway>,
        conversations: Arc<dyn ConversationRepository>,
    ) -> Self {
        Self {
            gateway,
            conversations,
        }
    }

    /// Runs one quiz generation: validate, extend the session history, call
    /// the model, normalize and shuffle, then persist the exchange.
    ///
    /// A failed model call is returned as an error and nothing is saved. An
    /// unusable reply is not an error; it comes back as a fallback question.
    pub async fn generate_quiz(&self, request: &QuizRequestDto) -> AppResult<QuizSession> {
        request.validate()?;
        let prompt = QuizPrompt::new(&request.topic, &request.difficulty_labels())?;
        let session_id = SessionId::resolve(request.session_id.as_deref())?;

        let history = self.conversations.load(&session_id).await?;
        let mut history = compose_quiz_prompt(&prompt, &history);

        let raw_output = self.gateway.complete(&history).await?;
        log::debug!(
            "Raw model output for session {}: {}",
            session_id,
            raw_output
                .chars()
                .take(RAW_OUTPUT_PREVIEW_CHARS)
                .collect::<String>()
        );

        let normalized = normalize(&raw_output);
        if normalized.is_fallback() {
            log::warn!(
                "Model output for topic '{}' was not a usable quiz (session {})",
                prompt.topic(),
                session_id
            );
        }
        let mut questions = normalized.into_questions();
        shuffle_multiple_choice(&mut questions);

        history.push(ConversationTurn::assistant(raw_output));
        self.conversations.save(&session_id, &history).await?;

        let mut session = QuizSession {
            topic: prompt.topic().to_string(),
            difficulties: prompt.difficulties().to_vec(),
            session_id,
            questions,
        };
        if request.hide_answers {
            session.hide_answers();
        }

        log::info!(
            "Generated {} questions on '{}' for session {}",
            session.questions.len(),
            session.topic,
            session.session_id
        );
        Ok(session)
    }

    pub async fn list_sessions(&self) -> AppResult<Vec<SessionId>> {
        self.conversations.list_sessions().await
    }

    pub async fn get_transcript(&self, session_id: &str) -> AppResult<Vec<ConversationTurn>> {
        let session_id = SessionId::parse(session_id)?;
        if !self.conversations.exists(&session_id).await? {
            return Err(AppError::NotFound(format!(
                "Session '{}' not found",
                session_id
            )));
        }
        self.conversations.load(&session_id).await
    }
}
