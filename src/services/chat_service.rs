use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::{AppResult, RequestViolation},
    models::{
        domain::{ConversationTurn, SessionId},
        dto::request::ChatRequestDto,
    },
    repositories::ConversationRepository,
    services::model_gateway::ModelGateway,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatExchange {
    pub session_id: SessionId,
    pub reply: String,
}

/// Free-form chat that remembers earlier turns of the same session.
pub struct ChatService {
    gateway: Arc<dyn ModelGateway>,
    conversations: Arc<dyn ConversationRepository>,
}

impl ChatService {
    pub fn new(
        gateway: Arc<dyn ModelGateway>,
        conversations: Arc<dyn ConversationRepository>,
    ) -> Self {
        Self {
            gateway,
            conversations,
        }
    }

    pub async fn send_message(&self, request: &ChatRequestDto) -> AppResult<ChatExchange> {
        request.validate()?;
        let message = request.message.trim();
        if message.is_empty() {
            return Err(RequestViolation::EmptyMessage.into());
        }
        let session_id = SessionId::resolve(request.session_id.as_deref())?;

        let mut history = self.conversations.load(&session_id).await?;
        history.push(ConversationTurn::user(message));

        let reply = self.gateway.complete(&history).await?;
        history.push(ConversationTurn::assistant(reply.clone()));
        self.conversations.save(&session_id, &history).await?;

        log::info!(
            "Chat session {} now has {} turns",
            session_id,
            history.len()
        );
        Ok(ChatExchange { session_id, reply })
    }

    pub async fn list_sessions(&self) -> AppResult<Vec<SessionId>> {
        self.conversations.list_sessions().await
    }
}
