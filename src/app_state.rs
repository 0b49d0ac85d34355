use std::sync::Arc;

use crate::{
    config::Config,
    constants::{prompts::CHAT_SYSTEM_PROMPT, quiz_prompt::quiz_system_turn_content},
    errors::AppResult,
    repositories::{ConversationRepository, FileConversationRepository},
    services::{
        chat_service::ChatService,
        model_gateway::{ModelGateway, OpenAiGateway},
        quiz_service::QuizService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub quiz_service: Arc<QuizService>,
    pub chat_service: Arc<ChatService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let gateway: Arc<dyn ModelGateway> = Arc::new(OpenAiGateway::new(&config));

        let quiz_conversations = Arc::new(FileConversationRepository::new(
            &config.conversations_dir,
            quiz_system_turn_content(),
        ));
        quiz_conversations.ensure_directory().await?;

        let chat_conversations = Arc::new(FileConversationRepository::new(
            &config.chats_dir,
            CHAT_SYSTEM_PROMPT,
        ));
        chat_conversations.ensure_directory().await?;

        Ok(Self::from_parts(
            config,
            gateway,
            quiz_conversations,
            chat_conversations,
        ))
    }

    /// Wires the services from already-built collaborators.
    pub fn from_parts(
        config: Config,
        gateway: Arc<dyn ModelGateway>,
        quiz_conversations: Arc<dyn ConversationRepository>,
        chat_conversations: Arc<dyn ConversationRepository>,
    ) -> Self {
        let quiz_service = Arc::new(QuizService::new(gateway.clone(), quiz_conversations));
        let chat_service = Arc::new(ChatService::new(gateway, chat_conversations));

        Self {
            quiz_service,
            chat_service,
            config: Arc::new(config),
        }
    }
}
