use std::time::Duration;

use async_openai::{config::OpenAIConfig, Client};
use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use crate::{
    config::Config,
    errors::GenerationFailure,
    models::domain::ConversationTurn,
};

/// Black-box text generation: a conversation in, the next reply out.
///
/// Implementations make exactly one outbound call per invocation and never
/// mutate the history; appending the reply is up to the caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ModelGateway: Send + Sync {
    async fn complete(&self, history: &[ConversationTurn]) -> Result<String, GenerationFailure>;
}

#[derive(Debug, Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: &'a [ConversationTurn],
}

#[derive(Debug, Deserialize)]
struct ChatCompletionReply {
    #[serde(default)]
    choices: Vec<ReplyChoice>,
}

#[derive(Debug, Deserialize)]
struct ReplyChoice {
    message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatCompletionReply {
    /// Text of the first choice. Null or blank content is a valid (empty)
    /// reply; only a reply without any choice is a failure.
    fn into_text(self) -> Result<String, GenerationFailure> {
        self.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.unwrap_or_default())
            .ok_or(GenerationFailure::EmptyReply)
    }
}

/// Chat-completions gateway for OpenAI-compatible endpoints.
pub struct OpenAiGateway {
    client: Client<OpenAIConfig>,
    model: String,
    timeout: Option<Duration>,
}

impl OpenAiGateway {
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(config.openai_api_key.expose_secret())
            .with_api_base(config.openai_api_base.as_str());

        Self {
            client: Client::with_config(openai_config),
            model: config.openai_model.clone(),
            timeout: config.generation_timeout_secs.map(Duration::from_secs),
        }
    }

    async fn request(&self, history: &[ConversationTurn]) -> Result<String, GenerationFailure> {
        let body = ChatCompletionBody {
            model: &self.model,
            messages: history,
        };

        let reply: ChatCompletionReply = self
            .client
            .chat()
            .create_byot(&body)
            .await
            .map_err(|e| GenerationFailure::Api(e.to_string()))?;

        reply.into_text()
    }
}

#[async_trait]
impl ModelGateway for OpenAiGateway {
    async fn complete(&self, history: &[ConversationTurn]) -> Result<String, GenerationFailure> {
        log::debug!(
            "Sending {} turns to model {}",
            history.len(),
            self.model
        );

        let result = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.request(history))
                .await
                .unwrap_or(Err(GenerationFailure::Timeout(limit.as_secs()))),
            None => self.request(history).await,
        };

        if let Err(e) = &result {
            log::warn!("Model call failed: {}", e);
        }
        result
    }
}
