use std::{env, path::PathBuf};

use secrecy::{ExposeSecret, SecretString};

use crate::errors::{AppError, AppResult};

#[derive(Clone, Debug)]
pub struct Config {
    pub openai_api_key: SecretString,
    pub openai_api_base: String,
    pub openai_model: String,
    pub generation_timeout_secs: Option<u64>,
    pub conversations_dir: PathBuf,
    pub chats_dir: PathBuf,
    pub exports_dir: PathBuf,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub app_env: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            openai_api_key: SecretString::from(env::var("OPENAI_API_KEY").unwrap_or_default()),
            openai_api_base: env::var("OPENAI_API_BASE")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            openai_model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            // 0 disables the timeout
            generation_timeout_secs: match env::var("GENERATION_TIMEOUT_SECS")
                .ok()
                .and_then(|t| t.parse::<u64>().ok())
            {
                Some(0) => None,
                Some(secs) => Some(secs),
                None => Some(60),
            },
            conversations_dir: env::var("CONVERSATIONS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("conversations")),
            chats_dir: env::var("CHATS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("conversations/chats")),
            exports_dir: env::var("EXPORTS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("exports")),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "127.0.0.1".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            app_env: env::var("APP_ENV")
                .map(|e| e.to_lowercase())
                .unwrap_or_else(|_| "development".to_string()),
        }
    }

    pub fn is_development(&self) -> bool {
        self.app_env == "development"
    }

    pub fn ui_url(&self) -> String {
        format!("http://{}:{}/ui", self.web_server_host, self.web_server_port)
    }

    pub fn health_url(&self) -> String {
        format!(
            "http://{}:{}/health",
            self.web_server_host, self.web_server_port
        )
    }

    /// Rejects configurations that cannot reach the model API in production.
    pub fn validate_for_production(&self) -> AppResult<()> {
        if self.is_development() {
            return Ok(());
        }

        if self.openai_api_key.expose_secret().trim().is_empty() {
            return Err(AppError::InternalError(
                "OPENAI_API_KEY is not set. Set it before starting in production mode.".to_string(),
            ));
        }

        if self.openai_model.trim().is_empty() {
            return Err(AppError::InternalError(
                "OPENAI_MODEL must not be empty.".to_string(),
            ));
        }

        Ok(())
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            openai_api_key: SecretString::from("sk-test".to_string()),
            openai_api_base: "http://127.0.0.1:9/v1".to_string(),
            openai_model: "gpt-4o-mini".to_string(),
            generation_timeout_secs: Some(5),
            conversations_dir: PathBuf::from("target/test-conversations"),
            chats_dir: PathBuf::from("target/test-conversations/chats"),
            exports_dir: PathBuf::from("target/test-exports"),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8000,
            app_env: "test".to_string(),
        }
    }
}
