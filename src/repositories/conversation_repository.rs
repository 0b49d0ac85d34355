use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{ConversationTurn, SessionId},
};

#[async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Replaces whatever was stored for `session_id`.
    async fn save(&self, session_id: &SessionId, history: &[ConversationTurn]) -> AppResult<()>;

    /// Stored turns, or the default system turn for an unknown session.
    async fn load(&self, session_id: &SessionId) -> AppResult<Vec<ConversationTurn>>;

    async fn exists(&self, session_id: &SessionId) -> AppResult<bool>;

    async fn list_sessions(&self) -> AppResult<Vec<SessionId>>;
}

/// Identifiers of the `*.json` session files in `directory`, sorted by name.
///
/// Timestamp ids sort chronologically. A missing directory has no sessions;
/// files whose stem is not a valid session id are ignored.
pub fn list_saved_sessions(directory: &Path) -> std::io::Result<Vec<SessionId>> {
    let entries = match std::fs::read_dir(directory) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };

    let mut sessions = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        if let Some(id) = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .and_then(|stem| SessionId::parse(stem).ok())
        {
            sessions.push(id);
        }
    }
    sessions.sort();
    Ok(sessions)
}

/// One pretty-printed JSON file per session under a single directory.
pub struct FileConversationRepository {
    directory: PathBuf,
    default_system_prompt: String,
}

impl FileConversationRepository {
    pub fn new(directory: impl Into<PathBuf>, default_system_prompt: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            default_system_prompt: default_system_prompt.into(),
        }
    }

    pub async fn ensure_directory(&self) -> AppResult<()> {
        tokio::fs::create_dir_all(&self.directory).await?;
        log::info!("Conversation directory ready at {}", self.directory.display());
        Ok(())
    }

    pub fn session_path(&self, session_id: &SessionId) -> PathBuf {
        self.directory.join(format!("{}.json", session_id))
    }

    fn default_history(&self) -> Vec<ConversationTurn> {
        vec![ConversationTurn::system(self.default_system_prompt.clone())]
    }
}

#[async_trait]
impl ConversationRepository for FileConversationRepository {
    async fn save(&self, session_id: &SessionId, history: &[ConversationTurn]) -> AppResult<()> {
        tokio::fs::create_dir_all(&self.directory).await?;

        let path = self.session_path(session_id);
        // unique per save so concurrent writers of one session never share it
        let tmp_path = self
            .directory
            .join(format!("{}.{}.json.tmp", session_id, Uuid::new_v4().simple()));
        let bytes = serde_json::to_vec_pretty(history)?;

        tokio::fs::write(&tmp_path, &bytes).await?;
        if let Err(e) = tokio::fs::rename(&tmp_path, &path).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(e.into());
        }

        log::info!(
            "Saved {} turns for session {} to {}",
            history.len(),
            session_id,
            path.display()
        );
        Ok(())
    }

    async fn load(&self, session_id: &SessionId) -> AppResult<Vec<ConversationTurn>> {
        let path = self.session_path(session_id);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("No saved conversation for session {}, starting fresh", session_id);
                return Ok(self.default_history());
            }
            Err(e) => return Err(e.into()),
        };

        serde_json::from_slice(&bytes).map_err(|e| {
            AppError::StorageError(format!(
                "Conversation file {} is corrupt: {}",
                path.display(),
                e
            ))
        })
    }

    async fn exists(&self, session_id: &SessionId) -> AppResult<bool> {
        Ok(tokio::fs::try_exists(self.session_path(session_id)).await?)
    }

    async fn list_sessions(&self) -> AppResult<Vec<SessionId>> {
        let directory = self.directory.clone();
        tokio::task::spawn_blocking(move || list_saved_sessions(&directory))
            .await
            .map_err(|e| AppError::InternalError(format!("Session listing task failed: {}", e)))?
            .map_err(AppError::from)
    }
}
