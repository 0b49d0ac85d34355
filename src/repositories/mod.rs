pub mod conversation_repository;

pub use conversation_repository::{
    list_saved_sessions, ConversationRepository, FileConversationRepository,
};
