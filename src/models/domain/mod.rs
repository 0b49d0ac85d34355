pub mod conversation;
pub mod quiz_question;
pub mod quiz_session;
pub mod session_id;
pub use conversation::{ConversationTurn, Role};
pub use quiz_question::{Difficulty, QuizQuestion};
pub use quiz_session::QuizSession;
pub use session_id::SessionId;
