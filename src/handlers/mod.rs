pub mod health_handler;
pub mod quiz_handler;
pub mod session_handler;

use actix_web::web;

use crate::errors::AppError;

pub use health_handler::{health_check, index_redirect, serve_ui};
pub use quiz_handler::{generate_pdf, generate_quiz};
pub use session_handler::{chat, get_session, list_chat_sessions, list_sessions};

/// Registers every route; malformed JSON bodies answer with the same error
/// shape as the handlers.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into()),
    )
    .service(health_check)
    .service(index_redirect)
    .service(serve_ui)
    .service(generate_quiz)
    .service(generate_pdf)
    .service(list_sessions)
    .service(get_session)
    .service(list_chat_sessions)
    .service(chat);
}
