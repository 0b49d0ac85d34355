use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::{
        request::ChatRequestDto,
        response::{ChatResponse, SessionListResponse, TranscriptResponse},
    },
};

/// Saved quiz sessions, oldest first.
#[get("/sessions")]
pub async fn list_sessions(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let sessions = state.quiz_service.list_sessions().await?;
    Ok(HttpResponse::Ok().json(SessionListResponse::from(sessions)))
}

#[get("/sessions/{session_id}")]
pub async fn get_session(
    state: web::Data<AppState>,
    session_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let session_id = session_id.into_inner();
    let turns = state.quiz_service.get_transcript(&session_id).await?;
    Ok(HttpResponse::Ok().json(TranscriptResponse { session_id, turns }))
}

#[get("/chat/sessions")]
pub async fn list_chat_sessions(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let sessions = state.chat_service.list_sessions().await?;
    Ok(HttpResponse::Ok().json(SessionListResponse::from(sessions)))
}

#[post("/chat")]
pub async fn chat(
    state: web::Data<AppState>,
    request: web::Json<ChatRequestDto>,
) -> Result<HttpResponse, AppError> {
    let exchange = state.chat_service.send_message(&request).await?;
    Ok(HttpResponse::Ok().json(ChatResponse {
        session_id: exchange.session_id.into(),
        reply: exchange.reply,
    }))
}
