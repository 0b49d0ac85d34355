use actix_web::{http::header::ContentDisposition, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::{request::QuizRequestDto, response::QuizResponse},
    services::pdf_export::export_quiz_pdf,
};

#[post("/quiz")]
pub async fn generate_quiz(
    state: web::Data<AppState>,
    request: web::Json<QuizRequestDto>,
) -> Result<HttpResponse, AppError> {
    let session = state.quiz_service.generate_quiz(&request).await?;
    Ok(HttpResponse::Ok().json(QuizResponse::from(session)))
}

#[post("/generate_pdf")]
pub async fn generate_pdf(
    state: web::Data<AppState>,
    request: web::Json<QuizRequestDto>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    let session = state.quiz_service.generate_quiz(&request).await?;
    let export = export_quiz_pdf(&state.config.exports_dir, &session, request.hide_answers).await?;

    Ok(HttpResponse::Ok()
        .content_type("application/pdf")
        .insert_header(ContentDisposition::attachment(export.filename))
        .body(export.bytes))
}
