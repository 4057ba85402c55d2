use actix_web::{delete, post, put, web, HttpResponse};

use crate::{
    app_state::AppState, auth::AuthenticatedActor, errors::AppError,
    models::dto::request::QuestionRequest,
};

#[post("/question")]
pub async fn create_question(
    state: web::Data<AppState>,
    request: web::Json<QuestionRequest>,
    auth: AuthenticatedActor,
) -> Result<HttpResponse, AppError> {
    let actor = auth.0;
    state
        .question_service
        .create(&actor, request.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[put("/question/{id}")]
pub async fn update_question(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    request: web::Json<QuestionRequest>,
    auth: AuthenticatedActor,
) -> Result<HttpResponse, AppError> {
    let actor = auth.0;
    state
        .question_service
        .update(&actor, id.into_inner(), request.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[delete("/question/bulk")]
pub async fn bulk_delete_questions(
    state: web::Data<AppState>,
    ids: web::Json<Vec<i64>>,
    auth: AuthenticatedActor,
) -> Result<HttpResponse, AppError> {
    let actor = auth.0;
    state
        .question_service
        .bulk_delete(&actor, &ids.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[delete("/question/{id}")]
pub async fn delete_question(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    auth: AuthenticatedActor,
) -> Result<HttpResponse, AppError> {
    let actor = auth.0;
    state
        .question_service
        .delete(&actor, id.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
