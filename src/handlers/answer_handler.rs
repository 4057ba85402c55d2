use actix_web::{delete, post, put, web, HttpResponse};

use crate::{
    app_state::AppState, auth::AuthenticatedActor, errors::AppError,
    models::dto::request::AnswerRequest,
};

#[post("/answer")]
pub async fn create_answer(
    state: web::Data<AppState>,
    request: web::Json<AnswerRequest>,
    auth: AuthenticatedActor,
) -> Result<HttpResponse, AppError> {
    let actor = auth.0;
    state
        .answer_service
        .create(&actor, request.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[post("/answer/bulk")]
pub async fn bulk_create_answers(
    state: web::Data<AppState>,
    requests: web::Json<Vec<AnswerRequest>>,
    auth: AuthenticatedActor,
) -> Result<HttpResponse, AppError> {
    let actor = auth.0;
    state
        .answer_service
        .bulk_create(&actor, requests.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[put("/answer/{id}")]
pub async fn update_answer(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    request: web::Json<AnswerRequest>,
    auth: AuthenticatedActor,
) -> Result<HttpResponse, AppError> {
    let actor = auth.0;
    state
        .answer_service
        .update(&actor, id.into_inner(), request.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[delete("/answer/bulk")]
pub async fn bulk_delete_answers(
    state: web::Data<AppState>,
    ids: web::Json<Vec<i64>>,
    auth: AuthenticatedActor,
) -> Result<HttpResponse, AppError> {
    let actor = auth.0;
    state
        .answer_service
        .bulk_delete(&actor, &ids.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[delete("/answer/{id}")]
pub async fn delete_answer(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    auth: AuthenticatedActor,
) -> Result<HttpResponse, AppError> {
    let actor = auth.0;
    state
        .answer_service
        .delete(&actor, id.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
