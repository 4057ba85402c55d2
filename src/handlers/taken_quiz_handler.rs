use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState, auth::AuthenticatedActor, errors::AppError,
    models::dto::request::TakenQuizRequest, pagination::PageParams,
};

#[get("/taken_quiz")]
pub async fn get_own_history(
    state: web::Data<AppState>,
    query: web::Query<PageParams>,
    auth: AuthenticatedActor,
) -> Result<HttpResponse, AppError> {
    let actor = auth.0;
    let params = query.into_inner();
    params.validate()?;
    let page = state.taken_quiz_service.list_own(&actor, &params).await?;
    Ok(HttpResponse::Ok().json(page))
}

#[get("/taken_quiz/user/{user_id}")]
pub async fn get_user_history(
    state: web::Data<AppState>,
    user_id: web::Path<i64>,
    query: web::Query<PageParams>,
    auth: AuthenticatedActor,
) -> Result<HttpResponse, AppError> {
    let actor = auth.0;
    let params = query.into_inner();
    params.validate()?;
    let page = state
        .taken_quiz_service
        .list_for_user(&actor, user_id.into_inner(), &params)
        .await?;
    Ok(HttpResponse::Ok().json(page))
}

#[post("/taken_quiz")]
pub async fn record_taken_quiz(
    state: web::Data<AppState>,
    request: web::Json<TakenQuizRequest>,
    auth: AuthenticatedActor,
) -> Result<HttpResponse, AppError> {
    let actor = auth.0;
    state
        .taken_quiz_service
        .create(&actor, request.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
