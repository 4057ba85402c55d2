use actix_web::{delete, get, post, put, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::AuthenticatedActor,
    errors::AppError,
    models::dto::request::{
        ApprovalParams, CategoryFilterParams, QuizRequest, RateParams, SearchParams,
    },
    pagination::PageParams,
};

#[get("/quiz")]
pub async fn get_quizzes(
    state: web::Data<AppState>,
    query: web::Query<PageParams>,
    auth: AuthenticatedActor,
) -> Result<HttpResponse, AppError> {
    let actor = auth.0;
    let params = query.into_inner();
    params.validate()?;
    let page = state.quiz_service.list(&actor, &params).await?;
    Ok(HttpResponse::Ok().json(page))
}

#[get("/quiz/user")]
pub async fn get_own_quizzes(
    state: web::Data<AppState>,
    query: web::Query<PageParams>,
    auth: AuthenticatedActor,
) -> Result<HttpResponse, AppError> {
    let actor = auth.0;
    let params = query.into_inner();
    params.validate()?;
    let page = state.quiz_service.list_own(&actor, &params).await?;
    Ok(HttpResponse::Ok().json(page))
}

#[get("/quiz/search")]
pub async fn search_quizzes(
    state: web::Data<AppState>,
    search: web::Query<SearchParams>,
    pagination: web::Query<PageParams>,
    auth: AuthenticatedActor,
) -> Result<HttpResponse, AppError> {
    let actor = auth.0;
    let params = pagination.into_inner();
    params.validate()?;
    let page = state
        .quiz_service
        .search(&actor, &search.query, &params)
        .await?;
    Ok(HttpResponse::Ok().json(page))
}

#[get("/quiz/unapproved")]
pub async fn get_unapproved_quizzes(
    state: web::Data<AppState>,
    query: web::Query<PageParams>,
    auth: AuthenticatedActor,
) -> Result<HttpResponse, AppError> {
    let actor = auth.0;
    let params = query.into_inner();
    params.validate()?;
    let page = state.quiz_service.list_unapproved(&actor, &params).await?;
    Ok(HttpResponse::Ok().json(page))
}

#[get("/quiz/filter")]
pub async fn filter_quizzes(
    state: web::Data<AppState>,
    filter: web::Query<CategoryFilterParams>,
    pagination: web::Query<PageParams>,
    auth: AuthenticatedActor,
) -> Result<HttpResponse, AppError> {
    let actor = auth.0;
    let params = pagination.into_inner();
    params.validate()?;
    let page = state
        .quiz_service
        .list_by_category(&actor, filter.category_id, &params)
        .await?;
    Ok(HttpResponse::Ok().json(page))
}

#[get("/quiz/user/{user_id}")]
pub async fn get_user_quizzes(
    state: web::Data<AppState>,
    user_id: web::Path<i64>,
    query: web::Query<PageParams>,
    auth: AuthenticatedActor,
) -> Result<HttpResponse, AppError> {
    let actor = auth.0;
    let params = query.into_inner();
    params.validate()?;
    let page = state
        .quiz_service
        .list_by_user(&actor, user_id.into_inner(), &params)
        .await?;
    Ok(HttpResponse::Ok().json(page))
}

#[get("/quiz/{id}")]
pub async fn get_quiz(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    auth: AuthenticatedActor,
) -> Result<HttpResponse, AppError> {
    let actor = auth.0;
    let detail = state.quiz_service.get_detail(&actor, id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(detail))
}

#[post("/quiz")]
pub async fn create_quiz(
    state: web::Data<AppState>,
    request: web::Json<QuizRequest>,
    auth: AuthenticatedActor,
) -> Result<HttpResponse, AppError> {
    let actor = auth.0;
    state
        .quiz_service
        .create(&actor, request.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[put("/quiz/rate/{id}")]
pub async fn rate_quiz(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    rate: web::Query<RateParams>,
    auth: AuthenticatedActor,
) -> Result<HttpResponse, AppError> {
    let actor = auth.0;
    state
        .quiz_service
        .rate(&actor, id.into_inner(), rate.rate)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[put("/quiz/approve/{id}")]
pub async fn approve_quiz(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    approval: web::Query<ApprovalParams>,
    auth: AuthenticatedActor,
) -> Result<HttpResponse, AppError> {
    let actor = auth.0;
    state
        .quiz_service
        .approve(&actor, id.into_inner(), approval.approved)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[put("/quiz/{id}")]
pub async fn update_quiz(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    request: web::Json<QuizRequest>,
    auth: AuthenticatedActor,
) -> Result<HttpResponse, AppError> {
    let actor = auth.0;
    state
        .quiz_service
        .update(&actor, id.into_inner(), request.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[delete("/quiz/{id}")]
pub async fn delete_quiz(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    auth: AuthenticatedActor,
) -> Result<HttpResponse, AppError> {
    let actor = auth.0;
    state.quiz_service.delete(&actor, id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
