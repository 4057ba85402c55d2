use actix_web::{delete, get, post, put, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::AuthenticatedActor,
    errors::AppError,
    models::dto::request::{ApprovalParams, CategoryRequest, SearchParams},
    pagination::PageParams,
};

#[get("/category")]
pub async fn get_categories(
    state: web::Data<AppState>,
    query: web::Query<PageParams>,
    auth: AuthenticatedActor,
) -> Result<HttpResponse, AppError> {
    let actor = auth.0;
    let params = query.into_inner();
    params.validate()?;
    let page = state.category_service.list(&actor, &params).await?;
    Ok(HttpResponse::Ok().json(page))
}

#[get("/category/search")]
pub async fn search_categories(
    state: web::Data<AppState>,
    search: web::Query<SearchParams>,
    pagination: web::Query<PageParams>,
    auth: AuthenticatedActor,
) -> Result<HttpResponse, AppError> {
    let actor = auth.0;
    let params = pagination.into_inner();
    params.validate()?;
    let page = state
        .category_service
        .search(&actor, &search.query, &params)
        .await?;
    Ok(HttpResponse::Ok().json(page))
}

#[get("/category/{id}")]
pub async fn get_category(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    auth: AuthenticatedActor,
) -> Result<HttpResponse, AppError> {
    let actor = auth.0;
    let category = state
        .category_service
        .get(&actor, id.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(category))
}

#[post("/category")]
pub async fn create_category(
    state: web::Data<AppState>,
    request: web::Json<CategoryRequest>,
    _auth: AuthenticatedActor,
) -> Result<HttpResponse, AppError> {
    state.category_service.create(request.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[put("/category/approve/{id}")]
pub async fn approve_category(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    approval: web::Query<ApprovalParams>,
    auth: AuthenticatedActor,
) -> Result<HttpResponse, AppError> {
    let actor = auth.0;
    state
        .category_service
        .approve(&actor, id.into_inner(), approval.approved)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[put("/category/{id}")]
pub async fn update_category(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    request: web::Json<CategoryRequest>,
    auth: AuthenticatedActor,
) -> Result<HttpResponse, AppError> {
    let actor = auth.0;
    state
        .category_service
        .update(&actor, id.into_inner(), request.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[delete("/category/{id}")]
pub async fn delete_category(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    auth: AuthenticatedActor,
) -> Result<HttpResponse, AppError> {
    let actor = auth.0;
    state
        .category_service
        .delete(&actor, id.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
