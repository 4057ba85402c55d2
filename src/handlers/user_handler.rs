use actix_web::{delete, get, put, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::AuthenticatedActor,
    errors::AppError,
    models::dto::request::{PasswordUpdateRequest, UserUpdateRequest},
    pagination::PageParams,
};

#[get("/user")]
pub async fn get_profile(
    state: web::Data<AppState>,
    auth: AuthenticatedActor,
) -> Result<HttpResponse, AppError> {
    let actor = auth.0;
    let profile = state.user_service.get_profile(&actor).await?;
    Ok(HttpResponse::Ok().json(profile))
}

#[get("/user/users")]
pub async fn get_all_users(
    state: web::Data<AppState>,
    query: web::Query<PageParams>,
    _auth: AuthenticatedActor,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();
    params.validate()?;
    let page = state.user_service.list_users(&params).await?;
    Ok(HttpResponse::Ok().json(page))
}

#[get("/user/users/{user_id}")]
pub async fn get_user_by_id(
    state: web::Data<AppState>,
    user_id: web::Path<i64>,
    _auth: AuthenticatedActor,
) -> Result<HttpResponse, AppError> {
    let profile = state.user_service.get_user(user_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(profile))
}

#[put("/user")]
pub async fn update_profile(
    state: web::Data<AppState>,
    request: web::Json<UserUpdateRequest>,
    auth: AuthenticatedActor,
) -> Result<HttpResponse, AppError> {
    let actor = auth.0;
    state
        .user_service
        .update_profile(&actor, request.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[put("/user/change_password")]
pub async fn change_password(
    state: web::Data<AppState>,
    request: web::Json<PasswordUpdateRequest>,
    auth: AuthenticatedActor,
) -> Result<HttpResponse, AppError> {
    let actor = auth.0;
    state
        .user_service
        .change_password(&actor, request.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[put("/user/promote/{user_id}")]
pub async fn promote_user(
    state: web::Data<AppState>,
    user_id: web::Path<i64>,
    auth: AuthenticatedActor,
) -> Result<HttpResponse, AppError> {
    let actor = auth.0;
    state
        .user_service
        .promote(&actor, user_id.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[put("/user/demote/{user_id}")]
pub async fn demote_user(
    state: web::Data<AppState>,
    user_id: web::Path<i64>,
    auth: AuthenticatedActor,
) -> Result<HttpResponse, AppError> {
    let actor = auth.0;
    state
        .user_service
        .demote(&actor, user_id.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[delete("/user")]
pub async fn delete_account(
    state: web::Data<AppState>,
    auth: AuthenticatedActor,
) -> Result<HttpResponse, AppError> {
    let actor = auth.0;
    state.user_service.delete_account(&actor).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[get("/health")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[get("/health/ready")]
pub async fn health_check_ready(state: web::Data<AppState>) -> HttpResponse {
    let db_health = state.db.health_check().await;

    let status = if db_health.is_ok() {
        "ready"
    } else {
        "not_ready"
    };

    let response = serde_json::json!({
        "status": status,
        "version": env!("CARGO_PKG_VERSION"),
        "dependencies": {
            "mongodb": if db_health.is_ok() { "ok" } else { "error" }
        }
    });

    if db_health.is_ok() {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

#[get("/health/live")]
pub async fn health_check_live() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
