use actix_web::{post, web, HttpResponse};

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::{
        request::{LoginRequest, RegisterRequest},
        response::TokenResponse,
    },
};

#[post("/register")]
pub async fn register(
    state: web::Data<AppState>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    let user = state.user_service.register(request.into_inner()).await?;
    let token = state.jwt_service.create_token(&user)?;
    Ok(HttpResponse::Created().json(TokenResponse::bearer(token)))
}

#[post("/token")]
pub async fn login(
    state: web::Data<AppState>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    let user = state
        .user_service
        .authenticate(&request.username, &request.password)
        .await?;
    let token = state.jwt_service.create_token(&user)?;
    Ok(HttpResponse::Ok().json(TokenResponse::bearer(token)))
}
