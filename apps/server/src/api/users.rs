use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::{
    auth::{AuthenticatedUser, AuthError},
    error::{ApiError, ApiResult},
    main_lib::AppState,
};
use solarfin_core::users::{NewUser, UserProfile};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegisterRequest {
    full_name: String,
    email: String,
    password: String,
    address: Option<String>,
}

#[derive(Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    user: UserProfile,
    access_token: String,
    token_type: String,
    expires_in: u64,
}

async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<UserProfile>)> {
    if payload.password.len() < 6 {
        return Err(ApiError::BadRequest(
            "Password must be at least 6 characters long".to_string(),
        ));
    }

    let password_hash = state.auth.hash_password(&payload.password)?;
    let profile = state
        .user_service
        .register(NewUser {
            full_name: payload.full_name,
            email: payload.email,
            address: payload.address,
            password_hash,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    // A missing account and a wrong password are indistinguishable here.
    let user = state
        .user_service
        .get_user_by_email(&payload.email)?
        .ok_or(AuthError::InvalidCredentials)?;
    state
        .auth
        .verify_password(&payload.password, &user.password_hash)?;

    state.user_service.record_login(&user.id).await?;

    let access_token = state.auth.issue_token(&user)?;
    let expires_in = state.auth.expires_in().as_secs();
    Ok(Json(LoginResponse {
        user: UserProfile::from(user),
        access_token,
        token_type: "Bearer".to_string(),
        expires_in,
    }))
}

async fn get_profile(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<AuthenticatedUser>,
) -> ApiResult<Json<UserProfile>> {
    let profile = state
        .user_service
        .get_user_by_id(&principal.user_id)?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(profile))
}

pub fn public_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users/register", post(register))
        .route("/users/login", post(login))
}

pub fn protected_router() -> Router<Arc<AppState>> {
    Router::new().route("/users/profile", get(get_profile))
}
