use axum::{body::Bytes, extract::rejection::JsonRejection, extract::State, Json};

use crate::{
    error::AppError,
    models::{
        auth::{AccessTokenResponse, RefreshTokenRequest, TokenPair},
        user::{CredentialsRequest, MessageResponse},
    },
    services::auth::AuthService,
    AppState,
};

pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Json(body) = payload?;
    AuthService::register(state.users.as_ref(), &body.username, &body.password)?;
    Ok(Json(MessageResponse::new("User registered successfully")))
}

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<Json<TokenPair>, AppError> {
    let Json(body) = payload?;
    AuthService::login(state.users.as_ref(), &state.tokens, &body.username, &body.password)
        .map(Json)
}

/// The body is parsed by hand so that an empty or non-JSON body counts as a missing
/// token (401) rather than an extractor rejection.
pub async fn refresh_token(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<AccessTokenResponse>, AppError> {
    let req: RefreshTokenRequest = serde_json::from_slice(&body).unwrap_or_default();
    AuthService::refresh(&state.tokens, req.token()?).map(Json)
}
