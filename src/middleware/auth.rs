use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};

use crate::{
    error::AppError, models::auth::AuthenticatedUser, services::token::TokenService, AppState,
};

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        authorize(&parts.headers, &state.tokens).inspect_err(|_| {
            tracing::warn!("rejected request to {}", parts.uri.path());
        })
    }
}

/// Resolves the caller from `Authorization: Bearer <token>`.
///
/// The header is split on whitespace and the second segment is taken as the token;
/// the scheme word itself is not checked. A missing header, a missing segment and a
/// token that fails verification are all the same `Forbidden`.
pub fn authorize(headers: &HeaderMap, tokens: &TokenService) -> Result<AuthenticatedUser, AppError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::Forbidden)?;

    let token = auth_header
        .split_whitespace()
        .nth(1)
        .ok_or(AppError::Forbidden)?;

    let claims = tokens.verify(token)?;

    Ok(AuthenticatedUser {
        username: claims.username,
    })
}
