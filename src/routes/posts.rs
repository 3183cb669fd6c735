use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::{
    error::AppError,
    models::{
        auth::AuthenticatedUser,
        post::{CreatePostRequest, PostView},
        user::MessageResponse,
    },
    services::posts::PostService,
    AppState,
};

pub async fn create_post(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    payload: Result<Json<CreatePostRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Json(body) = payload?;
    PostService::create(state.posts.as_ref(), &user.username, body)?;
    Ok(Json(MessageResponse::new("Post created successfully")))
}

pub async fn latest_post(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<Json<PostView>, AppError> {
    PostService::latest(state.posts.as_ref()).map(Json)
}
