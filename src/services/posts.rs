use chrono::Utc;
use uuid::Uuid;

use crate::{
    db::PostStore,
    error::AppError,
    models::post::{CreatePostRequest, Post, PostView},
};

pub struct PostService;

impl PostService {
    pub fn create(
        store: &dyn PostStore,
        author: &str,
        req: CreatePostRequest,
    ) -> Result<Post, AppError> {
        let (title, message) = match (req.title, req.message) {
            (Some(title), Some(message)) => (title, message),
            _ => return Err(AppError::Validation("Title and message are required".into())),
        };

        let post = Post {
            id: Uuid::new_v4(),
            title,
            message,
            author: author.to_string(),
            created_at: Utc::now(),
        };
        store.append(post.clone());
        tracing::info!("post {} created by '{author}'", post.id);
        Ok(post)
    }

    pub fn latest(store: &dyn PostStore) -> Result<PostView, AppError> {
        store
            .latest()
            .map(PostView::from)
            .ok_or_else(|| AppError::NotFound("No posts available".into()))
    }
}
