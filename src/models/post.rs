use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub message: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub title: Option<String>,
    pub message: Option<String>,
}

/// Public view of the latest post: the author and timestamps stay server-side.
#[derive(Debug, Serialize)]
pub struct PostView {
    pub title: String,
    pub message: String,
}

impl From<Post> for PostView {
    fn from(p: Post) -> Self {
        Self {
            title: p.title,
            message: p.message,
        }
    }
}
