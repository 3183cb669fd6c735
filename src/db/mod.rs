pub mod memory;

use crate::models::{post::Post, user::User};

pub use memory::{InMemoryCredentialStore, InMemoryPostStore};

/// Where registered users live. Token logic never touches this.
pub trait CredentialStore: Send + Sync {
    fn find_by_username(&self, username: &str) -> Option<User>;

    /// Stores `user` unless the username is taken. Returns `false` when it was.
    ///
    /// Must be atomic: of several concurrent calls for one username, exactly one returns `true`.
    fn insert_if_absent(&self, user: User) -> bool;
}

/// Append-only post log.
pub trait PostStore: Send + Sync {
    fn append(&self, post: Post);

    fn latest(&self) -> Option<Post>;
}
