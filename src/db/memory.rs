use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::models::{post::Post, user::User};

use super::{CredentialStore, PostStore};

#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn find_by_username(&self, username: &str) -> Option<User> {
        self.users
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(username)
            .cloned()
    }

    fn insert_if_absent(&self, user: User) -> bool {
        let mut users = self.users.write().unwrap_or_else(PoisonError::into_inner);
        match users.entry(user.username.clone()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(user);
                true
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct InMemoryPostStore {
    posts: RwLock<Vec<Post>>,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PostStore for InMemoryPostStore {
    fn append(&self, post: Post) {
        self.posts
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(post);
    }

    fn latest(&self) -> Option<Post> {
        self.posts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}
