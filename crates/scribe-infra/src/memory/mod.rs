//! In-memory repositories - used when no database is configured and as test
//! doubles for the service layer.
//!
//! Note: data is lost on process restart.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use scribe_core::domain::{Post, User};
use scribe_core::error::RepoError;
use scribe_core::ports::{PostRepository, UserRepository};

#[cfg(test)]
mod tests;

/// In-memory post store backed by a HashMap behind an async RwLock.
pub struct InMemoryPostRepository {
    store: RwLock<HashMap<Uuid, Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn contains_any_term(post: &Post, terms: &[String]) -> bool {
    let title = post.title.to_lowercase();
    let excerpt = post.excerpt.to_lowercase();
    let content = post.content.to_lowercase();

    terms.iter().any(|term| {
        title.contains(term.as_str())
            || excerpt.contains(term.as_str())
            || content.contains(term.as_str())
    })
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let store = self.store.read().await;
        Ok(store.get(&id).cloned())
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;
        store.insert(post.id, post.clone());
        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;
        match store.get_mut(&post.id) {
            Some(existing) => {
                *existing = post.clone();
                Ok(post)
            }
            None => Err(RepoError::NotFound),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        store.remove(&id).map(|_| ()).ok_or(RepoError::NotFound)
    }

    async fn list(
        &self,
        author_id: Option<Uuid>,
        limit: Option<u64>,
        skip: u64,
    ) -> Result<Vec<Post>, RepoError> {
        let store = self.store.read().await;

        let mut posts: Vec<Post> = store
            .values()
            .filter(|post| author_id.is_none_or(|author| post.author_id == author))
            .cloned()
            .collect();

        posts.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        let limit = limit.unwrap_or(u64::MAX) as usize;
        Ok(posts.into_iter().skip(skip as usize).take(limit).collect())
    }

    async fn search_matching(
        &self,
        terms: &[String],
        author_id: Option<Uuid>,
    ) -> Result<Vec<Post>, RepoError> {
        let store = self.store.read().await;

        Ok(store
            .values()
            .filter(|post| author_id.is_none_or(|author| post.author_id == author))
            .filter(|post| contains_any_term(post, terms))
            .cloned()
            .collect())
    }
}

/// In-memory user store with the same unique-email rule as the database.
pub struct InMemoryUserRepository {
    store: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let store = self.store.read().await;
        Ok(store.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let store = self.store.read().await;
        Ok(store.values().find(|u| u.email == email).cloned())
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        let mut store = self.store.write().await;

        if store.values().any(|u| u.email == user.email) {
            return Err(RepoError::Constraint("email already registered".to_string()));
        }

        store.insert(user.id, user.clone());
        Ok(user)
    }
}
