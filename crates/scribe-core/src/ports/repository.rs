use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Post, User};
use crate::error::RepoError;

/// Post repository port.
///
/// Implementations only filter; ordering beyond the listing sort and all
/// relevance scoring happens in the service layer.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find a post by its unique ID.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError>;

    /// Persist a brand-new post.
    async fn insert(&self, post: Post) -> Result<Post, RepoError>;

    /// Persist changes to an existing post. `RepoError::NotFound` when the
    /// row no longer exists.
    async fn update(&self, post: Post) -> Result<Post, RepoError>;

    /// Delete a post by ID. `RepoError::NotFound` when the row does not exist.
    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;

    /// Posts ordered newest-created-first, ties broken by ID descending,
    /// optionally restricted to one author. The ordering is load-bearing:
    /// a `skip`/`limit` window must never skip or duplicate a record between
    /// two calls absent writes.
    async fn list(
        &self,
        author_id: Option<Uuid>,
        limit: Option<u64>,
        skip: u64,
    ) -> Result<Vec<Post>, RepoError>;

    /// All posts where any term occurs in title, excerpt or content
    /// (case-insensitive), optionally restricted to one author. Unordered;
    /// the caller ranks.
    async fn search_matching(
        &self,
        terms: &[String],
        author_id: Option<Uuid>,
    ) -> Result<Vec<Post>, RepoError>;
}

/// User repository port.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their unique ID.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError>;

    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Persist a new user. `RepoError::Constraint` on duplicate email.
    async fn insert(&self, user: User) -> Result<User, RepoError>;
}
