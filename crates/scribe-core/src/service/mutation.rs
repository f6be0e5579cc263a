//! Write side: create, update and delete posts.

use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use crate::domain::{Post, PostDraft};
use crate::error::DomainError;
use crate::ports::PostRepository;

use super::{DEFAULT_STORE_TIMEOUT, bounded, classify_store_error};

/// Validated writes against the post store.
///
/// Ownership is enforced here, server-side: update and delete require the
/// requester to be the post's author. The store's last-write-wins semantics
/// are relied on for concurrent updates; there is no optimistic-concurrency
/// token.
pub struct PostMutationService {
    posts: Arc<dyn PostRepository>,
    store_timeout: Duration,
}

impl PostMutationService {
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self {
            posts,
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    pub fn with_store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout = timeout;
        self
    }

    /// Validate a draft and persist it as a new post owned by `author_id`.
    pub async fn create(
        &self,
        draft: PostDraft,
        author_id: Uuid,
    ) -> Result<Post, DomainError> {
        let fields = draft.validate()?;
        let post = Post::new(author_id, fields);

        let saved = bounded(self.store_timeout, self.posts.insert(post))
            .await
            .map_err(|e| {
                classify_store_error(e, || {
                    DomainError::Internal("insert reported a missing row".to_string())
                })
            })?;

        tracing::debug!(post_id = %saved.id, author_id = %author_id, "post created");
        Ok(saved)
    }

    /// Replace the mutable fields of an existing post.
    ///
    /// Fails with `NotFound` when the post does not exist and `Forbidden`
    /// when `requester_id` is not the author. `created_at` and `author_id`
    /// are never touched; `updated_at` is refreshed.
    pub async fn update(
        &self,
        id: Uuid,
        draft: PostDraft,
        requester_id: Uuid,
    ) -> Result<Post, DomainError> {
        let fields = draft.validate()?;
        let mut post = self.fetch_owned(id, requester_id).await?;

        post.revise(fields);

        let saved = bounded(self.store_timeout, self.posts.update(post))
            .await
            .map_err(|e| {
                classify_store_error(e, || DomainError::NotFound { entity: "post", id })
            })?;

        tracing::debug!(post_id = %id, "post updated");
        Ok(saved)
    }

    /// Remove an existing post, subject to the same ownership check.
    pub async fn delete(&self, id: Uuid, requester_id: Uuid) -> Result<(), DomainError> {
        self.fetch_owned(id, requester_id).await?;

        bounded(self.store_timeout, self.posts.delete(id))
            .await
            .map_err(|e| {
                classify_store_error(e, || DomainError::NotFound { entity: "post", id })
            })?;

        tracing::debug!(post_id = %id, "post deleted");
        Ok(())
    }

    /// Fetch a post and verify the requester owns it.
    async fn fetch_owned(&self, id: Uuid, requester_id: Uuid) -> Result<Post, DomainError> {
        let post = bounded(self.store_timeout, self.posts.find_by_id(id))
            .await
            .map_err(|e| {
                classify_store_error(e, || DomainError::NotFound { entity: "post", id })
            })?
            .ok_or(DomainError::NotFound { entity: "post", id })?;

        if post.author_id != requester_id {
            tracing::warn!(post_id = %id, requester_id = %requester_id, "ownership check failed");
            return Err(DomainError::Forbidden);
        }

        Ok(post)
    }
}
