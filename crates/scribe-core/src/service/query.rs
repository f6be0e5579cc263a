//! Read side: listing, fetching and searching posts.

use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use crate::domain::Post;
use crate::error::DomainError;
use crate::ports::PostRepository;
use crate::search;

use super::{
    DEFAULT_SEARCH_LIMIT, DEFAULT_STORE_TIMEOUT, MAX_PAGE_SIZE, bounded, classify_store_error,
};

/// Pagination window for listing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Page {
    /// `None` means "no cap" - the whole result set, as the original listing
    /// endpoint behaves. When present the limit is clamped to
    /// [`MAX_PAGE_SIZE`].
    pub limit: Option<u64>,
    pub skip: u64,
}

/// One page of search hits plus pagination metadata.
#[derive(Debug, Clone)]
pub struct SearchResults {
    pub posts: Vec<Post>,
    /// Total matches before pagination.
    pub total_count: u64,
    pub has_more: bool,
}

/// Read-only queries against the post store.
pub struct PostQueryService {
    posts: Arc<dyn PostRepository>,
    store_timeout: Duration,
}

impl PostQueryService {
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

    /// Posts ordered newest-created-first (ties broken by ID descending),
    /// optionally restricted to one author.
    pub async fn list(
        &self,
        author_id: Option<Uuid>,
        page: Page,
    ) -> Result<Vec<Post>, DomainError> {
        let limit = page.limit.map(|l| l.min(MAX_PAGE_SIZE));

        bounded(self.store_timeout, self.posts.list(author_id, limit, page.skip))
            .await
            .map_err(|e| classify_store_error(e, unexpected_missing))
    }

    /// A single post by ID.
    pub async fn get(&self, id: Uuid) -> Result<Post, DomainError> {
        bounded(self.store_timeout, self.posts.find_by_id(id))
            .await
            .map_err(|e| classify_store_error(e, unexpected_missing))?
            .ok_or(DomainError::NotFound { entity: "post", id })
    }

    /// Text search ranked by relevance.
    ///
    /// The query must be non-empty after trimming. Candidates come from the
    /// repository; scoring (title 10, excerpt 5, content 1), ordering and
    /// pagination happen here. Ties within equal relevance fall back to
    /// `created_at` descending, then ID descending.
    pub async fn search(
        &self,
        query: &str,
        author_id: Option<Uuid>,
        limit: Option<u64>,
        skip: u64,
    ) -> Result<SearchResults, DomainError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(DomainError::InvalidArgument(
                "Search query is required".to_string(),
            ));
        }

        let terms = search::query_terms(query);
        let candidates = bounded(
            self.store_timeout,
            self.posts.search_matching(&terms, author_id),
        )
        .await
        .map_err(|e| classify_store_error(e, unexpected_missing))?;

        let mut scored: Vec<(u32, Post)> = candidates
            .into_iter()
            .filter_map(|post| {
                let score = search::score(&post, &terms);
                (score > 0).then_some((score, post))
            })
            .collect();

        scored.sort_by(|a, b| {
            b.0.cmp(&a.0)
                .then_with(|| b.1.created_at.cmp(&a.1.created_at))
                .then_with(|| b.1.id.cmp(&a.1.id))
        });

        let total_count = scored.len() as u64;
        let limit = limit.unwrap_or(DEFAULT_SEARCH_LIMIT).min(MAX_PAGE_SIZE);
        let posts: Vec<Post> = scored
            .into_iter()
            .skip(skip as usize)
            .take(limit as usize)
            .map(|(_, post)| post)
            .collect();
        let has_more = skip + (posts.len() as u64) < total_count;

        Ok(SearchResults {
            posts,
            total_count,
            has_more,
        })
    }
}

/// Reads never legitimately produce `RepoError::NotFound`.
fn unexpected_missing() -> DomainError {
    DomainError::Internal("store reported a missing row on a read".to_string())
}
