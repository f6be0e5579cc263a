//! Behavior tests for the query/mutation services, run against the in-memory
//! repositories.

use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeDelta, Utc};
use uuid::Uuid;

use scribe_core::domain::{Post, PostDraft};
use scribe_core::error::{DomainError, RepoError};
use scribe_core::ports::PostRepository;
use scribe_core::service::{Page, PostMutationService, PostQueryService};

use super::InMemoryPostRepository;

fn services() -> (Arc<InMemoryPostRepository>, PostQueryService, PostMutationService) {
    let repo = Arc::new(InMemoryPostRepository::new());
    let queries = PostQueryService::new(repo.clone());
    let mutations = PostMutationService::new(repo.clone());
    (repo, queries, mutations)
}

fn draft(title: &str, content: &str) -> PostDraft {
    PostDraft {
        title: title.to_string(),
        excerpt: None,
        content: content.to_string(),
    }
}

/// A post with an explicit creation time, inserted straight into the store so
/// ordering tests do not depend on wall-clock resolution.
fn backdated_post(author: Uuid, title: &str, content: &str, seconds_ago: i64) -> Post {
    let at = Utc::now() - TimeDelta::seconds(seconds_ago);
    Post {
        id: Uuid::new_v4(),
        author_id: author,
        title: title.to_string(),
        excerpt: title.to_string(),
        content: content.to_string(),
        created_at: at,
        updated_at: at,
    }
}

#[tokio::test]
async fn create_persists_with_derived_excerpt_and_equal_timestamps() {
    let (_, queries, mutations) = services();
    let author = Uuid::new_v4();

    let post = mutations.create(draft("Hello", "World"), author).await.unwrap();

    assert_eq!(post.title, "Hello");
    assert_eq!(post.content, "World");
    assert_eq!(post.excerpt, "World");
    assert_eq!(post.author_id, author);
    assert_eq!(post.created_at, post.updated_at);

    let fetched = queries.get(post.id).await.unwrap();
    assert_eq!(fetched.title, "Hello");
}

#[tokio::test]
async fn create_rejects_blank_title_before_touching_the_store() {
    let (repo, _, mutations) = services();

    let result = mutations.create(draft("  ", "body"), Uuid::new_v4()).await;

    assert!(matches!(result, Err(DomainError::InvalidArgument(_))));
    assert!(repo.list(None, None, 0).await.unwrap().is_empty());
}

#[tokio::test]
async fn update_refreshes_updated_at_and_preserves_created_at() {
    let (_, _, mutations) = services();
    let author = Uuid::new_v4();

    let post = mutations.create(draft("Hello", "World"), author).await.unwrap();
    tokio::time::sleep(Duration::from_millis(2)).await;

    let updated = mutations
        .update(post.id, draft("Hello again", "New body"), author)
        .await
        .unwrap();

    assert_eq!(updated.title, "Hello again");
    assert_eq!(updated.created_at, post.created_at);
    assert!(updated.updated_at > post.updated_at);
}

#[tokio::test]
async fn update_of_missing_post_is_not_found() {
    let (_, _, mutations) = services();

    let result = mutations
        .update(Uuid::new_v4(), draft("T", "C"), Uuid::new_v4())
        .await;

    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn update_by_non_author_is_forbidden() {
    let (_, _, mutations) = services();
    let author = Uuid::new_v4();

    let post = mutations.create(draft("Hello", "World"), author).await.unwrap();
    let result = mutations
        .update(post.id, draft("Hijacked", "Body"), Uuid::new_v4())
        .await;

    assert!(matches!(result, Err(DomainError::Forbidden)));
}

#[tokio::test]
async fn delete_by_non_author_is_forbidden() {
    let (_, queries, mutations) = services();
    let author = Uuid::new_v4();

    let post = mutations.create(draft("Hello", "World"), author).await.unwrap();
    let result = mutations.delete(post.id, Uuid::new_v4()).await;

    assert!(matches!(result, Err(DomainError::Forbidden)));
    assert!(queries.get(post.id).await.is_ok());
}

#[tokio::test]
async fn delete_removes_the_post() {
    let (_, queries, mutations) = services();
    let author = Uuid::new_v4();

    let post = mutations.create(draft("Hello", "World"), author).await.unwrap();
    mutations.delete(post.id, author).await.unwrap();

    assert!(matches!(
        queries.get(post.id).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn delete_of_missing_post_is_not_found() {
    let (_, _, mutations) = services();

    let result = mutations.delete(Uuid::new_v4(), Uuid::new_v4()).await;
    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn list_orders_newest_first_and_filters_by_author() {
    let (repo, queries, _) = services();
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    repo.insert(backdated_post(alice, "Oldest", "c", 30)).await.unwrap();
    repo.insert(backdated_post(bob, "Middle", "c", 20)).await.unwrap();
    repo.insert(backdated_post(alice, "Newest", "c", 10)).await.unwrap();

    let all = queries.list(None, Page::default()).await.unwrap();
    let titles: Vec<&str> = all.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Newest", "Middle", "Oldest"]);

    let alices = queries.list(Some(alice), Page::default()).await.unwrap();
    let titles: Vec<&str> = alices.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Newest", "Oldest"]);
}

#[tokio::test]
async fn list_honors_limit_and_skip() {
    let (repo, queries, _) = services();
    let author = Uuid::new_v4();

    for i in 0..5 {
        repo.insert(backdated_post(author, &format!("Post {i}"), "c", i))
            .await
            .unwrap();
    }

    let window = queries
        .list(None, Page { limit: Some(2), skip: 1 })
        .await
        .unwrap();

    let titles: Vec<&str> = window.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Post 1", "Post 2"]);
}

#[tokio::test]
async fn search_rejects_blank_query() {
    let (_, queries, _) = services();

    let result = queries.search("   ", None, None, 0).await;
    assert!(matches!(result, Err(DomainError::InvalidArgument(_))));
}

#[tokio::test]
async fn search_ranks_title_over_excerpt_over_content() {
    let (repo, queries, _) = services();
    let author = Uuid::new_v4();
    let at = Utc::now();

    let mk = |title: &str, excerpt: &str, content: &str| Post {
        id: Uuid::new_v4(),
        author_id: author,
        title: title.to_string(),
        excerpt: excerpt.to_string(),
        content: content.to_string(),
        created_at: at,
        updated_at: at,
    };

    repo.insert(mk("Plain", "Plain", "rust in the body")).await.unwrap();
    repo.insert(mk("Plain", "a rust summary", "Plain")).await.unwrap();
    repo.insert(mk("Rust headline", "Plain", "Plain")).await.unwrap();

    let results = queries.search("rust", None, None, 0).await.unwrap();

    assert_eq!(results.total_count, 3);
    assert_eq!(results.posts[0].title, "Rust headline");
    assert_eq!(results.posts[1].excerpt, "a rust summary");
    assert_eq!(results.posts[2].content, "rust in the body");
}

#[tokio::test]
async fn search_breaks_score_ties_by_creation_time() {
    let (repo, queries, _) = services();
    let author = Uuid::new_v4();

    repo.insert(backdated_post(author, "rust old", "c", 100)).await.unwrap();
    repo.insert(backdated_post(author, "rust new", "c", 1)).await.unwrap();

    let results = queries.search("rust", None, None, 0).await.unwrap();

    assert_eq!(results.posts[0].title, "rust new");
    assert_eq!(results.posts[1].title, "rust old");
}

#[tokio::test]
async fn search_filters_by_author() {
    let (repo, queries, _) = services();
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    repo.insert(backdated_post(alice, "rust by alice", "c", 2)).await.unwrap();
    repo.insert(backdated_post(bob, "rust by bob", "c", 1)).await.unwrap();

    let results = queries.search("rust", Some(alice), None, 0).await.unwrap();

    assert_eq!(results.total_count, 1);
    assert_eq!(results.posts[0].title, "rust by alice");
}

#[tokio::test]
async fn search_reports_total_count_and_has_more() {
    let (repo, queries, _) = services();
    let author = Uuid::new_v4();

    for i in 0..3 {
        repo.insert(backdated_post(author, &format!("rust {i}"), "c", i))
            .await
            .unwrap();
    }

    let first = queries.search("rust", None, Some(2), 0).await.unwrap();
    assert_eq!(first.total_count, 3);
    assert_eq!(first.posts.len(), 2);
    assert!(first.has_more);

    let last = queries.search("rust", None, Some(2), 2).await.unwrap();
    assert_eq!(last.total_count, 3);
    assert_eq!(last.posts.len(), 1);
    assert!(!last.has_more);
}

#[tokio::test]
async fn search_pagination_walk_covers_every_match_exactly_once() {
    let (repo, queries, _) = services();
    let author = Uuid::new_v4();

    for i in 0..25 {
        repo.insert(backdated_post(author, &format!("rust {i}"), "c", i))
            .await
            .unwrap();
    }

    let mut seen = std::collections::HashSet::new();
    let mut skip = 0;
    loop {
        let page = queries.search("rust", None, Some(10), skip).await.unwrap();
        for post in &page.posts {
            assert!(seen.insert(post.id), "duplicate post in pagination walk");
        }
        skip += page.posts.len() as u64;
        if !page.has_more {
            break;
        }
    }

    assert_eq!(seen.len(), 25);
}

/// Repository whose calls never complete in time.
struct StalledRepository;

#[async_trait::async_trait]
impl PostRepository for StalledRepository {
    async fn find_by_id(&self, _id: Uuid) -> Result<Option<Post>, RepoError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(None)
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(post)
    }

    async fn delete(&self, _id: Uuid) -> Result<(), RepoError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(())
    }

    async fn list(
        &self,
        _author_id: Option<Uuid>,
        _limit: Option<u64>,
        _skip: u64,
    ) -> Result<Vec<Post>, RepoError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(Vec::new())
    }

    async fn search_matching(
        &self,
        _terms: &[String],
        _author_id: Option<Uuid>,
    ) -> Result<Vec<Post>, RepoError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn stalled_store_surfaces_unavailable() {
    let queries = PostQueryService::new(Arc::new(StalledRepository))
        .with_store_timeout(Duration::from_millis(50));

    let result = queries.list(None, Page::default()).await;
    assert!(matches!(result, Err(DomainError::Unavailable)));
}
