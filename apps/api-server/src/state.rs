//! Application state - shared across all handlers.

use std::sync::Arc;

use scribe_core::ports::{PostRepository, UserRepository};
use scribe_core::service::{PostMutationService, PostQueryService};
use scribe_infra::database::{self, DatabaseConfig};
use scribe_infra::{
    InMemoryPostRepository, InMemoryUserRepository, PostgresPostRepository,
    PostgresUserRepository,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub post_queries: Arc<PostQueryService>,
    pub post_mutations: Arc<PostMutationService>,
    pub users: Arc<dyn UserRepository>,
}

impl AppState {
    /// Build the application state with appropriate repository
    /// implementations: Postgres when a database is configured and reachable,
    /// the in-memory store otherwise.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        let (posts, users): (Arc<dyn PostRepository>, Arc<dyn UserRepository>) = match db_config {
            Some(config) => match database::connect(config).await {
                Ok(conn) => (
                    Arc::new(PostgresPostRepository::new(conn.clone())),
                    Arc::new(PostgresUserRepository::new(conn)),
                ),
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                    Self::memory_repos()
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Self::memory_repos()
            }
        };

        tracing::info!("Application state initialized");

        Self {
            post_queries: Arc::new(PostQueryService::new(posts.clone())),
            post_mutations: Arc::new(PostMutationService::new(posts)),
            users,
        }
    }

    fn memory_repos() -> (Arc<dyn PostRepository>, Arc<dyn UserRepository>) {
        (
            Arc::new(InMemoryPostRepository::new()),
            Arc::new(InMemoryUserRepository::new()),
        )
    }
}
