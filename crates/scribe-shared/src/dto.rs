//! Data Transfer Objects - request/response types for the API.
//!
//! Post payloads use camelCase field names (`authorId`, `createdAt`, ...),
//! matching the persisted shape the blog's clients already consume.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A post as it appears on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: Uuid,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /api/posts`. The author is taken from the authenticated
/// identity, never from the body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    pub content: String,
}

/// Body of `PUT /api/posts/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    pub title: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    pub content: String,
}

/// Query string of `GET /api/posts`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListPostsQuery {
    #[serde(rename = "userId")]
    pub user_id: Option<Uuid>,
    pub limit: Option<u64>,
    pub skip: Option<u64>,
}

/// Query string of `GET /api/posts/search`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchPostsQuery {
    /// Optional here so a missing `q` gets a descriptive 400 instead of a
    /// deserialization error.
    pub q: Option<String>,
    #[serde(rename = "userId")]
    pub user_id: Option<Uuid>,
    pub limit: Option<u64>,
    pub skip: Option<u64>,
}

/// Response of `GET /api/posts/search`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub posts: Vec<PostResponse>,
    pub total_count: u64,
    pub has_more: bool,
    pub query: String,
}

/// Confirmation body for deletes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response containing a user's public information.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Response containing authentication tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}
