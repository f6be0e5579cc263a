//! # Scribe Shared
//!
//! Wire types shared between the API server and its clients: request and
//! response DTOs for the post and auth endpoints, and the RFC 7807 error
//! envelope.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;
