//! # Scribe Core
//!
//! The domain layer of the Scribe blog backend.
//! This crate contains pure business logic with zero infrastructure dependencies:
//! the Post/User entities, field validation, search relevance scoring, and the
//! query/mutation services that enforce the blog's rules over a repository port.

pub mod domain;
pub mod error;
pub mod ports;
pub mod search;
pub mod service;

pub use error::DomainError;
