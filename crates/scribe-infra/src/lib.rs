//! # Scribe Infrastructure
//!
//! Concrete implementations of the ports defined in `scribe-core`:
//!
//! - `database` - PostgreSQL repositories via SeaORM
//! - `memory` - in-memory repositories, used when no database is configured
//!   and as test doubles
//! - `auth` - JWT token service and Argon2 password hashing

pub mod auth;
pub mod database;
pub mod memory;

pub use auth::{Argon2PasswordService, JwtTokenService};
pub use database::{DatabaseConfig, PostgresPostRepository, PostgresUserRepository};
pub use memory::{InMemoryPostRepository, InMemoryUserRepository};
