//! Domain entities - the core business objects.

mod post;
mod user;

pub use post::{EXCERPT_MAX_CHARS, Post, PostDraft, PostFields, derive_excerpt};
pub use user::User;
