//! SeaORM entity definitions and domain conversions.

pub mod post;
pub mod user;
