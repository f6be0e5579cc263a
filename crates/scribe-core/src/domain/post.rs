use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Maximum length of a derived excerpt, in characters.
///
/// Earlier revisions of the blog disagreed on this bound (50 vs 150); 150 is
/// canonical.
pub const EXCERPT_MAX_CHARS: usize = 150;

/// Post entity - a single blog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    /// Stored for every post; derived from `content` when the author does not
    /// supply one.
    pub excerpt: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post from validated fields. `updated_at` starts equal to
    /// `created_at`.
    pub fn new(author_id: Uuid, fields: PostFields) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            author_id,
            title: fields.title,
            excerpt: fields.excerpt,
            content: fields.content,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the mutable fields and refresh `updated_at`. Identity, author
    /// and `created_at` never change.
    pub fn revise(&mut self, fields: PostFields) {
        self.title = fields.title;
        self.excerpt = fields.excerpt;
        self.content = fields.content;
        self.updated_at = Utc::now();
    }
}

/// Unvalidated post input, as it arrives from a create or update request.
///
/// Both Create and Update go through [`PostDraft::validate`] so the two paths
/// can never drift apart on field rules.
#[derive(Debug, Clone, Default)]
pub struct PostDraft {
    pub title: String,
    pub excerpt: Option<String>,
    pub content: String,
}

/// Validated, normalized post fields produced by [`PostDraft::validate`].
#[derive(Debug, Clone)]
pub struct PostFields {
    pub title: String,
    pub excerpt: String,
    pub content: String,
}

impl PostDraft {
    /// Trim all text fields, reject empty title/content, and derive the
    /// excerpt from the content when none was supplied.
    pub fn validate(self) -> Result<PostFields, DomainError> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(DomainError::InvalidArgument(
                "Title is required".to_string(),
            ));
        }

        let content = self.content.trim().to_string();
        if content.is_empty() {
            return Err(DomainError::InvalidArgument(
                "Content is required".to_string(),
            ));
        }

        let excerpt = match self.excerpt {
            Some(e) if !e.trim().is_empty() => e.trim().to_string(),
            _ => derive_excerpt(&content),
        };

        Ok(PostFields {
            title,
            excerpt,
            content,
        })
    }
}

/// Derive an excerpt from post content: strip markup tags, and truncate to
/// [`EXCERPT_MAX_CHARS`] characters with a trailing `"..."` when the stripped
/// text is longer than that.
pub fn derive_excerpt(content: &str) -> String {
    let stripped = strip_tags(content);
    if stripped.chars().count() <= EXCERPT_MAX_CHARS {
        return stripped;
    }

    let cut: String = stripped.chars().take(EXCERPT_MAX_CHARS).collect();
    format!("{}...", cut.trim_end())
}

/// Remove `<...>` tag runs. An unterminated `<` is kept verbatim rather than
/// swallowing the rest of the text.
fn strip_tags(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        match rest[start..].find('>') {
            Some(end) => rest = &rest[start + end + 1..],
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}
