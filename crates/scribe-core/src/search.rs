//! Search relevance scoring.
//!
//! Ranking is computed here, in the domain layer, rather than delegated to a
//! store-specific text index. Repositories only return candidate posts; the
//! query service scores and orders them, so two backends can never disagree
//! about ranking.

use crate::domain::Post;

/// Field weights. A title hit is a much stronger signal than a hit buried in
/// the body.
pub const TITLE_WEIGHT: u32 = 10;
pub const EXCERPT_WEIGHT: u32 = 5;
pub const CONTENT_WEIGHT: u32 = 1;

/// Split a raw query into lowercase terms, dropping duplicates.
pub fn query_terms(query: &str) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();
    for term in query.split_whitespace() {
        let term = term.to_lowercase();
        if !terms.contains(&term) {
            terms.push(term);
        }
    }
    terms
}

/// Relevance of a post against a set of query terms.
///
/// Each term contributes the weight of every field that contains it
/// (case-insensitive). A score of zero means the post does not match.
pub fn score(post: &Post, terms: &[String]) -> u32 {
    let title = post.title.to_lowercase();
    let excerpt = post.excerpt.to_lowercase();
    let content = post.content.to_lowercase();

    let mut score = 0;
    for term in terms {
        if title.contains(term.as_str()) {
            score += TITLE_WEIGHT;
        }
        if excerpt.contains(term.as_str()) {
            score += EXCERPT_WEIGHT;
        }
        if content.contains(term.as_str()) {
            score += CONTENT_WEIGHT;
        }
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn post(title: &str, excerpt: &str, content: &str) -> Post {
        let now = chrono::Utc::now();
        Post {
            id: Uuid::new_v4(),
            author_id: Uuid::new_v4(),
            title: title.to_string(),
            excerpt: excerpt.to_string(),
            content: content.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn terms_are_lowercased_and_deduplicated() {
        assert_eq!(query_terms("Rust rust  BLOG"), vec!["rust", "blog"]);
    }

    #[test]
    fn empty_query_yields_no_terms() {
        assert!(query_terms("   ").is_empty());
    }

    #[test]
    fn title_outweighs_excerpt_outweighs_content() {
        let terms = query_terms("rust");

        let title_hit = post("Rust tips", "summary", "body");
        let excerpt_hit = post("Tips", "all about rust", "body");
        let content_hit = post("Tips", "summary", "some rust inside");

        let t = score(&title_hit, &terms);
        let e = score(&excerpt_hit, &terms);
        let c = score(&content_hit, &terms);

        assert_eq!(t, TITLE_WEIGHT);
        assert_eq!(e, EXCERPT_WEIGHT);
        assert_eq!(c, CONTENT_WEIGHT);
        assert!(t > e && e > c);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let p = post("RUST Tips", "summary", "body");
        assert_eq!(score(&p, &query_terms("rust")), TITLE_WEIGHT);
    }

    #[test]
    fn each_term_scores_independently() {
        let p = post("Rust tips", "async summary", "body");
        let terms = query_terms("rust async");
        assert_eq!(score(&p, &terms), TITLE_WEIGHT + EXCERPT_WEIGHT);
    }

    #[test]
    fn non_matching_post_scores_zero() {
        let p = post("Gardening", "plants", "soil");
        assert_eq!(score(&p, &query_terms("rust")), 0);
    }
}
