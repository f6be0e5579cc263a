//! Post listing, search and mutation handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use scribe_core::domain::{Post, PostDraft};
use scribe_core::service::Page;
use scribe_shared::dto::{
    CreatePostRequest, ListPostsQuery, MessageResponse, PostResponse, SearchPostsQuery,
    SearchResponse, UpdatePostRequest,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

fn to_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title,
        excerpt: post.excerpt,
        content: post.content,
        author_id: post.author_id,
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}

/// GET /api/posts - all posts newest first, optionally one author's.
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<ListPostsQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let page = Page {
        limit: query.limit,
        skip: query.skip.unwrap_or(0),
    };

    let posts = state.post_queries.list(query.user_id, page).await?;

    Ok(HttpResponse::Ok().json(posts.into_iter().map(to_response).collect::<Vec<_>>()))
}

/// GET /api/posts/search - relevance-ranked text search.
pub async fn search(
    state: web::Data<AppState>,
    query: web::Query<SearchPostsQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let raw = query.q.unwrap_or_default();

    let results = state
        .post_queries
        .search(&raw, query.user_id, query.limit, query.skip.unwrap_or(0))
        .await?;

    Ok(HttpResponse::Ok().json(SearchResponse {
        posts: results.posts.into_iter().map(to_response).collect(),
        total_count: results.total_count,
        has_more: results.has_more,
        query: raw.trim().to_string(),
    }))
}

/// GET /api/posts/{id}
pub async fn get_one(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state.post_queries.get(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// POST /api/posts - authenticated; the author is the caller.
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let draft = PostDraft {
        title: req.title,
        excerpt: req.excerpt,
        content: req.content,
    };

    let post = state.post_mutations.create(draft, identity.user_id).await?;

    Ok(HttpResponse::Created().json(to_response(post)))
}

/// PUT /api/posts/{id} - authenticated; only the author may edit.
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let draft = PostDraft {
        title: req.title,
        excerpt: req.excerpt,
        content: req.content,
    };

    let post = state
        .post_mutations
        .update(path.into_inner(), draft, identity.user_id)
        .await?;

    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// DELETE /api/posts/{id} - authenticated; only the author may delete.
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state
        .post_mutations
        .delete(path.into_inner(), identity.user_id)
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Post deleted successfully".to_string(),
    }))
}
