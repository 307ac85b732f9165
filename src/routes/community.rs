// ABOUTME: Route handlers for the community feed: posts, likes and comments
// ABOUTME: The feed is readable by any signed-in user; deletes are owner-scoped
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Community routes
//!
//! `/api/posts` and `/api/community` serve the same feed. Likes toggle, so a
//! second `POST /api/likes` for the same post removes the like.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{parse_id, required_text, IdQuery, MessageResponse};
use crate::constants::limits;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::middleware::{AuthUser, JsonBody, QueryParams};
use crate::models::{AuthorProfile, Comment, FeedPost, Post};
use crate::resources::ServerResources;

// ============================================================================
// Request / Response Types
// ============================================================================

/// Optional feed paging
#[derive(Debug, Default, Deserialize)]
pub struct FeedQuery {
    /// Maximum number of posts
    pub limit: Option<i64>,
    /// Posts to skip
    pub offset: Option<i64>,
}

/// Body for creating a post
#[derive(Debug, Deserialize)]
pub struct CreatePostBody {
    /// Post text
    pub content: Option<String>,
}

/// Body for toggling a like
#[derive(Debug, Deserialize)]
pub struct ToggleLikeBody {
    /// Post to like or unlike
    pub post_id: Option<String>,
}

/// Like state after a toggle
#[derive(Debug, Serialize, Deserialize)]
pub struct ToggleLikeResponse {
    /// Whether the caller now likes the post
    pub liked: bool,
}

/// `?post_id=` query for listing likes
#[derive(Debug, Default, Deserialize)]
pub struct LikesQuery {
    /// Post whose likes to list
    pub post_id: Option<String>,
}

/// Body for commenting on a post
#[derive(Debug, Deserialize)]
pub struct CreateCommentBody {
    /// Post to comment on
    pub post_id: Option<String>,
    /// Comment text
    pub content: Option<String>,
}

/// New comment with commenter and post author profiles
#[derive(Debug, Serialize, Deserialize)]
pub struct CommentResponse {
    /// The comment
    #[serde(flatten)]
    pub comment: Comment,
    /// Commenter profile
    pub user: Option<AuthorProfile>,
    /// Profile of the post's author
    pub post_author: Option<AuthorProfile>,
}

/// Community routes
pub struct CommunityRoutes;

impl CommunityRoutes {
    /// Create all feed, like and comment routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/posts",
                get(Self::handle_list_posts).post(Self::handle_create_post),
            )
            .route(
                "/api/community",
                get(Self::handle_list_posts)
                    .post(Self::handle_create_post)
                    .delete(Self::handle_delete_post),
            )
            .route(
                "/api/likes",
                get(Self::handle_list_likes).post(Self::handle_toggle_like),
            )
            .route("/api/comments", post(Self::handle_create_comment))
            .with_state(resources)
    }

    // ========================================================================
    // Posts
    // ========================================================================

    /// Handle GET /api/posts and /api/community - Feed, newest first
    async fn handle_list_posts(
        _auth: AuthUser,
        State(resources): State<Arc<ServerResources>>,
        QueryParams(query): QueryParams<FeedQuery>,
    ) -> Result<Response, AppError> {
        let (limit, offset) = Self::paging(&query)?;
        let posts = resources.database.social().list_feed(limit, offset).await?;
        Ok((StatusCode::OK, Json(posts)).into_response())
    }

    /// Handle POST /api/posts and /api/community - Publish a post
    async fn handle_create_post(
        auth: AuthUser,
        State(resources): State<Arc<ServerResources>>,
        JsonBody(body): JsonBody<CreatePostBody>,
    ) -> Result<Response, AppError> {
        let content = required_text(body.content, "Content", limits::MAX_CONTENT_LENGTH)?;
        let social = resources.database.social();

        let post = Post::new(auth.user_id, content, None);
        social.create_post(&post).await?;
        info!(user_id = %auth.user_id, post_id = %post.id, "Post created");

        let author = social.get_author(auth.user_id).await?;
        let response = social
            .get_feed_post(post.id)
            .await?
            .unwrap_or(FeedPost {
                post,
                user: author,
                likes: Vec::new(),
                comments: Vec::new(),
            });
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Handle DELETE /api/community?id= - Delete one of the caller's posts
    async fn handle_delete_post(
        auth: AuthUser,
        State(resources): State<Arc<ServerResources>>,
        QueryParams(query): QueryParams<IdQuery>,
    ) -> Result<Response, AppError> {
        let id = parse_id(query.id.as_deref(), "id")?;
        let removed = resources.database.social().delete_post(auth.user_id, id).await?;
        AppLogger::log_database_operation("delete", "posts", u64::from(removed));

        let response = MessageResponse::new("Post deleted successfully");
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    // ========================================================================
    // Likes
    // ========================================================================

    /// Handle POST /api/likes - Toggle the caller's like
    async fn handle_toggle_like(
        auth: AuthUser,
        State(resources): State<Arc<ServerResources>>,
        JsonBody(body): JsonBody<ToggleLikeBody>,
    ) -> Result<Response, AppError> {
        let post_id = parse_id(body.post_id.as_deref(), "post_id")?;
        let toggle = resources.database.social().toggle_like(post_id, auth.user_id).await?;
        tracing::debug!(user_id = %auth.user_id, post_id = %post_id, liked = toggle.is_liked(), "Like toggled");

        let response = ToggleLikeResponse {
            liked: toggle.is_liked(),
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle GET /api/likes?post_id= - Users who liked a post
    async fn handle_list_likes(
        _auth: AuthUser,
        State(resources): State<Arc<ServerResources>>,
        QueryParams(query): QueryParams<LikesQuery>,
    ) -> Result<Response, AppError> {
        let post_id = parse_id(query.post_id.as_deref(), "post_id")?;
        let likes = resources.database.social().list_likes(post_id).await?;
        Ok((StatusCode::OK, Json(likes)).into_response())
    }

    // ========================================================================
    // Comments
    // ========================================================================

    /// Handle POST /api/comments - Comment on a post
    async fn handle_create_comment(
        auth: AuthUser,
        State(resources): State<Arc<ServerResources>>,
        JsonBody(body): JsonBody<CreateCommentBody>,
    ) -> Result<Response, AppError> {
        let post_id = parse_id(body.post_id.as_deref(), "post_id")?;
        let content = required_text(body.content, "Content", limits::MAX_CONTENT_LENGTH)?;
        let social = resources.database.social();

        let comment = Comment::new(post_id, auth.user_id, content);
        let post_author_id = social.create_comment(&comment).await?;

        let response = CommentResponse {
            user: social.get_author(auth.user_id).await?,
            post_author: social.get_author(post_author_id).await?,
            comment,
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    fn paging(query: &FeedQuery) -> AppResult<(Option<i64>, Option<i64>)> {
        let limit = match query.limit {
            Some(limit) if limit < 1 => {
                return Err(AppError::invalid_input("limit must be positive"));
            }
            Some(limit) => Some(limit.min(limits::MAX_FEED_PAGE_SIZE)),
            None => None,
        };
        if query.offset.is_some_and(|offset| offset < 0) {
            return Err(AppError::invalid_input("offset must not be negative"));
        }
        Ok((limit, query.offset))
    }
}
