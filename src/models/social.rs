// ABOUTME: Community feed models for posts, likes and comments
// ABOUTME: Feed entries embed author profiles, liker ids and threaded comments
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Public author fields embedded in feed entries
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthorProfile {
    /// User id
    pub id: Uuid,
    /// Display name
    pub name: Option<String>,
    /// Avatar image URL
    pub image: Option<String>,
}

/// A community post
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    /// Unique identifier
    pub id: Uuid,
    /// Author
    pub user_id: Uuid,
    /// Body text
    pub content: String,
    /// Workout this post was shared from, if any
    pub workout_id: Option<Uuid>,
    /// When the post was created
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Build a new post
    #[must_use]
    pub fn new(user_id: Uuid, content: String, workout_id: Option<Uuid>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            content,
            workout_id,
            created_at: Utc::now().trunc_subsecs(6),
        }
    }
}

/// A single like, reduced to the liker
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct LikeRef {
    /// User who liked the post
    pub user_id: Uuid,
}

/// A comment on a post
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Comment {
    /// Unique identifier
    pub id: Uuid,
    /// Post commented on
    pub post_id: Uuid,
    /// Commenter
    pub user_id: Uuid,
    /// Body text
    pub content: String,
    /// When the comment was created
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Build a new comment
    #[must_use]
    pub fn new(post_id: Uuid, user_id: Uuid, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            post_id,
            user_id,
            content,
            created_at: Utc::now().trunc_subsecs(6),
        }
    }
}

/// Comment joined with its author
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommentWithAuthor {
    /// The comment
    #[serde(flatten)]
    pub comment: Comment,
    /// Commenter profile, absent if the user never onboarded
    pub user: Option<AuthorProfile>,
}

/// Post joined with author, likes and comments
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedPost {
    /// The post
    #[serde(flatten)]
    pub post: Post,
    /// Author profile, absent if the user never onboarded
    pub user: Option<AuthorProfile>,
    /// Users who liked the post
    pub likes: Vec<LikeRef>,
    /// Comments, oldest first
    pub comments: Vec<CommentWithAuthor>,
}
