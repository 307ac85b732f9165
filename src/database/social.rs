// ABOUTME: Community feed persistence for posts, likes and comments
// ABOUTME: Like toggling is a single transaction guarded by a unique (post, user) pair
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashMap;

use anyhow::Result;
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};
use uuid::Uuid;

use super::{
    begin_write, format_timestamp, parse_timestamp, parse_uuid, Database, IN_CLAUSE_BATCH,
};
use crate::errors::{AppError, AppResult};
use crate::models::{AuthorProfile, Comment, CommentWithAuthor, FeedPost, LikeRef, Post};

impl Database {
    /// Create posts, likes and comments tables
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_social(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS posts (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                content TEXT NOT NULL,
                workout_id TEXT REFERENCES workouts(id) ON DELETE SET NULL,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(self.pool())
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_posts_created ON posts(created_at)")
            .execute(self.pool())
            .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS likes (
                id TEXT PRIMARY KEY,
                post_id TEXT NOT NULL REFERENCES posts(id) ON DELETE CASCADE,
                user_id TEXT NOT NULL,
                created_at TEXT NOT NULL,
                UNIQUE (post_id, user_id)
            )
            ",
        )
        .execute(self.pool())
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS comments (
                id TEXT PRIMARY KEY,
                post_id TEXT NOT NULL REFERENCES posts(id) ON DELETE CASCADE,
                user_id TEXT NOT NULL,
                content TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(self.pool())
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_comments_post ON comments(post_id, created_at)")
            .execute(self.pool())
            .await?;

        Ok(())
    }
}

/// Result of toggling a like
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeToggle {
    /// The caller now likes the post
    Liked,
    /// The caller's like was removed
    Unliked,
}

impl LikeToggle {
    /// Whether the post is liked after the toggle
    #[must_use]
    pub const fn is_liked(self) -> bool {
        matches!(self, Self::Liked)
    }
}

const FEED_SELECT: &str = r"
    SELECT p.id, p.user_id, p.content, p.workout_id, p.created_at,
           u.id AS author_id, u.name AS author_name, u.image AS author_image
    FROM posts p
    LEFT JOIN users u ON u.id = p.user_id
";

/// Community feed database operations manager
pub struct SocialManager {
    pool: SqlitePool,
}

impl SocialManager {
    /// Create a new social manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ========================================================================
    // Posts
    // ========================================================================

    /// Insert a post
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails
    pub async fn create_post(&self, post: &Post) -> AppResult<Uuid> {
        sqlx::query(
            r"
            INSERT INTO posts (id, user_id, content, workout_id, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(post.id.to_string())
        .bind(post.user_id.to_string())
        .bind(&post.content)
        .bind(post.workout_id.map(|id| id.to_string()))
        .bind(format_timestamp(&post.created_at))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create post: {e}")))?;

        Ok(post.id)
    }

    /// Feed page, newest post first, with authors, likes and comments
    ///
    /// # Errors
    ///
    /// Returns an error if any of the feed queries fail
    pub async fn list_feed(&self, limit: Option<i64>, offset: Option<i64>) -> AppResult<Vec<FeedPost>> {
        let rows = sqlx::query(&format!(
            "{FEED_SELECT} ORDER BY p.created_at DESC, p.rowid DESC LIMIT $1 OFFSET $2"
        ))
        // SQLite treats a negative limit as unbounded
        .bind(limit.unwrap_or(-1))
        .bind(offset.unwrap_or(0))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list posts: {e}")))?;

        self.hydrate(&rows).await
    }

    /// Single feed entry
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_feed_post(&self, id: Uuid) -> AppResult<Option<FeedPost>> {
        let rows = sqlx::query(&format!("{FEED_SELECT} WHERE p.id = $1"))
            .bind(id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get post: {e}")))?;

        Ok(self.hydrate(&rows).await?.into_iter().next())
    }

    /// Delete a post owned by `user_id`; likes and comments cascade
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails
    pub async fn delete_post(&self, user_id: Uuid, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1 AND user_id = $2")
            .bind(id.to_string())
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete post: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    // ========================================================================
    // Likes
    // ========================================================================

    /// Flip the caller's like on a post
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` if the post does not exist, or a database error
    pub async fn toggle_like(&self, post_id: Uuid, user_id: Uuid) -> AppResult<LikeToggle> {
        let mut tx = begin_write(&self.pool).await?;

        let exists = sqlx::query("SELECT 1 FROM posts WHERE id = $1")
            .bind(post_id.to_string())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to look up post: {e}")))?;
        if exists.is_none() {
            return Err(AppError::not_found("Post"));
        }

        let removed = sqlx::query("DELETE FROM likes WHERE post_id = $1 AND user_id = $2")
            .bind(post_id.to_string())
            .bind(user_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to remove like: {e}")))?;

        let outcome = if removed.rows_affected() > 0 {
            LikeToggle::Unliked
        } else {
            sqlx::query(
                r"
                INSERT INTO likes (id, post_id, user_id, created_at)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (post_id, user_id) DO NOTHING
                ",
            )
            .bind(Uuid::new_v4().to_string())
            .bind(post_id.to_string())
            .bind(user_id.to_string())
            .bind(format_timestamp(&Utc::now()))
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to add like: {e}")))?;
            LikeToggle::Liked
        };

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit like toggle: {e}")))?;

        Ok(outcome)
    }

    /// Users who liked a post, in like order
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_likes(&self, post_id: Uuid) -> AppResult<Vec<LikeRef>> {
        let rows = sqlx::query(
            "SELECT user_id FROM likes WHERE post_id = $1 ORDER BY created_at ASC, rowid ASC",
        )
        .bind(post_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list likes: {e}")))?;

        rows.iter()
            .map(|row| {
                let user_id: String = row.get("user_id");
                Ok(LikeRef {
                    user_id: parse_uuid(&user_id)?,
                })
            })
            .collect()
    }

    // ========================================================================
    // Comments
    // ========================================================================

    /// Insert a comment; returns the id of the post's author
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` if the post does not exist, or a database error
    pub async fn create_comment(&self, comment: &Comment) -> AppResult<Uuid> {
        let mut tx = begin_write(&self.pool).await?;

        let author: Option<String> = sqlx::query_scalar("SELECT user_id FROM posts WHERE id = $1")
            .bind(comment.post_id.to_string())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to look up post: {e}")))?;
        let Some(author) = author else {
            return Err(AppError::not_found("Post"));
        };

        sqlx::query(
            r"
            INSERT INTO comments (id, post_id, user_id, content, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(comment.id.to_string())
        .bind(comment.post_id.to_string())
        .bind(comment.user_id.to_string())
        .bind(&comment.content)
        .bind(format_timestamp(&comment.created_at))
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to create comment: {e}")))?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit comment: {e}")))?;

        parse_uuid(&author)
    }

    /// Public profile of a user, if they have onboarded
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_author(&self, user_id: Uuid) -> AppResult<Option<AuthorProfile>> {
        let row = sqlx::query(
            "SELECT id AS author_id, name AS author_name, image AS author_image FROM users WHERE id = $1",
        )
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get author: {e}")))?;

        row.as_ref().map_or(Ok(None), Self::row_to_author)
    }

    // ========================================================================
    // Feed assembly
    // ========================================================================

    async fn hydrate(&self, rows: &[SqliteRow]) -> AppResult<Vec<FeedPost>> {
        let mut posts = rows
            .iter()
            .map(|row| {
                Ok(FeedPost {
                    post: Self::row_to_post(row)?,
                    user: Self::row_to_author(row)?,
                    likes: Vec::new(),
                    comments: Vec::new(),
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        if posts.is_empty() {
            return Ok(posts);
        }

        let ids: Vec<String> = posts.iter().map(|p| p.post.id.to_string()).collect();
        let mut likes = self.likes_for(&ids).await?;
        let mut comments = self.comments_for(&ids).await?;

        for entry in &mut posts {
            entry.likes = likes.remove(&entry.post.id).unwrap_or_default();
            entry.comments = comments.remove(&entry.post.id).unwrap_or_default();
        }
        Ok(posts)
    }

    async fn likes_for(&self, post_ids: &[String]) -> AppResult<HashMap<Uuid, Vec<LikeRef>>> {
        let mut grouped: HashMap<Uuid, Vec<LikeRef>> = HashMap::new();

        // A post's likes all land in the same batch, so per-post order holds
        for batch in post_ids.chunks(IN_CLAUSE_BATCH) {
            let mut query =
                QueryBuilder::<Sqlite>::new("SELECT post_id, user_id FROM likes WHERE post_id IN (");
            let mut ids = query.separated(", ");
            for id in batch {
                ids.push_bind(id.as_str());
            }
            ids.push_unseparated(") ORDER BY created_at ASC, rowid ASC");

            let rows = query
                .build()
                .fetch_all(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Failed to load likes: {e}")))?;

            for row in &rows {
                let post_id: String = row.get("post_id");
                let user_id: String = row.get("user_id");
                grouped.entry(parse_uuid(&post_id)?).or_default().push(LikeRef {
                    user_id: parse_uuid(&user_id)?,
                });
            }
        }
        Ok(grouped)
    }

    async fn comments_for(
        &self,
        post_ids: &[String],
    ) -> AppResult<HashMap<Uuid, Vec<CommentWithAuthor>>> {
        let mut grouped: HashMap<Uuid, Vec<CommentWithAuthor>> = HashMap::new();

        for batch in post_ids.chunks(IN_CLAUSE_BATCH) {
            let mut query = QueryBuilder::<Sqlite>::new(
                r"
                SELECT c.id, c.post_id, c.user_id, c.content, c.created_at,
                       u.id AS author_id, u.name AS author_name, u.image AS author_image
                FROM comments c
                LEFT JOIN users u ON u.id = c.user_id
                WHERE c.post_id IN (",
            );
            let mut ids = query.separated(", ");
            for id in batch {
                ids.push_bind(id.as_str());
            }
            ids.push_unseparated(") ORDER BY c.created_at ASC, c.rowid ASC");

            let rows = query
                .build()
                .fetch_all(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Failed to load comments: {e}")))?;

            for row in &rows {
                let comment = Self::row_to_comment(row)?;
                let user = Self::row_to_author(row)?;
                grouped
                    .entry(comment.post_id)
                    .or_default()
                    .push(CommentWithAuthor { comment, user });
            }
        }
        Ok(grouped)
    }

    fn row_to_post(row: &SqliteRow) -> AppResult<Post> {
        let id: String = row.get("id");
        let user_id: String = row.get("user_id");
        let workout_id: Option<String> = row.get("workout_id");
        let created_at: String = row.get("created_at");

        Ok(Post {
            id: parse_uuid(&id)?,
            user_id: parse_uuid(&user_id)?,
            content: row.get("content"),
            workout_id: workout_id.as_deref().map(parse_uuid).transpose()?,
            created_at: parse_timestamp(&created_at)?,
        })
    }

    fn row_to_comment(row: &SqliteRow) -> AppResult<Comment> {
        let id: String = row.get("id");
        let post_id: String = row.get("post_id");
        let user_id: String = row.get("user_id");
        let created_at: String = row.get("created_at");

        Ok(Comment {
            id: parse_uuid(&id)?,
            post_id: parse_uuid(&post_id)?,
            user_id: parse_uuid(&user_id)?,
            content: row.get("content"),
            created_at: parse_timestamp(&created_at)?,
        })
    }

    /// Decode the `author_*` columns of a `LEFT JOIN users`
    fn row_to_author(row: &SqliteRow) -> AppResult<Option<AuthorProfile>> {
        let author_id: Option<String> = row.get("author_id");
        author_id
            .map(|id| {
                Ok(AuthorProfile {
                    id: parse_uuid(&id)?,
                    name: row.get("author_name"),
                    image: row.get("author_image"),
                })
            })
            .transpose()
    }
}
