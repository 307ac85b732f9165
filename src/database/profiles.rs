// ABOUTME: User profile, goal and achievement persistence
// ABOUTME: Onboarding upserts the user row and seeds goals in one transaction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::Result;
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use super::{begin_write, format_timestamp, parse_timestamp, parse_uuid, Database};
use crate::errors::{AppError, AppResult};
use crate::models::{Achievement, Goal, User};

impl Database {
    /// Create users, goals and achievements tables
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_profiles(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                name TEXT,
                email TEXT,
                bio TEXT,
                image TEXT,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(self.pool())
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS goals (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                title TEXT NOT NULL,
                target REAL NOT NULL DEFAULT 0,
                current REAL NOT NULL DEFAULT 0,
                unit TEXT NOT NULL
            )
            ",
        )
        .execute(self.pool())
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS achievements (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                title TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                icon TEXT NOT NULL DEFAULT '',
                progress INTEGER NOT NULL DEFAULT 0,
                total INTEGER NOT NULL DEFAULT 0
            )
            ",
        )
        .execute(self.pool())
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_goals_user ON goals(user_id)")
            .execute(self.pool())
            .await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_achievements_user ON achievements(user_id)")
            .execute(self.pool())
            .await?;

        Ok(())
    }
}

/// Profile database operations manager
pub struct ProfileManager {
    pool: SqlitePool,
}

impl ProfileManager {
    /// Create a new profile manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a user by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_user(&self, user_id: Uuid) -> AppResult<Option<User>> {
        let row = sqlx::query("SELECT id, name, email, bio, image, created_at FROM users WHERE id = $1")
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get user: {e}")))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    /// Update editable profile fields
    ///
    /// `None` keeps the stored `bio` or `image`; an empty string clears it.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        name: &str,
        bio: Option<&str>,
        image: Option<&str>,
    ) -> AppResult<Option<User>> {
        let result = sqlx::query(
            r"
            UPDATE users
            SET name = $1,
                bio = CASE WHEN $2 IS NULL THEN bio ELSE NULLIF($2, '') END,
                image = CASE WHEN $3 IS NULL THEN image ELSE NULLIF($3, '') END
            WHERE id = $4
            ",
        )
        .bind(name)
        .bind(bio)
        .bind(image)
        .bind(user_id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update profile: {e}")))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_user(user_id).await
    }

    /// Upsert the user row and insert initial goals in one transaction
    ///
    /// # Errors
    ///
    /// Returns an error if any statement fails; nothing is persisted in that case
    pub async fn complete_onboarding(
        &self,
        user_id: Uuid,
        email: &str,
        name: &str,
        bio: Option<&str>,
        goals: &[Goal],
    ) -> AppResult<User> {
        let mut tx = begin_write(&self.pool).await?;

        sqlx::query(
            r"
            INSERT INTO users (id, name, email, bio, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE SET
                name = excluded.name,
                email = excluded.email,
                bio = excluded.bio
            ",
        )
        .bind(user_id.to_string())
        .bind(name)
        .bind(email)
        .bind(bio)
        .bind(format_timestamp(&Utc::now()))
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to upsert user: {e}")))?;

        for goal in goals {
            sqlx::query(
                r"
                INSERT INTO goals (id, user_id, title, target, current, unit)
                VALUES ($1, $2, $3, $4, $5, $6)
                ",
            )
            .bind(goal.id.to_string())
            .bind(goal.user_id.to_string())
            .bind(&goal.title)
            .bind(goal.target)
            .bind(goal.current)
            .bind(&goal.unit)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to create goal: {e}")))?;
        }

        let row = sqlx::query("SELECT id, name, email, bio, image, created_at FROM users WHERE id = $1")
            .bind(user_id.to_string())
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to reload user: {e}")))?;
        let user = Self::row_to_user(&row)?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit onboarding: {e}")))?;

        Ok(user)
    }

    /// Goals of a user, in creation order
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_goals(&self, user_id: Uuid) -> AppResult<Vec<Goal>> {
        let rows = sqlx::query(
            "SELECT id, user_id, title, target, current, unit FROM goals WHERE user_id = $1 ORDER BY rowid",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list goals: {e}")))?;

        rows.iter()
            .map(|row| {
                let id: String = row.get("id");
                let owner: String = row.get("user_id");
                Ok(Goal {
                    id: parse_uuid(&id)?,
                    user_id: parse_uuid(&owner)?,
                    title: row.get("title"),
                    target: row.get("target"),
                    current: row.get("current"),
                    unit: row.get("unit"),
                })
            })
            .collect()
    }

    /// Achievements of a user
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_achievements(&self, user_id: Uuid) -> AppResult<Vec<Achievement>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, title, description, icon, progress, total
            FROM achievements
            WHERE user_id = $1
            ORDER BY rowid
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list achievements: {e}")))?;

        rows.iter()
            .map(|row| {
                let id: String = row.get("id");
                let owner: String = row.get("user_id");
                Ok(Achievement {
                    id: parse_uuid(&id)?,
                    user_id: parse_uuid(&owner)?,
                    title: row.get("title"),
                    description: row.get("description"),
                    icon: row.get("icon"),
                    progress: row.get("progress"),
                    total: row.get("total"),
                })
            })
            .collect()
    }

    fn row_to_user(row: &SqliteRow) -> AppResult<User> {
        let id: String = row.get("id");
        let created_at: String = row.get("created_at");

        Ok(User {
            id: parse_uuid(&id)?,
            name: row.get("name"),
            email: row.get("email"),
            bio: row.get("bio"),
            image: row.get("image"),
            created_at: parse_timestamp(&created_at)?,
        })
    }
}
