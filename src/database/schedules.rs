// ABOUTME: Weekly schedule persistence joined to workout summaries
// ABOUTME: Writes only succeed when the referenced workout belongs to the caller
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::Result;
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use super::{format_timestamp, parse_timestamp, parse_uuid, to_u32, Database};
use crate::errors::{AppError, AppResult};
use crate::models::{ScheduleEntry, WorkoutSummary};

impl Database {
    /// Create the schedules table
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_schedules(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS schedules (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                day TEXT NOT NULL CHECK (day IN ('Monday', 'Tuesday', 'Wednesday', 'Thursday', 'Friday', 'Saturday', 'Sunday')),
                time TEXT NOT NULL,
                workout_id TEXT NOT NULL REFERENCES workouts(id) ON DELETE CASCADE,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(self.pool())
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_schedules_user ON schedules(user_id)")
            .execute(self.pool())
            .await?;

        Ok(())
    }
}

const SCHEDULE_SELECT: &str = r"
    SELECT s.id, s.user_id, s.day, s.time, s.workout_id, s.created_at, s.updated_at,
           w.title AS workout_title, w.duration AS workout_duration, w.level AS workout_level
    FROM schedules s
    JOIN workouts w ON w.id = s.workout_id
";

/// Schedule database operations manager
pub struct ScheduleManager {
    pool: SqlitePool,
}

impl ScheduleManager {
    /// Create a new schedule manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// A user's schedule, Monday first, then by time of day
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_schedule(&self, user_id: Uuid) -> AppResult<Vec<ScheduleEntry>> {
        let rows = sqlx::query(&format!(
            r"{SCHEDULE_SELECT}
            WHERE s.user_id = $1
            ORDER BY CASE s.day
                WHEN 'Monday' THEN 0 WHEN 'Tuesday' THEN 1 WHEN 'Wednesday' THEN 2
                WHEN 'Thursday' THEN 3 WHEN 'Friday' THEN 4 WHEN 'Saturday' THEN 5
                ELSE 6 END,
                s.time ASC"
        ))
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list schedule: {e}")))?;

        rows.iter().map(Self::row_to_entry).collect()
    }

    /// Get one entry owned by `user_id`
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_entry(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<ScheduleEntry>> {
        let row = sqlx::query(&format!("{SCHEDULE_SELECT} WHERE s.id = $1 AND s.user_id = $2"))
            .bind(id.to_string())
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get schedule entry: {e}")))?;

        row.as_ref().map(Self::row_to_entry).transpose()
    }

    /// Insert an entry if its workout belongs to the entry's owner
    ///
    /// Returns `None` when the workout is absent or owned by someone else.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails
    pub async fn create_entry(&self, entry: &ScheduleEntry) -> AppResult<Option<ScheduleEntry>> {
        let result = sqlx::query(
            r"
            INSERT INTO schedules (id, user_id, day, time, workout_id, created_at, updated_at)
            SELECT $1, $2, $3, $4, w.id, $5, $6
            FROM workouts w
            WHERE w.id = $7 AND w.user_id = $2
            ",
        )
        .bind(entry.id.to_string())
        .bind(entry.user_id.to_string())
        .bind(entry.day.as_str())
        .bind(&entry.time)
        .bind(format_timestamp(&entry.created_at))
        .bind(format_timestamp(&entry.updated_at))
        .bind(entry.workout_id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create schedule entry: {e}")))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_entry(entry.user_id, entry.id).await
    }

    /// Move an entry to another time or workout
    ///
    /// Returns `None` when the entry or the workout is not owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails
    pub async fn update_entry(
        &self,
        user_id: Uuid,
        id: Uuid,
        time: &str,
        workout_id: Uuid,
    ) -> AppResult<Option<ScheduleEntry>> {
        let result = sqlx::query(
            r"
            UPDATE schedules
            SET time = $1, workout_id = $2, updated_at = $3
            WHERE id = $4 AND user_id = $5
              AND EXISTS (SELECT 1 FROM workouts WHERE id = $2 AND user_id = $5)
            ",
        )
        .bind(time)
        .bind(workout_id.to_string())
        .bind(format_timestamp(&Utc::now()))
        .bind(id.to_string())
        .bind(user_id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update schedule entry: {e}")))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_entry(user_id, id).await
    }

    /// Delete an entry owned by `user_id`
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails
    pub async fn delete_entry(&self, user_id: Uuid, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM schedules WHERE id = $1 AND user_id = $2")
            .bind(id.to_string())
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete schedule entry: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    fn row_to_entry(row: &SqliteRow) -> AppResult<ScheduleEntry> {
        let id: String = row.get("id");
        let user_id: String = row.get("user_id");
        let day: String = row.get("day");
        let workout_id: String = row.get("workout_id");
        let created_at: String = row.get("created_at");
        let updated_at: String = row.get("updated_at");
        let level: String = row.get("workout_level");

        let workout_id = parse_uuid(&workout_id)?;
        Ok(ScheduleEntry {
            id: parse_uuid(&id)?,
            user_id: parse_uuid(&user_id)?,
            day: day
                .parse()
                .map_err(|e: AppError| AppError::database(e.to_string()))?,
            time: row.get("time"),
            workout_id,
            created_at: parse_timestamp(&created_at)?,
            updated_at: parse_timestamp(&updated_at)?,
            workout: Some(WorkoutSummary {
                id: workout_id,
                title: row.get("workout_title"),
                duration: to_u32(row.get("workout_duration"), "duration")?,
                level: level
                    .parse()
                    .map_err(|e: AppError| AppError::database(e.to_string()))?,
            }),
        })
    }
}
