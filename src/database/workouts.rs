// ABOUTME: Workout and exercise persistence with transactional multi-row writes
// ABOUTME: Every read and write is scoped to the owning user id
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashMap;

use anyhow::Result;
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqliteConnection, SqlitePool};
use uuid::Uuid;

use super::{
    begin_write, format_timestamp, parse_timestamp, parse_uuid, to_u32, Database, IN_CLAUSE_BATCH,
};
use crate::errors::{AppError, AppResult};
use crate::models::{Exercise, Workout, WorkoutActivity, WorkoutFields};

impl Database {
    /// Create workouts and exercises tables
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_workouts(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workouts (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                title TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                duration INTEGER NOT NULL DEFAULT 0 CHECK (duration >= 0),
                calories INTEGER NOT NULL DEFAULT 0 CHECK (calories >= 0),
                level TEXT NOT NULL CHECK (level IN ('Beginner', 'Intermediate', 'Advanced')),
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(self.pool())
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_workouts_user_created ON workouts(user_id, created_at)",
        )
        .execute(self.pool())
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS exercises (
                id TEXT PRIMARY KEY,
                workout_id TEXT NOT NULL REFERENCES workouts(id) ON DELETE CASCADE,
                position INTEGER NOT NULL,
                name TEXT NOT NULL,
                sets INTEGER NOT NULL CHECK (sets >= 0),
                reps INTEGER NOT NULL CHECK (reps >= 0),
                weight REAL
            )
            ",
        )
        .execute(self.pool())
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_exercises_workout ON exercises(workout_id, position)",
        )
        .execute(self.pool())
        .await?;

        Ok(())
    }
}

/// Workout database operations manager
pub struct WorkoutManager {
    pool: SqlitePool,
}

impl WorkoutManager {
    /// Create a new workout manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a workout and all of its exercises in one transaction
    ///
    /// # Errors
    ///
    /// Returns an error if any insert fails; nothing is persisted in that case
    pub async fn create_workout(&self, workout: &Workout) -> AppResult<()> {
        let mut tx = begin_write(&self.pool).await?;

        sqlx::query(
            r"
            INSERT INTO workouts (id, user_id, title, description, duration, calories, level, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(workout.id.to_string())
        .bind(workout.user_id.to_string())
        .bind(&workout.title)
        .bind(&workout.description)
        .bind(i64::from(workout.duration))
        .bind(i64::from(workout.calories))
        .bind(workout.level.as_str())
        .bind(format_timestamp(&workout.created_at))
        .bind(format_timestamp(&workout.updated_at))
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to create workout: {e}")))?;

        Self::insert_exercises(&mut tx, &workout.exercises).await?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit workout: {e}")))?;

        Ok(())
    }

    /// List a user's workouts with exercises, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_workouts(&self, user_id: Uuid) -> AppResult<Vec<Workout>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, title, description, duration, calories, level, created_at, updated_at
            FROM workouts
            WHERE user_id = $1
            ORDER BY created_at DESC, rowid DESC
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list workouts: {e}")))?;

        let mut workouts = rows
            .iter()
            .map(Self::row_to_workout)
            .collect::<AppResult<Vec<_>>>()?;

        let ids: Vec<Uuid> = workouts.iter().map(|w| w.id).collect();
        let mut exercises = self.exercises_for(&ids).await?;
        for workout in &mut workouts {
            workout.exercises = exercises.remove(&workout.id).unwrap_or_default();
        }

        Ok(workouts)
    }

    /// Get one workout owned by `user_id`
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_workout(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<Workout>> {
        let row = sqlx::query(
            r"
            SELECT id, user_id, title, description, duration, calories, level, created_at, updated_at
            FROM workouts
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(id.to_string())
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get workout: {e}")))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut workout = Self::row_to_workout(&row)?;
        workout.exercises = self
            .exercises_for(&[workout.id])
            .await?
            .remove(&workout.id)
            .unwrap_or_default();
        Ok(Some(workout))
    }

    /// Update scalar fields and replace the exercise list in one transaction
    ///
    /// Returns `None` when the workout does not exist or is not owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if any statement fails; the previous state is kept in that case
    pub async fn update_workout(
        &self,
        user_id: Uuid,
        id: Uuid,
        fields: &WorkoutFields,
        exercises: &[Exercise],
    ) -> AppResult<Option<Workout>> {
        let mut tx = begin_write(&self.pool).await?;

        let updated = sqlx::query(
            r"
            UPDATE workouts
            SET title = $1, description = $2, duration = $3, calories = $4, level = $5, updated_at = $6
            WHERE id = $7 AND user_id = $8
            ",
        )
        .bind(&fields.title)
        .bind(&fields.description)
        .bind(i64::from(fields.duration))
        .bind(i64::from(fields.calories))
        .bind(fields.level.as_str())
        .bind(format_timestamp(&Utc::now()))
        .bind(id.to_string())
        .bind(user_id.to_string())
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to update workout: {e}")))?;

        if updated.rows_affected() == 0 {
            // Dropping the transaction rolls it back
            return Ok(None);
        }

        sqlx::query("DELETE FROM exercises WHERE workout_id = $1")
            .bind(id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to clear exercises: {e}")))?;

        Self::insert_exercises(&mut tx, exercises).await?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit workout update: {e}")))?;

        self.get_workout(user_id, id).await
    }

    /// Delete a workout and its exercises; returns whether a row was removed
    ///
    /// # Errors
    ///
    /// Returns an error if either delete fails
    pub async fn delete_workout(&self, user_id: Uuid, id: Uuid) -> AppResult<bool> {
        let mut tx = begin_write(&self.pool).await?;

        sqlx::query(
            r"
            DELETE FROM exercises
            WHERE workout_id IN (SELECT id FROM workouts WHERE id = $1 AND user_id = $2)
            ",
        )
        .bind(id.to_string())
        .bind(user_id.to_string())
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to delete exercises: {e}")))?;

        let deleted = sqlx::query("DELETE FROM workouts WHERE id = $1 AND user_id = $2")
            .bind(id.to_string())
            .bind(user_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete workout: {e}")))?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit workout delete: {e}")))?;

        Ok(deleted.rows_affected() > 0)
    }

    /// Creation time, duration and calories of every workout a user logged
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_activity(&self, user_id: Uuid) -> AppResult<Vec<WorkoutActivity>> {
        let rows = sqlx::query(
            r"
            SELECT created_at, duration, calories
            FROM workouts
            WHERE user_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to load workout activity: {e}")))?;

        rows.iter()
            .map(|row| {
                let created_at: String = row.get("created_at");
                Ok(WorkoutActivity {
                    created_at: parse_timestamp(&created_at)?,
                    duration: to_u32(row.get("duration"), "duration")?,
                    calories: to_u32(row.get("calories"), "calories")?,
                })
            })
            .collect()
    }

    async fn insert_exercises(conn: &mut SqliteConnection, exercises: &[Exercise]) -> AppResult<()> {
        for (position, exercise) in exercises.iter().enumerate() {
            sqlx::query(
                r"
                INSERT INTO exercises (id, workout_id, position, name, sets, reps, weight)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                ",
            )
            .bind(exercise.id.to_string())
            .bind(exercise.workout_id.to_string())
            .bind(i64::try_from(position).unwrap_or(i64::MAX))
            .bind(&exercise.name)
            .bind(i64::from(exercise.sets))
            .bind(i64::from(exercise.reps))
            .bind(exercise.weight)
            .execute(&mut *conn)
            .await
            .map_err(|e| AppError::database(format!("Failed to insert exercise: {e}")))?;
        }
        Ok(())
    }

    async fn exercises_for(&self, workout_ids: &[Uuid]) -> AppResult<HashMap<Uuid, Vec<Exercise>>> {
        let mut grouped: HashMap<Uuid, Vec<Exercise>> = HashMap::new();

        for batch in workout_ids.chunks(IN_CLAUSE_BATCH) {
            let mut query = QueryBuilder::<Sqlite>::new(
                "SELECT id, workout_id, name, sets, reps, weight FROM exercises WHERE workout_id IN (",
            );
            let mut ids = query.separated(", ");
            for id in batch {
                ids.push_bind(id.to_string());
            }
            ids.push_unseparated(") ORDER BY workout_id, position");

            let rows = query
                .build()
                .fetch_all(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Failed to load exercises: {e}")))?;

            for row in &rows {
                let exercise = Self::row_to_exercise(row)?;
                grouped.entry(exercise.workout_id).or_default().push(exercise);
            }
        }
        Ok(grouped)
    }

    fn row_to_workout(row: &SqliteRow) -> AppResult<Workout> {
        let id: String = row.get("id");
        let user_id: String = row.get("user_id");
        let level: String = row.get("level");
        let created_at: String = row.get("created_at");
        let updated_at: String = row.get("updated_at");

        Ok(Workout {
            id: parse_uuid(&id)?,
            user_id: parse_uuid(&user_id)?,
            title: row.get("title"),
            description: row.get("description"),
            duration: to_u32(row.get("duration"), "duration")?,
            calories: to_u32(row.get("calories"), "calories")?,
            level: level
                .parse()
                .map_err(|e: AppError| AppError::database(e.to_string()))?,
            created_at: parse_timestamp(&created_at)?,
            updated_at: parse_timestamp(&updated_at)?,
            exercises: Vec::new(),
        })
    }

    fn row_to_exercise(row: &SqliteRow) -> AppResult<Exercise> {
        let id: String = row.get("id");
        let workout_id: String = row.get("workout_id");

        Ok(Exercise {
            id: parse_uuid(&id)?,
            workout_id: parse_uuid(&workout_id)?,
            name: row.get("name"),
            sets: to_u32(row.get("sets"), "sets")?,
            reps: to_u32(row.get("reps"), "reps")?,
            weight: row.get("weight"),
        })
    }
}
