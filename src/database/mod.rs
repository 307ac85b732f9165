// ABOUTME: SQLite connection pool, schema migrations and shared row decoding helpers
// ABOUTME: Resource managers for workouts, the feed, schedules and profiles live in submodules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Database Management
//!
//! The store is a single `SQLite` database reached through a `sqlx` pool.
//! Each resource module owns its tables (`migrate_*`) and exposes a manager
//! wrapping the pool. Multi-step writes run in one transaction.

mod profiles;
mod schedules;
mod social;
mod workouts;

pub use profiles::ProfileManager;
pub use schedules::ScheduleManager;
pub use social::{LikeToggle, SocialManager};
pub use workouts::WorkoutManager;

use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::info;
use uuid::Uuid;

use crate::config::DatabaseUrl;
use crate::errors::{AppError, AppResult};

/// How long a writer waits for the database lock before giving up
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Ids bound per `IN (...)` lookup, well below `SQLite`'s variable limit
pub(crate) const IN_CLAUSE_BATCH: usize = 500;

/// Database handle shared by every request
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or any migration fails
    pub async fn new(url: &DatabaseUrl) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(&url.to_connection_string())
            .with_context(|| format!("Invalid database URL: {url}"))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = if url.is_memory() {
            // Every connection to :memory: is a separate database, so pin one
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await
        } else {
            if let DatabaseUrl::SQLite { path } = url {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create database directory {}", parent.display())
                    })?;
                }
            }
            let options = options
                .journal_mode(SqliteJournalMode::Wal)
                .busy_timeout(BUSY_TIMEOUT);
            SqlitePoolOptions::new().connect_with(options).await
        }
        .with_context(|| format!("Failed to connect to {url}"))?;

        let db = Self { pool };
        db.migrate().await?;
        info!(database = %url, "Database ready");
        Ok(db)
    }

    /// Underlying pool
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Workout and exercise operations
    #[must_use]
    pub fn workouts(&self) -> WorkoutManager {
        WorkoutManager::new(self.pool.clone())
    }

    /// Post, like and comment operations
    #[must_use]
    pub fn social(&self) -> SocialManager {
        SocialManager::new(self.pool.clone())
    }

    /// Schedule operations
    #[must_use]
    pub fn schedules(&self) -> ScheduleManager {
        ScheduleManager::new(self.pool.clone())
    }

    /// User, goal and achievement operations
    #[must_use]
    pub fn profiles(&self) -> ProfileManager {
        ProfileManager::new(self.pool.clone())
    }

    /// Run every migration; all statements are idempotent
    ///
    /// # Errors
    ///
    /// Returns an error if any table or index creation fails
    pub async fn migrate(&self) -> Result<()> {
        // Order matters for foreign keys
        self.migrate_profiles().await?;
        self.migrate_workouts().await?;
        self.migrate_social().await?;
        self.migrate_schedules().await?;
        Ok(())
    }

    /// Cheap round trip used by the readiness probe
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be reached
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Database ping failed: {e}")))?;
        Ok(())
    }
}

/// Open a transaction that takes the write lock up front
///
/// A deferred transaction that reads before writing cannot wait for the lock
/// and fails with `SQLITE_BUSY` under contention. `BEGIN IMMEDIATE` waits on
/// the busy timeout instead.
pub(crate) async fn begin_write(pool: &SqlitePool) -> AppResult<Transaction<'static, Sqlite>> {
    pool.begin_with("BEGIN IMMEDIATE")
        .await
        .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))
}

// ============================================================================
// Row decoding helpers
// ============================================================================

/// Canonical timestamp text; fixed width so lexical order is chronological
pub(crate) fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn parse_timestamp(value: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::database(format!("Invalid date: {e}")))
}

pub(crate) fn parse_uuid(value: &str) -> AppResult<Uuid> {
    Uuid::parse_str(value).map_err(|e| AppError::database(format!("Invalid UUID: {e}")))
}

/// Decode a non-negative count column stored as INTEGER
pub(crate) fn to_u32(value: i64, column: &str) -> AppResult<u32> {
    u32::try_from(value)
        .map_err(|_| AppError::database(format!("Column {column} out of range: {value}")))
}
