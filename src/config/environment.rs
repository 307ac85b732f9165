// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses ports, database location, session secrets and deployment mode
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration management for production deployment

use std::env;
use std::fmt;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::constants::{defaults, session};

/// Environment type for security and other configurations
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Type-safe database location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// `SQLite` database with file path
    SQLite {
        /// Path of the database file
        path: PathBuf,
    },
    /// In-memory `SQLite` (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse from string
    ///
    /// # Errors
    ///
    /// Returns an error for non-`SQLite` URLs
    pub fn parse_url(s: &str) -> Result<Self> {
        if let Some(path_str) = s.strip_prefix("sqlite:") {
            if path_str == ":memory:" || path_str.is_empty() {
                Ok(Self::Memory)
            } else {
                Ok(Self::SQLite {
                    path: PathBuf::from(path_str.trim_start_matches("//")),
                })
            }
        } else if s.contains("://") {
            Err(anyhow::anyhow!("Unsupported database URL scheme: {s}"))
        } else {
            Ok(Self::SQLite {
                path: PathBuf::from(s),
            })
        }
    }

    /// Convert to connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".to_owned(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::SQLite {
            path: PathBuf::from(
                defaults::DATABASE_URL
                    .strip_prefix("sqlite:")
                    .unwrap_or(defaults::DATABASE_URL),
            ),
        }
    }
}

impl fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_connection_string())
    }
}

/// Session signing configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HS256 signing secret
    pub jwt_secret: String,
    /// Token lifetime in hours
    pub jwt_expiry_hours: i64,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expiry_hours", &self.jwt_expiry_hours)
            .finish()
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: defaults::DEV_JWT_SECRET.to_owned(),
            jwt_expiry_hours: defaults::JWT_EXPIRY_HOURS,
        }
    }
}

/// Cross-origin settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated origins, or `*` for any
    pub allowed_origins: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: "*".to_owned(),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP API port
    pub http_port: u16,
    /// Database location
    pub database: DatabaseUrl,
    /// Session configuration
    pub auth: AuthConfig,
    /// Cross-origin settings
    pub cors: CorsConfig,
    /// Deployment environment
    pub environment: Environment,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: defaults::HTTP_PORT,
            database: DatabaseUrl::default(),
            auth: AuthConfig::default(),
            cors: CorsConfig::default(),
            environment: Environment::Development,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but malformed, or if the
    /// resulting configuration fails validation
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but malformed, or if the
    /// resulting configuration fails validation
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT")
            .map(|s| Environment::from_str_or_default(&s))
            .unwrap_or_default();

        let http_port = lookup("HTTP_PORT")
            .map(|s| s.parse::<u16>().context("Invalid HTTP_PORT value"))
            .transpose()?
            .unwrap_or(defaults::HTTP_PORT);

        let database = lookup("DATABASE_URL")
            .map(|s| DatabaseUrl::parse_url(&s))
            .transpose()?
            .unwrap_or_default();

        let jwt_expiry_hours = lookup("JWT_EXPIRY_HOURS")
            .map(|s| s.parse::<i64>().context("Invalid JWT_EXPIRY_HOURS value"))
            .transpose()?
            .unwrap_or(defaults::JWT_EXPIRY_HOURS);

        let jwt_secret = if let Some(secret) = lookup("JWT_SECRET") {
            secret
        } else {
            if environment.is_production() {
                return Err(anyhow::anyhow!("JWT_SECRET is required in production"));
            }
            warn!("JWT_SECRET not set, using the development signing secret");
            defaults::DEV_JWT_SECRET.to_owned()
        };

        let cors = CorsConfig {
            allowed_origins: lookup("CORS_ALLOWED_ORIGINS").unwrap_or_else(|| "*".to_owned()),
        };

        let config = Self {
            http_port,
            database,
            auth: AuthConfig {
                jwt_secret,
                jwt_expiry_hours,
            },
            cors,
            environment,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if a value is out of range
    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_expiry_hours <= 0 {
            return Err(anyhow::anyhow!("JWT_EXPIRY_HOURS must be positive"));
        }

        if self.environment.is_production() {
            if self.auth.jwt_secret.len() < session::MIN_SECRET_LENGTH {
                return Err(anyhow::anyhow!(
                    "JWT_SECRET must be at least {} characters in production",
                    session::MIN_SECRET_LENGTH
                ));
            }
            if self.database.is_memory() {
                warn!("Production deployment is using an in-memory database");
            }
        }

        Ok(())
    }

    /// Human-readable configuration summary for startup logs
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "FitSocial Server Configuration:\n\
             - HTTP Port: {}\n\
             - Database: {}\n\
             - Session Expiry: {}h\n\
             - Environment: {}",
            self.http_port, self.database, self.auth.jwt_expiry_hours, self.environment,
        )
    }
}
