// ABOUTME: Centralized resource container for dependency injection into handlers
// ABOUTME: Holds the database, session manager and configuration shared by every request
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Server Resources
//!
//! Built once at startup and handed to the router as axum state behind an
//! `Arc`. Nothing in here is mutated after construction.

use std::sync::Arc;

use crate::auth::AuthManager;
use crate::config::ServerConfig;
use crate::database::Database;

/// Shared server resources
#[derive(Clone)]
pub struct ServerResources {
    /// Store handle
    pub database: Arc<Database>,
    /// Session token issuer and validator
    pub auth_manager: Arc<AuthManager>,
    /// Effective configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Wrap resources for sharing across handlers
    #[must_use]
    pub fn new(database: Database, auth_manager: AuthManager, config: Arc<ServerConfig>) -> Self {
        Self {
            database: Arc::new(database),
            auth_manager: Arc::new(auth_manager),
            config,
        }
    }

    /// Build the session manager from configuration
    #[must_use]
    pub fn auth_manager_from_config(config: &ServerConfig) -> AuthManager {
        AuthManager::new(config.auth.jwt_secret.as_bytes(), config.auth.jwt_expiry_hours)
    }
}
