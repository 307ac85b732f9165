// ABOUTME: Session authentication extractor for axum handlers
// ABOUTME: Reads the auth_token cookie or a Bearer header and rejects with 401 before any body parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use axum::async_trait;
use axum::extract::FromRequestParts;
use http::header::{AUTHORIZATION, COOKIE};
use http::request::Parts;
use http::HeaderMap;
use uuid::Uuid;

use crate::constants::session::AUTH_COOKIE_NAME;
use crate::errors::AppError;
use crate::logging::AppLogger;
use crate::resources::ServerResources;

/// Authenticated caller, extracted from the session token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    /// Session user id
    pub user_id: Uuid,
    /// Email carried by the session
    pub email: String,
}

/// Find the session token: `Authorization: Bearer` wins over the cookie
#[must_use]
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    if let Some(token) = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
    {
        return Some(token.to_owned());
    }
    get_cookie_value(headers, AUTH_COOKIE_NAME)
}

/// Value of a named cookie across every `Cookie` header
#[must_use]
pub fn get_cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|h| h.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, value)| *key == name && !value.is_empty())
        .map(|(_, value)| value.to_owned())
}

#[async_trait]
impl FromRequestParts<Arc<ServerResources>> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        resources: &Arc<ServerResources>,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = session_token(&parts.headers) else {
            return Err(AppError::auth_required());
        };

        match resources.auth_manager.authenticate(&token) {
            Ok(auth) => {
                tracing::debug!(user_id = %auth.user_id, "Session validated");
                Ok(Self {
                    user_id: auth.user_id,
                    email: auth.email,
                })
            }
            Err(e) => {
                AppLogger::log_auth_event(None, "session_validation", false);
                Err(e)
            }
        }
    }
}
