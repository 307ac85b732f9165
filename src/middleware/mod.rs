// ABOUTME: HTTP middleware, CORS policy and request extractors
// ABOUTME: Session authentication plus body and query decoding with the standard error shape
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Session extractor and cookie helpers
pub mod auth;
/// Cross-origin policy
pub mod cors;
/// JSON body and query string extractors
pub mod json;

pub use auth::{get_cookie_value, session_token, AuthUser};
pub use cors::setup_cors;
pub use json::{JsonBody, QueryParams};
