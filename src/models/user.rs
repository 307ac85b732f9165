// ABOUTME: User profile, goal and achievement models
// ABOUTME: Profiles are created at onboarding and keyed by the session user id
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::goals;

/// User profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    /// Identity from the session provider
    pub id: Uuid,
    /// Display name
    pub name: Option<String>,
    /// Contact email
    pub email: Option<String>,
    /// Short biography
    pub bio: Option<String>,
    /// Avatar image URL
    pub image: Option<String>,
    /// When the profile was created
    pub created_at: DateTime<Utc>,
}

/// A personal goal with progress
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Goal {
    /// Unique identifier
    pub id: Uuid,
    /// Owner
    pub user_id: Uuid,
    /// What the goal is
    pub title: String,
    /// Target amount
    pub target: f64,
    /// Progress so far
    pub current: f64,
    /// Unit of target and current
    pub unit: String,
}

impl Goal {
    /// Goal created during onboarding, with zero target and progress
    #[must_use]
    pub fn initial(user_id: Uuid, title: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            title,
            target: goals::INITIAL_TARGET,
            current: goals::INITIAL_CURRENT,
            unit: goals::DEFAULT_UNIT.to_owned(),
        }
    }
}

/// An achievement badge with progress
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Achievement {
    /// Unique identifier
    pub id: Uuid,
    /// Owner
    pub user_id: Uuid,
    /// Badge title
    pub title: String,
    /// Badge description
    pub description: String,
    /// Icon name
    pub icon: String,
    /// Steps completed
    pub progress: i64,
    /// Steps required
    pub total: i64,
}
