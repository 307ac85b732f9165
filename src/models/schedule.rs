// ABOUTME: Weekly schedule models binding workouts to a weekday and time slot
// ABOUTME: Weekdays order Monday first and times are HH:MM on a 24 hour clock
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::WorkoutLevel;

/// Day of the week a workout is scheduled on
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Weekday {
    /// Monday
    Monday,
    /// Tuesday
    Tuesday,
    /// Wednesday
    Wednesday,
    /// Thursday
    Thursday,
    /// Friday
    Friday,
    /// Saturday
    Saturday,
    /// Sunday
    Sunday,
}

impl Weekday {
    /// All days in display order
    pub const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    /// Database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        }
    }
}

impl Display for Weekday {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for Weekday {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|day| day.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AppError::invalid_input(format!("Invalid day: {s}")))
    }
}

/// Normalize a client time to `HH:MM`
///
/// # Errors
///
/// Returns `INVALID_INPUT` if the value is not a 24h `HH:MM` time
pub fn normalize_time(value: &str) -> Result<String, AppError> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map(|t| t.format("%H:%M").to_string())
        .map_err(|_| AppError::invalid_input(format!("Invalid time '{value}', expected HH:MM")))
}

/// Workout fields shown next to a schedule slot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkoutSummary {
    /// Workout id
    pub id: Uuid,
    /// Title
    pub title: String,
    /// Duration in minutes
    pub duration: u32,
    /// Difficulty
    pub level: WorkoutLevel,
}

/// A scheduled workout slot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScheduleEntry {
    /// Unique identifier
    pub id: Uuid,
    /// Owner
    pub user_id: Uuid,
    /// Day of the week
    pub day: Weekday,
    /// Time of day, `HH:MM`
    pub time: String,
    /// Scheduled workout
    pub workout_id: Uuid,
    /// When the slot was created
    pub created_at: DateTime<Utc>,
    /// When the slot was last updated
    pub updated_at: DateTime<Utc>,
    /// Joined workout summary, absent on freshly written rows
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workout: Option<WorkoutSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_parse_is_case_insensitive() {
        assert_eq!("monday".parse::<Weekday>().unwrap(), Weekday::Monday);
        assert_eq!(" Sunday ".parse::<Weekday>().unwrap(), Weekday::Sunday);
        assert!("Funday".parse::<Weekday>().is_err());
    }

    #[test]
    fn test_weekday_order_starts_monday() {
        assert_eq!(Weekday::ALL[0], Weekday::Monday);
        assert_eq!(Weekday::ALL[6], Weekday::Sunday);
        assert!(Weekday::Tuesday < Weekday::Wednesday);
    }

    #[test]
    fn test_normalize_time() {
        assert_eq!(normalize_time("7:05").unwrap(), "07:05");
        assert_eq!(normalize_time("18:30").unwrap(), "18:30");
        assert!(normalize_time("25:00").is_err());
        assert!(normalize_time("evening").is_err());
    }
}
