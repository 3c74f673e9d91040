// src/models/schedule.rs

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::Validate;

/// A study-plan entry for a user.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: Option<String>,

    /// Entry type: 'study', 'exam' or anything the frontend wants to tag.
    /// Mapped from the database column 'type' since `type` is a reserved
    /// keyword in Rust.
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub entry_type: Option<String>,

    pub event_date: NaiveDate,
    pub start_time: Option<NaiveTime>,
}

/// DTO for creating or fully replacing a schedule entry.
#[derive(Debug, Deserialize, Validate)]
pub struct UpsertScheduleRequest {
    pub user_id: i64,

    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[validate(length(max = 2000))]
    pub description: Option<String>,

    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 20))]
    pub entry_type: Option<String>,

    pub event_date: NaiveDate,

    pub start_time: Option<NaiveTime>,
}
