//! Diesel row models for job board persistence.

use super::schema::{applications, jobs, reapplication_cooldowns};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for job records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = jobs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct JobRow {
    /// Job identifier.
    pub id: i64,
    /// Owning customer.
    pub customer_id: i64,
    /// Job title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional budget.
    pub budget_minor_units: Option<i64>,
    /// Required skills JSON array.
    pub required_skills: Value,
    /// Lifecycle status.
    pub status: String,
    /// Number of applications ever submitted.
    pub applications_count: i32,
    /// Board version.
    pub version: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for job records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = jobs)]
pub struct NewJobRow {
    /// Job identifier.
    pub id: i64,
    /// Owning customer.
    pub customer_id: i64,
    /// Job title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional budget.
    pub budget_minor_units: Option<i64>,
    /// Required skills JSON array.
    pub required_skills: Value,
    /// Lifecycle status.
    pub status: String,
    /// Number of applications ever submitted.
    pub applications_count: i32,
    /// Board version.
    pub version: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Changeset written when a loaded board is saved.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = jobs)]
#[diesel(treat_none_as_null = true)]
pub struct JobChangeset {
    /// Job title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional budget.
    pub budget_minor_units: Option<i64>,
    /// Required skills JSON array.
    pub required_skills: Value,
    /// Lifecycle status.
    pub status: String,
    /// Number of applications ever submitted.
    pub applications_count: i32,
    /// Next board version.
    pub version: i64,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result and insert row for application records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = applications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ApplicationRow {
    /// Application identifier.
    pub id: i64,
    /// Job applied to.
    pub job_id: i64,
    /// Applying tasker.
    pub tasker_id: i64,
    /// Lifecycle status.
    pub status: String,
    /// Cover letter text.
    pub cover_letter: Option<String>,
    /// Tagged closing note JSON.
    pub closing_note: Option<Value>,
    /// Optional proposed budget.
    pub proposed_budget_minor_units: Option<i64>,
    /// Hire timestamp.
    pub accepted_at: Option<DateTime<Utc>>,
    /// Close timestamp.
    pub closed_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result and insert row for cooldown anchors.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = reapplication_cooldowns)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CooldownRow {
    /// Job withdrawn from.
    pub job_id: i64,
    /// Withdrawing tasker.
    pub tasker_id: i64,
    /// Withdrawal timestamp.
    pub anchored_at: DateTime<Utc>,
}
