//! Diesel row models for review persistence.

use super::schema::reviews;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result and insert row for review records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = reviews)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ReviewRow {
    /// Review identifier.
    pub id: i64,
    /// Job reviewed.
    pub job_id: i64,
    /// Reviewer.
    pub rater_id: i64,
    /// Reviewed party.
    pub ratee_id: i64,
    /// Reviewer's side of the engagement.
    pub rater_role: String,
    /// Star rating.
    pub rating: i16,
    /// Optional comment.
    pub comment: Option<String>,
    /// Whether the single edit has been used.
    pub edited: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
