//! Diesel row models for survey result persistence.

use super::schema::survey_results;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for survey records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = survey_results)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SurveyResultRow {
    /// Survey issue identifier.
    pub issue_id: i64,
    /// Enterprise name.
    pub enterprise_name: Option<String>,
    /// Repository owner login.
    pub owner_login: String,
    /// Repository name.
    pub repo_name: String,
    /// Survey issue number.
    pub issue_number: i64,
    /// Surveyed pull request number.
    pub pr_number: i64,
    /// Survey assignee login.
    pub assignee_login: Option<String>,
    /// Whether the assistant was used.
    pub assistant_used: Option<bool>,
    /// Comma-joined usage buckets.
    pub usage_percentage: Option<String>,
    /// Reason given for not using the assistant.
    pub non_use_reason: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for survey records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = survey_results)]
pub struct NewSurveyResultRow {
    /// Survey issue identifier.
    pub issue_id: i64,
    /// Enterprise name.
    pub enterprise_name: Option<String>,
    /// Repository owner login.
    pub owner_login: String,
    /// Repository name.
    pub repo_name: String,
    /// Survey issue number.
    pub issue_number: i64,
    /// Surveyed pull request number.
    pub pr_number: i64,
    /// Survey assignee login.
    pub assignee_login: Option<String>,
    /// Whether the assistant was used.
    pub assistant_used: Option<bool>,
    /// Comma-joined usage buckets.
    pub usage_percentage: Option<String>,
    /// Reason given for not using the assistant.
    pub non_use_reason: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Answer columns overwritten when a record already exists.
///
/// `None` values are written as `NULL` so a cleared answer is persisted.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = survey_results)]
#[diesel(treat_none_as_null = true)]
pub struct SurveyAnswerChangeset {
    /// Surveyed pull request number.
    pub pr_number: i64,
    /// Whether the assistant was used.
    pub assistant_used: Option<bool>,
    /// Comma-joined usage buckets.
    pub usage_percentage: Option<String>,
    /// Reason given for not using the assistant.
    pub non_use_reason: Option<String>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
