//! User model and related functionality

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::summary::SummaryStyle;

/// User account entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub points: i64,
    pub streak: i64,
    pub last_login: Option<DateTime<Utc>>,
    pub last_email_sent: Option<DateTime<Utc>>,
    pub preferences: Option<Preferences>,
}

/// New user creation payload
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// News filter criteria and summarization style
///
/// Replaced wholesale on update, never merged. Field-wise equality against
/// the snapshot stored with a cache entry drives the staleness decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub country: String,
    pub category: String,
    pub language: String,
    #[serde(rename = "summaryStyle")]
    pub summary_style: SummaryStyle,
    /// Number of hours cached articles remain valid
    pub frequency: i64,
}
