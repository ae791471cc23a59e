use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A posted opening. `created_at` is assigned by the database and is the
/// sole sort key for listings.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRow {
    pub id: i64,
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub description: String,
    pub salary: Option<String>,
    pub experience: Option<String>,
    pub skills: Option<String>,
    pub created_at: DateTime<Utc>,
}
