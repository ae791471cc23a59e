#![allow(dead_code)]

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A candidate submission. Insert-only: no endpoint reads applications
/// back, and nothing links a row to a jobs or users row.
/// `resume_path` is the relative path (`uploads/<name>`), unlike
/// `users.resume` which stores the bare filename.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicationRow {
    pub id: i64,
    pub fullname: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub cover_letter: Option<String>,
    pub resume_path: Option<String>,
}
