use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full users row, password hash included. Never serialized to a client
/// as-is; responses go through [`UserProfile`].
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub fullname: String,
    pub mobile: Option<String>,
    pub dob: Option<String>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub education: Option<String>,
    pub experience: Option<String>,
    pub skills: Option<String>,
    pub email: String,
    pub password_hash: String,
    pub resume: Option<String>,
}

/// Client-facing projection of a user: every profile column, no id, no
/// password hash. `resume` is the generated filename from file intake.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserProfile {
    pub fullname: String,
    pub mobile: Option<String>,
    pub dob: Option<String>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub education: Option<String>,
    pub experience: Option<String>,
    pub skills: Option<String>,
    pub email: String,
    pub resume: Option<String>,
}

impl From<UserRow> for UserProfile {
    fn from(row: UserRow) -> Self {
        UserProfile {
            fullname: row.fullname,
            mobile: row.mobile,
            dob: row.dob,
            gender: row.gender,
            address: row.address,
            city: row.city,
            state: row.state,
            education: row.education,
            experience: row.experience,
            skills: row.skills,
            email: row.email,
            resume: row.resume,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_never_carries_the_password_hash() {
        let row = UserRow {
            id: 1,
            fullname: "Ada Lovelace".to_string(),
            mobile: None,
            dob: None,
            gender: None,
            address: None,
            city: Some("London".to_string()),
            state: None,
            education: None,
            experience: None,
            skills: Some("analysis".to_string()),
            email: "ada@example.com".to_string(),
            password_hash: "$argon2id$...".to_string(),
            resume: Some("1730000000000-42.pdf".to_string()),
        };

        let profile = UserProfile::from(row);
        let body = serde_json::to_string(&profile).unwrap();
        assert!(!body.contains("argon2id"));
        assert!(!body.contains("password"));
        assert!(body.contains("ada@example.com"));
        assert!(body.contains("1730000000000-42.pdf"));
    }
}
