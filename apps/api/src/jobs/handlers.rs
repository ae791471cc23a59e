use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::intake::require_field;
use crate::models::job::JobRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AddJobRequest {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub salary: Option<String>,
    pub experience: Option<String>,
    pub skills: Option<String>,
}

/// POST /add-job
///
/// Required: title, company, description. The posting timestamp is the
/// database's `DEFAULT now()`, never client-supplied.
pub async fn handle_add_job(
    State(state): State<AppState>,
    Json(req): Json<AddJobRequest>,
) -> Result<&'static str, AppError> {
    let title = require_field(req.title.as_deref(), "title")?;
    let company = require_field(req.company.as_deref(), "company")?;
    let description = require_field(req.description.as_deref(), "description")?;

    sqlx::query(
        r#"
        INSERT INTO jobs (title, company, location, description, salary, experience, skills)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(title)
    .bind(company)
    .bind(req.location.as_deref())
    .bind(description)
    .bind(req.salary.as_deref())
    .bind(req.experience.as_deref())
    .bind(req.skills.as_deref())
    .execute(&state.db)
    .await?;

    info!(title, company, "job posted");
    Ok("Job added successfully")
}

/// GET /jobs
///
/// All jobs, newest first, unbounded.
pub async fn handle_list_jobs(
    State(state): State<AppState>,
) -> Result<Json<Vec<JobRow>>, AppError> {
    let jobs: Vec<JobRow> = sqlx::query_as(
        "SELECT id, title, company, location, description, salary, experience, skills, created_at \
         FROM jobs ORDER BY created_at DESC",
    )
    .fetch_all(&state.db)
    .await?;

    Ok(Json(jobs))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_request() -> AddJobRequest {
        AddJobRequest {
            title: Some("Engineer".to_string()),
            company: Some("Acme".to_string()),
            location: None,
            description: Some("Build things".to_string()),
            salary: None,
            experience: None,
            skills: None,
        }
    }

    #[test]
    fn required_fields_pass_when_present() {
        let req = full_request();
        assert!(require_field(req.title.as_deref(), "title").is_ok());
        assert!(require_field(req.company.as_deref(), "company").is_ok());
        assert!(require_field(req.description.as_deref(), "description").is_ok());
    }

    #[test]
    fn absent_title_is_a_validation_error() {
        let mut req = full_request();
        req.title = None;
        assert!(matches!(
            require_field(req.title.as_deref(), "title"),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn blank_company_is_a_validation_error() {
        let mut req = full_request();
        req.company = Some(String::new());
        assert!(require_field(req.company.as_deref(), "company").is_err());
    }
}
