use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::intake::collect_form;
use crate::models::user::{UserProfile, UserRow};
use crate::state::AppState;

const USER_COLUMNS: &str = "id, fullname, mobile, dob, gender, address, city, state, \
     education, experience, skills, email, password_hash, resume";

const PROFILE_COLUMNS: &str = "fullname, mobile, dob, gender, address, city, state, \
     education, experience, skills, email, resume";

/// POST /signup
///
/// Multipart form: required fullname/email/password, optional profile
/// fields and a `resume` document. Email is not checked for format or
/// uniqueness; a repeated signup creates a second row.
pub async fn handle_signup(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<&'static str, AppError> {
    let form = collect_form(multipart).await?;

    let fullname = form.require("fullname")?;
    let email = form.require("email")?;
    let password = form.require("password")?;

    let password_hash = state.credentials.hash(password)?;

    // File write precedes the insert; on insert failure the file is removed
    // so the pair cannot leave an orphan behind.
    let stored = match &form.resume {
        Some(pending) => Some(state.intake.store(pending).await?),
        None => None,
    };

    let result = sqlx::query(
        r#"
        INSERT INTO users
        (fullname, mobile, dob, gender, address, city, state, education, experience, skills, email, password_hash, resume)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
        "#,
    )
    .bind(fullname)
    .bind(form.text("mobile"))
    .bind(form.text("dob"))
    .bind(form.text("gender"))
    .bind(form.text("address"))
    .bind(form.text("city"))
    .bind(form.text("state"))
    .bind(form.text("education"))
    .bind(form.text("experience"))
    .bind(form.text("skills"))
    .bind(email)
    .bind(&password_hash)
    .bind(stored.as_ref().map(|s| s.filename.as_str()))
    .execute(&state.db)
    .await;

    if let Err(err) = result {
        if let Some(stored) = &stored {
            state.intake.remove(stored).await;
        }
        return Err(err.into());
    }

    info!(email, "user registered");
    Ok("User registered successfully")
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub user: UserProfile,
}

/// POST /login
///
/// Looks up the first row for the email (lowest id wins over the
/// non-unique key) and verifies the password against its stored hash.
/// Unknown email and wrong password are indistinguishable to the caller.
pub async fn handle_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let row: Option<UserRow> = sqlx::query_as(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE email = $1 ORDER BY id LIMIT 1"
    ))
    .bind(&req.email)
    .fetch_optional(&state.db)
    .await?;

    let row = row.ok_or(AppError::InvalidCredentials)?;

    if !state.credentials.verify(&req.password, &row.password_hash)? {
        return Err(AppError::InvalidCredentials);
    }

    info!(user_id = row.id, "login successful");
    Ok(Json(LoginResponse {
        success: true,
        message: "Login successful".to_string(),
        user: row.into(),
    }))
}

/// GET /user/:email
///
/// Fixed projection of the profile columns, password hash excluded.
/// With duplicate emails the lowest id is returned, silently.
pub async fn handle_profile(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<UserProfile>, AppError> {
    let profile: Option<UserProfile> = sqlx::query_as(&format!(
        "SELECT {PROFILE_COLUMNS} FROM users WHERE email = $1 ORDER BY id LIMIT 1"
    ))
    .bind(&email)
    .fetch_optional(&state.db)
    .await?;

    profile
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("No user with email {email}")))
}
