use axum::extract::{Multipart, State};
use tracing::info;

use crate::errors::AppError;
use crate::intake::collect_form;
use crate::state::AppState;

/// POST /submit-application
///
/// No required fields: absent values insert as NULL, and nothing ties the
/// submission to a jobs or users row. The résumé reference stored here is
/// the relative path, not the bare filename.
pub async fn handle_submit_application(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<&'static str, AppError> {
    let form = collect_form(multipart).await?;

    let stored = match &form.resume {
        Some(pending) => Some(state.intake.store(pending).await?),
        None => None,
    };

    let result = sqlx::query(
        r#"
        INSERT INTO applications (fullname, email, phone, cover_letter, resume_path)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(form.text("fullname"))
    .bind(form.text("email"))
    .bind(form.text("phone"))
    .bind(form.text("cover_letter"))
    .bind(stored.as_ref().map(|s| s.relative_path.as_str()))
    .execute(&state.db)
    .await;

    if let Err(err) = result {
        if let Some(stored) = &stored {
            state.intake.remove(stored).await;
        }
        return Err(err.into());
    }

    info!("application submitted");
    Ok("Application submitted successfully")
}
