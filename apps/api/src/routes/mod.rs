pub mod health;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::accounts::handlers as accounts;
use crate::applications::handlers as applications;
use crate::jobs::handlers as jobs;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    // Uploaded documents are served read-only; anyone holding a generated
    // filename can fetch it.
    let uploads = ServeDir::new(&state.config.upload_dir);

    Router::new()
        .route("/", get(health::liveness_handler))
        .route("/signup", post(accounts::handle_signup))
        .route("/login", post(accounts::handle_login))
        .route("/user/:email", get(accounts::handle_profile))
        .route(
            "/submit-application",
            post(applications::handle_submit_application),
        )
        .route("/add-job", post(jobs::handle_add_job))
        .route("/jobs", get(jobs::handle_list_jobs))
        .nest_service("/uploads", uploads)
        .with_state(state)
}
