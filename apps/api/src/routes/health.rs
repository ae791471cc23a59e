/// GET /
/// Plain-text liveness check; touches no backing service.
pub async fn liveness_handler() -> &'static str {
    "Backend is running successfully"
}
