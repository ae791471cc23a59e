use std::sync::Arc;

use sqlx::PgPool;

use crate::accounts::credentials::CredentialVerifier;
use crate::config::Config;
use crate::intake::FileIntake;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    /// Writes validated uploads under the configured directory.
    pub intake: Arc<FileIntake>,
    /// Pluggable password hashing/verification. Default: Argon2Credentials.
    pub credentials: Arc<dyn CredentialVerifier>,
}
