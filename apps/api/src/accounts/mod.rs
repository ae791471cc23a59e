// Accounts: signup, login, and profile fetch.
// Password handling goes through the CredentialVerifier capability — no
// handler touches hashes directly.

pub mod credentials;
pub mod handlers;
