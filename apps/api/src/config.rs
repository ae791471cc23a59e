use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// `DATABASE_URL` is required; everything else has a sensible default.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub upload_dir: String,
    pub allowed_origins: Vec<String>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            upload_dir: std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string()),
            allowed_origins: parse_origin_list(
                &std::env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| "*".to_string()),
            ),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Splits a comma-separated origin list, dropping empty entries.
pub fn parse_origin_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_commas_and_trims() {
        let origins = parse_origin_list("http://localhost:3000, https://jobcloud.example.com");
        assert_eq!(
            origins,
            vec!["http://localhost:3000", "https://jobcloud.example.com"]
        );
    }

    #[test]
    fn wildcard_passes_through() {
        assert_eq!(parse_origin_list("*"), vec!["*"]);
    }

    #[test]
    fn empty_entries_are_dropped() {
        assert_eq!(parse_origin_list("http://a.test,,  ,"), vec!["http://a.test"]);
    }
}
