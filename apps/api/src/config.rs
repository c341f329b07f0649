use anyhow::{Context, Result};

pub const DEFAULT_RETELL_BASE_URL: &str = "https://api.retellai.com";

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// PEM-encoded public key used to verify Clerk session tokens.
    pub clerk_jwt_key: String,
    pub clerk_issuer: Option<String>,
    pub retell_api_key: String,
    pub retell_base_url: String,
    /// Agent used when a register-call request does not name one.
    pub retell_agent_id: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            clerk_jwt_key: require_env("CLERK_JWT_KEY")?.replace("\\n", "\n"),
            clerk_issuer: optional_env("CLERK_ISSUER"),
            retell_api_key: require_env("RETELL_API_KEY")?,
            retell_base_url: optional_env("RETELL_BASE_URL")
                .unwrap_or_else(|| DEFAULT_RETELL_BASE_URL.to_string()),
            retell_agent_id: optional_env("RETELL_AGENT_ID"),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Unset and blank are both treated as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
