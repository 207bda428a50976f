//! Process-environment configuration.
//!
//! Everything the server needs comes from env vars; the only required one
//! is the shared secret gating the v2 surface.

use anyhow::Context;

/// Runtime configuration resolved from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Shared secret expected in the `x-app-key` header on v2 routes.
    pub app_key: String,
    /// Full sqlite URL override; when absent the default data-dir
    /// location is used (see `parlance_infra::sqlite::pool`).
    pub database_url: Option<String>,
    /// Root of the Ollama-compatible model endpoint.
    pub model_url: String,
    /// Model identifier passed through to the runtime.
    pub model_name: String,
    /// Telegram bot token for onboarding notices; notifier runs disabled
    /// without it.
    pub telegram_token: Option<String>,
}

impl AppConfig {
    /// Resolve configuration from the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        let app_key = std::env::var("PARLANCE_APP_KEY")
            .context("PARLANCE_APP_KEY must be set (shared secret for the v2 API)")?;
        if app_key.is_empty() {
            anyhow::bail!("PARLANCE_APP_KEY must not be empty");
        }

        let port = match std::env::var("PARLANCE_PORT") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("invalid PARLANCE_PORT: '{raw}'"))?,
            Err(_) => 8081,
        };

        Ok(Self {
            host: env_or("PARLANCE_HOST", "127.0.0.1"),
            port,
            app_key,
            database_url: std::env::var("PARLANCE_DATABASE_URL").ok(),
            model_url: env_or("PARLANCE_MODEL_URL", "http://localhost:11434"),
            model_name: env_or("PARLANCE_MODEL", "llama3"),
            telegram_token: std::env::var("TELEGRAM_TOKEN").ok(),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
