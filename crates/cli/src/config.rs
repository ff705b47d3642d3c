//! Command-line and environment configuration.

use std::net::SocketAddr;

use clap::{Parser, ValueEnum};

use triage::{ConfigError, RelayConfig, DEFAULT_PLATFORM};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// One JSON object per event.
    Json,
    /// Human-readable multi-field lines.
    Pretty,
}

/// GitHub issue triage webhook relay.
///
/// Every option can also be supplied through the environment variable shown
/// in `--help`. Credentials that are absent disable the matching capability
/// instead of preventing startup.
#[derive(Parser)]
#[command(name = "triage-relay", version, about)]
pub struct Cli {
    /// Address to bind the webhook listener to.
    #[arg(long, env = "TRIAGE_LISTEN_ADDR", default_value = "0.0.0.0:8000")]
    pub listen: SocketAddr,

    /// Anthropic API key. Without it every issue receives the fallback
    /// classification.
    #[arg(long, env = "ANTHROPIC_API_KEY", hide_env_values = true)]
    pub anthropic_api_key: Option<String>,

    /// GitHub token used for label and comment writes. Without it no writes
    /// are made.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Repository the relay is deployed for, reported by `/api/status`.
    #[arg(long, env = "GITHUB_REPO")]
    pub github_repo: Option<String>,

    /// Shared secret for `X-Hub-Signature-256` verification.
    #[arg(long, env = "GITHUB_WEBHOOK_SECRET", hide_env_values = true)]
    pub webhook_secret: Option<String>,

    /// Platform name reported by the status endpoints.
    #[arg(long, env = "TRIAGE_PLATFORM", default_value = DEFAULT_PLATFORM)]
    pub platform: String,

    /// Anthropic API base URL.
    #[arg(long, env = "ANTHROPIC_BASE_URL", default_value = llm::ANTHROPIC_API_URL)]
    pub anthropic_base_url: String,

    /// GitHub REST API base URL.
    #[arg(long, env = "GITHUB_API_URL", default_value = github::GITHUB_API_URL)]
    pub github_api_url: String,

    /// Log output format.
    #[arg(long, env = "TRIAGE_LOG_FORMAT", value_enum, default_value_t = LogFormat::Json)]
    pub log_format: LogFormat,
}

impl Cli {
    /// Converts the parsed arguments into the relay configuration.
    ///
    /// # Errors
    ///
    /// See [`RelayConfig::from_raw`].
    pub fn relay_config(&self) -> Result<RelayConfig, ConfigError> {
        RelayConfig::from_raw(
            self.anthropic_api_key.clone(),
            self.github_token.clone(),
            self.github_repo.clone(),
            self.webhook_secret.clone(),
            self.platform.clone(),
        )
    }
}
