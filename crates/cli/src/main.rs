//! Triage relay entry point.
//!
//! This binary is the composition root for the entire system. Responsibilities:
//!
//! 1. **Parse configuration**: command-line flags with environment fallbacks,
//!    validated into a [`triage::RelayConfig`].
//! 2. **Wire observability**: see [`telemetry`].
//! 3. **Construct infrastructure**: an `AnthropicProvider` when an API key is
//!    configured and a `GithubClient` when a token is configured, both sharing
//!    one HTTP client.
//! 4. **Serve**: bind the webhook listener and run until shutdown.

mod config;
mod telemetry;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};

use github::GithubClient;
use listener::AppState;
use llm::AnthropicProvider;
use triage::{IssueWriter, TextGenerator};

use crate::config::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _telemetry = telemetry::init(cli.log_format)?;

    let config = cli.relay_config().context("invalid configuration")?;
    let http = reqwest::Client::builder()
        .build()
        .context("failed to build HTTP client")?;

    let generator: Option<Arc<dyn TextGenerator>> = match &config.text_generation_key {
        Some(key) => Some(Arc::new(
            AnthropicProvider::new(key.clone())
                .with_base_url(cli.anthropic_base_url.as_str())
                .with_client(http.clone()),
        )),
        None => {
            warn!("ANTHROPIC_API_KEY not set; AI analysis disabled");
            None
        }
    };

    let writer: Option<Arc<dyn IssueWriter>> = match &config.github_token {
        Some(token) => Some(Arc::new(
            GithubClient::new(token.clone())
                .with_api_base(cli.github_api_url.as_str())
                .with_client(http),
        )),
        None => {
            warn!("GITHUB_TOKEN not set; issue updates disabled");
            None
        }
    };

    let summary = config.summary();
    info!(
        platform = %config.platform,
        ai_enabled = summary.ai_enabled,
        github_integration = summary.github_integration,
        target_repo = %summary.target_repo,
        signature_verification = config.webhook_secret.is_some(),
        "Starting triage relay"
    );

    let state = AppState::new(config, generator, writer);
    listener::run_server(state, cli.listen)
        .await
        .context("webhook listener failed")?;

    Ok(())
}
