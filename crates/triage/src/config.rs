//! Process-wide relay configuration.
//!
//! [`RelayConfig`] is built once at startup by the composition root and then
//! shared read-only behind an `Arc`. A missing credential never prevents the
//! process from starting; it disables the matching capability and shows up in
//! [`ConfigurationSummary`].

use serde::Serialize;

use crate::ConfigError;

/// Platform name reported when none is configured.
pub const DEFAULT_PLATFORM: &str = "Standalone (axum)";

/// Sentinel reported by the status endpoint when no target repository is set.
pub const NOT_CONFIGURED: &str = "not configured";

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

/// An API credential or shared secret.
///
/// `Debug` and `Display` are redacted so credentials never reach log output.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiCredential(String);

impl ApiCredential {
    /// Wraps a credential, returning `None` for empty or whitespace-only input
    /// (an exported-but-empty environment variable counts as absent).
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let v = value.into();
        if v.trim().is_empty() {
            None
        } else {
            Some(Self(v))
        }
    }

    /// Returns the raw secret. Only call this when building an outbound request.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiCredential(<redacted>)")
    }
}

impl std::fmt::Display for ApiCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("<redacted>")
    }
}

// ---------------------------------------------------------------------------
// Relay configuration
// ---------------------------------------------------------------------------

/// Immutable configuration shared by every request handler.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Credential for the text-generation provider. `None` disables AI analysis.
    pub text_generation_key: Option<ApiCredential>,

    /// Credential for the GitHub REST API. `None` disables issue writes.
    pub github_token: Option<ApiCredential>,

    /// Repository the relay is deployed for, as configured. Reported by
    /// `/api/status` only; deliveries from any repository are processed.
    pub target_repository: Option<String>,

    /// Shared secret for `X-Hub-Signature-256` verification. `None` skips
    /// verification.
    pub webhook_secret: Option<ApiCredential>,

    /// Human-readable name of the hosting platform, echoed by the status
    /// endpoints.
    pub platform: String,
}

impl RelayConfig {
    /// Builds a configuration from raw optional values as read from the
    /// command line or environment.
    ///
    /// Empty strings are treated as absent.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyPlatform`] if `platform` is blank.
    pub fn from_raw(
        text_generation_key: Option<String>,
        github_token: Option<String>,
        target_repository: Option<String>,
        webhook_secret: Option<String>,
        platform: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let target_repository = target_repository
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        let platform = platform.into();
        if platform.trim().is_empty() {
            return Err(ConfigError::EmptyPlatform);
        }

        Ok(Self {
            text_generation_key: text_generation_key.and_then(ApiCredential::new),
            github_token: github_token.and_then(ApiCredential::new),
            target_repository,
            webhook_secret: webhook_secret.and_then(ApiCredential::new),
            platform,
        })
    }

    /// Returns `true` if a text-generation credential is configured.
    pub fn ai_enabled(&self) -> bool {
        self.text_generation_key.is_some()
    }

    /// Returns `true` if a GitHub credential is configured.
    pub fn github_integration(&self) -> bool {
        self.github_token.is_some()
    }

    /// Returns the presence/absence summary exposed by `/api/status`.
    pub fn summary(&self) -> ConfigurationSummary {
        ConfigurationSummary {
            github_integration: self.github_integration(),
            ai_enabled: self.ai_enabled(),
            target_repo: self
                .target_repository
                .as_ref()
                .cloned()
                .unwrap_or_else(|| NOT_CONFIGURED.to_string()),
        }
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            text_generation_key: None,
            github_token: None,
            target_repository: None,
            webhook_secret: None,
            platform: DEFAULT_PLATFORM.to_string(),
        }
    }
}

/// Configuration summary without any secret material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigurationSummary {
    /// Whether a GitHub credential is present.
    pub github_integration: bool,
    /// Whether a text-generation credential is present.
    pub ai_enabled: bool,
    /// Configured target repository, or [`NOT_CONFIGURED`].
    pub target_repo: String,
}
