//! Text-generation provider adapter.
//!
//! Implements the [`triage::TextGenerator`] trait for Anthropic's Messages API.
//! Additional providers are added as new modules in this crate without any
//! changes to the `triage` crate.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** HTTP transport, request formatting, and response
//! envelope parsing live here. The [`triage`] crate sees only
//! [`triage::TextGenerator`] and the text of the first content block.

pub mod anthropic;

pub use anthropic::{
    AnthropicProvider, ANTHROPIC_API_URL, ANTHROPIC_VERSION, DEFAULT_MAX_TOKENS, DEFAULT_MODEL,
};
