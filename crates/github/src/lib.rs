//! GitHub infrastructure adapter.
//!
//! Implements the [`triage::IssueWriter`] trait against the GitHub REST API
//! using a bearer token.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** This crate must not contain domain rules. URL layout,
//! headers, and authentication are handled here; the [`triage`] crate never
//! sees them.

pub mod client;

pub use client::{GithubClient, GITHUB_API_URL, USER_AGENT};
