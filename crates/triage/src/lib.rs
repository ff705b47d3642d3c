//! Core triage domain for the webhook relay.
//!
//! This crate contains every domain concept, newtype identifier, and error type
//! used to turn a GitHub issue into a [`Classification`] and write it back.
//! Infrastructure crates implement the port traits defined here; they never add
//! domain rules.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//! It defines *what* is needed ([`TextGenerator`], [`IssueWriter`]);
//! infrastructure crates define *how* to supply it.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`RepositoryId`, `IssueNumber`, `DeliveryId`) |
//! | [`types`] | Request-scoped values (`IssueSubject`, `Timestamp`) |
//! | [`classification`] | `Classification` and its open enums |
//! | [`config`] | Immutable process configuration |
//! | [`errors`] | Component error types |
//! | [`ports`] | `TextGenerator` and `IssueWriter` |
//! | [`prompt`] | Classification prompt |
//! | [`parser`] | Recovery of JSON from model output |
//! | [`classifier`] | `IssueClassifier` |
//! | [`annotator`] | `IssueAnnotator`, label and comment rendering |

pub mod annotator;
pub mod classification;
pub mod classifier;
pub mod config;
pub mod errors;
pub mod identifiers;
pub mod parser;
pub mod ports;
pub mod prompt;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use annotator::{labels_for, render_comment, IssueAnnotator, ATTRIBUTION};
pub use classification::{
    Category, Classification, Effort, Priority, Risk, Team, FALLBACK_SUMMARY,
};
pub use classifier::IssueClassifier;
pub use config::{
    ApiCredential, ConfigurationSummary, RelayConfig, DEFAULT_PLATFORM, NOT_CONFIGURED,
};
pub use errors::{AnnotatorError, ClassifierError, ConfigError, WriteOperation};
pub use identifiers::{DeliveryId, IssueNumber, RepositoryId};
pub use parser::{GreedyBraceParser, ResponseParser};
pub use ports::{IssueWriter, TextGenerator, WriteReceipt};
pub use prompt::build_classification_prompt;
pub use types::{IssueSubject, Timestamp};
