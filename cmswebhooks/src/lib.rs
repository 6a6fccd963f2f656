//! # cmswebhooks: signed webhook notifications from a content-management platform
//!
//! The platform POSTs a JSON body holding a batch of change notifications
//! (assets, content items, content types, languages, taxonomies) together with
//! an HMAC-SHA256 signature of that body. This crate checks the signature and
//! turns the body into typed values.
//!
//! ## Overview
//!
//! - [`canonical`] normalizes line breaks before hashing
//! - [`signing`] computes and verifies signatures
//! - [`models`] defines the typed notifications
//! - [`parse`] classifies decoded JSON into those types
//! - [`service`] ties verification and parsing together
//!
//! A notification that doesn't match any known shape is kept as
//! [`models::WebhookNotification::Unknown`] with its original JSON, so a
//! batch is never rejected because of one unfamiliar event.
//!
//! ## Usage
//!
//! ```
//! use cmswebhooks::{WebhookVerifier, models::WebhookNotification};
//!
//! let verifier = WebhookVerifier::new("hx3snVrI9E2Lgpi1LaL+WfiPWCh88OjI7Bv/3ihq+Qo=");
//! let body = r#"{"notifications": []}"#;
//! let signature = verifier.sign(body).unwrap();
//!
//! let response = verifier.parse(body, &signature).unwrap();
//! for notification in &response {
//!     if let WebhookNotification::ContentItem(item) = notification {
//!         println!("{} was {}", item.system().object.codename, item.message.action());
//!     }
//! }
//! ```
//!
//! The `cmswebhooks` binary wraps the same operations for the command line;
//! see [`config`] for how it is configured.

pub mod canonical;
pub mod config;
pub mod errors;
pub mod models;
pub mod parse;
pub mod secret;
pub mod service;
pub mod signing;
pub mod telemetry;

#[cfg(test)]
mod test_utils;

pub use errors::{Error, Result, ValidationError, ValidationIssue};
pub use models::{WebhookNotification, WebhookResponse};
pub use parse::{parse_webhook_response, parse_webhook_response_safe};
pub use secret::WebhookSecret;
pub use service::{WebhookVerifier, parse_signed_webhook_response};
pub use signing::{compute_digest, is_signature_valid, sign_payload};
