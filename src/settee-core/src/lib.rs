//! Settee Core Library
//!
//! Transport-free building blocks for talking to a CouchDB-style server:
//! - URL construction for every resource kind
//! - Response classification into success/error results
//! - JSON payload helpers for the writer
//! - Connection model and configuration

pub mod classify;
pub mod config;
pub mod models;
pub mod payload;
pub mod urls;

// Re-export commonly used types
pub use classify::{attachment_exists, classify, classify_delete};
pub use config::Config;
pub use models::*;
pub use payload::PayloadError;
