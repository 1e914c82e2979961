//! CloudCoreo Core Library
//!
//! Shared types, validation, and configuration for the CloudCoreo CLI.
//! The `coreoctl` crate builds its commands on top of these.

pub mod api;
pub mod config;
pub mod content;
pub mod error;
pub mod types;
pub mod validation;

// Re-export commonly used types
pub use config::{default_config_path, mask_secret, Credentials, ProfileStore};
pub use error::*;
pub use types::*;
