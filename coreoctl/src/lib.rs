//! CloudCoreo CLI Library
//!
//! This library provides the core functionality of the `coreo` command-line
//! tool.
//!
//! # Public API
//!
//! The primary public API is the [`client::CoreoClient`] which provides
//! programmatic access to the CloudCoreo platform, behind the
//! [`client::CoreoApi`] trait. Cloud-account registration with role
//! provisioning is available via [`provision::AccountProvisioner`].
//!
//! ```no_run
//! use coreoctl::client::{CoreoApi, CoreoClient};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = CoreoClient::new(
//!     "https://app.cloudcoreo.com/api".to_string(),
//!     "api-key".to_string(),
//!     "api-secret".to_string(),
//!     30, // timeout in seconds
//! )?;
//!
//! for account in client.list_cloud_accounts("team-id").await? {
//!     println!("{} {}", account.id, account.name);
//! }
//! # Ok(())
//! # }
//! ```

// Internal CLI implementation - not part of public API
#[doc(hidden)]
pub mod cli;

/// HTTP client for the CloudCoreo API.
pub mod client;

/// Cloud-provider role management.
pub mod cloud;

/// Settings types for the CLI tool.
pub mod config;

/// Per-invocation settings and credentials.
pub mod context;

// Internal formatting functions - not part of public API
#[doc(hidden)]
pub mod format;

/// Interactive prompting.
pub mod prompt;

/// Cloud-account registration flow.
pub mod provision;

/// Composite directory scaffolding.
pub mod scaffold;

#[cfg(test)]
pub mod test_utils;

#[cfg(test)]
mod test_support;
