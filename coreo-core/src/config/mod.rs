//! Configuration types for the CloudCoreo CLI
//!
//! # Architecture
//!
//! Credentials are kept per named profile in a TOML file, one table per
//! profile, addressed with dotted keys such as `default.accesskey`
//! (see [`ProfileStore`]). CLI display settings live in a separate file
//! owned by `coreoctl`.

mod paths;
mod profiles;

pub use paths::{default_config_path, default_settings_path};
pub use profiles::{mask_secret, profile_key, Credentials, ProfileStore};
