//! Core types shared by the API models and the CLI

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreoError;

/// Name of the profile used when none is given
pub const DEFAULT_PROFILE: &str = "default";

/// Default managed policy attached to newly provisioned AWS roles
pub const DEFAULT_AWS_POLICY: &str = "arn:aws:iam::aws:policy/SecurityAudit";

/// Cloud provider hosting a registered account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Provider {
    #[serde(rename = "AWS")]
    Aws,
    #[serde(rename = "Azure")]
    Azure,
}

impl Provider {
    /// Wire and flag spelling of the provider
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Aws => "AWS",
            Provider::Azure => "Azure",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = CoreoError;

    /// Matching is case-sensitive: only `AWS` and `Azure` are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AWS" => Ok(Provider::Aws),
            "Azure" => Ok(Provider::Azure),
            other => Err(CoreoError::ProviderNotSupported(other.to_string())),
        }
    }
}

/// Deployment environment a cloud account belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Production,
    Staging,
    Development,
    Test,
}

impl Environment {
    /// All accepted environments, in display order
    pub const ALL: [Environment; 4] = [
        Environment::Production,
        Environment::Staging,
        Environment::Development,
        Environment::Test,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Production => "Production",
            Environment::Staging => "Staging",
            Environment::Development => "Development",
            Environment::Test => "Test",
        }
    }

    /// Parse an optional environment flag.
    ///
    /// An empty string means the environment is unset.
    pub fn parse_optional(s: &str) -> Result<Option<Self>, CoreoError> {
        if s.is_empty() {
            return Ok(None);
        }
        s.parse().map(Some)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = CoreoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Environment::ALL
            .iter()
            .copied()
            .find(|env| env.as_str() == s)
            .ok_or_else(|| CoreoError::InvalidEnvironment(s.to_string()))
    }
}

/// Split a comma-separated tag list, dropping blank entries.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(String::from)
        .collect()
}
