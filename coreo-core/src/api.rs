//! API models for the CloudCoreo REST API
//!
//! Request and response bodies exchanged with the platform. None of these are
//! mutated locally beyond building requests.

use crate::types::{Environment, Provider};
use serde::{Deserialize, Serialize};

/// Generic API response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum ApiResponse<T> {
    #[serde(rename = "success")]
    Success { data: T },
    #[serde(rename = "error")]
    Error { error: String },
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn success(data: T) -> Self {
        Self::Success { data }
    }

    /// Create an error response
    pub fn error(error: String) -> Self {
        Self::Error { error }
    }
}

/// Request to register a cloud account with the platform
///
/// Build one through [`crate::validation::CloudCreateInput::validate`] so the
/// role and Azure field requirements are checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloudAccountCreateRequest {
    /// Display name of the account
    pub name: String,
    pub provider: Provider,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<Environment>,
    /// Name of a role to provision before registering
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_arn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    /// Managed policy attached to a provisioned role
    pub policy: String,
    #[serde(default)]
    pub is_draft: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_id: Option<String>,
}

impl CloudAccountCreateRequest {
    /// Whether a new role must be provisioned before registration
    pub fn needs_role(&self) -> bool {
        self.role_name.is_some()
    }
}

/// Metadata needed to provision a role the platform can assume
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleCreationInfo {
    pub role_name: String,
    /// Platform AWS account trusted by the role
    pub aws_account: String,
    /// Shared secret required when assuming the role
    pub external_id: String,
    /// Managed policy ARN to attach
    pub policy: String,
}

/// A registered cloud account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloudAccount {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub team_id: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub team_name: String,
    #[serde(default)]
    pub team_description: String,
}

/// Team creation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTeamRequest {
    pub team_name: String,
    pub team_description: String,
}

/// An API token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// A git key used to pull composite repositories
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GitKey {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub team_id: String,
}
