//! Cloud-provider role management
//!
//! Registering an AWS account by role name means provisioning an IAM role the
//! platform can assume. [`CloudProvider`] is the seam between the
//! provisioning flow and the provider's own API.

pub mod aws;

use anyhow::Result;
use async_trait::async_trait;
use coreo_core::api::RoleCreationInfo;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

pub use aws::AwsIamProvider;

/// Errors raised by a cloud provider adapter
#[derive(Error, Debug)]
pub enum CloudError {
    /// The provider accepted the role but returned no ARN
    #[error("Role {0} was created but the provider returned no ARN")]
    MissingRoleArn(String),

    /// Any call to the provider's API failed
    #[error("Cloud provider call {operation} failed for role {role_name}: {message}")]
    Provider {
        operation: &'static str,
        role_name: String,
        message: String,
    },
}

/// Role provisioned for the platform to assume
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionedRole {
    pub role_arn: String,
    pub external_id: String,
}

/// Role management on the cloud provider hosting an account
#[async_trait]
pub trait CloudProvider: Send + Sync {
    /// Create a role trusting the platform account described by `info`.
    async fn create_role(&self, info: &RoleCreationInfo) -> Result<ProvisionedRole>;

    /// Delete a role and detach its managed policies.
    async fn delete_role(&self, role_name: &str) -> Result<()>;

    /// Whether the role is visible to the provider's API yet.
    async fn role_exists(&self, role_name: &str) -> Result<bool>;
}

/// How long to wait for a freshly created role to become visible
///
/// Polls [`CloudProvider::role_exists`] up to `max_attempts` times, sleeping
/// `delay * attempt` between polls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadinessPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for ReadinessPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 8,
            delay: Duration::from_millis(500),
        }
    }
}

/// Wait until `role_name` exists, returning whether it was seen in time.
///
/// Lookup errors count as "not yet"; the caller decides what a timeout means.
pub async fn wait_for_role(
    provider: &dyn CloudProvider,
    role_name: &str,
    policy: ReadinessPolicy,
) -> bool {
    for attempt in 0..policy.max_attempts {
        match provider.role_exists(role_name).await {
            Ok(true) => {
                debug!(role_name, attempt, "Role is visible");
                return true;
            }
            Ok(false) => debug!(role_name, attempt, "Role not visible yet"),
            Err(e) => debug!(role_name, attempt, error = %e, "Role lookup failed"),
        }

        if attempt + 1 < policy.max_attempts {
            tokio::time::sleep(policy.delay * (attempt + 1)).await;
        }
    }

    false
}
