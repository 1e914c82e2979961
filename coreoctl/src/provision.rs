//! Cloud-account registration with optional role provisioning
//!
//! When a role name is given, the role is created on the provider before the
//! account is registered, and removed again if registration fails.

use anyhow::Result;
use coreo_core::api::{CloudAccount, CloudAccountCreateRequest};
use coreo_core::content;
use std::io::Write;
use tracing::{info, warn};

use crate::client::CoreoApi;
use crate::cloud::{wait_for_role, CloudProvider, ReadinessPolicy};

/// Registers cloud accounts, provisioning roles on demand
pub struct AccountProvisioner<'a> {
    api: &'a dyn CoreoApi,
    cloud: &'a dyn CloudProvider,
    readiness: ReadinessPolicy,
}

impl<'a> AccountProvisioner<'a> {
    pub fn new(api: &'a dyn CoreoApi, cloud: &'a dyn CloudProvider) -> Self {
        Self {
            api,
            cloud,
            readiness: ReadinessPolicy::default(),
        }
    }

    /// Override how long to wait for a new role to become visible.
    pub fn with_readiness(mut self, readiness: ReadinessPolicy) -> Self {
        self.readiness = readiness;
        self
    }

    /// Register `request` under `team_id`.
    ///
    /// Sequence when `request.role_name` is set:
    /// 1. fetch role creation info from the API
    /// 2. create the role on the provider under the name the API assigned
    ///    (errors abort, nothing registered)
    /// 3. wait for the role to become visible
    /// 4. register the account with the new role ARN and external ID
    /// 5. on registration failure, delete the role; a failed delete is
    ///    logged and the registration error is returned
    pub async fn create_cloud_account(
        &self,
        team_id: &str,
        mut request: CloudAccountCreateRequest,
        out: &mut dyn Write,
    ) -> Result<CloudAccount> {
        let created_role = if request.role_name.is_some() {
            let role_info = self.api.get_role_creation_info(team_id, &request).await?;
            let role = self.cloud.create_role(&role_info).await?;
            let role_name = role_info.role_name;
            info!(role_name = %role_name, role_arn = %role.role_arn, "Provisioned role");

            if !wait_for_role(self.cloud, &role_name, self.readiness).await {
                warn!(role_name = %role_name, "Role not visible yet, registering anyway");
            }

            request.role_arn = Some(role.role_arn);
            request.external_id = Some(role.external_id);
            Some(role_name)
        } else {
            None
        };

        match self.api.create_cloud_account(team_id, &request).await {
            Ok(account) => Ok(account),
            Err(err) => {
                if let Some(role_name) = created_role {
                    if let Err(e) = writeln!(out, "{}", content::INFO_ROLLBACK_ROLE) {
                        warn!(error = %e, "Failed to write rollback notice");
                    }
                    if let Err(rollback_err) = self.cloud.delete_role(&role_name).await {
                        warn!(
                            role_name = %role_name,
                            error = %rollback_err,
                            "Failed to delete role after registration failure"
                        );
                    }
                }
                Err(err)
            }
        }
    }
}
