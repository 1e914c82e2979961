//! AWS IAM adapter

use anyhow::Result;
use async_trait::async_trait;
use aws_config::meta::region::RegionProviderChain;
use aws_config::profile::profile_file::{ProfileFileKind, ProfileFiles};
use aws_config::BehaviorVersion;
use aws_sdk_iam::error::DisplayErrorContext;
use aws_sdk_iam::Client as IamClient;
use coreo_core::api::RoleCreationInfo;
use std::path::Path;
use tracing::{debug, info, warn};

use super::{CloudError, CloudProvider, ProvisionedRole};

/// Region used when none is configured; IAM itself is global.
const FALLBACK_REGION: &str = "us-east-1";

/// Role management through the AWS IAM API
pub struct AwsIamProvider {
    client: IamClient,
}

impl std::fmt::Debug for AwsIamProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsIamProvider").finish_non_exhaustive()
    }
}

impl AwsIamProvider {
    /// Load AWS credentials from the standard chain.
    ///
    /// # Arguments
    ///
    /// * `profile` - Named AWS profile to use instead of the default one
    /// * `credentials_path` - Shared credentials file to read instead of `~/.aws/credentials`
    pub async fn from_profile(profile: Option<&str>, credentials_path: Option<&Path>) -> Self {
        let region = RegionProviderChain::default_provider().or_else(FALLBACK_REGION);
        let mut loader = aws_config::defaults(BehaviorVersion::latest()).region(region);

        if let Some(profile) = profile {
            loader = loader.profile_name(profile);
        }
        if let Some(path) = credentials_path {
            loader = loader.profile_files(
                ProfileFiles::builder()
                    .include_default_config_file(true)
                    .with_file(ProfileFileKind::Credentials, path)
                    .build(),
            );
        }

        let config = loader.load().await;
        Self::from_client(IamClient::new(&config))
    }

    /// Wrap an existing IAM client
    pub fn from_client(client: IamClient) -> Self {
        Self { client }
    }

    async fn attach_policy(&self, role_name: &str, policy_arn: &str) -> Result<()> {
        self.client
            .attach_role_policy()
            .role_name(role_name)
            .policy_arn(policy_arn)
            .send()
            .await
            .map_err(|e| provider_error("AttachRolePolicy", role_name, e))?;
        Ok(())
    }

    async fn detach_all_policies(&self, role_name: &str) -> Result<()> {
        let attached = self
            .client
            .list_attached_role_policies()
            .role_name(role_name)
            .send()
            .await
            .map_err(|e| provider_error("ListAttachedRolePolicies", role_name, e))?;

        for policy_arn in attached
            .attached_policies()
            .iter()
            .filter_map(|policy| policy.policy_arn())
        {
            debug!(role_name, policy_arn, "Detaching policy");
            self.client
                .detach_role_policy()
                .role_name(role_name)
                .policy_arn(policy_arn)
                .send()
                .await
                .map_err(|e| provider_error("DetachRolePolicy", role_name, e))?;
        }

        Ok(())
    }
}

fn provider_error<E>(operation: &'static str, role_name: &str, err: E) -> anyhow::Error
where
    E: std::error::Error,
{
    CloudError::Provider {
        operation,
        role_name: role_name.to_string(),
        message: DisplayErrorContext(&err).to_string(),
    }
    .into()
}

/// Trust policy letting the platform account assume the role with the external ID.
pub fn trust_policy(info: &RoleCreationInfo) -> serde_json::Value {
    serde_json::json!({
        "Version": "2012-10-17",
        "Statement": [{
            "Effect": "Allow",
            "Principal": {
                "AWS": format!("arn:aws:iam::{}:root", info.aws_account)
            },
            "Action": "sts:AssumeRole",
            "Condition": {
                "StringEquals": {
                    "sts:ExternalId": info.external_id
                }
            }
        }]
    })
}

#[async_trait]
impl CloudProvider for AwsIamProvider {
    async fn create_role(&self, info: &RoleCreationInfo) -> Result<ProvisionedRole> {
        let role_name = info.role_name.as_str();
        info!(role_name, "Creating IAM role");

        let output = self
            .client
            .create_role()
            .role_name(role_name)
            .assume_role_policy_document(trust_policy(info).to_string())
            .description("Role assumed by CloudCoreo to audit this account")
            .send()
            .await
            .map_err(|e| provider_error("CreateRole", role_name, e))?;

        let role_arn = output
            .role()
            .map(|role| role.arn().to_string())
            .ok_or_else(|| CloudError::MissingRoleArn(role_name.to_string()))?;

        if let Err(e) = self.attach_policy(role_name, &info.policy).await {
            // A role without its policy is useless to the platform
            if let Err(cleanup) = self.delete_role(role_name).await {
                warn!(role_name, error = %cleanup, "Failed to remove role after policy attach error");
            }
            return Err(e);
        }

        Ok(ProvisionedRole {
            role_arn,
            external_id: info.external_id.clone(),
        })
    }

    async fn delete_role(&self, role_name: &str) -> Result<()> {
        info!(role_name, "Deleting IAM role");

        self.detach_all_policies(role_name).await?;
        self.client
            .delete_role()
            .role_name(role_name)
            .send()
            .await
            .map_err(|e| provider_error("DeleteRole", role_name, e))?;

        Ok(())
    }

    async fn role_exists(&self, role_name: &str) -> Result<bool> {
        match self.client.get_role().role_name(role_name).send().await {
            Ok(_) => Ok(true),
            Err(err) => {
                let service_err = err.into_service_error();
                if service_err.is_no_such_entity_exception() {
                    Ok(false)
                } else {
                    Err(provider_error("GetRole", role_name, service_err))
                }
            }
        }
    }
}
