//! Flag validation for CLI commands
//!
//! Every check here runs before any network call. Failures carry the message
//! shown to the operator.

use crate::api::CloudAccountCreateRequest;
use crate::content;
use crate::error::{CoreoError, Result};
use crate::types::{parse_tags, Environment, Provider};

/// Fail with `message` when `value` is empty.
pub fn check_required(value: &str, message: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CoreoError::MissingFlag(message.to_string()));
    }
    Ok(())
}

/// Validate the AWS-specific flags of `cloud create`.
///
/// Either a role name, or both a role ARN and external ID, must be given.
pub fn check_aws_flags(
    external_id: &str,
    role_arn: &str,
    role_name: &str,
    environment: &str,
) -> Result<Option<Environment>> {
    if (external_id.is_empty() || role_arn.is_empty()) && role_name.is_empty() {
        return Err(CoreoError::MissingFlag(
            content::ERROR_ROLE_OR_ARN_REQUIRED.to_string(),
        ));
    }
    Environment::parse_optional(environment)
}

/// Validate the Azure-specific flags of `cloud create`.
pub fn check_azure_flags(
    key_value: &str,
    application_id: &str,
    directory_id: &str,
    subscription_id: &str,
    environment: &str,
) -> Result<Option<Environment>> {
    if [key_value, application_id, directory_id, subscription_id]
        .iter()
        .any(|field| field.is_empty())
    {
        return Err(CoreoError::MissingFlag(
            content::ERROR_AZURE_FIELDS_REQUIRED.to_string(),
        ));
    }
    Environment::parse_optional(environment)
}

/// Raw `cloud create` flags, as typed by the operator
#[derive(Debug, Clone, Default)]
pub struct CloudCreateInput {
    pub name: String,
    pub provider: String,
    pub environment: String,
    pub role_name: String,
    pub role_arn: String,
    pub external_id: String,
    pub policy: String,
    pub is_draft: bool,
    pub email: String,
    pub user_name: String,
    pub tags: String,
    pub key_value: String,
    pub application_id: String,
    pub directory_id: String,
    pub subscription_id: String,
}

impl CloudCreateInput {
    /// Check the flags and build the API request.
    pub fn validate(self) -> Result<CloudAccountCreateRequest> {
        let provider: Provider = self.provider.parse()?;

        let environment = match provider {
            Provider::Aws => check_aws_flags(
                &self.external_id,
                &self.role_arn,
                &self.role_name,
                &self.environment,
            )?,
            Provider::Azure => check_azure_flags(
                &self.key_value,
                &self.application_id,
                &self.directory_id,
                &self.subscription_id,
                &self.environment,
            )?,
        };

        Ok(CloudAccountCreateRequest {
            name: self.name,
            provider,
            environment,
            // Role provisioning only exists for AWS
            role_name: match provider {
                Provider::Aws => non_empty(self.role_name),
                Provider::Azure => None,
            },
            role_arn: non_empty(self.role_arn),
            external_id: non_empty(self.external_id),
            policy: self.policy,
            is_draft: self.is_draft,
            email: non_empty(self.email),
            user_name: non_empty(self.user_name),
            tags: parse_tags(&self.tags),
            key_value: non_empty(self.key_value),
            application_id: non_empty(self.application_id),
            directory_id: non_empty(self.directory_id),
            subscription_id: non_empty(self.subscription_id),
        })
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
