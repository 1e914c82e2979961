//! Static text shown by the CLI
//!
//! Error and status messages live here so commands and tests agree on the
//! exact wording. Scaffold templates are in [`templates`].

pub mod templates;

// Config keys stored under each profile
pub const ACCESS_KEY: &str = "accesskey";
pub const SECRET_KEY: &str = "secretkey";
pub const TEAM_ID: &str = "teamid";

// Validation errors
pub const ERROR_CLOUD_ID_REQUIRED: &str = "Cloud account ID is required, use --cloud-id";
pub const ERROR_TOKEN_ID_REQUIRED: &str = "Token ID is required, use --token-id";
pub const ERROR_GITKEY_ID_REQUIRED: &str = "Git key ID is required, use --gitkey-id";
pub const ERROR_TEAM_ID_REQUIRED: &str = "Team ID is required, use --team-id";
pub const ERROR_TEAM_NAME_REQUIRED: &str = "Team name is required, use --name";
pub const ERROR_TEAM_DESCRIPTION_REQUIRED: &str =
    "Team description is required, use --description";
pub const ERROR_ROLE_OR_ARN_REQUIRED: &str =
    "Please either provide both externalID and roleArn or the name of the new role";
pub const ERROR_AZURE_FIELDS_REQUIRED: &str = "Please provide all the required info: Key Value, Application ID, Directory ID and Subscription ID";

// Credential errors
pub const ERROR_API_KEY_MISSING: &str = "API key is missing, please run `coreo configure`";
pub const ERROR_TEAM_ID_MISSING: &str = "Team ID is missing, please run `coreo configure`";

// Status messages
pub const INFO_USING_CLOUD_ACCOUNT: &str = "Using cloud account";
pub const INFO_USING_TOKEN: &str = "Using token";
pub const INFO_USING_GITKEY: &str = "Using git key";
pub const INFO_TEAMS_DEPRECATED: &str = "Teams are deprecated, only csp token is required";
pub const INFO_TOKENS_DEPRECATED: &str = "Tokens are deprecated, only csp token is required";
pub const INFO_TOKEN_DELETED: &str = "Token was deleted";
pub const INFO_GITKEY_DELETED: &str = "Git key was deleted";
pub const INFO_CLOUD_DELETED: &str = "Cloud account was deleted";
pub const INFO_ROLLBACK_ROLE: &str = "Cloud account creation failed! Will delete created role.";
pub const INFO_CONFIG_SAVE_FAILED: &str = "Unable to save config";
pub const INFO_CONFIG_SAVED: &str = "Configuration saved";
pub const INFO_COMPOSITE_INIT_SUCCESS: &str =
    "Initialization completed, default files were generated";

// Configure prompts
pub const PROMPT_API_KEY: &str = "Enter CloudCoreo API key";
pub const PROMPT_SECRET_KEY: &str = "Enter CloudCoreo secret key";
pub const PROMPT_TEAM_ID: &str = "Enter CloudCoreo team ID";

/// Build a prompt line showing the previous value as the default hint.
pub fn prompt_with_default(prompt: &str, previous: &str) -> String {
    let shown = if previous.is_empty() { "None" } else { previous };
    format!("{} [{}]", prompt, shown)
}
