//! Command execution handlers
//!
//! Handlers validate their flags before asking for an API client, so a
//! missing ID is reported even when no credentials are configured.

use anyhow::Result;
use clap::CommandFactory;
use coreo_core::api::CloudAccountCreateRequest;
use coreo_core::content;
use coreo_core::validation::check_required;
use coreo_core::{Credentials, ProfileStore};
use std::io::Write;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::client::CoreoApi;
use crate::cloud::{AwsIamProvider, CloudProvider};
use crate::context::{CommandContext, CredentialOverrides};
use crate::format::{self, format_success, OutputFormat};
use crate::prompt::Prompter;
use crate::provision::AccountProvisioner;
use crate::scaffold::{init_composite, ScaffoldMode};

use super::commands::*;

/// Builds the API client once a command knows it needs one
pub type Connector<'a> = &'a dyn Fn() -> Result<Arc<dyn CoreoApi>>;

/// Handle cloud commands
///
/// `cloud` replaces the AWS IAM adapter that `cloud create --role-name`
/// otherwise builds from `--aws-profile` and `--aws-profile-path`.
pub async fn handle_cloud(
    connect: Connector<'_>,
    cloud: Option<&dyn CloudProvider>,
    ctx: &CommandContext,
    command: CloudCommands,
    out: &mut dyn Write,
) -> Result<()> {
    match command {
        CloudCommands::Create(args) => {
            let request = args.to_input().validate()?;
            let team_id = ctx.team_id()?;
            let api = connect()?;

            let account = match cloud {
                Some(cloud) => create_account(api.as_ref(), cloud, team_id, request, out).await?,
                None if request.needs_role() => {
                    let aws = AwsIamProvider::from_profile(
                        args.aws_profile.as_deref(),
                        args.aws_profile_path.as_deref(),
                    )
                    .await;
                    create_account(api.as_ref(), &aws, team_id, request, out).await?
                }
                None => api.create_cloud_account(team_id, &request).await?,
            };

            writeln!(
                out,
                "{}",
                format::format_cloud_account_created(&account, &ctx.format)?
            )?;
        }
        CloudCommands::List => {
            let team_id = ctx.team_id()?;
            let accounts = connect()?.list_cloud_accounts(team_id).await?;
            writeln!(
                out,
                "{}",
                format::format_cloud_accounts(&accounts, &ctx.format)?
            )?;
        }
        CloudCommands::Show { cloud_id } => {
            check_required(&cloud_id, content::ERROR_CLOUD_ID_REQUIRED)?;
            let team_id = ctx.team_id()?;
            let api = connect()?;
            announce(ctx, out, content::INFO_USING_CLOUD_ACCOUNT, &cloud_id)?;

            let account = api.get_cloud_account(team_id, &cloud_id).await?;
            writeln!(out, "{}", format::format_cloud_account(&account, &ctx.format)?)?;
        }
        CloudCommands::Delete { cloud_id } => {
            check_required(&cloud_id, content::ERROR_CLOUD_ID_REQUIRED)?;
            let team_id = ctx.team_id()?;
            let api = connect()?;
            announce(ctx, out, content::INFO_USING_CLOUD_ACCOUNT, &cloud_id)?;

            api.delete_cloud_account(team_id, &cloud_id).await?;
            writeln!(out, "{}", format_success(content::INFO_CLOUD_DELETED))?;
        }
    }

    Ok(())
}

async fn create_account(
    api: &dyn CoreoApi,
    cloud: &dyn CloudProvider,
    team_id: &str,
    request: CloudAccountCreateRequest,
    out: &mut dyn Write,
) -> Result<coreo_core::api::CloudAccount> {
    AccountProvisioner::new(api, cloud)
        .create_cloud_account(team_id, request, out)
        .await
}

/// Handle team commands
pub async fn handle_team(
    connect: Connector<'_>,
    ctx: &CommandContext,
    command: TeamCommands,
    out: &mut dyn Write,
) -> Result<()> {
    match command {
        TeamCommands::List => {
            writeln!(out, "{}", content::INFO_TEAMS_DEPRECATED)?;
        }
        TeamCommands::Show => {
            check_required(&ctx.credentials.team_id, content::ERROR_TEAM_ID_REQUIRED)?;
            let team = connect()?.get_team(&ctx.credentials.team_id).await?;
            writeln!(out, "{}", format::format_team(&team, &ctx.format)?)?;
        }
        TeamCommands::Create { name, description } => {
            check_required(&name, content::ERROR_TEAM_NAME_REQUIRED)?;
            check_required(&description, content::ERROR_TEAM_DESCRIPTION_REQUIRED)?;
            let team = connect()?.create_team(&name, &description).await?;
            writeln!(out, "{}", format::format_team(&team, &ctx.format)?)?;
        }
    }

    Ok(())
}

/// Handle token commands
pub async fn handle_token(
    connect: Connector<'_>,
    ctx: &CommandContext,
    command: TokenCommands,
    out: &mut dyn Write,
) -> Result<()> {
    match command {
        TokenCommands::List => {
            writeln!(out, "{}", content::INFO_TOKENS_DEPRECATED)?;
        }
        TokenCommands::Show { token_id } => {
            check_required(&token_id, content::ERROR_TOKEN_ID_REQUIRED)?;
            let api = connect()?;
            announce(ctx, out, content::INFO_USING_TOKEN, &token_id)?;

            let token = api.get_token(&token_id).await?;
            writeln!(out, "{}", format::format_token(&token, &ctx.format)?)?;
        }
        TokenCommands::Delete { token_id } => {
            check_required(&token_id, content::ERROR_TOKEN_ID_REQUIRED)?;
            let api = connect()?;
            announce(ctx, out, content::INFO_USING_TOKEN, &token_id)?;

            api.delete_token(&token_id).await?;
            writeln!(out, "{}", format_success(content::INFO_TOKEN_DELETED))?;
        }
    }

    Ok(())
}

/// Handle git key commands
pub async fn handle_git_key(
    connect: Connector<'_>,
    ctx: &CommandContext,
    command: GitKeyCommands,
    out: &mut dyn Write,
) -> Result<()> {
    match command {
        GitKeyCommands::Show { gitkey_id } => {
            check_required(&gitkey_id, content::ERROR_GITKEY_ID_REQUIRED)?;
            let team_id = ctx.team_id()?;
            let api = connect()?;
            announce(ctx, out, content::INFO_USING_GITKEY, &gitkey_id)?;

            let git_key = api.get_git_key(team_id, &gitkey_id).await?;
            writeln!(out, "{}", format::format_git_key(&git_key, &ctx.format)?)?;
        }
        GitKeyCommands::Delete { gitkey_id } => {
            check_required(&gitkey_id, content::ERROR_GITKEY_ID_REQUIRED)?;
            let team_id = ctx.team_id()?;
            let api = connect()?;
            announce(ctx, out, content::INFO_USING_GITKEY, &gitkey_id)?;

            api.delete_git_key(team_id, &gitkey_id).await?;
            writeln!(out, "{}", format_success(content::INFO_GITKEY_DELETED))?;
        }
    }

    Ok(())
}

fn announce(ctx: &CommandContext, out: &mut dyn Write, what: &str, id: &str) -> Result<()> {
    if ctx.verbose() {
        writeln!(out, "{} {}", what, id)?;
    }
    Ok(())
}

/// Handle composite commands
pub fn handle_composite(command: CompositeCommands, out: &mut dyn Write) -> Result<()> {
    match command {
        CompositeCommands::Init {
            directory,
            audit,
            server,
        } => {
            let directory = match directory {
                Some(directory) => directory,
                None => std::env::current_dir()?,
            };

            let written = init_composite(&directory, ScaffoldMode::from_flags(audit, server))?;
            debug!(directory = %directory.display(), files = written.len(), "Composite initialized");
            writeln!(out, "{}", format_success(content::INFO_COMPOSITE_INIT_SUCCESS))?;
        }
    }

    Ok(())
}

/// Handle `configure` and `configure list`
///
/// Without a subcommand, stores API key, secret and team ID for `profile`.
/// Values given as flags are used as-is; otherwise the operator is prompted
/// for each one with the stored value as hint, and an empty answer keeps it.
/// A failed save is reported but does not fail the command.
pub fn handle_configure(
    store: &mut ProfileStore,
    profile: &str,
    overrides: &CredentialOverrides,
    prompter: &mut dyn Prompter,
    command: Option<ConfigureCommands>,
    format: &OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    if let Some(ConfigureCommands::List) = command {
        let profiles: Vec<(String, Credentials)> = store
            .profiles()
            .into_iter()
            .map(|name| {
                let credentials = store.credentials(&name);
                (name, credentials)
            })
            .collect();
        writeln!(out, "{}", format::format_profiles(&profiles, format)?)?;
        return Ok(());
    }

    let credentials = if overrides.is_complete() {
        Credentials {
            api_key: overrides.api_key.clone().unwrap_or_default(),
            secret_key: overrides.api_secret.clone().unwrap_or_default(),
            team_id: overrides.team_id.clone().unwrap_or_default(),
        }
    } else {
        let stored = store.credentials(profile);
        Credentials {
            api_key: match given(&overrides.api_key) {
                Some(value) => value,
                None => ask(
                    prompter,
                    content::PROMPT_API_KEY,
                    &coreo_core::mask_secret(&stored.api_key),
                    stored.api_key,
                )?,
            },
            secret_key: match given(&overrides.api_secret) {
                Some(value) => value,
                None => ask(
                    prompter,
                    content::PROMPT_SECRET_KEY,
                    &coreo_core::mask_secret(&stored.secret_key),
                    stored.secret_key,
                )?,
            },
            team_id: match given(&overrides.team_id) {
                Some(value) => value,
                None => ask(
                    prompter,
                    content::PROMPT_TEAM_ID,
                    &stored.team_id,
                    stored.team_id.clone(),
                )?,
            },
        }
    };

    store.set_credentials(profile, &credentials)?;
    match store.save() {
        Ok(()) => {
            debug!(profile, path = %store.path().display(), "Saved profile");
            writeln!(out, "{}", format_success(content::INFO_CONFIG_SAVED))?;
        }
        Err(e) => {
            warn!(profile, error = %e, "Failed to save config");
            writeln!(out, "{}", content::INFO_CONFIG_SAVE_FAILED)?;
        }
    }

    Ok(())
}

fn given(value: &Option<String>) -> Option<String> {
    value.clone().filter(|v| !v.is_empty())
}

fn ask(prompter: &mut dyn Prompter, prompt: &str, hint: &str, current: String) -> Result<String> {
    let answer = prompter.prompt(&content::prompt_with_default(prompt, hint))?;
    let answer = answer.trim();
    if answer.is_empty() {
        Ok(current)
    } else {
        Ok(answer.to_string())
    }
}

/// Generate shell completion script
pub fn generate_completion(shell: clap_complete::Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, bin_name, out);
}
