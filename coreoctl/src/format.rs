//! Output formatting utilities for the CLI
//!
//! Provides table and JSON formatting with colors.

use anyhow::Result;
use colored::*;
use coreo_core::api::{CloudAccount, GitKey, Team, Token};
use coreo_core::{mask_secret, Credentials};
use serde::Serialize;

use tabled::{settings::Style, Table, Tabled};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl OutputFormat {
    /// Parse a validated settings value; anything but `json` renders tables.
    pub fn from_setting(value: &str) -> Self {
        match value {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Table,
        }
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn render<R: Tabled>(rows: Vec<R>) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Format a list of cloud accounts
pub fn format_cloud_accounts(accounts: &[CloudAccount], format: &OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(accounts),
        OutputFormat::Table => {
            #[derive(Tabled)]
            struct CloudRow {
                #[tabled(rename = "ID")]
                id: String,
                #[tabled(rename = "Name")]
                name: String,
                #[tabled(rename = "Team ID")]
                team_id: String,
            }

            let rows = accounts
                .iter()
                .map(|account| CloudRow {
                    id: account.id.cyan().to_string(),
                    name: account.name.clone(),
                    team_id: account.team_id.clone(),
                })
                .collect();

            Ok(render::<CloudRow>(rows))
        }
    }
}

/// Format a single cloud account
pub fn format_cloud_account(account: &CloudAccount, format: &OutputFormat) -> Result<String> {
    format_cloud_accounts(std::slice::from_ref(account), format)
}

/// Format a newly registered cloud account
pub fn format_cloud_account_created(
    account: &CloudAccount,
    format: &OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(account),
        OutputFormat::Table => {
            #[derive(Tabled)]
            struct CreatedRow {
                #[tabled(rename = "Cloud Account ID")]
                id: String,
                #[tabled(rename = "Cloud Account Name")]
                name: String,
                #[tabled(rename = "Tags")]
                tags: String,
            }

            Ok(render(vec![CreatedRow {
                id: account.id.clone(),
                name: account.name.clone(),
                tags: account.tags.join(", "),
            }]))
        }
    }
}

/// Format team details
pub fn format_team(team: &Team, format: &OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(team),
        OutputFormat::Table => {
            #[derive(Tabled)]
            struct TeamRow {
                #[tabled(rename = "Team ID")]
                id: String,
                #[tabled(rename = "Team Name")]
                name: String,
                #[tabled(rename = "Team Description")]
                description: String,
            }

            Ok(render(vec![TeamRow {
                id: team.id.clone(),
                name: team.team_name.clone(),
                description: team.team_description.clone(),
            }]))
        }
    }
}

/// Format token details
pub fn format_token(token: &Token, format: &OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(token),
        OutputFormat::Table => {
            #[derive(Tabled)]
            struct TokenRow {
                #[tabled(rename = "Token ID")]
                id: String,
                #[tabled(rename = "Token Name")]
                name: String,
                #[tabled(rename = "Token Description")]
                description: String,
            }

            Ok(render(vec![TokenRow {
                id: token.id.clone(),
                name: token.name.clone(),
                description: token.description.clone(),
            }]))
        }
    }
}

/// Format git key details
pub fn format_git_key(git_key: &GitKey, format: &OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(git_key),
        OutputFormat::Table => {
            #[derive(Tabled)]
            struct GitKeyRow {
                #[tabled(rename = "Git Key ID")]
                id: String,
                #[tabled(rename = "Git Key Name")]
                name: String,
                #[tabled(rename = "Team ID")]
                team_id: String,
            }

            Ok(render(vec![GitKeyRow {
                id: git_key.id.clone(),
                name: git_key.name.clone(),
                team_id: git_key.team_id.clone(),
            }]))
        }
    }
}

/// Format stored profiles with their keys masked
pub fn format_profiles(profiles: &[(String, Credentials)], format: &OutputFormat) -> Result<String> {
    #[derive(Tabled, Serialize)]
    struct ProfileRow {
        #[tabled(rename = "Profile")]
        profile: String,
        #[tabled(rename = "API Key")]
        api_key: String,
        #[tabled(rename = "Secret Key")]
        secret_key: String,
        #[tabled(rename = "Team ID")]
        team_id: String,
    }

    let rows: Vec<ProfileRow> = profiles
        .iter()
        .map(|(name, credentials)| ProfileRow {
            profile: name.clone(),
            api_key: mask_secret(&credentials.api_key),
            secret_key: mask_secret(&credentials.secret_key),
            team_id: credentials.team_id.clone(),
        })
        .collect();

    match format {
        OutputFormat::Json => to_json(&rows),
        OutputFormat::Table => Ok(format!("{}\n{}", "Profiles:".bold(), render(rows))),
    }
}

/// Format success message
pub fn format_success(message: &str) -> String {
    format!("{} {}", "✓".green().bold(), message)
}
