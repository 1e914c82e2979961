//! CLI command and subcommand definitions

use clap::{Args, Parser, Subcommand};
use coreo_core::types::{DEFAULT_AWS_POLICY, DEFAULT_PROFILE};
use coreo_core::validation::CloudCreateInput;
use std::path::PathBuf;

/// CloudCoreo CLI
#[derive(Parser, Debug)]
#[command(name = "coreo")]
#[command(version, about = "CloudCoreo cloud-governance CLI", long_about = None)]
pub struct Cli {
    /// API key (overrides the stored profile)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// API secret (overrides the stored profile)
    #[arg(long, global = true)]
    pub api_secret: Option<String>,

    /// Team ID (overrides the stored profile)
    #[arg(long, global = true)]
    pub team_id: Option<String>,

    /// Credential profile to use [env: COREO_PROFILE] [default: default]
    #[arg(long, global = true)]
    pub profile: Option<String>,

    /// API endpoint (overrides config file)
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Output format (overrides config file)
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Don't load the CLI settings file
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Profile file path (default: ~/.config/coreo/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Profile from the flag, then `COREO_PROFILE`, then the default.
    pub fn profile_name(&self) -> String {
        self.profile
            .clone()
            .or_else(|| std::env::var("COREO_PROFILE").ok())
            .filter(|profile| !profile.is_empty())
            .unwrap_or_else(|| DEFAULT_PROFILE.to_string())
    }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty table output
    Table,
    /// JSON output
    Json,
}

impl OutputFormat {
    /// Settings value accepted by the config builder
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage cloud accounts
    Cloud {
        #[command(subcommand)]
        command: CloudCommands,
    },

    /// Manage teams
    Team {
        #[command(subcommand)]
        command: TeamCommands,
    },

    /// Manage tokens
    Token {
        #[command(subcommand)]
        command: TokenCommands,
    },

    /// Manage git keys
    Gitkey {
        #[command(subcommand)]
        command: GitKeyCommands,
    },

    /// Manage composites
    Composite {
        #[command(subcommand)]
        command: CompositeCommands,
    },

    /// Configure credentials of a profile
    Configure {
        #[command(subcommand)]
        command: Option<ConfigureCommands>,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completion for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum CloudCommands {
    /// Register a cloud account
    Create(CloudCreateArgs),

    /// List cloud accounts of the team
    List,

    /// Show a cloud account
    Show {
        /// Cloud account ID
        #[arg(long, default_value = "")]
        cloud_id: String,
    },

    /// Delete a cloud account
    Delete {
        /// Cloud account ID
        #[arg(long, default_value = "")]
        cloud_id: String,
    },
}

#[derive(Args, Debug, Clone)]
pub struct CloudCreateArgs {
    /// Name of the cloud account
    #[arg(short, long, default_value = "")]
    pub name: String,

    /// Role to create for the platform (AWS)
    #[arg(long, default_value = "")]
    pub role_name: String,

    /// ARN of an existing role (AWS)
    #[arg(long, default_value = "")]
    pub role_arn: String,

    /// External ID of an existing role (AWS)
    #[arg(long, default_value = "")]
    pub external_id: String,

    /// AWS profile used to create the role
    #[arg(long)]
    pub aws_profile: Option<String>,

    /// AWS shared credentials file used to create the role
    #[arg(long)]
    pub aws_profile_path: Option<PathBuf>,

    /// Managed policy attached to the created role
    #[arg(long, default_value = DEFAULT_AWS_POLICY)]
    pub policy: String,

    /// Register the account as a draft
    #[arg(long)]
    pub is_draft: bool,

    /// Notification email
    #[arg(long, default_value = "")]
    pub email: String,

    /// User name
    #[arg(long, default_value = "")]
    pub user_name: String,

    /// Production, Staging, Development or Test
    #[arg(short, long, default_value = "")]
    pub environment: String,

    /// AWS or Azure
    #[arg(long, default_value = "AWS")]
    pub provider: String,

    /// Azure key value
    #[arg(long, default_value = "")]
    pub key_value: String,

    /// Azure application ID
    #[arg(long, default_value = "")]
    pub application_id: String,

    /// Azure directory ID
    #[arg(long, default_value = "")]
    pub directory_id: String,

    /// Azure subscription ID
    #[arg(long, default_value = "")]
    pub subscription_id: String,

    /// Comma-separated tags
    #[arg(long, default_value = "")]
    pub tags: String,
}

impl CloudCreateArgs {
    /// Raw flag values for validation
    pub fn to_input(&self) -> CloudCreateInput {
        CloudCreateInput {
            name: self.name.clone(),
            provider: self.provider.clone(),
            environment: self.environment.clone(),
            role_name: self.role_name.clone(),
            role_arn: self.role_arn.clone(),
            external_id: self.external_id.clone(),
            policy: self.policy.clone(),
            is_draft: self.is_draft,
            email: self.email.clone(),
            user_name: self.user_name.clone(),
            tags: self.tags.clone(),
            key_value: self.key_value.clone(),
            application_id: self.application_id.clone(),
            directory_id: self.directory_id.clone(),
            subscription_id: self.subscription_id.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum TeamCommands {
    /// List teams (deprecated)
    List,

    /// Show the team given by --team-id or the profile
    Show,

    /// Create a team
    Create {
        /// Team name
        #[arg(long, default_value = "")]
        name: String,

        /// Team description
        #[arg(long, default_value = "")]
        description: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum TokenCommands {
    /// List tokens (deprecated)
    List,

    /// Show a token
    Show {
        /// Token ID
        #[arg(long, default_value = "")]
        token_id: String,
    },

    /// Delete a token
    Delete {
        /// Token ID
        #[arg(long, default_value = "")]
        token_id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum GitKeyCommands {
    /// Show a git key
    Show {
        /// Git key ID
        #[arg(long, default_value = "")]
        gitkey_id: String,
    },

    /// Delete a git key
    Delete {
        /// Git key ID
        #[arg(long, default_value = "")]
        gitkey_id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum CompositeCommands {
    /// Generate the default composite layout
    Init {
        /// Target directory (default: current directory)
        #[arg(short, long)]
        directory: Option<PathBuf>,

        /// Add audit table and suppression files
        #[arg(long)]
        audit: bool,

        /// Add operational, boot and shutdown script folders
        #[arg(long)]
        server: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigureCommands {
    /// List stored profiles
    List,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "coreo", "token", "delete", "--token-id", "123", "--api-key", "k", "-f", "json",
        ])
        .unwrap();

        assert_eq!(cli.api_key.as_deref(), Some("k"));
        assert!(matches!(cli.format, Some(OutputFormat::Json)));
        match cli.command {
            Commands::Token {
                command: TokenCommands::Delete { token_id },
            } => assert_eq!(token_id, "123"),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_missing_ids_default_to_empty() {
        let cli = Cli::try_parse_from(["coreo", "cloud", "show"]).unwrap();
        match cli.command {
            Commands::Cloud {
                command: CloudCommands::Show { cloud_id },
            } => assert!(cloud_id.is_empty()),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cloud_create_defaults() {
        let cli = Cli::try_parse_from(["coreo", "cloud", "create", "-n", "prod"]).unwrap();
        let Commands::Cloud {
            command: CloudCommands::Create(args),
        } = cli.command
        else {
            panic!("expected cloud create");
        };

        let input = args.to_input();
        assert_eq!(input.name, "prod");
        assert_eq!(input.provider, "AWS");
        assert_eq!(input.policy, DEFAULT_AWS_POLICY);
        assert!(!input.is_draft);
    }

    #[test]
    fn test_configure_without_subcommand() {
        let cli = Cli::try_parse_from(["coreo", "configure"]).unwrap();
        assert!(matches!(cli.command, Commands::Configure { command: None }));

        let cli = Cli::try_parse_from(["coreo", "configure", "list"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Configure {
                command: Some(ConfigureCommands::List)
            }
        ));
    }

    #[test]
    fn test_profile_flag() {
        let cli = Cli::try_parse_from(["coreo", "--profile", "work", "team", "list"]).unwrap();
        assert_eq!(cli.profile_name(), "work");
    }
}
