//! CloudCoreo CLI
//!
//! Command-line interface for the CloudCoreo cloud-governance platform.

use anyhow::Result;
use clap::Parser;
use coreo_core::config::{default_config_path, default_settings_path};
use coreo_core::ProfileStore;
use coreoctl::cli::{
    generate_completion, handle_cloud, handle_composite, handle_configure, handle_git_key,
    handle_team, handle_token, Cli, Commands,
};
use coreoctl::client::CoreoApi;
use coreoctl::config::CliConfig;
use coreoctl::context::{CommandContext, CredentialOverrides};
use coreoctl::prompt::TerminalPrompter;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// Exit status for any reported error
const EXIT_FAILURE: i32 = 255;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(EXIT_FAILURE);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let profile_path = cli.config.clone().unwrap_or_else(default_config_path);

    // Settings file lives next to the profile file
    let settings_path: Option<PathBuf> = if cli.no_config {
        None
    } else if cli.config.is_some() {
        Some(
            profile_path
                .parent()
                .map(|dir| dir.join("cli.toml"))
                .unwrap_or_else(|| PathBuf::from("cli.toml")),
        )
    } else {
        Some(default_settings_path())
    };

    // Each step only fills what is still unset: CLI args → env → file → defaults
    let mut builder = CliConfig::builder();
    if let Some(ref endpoint) = cli.endpoint {
        builder = builder.with_endpoint(endpoint)?;
    }
    if let Some(ref format) = cli.format {
        builder = builder.with_output_format(format.as_str())?;
    }
    if cli.verbose {
        builder = builder.with_verbose(true);
    }
    let settings = builder
        .with_env_overrides()
        .with_config_file(settings_path.as_deref())?
        .build()?;

    init_tracing(settings.verbose);
    debug!(endpoint = %settings.endpoint, format = %settings.output_format, "Resolved settings");

    let profile = cli.profile_name();
    let mut store = load_profiles(&profile_path, &cli.command)?;
    let overrides = CredentialOverrides {
        api_key: cli.api_key.clone(),
        api_secret: cli.api_secret.clone(),
        team_id: cli.team_id.clone(),
    }
    .with_env_fallback();

    let ctx = CommandContext::new(settings, &profile, &store, &overrides);
    let connect = || -> Result<Arc<dyn CoreoApi>> { Ok(Arc::new(ctx.client()?)) };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Cloud { command } => handle_cloud(&connect, None, &ctx, command, &mut out).await,
        Commands::Team { command } => handle_team(&connect, &ctx, command, &mut out).await,
        Commands::Token { command } => handle_token(&connect, &ctx, command, &mut out).await,
        Commands::Gitkey { command } => handle_git_key(&connect, &ctx, command, &mut out).await,
        Commands::Composite { command } => handle_composite(command, &mut out),
        Commands::Configure { command } => handle_configure(
            &mut store,
            &profile,
            &overrides,
            &mut TerminalPrompter,
            command,
            &ctx.format,
            &mut out,
        ),
        Commands::Completion { shell } => {
            generate_completion(shell, &mut out);
            Ok(())
        }
    }
}

/// Load the profile file. Commands that never read credentials, and
/// `configure` which rewrites them, start from an empty store when the file
/// is malformed.
fn load_profiles(path: &Path, command: &Commands) -> Result<ProfileStore> {
    match ProfileStore::load(path) {
        Ok(store) => Ok(store),
        Err(e) if !needs_profiles(command) => {
            warn!(path = %path.display(), error = %e, "Ignoring unreadable profile file");
            Ok(ProfileStore::empty(path))
        }
        Err(e) => Err(e.into()),
    }
}

fn needs_profiles(command: &Commands) -> bool {
    !matches!(
        command,
        Commands::Configure { command: None }
            | Commands::Composite { .. }
            | Commands::Completion { .. }
    )
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
