//! Per-invocation state shared by all command handlers

use anyhow::{anyhow, Result};
use coreo_core::content;
use coreo_core::{Credentials, ProfileStore};

use crate::client::CoreoClient;
use crate::config::CliConfig;
use crate::format::OutputFormat;

/// Credentials given on the command line or in the environment
#[derive(Debug, Clone, Default)]
pub struct CredentialOverrides {
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    pub team_id: Option<String>,
}

impl CredentialOverrides {
    /// Fill values not given as flags from `COREO_API_KEY`,
    /// `COREO_API_SECRET` and `COREO_TEAM_ID`.
    pub fn with_env_fallback(self) -> Self {
        fn env(name: &str) -> Option<String> {
            std::env::var(name).ok().filter(|value| !value.is_empty())
        }

        Self {
            api_key: self.api_key.or_else(|| env("COREO_API_KEY")),
            api_secret: self.api_secret.or_else(|| env("COREO_API_SECRET")),
            team_id: self.team_id.or_else(|| env("COREO_TEAM_ID")),
        }
    }

    /// True when all three values are present and non-empty.
    pub fn is_complete(&self) -> bool {
        [&self.api_key, &self.api_secret, &self.team_id]
            .iter()
            .all(|value| value.as_deref().is_some_and(|v| !v.is_empty()))
    }
}

/// Resolved settings and credentials for one command
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub settings: CliConfig,
    pub format: OutputFormat,
    pub profile: String,
    pub credentials: Credentials,
}

impl CommandContext {
    /// Resolve credentials with overrides taking precedence over the
    /// stored profile.
    pub fn new(
        settings: CliConfig,
        profile: &str,
        store: &ProfileStore,
        overrides: &CredentialOverrides,
    ) -> Self {
        let stored = store.credentials(profile);
        let pick = |given: &Option<String>, stored: String| match given {
            Some(value) if !value.is_empty() => value.clone(),
            _ => stored,
        };

        Self {
            format: OutputFormat::from_setting(&settings.output_format),
            credentials: Credentials {
                api_key: pick(&overrides.api_key, stored.api_key),
                secret_key: pick(&overrides.api_secret, stored.secret_key),
                team_id: pick(&overrides.team_id, stored.team_id),
            },
            profile: profile.to_string(),
            settings,
        }
    }

    pub fn verbose(&self) -> bool {
        self.settings.verbose
    }

    pub fn api_key(&self) -> Result<&str> {
        non_empty(&self.credentials.api_key, content::ERROR_API_KEY_MISSING)
    }

    pub fn team_id(&self) -> Result<&str> {
        non_empty(&self.credentials.team_id, content::ERROR_TEAM_ID_MISSING)
    }

    /// Build an authenticated API client.
    pub fn client(&self) -> Result<CoreoClient> {
        CoreoClient::new(
            self.settings.endpoint.clone(),
            self.api_key()?.to_string(),
            self.credentials.secret_key.clone(),
            self.settings.timeout,
        )
    }
}

fn non_empty<'a>(value: &'a str, message: &str) -> Result<&'a str> {
    if value.is_empty() {
        return Err(anyhow!(message.to_string()));
    }
    Ok(value)
}
