//! Credential profiles
//!
//! Stored in `{config_dir}/coreo/config.toml`:
//!
//! ```toml
//! [default]
//! accesskey = "..."
//! secretkey = "..."
//! teamid = "..."
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::content::{ACCESS_KEY, SECRET_KEY, TEAM_ID};
use crate::error::{CoreoError, Result};

/// API credentials and default team of one profile
///
/// Empty strings mean "not configured".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub api_key: String,
    pub secret_key: String,
    pub team_id: String,
}

/// Key-value profile file
///
/// Values are addressed as `<profile>.<field>`. Reads of missing keys yield
/// `None`; writes create the profile table on demand. Nothing touches disk
/// until [`ProfileStore::save`].
#[derive(Debug, Clone)]
pub struct ProfileStore {
    path: PathBuf,
    table: toml::Table,
}

impl ProfileStore {
    /// Load the profile file, starting empty if it does not exist yet.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let table = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            toml::from_str(&content)?
        } else {
            toml::Table::new()
        };

        Ok(Self { path, table })
    }

    /// A store with no profiles that saves to `path`, ignoring its content.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            table: toml::Table::new(),
        }
    }

    /// Path the store was loaded from and saves to
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read a `<profile>.<field>` value.
    pub fn get(&self, key: &str) -> Option<&str> {
        let (profile, field) = split_key(key)?;
        self.table
            .get(profile)
            .and_then(|section| section.get(field))
            .and_then(|value| value.as_str())
    }

    /// Write a `<profile>.<field>` value.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let (profile, field) = split_key(key)
            .ok_or_else(|| CoreoError::Config(format!("Invalid config key: {}", key)))?;

        let section = self
            .table
            .entry(profile.to_string())
            .or_insert_with(|| toml::Value::Table(toml::Table::new()));

        match section {
            toml::Value::Table(section) => {
                section.insert(field.to_string(), toml::Value::String(value.to_string()));
                Ok(())
            }
            _ => Err(CoreoError::Config(format!(
                "Profile '{}' is not a table",
                profile
            ))),
        }
    }

    /// Stored credentials of a profile; missing fields are empty.
    pub fn credentials(&self, profile: &str) -> Credentials {
        let field = |name: &str| {
            self.get(&profile_key(profile, name))
                .unwrap_or_default()
                .to_string()
        };

        Credentials {
            api_key: field(ACCESS_KEY),
            secret_key: field(SECRET_KEY),
            team_id: field(TEAM_ID),
        }
    }

    /// Overwrite all three credential fields of a profile.
    pub fn set_credentials(&mut self, profile: &str, credentials: &Credentials) -> Result<()> {
        self.set(&profile_key(profile, ACCESS_KEY), &credentials.api_key)?;
        self.set(&profile_key(profile, SECRET_KEY), &credentials.secret_key)?;
        self.set(&profile_key(profile, TEAM_ID), &credentials.team_id)
    }

    /// Names of all stored profiles, sorted.
    pub fn profiles(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .table
            .iter()
            .filter(|(_, value)| value.is_table())
            .map(|(name, _)| name.clone())
            .collect();
        names.sort();
        names
    }

    /// Write the store back to its file, creating parent directories.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let content = toml::to_string_pretty(&self.table)?;
        std::fs::write(&self.path, content)?;

        Ok(())
    }
}

/// Build the `<profile>.<field>` key.
pub fn profile_key(profile: &str, field: &str) -> String {
    format!("{}.{}", profile, field)
}

fn split_key(key: &str) -> Option<(&str, &str)> {
    let (profile, field) = key.rsplit_once('.')?;
    if profile.is_empty() || field.is_empty() {
        return None;
    }
    Some((profile, field))
}

/// Hide all but the last four characters of a secret.
pub fn mask_secret(secret: &str) -> String {
    if secret.is_empty() {
        return String::new();
    }

    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }

    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{}", tail)
}
