//! Default path resolution for configuration files
//!
//! Uses XDG Base Directory specification when available, with sensible fallbacks.

use std::path::PathBuf;

/// Returns the default path for the credentials profile file.
///
/// Uses XDG config directory if available:
/// - Linux/macOS: `~/.config/coreo/config.toml`
/// - Fallback: `./.coreo/config.toml`
pub fn default_config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Returns the default path for CLI display settings.
///
/// Lives next to the profile file: `~/.config/coreo/cli.toml`.
pub fn default_settings_path() -> PathBuf {
    config_dir().join("cli.toml")
}

fn config_dir() -> PathBuf {
    match dirs::config_dir() {
        Some(dir) => dir.join("coreo"),
        None => PathBuf::from(".coreo"),
    }
}
