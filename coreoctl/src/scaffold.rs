//! Composite directory scaffolding
//!
//! Writes the default layout of a composite project. Files that already
//! exist are never overwritten.

use anyhow::{Context, Result};
use coreo_core::content::templates::*;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Which optional file set to generate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaffoldMode {
    /// Config, overrides and services only
    Base,
    /// Base plus table and suppression files
    Audit,
    /// Base plus operational, boot and shutdown script folders
    Server,
}

impl ScaffoldMode {
    /// `--server` wins over `--audit`.
    pub fn from_flags(audit: bool, server: bool) -> Self {
        if server {
            ScaffoldMode::Server
        } else if audit {
            ScaffoldMode::Audit
        } else {
            ScaffoldMode::Base
        }
    }
}

/// Generate the composite layout under `dir`, creating it if needed.
///
/// Returns the files that were written. Stops at the first I/O error
/// without cleaning up what was already created.
pub fn init_composite(dir: &Path, mode: ScaffoldMode) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory {}", dir.display()))?;

    let mut written = Vec::new();
    let mut write = |folder: Option<&str>, name: &str, content: String| -> Result<()> {
        let parent = match folder {
            Some(folder) => create_folder(dir, folder)?,
            None => dir.to_path_buf(),
        };
        if let Some(path) = create_file(&parent, name, &content)? {
            written.push(path);
        }
        Ok(())
    };

    write(None, CONFIG_YAML_NAME, String::new())?;
    write(Some(OVERRIDES_FOLDER), README_NAME, overrides_readme())?;
    write(Some(SERVICES_FOLDER), CONFIG_RB_NAME, services_config_rb())?;
    write(Some(SERVICES_FOLDER), README_NAME, services_readme())?;

    match mode {
        ScaffoldMode::Base => {}
        ScaffoldMode::Audit => {
            write(None, TABLE_YAML_NAME, table_yaml())?;
            write(None, SUPPRESSION_YAML_NAME, suppression_yaml())?;
        }
        ScaffoldMode::Server => {
            write(Some(OPERATIONAL_SCRIPTS_FOLDER), README_NAME, operational_readme())?;
            write(Some(BOOT_SCRIPTS_FOLDER), README_NAME, boot_readme())?;
            write(Some(BOOT_SCRIPTS_FOLDER), ORDER_YAML_NAME, boot_order_yaml())?;
            write(Some(SHUTDOWN_SCRIPTS_FOLDER), README_NAME, shutdown_readme())?;
            write(Some(SHUTDOWN_SCRIPTS_FOLDER), ORDER_YAML_NAME, shutdown_order_yaml())?;
        }
    }

    Ok(written)
}

fn create_folder(dir: &Path, folder: &str) -> Result<PathBuf> {
    let path = dir.join(folder);
    std::fs::create_dir_all(&path)
        .with_context(|| format!("Failed to create directory {}", path.display()))?;
    Ok(path)
}

/// Write `content` to `dir/name` unless the file exists.
fn create_file(dir: &Path, name: &str, content: &str) -> Result<Option<PathBuf>> {
    let path = dir.join(name);
    if path.exists() {
        debug!(path = %path.display(), "File exists, skipping");
        return Ok(None);
    }

    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    debug!(path = %path.display(), "Created file");
    Ok(Some(path))
}
