//! Interactive input for `coreo configure`

use anyhow::{Context, Result};
use dialoguer::Input;

/// Source of answers to interactive questions
pub trait Prompter {
    /// Show `message` and return the raw answer, which may be empty.
    fn prompt(&mut self, message: &str) -> Result<String>;
}

/// Prompter reading from the controlling terminal
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn prompt(&mut self, message: &str) -> Result<String> {
        Input::<String>::new()
            .with_prompt(message)
            .allow_empty(true)
            .interact_text()
            .context("Failed to read user input")
    }
}
