//! Input capability used by the interactive session.
//!
//! The session never reads stdin itself; it asks a `Prompter` supplied by
//! its caller.  `TerminalPrompter` is the real implementation built on
//! `dialoguer`; tests plug in a scripted one.

use console::Term;
use dialoguer::{Input, Password, Select};
use zeroize::Zeroizing;

use crate::errors::{BurnNoteError, Result};

/// Everything the session needs to ask the user.
pub trait Prompter {
    /// Show `items` and return the index of the chosen one.
    fn select(&mut self, prompt: &str, items: &[&str]) -> Result<usize>;

    /// Read a message id.
    fn read_id(&mut self, prompt: &str) -> Result<i64>;

    /// Read a password without echoing it.
    fn read_password(&mut self, prompt: &str) -> Result<Zeroizing<String>>;

    /// Read a line of free text.
    fn read_text(&mut self, prompt: &str) -> Result<Zeroizing<String>>;

    /// Read an attempt count, offering `default`.
    fn read_attempts(&mut self, prompt: &str, default: u32) -> Result<u32>;

    /// Wipe the screen between menus.  A no-op is acceptable.
    fn clear_screen(&mut self) -> Result<()>;
}

/// `Prompter` backed by the controlling terminal.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl TerminalPrompter {
    pub fn new() -> Self {
        Self
    }
}

fn prompt_failed(what: &str, e: dialoguer::Error) -> BurnNoteError {
    BurnNoteError::CommandFailed(format!("{what} prompt: {e}"))
}

impl Prompter for TerminalPrompter {
    fn select(&mut self, prompt: &str, items: &[&str]) -> Result<usize> {
        Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact()
            .map_err(|e| prompt_failed("menu", e))
    }

    fn read_id(&mut self, prompt: &str) -> Result<i64> {
        Input::<i64>::new()
            .with_prompt(prompt)
            .interact_text()
            .map_err(|e| prompt_failed("id", e))
    }

    fn read_password(&mut self, prompt: &str) -> Result<Zeroizing<String>> {
        let pw = Password::new()
            .with_prompt(prompt)
            .interact()
            .map_err(|e| prompt_failed("password", e))?;
        Ok(Zeroizing::new(pw))
    }

    fn read_text(&mut self, prompt: &str) -> Result<Zeroizing<String>> {
        let text = Input::<String>::new()
            .with_prompt(prompt)
            .interact_text()
            .map_err(|e| prompt_failed("input", e))?;
        Ok(Zeroizing::new(text))
    }

    fn read_attempts(&mut self, prompt: &str, default: u32) -> Result<u32> {
        Input::<u32>::new()
            .with_prompt(prompt)
            .default(default)
            .interact_text()
            .map_err(|e| prompt_failed("attempts", e))
    }

    fn clear_screen(&mut self) -> Result<()> {
        Term::stdout().clear_screen()?;
        Ok(())
    }
}
