//! `burnnote shell` — interactive menu over a fresh in-memory store.

use crate::cli::output;
use crate::cli::prompt::TerminalPrompter;
use crate::cli::session::Session;
use crate::cli::{load_settings, Cli};
use crate::errors::Result;

/// Execute the `shell` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let settings = load_settings(cli)?;
    tracing::debug!(
        default_attempts = settings.default_attempts,
        max_attempts = settings.max_attempts,
        "starting session"
    );

    let mut session = Session::new(settings, TerminalPrompter::new());
    session.run()?;

    output::info("Session closed. Any unread messages were destroyed.");
    Ok(())
}
