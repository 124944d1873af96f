//! `burnnote version` — display version information.

use console::style;

use crate::errors::Result;

/// Execute the `version` command.
pub fn execute() -> Result<()> {
    let current = env!("CARGO_PKG_VERSION");
    println!("burnnote {}", style(current).green().bold());
    println!(
        "{}",
        style("Messages live in memory only and are never written to disk.").dim()
    );
    Ok(())
}
