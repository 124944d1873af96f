//! Command implementations, one module per subcommand.

pub mod completions;
pub mod shell;
pub mod version;
