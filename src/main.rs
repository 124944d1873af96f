use clap::Parser;
use tracing_subscriber::EnvFilter;

use burnnote::cli::{commands, Cli, Commands};

fn main() {
    // Diagnostics go to stderr so they never mix with menu output.
    // Events carry ids and counters only, never passwords or messages.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("burnnote=warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match &cli.command {
        None | Some(Commands::Shell) => commands::shell::execute(&cli),
        Some(Commands::Version) => commands::version::execute(),
        Some(Commands::Completions { shell }) => commands::completions::execute(*shell),
    };

    if let Err(e) = result {
        burnnote::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
