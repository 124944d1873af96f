//! Configuration — optional `.burnnote.toml` settings.

pub mod settings;

pub use settings::Settings;
