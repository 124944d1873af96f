use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{BurnNoteError, Result};

/// Session-level configuration, loaded from `.burnnote.toml`.
///
/// Every field has a sensible default so burnnote works out-of-the-box
/// without any config file at all.
///
/// The store itself accepts whatever it is given; these limits are the
/// caller-side validation applied before anything reaches the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Attempt budget offered when creating a message (default: 3).
    #[serde(default = "default_attempts")]
    pub default_attempts: u32,

    /// Largest attempt budget a message may be given (default: 10).
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Shortest accepted password (default: 1, i.e. non-empty).
    #[serde(default = "default_min_password_len")]
    pub min_password_len: usize,

    /// Longest accepted message in bytes (default: 4096).
    #[serde(default = "default_max_message_len")]
    pub max_message_len: usize,

    /// Clear the terminal between menu screens (default: true).
    #[serde(default = "default_clear_screen")]
    pub clear_screen: bool,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_attempts() -> u32 {
    3
}

fn default_max_attempts() -> u32 {
    10
}

fn default_min_password_len() -> usize {
    1
}

fn default_max_message_len() -> usize {
    4096
}

fn default_clear_screen() -> bool {
    true
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_attempts: default_attempts(),
            max_attempts: default_max_attempts(),
            min_password_len: default_min_password_len(),
            max_message_len: default_max_message_len(),
            clear_screen: default_clear_screen(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the config directory.
    const FILE_NAME: &'static str = ".burnnote.toml";

    /// Load settings from `<config_dir>/.burnnote.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, or its limits contradict
    /// each other, an error is returned.
    pub fn load(config_dir: &Path) -> Result<Self> {
        let config_path = Self::config_path(config_dir);

        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            BurnNoteError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        settings.check_consistent()?;
        tracing::debug!(path = %config_path.display(), "config loaded");

        Ok(settings)
    }

    /// Full path of the config file inside `config_dir`.
    pub fn config_path(config_dir: &Path) -> PathBuf {
        config_dir.join(Self::FILE_NAME)
    }

    fn check_consistent(&self) -> Result<()> {
        if self.max_attempts == 0 {
            return Err(BurnNoteError::ConfigError(
                "max_attempts must be at least 1".into(),
            ));
        }
        if self.default_attempts == 0 || self.default_attempts > self.max_attempts {
            return Err(BurnNoteError::ConfigError(format!(
                "default_attempts must be between 1 and max_attempts ({})",
                self.max_attempts
            )));
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Input validation
    // ------------------------------------------------------------------

    /// Validate an attempt budget: 1..=max_attempts.
    pub fn validate_attempts(&self, attempts: u32) -> Result<u32> {
        if attempts == 0 || attempts > self.max_attempts {
            return Err(BurnNoteError::InvalidInput(format!(
                "attempt count must be between 1 and {}",
                self.max_attempts
            )));
        }
        Ok(attempts)
    }

    /// Validate a password's length (in characters).
    pub fn validate_password(&self, password: &str) -> Result<()> {
        let min = self.min_password_len.max(1);
        if password.chars().count() < min {
            return Err(BurnNoteError::InvalidInput(format!(
                "password must be at least {min} character(s)"
            )));
        }
        Ok(())
    }

    /// Validate a message: non-empty and at most `max_message_len` bytes.
    pub fn validate_message(&self, message: &str) -> Result<()> {
        if message.is_empty() {
            return Err(BurnNoteError::InvalidInput(
                "message cannot be empty".into(),
            ));
        }
        if message.len() > self.max_message_len {
            return Err(BurnNoteError::InvalidInput(format!(
                "message cannot exceed {} bytes",
                self.max_message_len
            )));
        }
        Ok(())
    }
}

// ── Tests ────────────────────────────────────────────────────────────
