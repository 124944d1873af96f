use thiserror::Error;

/// All errors that can occur in burnnote.
#[derive(Debug, Error)]
pub enum BurnNoteError {
    // --- Store errors ---
    #[error("The store is empty")]
    Underflow,

    #[error("The specified UID was not found.")]
    NotFound(i64),

    #[error(
        "Invalid password. You have {remaining} attempt(s) remaining before the message self-destructs."
    )]
    InvalidPassword { remaining: u32 },

    #[error("The message you attempted to retrieve has self destructed.")]
    MessageDestroyed(i64),

    // --- Input errors ---
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("User cancelled operation")]
    UserCancelled,
}

impl BurnNoteError {
    /// Returns `true` for failures of a single retrieval or input request.
    ///
    /// The interactive session reports these and keeps running; anything
    /// else ends the session.
    pub fn is_request_error(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_)
                | Self::InvalidPassword { .. }
                | Self::MessageDestroyed(_)
                | Self::InvalidInput(_)
        )
    }
}

/// Convenience type alias for burnnote results.
pub type Result<T> = std::result::Result<T, BurnNoteError>;
