use roundfill_core::{BackfillError, ValidationError};
use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("missing admin key: pass --admin-key or set ROUNDFILL_ADMIN_KEY")]
    MissingAdminKey,

    #[error(transparent)]
    Backfill(#[from] BackfillError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) | Self::MissingAdminKey => 2,
            Self::Backfill(error) => match error {
                BackfillError::Validation(_) | BackfillError::History { .. } => 2,
                BackfillError::Transport { .. } | BackfillError::Status { .. } => 3,
                BackfillError::Decode { .. } | BackfillError::Serialization(_) => 4,
                BackfillError::Io(_) => 10,
            },
            Self::Serialization(_) => 4,
            Self::Io(_) => 10,
        }
    }
}
