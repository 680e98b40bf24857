use std::path::PathBuf;

use thiserror::Error;

use crate::http_client::HttpError;

/// Validation errors for history records and run configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("trading date must be YYYY-MM-DD: '{value}'")]
    InvalidDate { value: String },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be greater than zero")]
    NonPositiveValue { field: &'static str },

    #[error("invalid direction '{value}', expected UP or DOWN")]
    InvalidDirection { value: String },

    #[error("history must contain at least one trading day")]
    EmptyHistory,

    #[error("base url must start with http:// or https://: '{value}'")]
    InvalidBaseUrl { value: String },
    #[error("admin key cannot be empty")]
    EmptyAdminKey,
    #[error("leaderboard limit must be greater than zero")]
    InvalidLeaderboardLimit,
}

/// Remote call identifiers used in errors and log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteCall {
    Leaderboard,
    CreateRound,
    SubmitHistory,
}

impl RemoteCall {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Leaderboard => "leaderboard",
            Self::CreateRound => "create-round",
            Self::SubmitHistory => "backfill",
        }
    }
}

impl std::fmt::Display for RemoteCall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-level error for a backfill run. Every variant aborts the run.
#[derive(Debug, Error)]
pub enum BackfillError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{call} request failed: {source}")]
    Transport {
        call: RemoteCall,
        #[source]
        source: HttpError,
    },

    #[error("{call} returned status {status}: {body}")]
    Status {
        call: RemoteCall,
        status: u16,
        body: String,
    },

    #[error("{call} response is not valid JSON: {source}")]
    Decode {
        call: RemoteCall,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to load history from {}: {message}", .path.display())]
    History { path: PathBuf, message: String },

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl BackfillError {
    pub const fn call(&self) -> Option<RemoteCall> {
        match self {
            Self::Transport { call, .. } | Self::Status { call, .. } | Self::Decode { call, .. } => {
                Some(*call)
            }
            _ => None,
        }
    }
}
