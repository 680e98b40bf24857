//! Run configuration for a backfill.

use std::fmt::{Debug, Display, Formatter};

use crate::error::ValidationError;
use crate::http_client::HttpAuth;
use crate::retry::RetryConfig;

pub const DEFAULT_BASE_URL: &str = "https://moltbets.app";
pub const DEFAULT_LEADERBOARD_LIMIT: u32 = 200;
pub const ADMIN_KEY_HEADER: &str = "x-admin-key";

/// Secret sent in the `x-admin-key` header on admin calls.
///
/// Formatting never reveals the value.
#[derive(Clone, PartialEq, Eq)]
pub struct AdminKey(String);

impl AdminKey {
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::EmptyAdminKey);
        }
        Ok(Self(value))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn auth(&self) -> HttpAuth {
        HttpAuth::Header {
            name: String::from(ADMIN_KEY_HEADER),
            value: self.0.clone(),
        }
    }
}

impl Debug for AdminKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("AdminKey(<redacted>)")
    }
}

impl Display for AdminKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("<redacted>")
    }
}

/// Everything a run needs besides the history and the transport.
#[derive(Debug, Clone)]
pub struct BackfillConfig {
    pub base_url: String,
    pub admin_key: AdminKey,
    pub leaderboard_limit: u32,
    pub timeout_ms: Option<u64>,
    pub retry: RetryConfig,
    pub submit_history: bool,
}

impl BackfillConfig {
    pub fn new(base_url: impl AsRef<str>, admin_key: AdminKey) -> Result<Self, ValidationError> {
        Ok(Self {
            base_url: normalize_base_url(base_url.as_ref())?,
            admin_key,
            leaderboard_limit: DEFAULT_LEADERBOARD_LIMIT,
            timeout_ms: None,
            retry: RetryConfig::no_retry(),
            submit_history: false,
        })
    }

    pub fn with_leaderboard_limit(mut self, limit: u32) -> Result<Self, ValidationError> {
        if limit == 0 {
            return Err(ValidationError::InvalidLeaderboardLimit);
        }
        self.leaderboard_limit = limit;
        Ok(self)
    }

    pub fn with_timeout_ms(mut self, timeout_ms: Option<u64>) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_submit_history(mut self, submit_history: bool) -> Self {
        self.submit_history = submit_history;
        self
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn normalize_base_url(input: &str) -> Result<String, ValidationError> {
    let trimmed = input.trim().trim_end_matches('/');
    let has_host = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .is_some_and(|host| !host.is_empty());

    if !has_host {
        return Err(ValidationError::InvalidBaseUrl {
            value: input.to_owned(),
        });
    }

    Ok(trimmed.to_owned())
}
