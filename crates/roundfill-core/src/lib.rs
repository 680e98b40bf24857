//! # Roundfill Core
//!
//! Replays historical market sessions against a rounds service to seed its
//! round history.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`api`] | Client for the leaderboard and admin round endpoints |
//! | [`config`] | Base URL, admin key, limits, and retry settings for a run |
//! | [`domain`] | Historical days, directions, leaderboard rows |
//! | [`error`] | Validation and run errors |
//! | [`history`] | Builtin and file-backed history sources |
//! | [`http_client`] | HTTP transport abstraction (reqwest and scripted) |
//! | [`retry`] | Bounded retry with backoff |
//! | [`runner`] | The sequential backfill run |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use roundfill_core::{
//!     AdminApi, AdminKey, BackfillConfig, BackfillRunner, BuiltinHistory, ReqwestHttpClient,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let key = AdminKey::new(std::env::var("ROUNDFILL_ADMIN_KEY")?)?;
//!     let config = BackfillConfig::new("https://moltbets.app", key)?;
//!     let api = AdminApi::new(Arc::new(ReqwestHttpClient::new()), config);
//!     let runner = BackfillRunner::from_source(api, &BuiltinHistory)?;
//!
//!     let report = runner.run(&mut std::io::stdout()).await?;
//!     println!("created {} rounds", report.rounds.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Flow
//!
//! ```text
//! ┌────────────────┐     ┌─────────────────────────┐
//! │ HistorySource  │────▶│ BackfillRunner          │
//! └────────────────┘     │  1. GET leaderboard     │
//!                        │  2. POST create-round   │
//!                        │     (one per day)       │
//!                        │  3. POST backfill (opt) │
//!                        └───────────┬─────────────┘
//!                                    ▼
//!                        ┌─────────────────────────┐
//!                        │ AdminApi + RetryConfig  │
//!                        └───────────┬─────────────┘
//!                                    ▼
//!                        ┌─────────────────────────┐
//!                        │ HttpClient (reqwest)    │
//!                        └─────────────────────────┘
//! ```
//!
//! ## Security
//!
//! - The admin key comes from configuration, never from source
//! - `AdminKey` redacts itself in `Debug` and `Display`

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod history;
pub mod http_client;
pub mod retry;
pub mod runner;

pub use api::AdminApi;
pub use config::{AdminKey, BackfillConfig, DEFAULT_BASE_URL, DEFAULT_LEADERBOARD_LIMIT};
pub use domain::{AgentSummary, Direction, HistoricalDay, LeaderboardPage, TradingDate};
pub use error::{BackfillError, RemoteCall, ValidationError};
pub use history::{BuiltinHistory, HistorySource, JsonFileHistory};
pub use http_client::{
    HttpAuth, HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse, ReqwestHttpClient,
    ScriptedHttpClient,
};
pub use retry::{Backoff, RetryConfig};
pub use runner::{BackfillReport, BackfillRunner, CreatedRound};
