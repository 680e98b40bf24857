//! CLI argument definitions for roundfill.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `backfill` | Replay history against the rounds service |
//! | `history` | Print the history a backfill would replay |
//!
//! # Global Options
//!
//! | Option | Env | Default |
//! |--------|-----|---------|
//! | `--base-url` | `ROUNDFILL_BASE_URL` | `https://moltbets.app` |
//! | `--admin-key` | `ROUNDFILL_ADMIN_KEY` | none, required by `backfill` |
//!
//! # Examples
//!
//! ```bash
//! ROUNDFILL_ADMIN_KEY=... roundfill backfill
//! roundfill backfill --history days.json --max-retries 3 --timeout-ms 10000
//! roundfill history --format json --pretty
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use roundfill_core::{DEFAULT_BASE_URL, DEFAULT_LEADERBOARD_LIMIT};

/// Seed a rounds service with historical market sessions.
#[derive(Debug, Parser)]
#[command(name = "roundfill", author, version, about)]
pub struct Cli {
    /// Base URL of the rounds service.
    #[arg(long, global = true, env = "ROUNDFILL_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Admin key sent as `x-admin-key` on admin endpoints.
    #[arg(long, global = true, env = "ROUNDFILL_ADMIN_KEY", hide_env_values = true)]
    pub admin_key: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch the leaderboard, then create one round per historical day.
    ///
    /// Only each day's opening price is sent to create-round. Any failure
    /// stops the run; rounds already created are left in place.
    Backfill(BackfillArgs),

    /// Print the history without contacting the service.
    History(HistoryArgs),
}

/// Where the replayed days come from.
#[derive(Debug, Args)]
pub struct HistorySourceArgs {
    /// JSON file holding an array of {date, open, close, result} objects.
    ///
    /// Defaults to the builtin table.
    #[arg(long, value_name = "FILE")]
    pub history: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct BackfillArgs {
    #[command(flatten)]
    pub source: HistorySourceArgs,

    /// Page size requested from the leaderboard.
    #[arg(long, default_value_t = DEFAULT_LEADERBOARD_LIMIT)]
    pub leaderboard_limit: u32,

    /// Retries per call on transient failures (0 disables retry).
    #[arg(long, default_value_t = 0)]
    pub max_retries: u32,

    /// Per-request timeout in milliseconds. No timeout when omitted.
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// After creating rounds, post the settled history to /api/admin/backfill.
    #[arg(long, default_value_t = false)]
    pub submit_history: bool,
}

#[derive(Debug, Args)]
pub struct HistoryArgs {
    #[command(flatten)]
    pub source: HistorySourceArgs,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, default_value_t = false)]
    pub pretty: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}
