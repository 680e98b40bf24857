//! # Domain Models
//!
//! Typed records replayed by the backfill runner and read back from the
//! rounds service.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`HistoricalDay`] | One trading day: date, open, close, UP/DOWN result |
//! | [`TradingDate`] | Validated `YYYY-MM-DD` calendar date |
//! | [`Direction`] | Round outcome label (`UP` / `DOWN`) |
//! | [`AgentSummary`] | One leaderboard entry |
//! | [`LeaderboardPage`] | Leaderboard response body |
//!
//! ## Validation
//!
//! Constructors validate their inputs:
//!
//! ```rust
//! use roundfill_core::{Direction, HistoricalDay, TradingDate, ValidationError};
//!
//! let date = TradingDate::parse("2026-02-03").unwrap();
//! let day = HistoricalDay::new(date, 696.21, 689.53, Direction::Down).unwrap();
//! assert!(day.is_consistent());
//!
//! let invalid = HistoricalDay::new(date, f64::NAN, 689.53, Direction::Down);
//! assert!(matches!(invalid, Err(ValidationError::NonFiniteValue { field: "open" })));
//! ```

mod day;
mod leaderboard;

pub use day::{Direction, HistoricalDay, TradingDate};
pub use leaderboard::{AgentSummary, LeaderboardPage};
