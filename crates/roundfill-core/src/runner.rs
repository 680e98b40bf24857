//! Sequential replay of historical days as rounds.
//!
//! A run fetches the leaderboard once, then creates one round per day in
//! history order. Any failure ends the run; rounds created before it stay
//! created and nothing records where the run stopped.

use std::io::Write;

use serde_json::Value;
use tracing::{info, info_span, warn, Instrument};

use crate::api::AdminApi;
use crate::domain::{HistoricalDay, TradingDate};
use crate::error::{BackfillError, ValidationError};
use crate::history::HistorySource;

pub const NEEDS_DB_ACCESS_MESSAGE: &str =
    "Done creating rounds. Need direct DB access to backfill bets for past dates.";
pub const HISTORY_SUBMITTED_MESSAGE: &str =
    "Done creating rounds. Submitted settled history to the admin backfill endpoint.";

/// Round created for one historical day, with the service's reply.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedRound {
    pub date: TradingDate,
    pub response: Value,
}

/// What a completed run did.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BackfillReport {
    pub agent_count: usize,
    pub rounds: Vec<CreatedRound>,
    pub history_submission: Option<Value>,
}

pub struct BackfillRunner {
    api: AdminApi,
    days: Vec<HistoricalDay>,
}

impl BackfillRunner {
    pub fn new(api: AdminApi, days: Vec<HistoricalDay>) -> Result<Self, ValidationError> {
        if days.is_empty() {
            return Err(ValidationError::EmptyHistory);
        }
        Ok(Self { api, days })
    }

    pub fn from_source(api: AdminApi, source: &dyn HistorySource) -> Result<Self, BackfillError> {
        let days = source.load()?;
        info!(source = %source.describe(), days = days.len(), "history loaded");
        Ok(Self::new(api, days)?)
    }

    pub fn days(&self) -> &[HistoricalDay] {
        &self.days
    }

    /// Run to completion, writing progress lines to `out`.
    pub async fn run<W: Write>(&self, out: &mut W) -> Result<BackfillReport, BackfillError> {
        let config = self.api.config();
        let mut report = BackfillReport::default();

        let agents = self
            .api
            .fetch_leaderboard(config.leaderboard_limit)
            .await?;
        report.agent_count = agents.len();
        writeln!(out, "Found {} agents", agents.len())?;
        info!(agents = agents.len(), "leaderboard fetched");

        for day in &self.days {
            if !day.is_consistent() {
                warn!(
                    date = %day.date,
                    open = day.open,
                    close = day.close,
                    result = %day.result,
                    "result label disagrees with price movement"
                );
            }

            writeln!(out)?;
            writeln!(out, "{}", day.banner())?;
            out.flush()?;

            let response = self
                .api
                .create_round(day.open)
                .instrument(info_span!("create_round", date = %day.date))
                .await?;
            writeln!(out, "  Create round: {}", serde_json::to_string(&response)?)?;
            info!(date = %day.date, open = day.open, "round created");

            report.rounds.push(CreatedRound {
                date: day.date,
                response,
            });
        }

        writeln!(out)?;
        if config.submit_history {
            writeln!(out, "Sending backfill request to admin endpoint...")?;
            out.flush()?;
            let response = self.api.submit_history(&self.days).await?;
            writeln!(out, "  Backfill: {}", serde_json::to_string(&response)?)?;
            writeln!(out, "{HISTORY_SUBMITTED_MESSAGE}")?;
            report.history_submission = Some(response);
        } else {
            writeln!(out, "{NEEDS_DB_ACCESS_MESSAGE}")?;
        }
        out.flush()?;

        info!(
            rounds = report.rounds.len(),
            history_submitted = report.history_submission.is_some(),
            "backfill finished"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::{AdminKey, BackfillConfig};
    use crate::domain::Direction;
    use crate::http_client::{HttpResponse, ScriptedHttpClient};

    fn runner(client: Arc<ScriptedHttpClient>, days: Vec<HistoricalDay>) -> BackfillRunner {
        let config = BackfillConfig::new("https://rounds.test", AdminKey::new("k").expect("key"))
            .expect("config");
        BackfillRunner::new(AdminApi::new(client, config), days).expect("runner")
    }

    fn day(date: &str, open: f64, close: f64, result: Direction) -> HistoricalDay {
        HistoricalDay::new(
            TradingDate::parse(date).expect("date"),
            open,
            close,
            result,
        )
        .expect("day")
    }

    #[test]
    fn empty_history_is_rejected() {
        let config = BackfillConfig::new("https://rounds.test", AdminKey::new("k").expect("key"))
            .expect("config");
        let api = AdminApi::new(Arc::new(ScriptedHttpClient::new()), config);
        assert!(matches!(
            BackfillRunner::new(api, Vec::new()),
            Err(ValidationError::EmptyHistory)
        ));
    }

    #[tokio::test]
    async fn prints_progress_in_order() {
        let client = Arc::new(ScriptedHttpClient::with_responses([
            Ok(HttpResponse::ok_json(r#"{"leaderboard":[{"rank":1}]}"#)),
            Ok(HttpResponse::ok_json(r#"{"roundId":"a","success":true}"#)),
        ]));
        let runner = runner(
            client,
            vec![day("2026-02-03", 696.21, 689.53, Direction::Down)],
        );

        let mut out = Vec::new();
        let report = runner.run(&mut out).await.expect("run succeeds");
        let text = String::from_utf8(out).expect("utf8");

        assert_eq!(
            text,
            "Found 1 agents\n\
             \n\
             --- 2026-02-03: SPY 696.21 -> 689.53 (DOWN) ---\n  \
             Create round: {\"roundId\":\"a\",\"success\":true}\n\
             \n\
             Done creating rounds. Need direct DB access to backfill bets for past dates.\n"
        );
        assert_eq!(report.agent_count, 1);
        assert_eq!(report.rounds.len(), 1);
        assert_eq!(report.history_submission, None);
    }
}
