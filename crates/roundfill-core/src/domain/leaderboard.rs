use serde::{Deserialize, Serialize};

/// One leaderboard row. Only the number of rows is consumed by a run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AgentSummary {
    #[serde(default)]
    pub rank: Option<u32>,
    #[serde(default)]
    pub username: Option<String>,
}

/// Body of `GET /api/leaderboard`.
///
/// A body without a `leaderboard` key decodes as an empty page.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LeaderboardPage {
    #[serde(default)]
    pub leaderboard: Vec<AgentSummary>,
}

impl LeaderboardPage {
    pub fn len(&self) -> usize {
        self.leaderboard.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaderboard.is_empty()
    }
}
