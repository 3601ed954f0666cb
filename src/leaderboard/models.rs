use crate::utils::types::Rank;
use serde::Deserialize;

/// Structure for a single entry in the leaderboard scores
/// response
///
/// # Structure
///
/// ```json
/// {
///   "playerId": "Hq6qxqJ7ZQeGVD4Rj2rZKqIbY3Jd",
///   "playerName": "Captain#1234",
///   "rank": 0,
///   "score": 1520.0,
///   "updatedTime": "2024-02-11T17:21:30.221Z"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    /// The ranking of this entry (Position in the leaderboard)
    pub rank: Rank,
    /// The display name of the player this entry is for
    pub player_name: String,
    /// The score value this ranking is based on
    pub score: f64,
    /// The ID of the player this entry is for
    #[serde(default)]
    pub player_id: Option<String>,
    /// When the score was last submitted
    #[serde(default)]
    pub updated_time: Option<String>,
}

/// Body of a leaderboard scores response, only `results` is
/// required the paging values are informational
#[derive(Debug, Deserialize)]
pub struct LeaderboardScores {
    #[serde(default)]
    pub offset: Option<u64>,
    #[serde(default)]
    pub limit: Option<u64>,
    #[serde(default)]
    pub total: Option<u64>,
    /// The entries in the order the API returned them
    pub results: Vec<LeaderboardEntry>,
}
