use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Pairing result written by the matchmaker. Every inserted record starts a
/// game between the two players, `player1_id` moving first.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MatchFound {
    pub match_id: String,
    pub player1_id: String,
    pub player2_id: String,
    pub found_at: DateTime<Utc>,
}
