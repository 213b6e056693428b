use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A player waiting to be paired. One DynamoDB item per player, keyed by
/// `player_id`; pairing itself happens outside this workspace.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct QueueUser {
    pub player_id: String,
    pub joined_at: DateTime<Utc>,
}

impl QueueUser {
    pub fn new(player_id: &str) -> Self {
        QueueUser {
            player_id: player_id.to_string(),
            joined_at: Utc::now(),
        }
    }
}
