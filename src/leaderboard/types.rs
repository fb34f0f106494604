use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::feed::Standings;
use crate::games::Game;
use crate::scores::{AggregateEntry, DisplaySet, GameRule, RankedEntry};

/// Query string naming the viewer: `?viewer=NAME`
#[derive(Debug, Clone, Deserialize)]
pub struct ViewerQuery {
    pub viewer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
    pub game: Game,
    pub collection: String,
    pub rule: GameRule,
    pub unit: String,
}

impl From<Game> for GameSummary {
    fn from(game: Game) -> Self {
        Self {
            game,
            collection: game.collection().to_string(),
            rule: game.rule(),
            unit: game.unit().to_string(),
        }
    }
}

/// One table row of the leaderboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardRow {
    pub rank: usize,
    pub name: String,
    pub score: f64,
    /// Highlighted in the table
    pub is_viewer: bool,
}

impl LeaderboardRow {
    fn from_entry(entry: &RankedEntry, viewer_name: &str) -> Self {
        Self {
            rank: entry.rank,
            name: entry.record.name.clone(),
            score: entry.record.score,
            is_viewer: entry.record.name == viewer_name,
        }
    }
}

/// Response structure for leaderboard endpoints and socket frames
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardResponse {
    pub game: Game,
    pub unit: String,
    pub revision: u64,
    /// When the snapshot behind this revision arrived
    pub updated_at: DateTime<Utc>,
    pub rows: Vec<LeaderboardRow>,
    pub viewer_row: Option<LeaderboardRow>,
    pub averages: Vec<AggregateEntry>,
}

impl LeaderboardResponse {
    pub fn new(
        game: Game,
        revision: u64,
        updated_at: DateTime<Utc>,
        display: &DisplaySet,
        viewer_name: &str,
    ) -> Self {
        Self {
            game,
            unit: game.unit().to_string(),
            revision,
            updated_at,
            rows: display
                .window
                .iter()
                .map(|entry| LeaderboardRow::from_entry(entry, viewer_name))
                .collect(),
            viewer_row: display
                .viewer_row
                .as_ref()
                .map(|entry| LeaderboardRow::from_entry(entry, viewer_name)),
            averages: display.averages.clone(),
        }
    }

    pub fn from_standings(standings: &Standings, viewer_name: &str) -> Self {
        Self::new(
            standings.game,
            standings.revision,
            standings.received_at,
            &standings.display,
            viewer_name,
        )
    }
}
