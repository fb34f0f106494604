use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::scores::GameRule;

/// Games that have a leaderboard.
///
/// Parses case-insensitively from either the game name or its collection
/// name (`"snake"`, `"SnakeScores"`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Game {
    #[strum(to_string = "Snake", serialize = "SnakeScores")]
    Snake,
    #[strum(to_string = "Reacteroids", serialize = "ReacteroidsScores")]
    Reacteroids,
    #[strum(to_string = "FifteenPuzzle", serialize = "FifteenPuzzleScores")]
    FifteenPuzzle,
}

impl Game {
    /// Name of the upstream record collection
    pub fn collection(&self) -> &'static str {
        match self {
            Game::Snake => "SnakeScores",
            Game::Reacteroids => "ReacteroidsScores",
            Game::FifteenPuzzle => "FifteenPuzzleScores",
        }
    }

    pub fn rule(&self) -> GameRule {
        match self {
            Game::Snake | Game::Reacteroids => GameRule::HigherIsBetter,
            Game::FifteenPuzzle => GameRule::LowerIsBetter,
        }
    }

    pub fn unit(&self) -> &'static str {
        self.rule().unit()
    }
}
