// Library crate for the scoreboard service
// This file exposes the public API for integration tests

pub mod config;
pub mod feed;
pub mod games;
pub mod leaderboard;
pub mod scores;
pub mod shared;

// Re-export commonly used types for easier access in tests
pub use feed::{InMemoryScoreFeed, LeaderboardSubscription, ScoreSource, Standings};
pub use games::Game;
pub use scores::{compute_display_set, DisplaySet, GameRule, RawScoreRecord, ScoreError};
pub use shared::{AppError, AppState};
