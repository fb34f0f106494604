// Upstream score feed and live leaderboard subscriptions

// Public API - what other modules can use
pub use seed::{apply_seed, load_seed, parse_seed, SeedData};
pub use source::{InMemoryScoreFeed, ScoreSource, Snapshot, SnapshotStream};
pub use subscription::{LeaderboardSubscription, Standings, SubscriptionHandle};

// Internal modules
mod seed;
mod source;
mod subscription;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Failed to read seed file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse seed file: {0}")]
    Parse(#[from] serde_json::Error),
}
