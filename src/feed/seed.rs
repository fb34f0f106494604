use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

use super::{FeedError, InMemoryScoreFeed};
use crate::scores::RawScoreRecord;

/// Collection name -> records in publication order
pub type SeedData = BTreeMap<String, Vec<RawScoreRecord>>;

pub async fn load_seed(path: &Path) -> Result<SeedData, FeedError> {
    let contents = tokio::fs::read_to_string(path).await?;
    parse_seed(&contents)
}

pub fn parse_seed(contents: &str) -> Result<SeedData, FeedError> {
    Ok(serde_json::from_str(contents)?)
}

/// Publishes every seeded collection, returning how many were published
pub async fn apply_seed(feed: &InMemoryScoreFeed, seed: SeedData) -> usize {
    let mut published = 0;
    for (collection, records) in seed {
        let record_count = records.len();
        feed.publish(&collection, records).await;
        info!(collection = %collection, record_count, "Seeded collection");
        published += 1;
    }
    published
}
