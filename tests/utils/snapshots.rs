use scoreboard::RawScoreRecord;

// ============================================================================
// Snapshot Builders
// ============================================================================

/// Builds raw snapshots ordered the way the upstream source delivers them:
/// ascending by score, equal scores in insertion order.
pub struct SnapshotBuilder {
    records: Vec<RawScoreRecord>,
}

#[allow(dead_code)]
impl SnapshotBuilder {
    pub fn new() -> Self {
        Self { records: vec![] }
    }

    pub fn with_score(mut self, name: &str, score: f64) -> Self {
        let id = format!("rec-{}", self.records.len());
        self.records.push(RawScoreRecord::new(id, name, score));
        self
    }

    pub fn with_scores(self, name: &str, scores: &[f64]) -> Self {
        scores
            .iter()
            .fold(self, |builder, score| builder.with_score(name, *score))
    }

    /// One record each for `player-1..=player-n` with the given scores
    pub fn with_players(self, scores: impl IntoIterator<Item = f64>) -> Self {
        scores
            .into_iter()
            .enumerate()
            .fold(self, |builder, (i, score)| {
                builder.with_score(&format!("player-{}", i + 1), score)
            })
    }

    pub fn with_record(mut self, record: RawScoreRecord) -> Self {
        self.records.push(record);
        self
    }

    /// Records sorted ascending, as a source snapshot
    pub fn build(mut self) -> Vec<RawScoreRecord> {
        self.records
            .sort_by(|a, b| a.score.partial_cmp(&b.score).unwrap());
        self.records
    }

    /// Records in insertion order, for publishing to a feed
    pub fn build_unsorted(self) -> Vec<RawScoreRecord> {
        self.records
    }
}
