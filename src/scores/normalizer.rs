use std::cmp::Ordering;
use std::collections::HashSet;

use super::{GameRule, RankedSequence, RawScoreRecord, ScoreError, ScoreRecord};

/// Validates raw records, keeping their source order.
///
/// Fails on the first malformed record or on a repeated id.
pub fn parse_records(raw: &[RawScoreRecord]) -> Result<Vec<ScoreRecord>, ScoreError> {
    let mut seen_ids = HashSet::with_capacity(raw.len());

    raw.iter()
        .map(|raw_record| {
            if !seen_ids.insert(raw_record.id.as_str()) {
                return Err(ScoreError::DuplicateRecord(raw_record.id.clone()));
            }
            ScoreRecord::try_from(raw_record)
        })
        .collect()
}

/// Stably sorts records best first: ascending for `LowerIsBetter`,
/// descending for `HigherIsBetter`.
///
/// Equal scores keep their source order, so an ascending source comes out
/// unchanged under `LowerIsBetter`.
pub fn rank_records(mut records: Vec<ScoreRecord>, rule: GameRule) -> RankedSequence {
    match rule {
        GameRule::LowerIsBetter => records.sort_by(|a, b| compare_scores(a, b)),
        GameRule::HigherIsBetter => records.sort_by(|a, b| compare_scores(b, a)),
    }
    RankedSequence::from_ordered(records)
}

pub fn normalize(raw: &[RawScoreRecord], rule: GameRule) -> Result<RankedSequence, ScoreError> {
    let records = parse_records(raw)?;
    Ok(rank_records(records, rule))
}

fn compare_scores(a: &ScoreRecord, b: &ScoreRecord) -> Ordering {
    // Scores are finite once validated
    a.score.partial_cmp(&b.score).unwrap_or(Ordering::Equal)
}
