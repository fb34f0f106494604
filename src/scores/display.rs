use super::{
    averager::average_by_player, normalizer::normalize, rank::resolve_viewer_rank,
    window::build_window, DisplaySet, GameRule, RankedSequence, RawScoreRecord, ScoreError,
    ScoreRecord, LEADERBOARD_WINDOW,
};

/// Runs the whole pipeline over one source snapshot.
///
/// Only malformed input fails; empty snapshots and absent viewers produce
/// empty parts of the display set.
pub fn compute_display_set(
    raw_snapshot: &[RawScoreRecord],
    rule: GameRule,
    viewer_name: &str,
) -> Result<DisplaySet, ScoreError> {
    let sequence = normalize(raw_snapshot, rule)?;
    Ok(assemble_display_set(&sequence, viewer_name))
}

pub fn assemble_display_set(sequence: &RankedSequence, viewer_name: &str) -> DisplaySet {
    let window = build_window(sequence, LEADERBOARD_WINDOW, viewer_name);

    // Viewer rows already inside the window are not repeated
    let viewer_row = resolve_viewer_rank(sequence, viewer_name)
        .filter(|entry| entry.rank > LEADERBOARD_WINDOW);

    // Opponents contribute their full history, not just their windowed rows
    let comparison_records: Vec<&ScoreRecord> = sequence
        .records_for(viewer_name)
        .chain(
            window
                .opponent_names
                .iter()
                .flat_map(|name| sequence.records_for(name)),
        )
        .collect();
    let averages = average_by_player(comparison_records, viewer_name);

    DisplaySet {
        window: window.entries,
        viewer_row,
        averages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(id: &str, name: &str, score: f64) -> RawScoreRecord {
        RawScoreRecord::new(id, name, score)
    }

    /// Ascending by score, as the source delivers it
    fn ascending(records: &[(&str, f64)]) -> Vec<RawScoreRecord> {
        let mut raw_records: Vec<RawScoreRecord> = records
            .iter()
            .enumerate()
            .map(|(i, (name, score))| raw(&format!("r{i}"), name, *score))
            .collect();
        raw_records.sort_by(|a, b| a.score.partial_cmp(&b.score).unwrap());
        raw_records
    }

    #[test]
    fn viewer_inside_window_has_no_viewer_row() {
        let snapshot = ascending(&[("me", 50.0), ("a", 10.0), ("b", 20.0)]);
        let display = compute_display_set(&snapshot, GameRule::HigherIsBetter, "me").unwrap();

        assert_eq!(display.window[0].record.name, "me");
        assert!(display.viewer_row.is_none());
    }

    #[test]
    fn viewer_row_shown_when_rank_exceeds_window() {
        let mut records: Vec<(String, f64)> = (0..10).map(|i| (format!("p{i}"), i as f64)).collect();
        records.push(("me".into(), 99.0));
        let borrowed: Vec<(&str, f64)> = records.iter().map(|(n, s)| (n.as_str(), *s)).collect();

        let display =
            compute_display_set(&ascending(&borrowed), GameRule::LowerIsBetter, "me").unwrap();

        let viewer_row = display.viewer_row.unwrap();
        assert_eq!(viewer_row.rank, 11);
        assert_eq!(viewer_row.record.score, 99.0);
    }

    #[test]
    fn viewer_at_exact_window_edge_has_no_viewer_row() {
        let mut records: Vec<(String, f64)> = (0..9).map(|i| (format!("p{i}"), i as f64)).collect();
        records.push(("me".into(), 50.0));
        records.push(("late".into(), 60.0));
        let borrowed: Vec<(&str, f64)> = records.iter().map(|(n, s)| (n.as_str(), *s)).collect();

        let display =
            compute_display_set(&ascending(&borrowed), GameRule::LowerIsBetter, "me").unwrap();

        assert_eq!(display.window[9].record.name, "me");
        assert!(display.viewer_row.is_none());
    }

    #[test]
    fn opponent_average_uses_records_outside_window() {
        // "a" holds rank 1 and also the worst score, far below the window
        let mut records: Vec<(String, f64)> =
            (0..12).map(|i| (format!("p{i}"), 50.0 + i as f64)).collect();
        records.push(("a".into(), 100.0));
        records.push(("a".into(), 0.0));
        let borrowed: Vec<(&str, f64)> = records.iter().map(|(n, s)| (n.as_str(), *s)).collect();

        let display =
            compute_display_set(&ascending(&borrowed), GameRule::HigherIsBetter, "me").unwrap();

        let a = display.averages.iter().find(|e| e.name == "a").unwrap();
        assert_eq!(a.mean_score, 50.0);
    }

    #[test]
    fn viewer_average_covers_every_attempt_and_comes_first() {
        let snapshot = ascending(&[("me", 2.0), ("x", 5.0), ("me", 4.0), ("y", 9.0)]);
        let display = compute_display_set(&snapshot, GameRule::HigherIsBetter, "me").unwrap();

        assert_eq!(display.averages[0].name, "me");
        assert!(display.averages[0].is_viewer);
        assert_eq!(display.averages[0].mean_score, 3.0);

        let names: Vec<&str> = display.averages.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["me", "y", "x"]);
    }

    #[test]
    fn absent_viewer_is_left_out_of_averages() {
        let snapshot = ascending(&[("a", 1.0), ("b", 2.0)]);
        let display = compute_display_set(&snapshot, GameRule::HigherIsBetter, "me").unwrap();

        assert!(display.viewer_row.is_none());
        assert!(display.averages.iter().all(|e| !e.is_viewer));
        assert_eq!(display.averages.len(), 2);
    }

    #[test]
    fn empty_snapshot_gives_empty_display() {
        let display = compute_display_set(&[], GameRule::LowerIsBetter, "me").unwrap();
        assert_eq!(display, DisplaySet::default());
    }

    #[test]
    fn identical_input_gives_identical_output() {
        let snapshot = ascending(&[("a", 3.0), ("b", 3.0), ("me", 1.0), ("a", 7.0)]);

        let first = compute_display_set(&snapshot, GameRule::HigherIsBetter, "me").unwrap();
        let second = compute_display_set(&snapshot, GameRule::HigherIsBetter, "me").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn malformed_snapshot_is_an_error() {
        let snapshot = vec![RawScoreRecord {
            id: "bad".into(),
            name: None,
            score: Some(1.0),
        }];

        let result = compute_display_set(&snapshot, GameRule::HigherIsBetter, "me");
        assert!(matches!(result, Err(ScoreError::MalformedRecord { .. })));
    }
}
