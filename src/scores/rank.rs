use super::{RankedEntry, RankedSequence};

/// Finds the viewer's best record across the whole sequence.
///
/// Returns `None` when the viewer has no record.
pub fn resolve_viewer_rank(sequence: &RankedSequence, viewer_name: &str) -> Option<RankedEntry> {
    sequence
        .records()
        .iter()
        .position(|record| record.name == viewer_name)
        .map(|index| RankedEntry::at_index(sequence.records()[index].clone(), index))
}
