use super::{RankedEntry, RankedSequence};

/// The visible top slice of a ranked sequence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeaderboardWindow {
    pub entries: Vec<RankedEntry>,
    /// Distinct non-viewer names in the window, first-seen order
    pub opponent_names: Vec<String>,
}

pub fn build_window(sequence: &RankedSequence, size: usize, viewer_name: &str) -> LeaderboardWindow {
    let shown = size.min(sequence.len());
    let entries: Vec<RankedEntry> = sequence.entries().take(shown).collect();

    let mut opponent_names: Vec<String> = Vec::new();
    for entry in &entries {
        let name = &entry.record.name;
        if name != viewer_name && !opponent_names.contains(name) {
            opponent_names.push(name.clone());
        }
    }

    LeaderboardWindow {
        entries,
        opponent_names,
    }
}
