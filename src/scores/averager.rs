use std::collections::HashMap;

use super::{AggregateEntry, ScoreRecord};

/// A player's records from the aggregation input.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerGroup<'a> {
    pub name: &'a str,
    pub records: Vec<&'a ScoreRecord>,
}

/// Groups records by player name. Groups appear in first-seen order.
pub fn group_by_player<'a, I>(records: I) -> Vec<PlayerGroup<'a>>
where
    I: IntoIterator<Item = &'a ScoreRecord>,
{
    let mut index_by_name: HashMap<&'a str, usize> = HashMap::new();
    let mut groups: Vec<PlayerGroup<'a>> = Vec::new();

    for record in records {
        match index_by_name.get(record.name.as_str()) {
            Some(&index) => groups[index].records.push(record),
            None => {
                index_by_name.insert(record.name.as_str(), groups.len());
                groups.push(PlayerGroup {
                    name: record.name.as_str(),
                    records: vec![record],
                });
            }
        }
    }

    groups
}

/// Reduces each group to the mean of its scores.
///
/// Groups are never empty since they are built from present records.
pub fn mean_scores(groups: &[PlayerGroup<'_>], viewer_name: &str) -> Vec<AggregateEntry> {
    groups
        .iter()
        .map(|group| {
            let total: f64 = group.records.iter().map(|record| record.score).sum();
            AggregateEntry {
                name: group.name.to_string(),
                mean_score: total / group.records.len() as f64,
                is_viewer: group.name == viewer_name,
            }
        })
        .collect()
}

pub fn average_by_player<'a, I>(records: I, viewer_name: &str) -> Vec<AggregateEntry>
where
    I: IntoIterator<Item = &'a ScoreRecord>,
{
    mean_scores(&group_by_player(records), viewer_name)
}
