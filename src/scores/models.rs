use serde::{Deserialize, Serialize};

use super::ScoreError;

/// A score record as delivered by the upstream source, before validation.
///
/// Missing fields are kept as `None` so the conversion into [`ScoreRecord`]
/// can reject them instead of defaulting to zero or empty values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawScoreRecord {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
}

impl RawScoreRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, score: f64) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
            score: Some(score),
        }
    }
}

/// A validated score record. A player may own many records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub id: String,
    pub name: String,
    pub score: f64,
}

impl TryFrom<&RawScoreRecord> for ScoreRecord {
    type Error = ScoreError;

    fn try_from(raw: &RawScoreRecord) -> Result<Self, Self::Error> {
        let name = match raw.name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            Some(_) => return Err(ScoreError::malformed(&raw.id, "empty name")),
            None => return Err(ScoreError::malformed(&raw.id, "missing name")),
        };

        let score = match raw.score {
            Some(score) if score.is_finite() => score,
            Some(score) => {
                return Err(ScoreError::malformed(
                    &raw.id,
                    format!("non-finite score {score}"),
                ))
            }
            None => return Err(ScoreError::malformed(&raw.id, "missing score")),
        };

        Ok(ScoreRecord {
            id: raw.id.clone(),
            name,
            score,
        })
    }
}

/// Which direction of score ranks better for a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameRule {
    /// Point-maximizing games
    HigherIsBetter,
    /// Games scored by move count or time
    LowerIsBetter,
}

impl GameRule {
    /// Unit shown next to average scores
    pub fn unit(&self) -> &'static str {
        match self {
            GameRule::HigherIsBetter => "points",
            GameRule::LowerIsBetter => "move(s)",
        }
    }
}

/// Records ordered best first according to a [`GameRule`].
///
/// Equal scores keep their relative order from the source stream.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankedSequence {
    records: Vec<ScoreRecord>,
}

impl RankedSequence {
    pub(crate) fn from_ordered(records: Vec<ScoreRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[ScoreRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Entries with their 1-based ranks, in sequence order
    pub fn entries(&self) -> impl Iterator<Item = RankedEntry> + '_ {
        self.records
            .iter()
            .enumerate()
            .map(|(index, record)| RankedEntry::at_index(record.clone(), index))
    }

    /// All records owned by `name`, best first
    pub fn records_for<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a ScoreRecord> {
        self.records.iter().filter(move |record| record.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub record: ScoreRecord,
    pub rank: usize,
}

impl RankedEntry {
    pub fn at_index(record: ScoreRecord, index: usize) -> Self {
        Self {
            record,
            rank: index + 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateEntry {
    pub name: String,
    pub mean_score: f64,
    pub is_viewer: bool,
}

/// Everything the presentation layer needs for one snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplaySet {
    pub window: Vec<RankedEntry>,
    pub viewer_row: Option<RankedEntry>,
    pub averages: Vec<AggregateEntry>,
}
