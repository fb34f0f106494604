use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoreError {
    #[error("Malformed record {id}: {reason}")]
    MalformedRecord { id: String, reason: String },

    #[error("Duplicate record id in snapshot: {0}")]
    DuplicateRecord(String),
}

impl ScoreError {
    pub fn malformed(id: impl Into<String>, reason: impl Into<String>) -> Self {
        ScoreError::MalformedRecord {
            id: id.into(),
            reason: reason.into(),
        }
    }
}
