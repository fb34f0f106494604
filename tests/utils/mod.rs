pub mod snapshots;

// Re-export main utilities for use by test files
#[allow(unused_imports)]
pub use snapshots::SnapshotBuilder;
