// Score ranking and aggregation pipeline
//
// raw snapshot -> normalizer -> ranked sequence -> window / viewer rank
//              -> per-player averages -> display set
//
// Every stage is a pure function; a new snapshot is recomputed from scratch.

pub mod averager;
pub mod display;
pub mod normalizer;
pub mod rank;
pub mod window;

mod errors;
pub mod models;

pub use display::{assemble_display_set, compute_display_set};
pub use errors::ScoreError;
pub use models::*;

/// Number of rows in the visible leaderboard
pub const LEADERBOARD_WINDOW: usize = 10;
