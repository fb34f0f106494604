// Public API - what other modules can use
pub use handlers::{get_leaderboard, list_games};
pub use socket::leaderboard_socket;
pub use types::{GameSummary, LeaderboardResponse, LeaderboardRow, ViewerQuery};

// Internal modules
mod handlers;
mod socket;
mod types;

use axum::{routing::get, Router};

use crate::shared::AppState;

/// Routes of the leaderboard API
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/games", get(list_games))
        .route("/leaderboard/:game", get(get_leaderboard))
        .route("/leaderboard/:game/ws", get(leaderboard_socket))
        .with_state(state)
}
