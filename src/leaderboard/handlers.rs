use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::str::FromStr;
use strum::IntoEnumIterator;
use tracing::{info, instrument};

use super::types::{GameSummary, LeaderboardResponse, ViewerQuery};
use crate::games::Game;
use crate::scores::compute_display_set;
use crate::shared::{AppError, AppState};

/// HTTP handler for listing the games that have leaderboards
///
/// GET /games
#[instrument(name = "list_games")]
pub async fn list_games() -> Json<Vec<GameSummary>> {
    Json(Game::iter().map(GameSummary::from).collect())
}

/// HTTP handler returning the leaderboard for the current snapshot
///
/// GET /leaderboard/:game?viewer=NAME
#[instrument(name = "get_leaderboard", skip(state))]
pub async fn get_leaderboard(
    State(state): State<AppState>,
    Path(game): Path<String>,
    Query(query): Query<ViewerQuery>,
) -> Result<Json<LeaderboardResponse>, AppError> {
    let game = parse_game(&game)?;
    let viewer = validate_viewer(query.viewer)?;

    let snapshot = state.score_source.snapshot(game.collection()).await;
    let display_set = compute_display_set(&snapshot.records, game.rule(), &viewer)?;

    info!(
        game = %game,
        revision = snapshot.revision,
        window = display_set.window.len(),
        viewer_ranked = display_set.viewer_row.is_some(),
        "Leaderboard computed"
    );

    Ok(Json(LeaderboardResponse::new(
        game,
        snapshot.revision,
        snapshot.received_at,
        &display_set,
        &viewer,
    )))
}

pub(super) fn parse_game(raw: &str) -> Result<Game, AppError> {
    Game::from_str(raw).map_err(|_| AppError::NotFound(format!("Unknown game: {raw}")))
}

pub(super) fn validate_viewer(viewer: String) -> Result<String, AppError> {
    if viewer.trim().is_empty() {
        return Err(AppError::BadRequest("viewer must not be empty".to_string()));
    }
    Ok(viewer)
}
