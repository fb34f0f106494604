use axum::{
    extract::{ws::Message, Path, Query, State, WebSocketUpgrade},
    response::Response,
};
use futures::{Sink, SinkExt, Stream, StreamExt};
use std::fmt::Display;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use super::handlers::{parse_game, validate_viewer};
use super::types::{LeaderboardResponse, ViewerQuery};
use crate::feed::{LeaderboardSubscription, ScoreSource};
use crate::games::Game;
use crate::shared::{AppError, AppState};

/// WebSocket handler pushing a fresh leaderboard on every snapshot
///
/// GET /leaderboard/:game/ws?viewer=NAME
#[instrument(name = "leaderboard_socket", skip(ws, state))]
pub async fn leaderboard_socket(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    Path(game): Path<String>,
    Query(query): Query<ViewerQuery>,
) -> Result<Response, AppError> {
    let game = parse_game(&game)?;
    let viewer = validate_viewer(query.viewer)?;

    info!(game = %game, viewer = %viewer, "Upgrading leaderboard socket");

    let source = Arc::clone(&state.score_source);
    Ok(ws.on_upgrade(move |socket| {
        let (sender, receiver) = socket.split();
        stream_standings(sender, receiver, game, viewer, source)
    }))
}

/// Sends standings until either side goes away, then cancels the subscription
async fn stream_standings<S, R, E>(
    mut sender: S,
    mut receiver: R,
    game: Game,
    viewer: String,
    source: Arc<dyn ScoreSource>,
) where
    S: Sink<Message> + Unpin,
    R: Stream<Item = Result<Message, E>> + Unpin,
    E: Display,
{
    let mut handle = LeaderboardSubscription::new(game, viewer.clone(), source)
        .start()
        .await;

    loop {
        tokio::select! {
            standings = handle.changed() => {
                match standings {
                    Some(standings) => {
                        let response = LeaderboardResponse::from_standings(&standings, &viewer);
                        let text = match serde_json::to_string(&response) {
                            Ok(text) => text,
                            Err(e) => {
                                warn!(error = %e, "Failed to serialize leaderboard");
                                continue;
                            }
                        };
                        if sender.send(Message::Text(text)).await.is_err() {
                            break;
                        }
                    }
                    None => break, // Subscription stopped
                }
            }

            incoming = receiver.next() => {
                match incoming {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {} // Clients only listen
                    Some(Err(e)) => {
                        debug!(error = %e, "Leaderboard socket receive failed");
                        break;
                    }
                }
            }
        }
    }

    handle.cancel();
    let _ = sender.send(Message::Close(None)).await;

    info!(
        subscription_id = %handle.id(),
        game = %game,
        viewer = %viewer,
        "Leaderboard socket closed"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::InMemoryScoreFeed;
    use crate::scores::RawScoreRecord;
    use futures::channel::mpsc;
    use std::time::Duration;
    use tokio::task::JoinHandle;
    use tokio::time::timeout;

    type Inbound = mpsc::UnboundedSender<Result<Message, axum::Error>>;
    type Outbound = mpsc::UnboundedReceiver<Message>;

    fn connect(
        feed: &Arc<InMemoryScoreFeed>,
        game: Game,
        viewer: &str,
    ) -> (Inbound, Outbound, JoinHandle<()>) {
        let (client_tx, server_rx) = mpsc::unbounded();
        let (server_tx, client_rx) = mpsc::unbounded();
        let source: Arc<dyn ScoreSource> = feed.clone();
        let task = tokio::spawn(stream_standings(
            server_tx,
            server_rx,
            game,
            viewer.to_string(),
            source,
        ));
        (client_tx, client_rx, task)
    }

    async fn next_frame(outbound: &mut Outbound) -> LeaderboardResponse {
        let frame = timeout(Duration::from_secs(2), outbound.next())
            .await
            .expect("socket should push a frame")
            .expect("socket closed early");
        match frame {
            Message::Text(text) => serde_json::from_str(&text).unwrap(),
            other => panic!("expected a text frame, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn pushes_a_frame_per_snapshot() {
        let feed = Arc::new(InMemoryScoreFeed::new());
        let collection = Game::Snake.collection();
        feed.publish(collection, vec![RawScoreRecord::new("1", "alice", 10.0)])
            .await;

        let (_inbound, mut outbound, _task) = connect(&feed, Game::Snake, "alice");

        let first = next_frame(&mut outbound).await;
        assert_eq!(first.revision, 1);
        assert!(first.rows[0].is_viewer);

        feed.publish(
            collection,
            vec![
                RawScoreRecord::new("1", "alice", 10.0),
                RawScoreRecord::new("2", "bob", 30.0),
            ],
        )
        .await;

        let second = next_frame(&mut outbound).await;
        assert_eq!(second.revision, 2);
        assert_eq!(second.rows[0].name, "bob");
        assert_eq!(second.rows[1].rank, 2);
    }

    #[tokio::test]
    async fn client_close_ends_the_stream() {
        let feed = Arc::new(InMemoryScoreFeed::new());
        let (inbound, mut outbound, task) = connect(&feed, Game::FifteenPuzzle, "alice");
        assert_eq!(next_frame(&mut outbound).await.revision, 0);

        inbound.unbounded_send(Ok(Message::Close(None))).unwrap();

        timeout(Duration::from_secs(2), task)
            .await
            .expect("socket loop should stop after close")
            .unwrap();

        // Server answers with a close frame and then hangs up
        assert!(matches!(outbound.next().await, Some(Message::Close(None))));
        feed.publish(
            Game::FifteenPuzzle.collection(),
            vec![RawScoreRecord::new("1", "alice", 50.0)],
        )
        .await;
        assert!(outbound.next().await.is_none());
    }

    #[tokio::test]
    async fn dropped_client_ends_the_stream() {
        let feed = Arc::new(InMemoryScoreFeed::new());
        let (inbound, mut outbound, task) = connect(&feed, Game::Reacteroids, "alice");
        next_frame(&mut outbound).await;

        drop(inbound);

        timeout(Duration::from_secs(2), task)
            .await
            .expect("socket loop should stop when the client goes away")
            .unwrap();
    }
}
