use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::ScoreSource;
use crate::games::Game;
use crate::scores::{compute_display_set, DisplaySet};

/// Display set computed from one snapshot revision.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Standings {
    pub game: Game,
    pub revision: u64,
    /// When the source delivered the snapshot
    pub received_at: DateTime<Utc>,
    pub display: DisplaySet,
}

/// Recomputes a viewer's leaderboard every time the game's collection changes
pub struct LeaderboardSubscription {
    game: Game,
    viewer_name: String,
    source: Arc<dyn ScoreSource>,
}

impl LeaderboardSubscription {
    pub fn new(game: Game, viewer_name: String, source: Arc<dyn ScoreSource>) -> Self {
        Self {
            game,
            viewer_name,
            source,
        }
    }

    /// Start the subscription - spawns a background task that recomputes the
    /// display set for each snapshot and keeps only the newest result
    pub async fn start(self) -> SubscriptionHandle {
        let id = Uuid::new_v4();
        let game = self.game;
        let viewer_name = self.viewer_name;
        let rule = game.rule();

        info!(
            subscription_id = %id,
            game = %game,
            viewer = %viewer_name,
            "Starting leaderboard subscription"
        );

        let mut stream = self.source.subscribe(game.collection()).await;
        let (sender, receiver) = watch::channel(None);

        let task = tokio::spawn(async move {
            while let Some(snapshot) = stream.next().await {
                match compute_display_set(&snapshot.records, rule, &viewer_name) {
                    Ok(display_set) => {
                        debug!(
                            subscription_id = %id,
                            revision = snapshot.revision,
                            received_at = %snapshot.received_at,
                            window = display_set.window.len(),
                            averages = display_set.averages.len(),
                            "Recomputed standings"
                        );

                        let standings = Standings {
                            game,
                            revision: snapshot.revision,
                            received_at: snapshot.received_at,
                            display: display_set,
                        };
                        if sender.send(Some(Arc::new(standings))).is_err() {
                            // Handle dropped
                            break;
                        }
                    }
                    Err(err) => {
                        warn!(
                            subscription_id = %id,
                            revision = snapshot.revision,
                            error = %err,
                            "Skipping malformed snapshot"
                        );
                    }
                }
            }

            info!(subscription_id = %id, "Leaderboard subscription ended");
        });

        SubscriptionHandle {
            id,
            receiver,
            task,
        }
    }
}

/// Owner side of a running subscription. Dropping it cancels the task.
pub struct SubscriptionHandle {
    id: Uuid,
    receiver: watch::Receiver<Option<Arc<Standings>>>,
    task: JoinHandle<()>,
}

impl SubscriptionHandle {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Most recent standings, if any snapshot has been computed yet
    pub fn latest(&self) -> Option<Arc<Standings>> {
        self.receiver.borrow().clone()
    }

    /// Waits for standings newer than the last ones observed.
    ///
    /// Returns `None` once the subscription has stopped.
    pub async fn changed(&mut self) -> Option<Arc<Standings>> {
        self.receiver.changed().await.ok()?;
        self.receiver.borrow_and_update().clone()
    }

    pub fn cancel(&self) {
        debug!(subscription_id = %self.id, "Cancelling leaderboard subscription");
        self.task.abort();
    }

}

impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
