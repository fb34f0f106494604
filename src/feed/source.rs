use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use crate::scores::RawScoreRecord;

/// Snapshots buffered per collection before slow subscribers start lagging
const COLLECTION_CAPACITY: usize = 16;

/// A complete, ordered view of one collection at a point in time.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub collection: String,
    /// Starts at 0 for a collection that was never published
    pub revision: u64,
    /// Ascending by score, equal scores in publication order
    pub records: Arc<[RawScoreRecord]>,
    pub received_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn empty(collection: &str) -> Self {
        Self {
            collection: collection.to_string(),
            revision: 0,
            records: Arc::from(Vec::new()),
            received_at: Utc::now(),
        }
    }
}

/// Push-based provider of per-collection score snapshots
#[async_trait]
pub trait ScoreSource: Send + Sync {
    /// Current snapshot of a collection
    async fn snapshot(&self, collection: &str) -> Snapshot;

    /// Stream yielding the current snapshot first, then every later one
    async fn subscribe(&self, collection: &str) -> SnapshotStream;
}

/// Receiving end of a collection subscription.
pub struct SnapshotStream {
    pending: Option<Snapshot>,
    receiver: broadcast::Receiver<Snapshot>,
}

impl SnapshotStream {
    pub fn new(current: Snapshot, receiver: broadcast::Receiver<Snapshot>) -> Self {
        Self {
            pending: Some(current),
            receiver,
        }
    }

    /// Waits for the next snapshot and returns the newest one available.
    ///
    /// Snapshots superseded while the caller was busy are skipped. Returns
    /// `None` once the source is gone.
    pub async fn next(&mut self) -> Option<Snapshot> {
        if let Some(current) = self.pending.take() {
            return Some(current);
        }

        let mut latest = loop {
            match self.receiver.recv().await {
                Ok(snapshot) => break snapshot,
                Err(RecvError::Lagged(skipped)) => {
                    debug!(skipped, "Subscriber lagged, skipping stale snapshots");
                }
                Err(RecvError::Closed) => return None,
            }
        };

        loop {
            match self.receiver.try_recv() {
                Ok(newer) => latest = newer,
                Err(TryRecvError::Lagged(_)) => continue,
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }

        Some(latest)
    }
}

struct Collection {
    current: Snapshot,
    sender: broadcast::Sender<Snapshot>,
}

impl Collection {
    fn new(name: &str) -> Self {
        let (sender, _) = broadcast::channel(COLLECTION_CAPACITY);
        Self {
            current: Snapshot::empty(name),
            sender,
        }
    }
}

/// In-process stand-in for the upstream record store.
#[derive(Default)]
pub struct InMemoryScoreFeed {
    collections: RwLock<HashMap<String, Collection>>,
}

impl InMemoryScoreFeed {
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
        }
    }

    /// Replaces the contents of a collection and notifies subscribers.
    ///
    /// Records are ordered ascending by score the way the upstream store
    /// orders its query results; records without a score sort first.
    /// Returns the new revision.
    #[instrument(skip(self, records), fields(record_count = records.len()))]
    pub async fn publish(&self, collection: &str, mut records: Vec<RawScoreRecord>) -> u64 {
        records.sort_by(|a, b| a.score.partial_cmp(&b.score).unwrap_or(Ordering::Equal));

        let mut collections = self.collections.write().await;
        let entry = collections
            .entry(collection.to_string())
            .or_insert_with(|| Collection::new(collection));

        let snapshot = Snapshot {
            collection: collection.to_string(),
            revision: entry.current.revision + 1,
            records: Arc::from(records),
            received_at: Utc::now(),
        };
        entry.current = snapshot.clone();

        match entry.sender.send(snapshot) {
            Ok(receiver_count) => {
                debug!(
                    revision = entry.current.revision,
                    receivers = receiver_count,
                    "Snapshot published"
                );
            }
            Err(_) => {
                debug!(revision = entry.current.revision, "Snapshot published with no receivers");
            }
        }

        entry.current.revision
    }
}

#[async_trait]
impl ScoreSource for InMemoryScoreFeed {
    async fn snapshot(&self, collection: &str) -> Snapshot {
        let collections = self.collections.read().await;
        collections
            .get(collection)
            .map(|entry| entry.current.clone())
            .unwrap_or_else(|| Snapshot::empty(collection))
    }

    #[instrument(skip(self))]
    async fn subscribe(&self, collection: &str) -> SnapshotStream {
        // Under the write lock no publish can fall between the snapshot and the receiver
        let mut collections = self.collections.write().await;
        let entry = collections
            .entry(collection.to_string())
            .or_insert_with(|| {
                debug!("Creating new collection channel for subscription");
                Collection::new(collection)
            });

        SnapshotStream::new(entry.current.clone(), entry.sender.subscribe())
    }
}
