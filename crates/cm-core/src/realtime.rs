//! Bridge between the backend's realtime channel and the local message
//! cache. One subscription per mounted view; every insert event for the
//! watched room triggers a full re-fetch of that room's messages. The
//! event payload is never merged in directly, since ordering and sender
//! enrichment require a fresh read anyway.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::store::MarketStore;

/// Row-insert notification from the message table. Deliberately thin;
/// consumers re-fetch instead of trusting the payload.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageInsertEvent {
    pub room_id: String,
    pub message_id: String,
}

/// A live per-room channel. Dropping the receiver ends the subscription;
/// the provider observes the closed channel and releases the stream.
pub struct EventSubscription {
    pub room_id: String,
    pub events: mpsc::Receiver<MessageInsertEvent>,
}

/// Source of message-insert events, one channel per room id.
pub trait MessageEvents: Send + Sync {
    fn subscribe(&self, room_id: &str) -> EventSubscription;
}

/// Holds at most one subscription. `set_room` tears the previous one down
/// before establishing the next, so switching rooms never leaves two
/// streams live.
pub struct RealtimeBridge {
    events: Arc<dyn MessageEvents>,
    store: Arc<dyn MarketStore>,
    active: Option<ActiveSubscription>,
}

struct ActiveSubscription {
    room_id: String,
    task: JoinHandle<()>,
}

impl RealtimeBridge {
    pub fn new(events: Arc<dyn MessageEvents>, store: Arc<dyn MarketStore>) -> Self {
        Self {
            events,
            store,
            active: None,
        }
    }

    /// Currently subscribed room, if any.
    pub fn room(&self) -> Option<&str> {
        self.active.as_ref().map(|sub| sub.room_id.as_str())
    }

    /// Point the bridge at a room (or at nothing on unmount). A no-op when
    /// the room is unchanged. Must be called from within a tokio runtime.
    pub fn set_room(&mut self, room_id: Option<&str>) {
        if self.room() == room_id {
            return;
        }

        if let Some(previous) = self.active.take() {
            debug!(room_id = %previous.room_id, "unsubscribing from room");
            previous.task.abort();
        }

        let Some(room_id) = room_id else {
            return;
        };

        let subscription = self.events.subscribe(room_id);
        info!(room_id, "subscribed to room message stream");

        let store = self.store.clone();
        let room = room_id.to_string();
        let mut events = subscription.events;

        let task = tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                if event.room_id != room {
                    debug!(event_room = %event.room_id, room = %room, "ignoring event for other room");
                    continue;
                }
                if let Err(err) = store.fetch_messages(&room).await {
                    // no retry here; the next insert event refreshes again
                    warn!(room = %room, error = %err, "message re-fetch failed");
                }
            }
        });

        self.active = Some(ActiveSubscription {
            room_id: room_id.to_string(),
            task,
        });
    }
}

impl Drop for RealtimeBridge {
    fn drop(&mut self) {
        if let Some(active) = self.active.take() {
            active.task.abort();
        }
    }
}
