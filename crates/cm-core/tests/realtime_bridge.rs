use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;

use cm_core::realtime::{EventSubscription, MessageEvents, MessageInsertEvent, RealtimeBridge};
use cm_core::schema::{ChatRoom, ChatRoomInsert, MatchInsert};
use cm_core::store::{MarketStore, StoreError};

#[derive(Default)]
struct MockEvents {
    senders: Mutex<HashMap<String, mpsc::Sender<MessageInsertEvent>>>,
    subscribe_calls: Mutex<usize>,
}

impl MockEvents {
    async fn emit(&self, channel_room: &str, event: MessageInsertEvent) {
        let sender = self
            .senders
            .lock()
            .unwrap()
            .get(channel_room)
            .cloned()
            .expect("no subscription for room");
        sender.send(event).await.expect("bridge dropped receiver");
    }

    fn channel_closed(&self, room: &str) -> bool {
        self.senders
            .lock()
            .unwrap()
            .get(room)
            .map(|sender| sender.is_closed())
            .unwrap_or(true)
    }
}

impl MessageEvents for MockEvents {
    fn subscribe(&self, room_id: &str) -> EventSubscription {
        let (tx, rx) = mpsc::channel(16);
        self.senders.lock().unwrap().insert(room_id.to_string(), tx);
        *self.subscribe_calls.lock().unwrap() += 1;
        EventSubscription {
            room_id: room_id.to_string(),
            events: rx,
        }
    }
}

#[derive(Default)]
struct CountingStore {
    fetches: Mutex<HashMap<String, usize>>,
    fail_first_fetch: bool,
}

impl CountingStore {
    fn fetch_count(&self, room: &str) -> usize {
        self.fetches.lock().unwrap().get(room).copied().unwrap_or(0)
    }
}

#[async_trait]
impl MarketStore for CountingStore {
    async fn create_match(&self, _record: &MatchInsert) -> Result<(), StoreError> {
        Ok(())
    }

    async fn create_chat_room(&self, _room: &ChatRoomInsert) -> Result<ChatRoom, StoreError> {
        Err(StoreError::Rejected("not used".into()))
    }

    async fn chat_rooms(&self) -> Vec<ChatRoom> {
        vec![]
    }

    async fn fetch_messages(&self, room_id: &str) -> Result<(), StoreError> {
        let mut fetches = self.fetches.lock().unwrap();
        let count = fetches.entry(room_id.to_string()).or_insert(0);
        *count += 1;
        if self.fail_first_fetch && *count == 1 {
            return Err(StoreError::Unavailable("connection reset".into()));
        }
        Ok(())
    }
}

async fn wait_until(mut condition: impl FnMut() -> bool) {
    for _ in 0..200 {
        if condition() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("condition not reached within 1s");
}

fn insert(room: &str, message: &str) -> MessageInsertEvent {
    MessageInsertEvent {
        room_id: room.to_string(),
        message_id: message.to_string(),
    }
}

#[tokio::test]
async fn insert_event_triggers_exactly_one_refetch() {
    let events = Arc::new(MockEvents::default());
    let store = Arc::new(CountingStore::default());
    let mut bridge = RealtimeBridge::new(events.clone(), store.clone());

    bridge.set_room(Some("room-a"));
    events.emit("room-a", insert("room-a", "m1")).await;

    wait_until(|| store.fetch_count("room-a") == 1).await;
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(store.fetch_count("room-a"), 1);

    events.emit("room-a", insert("room-a", "m2")).await;
    wait_until(|| store.fetch_count("room-a") == 2).await;
}

#[tokio::test]
async fn fetch_failure_is_not_retried_and_does_not_kill_the_subscription() {
    cm_core::logging::init("cm-core-tests");
    let events = Arc::new(MockEvents::default());
    let store = Arc::new(CountingStore {
        fail_first_fetch: true,
        ..CountingStore::default()
    });
    let mut bridge = RealtimeBridge::new(events.clone(), store.clone());

    bridge.set_room(Some("room-a"));
    events.emit("room-a", insert("room-a", "m1")).await;

    // the failed fetch is logged and left alone: exactly one attempt
    wait_until(|| store.fetch_count("room-a") == 1).await;
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(store.fetch_count("room-a"), 1);
    assert!(!events.channel_closed("room-a"));

    // the next insert event refreshes again, this time successfully
    events.emit("room-a", insert("room-a", "m2")).await;
    wait_until(|| store.fetch_count("room-a") == 2).await;
}

#[tokio::test]
async fn events_for_other_rooms_are_ignored() {
    let events = Arc::new(MockEvents::default());
    let store = Arc::new(CountingStore::default());
    let mut bridge = RealtimeBridge::new(events.clone(), store.clone());

    bridge.set_room(Some("room-a"));
    // mis-delivered payload on room-a's channel
    events.emit("room-a", insert("room-b", "m1")).await;
    events.emit("room-a", insert("room-a", "m2")).await;

    wait_until(|| store.fetch_count("room-a") == 1).await;
    assert_eq!(store.fetch_count("room-b"), 0);
}

#[tokio::test]
async fn switching_rooms_tears_down_the_old_subscription() {
    let events = Arc::new(MockEvents::default());
    let store = Arc::new(CountingStore::default());
    let mut bridge = RealtimeBridge::new(events.clone(), store.clone());

    bridge.set_room(Some("room-a"));
    assert_eq!(bridge.room(), Some("room-a"));

    bridge.set_room(Some("room-b"));
    assert_eq!(bridge.room(), Some("room-b"));

    wait_until(|| events.channel_closed("room-a")).await;
    assert!(!events.channel_closed("room-b"));

    events.emit("room-b", insert("room-b", "m1")).await;
    wait_until(|| store.fetch_count("room-b") == 1).await;
    assert_eq!(store.fetch_count("room-a"), 0);
}

#[tokio::test]
async fn unchanged_room_does_not_resubscribe() {
    let events = Arc::new(MockEvents::default());
    let store = Arc::new(CountingStore::default());
    let mut bridge = RealtimeBridge::new(events.clone(), store.clone());

    bridge.set_room(Some("room-a"));
    bridge.set_room(Some("room-a"));

    assert_eq!(*events.subscribe_calls.lock().unwrap(), 1);
    assert!(!events.channel_closed("room-a"));
}

#[tokio::test]
async fn unmount_and_drop_end_the_stream() {
    let events = Arc::new(MockEvents::default());
    let store = Arc::new(CountingStore::default());

    let mut bridge = RealtimeBridge::new(events.clone(), store.clone());
    bridge.set_room(Some("room-a"));
    bridge.set_room(None);
    assert_eq!(bridge.room(), None);
    wait_until(|| events.channel_closed("room-a")).await;

    bridge.set_room(Some("room-b"));
    drop(bridge);
    wait_until(|| events.channel_closed("room-b")).await;
}
