//! Boundary to the managed backend. The concrete client (auth, row
//! storage, realtime transport) lives outside this crate; flows receive a
//! handle rather than reading a global, so tests can substitute an
//! in-memory implementation.

use async_trait::async_trait;
use thiserror::Error;

use crate::schema::{ChatRoom, ChatRoomInsert, MatchInsert};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    /// The backend received the request and refused it (constraint
    /// violation, row-level policy, validation).
    #[error("backend rejected request: {0}")]
    Rejected(String),
    /// The backend could not be reached or timed out.
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait MarketStore: Send + Sync {
    /// Insert a match row. The id is the derived composite key, so the
    /// backend rejects a second insert for the same pair.
    async fn create_match(&self, record: &MatchInsert) -> Result<(), StoreError>;

    /// Create a direct chat room and return the stored row.
    async fn create_chat_room(&self, room: &ChatRoomInsert) -> Result<ChatRoom, StoreError>;

    /// Locally cached list of the current user's chat rooms.
    async fn chat_rooms(&self) -> Vec<ChatRoom>;

    /// Re-fetch a room's message list into the store's local state.
    /// Ordering and sender enrichment come from the fresh read; event
    /// payloads are never merged in directly.
    async fn fetch_messages(&self, room_id: &str) -> Result<(), StoreError>;
}
