pub mod chat_room;
pub mod proposal;

/// Blocking user-visible failure notice. Shown on submission/creation
/// failure only; success paths never call it.
pub trait Notifier: Send + Sync {
    fn failure(&self, message: &str);
}

/// Request to route the GUI to a room view.
pub trait Navigator: Send + Sync {
    fn open_room(&self, room_id: &str);
}
