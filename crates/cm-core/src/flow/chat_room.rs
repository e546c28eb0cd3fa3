use std::collections::HashSet;
use std::sync::Arc;

use tracing::{info, instrument, warn};

use super::{Navigator, Notifier};
use crate::matching::room_key;
use crate::schema::{ChatRoom, ChatRoomInsert, RoomType};
use crate::store::{MarketStore, StoreError};
use crate::{JobPost, TalentProfile};

/// Finds or creates the direct room for a match and routes the GUI to it.
///
/// Lookup is by deterministic room key, derived from the (job, talent)
/// pair the same way as the match id. Rooms created before the key was
/// introduced are matched by participant pair plus job title instead.
pub struct ChatRoomFlow {
    store: Arc<dyn MarketStore>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
}

impl ChatRoomFlow {
    pub fn new(
        store: Arc<dyn MarketStore>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            store,
            notifier,
            navigator,
        }
    }

    /// Resolve the room for this pair, creating it if absent, then
    /// navigate to it. Creation failure surfaces a notice and performs no
    /// navigation. Idempotent: a second call with the same inputs returns
    /// the existing room.
    #[instrument(skip(self, job, talent), fields(job_id = %job.id, talent_id = %talent.id))]
    pub async fn resolve_or_create(
        &self,
        job: &JobPost,
        talent: &TalentProfile,
    ) -> Result<ChatRoom, StoreError> {
        let key = room_key(&job.id, &talent.id);
        let rooms = self.store.chat_rooms().await;

        let existing = rooms
            .iter()
            .find(|room| room.room_key.as_deref() == Some(key.as_str()))
            .or_else(|| rooms.iter().find(|room| legacy_match(room, job, talent)));

        if let Some(room) = existing {
            info!(room_id = %room.id, "reusing existing direct room");
            self.navigator.open_room(&room.id);
            return Ok(room.clone());
        }

        let insert = ChatRoomInsert {
            name: format!("{} - {}", job.title, talent.name),
            participant_ids: participant_pair(job, talent),
            room_type: RoomType::Direct,
            room_key: key,
        };

        match self.store.create_chat_room(&insert).await {
            Ok(room) => {
                info!(room_id = %room.id, "created direct room");
                self.navigator.open_room(&room.id);
                Ok(room)
            }
            Err(err) => {
                warn!(error = %err, "chat room creation failed");
                self.notifier
                    .failure("チャットルームの作成に失敗しました。");
                Err(err)
            }
        }
    }
}

/// 旧形式ルームの判定: 参加者ペアが一致し、ルーム名に案件タイトルを
/// 含むダイレクトルーム。
fn legacy_match(room: &ChatRoom, job: &JobPost, talent: &TalentProfile) -> bool {
    if room.room_type != RoomType::Direct || room.room_key.is_some() {
        return false;
    }
    let participants: HashSet<&str> = room.participant_ids.iter().map(String::as_str).collect();
    let expected: HashSet<&str> = [job.user_id.as_str(), talent.user_id.as_str()]
        .into_iter()
        .collect();
    participants == expected && room.name.contains(&job.title)
}

fn participant_pair(job: &JobPost, talent: &TalentProfile) -> Vec<String> {
    let mut ids = vec![job.user_id.clone(), talent.user_id.clone()];
    ids.dedup();
    ids
}
