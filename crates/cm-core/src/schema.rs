use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Work style of a job post or a talent profile. `Any` is the wildcard and
/// is compatible with every other value on either side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkType {
    Fulltime,
    Event,
    Retail,
    #[default]
    Any,
}

impl WorkType {
    /// 勤務形態の互換判定（完全一致 or どちらかが `any`）
    pub fn is_compatible(self, other: WorkType) -> bool {
        self == other || self == WorkType::Any || other == WorkType::Any
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Pending,
    Accepted,
    Rejected,
    Contracted,
    Completed,
    Assigned,
}

/// Which side of the pair the proposer belongs to.
///
/// `Client` is only produced when the proposer owns the job post. The
/// current authorization rule rejects owner-initiated proposals, so this
/// branch never fires in practice; the backend schema still carries both
/// values and owner proposals may be allowed later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposerType {
    Client,
    Talent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    Direct,
    Group,
}

/// Row payload submitted to the backend when a proposal is made.
/// `id` is the derived composite key, so re-proposing the same pair
/// conflicts server-side instead of creating a second match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchInsert {
    pub id: String,
    pub job_id: String,
    pub talent_id: String,
    pub status: MatchStatus,
    pub proposer_id: String,
    pub proposer_type: ProposerType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub approved_by: Vec<String>,
    pub pending_approval_from: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRoom {
    pub id: String,
    pub name: String,
    pub participant_ids: Vec<String>,
    pub room_type: RoomType,
    /// Deterministic direct-room key. Absent on rooms created before the
    /// key was introduced; lookup falls back to the participant pair.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_key: Option<String>,
    #[serde(default)]
    pub last_message_at: Option<DateTime<Utc>>,
}

/// Payload for creating a direct room. The backend assigns the row id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRoomInsert {
    pub name: String,
    pub participant_ids: Vec<String>,
    pub room_type: RoomType,
    pub room_key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub room_id: String,
    pub sender_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
