pub mod identity;
pub mod scoring;
pub mod tags;
pub mod weights;

pub use identity::{room_key, MatchId};
pub use scoring::{
    calculate_match_breakdown, calculate_match_score, score_band, score_color, score_label,
    BadgeVariant, ScoreBand,
};
