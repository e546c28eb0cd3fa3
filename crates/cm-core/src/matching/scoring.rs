use super::tags::{normalize_tag_set, overlap_ratio};
use super::weights::{Weights, SCORE_WEIGHTS};
use crate::{JobPost, TalentProfile};

/// スコア内訳。各項目は配点内の獲得点（例: skills は 0〜50）。
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    pub skills: f64,
    pub carriers: f64,
    pub work_type: f64,
    pub total: u8,
}

/// 総合マッチスコア（0〜100 の整数）。
///
/// - スキル: 案件の必要タグのうち人材が持つ割合 × 配点
/// - キャリア: 希望キャリアの重複割合 × 配点
/// - 勤務形態: 一致または片側 `any` で満点、不一致は0点
///
/// 案件側の集合が空の項目はゼロ寄与（ゼロ除算にしない）。
pub fn calculate_match_score(job: &JobPost, talent: &TalentProfile) -> u8 {
    calculate_breakdown(job, talent, &SCORE_WEIGHTS).total
}

/// 内訳つきスコア計算。画面のツールチップ表示用。
pub fn calculate_match_breakdown(job: &JobPost, talent: &TalentProfile) -> ScoreBreakdown {
    calculate_breakdown(job, talent, &SCORE_WEIGHTS)
}

fn calculate_breakdown(job: &JobPost, talent: &TalentProfile, weights: &Weights) -> ScoreBreakdown {
    let job_skills = normalize_tag_set(&job.skill_tags);
    let talent_skills = normalize_tag_set(&talent.skills);
    let skills = overlap_ratio(&job_skills, &talent_skills).unwrap_or(0.0) * weights.skills;

    let job_carriers = normalize_tag_set(&job.preferred_carriers);
    let talent_carriers = normalize_tag_set(&talent.preferred_carriers);
    let carriers = overlap_ratio(&job_carriers, &talent_carriers).unwrap_or(0.0) * weights.carriers;

    let work_type = if job.work_type.is_compatible(talent.work_type) {
        weights.work_type
    } else {
        0.0
    };

    let total = (skills + carriers + work_type).round().clamp(0.0, 100.0) as u8;

    ScoreBreakdown {
        skills,
        carriers,
        work_type,
        total,
    }
}

/// スコアバンド。[0,100] を重複なく完全に覆う。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Excellent,
    Good,
    Fair,
    Low,
}

/// Badge color variants understood by the GUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeVariant {
    Success,
    Info,
    Warning,
    Muted,
}

pub fn score_band(score: u8) -> ScoreBand {
    match score {
        80..=u8::MAX => ScoreBand::Excellent,
        60..=79 => ScoreBand::Good,
        40..=59 => ScoreBand::Fair,
        _ => ScoreBand::Low,
    }
}

impl ScoreBand {
    pub fn label(self) -> &'static str {
        match self {
            ScoreBand::Excellent => "excellent",
            ScoreBand::Good => "good",
            ScoreBand::Fair => "fair",
            ScoreBand::Low => "low",
        }
    }

    pub fn badge(self) -> BadgeVariant {
        match self {
            ScoreBand::Excellent => BadgeVariant::Success,
            ScoreBand::Good => BadgeVariant::Info,
            ScoreBand::Fair => BadgeVariant::Warning,
            ScoreBand::Low => BadgeVariant::Muted,
        }
    }
}

pub fn score_label(score: u8) -> &'static str {
    score_band(score).label()
}

pub fn score_color(score: u8) -> BadgeVariant {
    score_band(score).badge()
}
