pub mod flow;
pub mod logging;
pub mod matching;
pub mod realtime;
pub mod run_id;
pub mod schema;
pub mod store;
pub mod work_dates;

use chrono::NaiveDate;

use schema::WorkType;

// Commonly used data models for matching and proposal flows. Both are
// snapshots fetched from the backend and treated as immutable here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobPost {
    pub id: String,
    pub title: String,
    pub user_id: String,
    pub skill_tags: Vec<String>,
    pub preferred_carriers: Vec<String>,
    pub work_type: WorkType,
    pub budget: Option<u32>,
    pub work_dates: Vec<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TalentProfile {
    pub id: String,
    pub name: String,
    pub user_id: String,
    pub skills: Vec<String>,
    pub preferred_carriers: Vec<String>,
    pub work_type: WorkType,
    pub rate: Option<u32>,
}
