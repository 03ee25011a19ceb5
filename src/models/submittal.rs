use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Link record between a candidate and a job order, carrying its own
/// workflow status. Duplicate (job_order_id, candidate_id) pairs are legal.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Submittal {
    pub id: Uuid,
    pub job_order_id: Uuid,
    pub candidate_id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmittalStatus {
    Pending,
    Interviewing,
    Offered,
    Accepted,
    Rejected,
    Hired,
}

impl SubmittalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmittalStatus::Pending => "PENDING",
            SubmittalStatus::Interviewing => "INTERVIEWING",
            SubmittalStatus::Offered => "OFFERED",
            SubmittalStatus::Accepted => "ACCEPTED",
            SubmittalStatus::Rejected => "REJECTED",
            SubmittalStatus::Hired => "HIRED",
        }
    }
}

impl std::fmt::Display for SubmittalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
