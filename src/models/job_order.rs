use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobOrder {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub status: String,
    pub client_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobOrderStatus {
    Open,
    Closed,
    OnHold,
}

impl JobOrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobOrderStatus::Open => "OPEN",
            JobOrderStatus::Closed => "CLOSED",
            JobOrderStatus::OnHold => "ON_HOLD",
        }
    }
}

impl std::fmt::Display for JobOrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
