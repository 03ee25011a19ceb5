use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::dto::projections::{CandidateSummary, UserSummary};
use crate::models::job_order::{JobOrder, JobOrderStatus};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobOrderPayload {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(length(min = 1))]
    pub requirements: Vec<String>,
    pub client_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateJobOrderPayload {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    #[validate(length(min = 1))]
    pub requirements: Option<Vec<String>>,
    pub status: Option<JobOrderStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct JobOrderListQuery {
    pub status: Option<JobOrderStatus>,
    pub client_id: Option<Uuid>,
    pub search: Option<String>,
}

/// Equality on status and client; `search` is a case-insensitive substring
/// match against title OR description.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobOrderFilter {
    pub status: Option<JobOrderStatus>,
    pub client_id: Option<Uuid>,
    pub search: Option<String>,
}

impl From<JobOrderListQuery> for JobOrderFilter {
    fn from(query: JobOrderListQuery) -> Self {
        Self {
            status: query.status,
            client_id: query.client_id,
            search: query.search.filter(|s| !s.trim().is_empty()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobOrderResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub status: String,
    pub client_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub client: UserSummary,
    pub submittals: Vec<JobOrderSubmittal>,
}

/// Delete returns the final snapshot with the client projection only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobOrderDeletedResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub status: String,
    pub client_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub client: UserSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobOrderSubmittal {
    pub id: Uuid,
    pub job_order_id: Uuid,
    pub candidate_id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub candidate: CandidateSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobOrderStatsResponse {
    pub total: i64,
    pub open: i64,
    pub closed: i64,
    pub on_hold: i64,
}

impl JobOrderResponse {
    pub fn new(
        job_order: JobOrder,
        client: UserSummary,
        submittals: Vec<JobOrderSubmittal>,
    ) -> Self {
        Self {
            id: job_order.id,
            title: job_order.title,
            description: job_order.description,
            requirements: job_order.requirements,
            status: job_order.status,
            client_id: job_order.client_id,
            created_at: job_order.created_at,
            updated_at: job_order.updated_at,
            client,
            submittals,
        }
    }
}

impl JobOrderDeletedResponse {
    pub fn new(job_order: JobOrder, client: UserSummary) -> Self {
        Self {
            id: job_order.id,
            title: job_order.title,
            description: job_order.description,
            requirements: job_order.requirements,
            status: job_order.status,
            client_id: job_order.client_id,
            created_at: job_order.created_at,
            updated_at: job_order.updated_at,
            client,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_payload_requires_at_least_one_requirement() {
        let payload = CreateJobOrderPayload {
            title: "Backend Eng".to_string(),
            description: "Build services".to_string(),
            requirements: vec![],
            client_id: Uuid::new_v4(),
        };
        assert!(payload.validate().is_err());

        let payload = CreateJobOrderPayload {
            requirements: vec!["5y exp".to_string()],
            ..payload
        };
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn blank_search_is_dropped_at_the_boundary() {
        let query = JobOrderListQuery {
            search: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(JobOrderFilter::from(query).search, None);
    }
}
