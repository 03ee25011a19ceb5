use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dto::projections::{CandidateRef, JobOrderRef, SubmittalCandidate, SubmittalJobOrder};
use crate::models::submittal::SubmittalStatus;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubmittalPayload {
    pub job_order_id: Uuid,
    pub candidate_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSubmittalPayload {
    pub status: Option<SubmittalStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct SubmittalListQuery {
    pub job_order_id: Option<Uuid>,
    pub candidate_id: Option<Uuid>,
    pub status: Option<SubmittalStatus>,
}

/// Equality on all three fields, ANDed together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubmittalFilter {
    pub job_order_id: Option<Uuid>,
    pub candidate_id: Option<Uuid>,
    pub status: Option<SubmittalStatus>,
}

impl From<SubmittalListQuery> for SubmittalFilter {
    fn from(query: SubmittalListQuery) -> Self {
        Self {
            job_order_id: query.job_order_id,
            candidate_id: query.candidate_id,
            status: query.status,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittalResponse {
    pub id: Uuid,
    pub job_order_id: Uuid,
    pub candidate_id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub job_order: SubmittalJobOrder,
    pub candidate: SubmittalCandidate,
}

/// Reduced snapshot returned after a delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittalDeletedResponse {
    pub id: Uuid,
    pub job_order_id: Uuid,
    pub candidate_id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub job_order: JobOrderRef,
    pub candidate: CandidateRef,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittalStatsResponse {
    pub total: i64,
    pub pending: i64,
    pub accepted: i64,
    pub rejected: i64,
    pub interviewing: i64,
    pub offered: i64,
    pub hired: i64,
}
