//! Reusable projection types for related entities embedded in responses.
//! Every place an entity is nested uses one of these shapes, so the external
//! contract stays identical across services.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Public fields of a user, embedded as `recruiter` or `client`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Shallow job-order view nested in a candidate's submittal list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobOrderSummary {
    pub id: Uuid,
    pub title: String,
    pub status: String,
}

/// Shallow candidate view nested in a job order's submittal list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateSummary {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub status: String,
}

/// Job-order view embedded in a submittal, with the owning client inline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittalJobOrder {
    pub id: Uuid,
    pub title: String,
    pub status: String,
    pub client: UserSummary,
}

/// Candidate view embedded in a submittal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittalCandidate {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub resume_url: Option<String>,
}

/// Minimal job-order reference returned with a deleted submittal.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct JobOrderRef {
    pub id: Uuid,
    pub title: String,
}

/// Minimal candidate reference returned with a deleted submittal.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CandidateRef {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
}
