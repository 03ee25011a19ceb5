use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::dto::projections::{JobOrderSummary, UserSummary};
use crate::models::candidate::{Candidate, CandidateStatus};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCandidatePayload {
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    pub phone: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[validate(range(min = 0))]
    pub experience: i32,
    pub recruiter_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCandidatePayload {
    #[validate(length(min = 1))]
    pub first_name: Option<String>,
    #[validate(length(min = 1))]
    pub last_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub skills: Option<Vec<String>>,
    #[validate(range(min = 0))]
    pub experience: Option<i32>,
    pub status: Option<CandidateStatus>,
    pub recruiter_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct CandidateListQuery {
    pub status: Option<CandidateStatus>,
    /// Comma-separated on the wire, split at the boundary.
    pub skills: Option<String>,
    pub min_experience: Option<i32>,
    pub recruiter_id: Option<Uuid>,
}

/// Recognized candidate filters and their semantics: equality on status and
/// recruiter, contains-any on skills, lower bound on experience. All provided
/// fields AND together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateFilter {
    pub status: Option<CandidateStatus>,
    pub skills: Vec<String>,
    pub min_experience: Option<i32>,
    pub recruiter_id: Option<Uuid>,
}

impl From<CandidateListQuery> for CandidateFilter {
    fn from(query: CandidateListQuery) -> Self {
        let skills = query
            .skills
            .map(|csv| {
                csv.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Self {
            status: query.status,
            skills,
            min_experience: query.min_experience,
            recruiter_id: query.recruiter_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub skills: Vec<String>,
    pub experience: i32,
    pub status: String,
    pub resume_url: Option<String>,
    pub recruiter_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub recruiter: UserSummary,
}

/// List/get shape: the plain response plus the candidate's submittals, each
/// carrying a shallow job-order view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateDetailResponse {
    #[serde(flatten)]
    pub candidate: CandidateResponse,
    pub submittals: Vec<CandidateSubmittal>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateSubmittal {
    pub id: Uuid,
    pub job_order_id: Uuid,
    pub candidate_id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub job_order: JobOrderSummary,
}

impl CandidateResponse {
    pub fn new(candidate: Candidate, recruiter: UserSummary) -> Self {
        Self {
            id: candidate.id,
            first_name: candidate.first_name,
            last_name: candidate.last_name,
            email: candidate.email,
            phone: candidate.phone,
            skills: candidate.skills,
            experience: candidate.experience,
            status: candidate.status,
            resume_url: candidate.resume_url,
            recruiter_id: candidate.recruiter_id,
            created_at: candidate.created_at,
            updated_at: candidate.updated_at,
            recruiter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skills_csv_is_split_and_trimmed() {
        let query = CandidateListQuery {
            skills: Some("Rust, Go ,,SQL".to_string()),
            ..Default::default()
        };
        let filter = CandidateFilter::from(query);
        assert_eq!(filter.skills, vec!["Rust", "Go", "SQL"]);
    }

    #[test]
    fn empty_query_maps_to_empty_filter() {
        let filter = CandidateFilter::from(CandidateListQuery::default());
        assert_eq!(filter, CandidateFilter::default());
    }

    #[test]
    fn create_payload_rejects_bad_email_and_negative_experience() {
        let payload = CreateCandidatePayload {
            first_name: "Ana".to_string(),
            last_name: "Gomez".to_string(),
            email: "not-an-email".to_string(),
            phone: None,
            skills: vec![],
            experience: 3,
            recruiter_id: Uuid::new_v4(),
        };
        assert!(payload.validate().is_err());

        let payload = CreateCandidatePayload {
            email: "a@x.com".to_string(),
            experience: -1,
            ..payload
        };
        assert!(payload.validate().is_err());
    }
}
