use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::candidate_dto::{
    CandidateDetailResponse, CandidateFilter, CandidateResponse, CandidateSubmittal,
    CreateCandidatePayload, UpdateCandidatePayload,
};
use crate::dto::projections::JobOrderSummary;
use crate::error::{Error, Result};
use crate::models::candidate::Candidate;
use crate::services::{apply_binds, load_user_summaries, load_user_summary, Bind};

const CANDIDATE_COLUMNS: &str = "id, first_name, last_name, email, phone, skills, experience, status, resume_url, recruiter_id, created_at, updated_at";

#[derive(Clone)]
pub struct CandidateService {
    pool: PgPool,
}

#[derive(Debug, sqlx::FromRow)]
struct CandidateSubmittalRow {
    id: Uuid,
    job_order_id: Uuid,
    candidate_id: Uuid,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    job_order_title: String,
    job_order_status: String,
}

impl From<CandidateSubmittalRow> for CandidateSubmittal {
    fn from(row: CandidateSubmittalRow) -> Self {
        Self {
            id: row.id,
            job_order_id: row.job_order_id,
            candidate_id: row.candidate_id,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
            job_order: JobOrderSummary {
                id: row.job_order_id,
                title: row.job_order_title,
                status: row.job_order_status,
            },
        }
    }
}

impl CandidateService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, payload: CreateCandidatePayload) -> Result<CandidateResponse> {
        let candidate = sqlx::query_as::<_, Candidate>(&format!(
            "INSERT INTO candidates (first_name, last_name, email, phone, skills, experience, recruiter_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {}",
            CANDIDATE_COLUMNS
        ))
        .bind(payload.first_name)
        .bind(payload.last_name)
        .bind(payload.email)
        .bind(payload.phone)
        .bind(payload.skills)
        .bind(payload.experience)
        .bind(payload.recruiter_id)
        .fetch_one(&self.pool)
        .await?;

        let recruiter = load_user_summary(&self.pool, candidate.recruiter_id).await?;
        Ok(CandidateResponse::new(candidate, recruiter))
    }

    pub async fn list(&self, filter: CandidateFilter) -> Result<Vec<CandidateDetailResponse>> {
        let (where_clause, binds) = build_filter(&filter);
        let sql = format!(
            "SELECT {} FROM candidates {} ORDER BY created_at DESC",
            CANDIDATE_COLUMNS, where_clause
        );
        let candidates = apply_binds(sqlx::query_as::<_, Candidate>(&sql), &binds)
            .fetch_all(&self.pool)
            .await?;

        self.with_projections(candidates).await
    }

    pub async fn get(&self, id: Uuid) -> Result<CandidateDetailResponse> {
        let candidate = sqlx::query_as::<_, Candidate>(&format!(
            "SELECT {} FROM candidates WHERE id = $1",
            CANDIDATE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Candidate not found".to_string()))?;

        let mut detailed = self.with_projections(vec![candidate]).await?;
        Ok(detailed.remove(0))
    }

    pub async fn update(&self, id: Uuid, payload: UpdateCandidatePayload) -> Result<CandidateResponse> {
        let candidate = sqlx::query_as::<_, Candidate>(&format!(
            "UPDATE candidates
             SET
                first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                email = COALESCE($4, email),
                phone = COALESCE($5, phone),
                skills = COALESCE($6, skills),
                experience = COALESCE($7, experience),
                status = COALESCE($8, status),
                recruiter_id = COALESCE($9, recruiter_id),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {}",
            CANDIDATE_COLUMNS
        ))
        .bind(id)
        .bind(payload.first_name)
        .bind(payload.last_name)
        .bind(payload.email)
        .bind(payload.phone)
        .bind(payload.skills)
        .bind(payload.experience)
        .bind(payload.status.map(|status| status.as_str().to_string()))
        .bind(payload.recruiter_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Candidate not found".to_string()))?;

        let recruiter = load_user_summary(&self.pool, candidate.recruiter_id).await?;
        Ok(CandidateResponse::new(candidate, recruiter))
    }

    pub async fn delete(&self, id: Uuid) -> Result<CandidateResponse> {
        let candidate = sqlx::query_as::<_, Candidate>(&format!(
            "DELETE FROM candidates WHERE id = $1 RETURNING {}",
            CANDIDATE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Candidate not found".to_string()))?;

        let recruiter = load_user_summary(&self.pool, candidate.recruiter_id).await?;
        Ok(CandidateResponse::new(candidate, recruiter))
    }

    pub async fn attach_resume(&self, id: Uuid, resume_url: String) -> Result<CandidateResponse> {
        let candidate = sqlx::query_as::<_, Candidate>(&format!(
            "UPDATE candidates SET resume_url = $2, updated_at = NOW() WHERE id = $1 RETURNING {}",
            CANDIDATE_COLUMNS
        ))
        .bind(id)
        .bind(resume_url)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Candidate not found".to_string()))?;

        let recruiter = load_user_summary(&self.pool, candidate.recruiter_id).await?;
        Ok(CandidateResponse::new(candidate, recruiter))
    }

    async fn with_projections(
        &self,
        candidates: Vec<Candidate>,
    ) -> Result<Vec<CandidateDetailResponse>> {
        let candidate_ids: Vec<Uuid> = candidates.iter().map(|c| c.id).collect();
        let recruiter_ids: Vec<Uuid> = candidates.iter().map(|c| c.recruiter_id).collect();

        let recruiters = load_user_summaries(&self.pool, &recruiter_ids).await?;
        let mut submittals = self.submittals_by_candidate(&candidate_ids).await?;

        candidates
            .into_iter()
            .map(|candidate| {
                let recruiter = recruiters
                    .get(&candidate.recruiter_id)
                    .cloned()
                    .ok_or_else(|| {
                        Error::Internal(format!(
                            "Missing recruiter {} for candidate {}",
                            candidate.recruiter_id, candidate.id
                        ))
                    })?;
                let submittals = submittals.remove(&candidate.id).unwrap_or_default();
                Ok(CandidateDetailResponse {
                    candidate: CandidateResponse::new(candidate, recruiter),
                    submittals,
                })
            })
            .collect()
    }

    async fn submittals_by_candidate(
        &self,
        candidate_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<CandidateSubmittal>>> {
        if candidate_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, CandidateSubmittalRow>(
            "SELECT s.id, s.job_order_id, s.candidate_id, s.status, s.created_at, s.updated_at,
                    j.title AS job_order_title, j.status AS job_order_status
             FROM submittals s
             JOIN job_orders j ON j.id = s.job_order_id
             WHERE s.candidate_id = ANY($1)
             ORDER BY s.created_at DESC",
        )
        .bind(candidate_ids.to_vec())
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: HashMap<Uuid, Vec<CandidateSubmittal>> = HashMap::new();
        for row in rows {
            grouped.entry(row.candidate_id).or_default().push(row.into());
        }
        Ok(grouped)
    }
}

fn build_filter(filter: &CandidateFilter) -> (String, Vec<Bind>) {
    let mut clauses = Vec::new();
    let mut binds = Vec::new();

    if let Some(status) = filter.status {
        clauses.push(format!("status = ${}", binds.len() + 1));
        binds.push(Bind::Text(status.as_str().to_string()));
    }
    if !filter.skills.is_empty() {
        clauses.push(format!("skills && ${}", binds.len() + 1));
        binds.push(Bind::TextArray(filter.skills.clone()));
    }
    if let Some(min_experience) = filter.min_experience {
        clauses.push(format!("experience >= ${}", binds.len() + 1));
        binds.push(Bind::Int(min_experience));
    }
    if let Some(recruiter_id) = filter.recruiter_id {
        clauses.push(format!("recruiter_id = ${}", binds.len() + 1));
        binds.push(Bind::Id(recruiter_id));
    }

    let where_clause = if clauses.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", clauses.join(" AND "))
    };
    (where_clause, binds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::candidate::CandidateStatus;

    #[test]
    fn empty_filter_builds_no_where_clause() {
        let (where_clause, binds) = build_filter(&CandidateFilter::default());
        assert!(where_clause.is_empty());
        assert!(binds.is_empty());
    }

    #[test]
    fn all_filters_and_together_with_sequential_placeholders() {
        let filter = CandidateFilter {
            status: Some(CandidateStatus::Active),
            skills: vec!["Rust".to_string(), "Go".to_string()],
            min_experience: Some(3),
            recruiter_id: Some(Uuid::nil()),
        };
        let (where_clause, binds) = build_filter(&filter);
        assert_eq!(
            where_clause,
            "WHERE status = $1 AND skills && $2 AND experience >= $3 AND recruiter_id = $4"
        );
        assert_eq!(
            binds,
            vec![
                Bind::Text("ACTIVE".to_string()),
                Bind::TextArray(vec!["Rust".to_string(), "Go".to_string()]),
                Bind::Int(3),
                Bind::Id(Uuid::nil()),
            ]
        );
    }

    #[test]
    fn skills_filter_uses_array_overlap() {
        let filter = CandidateFilter {
            skills: vec!["SQL".to_string()],
            ..Default::default()
        };
        let (where_clause, _) = build_filter(&filter);
        assert_eq!(where_clause, "WHERE skills && $1");
    }
}
