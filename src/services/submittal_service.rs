use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::projections::{
    CandidateRef, JobOrderRef, SubmittalCandidate, SubmittalJobOrder, UserSummary,
};
use crate::dto::submittal_dto::{
    CreateSubmittalPayload, SubmittalDeletedResponse, SubmittalFilter, SubmittalResponse,
    SubmittalStatsResponse, UpdateSubmittalPayload,
};
use crate::error::{Error, Result};
use crate::models::submittal::{Submittal, SubmittalStatus};
use crate::services::{apply_binds, Bind};

const SUBMITTAL_COLUMNS: &str = "id, job_order_id, candidate_id, status, created_at, updated_at";

/// One row of the fully joined submittal view: the link record itself plus
/// the job order (with its client) and the candidate.
#[derive(Debug, sqlx::FromRow)]
struct SubmittalDetailRow {
    id: Uuid,
    job_order_id: Uuid,
    candidate_id: Uuid,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    job_order_title: String,
    job_order_status: String,
    client_id: Uuid,
    client_first_name: String,
    client_last_name: String,
    client_email: String,
    candidate_first_name: String,
    candidate_last_name: String,
    candidate_email: String,
    candidate_phone: Option<String>,
    candidate_resume_url: Option<String>,
}

const SUBMITTAL_DETAIL_SELECT: &str =
    "SELECT s.id, s.job_order_id, s.candidate_id, s.status, s.created_at, s.updated_at,
            j.title AS job_order_title, j.status AS job_order_status, j.client_id,
            cu.first_name AS client_first_name, cu.last_name AS client_last_name,
            cu.email AS client_email,
            c.first_name AS candidate_first_name, c.last_name AS candidate_last_name,
            c.email AS candidate_email, c.phone AS candidate_phone,
            c.resume_url AS candidate_resume_url
     FROM submittals s
     JOIN job_orders j ON j.id = s.job_order_id
     JOIN users cu ON cu.id = j.client_id
     JOIN candidates c ON c.id = s.candidate_id";

impl From<SubmittalDetailRow> for SubmittalResponse {
    fn from(row: SubmittalDetailRow) -> Self {
        Self {
            id: row.id,
            job_order_id: row.job_order_id,
            candidate_id: row.candidate_id,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
            job_order: SubmittalJobOrder {
                id: row.job_order_id,
                title: row.job_order_title,
                status: row.job_order_status,
                client: UserSummary {
                    id: row.client_id,
                    first_name: row.client_first_name,
                    last_name: row.client_last_name,
                    email: row.client_email,
                },
            },
            candidate: SubmittalCandidate {
                id: row.candidate_id,
                first_name: row.candidate_first_name,
                last_name: row.candidate_last_name,
                email: row.candidate_email,
                phone: row.candidate_phone,
                resume_url: row.candidate_resume_url,
            },
        }
    }
}

#[derive(Clone)]
pub struct SubmittalService {
    pool: PgPool,
}

impl SubmittalService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Duplicate (job order, candidate) pairs are allowed; a nonexistent
    /// parent surfaces as a foreign-key violation from the store.
    pub async fn create(&self, payload: CreateSubmittalPayload) -> Result<SubmittalResponse> {
        let submittal = sqlx::query_as::<_, Submittal>(&format!(
            "INSERT INTO submittals (job_order_id, candidate_id)
             VALUES ($1, $2)
             RETURNING {}",
            SUBMITTAL_COLUMNS
        ))
        .bind(payload.job_order_id)
        .bind(payload.candidate_id)
        .fetch_one(&self.pool)
        .await?;

        self.get(submittal.id).await
    }

    pub async fn list(&self, filter: SubmittalFilter) -> Result<Vec<SubmittalResponse>> {
        let (where_clause, binds) = build_filter(&filter);
        let sql = format!(
            "{} {} ORDER BY s.created_at DESC",
            SUBMITTAL_DETAIL_SELECT, where_clause
        );
        let rows = apply_binds(sqlx::query_as::<_, SubmittalDetailRow>(&sql), &binds)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn get(&self, id: Uuid) -> Result<SubmittalResponse> {
        let row = sqlx::query_as::<_, SubmittalDetailRow>(&format!(
            "{} WHERE s.id = $1",
            SUBMITTAL_DETAIL_SELECT
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Submittal not found".to_string()))?;

        Ok(row.into())
    }

    /// Status moves are fully permissive: any status may follow any other,
    /// including itself.
    pub async fn update(&self, id: Uuid, payload: UpdateSubmittalPayload) -> Result<SubmittalResponse> {
        sqlx::query_as::<_, Submittal>(&format!(
            "UPDATE submittals
             SET status = COALESCE($2, status), updated_at = NOW()
             WHERE id = $1
             RETURNING {}",
            SUBMITTAL_COLUMNS
        ))
        .bind(id)
        .bind(payload.status.map(|status| status.as_str().to_string()))
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Submittal not found".to_string()))?;

        self.get(id).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<SubmittalDeletedResponse> {
        let submittal = sqlx::query_as::<_, Submittal>(&format!(
            "DELETE FROM submittals WHERE id = $1 RETURNING {}",
            SUBMITTAL_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Submittal not found".to_string()))?;

        let job_order = sqlx::query_as::<_, JobOrderRef>(
            "SELECT id, title FROM job_orders WHERE id = $1",
        )
        .bind(submittal.job_order_id)
        .fetch_one(&self.pool)
        .await?;

        let candidate = sqlx::query_as::<_, CandidateRef>(
            "SELECT id, first_name, last_name FROM candidates WHERE id = $1",
        )
        .bind(submittal.candidate_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(SubmittalDeletedResponse {
            id: submittal.id,
            job_order_id: submittal.job_order_id,
            candidate_id: submittal.candidate_id,
            status: submittal.status,
            created_at: submittal.created_at,
            updated_at: submittal.updated_at,
            job_order,
            candidate,
        })
    }

    /// Seven independent counting queries, recomputed fresh on every call.
    pub async fn stats(&self) -> Result<SubmittalStatsResponse> {
        let total = self.count(None).await?;
        let pending = self.count(Some(SubmittalStatus::Pending)).await?;
        let accepted = self.count(Some(SubmittalStatus::Accepted)).await?;
        let rejected = self.count(Some(SubmittalStatus::Rejected)).await?;
        let interviewing = self.count(Some(SubmittalStatus::Interviewing)).await?;
        let offered = self.count(Some(SubmittalStatus::Offered)).await?;
        let hired = self.count(Some(SubmittalStatus::Hired)).await?;

        Ok(SubmittalStatsResponse {
            total,
            pending,
            accepted,
            rejected,
            interviewing,
            offered,
            hired,
        })
    }

    async fn count(&self, status: Option<SubmittalStatus>) -> Result<i64> {
        let count = match status {
            Some(status) => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM submittals WHERE status = $1")
                    .bind(status.as_str())
                    .fetch_one(&self.pool)
                    .await?
            }
            None => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM submittals")
                    .fetch_one(&self.pool)
                    .await?
            }
        };
        Ok(count)
    }
}

fn build_filter(filter: &SubmittalFilter) -> (String, Vec<Bind>) {
    let mut clauses = Vec::new();
    let mut binds = Vec::new();

    if let Some(job_order_id) = filter.job_order_id {
        clauses.push(format!("s.job_order_id = ${}", binds.len() + 1));
        binds.push(Bind::Id(job_order_id));
    }
    if let Some(candidate_id) = filter.candidate_id {
        clauses.push(format!("s.candidate_id = ${}", binds.len() + 1));
        binds.push(Bind::Id(candidate_id));
    }
    if let Some(status) = filter.status {
        clauses.push(format!("s.status = ${}", binds.len() + 1));
        binds.push(Bind::Text(status.as_str().to_string()));
    }

    let where_clause = if clauses.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", clauses.join(" AND "))
    };
    (where_clause, binds)
}
