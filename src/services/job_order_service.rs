use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::job_order_dto::{
    CreateJobOrderPayload, JobOrderDeletedResponse, JobOrderFilter, JobOrderResponse,
    JobOrderStatsResponse, JobOrderSubmittal, UpdateJobOrderPayload,
};
use crate::dto::projections::CandidateSummary;
use crate::error::{Error, Result};
use crate::models::job_order::{JobOrder, JobOrderStatus};
use crate::services::{apply_binds, load_user_summaries, load_user_summary, Bind};

const JOB_ORDER_COLUMNS: &str =
    "id, title, description, requirements, status, client_id, created_at, updated_at";

#[derive(Clone)]
pub struct JobOrderService {
    pool: PgPool,
}

#[derive(Debug, sqlx::FromRow)]
struct JobOrderSubmittalRow {
    id: Uuid,
    job_order_id: Uuid,
    candidate_id: Uuid,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    candidate_first_name: String,
    candidate_last_name: String,
    candidate_email: String,
    candidate_status: String,
}

impl From<JobOrderSubmittalRow> for JobOrderSubmittal {
    fn from(row: JobOrderSubmittalRow) -> Self {
        Self {
            id: row.id,
            job_order_id: row.job_order_id,
            candidate_id: row.candidate_id,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
            candidate: CandidateSummary {
                id: row.candidate_id,
                first_name: row.candidate_first_name,
                last_name: row.candidate_last_name,
                email: row.candidate_email,
                status: row.candidate_status,
            },
        }
    }
}

impl JobOrderService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, payload: CreateJobOrderPayload) -> Result<JobOrderResponse> {
        let job_order = sqlx::query_as::<_, JobOrder>(&format!(
            "INSERT INTO job_orders (title, description, requirements, client_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {}",
            JOB_ORDER_COLUMNS
        ))
        .bind(payload.title)
        .bind(payload.description)
        .bind(payload.requirements)
        .bind(payload.client_id)
        .fetch_one(&self.pool)
        .await?;

        let client = load_user_summary(&self.pool, job_order.client_id).await?;
        Ok(JobOrderResponse::new(job_order, client, Vec::new()))
    }

    pub async fn list(&self, filter: JobOrderFilter) -> Result<Vec<JobOrderResponse>> {
        let (where_clause, binds) = build_filter(&filter);
        let sql = format!(
            "SELECT {} FROM job_orders {} ORDER BY created_at DESC",
            JOB_ORDER_COLUMNS, where_clause
        );
        let job_orders = apply_binds(sqlx::query_as::<_, JobOrder>(&sql), &binds)
            .fetch_all(&self.pool)
            .await?;

        self.with_projections(job_orders).await
    }

    pub async fn get(&self, id: Uuid) -> Result<JobOrderResponse> {
        let job_order = sqlx::query_as::<_, JobOrder>(&format!(
            "SELECT {} FROM job_orders WHERE id = $1",
            JOB_ORDER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Job order not found".to_string()))?;

        let mut detailed = self.with_projections(vec![job_order]).await?;
        Ok(detailed.remove(0))
    }

    pub async fn update(&self, id: Uuid, payload: UpdateJobOrderPayload) -> Result<JobOrderResponse> {
        let job_order = sqlx::query_as::<_, JobOrder>(&format!(
            "UPDATE job_orders
             SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                requirements = COALESCE($4, requirements),
                status = COALESCE($5, status),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {}",
            JOB_ORDER_COLUMNS
        ))
        .bind(id)
        .bind(payload.title)
        .bind(payload.description)
        .bind(payload.requirements)
        .bind(payload.status.map(|status| status.as_str().to_string()))
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Job order not found".to_string()))?;

        let mut detailed = self.with_projections(vec![job_order]).await?;
        Ok(detailed.remove(0))
    }

    pub async fn delete(&self, id: Uuid) -> Result<JobOrderDeletedResponse> {
        let job_order = sqlx::query_as::<_, JobOrder>(&format!(
            "DELETE FROM job_orders WHERE id = $1 RETURNING {}",
            JOB_ORDER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Job order not found".to_string()))?;

        let client = load_user_summary(&self.pool, job_order.client_id).await?;
        Ok(JobOrderDeletedResponse::new(job_order, client))
    }

    /// Four independent counting queries over the full table, recomputed on
    /// every call.
    pub async fn stats(&self) -> Result<JobOrderStatsResponse> {
        let total = self.count(None).await?;
        let open = self.count(Some(JobOrderStatus::Open)).await?;
        let closed = self.count(Some(JobOrderStatus::Closed)).await?;
        let on_hold = self.count(Some(JobOrderStatus::OnHold)).await?;

        Ok(JobOrderStatsResponse {
            total,
            open,
            closed,
            on_hold,
        })
    }

    async fn count(&self, status: Option<JobOrderStatus>) -> Result<i64> {
        let count = match status {
            Some(status) => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM job_orders WHERE status = $1")
                    .bind(status.as_str())
                    .fetch_one(&self.pool)
                    .await?
            }
            None => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM job_orders")
                    .fetch_one(&self.pool)
                    .await?
            }
        };
        Ok(count)
    }

    async fn with_projections(&self, job_orders: Vec<JobOrder>) -> Result<Vec<JobOrderResponse>> {
        let job_order_ids: Vec<Uuid> = job_orders.iter().map(|j| j.id).collect();
        let client_ids: Vec<Uuid> = job_orders.iter().map(|j| j.client_id).collect();

        let clients = load_user_summaries(&self.pool, &client_ids).await?;
        let mut submittals = self.submittals_by_job_order(&job_order_ids).await?;

        job_orders
            .into_iter()
            .map(|job_order| {
                let client = clients.get(&job_order.client_id).cloned().ok_or_else(|| {
                    Error::Internal(format!(
                        "Missing client {} for job order {}",
                        job_order.client_id, job_order.id
                    ))
                })?;
                let submittals = submittals.remove(&job_order.id).unwrap_or_default();
                Ok(JobOrderResponse::new(job_order, client, submittals))
            })
            .collect()
    }

    async fn submittals_by_job_order(
        &self,
        job_order_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<JobOrderSubmittal>>> {
        if job_order_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, JobOrderSubmittalRow>(
            "SELECT s.id, s.job_order_id, s.candidate_id, s.status, s.created_at, s.updated_at,
                    c.first_name AS candidate_first_name, c.last_name AS candidate_last_name,
                    c.email AS candidate_email, c.status AS candidate_status
             FROM submittals s
             JOIN candidates c ON c.id = s.candidate_id
             WHERE s.job_order_id = ANY($1)
             ORDER BY s.created_at DESC",
        )
        .bind(job_order_ids.to_vec())
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: HashMap<Uuid, Vec<JobOrderSubmittal>> = HashMap::new();
        for row in rows {
            grouped.entry(row.job_order_id).or_default().push(row.into());
        }
        Ok(grouped)
    }
}

fn build_filter(filter: &JobOrderFilter) -> (String, Vec<Bind>) {
    let mut clauses = Vec::new();
    let mut binds = Vec::new();

    if let Some(status) = filter.status {
        clauses.push(format!("status = ${}", binds.len() + 1));
        binds.push(Bind::Text(status.as_str().to_string()));
    }
    if let Some(client_id) = filter.client_id {
        clauses.push(format!("client_id = ${}", binds.len() + 1));
        binds.push(Bind::Id(client_id));
    }
    if let Some(search) = &filter.search {
        let first = binds.len() + 1;
        let second = first + 1;
        clauses.push(format!(
            "(title ILIKE ${} OR description ILIKE ${})",
            first, second
        ));
        binds.push(Bind::Text(format!("%{}%", search)));
        binds.push(Bind::Text(format!("%{}%", search)));
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

    #[test]
    fn search_matches_title_or_description_case_insensitively() {
        let filter = JobOrderFilter {
            search: Some("engineer".to_string()),
            ..Default::default()
        };
        let (where_clause, binds) = build_filter(&filter);
        assert_eq!(
            where_clause,
            "WHERE (title ILIKE $1 OR description ILIKE $2)"
        );
        assert_eq!(
            binds,
            vec![
                Bind::Text("%engineer%".to_string()),
                Bind::Text("%engineer%".to_string()),
            ]
        );
    }

    #[test]
    fn status_and_client_and_search_combine_in_order() {
        let client_id = Uuid::nil();
        let filter = JobOrderFilter {
            status: Some(JobOrderStatus::Open),
            client_id: Some(client_id),
            search: Some("rust".to_string()),
        };
        let (where_clause, binds) = build_filter(&filter);
        assert_eq!(
            where_clause,
            "WHERE status = $1 AND client_id = $2 AND (title ILIKE $3 OR description ILIKE $4)"
        );
        assert_eq!(binds.len(), 4);
    }
}
