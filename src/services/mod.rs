pub mod candidate_service;
pub mod job_order_service;
pub mod submittal_service;

use std::collections::HashMap;

use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::QueryAs;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::projections::UserSummary;
use crate::error::Result;

/// Owned bind value for dynamically assembled WHERE clauses. Filters mix
/// text, arrays, integers, and ids, so positional binding goes through this
/// enum instead of a stringly-typed argument list.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Bind {
    Text(String),
    TextArray(Vec<String>),
    Int(i32),
    Id(Uuid),
}

pub(crate) fn apply_binds<'q, T>(
    mut query: QueryAs<'q, Postgres, T, PgArguments>,
    binds: &'q [Bind],
) -> QueryAs<'q, Postgres, T, PgArguments> {
    for bind in binds {
        query = match bind {
            Bind::Text(value) => query.bind(value),
            Bind::TextArray(values) => query.bind(values),
            Bind::Int(value) => query.bind(*value),
            Bind::Id(value) => query.bind(*value),
        };
    }
    query
}

pub(crate) async fn load_user_summary(pool: &PgPool, id: Uuid) -> Result<UserSummary> {
    let user = sqlx::query_as::<_, UserSummary>(
        "SELECT id, first_name, last_name, email FROM users WHERE id = $1",
    )
    .bind(id)
    .fetch_one(pool)
    .await?;
    Ok(user)
}

pub(crate) async fn load_user_summaries(
    pool: &PgPool,
    ids: &[Uuid],
) -> Result<HashMap<Uuid, UserSummary>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = sqlx::query_as::<_, UserSummary>(
        "SELECT id, first_name, last_name, email FROM users WHERE id = ANY($1)",
    )
    .bind(ids.to_vec())
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(|user| (user.id, user)).collect())
}
