use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    access::{self, Action, Resource},
    dto::job_order_dto::{
        CreateJobOrderPayload, JobOrderFilter, JobOrderListQuery, UpdateJobOrderPayload,
    },
    error::Result,
    middleware::auth::Claims,
    AppState,
};

#[utoipa::path(
    post,
    path = "/job-orders",
    request_body = CreateJobOrderPayload,
    responses(
        (status = 201, description = "Job order created successfully"),
        (status = 400, description = "Invalid payload"),
        (status = 403, description = "Forbidden")
    )
)]
#[axum::debug_handler]
pub async fn create_job_order(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateJobOrderPayload>,
) -> Result<impl IntoResponse> {
    access::authorize(&claims, Resource::JobOrders, Action::Create)?;
    payload.validate()?;
    let job_order = state.job_order_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(job_order)))
}

#[utoipa::path(
    get,
    path = "/job-orders",
    params(
        ("status" = Option<String>, Query, description = "Filter by status"),
        ("clientId" = Option<Uuid>, Query, description = "Filter by owning client"),
        ("search" = Option<String>, Query, description = "Substring match on title or description")
    ),
    responses(
        (status = 200, description = "List of job orders"),
        (status = 403, description = "Forbidden")
    )
)]
#[axum::debug_handler]
pub async fn list_job_orders(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<JobOrderListQuery>,
) -> Result<impl IntoResponse> {
    access::authorize(&claims, Resource::JobOrders, Action::Read)?;
    let job_orders = state
        .job_order_service
        .list(JobOrderFilter::from(query))
        .await?;
    Ok(Json(job_orders))
}

#[utoipa::path(
    get,
    path = "/job-orders/stats",
    responses(
        (status = 200, description = "Job order statistics"),
        (status = 403, description = "Forbidden")
    )
)]
#[axum::debug_handler]
pub async fn get_job_order_stats(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    access::authorize(&claims, Resource::JobOrders, Action::Read)?;
    let stats = state.job_order_service.stats().await?;
    Ok(Json(stats))
}

#[utoipa::path(
    get,
    path = "/job-orders/{id}",
    params(
        ("id" = Uuid, Path, description = "Job order ID")
    ),
    responses(
        (status = 200, description = "Job order found"),
        (status = 404, description = "Job order not found")
    )
)]
#[axum::debug_handler]
pub async fn get_job_order(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    access::authorize(&claims, Resource::JobOrders, Action::Read)?;
    let job_order = state.job_order_service.get(id).await?;
    Ok(Json(job_order))
}

#[utoipa::path(
    patch,
    path = "/job-orders/{id}",
    params(
        ("id" = Uuid, Path, description = "Job order ID")
    ),
    request_body = UpdateJobOrderPayload,
    responses(
        (status = 200, description = "Job order updated successfully"),
        (status = 404, description = "Job order not found")
    )
)]
#[axum::debug_handler]
pub async fn update_job_order(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateJobOrderPayload>,
) -> Result<impl IntoResponse> {
    access::authorize(&claims, Resource::JobOrders, Action::Update)?;
    payload.validate()?;
    let job_order = state.job_order_service.update(id, payload).await?;
    Ok(Json(job_order))
}

#[utoipa::path(
    delete,
    path = "/job-orders/{id}",
    params(
        ("id" = Uuid, Path, description = "Job order ID")
    ),
    responses(
        (status = 200, description = "Job order deleted successfully"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Job order not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_job_order(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    access::authorize(&claims, Resource::JobOrders, Action::Delete)?;
    let job_order = state.job_order_service.delete(id).await?;
    Ok(Json(job_order))
}
