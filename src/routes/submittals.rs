use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;

use crate::{
    access::{self, Action, Resource},
    dto::submittal_dto::{
        CreateSubmittalPayload, SubmittalFilter, SubmittalListQuery, UpdateSubmittalPayload,
    },
    error::Result,
    middleware::auth::Claims,
    AppState,
};

#[utoipa::path(
    post,
    path = "/submittals",
    request_body = CreateSubmittalPayload,
    responses(
        (status = 201, description = "Submittal created successfully"),
        (status = 403, description = "Forbidden")
    )
)]
#[axum::debug_handler]
pub async fn create_submittal(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateSubmittalPayload>,
) -> Result<impl IntoResponse> {
    access::authorize(&claims, Resource::Submittals, Action::Create)?;
    let submittal = state.submittal_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(submittal)))
}

#[utoipa::path(
    get,
    path = "/submittals",
    params(
        ("jobOrderId" = Option<Uuid>, Query, description = "Filter by job order"),
        ("candidateId" = Option<Uuid>, Query, description = "Filter by candidate"),
        ("status" = Option<String>, Query, description = "Filter by status")
    ),
    responses(
        (status = 200, description = "List of submittals"),
        (status = 403, description = "Forbidden")
    )
)]
#[axum::debug_handler]
pub async fn list_submittals(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<SubmittalListQuery>,
) -> Result<impl IntoResponse> {
    access::authorize(&claims, Resource::Submittals, Action::Read)?;
    let submittals = state
        .submittal_service
        .list(SubmittalFilter::from(query))
        .await?;
    Ok(Json(submittals))
}

#[utoipa::path(
    get,
    path = "/submittals/stats",
    responses(
        (status = 200, description = "Submittal statistics"),
        (status = 403, description = "Forbidden")
    )
)]
#[axum::debug_handler]
pub async fn get_submittal_stats(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    access::authorize(&claims, Resource::Submittals, Action::Read)?;
    let stats = state.submittal_service.stats().await?;
    Ok(Json(stats))
}

#[utoipa::path(
    get,
    path = "/submittals/{id}",
    params(
        ("id" = Uuid, Path, description = "Submittal ID")
    ),
    responses(
        (status = 200, description = "Submittal found"),
        (status = 404, description = "Submittal not found")
    )
)]
#[axum::debug_handler]
pub async fn get_submittal(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    access::authorize(&claims, Resource::Submittals, Action::Read)?;
    let submittal = state.submittal_service.get(id).await?;
    Ok(Json(submittal))
}

#[utoipa::path(
    patch,
    path = "/submittals/{id}",
    params(
        ("id" = Uuid, Path, description = "Submittal ID")
    ),
    request_body = UpdateSubmittalPayload,
    responses(
        (status = 200, description = "Submittal updated successfully"),
        (status = 404, description = "Submittal not found")
    )
)]
#[axum::debug_handler]
pub async fn update_submittal(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSubmittalPayload>,
) -> Result<impl IntoResponse> {
    access::authorize(&claims, Resource::Submittals, Action::Update)?;
    let submittal = state.submittal_service.update(id, payload).await?;
    Ok(Json(submittal))
}

#[utoipa::path(
    delete,
    path = "/submittals/{id}",
    params(
        ("id" = Uuid, Path, description = "Submittal ID")
    ),
    responses(
        (status = 200, description = "Submittal deleted successfully"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Submittal not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_submittal(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    access::authorize(&claims, Resource::Submittals, Action::Delete)?;
    let submittal = state.submittal_service.delete(id).await?;
    Ok(Json(submittal))
}
