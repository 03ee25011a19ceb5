use axum::{
    extract::{Extension, Multipart, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use bytes::Bytes;
use std::path::Path as StdPath;
use uuid::Uuid;
use validator::Validate;

use crate::{
    access::{self, Action, Resource},
    dto::candidate_dto::{
        CandidateFilter, CandidateListQuery, CreateCandidatePayload, UpdateCandidatePayload,
    },
    error::{Error, Result},
    middleware::auth::Claims,
    AppState,
};

#[utoipa::path(
    post,
    path = "/candidates",
    request_body = CreateCandidatePayload,
    responses(
        (status = 201, description = "Candidate created successfully"),
        (status = 400, description = "Invalid payload"),
        (status = 403, description = "Forbidden")
    )
)]
#[axum::debug_handler]
pub async fn create_candidate(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateCandidatePayload>,
) -> Result<impl IntoResponse> {
    access::authorize(&claims, Resource::Candidates, Action::Create)?;
    payload.validate()?;
    let candidate = state.candidate_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(candidate)))
}

#[utoipa::path(
    get,
    path = "/candidates",
    params(
        ("status" = Option<String>, Query, description = "Filter by status"),
        ("skills" = Option<String>, Query, description = "Comma-separated skills, match any"),
        ("minExperience" = Option<i32>, Query, description = "Minimum years of experience"),
        ("recruiterId" = Option<Uuid>, Query, description = "Filter by owning recruiter")
    ),
    responses(
        (status = 200, description = "List of candidates"),
        (status = 403, description = "Forbidden")
    )
)]
#[axum::debug_handler]
pub async fn list_candidates(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<CandidateListQuery>,
) -> Result<impl IntoResponse> {
    access::authorize(&claims, Resource::Candidates, Action::Read)?;
    let candidates = state
        .candidate_service
        .list(CandidateFilter::from(query))
        .await?;
    Ok(Json(candidates))
}

#[utoipa::path(
    get,
    path = "/candidates/{id}",
    params(
        ("id" = Uuid, Path, description = "Candidate ID")
    ),
    responses(
        (status = 200, description = "Candidate found"),
        (status = 404, description = "Candidate not found")
    )
)]
#[axum::debug_handler]
pub async fn get_candidate(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    access::authorize(&claims, Resource::Candidates, Action::Read)?;
    let candidate = state.candidate_service.get(id).await?;
    Ok(Json(candidate))
}

#[utoipa::path(
    patch,
    path = "/candidates/{id}",
    params(
        ("id" = Uuid, Path, description = "Candidate ID")
    ),
    request_body = UpdateCandidatePayload,
    responses(
        (status = 200, description = "Candidate updated successfully"),
        (status = 404, description = "Candidate not found")
    )
)]
#[axum::debug_handler]
pub async fn update_candidate(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCandidatePayload>,
) -> Result<impl IntoResponse> {
    access::authorize(&claims, Resource::Candidates, Action::Update)?;
    payload.validate()?;
    let candidate = state.candidate_service.update(id, payload).await?;
    Ok(Json(candidate))
}

#[utoipa::path(
    delete,
    path = "/candidates/{id}",
    params(
        ("id" = Uuid, Path, description = "Candidate ID")
    ),
    responses(
        (status = 200, description = "Candidate deleted successfully"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Candidate not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_candidate(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    access::authorize(&claims, Resource::Candidates, Action::Delete)?;
    let candidate = state.candidate_service.delete(id).await?;
    Ok(Json(candidate))
}

#[utoipa::path(
    post,
    path = "/candidates/{id}/resume",
    params(
        ("id" = Uuid, Path, description = "Candidate ID")
    ),
    responses(
        (status = 200, description = "Resume attached successfully"),
        (status = 400, description = "Invalid file"),
        (status = 404, description = "Candidate not found")
    )
)]
#[axum::debug_handler]
pub async fn upload_resume(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse> {
    access::authorize(&claims, Resource::Candidates, Action::Update)?;

    let mut upload: Option<(String, Bytes)> = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or("resume.bin").to_string();
            let data = field.bytes().await?;
            upload = Some((filename, data));
        }
    }
    let (filename, data) =
        upload.ok_or_else(|| Error::BadRequest("Missing file field".to_string()))?;

    tracing::info!("Attaching resume {} to candidate {}", filename, id);
    let resume_url = resolve_resume_url(&filename, &data)?;
    let candidate = state.candidate_service.attach_resume(id, resume_url).await?;
    Ok(Json(candidate))
}

fn resolve_resume_url(filename: &str, data: &Bytes) -> Result<String> {
    let ext = StdPath::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_else(|| "bin".to_string());

    let allowed_exts = ["pdf", "doc", "docx", "txt", "rtf"];
    if !allowed_exts.contains(&ext.as_str()) {
        return Err(Error::BadRequest(format!(
            "File type .{} is not allowed",
            ext
        )));
    }

    if data.is_empty() {
        return Err(Error::BadRequest("Empty resume file".to_string()));
    }
    if ext == "pdf" && !data.starts_with(b"%PDF") {
        return Err(Error::BadRequest("Invalid PDF file content".to_string()));
    }

    // TODO: upload the bytes to object storage; for now only the storage key
    // is reserved and the file itself is discarded.
    let config = crate::config::get_config();
    Ok(format!(
        "{}/resumes/{}.{}",
        config.resume_base_url.trim_end_matches('/'),
        Uuid::new_v4(),
        ext
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_disallowed_extension() {
        let data = Bytes::from_static(b"binary");
        assert!(resolve_resume_url("resume.exe", &data).is_err());
    }

    #[test]
    fn rejects_pdf_without_magic_bytes() {
        let data = Bytes::from_static(b"not a pdf");
        assert!(resolve_resume_url("resume.pdf", &data).is_err());
    }

    #[test]
    fn resolves_url_under_the_configured_base() {
        std::env::set_var("SERVER_ADDRESS", "127.0.0.1:0");
        std::env::set_var("DATABASE_URL", "postgres://localhost/test");
        std::env::set_var("JWT_SECRET", "secret");
        std::env::set_var("API_RPS", "100");
        std::env::set_var("RESUME_BASE_URL", "https://store.example.com/");
        let _ = crate::config::init_config();

        let data = Bytes::from_static(b"%PDF-1.7 ...");
        let url = resolve_resume_url("cv.pdf", &data).unwrap();
        assert!(url.starts_with("https://store.example.com/resumes/"));
        assert!(url.ends_with(".pdf"));
    }
}
