use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;

use crate::{
    dto::job_dto::{CreateJobPayload, JobResponse},
    error::{Error, Result},
    extractors::ValidatedJson,
    AppState,
};

/// Unparseable ids cannot name a stored job, so they answer like unknown ones.
fn parse_job_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| Error::NotFound("Job not found".to_string()))
}

#[utoipa::path(
    post,
    path = "/api/jobs/{id}/duplicate",
    params(
        ("id" = Uuid, Path, description = "ID of the job to copy")
    ),
    responses(
        (status = 201, description = "Draft copy created", body = Json<JobResponse>),
        (status = 404, description = "Job not found"),
        (status = 500, description = "Copy could not be stored")
    )
)]
#[axum::debug_handler]
pub async fn duplicate_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let id = parse_job_id(&id)?;
    let job = state.job_service.duplicate(id).await?;
    Ok((StatusCode::CREATED, Json(JobResponse::from(job))))
}

#[utoipa::path(
    post,
    path = "/api/jobs",
    request_body = CreateJobPayload,
    responses(
        (status = 201, description = "Draft job created", body = Json<JobResponse>),
        (status = 400, description = "Invalid payload"),
        (status = 500, description = "Job could not be stored")
    )
)]
#[axum::debug_handler]
pub async fn create_job(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateJobPayload>,
) -> Result<impl IntoResponse> {
    let job = state.job_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(JobResponse::from(job))))
}

#[utoipa::path(
    get,
    path = "/api/jobs/{id}",
    params(
        ("id" = Uuid, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Job found", body = Json<JobResponse>),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let id = parse_job_id(&id)?;
    let job = state.job_service.get_by_id(id).await?;
    Ok(Json(JobResponse::from(job)))
}
