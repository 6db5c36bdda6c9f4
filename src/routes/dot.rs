//! DOT vehicle inspection endpoints, including the PDF field export.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{DotInspectionRecord, ReportKind};
use crate::pdf::{self, PlacedField};
use crate::reports::{self, OpenedReport, SaveTarget};
use crate::repository::{SharedGateway, StoredReport};

// ---

pub fn router() -> Router<SharedGateway> {
    // ---
    Router::new()
        .route("/dot-inspections", post(create_inspection))
        .route("/dot-inspections/new", get(new_inspection))
        .route(
            "/dot-inspections/{id}",
            get(get_inspection).put(update_inspection),
        )
        .route("/dot-inspections/{id}/pdf-fields", get(pdf_fields))
}

#[derive(Debug, Serialize)]
struct InspectionView {
    // ---
    id: Option<Uuid>,
    job_id: Option<Uuid>,
    user_id: Option<Uuid>,
    passed: bool,
    record: DotInspectionRecord,
}

impl InspectionView {
    // ---
    fn opened(opened: OpenedReport<DotInspectionRecord>) -> Self {
        Self {
            id: opened.id,
            job_id: opened.job_id,
            user_id: opened.user_id,
            passed: opened.body.passed(),
            record: opened.body,
        }
    }

    fn saved(stored: &StoredReport, record: DotInspectionRecord) -> Self {
        Self {
            id: Some(stored.id),
            job_id: Some(stored.job_id),
            user_id: stored.user_id,
            passed: record.passed(),
            record,
        }
    }
}

#[derive(Debug, Deserialize)]
struct JobQuery {
    job_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
struct CreateInspection {
    job_id: Uuid,
    user_id: Option<Uuid>,
    record: Option<DotInspectionRecord>,
}

#[derive(Debug, Serialize)]
struct PdfFieldsResponse {
    report_id: Uuid,
    fields: Vec<PlacedField>,
}

async fn new_inspection(
    Query(query): Query<JobQuery>,
    State(gateway): State<SharedGateway>,
) -> Result<Json<InspectionView>, AppError> {
    // ---
    let opened = reports::open_dot_inspection(gateway.as_ref(), query.job_id, None).await?;
    Ok(Json(InspectionView::opened(opened)))
}

async fn get_inspection(
    Path(id): Path<Uuid>,
    Query(query): Query<JobQuery>,
    State(gateway): State<SharedGateway>,
) -> Result<Json<InspectionView>, AppError> {
    // ---
    let opened = reports::open_dot_inspection(gateway.as_ref(), query.job_id, Some(id)).await?;
    Ok(Json(InspectionView::opened(opened)))
}

async fn create_inspection(
    State(gateway): State<SharedGateway>,
    Json(request): Json<CreateInspection>,
) -> Result<impl IntoResponse, AppError> {
    // ---
    info!("POST /dot-inspections for job {}", request.job_id);

    let record = request.record.unwrap_or_default();
    let target = SaveTarget::New {
        job_id: request.job_id,
        user_id: request.user_id,
    };
    let stored = reports::save_dot_inspection(gateway.as_ref(), target, &record).await?;

    Ok((
        StatusCode::CREATED,
        Json(InspectionView::saved(&stored, record)),
    ))
}

async fn update_inspection(
    Path(id): Path<Uuid>,
    State(gateway): State<SharedGateway>,
    Json(record): Json<DotInspectionRecord>,
) -> Result<Json<InspectionView>, AppError> {
    // ---
    info!("PUT /dot-inspections/{}", id);

    let stored =
        reports::save_dot_inspection(gateway.as_ref(), SaveTarget::Existing(id), &record).await?;
    Ok(Json(InspectionView::saved(&stored, record)))
}

/// Flat field map with template placements, for the PDF renderer.
async fn pdf_fields(
    Path(id): Path<Uuid>,
    State(gateway): State<SharedGateway>,
) -> Result<Json<PdfFieldsResponse>, AppError> {
    // ---
    let opened = reports::open_dot_inspection(gateway.as_ref(), None, Some(id)).await?;
    if opened.id.is_none() {
        return Err(AppError::NotFound {
            kind: ReportKind::DotInspection,
            id,
        });
    }

    let fields = pdf::layout(&opened.body.to_field_map());
    info!("Prepared {} PDF fields for inspection {}", fields.len(), id);
    Ok(Json(PdfFieldsResponse {
        report_id: id,
        fields,
    }))
}
