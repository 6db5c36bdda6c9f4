use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::error::AppError;
use crate::form::{FormAction, FormMode, ReportForm};
use crate::models::{ReportKind, ReportRecord};
use crate::reports::{self, OpenedReport, SaveTarget};
use crate::repository::{SharedGateway, StoredReport};

// ---

pub fn router() -> Router<SharedGateway> {
    // ---
    Router::new()
        .route("/reports/{kind}", post(create_report))
        .route("/reports/{kind}/new", get(new_report))
        .route(
            "/reports/{kind}/{id}",
            get(get_report).put(update_report).delete(delete_report),
        )
        .route("/reports/{kind}/{id}/edits", post(edit_report))
}

/// Report as returned to the form.
#[derive(Debug, Serialize)]
pub struct ReportView {
    // ---
    id: Option<Uuid>,
    kind: ReportKind,
    job_id: Option<Uuid>,
    user_id: Option<Uuid>,
    mode: FormMode,
    record: ReportRecord,
}

impl ReportView {
    // ---
    fn opened(kind: ReportKind, opened: OpenedReport<ReportForm>) -> Self {
        Self {
            id: opened.id,
            kind,
            job_id: opened.job_id,
            user_id: opened.user_id,
            mode: opened.body.mode(),
            record: opened.body.into_record(),
        }
    }

    fn saved(kind: ReportKind, stored: &StoredReport, form: ReportForm) -> Self {
        Self {
            id: Some(stored.id),
            kind,
            job_id: Some(stored.job_id),
            user_id: stored.user_id,
            mode: form.mode(),
            record: form.into_record(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct JobQuery {
    job_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
struct CreateReport {
    job_id: Uuid,
    user_id: Option<Uuid>,
    /// Merged over the blank report of the kind; absent means blank.
    record: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct EditRequest {
    actions: Vec<FormAction>,
}

#[derive(Debug, Serialize)]
struct EditResponse {
    applied: usize,
    rejected: usize,
    report: ReportView,
}

async fn new_report(
    Path(kind): Path<ReportKind>,
    Query(query): Query<JobQuery>,
    State(gateway): State<SharedGateway>,
) -> Result<Json<ReportView>, AppError> {
    // ---
    let opened = reports::open_report(gateway.as_ref(), kind, query.job_id, None).await?;
    Ok(Json(ReportView::opened(kind, opened)))
}

async fn get_report(
    Path((kind, id)): Path<(ReportKind, Uuid)>,
    Query(query): Query<JobQuery>,
    State(gateway): State<SharedGateway>,
) -> Result<Json<ReportView>, AppError> {
    // ---
    let opened = reports::open_report(gateway.as_ref(), kind, query.job_id, Some(id)).await?;
    Ok(Json(ReportView::opened(kind, opened)))
}

async fn create_report(
    Path(kind): Path<ReportKind>,
    State(gateway): State<SharedGateway>,
    Json(request): Json<CreateReport>,
) -> Result<impl IntoResponse, AppError> {
    // ---
    info!("POST /reports/{} for job {}", kind, request.job_id);

    let record = reports::record_from_request(kind, request.record)?;
    let mut form = ReportForm::draft(kind, record);
    let target = SaveTarget::New {
        job_id: request.job_id,
        user_id: request.user_id,
    };
    let stored = reports::save_report(gateway.as_ref(), kind, target, &mut form).await?;

    Ok((
        StatusCode::CREATED,
        Json(ReportView::saved(kind, &stored, form)),
    ))
}

async fn update_report(
    Path((kind, id)): Path<(ReportKind, Uuid)>,
    State(gateway): State<SharedGateway>,
    Json(body): Json<Value>,
) -> Result<Json<ReportView>, AppError> {
    // ---
    info!("PUT /reports/{}/{}", kind, id);

    let record = reports::record_from_request(kind, Some(body))?;
    let mut form = ReportForm::draft(kind, record);
    let stored =
        reports::save_report(gateway.as_ref(), kind, SaveTarget::Existing(id), &mut form).await?;
    Ok(Json(ReportView::saved(kind, &stored, form)))
}

async fn delete_report(
    Path((kind, id)): Path<(ReportKind, Uuid)>,
    State(gateway): State<SharedGateway>,
) -> Result<StatusCode, AppError> {
    // ---
    info!("DELETE /reports/{}/{}", kind, id);

    if gateway.delete_report(kind, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound { kind, id })
    }
}

async fn edit_report(
    Path((kind, id)): Path<(ReportKind, Uuid)>,
    State(gateway): State<SharedGateway>,
    Json(request): Json<EditRequest>,
) -> Result<Json<EditResponse>, AppError> {
    // ---
    info!(
        "POST /reports/{}/{}/edits with {} actions",
        kind,
        id,
        request.actions.len()
    );

    let outcome = reports::apply_edits(gateway.as_ref(), kind, id, request.actions).await?;
    Ok(Json(EditResponse {
        applied: outcome.applied,
        rejected: outcome.rejected,
        report: ReportView::saved(kind, &outcome.stored, outcome.form),
    }))
}
