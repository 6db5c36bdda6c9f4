//! Report lifecycle on top of the gateway: open, save, batch edits.
//!
//! Opening a report that does not exist starts a new one instead of
//! failing. New reports are prefilled from the job and then its customer,
//! in that order since the customer id comes from the job row. The first
//! save of a report also links it to the job as an asset.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::error::AppError;
use crate::form::{FormAction, ReportForm};
use crate::models::{Customer, DotInspectionRecord, Job, NewJobAsset, ReportKind, ReportRecord};
use crate::repository::{merge_with_defaults, NewReport, ReportGateway, StoredReport};

// ---

/// A report ready for display or editing. `id` is `None` until first save.
#[derive(Debug, Clone)]
pub struct OpenedReport<T> {
    // ---
    pub id: Option<Uuid>,
    pub job_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub body: T,
}

/// Where a save goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveTarget {
    New { job_id: Uuid, user_id: Option<Uuid> },
    Existing(Uuid),
}

#[derive(Debug, Clone)]
pub struct EditOutcome {
    // ---
    pub stored: StoredReport,
    pub form: ReportForm,
    pub applied: usize,
    pub rejected: usize,
}

fn ensure_electrical(kind: ReportKind) -> Result<(), AppError> {
    if kind.is_electrical() {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "{kind} reports are not electrical test reports"
        )))
    }
}

/// Decode a document, filling anything it lacks from `defaults`.
///
/// Used for request bodies as well as stored rows, so a partial body starts
/// from the kind's defaults rather than the bare type defaults.
pub fn decode_document<T>(defaults: &T, data: Value) -> Result<T, AppError>
where
    T: Serialize + DeserializeOwned,
{
    // ---
    let merged = merge_with_defaults(serde_json::to_value(defaults)?, data);
    Ok(serde_json::from_value(merged)?)
}

/// An electrical report body from a request, over the defaults of `kind`.
pub fn record_from_request(
    kind: ReportKind,
    data: Option<Value>,
) -> Result<ReportRecord, AppError> {
    // ---
    let defaults = ReportRecord::new(kind);
    match data {
        Some(data) => decode_document(&defaults, data),
        None => Ok(defaults),
    }
}

/// Decode a stored row. A row that no longer decodes is a fault on our side,
/// not the caller's.
fn decode_stored<T>(defaults: &T, kind: ReportKind, stored: StoredReport) -> Result<T, AppError>
where
    T: Serialize + DeserializeOwned,
{
    // ---
    let id = stored.id;
    let merged = merge_with_defaults(serde_json::to_value(defaults)?, stored.data);
    serde_json::from_value(merged).map_err(|source| {
        error!("Stored {} report {} does not decode: {}", kind, id, source);
        AppError::CorruptDocument { kind, id, source }
    })
}

/// Job row and, when the job names one, its customer.
async fn job_context(
    gateway: &dyn ReportGateway,
    job_id: Uuid,
) -> Result<Option<(Job, Option<Customer>)>, AppError> {
    // ---
    let Some(job) = gateway.fetch_job(job_id).await? else {
        warn!("Job {} not found, report will not be prefilled", job_id);
        return Ok(None);
    };

    let customer = match job.customer_id {
        Some(customer_id) => gateway.fetch_customer(customer_id).await?,
        None => None,
    };
    Ok(Some((job, customer)))
}

async fn fetch_existing(
    gateway: &dyn ReportGateway,
    kind: ReportKind,
    report_id: Option<Uuid>,
) -> Result<Option<StoredReport>, AppError> {
    // ---
    let Some(id) = report_id else {
        return Ok(None);
    };

    let stored = gateway.fetch_report(kind, id).await?;
    if stored.is_none() {
        info!("{} report {} not found, starting a new report", kind, id);
    }
    Ok(stored)
}

/// Open an electrical report for viewing, or a fresh one for editing.
pub async fn open_report(
    gateway: &dyn ReportGateway,
    kind: ReportKind,
    job_id: Option<Uuid>,
    report_id: Option<Uuid>,
) -> Result<OpenedReport<ReportForm>, AppError> {
    // ---
    ensure_electrical(kind)?;

    if let Some(stored) = fetch_existing(gateway, kind, report_id).await? {
        let (id, job_id, user_id) = (stored.id, stored.job_id, stored.user_id);
        let record = decode_stored(&ReportRecord::new(kind), kind, stored)?;
        return Ok(OpenedReport {
            id: Some(id),
            job_id: Some(job_id),
            user_id,
            body: ReportForm::open(kind, record),
        });
    }

    let mut record = ReportRecord::new(kind);
    if let Some(job_id) = job_id {
        if let Some((job, customer)) = job_context(gateway, job_id).await? {
            record.job_info.prefill(&job, customer.as_ref());
        }
    }

    Ok(OpenedReport {
        id: None,
        job_id,
        user_id: None,
        body: ReportForm::draft(kind, record),
    })
}

/// Write a document and, on first save, link it to the job.
async fn persist(
    gateway: &dyn ReportGateway,
    kind: ReportKind,
    target: SaveTarget,
    data: Value,
    label: &str,
) -> Result<StoredReport, AppError> {
    // ---
    let (job_id, user_id) = match target {
        SaveTarget::Existing(id) => {
            let stored = gateway.update_report(kind, id, data).await?;
            info!("Updated {} report {}", kind, id);
            return Ok(stored);
        }
        SaveTarget::New { job_id, user_id } => (job_id, user_id),
    };

    if gateway.fetch_job(job_id).await?.is_none() {
        return Err(AppError::JobNotFound(job_id));
    }

    let stored = gateway
        .insert_report(
            kind,
            NewReport {
                job_id,
                user_id,
                data,
            },
        )
        .await?;
    info!("Created {} report {} for job {}", kind, stored.id, job_id);

    // The report row is already committed; a failed link is logged rather
    // than failing the save, which the user would otherwise repeat.
    let asset = NewJobAsset::for_report(kind, job_id, stored.id, label, user_id);
    if let Err(e) = gateway.insert_asset_link(asset).await {
        error!("Failed to link {} report {} to job {}: {}", kind, stored.id, job_id, e);
    }

    Ok(stored)
}

/// Save an electrical report. The form leaves edit mode only once the
/// write succeeds; on error it keeps its edits and its cancel snapshot.
pub async fn save_report(
    gateway: &dyn ReportGateway,
    kind: ReportKind,
    target: SaveTarget,
    form: &mut ReportForm,
) -> Result<StoredReport, AppError> {
    // ---
    ensure_electrical(kind)?;

    let mut record = form.record().clone();
    record.recompute();
    let data = serde_json::to_value(&record)?;

    let stored = persist(gateway, kind, target, data, &record.job_info.identifier).await?;
    form.save();
    Ok(stored)
}

/// Open an existing report, apply a batch of edits in edit mode, save.
///
/// Actions that do not apply to the report are counted as rejected; the
/// rest of the batch still goes through.
pub async fn apply_edits(
    gateway: &dyn ReportGateway,
    kind: ReportKind,
    id: Uuid,
    actions: Vec<FormAction>,
) -> Result<EditOutcome, AppError> {
    // ---
    ensure_electrical(kind)?;

    let stored = gateway
        .fetch_report(kind, id)
        .await?
        .ok_or(AppError::NotFound { kind, id })?;
    let record = decode_stored(&ReportRecord::new(kind), kind, stored)?;

    let mut form = ReportForm::open(kind, record);
    form.begin_edit();

    let total = actions.len();
    let applied = actions
        .into_iter()
        .filter(|action| form.apply(action.clone()))
        .count();

    let stored = save_report(gateway, kind, SaveTarget::Existing(id), &mut form).await?;
    Ok(EditOutcome {
        stored,
        form,
        applied,
        rejected: total - applied,
    })
}

/// Open a DOT inspection, or start one prefilled with the job's customer as
/// the motor carrier.
pub async fn open_dot_inspection(
    gateway: &dyn ReportGateway,
    job_id: Option<Uuid>,
    report_id: Option<Uuid>,
) -> Result<OpenedReport<DotInspectionRecord>, AppError> {
    // ---
    let kind = ReportKind::DotInspection;

    if let Some(stored) = fetch_existing(gateway, kind, report_id).await? {
        let (id, job_id, user_id) = (stored.id, stored.job_id, stored.user_id);
        let record = decode_stored(&DotInspectionRecord::default(), kind, stored)?;
        return Ok(OpenedReport {
            id: Some(id),
            job_id: Some(job_id),
            user_id,
            body: record,
        });
    }

    let mut record = DotInspectionRecord::default();
    if let Some(job_id) = job_id {
        if let Some((job, customer)) = job_context(gateway, job_id).await? {
            record.report_number = job.job_number;
            if let Some(customer) = customer {
                record.carrier.name = customer.display_name().to_string();
                record.carrier.address = customer.address.unwrap_or_default();
            }
        }
    }

    Ok(OpenedReport {
        id: None,
        job_id,
        user_id: None,
        body: record,
    })
}

pub async fn save_dot_inspection(
    gateway: &dyn ReportGateway,
    target: SaveTarget,
    record: &DotInspectionRecord,
) -> Result<StoredReport, AppError> {
    // ---
    let data = serde_json::to_value(record)?;
    persist(
        gateway,
        ReportKind::DotInspection,
        target,
        data,
        &record.vehicle.unit_number,
    )
    .await
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::calc::{Acceptability, TcfTable};
    use crate::form::{FormMode, Interval};
    use crate::models::DotItemResult;
    use crate::repository::InMemoryGateway;
    use serde_json::json;

    async fn seeded() -> (InMemoryGateway, Uuid) {
        // ---
        let gateway = InMemoryGateway::new();
        let customer_id = Uuid::new_v4();
        let job_id = Uuid::new_v4();
        gateway
            .insert_customer(Customer {
                id: customer_id,
                name: "Lee Park".to_string(),
                company_name: Some("Northgate Utilities".to_string()),
                address: Some("400 Grid Ave".to_string()),
            })
            .await;
        gateway
            .insert_job(Job {
                id: job_id,
                customer_id: Some(customer_id),
                job_number: "J-2201".to_string(),
                title: "Annual maintenance".to_string(),
            })
            .await;
        (gateway, job_id)
    }

    #[tokio::test]
    async fn test_new_report_is_prefilled_from_job_and_customer() {
        // ---
        let (gateway, job_id) = seeded().await;
        let opened = open_report(&gateway, ReportKind::DryTypeTransformer, Some(job_id), None)
            .await
            .unwrap();

        assert!(opened.id.is_none());
        assert_eq!(opened.body.mode(), FormMode::Editing);
        let info = &opened.body.record().job_info;
        assert_eq!(info.customer, "Northgate Utilities");
        assert_eq!(info.address, "400 Grid Ave");
        assert_eq!(info.job_number, "J-2201");
    }

    #[tokio::test]
    async fn test_missing_report_starts_new() {
        // ---
        let (gateway, job_id) = seeded().await;
        let opened = open_report(
            &gateway,
            ReportKind::LowVoltageCable,
            Some(job_id),
            Some(Uuid::new_v4()),
        )
        .await
        .unwrap();

        assert!(opened.id.is_none());
        assert_eq!(opened.body.record().job_info.job_number, "J-2201");
    }

    #[tokio::test]
    async fn test_save_then_reload_round_trips() {
        // ---
        let (gateway, job_id) = seeded().await;
        let kind = ReportKind::DryTypeTransformer;
        let mut form = open_report(&gateway, kind, Some(job_id), None).await.unwrap().body;
        form.apply(FormAction::SetFahrenheit { fahrenheit: 76.0 });
        form.apply(FormAction::SetRawReading {
            point: 0,
            interval: Interval::HalfMinute,
            value: "500".to_string(),
        });
        form.apply(FormAction::SetComments {
            value: "Tap 3 as found".to_string(),
        });

        let target = SaveTarget::New {
            job_id,
            user_id: None,
        };
        let stored = save_report(&gateway, kind, target, &mut form).await.unwrap();

        let reopened = open_report(&gateway, kind, None, Some(stored.id)).await.unwrap();
        assert_eq!(reopened.id, Some(stored.id));
        assert_eq!(reopened.job_id, Some(job_id));
        assert_eq!(reopened.body.record(), form.record());
        assert_eq!(
            reopened.body.record().insulation.test_points[0].corrected.half_minute,
            "600.00"
        );

        let assets = gateway.assets_for_job(job_id).await;
        assert_eq!(assets.len(), 1);
        assert!(assets[0].file_url.ends_with(&stored.id.to_string()));
    }

    #[tokio::test]
    async fn test_saving_for_unknown_job_fails() {
        // ---
        let gateway = InMemoryGateway::new();
        let mut form = ReportForm::new(ReportKind::SwitchgearPanelboard);
        let missing = Uuid::new_v4();
        let err = save_report(
            &gateway,
            ReportKind::SwitchgearPanelboard,
            SaveTarget::New {
                job_id: missing,
                user_id: None,
            },
            &mut form,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::JobNotFound(id) if id == missing));
    }

    #[tokio::test]
    async fn test_failed_save_keeps_form_editing() {
        // ---
        let gateway = InMemoryGateway::new();
        let kind = ReportKind::DryTypeTransformer;
        let mut form = ReportForm::new(kind);
        assert!(form.apply(FormAction::SetComments {
            value: "Bushing chipped".to_string(),
        }));

        let target = SaveTarget::New {
            job_id: Uuid::new_v4(),
            user_id: None,
        };
        assert!(save_report(&gateway, kind, target, &mut form).await.is_err());

        assert!(form.is_editing());
        assert_eq!(form.record().comments, "Bushing chipped");
        assert!(form.apply(FormAction::SetComments {
            value: "Bushing chipped, replaced".to_string(),
        }));

        // The snapshot from before the failed save is still there
        form.cancel();
        assert_eq!(form.record().comments, "");
    }

    #[tokio::test]
    async fn test_update_of_missing_report_keeps_form_editing() {
        // ---
        let gateway = InMemoryGateway::new();
        let kind = ReportKind::LowVoltageCable;
        let mut form = ReportForm::new(kind);

        let err = save_report(&gateway, kind, SaveTarget::Existing(Uuid::new_v4()), &mut form)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
        assert_eq!(form.mode(), FormMode::Editing);
    }

    #[test]
    fn test_partial_request_body_keeps_kind_defaults() {
        // ---
        let body = json!({
            "job_info": { "temperature": { "fahrenheit": 76.0 } },
            "comments": "x"
        });
        let mut record =
            record_from_request(ReportKind::LiquidFilledTransformer, Some(body)).unwrap();
        record.recompute();

        let temperature = &record.job_info.temperature;
        assert_eq!(temperature.table(), TcfTable::Alternate);
        assert_eq!(temperature.correction_factor(), 0.925);
        assert_eq!(record.comments, "x");
        assert_eq!(record.insulation.test_points.len(), 3);
        assert!(!record.visual_inspection.is_empty());
        assert_eq!(record.turns_ratio.as_ref().map(|t| t.taps.len()), Some(7));

        let blank = record_from_request(ReportKind::LowVoltageCable, None).unwrap();
        assert_eq!(blank, ReportRecord::new(ReportKind::LowVoltageCable));
    }

    #[test]
    fn test_malformed_request_body_is_a_client_error() {
        // ---
        let body = json!({ "comments": 42 });
        let err = record_from_request(ReportKind::SwitchgearPanelboard, Some(body)).unwrap_err();
        assert!(matches!(err, AppError::Serialization(_)));
    }

    #[tokio::test]
    async fn test_undecodable_stored_document_is_corrupt() {
        // ---
        let (gateway, job_id) = seeded().await;
        let kind = ReportKind::MediumVoltageCable;
        let stored = gateway
            .insert_report(
                kind,
                NewReport {
                    job_id,
                    user_id: None,
                    data: json!({ "comments": ["not", "text"] }),
                },
            )
            .await
            .unwrap();

        let err = open_report(&gateway, kind, None, Some(stored.id)).await.unwrap_err();
        assert!(matches!(err, AppError::CorruptDocument { id, .. } if id == stored.id));

        let err = apply_edits(&gateway, kind, stored.id, Vec::new()).await.unwrap_err();
        assert!(matches!(err, AppError::CorruptDocument { .. }));
    }

    #[tokio::test]
    async fn test_old_document_is_merged_with_defaults() {
        // ---
        let (gateway, job_id) = seeded().await;
        let kind = ReportKind::LiquidFilledTransformer;
        let stored = gateway
            .insert_report(
                kind,
                NewReport {
                    job_id,
                    user_id: None,
                    data: json!({"comments": "legacy", "turns_ratio": null}),
                },
            )
            .await
            .unwrap();

        let opened = open_report(&gateway, kind, None, Some(stored.id)).await.unwrap();
        let record = opened.body.record();
        assert_eq!(record.comments, "legacy");
        assert_eq!(record.turns_ratio.as_ref().map(|t| t.taps.len()), Some(7));
        assert_eq!(record.insulation.test_points.len(), 3);
    }

    #[tokio::test]
    async fn test_apply_edits_counts_rejections() {
        // ---
        let (gateway, job_id) = seeded().await;
        let kind = ReportKind::SwitchgearPanelboard;
        let mut form = ReportForm::new(kind);
        let target = SaveTarget::New {
            job_id,
            user_id: None,
        };
        let stored = save_report(&gateway, kind, target, &mut form).await.unwrap();

        let actions = vec![
            FormAction::SetRawReading {
                point: 0,
                interval: Interval::HalfMinute,
                value: "400".to_string(),
            },
            FormAction::SetRawReading {
                point: 0,
                interval: Interval::OneMinute,
                value: "600".to_string(),
            },
            FormAction::SetSecondaryVoltage {
                value: "480".to_string(),
            },
        ];
        let outcome = apply_edits(&gateway, kind, stored.id, actions).await.unwrap();

        assert_eq!(outcome.applied, 2);
        assert_eq!(outcome.rejected, 1);
        assert_eq!(outcome.form.mode(), FormMode::Viewing);
        let point = &outcome.form.record().insulation.test_points[0];
        assert_eq!(point.ratios.dielectric_absorption, "1.50");
        assert_eq!(outcome.form.record().insulation.acceptable, Acceptability::Yes);
        assert_eq!(outcome.stored.data["insulation"]["acceptable"], "Yes");
    }

    #[tokio::test]
    async fn test_dot_kind_is_not_an_electrical_report() {
        // ---
        let gateway = InMemoryGateway::new();
        let err = open_report(&gateway, ReportKind::DotInspection, None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_dot_inspection_round_trip() {
        // ---
        let (gateway, job_id) = seeded().await;
        let mut record = open_dot_inspection(&gateway, Some(job_id), None)
            .await
            .unwrap()
            .body;
        assert_eq!(record.carrier.name, "Northgate Utilities");
        assert_eq!(record.report_number, "J-2201");

        record.vehicle.unit_number = "T-14".to_string();
        record.items[0].result = Some(DotItemResult::Ok);

        let target = SaveTarget::New {
            job_id,
            user_id: None,
        };
        let stored = save_dot_inspection(&gateway, target, &record).await.unwrap();
        let reopened = open_dot_inspection(&gateway, None, Some(stored.id))
            .await
            .unwrap();
        assert_eq!(reopened.body, record);

        let assets = gateway.assets_for_job(job_id).await;
        assert_eq!(assets[0].name, "DOT Annual Vehicle Inspection - T-14");
    }

    #[tokio::test]
    async fn test_blank_company_name_prefills_contact_name() {
        // ---
        let gateway = InMemoryGateway::new();
        let customer_id = Uuid::new_v4();
        let job_id = Uuid::new_v4();
        gateway
            .insert_customer(Customer {
                id: customer_id,
                name: "Sam Ruiz".to_string(),
                company_name: Some(String::new()),
                address: None,
            })
            .await;
        gateway
            .insert_job(Job {
                id: job_id,
                customer_id: Some(customer_id),
                job_number: "J-3100".to_string(),
                title: String::new(),
            })
            .await;

        let dot = open_dot_inspection(&gateway, Some(job_id), None).await.unwrap();
        assert_eq!(dot.body.carrier.name, "Sam Ruiz");

        let report = open_report(&gateway, ReportKind::SwitchgearPanelboard, Some(job_id), None)
            .await
            .unwrap();
        assert_eq!(report.body.record().job_info.customer, "Sam Ruiz");
    }
}
