//! Persistence gateway for report documents and their collaborator rows.
//!
//! Every report type goes through the same [`ReportGateway`] interface,
//! parameterized by [`ReportKind`]; the kind decides which table a call
//! touches. Bodies are opaque JSON here, typing happens in `reports`.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Customer, Job, JobAsset, NewJobAsset, ReportKind};

mod memory;
mod merge;
mod postgres;

pub use memory::InMemoryGateway;
pub use merge::merge_with_defaults;
pub use postgres::PgGateway;

// ---

/// One stored report row.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct StoredReport {
    // ---
    pub id: Uuid,
    pub job_id: Uuid,
    pub user_id: Option<Uuid>,
    pub data: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewReport {
    // ---
    pub job_id: Uuid,
    pub user_id: Option<Uuid>,
    pub data: Value,
}

#[async_trait]
pub trait ReportGateway: Send + Sync {
    /// `Ok(None)` when no report of `kind` has this id.
    async fn fetch_report(&self, kind: ReportKind, id: Uuid)
        -> Result<Option<StoredReport>, AppError>;

    async fn insert_report(
        &self,
        kind: ReportKind,
        report: NewReport,
    ) -> Result<StoredReport, AppError>;

    /// Replace the document of an existing report.
    async fn update_report(
        &self,
        kind: ReportKind,
        id: Uuid,
        data: Value,
    ) -> Result<StoredReport, AppError>;

    /// Returns whether a row was removed.
    async fn delete_report(&self, kind: ReportKind, id: Uuid) -> Result<bool, AppError>;

    async fn fetch_job(&self, id: Uuid) -> Result<Option<Job>, AppError>;

    async fn fetch_customer(&self, id: Uuid) -> Result<Option<Customer>, AppError>;

    async fn insert_asset_link(&self, asset: NewJobAsset) -> Result<JobAsset, AppError>;

    /// Name of this backend for logging.
    fn name(&self) -> &str;
}

/// Gateway handle shared by every request handler.
pub type SharedGateway = Arc<dyn ReportGateway>;
