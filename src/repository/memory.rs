//! In-process implementation of [`ReportGateway`].
//!
//! Backs `STORE_BACKEND=memory` runs and the test suites. Nothing survives
//! a restart.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{NewReport, ReportGateway, StoredReport};
use crate::error::AppError;
use crate::models::{Customer, Job, JobAsset, NewJobAsset, ReportKind};

// ---

#[derive(Default)]
pub struct InMemoryGateway {
    // ---
    reports: RwLock<HashMap<(ReportKind, Uuid), StoredReport>>,
    jobs: RwLock<HashMap<Uuid, Job>>,
    customers: RwLock<HashMap<Uuid, Customer>>,
    assets: RwLock<Vec<JobAsset>>,
}

impl InMemoryGateway {
    // ---
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_job(&self, job: Job) {
        self.jobs.write().await.insert(job.id, job);
    }

    pub async fn insert_customer(&self, customer: Customer) {
        self.customers.write().await.insert(customer.id, customer);
    }

    /// Asset links recorded for `job_id`, oldest first.
    pub async fn assets_for_job(&self, job_id: Uuid) -> Vec<JobAsset> {
        self.assets
            .read()
            .await
            .iter()
            .filter(|asset| asset.job_id == job_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ReportGateway for InMemoryGateway {
    // ---
    async fn fetch_report(
        &self,
        kind: ReportKind,
        id: Uuid,
    ) -> Result<Option<StoredReport>, AppError> {
        Ok(self.reports.read().await.get(&(kind, id)).cloned())
    }

    async fn insert_report(
        &self,
        kind: ReportKind,
        report: NewReport,
    ) -> Result<StoredReport, AppError> {
        // ---
        let now = Utc::now();
        let stored = StoredReport {
            id: Uuid::new_v4(),
            job_id: report.job_id,
            user_id: report.user_id,
            data: report.data,
            created_at: now,
            updated_at: now,
        };
        self.reports
            .write()
            .await
            .insert((kind, stored.id), stored.clone());
        Ok(stored)
    }

    async fn update_report(
        &self,
        kind: ReportKind,
        id: Uuid,
        data: Value,
    ) -> Result<StoredReport, AppError> {
        // ---
        let mut reports = self.reports.write().await;
        let stored = reports
            .get_mut(&(kind, id))
            .ok_or(AppError::NotFound { kind, id })?;
        stored.data = data;
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete_report(&self, kind: ReportKind, id: Uuid) -> Result<bool, AppError> {
        Ok(self.reports.write().await.remove(&(kind, id)).is_some())
    }

    async fn fetch_job(&self, id: Uuid) -> Result<Option<Job>, AppError> {
        Ok(self.jobs.read().await.get(&id).cloned())
    }

    async fn fetch_customer(&self, id: Uuid) -> Result<Option<Customer>, AppError> {
        Ok(self.customers.read().await.get(&id).cloned())
    }

    async fn insert_asset_link(&self, asset: NewJobAsset) -> Result<JobAsset, AppError> {
        // ---
        let row = JobAsset {
            id: Uuid::new_v4(),
            job_id: asset.job_id,
            name: asset.name,
            file_url: asset.file_url,
            user_id: asset.user_id,
            created_at: Utc::now(),
        };
        self.assets.write().await.push(row.clone());
        Ok(row)
    }

    fn name(&self) -> &str {
        "memory"
    }
}
