//! PostgreSQL implementation of [`ReportGateway`].
//!
//! Table names come from [`ReportKind::table`] and the schema name is
//! validated when the configuration loads, so both are safe to splice into
//! SQL text. Values are always bound.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use super::{NewReport, ReportGateway, StoredReport};
use crate::error::AppError;
use crate::models::{Customer, Job, JobAsset, NewJobAsset, ReportKind};

// ---

const REPORT_COLUMNS: &str = "id, job_id, user_id, data, created_at, updated_at";

pub struct PgGateway {
    // ---
    pool: PgPool,
    schema: String,
}

impl PgGateway {
    // ---
    pub fn new(pool: PgPool, schema: impl Into<String>) -> Self {
        Self {
            pool,
            schema: schema.into(),
        }
    }

    fn qualified(&self, table: &str) -> String {
        format!("{}.{}", self.schema, table)
    }
}

#[async_trait]
impl ReportGateway for PgGateway {
    // ---
    async fn fetch_report(
        &self,
        kind: ReportKind,
        id: Uuid,
    ) -> Result<Option<StoredReport>, AppError> {
        // ---
        let sql = format!(
            "SELECT {REPORT_COLUMNS} FROM {} WHERE id = $1",
            self.qualified(kind.table())
        );
        let row = sqlx::query_as::<_, StoredReport>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        debug!("Fetched {} report {}: found={}", kind, id, row.is_some());
        Ok(row)
    }

    async fn insert_report(
        &self,
        kind: ReportKind,
        report: NewReport,
    ) -> Result<StoredReport, AppError> {
        // ---
        let sql = format!(
            r#"
            INSERT INTO {} (id, job_id, user_id, data)
            VALUES ($1, $2, $3, $4)
            RETURNING {REPORT_COLUMNS}
            "#,
            self.qualified(kind.table())
        );
        let row = sqlx::query_as::<_, StoredReport>(&sql)
            .bind(Uuid::new_v4())
            .bind(report.job_id)
            .bind(report.user_id)
            .bind(&report.data)
            .fetch_one(&self.pool)
            .await?;

        Ok(row)
    }

    async fn update_report(
        &self,
        kind: ReportKind,
        id: Uuid,
        data: Value,
    ) -> Result<StoredReport, AppError> {
        // ---
        let sql = format!(
            r#"
            UPDATE {}
               SET data = $2, updated_at = NOW()
             WHERE id = $1
            RETURNING {REPORT_COLUMNS}
            "#,
            self.qualified(kind.table())
        );
        sqlx::query_as::<_, StoredReport>(&sql)
            .bind(id)
            .bind(&data)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NotFound { kind, id })
    }

    async fn delete_report(&self, kind: ReportKind, id: Uuid) -> Result<bool, AppError> {
        // ---
        let sql = format!("DELETE FROM {} WHERE id = $1", self.qualified(kind.table()));
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn fetch_job(&self, id: Uuid) -> Result<Option<Job>, AppError> {
        // ---
        let sql = format!(
            "SELECT id, customer_id, job_number, title FROM {} WHERE id = $1",
            self.qualified("jobs")
        );
        let job = sqlx::query_as::<_, Job>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(job)
    }

    async fn fetch_customer(&self, id: Uuid) -> Result<Option<Customer>, AppError> {
        // ---
        let sql = format!(
            "SELECT id, name, company_name, address FROM {} WHERE id = $1",
            self.qualified("customers")
        );
        let customer = sqlx::query_as::<_, Customer>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(customer)
    }

    async fn insert_asset_link(&self, asset: NewJobAsset) -> Result<JobAsset, AppError> {
        // ---
        let sql = format!(
            r#"
            INSERT INTO {} (id, job_id, name, file_url, user_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, job_id, name, file_url, user_id, created_at
            "#,
            self.qualified("job_assets")
        );
        let row = sqlx::query_as::<_, JobAsset>(&sql)
            .bind(Uuid::new_v4())
            .bind(asset.job_id)
            .bind(&asset.name)
            .bind(&asset.file_url)
            .bind(asset.user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    fn name(&self) -> &str {
        "postgres"
    }
}
