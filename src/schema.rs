//! Database schema management for `fieldops-reports`.
//!
//! Ensures required tables and indexes exist before serving requests.
//! Applied once on startup from `main.rs` (EMBP: single gateway call).

use anyhow::Result;
use sqlx::PgPool;

use crate::models::ReportKind;

// ---

/// Create or update the database schema (idempotent).
///
/// Creates the schema itself, the `customers`, `jobs` and `job_assets`
/// collaborator tables, and one document table per [`ReportKind`]. Safe to
/// call on every startup; no-op if objects already exist.
///
/// `schema` must already be a validated identifier.
/// Errors are propagated if any SQL execution fails.
pub async fn create_schema(pool: &PgPool, schema: &str) -> Result<()> {
    // ---
    let mut tx = pool.begin().await?;

    sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {schema}"))
        .execute(&mut *tx)
        .await?;

    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {schema}.customers (
            id            UUID PRIMARY KEY,
            name          TEXT NOT NULL,
            company_name  TEXT,
            address       TEXT
        );
        "#
    ))
    .execute(&mut *tx)
    .await?;

    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {schema}.jobs (
            id            UUID PRIMARY KEY,
            customer_id   UUID REFERENCES {schema}.customers (id),
            job_number    TEXT NOT NULL,
            title         TEXT NOT NULL DEFAULT ''
        );
        "#
    ))
    .execute(&mut *tx)
    .await?;

    // Links from a job to the reports filed against it
    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {schema}.job_assets (
            id            UUID PRIMARY KEY,
            job_id        UUID        NOT NULL REFERENCES {schema}.jobs (id),
            name          TEXT        NOT NULL,
            file_url      TEXT        NOT NULL,
            user_id       UUID,
            created_at    TIMESTAMPTZ NOT NULL DEFAULT NOW()
        );
        "#
    ))
    .execute(&mut *tx)
    .await?;

    // One JSON document per report, same shape for every report type
    for kind in ReportKind::ALL {
        let table = kind.table();

        sqlx::query(&format!(
            r#"
            CREATE TABLE IF NOT EXISTS {schema}.{table} (
                id            UUID PRIMARY KEY,
                job_id        UUID        NOT NULL REFERENCES {schema}.jobs (id),
                user_id       UUID,
                data          JSONB       NOT NULL,
                created_at    TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at    TIMESTAMPTZ NOT NULL DEFAULT NOW()
            );
            "#
        ))
        .execute(&mut *tx)
        .await?;

        sqlx::query(&format!(
            "CREATE INDEX IF NOT EXISTS idx_{table}_job_id ON {schema}.{table} (job_id);"
        ))
        .execute(&mut *tx)
        .await?;
    }

    sqlx::query(&format!(
        "CREATE INDEX IF NOT EXISTS idx_job_assets_job_id ON {schema}.job_assets (job_id);"
    ))
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(())
}
