//! Job, customer and asset rows the report forms read and link to.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ReportKind;

// ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Job {
    // ---
    pub id: Uuid,
    pub customer_id: Option<Uuid>,
    pub job_number: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Customer {
    // ---
    pub id: Uuid,
    pub name: String,
    pub company_name: Option<String>,
    pub address: Option<String>,
}

impl Customer {
    /// Company name when one is on file, else the contact name.
    pub fn display_name(&self) -> &str {
        self.company_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.name)
    }
}

/// Link from a job to a saved report, shown in the job's asset list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct JobAsset {
    // ---
    pub id: Uuid,
    pub job_id: Uuid,
    pub name: String,
    pub file_url: String,
    pub user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewJobAsset {
    // ---
    pub job_id: Uuid,
    pub name: String,
    pub file_url: String,
    pub user_id: Option<Uuid>,
}

impl NewJobAsset {
    /// Asset entry pointing at a freshly created report.
    pub fn for_report(
        kind: ReportKind,
        job_id: Uuid,
        report_id: Uuid,
        label: &str,
        user_id: Option<Uuid>,
    ) -> Self {
        // ---
        let name = if label.trim().is_empty() {
            kind.display_name().to_string()
        } else {
            format!("{} - {}", kind.display_name(), label.trim())
        };

        Self {
            job_id,
            name,
            file_url: format!("report:/jobs/{}/{}/{}", job_id, kind.slug(), report_id),
            user_id,
        }
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    fn customer(company_name: Option<&str>) -> Customer {
        Customer {
            id: Uuid::new_v4(),
            name: "Ana Ortiz".to_string(),
            company_name: company_name.map(str::to_string),
            address: None,
        }
    }

    #[test]
    fn test_display_name_falls_back_to_contact() {
        // ---
        assert_eq!(customer(Some("Ortiz Industrial")).display_name(), "Ortiz Industrial");
        assert_eq!(customer(Some("  ")).display_name(), "Ana Ortiz");
        assert_eq!(customer(None).display_name(), "Ana Ortiz");
    }

    #[test]
    fn test_asset_link_for_report() {
        // ---
        let job_id = Uuid::new_v4();
        let report_id = Uuid::new_v4();
        let asset = NewJobAsset::for_report(
            ReportKind::DryTypeTransformer,
            job_id,
            report_id,
            " TX-1 ",
            None,
        );

        assert_eq!(asset.name, "Dry Type Transformer Test - TX-1");
        assert_eq!(
            asset.file_url,
            format!("report:/jobs/{job_id}/dry-type-transformer/{report_id}")
        );
    }

    #[test]
    fn test_asset_name_without_label() {
        // ---
        let asset = NewJobAsset::for_report(
            ReportKind::DotInspection,
            Uuid::new_v4(),
            Uuid::new_v4(),
            "",
            None,
        );
        assert_eq!(asset.name, "DOT Annual Vehicle Inspection");
    }
}
