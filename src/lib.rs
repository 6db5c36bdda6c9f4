//! Field test report service.
//!
//! Electrical acceptance-test reports (switchgear, transformers, cables) and
//! DOT vehicle inspections, stored as one JSON document per report. The
//! temperature-correction and insulation/turns-ratio evaluation shared by
//! every electrical form lives in [`calc`]; [`form`] wraps a report in the
//! view/edit state machine that re-runs those calculations on each edit.
//!
//! This crate follows the Explicit Module Boundary Pattern (EMBP): each
//! module exposes a narrow surface through its `mod.rs` and siblings reach
//! each other only through those re-exports.

pub mod calc;
pub mod config;
pub mod error;
pub mod form;
pub mod models;
pub mod pdf;
pub mod reports;
pub mod repository;
pub mod routes;
pub mod schema;

pub use config::Config;
pub use error::AppError;
pub use form::{FormAction, FormMode, ReportForm};
pub use models::{DotInspectionRecord, ReportKind, ReportRecord};
pub use repository::{InMemoryGateway, PgGateway, ReportGateway, SharedGateway};
