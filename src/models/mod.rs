//! Data models for the report service.
//!
//! Report documents are plain serde structs stored as JSON; collaborator
//! rows (jobs, customers, assets) map straight onto their tables.

mod dot;
mod job;
mod kind;
mod report;

pub use dot::{
    Carrier, DotInspectionRecord, DotItem, DotItemResult, Inspector, Vehicle, VehicleType,
    DOT_ITEMS,
};
pub use job::{Customer, Job, JobAsset, NewJobAsset};
pub use kind::ReportKind;
pub use report::{
    InspectionResult, InsulationResistance, InsulationTestPoint, Instrument, JobInfo, Nameplate,
    ReportRecord, ReportStatus, ResistanceUnit, TestEquipment, TestVoltage, VisualInspectionItem,
};
