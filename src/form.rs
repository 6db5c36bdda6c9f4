//! Form state container for electrical test reports.
//!
//! A [`ReportForm`] owns one [`ReportRecord`] and gates every edit behind a
//! two-state mode: `Viewing` (read-only) and `Editing`. Edits arrive as
//! typed [`FormAction`]s instead of dotted path strings; actions that feed a
//! calculation trigger a full recompute before `apply` returns.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calc::{Phase, TcfTable};
use crate::models::{
    InspectionResult, Instrument, ReportKind, ReportRecord, ReportStatus, ResistanceUnit,
    TestVoltage,
};

// ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormMode {
    Viewing,
    Editing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobField {
    Customer,
    Address,
    User,
    Identifier,
    JobNumber,
    Technicians,
    Substation,
    EquipmentLocation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameplateField {
    Manufacturer,
    CatalogNumber,
    SerialNumber,
    Kva,
    Phases,
    PrimaryVoltage,
    SecondaryVoltage,
    TemperatureRise,
    Impedance,
}

/// Timed reading of an insulation test point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interval {
    HalfMinute,
    OneMinute,
    TenMinute,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstrumentSlot {
    Megohmmeter,
    TtrTestSet,
}

/// Every edit a report form can make. `point` and `index` are positions in
/// the test-point and inspection lists; `tap` is the 1-based tap number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum FormAction {
    SetFahrenheit { fahrenheit: f64 },
    SetHumidity { humidity: Option<f64> },
    SetTcfTable { table: TcfTable },
    SetJobField { field: JobField, value: String },
    SetDate { date: Option<NaiveDate> },
    SetNameplateField { field: NameplateField, value: String },
    SetInspectionResult { index: usize, result: Option<InspectionResult> },
    SetTestVoltage { point: usize, voltage: TestVoltage },
    SetUnit { point: usize, unit: ResistanceUnit },
    SetRawReading { point: usize, interval: Interval, value: String },
    SetSecondaryVoltage { value: String },
    SetTapNameplateVoltage { tap: u8, value: String },
    SetMeasuredTtr { tap: u8, phase: Phase, value: String },
    SetInstrument { slot: InstrumentSlot, instrument: Instrument },
    SetComments { value: String },
    SetStatus { status: ReportStatus },
}

impl FormAction {
    /// Whether the action changes an input of a derived field.
    pub fn affects_calculations(&self) -> bool {
        matches!(
            self,
            FormAction::SetFahrenheit { .. }
                | FormAction::SetTcfTable { .. }
                | FormAction::SetRawReading { .. }
                | FormAction::SetSecondaryVoltage { .. }
                | FormAction::SetTapNameplateVoltage { .. }
                | FormAction::SetMeasuredTtr { .. }
        )
    }
}

#[derive(Debug, Clone)]
pub struct ReportForm {
    // ---
    kind: ReportKind,
    record: ReportRecord,
    mode: FormMode,
    /// Record as it was when editing began; restored by `cancel`.
    snapshot: Option<ReportRecord>,
}

impl ReportForm {
    // ---
    /// A blank report, opened for editing.
    pub fn new(kind: ReportKind) -> Self {
        Self::draft(kind, ReportRecord::new(kind))
    }

    /// An unsaved report, opened for editing. `cancel` returns to `record`.
    pub fn draft(kind: ReportKind, mut record: ReportRecord) -> Self {
        // ---
        record.recompute();
        Self {
            kind,
            snapshot: Some(record.clone()),
            record,
            mode: FormMode::Editing,
        }
    }

    /// An existing report, opened read-only. Derived fields are recomputed
    /// so a stale stored document can never show inconsistent results.
    pub fn open(kind: ReportKind, mut record: ReportRecord) -> Self {
        // ---
        record.recompute();
        Self {
            kind,
            record,
            mode: FormMode::Viewing,
            snapshot: None,
        }
    }

    pub fn kind(&self) -> ReportKind {
        self.kind
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        self.mode == FormMode::Editing
    }

    pub fn record(&self) -> &ReportRecord {
        &self.record
    }

    pub fn into_record(self) -> ReportRecord {
        self.record
    }

    pub fn begin_edit(&mut self) {
        // ---
        if self.mode == FormMode::Editing {
            return;
        }
        self.snapshot = Some(self.record.clone());
        self.mode = FormMode::Editing;
    }

    /// Leave edit mode, discarding every change since `begin_edit`.
    pub fn cancel(&mut self) {
        // ---
        if let Some(snapshot) = self.snapshot.take() {
            self.record = snapshot;
        }
        self.mode = FormMode::Viewing;
    }

    /// Leave edit mode, keeping the changes. Returns the record to persist.
    pub fn save(&mut self) -> &ReportRecord {
        // ---
        self.record.recompute();
        self.snapshot = None;
        self.mode = FormMode::Viewing;
        &self.record
    }

    /// Apply one edit. Returns `false` when the form is read-only or the
    /// action addresses something this report does not have.
    pub fn apply(&mut self, action: FormAction) -> bool {
        // ---
        if self.mode != FormMode::Editing {
            debug!("Ignoring {:?} on read-only {} form", action, self.kind);
            return false;
        }

        let recompute = action.affects_calculations();
        let applied = self.apply_to_record(action);
        if applied && recompute {
            self.record.recompute();
        }
        applied
    }

    fn apply_to_record(&mut self, action: FormAction) -> bool {
        // ---
        let record = &mut self.record;
        match action {
            FormAction::SetFahrenheit { fahrenheit } => {
                record.job_info.temperature.set_fahrenheit(fahrenheit);
            }
            FormAction::SetHumidity { humidity } => {
                record.job_info.temperature.humidity = humidity;
            }
            FormAction::SetTcfTable { table } => {
                record.job_info.temperature.set_table(table);
            }
            FormAction::SetJobField { field, value } => {
                let info = &mut record.job_info;
                let target = match field {
                    JobField::Customer => &mut info.customer,
                    JobField::Address => &mut info.address,
                    JobField::User => &mut info.user,
                    JobField::Identifier => &mut info.identifier,
                    JobField::JobNumber => &mut info.job_number,
                    JobField::Technicians => &mut info.technicians,
                    JobField::Substation => &mut info.substation,
                    JobField::EquipmentLocation => &mut info.equipment_location,
                };
                *target = value;
            }
            FormAction::SetDate { date } => {
                record.job_info.date = date;
            }
            FormAction::SetNameplateField { field, value } => {
                let nameplate = &mut record.nameplate;
                let target = match field {
                    NameplateField::Manufacturer => &mut nameplate.manufacturer,
                    NameplateField::CatalogNumber => &mut nameplate.catalog_number,
                    NameplateField::SerialNumber => &mut nameplate.serial_number,
                    NameplateField::Kva => &mut nameplate.kva,
                    NameplateField::Phases => &mut nameplate.phases,
                    NameplateField::PrimaryVoltage => &mut nameplate.primary_voltage,
                    NameplateField::SecondaryVoltage => &mut nameplate.secondary_voltage,
                    NameplateField::TemperatureRise => &mut nameplate.temperature_rise,
                    NameplateField::Impedance => &mut nameplate.impedance,
                };
                *target = value;
            }
            FormAction::SetInspectionResult { index, result } => {
                let Some(item) = record.visual_inspection.get_mut(index) else {
                    return false;
                };
                item.result = result;
            }
            FormAction::SetTestVoltage { point, voltage } => {
                let Some(point) = record.insulation.test_points.get_mut(point) else {
                    return false;
                };
                point.test_voltage = voltage;
            }
            FormAction::SetUnit { point, unit } => {
                let Some(point) = record.insulation.test_points.get_mut(point) else {
                    return false;
                };
                point.unit = unit;
            }
            FormAction::SetRawReading {
                point,
                interval,
                value,
            } => {
                let Some(point) = record.insulation.test_points.get_mut(point) else {
                    return false;
                };
                let raw = &mut point.raw;
                match interval {
                    Interval::HalfMinute => raw.half_minute = value,
                    Interval::OneMinute => raw.one_minute = value,
                    Interval::TenMinute => raw.ten_minute = value,
                }
            }
            FormAction::SetSecondaryVoltage { value } => {
                let Some(turns_ratio) = record.turns_ratio.as_mut() else {
                    return false;
                };
                turns_ratio.secondary_voltage = value;
            }
            FormAction::SetTapNameplateVoltage { tap, value } => {
                let Some(tap) = record.turns_ratio.as_mut().and_then(|t| t.tap_mut(tap)) else {
                    return false;
                };
                tap.nameplate_voltage = value;
            }
            FormAction::SetMeasuredTtr { tap, phase, value } => {
                let Some(tap) = record.turns_ratio.as_mut().and_then(|t| t.tap_mut(tap)) else {
                    return false;
                };
                tap.phase_mut(phase).measured = value;
            }
            FormAction::SetInstrument { slot, instrument } => match slot {
                InstrumentSlot::Megohmmeter => record.test_equipment.megohmmeter = instrument,
                InstrumentSlot::TtrTestSet => record.test_equipment.ttr_test_set = instrument,
            },
            FormAction::SetComments { value } => {
                record.comments = value;
            }
            FormAction::SetStatus { status } => {
                record.status = status;
            }
        }
        true
    }
}
