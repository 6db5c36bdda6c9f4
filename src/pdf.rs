//! Field layout for the DOT annual inspection PDF.
//!
//! The template itself and the library that stamps it live outside this
//! crate. This module turns a [`DotInspectionRecord`] into a flat
//! `{field name: value}` map and pairs each entry with where it goes on the
//! template: a named AcroForm field for the header block, or page-relative
//! coordinates (points, origin bottom-left) for the checklist grid.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::models::{DotInspectionRecord, DotItemResult, VehicleType};

// ---

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Placement {
    AcroForm { field: &'static str },
    Coordinates { page: u16, x: f32, y: f32 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedField {
    // ---
    pub name: String,
    pub value: String,
    pub placement: Placement,
}

/// Mark written into checkbox cells.
const CHECK: &str = "X";

const HEADER_FIELDS: &[(&str, &str)] = &[
    ("report_number", "ReportNumber"),
    ("carrier.name", "MotorCarrierName"),
    ("carrier.address", "MotorCarrierAddress"),
    ("carrier.city_state_zip", "MotorCarrierCityStateZip"),
    ("vehicle.unit_number", "FleetUnitNumber"),
    ("vehicle.vehicle_type", "VehicleType"),
    ("vehicle.vin", "VIN"),
    ("vehicle.license_plate", "LicensePlate"),
    ("vehicle.year", "VehicleYear"),
    ("vehicle.make", "VehicleMake"),
    ("vehicle.model", "VehicleModel"),
    ("vehicle.odometer", "Odometer"),
    ("inspector.name", "InspectorName"),
    ("inspector.qualified", "InspectorQualified"),
    ("inspection_date", "InspectionDate"),
];

/// Free-text and verdict cells on page 1 that have no form field.
const PAGE_FIELDS: &[(&str, Placement)] = &[
    ("remarks", Placement::Coordinates { page: 1, x: 42.0, y: 96.0 }),
    ("passed", Placement::Coordinates { page: 1, x: 498.0, y: 64.0 }),
    ("failed", Placement::Coordinates { page: 1, x: 548.0, y: 64.0 }),
];

/// Checklist columns, as (column suffix, x).
const ITEM_COLUMNS: &[(&str, f32)] = &[
    ("ok", 372.0),
    ("repair", 412.0),
    ("na", 452.0),
    ("repaired_date", 490.0),
];

/// Baseline of each checklist row on page 1.
#[rustfmt::skip]
const ITEM_ROWS: &[(&str, f32)] = &[
    ("1a", 604.0), ("1b", 592.0), ("1c", 580.0), ("1d", 568.0),
    ("1e", 556.0), ("1f", 544.0), ("1g", 532.0), ("1h", 520.0),
    ("2a", 500.0), ("2b", 488.0), ("2c", 476.0),
    ("3", 456.0),
    ("4", 436.0),
    ("5", 416.0),
    ("6", 396.0),
    ("7a", 376.0), ("7b", 364.0), ("7c", 352.0),
    ("8a", 332.0), ("8b", 320.0),
    ("9", 300.0),
    ("10", 280.0),
    ("11", 260.0),
    ("12", 240.0),
    ("13", 220.0),
];

/// Where a logical field name is drawn, if the template has a spot for it.
pub fn placement(name: &str) -> Option<Placement> {
    // ---
    if let Some((_, field)) = HEADER_FIELDS.iter().find(|(n, _)| *n == name) {
        return Some(Placement::AcroForm { field: *field });
    }
    if let Some((_, placement)) = PAGE_FIELDS.iter().find(|(n, _)| *n == name) {
        return Some(*placement);
    }

    // items.<id>.<column>
    let rest = name.strip_prefix("items.")?;
    let (id, column) = rest.split_once('.')?;
    let (_, y) = ITEM_ROWS.iter().find(|(row, _)| *row == id)?;
    let (_, x) = ITEM_COLUMNS.iter().find(|(col, _)| *col == column)?;
    Some(Placement::Coordinates {
        page: 1,
        x: *x,
        y: *y,
    })
}

fn vehicle_type_label(vehicle_type: VehicleType) -> &'static str {
    match vehicle_type {
        VehicleType::Truck => "Truck",
        VehicleType::Tractor => "Tractor",
        VehicleType::Trailer => "Trailer",
        VehicleType::Bus => "Bus",
        VehicleType::Other => "Other",
    }
}

impl DotInspectionRecord {
    /// Flatten the record into template field names. Blank values are left
    /// out so the template's own empty state shows through.
    pub fn to_field_map(&self) -> BTreeMap<String, String> {
        // ---
        let mut fields = BTreeMap::new();
        let mut put = |name: &str, value: &str| {
            if !value.trim().is_empty() {
                fields.insert(name.to_string(), value.to_string());
            }
        };

        put("report_number", &self.report_number);
        put("carrier.name", &self.carrier.name);
        put("carrier.address", &self.carrier.address);
        put("carrier.city_state_zip", &self.carrier.city_state_zip);
        put("vehicle.unit_number", &self.vehicle.unit_number);
        put("vehicle.vehicle_type", vehicle_type_label(self.vehicle.vehicle_type));
        put("vehicle.vin", &self.vehicle.vin);
        put("vehicle.license_plate", &self.vehicle.license_plate);
        put("vehicle.year", &self.vehicle.year);
        put("vehicle.make", &self.vehicle.make);
        put("vehicle.model", &self.vehicle.model);
        put("vehicle.odometer", &self.vehicle.odometer);
        put("inspector.name", &self.inspector.name);
        if self.inspector.qualified {
            put("inspector.qualified", CHECK);
        }
        if let Some(date) = self.inspection_date {
            put("inspection_date", &date.format("%m/%d/%Y").to_string());
        }
        put("remarks", &self.remarks);
        put(if self.passed() { "passed" } else { "failed" }, CHECK);

        for item in &self.items {
            let column = match item.result {
                Some(DotItemResult::Ok) => Some("ok"),
                Some(DotItemResult::NeedsRepair) => Some("repair"),
                Some(DotItemResult::NotApplicable) => Some("na"),
                None => None,
            };
            if let Some(column) = column {
                put(&format!("items.{}.{}", item.id, column), CHECK);
            }
            if let Some(date) = item.repaired_on {
                put(
                    &format!("items.{}.repaired_date", item.id),
                    &date.format("%m/%d/%y").to_string(),
                );
            }
        }

        fields
    }
}

/// Pair each field with its placement; fields the template has no spot for
/// are dropped.
pub fn layout(fields: &BTreeMap<String, String>) -> Vec<PlacedField> {
    // ---
    fields
        .iter()
        .filter_map(|(name, value)| match placement(name) {
            Some(placement) => Some(PlacedField {
                name: name.clone(),
                value: value.clone(),
                placement,
            }),
            None => {
                debug!("No template placement for field '{}', skipping", name);
                None
            }
        })
        .collect()
}
