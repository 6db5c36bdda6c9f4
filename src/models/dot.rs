//! DOT annual vehicle inspection document.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---

/// Components checked on the annual inspection, as (id, group, description).
pub const DOT_ITEMS: &[(&str, &str, &str)] = &[
    ("1a", "Brake System", "Service brakes"),
    ("1b", "Brake System", "Parking brake system"),
    ("1c", "Brake System", "Brake drums or rotors"),
    ("1d", "Brake System", "Brake hose"),
    ("1e", "Brake System", "Brake tubing"),
    ("1f", "Brake System", "Low pressure warning device"),
    ("1g", "Brake System", "Tractor protection valve"),
    ("1h", "Brake System", "Air compressor"),
    ("2a", "Coupling Devices", "Fifth wheels"),
    ("2b", "Coupling Devices", "Pintle hooks"),
    ("2c", "Coupling Devices", "Safety devices"),
    ("3", "Exhaust System", "Exhaust system"),
    ("4", "Fuel System", "Fuel system"),
    ("5", "Lighting Devices", "All lighting devices and reflectors"),
    ("6", "Safe Loading", "Protection against shifting cargo"),
    ("7a", "Steering Mechanism", "Steering wheel free play"),
    ("7b", "Steering Mechanism", "Steering column"),
    ("7c", "Steering Mechanism", "Steering system"),
    ("8a", "Suspension", "Axle parts and members"),
    ("8b", "Suspension", "Spring assembly"),
    ("9", "Frame", "Frame members"),
    ("10", "Tires", "Tires"),
    ("11", "Wheels and Rims", "Lock or side ring, wheels, rims and fasteners"),
    ("12", "Windshield Glazing", "Windshield glazing"),
    ("13", "Windshield Wipers", "Windshield wipers"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DotItemResult {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "Needs Repair")]
    NeedsRepair,
    #[serde(rename = "N/A")]
    NotApplicable,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DotItem {
    // ---
    pub id: String,
    pub group: String,
    pub description: String,
    pub result: Option<DotItemResult>,
    pub repaired_on: Option<NaiveDate>,
}

impl DotItem {
    /// True when the item was marked for repair and no repair date is recorded.
    pub fn is_outstanding(&self) -> bool {
        self.result == Some(DotItemResult::NeedsRepair) && self.repaired_on.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VehicleType {
    #[default]
    Truck,
    Tractor,
    Trailer,
    Bus,
    Other,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Carrier {
    // ---
    pub name: String,
    pub address: String,
    pub city_state_zip: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vehicle {
    // ---
    pub unit_number: String,
    pub vehicle_type: VehicleType,
    pub vin: String,
    pub license_plate: String,
    pub year: String,
    pub make: String,
    pub model: String,
    pub odometer: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Inspector {
    // ---
    pub name: String,
    /// Inspector meets the qualification requirements of 49 CFR 396.19.
    pub qualified: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DotInspectionRecord {
    // ---
    pub report_number: String,
    pub carrier: Carrier,
    pub vehicle: Vehicle,
    pub inspector: Inspector,
    pub inspection_date: Option<NaiveDate>,
    pub items: Vec<DotItem>,
    pub remarks: String,
}

impl Default for DotInspectionRecord {
    fn default() -> Self {
        // ---
        let items = DOT_ITEMS
            .iter()
            .map(|(id, group, description)| DotItem {
                id: id.to_string(),
                group: group.to_string(),
                description: description.to_string(),
                result: None,
                repaired_on: None,
            })
            .collect();

        Self {
            report_number: String::new(),
            carrier: Carrier::default(),
            vehicle: Vehicle::default(),
            inspector: Inspector::default(),
            inspection_date: None,
            items,
            remarks: String::new(),
        }
    }
}

impl DotInspectionRecord {
    /// Every item has a result and nothing is waiting on a repair.
    pub fn passed(&self) -> bool {
        self.items
            .iter()
            .all(|item| item.result.is_some() && !item.is_outstanding())
    }
}
