//! Temperature conversion and correction-factor resolution.
//!
//! Both conversions go through the static tables in `tables.rs` using the
//! same strategy: exact row, otherwise linear interpolation between the two
//! bracketing rows, otherwise the nearest boundary row. Every input yields a
//! number, so callers never have to handle a failure here.

use serde::{Deserialize, Serialize};

use super::tables::{TcfTable, FAHRENHEIT_TO_CELSIUS};

// ---

/// Convert a Fahrenheit reading to Celsius through the lookup table.
pub fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    resolve(&FAHRENHEIT_TO_CELSIUS, fahrenheit)
}

/// Resolve the temperature correction factor for a Celsius value.
pub fn celsius_to_tcf(celsius: f64, table: TcfTable) -> f64 {
    resolve(table.rows(), celsius)
}

/// Look up `key` in a table sorted by ascending key.
///
/// NaN resolves to the lowest row. An empty table resolves to the key itself.
fn resolve(rows: &[(f64, f64)], key: f64) -> f64 {
    // ---
    let (Some(&(lo_key, lo_val)), Some(&(hi_key, hi_val))) = (rows.first(), rows.last()) else {
        return key;
    };

    if key.is_nan() || key <= lo_key {
        return lo_val;
    }
    if key >= hi_key {
        return hi_val;
    }

    // First row whose key is >= `key`; always in 1..len here.
    let idx = rows.partition_point(|row| row.0 < key);
    let (k1, v1) = rows[idx];
    if k1 == key {
        return v1;
    }
    let (k0, v0) = rows[idx - 1];
    v0 + (key - k0) * (v1 - v0) / (k1 - k0)
}

/// Ambient temperature recorded on a report.
///
/// Only `fahrenheit`, `humidity` and the table selection are inputs.
/// `celsius` (whole degrees, half away from zero) and `correction_factor`
/// are re-derived whenever an input changes and again after deserializing
/// through [`TemperatureReading::rederive`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemperatureReading {
    // ---
    fahrenheit: f64,
    celsius: f64,
    correction_factor: f64,
    pub humidity: Option<f64>,
    table: TcfTable,
}

impl Default for TemperatureReading {
    fn default() -> Self {
        Self::new(68.0, TcfTable::default())
    }
}

impl TemperatureReading {
    // ---
    pub fn new(fahrenheit: f64, table: TcfTable) -> Self {
        // ---
        let mut reading = Self {
            fahrenheit,
            celsius: 20.0,
            correction_factor: 1.0,
            humidity: None,
            table,
        };
        reading.rederive();
        reading
    }

    pub fn fahrenheit(&self) -> f64 {
        self.fahrenheit
    }

    pub fn celsius(&self) -> f64 {
        self.celsius
    }

    pub fn correction_factor(&self) -> f64 {
        self.correction_factor
    }

    pub fn table(&self) -> TcfTable {
        self.table
    }

    pub fn set_fahrenheit(&mut self, fahrenheit: f64) {
        self.fahrenheit = fahrenheit;
        self.rederive();
    }

    pub fn set_table(&mut self, table: TcfTable) {
        self.table = table;
        self.rederive();
    }

    /// Recompute the derived fields from `fahrenheit` and the table.
    pub fn rederive(&mut self) {
        // ---
        // `+ 0.0` folds a rounded -0.0 into 0.0
        self.celsius = fahrenheit_to_celsius(self.fahrenheit).round() + 0.0;
        self.correction_factor = celsius_to_tcf(self.celsius, self.table);
    }
}
