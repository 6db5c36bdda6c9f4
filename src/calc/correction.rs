//! Temperature correction of raw instrument readings.

use serde::{Deserialize, Serialize};

// ---

/// Reading recorded when the instrument saturates above its range.
pub const OVER_RANGE: &str = ">2200";

/// Marker for a reading that was not taken.
pub const NOT_APPLICABLE: &str = "N/A";

/// True for values that carry meaning as text and must never be scaled:
/// the over-range marker, `N/A` in any case, and blank input.
pub fn is_sentinel(raw: &str) -> bool {
    // ---
    let trimmed = raw.trim();
    trimmed.is_empty() || trimmed == OVER_RANGE || trimmed.eq_ignore_ascii_case(NOT_APPLICABLE)
}

/// Parse a free-form reading into a finite number.
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Apply a temperature correction factor to a raw reading.
///
/// Sentinels and unparseable text come back unchanged. Always call this with
/// the raw reading: correcting an already corrected value applies the factor
/// twice.
pub fn correct_reading(raw: &str, tcf: f64) -> String {
    // ---
    if is_sentinel(raw) {
        return raw.to_string();
    }

    match parse_number(raw) {
        Some(value) => format!("{:.2}", value * tcf),
        None => raw.to_string(),
    }
}

/// The three timed insulation-resistance readings of one test point.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Readings {
    // ---
    pub half_minute: String,
    pub one_minute: String,
    pub ten_minute: String,
}

impl Readings {
    // ---
    pub fn new(half_minute: &str, one_minute: &str, ten_minute: &str) -> Self {
        Self {
            half_minute: half_minute.to_string(),
            one_minute: one_minute.to_string(),
            ten_minute: ten_minute.to_string(),
        }
    }

    /// Corrected copy of these readings; `self` must hold raw values.
    pub fn corrected(&self, tcf: f64) -> Readings {
        Readings {
            half_minute: correct_reading(&self.half_minute, tcf),
            one_minute: correct_reading(&self.one_minute, tcf),
            ten_minute: correct_reading(&self.ten_minute, tcf),
        }
    }
}
