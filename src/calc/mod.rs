//! Shared electrical test calculations.
//!
//! Pure functions and the small value types they operate on. Nothing here
//! touches I/O or fails: malformed input degrades to pass-through or empty
//! results so partially filled reports always evaluate.

mod correction;
mod ratio;
mod tables;
mod temperature;
mod turns_ratio;

pub use correction::{correct_reading, is_sentinel, parse_number, Readings, NOT_APPLICABLE, OVER_RANGE};
pub use ratio::{acceptability, ratio, Acceptability, DerivedRatios, ACCEPTANCE_THRESHOLD};
pub use tables::{TcfTable, FAHRENHEIT_TO_CELSIUS, TCF_ALTERNATE, TCF_STANDARD};
pub use temperature::{celsius_to_tcf, fahrenheit_to_celsius, TemperatureReading};
pub use turns_ratio::{
    deviation_percent, expected_ratio, tap_assessment, Phase, PhaseRatio, TapAssessment,
    TurnsRatioTap, TurnsRatioTest, DEVIATION_LIMIT_PERCENT, TAP_COUNT,
};
