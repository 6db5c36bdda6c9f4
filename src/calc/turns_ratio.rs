//! Transformer turns-ratio (TTR) evaluation per tap.
//!
//! The expected ratio of a tap is its nameplate voltage over the secondary
//! voltage shared by all taps. Each phase's measured TTR is compared against
//! it as a percentage deviation, and the tap passes when all three phases
//! deviate by less than [`DEVIATION_LIMIT_PERCENT`] either way.

use serde::{Deserialize, Serialize};

use super::correction::parse_number;

// ---

/// Exclusive bound on the absolute deviation of a passing phase.
pub const DEVIATION_LIMIT_PERCENT: f64 = 0.501;

/// Number of taps on the transformer test sheet.
pub const TAP_COUNT: u8 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TapAssessment {
    Pass,
    Fail,
    /// Not every phase has a usable deviation yet.
    #[default]
    #[serde(rename = "")]
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    A,
    B,
    C,
}

/// Nameplate voltage over secondary voltage, to 3 decimals.
pub fn expected_ratio(nameplate_voltage: &str, secondary_voltage: &str) -> String {
    // ---
    let usable = |raw: &str| match raw.trim() {
        "" | "-" => None,
        text => parse_number(text).filter(|v| *v != 0.0),
    };

    match (usable(nameplate_voltage), usable(secondary_voltage)) {
        (Some(nameplate), Some(secondary)) => format!("{:.3}", nameplate / secondary),
        _ => String::new(),
    }
}

/// Percentage by which `measured` falls short of `expected`, to 3 decimals.
pub fn deviation_percent(expected: &str, measured: &str) -> String {
    // ---
    if measured.trim().is_empty() {
        return String::new();
    }

    match (parse_number(expected), parse_number(measured)) {
        (Some(e), Some(m)) if e != 0.0 => format!("{:.3}", (e - m) / e * 100.0),
        _ => String::new(),
    }
}

pub fn tap_assessment(dev_a: &str, dev_b: &str, dev_c: &str) -> TapAssessment {
    // ---
    let deviations = [dev_a, dev_b, dev_c].map(parse_number);
    if deviations.iter().any(Option::is_none) {
        return TapAssessment::Pending;
    }

    let within = |d: &Option<f64>| {
        d.is_some_and(|v| v > -DEVIATION_LIMIT_PERCENT && v < DEVIATION_LIMIT_PERCENT)
    };
    if deviations.iter().all(within) {
        TapAssessment::Pass
    } else {
        TapAssessment::Fail
    }
}

/// Measured TTR and its derived deviation for one phase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseRatio {
    // ---
    pub measured: String,
    pub deviation: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurnsRatioTap {
    // ---
    pub tap: u8,
    pub nameplate_voltage: String,
    pub calculated_ratio: String,
    pub phase_a: PhaseRatio,
    pub phase_b: PhaseRatio,
    pub phase_c: PhaseRatio,
    pub assessment: TapAssessment,
}

impl TurnsRatioTap {
    // ---
    pub fn new(tap: u8) -> Self {
        Self {
            tap,
            ..Self::default()
        }
    }

    pub fn phase_mut(&mut self, phase: Phase) -> &mut PhaseRatio {
        match phase {
            Phase::A => &mut self.phase_a,
            Phase::B => &mut self.phase_b,
            Phase::C => &mut self.phase_c,
        }
    }

    /// Re-derive the expected ratio, per-phase deviations and assessment.
    pub fn evaluate(&mut self, secondary_voltage: &str) {
        // ---
        self.calculated_ratio = expected_ratio(&self.nameplate_voltage, secondary_voltage);
        for phase in [&mut self.phase_a, &mut self.phase_b, &mut self.phase_c] {
            phase.deviation = deviation_percent(&self.calculated_ratio, &phase.measured);
        }
        self.assessment = tap_assessment(
            &self.phase_a.deviation,
            &self.phase_b.deviation,
            &self.phase_c.deviation,
        );
    }
}

/// Turns-ratio section of a transformer report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurnsRatioTest {
    // ---
    pub secondary_voltage: String,
    pub taps: Vec<TurnsRatioTap>,
}

impl Default for TurnsRatioTest {
    fn default() -> Self {
        Self {
            secondary_voltage: String::new(),
            taps: (1..=TAP_COUNT).map(TurnsRatioTap::new).collect(),
        }
    }
}

impl TurnsRatioTest {
    // ---
    pub fn tap_mut(&mut self, tap: u8) -> Option<&mut TurnsRatioTap> {
        self.taps.iter_mut().find(|t| t.tap == tap)
    }

    pub fn evaluate(&mut self) {
        // ---
        let secondary = self.secondary_voltage.clone();
        for tap in &mut self.taps {
            tap.evaluate(&secondary);
        }
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn test_expected_ratio() {
        // ---
        assert_eq!(expected_ratio("13800", "480"), "28.750");
        assert_eq!(expected_ratio("12470", "208"), "59.952");
    }

    #[test]
    fn test_expected_ratio_rejects_unusable_inputs() {
        // ---
        assert_eq!(expected_ratio("", "480"), "");
        assert_eq!(expected_ratio("13800", ""), "");
        assert_eq!(expected_ratio("-", "480"), "");
        assert_eq!(expected_ratio("13800", "0"), "");
        assert_eq!(expected_ratio("0", "480"), "");
        assert_eq!(expected_ratio("13.8kV", "480"), "");
    }

    #[test]
    fn test_deviation_percent() {
        // ---
        assert_eq!(deviation_percent("28.750", "28.700"), "0.174");
        assert_eq!(deviation_percent("28.750", "28.900"), "-0.522");
        assert_eq!(deviation_percent("28.750", ""), "");
        assert_eq!(deviation_percent("", "28.700"), "");
        assert_eq!(deviation_percent("0", "28.700"), "");
        assert_eq!(deviation_percent("28.750", "x"), "");
    }

    #[test]
    fn test_tap_assessment() {
        // ---
        assert_eq!(tap_assessment("0.3", "-0.2", "0.1"), TapAssessment::Pass);
        assert_eq!(tap_assessment("0.6", "0.1", "0.1"), TapAssessment::Fail);
        assert_eq!(tap_assessment("", "0.1", "0.1"), TapAssessment::Pending);
    }

    #[test]
    fn test_tap_assessment_limit_is_exclusive() {
        // ---
        assert_eq!(tap_assessment("0.500", "-0.500", "0"), TapAssessment::Pass);
        assert_eq!(tap_assessment("0.501", "0", "0"), TapAssessment::Fail);
        assert_eq!(tap_assessment("0", "-0.501", "0"), TapAssessment::Fail);
    }

    #[test]
    fn test_tap_evaluation_end_to_end() {
        // ---
        let mut test = TurnsRatioTest {
            secondary_voltage: "480".to_string(),
            ..TurnsRatioTest::default()
        };
        let tap = test.tap_mut(3).unwrap();
        tap.nameplate_voltage = "13800".to_string();
        tap.phase_a.measured = "28.700".to_string();
        tap.phase_b.measured = "28.750".to_string();
        tap.phase_c.measured = "28.800".to_string();

        test.evaluate();

        let tap = &test.taps[2];
        assert_eq!(tap.calculated_ratio, "28.750");
        assert_eq!(tap.phase_a.deviation, "0.174");
        assert_eq!(tap.phase_b.deviation, "0.000");
        assert_eq!(tap.phase_c.deviation, "-0.174");
        assert_eq!(tap.assessment, TapAssessment::Pass);

        // untouched taps stay pending
        assert_eq!(test.taps[0].assessment, TapAssessment::Pending);
        assert_eq!(test.taps[0].calculated_ratio, "");
    }

    #[test]
    fn test_default_has_seven_taps() {
        // ---
        let test = TurnsRatioTest::default();
        let numbers: Vec<u8> = test.taps.iter().map(|t| t.tap).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5, 6, 7]);
    }
}
