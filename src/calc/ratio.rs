//! Dielectric absorption and polarization index evaluation.

use serde::{Deserialize, Serialize};

use super::correction::{is_sentinel, parse_number, Readings};

// ---

/// A ratio must exceed this value for the insulation to be acceptable.
pub const ACCEPTANCE_THRESHOLD: f64 = 1.0;

/// Verdict shown next to the insulation ratios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Acceptability {
    Yes,
    No,
    #[default]
    #[serde(rename = "N/A")]
    NotApplicable,
}

/// Divide two readings, formatted to 2 decimals.
///
/// Empty when either side is a sentinel or not a number, or when the
/// denominator is zero.
pub fn ratio(numerator: &str, denominator: &str) -> String {
    // ---
    if is_sentinel(numerator) || is_sentinel(denominator) {
        return String::new();
    }

    match (parse_number(numerator), parse_number(denominator)) {
        (Some(n), Some(d)) if d != 0.0 => format!("{:.2}", n / d),
        _ => String::new(),
    }
}

/// `Yes` when at least one ratio is numeric and every numeric ratio exceeds
/// [`ACCEPTANCE_THRESHOLD`]; `No` otherwise, including when nothing has been
/// entered yet.
pub fn acceptability<S: AsRef<str>>(ratios: &[S]) -> Acceptability {
    // ---
    let mut values = ratios.iter().filter_map(|r| parse_number(r.as_ref())).peekable();

    if values.peek().is_none() {
        return Acceptability::No;
    }

    if values.all(|v| v > ACCEPTANCE_THRESHOLD) {
        Acceptability::Yes
    } else {
        Acceptability::No
    }
}

/// Ratios derived from one test point's corrected readings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DerivedRatios {
    // ---
    /// 1 minute over 0.5 minute.
    pub dielectric_absorption: String,
    /// 10 minutes over 1 minute.
    pub polarization_index: String,
    pub acceptable: Acceptability,
}

impl DerivedRatios {
    // ---
    pub fn evaluate(corrected: &Readings) -> Self {
        // ---
        let dielectric_absorption = ratio(&corrected.one_minute, &corrected.half_minute);
        let polarization_index = ratio(&corrected.ten_minute, &corrected.one_minute);
        let acceptable = acceptability(&[&dielectric_absorption, &polarization_index]);

        Self {
            dielectric_absorption,
            polarization_index,
            acceptable,
        }
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn test_ratio_formats_two_decimals() {
        // ---
        assert_eq!(ratio("150", "100"), "1.50");
        assert_eq!(ratio("2000", "1500"), "1.33");
    }

    #[test]
    fn test_ratio_degrades_to_empty() {
        // ---
        assert_eq!(ratio("100", "0"), "");
        assert_eq!(ratio("abc", "100"), "");
        assert_eq!(ratio(">2200", "100"), "");
        assert_eq!(ratio("100", "N/A"), "");
        assert_eq!(ratio("", "100"), "");
    }

    #[test]
    fn test_acceptability() {
        // ---
        assert_eq!(acceptability(&["1.50", "1.20"]), Acceptability::Yes);
        assert_eq!(acceptability(&["1.50", "0.90"]), Acceptability::No);
        assert_eq!(acceptability(&["", ""]), Acceptability::No);
        assert_eq!(acceptability::<&str>(&[]), Acceptability::No);
    }

    #[test]
    fn test_acceptability_ignores_unparseable_entries() {
        // ---
        assert_eq!(acceptability(&["1.50", "", "abc"]), Acceptability::Yes);
        assert_eq!(acceptability(&["1.00"]), Acceptability::No);
    }

    #[test]
    fn test_derived_ratios_from_corrected_readings() {
        // ---
        let corrected = Readings::new("600.00", "900.00", "1800.00");
        let ratios = DerivedRatios::evaluate(&corrected);
        assert_eq!(ratios.dielectric_absorption, "1.50");
        assert_eq!(ratios.polarization_index, "2.00");
        assert_eq!(ratios.acceptable, Acceptability::Yes);
    }

    #[test]
    fn test_derived_ratios_with_saturated_ten_minute() {
        // ---
        let corrected = Readings::new("600.00", "900.00", ">2200");
        let ratios = DerivedRatios::evaluate(&corrected);
        assert_eq!(ratios.dielectric_absorption, "1.50");
        assert_eq!(ratios.polarization_index, "");
        assert_eq!(ratios.acceptable, Acceptability::Yes);
    }

    #[test]
    fn test_acceptability_serde_names() {
        // ---
        let json = serde_json::to_string(&Acceptability::NotApplicable).unwrap();
        assert_eq!(json, "\"N/A\"");
        let yes: Acceptability = serde_json::from_str("\"Yes\"").unwrap();
        assert_eq!(yes, Acceptability::Yes);
    }
}
