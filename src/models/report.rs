//! Electrical test report document.
//!
//! One [`ReportRecord`] is stored as a single JSON document per report row.
//! Every struct uses `#[serde(default)]` so documents written by older
//! versions of a form still load after fields are added.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Customer, Job, ReportKind};
use crate::calc::{acceptability, Acceptability, DerivedRatios, Readings, TemperatureReading, TurnsRatioTest};

// ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportRecord {
    // ---
    pub job_info: JobInfo,
    pub nameplate: Nameplate,
    pub visual_inspection: Vec<VisualInspectionItem>,
    pub insulation: InsulationResistance,
    pub turns_ratio: Option<TurnsRatioTest>,
    pub test_equipment: TestEquipment,
    pub comments: String,
    pub status: ReportStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobInfo {
    // ---
    pub customer: String,
    pub address: String,
    pub user: String,
    pub date: Option<NaiveDate>,
    pub identifier: String,
    pub job_number: String,
    pub technicians: String,
    pub substation: String,
    pub equipment_location: String,
    pub temperature: TemperatureReading,
}

impl JobInfo {
    /// Copy job and customer metadata onto a fresh report.
    pub fn prefill(&mut self, job: &Job, customer: Option<&Customer>) {
        // ---
        self.job_number = job.job_number.clone();
        if let Some(customer) = customer {
            self.customer = customer.display_name().to_string();
            self.address = customer.address.clone().unwrap_or_default();
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Nameplate {
    // ---
    pub manufacturer: String,
    pub catalog_number: String,
    pub serial_number: String,
    pub kva: String,
    pub phases: String,
    pub primary_voltage: String,
    pub secondary_voltage: String,
    pub temperature_rise: String,
    pub impedance: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InspectionResult {
    Satisfactory,
    Unsatisfactory,
    Cleaned,
    #[serde(rename = "See Comments")]
    SeeComments,
    #[serde(rename = "N/A")]
    NotApplicable,
}

/// One visual/mechanical inspection line, referenced by its standard clause.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualInspectionItem {
    // ---
    pub section_id: String,
    pub description: String,
    pub result: Option<InspectionResult>,
}

impl VisualInspectionItem {
    fn new(section_id: &str, description: &str) -> Self {
        Self {
            section_id: section_id.to_string(),
            description: description.to_string(),
            result: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TestVoltage {
    #[serde(rename = "250V")]
    V250,
    #[serde(rename = "500V")]
    V500,
    #[default]
    #[serde(rename = "1000V")]
    V1000,
    #[serde(rename = "2500V")]
    V2500,
    #[serde(rename = "5000V")]
    V5000,
    #[serde(rename = "10000V")]
    V10000,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResistanceUnit {
    #[serde(rename = "kΩ")]
    KiloOhm,
    #[default]
    #[serde(rename = "MΩ")]
    MegaOhm,
    #[serde(rename = "GΩ")]
    GigaOhm,
}

/// Insulation resistance measured between one pair of conductors.
///
/// `corrected` and `ratios` are always derived from `raw` and the report's
/// correction factor; edits only ever touch `raw`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsulationTestPoint {
    // ---
    pub label: String,
    pub test_voltage: TestVoltage,
    pub unit: ResistanceUnit,
    pub raw: Readings,
    pub corrected: Readings,
    pub ratios: DerivedRatios,
}

impl InsulationTestPoint {
    // ---
    pub fn new(label: &str, test_voltage: TestVoltage) -> Self {
        Self {
            label: label.to_string(),
            test_voltage,
            ..Self::default()
        }
    }

    pub fn evaluate(&mut self, tcf: f64) {
        self.corrected = self.raw.corrected(tcf);
        self.ratios = DerivedRatios::evaluate(&self.corrected);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsulationResistance {
    // ---
    pub test_points: Vec<InsulationTestPoint>,
    /// Verdict across every ratio of every test point.
    pub acceptable: Acceptability,
}

impl InsulationResistance {
    // ---
    pub fn evaluate(&mut self, tcf: f64) {
        // ---
        for point in &mut self.test_points {
            point.evaluate(tcf);
        }

        let ratios: Vec<&str> = self
            .test_points
            .iter()
            .flat_map(|p| {
                [
                    p.ratios.dielectric_absorption.as_str(),
                    p.ratios.polarization_index.as_str(),
                ]
            })
            .collect();
        self.acceptable = acceptability(&ratios);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Instrument {
    // ---
    pub name: String,
    pub serial_number: String,
    pub amp_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestEquipment {
    // ---
    pub megohmmeter: Instrument,
    pub ttr_test_set: Instrument,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReportStatus {
    #[default]
    #[serde(rename = "PASS")]
    Pass,
    #[serde(rename = "FAIL")]
    Fail,
}

impl ReportRecord {
    /// Blank report with the inspection checklist and test points of `kind`.
    pub fn new(kind: ReportKind) -> Self {
        // ---
        let mut record = Self::default();
        record.job_info.temperature.set_table(kind.default_tcf_table());
        record.visual_inspection = default_inspection_items(kind);
        record.insulation.test_points = default_test_points(kind);
        if kind.has_turns_ratio() {
            record.turns_ratio = Some(TurnsRatioTest::default());
        }
        record.recompute();
        record
    }

    /// Re-derive every calculated field from the current inputs.
    ///
    /// Temperature first, then the insulation points that depend on its
    /// correction factor, then the turns-ratio taps. Nothing depends on a
    /// later step, so one pass is enough.
    pub fn recompute(&mut self) {
        // ---
        self.job_info.temperature.rederive();
        let tcf = self.job_info.temperature.correction_factor();
        self.insulation.evaluate(tcf);
        if let Some(turns_ratio) = &mut self.turns_ratio {
            turns_ratio.evaluate();
        }
    }
}

fn default_test_points(kind: ReportKind) -> Vec<InsulationTestPoint> {
    // ---
    use TestVoltage::*;

    let points: &[(&str, TestVoltage)] = match kind {
        ReportKind::SwitchgearPanelboard | ReportKind::LowVoltageCable => &[
            ("A-G", V1000),
            ("B-G", V1000),
            ("C-G", V1000),
            ("A-B", V1000),
            ("B-C", V1000),
            ("C-A", V1000),
        ],
        ReportKind::MediumVoltageCable => &[("A-G", V10000), ("B-G", V10000), ("C-G", V10000)],
        ReportKind::DryTypeTransformer => &[
            ("Primary to Ground", V1000),
            ("Secondary to Ground", V500),
            ("Primary to Secondary", V1000),
        ],
        ReportKind::LiquidFilledTransformer => &[
            ("Primary to Ground", V5000),
            ("Secondary to Ground", V1000),
            ("Primary to Secondary", V5000),
        ],
        ReportKind::DotInspection => &[],
    };

    points
        .iter()
        .map(|(label, voltage)| InsulationTestPoint::new(label, *voltage))
        .collect()
}

fn default_inspection_items(kind: ReportKind) -> Vec<VisualInspectionItem> {
    // ---
    let items: &[(&str, &str)] = match kind {
        ReportKind::SwitchgearPanelboard => &[
            ("7.1.A.1", "Inspect physical, electrical, and mechanical condition."),
            ("7.1.A.2", "Inspect anchorage, alignment, grounding, and required area clearances."),
            ("7.1.A.3", "Verify the unit is clean and shipping bracing removed."),
            ("7.1.A.4", "Inspect bolted electrical connections for high resistance."),
            ("7.1.A.5", "Verify appropriate lubrication on moving current-carrying parts."),
            ("7.1.A.6", "Inspect insulators for evidence of physical damage or contaminated surfaces."),
        ],
        ReportKind::DryTypeTransformer => &[
            ("7.2.1.1.A.1", "Inspect physical and mechanical condition."),
            ("7.2.1.1.A.2", "Inspect anchorage, alignment, and grounding."),
            ("7.2.1.1.A.3", "Verify that resilient mounts are free and shipping brackets removed."),
            ("7.2.1.1.A.4", "Verify the unit is clean."),
            ("7.2.1.1.A.5", "Inspect bolted electrical connections for high resistance."),
            ("7.2.1.1.A.6", "Verify that tap connections are as specified."),
        ],
        ReportKind::LiquidFilledTransformer => &[
            ("7.2.2.A.1", "Inspect physical and mechanical condition."),
            ("7.2.2.A.2", "Inspect anchorage, alignment, and grounding."),
            ("7.2.2.A.3", "Verify the presence of PCB content labeling."),
            ("7.2.2.A.4", "Verify removal of any shipping bracing after placement."),
            ("7.2.2.A.5", "Verify the bushings are clean."),
            ("7.2.2.A.6", "Verify that alarm, control, and trip settings on temperature and level indicators are as specified."),
            ("7.2.2.A.7", "Verify operation of alarm, control, and trip circuits from temperature and level indicators."),
            ("7.2.2.A.8", "Verify that liquid level in tanks and bushings is within indicated tolerances."),
        ],
        ReportKind::LowVoltageCable => &[
            ("7.3.2.A.1", "Inspect exposed sections of cables for physical damage."),
            ("7.3.2.A.2", "Inspect bolted electrical connections for high resistance."),
            ("7.3.2.A.3", "Inspect compression-applied connectors for correct cable match and indentation."),
            ("7.3.2.A.4", "Inspect for correct identification and arrangements."),
            ("7.3.2.A.5", "Inspect cable jacket insulation and condition."),
        ],
        ReportKind::MediumVoltageCable => &[
            ("7.3.3.A.1", "Inspect exposed sections of cables for physical damage."),
            ("7.3.3.A.2", "Inspect bolted electrical connections for high resistance."),
            ("7.3.3.A.3", "Inspect compression-applied connectors for correct cable match and indentation."),
            ("7.3.3.A.4", "Inspect shield grounding, cable support, and termination."),
            ("7.3.3.A.5", "Verify that visible cable bends meet or exceed minimum bending radius."),
            ("7.3.3.A.6", "Inspect fireproofing in common cable areas."),
        ],
        ReportKind::DotInspection => &[],
    };

    items
        .iter()
        .map(|(section, description)| VisualInspectionItem::new(section, description))
        .collect()
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::calc::{TapAssessment, TcfTable};
    use uuid::Uuid;

    #[test]
    fn test_new_record_shape_per_kind() {
        // ---
        let switchgear = ReportRecord::new(ReportKind::SwitchgearPanelboard);
        assert_eq!(switchgear.insulation.test_points.len(), 6);
        assert!(switchgear.turns_ratio.is_none());
        assert_eq!(switchgear.visual_inspection[0].section_id, "7.1.A.1");

        let transformer = ReportRecord::new(ReportKind::LiquidFilledTransformer);
        assert_eq!(transformer.insulation.test_points.len(), 3);
        assert_eq!(transformer.turns_ratio.as_ref().map(|t| t.taps.len()), Some(7));
        assert_eq!(transformer.job_info.temperature.table(), TcfTable::Alternate);
    }

    #[test]
    fn test_empty_report_is_not_acceptable() {
        // ---
        let record = ReportRecord::new(ReportKind::DryTypeTransformer);
        assert_eq!(record.insulation.acceptable, Acceptability::No);
        assert_eq!(record.status, ReportStatus::Pass);
    }

    #[test]
    fn test_recompute_at_76_fahrenheit() {
        // ---
        let mut record = ReportRecord::new(ReportKind::DryTypeTransformer);
        record.job_info.temperature.set_fahrenheit(76.0);
        record.insulation.test_points[0].raw = Readings::new("500", "750", "1500");
        record.recompute();

        let point = &record.insulation.test_points[0];
        assert_eq!(record.job_info.temperature.celsius(), 24.0);
        assert_eq!(point.corrected, Readings::new("600.00", "900.00", "1800.00"));
        assert_eq!(point.ratios.dielectric_absorption, "1.50");
        assert_eq!(point.ratios.polarization_index, "2.00");
        assert_eq!(record.insulation.acceptable, Acceptability::Yes);
    }

    #[test]
    fn test_recompute_with_alternate_table() {
        // ---
        let mut record = ReportRecord::new(ReportKind::LiquidFilledTransformer);
        record.job_info.temperature.set_fahrenheit(76.0);
        record.insulation.test_points[0].raw = Readings::new("500", "", "");
        record.recompute();

        assert_eq!(record.insulation.test_points[0].corrected.half_minute, "462.50");
    }

    #[test]
    fn test_one_failing_point_fails_the_section() {
        // ---
        let mut record = ReportRecord::new(ReportKind::DryTypeTransformer);
        record.insulation.test_points[0].raw = Readings::new("500", "750", "1500");
        record.insulation.test_points[1].raw = Readings::new("500", "450", "");
        record.recompute();

        assert_eq!(record.insulation.test_points[0].ratios.acceptable, Acceptability::Yes);
        assert_eq!(record.insulation.test_points[1].ratios.acceptable, Acceptability::No);
        assert_eq!(record.insulation.acceptable, Acceptability::No);
    }

    #[test]
    fn test_recompute_evaluates_turns_ratio() {
        // ---
        let mut record = ReportRecord::new(ReportKind::DryTypeTransformer);
        let turns_ratio = record.turns_ratio.as_mut().unwrap();
        turns_ratio.secondary_voltage = "480".to_string();
        let tap = turns_ratio.tap_mut(1).unwrap();
        tap.nameplate_voltage = "13800".to_string();
        tap.phase_a.measured = "28.9".to_string();
        tap.phase_b.measured = "28.75".to_string();
        tap.phase_c.measured = "28.75".to_string();
        record.recompute();

        let tap = &record.turns_ratio.as_ref().unwrap().taps[0];
        assert_eq!(tap.phase_a.deviation, "-0.522");
        assert_eq!(tap.assessment, TapAssessment::Fail);
    }

    #[test]
    fn test_prefill_prefers_company_name() {
        // ---
        let job = Job {
            id: Uuid::new_v4(),
            customer_id: None,
            job_number: "J-1042".to_string(),
            title: "Substation acceptance".to_string(),
        };
        let customer = Customer {
            id: Uuid::new_v4(),
            name: "Dana Ortiz".to_string(),
            company_name: Some("Ortiz Industrial".to_string()),
            address: Some("12 Mill Rd".to_string()),
        };

        let mut info = JobInfo::default();
        info.prefill(&job, Some(&customer));
        assert_eq!(info.job_number, "J-1042");
        assert_eq!(info.customer, "Ortiz Industrial");
        assert_eq!(info.address, "12 Mill Rd");

        let mut bare = JobInfo::default();
        bare.prefill(&job, None);
        assert_eq!(bare.customer, "");
    }

    #[test]
    fn test_document_field_names() {
        // ---
        let record = ReportRecord::new(ReportKind::SwitchgearPanelboard);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["status"], "PASS");
        assert_eq!(json["insulation"]["acceptable"], "No");
        assert_eq!(json["insulation"]["test_points"][0]["test_voltage"], "1000V");
        assert_eq!(json["insulation"]["test_points"][0]["unit"], "MΩ");
        assert_eq!(json["job_info"]["temperature"]["correction_factor"], 1.0);
        assert!(json["turns_ratio"].is_null());
    }
}
