//! The closed set of report types the service stores.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::calc::TcfTable;

// ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportKind {
    SwitchgearPanelboard,
    DryTypeTransformer,
    LiquidFilledTransformer,
    LowVoltageCable,
    MediumVoltageCable,
    DotInspection,
}

impl ReportKind {
    // ---
    pub const ALL: [ReportKind; 6] = [
        ReportKind::SwitchgearPanelboard,
        ReportKind::DryTypeTransformer,
        ReportKind::LiquidFilledTransformer,
        ReportKind::LowVoltageCable,
        ReportKind::MediumVoltageCable,
        ReportKind::DotInspection,
    ];

    /// Path segment used in URLs and asset links.
    pub fn slug(self) -> &'static str {
        match self {
            ReportKind::SwitchgearPanelboard => "switchgear-panelboard",
            ReportKind::DryTypeTransformer => "dry-type-transformer",
            ReportKind::LiquidFilledTransformer => "liquid-filled-transformer",
            ReportKind::LowVoltageCable => "low-voltage-cable",
            ReportKind::MediumVoltageCable => "medium-voltage-cable",
            ReportKind::DotInspection => "dot-inspection",
        }
    }

    /// Table holding one row per report of this kind.
    pub fn table(self) -> &'static str {
        match self {
            ReportKind::SwitchgearPanelboard => "switchgear_panelboard_reports",
            ReportKind::DryTypeTransformer => "dry_type_transformer_reports",
            ReportKind::LiquidFilledTransformer => "liquid_filled_transformer_reports",
            ReportKind::LowVoltageCable => "low_voltage_cable_reports",
            ReportKind::MediumVoltageCable => "medium_voltage_cable_reports",
            ReportKind::DotInspection => "dot_inspection_reports",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ReportKind::SwitchgearPanelboard => "Switchgear & Panelboard Inspection",
            ReportKind::DryTypeTransformer => "Dry Type Transformer Test",
            ReportKind::LiquidFilledTransformer => "Liquid Filled Transformer Test",
            ReportKind::LowVoltageCable => "Low Voltage Cable Test",
            ReportKind::MediumVoltageCable => "Medium Voltage Cable Test",
            ReportKind::DotInspection => "DOT Annual Vehicle Inspection",
        }
    }

    /// Correction-factor table new reports of this kind start with.
    pub fn default_tcf_table(self) -> TcfTable {
        match self {
            ReportKind::LiquidFilledTransformer => TcfTable::Alternate,
            _ => TcfTable::Standard,
        }
    }

    pub fn has_turns_ratio(self) -> bool {
        matches!(
            self,
            ReportKind::DryTypeTransformer | ReportKind::LiquidFilledTransformer
        )
    }

    /// Kinds backed by [`ReportRecord`](super::ReportRecord) and the form container.
    pub fn is_electrical(self) -> bool {
        self != ReportKind::DotInspection
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}
