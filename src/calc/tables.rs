//! Static lookup tables for temperature correction.
//!
//! Rows are sorted by key in ascending order; the resolvers in
//! `temperature.rs` rely on that ordering for bracketing and clamping.

use serde::{Deserialize, Serialize};

// ---

/// Fahrenheit to Celsius, one row per whole Celsius degree from -24 °C to 110 °C.
#[rustfmt::skip]
pub const FAHRENHEIT_TO_CELSIUS: [(f64, f64); 135] = [
    (-11.2, -24.0), (-9.4, -23.0), (-7.6, -22.0), (-5.8, -21.0), (-4.0, -20.0),
    (-2.2, -19.0), (-0.4, -18.0), (1.4, -17.0), (3.2, -16.0), (5.0, -15.0),
    (6.8, -14.0), (8.6, -13.0), (10.4, -12.0), (12.2, -11.0), (14.0, -10.0),
    (15.8, -9.0), (17.6, -8.0), (19.4, -7.0), (21.2, -6.0), (23.0, -5.0),
    (24.8, -4.0), (26.6, -3.0), (28.4, -2.0), (30.2, -1.0), (32.0, 0.0),
    (33.8, 1.0), (35.6, 2.0), (37.4, 3.0), (39.2, 4.0), (41.0, 5.0),
    (42.8, 6.0), (44.6, 7.0), (46.4, 8.0), (48.2, 9.0), (50.0, 10.0),
    (51.8, 11.0), (53.6, 12.0), (55.4, 13.0), (57.2, 14.0), (59.0, 15.0),
    (60.8, 16.0), (62.6, 17.0), (64.4, 18.0), (66.2, 19.0), (68.0, 20.0),
    (69.8, 21.0), (71.6, 22.0), (73.4, 23.0), (75.2, 24.0), (77.0, 25.0),
    (78.8, 26.0), (80.6, 27.0), (82.4, 28.0), (84.2, 29.0), (86.0, 30.0),
    (87.8, 31.0), (89.6, 32.0), (91.4, 33.0), (93.2, 34.0), (95.0, 35.0),
    (96.8, 36.0), (98.6, 37.0), (100.4, 38.0), (102.2, 39.0), (104.0, 40.0),
    (105.8, 41.0), (107.6, 42.0), (109.4, 43.0), (111.2, 44.0), (113.0, 45.0),
    (114.8, 46.0), (116.6, 47.0), (118.4, 48.0), (120.2, 49.0), (122.0, 50.0),
    (123.8, 51.0), (125.6, 52.0), (127.4, 53.0), (129.2, 54.0), (131.0, 55.0),
    (132.8, 56.0), (134.6, 57.0), (136.4, 58.0), (138.2, 59.0), (140.0, 60.0),
    (141.8, 61.0), (143.6, 62.0), (145.4, 63.0), (147.2, 64.0), (149.0, 65.0),
    (150.8, 66.0), (152.6, 67.0), (154.4, 68.0), (156.2, 69.0), (158.0, 70.0),
    (159.8, 71.0), (161.6, 72.0), (163.4, 73.0), (165.2, 74.0), (167.0, 75.0),
    (168.8, 76.0), (170.6, 77.0), (172.4, 78.0), (174.2, 79.0), (176.0, 80.0),
    (177.8, 81.0), (179.6, 82.0), (181.4, 83.0), (183.2, 84.0), (185.0, 85.0),
    (186.8, 86.0), (188.6, 87.0), (190.4, 88.0), (192.2, 89.0), (194.0, 90.0),
    (195.8, 91.0), (197.6, 92.0), (199.4, 93.0), (201.2, 94.0), (203.0, 95.0),
    (204.8, 96.0), (206.6, 97.0), (208.4, 98.0), (210.2, 99.0), (212.0, 100.0),
    (213.8, 101.0), (215.6, 102.0), (217.4, 103.0), (219.2, 104.0), (221.0, 105.0),
    (222.8, 106.0), (224.6, 107.0), (226.4, 108.0), (228.2, 109.0), (230.0, 110.0),
];

/// Insulation resistance correction factors referenced to 20 °C.
///
/// Factors rise with temperature (1.20 at 24 °C, 1.25 at 25 °C).
#[rustfmt::skip]
pub const TCF_STANDARD: [(f64, f64); 135] = [
    (-24.0, 0.14), (-23.0, 0.147), (-22.0, 0.153), (-21.0, 0.16), (-20.0, 0.168),
    (-19.0, 0.175), (-18.0, 0.183), (-17.0, 0.192), (-16.0, 0.201), (-15.0, 0.21),
    (-14.0, 0.219), (-13.0, 0.229), (-12.0, 0.24), (-11.0, 0.251), (-10.0, 0.262),
    (-9.0, 0.274), (-8.0, 0.287), (-7.0, 0.3), (-6.0, 0.313), (-5.0, 0.328),
    (-4.0, 0.343), (-3.0, 0.358), (-2.0, 0.375), (-1.0, 0.392), (0.0, 0.41),
    (1.0, 0.428), (2.0, 0.448), (3.0, 0.468), (4.0, 0.49), (5.0, 0.512),
    (6.0, 0.535), (7.0, 0.56), (8.0, 0.585), (9.0, 0.612), (10.0, 0.64),
    (11.0, 0.669), (12.0, 0.7), (13.0, 0.732), (14.0, 0.765), (15.0, 0.8),
    (16.0, 0.837), (17.0, 0.875), (18.0, 0.915), (19.0, 0.956), (20.0, 1.0),
    (21.0, 1.05), (22.0, 1.09), (23.0, 1.14), (24.0, 1.2), (25.0, 1.25),
    (26.0, 1.31), (27.0, 1.37), (28.0, 1.43), (29.0, 1.49), (30.0, 1.56),
    (31.0, 1.63), (32.0, 1.71), (33.0, 1.79), (34.0, 1.87), (35.0, 1.95),
    (36.0, 2.04), (37.0, 2.14), (38.0, 2.23), (39.0, 2.33), (40.0, 2.44),
    (41.0, 2.55), (42.0, 2.67), (43.0, 2.79), (44.0, 2.92), (45.0, 3.05),
    (46.0, 3.19), (47.0, 3.34), (48.0, 3.49), (49.0, 3.65), (50.0, 3.81),
    (51.0, 3.99), (52.0, 4.17), (53.0, 4.36), (54.0, 4.56), (55.0, 4.77),
    (56.0, 4.99), (57.0, 5.21), (58.0, 5.45), (59.0, 5.7), (60.0, 5.96),
    (61.0, 6.23), (62.0, 6.52), (63.0, 6.81), (64.0, 7.13), (65.0, 7.45),
    (66.0, 7.79), (67.0, 8.15), (68.0, 8.52), (69.0, 8.91), (70.0, 9.31),
    (71.0, 9.74), (72.0, 10.2), (73.0, 10.6), (74.0, 11.1), (75.0, 11.6),
    (76.0, 12.2), (77.0, 12.7), (78.0, 13.3), (79.0, 13.9), (80.0, 14.6),
    (81.0, 15.2), (82.0, 15.9), (83.0, 16.6), (84.0, 17.4), (85.0, 18.2),
    (86.0, 19.0), (87.0, 19.9), (88.0, 20.8), (89.0, 21.7), (90.0, 22.7),
    (91.0, 23.8), (92.0, 24.9), (93.0, 26.0), (94.0, 27.2), (95.0, 28.4),
    (96.0, 29.7), (97.0, 31.1), (98.0, 32.5), (99.0, 34.0), (100.0, 35.5),
    (101.0, 37.1), (102.0, 38.8), (103.0, 40.6), (104.0, 42.5), (105.0, 44.4),
    (106.0, 46.4), (107.0, 48.6), (108.0, 50.8), (109.0, 53.1), (110.0, 55.5),
];

/// Second correction-factor variant carried by some report types.
///
/// Shares the 20 °C reference point with [`TCF_STANDARD`] but falls with
/// temperature (0.925 at 24 °C). The two variants disagree for every other
/// row; reports record which one they were evaluated against.

#[rustfmt::skip]
pub const TCF_ALTERNATE: [(f64, f64); 135] = [
    (-24.0, 2.36), (-23.0, 2.31), (-22.0, 2.27), (-21.0, 2.22), (-20.0, 2.18),
    (-19.0, 2.14), (-18.0, 2.1), (-17.0, 2.06), (-16.0, 2.02), (-15.0, 1.98),
    (-14.0, 1.94), (-13.0, 1.9), (-12.0, 1.87), (-11.0, 1.83), (-10.0, 1.79),
    (-9.0, 1.76), (-8.0, 1.73), (-7.0, 1.69), (-6.0, 1.66), (-5.0, 1.63),
    (-4.0, 1.6), (-3.0, 1.57), (-2.0, 1.54), (-1.0, 1.51), (0.0, 1.48),
    (1.0, 1.45), (2.0, 1.42), (3.0, 1.39), (4.0, 1.37), (5.0, 1.34),
    (6.0, 1.31), (7.0, 1.29), (8.0, 1.26), (9.0, 1.24), (10.0, 1.22),
    (11.0, 1.19), (12.0, 1.17), (13.0, 1.15), (14.0, 1.12), (15.0, 1.1),
    (16.0, 1.08), (17.0, 1.06), (18.0, 1.04), (19.0, 1.02), (20.0, 1.0),
    (21.0, 0.981), (22.0, 0.962), (23.0, 0.943), (24.0, 0.925), (25.0, 0.907),
    (26.0, 0.89), (27.0, 0.872), (28.0, 0.856), (29.0, 0.839), (30.0, 0.823),
    (31.0, 0.807), (32.0, 0.791), (33.0, 0.776), (34.0, 0.761), (35.0, 0.747),
    (36.0, 0.732), (37.0, 0.718), (38.0, 0.704), (39.0, 0.691), (40.0, 0.677),
    (41.0, 0.664), (42.0, 0.651), (43.0, 0.639), (44.0, 0.626), (45.0, 0.614),
    (46.0, 0.602), (47.0, 0.591), (48.0, 0.579), (49.0, 0.568), (50.0, 0.557),
    (51.0, 0.547), (52.0, 0.536), (53.0, 0.526), (54.0, 0.515), (55.0, 0.506),
    (56.0, 0.496), (57.0, 0.486), (58.0, 0.477), (59.0, 0.468), (60.0, 0.459),
    (61.0, 0.45), (62.0, 0.441), (63.0, 0.433), (64.0, 0.424), (65.0, 0.416),
    (66.0, 0.408), (67.0, 0.4), (68.0, 0.392), (69.0, 0.385), (70.0, 0.377),
    (71.0, 0.37), (72.0, 0.363), (73.0, 0.356), (74.0, 0.349), (75.0, 0.342),
    (76.0, 0.336), (77.0, 0.329), (78.0, 0.323), (79.0, 0.317), (80.0, 0.311),
    (81.0, 0.305), (82.0, 0.299), (83.0, 0.293), (84.0, 0.287), (85.0, 0.282),
    (86.0, 0.276), (87.0, 0.271), (88.0, 0.266), (89.0, 0.261), (90.0, 0.256),
    (91.0, 0.251), (92.0, 0.246), (93.0, 0.241), (94.0, 0.236), (95.0, 0.232),
    (96.0, 0.227), (97.0, 0.223), (98.0, 0.219), (99.0, 0.214), (100.0, 0.21),
    (101.0, 0.206), (102.0, 0.202), (103.0, 0.198), (104.0, 0.195), (105.0, 0.191),
    (106.0, 0.187), (107.0, 0.183), (108.0, 0.18), (109.0, 0.176), (110.0, 0.173),
];

/// Selects which correction-factor table a report is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TcfTable {
    #[default]
    Standard,
    Alternate,
}

impl TcfTable {
    // ---
    pub fn rows(self) -> &'static [(f64, f64)] {
        match self {
            TcfTable::Standard => &TCF_STANDARD,
            TcfTable::Alternate => &TCF_ALTERNATE,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TcfTable::Standard => "standard",
            TcfTable::Alternate => "alternate",
        }
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    fn assert_ascending(rows: &[(f64, f64)]) {
        for pair in rows.windows(2) {
            assert!(pair[0].0 < pair[1].0, "rows out of order at {:?}", pair);
        }
    }

    #[test]
    fn test_tables_are_sorted() {
        // ---
        assert_ascending(&FAHRENHEIT_TO_CELSIUS);
        assert_ascending(&TCF_STANDARD);
        assert_ascending(&TCF_ALTERNATE);
    }

    #[test]
    fn test_tables_cover_same_celsius_range() {
        // ---
        assert_eq!(FAHRENHEIT_TO_CELSIUS.first().map(|r| r.1), Some(-24.0));
        assert_eq!(FAHRENHEIT_TO_CELSIUS.last().map(|r| r.1), Some(110.0));
        for rows in [TcfTable::Standard.rows(), TcfTable::Alternate.rows()] {
            assert_eq!(rows.first().map(|r| r.0), Some(-24.0));
            assert_eq!(rows.last().map(|r| r.0), Some(110.0));
        }
    }

    #[test]
    fn test_variants_diverge_away_from_reference() {
        // ---
        let row = |rows: &[(f64, f64)], c: f64| {
            rows.iter().find(|r| r.0 == c).map(|r| r.1)
        };
        assert_eq!(row(&TCF_STANDARD, 20.0), Some(1.0));
        assert_eq!(row(&TCF_ALTERNATE, 20.0), Some(1.0));
        assert_eq!(row(&TCF_STANDARD, 24.0), Some(1.2));
        assert_eq!(row(&TCF_ALTERNATE, 24.0), Some(0.925));
    }

    #[test]
    fn test_table_serde_names() {
        // ---
        let json = serde_json::to_string(&TcfTable::Alternate).unwrap();
        assert_eq!(json, "\"alternate\"");
        let back: TcfTable = serde_json::from_str("\"standard\"").unwrap();
        assert_eq!(back, TcfTable::Standard);
    }
}
