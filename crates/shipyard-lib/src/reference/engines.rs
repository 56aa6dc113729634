//! Engine performance and engine specification tables.
//!
//! The performance table is the load-bearing lookup for every engine in a
//! design: a drive identifier only yields a rating at hull sizes where the
//! table has an entry. Small drive codes suit small hulls and drop out as
//! tonnage grows; large codes are the reverse.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::hull::Hull;

/// Drive identifiers in catalog order (`I` and `O` are skipped).
pub const ENGINE_IDS: [char; 24] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'J', 'K', 'L', 'M', 'N', 'P', 'Q', 'R', 'S', 'T',
    'U', 'V', 'W', 'X', 'Y', 'Z',
];

/// Lowest and highest ratings the table can produce.
pub const MIN_PERFORMANCE: u8 = 1;
pub const MAX_PERFORMANCE: u8 = 6;

/// Performance by drive (rows) and hull size (columns). `0` marks an
/// unavailable combination.
#[rustfmt::skip]
const PERFORMANCE: [[u8; 15]; 24] = [
    //   100 200 300 400 500 600 700 800 900 1000 1200 1400 1600 1800 2000
    /* A */ [2, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    /* B */ [4, 2, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    /* C */ [6, 3, 2, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    /* D */ [0, 4, 2, 2, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0],
    /* E */ [0, 5, 3, 2, 2, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0],
    /* F */ [0, 6, 4, 3, 2, 2, 1, 1, 1, 1, 1, 0, 0, 0, 0],
    /* G */ [0, 0, 4, 3, 2, 2, 2, 1, 1, 1, 1, 1, 0, 0, 0],
    /* H */ [0, 0, 5, 4, 3, 2, 2, 2, 1, 1, 1, 1, 1, 0, 0],
    /* J */ [0, 0, 6, 4, 3, 3, 2, 2, 2, 1, 1, 1, 1, 1, 0],
    /* K */ [0, 0, 6, 5, 4, 3, 2, 2, 2, 2, 1, 1, 1, 1, 1],
    /* L */ [0, 0, 0, 5, 4, 3, 3, 2, 2, 2, 1, 1, 1, 1, 1],
    /* M */ [0, 0, 0, 6, 4, 4, 3, 3, 2, 2, 2, 1, 1, 1, 1],
    /* N */ [0, 0, 0, 6, 5, 4, 3, 3, 2, 2, 2, 1, 1, 1, 1],
    /* P */ [0, 0, 0, 0, 5, 4, 4, 3, 3, 2, 2, 2, 1, 1, 1],
    /* Q */ [0, 0, 0, 0, 6, 5, 4, 3, 3, 3, 2, 2, 1, 1, 1],
    /* R */ [0, 0, 0, 0, 6, 5, 4, 4, 3, 3, 2, 2, 2, 1, 1],
    /* S */ [0, 0, 0, 0, 6, 5, 4, 4, 3, 3, 2, 2, 2, 1, 1],
    /* T */ [0, 0, 0, 0, 0, 6, 5, 4, 4, 3, 3, 2, 2, 2, 1],
    /* U */ [0, 0, 0, 0, 0, 6, 5, 4, 4, 3, 3, 2, 2, 2, 1],
    /* V */ [0, 0, 0, 0, 0, 6, 5, 5, 4, 4, 3, 2, 2, 2, 2],
    /* W */ [0, 0, 0, 0, 0, 0, 6, 5, 4, 4, 3, 3, 2, 2, 2],
    /* X */ [0, 0, 0, 0, 0, 0, 6, 5, 4, 4, 3, 3, 2, 2, 2],
    /* Y */ [0, 0, 0, 0, 0, 0, 6, 5, 5, 4, 3, 3, 2, 2, 2],
    /* Z */ [0, 0, 0, 0, 0, 0, 6, 6, 5, 4, 4, 3, 3, 2, 2],
];

/// Baseline (mass tons, cost) per drive for jump, maneuver, and power plant.
#[rustfmt::skip]
const SPECS: [[(f64, f64); 3]; 24] = [
    //       jump            maneuver       power plant
    /* A */ [(10.0, 10.0),  (1.0, 4.0),   (4.0, 8.0)],
    /* B */ [(15.0, 20.0),  (3.0, 8.0),   (7.0, 16.0)],
    /* C */ [(20.0, 30.0),  (5.0, 12.0),  (10.0, 24.0)],
    /* D */ [(25.0, 40.0),  (7.0, 16.0),  (13.0, 32.0)],
    /* E */ [(30.0, 50.0),  (9.0, 20.0),  (16.0, 40.0)],
    /* F */ [(35.0, 60.0),  (11.0, 24.0), (19.0, 48.0)],
    /* G */ [(40.0, 70.0),  (13.0, 28.0), (22.0, 56.0)],
    /* H */ [(45.0, 80.0),  (15.0, 32.0), (25.0, 64.0)],
    /* J */ [(50.0, 90.0),  (17.0, 36.0), (28.0, 72.0)],
    /* K */ [(55.0, 100.0), (19.0, 40.0), (31.0, 80.0)],
    /* L */ [(60.0, 110.0), (21.0, 44.0), (34.0, 88.0)],
    /* M */ [(65.0, 120.0), (23.0, 48.0), (37.0, 96.0)],
    /* N */ [(70.0, 130.0), (25.0, 52.0), (40.0, 104.0)],
    /* P */ [(75.0, 140.0), (27.0, 56.0), (43.0, 112.0)],
    /* Q */ [(80.0, 150.0), (29.0, 60.0), (46.0, 120.0)],
    /* R */ [(85.0, 160.0), (31.0, 64.0), (49.0, 128.0)],
    /* S */ [(90.0, 170.0), (33.0, 68.0), (52.0, 136.0)],
    /* T */ [(95.0, 180.0), (35.0, 72.0), (55.0, 144.0)],
    /* U */ [(100.0, 190.0), (37.0, 76.0), (58.0, 152.0)],
    /* V */ [(105.0, 200.0), (39.0, 80.0), (61.0, 160.0)],
    /* W */ [(110.0, 210.0), (41.0, 84.0), (64.0, 168.0)],
    /* X */ [(115.0, 220.0), (43.0, 88.0), (67.0, 176.0)],
    /* Y */ [(120.0, 230.0), (45.0, 92.0), (70.0, 184.0)],
    /* Z */ [(125.0, 240.0), (47.0, 96.0), (73.0, 192.0)],
];

/// The three kinds of drive a design carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineType {
    PowerPlant,
    Jump,
    Maneuver,
}

impl EngineType {
    pub const ALL: [EngineType; 3] = [
        EngineType::PowerPlant,
        EngineType::Jump,
        EngineType::Maneuver,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EngineType::PowerPlant => "Power Plant",
            EngineType::Jump => "Jump Drive",
            EngineType::Maneuver => "Maneuver Drive",
        }
    }

    /// Divisor applied to `tonnage × performance` to price a drive.
    ///
    /// Power plants and jump drives cost 0.02 per ton-rating; maneuver drives 0.01.
    pub fn cost_divisor(self) -> f64 {
        match self {
            EngineType::PowerPlant | EngineType::Jump => 50.0,
            EngineType::Maneuver => 100.0,
        }
    }

    fn spec_column(self) -> usize {
        match self {
            EngineType::Jump => 0,
            EngineType::Maneuver => 1,
            EngineType::PowerPlant => 2,
        }
    }
}

impl FromStr for EngineType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "power_plant" | "pp" => Ok(EngineType::PowerPlant),
            "jump" | "jump_drive" | "j" => Ok(EngineType::Jump),
            "maneuver" | "maneuver_drive" | "m" => Ok(EngineType::Maneuver),
            other => Err(Error::UnknownEngineType {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for EngineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A drive identifier (`A`..`Z`, no `I`/`O`), serialized as its letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EngineId(u8);

impl EngineId {
    /// First identifier in catalog order.
    pub const FIRST: EngineId = EngineId(0);

    pub fn from_letter(letter: char) -> Option<Self> {
        let letter = letter.to_ascii_uppercase();
        ENGINE_IDS
            .iter()
            .position(|&c| c == letter)
            .map(|idx| EngineId(idx as u8))
    }

    /// All identifiers in catalog order.
    pub fn all() -> impl Iterator<Item = EngineId> {
        (0..ENGINE_IDS.len() as u8).map(EngineId)
    }

    pub fn letter(self) -> char {
        ENGINE_IDS[self.0 as usize]
    }

    fn row(self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<String> for EngineId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<EngineId> for String {
    fn from(id: EngineId) -> Self {
        id.letter().to_string()
    }
}

impl FromStr for EngineId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) => EngineId::from_letter(letter),
            _ => None,
        }
        .ok_or_else(|| Error::UnknownEngineId {
            value: trimmed.to_string(),
        })
    }
}

impl fmt::Display for EngineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Baseline mass and cost of a drive from the specs table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EngineSpec {
    pub mass: f64,
    pub cost: f64,
}

/// Performance of `id` at `hull`, or `None` when the combination is unavailable.
pub fn performance(id: EngineId, hull: Hull) -> Option<u8> {
    match PERFORMANCE[id.row()][hull.index()] {
        0 => None,
        rating => Some(rating),
    }
}

/// Identifiers that produce a rating at `hull`, in catalog order.
pub fn available_engine_ids(hull: Hull) -> Vec<EngineId> {
    EngineId::all()
        .filter(|&id| performance(id, hull).is_some())
        .collect()
}

/// First identifier rated exactly `target` at `hull`.
///
/// Falls back to the first available identifier when no exact match exists.
pub fn find_engine_id(hull: Hull, target: u8) -> Option<EngineId> {
    EngineId::all()
        .find(|&id| performance(id, hull) == Some(target))
        .or_else(|| available_engine_ids(hull).into_iter().next())
}

/// Baseline mass/cost for `id` when fitted as `engine_type`.
pub fn engine_spec(id: EngineId, engine_type: EngineType) -> EngineSpec {
    let (mass, cost) = SPECS[id.row()][engine_type.spec_column()];
    EngineSpec { mass, cost }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hull(tonnage: u32) -> Hull {
        Hull::from_tonnage(tonnage).expect("valid hull")
    }

    fn id(letter: char) -> EngineId {
        EngineId::from_letter(letter).expect("valid id")
    }

    #[test]
    fn drive_a_only_fits_small_hulls() {
        assert_eq!(performance(id('A'), hull(100)), Some(2));
        assert_eq!(performance(id('A'), hull(200)), Some(1));
        for tonnage in [300, 400, 1000, 2000] {
            assert_eq!(performance(id('A'), hull(tonnage)), None);
        }
    }

    #[test]
    fn drive_z_only_fits_large_hulls() {
        assert_eq!(performance(id('Z'), hull(100)), None);
        assert_eq!(performance(id('Z'), hull(600)), None);
        assert_eq!(performance(id('Z'), hull(700)), Some(6));
        assert_eq!(performance(id('Z'), hull(2000)), Some(2));
    }

    #[test]
    fn every_rating_is_in_range() {
        for engine in EngineId::all() {
            for h in Hull::all() {
                if let Some(rating) = performance(engine, h) {
                    assert!((MIN_PERFORMANCE..=MAX_PERFORMANCE).contains(&rating));
                }
            }
        }
    }

    #[test]
    fn lists_available_ids_in_catalog_order() {
        let ids: Vec<char> = available_engine_ids(hull(100))
            .into_iter()
            .map(EngineId::letter)
            .collect();
        assert_eq!(ids, vec!['A', 'B', 'C']);
    }

    #[test]
    fn finds_id_by_target_performance_with_fallback() {
        assert_eq!(find_engine_id(hull(400), 3), Some(id('F')));
        // Nothing is rated 1 at 100 tons; the first available id is returned.
        assert_eq!(find_engine_id(hull(100), 1), Some(id('A')));
    }

    #[test]
    fn engine_ids_reject_ambiguous_letters() {
        assert!(EngineId::from_letter('I').is_none());
        assert!(EngineId::from_letter('O').is_none());
        assert_eq!("j".parse::<EngineId>().unwrap().letter(), 'J');
    }

    #[test]
    fn specs_follow_catalog_order() {
        let spec = engine_spec(id('B'), EngineType::Jump);
        assert_eq!(spec, EngineSpec { mass: 15.0, cost: 20.0 });
        let spec = engine_spec(id('Z'), EngineType::PowerPlant);
        assert_eq!(spec, EngineSpec { mass: 73.0, cost: 192.0 });
    }
}
