//! Hull sizes, tech levels, and hull configurations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Discrete hull tonnages, smallest first.
pub const HULL_TONNAGES: [u32; 15] = [
    100, 200, 300, 400, 500, 600, 700, 800, 900, 1000, 1200, 1400, 1600, 1800, 2000,
];

/// Hull code letters aligned with [`HULL_TONNAGES`]. `I` and `O` are skipped.
pub const HULL_CODES: [char; 15] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'J', 'K', 'L', 'M', 'N', 'P', 'Q',
];

/// One of the fifteen legal hull sizes.
///
/// Serialized as its tonnage so saved designs stay human-readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Hull(u8);

impl Hull {
    /// The smallest hull (100 tons).
    pub const SMALLEST: Hull = Hull(0);

    /// Resolve a hull from its exact tonnage.
    pub fn from_tonnage(tonnage: u32) -> Option<Self> {
        HULL_TONNAGES
            .iter()
            .position(|&t| t == tonnage)
            .map(|idx| Hull(idx as u8))
    }

    /// Resolve a hull from its code letter (case-insensitive).
    pub fn from_code(code: char) -> Option<Self> {
        let code = code.to_ascii_uppercase();
        HULL_CODES
            .iter()
            .position(|&c| c == code)
            .map(|idx| Hull(idx as u8))
    }

    /// All hulls in ascending tonnage order.
    pub fn all() -> impl Iterator<Item = Hull> {
        (0..HULL_TONNAGES.len() as u8).map(Hull)
    }

    pub fn tonnage(self) -> u32 {
        HULL_TONNAGES[self.index()]
    }

    pub fn code(self) -> char {
        HULL_CODES[self.index()]
    }

    /// Column index into per-hull lookup tables.
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl Default for Hull {
    fn default() -> Self {
        Hull::SMALLEST
    }
}

impl TryFrom<u32> for Hull {
    type Error = Error;

    fn try_from(tonnage: u32) -> Result<Self> {
        Hull::from_tonnage(tonnage).ok_or_else(|| Error::UnknownHull {
            value: tonnage.to_string(),
        })
    }
}

impl From<Hull> for u32 {
    fn from(hull: Hull) -> Self {
        hull.tonnage()
    }
}

impl FromStr for Hull {
    type Err = Error;

    /// Accepts either a tonnage (`"400"`) or a hull code (`"D"`).
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if let Ok(tonnage) = trimmed.parse::<u32>() {
            return Hull::try_from(tonnage);
        }
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(code), None) => Hull::from_code(code),
            _ => None,
        }
        .ok_or_else(|| Error::UnknownHull {
            value: trimmed.to_string(),
        })
    }
}

impl fmt::Display for Hull {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} tons ({})", self.tonnage(), self.code())
    }
}

/// Technology level, `A` (rank 10) through `H` (rank 17).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum TechLevel {
    #[default]
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}

impl TechLevel {
    pub const ALL: [TechLevel; 8] = [
        TechLevel::A,
        TechLevel::B,
        TechLevel::C,
        TechLevel::D,
        TechLevel::E,
        TechLevel::F,
        TechLevel::G,
        TechLevel::H,
    ];

    /// Numeric rank used by catalog availability checks.
    pub fn rank(self) -> u8 {
        10 + self as u8
    }

    pub fn from_rank(rank: u8) -> Option<Self> {
        rank.checked_sub(10)
            .and_then(|idx| Self::ALL.get(idx as usize).copied())
    }
}

impl FromStr for TechLevel {
    type Err = Error;

    /// Accepts either a letter (`"C"`) or a rank (`"12"`).
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let parsed = if let Ok(rank) = trimmed.parse::<u8>() {
            TechLevel::from_rank(rank)
        } else {
            TechLevel::ALL
                .iter()
                .copied()
                .find(|tl| format!("{tl:?}").eq_ignore_ascii_case(trimmed))
        };
        parsed.ok_or_else(|| Error::UnknownTechLevel {
            value: trimmed.to_string(),
        })
    }
}

impl fmt::Display for TechLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} ({})", self, self.rank())
    }
}

/// Hull form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Configuration {
    NeedleWedge,
    Cone,
    #[default]
    Cylinder,
    CloseStructure,
    Sphere,
    FlattenedSphere,
    DispersedStructure,
}

impl Configuration {
    pub const ALL: [Configuration; 7] = [
        Configuration::NeedleWedge,
        Configuration::Cone,
        Configuration::Cylinder,
        Configuration::CloseStructure,
        Configuration::Sphere,
        Configuration::FlattenedSphere,
        Configuration::DispersedStructure,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Configuration::NeedleWedge => "Needle/Wedge",
            Configuration::Cone => "Cone",
            Configuration::Cylinder => "Cylinder",
            Configuration::CloseStructure => "Close Structure",
            Configuration::Sphere => "Sphere",
            Configuration::FlattenedSphere => "Flattened Sphere",
            Configuration::DispersedStructure => "Dispersed Structure",
        }
    }
}

impl FromStr for Configuration {
    type Err = Error;

    /// Accepts the label (`"Close Structure"`) or its kebab-case form.
    fn from_str(s: &str) -> Result<Self> {
        let needle = s.trim().to_ascii_lowercase().replace(['/', ' ', '_'], "-");
        Configuration::ALL
            .iter()
            .copied()
            .find(|c| c.label().to_ascii_lowercase().replace(['/', ' '], "-") == needle)
            .ok_or_else(|| Error::UnknownCatalogEntry {
                category: "configuration".to_string(),
                value: s.trim().to_string(),
            })
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
