//! Component catalogs: weapons, defenses, berths, facilities, cargo,
//! vehicles, and drones.
//!
//! Every catalog entry carries a slug (used on the command line and in saved
//! designs), a display label, and a per-unit mass and cost.

use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::hull::TechLevel;

/// Drones at or above this unit mass are serviced from the heavy pool.
pub const HEAVY_DRONE_MASS: f64 = 10.0;

/// Top-level component categories that hold quantity-based catalog items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Weapon,
    Defense,
    Berth,
    Facility,
    Cargo,
    Vehicle,
    Drone,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Weapon,
        Category::Defense,
        Category::Berth,
        Category::Facility,
        Category::Cargo,
        Category::Vehicle,
        Category::Drone,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Weapon => "Weapons",
            Category::Defense => "Defenses",
            Category::Berth => "Berths",
            Category::Facility => "Facilities",
            Category::Cargo => "Cargo",
            Category::Vehicle => "Vehicles",
            Category::Drone => "Drones",
        }
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let needle = s.trim().to_ascii_lowercase();
        let needle = needle.strip_suffix('s').unwrap_or(&needle);
        match needle {
            "weapon" => Ok(Category::Weapon),
            "defense" => Ok(Category::Defense),
            "berth" => Ok(Category::Berth),
            "facilitie" | "facility" => Ok(Category::Facility),
            "cargo" => Ok(Category::Cargo),
            "vehicle" => Ok(Category::Vehicle),
            "drone" => Ok(Category::Drone),
            _ => Err(Error::UnknownCatalogEntry {
                category: "category".to_string(),
                value: s.trim().to_string(),
            }),
        }
    }
}

/// Shared surface of every catalog enum.
pub trait CatalogItem:
    Copy + Eq + Hash + fmt::Debug + Serialize + DeserializeOwned + 'static
{
    const CATEGORY: Category;

    /// All entries in catalog order.
    fn all() -> &'static [Self];
    fn slug(self) -> &'static str;
    fn label(self) -> &'static str;
    fn unit_mass(self) -> f64;
    fn unit_cost(self) -> f64;

    /// Look an entry up by slug or label, ignoring case.
    fn parse(value: &str) -> Result<Self> {
        let needle = value.trim();
        Self::all()
            .iter()
            .copied()
            .find(|item| {
                item.slug().eq_ignore_ascii_case(needle) || item.label().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| Error::UnknownCatalogEntry {
                category: Self::CATEGORY.label().to_string(),
                value: needle.to_string(),
            })
    }
}

macro_rules! catalog {
    (
        $(#[$meta:meta])*
        pub enum $name:ident : $category:path {
            $($variant:ident => ($slug:literal, $label:literal, $mass:expr, $cost:expr)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "kebab-case")]
        pub enum $name {
            $($variant),+
        }

        impl CatalogItem for $name {
            const CATEGORY: Category = $category;

            fn all() -> &'static [Self] {
                &[$($name::$variant),+]
            }

            fn slug(self) -> &'static str {
                match self {
                    $($name::$variant => $slug),+
                }
            }

            fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            fn unit_mass(self) -> f64 {
                match self {
                    $($name::$variant => $mass),+
                }
            }

            fn unit_cost(self) -> f64 {
                match self {
                    $($name::$variant => $cost),+
                }
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                <$name as CatalogItem>::parse(s)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

catalog! {
    /// Weapon mounts. Each unit occupies one hull mount.
    pub enum Weapon: Category::Weapon {
        HardPoint => ("hard-point", "Hard Point", 1.0, 0.1),
        PulseLaser => ("pulse-laser", "Pulse Laser", 1.0, 0.5),
        BeamLaser => ("beam-laser", "Beam Laser", 1.0, 1.0),
        MissileRack => ("missile-rack", "Missile Rack", 1.0, 0.75),
        PlasmaGun => ("plasma-gun", "Plasma Gun", 2.0, 2.5),
        FusionGun => ("fusion-gun", "Fusion Gun", 2.0, 4.0),
        ParticleBeam => ("particle-beam", "Particle Beam", 3.0, 5.0),
    }
}

impl Weapon {
    /// Whether each unit needs a gunner. Bare hard points are unmanned.
    pub fn is_crewed(self) -> bool {
        self != Weapon::HardPoint
    }
}

catalog! {
    /// Defensive systems. Each unit occupies one hull mount and one gunner.
    pub enum Defense: Category::Defense {
        Sandcaster => ("sandcaster", "Sandcaster", 1.0, 0.25),
        PointDefenseLaser => ("point-defense-laser", "Point Defense Laser", 1.0, 1.0),
        NuclearDamper => ("nuclear-damper", "Nuclear Damper", 10.0, 5.0),
        MesonScreen => ("meson-screen", "Meson Screen", 20.0, 8.0),
    }
}

catalog! {
    pub enum Berth: Category::Berth {
        Stateroom => ("stateroom", "Stateroom", 4.0, 0.5),
        LuxuryStateroom => ("luxury-stateroom", "Luxury Stateroom", 8.0, 1.0),
        LowBerth => ("low-berth", "Low Berth", 0.5, 0.05),
        EmergencyLowBerth => ("emergency-low-berth", "Emergency Low Berth", 1.0, 0.1),
    }
}

impl Berth {
    /// Staterooms of either grade drive the steward count.
    pub fn is_stateroom(self) -> bool {
        matches!(self, Berth::Stateroom | Berth::LuxuryStateroom)
    }
}

catalog! {
    /// Recreation and medical facilities.
    pub enum Facility: Category::Facility {
        Commissary => ("commissary", "Commissary", 2.0, 0.2),
        Gym => ("gym", "Gym", 4.0, 0.3),
        Library => ("library", "Library", 2.0, 0.2),
        Theater => ("theater", "Theater", 8.0, 0.6),
        FirstAidStation => ("first-aid-station", "First Aid Station", 1.0, 0.05),
        Autodoc => ("autodoc", "Autodoc", 1.0, 0.5),
        MedicalBay => ("medical-bay", "Medical Bay", 4.0, 1.0),
        SurgicalBay => ("surgical-bay", "Surgical Bay", 8.0, 2.5),
        MedicalGarden => ("medical-garden", "Medical Garden", 10.0, 0.5),
    }
}

catalog! {
    /// Cargo space, bought by the ton.
    pub enum Cargo: Category::Cargo {
        Standard => ("standard", "Standard Cargo", 1.0, 0.0),
        Refrigerated => ("refrigerated", "Refrigerated Cargo", 1.0, 0.05),
        SecureVault => ("secure-vault", "Secure Vault", 1.0, 0.2),
        Hazardous => ("hazardous", "Hazardous Cargo", 1.0, 0.1),
    }
}

catalog! {
    /// Carried small craft and ground vehicles.
    pub enum Vehicle: Category::Vehicle {
        AirRaft => ("air-raft", "Air/Raft", 4.0, 0.25),
        Atv => ("atv", "ATV", 10.0, 0.03),
        GCarrier => ("g-carrier", "G-Carrier", 8.0, 0.5),
        Fighter => ("fighter", "Fighter", 10.0, 18.0),
        Launch => ("launch", "Launch", 20.0, 14.0),
        ShipsBoat => ("ships-boat", "Ship's Boat", 30.0, 16.0),
        Pinnace => ("pinnace", "Pinnace", 40.0, 20.0),
        Shuttle => ("shuttle", "Shuttle", 95.0, 33.0),
    }
}

impl Vehicle {
    /// Minimum tech rank at which the vehicle can be carried.
    pub fn min_tech_rank(self) -> u8 {
        match self {
            Vehicle::AirRaft | Vehicle::Atv | Vehicle::Launch | Vehicle::ShipsBoat => 10,
            Vehicle::Pinnace | Vehicle::Shuttle => 11,
            Vehicle::Fighter => 12,
            Vehicle::GCarrier => 13,
        }
    }

    /// Maintenance crew needed per vehicle; fractional shares pool per group.
    pub fn service_staff_per_unit(self) -> f64 {
        match self {
            Vehicle::AirRaft => 0.25,
            Vehicle::Atv | Vehicle::GCarrier => 0.5,
            Vehicle::Fighter | Vehicle::Launch | Vehicle::ShipsBoat | Vehicle::Pinnace => 1.0,
            Vehicle::Shuttle => 2.0,
        }
    }
}

catalog! {
    /// Remote drones, serviced by tonnage pool.
    pub enum Drone: Category::Drone {
        Probe => ("probe", "Probe Drone", 0.5, 0.1),
        Repair => ("repair", "Repair Drone", 1.0, 0.2),
        Survey => ("survey", "Survey Drone", 5.0, 1.0),
        Mining => ("mining", "Mining Drone", 10.0, 2.0),
        Combat => ("combat", "Combat Drone", 15.0, 6.0),
        CargoHauler => ("cargo-hauler", "Cargo Hauler Drone", 20.0, 3.0),
    }
}

impl Drone {
    pub fn is_heavy(self) -> bool {
        self.unit_mass() >= HEAVY_DRONE_MASS
    }
}

/// Vehicles a ship of `tech_level` is allowed to carry, in catalog order.
pub fn vehicles_available(tech_level: TechLevel) -> Vec<Vehicle> {
    Vehicle::all()
        .iter()
        .copied()
        .filter(|vehicle| vehicle.min_tech_rank() <= tech_level.rank())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_by_slug_or_label() {
        assert_eq!("pulse-laser".parse::<Weapon>().unwrap(), Weapon::PulseLaser);
        assert_eq!("Ship's Boat".parse::<Vehicle>().unwrap(), Vehicle::ShipsBoat);
        match "death-ray".parse::<Weapon>() {
            Err(Error::UnknownCatalogEntry { category, value }) => {
                assert_eq!(category, "Weapons");
                assert_eq!(value, "death-ray");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn only_hard_points_are_uncrewed() {
        let uncrewed: Vec<Weapon> = Weapon::all()
            .iter()
            .copied()
            .filter(|w| !w.is_crewed())
            .collect();
        assert_eq!(uncrewed, vec![Weapon::HardPoint]);
    }

    #[test]
    fn drone_weight_class_splits_at_ten_tons() {
        assert!(!Drone::Survey.is_heavy());
        assert!(Drone::Mining.is_heavy());
        assert!(Drone::CargoHauler.is_heavy());
    }

    #[test]
    fn vehicles_filter_by_tech_rank() {
        let low = vehicles_available(TechLevel::A);
        assert!(low.contains(&Vehicle::AirRaft));
        assert!(!low.contains(&Vehicle::Fighter));
        assert!(!low.contains(&Vehicle::GCarrier));

        let high = vehicles_available(TechLevel::H);
        assert_eq!(high.len(), Vehicle::all().len());
    }

    #[test]
    fn category_parses_plural_forms() {
        assert_eq!("weapons".parse::<Category>().unwrap(), Category::Weapon);
        assert_eq!("facilities".parse::<Category>().unwrap(), Category::Facility);
        assert_eq!("Drone".parse::<Category>().unwrap(), Category::Drone);
    }

    #[test]
    fn serializes_as_kebab_case_slug() {
        let json = serde_json::to_string(&Facility::MedicalBay).unwrap();
        assert_eq!(json, "\"medical-bay\"");
        assert_eq!(json.trim_matches('"'), Facility::MedicalBay.slug());
    }
}
