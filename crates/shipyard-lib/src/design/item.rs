//! Quantity-based catalog lines (weapons, berths, cargo, ...).

use serde::{Deserialize, Serialize};

use crate::derive::MassCost;
use crate::reference::{Berth, Cargo, CatalogItem, Defense, Drone, Facility, Vehicle, Weapon};

use super::ShipDesign;

/// A catalog entry and how many units of it are installed.
///
/// Unit mass and cost always come from the catalog, never from the saved design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item<K> {
    pub kind: K,
    pub quantity: u32,
}

impl<K: CatalogItem> Item<K> {
    pub fn new(kind: K, quantity: u32) -> Self {
        Self { kind, quantity }
    }

    pub fn mass(&self) -> f64 {
        f64::from(self.quantity) * self.kind.unit_mass()
    }

    pub fn cost(&self) -> f64 {
        f64::from(self.quantity) * self.kind.unit_cost()
    }

    pub fn mass_cost(&self) -> MassCost {
        MassCost::new(self.mass(), self.cost())
    }
}

/// Total units across a list of catalog lines, saturating at `u32::MAX`.
pub fn total_quantity<K>(items: &[Item<K>]) -> u32 {
    saturating_sum(items.iter().map(|item| item.quantity))
}

/// Sum of counts that clamps at `u32::MAX` instead of overflowing.
pub fn saturating_sum(counts: impl IntoIterator<Item = u32>) -> u32 {
    counts.into_iter().fold(0, u32::saturating_add)
}

/// Catalog kinds that have a dedicated list on [`ShipDesign`].
pub trait Stocked: CatalogItem {
    fn items(design: &ShipDesign) -> &[Item<Self>];
    fn items_mut(design: &mut ShipDesign) -> &mut Vec<Item<Self>>;
}

macro_rules! stocked {
    ($($kind:ty => $field:ident),+ $(,)?) => {
        $(
            impl Stocked for $kind {
                fn items(design: &ShipDesign) -> &[Item<Self>] {
                    &design.$field
                }

                fn items_mut(design: &mut ShipDesign) -> &mut Vec<Item<Self>> {
                    &mut design.$field
                }
            }
        )+
    };
}

stocked! {
    Weapon => weapons,
    Defense => defenses,
    Berth => berths,
    Facility => facilities,
    Cargo => cargo,
    Vehicle => vehicles,
    Drone => drones,
}
