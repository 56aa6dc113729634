//! Edits that produce a new `ShipDesign` snapshot.
//!
//! Each function takes the current snapshot by reference and returns a new
//! one; the input is never modified, so a caller holding the old snapshot
//! keeps a self-consistent view. Engine mass/cost caches are refreshed
//! before a new snapshot is returned.

use tracing::{debug, warn};

use crate::design::{default_engines, Engine, Fitting, Item, ShipDesign, Stocked};
use crate::error::{Error, Result};
use crate::reference::{
    find_engine_id, performance, vehicles_available, EngineId, EngineType, Hull, TechLevel,
    Vehicle,
};

/// Move the design to a different hull size.
///
/// Every engine's rating is re-read from the performance table for the new
/// hull. Where the table has no entry the engine keeps its previous rating.
/// Mass and cost are then re-derived. A design with no engines receives the
/// default power plant, jump drive, and maneuver drive.
pub fn with_hull(design: &ShipDesign, hull: Hull) -> ShipDesign {
    let mut next = design.clone();
    next.hull = hull;

    if design.engines.is_empty() {
        debug!(tonnage = hull.tonnage(), "synthesizing default engines");
        next.engines = default_engines(hull);
        return next;
    }

    next.engines = design
        .engines
        .iter()
        .map(|engine| {
            let rating = performance(engine.engine_id, hull).unwrap_or_else(|| {
                warn!(
                    engine = %engine.engine_id,
                    tonnage = hull.tonnage(),
                    performance = engine.performance,
                    "engine unavailable at new hull size; keeping previous rating"
                );
                engine.performance
            });
            Engine {
                performance: rating,
                ..engine.clone()
            }
            .rederive(hull)
        })
        .collect();

    debug!(
        from = design.hull.tonnage(),
        to = hull.tonnage(),
        engines = next.engines.len(),
        "re-derived engines for new hull"
    );
    next
}

/// Install another engine. Rejects ids that are unavailable at the current hull.
pub fn add_engine(
    design: &ShipDesign,
    engine_type: EngineType,
    engine_id: EngineId,
) -> Result<ShipDesign> {
    let engine = Engine::new(engine_type, engine_id, design.hull)?;
    let mut next = design.clone();
    next.engines.push(engine);
    Ok(next)
}

/// Swap the drive id of an installed engine.
///
/// Rejects ids that are unavailable at the current hull. Lowering a power
/// plant de-rates any drive that now exceeds the best remaining power plant.
pub fn change_engine_id(
    design: &ShipDesign,
    index: usize,
    engine_id: EngineId,
) -> Result<ShipDesign> {
    let current = engine_at(design, index)?;
    let replacement = Engine::new(current.engine_type, engine_id, design.hull)?;

    let mut next = design.clone();
    next.engines[index] = replacement;
    if current.engine_type == EngineType::PowerPlant {
        derate_to_power_plant(&mut next);
    }
    Ok(next)
}

/// Remove an installed engine.
///
/// Removing the only power plant or the only jump drive is rejected. Removing
/// a power plant de-rates every jump and maneuver drive rated above the best
/// surviving power plant down to that rating.
pub fn remove_engine(design: &ShipDesign, index: usize) -> Result<ShipDesign> {
    let target = engine_at(design, index)?;

    if matches!(target.engine_type, EngineType::PowerPlant | EngineType::Jump)
        && design.engines_of(target.engine_type).count() <= 1
    {
        return Err(Error::LastRequiredEngine {
            engine_type: target.engine_type,
        });
    }

    let mut next = design.clone();
    let removed = next.engines.remove(index);
    if removed.engine_type == EngineType::PowerPlant {
        derate_to_power_plant(&mut next);
    }
    Ok(next)
}

fn engine_at(design: &ShipDesign, index: usize) -> Result<&Engine> {
    design
        .engines
        .get(index)
        .ok_or(Error::EngineIndexOutOfRange {
            index,
            len: design.engines.len(),
        })
}

/// Force jump and maneuver drives down to the best installed power plant.
fn derate_to_power_plant(design: &mut ShipDesign) {
    let Some(ceiling) = design.max_performance(EngineType::PowerPlant) else {
        return;
    };
    let hull = design.hull;

    for engine in design
        .engines
        .iter_mut()
        .filter(|engine| engine.engine_type != EngineType::PowerPlant)
        .filter(|engine| engine.performance > ceiling)
    {
        // Prefer a drive id that the table rates at the new ceiling.
        let engine_id = find_engine_id(hull, ceiling)
            .filter(|&id| performance(id, hull) == Some(ceiling))
            .unwrap_or(engine.engine_id);

        debug!(
            engine_type = %engine.engine_type,
            from_id = %engine.engine_id,
            to_id = %engine_id,
            from = engine.performance,
            to = ceiling,
            "de-rating drive to power plant ceiling"
        );

        *engine = Engine::rated(engine.engine_type, engine_id, ceiling, hull);
    }
}

/// Add a fitting. Bridges and comms suites replace any existing fitting of
/// the same kind; other fittings are appended.
pub fn upsert_fitting(design: &ShipDesign, fitting: Fitting) -> ShipDesign {
    let mut next = design.clone();
    let kind = fitting.kind();
    if kind.is_singleton() {
        next.fittings.retain(|existing| existing.kind() != kind);
    }
    next.fittings.push(fitting);
    next
}

/// Add a fuel tank of `tons`, rejecting non-finite or non-positive tonnage.
pub fn add_fuel_tank(design: &ShipDesign, tons: f64) -> Result<ShipDesign> {
    let fitting = Fitting::FuelTank { tons };
    fitting.validate()?;
    Ok(upsert_fitting(design, fitting))
}

/// Add a launch tube sized for `vehicle`, rejecting vehicles above the
/// design's tech level.
pub fn add_launch_tube(design: &ShipDesign, vehicle: Vehicle) -> Result<ShipDesign> {
    ensure_vehicle_available(design, vehicle)?;
    Ok(upsert_fitting(design, Fitting::LaunchTube { vehicle }))
}

/// Remove the fitting at `index`.
pub fn remove_fitting(design: &ShipDesign, index: usize) -> Result<ShipDesign> {
    if index >= design.fittings.len() {
        return Err(Error::FittingIndexOutOfRange {
            index,
            len: design.fittings.len(),
        });
    }
    let mut next = design.clone();
    next.fittings.remove(index);
    Ok(next)
}

/// Set how many units of a catalog entry are installed.
///
/// The entry's lines are collapsed into one; a quantity of zero removes it.
pub fn set_quantity<K: Stocked>(design: &ShipDesign, kind: K, quantity: u32) -> ShipDesign {
    let mut next = design.clone();
    let items = K::items_mut(&mut next);

    match items.iter().position(|item| item.kind == kind) {
        Some(position) => items[position].quantity = quantity,
        None => items.push(Item::new(kind, quantity)),
    }

    let mut seen = false;
    items.retain(|item| {
        if item.kind != kind {
            return item.quantity > 0;
        }
        let keep = !seen && item.quantity > 0;
        seen = true;
        keep
    });
    next
}

/// [`set_quantity`] for vehicles, rejecting vehicles above the design's tech level.
pub fn set_vehicle_quantity(
    design: &ShipDesign,
    vehicle: Vehicle,
    quantity: u32,
) -> Result<ShipDesign> {
    if quantity > 0 {
        ensure_vehicle_available(design, vehicle)?;
    }
    Ok(set_quantity(design, vehicle, quantity))
}

fn ensure_vehicle_available(design: &ShipDesign, vehicle: Vehicle) -> Result<()> {
    if vehicles_available(design.tech_level).contains(&vehicle) {
        Ok(())
    } else {
        Err(Error::VehicleUnavailable {
            vehicle,
            tech_level: design.tech_level,
        })
    }
}

/// Change fuel endurance. Zero weeks is rejected.
pub fn with_fuel_weeks(design: &ShipDesign, weeks: u32) -> Result<ShipDesign> {
    if weeks == 0 {
        return Err(Error::InvalidDesign {
            message: "fuel_weeks must be at least 1".to_string(),
        });
    }
    let mut next = design.clone();
    next.fuel_weeks = weeks;
    Ok(next)
}

pub fn with_reloads(design: &ShipDesign, missile_reloads: u32, sand_reloads: u32) -> ShipDesign {
    let mut next = design.clone();
    next.missile_reloads = missile_reloads;
    next.sand_reloads = sand_reloads;
    next
}

pub fn with_tech_level(design: &ShipDesign, tech_level: TechLevel) -> ShipDesign {
    let mut next = design.clone();
    next.tech_level = tech_level;
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::calculate_mass;
    use crate::design::FittingKind;
    use crate::reference::{CommsTier, Weapon};

    fn hull(tonnage: u32) -> Hull {
        Hull::from_tonnage(tonnage).unwrap()
    }

    fn id(letter: char) -> EngineId {
        EngineId::from_letter(letter).unwrap()
    }

    #[test]
    fn hull_change_rereads_table_and_rederives() {
        let design = ShipDesign::new("Scout");
        let bigger = with_hull(&design, hull(200));

        // Drive A is rated 1 at 200 tons.
        for engine in &bigger.engines {
            assert_eq!(engine.performance, 1);
            let expected = engine.derived(hull(200));
            assert!((engine.mass - expected.mass).abs() < 1e-9);
            assert!((engine.cost - expected.cost).abs() < 1e-9);
        }
        assert!((bigger.engines[0].mass - 4.0).abs() < 1e-9);
        // The input snapshot is untouched.
        assert_eq!(design.hull.tonnage(), 100);
        assert_eq!(design.engines[0].performance, 2);
    }

    #[test]
    fn hull_change_keeps_rating_when_unavailable() {
        let design = ShipDesign::new("Scout");
        let huge = with_hull(&design, hull(1000));
        for engine in &huge.engines {
            assert_eq!(engine.engine_id, id('A'));
            assert_eq!(engine.performance, 2);
            assert!((engine.mass - 40.0).abs() < 1e-9);
        }
    }

    #[test]
    fn hull_change_synthesizes_engines_when_empty() {
        let mut design = ShipDesign::new("Hulk");
        design.engines.clear();
        let next = with_hull(&design, hull(2000));
        assert_eq!(next.engines.len(), 3);
        for engine in &next.engines {
            assert_eq!(engine.engine_id, id('K'));
            assert_eq!(engine.performance, 1);
        }
    }

    #[test]
    fn add_engine_rejects_unavailable_id() {
        let design = ShipDesign::new("Scout");
        match add_engine(&design, EngineType::Jump, id('Z')) {
            Err(Error::EngineUnavailable { tonnage, .. }) => assert_eq!(tonnage, 100),
            other => panic!("unexpected result: {:?}", other),
        }
        let next = add_engine(&design, EngineType::Jump, id('B')).unwrap();
        assert_eq!(next.engines.len(), 4);
        assert_eq!(next.engines[3].performance, 4);
    }

    #[test]
    fn removing_best_power_plant_derates_drives() {
        let h = hull(400);
        let mut design = ShipDesign::with_hull("Frigate", h);
        design.engines = vec![
            Engine::new(EngineType::PowerPlant, id('H'), h).unwrap(),
            Engine::new(EngineType::PowerPlant, id('D'), h).unwrap(),
            Engine::new(EngineType::Jump, id('H'), h).unwrap(),
        ];
        assert_eq!(design.engines[0].performance, 4);
        assert_eq!(design.engines[1].performance, 2);
        assert_eq!(design.engines[2].performance, 4);

        let next = remove_engine(&design, 0).unwrap();
        assert_eq!(next.engines.len(), 2);
        let jump = next.engines_of(EngineType::Jump).next().unwrap();
        assert_eq!(jump.performance, 2);
        assert!((jump.mass - 400.0 * 2.0 * 0.02).abs() < 1e-9);
        assert!((jump.cost - 400.0 * 2.0 * 0.02).abs() < 1e-9);
    }

    #[test]
    fn refuses_to_remove_last_power_plant_or_jump_drive() {
        let design = ShipDesign::new("Scout");
        match remove_engine(&design, 0) {
            Err(Error::LastRequiredEngine { engine_type }) => {
                assert_eq!(engine_type, EngineType::PowerPlant)
            }
            other => panic!("unexpected result: {:?}", other),
        }
        match remove_engine(&design, 1) {
            Err(Error::LastRequiredEngine { engine_type }) => {
                assert_eq!(engine_type, EngineType::Jump)
            }
            other => panic!("unexpected result: {:?}", other),
        }
        // Maneuver drives are optional.
        let next = remove_engine(&design, 2).unwrap();
        assert_eq!(next.engines.len(), 2);
    }

    #[test]
    fn remove_engine_checks_index() {
        let design = ShipDesign::new("Scout");
        assert!(matches!(
            remove_engine(&design, 9),
            Err(Error::EngineIndexOutOfRange { index: 9, len: 3 })
        ));
    }

    #[test]
    fn lowering_power_plant_derates_drives() {
        let h = hull(200);
        let mut design = ShipDesign::with_hull("Packet", h);
        design.engines = vec![
            Engine::new(EngineType::PowerPlant, id('D'), h).unwrap(),
            Engine::new(EngineType::Jump, id('D'), h).unwrap(),
        ];
        let next = change_engine_id(&design, 0, id('B')).unwrap();
        assert_eq!(next.engines[0].performance, 2);
        assert_eq!(next.engines[1].performance, 2);
        assert_eq!(next.engines[1].engine_id, id('B'));
    }

    #[test]
    fn singleton_fittings_are_replaced() {
        let design = ShipDesign::new("Scout");
        let design = upsert_fitting(&design, Fitting::Bridge { half: false });
        let design = upsert_fitting(&design, Fitting::Bridge { half: true });
        let design = upsert_fitting(
            &design,
            Fitting::CommsSensors {
                tier: CommsTier::Military,
            },
        );
        let design = upsert_fitting(
            &design,
            Fitting::LaunchTube {
                vehicle: Vehicle::AirRaft,
            },
        );
        let design = upsert_fitting(
            &design,
            Fitting::LaunchTube {
                vehicle: Vehicle::AirRaft,
            },
        );

        let count = |kind| design.fittings.iter().filter(|f| f.kind() == kind).count();
        assert_eq!(count(FittingKind::Bridge), 1);
        assert_eq!(count(FittingKind::CommsSensors), 1);
        assert_eq!(count(FittingKind::LaunchTube), 2);
        assert!(design.fittings.contains(&Fitting::Bridge { half: true }));
        assert!(design.fittings.contains(&Fitting::CommsSensors {
            tier: CommsTier::Military
        }));
    }

    #[test]
    fn zero_quantity_prunes_entry() {
        let design = ShipDesign::new("Gunboat");
        let design = set_quantity(&design, Weapon::PulseLaser, 2);
        let design = set_quantity(&design, Weapon::BeamLaser, 1);
        assert_eq!(design.weapons.len(), 2);

        let design = set_quantity(&design, Weapon::PulseLaser, 0);
        assert_eq!(design.weapons, vec![Item::new(Weapon::BeamLaser, 1)]);
    }

    #[test]
    fn vehicles_respect_tech_level() {
        let design = ShipDesign::new("Carrier");
        assert!(matches!(
            set_vehicle_quantity(&design, Vehicle::GCarrier, 1),
            Err(Error::VehicleUnavailable { .. })
        ));
        let design = with_tech_level(&design, TechLevel::D);
        let design = set_vehicle_quantity(&design, Vehicle::GCarrier, 1).unwrap();
        assert_eq!(design.quantity_of(Vehicle::GCarrier), 1);
    }

    #[test]
    fn reads_after_edit_reflect_new_snapshot() {
        let design = ShipDesign::new("Scout");
        let before = calculate_mass(&design);
        let next = with_fuel_weeks(&design, 8).unwrap();
        let after = calculate_mass(&next);
        // Maneuver fuel: 100 * 2 * 0.01 per extra week.
        assert!((after.used - before.used - 8.0).abs() < 1e-9);
        assert_eq!(calculate_mass(&design), before);
        assert!(with_fuel_weeks(&design, 0).is_err());
    }
}
