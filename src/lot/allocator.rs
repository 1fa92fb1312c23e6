//! Multi-level first-fit allocator

use super::coordinate::{Coordinate, SpotIndex};
use super::level::{Level, LevelStats};
use super::report::SpotReport;
use super::slot::SpotStatus;
use crate::config::LotConfig;
use crate::error::{Error, Result};
use crate::vehicle::{Vehicle, VehicleIdentity};
use serde::Serialize;
use std::fmt;
use tracing::{debug, info};

/// A parking lot made of levels tried in construction order
///
/// Single-threaded; see [`SharedParkingLot`](super::SharedParkingLot) for the
/// per-level locked variant.
#[derive(Debug, Clone)]
pub struct ParkingLot {
    levels: Vec<Level>,
}

impl ParkingLot {
    /// Create a lot from a validated configuration
    pub fn new(config: &LotConfig) -> Result<Self> {
        let levels = build_levels(config)?;

        info!(
            "Initializing parking lot with {} levels: {:?}",
            levels.len(),
            config.levels
        );

        Ok(Self { levels })
    }

    /// Create a lot with the default two-level layout
    pub fn with_defaults() -> Result<Self> {
        Self::new(&LotConfig::default())
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    /// Park a vehicle at the first sufficient run, scanning levels, rows,
    /// then slots
    ///
    /// On failure no slot is touched.
    pub fn park(&mut self, vehicle: &Vehicle) -> Result<Coordinate> {
        check_footprint(vehicle)?;

        for level in &mut self.levels {
            if let Some((row, slot)) = level.place(vehicle) {
                return Ok(SpotIndex::new(level.index(), row, slot).to_coordinate());
            }
        }

        debug!(
            plate = %vehicle.plate(),
            footprint = vehicle.footprint(),
            "No level can fit vehicle"
        );
        Err(Error::AllocationFailed {
            footprint: vehicle.footprint(),
        })
    }

    /// Release the vehicle whose placement starts at `coord`
    pub fn release_at(&mut self, coord: Coordinate) -> Result<bool> {
        let index = coord.to_index()?;
        let level = self
            .levels
            .get_mut(index.level)
            .ok_or_else(|| index.out_of_range())?;
        level.release_at(index.row, index.slot)
    }

    /// Release a vehicle by identity
    ///
    /// Stops at the first level that released anything.
    pub fn release_vehicle(&mut self, identity: &VehicleIdentity) -> bool {
        let released = self
            .levels
            .iter_mut()
            .any(|level| level.release_vehicle(identity) > 0);
        if !released {
            debug!(vehicle = %identity, "Vehicle not found for release");
        }
        released
    }

    /// Coordinate of the first placement of a matching vehicle
    pub fn locate(&self, identity: &VehicleIdentity) -> Option<Coordinate> {
        self.levels.iter().find_map(|level| {
            level
                .find(identity)
                .map(|(row, slot)| SpotIndex::new(level.index(), row, slot).to_coordinate())
        })
    }

    pub fn vehicle_at(&self, coord: Coordinate) -> Result<Option<&Vehicle>> {
        let index = coord.to_index()?;
        self.level(index)?.vehicle_at(index.row, index.slot)
    }

    pub fn status(&self, coord: Coordinate) -> Result<SpotStatus> {
        let index = coord.to_index()?;
        self.level(index)?.status(index.row, index.slot)
    }

    /// Per-slot occupancy dump in scan order
    pub fn occupancy(&self) -> Vec<SpotReport> {
        self.levels.iter().flat_map(SpotReport::for_level).collect()
    }

    /// Get statistics about the lot
    pub fn stats(&self) -> LotStats {
        LotStats::from_levels(self.levels.iter().map(Level::stats))
    }

    fn level(&self, index: SpotIndex) -> Result<&Level> {
        self.levels
            .get(index.level)
            .ok_or_else(|| index.out_of_range())
    }
}

/// Validate `config` and build its empty levels in order
pub(crate) fn build_levels(config: &LotConfig) -> Result<Vec<Level>> {
    config.validate()?;
    Ok(config
        .levels
        .iter()
        .enumerate()
        .map(|(index, shape)| Level::new(index, shape.rows, shape.slots_per_row))
        .collect())
}

pub(crate) fn check_footprint(vehicle: &Vehicle) -> Result<()> {
    if vehicle.footprint() == 0 {
        return Err(Error::InvalidFootprint(vehicle.footprint()));
    }
    Ok(())
}

impl fmt::Display for ParkingLot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        super::report::write_table(f, &self.occupancy())
    }
}

/// Statistics for the whole lot
#[derive(Debug, Default, Clone, Serialize)]
pub struct LotStats {
    pub levels: Vec<LevelStats>,
    pub total_slots: usize,
    pub free_slots: usize,
    pub placements: usize,
}

impl LotStats {
    pub fn from_levels(levels: impl IntoIterator<Item = LevelStats>) -> Self {
        let mut stats = LotStats::default();
        for level in levels {
            stats.total_slots += level.total_slots;
            stats.free_slots += level.free_slots;
            stats.placements += level.placements;
            stats.levels.push(level);
        }
        stats
    }

    pub fn occupied_slots(&self) -> usize {
        self.total_slots - self.free_slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LevelShape;
    use crate::vehicle::VehicleKind;

    fn lot(shapes: &[(usize, usize)]) -> ParkingLot {
        let config = LotConfig {
            levels: shapes
                .iter()
                .map(|&(rows, slots_per_row)| LevelShape { rows, slots_per_row })
                .collect(),
        };
        ParkingLot::new(&config).unwrap()
    }

    #[test]
    fn test_single_row_scenario() -> Result<()> {
        let mut lot = lot(&[(1, 6)]);

        assert_eq!(lot.park(&Vehicle::bus("B1", "Tata", "Toyota"))?, Coordinate::new(1, 1, 1));
        assert_eq!(
            lot.park(&Vehicle::compact("C1", "IS250", "Lexus"))?,
            Coordinate::new(1, 1, 6)
        );

        let third = lot.park(&Vehicle::compact("C2", "IS250", "Lexus"));
        assert!(matches!(third, Err(Error::AllocationFailed { footprint: 1 })));
        assert_eq!(Coordinate::triple_or_sentinel(&third), (-1, -1, -1));
        Ok(())
    }

    #[test]
    fn test_levels_tried_in_order() -> Result<()> {
        let mut lot = lot(&[(1, 4), (1, 6)]);

        // Too long for level 1, fits level 2
        assert_eq!(lot.park(&Vehicle::bus("B1", "Tata", "Toyota"))?, Coordinate::new(2, 1, 1));
        // Short vehicles still go to level 1 first
        assert_eq!(
            lot.park(&Vehicle::motorcycle("M1", "AX500", "Honda"))?,
            Coordinate::new(1, 1, 1)
        );
        Ok(())
    }

    #[test]
    fn test_zero_footprint_rejected() {
        let mut lot = lot(&[(1, 6)]);
        let vehicle = Vehicle::with_footprint(
            VehicleKind::Compact,
            VehicleIdentity::new("Z", "Z", "Z"),
            0,
        );

        assert!(matches!(lot.park(&vehicle), Err(Error::InvalidFootprint(0))));
    }

    #[test]
    fn test_release_at_validates_level() {
        let mut lot = lot(&[(1, 6)]);

        assert!(matches!(
            lot.release_at(Coordinate::new(2, 1, 1)),
            Err(Error::InvalidCoordinate { level: 2, row: 1, slot: 1 })
        ));
        assert!(matches!(
            lot.status(Coordinate::new(0, 1, 1)),
            Err(Error::InvalidCoordinate { .. })
        ));
    }

    #[test]
    fn test_release_vehicle_stops_at_first_level() -> Result<()> {
        let mut lot = lot(&[(1, 1), (1, 1)]);
        let moto = Vehicle::motorcycle("CA21AB1", "AX500", "Honda");
        lot.park(&moto)?;
        lot.park(&moto)?;

        assert!(lot.release_vehicle(&moto.identity));
        assert_eq!(lot.status(Coordinate::new(1, 1, 1))?, SpotStatus::Free);
        assert_eq!(lot.status(Coordinate::new(2, 1, 1))?, SpotStatus::Occupied);
        assert_eq!(lot.locate(&moto.identity), Some(Coordinate::new(2, 1, 1)));
        Ok(())
    }

    #[test]
    fn test_oversized_config_is_an_error() {
        let config = LotConfig {
            levels: vec![LevelShape {
                rows: 1,
                slots_per_row: usize::MAX / 2,
            }],
        };

        assert!(matches!(ParkingLot::new(&config), Err(Error::InvalidConfig(_))));
        assert!(matches!(
            crate::lot::SharedParkingLot::new(&config),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_stats() -> Result<()> {
        let mut lot = lot(&[(2, 6), (2, 6)]);
        lot.park(&Vehicle::bus("B1", "Tata", "Toyota"))?;
        lot.park(&Vehicle::compact("C1", "IS250", "Lexus"))?;

        let stats = lot.stats();
        assert_eq!(stats.levels.len(), 2);
        assert_eq!(stats.total_slots, 24);
        assert_eq!(stats.occupied_slots(), 6);
        assert_eq!(stats.placements, 2);
        Ok(())
    }
}
