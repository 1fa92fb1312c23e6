//! Thread-safe parking lot with per-level locking
//!
//! Each level sits behind its own mutex, so search and commit of a placement
//! happen under one lock. Operations on different levels never contend.

use super::allocator::{build_levels, check_footprint, LotStats};
use super::coordinate::{Coordinate, SpotIndex};
use super::level::Level;
use super::report::SpotReport;
use super::slot::SpotStatus;
use crate::config::LotConfig;
use crate::error::{Error, Result};
use crate::vehicle::{Vehicle, VehicleIdentity};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// Parking lot shareable between threads
#[derive(Debug, Clone)]
pub struct SharedParkingLot {
    levels: Arc<[Mutex<Level>]>,
}

impl SharedParkingLot {
    pub fn new(config: &LotConfig) -> Result<Self> {
        let levels = build_levels(config)?
            .into_iter()
            .map(Mutex::new)
            .collect::<Vec<_>>();

        info!("Initializing shared parking lot with {} levels", levels.len());
        Ok(Self {
            levels: levels.into(),
        })
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Park a vehicle, locking one level at a time in construction order
    pub fn park(&self, vehicle: &Vehicle) -> Result<Coordinate> {
        check_footprint(vehicle)?;

        for (index, level) in self.levels.iter().enumerate() {
            if let Some((row, slot)) = level.lock().place(vehicle) {
                return Ok(SpotIndex::new(index, row, slot).to_coordinate());
            }
        }

        debug!(plate = %vehicle.plate(), "No level can fit vehicle");
        Err(Error::AllocationFailed {
            footprint: vehicle.footprint(),
        })
    }

    pub fn release_at(&self, coord: Coordinate) -> Result<bool> {
        let index = coord.to_index()?;
        self.level(index)?.lock().release_at(index.row, index.slot)
    }

    /// Release a vehicle by identity, stopping at the first level that had it
    pub fn release_vehicle(&self, identity: &VehicleIdentity) -> bool {
        self.levels
            .iter()
            .any(|level| level.lock().release_vehicle(identity) > 0)
    }

    pub fn locate(&self, identity: &VehicleIdentity) -> Option<Coordinate> {
        self.levels.iter().enumerate().find_map(|(index, level)| {
            level
                .lock()
                .find(identity)
                .map(|(row, slot)| SpotIndex::new(index, row, slot).to_coordinate())
        })
    }

    /// Copy of the vehicle at `coord`; the level lock is not held on return
    pub fn vehicle_at(&self, coord: Coordinate) -> Result<Option<Vehicle>> {
        let index = coord.to_index()?;
        let level = self.level(index)?.lock();
        let vehicle = level.vehicle_at(index.row, index.slot)?.cloned();
        Ok(vehicle)
    }

    pub fn status(&self, coord: Coordinate) -> Result<SpotStatus> {
        let index = coord.to_index()?;
        self.level(index)?.lock().status(index.row, index.slot)
    }

    /// Occupancy dump; each level is a consistent snapshot on its own
    pub fn occupancy(&self) -> Vec<SpotReport> {
        self.levels
            .iter()
            .flat_map(|level| SpotReport::for_level(&level.lock()))
            .collect()
    }

    pub fn stats(&self) -> LotStats {
        LotStats::from_levels(self.levels.iter().map(|level| level.lock().stats()))
    }

    fn level(&self, index: SpotIndex) -> Result<&Mutex<Level>> {
        self.levels
            .get(index.level)
            .ok_or_else(|| index.out_of_range())
    }
}

impl fmt::Display for SharedParkingLot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        super::report::write_table(f, &self.occupancy())
    }
}
