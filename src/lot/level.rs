//! A single parking level

use super::coordinate::SpotIndex;
use super::row::Row;
use super::slot::{PlacementId, SpotStatus};
use crate::error::{Error, Result};
use crate::vehicle::{Vehicle, VehicleIdentity};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// A committed run of slots holding one vehicle
#[derive(Debug, Clone)]
pub struct Placement {
    pub vehicle: Vehicle,
    /// 0-based row within the level
    pub row: usize,
    /// 0-based first slot of the run
    pub start: usize,
}

impl Placement {
    pub fn len(&self) -> usize {
        self.vehicle.footprint() as usize
    }
}

/// A level: `rows` rows of `slots_per_row` slots, fixed at construction
///
/// Slots refer to vehicles through the level's placement table, so a
/// vehicle's footprint and identity live in exactly one place.
#[derive(Debug, Clone)]
pub struct Level {
    /// 0-based position of this level in the lot
    index: usize,
    rows: Vec<Row>,
    placements: BTreeMap<PlacementId, Placement>,
    next_id: u64,
}

impl Level {
    /// Create an empty level
    pub fn new(index: usize, rows: usize, slots_per_row: usize) -> Self {
        Self {
            index,
            rows: (0..rows).map(|_| Row::new(slots_per_row)).collect(),
            placements: BTreeMap::new(),
            next_id: 0,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn slots_per_row(&self) -> usize {
        self.rows.first().map(Row::len).unwrap_or(0)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Park a vehicle in the first row with a long enough free run
    ///
    /// Returns the 0-based (row, slot) of the run start.
    pub fn place(&mut self, vehicle: &Vehicle) -> Option<(usize, usize)> {
        let needed = vehicle.footprint() as usize;
        let (row, start) = self
            .rows
            .iter()
            .enumerate()
            .find_map(|(row, r)| r.find_run(needed).map(|start| (row, start)))?;

        let id = PlacementId(self.next_id);
        self.next_id += 1;

        self.rows[row].occupy(start, needed, id);
        self.placements.insert(
            id,
            Placement {
                vehicle: vehicle.clone(),
                row,
                start,
            },
        );

        debug!(
            level = self.index + 1,
            row = row + 1,
            slot = start + 1,
            footprint = needed,
            plate = %vehicle.plate(),
            "Placed vehicle"
        );
        Some((row, start))
    }

    /// Release the placement that starts at (row, slot)
    ///
    /// Returns `Ok(false)` if the slot is free or is not the first slot of
    /// its placement; nothing is cleared in either case.
    pub fn release_at(&mut self, row: usize, slot: usize) -> Result<bool> {
        let id = match self.slot_occupant(row, slot)? {
            Some(id) => id,
            None => return Ok(false),
        };

        let starts_here = self
            .placements
            .get(&id)
            .map(|p| p.row == row && p.start == slot)
            .unwrap_or(false);
        if !starts_here {
            warn!(
                level = self.index + 1,
                row = row + 1,
                slot = slot + 1,
                "Refusing release: slot is not the start of a placement"
            );
            return Ok(false);
        }

        self.release_placement(id);
        Ok(true)
    }

    /// Release every placement whose vehicle matches `identity`
    ///
    /// Placements are visited in (row, slot) order. Returns how many were
    /// released.
    pub fn release_vehicle(&mut self, identity: &VehicleIdentity) -> usize {
        let mut matching: Vec<(usize, usize, PlacementId)> = self
            .placements
            .iter()
            .filter(|(_, p)| &p.vehicle.identity == identity)
            .map(|(id, p)| (p.row, p.start, *id))
            .collect();
        matching.sort_unstable();

        for (_, _, id) in &matching {
            self.release_placement(*id);
        }
        matching.len()
    }

    fn release_placement(&mut self, id: PlacementId) {
        if let Some(placement) = self.placements.remove(&id) {
            self.rows[placement.row].clear(placement.start, placement.len());
            debug!(
                level = self.index + 1,
                row = placement.row + 1,
                slot = placement.start + 1,
                footprint = placement.len(),
                plate = %placement.vehicle.plate(),
                "Released vehicle"
            );
        }
    }

    /// First placement start of a vehicle matching `identity`
    pub fn find(&self, identity: &VehicleIdentity) -> Option<(usize, usize)> {
        self.placements
            .values()
            .filter(|p| &p.vehicle.identity == identity)
            .map(|p| (p.row, p.start))
            .min()
    }

    /// Vehicle occupying (row, slot), if any
    pub fn vehicle_at(&self, row: usize, slot: usize) -> Result<Option<&Vehicle>> {
        Ok(self
            .slot_occupant(row, slot)?
            .and_then(|id| self.placements.get(&id))
            .map(|p| &p.vehicle))
    }

    pub fn status(&self, row: usize, slot: usize) -> Result<SpotStatus> {
        self.rows
            .get(row)
            .and_then(|r| r.status(slot))
            .ok_or_else(|| self.out_of_range(row, slot))
    }

    pub fn placements(&self) -> impl Iterator<Item = &Placement> {
        self.placements.values()
    }

    pub fn placement_count(&self) -> usize {
        self.placements.len()
    }

    /// Get statistics about this level
    pub fn stats(&self) -> LevelStats {
        let total_slots = self.rows.iter().map(Row::len).sum::<usize>();
        let free_slots = self.rows.iter().map(Row::free_count).sum::<usize>();
        LevelStats {
            level: self.index + 1,
            rows: self.rows.len(),
            slots_per_row: self.slots_per_row(),
            total_slots,
            free_slots,
            occupied_slots: total_slots - free_slots,
            placements: self.placements.len(),
            longest_free_run: self
                .rows
                .iter()
                .map(Row::longest_free_run)
                .max()
                .unwrap_or(0),
        }
    }

    fn slot_occupant(&self, row: usize, slot: usize) -> Result<Option<PlacementId>> {
        self.rows
            .get(row)
            .and_then(|r| r.slot(slot))
            .map(|s| s.occupant())
            .ok_or_else(|| self.out_of_range(row, slot))
    }

    fn out_of_range(&self, row: usize, slot: usize) -> Error {
        SpotIndex::new(self.index, row, slot).out_of_range()
    }
}

/// Statistics for one level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelStats {
    /// 1-based level number
    pub level: usize,
    pub rows: usize,
    pub slots_per_row: usize,
    pub total_slots: usize,
    pub free_slots: usize,
    pub occupied_slots: usize,
    pub placements: usize,
    pub longest_free_run: usize,
}
