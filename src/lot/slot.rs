//! Slot management for the parking grid

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a placement within a level's placement table
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlacementId(pub u64);

impl fmt::Display for PlacementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Placement({})", self.0)
    }
}

/// Occupancy status of a single slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpotStatus {
    Free,
    Occupied,
}

impl fmt::Display for SpotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpotStatus::Free => f.write_str("FREE"),
            SpotStatus::Occupied => f.write_str("OCCUPIED"),
        }
    }
}

/// A slot in a row
///
/// The occupied flag is derived from the occupant, so a slot can never be
/// marked occupied without referencing a placement.
#[derive(Debug, Clone, Default)]
pub struct Slot {
    occupant: Option<PlacementId>,
}

impl Slot {
    /// Create a new free slot
    pub fn new() -> Self {
        Self { occupant: None }
    }

    /// Attach a placement to this slot
    pub fn occupy(&mut self, id: PlacementId) {
        self.occupant = Some(id);
    }

    /// Free this slot
    pub fn free(&mut self) {
        self.occupant = None;
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    pub fn occupant(&self) -> Option<PlacementId> {
        self.occupant
    }

    pub fn status(&self) -> SpotStatus {
        if self.is_occupied() {
            SpotStatus::Occupied
        } else {
            SpotStatus::Free
        }
    }
}
