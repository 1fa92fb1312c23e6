//! Scripted park/leave operations
//!
//! A script is a JSON array of operations replayed against a lot:
//!
//! ```json
//! [
//!   {"op": "park", "kind": "bus", "plate": "171AZ23", "model": "Tata", "make": "Toyota"},
//!   {"op": "leave", "plate": "171AZ23", "model": "Tata", "make": "Toyota"},
//!   {"op": "leave_at", "level": 1, "row": 1, "slot": 6},
//!   {"op": "show"}
//! ]
//! ```

use crate::error::Result;
use crate::lot::{Coordinate, ParkingLot};
use crate::vehicle::{Vehicle, VehicleIdentity, VehicleKind};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// A single scripted operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    Park {
        kind: VehicleKind,
        #[serde(flatten)]
        identity: VehicleIdentity,
        /// Overrides the kind's footprint
        #[serde(default, skip_serializing_if = "Option::is_none")]
        footprint: Option<u32>,
    },
    Leave {
        #[serde(flatten)]
        identity: VehicleIdentity,
    },
    LeaveAt {
        level: u32,
        row: u32,
        slot: u32,
    },
    Show,
}

/// Result of one operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepOutcome {
    /// 1-based position in the script
    pub step: usize,
    pub success: bool,
    /// Triple reported for `park`; the sentinel on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinate: Option<(i64, i64, i64)>,
    pub message: String,
}

/// An ordered list of operations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Script {
    pub operations: Vec<Operation>,
}

impl Script {
    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Replay every operation; a failed step never stops the script
    ///
    /// `show` steps call `on_show` with the lot as it stands.
    pub fn run(&self, lot: &mut ParkingLot, mut on_show: impl FnMut(&ParkingLot)) -> Vec<StepOutcome> {
        info!("Replaying {} operations", self.operations.len());

        self.operations
            .iter()
            .enumerate()
            .map(|(i, op)| {
                let outcome = apply(lot, i + 1, op, &mut on_show);
                debug!(step = outcome.step, success = outcome.success, "{}", outcome.message);
                outcome
            })
            .collect()
    }
}

fn apply(
    lot: &mut ParkingLot,
    step: usize,
    op: &Operation,
    on_show: &mut impl FnMut(&ParkingLot),
) -> StepOutcome {
    match op {
        Operation::Park {
            kind,
            identity,
            footprint,
        } => {
            let vehicle = match footprint {
                Some(f) => Vehicle::with_footprint(*kind, identity.clone(), *f),
                None => Vehicle::new(*kind, identity.clone()),
            };
            let result = lot.park(&vehicle);
            let message = match &result {
                Ok(coord) => format!("Vehicle: {} was parked at {}", identity.plate, coord),
                Err(e) => format!("Vehicle: {} could not be parked: {}", identity.plate, e),
            };
            StepOutcome {
                step,
                success: result.is_ok(),
                coordinate: Some(Coordinate::triple_or_sentinel(&result)),
                message,
            }
        }
        Operation::Leave { identity } => {
            let success = lot.release_vehicle(identity);
            StepOutcome {
                step,
                success,
                coordinate: None,
                message: format!(
                    "Removing vehicle: {} {}",
                    identity.plate,
                    if success { "succeeded" } else { "failed" }
                ),
            }
        }
        Operation::LeaveAt { level, row, slot } => {
            let coord = Coordinate::new(*level, *row, *slot);
            let (success, detail) = match lot.release_at(coord) {
                Ok(true) => (true, "succeeded".to_string()),
                Ok(false) => (false, "failed".to_string()),
                Err(e) => (false, format!("failed: {}", e)),
            };
            StepOutcome {
                step,
                success,
                coordinate: Some(coord.as_triple()),
                message: format!("Removing vehicle at {} {}", coord, detail),
            }
        }
        Operation::Show => {
            on_show(lot);
            let stats = lot.stats();
            StepOutcome {
                step,
                success: true,
                coordinate: None,
                message: format!(
                    "{} of {} slots occupied by {} vehicles",
                    stats.occupied_slots(),
                    stats.total_slots,
                    stats.placements
                ),
            }
        }
    }
}
