//! Parking grid
//!
//! First-fit contiguous allocation over a three-level grid.
//!
//! # Architecture
//!
//! ```text
//! ParkingLot
//!   ├─→ Level 1 (2 rows × 6)
//!   │     ├─→ Row 1: [B1 B1 B1 B1 B1 M1]
//!   │     └─→ Row 2: [__ __ __ __ __ __]
//!   │     Placements: {0 → B1 @ (1,1), 1 → M1 @ (1,6)}
//!   └─→ Level 2 (2 rows × 6)
//!         ├─→ Row 1: [__ __ __ __ __ __]
//!         └─→ Row 2: [__ __ __ __ __ __]
//! ```
//!
//! A vehicle needing F slots goes to the first row (levels, then rows, in
//! construction order) holding F consecutive free slots, at the start of the
//! first such run. Slots hold a placement id; the level's placement table
//! holds the vehicle.

pub mod allocator;
pub mod coordinate;
pub mod level;
pub mod report;
pub mod row;
pub mod shared;
pub mod slot;

pub use allocator::{LotStats, ParkingLot};
pub use coordinate::{Coordinate, SpotIndex, SENTINEL};
pub use level::{Level, LevelStats, Placement};
pub use report::SpotReport;
pub use row::Row;
pub use shared::SharedParkingLot;
pub use slot::{PlacementId, Slot, SpotStatus};
