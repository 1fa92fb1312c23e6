//! Spot addressing
//!
//! `Coordinate` is the 1-based (level, row, slot) triple handed to callers.
//! `SpotIndex` is the 0-based form used inside the grid. Conversion between
//! the two only happens here.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Triple reported to callers when a vehicle could not be parked
pub const SENTINEL: (i64, i64, i64) = (-1, -1, -1);

/// 1-based spot address
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub level: u32,
    pub row: u32,
    pub slot: u32,
}

impl Coordinate {
    pub fn new(level: u32, row: u32, slot: u32) -> Self {
        Self { level, row, slot }
    }

    /// Convert to a 0-based index
    ///
    /// Fails for a zero component; upper bounds are checked by the grid.
    pub fn to_index(self) -> Result<SpotIndex> {
        if self.level == 0 || self.row == 0 || self.slot == 0 {
            return Err(Error::InvalidCoordinate {
                level: self.level,
                row: self.row,
                slot: self.slot,
            });
        }
        Ok(SpotIndex {
            level: (self.level - 1) as usize,
            row: (self.row - 1) as usize,
            slot: (self.slot - 1) as usize,
        })
    }

    pub fn as_triple(self) -> (i64, i64, i64) {
        (self.level as i64, self.row as i64, self.slot as i64)
    }

    /// Map a park result onto the external triple, using the sentinel on failure
    pub fn triple_or_sentinel(result: &Result<Coordinate>) -> (i64, i64, i64) {
        match result {
            Ok(coord) => coord.as_triple(),
            Err(_) => SENTINEL,
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "level {} row {} slot {}", self.level, self.row, self.slot)
    }
}

/// 0-based spot address
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpotIndex {
    pub level: usize,
    pub row: usize,
    pub slot: usize,
}

impl SpotIndex {
    pub fn new(level: usize, row: usize, slot: usize) -> Self {
        Self { level, row, slot }
    }

    pub fn to_coordinate(self) -> Coordinate {
        Coordinate {
            level: self.level as u32 + 1,
            row: self.row as u32 + 1,
            slot: self.slot as u32 + 1,
        }
    }

    /// The error reported when this index falls outside the grid
    pub fn out_of_range(self) -> Error {
        let coord = self.to_coordinate();
        Error::InvalidCoordinate {
            level: coord.level,
            row: coord.row,
            slot: coord.slot,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_conversion() -> Result<()> {
        let coord = Coordinate::new(2, 1, 6);
        let index = coord.to_index()?;

        assert_eq!(index, SpotIndex::new(1, 0, 5));
        assert_eq!(index.to_coordinate(), coord);
        Ok(())
    }

    #[test]
    fn test_zero_component_rejected() {
        assert!(matches!(
            Coordinate::new(1, 0, 3).to_index(),
            Err(Error::InvalidCoordinate { level: 1, row: 0, slot: 3 })
        ));
    }

    #[test]
    fn test_triple_or_sentinel() {
        let ok: Result<Coordinate> = Ok(Coordinate::new(1, 2, 3));
        let failed: Result<Coordinate> = Err(Error::AllocationFailed { footprint: 5 });

        assert_eq!(Coordinate::triple_or_sentinel(&ok), (1, 2, 3));
        assert_eq!(Coordinate::triple_or_sentinel(&failed), SENTINEL);
    }
}
