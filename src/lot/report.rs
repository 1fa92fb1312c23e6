//! Occupancy reporting

use super::level::Level;
use super::slot::SpotStatus;
use serde::Serialize;
use std::fmt;

/// State of one slot, addressed 1-based
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpotReport {
    pub level: u32,
    pub row: u32,
    pub slot: u32,
    pub status: SpotStatus,
    pub plate: Option<String>,
}

impl SpotReport {
    /// Report every slot of a level in row-major order
    pub fn for_level(level: &Level) -> Vec<SpotReport> {
        let level_no = level.index() as u32 + 1;
        let plates = |row: usize, slot: usize| {
            level
                .vehicle_at(row, slot)
                .ok()
                .flatten()
                .map(|v| v.plate().to_string())
        };

        level
            .rows()
            .iter()
            .enumerate()
            .flat_map(|(row, r)| {
                r.slots().enumerate().map(move |(slot, s)| SpotReport {
                    level: level_no,
                    row: row as u32 + 1,
                    slot: slot as u32 + 1,
                    status: s.status(),
                    plate: plates(row, slot),
                })
            })
            .collect()
    }
}

/// Render the occupancy table
pub(crate) fn write_table(f: &mut fmt::Formatter<'_>, spots: &[SpotReport]) -> fmt::Result {
    writeln!(
        f,
        "****************** Current Parking Lot Status ********************"
    )?;

    let mut current_level = 0;
    for spot in spots {
        if spot.level != current_level {
            current_level = spot.level;
            writeln!(f, "Level: {}: ", spot.level)?;
        }
        writeln!(
            f,
            "Row: {}, Spot: {} - Status: {:<8}, License Plate: {}",
            spot.row,
            spot.slot,
            spot.status.to_string(),
            spot.plate.as_deref().unwrap_or("N/A")
        )?;
    }
    Ok(())
}
