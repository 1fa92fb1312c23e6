//! End-to-end allocation scenarios against the public API

use parkgrid::error::{Error, Result};
use parkgrid::{Coordinate, LevelShape, LotConfig, ParkingLot, SpotStatus, Vehicle};
use parkgrid::{VehicleIdentity, VehicleKind};

fn lot(shapes: &[(usize, usize)]) -> ParkingLot {
    let config = LotConfig {
        levels: shapes
            .iter()
            .map(|&(rows, slots_per_row)| LevelShape { rows, slots_per_row })
            .collect(),
    };
    ParkingLot::new(&config).expect("Failed to build lot")
}

fn sized(plate: &str, footprint: u32) -> Vehicle {
    Vehicle::with_footprint(
        VehicleKind::Bus,
        VehicleIdentity::new(plate, "Model", "Make"),
        footprint,
    )
}

fn statuses(lot: &ParkingLot) -> Vec<SpotStatus> {
    lot.occupancy().into_iter().map(|s| s.status).collect()
}

#[test]
fn test_single_row_fills_then_fails() -> Result<()> {
    let mut lot = lot(&[(1, 6)]);

    assert_eq!(lot.park(&sized("BUS", 5))?, Coordinate::new(1, 1, 1));
    assert_eq!(lot.park(&sized("CAR1", 1))?, Coordinate::new(1, 1, 6));

    let before = statuses(&lot);
    let failed = lot.park(&sized("CAR2", 1));
    assert_eq!(Coordinate::triple_or_sentinel(&failed), (-1, -1, -1));
    assert!(matches!(failed, Err(Error::AllocationFailed { footprint: 1 })));
    assert_eq!(statuses(&lot), before);
    Ok(())
}

#[test]
fn test_three_buses_and_release_by_identity() -> Result<()> {
    let mut lot = lot(&[(2, 6), (2, 6)]);
    let bus1 = Vehicle::bus("171AZ23", "Tata", "Toyota");
    let bus2 = Vehicle::bus("AZM2323", "Pilot", "Honda");
    let bus3 = Vehicle::bus("QVM2111", "Pilot", "Honda");

    assert_eq!(lot.park(&bus1)?, Coordinate::new(1, 1, 1));
    assert_eq!(lot.park(&bus2)?, Coordinate::new(1, 2, 1));
    assert_eq!(lot.park(&bus3)?, Coordinate::new(2, 1, 1));

    assert!(lot.release_vehicle(&bus2.identity));
    for slot in 1..=6 {
        assert_eq!(lot.status(Coordinate::new(1, 2, slot))?, SpotStatus::Free);
    }

    // The other buses are untouched
    for slot in 1..=5 {
        assert_eq!(lot.vehicle_at(Coordinate::new(1, 1, slot))?, Some(&bus1));
        assert_eq!(lot.vehicle_at(Coordinate::new(2, 1, slot))?, Some(&bus3));
    }
    assert!(!lot.release_vehicle(&bus2.identity));
    Ok(())
}

#[test]
fn test_first_fit_position_for_every_footprint() -> Result<()> {
    for footprint in 1..=6 {
        let mut lot = lot(&[(2, 6), (1, 8)]);
        assert_eq!(
            lot.park(&sized("V", footprint))?,
            Coordinate::new(1, 1, 1),
            "footprint {}",
            footprint
        );
    }

    // Only the 8-wide level can take 7 or 8
    let mut lot = lot(&[(2, 6), (1, 8)]);
    assert_eq!(lot.park(&sized("LONG", 7))?, Coordinate::new(2, 1, 1));
    Ok(())
}

#[test]
fn test_park_marks_exactly_its_run() -> Result<()> {
    let mut lot = lot(&[(2, 6)]);
    lot.park(&sized("A", 2))?;
    let coord = lot.park(&sized("B", 3))?;
    assert_eq!(coord, Coordinate::new(1, 1, 3));

    let occupied: Vec<_> = lot
        .occupancy()
        .into_iter()
        .filter(|s| s.status == SpotStatus::Occupied)
        .map(|s| (s.row, s.slot, s.plate.unwrap_or_default()))
        .collect();
    assert_eq!(
        occupied,
        vec![
            (1, 1, "A".to_string()),
            (1, 2, "A".to_string()),
            (1, 3, "B".to_string()),
            (1, 4, "B".to_string()),
            (1, 5, "B".to_string()),
        ]
    );
    Ok(())
}

#[test]
fn test_park_then_release_restores_occupancy() -> Result<()> {
    let mut lot = lot(&[(2, 6), (2, 6)]);
    lot.park(&Vehicle::compact("WM7AZ89", "IS250", "Lexus"))?;
    lot.park(&sized("MID", 4))?;

    let before = statuses(&lot);
    let coord = lot.park(&Vehicle::bus("171AZ23", "Tata", "Toyota"))?;
    assert_ne!(statuses(&lot), before);

    assert!(lot.release_at(coord)?);
    assert_eq!(statuses(&lot), before);
    Ok(())
}

#[test]
fn test_release_mid_run_leaves_grid_unchanged() -> Result<()> {
    let mut lot = lot(&[(1, 6)]);
    lot.park(&sized("A", 3))?;
    lot.park(&sized("B", 3))?;

    let before = statuses(&lot);
    assert!(!lot.release_at(Coordinate::new(1, 1, 2))?);
    assert_eq!(statuses(&lot), before);

    assert!(!lot.release_at(Coordinate::new(1, 1, 5))?);
    assert!(lot.release_at(Coordinate::new(1, 1, 4))?);
    assert_eq!(lot.status(Coordinate::new(1, 1, 3))?, SpotStatus::Occupied);
    assert_eq!(lot.status(Coordinate::new(1, 1, 4))?, SpotStatus::Free);
    Ok(())
}

#[test]
fn test_release_free_slot_fails() -> Result<()> {
    let mut lot = lot(&[(1, 6)]);
    assert!(!lot.release_at(Coordinate::new(1, 1, 1))?);
    Ok(())
}

#[test]
fn test_out_of_range_coordinates() {
    let mut lot = lot(&[(2, 6)]);

    for coord in [
        Coordinate::new(2, 1, 1),
        Coordinate::new(1, 3, 1),
        Coordinate::new(1, 1, 7),
        Coordinate::new(0, 1, 1),
    ] {
        assert!(
            matches!(lot.release_at(coord), Err(Error::InvalidCoordinate { .. })),
            "{}",
            coord
        );
        assert!(matches!(lot.status(coord), Err(Error::InvalidCoordinate { .. })));
        assert!(matches!(lot.vehicle_at(coord), Err(Error::InvalidCoordinate { .. })));
    }
}

#[test]
fn test_freed_gap_is_reused_first() -> Result<()> {
    let mut lot = lot(&[(1, 6)]);
    lot.park(&sized("A", 2))?;
    lot.park(&sized("B", 2))?;
    lot.park(&sized("C", 2))?;

    assert!(lot.release_vehicle(&VehicleIdentity::new("B", "Model", "Make")));
    assert_eq!(lot.park(&sized("D", 1))?, Coordinate::new(1, 1, 3));
    assert_eq!(lot.park(&sized("E", 1))?, Coordinate::new(1, 1, 4));
    assert!(lot.park(&sized("F", 1)).is_err());
    Ok(())
}

#[test]
fn test_occupancy_table_format() -> Result<()> {
    let mut lot = lot(&[(1, 2)]);
    lot.park(&Vehicle::motorcycle("CA21AB1", "AX500", "Honda"))?;

    let table = lot.to_string();
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(
        lines,
        vec![
            "****************** Current Parking Lot Status ********************",
            "Level: 1: ",
            "Row: 1, Spot: 1 - Status: OCCUPIED, License Plate: CA21AB1",
            "Row: 1, Spot: 2 - Status: FREE    , License Plate: N/A",
        ]
    );
    Ok(())
}
