//! Vehicle model
//!
//! Vehicles are handed to the lot by the caller. The lot only ever reads a
//! vehicle's footprint and identity.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Vehicle category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleKind {
    Compact,
    Motorcycle,
    Bus,
}

impl VehicleKind {
    /// Number of contiguous slots a vehicle of this kind needs
    pub fn footprint(self) -> u32 {
        match self {
            VehicleKind::Compact => 1,
            VehicleKind::Motorcycle => 1,
            VehicleKind::Bus => 5,
        }
    }
}

impl fmt::Display for VehicleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VehicleKind::Compact => f.write_str("compact"),
            VehicleKind::Motorcycle => f.write_str("motorcycle"),
            VehicleKind::Bus => f.write_str("bus"),
        }
    }
}

/// Value identity of a vehicle: equality is field-wise
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VehicleIdentity {
    pub plate: String,
    pub model: String,
    pub make: String,
}

impl VehicleIdentity {
    pub fn new(plate: impl Into<String>, model: impl Into<String>, make: impl Into<String>) -> Self {
        Self {
            plate: plate.into(),
            model: model.into(),
            make: make.into(),
        }
    }
}

impl fmt::Display for VehicleIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} {})", self.plate, self.make, self.model)
    }
}

/// A vehicle to be parked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub kind: VehicleKind,
    pub identity: VehicleIdentity,
    footprint: u32,
}

impl Vehicle {
    /// Create a vehicle whose footprint follows from its kind
    pub fn new(kind: VehicleKind, identity: VehicleIdentity) -> Self {
        Self {
            kind,
            footprint: kind.footprint(),
            identity,
        }
    }

    /// Create a vehicle with an explicit footprint
    ///
    /// A zero footprint is accepted here and rejected when parking.
    pub fn with_footprint(kind: VehicleKind, identity: VehicleIdentity, footprint: u32) -> Self {
        Self {
            kind,
            identity,
            footprint,
        }
    }

    pub fn compact(plate: &str, model: &str, make: &str) -> Self {
        Self::new(VehicleKind::Compact, VehicleIdentity::new(plate, model, make))
    }

    pub fn motorcycle(plate: &str, model: &str, make: &str) -> Self {
        Self::new(VehicleKind::Motorcycle, VehicleIdentity::new(plate, model, make))
    }

    pub fn bus(plate: &str, model: &str, make: &str) -> Self {
        Self::new(VehicleKind::Bus, VehicleIdentity::new(plate, model, make))
    }

    pub fn footprint(&self) -> u32 {
        self.footprint
    }

    pub fn plate(&self) -> &str {
        &self.identity.plate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_footprints() {
        assert_eq!(VehicleKind::Compact.footprint(), 1);
        assert_eq!(VehicleKind::Motorcycle.footprint(), 1);
        assert_eq!(VehicleKind::Bus.footprint(), 5);
        assert_eq!(Vehicle::bus("171AZ23", "Tata", "Toyota").footprint(), 5);
    }

    #[test]
    fn test_identity_equality_is_field_wise() {
        let a = VehicleIdentity::new("AZM2323", "Pilot", "Honda");
        let b = VehicleIdentity::new("AZM2323", "Pilot", "Honda");
        let c = VehicleIdentity::new("AZM2323", "Civic", "Honda");

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_kind_serde_names() {
        let kind: VehicleKind = serde_json::from_str("\"motorcycle\"").unwrap();
        assert_eq!(kind, VehicleKind::Motorcycle);
        assert_eq!(serde_json::to_string(&VehicleKind::Bus).unwrap(), "\"bus\"");
    }
}
