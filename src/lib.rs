// parkgrid - Multi-level parking spot allocator
// First-fit contiguous allocation over a level × row × slot grid

#![warn(rust_2018_idioms)]

pub mod config;
pub mod lot;
pub mod script;
pub mod vehicle;

// Re-exports for convenience
pub use crate::config::{LevelShape, LotConfig};
pub use crate::lot::{Coordinate, ParkingLot, SharedParkingLot, SpotReport, SpotStatus};
pub use crate::vehicle::{Vehicle, VehicleIdentity, VehicleKind};

/// parkgrid error types
pub mod error {
    use thiserror::Error;

    #[derive(Error, Debug)]
    pub enum Error {
        #[error("No free run of {footprint} slots on any level")]
        AllocationFailed { footprint: u32 },

        #[error("Invalid coordinate: level {level}, row {row}, slot {slot}")]
        InvalidCoordinate { level: u32, row: u32, slot: u32 },

        #[error("Invalid footprint: {0}")]
        InvalidFootprint(u32),

        #[error("Invalid configuration: {0}")]
        InvalidConfig(String),

        #[error("Configuration error: {0}")]
        Config(#[from] ::config::ConfigError),

        #[error("TOML error: {0}")]
        Toml(#[from] toml::de::Error),

        #[error("Serialization error: {0}")]
        Serialization(#[from] serde_json::Error),

        #[error("I/O error: {0}")]
        Io(#[from] std::io::Error),
    }

    pub type Result<T> = std::result::Result<T, Error>;
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_format() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_error_messages() {
        let err = error::Error::InvalidCoordinate {
            level: 3,
            row: 1,
            slot: 2,
        };
        assert_eq!(err.to_string(), "Invalid coordinate: level 3, row 1, slot 2");
    }
}
