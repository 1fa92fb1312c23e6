//! Lot configuration
//!
//! Layered with the `config` crate: built-in defaults, then an optional TOML
//! file, then `PARKGRID_*` environment variables. In the environment the
//! level list is written compactly, `PARKGRID_LEVELS="2x6,3x10"`.
//!
//! ```toml
//! [[levels]]
//! rows = 2
//! slots_per_row = 6
//!
//! [[levels]]
//! rows = 3
//! slots_per_row = 10
//! ```

use crate::error::{Error, Result};
use ::config::{Config, Environment, File, FileFormat, Map};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Upper bound on the number of slots in one lot
pub const MAX_TOTAL_SLOTS: usize = 1 << 24;

/// Shape of one level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelShape {
    pub rows: usize,
    pub slots_per_row: usize,
}

impl FromStr for LevelShape {
    type Err = Error;

    /// Parse `ROWSxSLOTS`, e.g. `2x6`
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidConfig(format!("Invalid level shape '{}', expected ROWSxSLOTS", s));
        let (rows, slots) = s.trim().split_once(['x', 'X']).ok_or_else(invalid)?;
        Ok(Self {
            rows: rows.trim().parse().map_err(|_| invalid())?,
            slots_per_row: slots.trim().parse().map_err(|_| invalid())?,
        })
    }
}

impl fmt::Display for LevelShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.slots_per_row)
    }
}

/// Accepts either a list of tables or a `2x6,3x10` string
fn deserialize_levels<'de, D>(deserializer: D) -> std::result::Result<Vec<LevelShape>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Levels {
        List(Vec<LevelShape>),
        Compact(String),
    }

    match Levels::deserialize(deserializer)? {
        Levels::List(levels) => Ok(levels),
        Levels::Compact(s) if s.trim().is_empty() => Ok(Vec::new()),
        Levels::Compact(s) => s
            .split(',')
            .map(LevelShape::from_str)
            .collect::<Result<Vec<_>>>()
            .map_err(serde::de::Error::custom),
    }
}

/// Ordered level shapes; level 1 is tried first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LotConfig {
    #[serde(deserialize_with = "deserialize_levels")]
    pub levels: Vec<LevelShape>,
}

impl Default for LotConfig {
    fn default() -> Self {
        Self {
            levels: vec![
                LevelShape {
                    rows: 2,
                    slots_per_row: 6,
                },
                LevelShape {
                    rows: 2,
                    slots_per_row: 6,
                },
            ],
        }
    }
}

impl LotConfig {
    /// Load configuration from defaults, an optional file, and the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    /// Like [`LotConfig::load`], reading `PARKGRID_*` variables from `env`
    /// instead of the process environment when given
    pub fn load_with_env(path: Option<&Path>, env: Option<Map<String, String>>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml));
        }
        builder = builder.add_source(
            Environment::with_prefix("PARKGRID")
                .prefix_separator("_")
                .source(env),
        );

        // Missing `levels` falls back to the default layout
        let config: LotConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML document
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: LotConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.levels.is_empty() {
            return Err(Error::InvalidConfig(
                "At least one level is required".to_string(),
            ));
        }
        if self.levels.len() > u32::MAX as usize {
            return Err(Error::InvalidConfig(format!(
                "Too many levels: {}",
                self.levels.len()
            )));
        }
        for (i, shape) in self.levels.iter().enumerate() {
            if shape.rows == 0 || shape.slots_per_row == 0 {
                return Err(Error::InvalidConfig(format!(
                    "Level {} must have at least one row and one slot per row (got {})",
                    i + 1,
                    shape
                )));
            }
            // Coordinates are reported as u32
            if shape.rows > u32::MAX as usize || shape.slots_per_row > u32::MAX as usize {
                return Err(Error::InvalidConfig(format!(
                    "Level {} is too large to address (got {})",
                    i + 1,
                    shape
                )));
            }
        }

        match self.checked_total_slots() {
            Some(total) if total <= MAX_TOTAL_SLOTS => Ok(()),
            _ => Err(Error::InvalidConfig(format!(
                "Lot exceeds {} slots",
                MAX_TOTAL_SLOTS
            ))),
        }
    }

    /// Total slot count, saturating on overflow
    pub fn total_slots(&self) -> usize {
        self.checked_total_slots().unwrap_or(usize::MAX)
    }

    fn checked_total_slots(&self) -> Option<usize> {
        self.levels.iter().try_fold(0usize, |total, shape| {
            shape
                .rows
                .checked_mul(shape.slots_per_row)
                .and_then(|slots| total.checked_add(slots))
        })
    }
}
