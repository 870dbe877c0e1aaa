use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_ANIMATION_SPEED, DEFAULT_CONVEYOR_LENGTH, DEFAULT_CONVEYOR_SPEED, DEFAULT_INPUT_RATE,
    DEFAULT_NUM_TOTES, DEFAULT_PACKER_COUNT, DEFAULT_SLOW_TABLES, DEFAULT_TOTE_LENGTH,
    MAX_CONVEYOR_CELLS,
};
use crate::error::{ModelError, Result, require_positive};

/// The full parameter set of a packing line.
///
/// Every KPI, projection point and animation frame is a pure function of
/// these eight values. Missing fields deserialize to the line defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Parameters {
    /// Totes arriving per hour.
    pub input_rate: f64,
    /// Total packing tables, fast and slow.
    pub packer_count: u32,
    /// Tables running at the reduced rate.
    pub slow_tables: u32,
    /// Belt length in meters.
    pub conveyor_length: f64,
    /// Belt speed in m/s. Not used by any formula yet.
    pub conveyor_speed: f64,
    /// Length of one tote in meters.
    pub tote_length: f64,
    /// Host pause between animation frames, in seconds.
    pub animation_speed: f64,
    /// Totes sent down the belt in the animation.
    pub num_totes: u32,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            input_rate: DEFAULT_INPUT_RATE,
            packer_count: DEFAULT_PACKER_COUNT,
            slow_tables: DEFAULT_SLOW_TABLES,
            conveyor_length: DEFAULT_CONVEYOR_LENGTH,
            conveyor_speed: DEFAULT_CONVEYOR_SPEED,
            tote_length: DEFAULT_TOTE_LENGTH,
            animation_speed: DEFAULT_ANIMATION_SPEED,
            num_totes: DEFAULT_NUM_TOTES,
        }
    }
}

impl Parameters {
    /// Check every parameter against its valid range.
    ///
    /// Fails on the first violation, in declaration order.
    pub fn validate(&self) -> Result<()> {
        require_positive("input_rate", self.input_rate)?;
        if self.packer_count < 1 {
            return Err(ModelError::invalid("packer_count", "must be at least 1"));
        }
        check_table_split(self.packer_count, self.slow_tables)?;
        require_positive("conveyor_length", self.conveyor_length)?;
        require_positive("conveyor_speed", self.conveyor_speed)?;
        require_positive("tote_length", self.tote_length)?;
        require_positive("animation_speed", self.animation_speed)?;
        if self.num_totes < 1 {
            return Err(ModelError::invalid("num_totes", "must be at least 1"));
        }
        Ok(())
    }

    pub fn fast_tables(&self) -> u32 {
        self.packer_count.saturating_sub(self.slow_tables)
    }

    /// Number of tote-length cells on the belt.
    pub fn conveyor_cells(&self) -> Result<usize> {
        conveyor_cells(self.conveyor_length, self.tote_length)
    }
}

pub(crate) fn check_table_split(packer_count: u32, slow_tables: u32) -> Result<()> {
    if slow_tables > packer_count {
        return Err(ModelError::invalid(
            "slow_tables",
            format!("{slow_tables} slow tables exceed {packer_count} total tables"),
        ));
    }
    Ok(())
}

/// `floor(conveyor_length / tote_length)`.
///
/// The single definition of belt size: both the conveyor capacity used by
/// the overflow projection and the animation track length come from here.
pub fn conveyor_cells(conveyor_length: f64, tote_length: f64) -> Result<usize> {
    let length = require_positive("conveyor_length", conveyor_length)?;
    let tote = require_positive("tote_length", tote_length)?;
    let ratio = (length / tote).floor();
    if !ratio.is_finite() || ratio > MAX_CONVEYOR_CELLS as f64 {
        return Err(ModelError::invalid(
            "tote_length",
            format!(
                "belt of {length} m holds more than {MAX_CONVEYOR_CELLS} totes of {tote} m"
            ),
        ));
    }
    Ok(ratio as usize)
}
