use serde::Serialize;

use crate::constants::{BASE_RATE_PER_TABLE, SECS_PER_HOUR, SLOW_TABLE_FACTOR};
use crate::error::{Result, require_positive};
use crate::overflow::hours_until_overflow;
use crate::params::check_table_split;

/// Packing throughput of a line against its tote input rate.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Throughput {
    pub input_rate: f64,
    pub fast_tables: u32,
    pub slow_tables: u32,
    /// Totes per hour the tables can clear.
    pub packing_capacity: f64,
    /// `input_rate - packing_capacity`. Positive means totes pile up.
    pub capacity_shortfall: f64,
    /// Capacity as a percentage of input. Below 100 the line falls behind.
    pub utilization: f64,
}

/// Weighted table throughput: fast tables at the base rate, slow tables at
/// [`SLOW_TABLE_FACTOR`] of it.
pub fn packing_capacity(fast_tables: u32, slow_tables: u32) -> f64 {
    f64::from(fast_tables) * BASE_RATE_PER_TABLE
        + f64::from(slow_tables) * BASE_RATE_PER_TABLE * SLOW_TABLE_FACTOR
}

/// Compute capacity, shortfall and utilization for a table split.
pub fn compute_throughput(input_rate: f64, packer_count: u32, slow_tables: u32) -> Result<Throughput> {
    let input_rate = require_positive("input_rate", input_rate)?;
    check_table_split(packer_count, slow_tables)?;

    let fast_tables = packer_count - slow_tables;
    let packing_capacity = packing_capacity(fast_tables, slow_tables);

    Ok(Throughput {
        input_rate,
        fast_tables,
        slow_tables,
        packing_capacity,
        capacity_shortfall: input_rate - packing_capacity,
        utilization: packing_capacity / input_rate * 100.0,
    })
}

impl Throughput {
    pub fn packer_count(&self) -> u32 {
        self.fast_tables + self.slow_tables
    }

    /// True when totes arrive faster than the tables clear them.
    pub fn overflows(&self) -> bool {
        self.capacity_shortfall > 0.0
    }

    /// Hours until a belt of `conveyor_capacity` cells is full, or `None`
    /// when the line keeps up.
    pub fn hours_until_overflow(&self, conveyor_capacity: usize) -> Option<f64> {
        hours_until_overflow(self.capacity_shortfall, conveyor_capacity)
    }

    /// Seconds the tables need per tote, `None` with no packing capacity.
    pub fn pack_time_secs(&self) -> Option<f64> {
        (self.packing_capacity > 0.0).then(|| SECS_PER_HOUR / self.packing_capacity)
    }

    /// Seconds between arriving totes.
    pub fn input_interval_secs(&self) -> f64 {
        SECS_PER_HOUR / self.input_rate
    }
}
