use serde::Serialize;

use crate::animator::{ConveyorAnimation, animate_conveyor};
use crate::error::Result;
use crate::overflow::{OverflowProjection, project_overflow};
use crate::params::Parameters;
use crate::throughput::{Throughput, compute_throughput};

/// Headline numbers for a line.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Kpis {
    pub input_rate: f64,
    pub packing_capacity: f64,
    pub capacity_shortfall: f64,
    /// `None` when the line keeps up.
    pub hours_until_overflow: Option<f64>,
    pub utilization: f64,
    pub fast_tables: u32,
    pub slow_tables: u32,
    pub conveyor_capacity: usize,
    pub pack_time_secs: Option<f64>,
    pub input_interval_secs: f64,
}

/// Validated parameters with their throughput and belt size resolved.
///
/// Projection and animation are handed out as fresh lazy sequences on
/// every call.
#[derive(Clone, Debug)]
pub struct LineReport {
    params: Parameters,
    throughput: Throughput,
    conveyor_capacity: usize,
}

/// Validate `params` and evaluate the throughput model.
pub fn evaluate(params: &Parameters) -> Result<LineReport> {
    params.validate()?;
    let throughput = compute_throughput(params.input_rate, params.packer_count, params.slow_tables)?;
    let conveyor_capacity = params.conveyor_cells()?;
    Ok(LineReport {
        params: params.clone(),
        throughput,
        conveyor_capacity,
    })
}

impl LineReport {
    pub fn params(&self) -> &Parameters {
        &self.params
    }

    pub fn throughput(&self) -> &Throughput {
        &self.throughput
    }

    /// Belt cells. Also the animation track length.
    pub fn conveyor_capacity(&self) -> usize {
        self.conveyor_capacity
    }

    pub fn kpis(&self) -> Kpis {
        let t = &self.throughput;
        Kpis {
            input_rate: t.input_rate,
            packing_capacity: t.packing_capacity,
            capacity_shortfall: t.capacity_shortfall,
            hours_until_overflow: t.hours_until_overflow(self.conveyor_capacity),
            utilization: t.utilization,
            fast_tables: t.fast_tables,
            slow_tables: t.slow_tables,
            conveyor_capacity: self.conveyor_capacity,
            pack_time_secs: t.pack_time_secs(),
            input_interval_secs: t.input_interval_secs(),
        }
    }

    pub fn projection(&self) -> Result<OverflowProjection> {
        project_overflow(self.throughput.capacity_shortfall, self.conveyor_capacity)
    }

    pub fn animation(&self) -> Result<ConveyorAnimation> {
        animate_conveyor(self.conveyor_capacity, self.params.num_totes as usize)
    }
}
