//! Packing-line throughput model and conveyor animator.
//!
//! Answers whether a set of packing tables keeps up with incoming totes,
//! projects how fast the conveyor buffer fills when it does not, and models
//! a staggered convoy of totes moving along the belt one cell per tick.
//!
//! Zero I/O: every output is a pure function of [`Parameters`]. Pacing,
//! rendering and cancellation belong to the host.

pub mod animator;
pub mod constants;
pub mod error;
pub mod overflow;
pub mod params;
pub mod report;
pub mod throughput;

pub use animator::{CellState, ConveyorAnimation, Frame, animate_conveyor, frame_at};
pub use constants::{BASE_RATE_PER_TABLE, MAX_CONVEYOR_CELLS, SLOW_TABLE_FACTOR};
pub use error::{ModelError, Result};
pub use overflow::{FillPoint, OverflowProjection, hours_until_overflow, project_overflow};
pub use params::{Parameters, conveyor_cells};
pub use report::{Kpis, LineReport, evaluate};
pub use throughput::{Throughput, compute_throughput, packing_capacity};
