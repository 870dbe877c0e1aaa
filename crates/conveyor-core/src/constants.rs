/// Nominal throughput of one packing table: 96 totes/hour across 10 tables.
pub const BASE_RATE_PER_TABLE: f64 = 96.0 / 10.0;

/// Slow tables pack at 70% of the base rate.
pub const SLOW_TABLE_FACTOR: f64 = 0.7;

/// Seconds per hour, for converting hourly rates into per-tote intervals.
pub const SECS_PER_HOUR: f64 = 3600.0;

/// Largest belt, in cells, the model accepts. Every frame allocates one
/// state per cell.
pub const MAX_CONVEYOR_CELLS: usize = 1_000_000;

/// Glyph for a cell holding a tote.
pub const OCCUPIED_GLYPH: &str = "📦";

/// Glyph for an empty belt cell.
pub const EMPTY_GLYPH: &str = "—";

// Defaults of the interactive line page.
pub const DEFAULT_INPUT_RATE: f64 = 131.0;
pub const DEFAULT_PACKER_COUNT: u32 = 13;
pub const DEFAULT_SLOW_TABLES: u32 = 3;
pub const DEFAULT_CONVEYOR_LENGTH: f64 = 15.0;
pub const DEFAULT_CONVEYOR_SPEED: f64 = 4.0;
pub const DEFAULT_TOTE_LENGTH: f64 = 0.6;
pub const DEFAULT_ANIMATION_SPEED: f64 = 0.2;
pub const DEFAULT_NUM_TOTES: u32 = 5;
