//! Text and JSON presentation of a line report.

use anyhow::Result;
use conveyor_core::{FillPoint, Kpis, LineReport, Parameters};
use serde::Serialize;

pub const NO_OVERFLOW: &str = "no overflow: packing capacity exceeds input rate";

/// Width of a full-belt bar in the fill-up chart.
const BAR_WIDTH: usize = 40;

/// Host-side caps on how much of a lazy sequence gets materialized.
pub const MAX_POINTS: usize = 1_000;
pub const MAX_FRAMES: usize = 1_000;

fn fmt_opt(value: Option<f64>, none: &str) -> String {
    value.map_or_else(|| none.to_string(), |v| format!("{v:.2}"))
}

pub fn kpi_block(kpis: &Kpis) -> String {
    format!(
        "input rate:       {} totes/hr\n\
         packing capacity: {:.2} totes/hr\n\
         shortfall:        {:.2} totes/hr\n\
         overflow in:      {} hours\n\
         utilization:      {:.2}%\n\
         tables:           {} fast, {} slow\n\
         belt capacity:    {} totes\n\
         pack time:        {} s/tote\n\
         input interval:   {:.2} s",
        kpis.input_rate,
        kpis.packing_capacity,
        kpis.capacity_shortfall,
        fmt_opt(kpis.hours_until_overflow, "∞"),
        kpis.utilization,
        kpis.fast_tables,
        kpis.slow_tables,
        kpis.conveyor_capacity,
        fmt_opt(kpis.pack_time_secs, "n/a"),
        kpis.input_interval_secs,
    )
}

fn bar(totes_waiting: f64, capacity: usize) -> String {
    if capacity == 0 {
        return String::new();
    }
    let filled = (totes_waiting / capacity as f64 * BAR_WIDTH as f64).round() as usize;
    "#".repeat(filled.min(BAR_WIDTH))
}

/// One `hour  totes  bar` row per point.
pub fn projection_table(points: &[FillPoint], capacity: usize) -> String {
    std::iter::once(String::from("hour   totes  fill"))
        .chain(points.iter().map(|p| {
            format!(
                "{:>4}  {:>6.2}  {}",
                p.hour,
                p.totes_waiting,
                bar(p.totes_waiting, capacity)
            )
        }))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Serialize)]
pub struct ReportJson<'a> {
    pub params: &'a Parameters,
    pub kpis: Kpis,
    /// `None` marks the no-overflow case.
    pub overflow: Option<Vec<FillPoint>>,
    pub frames: Vec<String>,
    /// Set when a sequence was longer than the host cap.
    pub truncated: bool,
}

/// Collect the projection, capped at [`MAX_POINTS`]. Second value is true
/// when points were dropped.
pub fn collect_points(report: &LineReport) -> Result<(Option<Vec<FillPoint>>, bool)> {
    let projection = report.projection()?;
    if projection.is_no_overflow() {
        return Ok((None, false));
    }
    let truncated = projection.remaining() > MAX_POINTS as u64;
    if truncated {
        tracing::warn!(
            "projection has {} points, showing the first {MAX_POINTS}",
            projection.remaining()
        );
    }
    Ok((Some(projection.take(MAX_POINTS).collect()), truncated))
}

/// Collect frame strips, capped at [`MAX_FRAMES`].
pub fn collect_frames(report: &LineReport) -> Result<(Vec<String>, bool)> {
    let animation = report.animation()?;
    let truncated = animation.len() > MAX_FRAMES;
    if truncated {
        tracing::warn!(
            "animation has {} frames, keeping the first {MAX_FRAMES}",
            animation.len()
        );
    }
    Ok((
        animation.take(MAX_FRAMES).map(|f| f.to_string()).collect(),
        truncated,
    ))
}

pub fn report_json(report: &LineReport) -> Result<ReportJson<'_>> {
    let (overflow, points_truncated) = collect_points(report)?;
    let (frames, frames_truncated) = collect_frames(report)?;
    Ok(ReportJson {
        params: report.params(),
        kpis: report.kpis(),
        overflow,
        frames,
        truncated: points_truncated || frames_truncated,
    })
}
