//! Buffer fill-up projection for a line that cannot keep up.
//!
//! Totes accumulate linearly at the capacity shortfall until the belt is
//! full. The projection yields one point per whole hour, up to and including
//! the first hour past overflow.

use std::iter::FusedIterator;

use serde::Serialize;

use crate::error::{ModelError, Result};

/// Totes waiting on the belt at a whole hour.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct FillPoint {
    pub hour: u64,
    pub totes_waiting: f64,
}

/// `conveyor_capacity / capacity_shortfall` for a strictly positive
/// shortfall, `None` otherwise (the line never overflows).
pub fn hours_until_overflow(capacity_shortfall: f64, conveyor_capacity: usize) -> Option<f64> {
    (capacity_shortfall > 0.0).then(|| conveyor_capacity as f64 / capacity_shortfall)
}

/// Lazy fill-up series. Empty when the line keeps up.
///
/// Not restartable: call [`project_overflow`] again for a fresh series.
#[derive(Clone, Debug)]
pub struct OverflowProjection {
    capacity_shortfall: f64,
    conveyor_capacity: f64,
    hours_until_overflow: Option<f64>,
    next_hour: u64,
    /// Exclusive.
    end_hour: u64,
}

/// Project belt fill-up for a shortfall in totes/hour against a belt of
/// `conveyor_capacity` cells.
pub fn project_overflow(capacity_shortfall: f64, conveyor_capacity: usize) -> Result<OverflowProjection> {
    if !capacity_shortfall.is_finite() {
        return Err(ModelError::invalid(
            "capacity_shortfall",
            format!("must be finite, got {capacity_shortfall}"),
        ));
    }

    let hours = hours_until_overflow(capacity_shortfall, conveyor_capacity);
    // floor(hours) + 1 inclusive, so the exclusive end is floor(hours) + 2
    let end_hour = match hours {
        Some(h) => (h.floor() as u64).saturating_add(2),
        None => 0,
    };

    Ok(OverflowProjection {
        capacity_shortfall,
        conveyor_capacity: conveyor_capacity as f64,
        hours_until_overflow: hours,
        next_hour: 0,
        end_hour,
    })
}

impl OverflowProjection {
    pub fn hours_until_overflow(&self) -> Option<f64> {
        self.hours_until_overflow
    }

    /// True for the no-overflow case: the series has no points at all.
    pub fn is_no_overflow(&self) -> bool {
        self.hours_until_overflow.is_none()
    }

    /// Points not yet yielded.
    pub fn remaining(&self) -> u64 {
        self.end_hour - self.next_hour
    }

    fn point(&self, hour: u64) -> FillPoint {
        // The closing point sits past overflow; pin it so rounding in the
        // hour count can never leave it short of a full belt.
        let totes_waiting = if hour + 1 == self.end_hour {
            self.conveyor_capacity
        } else {
            (hour as f64 * self.capacity_shortfall).min(self.conveyor_capacity)
        };
        FillPoint {
            hour,
            totes_waiting,
        }
    }
}

impl Iterator for OverflowProjection {
    type Item = FillPoint;

    fn next(&mut self) -> Option<FillPoint> {
        if self.next_hour >= self.end_hour {
            return None;
        }
        let point = self.point(self.next_hour);
        self.next_hour += 1;
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining()) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

impl FusedIterator for OverflowProjection {}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_no_overflow_is_empty() {
        let mut p = project_overflow(-12.0, 25).unwrap();
        assert!(p.is_no_overflow());
        assert_eq!(p.remaining(), 0);
        assert_eq!(p.next(), None);
    }

    #[test]
    fn test_zero_shortfall_is_empty() {
        let p = project_overflow(0.0, 25).unwrap();
        assert!(p.is_no_overflow());
        assert_eq!(p.count(), 0);
    }

    #[test]
    fn test_reference_projection() {
        // 25 / 14.84 = 1.68 hours, so hours 0, 1, 2
        let points: Vec<FillPoint> = project_overflow(14.84, 25).unwrap().collect();
        assert_eq!(points.len(), 3);
        assert_eq!(points[0], FillPoint { hour: 0, totes_waiting: 0.0 });
        assert_eq!(points[1].hour, 1);
        assert_relative_eq!(points[1].totes_waiting, 14.84, epsilon = 1e-12);
        assert_eq!(points[2], FillPoint { hour: 2, totes_waiting: 25.0 });
    }

    #[test]
    fn test_exact_hour_overflow() {
        // Full at exactly hour 5; one extra closing point at hour 6.
        let points: Vec<FillPoint> = project_overflow(5.0, 25).unwrap().collect();
        let hours: Vec<u64> = points.iter().map(|p| p.hour).collect();
        assert_eq!(hours, vec![0, 1, 2, 3, 4, 5, 6]);
        assert_eq!(points[5].totes_waiting, 25.0);
        assert_eq!(points[6].totes_waiting, 25.0);
    }

    #[test]
    fn test_clamped_at_capacity() {
        let points: Vec<FillPoint> = project_overflow(40.0, 25).unwrap().collect();
        assert_eq!(points.len(), 2);
        assert!(points.iter().all(|p| p.totes_waiting <= 25.0));
        assert_eq!(points[1].totes_waiting, 25.0);
    }

    #[test]
    fn test_empty_belt_overflows_immediately() {
        let points: Vec<FillPoint> = project_overflow(3.0, 0).unwrap().collect();
        assert_eq!(
            points,
            vec![
                FillPoint { hour: 0, totes_waiting: 0.0 },
                FillPoint { hour: 1, totes_waiting: 0.0 },
            ]
        );
    }

    #[test]
    fn test_size_hint_tracks_progress() {
        let mut p = project_overflow(5.0, 25).unwrap();
        assert_eq!(p.size_hint(), (7, Some(7)));
        p.next();
        assert_eq!(p.size_hint(), (6, Some(6)));
        assert_relative_eq!(p.hours_until_overflow().unwrap(), 5.0);
    }

    #[test]
    fn test_fused_after_end() {
        let mut p = project_overflow(40.0, 25).unwrap();
        assert!(p.next().is_some());
        assert!(p.next().is_some());
        assert_eq!(p.next(), None);
        assert_eq!(p.next(), None);
    }

    #[test]
    fn test_rejects_non_finite_shortfall() {
        let err = project_overflow(f64::NAN, 25).unwrap_err();
        assert_eq!(err.parameter(), "capacity_shortfall");
        assert!(project_overflow(f64::INFINITY, 25).is_err());
    }
}
