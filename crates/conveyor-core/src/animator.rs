//! Discrete conveyor animation.
//!
//! The belt is a row of tote-length cells. Totes enter one tick apart and
//! advance one cell per tick, so at step `s` tote `i` sits in cell `s - i`
//! while `0 <= s - i < num_cells`. Frames run until the last tote has left.

use std::fmt;
use std::iter::FusedIterator;

use serde::Serialize;

use crate::constants::{EMPTY_GLYPH, MAX_CONVEYOR_CELLS, OCCUPIED_GLYPH};
use crate::error::{ModelError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CellState {
    Occupied,
    Empty,
}

impl CellState {
    pub fn is_occupied(self) -> bool {
        self == CellState::Occupied
    }

    pub fn glyph(self) -> &'static str {
        match self {
            CellState::Occupied => OCCUPIED_GLYPH,
            CellState::Empty => EMPTY_GLYPH,
        }
    }
}

/// Belt occupancy at one animation step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Frame {
    pub step: usize,
    pub cells: Vec<CellState>,
}

impl Frame {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Indices of occupied cells, ascending.
    pub fn occupied(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_occupied())
            .map(|(i, _)| i)
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_occupied()).count()
    }
}

/// Renders the belt as a strip of glyphs separated by single spaces.
impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cell) in self.cells.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(cell.glyph())?;
        }
        Ok(())
    }
}

/// Occupancy of a `num_cells` belt at `step` with `num_totes` staggered totes.
pub fn frame_at(step: usize, num_cells: usize, num_totes: usize) -> Frame {
    let mut cells = vec![CellState::Empty; num_cells];
    if num_totes > 0 {
        // Totes 0..num_totes cover cells step-(num_totes-1) ..= step, clipped to the belt.
        let first = step.saturating_sub(num_totes - 1);
        let last = step.saturating_add(1).min(num_cells);
        for cell in cells.iter_mut().take(last).skip(first) {
            *cell = CellState::Occupied;
        }
    }
    Frame { step, cells }
}

/// Lazy, finite frame sequence of `num_cells + num_totes` frames.
///
/// Yields one frame per call so a host can render and pace progressively,
/// or drop the sequence between frames to cancel.
#[derive(Clone, Debug)]
pub struct ConveyorAnimation {
    num_cells: usize,
    num_totes: usize,
    step: usize,
    total_frames: usize,
}

pub fn animate_conveyor(num_cells: usize, num_totes: usize) -> Result<ConveyorAnimation> {
    if num_totes < 1 {
        return Err(ModelError::invalid("num_totes", "must be at least 1"));
    }
    if num_cells > MAX_CONVEYOR_CELLS {
        return Err(ModelError::invalid(
            "num_cells",
            format!("{num_cells} cells exceed the {MAX_CONVEYOR_CELLS}-cell ceiling"),
        ));
    }
    let total_frames = num_cells.checked_add(num_totes).ok_or_else(|| {
        ModelError::invalid("num_totes", "frame count overflows with this belt length")
    })?;

    Ok(ConveyorAnimation {
        num_cells,
        num_totes,
        step: 0,
        total_frames,
    })
}

impl ConveyorAnimation {
    pub fn num_cells(&self) -> usize {
        self.num_cells
    }

    pub fn num_totes(&self) -> usize {
        self.num_totes
    }

    pub fn total_frames(&self) -> usize {
        self.total_frames
    }
}

impl Iterator for ConveyorAnimation {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        if self.step >= self.total_frames {
            return None;
        }
        let frame = frame_at(self.step, self.num_cells, self.num_totes);
        self.step += 1;
        Some(frame)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.total_frames - self.step;
        (n, Some(n))
    }
}

impl ExactSizeIterator for ConveyorAnimation {}

impl FusedIterator for ConveyorAnimation {}

#[cfg(test)]
mod tests {
    use super::*;

    fn occupied(frame: &Frame) -> Vec<usize> {
        frame.occupied().collect()
    }

    #[test]
    fn test_reference_steps() {
        assert_eq!(occupied(&frame_at(0, 25, 5)), vec![0]);
        assert_eq!(occupied(&frame_at(4, 25, 5)), vec![0, 1, 2, 3, 4]);
        assert_eq!(occupied(&frame_at(10, 25, 5)), vec![6, 7, 8, 9, 10]);
        assert_eq!(occupied(&frame_at(26, 25, 5)), vec![22, 23, 24]);
        assert!(occupied(&frame_at(29, 25, 5)).is_empty());
    }

    #[test]
    fn test_frame_count() {
        let anim = animate_conveyor(25, 5).unwrap();
        assert_eq!(anim.len(), 30);
        let frames: Vec<Frame> = anim.collect();
        assert_eq!(frames.len(), 30);
        assert_eq!(frames.last().unwrap().step, 29);
        assert_eq!(frames.last().unwrap().occupied_count(), 0);
    }

    #[test]
    fn test_every_frame_spans_belt() {
        for frame in animate_conveyor(7, 3).unwrap() {
            assert_eq!(frame.len(), 7);
        }
    }

    #[test]
    fn test_more_totes_than_cells() {
        // Belt of 2 cells, 4 totes: the belt saturates then drains.
        let counts: Vec<usize> = animate_conveyor(2, 4)
            .unwrap()
            .map(|f| f.occupied_count())
            .collect();
        assert_eq!(counts, vec![1, 2, 2, 2, 1, 0]);
    }

    #[test]
    fn test_zero_cell_belt() {
        let frames: Vec<Frame> = animate_conveyor(0, 3).unwrap().collect();
        assert_eq!(frames.len(), 3);
        assert!(frames.iter().all(Frame::is_empty));
    }

    #[test]
    fn test_rejects_zero_totes() {
        let err = animate_conveyor(25, 0).unwrap_err();
        assert_eq!(err.parameter(), "num_totes");
    }

    #[test]
    fn test_rejects_oversized_belt() {
        let err = animate_conveyor(MAX_CONVEYOR_CELLS + 1, 1).unwrap_err();
        assert_eq!(err.parameter(), "num_cells");
        assert_eq!(animate_conveyor(usize::MAX, 1).unwrap_err().parameter(), "num_cells");
    }

    #[test]
    fn test_rejects_overflowing_frame_count() {
        let err = animate_conveyor(MAX_CONVEYOR_CELLS, usize::MAX).unwrap_err();
        assert_eq!(err.parameter(), "num_totes");
    }

    #[test]
    fn test_glyph_strip() {
        let frame = frame_at(1, 4, 1);
        assert_eq!(frame.to_string(), "— 📦 — —");
        assert_eq!(frame_at(0, 0, 1).to_string(), "");
    }

    #[test]
    fn test_exact_size_decreases() {
        let mut anim = animate_conveyor(3, 2).unwrap();
        assert_eq!(anim.len(), 5);
        anim.next();
        anim.next();
        assert_eq!(anim.len(), 3);
        assert_eq!(anim.total_frames(), 5);
    }

    #[test]
    fn test_serializes_lowercase_states() {
        let json = serde_json::to_string(&frame_at(0, 2, 1)).unwrap();
        assert_eq!(json, r#"{"step":0,"cells":["occupied","empty"]}"#);
    }
}
