//! Precomputed window geometry.
//!
//! A [`Window`] is built once per group and maps each window cell to its
//! local offset and shape membership, so per-agent extraction is a flat
//! loop with no shape arithmetic.

use skirmish_core::Direction;

use crate::spec::{ObsSpec, ViewFrame, ViewShape};

/// Cell layout of one group's observation window.
#[derive(Debug, Clone)]
pub struct Window {
    radius: u32,
    side: usize,
    frame: ViewFrame,
    shape: ViewShape,
    in_shape: Vec<bool>,
}

impl Window {
    /// Build the window for `spec`.
    pub fn new(spec: &ObsSpec) -> Self {
        let side = spec.side();
        let r = spec.view_range as i32;
        let mut in_shape = Vec::with_capacity(side * side);
        for row in 0..side as i32 {
            for col in 0..side as i32 {
                in_shape.push(spec.shape.contains(col - r, row - r, spec.view_range));
            }
        }
        Self {
            radius: spec.view_range,
            side,
            frame: spec.frame,
            shape: spec.shape,
            in_shape,
        }
    }

    /// Chebyshev radius.
    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// Side length.
    pub fn side(&self) -> usize {
        self.side
    }

    /// Number of cells, `side²`.
    pub fn cells(&self) -> usize {
        self.in_shape.len()
    }

    /// Whether window cell `i` (row-major) lies inside the view shape.
    pub fn in_shape(&self, i: usize) -> bool {
        self.in_shape[i]
    }

    /// Whether a world-frame offset is visible.
    pub fn sees(&self, dx: i32, dy: i32) -> bool {
        self.shape.contains(dx, dy, self.radius)
    }

    /// Local offset `(lx, ly)` of window cell `i`.
    pub fn local_offset(&self, i: usize) -> (i32, i32) {
        let r = self.radius as i32;
        let row = (i / self.side) as i32;
        let col = (i % self.side) as i32;
        (col - r, row - r)
    }

    /// World offset of window cell `i` for an agent facing `facing`.
    pub fn world_offset(&self, i: usize, facing: Direction) -> (i32, i32) {
        let (lx, ly) = self.local_offset(i);
        match self.frame {
            ViewFrame::World => (lx, ly),
            ViewFrame::Egocentric => facing.to_world(lx, ly),
        }
    }

    /// Offset as reported to an agent facing `facing`.
    pub fn to_frame(&self, dx: i32, dy: i32, facing: Direction) -> (i32, i32) {
        match self.frame {
            ViewFrame::World => (dx, dy),
            ViewFrame::Egocentric => facing.to_local(dx, dy),
        }
    }

    /// Window cell holding the world offset `(dx, dy)`, if visible.
    pub fn cell_of(&self, dx: i32, dy: i32, facing: Direction) -> Option<usize> {
        if !self.sees(dx, dy) {
            return None;
        }
        let (lx, ly) = self.to_frame(dx, dy, facing);
        let r = self.radius as i32;
        let (col, row) = ((lx + r) as usize, (ly + r) as usize);
        Some(row * self.side + col)
    }
}
