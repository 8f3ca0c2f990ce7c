//! Occupancy grids: dense boolean volumes marking which voxels get drawn.

use ndarray::{s, Array3, Zip};
use std::ops::Range;

use crate::common::Shape3;

/// Half-open index ranges along each axis.
///
/// A region may reach past the grid it is applied to; cells outside the grid
/// are simply never visited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub x: Range<usize>,
    pub y: Range<usize>,
    pub z: Range<usize>,
}

impl Region {
    pub fn new(x: Range<usize>, y: Range<usize>, z: Range<usize>) -> Self {
        Self { x, y, z }
    }

    /// The region covering a whole index space.
    pub fn full(shape: Shape3) -> Self {
        Self::new(0..shape.0[0], 0..shape.0[1], 0..shape.0[2])
    }

    /// Box of `size` cells starting at `origin`.
    pub fn from_origin_size(origin: [usize; 3], size: Shape3) -> Self {
        Self::new(
            origin[0]..origin[0] + size.0[0],
            origin[1]..origin[1] + size.0[1],
            origin[2]..origin[2] + size.0[2],
        )
    }

    /// Restrict the region to `[0, shape)` on every axis.
    pub fn clipped(&self, shape: Shape3) -> Self {
        let clip = |r: &Range<usize>, n: usize| r.start.min(n)..r.end.min(n);
        Self::new(
            clip(&self.x, shape.0[0]),
            clip(&self.y, shape.0[1]),
            clip(&self.z, shape.0[2]),
        )
    }
}

/// A dense 3D boolean array; `true` cells are drawn as unit cubes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyGrid {
    cells: Array3<bool>,
}

impl OccupancyGrid {
    /// All cells empty.
    pub fn empty(shape: Shape3) -> Self {
        Self {
            cells: Array3::from_elem(shape.as_tuple(), false),
        }
    }

    /// All cells filled.
    pub fn full(shape: Shape3) -> Self {
        Self {
            cells: Array3::from_elem(shape.as_tuple(), true),
        }
    }

    /// Evaluate a predicate on the index coordinates of every cell.
    pub fn from_fn<F>(shape: Shape3, mut predicate: F) -> Self
    where
        F: FnMut(usize, usize, usize) -> bool,
    {
        Self {
            cells: Array3::from_shape_fn(shape.as_tuple(), |(x, y, z)| predicate(x, y, z)),
        }
    }

    /// Cells inside `region` are set, the rest are left empty.
    pub fn from_region(shape: Shape3, region: &Region) -> Self {
        let mut grid = Self::empty(shape);
        grid.fill_region(region);
        grid
    }

    /// Set every cell of `region` that falls inside the grid.
    pub fn fill_region(&mut self, region: &Region) {
        let r = region.clipped(self.shape());
        if r.x.is_empty() || r.y.is_empty() || r.z.is_empty() {
            return;
        }
        self.cells
            .slice_mut(s![r.x.start..r.x.end, r.y.start..r.y.end, r.z.start..r.z.end])
            .fill(true);
    }

    pub fn shape(&self) -> Shape3 {
        let (x, y, z) = self.cells.dim();
        Shape3::new(x, y, z)
    }

    pub fn cells(&self) -> &Array3<bool> {
        &self.cells
    }

    pub fn get(&self, x: usize, y: usize, z: usize) -> bool {
        self.cells.get((x, y, z)).copied().unwrap_or(false)
    }

    /// Population count: the number of `true` cells.
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.cells.iter().any(|&c| c)
    }

    /// Cell-wise OR. Both grids must share a shape.
    pub fn union(&self, other: &OccupancyGrid) -> OccupancyGrid {
        let mut cells = self.cells.clone();
        Zip::from(&mut cells)
            .and(&other.cells)
            .for_each(|a, &b| *a = *a || b);
        OccupancyGrid { cells }
    }

    /// True when at least one cell is set in both grids.
    pub fn overlaps(&self, other: &OccupancyGrid) -> bool {
        Zip::from(&self.cells)
            .and(&other.cells)
            .fold(false, |acc, &a, &b| acc || (a && b))
    }

    /// True when every set cell of `self` is also set in `other`.
    pub fn is_subset_of(&self, other: &OccupancyGrid) -> bool {
        Zip::from(&self.cells)
            .and(&other.cells)
            .fold(true, |acc, &a, &b| acc && (!a || b))
    }

    /// Smallest region containing every set cell, or `None` for an empty grid.
    pub fn bounding_region(&self) -> Option<Region> {
        let mut lo = [usize::MAX; 3];
        let mut hi = [0usize; 3];
        let mut any = false;
        for ((x, y, z), &c) in self.cells.indexed_iter() {
            if !c {
                continue;
            }
            any = true;
            for (axis, v) in [x, y, z].into_iter().enumerate() {
                lo[axis] = lo[axis].min(v);
                hi[axis] = hi[axis].max(v + 1);
            }
        }
        any.then(|| Region::new(lo[0]..hi[0], lo[1]..hi[1], lo[2]..hi[2]))
    }
}
