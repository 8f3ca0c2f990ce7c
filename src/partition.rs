//! Tiling of an image-shaped index space into chunk-sized blocks.

use crate::common::Shape3;
use crate::grid::{OccupancyGrid, Region};

/// A regular chunk grid laid over an image.
///
/// Chunks start at every multiple of the chunk shape. Blocks at the far edge
/// of an axis are clipped to the image when the chunk shape does not divide
/// the image shape evenly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkPartition {
    image: Shape3,
    chunk: Shape3,
}

impl ChunkPartition {
    pub fn new(image: Shape3, chunk: Shape3) -> Self {
        Self { image, chunk }
    }

    /// Number of blocks along each axis.
    pub fn counts(&self) -> Shape3 {
        self.image.div_ceil(self.chunk)
    }

    /// Total number of blocks.
    pub fn len(&self) -> usize {
        self.counts().volume()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Region of the block at chunk index `(i, j, k)`, clipped to the image.
    pub fn block(&self, i: usize, j: usize, k: usize) -> Region {
        let origin = [i * self.chunk.0[0], j * self.chunk.0[1], k * self.chunk.0[2]];
        Region::from_origin_size(origin, self.chunk).clipped(self.image)
    }

    /// Every block region, x outermost and z innermost.
    pub fn blocks(&self) -> impl Iterator<Item = Region> + '_ {
        let [nx, ny, nz] = self.counts().0;
        (0..nx).flat_map(move |i| {
            (0..ny).flat_map(move |j| (0..nz).map(move |k| self.block(i, j, k)))
        })
    }

    /// One occupancy grid per block, in the same order as [`Self::blocks`].
    pub fn grids(&self) -> impl Iterator<Item = OccupancyGrid> + '_ {
        self.blocks()
            .map(move |region| OccupancyGrid::from_region(self.image, &region))
    }
}
