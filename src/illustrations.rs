//! Builders for each illustration. Every builder is a pure function that
//! returns a fresh [`Figure`]; nothing is drawn until the figure is rendered.

use log::debug;

use crate::common::Shape3;
use crate::figure::{Axes, Figure};
use crate::grid::{OccupancyGrid, Region};
use crate::partition::ChunkPartition;
use crate::style::{Style, BLACK, TAB_ORANGE, TAB_RED};

/// Index space shared by the request/read overlays.
pub const OVERLAY_SHAPE: Shape3 = Shape3::new(10, 10, 20);

/// Base resolution of the multiscale pyramid.
pub const MULTISCALE_BASE: Shape3 = Shape3::new(10, 10, 20);

/// Number of pyramid levels drawn.
pub const MULTISCALE_LEVELS: usize = 3;

/// Colours every chunk of `image_shape` separately.
///
/// One layer is added per chunk, in x, y, z order, each clipped to the
/// image. Zero-sized shapes are not checked.
pub fn chunk_tiling(image_shape: Shape3, chunk_shape: Shape3) -> Figure {
    let partition = ChunkPartition::new(image_shape, chunk_shape);
    debug!(
        "tiling {} into {} chunks of {}",
        image_shape,
        partition.len(),
        chunk_shape
    );

    let mut fig = Figure::new();
    let ax = fig.add_axes();
    let style = Style::default()
        .edge(BLACK)
        .line_width(0.5)
        .alpha(0.9)
        .shade(false);
    for grid in partition.grids() {
        ax.voxels(grid, style);
    }
    ax.set_title(format!(
        "Image shape = {image_shape}\nChunk shape = {chunk_shape}"
    ));
    fig
}

/// Which read pattern an overlay illustrates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayVariant {
    /// Read the whole z-slab range holding the request.
    Baseline,
    /// Request a single column, read everything.
    Bad,
    /// Read the chunk-aligned box around the request.
    ChunkAligned,
}

impl OverlayVariant {
    pub const ALL: [OverlayVariant; 3] = [
        OverlayVariant::Baseline,
        OverlayVariant::Bad,
        OverlayVariant::ChunkAligned,
    ];

    /// Chunk shape quoted in the title. It is not used to build the grids.
    pub fn chunk_shape(&self) -> Shape3 {
        match self {
            OverlayVariant::Baseline | OverlayVariant::Bad => Shape3::new(10, 10, 1),
            OverlayVariant::ChunkAligned => Shape3::new(2, 2, 3),
        }
    }

    pub fn requested(&self) -> OccupancyGrid {
        let region = match self {
            OverlayVariant::Baseline | OverlayVariant::ChunkAligned => {
                Region::new(2..4, 3..5, 2..4)
            }
            OverlayVariant::Bad => Region {
                x: 3..4,
                y: 3..4,
                ..Region::full(OVERLAY_SHAPE)
            },
        };
        OccupancyGrid::from_region(OVERLAY_SHAPE, &region)
    }

    pub fn read(&self) -> OccupancyGrid {
        match self {
            OverlayVariant::Baseline => {
                OccupancyGrid::from_fn(OVERLAY_SHAPE, |_, _, z| (2..4).contains(&z))
            }
            OverlayVariant::Bad => OccupancyGrid::full(OVERLAY_SHAPE),
            OverlayVariant::ChunkAligned => {
                OccupancyGrid::from_region(OVERLAY_SHAPE, &Region::new(2..6, 2..6, 0..6))
            }
        }
    }

    /// The "bad" overlay leaves the background layer out.
    pub fn draws_all_data(&self) -> bool {
        !matches!(self, OverlayVariant::Bad)
    }
}

/// The three grids behind an overlay, before styling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayGrids {
    pub all: OccupancyGrid,
    pub requested: OccupancyGrid,
    pub read: OccupancyGrid,
}

impl OverlayGrids {
    pub fn for_variant(variant: OverlayVariant) -> Self {
        Self {
            all: OccupancyGrid::full(OVERLAY_SHAPE),
            requested: variant.requested(),
            read: variant.read(),
        }
    }

    /// Voxels read per voxel requested.
    pub fn amplification(&self) -> f64 {
        self.read.count() as f64 / self.requested.count().max(1) as f64
    }
}

/// Requested region in red over the region that has to be read in orange,
/// with voxel counts in the legend.
pub fn request_overlay(variant: OverlayVariant) -> Figure {
    let grids = OverlayGrids::for_variant(variant);
    let requested = grids.requested.count();
    let read = grids.read.count();
    debug!(
        "{:?} overlay: {} requested, {} read ({:.1}x)",
        variant,
        requested,
        read,
        grids.amplification()
    );

    let mut fig = Figure::new();
    let ax = fig.add_axes();
    let all_vox = variant.draws_all_data().then(|| {
        ax.voxels(
            grids.all,
            Style::default().alpha(0.2).edge(BLACK).line_width(0.05),
        )
    });
    let req_vox = ax.voxels(
        grids.requested,
        Style::default()
            .edge(BLACK)
            .line_width(0.5)
            .fill(TAB_RED)
            .alpha(1.0),
    );
    let read_vox = ax.voxels(
        grids.read,
        Style::default()
            .edge(BLACK)
            .line_width(0.5)
            .fill(TAB_ORANGE)
            .alpha(0.3),
    );

    if let Some(handle) = all_vox {
        ax.legend_entry(handle, "All data");
    }
    ax.legend_entry(req_vox, format!("Requested data ({requested} voxels)"));
    ax.legend_entry(read_vox, format!("Read data ({read} voxels)"));
    ax.set_title(format!("Chunk shape = {}", variant.chunk_shape()));
    fig
}

/// One level of a power-of-two pyramid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PyramidLevel {
    pub level: usize,
    pub bin_factor: usize,
    pub shape: Shape3,
}

/// Shapes of the first `levels` levels, each axis divided by `2^i` and
/// rounded up.
pub fn pyramid_levels(base: Shape3, levels: usize) -> Vec<PyramidLevel> {
    (0..levels)
        .map(|level| {
            let bin_factor = 1usize << level;
            PyramidLevel {
                level,
                bin_factor,
                shape: base.div_ceil(Shape3::splat(bin_factor)),
            }
        })
        .collect()
}

/// Side-by-side panels, one fully occupied grid per pyramid level.
pub fn multiscale(base: Shape3, levels: usize) -> Figure {
    let mut fig = Figure::new();
    for level in pyramid_levels(base, levels) {
        debug!("level {}: shape {}", level.level, level.shape);
        let ax: &mut Axes = fig.add_axes();
        ax.voxels(
            OccupancyGrid::full(level.shape),
            Style::default().alpha(1.0).edge(BLACK).line_width(1.0),
        );
        ax.set_title(format!("Bin-by-{}", level.bin_factor));
    }
    fig.set_suptitle("OME-Zarr multiscale image arrays");
    fig
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{TAB_BLUE, TAB_GREEN};

    fn only_axes(fig: &Figure) -> &Axes {
        assert_eq!(fig.axes.len(), 1);
        &fig.axes[0]
    }

    #[test]
    fn small_chunk_tiling_has_a_layer_per_chunk() {
        let fig = chunk_tiling(Shape3::new(10, 10, 20), Shape3::new(2, 2, 3));
        let ax = only_axes(&fig);
        assert_eq!(ax.layers().len(), 175);
        assert_eq!(
            ax.title.as_deref(),
            Some("Image shape = (10, 10, 20)\nChunk shape = (2, 2, 3)")
        );
        assert!(ax.legend().is_empty());
    }

    #[test]
    fn chunk_tiling_covers_image_once() {
        let image = Shape3::new(10, 10, 20);
        let fig = chunk_tiling(image, Shape3::new(5, 5, 10));
        let ax = only_axes(&fig);
        let mut union = OccupancyGrid::empty(image);
        for layer in ax.layers() {
            assert!(!union.overlaps(&layer.grid));
            union = union.union(&layer.grid);
        }
        assert_eq!(union, OccupancyGrid::full(image));
    }

    #[test]
    fn chunk_tiling_cycles_colours() {
        let fig = chunk_tiling(Shape3::new(10, 10, 20), Shape3::new(10, 10, 1));
        let layers = only_axes(&fig).layers();
        assert_eq!(layers.len(), 20);
        assert_eq!(layers[0].style.face, TAB_BLUE);
        assert_eq!(layers[2].style.face, TAB_GREEN);
        assert_eq!(layers[10].style.face, TAB_BLUE);
        assert!((layers[0].style.alpha - 0.9).abs() < 1e-12);
    }

    #[test]
    fn overlay_counts_are_ordered() {
        for variant in [OverlayVariant::Baseline, OverlayVariant::ChunkAligned] {
            let g = OverlayGrids::for_variant(variant);
            assert!(g.requested.count() <= g.read.count());
            assert!(g.read.count() <= g.all.count());
            assert!(g.requested.is_subset_of(&g.read));
        }
        let bad = OverlayGrids::for_variant(OverlayVariant::Bad);
        assert_eq!(bad.read.count(), bad.all.count());
    }

    #[test]
    fn baseline_overlay_legend() {
        let fig = request_overlay(OverlayVariant::Baseline);
        let ax = only_axes(&fig);
        let labels: Vec<&str> = ax.legend().iter().map(|e| e.label.as_str()).collect();
        assert_eq!(
            labels,
            [
                "All data",
                "Requested data (8 voxels)",
                "Read data (200 voxels)"
            ]
        );
        assert_eq!(ax.title.as_deref(), Some("Chunk shape = (10, 10, 1)"));
        for entry in ax.legend() {
            let layer = ax.layer(entry.layer);
            if entry.label.starts_with("Requested") {
                assert_eq!(layer.style.face, TAB_RED);
                assert_eq!(layer.grid.count(), 8);
            }
        }
    }

    #[test]
    fn bad_overlay_reads_everything_without_background() {
        let fig = request_overlay(OverlayVariant::Bad);
        let ax = only_axes(&fig);
        assert_eq!(ax.layers().len(), 2);
        let labels: Vec<&str> = ax.legend().iter().map(|e| e.label.as_str()).collect();
        assert_eq!(
            labels,
            ["Requested data (20 voxels)", "Read data (2000 voxels)"]
        );
    }

    #[test]
    fn chunk_aligned_overlay() {
        let fig = request_overlay(OverlayVariant::ChunkAligned);
        let ax = only_axes(&fig);
        assert_eq!(ax.legend()[2].label, "Read data (96 voxels)");
        assert_eq!(ax.title.as_deref(), Some("Chunk shape = (2, 2, 3)"));
        let read = OverlayVariant::ChunkAligned.read();
        assert_eq!(read.bounding_region(), Some(Region::new(2..6, 2..6, 0..6)));
    }

    #[test]
    fn legend_counts_match_grids() {
        for variant in OverlayVariant::ALL {
            let fig = request_overlay(variant);
            let ax = only_axes(&fig);
            for entry in ax.legend() {
                let count = ax.layer(entry.layer).grid.count();
                if entry.label != "All data" {
                    assert!(entry.label.contains(&format!("({count} voxels)")));
                }
            }
        }
    }

    #[test]
    fn pyramid_shapes() {
        let shapes: Vec<Shape3> = pyramid_levels(MULTISCALE_BASE, MULTISCALE_LEVELS)
            .iter()
            .map(|l| l.shape)
            .collect();
        assert_eq!(
            shapes,
            [
                Shape3::new(10, 10, 20),
                Shape3::new(5, 5, 10),
                Shape3::new(3, 3, 5)
            ]
        );
    }

    #[test]
    fn multiscale_panels() {
        let fig = multiscale(MULTISCALE_BASE, MULTISCALE_LEVELS);
        assert_eq!(fig.axes.len(), 3);
        let titles: Vec<&str> = fig
            .axes
            .iter()
            .filter_map(|a| a.title.as_deref())
            .collect();
        assert_eq!(titles, ["Bin-by-1", "Bin-by-2", "Bin-by-4"]);
        assert_eq!(
            fig.suptitle.as_deref(),
            Some("OME-Zarr multiscale image arrays")
        );
        assert_eq!(fig.axes[2].layers()[0].grid.count(), 45);
    }

    #[test]
    fn builders_are_repeatable() {
        let a = chunk_tiling(Shape3::new(10, 10, 20), Shape3::new(2, 2, 3));
        let b = chunk_tiling(Shape3::new(10, 10, 20), Shape3::new(2, 2, 3));
        let grids = |f: &Figure| -> Vec<OccupancyGrid> {
            f.axes[0].layers().iter().map(|l| l.grid.clone()).collect()
        };
        assert_eq!(grids(&a), grids(&b));
        assert_eq!(
            OverlayGrids::for_variant(OverlayVariant::ChunkAligned),
            OverlayGrids::for_variant(OverlayVariant::ChunkAligned)
        );
    }
}
