//! Explicit figure and axes values that illustrations build and the renderer
//! consumes.

use crate::grid::OccupancyGrid;
use crate::style::{ColorCycle, ResolvedStyle, Style};

/// Handle to a layer drawn on an [`Axes`], returned by [`Axes::voxels`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerHandle(usize);

#[derive(Debug, Clone)]
pub struct VoxelLayer {
    pub grid: OccupancyGrid,
    pub style: ResolvedStyle,
}

/// A legend row: the swatch is taken from `layer`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendEntry {
    pub layer: LayerHandle,
    pub label: String,
}

/// One 3D panel.
#[derive(Debug, Clone, Default)]
pub struct Axes {
    pub title: Option<String>,
    layers: Vec<VoxelLayer>,
    legend: Vec<LegendEntry>,
    colors: ColorCycle,
}

impl Axes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw `grid` as unit cubes with `style`.
    pub fn voxels(&mut self, grid: OccupancyGrid, style: Style) -> LayerHandle {
        let style = style.resolve(&mut self.colors);
        self.layers.push(VoxelLayer { grid, style });
        LayerHandle(self.layers.len() - 1)
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    pub fn legend_entry(&mut self, layer: LayerHandle, label: impl Into<String>) {
        self.legend.push(LegendEntry {
            layer,
            label: label.into(),
        });
    }

    pub fn layers(&self) -> &[VoxelLayer] {
        &self.layers
    }

    pub fn layer(&self, handle: LayerHandle) -> &VoxelLayer {
        &self.layers[handle.0]
    }

    pub fn legend(&self) -> &[LegendEntry] {
        &self.legend
    }
}

/// A whole image: an optional super-title over one or more panels laid out
/// left to right.
#[derive(Debug, Clone, Default)]
pub struct Figure {
    pub suptitle: Option<String>,
    pub axes: Vec<Axes>,
}

impl Figure {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an empty panel and return it for drawing.
    pub fn add_axes(&mut self) -> &mut Axes {
        self.axes.push(Axes::new());
        let last = self.axes.len() - 1;
        &mut self.axes[last]
    }

    pub fn set_suptitle(&mut self, title: impl Into<String>) {
        self.suptitle = Some(title.into());
    }

    /// Total number of voxel layers over all panels.
    pub fn layer_count(&self) -> usize {
        self.axes.iter().map(|a| a.layers.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Shape3;
    use crate::style::{TAB_BLUE, TAB_ORANGE, TAB_RED};

    #[test]
    fn handles_index_layers_in_draw_order() {
        let mut axes = Axes::new();
        let a = axes.voxels(OccupancyGrid::full(Shape3::splat(2)), Style::default());
        let b = axes.voxels(
            OccupancyGrid::empty(Shape3::splat(2)),
            Style::default().fill(TAB_RED),
        );
        assert_ne!(a, b);
        assert_eq!(axes.layer(a).grid.count(), 8);
        assert_eq!(axes.layer(b).style.face, TAB_RED);
    }

    #[test]
    fn each_axes_has_its_own_color_cycle() {
        let mut fig = Figure::new();
        for _ in 0..2 {
            let ax = fig.add_axes();
            ax.voxels(OccupancyGrid::full(Shape3::splat(1)), Style::default());
            ax.voxels(OccupancyGrid::full(Shape3::splat(1)), Style::default());
        }
        for ax in &fig.axes {
            assert_eq!(ax.layers()[0].style.face, TAB_BLUE);
            assert_eq!(ax.layers()[1].style.face, TAB_ORANGE);
        }
        assert_eq!(fig.layer_count(), 4);
    }

    #[test]
    fn legend_keeps_handles() {
        let mut axes = Axes::new();
        let h = axes.voxels(OccupancyGrid::full(Shape3::splat(1)), Style::default());
        axes.legend_entry(h, "All data");
        assert_eq!(axes.legend()[0].layer, h);
        assert_eq!(axes.legend()[0].label, "All data");
    }
}
