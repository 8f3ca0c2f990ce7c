//! Rasterises a [`Figure`] into a PNG.
//!
//! Layout is computed in points (1/72 inch) and scaled to pixels by the
//! requested DPI. The canvas is sized from the projected voxels, titles and
//! legend plus a small pad, so the output is always cropped to its content.

use std::path::Path;

use log::{debug, info};
use nalgebra::Vector3;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::error::{FigureError, Result};
use crate::figure::{Axes, Figure};
use crate::projection::{exposed_faces, Camera};
use crate::style::{darken, ResolvedStyle};

const POINTS_PER_INCH: f64 = 72.0;
// 0.1 inch around the content
const PAD: f64 = 7.2;
// Side of the square each panel's voxels are fitted into.
const PLOT_BOX: f64 = 300.0;
const PANEL_GAP: f64 = 14.0;
const TITLE_SIZE: f64 = 12.0;
const SUPTITLE_SIZE: f64 = 14.0;
const LEGEND_SIZE: f64 = 10.0;
const LINE_SPACING: f64 = 1.3;
// Rough advance of one glyph, as a fraction of the font size.
const GLYPH_WIDTH: f64 = 0.55;
const LEGEND_GAP: f64 = 10.0;
const LEGEND_PAD: f64 = 6.0;
const SWATCH_WIDTH: f64 = 20.0;
const SWATCH_HEIGHT: f64 = 7.0;
// Where the legend centre sits, as a fraction of the plot width.
const LEGEND_ANCHOR: f64 = 0.8;
const FONT: &str = "sans-serif";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub dpi: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { dpi: 300 }
    }
}

impl RenderOptions {
    /// Pixels per point.
    pub fn scale(&self) -> f64 {
        f64::from(self.dpi) / POINTS_PER_INCH
    }
}

/// A face after projection, in model units with y pointing up.
#[derive(Debug, Clone)]
pub struct ProjectedFace {
    pub points: [(f64, f64); 4],
    pub depth: f64,
    pub layer: usize,
    /// Multiplier applied to the fill colour, 1.0 for unshaded layers.
    pub brightness: f64,
}

/// Everything needed to paint one panel.
#[derive(Debug, Clone)]
pub struct PanelLayout {
    pub faces: Vec<ProjectedFace>,
    pub styles: Vec<ResolvedStyle>,
    pub title: Vec<String>,
    pub legend: Vec<(ResolvedStyle, String)>,
    min: (f64, f64),
    max: (f64, f64),
    /// Points per model unit.
    zoom: f64,
    pub width: f64,
    pub height: f64,
}

fn text_width(text: &str, size: f64) -> f64 {
    text.chars().count() as f64 * size * GLYPH_WIDTH
}

fn block_height(lines: usize, size: f64) -> f64 {
    lines as f64 * size * LINE_SPACING
}

fn light_direction() -> Vector3<f64> {
    Vector3::new(-1.0, -1.0, 1.0).normalize()
}

impl PanelLayout {
    pub fn new(axes: &Axes, camera: &Camera) -> Self {
        let basis = camera.basis();
        let light = light_direction();
        let mut faces = Vec::new();
        for (layer, voxel_layer) in axes.layers().iter().enumerate() {
            for face in exposed_faces(&voxel_layer.grid) {
                let mut points = [(0.0, 0.0); 4];
                for (slot, corner) in points.iter_mut().zip(face.corners.iter()) {
                    let (x, y, _) = Camera::project(&basis, corner);
                    *slot = (x, y);
                }
                let (_, _, depth) = Camera::project(&basis, &face.centroid());
                let brightness = if voxel_layer.style.shade {
                    0.5 + 0.5 * face.normal.dot(&light).max(0.0)
                } else {
                    1.0
                };
                faces.push(ProjectedFace {
                    points,
                    depth,
                    layer,
                    brightness,
                });
            }
        }
        // painter's order, later layers win ties
        faces.sort_by(|a, b| a.depth.total_cmp(&b.depth).then(a.layer.cmp(&b.layer)));

        let mut min = (f64::INFINITY, f64::INFINITY);
        let mut max = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for (x, y) in faces.iter().flat_map(|f| f.points.iter()) {
            min = (min.0.min(*x), min.1.min(*y));
            max = (max.0.max(*x), max.1.max(*y));
        }
        if faces.is_empty() {
            min = (0.0, 0.0);
            max = (1.0, 1.0);
        }
        let zoom = (PLOT_BOX / (max.0 - min.0)).min(PLOT_BOX / (max.1 - min.1));

        let title: Vec<String> = axes
            .title
            .as_deref()
            .map(|t| t.lines().map(str::to_owned).collect())
            .unwrap_or_default();
        let legend: Vec<(ResolvedStyle, String)> = axes
            .legend()
            .iter()
            .map(|entry| (axes.layer(entry.layer).style, entry.label.clone()))
            .collect();

        let mut layout = Self {
            faces,
            styles: axes.layers().iter().map(|l| l.style).collect(),
            title,
            legend,
            min,
            max,
            zoom,
            width: 0.0,
            height: 0.0,
        };
        let title_width = layout
            .title
            .iter()
            .map(|l| text_width(l, TITLE_SIZE))
            .fold(0.0, f64::max);
        layout.width = layout
            .plot_width()
            .max(title_width)
            .max(layout.legend_width());
        layout.height = layout.title_height() + layout.plot_height() + layout.legend_height();
        layout
    }

    pub fn plot_width(&self) -> f64 {
        (self.max.0 - self.min.0) * self.zoom
    }

    pub fn plot_height(&self) -> f64 {
        (self.max.1 - self.min.1) * self.zoom
    }

    fn title_height(&self) -> f64 {
        block_height(self.title.len(), TITLE_SIZE)
    }

    fn legend_width(&self) -> f64 {
        if self.legend.is_empty() {
            return 0.0;
        }
        let label = self
            .legend
            .iter()
            .map(|(_, l)| text_width(l, LEGEND_SIZE))
            .fold(0.0, f64::max);
        2.0 * LEGEND_PAD + SWATCH_WIDTH + LEGEND_PAD + label
    }

    fn legend_box_height(&self) -> f64 {
        2.0 * LEGEND_PAD + block_height(self.legend.len(), LEGEND_SIZE)
    }

    fn legend_height(&self) -> f64 {
        if self.legend.is_empty() {
            0.0
        } else {
            LEGEND_GAP + self.legend_box_height()
        }
    }

    /// Left edge of the legend box for a panel starting at `left`: centred on
    /// the anchor, but never outside the panel.
    fn legend_left(&self, left: f64) -> f64 {
        let box_w = self.legend_width();
        let slack = self.width - box_w;
        if slack <= 0.0 {
            return left;
        }
        let plot_left = left + (self.width - self.plot_width()) / 2.0;
        (plot_left + LEGEND_ANCHOR * self.plot_width() - box_w / 2.0)
            .max(left)
            .min(left + slack)
    }

    /// Maps model coordinates into points, relative to the plot's top-left.
    fn to_plot(&self, (x, y): (f64, f64)) -> (f64, f64) {
        ((x - self.min.0) * self.zoom, (self.max.1 - y) * self.zoom)
    }
}

/// Sizes and positions of every panel of a figure.
#[derive(Debug, Clone)]
pub struct FigureLayout {
    pub suptitle: Option<String>,
    pub panels: Vec<PanelLayout>,
    /// Canvas size in points.
    pub width: f64,
    pub height: f64,
}

impl FigureLayout {
    pub fn new(figure: &Figure, camera: &Camera) -> Self {
        let panels: Vec<PanelLayout> = figure
            .axes
            .iter()
            .map(|axes| PanelLayout::new(axes, camera))
            .collect();
        let panels_width = panels.iter().map(|p| p.width).sum::<f64>()
            + PANEL_GAP * panels.len().saturating_sub(1) as f64;
        let panels_height = panels.iter().map(|p| p.height).fold(0.0, f64::max);
        let suptitle_width = figure
            .suptitle
            .as_deref()
            .map_or(0.0, |t| text_width(t, SUPTITLE_SIZE));

        let mut layout = Self {
            suptitle: figure.suptitle.clone(),
            panels,
            width: 0.0,
            height: 0.0,
        };
        layout.width = 2.0 * PAD + panels_width.max(suptitle_width);
        layout.height = 2.0 * PAD + layout.suptitle_height() + panels_height;
        layout
    }

    fn suptitle_height(&self) -> f64 {
        if self.suptitle.is_some() {
            block_height(1, SUPTITLE_SIZE)
        } else {
            0.0
        }
    }

    pub fn pixel_size(&self, options: &RenderOptions) -> (u32, u32) {
        let s = options.scale();
        (
            (self.width * s).ceil().max(1.0) as u32,
            (self.height * s).ceil().max(1.0) as u32,
        )
    }

    /// Top-left corner of each panel in points, centred horizontally when the
    /// super-title is wider than the panels.
    fn panel_origins(&self) -> Vec<(f64, f64)> {
        let total = self.panels.iter().map(|p| p.width).sum::<f64>()
            + PANEL_GAP * self.panels.len().saturating_sub(1) as f64;
        let mut x = (self.width - total) / 2.0;
        let top = PAD + self.suptitle_height();
        self.panels
            .iter()
            .map(|p| {
                let origin = (x, top);
                x += p.width + PANEL_GAP;
                origin
            })
            .collect()
    }
}

fn px(v: f64, s: f64) -> i32 {
    (v * s).round() as i32
}

/// Paints the voxel faces of every panel, far to near, without any text.
pub fn paint_faces<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    layout: &FigureLayout,
    options: &RenderOptions,
) -> Result<()> {
    let s = options.scale();
    for (panel, (left, top)) in layout.panels.iter().zip(layout.panel_origins()) {
        let ox = left + (panel.width - panel.plot_width()) / 2.0;
        let oy = top + panel.title_height();
        for face in &panel.faces {
            let style = &panel.styles[face.layer];
            let points: Vec<(i32, i32)> = face
                .points
                .iter()
                .map(|&p| {
                    let (x, y) = panel.to_plot(p);
                    (px(ox + x, s), px(oy + y, s))
                })
                .collect();

            let fill = darken(style.face, face.brightness).mix(style.alpha);
            area.draw(&Polygon::new(points.clone(), fill.filled()))
                .map_err(FigureError::drawing)?;

            // hairlines narrower than a pixel are drawn one pixel wide but fainter
            let width = style.line_width * s;
            let edge_alpha = style.alpha * width.min(1.0);
            if edge_alpha <= 0.0 {
                continue;
            }
            let mut outline = points;
            outline.push(outline[0]);
            let stroke = style
                .edge
                .mix(edge_alpha)
                .stroke_width(width.round().max(1.0) as u32);
            area.draw(&PathElement::new(outline, stroke))
                .map_err(FigureError::drawing)?;
        }
    }
    Ok(())
}

fn paint_text<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    layout: &FigureLayout,
    options: &RenderOptions,
) -> Result<()> {
    let s = options.scale();
    let centred = |size: f64| {
        (FONT, size * s)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Top))
    };

    if let Some(title) = &layout.suptitle {
        area.draw_text(
            title,
            &centred(SUPTITLE_SIZE),
            (px(layout.width / 2.0, s), px(PAD, s)),
        )
        .map_err(FigureError::drawing)?;
    }

    for (panel, (left, top)) in layout.panels.iter().zip(layout.panel_origins()) {
        let centre = left + panel.width / 2.0;
        for (i, line) in panel.title.iter().enumerate() {
            let y = top + block_height(i, TITLE_SIZE);
            area.draw_text(line, &centred(TITLE_SIZE), (px(centre, s), px(y, s)))
                .map_err(FigureError::drawing)?;
        }
        if panel.legend.is_empty() {
            continue;
        }

        let box_w = panel.legend_width();
        let box_h = panel.legend_box_height();
        let bx = panel.legend_left(left);
        let by = top + panel.title_height() + panel.plot_height() + LEGEND_GAP;

        let frame = [(px(bx, s), px(by, s)), (px(bx + box_w, s), px(by + box_h, s))];
        area.draw(&Rectangle::new(frame, WHITE.mix(0.8).filled()))
            .map_err(FigureError::drawing)?;
        area.draw(&Rectangle::new(frame, RGBColor(204, 204, 204).stroke_width(1)))
            .map_err(FigureError::drawing)?;

        let label_style = (FONT, LEGEND_SIZE * s)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Left, VPos::Center));
        for (i, (style, label)) in panel.legend.iter().enumerate() {
            let row_centre = by + LEGEND_PAD + block_height(i, LEGEND_SIZE)
                + block_height(1, LEGEND_SIZE) / 2.0;
            let sx = bx + LEGEND_PAD;
            let swatch = [
                (px(sx, s), px(row_centre - SWATCH_HEIGHT / 2.0, s)),
                (
                    px(sx + SWATCH_WIDTH, s),
                    px(row_centre + SWATCH_HEIGHT / 2.0, s),
                ),
            ];
            area.draw(&Rectangle::new(swatch, style.face.mix(style.alpha).filled()))
                .map_err(FigureError::drawing)?;
            area.draw(&Rectangle::new(
                swatch,
                style.edge.mix(style.alpha).stroke_width(1),
            ))
            .map_err(FigureError::drawing)?;
            area.draw_text(
                label,
                &label_style,
                (px(sx + SWATCH_WIDTH + LEGEND_PAD, s), px(row_centre, s)),
            )
            .map_err(FigureError::drawing)?;
        }
    }
    Ok(())
}

/// Paints a laid-out figure onto any plotters drawing area.
pub fn paint<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    layout: &FigureLayout,
    options: &RenderOptions,
) -> Result<()> {
    area.fill(&WHITE).map_err(FigureError::drawing)?;
    paint_faces(area, layout, options)?;
    paint_text(area, layout, options)
}

/// Renders `figure` to a PNG at `path`. The parent directory must exist.
pub fn render_to_file(figure: &Figure, path: &Path, options: &RenderOptions) -> Result<()> {
    let layout = FigureLayout::new(figure, &Camera::default());
    let (w, h) = layout.pixel_size(options);
    let face_count: usize = layout.panels.iter().map(|p| p.faces.len()).sum();
    debug!(
        "{} panels, {} faces, canvas {}x{} px at {} dpi",
        layout.panels.len(),
        face_count,
        w,
        h,
        options.dpi
    );

    let root = BitMapBackend::new(path, (w, h)).into_drawing_area();
    paint(&root, &layout, options)?;
    root.present().map_err(FigureError::drawing)?;
    info!("wrote {}", path.display());
    Ok(())
}
