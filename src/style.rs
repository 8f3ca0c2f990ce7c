//! Per-layer rendering attributes and the colour palette the figures use.

use plotters::style::RGBColor;

pub const BLACK: RGBColor = RGBColor(0, 0, 0);

// "tab10" qualitative palette, in cycle order.
pub const TAB_BLUE: RGBColor = RGBColor(0x1f, 0x77, 0xb4);
pub const TAB_ORANGE: RGBColor = RGBColor(0xff, 0x7f, 0x0e);
pub const TAB_GREEN: RGBColor = RGBColor(0x2c, 0xa0, 0x2c);
pub const TAB_RED: RGBColor = RGBColor(0xd6, 0x27, 0x28);
pub const TAB_PURPLE: RGBColor = RGBColor(0x94, 0x67, 0xbd);
pub const TAB_BROWN: RGBColor = RGBColor(0x8c, 0x56, 0x4b);
pub const TAB_PINK: RGBColor = RGBColor(0xe3, 0x77, 0xc2);
pub const TAB_GRAY: RGBColor = RGBColor(0x7f, 0x7f, 0x7f);
pub const TAB_OLIVE: RGBColor = RGBColor(0xbc, 0xbd, 0x22);
pub const TAB_CYAN: RGBColor = RGBColor(0x17, 0xbe, 0xcf);

pub const TAB10: [RGBColor; 10] = [
    TAB_BLUE, TAB_ORANGE, TAB_GREEN, TAB_RED, TAB_PURPLE, TAB_BROWN, TAB_PINK, TAB_GRAY,
    TAB_OLIVE, TAB_CYAN,
];

/// Endless iterator over the default fill colours.
///
/// Every axes owns its own cycle, so each panel starts again at blue.
#[derive(Debug, Clone, Default)]
pub struct ColorCycle {
    next: usize,
}

impl Iterator for ColorCycle {
    type Item = RGBColor;

    fn next(&mut self) -> Option<RGBColor> {
        let color = TAB10[self.next % TAB10.len()];
        self.next += 1;
        Some(color)
    }
}

/// Fill colour choice for a layer: fixed, or the next colour from the
/// axes' cycle at the moment the layer is added.
#[derive(Debug, Clone, Copy)]
pub enum Fill {
    Cycle,
    Color(RGBColor),
}

/// How one voxel layer is painted. Line widths are in points.
#[derive(Debug, Clone, Copy)]
pub struct Style {
    pub fill: Fill,
    pub edge: RGBColor,
    pub line_width: f64,
    pub alpha: f64,
    pub shade: bool,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: Fill::Cycle,
            edge: BLACK,
            line_width: 1.0,
            alpha: 1.0,
            shade: false,
        }
    }
}

impl Style {
    pub fn fill(mut self, color: RGBColor) -> Self {
        self.fill = Fill::Color(color);
        self
    }

    pub fn edge(mut self, color: RGBColor) -> Self {
        self.edge = color;
        self
    }

    pub fn line_width(mut self, width: f64) -> Self {
        self.line_width = width;
        self
    }

    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn shade(mut self, shade: bool) -> Self {
        self.shade = shade;
        self
    }
}

/// A style whose fill colour has been settled.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedStyle {
    pub face: RGBColor,
    pub edge: RGBColor,
    pub line_width: f64,
    pub alpha: f64,
    pub shade: bool,
}

impl Style {
    pub fn resolve(&self, cycle: &mut ColorCycle) -> ResolvedStyle {
        let face = match self.fill {
            Fill::Color(c) => c,
            Fill::Cycle => cycle.next().unwrap_or(TAB_BLUE),
        };
        ResolvedStyle {
            face,
            edge: self.edge,
            line_width: self.line_width,
            alpha: self.alpha,
            shade: self.shade,
        }
    }
}

/// Scale an RGB colour towards black.
pub fn darken(color: RGBColor, factor: f64) -> RGBColor {
    let f = factor.clamp(0.0, 1.0);
    let scale = |c: u8| (f64::from(c) * f).round() as u8;
    RGBColor(scale(color.0), scale(color.1), scale(color.2))
}
