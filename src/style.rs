//! Figure styling: palette, markers, font sizes and canvas geometry.

use crate::classify::{BenchPattern, HotspotDegree};
use plotters::style::{FontDesc, FontStyle, IntoFont, RGBColor};
use serde::Serialize;

/// Light yellow
pub const YELLOW: RGBColor = RGBColor(0xED, 0xE5, 0x69);
/// Light green
pub const GREEN: RGBColor = RGBColor(0x6E, 0xC7, 0x91);
/// Medium blue
pub const TEAL: RGBColor = RGBColor(0x3D, 0xAA, 0xB8);
/// Dark blue
pub const NAVY: RGBColor = RGBColor(0x21, 0x5B, 0xA3);

/// Marker drawn at each data point of a series (sizes in points)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Marker {
    /// Filled circle
    Dot { size: f64 },
    /// Unfilled circle
    Ring { size: f64, stroke: f64 },
    /// Diagonal cross
    Cross { size: f64, stroke: f64 },
}

/// Plain filled dot
const DEFAULT_MARKER: Marker = Marker::Dot { size: 6.0 };

pub fn pattern_color(pattern: BenchPattern) -> RGBColor {
    match pattern {
        BenchPattern::Uniform => YELLOW,
        BenchPattern::Transpose => TEAL,
        BenchPattern::Hotspot => NAVY,
    }
}

pub fn pattern_marker(pattern: BenchPattern) -> Marker {
    match pattern {
        BenchPattern::Uniform => DEFAULT_MARKER,
        BenchPattern::Transpose => Marker::Ring { size: 9.0, stroke: 1.5 },
        BenchPattern::Hotspot => Marker::Cross { size: 8.0, stroke: 1.5 },
    }
}

pub fn degree_color(degree: HotspotDegree) -> RGBColor {
    match degree.get() {
        1 => YELLOW,
        2 => GREEN,
        3 => TEAL,
        _ => NAVY,
    }
}

pub fn degree_marker(_degree: HotspotDegree) -> Marker {
    DEFAULT_MARKER
}

/// ColorBrewer YlGnBu, light to dark
const YLGNBU: [(u8, u8, u8); 9] = [
    (0xFF, 0xFF, 0xD9),
    (0xED, 0xF8, 0xB1),
    (0xC7, 0xE9, 0xB4),
    (0x7F, 0xCD, 0xBB),
    (0x41, 0xB6, 0xC4),
    (0x1D, 0x91, 0xC0),
    (0x22, 0x5E, 0xA8),
    (0x25, 0x34, 0x94),
    (0x08, 0x1D, 0x58),
];

/// Heatmap colour for `t` in 0..=1 (clamped)
pub fn ylgnbu(t: f64) -> RGBColor {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let scaled = t * (YLGNBU.len() - 1) as f64;
    let lower = (scaled.floor() as usize).min(YLGNBU.len() - 2);
    let frac = scaled - lower as f64;
    let (r0, g0, b0) = YLGNBU[lower];
    let (r1, g1, b1) = YLGNBU[lower + 1];
    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
    RGBColor(lerp(r0, r1), lerp(g0, g1), lerp(b0, b1))
}

/// Relative luminance of an sRGB colour
pub fn luminance(color: RGBColor) -> f64 {
    let linear = |c: u8| {
        let c = c as f64 / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    0.2126 * linear(color.0) + 0.7152 * linear(color.1) + 0.0722 * linear(color.2)
}

/// Font sizes in points
#[derive(Debug, Clone, Serialize)]
pub struct FontSizes {
    pub router: f64,
    pub title: f64,
    pub label: f64,
    pub tick: f64,
    pub loss: f64,
}

impl Default for FontSizes {
    fn default() -> Self {
        Self {
            router: 20.0,
            title: 18.0,
            label: 17.0,
            tick: 16.0,
            loss: 14.0,
        }
    }
}

/// Figure configuration
#[derive(Debug, Clone, Serialize)]
pub struct FigureStyle {
    /// Figure width (inches)
    pub width_in: f64,
    /// Figure height (inches)
    pub height_in: f64,
    /// Output resolution (dots per inch)
    pub dpi: f64,
    /// Font family for all text
    pub font_family: String,
    pub fonts: FontSizes,
    /// Line width of the data series (points)
    pub line_width: f64,
    /// Fraction of the figure height reserved below the grid for legends
    pub legend_band: f64,
    /// Legend baseline above the bottom edge, as a fraction of the height
    pub legend_y: f64,
    /// Key box centre above the legend baseline, as a fraction of the height
    pub key_offset: f64,
    /// Whitespace kept around the drawn content when cropping (inches)
    pub crop_pad_in: f64,
    /// Fraction of the panel height covered by a heatmap colour bar
    pub colorbar_shrink: f64,
}

impl Default for FigureStyle {
    fn default() -> Self {
        Self {
            width_in: 22.0,
            height_in: 11.0,
            dpi: 100.0,
            font_family: "serif".to_string(),
            fonts: FontSizes::default(),
            line_width: 1.5,
            legend_band: 0.055,
            legend_y: 0.012,
            key_offset: 0.0415,
            crop_pad_in: 0.1,
            colorbar_shrink: 0.7,
        }
    }
}

impl FigureStyle {
    /// Canvas size in pixels
    pub fn canvas_size(&self) -> (u32, u32) {
        (
            (self.width_in * self.dpi).round() as u32,
            (self.height_in * self.dpi).round() as u32,
        )
    }

    /// Convert points to pixels at the configured resolution
    pub fn px(&self, points: f64) -> f64 {
        points * self.dpi / 72.0
    }

    /// Convert points to whole pixels, never less than one
    pub fn px_u32(&self, points: f64) -> u32 {
        self.px(points).round().max(1.0) as u32
    }

    pub fn font(&self, points: f64) -> FontDesc<'_> {
        (self.font_family.as_str(), self.px(points)).into_font()
    }

    pub fn bold_font(&self, points: f64) -> FontDesc<'_> {
        self.font(points).style(FontStyle::Bold)
    }

    /// Crop padding in pixels
    pub fn crop_pad(&self) -> u32 {
        (self.crop_pad_in * self.dpi).round() as u32
    }
}
