//! Figure output: renders the figure twice (bitmap and SVG), crops both to the
//! drawn content and writes the PNG and PDF files.

use crate::panels::RouterPanels;
use crate::plot::draw_figure;
use crate::style::FigureStyle;
use anyhow::{Context, Result};
use image::{imageops, ImageFormat, RgbImage};
use log::{debug, info};
use plotters::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use svg2pdf::usvg;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("rendered bitmap does not match the {0}x{1} canvas")]
    Bitmap(u32, u32),
    #[error("figure is blank, nothing to crop")]
    Blank,
    #[error("rendered SVG has no root element")]
    MissingSvgRoot,
    #[error("failed to parse rendered SVG: {0}")]
    Svg(String),
    #[error("PDF conversion failed: {0}")]
    Pdf(String),
}

/// Pixel rectangle of the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Render the figure onto a white RGB canvas
pub fn render_bitmap(figure: &[RouterPanels], style: &FigureStyle) -> Result<RgbImage> {
    let (width, height) = style.canvas_size();
    let mut buffer = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        root.fill(&WHITE)?;
        draw_figure(&root, figure, style)?;
        root.present()?;
    }
    Ok(RgbImage::from_raw(width, height, buffer).ok_or(ExportError::Bitmap(width, height))?)
}

/// Render the figure as an SVG document of the full canvas
pub fn render_svg(figure: &[RouterPanels], style: &FigureStyle) -> Result<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, style.canvas_size()).into_drawing_area();
        root.fill(&WHITE)?;
        draw_figure(&root, figure, style)?;
        root.present()?;
    }
    Ok(svg)
}

/// Smallest rectangle holding every non-white pixel, grown by `pad` on each
/// side and clamped to the canvas. `None` for a blank image.
pub fn content_bounds(image: &RgbImage, pad: u32) -> Option<Bounds> {
    let mut min_x = u32::MAX;
    let mut min_y = u32::MAX;
    let mut max_x = 0;
    let mut max_y = 0;
    for (x, y, pixel) in image.enumerate_pixels() {
        if pixel.0 != [255, 255, 255] {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
    }
    if min_x == u32::MAX {
        return None;
    }

    let x = min_x.saturating_sub(pad);
    let y = min_y.saturating_sub(pad);
    let right = (max_x + 1 + pad).min(image.width());
    let bottom = (max_y + 1 + pad).min(image.height());
    Some(Bounds {
        x,
        y,
        width: right - x,
        height: bottom - y,
    })
}

/// Replace the root `<svg ...>` tag so the document shows only `bounds`
pub fn crop_svg(svg: &str, bounds: Bounds) -> Result<String, ExportError> {
    let start = svg.find("<svg").ok_or(ExportError::MissingSvgRoot)?;
    let end = svg[start..]
        .find('>')
        .map(|offset| start + offset + 1)
        .ok_or(ExportError::MissingSvgRoot)?;
    let root = format!(
        r#"<svg width="{w}" height="{h}" viewBox="{x} {y} {w} {h}" xmlns="http://www.w3.org/2000/svg">"#,
        w = bounds.width,
        h = bounds.height,
        x = bounds.x,
        y = bounds.y,
    );
    Ok(format!("{}{}{}", &svg[..start], root, &svg[end..]))
}

/// Convert an SVG document to a single-page PDF. Pixels map to inches at
/// `dpi`, so the page has the physical size of the figure.
pub fn svg_to_pdf(svg: &str, dpi: f64) -> Result<Vec<u8>, ExportError> {
    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();
    let tree = usvg::Tree::from_str(svg, &options).map_err(|e| ExportError::Svg(e.to_string()))?;

    let page = svg2pdf::PageOptions { dpi: dpi as f32 };
    svg2pdf::to_pdf(&tree, svg2pdf::ConversionOptions::default(), page)
        .map_err(|e| ExportError::Pdf(format!("{:?}", e)))
}

/// Write `<name>.png` and `<name>.pdf` into `output_dir`, both cropped to the
/// drawn content plus the style's padding. Returns the written paths.
pub fn write_figure<P: AsRef<Path>>(
    figure: &[RouterPanels],
    style: &FigureStyle,
    output_dir: P,
    name: &str,
) -> Result<Vec<PathBuf>> {
    let output_dir = output_dir.as_ref();
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory: {}", output_dir.display()))?;

    let bitmap = render_bitmap(figure, style).context("Failed to render bitmap")?;
    let bounds = content_bounds(&bitmap, style.crop_pad()).ok_or(ExportError::Blank)?;
    debug!("Content bounds {:?} of {}x{} canvas", bounds, bitmap.width(), bitmap.height());

    let png_path = output_dir.join(format!("{}.png", name));
    imageops::crop_imm(&bitmap, bounds.x, bounds.y, bounds.width, bounds.height)
        .to_image()
        .save_with_format(&png_path, ImageFormat::Png)
        .with_context(|| format!("Failed to write {}", png_path.display()))?;
    info!("Wrote {}", png_path.display());

    let svg = render_svg(figure, style).context("Failed to render SVG")?;
    let svg = crop_svg(&svg, bounds)?;
    let pdf = svg_to_pdf(&svg, style.dpi)?;
    let pdf_path = output_dir.join(format!("{}.pdf", name));
    fs::write(&pdf_path, pdf).with_context(|| format!("Failed to write {}", pdf_path.display()))?;
    info!("Wrote {}", pdf_path.display());

    Ok(vec![pdf_path, png_path])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panels::build_figure;
    use crate::results::{read_results, Router, HEADER};
    use image::Rgb;

    const FIXTURE: &str = "benchmark_uniform_light,0.1,5,0,100,0,0,0,0,0\n\
        benchmark_uniform_saturated,0.6,18,2.5,400,0,0,0,0,0\n\
        benchmark_transpose_heavy,0.4,9,0,250,0,0,0,0,0\n\
        hotspot_north_light,0.1,6,0,300,0,0,0,0,0\n\
        hotspot_north_south_east_west_saturated,0.5,21,4.1,1250,3,14,15,92,65\n\
        transfer_rate_PORT_LOCAL_to_PORT_NORTH,0.4,4.5,0,900,0,0,0,0,0\n\
        transfer_rate_PORT_WEST_to_PORT_EAST,0.4,6.25,0,900,0,0,0,0,0\n";

    fn fixture_figure() -> Vec<RouterPanels> {
        let csv = format!("{}{}", HEADER, FIXTURE);
        let rows: Vec<_> = Router::ALL
            .iter()
            .flat_map(|router| read_results(csv.as_bytes(), *router).unwrap())
            .collect();
        build_figure(&rows)
    }

    fn small_style() -> FigureStyle {
        FigureStyle {
            dpi: 50.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_render_bitmap_draws_inside_canvas() {
        let style = small_style();
        let bitmap = render_bitmap(&fixture_figure(), &style).unwrap();
        assert_eq!(bitmap.dimensions(), style.canvas_size());

        let bounds = content_bounds(&bitmap, style.crop_pad()).unwrap();
        let (width, height) = style.canvas_size();
        assert!(bounds.x + bounds.width <= width);
        assert!(bounds.y + bounds.height <= height);
        assert!(bounds.width * bounds.height < width * height);
    }

    #[test]
    fn test_render_svg_has_full_canvas_root() {
        let style = small_style();
        let svg = render_svg(&fixture_figure(), &style).unwrap();
        let (width, height) = style.canvas_size();
        assert!(svg.contains(&format!("width=\"{}\" height=\"{}\"", width, height)));
        assert!(svg.contains("RaveNoC"));
    }

    #[test]
    fn test_write_figure_creates_both_files() {
        let dir = std::env::temp_dir().join(format!("nocplot-write-{}", std::process::id()));
        let written = write_figure(&fixture_figure(), &small_style(), &dir, "combined_results").unwrap();

        let pdf = dir.join("combined_results.pdf");
        let png = dir.join("combined_results.png");
        assert_eq!(written, vec![pdf.clone(), png.clone()]);
        assert!(fs::read(&pdf).unwrap().starts_with(b"%PDF"));
        let cropped = image::open(&png).unwrap();
        let (width, height) = small_style().canvas_size();
        assert!(cropped.width() <= width && cropped.height() <= height);

        fs::remove_dir_all(&dir).unwrap();
    }

    fn white(width: u32, height: u32) -> RgbImage {
        RgbImage::from_pixel(width, height, Rgb([255, 255, 255]))
    }

    #[test]
    fn test_content_bounds_with_padding() {
        let mut img = white(100, 50);
        img.put_pixel(20, 10, Rgb([0, 0, 0]));
        img.put_pixel(60, 30, Rgb([200, 10, 10]));
        let bounds = content_bounds(&img, 5).unwrap();
        assert_eq!(
            bounds,
            Bounds {
                x: 15,
                y: 5,
                width: 51,
                height: 31
            }
        );
    }

    #[test]
    fn test_content_bounds_clamped_to_canvas() {
        let mut img = white(40, 40);
        img.put_pixel(1, 38, Rgb([0, 0, 0]));
        let bounds = content_bounds(&img, 10).unwrap();
        assert_eq!(bounds.x, 0);
        assert_eq!(bounds.y, 28);
        assert_eq!(bounds.x + bounds.width, 12);
        assert_eq!(bounds.y + bounds.height, 40);
    }

    #[test]
    fn test_blank_image_has_no_bounds() {
        assert_eq!(content_bounds(&white(8, 8), 2), None);
    }

    #[test]
    fn test_crop_svg_rewrites_root_only() {
        let svg = r#"<?xml version="1.0"?>
<svg width="2200" height="1100" viewBox="0 0 2200 1100" xmlns="http://www.w3.org/2000/svg">
<rect x="0" y="0" width="2200" height="1100"/>
</svg>"#;
        let bounds = Bounds {
            x: 12,
            y: 7,
            width: 2100,
            height: 1000,
        };
        let cropped = crop_svg(svg, bounds).unwrap();
        assert!(cropped.starts_with("<?xml version=\"1.0\"?>\n<svg width=\"2100\" height=\"1000\" viewBox=\"12 7 2100 1000\""));
        assert!(cropped.contains(r#"<rect x="0" y="0" width="2200" height="1100"/>"#));
        assert_eq!(cropped.matches("<svg").count(), 1);
    }

    #[test]
    fn test_crop_svg_without_root() {
        let bounds = Bounds {
            x: 0,
            y: 0,
            width: 1,
            height: 1,
        };
        assert!(matches!(crop_svg("<html>", bounds), Err(ExportError::MissingSvgRoot)));
    }
}
