//! SVG output for figures

use super::{to_hex, Figure, RenderError, Result, Viewport};
use log::debug;
use std::fmt::{self, Write as _};
use std::fs;
use std::path::Path;

/// Layout of the SVG document
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SvgOptions {
    /// Document width in pixels
    pub width: usize,
    /// Document height in pixels
    pub height: usize,
    /// Blank border around the plot area, in pixels
    pub padding: usize,
    pub font_size: usize,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            padding: 60,
            font_size: 16,
        }
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Write the SVG elements of a figure into `out`
fn write_document(
    out: &mut String,
    figure: &Figure,
    viewport: &Viewport,
    options: &SvgOptions,
) -> fmt::Result {
    let (width, height, pad) = (options.width, options.height, options.padding);
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = width,
        h = height
    )?;
    writeln!(
        out,
        r#"  <rect x="{p}" y="{p}" width="{pw}" height="{ph}" fill="{bg}"/>"#,
        p = pad,
        pw = width - 2 * pad,
        ph = height - 2 * pad,
        bg = to_hex(&figure.background)
    )?;

    for shape in figure.paint_order() {
        let points: Vec<String> = shape
            .vertices
            .iter()
            .filter(|v| v.x.is_finite() && v.y.is_finite())
            .map(|v| {
                let (x, y) = viewport.to_pixel(v);
                format!("{:.3},{:.3}", x + pad as f64, y + pad as f64)
            })
            .collect();
        writeln!(
            out,
            r#"  <polygon points="{}" fill="{c}" stroke="{c}" stroke-width="{sw}"/>"#,
            points.join(" "),
            c = to_hex(&shape.fill),
            sw = shape.stroke_width
        )?;
    }

    let font = options.font_size;
    if let Some(title) = &figure.title {
        writeln!(
            out,
            r#"  <text x="{}" y="{}" font-size="{}" text-anchor="middle">{}</text>"#,
            width / 2,
            pad / 2 + font / 2,
            font,
            escape(title)
        )?;
    }
    if let Some(xlabel) = &figure.xlabel {
        writeln!(
            out,
            r#"  <text x="{}" y="{}" font-size="{}" text-anchor="middle">{}</text>"#,
            width / 2,
            height - pad / 2 + font / 2,
            font,
            escape(xlabel)
        )?;
    }
    if let Some(ylabel) = &figure.ylabel {
        let (x, y) = (pad / 2, height / 2);
        writeln!(
            out,
            r#"  <text x="{x}" y="{y}" font-size="{f}" text-anchor="middle" transform="rotate(-90 {x} {y})">{t}</text>"#,
            x = x,
            y = y,
            f = font,
            t = escape(ylabel)
        )?;
    }
    writeln!(out, "</svg>")
}

/// Render a figure as an SVG document
pub fn render_svg(figure: &Figure, options: &SvgOptions) -> Result<String> {
    let (width, height, pad) = (options.width, options.height, options.padding);
    if width <= 2 * pad || height <= 2 * pad {
        return Err(RenderError::InvalidSize { width, height });
    }
    let bounds = figure.autoscale().ok_or(RenderError::EmptyFigure)?;
    let plot_w = (width - 2 * pad) as f64;
    let plot_h = (height - 2 * pad) as f64;
    let viewport = Viewport::fit(bounds, plot_w, plot_h, 1.0);

    let mut out = String::new();
    write_document(&mut out, figure, &viewport, options)?;

    debug!(
        "Rendered {} shapes into a {}x{} SVG",
        figure.shapes().len(),
        width,
        height
    );
    Ok(out)
}

/// Render a figure and write it to `path`
pub fn write_svg<P: AsRef<Path>>(figure: &Figure, path: P, options: &SvgOptions) -> Result<()> {
    let document = render_svg(figure, options)?;
    fs::write(path.as_ref(), document)?;
    Ok(())
}
