//! Drawing surfaces for phase silhouettes
//!
//! The geometry code only needs something that accepts filled polygons
//! ([`DrawingSurface`]). [`Figure`] is the in-memory surface used by the
//! driver; it can be written out as SVG ([`svg`]) or rasterised for a
//! terminal preview ([`raster`]).

pub mod raster;
pub mod svg;

use nalgebra::Point2;
use palette::Srgb;
use std::str::FromStr;
use thiserror::Error;

/// Fill and stroke colour
pub type Color = Srgb<f32>;

/// Error type for rendering operations
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Nothing to draw: figure has no shapes")]
    EmptyFigure,

    #[error("Invalid output size: {width}x{height}")]
    InvalidSize { width: usize, height: usize },

    #[error("Formatting error: {0}")]
    FormatError(#[from] std::fmt::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for rendering operations
pub type Result<T> = std::result::Result<T, RenderError>;

/// Parse a colour specification.
///
/// Accepts a grey level in `[0, 1]` (`"0.85"`), a hex triplet (`"#d9d9d9"`)
/// or a CSS colour name (`"white"`).
pub fn parse_color(spec: &str) -> Result<Color> {
    let spec = spec.trim();

    if let Ok(level) = spec.parse::<f32>() {
        return if (0.0..=1.0).contains(&level) {
            Ok(gray(level))
        } else {
            Err(RenderError::InvalidColor(spec.to_string()))
        };
    }

    if spec.starts_with('#') {
        return Srgb::<u8>::from_str(spec)
            .map(|c| c.into_format())
            .map_err(|_| RenderError::InvalidColor(spec.to_string()));
    }

    palette::named::from_str(&spec.to_lowercase())
        .map(|c| c.into_format())
        .ok_or_else(|| RenderError::InvalidColor(spec.to_string()))
}

/// Grey of the given level (0 = black, 1 = white)
pub fn gray(level: f32) -> Color {
    Srgb::new(level, level, level)
}

/// Hex triplet (`#rrggbb`) of a colour
pub fn to_hex(color: &Color) -> String {
    let c: Srgb<u8> = color.into_format();
    format!("#{:02x}{:02x}{:02x}", c.red, c.green, c.blue)
}

/// Perceived brightness of a colour in `[0, 1]` (Rec. 709 weights)
pub fn luminance(color: &Color) -> f32 {
    0.2126 * color.red + 0.7152 * color.green + 0.0722 * color.blue
}

/// A filled polygon handed to a drawing surface
#[derive(Debug, Clone, PartialEq)]
pub struct FilledPolygon {
    /// Vertices in data coordinates; the polygon is implicitly closed
    pub vertices: Vec<Point2<f64>>,
    pub fill: Color,
    pub stroke_width: f64,
    /// Shapes with a higher z-order are drawn on top
    pub z_order: i32,
}

impl FilledPolygon {
    pub fn new(vertices: Vec<Point2<f64>>, fill: Color, stroke_width: f64, z_order: i32) -> Self {
        Self {
            vertices,
            fill,
            stroke_width,
            z_order,
        }
    }
}

/// Anything that accepts filled polygons
pub trait DrawingSurface {
    fn add_polygon(&mut self, polygon: FilledPolygon);
}

/// Axis-aligned data bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Bounding box of a set of points; `None` when there are no finite points
    pub fn of_points<'a, I: IntoIterator<Item = &'a Point2<f64>>>(points: I) -> Option<Self> {
        let mut bounds: Option<Bounds> = None;
        for p in points
            .into_iter()
            .filter(|p| p.x.is_finite() && p.y.is_finite())
        {
            bounds = Some(match bounds {
                None => Bounds {
                    min_x: p.x,
                    max_x: p.x,
                    min_y: p.y,
                    max_y: p.y,
                },
                Some(b) => Bounds {
                    min_x: b.min_x.min(p.x),
                    max_x: b.max_x.max(p.x),
                    min_y: b.min_y.min(p.y),
                    max_y: b.max_y.max(p.y),
                },
            });
        }
        bounds
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Grow each side by `fraction` of the box size (a degenerate side grows by `fraction`)
    pub fn with_margin(&self, fraction: f64) -> Self {
        let dx = if self.width() > 0.0 {
            self.width() * fraction
        } else {
            fraction
        };
        let dy = if self.height() > 0.0 {
            self.height() * fraction
        } else {
            fraction
        };
        Bounds {
            min_x: self.min_x - dx,
            max_x: self.max_x + dx,
            min_y: self.min_y - dy,
            max_y: self.max_y + dy,
        }
    }
}

/// Mapping from data coordinates to an output grid with y pointing down.
///
/// `pixel_aspect` is the height of one output cell divided by its width
/// (1 for images, about 2 for terminal characters). Data units keep equal
/// aspect on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub bounds: Bounds,
    scale_x: f64,
    scale_y: f64,
    offset_x: f64,
    offset_y: f64,
}

impl Viewport {
    /// Fit `bounds` centred inside a `width` x `height` grid
    pub fn fit(bounds: Bounds, width: f64, height: f64, pixel_aspect: f64) -> Self {
        let scale_x = (width / bounds.width()).min(height * pixel_aspect / bounds.height());
        let scale_y = scale_x / pixel_aspect;
        Viewport {
            bounds,
            scale_x,
            scale_y,
            offset_x: (width - bounds.width() * scale_x) / 2.0,
            offset_y: (height - bounds.height() * scale_y) / 2.0,
        }
    }

    pub fn to_pixel(&self, p: &Point2<f64>) -> (f64, f64) {
        (
            self.offset_x + (p.x - self.bounds.min_x) * self.scale_x,
            self.offset_y + (self.bounds.max_y - p.y) * self.scale_y,
        )
    }

    pub fn to_data(&self, px: f64, py: f64) -> Point2<f64> {
        Point2::new(
            self.bounds.min_x + (px - self.offset_x) / self.scale_x,
            self.bounds.max_y - (py - self.offset_y) / self.scale_y,
        )
    }
}

/// Relative margin added around the shapes when autoscaling
pub const AUTOSCALE_MARGIN: f64 = 0.05;

/// In-memory figure: a list of shapes plus annotations
#[derive(Debug, Clone)]
pub struct Figure {
    pub title: Option<String>,
    pub xlabel: Option<String>,
    pub ylabel: Option<String>,
    pub background: Color,
    shapes: Vec<FilledPolygon>,
}

impl Default for Figure {
    fn default() -> Self {
        Self::new()
    }
}

impl Figure {
    pub fn new() -> Self {
        Self {
            title: None,
            xlabel: None,
            ylabel: None,
            background: gray(1.0),
            shapes: Vec::new(),
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn with_labels(mut self, xlabel: &str, ylabel: &str) -> Self {
        self.xlabel = Some(xlabel.to_string());
        self.ylabel = Some(ylabel.to_string());
        self
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Shapes in insertion order
    pub fn shapes(&self) -> &[FilledPolygon] {
        &self.shapes
    }

    /// Shapes in paint order: by z-order, then insertion order
    pub fn paint_order(&self) -> Vec<&FilledPolygon> {
        let mut ordered: Vec<&FilledPolygon> = self.shapes.iter().collect();
        ordered.sort_by_key(|s| s.z_order);
        ordered
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Data bounds of every shape, grown by [`AUTOSCALE_MARGIN`]
    pub fn autoscale(&self) -> Option<Bounds> {
        Bounds::of_points(self.shapes.iter().flat_map(|s| s.vertices.iter()))
            .map(|b| b.with_margin(AUTOSCALE_MARGIN))
    }
}

impl DrawingSurface for Figure {
    fn add_polygon(&mut self, polygon: FilledPolygon) {
        self.shapes.push(polygon);
    }
}

impl<S: DrawingSurface + ?Sized> DrawingSurface for &mut S {
    fn add_polygon(&mut self, polygon: FilledPolygon) {
        (**self).add_polygon(polygon)
    }
}
