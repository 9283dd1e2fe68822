//! Rasterisation of figures into luminance grids and ASCII previews

use super::{luminance, Figure, FilledPolygon, RenderError, Result, Viewport};
use ndarray::Array2;

/// Characters from dark to bright
const ASCII_RAMP: &[u8] = b" .:-=+*#%@";

/// Height-to-width ratio of a terminal character cell
pub const TERMINAL_CELL_ASPECT: f64 = 2.0;

/// Fallback terminal size when it cannot be detected
const DEFAULT_TERMINAL: (usize, usize) = (80, 24);

/// X coordinates where a horizontal line crosses the polygon outline, sorted
fn scanline_crossings(polygon: &FilledPolygon, y: f64) -> Vec<f64> {
    let vertices = &polygon.vertices;
    let n = vertices.len();
    let mut crossings = Vec::new();

    for i in 0..n {
        let a = &vertices[i];
        let b = &vertices[(i + 1) % n];
        // Half-open rule so shared vertices are counted once
        if (a.y <= y) != (b.y <= y) {
            let t = (y - a.y) / (b.y - a.y);
            crossings.push(a.x + t * (b.x - a.x));
        }
    }

    crossings.retain(|x| x.is_finite());
    crossings.sort_by(|a, b| a.total_cmp(b));
    crossings
}

/// Fill one polygon into the grid with the even-odd rule, sampling pixel centres
fn fill_polygon(grid: &mut Array2<f32>, viewport: &Viewport, polygon: &FilledPolygon) {
    let (rows, cols) = grid.dim();
    let value = luminance(&polygon.fill);

    for row in 0..rows {
        let y = viewport.to_data(0.0, row as f64 + 0.5).y;
        let crossings = scanline_crossings(polygon, y);

        for span in crossings.chunks_exact(2) {
            let (start, _) = viewport.to_pixel(&nalgebra::Point2::new(span[0], y));
            let (end, _) = viewport.to_pixel(&nalgebra::Point2::new(span[1], y));

            // Pixel centres c + 0.5 within [start, end)
            let first = (start - 0.5).ceil().max(0.0) as usize;
            let last = (end - 0.5).ceil().min(cols as f64);
            if last <= 0.0 {
                continue;
            }
            for col in first..(last as usize) {
                grid[[row, col]] = value;
            }
        }
    }
}

/// Rasterise a figure into a `rows x cols` luminance grid in `[0, 1]`.
///
/// Shapes are painted in z-order over the figure background.
pub fn rasterize(
    figure: &Figure,
    cols: usize,
    rows: usize,
    pixel_aspect: f64,
) -> Result<Array2<f32>> {
    if cols == 0 || rows == 0 {
        return Err(RenderError::InvalidSize {
            width: cols,
            height: rows,
        });
    }
    let bounds = figure.autoscale().ok_or(RenderError::EmptyFigure)?;
    let viewport = Viewport::fit(bounds, cols as f64, rows as f64, pixel_aspect);

    let mut grid = Array2::from_elem((rows, cols), luminance(&figure.background));
    for shape in figure.paint_order() {
        fill_polygon(&mut grid, &viewport, shape);
    }
    Ok(grid)
}

/// Map a luminance grid to text, one line per row
pub fn to_ascii(grid: &Array2<f32>) -> String {
    let last = (ASCII_RAMP.len() - 1) as f32;
    let mut out = String::with_capacity(grid.len() + grid.nrows());

    for row in grid.rows() {
        let line: String = row
            .iter()
            .map(|&v| ASCII_RAMP[(v.clamp(0.0, 1.0) * last).round() as usize] as char)
            .collect();
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// ASCII preview of a figure sized to the current terminal
pub fn terminal_preview(figure: &Figure) -> Result<String> {
    let (cols, rows) = term_size::dimensions().unwrap_or(DEFAULT_TERMINAL);
    // Leave room for the prompt and the title line
    let rows = rows.saturating_sub(3).max(1);
    let grid = rasterize(figure, cols, rows, TERMINAL_CELL_ASPECT)?;

    let mut out = String::new();
    if let Some(title) = &figure.title {
        out.push_str(title);
        out.push('\n');
    }
    out.push_str(&to_ascii(&grid));
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{gray, DrawingSurface};
    use nalgebra::Point2;

    fn square(min: f64, max: f64, level: f32, z_order: i32) -> FilledPolygon {
        FilledPolygon::new(
            vec![
                Point2::new(min, min),
                Point2::new(max, min),
                Point2::new(max, max),
                Point2::new(min, max),
            ],
            gray(level),
            1.0,
            z_order,
        )
    }

    #[test]
    fn test_scanline_crossings_of_square() {
        let sq = square(0.0, 1.0, 1.0, 1);
        assert_eq!(scanline_crossings(&sq, 0.5), vec![0.0, 1.0]);
        assert!(scanline_crossings(&sq, 2.0).is_empty());
    }

    #[test]
    fn test_rasterize_paints_in_z_order() {
        let mut fig = Figure::new().with_background(gray(0.0));
        fig.add_polygon(square(-1.0, 1.0, 0.5, 1));
        fig.add_polygon(square(-0.2, 0.2, 1.0, 2));

        let grid = rasterize(&fig, 40, 40, 1.0).unwrap();
        assert_eq!(grid.dim(), (40, 40));

        // Centre shows the top square, corners show the background margin
        assert_eq!(grid[[20, 20]], luminance(&gray(1.0)));
        assert_eq!(grid[[0, 0]], 0.0);

        // Between the two squares the lower one is visible
        assert_eq!(grid[[20, 8]], luminance(&gray(0.5)));
    }

    #[test]
    fn test_painted_fraction_matches_area() {
        let mut fig = Figure::new().with_background(gray(0.0));
        fig.add_polygon(square(0.0, 1.0, 1.0, 1));

        let grid = rasterize(&fig, 100, 100, 1.0).unwrap();
        let lit = grid.iter().filter(|&&v| v > 0.5).count() as f64;
        // The square covers (1 / 1.1)^2 of the autoscaled area
        let expected = 100.0 * 100.0 / (1.1 * 1.1);
        assert!((lit - expected).abs() / expected < 0.03);
    }

    #[test]
    fn test_ascii_ramp_extremes() {
        let mut grid = Array2::from_elem((2, 3), 0.0f32);
        grid[[0, 0]] = 1.0;
        let text = to_ascii(&grid);
        assert_eq!(text, "@\n\n");
    }

    #[test]
    fn test_rasterize_rejects_empty_input() {
        assert!(matches!(
            rasterize(&Figure::new(), 10, 10, 1.0),
            Err(RenderError::EmptyFigure)
        ));

        let mut fig = Figure::new();
        fig.add_polygon(square(0.0, 1.0, 1.0, 1));
        assert!(matches!(
            rasterize(&fig, 0, 10, 1.0),
            Err(RenderError::InvalidSize { .. })
        ));
    }

    #[test]
    fn test_terminal_preview_has_title() {
        let mut fig = Figure::new().with_title("Preview");
        fig.add_polygon(square(0.0, 1.0, 1.0, 1));
        let text = terminal_preview(&fig).unwrap();
        assert!(text.starts_with("Preview\n"));
        assert!(text.contains('@'));
    }
}
