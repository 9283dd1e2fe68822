//! Planar polygon metrics

use nalgebra::Point2;

/// Signed area by the shoelace formula (positive for counter-clockwise)
pub fn signed_area(vertices: &[Point2<f64>]) -> f64 {
    let n = vertices.len();
    if n < 3 {
        return 0.0;
    }
    let twice: f64 = (0..n)
        .map(|i| {
            let a = &vertices[i];
            let b = &vertices[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum();
    twice / 2.0
}

/// Unsigned polygon area
pub fn area(vertices: &[Point2<f64>]) -> f64 {
    signed_area(vertices).abs()
}

/// Area centroid; `None` for degenerate (zero-area) polygons
pub fn centroid(vertices: &[Point2<f64>]) -> Option<Point2<f64>> {
    let a = signed_area(vertices);
    if a.abs() < f64::EPSILON {
        return None;
    }
    let n = vertices.len();
    let (mut cx, mut cy) = (0.0, 0.0);
    for i in 0..n {
        let p = &vertices[i];
        let q = &vertices[(i + 1) % n];
        let cross = p.x * q.y - q.x * p.y;
        cx += (p.x + q.x) * cross;
        cy += (p.y + q.y) * cross;
    }
    Some(Point2::new(cx / (6.0 * a), cy / (6.0 * a)))
}

/// Largest distance of any vertex from the vertical line `x = x0`
pub fn max_abs_x_extent(vertices: &[Point2<f64>], x0: f64) -> f64 {
    vertices
        .iter()
        .map(|v| (v.x - x0).abs())
        .fold(0.0, f64::max)
}

/// Largest distance of any vertex from `center`
pub fn max_radius(vertices: &[Point2<f64>], center: &Point2<f64>) -> f64 {
    vertices
        .iter()
        .map(|v| nalgebra::distance(v, center))
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_square() -> Vec<Point2<f64>> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ]
    }

    #[test]
    fn test_square_area_and_orientation() {
        let mut sq = unit_square();
        assert_relative_eq!(signed_area(&sq), 1.0);
        sq.reverse();
        assert_relative_eq!(signed_area(&sq), -1.0);
        assert_relative_eq!(area(&sq), 1.0);
    }

    #[test]
    fn test_degenerate_polygons() {
        assert_eq!(area(&[]), 0.0);
        assert_eq!(area(&unit_square()[..2]), 0.0);

        // Out and back along the same path encloses nothing
        let path = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(2.0, 0.0),
            Point2::new(1.0, 1.0),
        ];
        assert_relative_eq!(area(&path), 0.0);
        assert!(centroid(&path).is_none());
    }

    #[test]
    fn test_centroid_of_square() {
        let c = centroid(&unit_square()).unwrap();
        assert_relative_eq!(c.x, 0.5, epsilon = 1e-12);
        assert_relative_eq!(c.y, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_extents() {
        let sq = unit_square();
        assert_relative_eq!(max_abs_x_extent(&sq, 0.25), 0.75);
        assert_relative_eq!(
            max_radius(&sq, &Point2::new(0.0, 0.0)),
            2.0f64.sqrt(),
            epsilon = 1e-12
        );
    }
}
