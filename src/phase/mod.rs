//! Phase drawing: terminator angle plus lit/unlit silhouette
//!
//! [`draw_object_phase`] ties the pieces together: it asks the ephemeris
//! for the body, computes the terminator angle and the illuminated
//! fraction, builds the [`Silhouette`] and hands both outlines to a
//! [`DrawingSurface`], unlit disk first.

pub mod geometry;
pub mod silhouette;
pub mod terminator;

use crate::constants::DEFAULT_SILHOUETTE_STEPS;
use crate::ephemeris::{CoordinateMode, Ephemeris};
use crate::observer::Observer;
use crate::planetlib::Body;
use crate::render::{gray, Color, DrawingSurface, FilledPolygon};
use log::debug;
use nalgebra::Point2;

pub use silhouette::Silhouette;
pub use terminator::{position_angle, terminator_angle, terminator_angle_of};

/// Colours and outline settings of a phase drawing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseStyle {
    /// Fill of the whole disk (the part in shadow)
    pub unlit: Color,
    /// Fill of the illuminated part
    pub lit: Color,
    pub stroke_width: f64,
    /// Sampling steps per half disk
    pub steps: usize,
}

impl Default for PhaseStyle {
    fn default() -> Self {
        Self {
            unlit: gray(0.2),
            lit: gray(0.85),
            stroke_width: 1.0,
            steps: DEFAULT_SILHOUETTE_STEPS,
        }
    }
}

/// Z-order of the unlit disk; the lit region is drawn one level above
pub const UNLIT_Z_ORDER: i32 = 1;

/// Add the two phase polygons of a silhouette to a surface, unlit first
pub fn draw_silhouette<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    silhouette: Silhouette,
    style: &PhaseStyle,
) {
    let Silhouette { outer, lit } = silhouette;
    surface.add_polygon(FilledPolygon::new(
        outer,
        style.unlit,
        style.stroke_width,
        UNLIT_Z_ORDER,
    ));
    surface.add_polygon(FilledPolygon::new(
        lit,
        style.lit,
        style.stroke_width,
        UNLIT_Z_ORDER + 1,
    ));
}

/// Draw the phase of `body` as seen by `observer`.
///
/// # Arguments
///
/// * `surface` - Surface receiving the unlit and lit polygons
/// * `ephemeris` - Source of the body and Sun positions
/// * `observer` - Place and moment of the observation
/// * `mode` - Coordinates used for the terminator angle
/// * `body` - Body to draw
/// * `center` - Disk centre in display coordinates
/// * `diameter` - Disk diameter in display units
/// * `style` - Colours, stroke and sampling
///
/// Returns the silhouette's terminator angle and illuminated fraction.
#[allow(clippy::too_many_arguments)]
pub fn draw_object_phase<S, E>(
    surface: &mut S,
    ephemeris: &E,
    observer: &Observer,
    mode: CoordinateMode,
    body: Body,
    center: Point2<f64>,
    diameter: f64,
    style: &PhaseStyle,
) -> crate::Result<(f64, f64)>
where
    S: DrawingSurface + ?Sized,
    E: Ephemeris + ?Sized,
{
    let state = ephemeris.observe(body, observer)?;
    let khi = terminator_angle_of(ephemeris, observer, mode, &state)?;
    let k = state.illuminated_fraction();
    debug!("Drawing {} with k={:.4}, khi={:.4}", body, k, khi);

    let silhouette = Silhouette::build_with_steps(khi, k, center, diameter, style.steps);
    draw_silhouette(surface, silhouette, style);
    Ok((khi, k))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::{self, BodyState, SnapshotEphemeris};
    use crate::render::Figure;
    use approx::assert_relative_eq;
    use std::cell::RefCell;

    /// Records every body looked up through it
    struct Recording<'a> {
        inner: &'a SnapshotEphemeris,
        queries: RefCell<Vec<Body>>,
    }

    impl Ephemeris for Recording<'_> {
        fn observe(&self, body: Body, observer: &Observer) -> ephemeris::Result<BodyState> {
            self.queries.borrow_mut().push(body);
            self.inner.observe(body, observer)
        }
    }

    #[test]
    fn test_default_style() {
        let style = PhaseStyle::default();
        assert_eq!(style.unlit, gray(0.2));
        assert_eq!(style.lit, gray(0.85));
        assert_eq!(style.steps, 100);
    }

    #[test]
    fn test_draw_adds_unlit_then_lit() {
        let snapshot = SnapshotEphemeris::bundled().unwrap();
        let observer = snapshot.observer().clone();
        let mut figure = Figure::new();
        let style = PhaseStyle::default();

        let (khi, k) = draw_object_phase(
            &mut figure,
            &snapshot,
            &observer,
            CoordinateMode::Topocentric,
            Body::Moon,
            Point2::new(20.0, 274.0),
            1.785,
            &style,
        )
        .unwrap();

        assert_relative_eq!(k, 0.2429, epsilon = 1e-12);
        assert!(khi > 0.0 && khi <= 2.0 * std::f64::consts::PI);

        let shapes = figure.shapes();
        assert_eq!(shapes.len(), 2);
        assert_eq!(shapes[0].fill, style.unlit);
        assert_eq!(shapes[1].fill, style.lit);
        assert!(shapes[0].z_order < shapes[1].z_order);
        assert_eq!(shapes[0].vertices.len(), 403);
        assert_eq!(shapes[1].stroke_width, 1.0);
    }

    #[test]
    fn test_sun_is_drawn_fully_lit_and_unrotated() {
        let snapshot = SnapshotEphemeris::bundled().unwrap();
        let observer = snapshot.observer().clone();
        let mut figure = Figure::new();

        let (khi, k) = draw_object_phase(
            &mut figure,
            &snapshot,
            &observer,
            CoordinateMode::Apparent,
            Body::Sun,
            Point2::origin(),
            2.0,
            &PhaseStyle::default(),
        )
        .unwrap();

        assert_eq!(khi, 0.0);
        assert_eq!(k, 1.0);
        assert_relative_eq!(
            geometry::area(&figure.shapes()[1].vertices),
            geometry::area(&figure.shapes()[0].vertices),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_missing_body_leaves_surface_untouched() {
        let snapshot = SnapshotEphemeris::bundled().unwrap();
        let observer = snapshot.observer().clone();
        let mut figure = Figure::new();

        let result = draw_object_phase(
            &mut figure,
            &snapshot,
            &observer,
            CoordinateMode::Topocentric,
            Body::Jupiter,
            Point2::origin(),
            1.0,
            &PhaseStyle::default(),
        );
        assert!(result.is_err());
        assert!(figure.is_empty());
    }

    #[test]
    fn test_each_body_is_looked_up_once() {
        let snapshot = SnapshotEphemeris::bundled().unwrap();
        let observer = snapshot.observer().clone();
        let recording = Recording {
            inner: &snapshot,
            queries: RefCell::new(Vec::new()),
        };

        draw_object_phase(
            &mut Figure::new(),
            &recording,
            &observer,
            CoordinateMode::Topocentric,
            Body::Moon,
            Point2::origin(),
            2.0,
            &PhaseStyle::default(),
        )
        .unwrap();
        assert_eq!(*recording.queries.borrow(), vec![Body::Moon, Body::Sun]);
    }

    #[test]
    fn test_zero_size_body_draws_a_point() {
        let json = include_str!("../ephemeris/data/paris_2013-03-16.json")
            .replace("1785.08", "0.0");
        let snapshot = SnapshotEphemeris::from_json_str(&json).unwrap();
        let observer = snapshot.observer().clone();
        let moon = snapshot.observe(Body::Moon, &observer).unwrap();
        let center = Point2::new(moon.horizontal.alt_degrees(), moon.horizontal.az_degrees());
        let mut figure = Figure::new();

        draw_object_phase(
            &mut figure,
            &snapshot,
            &observer,
            CoordinateMode::Topocentric,
            Body::Moon,
            center,
            moon.size_arcsec / crate::constants::ARCSEC_PER_DISPLAY_UNIT,
            &PhaseStyle::default(),
        )
        .unwrap();

        for shape in figure.shapes() {
            assert_eq!(shape.vertices.len(), 403);
            assert!(shape.vertices.iter().all(|v| *v == center));
        }
    }
}
