//! Lit and unlit outlines of a phased disk
//!
//! The disk is drawn as two polygons. The outer one is the full circle
//! (upper half-circle left to right, lower half-circle right to left). The
//! lit one combines a half-circle with a half-ellipse whose semi-minor
//! axis is `|2k - 1|`: for `k <= 0.5` the ellipse eats into the upper
//! half-disk (crescent), for `k > 0.5` it extends the upper half-disk
//! downwards (gibbous). The lit outline is built in a unit frame, then
//! rotated by `khi`, scaled by the radius and moved to the centre.

use crate::constants::DEFAULT_SILHOUETTE_STEPS;
use log::debug;
use nalgebra::{Point2, Rotation2, Vector2};

/// Half-chord of the unit circle at `x`
fn half_chord(x: f64) -> f64 {
    (1.0 - x * x).max(0.0).sqrt()
}

/// Outer (unlit) and lit outlines of a disk, in display coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct Silhouette {
    /// Full disk outline, drawn underneath
    pub outer: Vec<Point2<f64>>,
    /// Illuminated region outline, drawn on top
    pub lit: Vec<Point2<f64>>,
}

impl Silhouette {
    /// Number of vertices in each outline for a given number of steps per half
    pub fn vertex_count(steps: usize) -> usize {
        2 * (2 * steps + 1) + 1
    }

    /// Build the outlines with the default sampling (step 0.01, 201 samples per half)
    ///
    /// # Arguments
    ///
    /// * `khi` - Terminator angle in radians
    /// * `k` - Illuminated fraction of the disk
    /// * `center` - Disk centre in display coordinates
    /// * `diameter` - Disk diameter in display units
    pub fn build(khi: f64, k: f64, center: Point2<f64>, diameter: f64) -> Self {
        Self::build_with_steps(khi, k, center, diameter, DEFAULT_SILHOUETTE_STEPS)
    }

    /// Build the outlines sampling `x` in `[-1, 1]` with step `1 / steps`
    pub fn build_with_steps(
        khi: f64,
        k: f64,
        center: Point2<f64>,
        diameter: f64,
        steps: usize,
    ) -> Self {
        let steps = steps.max(1) as i64;
        let radius = diameter / 2.0;
        let half_width = (2.0 * k - 1.0).abs();
        let rotation = Rotation2::new(khi);
        // Unit frame to display frame; a zero radius collapses onto the centre
        let to_display = |x: f64, y: f64| center + rotation * Vector2::new(x, y) * radius;

        let capacity = Self::vertex_count(steps as usize);
        let mut outer = Vec::with_capacity(capacity);
        let mut lit = Vec::with_capacity(capacity);

        // Upper half, left to right
        for i in -steps..=steps {
            let x = i as f64 / steps as f64;
            let chord = half_chord(x);
            outer.push(Point2::new(x * radius + center.x, chord * radius + center.y));

            let yin = if k <= 0.5 { chord * half_width } else { chord };
            lit.push(to_display(x, yin));
        }

        // Lower half, right to left
        for i in (-steps..=steps).rev() {
            let x = i as f64 / steps as f64;
            let chord = half_chord(x);
            outer.push(Point2::new(x * radius + center.x, -chord * radius + center.y));

            let yin = if k > 0.5 { -chord * half_width } else { chord };
            lit.push(to_display(x, yin));
        }

        // Close both outlines on the leftmost point
        outer.push(Point2::new(-radius + center.x, center.y));
        lit.push(to_display(-1.0, 0.0));

        debug!(
            "Silhouette k={:.4} khi={:.4}: {} outer / {} lit vertices",
            k,
            khi,
            outer.len(),
            lit.len()
        );
        Silhouette { outer, lit }
    }
}
