//! Phaseview: illuminated-phase silhouettes of solar system bodies
//!
//! This crate draws the phase of a body (typically the Moon) as seen by a
//! terrestrial observer: it derives the tilt of the terminator from the
//! positions of the body and the Sun, builds a lit/unlit polygon pair for
//! the apparent disk and hands it to a drawing surface.
//!
//! Positions come from an external ephemeris through the
//! [`ephemeris::Ephemeris`] trait; polygons go to any
//! [`render::DrawingSurface`].
//!
//! ```rust
//! use nalgebra::Point2;
//! use phaseview::ephemeris::{CoordinateMode, SnapshotEphemeris};
//! use phaseview::phase::{draw_object_phase, PhaseStyle};
//! use phaseview::render::Figure;
//! use phaseview::Body;
//!
//! let ephemeris = SnapshotEphemeris::bundled().unwrap();
//! let observer = ephemeris.observer().clone();
//! let mut figure = Figure::new();
//!
//! draw_object_phase(
//!     &mut figure,
//!     &ephemeris,
//!     &observer,
//!     CoordinateMode::Topocentric,
//!     Body::Moon,
//!     Point2::origin(),
//!     2.0,
//!     &PhaseStyle::default(),
//! )
//! .unwrap();
//! assert_eq!(figure.shapes().len(), 2);
//! ```

use thiserror::Error;

pub mod constants;
pub mod coordinates;
pub mod ephemeris;
pub mod observer;
pub mod phase;
pub mod planetlib;
pub mod render;
pub mod time;

// Re-export commonly used types
pub use coordinates::{Equatorial, Horizontal};
pub use ephemeris::{BodyState, CoordinateMode, Ephemeris, SnapshotEphemeris};
pub use observer::Observer;
pub use phase::{draw_object_phase, terminator_angle, PhaseStyle, Silhouette};
pub use planetlib::Body;
pub use time::Time;

/// Main error type for the phaseview library
#[derive(Debug, Error)]
pub enum PhaseError {
    #[error("Time error: {0}")]
    TimeError(#[from] time::TimeError),

    #[error("Ephemeris error: {0}")]
    EphemerisError(#[from] ephemeris::EphemerisError),

    #[error("Render error: {0}")]
    RenderError(#[from] render::RenderError),

    #[error("Object not found: {0}")]
    ObjectNotFound(#[from] planetlib::PlanetError),

    #[error("Unknown city: {name} (known sites: {known})")]
    UnknownCity { name: String, known: String },

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for phaseview operations
pub type Result<T> = std::result::Result<T, PhaseError>;
