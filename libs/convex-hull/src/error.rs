//! # Hull Errors
//!
//! Error types for convex hull construction and validation.
//!
//! ## Error Policy
//!
//! - Invalid input is reported before any face is built
//! - Mesh-consistency defects inside the builder panic; they are never
//!   returned as values
//! - Validation of a finished hull reports what it found, with context

use config::constants::ConfigError;
use thiserror::Error;

/// Errors that can occur while building or validating a hull.
///
/// ## Example
///
/// ```rust
/// use convex_hull::{convex_hull, HullError};
/// use glam::DVec3;
///
/// let line: Vec<DVec3> = (0..5).map(|i| DVec3::new(i as f64, 0.0, 0.0)).collect();
/// match convex_hull(&line) {
///     Err(HullError::Collinear { .. }) => {}
///     other => panic!("expected a collinear error, got {other:?}"),
/// }
/// ```
#[derive(Debug, Error, PartialEq)]
pub enum HullError {
    /// Fewer points than a tetrahedron needs.
    #[error("Insufficient points: {count} (min: {min})")]
    InsufficientPoints {
        /// Number of points supplied
        count: usize,
        /// Minimum number of points required
        min: usize,
    },

    /// A coordinate is NaN or infinite.
    #[error("Non-finite coordinate at point {index}")]
    NonFinitePoint {
        /// Index of the offending point
        index: usize,
    },

    /// All points coincide within tolerance.
    #[error("Degenerate input: all points coincide within tolerance {tolerance}")]
    Coincident {
        /// Tolerance used for the classification
        tolerance: f64,
    },

    /// All points lie on one line within tolerance.
    #[error("Degenerate input: all points are collinear within tolerance {tolerance}")]
    Collinear {
        /// Tolerance used for the classification
        tolerance: f64,
    },

    /// All points lie on one plane within tolerance.
    #[error("Degenerate input: all points are coplanar within tolerance {tolerance}")]
    Coplanar {
        /// Tolerance used for the classification
        tolerance: f64,
    },

    /// Rejected configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// Adjacency of a finished hull is broken.
    #[error("Invalid topology: {message}")]
    InvalidTopology {
        /// What was found
        message: String,
    },

    /// A face normal points into the hull.
    #[error("Face {face} is inverted: the hull centroid lies {distance} in front of it")]
    InvertedFace {
        /// Index of the face in the hull
        face: usize,
        /// Signed distance of the centroid from the face plane
        distance: f64,
    },

    /// An input point lies outside a hull face beyond tolerance.
    #[error("Point {point} lies {distance} outside face {face}")]
    ContainmentViolated {
        /// Index of the point
        point: usize,
        /// Index of the face
        face: usize,
        /// Signed distance of the point from the face plane
        distance: f64,
    },
}

impl HullError {
    /// Creates an invalid topology error.
    pub fn invalid_topology(message: impl Into<String>) -> Self {
        Self::InvalidTopology {
            message: message.into(),
        }
    }

    /// Returns true for the lower-dimensional input cases
    /// (coincident, collinear, coplanar).
    pub fn is_degenerate(&self) -> bool {
        matches!(
            self,
            Self::Coincident { .. } | Self::Collinear { .. } | Self::Coplanar { .. }
        )
    }
}

/// Result type alias for hull operations.
pub type HullResult<T> = Result<T, HullError>;
