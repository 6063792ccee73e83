//! # Tolerance Policy
//!
//! One distance tolerance per hull computation, consumed identically by
//! seeding, visibility, outside-set assignment and coplanar containment.

use crate::error::HullResult;
use crate::points::PointBuffer;
use config::constants::{ConfigError, HullConfig};

/// Distance tolerance for a single hull computation.
///
/// A signed distance `d` is classified as:
///
/// | Range | Meaning |
/// |-------|---------|
/// | `d > tol` | outside |
/// | `\|d\| <= tol` | coplanar |
/// | `d < -tol` | behind |
///
/// # Example
///
/// ```rust
/// use convex_hull::Tolerance;
///
/// let tol = Tolerance::absolute(1e-6).unwrap();
/// assert!(tol.is_outside(1e-3));
/// assert!(tol.is_coplanar(-5e-7));
/// assert!(tol.is_visible(-5e-7));
/// assert!(tol.is_behind(-1e-3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Tolerance(f64);

impl Tolerance {
    /// A fixed tolerance. Rejects values that are not positive and finite.
    pub fn absolute(value: f64) -> HullResult<Self> {
        if !value.is_finite() || value <= 0.0 {
            return Err(ConfigError::InvalidTolerance(value).into());
        }
        Ok(Self(value))
    }

    /// `fraction` times the scale of `points` (see [`input_scale`]).
    ///
    /// An all-zero input has no scale; the fraction itself is used so the
    /// result stays positive.
    pub fn relative_to(points: &PointBuffer, fraction: f64) -> HullResult<Self> {
        if !fraction.is_finite() || fraction <= 0.0 {
            return Err(ConfigError::InvalidRelativeTolerance(fraction).into());
        }
        let scale = input_scale(points);
        let value = if scale > 0.0 { scale * fraction } else { fraction };
        Self::absolute(value)
    }

    /// Resolves the tolerance a [`HullConfig`] asks for.
    pub fn from_config(points: &PointBuffer, config: &HullConfig) -> HullResult<Self> {
        match config.absolute_tolerance {
            Some(value) => Self::absolute(value),
            None => Self::relative_to(points, config.relative_tolerance),
        }
    }

    /// The tolerance as a distance.
    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    /// `d > tol`
    #[inline]
    pub fn is_outside(self, distance: f64) -> bool {
        distance > self.0
    }

    /// `|d| <= tol`
    #[inline]
    pub fn is_coplanar(self, distance: f64) -> bool {
        distance.abs() <= self.0
    }

    /// `d < -tol`
    #[inline]
    pub fn is_behind(self, distance: f64) -> bool {
        distance < -self.0
    }

    /// `d >= -tol`: the face can see the point, coplanar included.
    #[inline]
    pub fn is_visible(self, distance: f64) -> bool {
        distance >= -self.0
    }
}

impl From<Tolerance> for f64 {
    fn from(tolerance: Tolerance) -> Self {
        tolerance.0
    }
}

/// Size of the input: the larger of the largest bounding-box extent and the
/// largest absolute coordinate.
///
/// The coordinate term keeps flat or tiny clouds far from the origin from
/// getting a tolerance below their floating-point resolution.
pub fn input_scale(points: &PointBuffer) -> f64 {
    let Some((min, max)) = points.bounding_box() else {
        return 0.0;
    };
    let extent = (max - min).max_element();
    let magnitude = min.abs().max(max.abs()).max_element();
    extent.max(magnitude)
}
