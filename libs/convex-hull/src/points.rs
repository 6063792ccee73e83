//! # Point Buffer
//!
//! The immutable, shared point storage every hull computation indexes into.
//! Faces, outside sets and the finished hull refer to points by index only.

use crate::error::{HullError, HullResult};
use config::constants::MIN_HULL_POINTS;
use glam::DVec3;
use std::ops::Index;
use std::sync::Arc;

/// Shared, immutable point storage.
///
/// Cloning is cheap (reference counted), so the same buffer backs the
/// builder, the finished hull and any caller holding on to it.
///
/// # Example
///
/// ```rust
/// use convex_hull::PointBuffer;
/// use glam::DVec3;
///
/// let buffer = PointBuffer::from(vec![DVec3::ZERO, DVec3::X]);
/// assert_eq!(buffer.len(), 2);
/// assert_eq!(buffer[1], DVec3::X);
/// ```
#[derive(Debug, Clone)]
pub struct PointBuffer {
    points: Arc<[DVec3]>,
}

impl PointBuffer {
    /// Wraps the given points.
    pub fn new(points: impl Into<Arc<[DVec3]>>) -> Self {
        Self {
            points: points.into(),
        }
    }

    /// Returns the number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the buffer holds no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the point at `index`.
    #[inline]
    pub fn get(&self, index: usize) -> DVec3 {
        self.points[index]
    }

    /// Returns all points as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[DVec3] {
        &self.points
    }

    /// Iterates over `(index, point)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, DVec3)> + '_ {
        self.points.iter().copied().enumerate()
    }

    /// Computes the axis-aligned bounding box as `(min, max)`.
    ///
    /// Returns `None` for an empty buffer.
    pub fn bounding_box(&self) -> Option<(DVec3, DVec3)> {
        let first = *self.points.first()?;
        Some(
            self.points[1..]
                .iter()
                .fold((first, first), |(min, max), p| (min.min(*p), max.max(*p))),
        )
    }

    /// Checks that the buffer can seed a hull: at least four points,
    /// all coordinates finite.
    pub fn validate(&self) -> HullResult<()> {
        if self.points.len() < MIN_HULL_POINTS {
            return Err(HullError::InsufficientPoints {
                count: self.points.len(),
                min: MIN_HULL_POINTS,
            });
        }
        if let Some(index) = self.points.iter().position(|p| !p.is_finite()) {
            return Err(HullError::NonFinitePoint { index });
        }
        Ok(())
    }
}

impl Index<usize> for PointBuffer {
    type Output = DVec3;

    #[inline]
    fn index(&self, index: usize) -> &DVec3 {
        &self.points[index]
    }
}

impl From<Vec<DVec3>> for PointBuffer {
    fn from(points: Vec<DVec3>) -> Self {
        Self::new(points)
    }
}

impl From<&[DVec3]> for PointBuffer {
    fn from(points: &[DVec3]) -> Self {
        Self::new(points)
    }
}

impl From<Arc<[DVec3]>> for PointBuffer {
    fn from(points: Arc<[DVec3]>) -> Self {
        Self { points }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box() {
        let buffer = PointBuffer::from(vec![
            DVec3::new(-1.0, 2.0, 0.5),
            DVec3::new(3.0, -4.0, 0.0),
            DVec3::new(0.0, 0.0, 6.0),
        ]);
        let (min, max) = buffer.bounding_box().unwrap();
        assert_eq!(min, DVec3::new(-1.0, -4.0, 0.0));
        assert_eq!(max, DVec3::new(3.0, 2.0, 6.0));
    }

    #[test]
    fn test_bounding_box_empty() {
        let buffer = PointBuffer::from(Vec::<DVec3>::new());
        assert!(buffer.is_empty());
        assert!(buffer.bounding_box().is_none());
    }

    #[test]
    fn test_validate_too_few() {
        let buffer = PointBuffer::from(vec![DVec3::ZERO, DVec3::X, DVec3::Y]);
        assert_eq!(
            buffer.validate(),
            Err(HullError::InsufficientPoints { count: 3, min: 4 })
        );
    }

    #[test]
    fn test_validate_non_finite() {
        let buffer = PointBuffer::from(vec![
            DVec3::ZERO,
            DVec3::X,
            DVec3::new(0.0, f64::NAN, 0.0),
            DVec3::Z,
        ]);
        assert_eq!(buffer.validate(), Err(HullError::NonFinitePoint { index: 2 }));
    }

    #[test]
    fn test_clone_shares_storage() {
        let buffer = PointBuffer::from(vec![DVec3::ONE; 4]);
        let other = buffer.clone();
        assert!(std::ptr::eq(buffer.as_slice(), other.as_slice()));
    }
}
