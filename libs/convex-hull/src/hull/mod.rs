//! # Convex Hull
//!
//! Incremental QuickHull over an explicit triangle adjacency mesh.
//!
//! ## Algorithm Overview
//!
//! 1. Seed a tetrahedron from extreme points and partition the rest
//! 2. Pick a face with outside points and take its farthest point (apex)
//! 3. Flood fill the faces the apex can see and collect the horizon
//! 4. Replace the visible region with a fan from the horizon to the apex
//! 5. Hand the orphaned outside points to the new faces
//! 6. Repeat until no face has outside points left
//!
//! Coplanar points (within tolerance of a face plane) either extend the
//! face's footprint or are covered by it. Covered points, like the outside
//! sets and the corners swallowed by a visible region, are reclassified
//! whenever their face is removed.

mod expand;
mod output;
mod partition;
mod seed;
mod validate;


pub use output::{ConvexHull, HullFace};
pub use partition::{classify, distribute, partition, PartitionStats, PointSide};
pub use seed::{build_seed, select_simplex, Seed};

use crate::error::HullResult;
use crate::points::PointBuffer;
use crate::tolerance::Tolerance;
use crate::topology::{FaceArena, FaceId};
use config::constants::{FaceOrder, HullConfig, FACE_ARENA_CAPACITY_FACTOR};
use glam::DVec3;
use std::collections::VecDeque;

/// Computes the convex hull of `points` with the default configuration.
///
/// # Example
///
/// ```rust
/// use convex_hull::convex_hull;
/// use glam::DVec3;
///
/// let points = vec![
///     DVec3::new(0.0, 0.0, 0.0),
///     DVec3::new(1.0, 0.0, 0.0),
///     DVec3::new(0.0, 1.0, 0.0),
///     DVec3::new(0.0, 0.0, 1.0),
///     DVec3::new(0.1, 0.1, 0.1),
/// ];
/// let hull = convex_hull(&points).unwrap();
/// assert_eq!(hull.face_count(), 4);
/// assert_eq!(hull.interior_indices(), vec![4]);
/// ```
pub fn convex_hull(points: &[DVec3]) -> HullResult<ConvexHull> {
    convex_hull_with(points, &HullConfig::default())
}

/// Computes the convex hull of `points` with an explicit configuration.
pub fn convex_hull_with(points: &[DVec3], config: &HullConfig) -> HullResult<ConvexHull> {
    Ok(HullBuilder::new(points, config)?.build())
}

/// Step-wise hull construction.
///
/// [`HullBuilder::new`] validates the input and builds the seed
/// tetrahedron. Each [`HullBuilder::step`] inserts one apex (or resolves one
/// coplanar case) and leaves the mesh closed, so a caller can stop between
/// steps and still take a consistent, if partial, hull with
/// [`HullBuilder::finish`].
///
/// # Example
///
/// ```rust
/// use convex_hull::{HullBuilder, HullConfig};
/// use glam::DVec3;
///
/// let mut points = vec![DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::Z];
/// points.push(DVec3::splat(1.0));
///
/// let mut builder = HullBuilder::new(points, &HullConfig::default()).unwrap();
/// while builder.step() {}
/// assert!(builder.is_finished());
/// assert_eq!(builder.finish().face_count(), 6);
/// ```
#[derive(Debug, Clone)]
pub struct HullBuilder {
    points: PointBuffer,
    tolerance: Tolerance,
    order: FaceOrder,
    arena: FaceArena,
    queue: VecDeque<FaceId>,
    interior_point: DVec3,
    simplex: [usize; 4],
    interior: usize,
    steps: usize,
}

impl HullBuilder {
    /// Validates `points` and seeds the hull.
    ///
    /// # Errors
    ///
    /// - [`crate::HullError::InsufficientPoints`] / [`crate::HullError::NonFinitePoint`]
    /// - [`crate::HullError::Coincident`], [`crate::HullError::Collinear`],
    ///   [`crate::HullError::Coplanar`] for lower-dimensional input
    /// - [`crate::HullError::InvalidConfig`] for an unusable tolerance
    pub fn new(points: impl Into<PointBuffer>, config: &HullConfig) -> HullResult<Self> {
        let points = points.into();
        points.validate()?;
        let tolerance = Tolerance::from_config(&points, config)?;

        let mut arena = FaceArena::with_capacity(points.len() * FACE_ARENA_CAPACITY_FACTOR);
        let seed = build_seed(&mut arena, &points, tolerance)?;
        let queue = seed
            .faces
            .iter()
            .copied()
            .filter(|&id| arena.get(id).is_active())
            .collect();

        Ok(Self {
            points,
            tolerance,
            order: config.face_order,
            arena,
            queue,
            interior_point: seed.centroid,
            simplex: seed.simplex,
            interior: seed.stats.interior,
            steps: 0,
        })
    }

    /// Tolerance used for every classification.
    pub fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    /// The input points.
    pub fn points(&self) -> &PointBuffer {
        &self.points
    }

    /// Corners of the seed tetrahedron.
    pub fn seed_vertices(&self) -> [usize; 4] {
        self.simplex
    }

    /// True once no face has outside points left.
    pub fn is_finished(&self) -> bool {
        self.active_faces() == 0
    }

    /// Number of live faces that still have outside points.
    pub fn active_faces(&self) -> usize {
        self.arena
            .live_ids()
            .filter(|&id| self.arena.get(id).is_active())
            .count()
    }

    /// Number of live faces.
    pub fn live_faces(&self) -> usize {
        self.arena.live_count()
    }

    /// Number of coplanar points currently lying over a live face.
    pub fn covered_points(&self) -> usize {
        self.arena
            .live_ids()
            .map(|id| self.arena.get(id).covered().len())
            .sum()
    }

    /// Number of completed steps.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Performs one expansion step. Returns false when there was nothing
    /// left to do.
    pub fn step(&mut self) -> bool {
        let Some(face) = self.select_active_face() else {
            return false;
        };
        self.expand(face);
        self.steps += 1;
        true
    }

    /// Runs to completion and returns the hull.
    pub fn build(mut self) -> ConvexHull {
        while self.step() {}
        self.finish()
    }

    /// Snapshots the current mesh into a [`ConvexHull`].
    ///
    /// Before [`HullBuilder::is_finished`] the result is closed and convex
    /// but may not contain every input point.
    pub fn finish(self) -> ConvexHull {
        let covered = self.covered_points();
        let hull = ConvexHull::from_arena(
            self.points,
            &self.arena,
            self.tolerance,
            self.interior_point,
        );
        log::debug!(
            "Hull finished after {} steps: {} faces, {} vertices, {} covered, {} interior (tolerance {:e})",
            self.steps,
            hull.face_count(),
            hull.vertex_indices().len(),
            covered,
            self.interior,
            self.tolerance.value()
        );
        hull
    }
}
