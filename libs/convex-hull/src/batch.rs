//! # Batch Hulls
//!
//! Independent hull computations share nothing, so they run on the rayon
//! pool without coordination. Concentric peeling (hull, drop its vertices,
//! hull the rest) is sequential per cloud but parallel across clouds.

use crate::error::HullResult;
use crate::hull::{convex_hull_with, ConvexHull};
use config::constants::{HullConfig, MIN_HULL_POINTS};
use glam::DVec3;
use rayon::prelude::*;

/// One layer of a concentric peel.
#[derive(Debug, Clone)]
pub struct HullLayer {
    /// Hull of the points that were left when this layer was taken
    pub hull: ConvexHull,
    /// Index in the original input of each point in `hull.points()`
    pub original_indices: Vec<usize>,
}

impl HullLayer {
    /// Hull vertices of this layer as indices into the original input.
    pub fn original_vertex_indices(&self) -> Vec<usize> {
        self.hull
            .vertex_indices()
            .into_iter()
            .map(|i| self.original_indices[i])
            .collect()
    }
}

/// Computes one hull per point set on the rayon pool.
///
/// Results come back in input order; a failing set does not affect the
/// others.
///
/// # Example
///
/// ```rust
/// use convex_hull::{hull_all, HullConfig};
/// use glam::DVec3;
///
/// let tetra = vec![DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::Z];
/// let line = vec![DVec3::ZERO, DVec3::X, DVec3::X * 2.0, DVec3::X * 3.0];
/// let results = hull_all(&[tetra, line], &HullConfig::default());
/// assert!(results[0].is_ok());
/// assert!(results[1].is_err());
/// ```
pub fn hull_all<P>(point_sets: &[P], config: &HullConfig) -> Vec<HullResult<ConvexHull>>
where
    P: AsRef<[DVec3]> + Sync,
{
    point_sets
        .par_iter()
        .map(|points| convex_hull_with(points.as_ref(), config))
        .collect()
}

/// Peels up to `max_layers` hulls off `points`, outermost first.
///
/// Each layer is the hull of whatever the previous layers did not use as
/// vertices. Peeling stops early once fewer than four points remain or the
/// remainder is degenerate (flat, linear or coincident).
///
/// # Errors
///
/// Any error from the first layer is returned as is.
pub fn concentric_hulls(
    points: &[DVec3],
    config: &HullConfig,
    max_layers: usize,
) -> HullResult<Vec<HullLayer>> {
    let mut layers: Vec<HullLayer> = Vec::new();
    let mut remaining: Vec<usize> = (0..points.len()).collect();

    while layers.len() < max_layers {
        if !layers.is_empty() && remaining.len() < MIN_HULL_POINTS {
            break;
        }
        let subset: Vec<DVec3> = remaining.iter().map(|&i| points[i]).collect();
        let hull = match convex_hull_with(&subset, config) {
            Ok(hull) => hull,
            Err(err) if err.is_degenerate() && !layers.is_empty() => {
                log::debug!("Peeling stopped at layer {}: {err}", layers.len());
                break;
            }
            Err(err) => return Err(err),
        };

        let next: Vec<usize> = hull
            .interior_indices()
            .into_iter()
            .map(|i| remaining[i])
            .collect();
        log::debug!(
            "Layer {}: {} vertices, {} points left",
            layers.len(),
            hull.vertex_indices().len(),
            next.len()
        );
        layers.push(HullLayer {
            hull,
            original_indices: std::mem::replace(&mut remaining, next),
        });
    }
    Ok(layers)
}

/// Runs [`concentric_hulls`] for every cloud on the rayon pool.
pub fn concentric_hulls_parallel<P>(
    clouds: &[P],
    config: &HullConfig,
    max_layers: usize,
) -> Vec<HullResult<Vec<HullLayer>>>
where
    P: AsRef<[DVec3]> + Sync,
{
    clouds
        .par_iter()
        .map(|points| concentric_hulls(points.as_ref(), config, max_layers))
        .collect()
}
