//! # Seed Tetrahedron
//!
//! Picks four well-spread points, builds the initial closed hull over them
//! and hands every other point to the four faces.
//!
//! Lower-dimensional input is detected here, before the first face exists.

use super::partition::{distribute, PartitionStats};
use crate::error::{HullError, HullResult};
use crate::geometry::{farthest_from_line, farthest_from_plane, Plane};
use crate::points::PointBuffer;
use crate::tolerance::Tolerance;
use crate::topology::{Face, FaceArena, FaceId};
use glam::DVec3;

/// The initial tetrahedron after linking and partitioning.
#[derive(Debug, Clone)]
pub struct Seed {
    /// Point indices of the four corners
    pub simplex: [usize; 4],
    /// The four faces, all linked to each other
    pub faces: [FaceId; 4],
    /// Centroid of the tetrahedron; strictly inside every later hull
    pub centroid: DVec3,
    /// Outcome of the initial partition
    pub stats: PartitionStats,
}

/// Chooses four points spanning a tetrahedron thicker than `tolerance`.
///
/// 1. Extreme points per axis; too many flat axes means degenerate input
/// 2. The extreme pair on the widest axis
/// 3. The point farthest from that line
/// 4. The point farthest from the plane of the first three
pub fn select_simplex(points: &PointBuffer, tolerance: Tolerance) -> HullResult<[usize; 4]> {
    let tol = tolerance.value();
    let mut min = [0usize; 3];
    let mut max = [0usize; 3];
    for (index, point) in points.iter() {
        for axis in 0..3 {
            if point[axis] < points[min[axis]][axis] {
                min[axis] = index;
            }
            if point[axis] > points[max[axis]][axis] {
                max[axis] = index;
            }
        }
    }

    let spread = [0, 1, 2].map(|axis| points[max[axis]][axis] - points[min[axis]][axis]);
    match spread.iter().filter(|&&s| s <= tol).count() {
        3 => return Err(HullError::Coincident { tolerance: tol }),
        2 => return Err(HullError::Collinear { tolerance: tol }),
        1 => return Err(HullError::Coplanar { tolerance: tol }),
        _ => {}
    }

    let axis = (0..3)
        .max_by(|&i, &j| spread[i].total_cmp(&spread[j]))
        .unwrap_or(0);
    let (a, b) = (min[axis], max[axis]);

    let slice = points.as_slice();
    let c = match farthest_from_line(slice, a, b, 0..points.len()) {
        Some((c, distance)) if distance > tol => c,
        _ => return Err(HullError::Collinear { tolerance: tol }),
    };

    let plane = Plane::from_triangle(points[a], points[b], points[c])
        .ok_or(HullError::Collinear { tolerance: tol })?;
    let rest = (0..points.len()).filter(|&i| i != a && i != b && i != c);
    let d = match farthest_from_plane(slice, &plane, rest) {
        Some((d, distance)) if distance > tol => d,
        _ => return Err(HullError::Coplanar { tolerance: tol }),
    };

    Ok([a, b, c, d])
}

/// Builds the seed tetrahedron into `arena`.
///
/// Each face is wound away from the corner it omits, the four are linked
/// pairwise and the remaining points are distributed over them.
pub fn build_seed(
    arena: &mut FaceArena,
    points: &PointBuffer,
    tolerance: Tolerance,
) -> HullResult<Seed> {
    let simplex = select_simplex(points, tolerance)?;
    let centroid = simplex.iter().map(|&i| points[i]).sum::<DVec3>() / 4.0;

    let mut faces = [FaceId(0); 4];
    for (omit, slot) in faces.iter_mut().enumerate() {
        let mut vertices = [0usize; 3];
        for (dst, src) in vertices.iter_mut().zip((0..4).filter(|&k| k != omit)) {
            *dst = simplex[src];
        }
        let face = outward_face(vertices, points[simplex[omit]], points)
            .ok_or(HullError::Coplanar {
                tolerance: tolerance.value(),
            })?;
        *slot = arena.insert(face);
    }
    arena.link(&faces);

    let pool: Vec<usize> = (0..points.len())
        .filter(|i| !simplex.contains(i))
        .collect();
    let candidates = pool.len();
    let stats = distribute(arena, &faces, pool, points, tolerance);

    log::debug!(
        "Seed tetrahedron {:?}: {} candidates, {} claimed, {} covered, {} interior (tolerance {:e})",
        simplex,
        candidates,
        stats.claimed,
        stats.covered,
        stats.interior,
        tolerance.value()
    );

    Ok(Seed {
        simplex,
        faces,
        centroid,
        stats,
    })
}

/// Face over `vertices` with `inner` behind its plane.
fn outward_face(mut vertices: [usize; 3], inner: DVec3, points: &PointBuffer) -> Option<Face> {
    let face = Face::new(vertices, points)?;
    if face.signed_distance(inner) <= 0.0 {
        return Some(face);
    }
    vertices.swap(1, 2);
    Face::new(vertices, points)
}
