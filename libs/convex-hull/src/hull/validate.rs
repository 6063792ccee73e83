//! # Hull Validation
//!
//! Post-hoc checks of a finished hull. Each check returns the first
//! violation it finds.

use super::output::ConvexHull;
use crate::error::{HullError, HullResult};

/// Runs every check in turn.
pub fn validate(hull: &ConvexHull) -> HullResult<()> {
    check_closed(hull)?;
    check_orientation(hull)?;
    check_containment(hull)?;
    check_minimality(hull)
}

/// Every edge has exactly one neighbor, which traverses it in reverse and
/// links back. The face count must also satisfy Euler's formula for a
/// triangulated sphere (`F = 2V - 4`).
pub fn check_closed(hull: &ConvexHull) -> HullResult<()> {
    let faces = hull.faces();
    if faces.len() < 4 {
        return Err(HullError::invalid_topology(format!(
            "a closed hull needs at least 4 faces, found {}",
            faces.len()
        )));
    }

    for (index, face) in faces.iter().enumerate() {
        for slot in 0..3 {
            let (from, to) = (face.indices[slot], face.indices[(slot + 1) % 3]);
            let Some(neighbor_index) = face.neighbors[slot] else {
                return Err(HullError::invalid_topology(format!(
                    "edge {from}->{to} of face {index} has no neighbor"
                )));
            };
            let Some(neighbor) = faces.get(neighbor_index) else {
                return Err(HullError::invalid_topology(format!(
                    "edge {from}->{to} of face {index} points past the face list"
                )));
            };
            let mirrored = (0..3).any(|k| {
                neighbor.indices[k] == to
                    && neighbor.indices[(k + 1) % 3] == from
                    && neighbor.neighbors[k] == Some(index)
            });
            if !mirrored {
                return Err(HullError::invalid_topology(format!(
                    "edge {from}->{to} of face {index} is not mirrored by face {neighbor_index}"
                )));
            }
        }
    }

    let vertices = hull.vertex_indices().len();
    if faces.len() + 4 != 2 * vertices {
        return Err(HullError::invalid_topology(format!(
            "{} faces over {vertices} vertices is not a triangulated sphere",
            faces.len()
        )));
    }
    Ok(())
}

/// Every face normal points away from the hull's interior point.
pub fn check_orientation(hull: &ConvexHull) -> HullResult<()> {
    let inside = hull.interior_point();
    for (face, hull_face) in hull.faces().iter().enumerate() {
        let distance = hull_face.signed_distance(inside);
        if distance >= 0.0 {
            return Err(HullError::InvertedFace { face, distance });
        }
    }
    Ok(())
}

/// No input point lies farther than the tolerance outside any face.
pub fn check_containment(hull: &ConvexHull) -> HullResult<()> {
    let tolerance = hull.tolerance();
    for (point, position) in hull.points().iter() {
        for (face, hull_face) in hull.faces().iter().enumerate() {
            let distance = hull_face.signed_distance(position);
            if tolerance.is_outside(distance) {
                return Err(HullError::ContainmentViolated {
                    point,
                    face,
                    distance,
                });
            }
        }
    }
    Ok(())
}

/// Every hull vertex is a corner of at least three faces.
pub fn check_minimality(hull: &ConvexHull) -> HullResult<()> {
    let mut uses = vec![0usize; hull.points().len()];
    for face in hull.faces() {
        for &i in &face.indices {
            uses[i] += 1;
        }
    }
    match uses.iter().position(|&n| n == 1 || n == 2) {
        Some(vertex) => Err(HullError::invalid_topology(format!(
            "vertex {vertex} is used by only {} faces",
            uses[vertex]
        ))),
        None => Ok(()),
    }
}
