//! # Hull Output
//!
//! The finished hull: compact faces with neighbor indices, plus the
//! measurements callers usually want from a convex polytope.

use super::validate;
use crate::error::HullResult;
use crate::geometry::{tetrahedron_volume, triangle_area, Plane};
use crate::mesh::HullMesh;
use crate::points::PointBuffer;
use crate::tolerance::Tolerance;
use crate::topology::{FaceArena, FaceId};
use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One triangle of a finished hull.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HullFace {
    /// Point indices, counter-clockwise seen from outside
    pub indices: [usize; 3],
    /// Unit outward normal
    pub normal: DVec3,
    /// Plane constant: `normal · p + offset = 0` on the face
    pub offset: f64,
    /// Index (into the hull's face list) of the neighbor across each edge
    /// `indices[k] → indices[(k + 1) % 3]`. Always `Some` on a hull built
    /// by this crate; `None` only shows up in hand-made or corrupted data,
    /// which [`ConvexHull::validate`] reports.
    pub neighbors: [Option<usize>; 3],
}

impl HullFace {
    /// Supporting plane.
    pub fn plane(&self) -> Plane {
        Plane {
            normal: self.normal,
            offset: self.offset,
        }
    }

    /// Signed distance of `point` from the face plane; positive outside.
    #[inline]
    pub fn signed_distance(&self, point: DVec3) -> f64 {
        self.normal.dot(point) + self.offset
    }

    /// Corner coordinates.
    pub fn vertices(&self, points: &PointBuffer) -> [DVec3; 3] {
        self.indices.map(|i| points[i])
    }

    /// Centroid of the triangle.
    pub fn centroid(&self, points: &PointBuffer) -> DVec3 {
        let [a, b, c] = self.vertices(points);
        (a + b + c) / 3.0
    }

    /// Area of the triangle.
    pub fn area(&self, points: &PointBuffer) -> f64 {
        let [a, b, c] = self.vertices(points);
        triangle_area(a, b, c)
    }
}

/// A closed, outward-oriented triangle hull over a point buffer.
///
/// Faces refer to the input by index; [`ConvexHull::to_mesh`] produces a
/// compacted render mesh.
#[derive(Debug, Clone)]
pub struct ConvexHull {
    points: PointBuffer,
    faces: Vec<HullFace>,
    tolerance: Tolerance,
    interior_point: DVec3,
}

impl ConvexHull {
    pub(crate) fn from_arena(
        points: PointBuffer,
        arena: &FaceArena,
        tolerance: Tolerance,
        interior_point: DVec3,
    ) -> Self {
        let compact: HashMap<FaceId, usize> = arena
            .live_ids()
            .enumerate()
            .map(|(index, id)| (id, index))
            .collect();

        let faces = arena
            .live_ids()
            .map(|id| {
                let face = arena.get(id);
                let plane = face.plane();
                HullFace {
                    indices: face.vertices(),
                    normal: plane.normal,
                    offset: plane.offset,
                    neighbors: face
                        .neighbors()
                        .map(|n| n.and_then(|n| compact.get(&n).copied())),
                }
            })
            .collect();

        Self {
            points,
            faces,
            tolerance,
            interior_point,
        }
    }

    /// The input points, hull vertices and interior alike.
    pub fn points(&self) -> &PointBuffer {
        &self.points
    }

    /// Hull faces.
    pub fn faces(&self) -> &[HullFace] {
        &self.faces
    }

    /// Number of faces.
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Sorted indices of the points that are hull vertices.
    pub fn vertex_indices(&self) -> Vec<usize> {
        let mut used = vec![false; self.points.len()];
        for face in &self.faces {
            for &i in &face.indices {
                used[i] = true;
            }
        }
        (0..used.len()).filter(|&i| used[i]).collect()
    }

    /// Sorted indices of the points that are not hull vertices.
    pub fn interior_indices(&self) -> Vec<usize> {
        let vertices = self.vertex_indices();
        (0..self.points.len())
            .filter(|i| vertices.binary_search(i).is_err())
            .collect()
    }

    /// True if point `index` is a hull vertex.
    pub fn is_vertex(&self, index: usize) -> bool {
        self.faces.iter().any(|face| face.indices.contains(&index))
    }

    /// Tolerance the hull was built with.
    pub fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    /// A point strictly inside the hull (the seed tetrahedron's centroid).
    pub fn interior_point(&self) -> DVec3 {
        self.interior_point
    }

    /// Largest signed distance of `point` over all face planes. Negative
    /// inside, positive outside.
    pub fn signed_distance(&self, point: DVec3) -> f64 {
        self.faces
            .iter()
            .map(|face| face.signed_distance(point))
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// True if `point` is inside or within tolerance of the surface.
    pub fn contains_point(&self, point: DVec3) -> bool {
        self.signed_distance(point) <= self.tolerance.value()
    }

    /// Enclosed volume.
    pub fn volume(&self) -> f64 {
        let reference = self.interior_point;
        self.faces
            .iter()
            .map(|face| {
                let [a, b, c] = face.vertices(&self.points);
                tetrahedron_volume(reference, a, b, c)
            })
            .sum()
    }

    /// Total face area.
    pub fn surface_area(&self) -> f64 {
        self.faces.iter().map(|face| face.area(&self.points)).sum()
    }

    /// Center of mass of the enclosed solid.
    pub fn centroid(&self) -> DVec3 {
        let reference = self.interior_point;
        let (weighted, volume) = self.faces.iter().fold(
            (DVec3::ZERO, 0.0),
            |(weighted, volume), face| {
                let [a, b, c] = face.vertices(&self.points);
                let v = tetrahedron_volume(reference, a, b, c);
                (weighted + (reference + a + b + c) * (v / 4.0), volume + v)
            },
        );
        if volume > 0.0 {
            weighted / volume
        } else {
            reference
        }
    }

    /// Axis-aligned bounding box of the hull vertices as `(min, max)`.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        self.faces
            .iter()
            .flat_map(|face| face.vertices(&self.points))
            .fold(
                (DVec3::splat(f64::INFINITY), DVec3::splat(f64::NEG_INFINITY)),
                |(min, max), p| (min.min(p), max.max(p)),
            )
    }

    /// Compacted render mesh: only hull vertices, remapped indices,
    /// per-vertex normals.
    pub fn to_mesh(&self) -> HullMesh {
        HullMesh::from_hull(self)
    }

    /// Checks closure, orientation, containment and minimality.
    pub fn validate(&self) -> HullResult<()> {
        validate::validate(self)
    }
}
