//! # Triangle Adjacency Mesh
//!
//! Faces of the hull under construction, stored in an arena and addressed
//! by stable [`FaceId`] handles. Each face knows its three neighbors (one
//! per edge) and owns the outside points it has claimed, plus the coplanar
//! points lying over its triangle.
//!
//! ## Edge Slots
//!
//! Slot `k` of a face with vertices `[v0, v1, v2]` is the directed edge
//! `v[k] → v[(k + 1) % 3]`:
//!
//! ```text
//!        v2
//!       /  \
//!  s2  /    \  s1
//!     /      \
//!   v0 ------ v1
//!        s0
//! ```
//!
//! Two neighboring faces traverse their shared edge in opposite directions.
//!
//! Mesh-consistency violations in this module panic. They can only come
//! from a bug in the expander, and continuing would yield a wrong hull.


use crate::error::{HullError, HullResult};
use crate::geometry::{Barycentric, Plane};
use crate::points::PointBuffer;
use glam::DVec3;
use std::fmt;

/// Stable handle of a face in a [`FaceArena`]. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FaceId(pub u32);

impl FaceId {
    /// Position of the face in the arena.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for FaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "F{}", self.0)
    }
}

/// Index of an edge within a face (0, 1 or 2).
pub type EdgeSlot = usize;

/// A triangle of the hull under construction.
#[derive(Debug, Clone)]
pub struct Face {
    vertices: [usize; 3],
    plane: Plane,
    neighbors: [Option<FaceId>; 3],
    outside: Vec<usize>,
    covered: Vec<usize>,
    farthest: Option<(usize, f64)>,
    live: bool,
}

impl Face {
    /// Creates an unlinked face over three point indices.
    ///
    /// Returns `None` if the points do not span a plane.
    pub fn new(vertices: [usize; 3], points: &PointBuffer) -> Option<Self> {
        let [a, b, c] = vertices;
        let plane = Plane::from_triangle(points[a], points[b], points[c])?;
        Some(Self {
            vertices,
            plane,
            neighbors: [None; 3],
            outside: Vec::new(),
            covered: Vec::new(),
            farthest: None,
            live: true,
        })
    }

    /// Point indices in winding order.
    #[inline]
    pub fn vertices(&self) -> [usize; 3] {
        self.vertices
    }

    /// Supporting plane, normal pointing outward.
    #[inline]
    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    /// Unit outward normal.
    #[inline]
    pub fn normal(&self) -> DVec3 {
        self.plane.normal
    }

    /// Signed distance of `point` from the face plane.
    #[inline]
    pub fn signed_distance(&self, point: DVec3) -> f64 {
        self.plane.signed_distance(point)
    }

    /// Neighbor across edge `slot`.
    #[inline]
    pub fn neighbor(&self, slot: EdgeSlot) -> Option<FaceId> {
        self.neighbors[slot]
    }

    /// All three neighbor slots.
    #[inline]
    pub fn neighbors(&self) -> [Option<FaceId>; 3] {
        self.neighbors
    }

    /// Directed edge `slot` as `(from, to)`.
    #[inline]
    pub fn edge(&self, slot: EdgeSlot) -> (usize, usize) {
        (self.vertices[slot], self.vertices[(slot + 1) % 3])
    }

    /// Slot of the directed edge `from → to`, if this face has it.
    pub fn slot_of_edge(&self, from: usize, to: usize) -> Option<EdgeSlot> {
        (0..3).find(|&slot| self.edge(slot) == (from, to))
    }

    /// The vertex not on edge `slot`.
    #[inline]
    pub fn opposite_vertex(&self, slot: EdgeSlot) -> usize {
        self.vertices[(slot + 2) % 3]
    }

    /// True if `point` is one of the corners.
    pub fn has_vertex(&self, point: usize) -> bool {
        self.vertices.contains(&point)
    }

    /// Outside points claimed by this face.
    pub fn outside(&self) -> &[usize] {
        &self.outside
    }

    /// True while the face still has outside points to process.
    pub fn is_active(&self) -> bool {
        self.live && !self.outside.is_empty()
    }

    /// Adds a point to the outside set, tracking the farthest one.
    pub fn claim(&mut self, point: usize, distance: f64) {
        self.outside.push(point);
        match self.farthest {
            Some((_, best)) if best >= distance => {}
            _ => self.farthest = Some((point, distance)),
        }
    }

    /// Empties the outside set and returns its points.
    pub fn take_outside(&mut self) -> Vec<usize> {
        self.farthest = None;
        std::mem::take(&mut self.outside)
    }

    /// Records a coplanar point that lies over the triangle.
    ///
    /// Covered points are not hull vertices while the face lives, but are
    /// handed back for reclassification when it is removed.
    pub fn cover(&mut self, point: usize) {
        self.covered.push(point);
    }

    /// Coplanar points lying over this face.
    pub fn covered(&self) -> &[usize] {
        &self.covered
    }

    /// Farthest outside point and its signed distance.
    #[inline]
    pub fn farthest(&self) -> Option<(usize, f64)> {
        self.farthest
    }

    /// Drops `point` from the outside set. Returns false if it was not there.
    pub fn release(&mut self, point: usize, points: &PointBuffer) -> bool {
        let Some(position) = self.outside.iter().position(|&p| p == point) else {
            return false;
        };
        self.outside.swap_remove(position);
        if self.farthest.map(|(p, _)| p) == Some(point) {
            let plane = self.plane;
            self.farthest = self
                .outside
                .iter()
                .map(|&p| (p, plane.signed_distance(points[p])))
                .fold(None, |best: Option<(usize, f64)>, (p, d)| match best {
                    Some((_, best_d)) if best_d >= d => best,
                    _ => Some((p, d)),
                });
        }
        true
    }

    /// False once the face has been removed from the hull.
    #[inline]
    pub fn is_live(&self) -> bool {
        self.live
    }

    /// Barycentric coordinates of `point` over this triangle.
    pub fn barycentric(&self, point: DVec3, points: &PointBuffer) -> Option<Barycentric> {
        let [a, b, c] = self.vertices;
        Barycentric::of(points[a], points[b], points[c], point)
    }
}

/// Owner of every face created during one hull computation.
///
/// Removed faces keep their slot, so a [`FaceId`] stays valid (and
/// detectably dead) for the whole computation.
#[derive(Debug, Clone, Default)]
pub struct FaceArena {
    faces: Vec<Face>,
    live: usize,
}

impl FaceArena {
    /// Creates an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an arena with room for `capacity` faces.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            faces: Vec::with_capacity(capacity),
            live: 0,
        }
    }

    /// Stores a face and returns its handle.
    pub fn insert(&mut self, face: Face) -> FaceId {
        let id = FaceId(self.faces.len() as u32);
        if face.live {
            self.live += 1;
        }
        self.faces.push(face);
        id
    }

    /// Returns the face behind `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this arena.
    #[inline]
    pub fn get(&self, id: FaceId) -> &Face {
        &self.faces[id.index()]
    }

    /// Mutable access to the face behind `id`.
    #[inline]
    pub fn get_mut(&mut self, id: FaceId) -> &mut Face {
        &mut self.faces[id.index()]
    }

    /// Marks a face dead, clears its links and hands back its outside set
    /// followed by its covered points.
    pub fn remove(&mut self, id: FaceId) -> Vec<usize> {
        let face = &mut self.faces[id.index()];
        if face.live {
            face.live = false;
            self.live -= 1;
        }
        face.neighbors = [None; 3];
        let mut reclaimed = face.take_outside();
        reclaimed.append(&mut face.covered);
        reclaimed
    }

    /// True if `id` refers to a face that has not been removed.
    #[inline]
    pub fn is_live(&self, id: FaceId) -> bool {
        self.faces.get(id.index()).is_some_and(Face::is_live)
    }

    /// Handles of all live faces, in creation order.
    pub fn live_ids(&self) -> impl Iterator<Item = FaceId> + '_ {
        self.faces
            .iter()
            .enumerate()
            .filter(|(_, face)| face.live)
            .map(|(index, _)| FaceId(index as u32))
    }

    /// Number of live faces.
    #[inline]
    pub fn live_count(&self) -> usize {
        self.live
    }

    /// Number of faces ever created, removed ones included.
    #[inline]
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// True if no face was ever created.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Slot of `face` whose (undirected) edge is shared with `other`.
    pub fn which_edge(&self, face: FaceId, other: FaceId) -> Option<EdgeSlot> {
        let (face, other) = (self.get(face), self.get(other));
        (0..3).find(|&slot| {
            let (a, b) = face.edge(slot);
            other.has_vertex(a) && other.has_vertex(b)
        })
    }

    /// Endpoints of edge `slot` of `face`, in the face's winding.
    #[inline]
    pub fn edge_vertices(&self, face: FaceId, slot: EdgeSlot) -> (usize, usize) {
        self.get(face).edge(slot)
    }

    /// Overwrites one neighbor slot without touching the other side.
    pub fn set_neighbor(&mut self, face: FaceId, slot: EdgeSlot, neighbor: Option<FaceId>) {
        self.get_mut(face).neighbors[slot] = neighbor;
    }

    /// Clears one neighbor slot.
    pub fn detach(&mut self, face: FaceId, slot: EdgeSlot) {
        self.set_neighbor(face, slot, None);
    }

    /// Links edge `slot_a` of `a` with edge `slot_b` of `b`.
    ///
    /// # Panics
    ///
    /// Panics if the edges are not the same edge in opposite directions, or
    /// if either slot already holds a different neighbor.
    pub fn link_pair(&mut self, a: FaceId, slot_a: EdgeSlot, b: FaceId, slot_b: EdgeSlot) {
        let (from, to) = self.edge_vertices(a, slot_a);
        let other = self.edge_vertices(b, slot_b);
        assert!(
            other == (to, from),
            "cannot link {a} edge {from}->{to} with {b} edge {}->{}: orientation mismatch",
            other.0,
            other.1
        );
        for (face, slot, neighbor) in [(a, slot_a, b), (b, slot_b, a)] {
            let current = self.get(face).neighbors[slot];
            assert!(
                current.is_none() || current == Some(neighbor),
                "edge {slot} of {face} already has neighbor {current:?}, cannot link {neighbor}"
            );
            self.set_neighbor(face, slot, Some(neighbor));
        }
    }

    /// Links every pair in `faces` that shares an edge.
    ///
    /// # Panics
    ///
    /// Panics if two faces share all three vertices, or if an edge would
    /// gain a second, different neighbor.
    pub fn link(&mut self, faces: &[FaceId]) {
        for (i, &a) in faces.iter().enumerate() {
            for &b in &faces[i + 1..] {
                let shared = self
                    .get(a)
                    .vertices
                    .iter()
                    .filter(|&&v| self.get(b).has_vertex(v))
                    .count();
                match shared {
                    0 | 1 => {}
                    2 => {
                        let slot_a = self.which_edge(a, b);
                        let slot_b = self.which_edge(b, a);
                        if let (Some(slot_a), Some(slot_b)) = (slot_a, slot_b) {
                            self.link_pair(a, slot_a, b, slot_b);
                        }
                    }
                    _ => panic!("{a} and {b} span the same vertices"),
                }
            }
        }
    }

    /// Verifies that the live faces form a closed 2-manifold: every edge
    /// has exactly one live neighbor that links back over the reversed edge.
    pub fn check_closed(&self) -> HullResult<()> {
        for id in self.live_ids() {
            let face = self.get(id);
            for slot in 0..3 {
                let (from, to) = face.edge(slot);
                let Some(neighbor_id) = face.neighbors[slot] else {
                    return Err(HullError::invalid_topology(format!(
                        "edge {from}->{to} of {id} has no neighbor"
                    )));
                };
                if !self.is_live(neighbor_id) {
                    return Err(HullError::invalid_topology(format!(
                        "edge {from}->{to} of {id} points at removed face {neighbor_id}"
                    )));
                }
                let neighbor = self.get(neighbor_id);
                match neighbor.slot_of_edge(to, from) {
                    Some(back) if neighbor.neighbors[back] == Some(id) => {}
                    _ => {
                        return Err(HullError::invalid_topology(format!(
                            "edge {from}->{to} of {id} is not mirrored by {neighbor_id}"
                        )))
                    }
                }
            }
        }
        Ok(())
    }
}
