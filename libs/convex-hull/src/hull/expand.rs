//! # Incremental Expansion
//!
//! One apex insertion: pick an active face, find everything its farthest
//! point can see, cut that region out and close the hole with a fan of new
//! faces around the apex.
//!
//! ```text
//!        boundary                      boundary
//!     ____________                  ____________
//!     \  visible /                  \ \  new / /
//!      \ region /         →          \ \    / /
//!       \______/                      \_\__/_/
//!                                          P
//! ```

use super::partition::{distribute, partition};
use super::HullBuilder;
use crate::geometry::Plane;
use crate::topology::{EdgeSlot, Face, FaceId};
use config::constants::FaceOrder;
use std::collections::{HashMap, HashSet};

/// An edge between a visible face and a face that stays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct HorizonEdge {
    /// The face that stays
    pub boundary: FaceId,
    /// Slot of the edge in the boundary face
    pub slot: EdgeSlot,
    /// Endpoints in the boundary face's winding
    pub edge: (usize, usize),
}

/// Result of the visibility flood fill.
///
/// Once accepted by [`HullBuilder::visibility`], `edges` form a single
/// simple cycle: each rim vertex starts exactly one edge and ends exactly
/// one.
#[derive(Debug, Clone, Default)]
pub(crate) struct Horizon {
    /// Faces that see the apex, starting face first
    pub visible: Vec<FaceId>,
    /// Edges separating visible faces from the rest of the hull
    pub edges: Vec<HorizonEdge>,
}

impl HullBuilder {
    /// Next face with outstanding outside points, if any.
    ///
    /// Stale queue entries (removed or settled faces) are dropped here.
    /// The returned face stays queued until it stops being active.
    pub(crate) fn select_active_face(&mut self) -> Option<FaceId> {
        let arena = &self.arena;
        match self.order {
            FaceOrder::Fifo => loop {
                let id = *self.queue.front()?;
                if arena.get(id).is_active() {
                    return Some(id);
                }
                self.queue.pop_front();
            },
            FaceOrder::Lifo => loop {
                let id = *self.queue.back()?;
                if arena.get(id).is_active() {
                    return Some(id);
                }
                self.queue.pop_back();
            },
            FaceOrder::FarthestPoint => {
                self.queue.retain(|&id| arena.get(id).is_active());
                self.queue
                    .iter()
                    .copied()
                    .filter_map(|id| arena.get(id).farthest().map(|(_, d)| (id, d)))
                    .fold(None, |best: Option<(FaceId, f64)>, (id, d)| match best {
                        Some((_, best_d)) if best_d >= d => best,
                        _ => Some((id, d)),
                    })
                    .map(|(id, _)| id)
            }
        }
    }

    /// Processes one active face.
    pub(crate) fn expand(&mut self, face: FaceId) {
        let Some((farthest, distance)) = self.arena.get(face).farthest() else {
            return;
        };

        let coplanar = !self.tolerance.is_outside(distance);
        let apex = if coplanar {
            match self.resolve_coplanar(face) {
                Some(apex) => apex,
                None => return,
            }
        } else {
            farthest
        };

        let Some(horizon) = self.visibility(face, apex) else {
            self.arena.get_mut(face).release(apex, &self.points);
            self.interior += 1;
            log::warn!("Apex {apex} leaves no closable region on the hull; dropped as interior");
            return;
        };

        if coplanar {
            if let Some(owner) = self.covering_facet(&horizon, apex) {
                self.arena.get_mut(face).release(apex, &self.points);
                self.arena.get_mut(owner).cover(apex);
                log::trace!("Apex {apex} already lies on the surface of {owner}; covered");
                return;
            }
        }

        self.rebuild(apex, &horizon);
    }

    /// Re-partitions the coplanar points of `face` and picks the one that
    /// sticks out farthest beyond its edges. `None` settles the face.
    fn resolve_coplanar(&mut self, face: FaceId) -> Option<usize> {
        let mut pool = self.arena.get_mut(face).take_outside();
        partition(&mut self.arena, face, &mut pool, &self.points, self.tolerance);
        self.interior += pool.len();

        let settled = self.arena.get(face);
        let apex = settled
            .outside()
            .iter()
            .map(|&point| {
                let excess = settled
                    .barycentric(self.points[point], &self.points)
                    .map_or(f64::INFINITY, |bary| bary.excess());
                (point, excess)
            })
            .fold(None, |best: Option<(usize, f64)>, (point, excess)| match best {
                Some((_, best_excess)) if best_excess >= excess => best,
                _ => Some((point, excess)),
            })
            .map(|(point, _)| point);

        if apex.is_none() {
            log::trace!("{face} settled: no coplanar point outside its footprint");
        }
        apex
    }

    /// Faces that can see `apex`, grown from `start` until the hole they
    /// leave can be closed by a convex fan around the apex.
    ///
    /// Boundary faces that would make the fan fold, pinch or split are
    /// forced into the visible region and the flood fill is rerun. Returns
    /// `None` if that swallows the whole hull.
    pub(crate) fn visibility(&self, start: FaceId, apex: usize) -> Option<Horizon> {
        let mut forced = HashSet::new();
        loop {
            let horizon = self.flood_fill(start, apex, &forced);
            if horizon.edges.is_empty() {
                return None;
            }
            let defects = self.horizon_defects(&horizon, apex);
            if defects.is_empty() {
                return Some(horizon);
            }
            log::debug!(
                "Apex {apex}: widening a {}-face visible region over {} boundary faces",
                horizon.visible.len(),
                defects.len()
            );
            forced.extend(defects);
        }
    }

    /// Explicit-stack flood fill over the faces that see `apex`, plus any
    /// face in `forced`.
    ///
    /// # Panics
    ///
    /// Panics if a visited face has an open edge.
    fn flood_fill(&self, start: FaceId, apex: usize, forced: &HashSet<FaceId>) -> Horizon {
        let position = self.points[apex];
        let mut marks: HashMap<FaceId, bool> = HashMap::new();
        let mut stack = vec![start];
        let mut horizon = Horizon {
            visible: vec![start],
            edges: Vec::new(),
        };
        marks.insert(start, true);

        while let Some(id) = stack.pop() {
            let face = self.arena.get(id);
            for slot in 0..3 {
                let (from, to) = face.edge(slot);
                let Some(neighbor) = face.neighbor(slot) else {
                    panic!("{id} has no neighbor across edge {from}->{to}");
                };

                let visible = match marks.get(&neighbor) {
                    Some(&visible) => visible,
                    None => {
                        let distance = self.arena.get(neighbor).signed_distance(position);
                        let visible =
                            forced.contains(&neighbor) || self.tolerance.is_visible(distance);
                        marks.insert(neighbor, visible);
                        if visible {
                            horizon.visible.push(neighbor);
                            stack.push(neighbor);
                        }
                        visible
                    }
                };

                if !visible {
                    let Some(back) = self.arena.get(neighbor).slot_of_edge(to, from) else {
                        panic!("{neighbor} does not mirror edge {from}->{to} of {id}");
                    };
                    horizon.edges.push(HorizonEdge {
                        boundary: neighbor,
                        slot: back,
                        edge: (to, from),
                    });
                }
            }
        }
        horizon
    }

    /// Boundary faces that have to join the visible region before a fan
    /// over `horizon` yields a closed convex mesh. Empty when the horizon
    /// is acceptable.
    ///
    /// A fan face is rejected when it is degenerate, when the interior
    /// point is not behind it, or when it folds in (by more than the
    /// tolerance) against its boundary neighbor or the next fan face. The
    /// rim must be one simple cycle; a pinched rim vertex or a second cycle
    /// (a hole in the visible region) rejects the faces along it.
    pub(crate) fn horizon_defects(&self, horizon: &Horizon, apex: usize) -> Vec<FaceId> {
        let points = &self.points;
        let tol = self.tolerance;
        let edges = &horizon.edges;
        let mut defects = Vec::new();

        let fan: Vec<Option<Plane>> = edges
            .iter()
            .map(|edge| {
                let (a, b) = edge.edge;
                Plane::from_triangle(points[b], points[a], points[apex])
            })
            .collect();

        for (edge, plane) in edges.iter().zip(&fan) {
            let folded = plane.map_or(true, |plane| {
                let reference = self.arena.get(edge.boundary).opposite_vertex(edge.slot);
                plane.signed_distance(self.interior_point) >= 0.0
                    || tol.is_outside(plane.signed_distance(points[reference]))
            });
            if folded {
                defects.push(edge.boundary);
            }
        }

        let mut starting: HashMap<usize, usize> = HashMap::with_capacity(edges.len());
        let mut pinched = HashSet::new();
        for (index, edge) in edges.iter().enumerate() {
            if starting.insert(edge.edge.0, index).is_some() {
                pinched.insert(edge.edge.0);
            }
        }

        if !pinched.is_empty() {
            defects.extend(
                edges
                    .iter()
                    .filter(|edge| pinched.contains(&edge.edge.0) || pinched.contains(&edge.edge.1))
                    .map(|edge| edge.boundary),
            );
        } else {
            let mut cycle_of: Vec<Option<usize>> = vec![None; edges.len()];
            let mut lengths = Vec::new();
            for first in 0..edges.len() {
                if cycle_of[first].is_some() {
                    continue;
                }
                let cycle = lengths.len();
                let mut length = 0;
                let mut current = first;
                while cycle_of[current].is_none() {
                    cycle_of[current] = Some(cycle);
                    length += 1;
                    match starting.get(&edges[current].edge.1) {
                        Some(&following) => current = following,
                        None => break,
                    }
                }
                lengths.push(length);
            }
            let rim = (0..lengths.len()).max_by_key(|&cycle| lengths[cycle]);

            for (index, edge) in edges.iter().enumerate() {
                if cycle_of[index] != rim {
                    defects.push(edge.boundary);
                    continue;
                }
                // Fan faces over consecutive edges share the edge (b, apex)
                let (Some(plane), Some(&following)) = (fan[index], starting.get(&edge.edge.1))
                else {
                    continue;
                };
                let far = edges[following].edge.1;
                if tol.is_outside(plane.signed_distance(points[far])) {
                    defects.push(edge.boundary);
                    defects.push(edges[following].boundary);
                }
            }
        }

        defects.sort_unstable();
        defects.dedup();
        defects
    }

    /// The visible face `apex` lies on, within tolerance of its plane and
    /// over its triangle.
    fn covering_facet(&self, horizon: &Horizon, apex: usize) -> Option<FaceId> {
        let position = self.points[apex];
        let tol = self.tolerance;
        horizon.visible.iter().copied().find(|&id| {
            let face = self.arena.get(id);
            tol.is_coplanar(face.signed_distance(position))
                && face
                    .barycentric(position, &self.points)
                    .is_some_and(|bary| bary.contains(tol.value()))
        })
    }

    /// Replaces the visible region with a fan of faces around `apex`.
    ///
    /// Outside sets and covered points of the removed faces go back into
    /// the pool, together with every removed corner that is not on the rim.
    ///
    /// # Panics
    ///
    /// Panics if a new face would be degenerate or the fan cannot be linked.
    fn rebuild(&mut self, apex: usize, horizon: &Horizon) {
        let rim: HashSet<usize> = horizon.edges.iter().map(|edge| edge.edge.0).collect();
        let mut swallowed: Vec<usize> = horizon
            .visible
            .iter()
            .flat_map(|&id| self.arena.get(id).vertices())
            .filter(|vertex| *vertex != apex && !rim.contains(vertex))
            .collect();
        swallowed.sort_unstable();
        swallowed.dedup();

        let mut pool = Vec::new();
        for &id in &horizon.visible {
            pool.extend(self.arena.remove(id));
        }
        pool.retain(|&point| point != apex);
        pool.extend_from_slice(&swallowed);

        let mut fan = Vec::with_capacity(horizon.edges.len());
        for edge in &horizon.edges {
            self.arena.detach(edge.boundary, edge.slot);

            let (a, b) = edge.edge;
            let Some(face) = Face::new([b, a, apex], &self.points) else {
                panic!("degenerate face over horizon edge {a}->{b} and apex {apex}");
            };
            let id = self.arena.insert(face);
            self.arena.link_pair(id, 0, edge.boundary, edge.slot);
            fan.push(id);
        }
        self.arena.link(&fan);

        let candidates = pool.len();
        let stats = distribute(&mut self.arena, &fan, pool, &self.points, self.tolerance);
        self.interior += stats.interior;

        for &id in &fan {
            if self.arena.get(id).is_active() {
                self.queue.push_back(id);
            }
        }

        log::trace!(
            "Apex {apex}: {} visible, {} horizon edges, {} swallowed corners, {candidates} reclaimed, {} claimed",
            horizon.visible.len(),
            horizon.edges.len(),
            swallowed.len(),
            stats.claimed
        );
    }
}
