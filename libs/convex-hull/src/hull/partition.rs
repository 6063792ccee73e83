//! # Outside-Set Partitioning
//!
//! Hands candidate points to the faces that can see them. Every point is
//! claimed or covered by at most one face; points no face wants are
//! interior.

use crate::points::PointBuffer;
use crate::tolerance::Tolerance;
use crate::topology::{Face, FaceArena, FaceId};
use config::constants::PARALLEL_PARTITION_THRESHOLD;
use rayon::prelude::*;

/// Where a point lies relative to one face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointSide {
    /// Beyond the plane by more than the tolerance.
    Outside,
    /// On the plane (within tolerance) but outside the triangle.
    CoplanarOutside,
    /// On the plane and over the triangle; already on the hull surface.
    CoplanarInside,
    /// Behind the plane by more than the tolerance.
    Inside,
}

impl PointSide {
    /// True for the sides that make a face claim the point.
    pub fn is_claimed(self) -> bool {
        matches!(self, Self::Outside | Self::CoplanarOutside)
    }
}

/// Counts from one partitioning run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PartitionStats {
    /// Points added to an outside set
    pub claimed: usize,
    /// Coplanar points recorded as covered by the face they lie over
    pub covered: usize,
    /// Points left behind every face
    pub interior: usize,
}

/// Classifies `point` against `face`, returning the side and the signed
/// distance.
pub fn classify(
    face: &Face,
    point: usize,
    points: &PointBuffer,
    tolerance: Tolerance,
) -> (PointSide, f64) {
    let position = points[point];
    let distance = face.signed_distance(position);
    let side = if tolerance.is_outside(distance) {
        PointSide::Outside
    } else if tolerance.is_behind(distance) {
        PointSide::Inside
    } else if over_footprint(face, position, points, tolerance) {
        PointSide::CoplanarInside
    } else {
        PointSide::CoplanarOutside
    };
    (side, distance)
}

fn over_footprint(
    face: &Face,
    position: glam::DVec3,
    points: &PointBuffer,
    tolerance: Tolerance,
) -> bool {
    face.barycentric(position, points)
        .is_some_and(|bary| bary.contains(tolerance.value()))
}

/// Partitions `pool` against a single face.
///
/// Claimed points move into the face's outside set and coplanar points over
/// the face are covered by it. Points behind the face stay in `pool`.
pub fn partition(
    arena: &mut FaceArena,
    face: FaceId,
    pool: &mut Vec<usize>,
    points: &PointBuffer,
    tolerance: Tolerance,
) -> PartitionStats {
    let face = arena.get_mut(face);
    let mut stats = PartitionStats::default();
    pool.retain(|&point| {
        let (side, distance) = classify(face, point, points, tolerance);
        match side {
            PointSide::Outside | PointSide::CoplanarOutside => {
                face.claim(point, distance);
                stats.claimed += 1;
                false
            }
            PointSide::CoplanarInside => {
                face.cover(point);
                stats.covered += 1;
                false
            }
            PointSide::Inside => true,
        }
    });
    stats
}

/// Distributes `pool` over `faces` and drops whatever nobody claims or
/// covers.
///
/// A strict pass over all faces runs first, so a point that is strictly
/// outside some face is never claimed as coplanar by an earlier one. Within
/// a pass, faces earlier in `faces` win.
pub fn distribute(
    arena: &mut FaceArena,
    faces: &[FaceId],
    pool: Vec<usize>,
    points: &PointBuffer,
    tolerance: Tolerance,
) -> PartitionStats {
    if pool.len() >= PARALLEL_PARTITION_THRESHOLD {
        distribute_parallel(arena, faces, pool, points, tolerance)
    } else {
        distribute_sequential(arena, faces, pool, points, tolerance)
    }
}

fn distribute_sequential(
    arena: &mut FaceArena,
    faces: &[FaceId],
    mut pool: Vec<usize>,
    points: &PointBuffer,
    tolerance: Tolerance,
) -> PartitionStats {
    let mut stats = PartitionStats::default();

    for &id in faces {
        if pool.is_empty() {
            break;
        }
        let face = arena.get_mut(id);
        pool.retain(|&point| {
            let distance = face.signed_distance(points[point]);
            if tolerance.is_outside(distance) {
                face.claim(point, distance);
                stats.claimed += 1;
                false
            } else {
                true
            }
        });
    }

    for &id in faces {
        if pool.is_empty() {
            break;
        }
        let face = arena.get_mut(id);
        pool.retain(|&point| {
            let position = points[point];
            let distance = face.signed_distance(position);
            if !tolerance.is_coplanar(distance) {
                return true;
            }
            if over_footprint(face, position, points, tolerance) {
                face.cover(point);
                stats.covered += 1;
            } else {
                face.claim(point, distance);
                stats.claimed += 1;
            }
            false
        });
    }

    stats.interior = pool.len();
    stats
}

#[derive(Debug, Clone, Copy)]
enum Assignment {
    Claim(FaceId, f64),
    Cover(FaceId),
    Interior,
}

/// Point-major form of the two passes: the first face with the point
/// strictly outside, else the first face with the point on its plane.
fn assign(
    arena: &FaceArena,
    faces: &[FaceId],
    point: usize,
    points: &PointBuffer,
    tolerance: Tolerance,
) -> Assignment {
    let position = points[point];
    let mut coplanar = None;
    for &id in faces {
        let distance = arena.get(id).signed_distance(position);
        if tolerance.is_outside(distance) {
            return Assignment::Claim(id, distance);
        }
        if coplanar.is_none() && tolerance.is_coplanar(distance) {
            coplanar = Some((id, distance));
        }
    }
    match coplanar {
        Some((id, _)) if over_footprint(arena.get(id), position, points, tolerance) => {
            Assignment::Cover(id)
        }
        Some((id, distance)) => Assignment::Claim(id, distance),
        None => Assignment::Interior,
    }
}

/// Classifies on the rayon pool, then applies claims in pool order so the
/// outside sets come out exactly as the sequential passes build them.
fn distribute_parallel(
    arena: &mut FaceArena,
    faces: &[FaceId],
    pool: Vec<usize>,
    points: &PointBuffer,
    tolerance: Tolerance,
) -> PartitionStats {
    let assignments: Vec<Assignment> = {
        let arena = &*arena;
        pool.par_iter()
            .map(|&point| assign(arena, faces, point, points, tolerance))
            .collect()
    };

    let mut stats = PartitionStats::default();
    for (&point, assignment) in pool.iter().zip(assignments) {
        match assignment {
            Assignment::Claim(id, distance) => {
                arena.get_mut(id).claim(point, distance);
                stats.claimed += 1;
            }
            Assignment::Cover(id) => {
                arena.get_mut(id).cover(point);
                stats.covered += 1;
            }
            Assignment::Interior => stats.interior += 1,
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn tolerance() -> Tolerance {
        Tolerance::absolute(1e-9).unwrap()
    }

    /// Floor triangle on z = 0 facing +z and a wall on x = 2 facing +x.
    fn floor_and_wall() -> (PointBuffer, FaceArena, FaceId, FaceId) {
        let points = PointBuffer::from(vec![
            // floor
            DVec3::ZERO,
            DVec3::X,
            DVec3::Y,
            // wall
            DVec3::new(2.0, 0.0, 0.0),
            DVec3::new(2.0, 1.0, 0.0),
            DVec3::new(2.0, 0.0, 1.0),
            // 6: on the floor plane, far outside the floor, beyond the wall
            DVec3::new(5.0, 5.0, 0.0),
            // 7: on the floor plane, over the floor triangle
            DVec3::new(0.2, 0.2, 0.0),
            // 8: behind both
            DVec3::new(0.2, 0.2, -1.0),
            // 9: on the floor plane outside the triangle, behind the wall
            DVec3::new(-1.0, -1.0, 0.0),
        ]);
        let mut arena = FaceArena::new();
        let floor = arena.insert(Face::new([0, 1, 2], &points).unwrap());
        let wall = arena.insert(Face::new([3, 4, 5], &points).unwrap());
        (points, arena, floor, wall)
    }

    #[test]
    fn test_classify_sides() {
        let (points, arena, floor, wall) = floor_and_wall();
        let floor = arena.get(floor);

        assert_eq!(classify(floor, 6, &points, tolerance()).0, PointSide::CoplanarOutside);
        assert_eq!(classify(floor, 7, &points, tolerance()).0, PointSide::CoplanarInside);
        assert_eq!(classify(floor, 8, &points, tolerance()).0, PointSide::Inside);

        let (side, distance) = classify(arena.get(wall), 6, &points, tolerance());
        assert_eq!(side, PointSide::Outside);
        assert!((distance - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_partition_single_face() {
        let (points, mut arena, floor, _) = floor_and_wall();
        let mut pool = vec![6, 7, 8, 9];
        let stats = partition(&mut arena, floor, &mut pool, &points, tolerance());

        assert_eq!(pool, vec![8]);
        assert_eq!(stats.claimed, 2);
        assert_eq!(stats.covered, 1);
        assert_eq!(arena.get(floor).outside(), &[6, 9]);
        assert_eq!(arena.get(floor).covered(), &[7]);
    }

    #[test]
    fn test_distribute_strict_pass_first() {
        let (points, mut arena, floor, wall) = floor_and_wall();
        let stats = distribute(&mut arena, &[floor, wall], vec![6, 7, 8, 9], &points, tolerance());

        // 6 is coplanar with the floor but strictly outside the wall
        assert_eq!(arena.get(wall).outside(), &[6]);
        assert_eq!(arena.get(floor).outside(), &[9]);
        assert_eq!(
            stats,
            PartitionStats {
                claimed: 2,
                covered: 1,
                interior: 1,
            }
        );
    }

    #[test]
    fn test_outside_sets_are_disjoint() {
        let (points, mut arena, floor, wall) = floor_and_wall();
        distribute(&mut arena, &[floor, wall], (6..10).collect(), &points, tolerance());
        let floor_set = arena.get(floor).outside();
        let wall_set = arena.get(wall).outside();
        assert!(floor_set.iter().all(|p| !wall_set.contains(p)));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut cloud = vec![
            DVec3::new(-1.0, -1.0, -1.0),
            DVec3::new(1.0, -1.0, -1.0),
            DVec3::new(0.0, 1.0, -1.0),
            DVec3::new(0.0, 0.0, 1.0),
        ];
        cloud.extend((0..2000).map(|_| {
            DVec3::new(
                rng.random_range(-3.0..3.0),
                rng.random_range(-3.0..3.0),
                rng.random_range(-3.0..3.0),
            )
        }));
        let points = PointBuffer::from(cloud);

        let mut arena = FaceArena::new();
        let faces: Vec<FaceId> = [[0, 2, 1], [0, 1, 3], [1, 2, 3], [2, 0, 3]]
            .into_iter()
            .map(|vertices| arena.insert(Face::new(vertices, &points).unwrap()))
            .collect();
        let pool: Vec<usize> = (4..points.len()).collect();

        let mut sequential = arena.clone();
        let mut parallel = arena;
        let a = distribute_sequential(&mut sequential, &faces, pool.clone(), &points, tolerance());
        let b = distribute_parallel(&mut parallel, &faces, pool, &points, tolerance());

        assert_eq!(a, b);
        assert!(a.claimed > 0);
        for &id in &faces {
            assert_eq!(sequential.get(id).outside(), parallel.get(id).outside());
            assert_eq!(sequential.get(id).farthest(), parallel.get(id).farthest());
            assert_eq!(sequential.get(id).covered(), parallel.get(id).covered());
        }
    }
}
