//! Reference scenarios with known hulls and known failures.

mod common;

use approx::assert_relative_eq;
use common::*;
use convex_hull::{convex_hull, convex_hull_with, HullConfig, HullError};
use glam::DVec3;

#[test]
fn test_regular_tetrahedron() {
    let points = regular_tetrahedron(1.0);
    let hull = convex_hull(&points).unwrap();

    assert_eq!(hull.face_count(), 4);
    assert_eq!(hull.vertex_indices(), vec![0, 1, 2, 3]);
    assert!(hull.interior_indices().is_empty());
    assert!(hull.validate().is_ok());
    // Cube of side 2 minus four corner tetrahedra of volume 4/3
    assert_relative_eq!(hull.volume(), 8.0 / 3.0, epsilon = 1e-9);
}

#[test]
fn test_cube_corners() {
    let hull = convex_hull(&cube_corners(1.0)).unwrap();

    assert_eq!(hull.face_count(), 12);
    assert_eq!(hull.vertex_indices(), (0..8).collect::<Vec<_>>());
    assert!(hull.validate().is_ok());
    assert_relative_eq!(hull.volume(), 8.0, epsilon = 1e-9);
    assert_relative_eq!(hull.surface_area(), 24.0, epsilon = 1e-9);

    let centroid = hull.centroid();
    assert_relative_eq!(centroid.length(), 0.0, epsilon = 1e-9);

    let mesh = hull.to_mesh();
    assert_eq!(mesh.vertex_count(), 8);
    assert_eq!(mesh.triangle_count(), 12);
    assert!(mesh.validate());
}

#[test]
fn test_cube_with_centroid() {
    let mut points = cube_corners(1.0);
    points.push(DVec3::ZERO);
    let hull = convex_hull(&points).unwrap();

    assert_eq!(hull.interior_indices(), vec![8]);
    assert!(!hull.is_vertex(8));
    assert_eq!(hull.face_count(), 12);
    assert_eq!(hull.vertex_indices(), (0..8).collect::<Vec<_>>());
    assert!(hull.validate().is_ok());
}

#[test]
fn test_ball_with_axis_extremes() {
    let mut points = ball_points(42, 100, 10.0);
    points.extend(octahedron(10.0));
    let hull = convex_hull(&points).unwrap();

    assert!(hull.validate().is_ok());
    for extreme in 100..106 {
        assert!(hull.is_vertex(extreme), "extreme point {extreme} is not a vertex");
    }

    // Points strictly inside the octahedron can never be vertices
    for (i, p) in points.iter().enumerate().take(100) {
        if p.x.abs() + p.y.abs() + p.z.abs() < 10.0 - 1e-6 {
            assert!(!hull.is_vertex(i), "interior point {i} is a vertex");
            assert!(hull.faces().iter().all(|f| !f.indices.contains(&i)));
        }
    }
}

#[test]
fn test_coincident_plus_one() {
    let p = DVec3::new(1.0, 1.0, 1.0);
    let points = [p, p, p, DVec3::new(2.0, 3.0, 4.0)];
    let err = convex_hull(&points).unwrap_err();

    assert!(err.is_degenerate());
    assert!(matches!(
        err,
        HullError::Collinear { .. } | HullError::Coplanar { .. }
    ));
}

#[test]
fn test_flat_square_within_tolerance() {
    // Thickness of half the default tolerance for a unit-sized input
    let points = [
        DVec3::new(0.0, 0.0, 0.0),
        DVec3::new(1.0, 0.0, 0.0),
        DVec3::new(0.0, 1.0, 0.0),
        DVec3::new(1.0, 1.0, 5e-10),
    ];
    assert!(matches!(convex_hull(&points), Err(HullError::Coplanar { .. })));
}

#[test]
fn test_tilted_flat_square() {
    let (sin, cos) = 30.0_f64.to_radians().sin_cos();
    let points = [
        DVec3::new(0.0, 0.0, 0.0),
        DVec3::new(1.0, 0.0, 0.0),
        DVec3::new(0.0, cos, sin),
        DVec3::new(1.0, cos, sin),
        DVec3::new(0.5, 0.5 * cos, 0.5 * sin),
    ];
    assert!(matches!(convex_hull(&points), Err(HullError::Coplanar { .. })));
}

#[test]
fn test_thin_slab_with_tight_tolerance() {
    // The same square is a valid solid once the tolerance is tighter than its thickness
    let points = [
        DVec3::new(0.0, 0.0, 0.0),
        DVec3::new(1.0, 0.0, 0.0),
        DVec3::new(0.0, 1.0, 0.0),
        DVec3::new(1.0, 1.0, 1e-3),
    ];
    let config = HullConfig::default().with_absolute_tolerance(1e-6).unwrap();
    let hull = convex_hull_with(&points, &config).unwrap();
    assert_eq!(hull.face_count(), 4);
    assert!(hull.validate().is_ok());
}

#[test]
fn test_collinear_input() {
    let points: Vec<DVec3> = (0..10).map(|i| DVec3::new(1.0, 2.0, 3.0) * i as f64).collect();
    assert!(matches!(convex_hull(&points), Err(HullError::Collinear { .. })));
}

#[test]
fn test_coincident_input() {
    let points = vec![DVec3::splat(3.0); 6];
    assert!(matches!(convex_hull(&points), Err(HullError::Coincident { .. })));
}

#[test]
fn test_too_few_points() {
    let points = [DVec3::ZERO, DVec3::X, DVec3::Y];
    assert_eq!(
        convex_hull(&points).unwrap_err(),
        HullError::InsufficientPoints { count: 3, min: 4 }
    );
}

#[test]
fn test_non_finite_point() {
    let points = [DVec3::ZERO, DVec3::X, DVec3::new(f64::INFINITY, 0.0, 0.0), DVec3::Z];
    assert_eq!(
        convex_hull(&points).unwrap_err(),
        HullError::NonFinitePoint { index: 2 }
    );
}
