//! Shared point-cloud generators for the integration tests.
//!
//! Random clouds use a seeded `StdRng` so every run sees the same input.

#![allow(dead_code)]

use glam::DVec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Corners of an axis-aligned cube centred on the origin.
pub fn cube_corners(half: f64) -> Vec<DVec3> {
    let mut corners = Vec::with_capacity(8);
    for x in [-half, half] {
        for y in [-half, half] {
            for z in [-half, half] {
                corners.push(DVec3::new(x, y, z));
            }
        }
    }
    corners
}

/// Corners, edge midpoints and face centres of a cube: every point on the
/// `{-half, 0, half}³` grid except the centre.
pub fn cube_surface_grid(half: f64) -> Vec<DVec3> {
    let steps = [-half, 0.0, half];
    let mut points = Vec::with_capacity(26);
    for x in steps {
        for y in steps {
            for z in steps {
                let p = DVec3::new(x, y, z);
                if p != DVec3::ZERO {
                    points.push(p);
                }
            }
        }
    }
    points
}

/// Regular tetrahedron inscribed in the cube `[-scale, scale]³`.
pub fn regular_tetrahedron(scale: f64) -> Vec<DVec3> {
    vec![
        DVec3::new(1.0, 1.0, 1.0) * scale,
        DVec3::new(1.0, -1.0, -1.0) * scale,
        DVec3::new(-1.0, 1.0, -1.0) * scale,
        DVec3::new(-1.0, -1.0, 1.0) * scale,
    ]
}

/// The six points `(±r, 0, 0)`, `(0, ±r, 0)`, `(0, 0, ±r)`.
pub fn octahedron(radius: f64) -> Vec<DVec3> {
    vec![
        DVec3::X * radius,
        DVec3::NEG_X * radius,
        DVec3::Y * radius,
        DVec3::NEG_Y * radius,
        DVec3::Z * radius,
        DVec3::NEG_Z * radius,
    ]
}

/// `n` points uniformly distributed inside a ball (rejection sampling).
pub fn ball_points(seed: u64, n: usize, radius: f64) -> Vec<DVec3> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut points = Vec::with_capacity(n);
    while points.len() < n {
        let p = DVec3::new(
            rng.random_range(-1.0..1.0),
            rng.random_range(-1.0..1.0),
            rng.random_range(-1.0..1.0),
        );
        if p.length_squared() <= 1.0 {
            points.push(p * radius);
        }
    }
    points
}

/// `n` random points on a sphere.
pub fn sphere_points(seed: u64, n: usize, radius: f64) -> Vec<DVec3> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let azimuth = rng.random::<f64>() * std::f64::consts::TAU;
            let z = rng.random::<f64>() * 2.0 - 1.0;
            let ring = (1.0 - z * z).sqrt();
            DVec3::new(ring * azimuth.cos(), ring * azimuth.sin(), z) * radius
        })
        .collect()
}

/// `n` evenly spread points on a sphere (Fibonacci lattice).
pub fn fibonacci_sphere(n: usize, radius: f64) -> Vec<DVec3> {
    let golden_ratio = (1.0 + 5.0_f64.sqrt()) / 2.0;
    (0..n)
        .map(|i| {
            let theta = std::f64::consts::TAU * i as f64 / golden_ratio;
            let phi = ((2 * i + 1) as f64 / n as f64 - 1.0).acos();
            DVec3::new(
                phi.sin() * theta.cos(),
                phi.sin() * theta.sin(),
                phi.cos(),
            ) * radius
        })
        .collect()
}

/// `n` points uniformly inside an axis-aligned box.
pub fn box_points(seed: u64, n: usize, half_extents: DVec3) -> Vec<DVec3> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            DVec3::new(
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
            ) * half_extents
        })
        .collect()
}

/// Corners of a cube plus `n` random points on its faces. Every face point
/// is then moved by up to `jitter` along each axis; the corners stay exact.
pub fn jittered_cube_surface(seed: u64, n: usize, half: f64, jitter: f64) -> Vec<DVec3> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut points = cube_corners(half);
    for _ in 0..n {
        let mut p = DVec3::new(
            rng.random_range(-half..half),
            rng.random_range(-half..half),
            rng.random_range(-half..half),
        );
        let axis = rng.random_range(0..3);
        p[axis] = if rng.random::<bool>() { half } else { -half };

        let noise = DVec3::new(
            rng.random_range(-1.0..1.0),
            rng.random_range(-1.0..1.0),
            rng.random_range(-1.0..1.0),
        );
        points.push(p + noise * jitter);
    }
    points
}
