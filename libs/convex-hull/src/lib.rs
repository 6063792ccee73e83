//! # Convex Hull
//!
//! Robust incremental 3D convex hull (QuickHull) over an explicit triangle
//! adjacency mesh.
//!
//! ## Architecture
//!
//! ```text
//! points → seed tetrahedron → expand (flood fill, horizon, fan) → ConvexHull → HullMesh
//! ```
//!
//! Every comparison in the pipeline (seeding, visibility, outside sets,
//! coplanar containment) goes through one [`Tolerance`], derived from the
//! input scale unless [`HullConfig`] pins it.
//!
//! ## Usage
//!
//! ```rust
//! use convex_hull::{convex_hull, HullError};
//! use glam::DVec3;
//!
//! let mut points = Vec::new();
//! for x in [-1.0, 1.0] {
//!     for y in [-1.0, 1.0] {
//!         for z in [-1.0, 1.0] {
//!             points.push(DVec3::new(x, y, z));
//!         }
//!     }
//! }
//! points.push(DVec3::ZERO);
//!
//! let hull = convex_hull(&points).unwrap();
//! assert_eq!(hull.face_count(), 12);
//! assert_eq!(hull.interior_indices(), vec![8]);
//! assert!(hull.validate().is_ok());
//!
//! let flat = [DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::new(1.0, 1.0, 0.0)];
//! assert!(matches!(convex_hull(&flat), Err(HullError::Coplanar { .. })));
//! ```
//!
//! ## Logging
//!
//! The crate logs through the `log` facade and never installs a logger:
//! `debug` for seeding, completion and every widened visible region,
//! `trace` per expansion step, `warn` when an apex is dropped because no
//! closable region is left around it.

pub mod batch;
pub mod error;
pub mod geometry;
pub mod hull;
pub mod mesh;
pub mod points;
pub mod tolerance;
pub mod topology;

pub use batch::{concentric_hulls, concentric_hulls_parallel, hull_all, HullLayer};
pub use config::constants::{ConfigError, FaceOrder, HullConfig};
pub use error::{HullError, HullResult};
pub use hull::{convex_hull, convex_hull_with, ConvexHull, HullBuilder, HullFace};
pub use mesh::HullMesh;
pub use points::PointBuffer;
pub use tolerance::Tolerance;
