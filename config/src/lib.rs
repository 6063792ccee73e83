//! # Config Crate
//!
//! Centralized configuration for the convex hull engine.
//! All magic numbers and tunable parameters are defined here so the hull
//! builder, its tests and any caller agree on the same values.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{HullConfig, FaceOrder, DEFAULT_RELATIVE_TOLERANCE};
//!
//! let config = HullConfig::default();
//! assert_eq!(config.relative_tolerance, DEFAULT_RELATIVE_TOLERANCE);
//! assert_eq!(config.face_order, FaceOrder::Fifo);
//!
//! // Pin the tolerance to an absolute distance instead
//! let pinned = HullConfig::default().with_absolute_tolerance(1e-6).unwrap();
//! assert_eq!(pinned.absolute_tolerance, Some(1e-6));
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Validated**: Runtime configuration is checked when it is built
//! - **Dependency Free**: Pure constants and plain data

pub mod constants;
