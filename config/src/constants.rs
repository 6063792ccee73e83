//! # Configuration Constants
//!
//! Centralized constants for the convex hull engine. Precision values,
//! size thresholds and the runtime [`HullConfig`] snapshot live here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Limits**: Minimum input sizes
//! - **Performance**: Thresholds for switching to parallel code paths
//! - **Runtime**: Validated per-computation configuration

use std::fmt;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons of derived quantities
/// (volumes, areas, unit lengths) in tests and helpers.
///
/// The hull builder itself never compares against this value; it uses the
/// per-computation tolerance derived from [`HullConfig`].
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-11));
/// ```
pub const EPSILON: f64 = 1e-10;

/// Default fraction of the input scale used as the hull distance tolerance.
///
/// The scale is the larger of the largest bounding-box extent and the largest
/// absolute coordinate of the input. A cloud spanning 10 units therefore gets
/// a tolerance of `1e-8`.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_RELATIVE_TOLERANCE;
///
/// let extent = 10.0;
/// let tolerance = extent * DEFAULT_RELATIVE_TOLERANCE;
/// assert!(tolerance < 1e-6);
/// ```
pub const DEFAULT_RELATIVE_TOLERANCE: f64 = 1e-9;

/// Largest relative tolerance accepted by [`HullConfig::new`].
///
/// Anything coarser than a tenth of the input scale would classify most of
/// the cloud as coplanar.
pub const MAX_RELATIVE_TOLERANCE: f64 = 0.1;

// =============================================================================
// LIMIT CONSTANTS
// =============================================================================

/// Minimum number of points for a 3D hull (a tetrahedron).
///
/// # Example
///
/// ```rust
/// use config::constants::MIN_HULL_POINTS;
///
/// let points = 3;
/// assert!(points < MIN_HULL_POINTS);
/// ```
pub const MIN_HULL_POINTS: usize = 4;

// =============================================================================
// PERFORMANCE CONSTANTS
// =============================================================================

/// Candidate count above which the seed partition classifies points on the
/// rayon thread pool. Below it the sequential loop is faster.
///
/// # Example
///
/// ```rust
/// use config::constants::PARALLEL_PARTITION_THRESHOLD;
///
/// let candidates = 50;
/// let parallel = candidates >= PARALLEL_PARTITION_THRESHOLD;
/// assert!(!parallel);
/// ```
pub const PARALLEL_PARTITION_THRESHOLD: usize = 256;

/// Pre-allocated face slots per input point in the face arena.
///
/// A hull over `n` points has at most `2n - 4` live faces; removed faces stay
/// in the arena, so a little more than that is reserved up front.
pub const FACE_ARENA_CAPACITY_FACTOR: usize = 3;

// =============================================================================
// RUNTIME CONFIGURATION
// =============================================================================

/// Order in which the expander picks the next face with outstanding
/// outside points.
///
/// The final hull does not depend on the order (up to the triangulation of
/// exactly coplanar facets); only the intermediate meshes differ.
///
/// # Example
///
/// ```rust
/// use config::constants::FaceOrder;
///
/// assert_eq!(FaceOrder::default(), FaceOrder::Fifo);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FaceOrder {
    /// Oldest active face first.
    #[default]
    Fifo,
    /// Most recently activated face first.
    Lifo,
    /// Face whose farthest outside point is globally the farthest.
    FarthestPoint,
}

/// Immutable snapshot of the settings for one hull computation.
///
/// # Examples
/// ```
/// use config::constants::{FaceOrder, HullConfig};
///
/// let config = HullConfig::new(1e-8).expect("valid config").with_face_order(FaceOrder::Lifo);
/// assert_eq!(config.face_order, FaceOrder::Lifo);
/// assert!(config.absolute_tolerance.is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HullConfig {
    /// Tolerance as a fraction of the input scale.
    pub relative_tolerance: f64,
    /// Fixed tolerance overriding the relative one when set.
    pub absolute_tolerance: Option<f64>,
    /// Active face selection order.
    pub face_order: FaceOrder,
}

impl HullConfig {
    /// Builds a configuration with the given relative tolerance, rejecting
    /// values that are not finite or fall outside `(0, MAX_RELATIVE_TOLERANCE]`.
    ///
    /// # Examples
    /// ```
    /// use config::constants::HullConfig;
    /// assert!(HullConfig::new(1e-9).is_ok());
    /// assert!(HullConfig::new(0.0).is_err());
    /// assert!(HullConfig::new(0.5).is_err());
    /// ```
    pub fn new(relative_tolerance: f64) -> Result<Self, ConfigError> {
        if !relative_tolerance.is_finite()
            || relative_tolerance <= 0.0
            || relative_tolerance > MAX_RELATIVE_TOLERANCE
        {
            return Err(ConfigError::InvalidRelativeTolerance(relative_tolerance));
        }
        Ok(Self {
            relative_tolerance,
            absolute_tolerance: None,
            face_order: FaceOrder::default(),
        })
    }

    /// Pins the tolerance to an absolute distance.
    ///
    /// # Examples
    /// ```
    /// use config::constants::HullConfig;
    /// assert!(HullConfig::default().with_absolute_tolerance(-1.0).is_err());
    /// ```
    pub fn with_absolute_tolerance(mut self, tolerance: f64) -> Result<Self, ConfigError> {
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(ConfigError::InvalidTolerance(tolerance));
        }
        self.absolute_tolerance = Some(tolerance);
        Ok(self)
    }

    /// Replaces the active face selection order.
    pub fn with_face_order(mut self, face_order: FaceOrder) -> Self {
        self.face_order = face_order;
        self
    }
}

impl Default for HullConfig {
    fn default() -> Self {
        Self {
            relative_tolerance: DEFAULT_RELATIVE_TOLERANCE,
            absolute_tolerance: None,
            face_order: FaceOrder::default(),
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Raised when an absolute tolerance is zero, negative or not finite.
    InvalidTolerance(f64),
    /// Raised when a relative tolerance is outside `(0, MAX_RELATIVE_TOLERANCE]`.
    InvalidRelativeTolerance(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTolerance(value) => {
                write!(f, "tolerance must be positive and finite: {value}")
            }
            ConfigError::InvalidRelativeTolerance(value) => {
                write!(
                    f,
                    "relative tolerance must be in (0, {MAX_RELATIVE_TOLERANCE}]: {value}"
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Checks if two f64 values are approximately equal within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_equal;
///
/// assert!(approx_equal(1.0, 1.0 + 1e-11));
/// assert!(!approx_equal(1.0, 1.1));
/// ```
#[inline]
pub fn approx_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Checks if a f64 value is approximately zero within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_zero;
///
/// assert!(approx_zero(1e-11));
/// assert!(!approx_zero(0.1));
/// ```
#[inline]
pub fn approx_zero(value: f64) -> bool {
    value.abs() < EPSILON
}
