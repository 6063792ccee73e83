//! # Geometry Primitives
//!
//! Plane and triangle math used by the hull builder: oriented planes,
//! signed distances, barycentric coordinates and the two extreme-point
//! searches used while seeding.
//!
//! Nothing here hardcodes an epsilon. Functions that classify take the
//! tolerance from the caller.


use glam::DVec3;

/// An oriented plane `normal · p + offset = 0` with a unit normal.
///
/// # Example
///
/// ```rust
/// use convex_hull::geometry::Plane;
/// use glam::DVec3;
///
/// let plane = Plane::from_triangle(DVec3::ZERO, DVec3::X, DVec3::Y).unwrap();
/// assert_eq!(plane.normal, DVec3::Z);
/// assert_eq!(plane.signed_distance(DVec3::new(0.3, 0.3, 2.0)), 2.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Unit normal, pointing to the positive ("outside") half-space
    pub normal: DVec3,
    /// Plane constant
    pub offset: f64,
}

impl Plane {
    /// Builds the plane through `a`, `b`, `c` with the right-hand-rule normal
    /// `(b - a) × (c - a)`.
    ///
    /// Returns `None` when the three points do not span a plane.
    pub fn from_triangle(a: DVec3, b: DVec3, c: DVec3) -> Option<Self> {
        let normal = (b - a).cross(c - a).try_normalize()?;
        Some(Self {
            normal,
            offset: -normal.dot(a),
        })
    }

    /// Signed distance of `point` from the plane. Positive means outside.
    #[inline]
    pub fn signed_distance(&self, point: DVec3) -> f64 {
        self.normal.dot(point) + self.offset
    }

    /// Returns the same plane with the opposite orientation.
    pub fn flipped(&self) -> Self {
        Self {
            normal: -self.normal,
            offset: -self.offset,
        }
    }

    /// Orthogonal projection of `point` onto the plane.
    pub fn project(&self, point: DVec3) -> DVec3 {
        point - self.normal * self.signed_distance(point)
    }
}

/// Barycentric coordinates of a point's projection onto a triangle's plane.
///
/// `u`, `v`, `w` weight the vertices `a`, `b`, `c`. Alongside the raw
/// coordinates the in-plane distance to each opposite edge is kept, so
/// containment can be decided against a distance tolerance instead of a
/// unitless one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Barycentric {
    /// Weight of vertex `a`
    pub u: f64,
    /// Weight of vertex `b`
    pub v: f64,
    /// Weight of vertex `c`
    pub w: f64,
    /// Signed in-plane distance from edges `bc`, `ca`, `ab` (positive inside)
    edge_distances: [f64; 3],
}

impl Barycentric {
    /// Computes the coordinates of `point` projected onto triangle `abc`.
    ///
    /// Returns `None` for a degenerate (zero-area) triangle.
    pub fn of(a: DVec3, b: DVec3, c: DVec3, point: DVec3) -> Option<Self> {
        let ab = b - a;
        let ac = c - a;
        let ap = point - a;

        let d00 = ab.dot(ab);
        let d01 = ab.dot(ac);
        let d11 = ac.dot(ac);
        let d20 = ap.dot(ab);
        let d21 = ap.dot(ac);

        let denom = d00 * d11 - d01 * d01;
        if denom <= 0.0 || !denom.is_finite() {
            return None;
        }

        let v = (d11 * d20 - d01 * d21) / denom;
        let w = (d00 * d21 - d01 * d20) / denom;
        let u = 1.0 - v - w;

        // Twice the triangle area divided by an edge length is the height
        // over that edge; scaling the weight by it gives a distance.
        let double_area = denom.sqrt();
        let height = |edge: DVec3| {
            let length = edge.length();
            if length > 0.0 {
                double_area / length
            } else {
                0.0
            }
        };

        Some(Self {
            u,
            v,
            w,
            edge_distances: [u * height(c - b), v * height(a - c), w * height(ab)],
        })
    }

    /// Returns the coordinates as `[u, v, w]`.
    pub fn to_array(&self) -> [f64; 3] {
        [self.u, self.v, self.w]
    }

    /// True if the projection lies in the closed triangle with no tolerance
    /// (`u, v, w ≥ 0`, which also implies `v + w ≤ 1`).
    pub fn is_strictly_inside(&self) -> bool {
        self.u >= 0.0 && self.v >= 0.0 && self.w >= 0.0
    }

    /// True if the projection lies inside the triangle or within
    /// `tolerance` of one of its edges.
    pub fn contains(&self, tolerance: f64) -> bool {
        self.edge_distances.iter().all(|&d| d >= -tolerance)
    }

    /// How far the projection lies outside the triangle, measured from the
    /// farthest violated edge. Zero when inside.
    pub fn excess(&self) -> f64 {
        self.edge_distances
            .iter()
            .fold(0.0_f64, |acc, &d| acc.max(-d))
    }
}

/// Closest point to `point` on the infinite line through `a` and `b`.
///
/// Falls back to `a` when `a == b`.
pub fn closest_point_on_line(a: DVec3, b: DVec3, point: DVec3) -> DVec3 {
    let direction = b - a;
    let length_sq = direction.length_squared();
    if length_sq == 0.0 {
        return a;
    }
    let t = (point - a).dot(direction) / length_sq;
    a + direction * t
}

/// Finds the candidate with the largest perpendicular distance to the line
/// through `points[a]` and `points[b]`.
///
/// Candidates equal to `a` or `b` are skipped. Returns the index and its
/// distance, or `None` when no candidate remains.
pub fn farthest_from_line(
    points: &[DVec3],
    a: usize,
    b: usize,
    candidates: impl IntoIterator<Item = usize>,
) -> Option<(usize, f64)> {
    let (pa, pb) = (points[a], points[b]);
    candidates
        .into_iter()
        .filter(|&i| i != a && i != b)
        .map(|i| {
            let p = points[i];
            (i, (p - closest_point_on_line(pa, pb, p)).length())
        })
        .fold(None, |best: Option<(usize, f64)>, (i, d)| match best {
            Some((_, best_d)) if best_d >= d => best,
            _ => Some((i, d)),
        })
}

/// Finds the candidate with the largest absolute distance to `plane`.
///
/// Returns the index and its absolute distance, or `None` when there are no
/// candidates.
pub fn farthest_from_plane(
    points: &[DVec3],
    plane: &Plane,
    candidates: impl IntoIterator<Item = usize>,
) -> Option<(usize, f64)> {
    candidates
        .into_iter()
        .map(|i| (i, plane.signed_distance(points[i]).abs()))
        .fold(None, |best: Option<(usize, f64)>, (i, d)| match best {
            Some((_, best_d)) if best_d >= d => best,
            _ => Some((i, d)),
        })
}

/// Area of triangle `abc`.
pub fn triangle_area(a: DVec3, b: DVec3, c: DVec3) -> f64 {
    (b - a).cross(c - a).length() * 0.5
}

/// Signed volume of tetrahedron `abcd`; positive when `d` lies on the
/// positive side of the right-hand-rule normal of `abc`.
pub fn tetrahedron_volume(a: DVec3, b: DVec3, c: DVec3, d: DVec3) -> f64 {
    (b - a).cross(c - a).dot(d - a) / 6.0
}
