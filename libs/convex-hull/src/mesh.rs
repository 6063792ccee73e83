//! # Hull Mesh
//!
//! Compacted triangle mesh built from a finished hull, ready for rendering
//! or export. Only hull vertices are kept; each remembers which input
//! point it came from.

use crate::hull::ConvexHull;
use config::constants::EPSILON;
use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A triangle mesh with vertices, indices and source point indices.
///
/// All geometry stays in f64; the `*_f32` exports are for GPU upload.
///
/// # Example
///
/// ```rust
/// use convex_hull::HullMesh;
/// use glam::DVec3;
///
/// let mut mesh = HullMesh::new();
/// mesh.add_vertex(DVec3::new(0.0, 0.0, 0.0), 10);
/// mesh.add_vertex(DVec3::new(1.0, 0.0, 0.0), 11);
/// mesh.add_vertex(DVec3::new(0.0, 1.0, 0.0), 12);
/// mesh.add_triangle(0, 1, 2);
/// assert_eq!(mesh.source_index(2), 12);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HullMesh {
    /// Vertex positions
    vertices: Vec<DVec3>,
    /// Triangle indices into `vertices`
    triangles: Vec<[u32; 3]>,
    /// Input point index of each vertex
    source_indices: Vec<usize>,
    /// Optional vertex normals
    normals: Option<Vec<DVec3>>,
}

impl HullMesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mesh with pre-allocated capacity.
    pub fn with_capacity(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            triangles: Vec::with_capacity(triangle_count),
            source_indices: Vec::with_capacity(vertex_count),
            normals: None,
        }
    }

    /// Builds the compacted mesh of `hull` with per-vertex normals.
    pub fn from_hull(hull: &ConvexHull) -> Self {
        let vertices = hull.vertex_indices();
        let mut mesh = Self::with_capacity(vertices.len(), hull.face_count());
        let mut remap = vec![u32::MAX; hull.points().len()];
        for source in vertices {
            remap[source] = mesh.add_vertex(hull.points()[source], source);
        }
        for face in hull.faces() {
            let [a, b, c] = face.indices.map(|i| remap[i]);
            mesh.add_triangle(a, b, c);
        }
        mesh.compute_normals();
        mesh
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Returns true if the mesh is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Adds a vertex taken from input point `source` and returns its index.
    ///
    /// # Panics
    ///
    /// Panics once the mesh would hold more than `u32::MAX` vertices.
    pub fn add_vertex(&mut self, position: DVec3, source: usize) -> u32 {
        let index = vertex_index(self.vertices.len());
        self.vertices.push(position);
        self.source_indices.push(source);
        index
    }

    /// Adds a triangle by vertex indices.
    pub fn add_triangle(&mut self, v0: u32, v1: u32, v2: u32) {
        self.triangles.push([v0, v1, v2]);
    }

    /// Returns a reference to the vertices.
    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Returns a reference to the triangles.
    #[inline]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Input point index of every vertex.
    #[inline]
    pub fn source_indices(&self) -> &[usize] {
        &self.source_indices
    }

    /// Input point index of vertex `index`.
    #[inline]
    pub fn source_index(&self, index: u32) -> usize {
        self.source_indices[index as usize]
    }

    /// Returns the vertex normals.
    pub fn normals(&self) -> Option<&[DVec3]> {
        self.normals.as_deref()
    }

    /// Computes area-weighted vertex normals.
    pub fn compute_normals(&mut self) {
        let mut normals = vec![DVec3::ZERO; self.vertices.len()];

        for tri in &self.triangles {
            let v0 = self.vertices[tri[0] as usize];
            let v1 = self.vertices[tri[1] as usize];
            let v2 = self.vertices[tri[2] as usize];
            let normal = (v1 - v0).cross(v2 - v0);
            for &i in tri {
                normals[i as usize] += normal;
            }
        }

        for normal in &mut normals {
            *normal = normal.normalize_or_zero();
        }

        self.normals = Some(normals);
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns (min, max) corners; both zero for an empty mesh.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        let Some(&first) = self.vertices.first() else {
            return (DVec3::ZERO, DVec3::ZERO);
        };
        self.vertices[1..]
            .iter()
            .fold((first, first), |(min, max), v| (min.min(*v), max.max(*v)))
    }

    /// Validates the mesh for correctness.
    ///
    /// Checks:
    /// - All triangle indices are valid
    /// - No triangle repeats a vertex or has zero area
    /// - Every undirected edge is shared by exactly two triangles
    ///
    /// Returns true if valid.
    pub fn validate(&self) -> bool {
        let vertex_count = self.vertices.len() as u32;
        let mut edges: HashMap<(u32, u32), usize> = HashMap::new();

        for tri in &self.triangles {
            if tri.iter().any(|&i| i >= vertex_count) {
                return false;
            }
            if tri[0] == tri[1] || tri[1] == tri[2] || tri[0] == tri[2] {
                return false;
            }

            let v0 = self.vertices[tri[0] as usize];
            let v1 = self.vertices[tri[1] as usize];
            let v2 = self.vertices[tri[2] as usize];
            if (v1 - v0).cross(v2 - v0).length() < EPSILON {
                return false;
            }

            for k in 0..3 {
                let (a, b) = (tri[k], tri[(k + 1) % 3]);
                *edges.entry((a.min(b), a.max(b))).or_insert(0) += 1;
            }
        }

        edges.values().all(|&count| count == 2)
    }

    /// Exports vertices as f32 array for GPU.
    ///
    /// Returns flattened [x, y, z, x, y, z, ...] array.
    pub fn vertices_f32(&self) -> Vec<f32> {
        self.vertices
            .iter()
            .flat_map(|v| [v.x as f32, v.y as f32, v.z as f32])
            .collect()
    }

    /// Exports triangle indices as u32 array for GPU.
    pub fn indices_u32(&self) -> Vec<u32> {
        self.triangles.iter().flatten().copied().collect()
    }

    /// Exports normals as f32 array for GPU.
    pub fn normals_f32(&self) -> Option<Vec<f32>> {
        self.normals.as_ref().map(|normals| {
            normals
                .iter()
                .flat_map(|n| [n.x as f32, n.y as f32, n.z as f32])
                .collect()
        })
    }
}

/// Triangle index of the vertex stored at `position`.
fn vertex_index(position: usize) -> u32 {
    let Ok(index) = u32::try_from(position) else {
        panic!("mesh vertex {position} does not fit a u32 triangle index");
    };
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hull::convex_hull;

    fn triangle() -> HullMesh {
        let mut mesh = HullMesh::new();
        mesh.add_vertex(DVec3::new(0.0, 0.0, 0.0), 0);
        mesh.add_vertex(DVec3::new(1.0, 0.0, 0.0), 1);
        mesh.add_vertex(DVec3::new(0.0, 1.0, 0.0), 2);
        mesh.add_triangle(0, 1, 2);
        mesh
    }

    #[test]
    fn test_mesh_new() {
        let mesh = HullMesh::new();
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.triangle_count(), 0);
        assert_eq!(mesh.bounding_box(), (DVec3::ZERO, DVec3::ZERO));
    }

    #[test]
    fn test_mesh_open_triangle_is_invalid() {
        // A lone triangle has three boundary edges
        assert!(!triangle().validate());
    }

    #[test]
    fn test_mesh_invalid_index() {
        let mut mesh = triangle();
        mesh.add_triangle(0, 1, 5);
        assert!(!mesh.validate());
    }

    #[test]
    fn test_mesh_exports() {
        let mut mesh = triangle();
        assert_eq!(mesh.vertices_f32(), vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
        assert_eq!(mesh.indices_u32(), vec![0, 1, 2]);
        assert!(mesh.normals_f32().is_none());

        mesh.compute_normals();
        let normals = mesh.normals_f32().unwrap();
        assert_eq!(normals.len(), 9);
        assert_eq!(&normals[0..3], &[0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_from_hull_compacts_vertices() {
        let points = vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(0.2, 0.2, 0.2),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
            DVec3::new(0.0, 0.0, 1.0),
        ];
        let hull = convex_hull(&points).unwrap();
        let mesh = hull.to_mesh();

        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 4);
        assert_eq!(mesh.source_indices(), &[0, 2, 3, 4]);
        assert!(mesh.validate());

        let (min, max) = mesh.bounding_box();
        assert_eq!(min, DVec3::ZERO);
        assert_eq!(max, DVec3::ONE);

        // Vertex normals point away from the interior
        let inside = hull.interior_point();
        for (v, n) in mesh.vertices().iter().zip(mesh.normals().unwrap()) {
            assert!(n.dot(*v - inside) > 0.0);
        }
    }

    #[test]
    fn test_vertex_index_range() {
        assert_eq!(vertex_index(0), 0);
        assert_eq!(vertex_index(u32::MAX as usize), u32::MAX);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    #[should_panic(expected = "does not fit a u32")]
    fn test_vertex_index_overflow() {
        vertex_index(u32::MAX as usize + 1);
    }

    #[test]
    fn test_mesh_serde_shape() {
        fn assert_serde<T: Serialize + for<'de> Deserialize<'de>>() {}
        assert_serde::<HullMesh>();
    }
}
