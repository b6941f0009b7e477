//! Mesh data structures and functionality

use crate::point::*;
use serde::{Deserialize, Serialize};

/// A single indexed triangle with its optional per-corner attributes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Face {
    /// Indices into the owning mesh's vertex array
    pub indices: [usize; 3],
    /// Optional per-corner attribute (texture coordinates or similar)
    pub uvs: Option<[Vector3d; 3]>,
    /// Opaque material identifier, passed through untouched
    pub material_id: Option<u32>,
    /// Opaque attribute flags, passed through untouched
    pub attr_flags: u32,
}

impl Face {
    /// Create a face without attributes
    pub fn new(indices: [usize; 3]) -> Self {
        Self {
            indices,
            uvs: None,
            material_id: None,
            attr_flags: 0,
        }
    }

    /// Attach per-corner attributes
    pub fn with_uvs(mut self, uvs: [Vector3d; 3]) -> Self {
        self.uvs = Some(uvs);
        self
    }

    /// Attach a material identifier
    pub fn with_material(mut self, material_id: u32) -> Self {
        self.material_id = Some(material_id);
        self
    }

    /// Whether two or more corners reference the same vertex
    pub fn is_degenerate(&self) -> bool {
        let [a, b, c] = self.indices;
        a == b || b == c || c == a
    }
}

impl From<[usize; 3]> for Face {
    fn from(indices: [usize; 3]) -> Self {
        Face::new(indices)
    }
}

/// A triangle mesh with vertices and faces
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriangleMesh {
    pub vertices: Vec<Point3d>,
    pub faces: Vec<Face>,
}

impl TriangleMesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Create a mesh from vertices and plain index triples
    pub fn from_vertices_and_faces(vertices: Vec<Point3d>, faces: Vec<[usize; 3]>) -> Self {
        Self {
            vertices,
            faces: faces.into_iter().map(Face::from).collect(),
        }
    }

    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of faces
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check if the mesh is empty
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }

    /// Add a vertex to the mesh
    pub fn add_vertex(&mut self, vertex: Point3d) -> usize {
        let index = self.vertices.len();
        self.vertices.push(vertex);
        index
    }

    /// Add a face to the mesh
    pub fn add_face(&mut self, face: impl Into<Face>) {
        self.faces.push(face.into());
    }

    /// Calculate unit face normals. Degenerate faces yield a zero vector.
    pub fn calculate_face_normals(&self) -> Vec<Vector3d> {
        self.faces
            .iter()
            .map(|face| {
                let v0 = self.vertices[face.indices[0]];
                let v1 = self.vertices[face.indices[1]];
                let v2 = self.vertices[face.indices[2]];

                let edge1 = v1 - v0;
                let edge2 = v2 - v0;

                safe_normalize(edge1.cross(&edge2))
            })
            .collect()
    }

    /// Clear the mesh
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.faces.clear();
    }
}
