//! Mutable indexed mesh used during simplification
//!
//! Vertices and triangles live in dense arrays addressed by index. Removed
//! triangles are tombstoned with `deleted` and only dropped by the explicit
//! compaction passes. Vertex-to-triangle incidence is a single flat array of
//! packed [`Ref`]s grouped by vertex: vertex `v` owns
//! `refs[v.first_ref..v.first_ref + v.num_triangles]`. The grouping is exact
//! right after [`MeshStore::update_references`] and may contain abandoned
//! ranges between rebuilds.

use crate::reference::Ref;
use crate::symmetric_matrix::SymmetricMatrix;
use quadrix_core::{Error, Face, Point3d, Result, TriangleMesh, Vector3d};

/// Below this squared length a face normal is treated as degenerate.
pub(crate) const MIN_NORMAL_LENGTH_SQUARED: f64 = 1e-300;

#[derive(Debug, Clone)]
pub struct Vertex {
    pub position: Point3d,
    pub quadric: SymmetricMatrix,
    pub first_ref: usize,
    pub num_triangles: usize,
    pub border: bool,
}

impl Vertex {
    pub(crate) fn new(position: Point3d) -> Self {
        Self {
            position,
            quadric: SymmetricMatrix::ZERO,
            first_ref: 0,
            num_triangles: 0,
            border: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Triangle {
    pub vertex_ids: [usize; 3],
    /// Collapse errors of edges 0-1, 1-2, 2-0 and their minimum
    pub errors: [f64; 4],
    pub deleted: bool,
    pub dirty: bool,
    pub normal: Vector3d,
    pub uvs: Option<[Vector3d; 3]>,
    pub material_id: Option<u32>,
    pub attr_flags: u32,
}

impl Triangle {
    fn from_face(face: &Face) -> Self {
        Self {
            vertex_ids: face.indices,
            errors: [0.0; 4],
            deleted: false,
            dirty: false,
            normal: Vector3d::zeros(),
            uvs: face.uvs,
            material_id: face.material_id,
            attr_flags: face.attr_flags,
        }
    }

    fn to_face(&self) -> Face {
        Face {
            indices: self.vertex_ids,
            uvs: self.uvs,
            material_id: self.material_id,
            attr_flags: self.attr_flags,
        }
    }
}

/// Working representation of a mesh being simplified.
#[derive(Debug, Clone, Default)]
pub struct MeshStore {
    pub(crate) vertices: Vec<Vertex>,
    pub(crate) triangles: Vec<Triangle>,
    pub(crate) refs: Vec<Ref>,
}

impl MeshStore {
    /// Build a store from plain mesh arrays.
    ///
    /// Fails if a face references a vertex that does not exist, or if the
    /// mesh has more faces than a packed reference can address.
    pub fn from_mesh(mesh: &TriangleMesh) -> Result<Self> {
        if mesh.faces.len() >= Ref::MAX_TRIANGLES {
            return Err(Error::Unsupported(format!(
                "{} faces exceed the limit of {}",
                mesh.faces.len(),
                Ref::MAX_TRIANGLES
            )));
        }

        let vertex_count = mesh.vertices.len();
        for (fi, face) in mesh.faces.iter().enumerate() {
            if let Some(&bad) = face.indices.iter().find(|&&v| v >= vertex_count) {
                return Err(Error::InvalidData(format!(
                    "face {fi} references vertex {bad}, but the mesh has {vertex_count} vertices"
                )));
            }
        }

        Ok(Self {
            vertices: mesh.vertices.iter().copied().map(Vertex::new).collect(),
            triangles: mesh.faces.iter().map(Triangle::from_face).collect(),
            refs: Vec::with_capacity(mesh.faces.len() * 3),
        })
    }

    /// Copy the current vertex and triangle arrays out, skipping tombstones.
    pub fn to_mesh(&self) -> TriangleMesh {
        TriangleMesh {
            vertices: self.vertices.iter().map(|v| v.position).collect(),
            faces: self
                .triangles
                .iter()
                .filter(|t| !t.deleted)
                .map(Triangle::to_face)
                .collect(),
        }
    }

    pub fn into_mesh(self) -> TriangleMesh {
        self.to_mesh()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Incident triangle corners of vertex `v`.
    pub(crate) fn vertex_refs(&self, v: usize) -> &[Ref] {
        let vertex = &self.vertices[v];
        &self.refs[vertex.first_ref..vertex.first_ref + vertex.num_triangles]
    }

    /// Recompute plane quadrics, face normals and every cached edge error.
    pub(crate) fn calculate_errors(&mut self) {
        for v in &mut self.vertices {
            v.quadric.clear();
        }

        for t in &mut self.triangles {
            let [i0, i1, i2] = t.vertex_ids;
            let p0 = self.vertices[i0].position;
            let p1 = self.vertices[i1].position;
            let p2 = self.vertices[i2].position;

            let mut n = (p1 - p0).cross(&(p2 - p0));
            let len_sq = n.norm_squared();
            if len_sq > MIN_NORMAL_LENGTH_SQUARED {
                n /= len_sq.sqrt();
                let plane = SymmetricMatrix::from_plane(n.x, n.y, n.z, -n.dot(&p0.coords));
                self.vertices[i0].quadric += plane;
                self.vertices[i1].quadric += plane;
                self.vertices[i2].quadric += plane;
            }
            t.normal = n;
        }

        for ti in 0..self.triangles.len() {
            self.calculate_triangle_error(ti);
        }
    }

    /// Rebuild the vertex-grouped reference array from the live triangle list.
    pub(crate) fn update_references(&mut self) {
        for v in &mut self.vertices {
            v.first_ref = 0;
            v.num_triangles = 0;
        }

        for t in &self.triangles {
            for &id in &t.vertex_ids {
                self.vertices[id].num_triangles += 1;
            }
        }

        let mut start = 0;
        for v in &mut self.vertices {
            v.first_ref = start;
            start += v.num_triangles;
            v.num_triangles = 0;
        }

        self.refs.clear();
        self.refs.resize(self.triangles.len() * 3, Ref::default());

        for (ti, t) in self.triangles.iter().enumerate() {
            for (corner, &id) in t.vertex_ids.iter().enumerate() {
                let v = &mut self.vertices[id];
                self.refs[v.first_ref + v.num_triangles] = Ref::new(ti, corner);
                v.num_triangles += 1;
            }
        }
    }

    /// Flag every vertex that lies on an edge used by exactly one triangle.
    ///
    /// Requires freshly built references.
    pub(crate) fn identify_border(&mut self) {
        for v in &mut self.vertices {
            v.border = false;
        }

        // (neighbor id, number of incident triangles containing it)
        let mut counts: Vec<(usize, u32)> = Vec::new();
        for vi in 0..self.vertices.len() {
            counts.clear();
            for r in self.vertex_refs(vi) {
                for &id in &self.triangles[r.triangle()].vertex_ids {
                    match counts.iter_mut().find(|(other, _)| *other == id) {
                        Some((_, count)) => *count += 1,
                        None => counts.push((id, 1)),
                    }
                }
            }
            for &(id, count) in &counts {
                if count == 1 {
                    self.vertices[id].border = true;
                }
            }
        }
    }

    /// Physically remove deleted triangles, keeping the survivors' order.
    pub(crate) fn compact_triangles(&mut self) {
        self.triangles.retain(|t| !t.deleted);
    }

    /// Drop deleted triangles and unreferenced vertices, renumbering densely.
    ///
    /// Surviving vertices keep their position, quadric and border flag; the
    /// reference array is cleared and every range left empty.
    pub(crate) fn compact_mesh(&mut self) {
        for v in &mut self.vertices {
            v.num_triangles = 0;
        }
        self.compact_triangles();
        for t in &self.triangles {
            for &id in &t.vertex_ids {
                self.vertices[id].num_triangles = 1;
            }
        }

        // first_ref temporarily holds the new index of each surviving vertex
        let mut dst = 0;
        for i in 0..self.vertices.len() {
            if self.vertices[i].num_triangles == 0 {
                continue;
            }
            self.vertices[i].first_ref = dst;
            if i != dst {
                let Vertex { position, quadric, border, .. } = self.vertices[i];
                let w = &mut self.vertices[dst];
                w.position = position;
                w.quadric = quadric;
                w.border = border;
            }
            dst += 1;
        }

        for t in &mut self.triangles {
            for id in &mut t.vertex_ids {
                *id = self.vertices[*id].first_ref;
            }
        }
        self.vertices.truncate(dst);

        // No references survive compaction, so every range is empty
        for v in &mut self.vertices {
            v.first_ref = 0;
            v.num_triangles = 0;
        }
        self.refs.clear();
    }
}
