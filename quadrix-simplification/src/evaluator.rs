//! Collapse cost, optimal placement, and flip detection

use crate::store::{MeshStore, Vertex};
use quadrix_core::{safe_normalize, Point3d, Vector3d};

/// Below this magnitude the quadric's upper 3x3 block is treated as singular.
pub(crate) const MIN_DETERMINANT: f64 = 1e-38;
/// `|d1·d2|` above this means the two remaining edges are collinear.
pub(crate) const FLIP_PARALLEL_LIMIT: f64 = 0.999;
/// New normals whose dot with the old one falls below this count as flipped (~78.5°).
pub(crate) const FLIP_NORMAL_LIMIT: f64 = 0.2;
const MIN_BARYCENTRIC_DENOMINATOR: f64 = 1e-300;

/// Optimal collapse target for the edge `(va, vb)` and the error of placing it there.
///
/// Interior edges with an invertible combined quadric use its stationary
/// point. Border edges and singular quadrics pick the best of the two
/// endpoints and their midpoint, so boundaries are never pulled inwards.
pub fn calculate_error(va: &Vertex, vb: &Vertex) -> (Point3d, f64) {
    let q = va.quadric + vb.quadric;
    let border = va.border && vb.border;
    let det = q.det_upper();

    if det.abs() > MIN_DETERMINANT && !border {
        let inv_det = 1.0 / det;
        let p = Point3d::new(
            -inv_det * q.det(1, 2, 3, 4, 5, 6, 5, 7, 8),
            inv_det * q.det(0, 2, 3, 1, 5, 6, 2, 7, 8),
            -inv_det * q.det(0, 1, 3, 1, 4, 6, 2, 5, 8),
        );
        return (p, q.vertex_error(&p));
    }

    let p1 = va.position;
    let p2 = vb.position;
    let p3 = nalgebra::center(&p1, &p2);
    let error1 = q.vertex_error(&p1);
    let error2 = q.vertex_error(&p2);
    let error3 = q.vertex_error(&p3);
    let min_error = error1.min(error2).min(error3);

    // Ties prefer the midpoint, then the second endpoint
    if error3 == min_error {
        (p3, min_error)
    } else if error2 == min_error {
        (p2, min_error)
    } else {
        (p1, min_error)
    }
}

/// Barycentric coordinates of `p` with respect to triangle `(a, b, c)`.
fn barycentric(p: &Point3d, a: &Point3d, b: &Point3d, c: &Point3d) -> Option<Vector3d> {
    let v0 = b - a;
    let v1 = c - a;
    let v2 = p - a;
    let d00 = v0.dot(&v0);
    let d01 = v0.dot(&v1);
    let d11 = v1.dot(&v1);
    let d20 = v2.dot(&v0);
    let d21 = v2.dot(&v1);
    let denominator = d00 * d11 - d01 * d01;
    if denominator.abs() <= MIN_BARYCENTRIC_DENOMINATOR {
        return None;
    }
    let v = (d11 * d20 - d01 * d21) / denominator;
    let w = (d00 * d21 - d01 * d20) / denominator;
    Some(Vector3d::new(1.0 - v - w, v, w))
}

impl MeshStore {
    /// Refresh the three edge errors of triangle `ti` and their minimum.
    pub(crate) fn calculate_triangle_error(&mut self, ti: usize) {
        let [i0, i1, i2] = self.triangles[ti].vertex_ids;
        let v0 = &self.vertices[i0];
        let v1 = &self.vertices[i1];
        let v2 = &self.vertices[i2];
        let (_, e0) = calculate_error(v0, v1);
        let (_, e1) = calculate_error(v1, v2);
        let (_, e2) = calculate_error(v2, v0);
        self.triangles[ti].errors = [e0, e1, e2, e0.min(e1).min(e2)];
    }

    /// Whether moving vertex `v` to `p` would fold over one of its triangles.
    ///
    /// Triangles that also contain `other` vanish with the collapse; their
    /// slot in `deleted` (indexed like `v`'s reference range) is set. Slots of
    /// tested triangles are cleared.
    pub(crate) fn flipped(&self, p: &Point3d, other: usize, v: usize, deleted: &mut [bool]) -> bool {
        for (k, r) in self.vertex_refs(v).iter().enumerate() {
            let t = &self.triangles[r.triangle()];
            if t.deleted {
                continue;
            }

            let s = r.corner();
            let id1 = t.vertex_ids[(s + 1) % 3];
            let id2 = t.vertex_ids[(s + 2) % 3];
            if id1 == other || id2 == other {
                deleted[k] = true;
                continue;
            }

            let d1 = safe_normalize(self.vertices[id1].position - p);
            let d2 = safe_normalize(self.vertices[id2].position - p);
            if d1.dot(&d2).abs() > FLIP_PARALLEL_LIMIT {
                return true;
            }

            let n = safe_normalize(d1.cross(&d2));
            deleted[k] = false;
            if n.dot(&t.normal) < FLIP_NORMAL_LIMIT {
                return true;
            }
        }
        false
    }

    /// Re-interpolate the attribute of `v`'s corner in every surviving
    /// incident triangle at the collapse target `p`.
    ///
    /// Must run before any corner is moved.
    pub(crate) fn update_uvs(&mut self, v: usize, p: &Point3d, deleted: &[bool]) {
        let Vertex { first_ref, num_triangles, .. } = self.vertices[v];
        for k in 0..num_triangles {
            let r = self.refs[first_ref + k];
            let t = &self.triangles[r.triangle()];
            if t.deleted || deleted[k] {
                continue;
            }
            let Some(uvs) = t.uvs else {
                continue;
            };

            let [a, b, c] = t.vertex_ids.map(|id| self.vertices[id].position);
            let Some(bary) = barycentric(p, &a, &b, &c) else {
                continue;
            };
            let value = uvs[0] * bary.x + uvs[1] * bary.y + uvs[2] * bary.z;
            if let Some(uvs) = self.triangles[r.triangle()].uvs.as_mut() {
                uvs[r.corner()] = value;
            }
        }
    }
}
