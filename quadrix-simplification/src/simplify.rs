//! Iterative edge collapse driver
//!
//! Each outer iteration accepts every collapse whose cached error is below a
//! threshold that grows with the iteration count. Triangles touched by a
//! collapse are marked dirty and sit out the rest of the pass. Every few
//! iterations the deleted triangles are compacted away and the reference
//! array is rebuilt; quadrics, normals and border flags are only computed
//! on the first refresh.

use crate::evaluator::calculate_error;
use crate::options::SimplifyOptions;
use crate::report::SimplificationReport;
use crate::store::{MeshStore, Vertex};
use tracing::{debug, info};

/// Hard cap on outer iterations for inputs that never converge.
pub const MAX_ITERATIONS: usize = 100;
/// Outer iterations between two reference rebuilds.
pub const REFRESH_INTERVAL: usize = 5;

fn reset_flags(flags: &mut Vec<bool>, len: usize) {
    flags.clear();
    flags.resize(len, false);
}

impl MeshStore {
    /// Collapse edges until `options.target_triangles` is reached or no
    /// acceptable collapse remains, then compact the mesh.
    ///
    /// The mesh ends up with only referenced vertices, densely renumbered.
    pub fn simplify_mesh(&mut self, options: &SimplifyOptions) -> SimplificationReport {
        let original_triangles = self.triangles.len();
        let original_vertices = self.vertices.len();
        let delete_target = original_triangles.saturating_sub(options.target_triangles);

        info!(
            original = original_triangles,
            target = options.target_triangles,
            aggressiveness = options.aggressiveness,
            "Starting mesh simplification"
        );

        for t in &mut self.triangles {
            t.deleted = false;
        }

        let mut deleted_triangles = 0;
        let mut collapses = 0;
        let mut iterations = 0;
        // Per-endpoint "vanishes with this collapse" flags, reused for every edge
        let mut deleted0 = Vec::new();
        let mut deleted1 = Vec::new();

        for iteration in 0..MAX_ITERATIONS {
            if deleted_triangles >= delete_target {
                break;
            }
            iterations += 1;

            if iteration % REFRESH_INTERVAL == 0 {
                self.update_mesh(iteration);
            }

            for t in &mut self.triangles {
                t.dirty = false;
            }

            let threshold = options.threshold(iteration);
            for ti in 0..self.triangles.len() {
                let t = &self.triangles[ti];
                if t.errors[3] > threshold || t.deleted || t.dirty {
                    continue;
                }
                let vertex_ids = t.vertex_ids;
                let errors = t.errors;

                for j in 0..3 {
                    let i0 = vertex_ids[j];
                    let i1 = vertex_ids[(j + 1) % 3];
                    if errors[j] <= threshold
                        && self.try_collapse(
                            ti,
                            i0,
                            i1,
                            options.preserve_border,
                            &mut deleted0,
                            &mut deleted1,
                            &mut deleted_triangles,
                        )
                    {
                        collapses += 1;
                        break;
                    }
                }

                if deleted_triangles >= delete_target {
                    break;
                }
            }
        }

        self.compact_mesh();

        let report = SimplificationReport {
            original_triangles,
            final_triangles: self.triangles.len(),
            original_vertices,
            final_vertices: self.vertices.len(),
            collapses,
            iterations,
        };
        info!(
            final_triangles = report.final_triangles,
            final_vertices = report.final_vertices,
            collapses,
            iterations,
            "Mesh simplification complete"
        );
        report
    }

    fn update_mesh(&mut self, iteration: usize) {
        if iteration == 0 {
            self.calculate_errors();
            self.update_references();
            self.identify_border();
        } else {
            self.compact_triangles();
            self.update_references();
        }
        debug!(
            iteration,
            triangles = self.triangles.len(),
            references = self.refs.len(),
            "Refreshed mesh references"
        );
    }

    /// Collapse edge `(i0, i1)` of triangle `ti` into `i0` if it is allowed.
    #[allow(clippy::too_many_arguments)]
    fn try_collapse(
        &mut self,
        ti: usize,
        i0: usize,
        i1: usize,
        preserve_border: bool,
        deleted0: &mut Vec<bool>,
        deleted1: &mut Vec<bool>,
        deleted_triangles: &mut usize,
    ) -> bool {
        let v0 = &self.vertices[i0];
        let v1 = &self.vertices[i1];
        if v0.border != v1.border {
            return false;
        }
        if preserve_border && (v0.border || v1.border) {
            return false;
        }

        let (p, _) = calculate_error(v0, v1);
        reset_flags(deleted0, v0.num_triangles);
        reset_flags(deleted1, v1.num_triangles);

        if self.flipped(&p, i1, i0, deleted0) || self.flipped(&p, i0, i1, deleted1) {
            return false;
        }

        if self.triangles[ti].uvs.is_some() {
            self.update_uvs(i0, &p, deleted0);
            self.update_uvs(i1, &p, deleted1);
        }

        let q1 = self.vertices[i1].quadric;
        let v0 = &mut self.vertices[i0];
        v0.position = p;
        v0.quadric += q1;

        let start = self.refs.len();
        self.update_triangles(i0, i0, deleted0, deleted_triangles);
        self.update_triangles(i0, i1, deleted1, deleted_triangles);
        let count = self.refs.len() - start;

        let v0 = &mut self.vertices[i0];
        if count <= v0.num_triangles {
            self.refs.copy_within(start.., v0.first_ref);
            self.refs.truncate(start);
        } else {
            v0.first_ref = start;
        }
        v0.num_triangles = count;
        true
    }

    /// Re-point the surviving triangles of vertex `v` at `i0`, tombstoning
    /// the ones flagged in `deleted` and appending the new references.
    fn update_triangles(&mut self, i0: usize, v: usize, deleted: &[bool], deleted_triangles: &mut usize) {
        let Vertex { first_ref, num_triangles, .. } = self.vertices[v];
        for k in 0..num_triangles {
            let r = self.refs[first_ref + k];
            let ti = r.triangle();
            let t = &mut self.triangles[ti];
            if t.deleted {
                continue;
            }
            if deleted[k] {
                t.deleted = true;
                *deleted_triangles += 1;
                continue;
            }
            t.vertex_ids[r.corner()] = i0;
            t.dirty = true;
            self.calculate_triangle_error(ti);
            self.refs.push(r);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quadrix_core::{Point3d, TriangleMesh};

    fn make_grid(size: usize) -> TriangleMesh {
        let mut vertices = Vec::new();
        for y in 0..size {
            for x in 0..size {
                vertices.push(Point3d::new(x as f64, y as f64, 0.0));
            }
        }
        let mut faces = Vec::new();
        for y in 0..(size - 1) {
            for x in 0..(size - 1) {
                let tl = y * size + x;
                let tr = tl + 1;
                let bl = (y + 1) * size + x;
                let br = bl + 1;
                faces.push([tl, tr, bl]);
                faces.push([tr, br, bl]);
            }
        }
        TriangleMesh::from_vertices_and_faces(vertices, faces)
    }

    #[test]
    fn test_no_work_when_target_reached() {
        let mut store = MeshStore::from_mesh(&make_grid(4)).unwrap();
        let report = store.simplify_mesh(&SimplifyOptions::new(18));
        assert_eq!(report.iterations, 0);
        assert_eq!(report.collapses, 0);
        assert_eq!(report.final_triangles, 18);
        assert_eq!(report.final_vertices, 16);
    }

    #[test]
    fn test_flat_grid_collapses() {
        let mut store = MeshStore::from_mesh(&make_grid(8)).unwrap();
        let report = store.simplify_mesh(&SimplifyOptions::new(40));
        assert!(report.was_simplified());
        assert!(report.final_triangles < 98);
        assert!(report.final_vertices < 64);
        assert_eq!(report.final_triangles, store.triangles().len());
    }

    #[test]
    fn test_references_stay_consistent_after_collapse() {
        let mut store = MeshStore::from_mesh(&make_grid(6)).unwrap();
        store.calculate_errors();
        store.update_references();
        store.identify_border();

        // Find the first acceptable collapse of an interior edge and apply it
        let mut deleted0 = Vec::new();
        let mut deleted1 = Vec::new();
        let mut deleted_triangles = 0;
        let mut collapsed = None;
        'outer: for ti in 0..store.triangles.len() {
            let ids = store.triangles[ti].vertex_ids;
            for j in 0..3 {
                let (i0, i1) = (ids[j], ids[(j + 1) % 3]);
                if store.vertices[i0].border || store.vertices[i1].border {
                    continue;
                }
                if store.try_collapse(ti, i0, i1, false, &mut deleted0, &mut deleted1, &mut deleted_triangles) {
                    collapsed = Some((i0, i1));
                    break 'outer;
                }
            }
        }

        let (i0, i1) = collapsed.expect("an interior collapse should be possible");
        assert_eq!(deleted_triangles, 2);
        for (ti, t) in store.triangles.iter().enumerate() {
            if t.deleted {
                continue;
            }
            assert!(!t.vertex_ids.contains(&i1));
            let [a, b, c] = t.vertex_ids;
            assert!(a != b && b != c && c != a);
            if t.vertex_ids.contains(&i0) {
                let corner = t.vertex_ids.iter().position(|&v| v == i0).unwrap();
                assert!(store.vertex_refs(i0).contains(&crate::Ref::new(ti, corner)));
                assert!(t.dirty);
            }
        }
    }

    #[test]
    fn test_collapse_that_folds_a_neighbor_is_rejected() {
        // Fan around vertex 0; pulling 0 halfway to 1 pushes it past the
        // line through 2 and 3, inverting triangle [0, 2, 3].
        let mesh = TriangleMesh::from_vertices_and_faces(
            vec![
                Point3d::new(0.0, 0.0, 0.0),
                Point3d::new(2.0, 0.0, 0.0),
                Point3d::new(0.5, 0.1, 0.0),
                Point3d::new(-1.0, 1.0, 0.0),
                Point3d::new(0.0, -1.0, 0.0),
            ],
            vec![[0, 1, 2], [0, 2, 3], [0, 3, 4], [0, 4, 1]],
        );
        let mut store = MeshStore::from_mesh(&mesh).unwrap();
        store.calculate_errors();
        store.update_references();

        let (target, _) = calculate_error(&store.vertices[0], &store.vertices[1]);
        assert_eq!(target, Point3d::new(1.0, 0.0, 0.0));

        let mut deleted_triangles = 0;
        let collapsed = store.try_collapse(
            0,
            0,
            1,
            false,
            &mut Vec::new(),
            &mut Vec::new(),
            &mut deleted_triangles,
        );
        assert!(!collapsed);
        assert_eq!(deleted_triangles, 0);
        assert_eq!(store.triangles[1].vertex_ids, [0, 2, 3]);
        assert!(!store.triangles[1].deleted);
        assert_eq!(store.vertices[0].position, Point3d::origin());
    }

    #[test]
    fn test_rim_to_interior_edge_is_never_collapsed() {
        let mut store = MeshStore::from_mesh(&make_grid(4)).unwrap();
        store.calculate_errors();
        store.update_references();
        store.identify_border();

        // Triangle 1 is [1, 5, 4]; vertex 1 lies on the rim, 5 is interior
        assert_eq!(store.triangles[1].vertex_ids, [1, 5, 4]);
        assert!(store.vertices[1].border);
        assert!(!store.vertices[5].border);
        let positions: Vec<Point3d> = store.vertices.iter().map(|v| v.position).collect();

        let mut deleted_triangles = 0;
        for (i0, i1) in [(1, 5), (5, 1)] {
            let collapsed = store.try_collapse(
                1,
                i0,
                i1,
                false,
                &mut Vec::new(),
                &mut Vec::new(),
                &mut deleted_triangles,
            );
            assert!(!collapsed);
        }
        assert_eq!(deleted_triangles, 0);
        assert!(store.triangles.iter().all(|t| !t.deleted));
        for (v, p) in store.vertices.iter().zip(&positions) {
            assert_eq!(v.position, *p);
        }
    }

    #[test]
    fn test_collapse_reuses_reference_range_in_place() {
        let mut store = MeshStore::from_mesh(&make_grid(4)).unwrap();
        store.calculate_errors();
        store.update_references();
        store.identify_border();

        // Rim vertex 2 has three triangles, corner vertex 3 has two and they
        // share triangle 4, so the merged range fits into 2's old one.
        assert_eq!(store.triangles[4].vertex_ids, [2, 3, 6]);
        assert_eq!(store.vertices[2].num_triangles, 3);
        assert_eq!(store.vertices[3].num_triangles, 2);
        let first_ref = store.vertices[2].first_ref;
        let refs_len = store.refs.len();

        let mut deleted_triangles = 0;
        let collapsed = store.try_collapse(
            4,
            2,
            3,
            false,
            &mut Vec::new(),
            &mut Vec::new(),
            &mut deleted_triangles,
        );
        assert!(collapsed);
        assert_eq!(deleted_triangles, 1);
        assert!(store.triangles[4].deleted);
        assert_eq!(store.vertices[2].position, Point3d::new(2.5, 0.0, 0.0));

        assert_eq!(store.refs.len(), refs_len);
        assert_eq!(store.vertices[2].first_ref, first_ref);
        assert_eq!(store.vertices[2].num_triangles, 3);

        let mut live = 0;
        for (ti, t) in store.triangles.iter().enumerate() {
            if t.deleted {
                continue;
            }
            assert!(!t.vertex_ids.contains(&3));
            if let Some(corner) = t.vertex_ids.iter().position(|&v| v == 2) {
                assert!(store.vertex_refs(2).contains(&crate::Ref::new(ti, corner)));
                live += 1;
            }
        }
        assert_eq!(live, 3);
        assert_eq!(store.triangles[5].vertex_ids, [2, 7, 6]);
    }
}
