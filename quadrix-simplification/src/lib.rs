//! Mesh simplification and decimation algorithms
//! 
//! This crate implements fast quadric mesh simplification: edges are
//! collapsed in order of the quadric error they introduce, under an error
//! threshold that grows every iteration, until a target triangle count is
//! reached.
//!
//! - [`SymmetricMatrix`]: packed quadric error metric
//! - [`MeshStore`]: mutable indexed mesh with per-vertex incidence ranges
//! - [`MeshStore::simplify_mesh`]: the decimation driver
//! - [`QuadricErrorSimplifier`]: ratio-based front-end implementing [`MeshSimplifier`]
//!
//! ```
//! use quadrix_core::{Point3d, TriangleMesh};
//! use quadrix_simplification::{MeshStore, SimplifyOptions};
//!
//! let mesh = TriangleMesh::from_vertices_and_faces(
//!     vec![
//!         Point3d::new(0.0, 0.0, 0.0),
//!         Point3d::new(1.0, 0.0, 0.0),
//!         Point3d::new(0.0, 1.0, 0.0),
//!     ],
//!     vec![[0, 1, 2]],
//! );
//! let mut store = MeshStore::from_mesh(&mesh)?;
//! let report = store.simplify_mesh(&SimplifyOptions::new(1));
//! assert_eq!(report.final_triangles, 1);
//! # Ok::<(), quadrix_core::Error>(())
//! ```

pub mod symmetric_matrix;
pub mod reference;
pub mod store;
pub mod evaluator;
pub mod simplify;
pub mod options;
pub mod report;
pub mod quadric_error;

pub use symmetric_matrix::*;
pub use reference::*;
pub use store::{MeshStore, Triangle, Vertex};
pub use evaluator::calculate_error;
pub use simplify::{MAX_ITERATIONS, REFRESH_INTERVAL};
pub use options::*;
pub use report::*;
pub use quadric_error::*;

use quadrix_core::{TriangleMesh, Result};

/// Simplify a mesh by reducing the number of faces/vertices
pub trait MeshSimplifier {
    /// Simplify mesh with target reduction ratio (0.0 = no reduction, 1.0 = maximum reduction)
    fn simplify(&self, mesh: &TriangleMesh, reduction_ratio: f32) -> Result<TriangleMesh>;
}
