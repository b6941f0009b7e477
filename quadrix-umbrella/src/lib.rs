//! # quadrix
//!
//! Fast quadric-error-metric simplification of triangle meshes.
//!
//! This is the umbrella crate that re-exports the core mesh types and the
//! simplifier. Use the individual crates for finer control over dependencies.
//!
//! ## Quick Start
//!
//! ```rust
//! use quadrix::prelude::*;
//!
//! let mesh = TriangleMesh::from_vertices_and_faces(
//!     vec![
//!         Point3d::new(0.0, 0.0, 0.0),
//!         Point3d::new(1.0, 0.0, 0.0),
//!         Point3d::new(0.0, 1.0, 0.0),
//!         Point3d::new(0.0, 0.0, 1.0),
//!     ],
//!     vec![[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]],
//! );
//!
//! let mut store = MeshStore::from_mesh(&mesh)?;
//! let report = store.simplify_mesh(&SimplifyOptions::new(4));
//! assert_eq!(report.final_triangles, 4);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `default`: Enables simplification
//! - `simplification`: Quadric edge-collapse simplification
//! - `all`: Enables all features

// Re-export core functionality
pub use quadrix_core::*;

#[cfg(feature = "simplification")]
pub use quadrix_simplification as simplification;

/// Convenient imports for common use cases
pub mod prelude {
    pub use quadrix_core::*;

    #[cfg(feature = "simplification")]
    pub use quadrix_simplification::*;
}
