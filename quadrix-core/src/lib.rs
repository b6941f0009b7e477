//! Core data structures and traits for quadrix
//! 
//! This crate provides the plain mesh types exchanged with the simplifier,
//! the shared error type, and a few geometric helper traits.

pub mod point;
pub mod mesh;
pub mod traits;
pub mod error;

pub use point::*;
pub use mesh::*;
pub use traits::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector3};

// Type aliases for easier imports
pub type Point = Point3d;
pub type Mesh = TriangleMesh;
