//! Quadric error decimation

use crate::options::{SimplifyOptions, DEFAULT_AGGRESSIVENESS};
use crate::report::SimplificationReport;
use crate::store::MeshStore;
use crate::MeshSimplifier;
use quadrix_core::{Error, Result, TriangleMesh};

/// Quadric error decimation simplifier
///
/// Wraps [`MeshStore::simplify_mesh`] behind the [`MeshSimplifier`] trait,
/// translating a reduction ratio into a target triangle count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuadricErrorSimplifier {
    /// Threshold growth exponent, see [`SimplifyOptions::aggressiveness`]
    pub aggressiveness: u32,
    /// Keep open boundaries in place
    pub preserve_border: bool,
}

impl Default for QuadricErrorSimplifier {
    fn default() -> Self {
        Self {
            aggressiveness: DEFAULT_AGGRESSIVENESS,
            preserve_border: false,
        }
    }
}

impl QuadricErrorSimplifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_params(aggressiveness: u32, preserve_border: bool) -> Self {
        Self {
            aggressiveness,
            preserve_border,
        }
    }

    /// Simplify towards an absolute triangle count.
    pub fn simplify_to(
        &self,
        mesh: &TriangleMesh,
        target_triangles: usize,
    ) -> Result<(TriangleMesh, SimplificationReport)> {
        let options = SimplifyOptions::new(target_triangles)
            .with_aggressiveness(self.aggressiveness)
            .with_preserve_border(self.preserve_border);

        let mut store = MeshStore::from_mesh(mesh)?;
        let report = store.simplify_mesh(&options);
        Ok((store.into_mesh(), report))
    }
}

impl MeshSimplifier for QuadricErrorSimplifier {
    fn simplify(&self, mesh: &TriangleMesh, reduction_ratio: f32) -> Result<TriangleMesh> {
        if mesh.is_empty() {
            return Err(Error::InvalidData("Mesh is empty".to_string()));
        }
        if !(0.0..=1.0).contains(&reduction_ratio) {
            return Err(Error::InvalidData(
                "Reduction ratio must be between 0.0 and 1.0".to_string(),
            ));
        }
        if reduction_ratio == 0.0 {
            return Ok(mesh.clone());
        }

        let target_faces = ((1.0 - reduction_ratio as f64) * mesh.faces.len() as f64) as usize;
        let (simplified, _) = self.simplify_to(mesh, target_faces)?;
        Ok(simplified)
    }
}
