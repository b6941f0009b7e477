//! Parameters for quadric simplification

use serde::{Deserialize, Serialize};

/// Aggressiveness used when none is given.
pub const DEFAULT_AGGRESSIVENESS: u32 = 7;

/// Parameters for [`MeshStore::simplify_mesh`](crate::MeshStore::simplify_mesh).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimplifyOptions {
    /// Number of triangles to stop at
    pub target_triangles: usize,
    /// Exponent of the per-iteration error threshold; 5..8 are sensible.
    /// Higher values simplify faster at the expense of quality.
    pub aggressiveness: u32,
    /// Never move vertices that lie on an open boundary
    pub preserve_border: bool,
}

impl Default for SimplifyOptions {
    fn default() -> Self {
        Self {
            target_triangles: 0,
            aggressiveness: DEFAULT_AGGRESSIVENESS,
            preserve_border: false,
        }
    }
}

impl SimplifyOptions {
    pub fn new(target_triangles: usize) -> Self {
        Self {
            target_triangles,
            ..Default::default()
        }
    }

    pub fn with_aggressiveness(mut self, aggressiveness: u32) -> Self {
        self.aggressiveness = aggressiveness;
        self
    }

    pub fn with_preserve_border(mut self, preserve: bool) -> Self {
        self.preserve_border = preserve;
        self
    }

    /// Error threshold accepted during the given outer iteration.
    pub fn threshold(&self, iteration: usize) -> f64 {
        let exponent = i32::try_from(self.aggressiveness).unwrap_or(i32::MAX);
        1e-9 * (iteration as f64 + 3.0).powi(exponent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults() {
        let options = SimplifyOptions::default();
        assert_eq!(options.target_triangles, 0);
        assert_eq!(options.aggressiveness, 7);
        assert!(!options.preserve_border);
    }

    #[test]
    fn test_builder() {
        let options = SimplifyOptions::new(500)
            .with_aggressiveness(5)
            .with_preserve_border(true);
        assert_eq!(options.target_triangles, 500);
        assert_eq!(options.aggressiveness, 5);
        assert!(options.preserve_border);
    }

    #[test]
    fn test_threshold_grows() {
        let options = SimplifyOptions::default();
        assert_relative_eq!(options.threshold(0), 1e-9 * 3f64.powi(7));
        assert!(options.threshold(10) > options.threshold(9));

        let gentle = SimplifyOptions::default().with_aggressiveness(5);
        assert!(gentle.threshold(20) < options.threshold(20));
    }

    #[test]
    fn test_threshold_saturates_huge_aggressiveness() {
        let options = SimplifyOptions::default().with_aggressiveness(u32::MAX);
        assert!(options.threshold(0) > SimplifyOptions::default().threshold(0));
        assert_eq!(options.threshold(0), f64::INFINITY);
    }
}
