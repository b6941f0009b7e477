//! Summary of a simplification run

/// Statistics of a finished simplification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimplificationReport {
    pub original_triangles: usize,
    pub final_triangles: usize,
    pub original_vertices: usize,
    pub final_vertices: usize,
    /// Number of accepted edge collapses
    pub collapses: usize,
    /// Number of outer threshold iterations that ran
    pub iterations: usize,
}

impl SimplificationReport {
    /// Ratio of remaining to original triangles.
    pub fn reduction_ratio(&self) -> f64 {
        if self.original_triangles == 0 {
            1.0
        } else {
            self.final_triangles as f64 / self.original_triangles as f64
        }
    }

    pub fn was_simplified(&self) -> bool {
        self.collapses > 0
    }
}

impl std::fmt::Display for SimplificationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} -> {} triangles, {} -> {} vertices ({:.1}% kept, {} collapses in {} iterations)",
            self.original_triangles,
            self.final_triangles,
            self.original_vertices,
            self.final_vertices,
            self.reduction_ratio() * 100.0,
            self.collapses,
            self.iterations
        )
    }
}
