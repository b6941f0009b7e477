//! Quadric error metric storage
//!
//! A quadric is the symmetric 4x4 matrix `A` of the quadratic form
//! `Q(x) = xᵗ A x` over homogeneous points `x = (px, py, pz, 1)`. Only the
//! 10 independent entries of the upper triangle are stored:
//!
//! ```text
//! | m0 m1 m2 m3 |
//! | m1 m4 m5 m6 |
//! | m2 m5 m7 m8 |
//! | m3 m6 m8 m9 |
//! ```

use quadrix_core::Point3d;
use std::ops::{Add, AddAssign, Index};

/// Packed symmetric 4x4 matrix accumulating squared plane distances.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SymmetricMatrix {
    pub m: [f64; 10],
}

impl SymmetricMatrix {
    pub const ZERO: SymmetricMatrix = SymmetricMatrix { m: [0.0; 10] };

    /// Quadric of a single plane `ax + by + cz + d = 0`.
    ///
    /// The plane normal is expected to be unit length so that the form
    /// evaluates to the squared distance from the plane.
    pub fn from_plane(a: f64, b: f64, c: f64, d: f64) -> Self {
        let mut q = Self::ZERO;
        q.set(a, b, c, d);
        q
    }

    /// Overwrite all entries with the outer product of the plane coefficients.
    pub fn set(&mut self, a: f64, b: f64, c: f64, d: f64) {
        self.m = [
            a * a, a * b, a * c, a * d,
                   b * b, b * c, b * d,
                          c * c, c * d,
                                 d * d,
        ];
    }

    pub fn clear(&mut self) {
        self.m = [0.0; 10];
    }

    /// Determinant of the 3x3 minor selected by nine packed indices.
    #[allow(clippy::too_many_arguments)]
    pub fn det(
        &self,
        a11: usize, a12: usize, a13: usize,
        a21: usize, a22: usize, a23: usize,
        a31: usize, a32: usize, a33: usize,
    ) -> f64 {
        let m = &self.m;
        m[a11] * m[a22] * m[a33] + m[a13] * m[a21] * m[a32] + m[a12] * m[a23] * m[a31]
            - m[a13] * m[a22] * m[a31]
            - m[a11] * m[a23] * m[a32]
            - m[a12] * m[a21] * m[a33]
    }

    /// Determinant of the upper-left 3x3 block.
    #[inline]
    pub fn det_upper(&self) -> f64 {
        self.det(0, 1, 2, 1, 4, 5, 2, 5, 7)
    }

    /// Evaluate the quadratic form at `p`, i.e. the error of placing a vertex there.
    pub fn vertex_error(&self, p: &Point3d) -> f64 {
        let q = &self.m;
        let (x, y, z) = (p.x, p.y, p.z);
        q[0] * x * x + 2.0 * q[1] * x * y + 2.0 * q[2] * x * z + 2.0 * q[3] * x
            + q[4] * y * y + 2.0 * q[5] * y * z + 2.0 * q[6] * y
            + q[7] * z * z + 2.0 * q[8] * z
            + q[9]
    }
}

impl Add for SymmetricMatrix {
    type Output = SymmetricMatrix;

    fn add(mut self, other: SymmetricMatrix) -> SymmetricMatrix {
        self += other;
        self
    }
}

impl AddAssign for SymmetricMatrix {
    fn add_assign(&mut self, other: SymmetricMatrix) {
        for (a, b) in self.m.iter_mut().zip(other.m.iter()) {
            *a += b;
        }
    }
}

impl Index<usize> for SymmetricMatrix {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.m[index]
    }
}
