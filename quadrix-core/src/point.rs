//! Point and vector types

use nalgebra::{Point3, Vector3};

/// A 3D point with double precision coordinates
pub type Point3d = Point3<f64>;

/// A 3D vector with double precision components
pub type Vector3d = Vector3<f64>;

/// Normalize a vector, leaving it untouched when its length is zero.
///
/// Unlike [`Vector3::normalize`], this never produces NaN components for
/// degenerate input.
#[inline]
pub fn safe_normalize(v: Vector3d) -> Vector3d {
    let len = v.norm();
    if len > 0.0 {
        v / len
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_safe_normalize_unit_length() {
        let n = safe_normalize(Vector3d::new(3.0, 0.0, 4.0));
        assert_relative_eq!(n.norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(n.x, 0.6, epsilon = 1e-12);
    }

    #[test]
    fn test_safe_normalize_zero() {
        let n = safe_normalize(Vector3d::zeros());
        assert_eq!(n, Vector3d::zeros());
    }
}
