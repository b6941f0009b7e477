//! Packed triangle-corner references

/// A `(triangle, corner)` pair packed into one integer as `triangle << 2 | corner`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Ref(u32);

impl Ref {
    /// Exclusive upper bound on triangle indices that fit in a reference.
    pub const MAX_TRIANGLES: usize = 1 << 30;

    #[inline]
    pub fn new(triangle: usize, corner: usize) -> Self {
        debug_assert!(corner < 3, "corner {corner} out of range");
        debug_assert!(triangle < Self::MAX_TRIANGLES, "triangle {triangle} too large");
        Ref(((triangle as u32) << 2) | corner as u32)
    }

    #[inline]
    pub fn triangle(self) -> usize {
        (self.0 >> 2) as usize
    }

    #[inline]
    pub fn corner(self) -> usize {
        (self.0 & 3) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_unpack() {
        let r = Ref::new(12345, 2);
        assert_eq!(r.triangle(), 12345);
        assert_eq!(r.corner(), 2);
    }

    #[test]
    fn test_largest_triangle() {
        let r = Ref::new(Ref::MAX_TRIANGLES - 1, 1);
        assert_eq!(r.triangle(), Ref::MAX_TRIANGLES - 1);
        assert_eq!(r.corner(), 1);
    }

    #[test]
    fn test_distinct_corners() {
        assert_ne!(Ref::new(7, 0), Ref::new(7, 1));
        assert_ne!(Ref::new(7, 0), Ref::new(8, 0));
    }
}
