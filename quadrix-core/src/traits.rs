//! Core traits for quadrix

use crate::{mesh::*, point::*};

/// Trait for drawable/renderable objects
pub trait Drawable {
    /// Get the bounding box of the object
    fn bounding_box(&self) -> (Point3d, Point3d);

    /// Get the center point of the object
    fn center(&self) -> Point3d;
}

impl Drawable for TriangleMesh {
    fn bounding_box(&self) -> (Point3d, Point3d) {
        if self.vertices.is_empty() {
            return (Point3d::origin(), Point3d::origin());
        }

        let mut min = self.vertices[0];
        let mut max = self.vertices[0];

        for vertex in &self.vertices {
            min.x = min.x.min(vertex.x);
            min.y = min.y.min(vertex.y);
            min.z = min.z.min(vertex.z);

            max.x = max.x.max(vertex.x);
            max.y = max.y.max(vertex.y);
            max.z = max.z.max(vertex.z);
        }

        (min, max)
    }

    fn center(&self) -> Point3d {
        let (min, max) = self.bounding_box();
        nalgebra::center(&min, &max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_bounding_box() {
        let mesh = TriangleMesh::from_vertices_and_faces(
            vec![
                Point3d::new(-1.0, 0.0, 2.0),
                Point3d::new(3.0, -2.0, 0.0),
                Point3d::new(0.0, 5.0, 1.0),
            ],
            vec![[0, 1, 2]],
        );
        let (min, max) = mesh.bounding_box();
        assert_eq!(min, Point3d::new(-1.0, -2.0, 0.0));
        assert_eq!(max, Point3d::new(3.0, 5.0, 2.0));

        let c = mesh.center();
        assert_relative_eq!(c.x, 1.0);
        assert_relative_eq!(c.y, 1.5);
        assert_relative_eq!(c.z, 1.0);
    }

    #[test]
    fn test_empty_bounding_box() {
        let (min, max) = TriangleMesh::new().bounding_box();
        assert_eq!(min, Point3d::origin());
        assert_eq!(max, Point3d::origin());
    }
}
