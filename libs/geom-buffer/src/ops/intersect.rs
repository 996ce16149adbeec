//! # Ray Queries
//!
//! Closest ray/triangle hit using the Möller–Trumbore test.

use glam::Vec3;

use crate::buffer::MeshBuffer;

/// Parallel-ray tolerance of the determinant.
const RAY_EPSILON: f32 = 1e-7;

/// Closest hit of a ray against the triangles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Hit position.
    pub position: Vec3,
    /// Index of the triangle that was hit.
    pub triangle: usize,
    /// Ray parameter of the hit, in units of `direction`.
    pub distance: f32,
}

/// Ray parameter of the hit with one triangle, if any.
fn intersect_triangle(origin: Vec3, direction: Vec3, a: Vec3, b: Vec3, c: Vec3) -> Option<f32> {
    let edge1 = b - a;
    let edge2 = c - a;
    let h = direction.cross(edge2);
    let det = edge1.dot(h);
    if det.abs() < RAY_EPSILON {
        return None;
    }
    let inv = 1.0 / det;
    let s = origin - a;
    let u = inv * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let q = s.cross(edge1);
    let v = inv * direction.dot(q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    let t = inv * edge2.dot(q);
    (t >= 0.0).then_some(t)
}

impl MeshBuffer {
    /// Finds the closest triangle hit along a ray.
    ///
    /// Both faces of a triangle count. Hits behind the origin are ignored.
    ///
    /// # Example
    ///
    /// ```rust
    /// use geom_buffer::MeshBuffer;
    /// use glam::Vec3;
    ///
    /// let mut buffer = MeshBuffer::new();
    /// let a = buffer.add_vertex_at(Vec3::new(-1.0, -1.0, 0.0));
    /// let b = buffer.add_vertex_at(Vec3::new(1.0, -1.0, 0.0));
    /// let c = buffer.add_vertex_at(Vec3::new(0.0, 1.0, 0.0));
    /// buffer.add_triangle(a, b, c);
    ///
    /// let hit = buffer.intersects(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z).unwrap();
    /// assert_eq!(hit.triangle, 0);
    /// assert!((hit.distance - 5.0).abs() < 1e-5);
    /// ```
    pub fn intersects(&self, origin: Vec3, direction: Vec3) -> Option<RayHit> {
        self.triangles()
            .enumerate()
            .filter_map(|(triangle, [a, b, c])| {
                let t = intersect_triangle(
                    origin,
                    direction,
                    self.position(a),
                    self.position(b),
                    self.position(c),
                )?;
                Some(RayHit {
                    position: origin + direction * t,
                    triangle,
                    distance: t,
                })
            })
            .min_by(|x, y| x.distance.total_cmp(&y.distance))
    }
}
