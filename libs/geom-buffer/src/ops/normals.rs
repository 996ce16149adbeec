//! # Normals
//!
//! Smooth per-vertex normals from triangle faces.

use glam::Vec3;

use crate::buffer::MeshBuffer;

impl MeshBuffer {
    /// Recomputes every vertex normal from the triangles.
    ///
    /// Each triangle's unit face normal (counter-clockwise winding faces
    /// outward) is added to its three corners, then every vertex normal is
    /// normalized. Vertices shared by several triangles get the smooth
    /// average. Vertices referenced by no triangle end up with a zero normal.
    pub fn calculate_triangle_normals(&mut self) {
        let mut sums = vec![Vec3::ZERO; self.num_vertices()];
        let total = self.num_triangles();

        for (i, [a, b, c]) in self.triangles().enumerate() {
            let pa = self.position(a);
            let face = (self.position(b) - pa)
                .cross(self.position(c) - pa)
                .normalize_or_zero();
            sums[a as usize] += face;
            sums[b as usize] += face;
            sums[c as usize] += face;
            self.progress().set_fraction(i, total);
        }

        for (n, sum) in self.normals.chunks_exact_mut(3).zip(&sums) {
            sum.normalize_or_zero().write_to_slice(n);
        }
        self.progress().set_fraction(total, total);
    }

    /// Negates every normal.
    pub fn invert_normals(&mut self) {
        for n in &mut self.normals {
            *n = -*n;
        }
    }
}
