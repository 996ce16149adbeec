//! # Tesselation
//!
//! Recursive 1-to-4 triangle subdivision and line subdivision.
//!
//! ## Triangle Split
//!
//! ```text
//!         c                    c
//!        / \                  / \
//!       /   \               ca---bc
//!      /     \     -->      / \ / \
//!     a-------b            a---ab--b
//! ```
//!
//! Midpoints average all attributes of the two endpoints and are added
//! through [`MeshBuffer::add_vertex`], so with sharing enabled the midpoint
//! of an edge shared by two triangles becomes one vertex.

use crate::buffer::{IndexType, MeshBuffer};

impl MeshBuffer {
    /// Splits every triangle into four, `level` times.
    ///
    /// Triangle count grows by `4^level`; lines are unchanged.
    ///
    /// # Example
    ///
    /// ```rust
    /// use geom_buffer::MeshBuffer;
    /// use glam::Vec3;
    ///
    /// let mut buffer = MeshBuffer::with_shared_vertices(0.001);
    /// let a = buffer.add_vertex_at(Vec3::ZERO);
    /// let b = buffer.add_vertex_at(Vec3::X);
    /// let c = buffer.add_vertex_at(Vec3::Y);
    /// buffer.add_triangle(a, b, c);
    /// buffer.tesselate(2);
    /// assert_eq!(buffer.num_triangles(), 16);
    /// assert_eq!(buffer.num_vertices(), 15);
    /// ```
    pub fn tesselate(&mut self, level: u32) {
        for pass in 0..level {
            self.tesselate_once();
            log::debug!(
                "tesselation pass {}/{}: {} triangles, {} vertices",
                pass + 1,
                level,
                self.num_triangles(),
                self.num_vertices()
            );
        }
    }

    fn tesselate_once(&mut self) {
        let triangles = std::mem::take(&mut self.triangle_indices);
        let total = triangles.len() / 3;
        let mut split = Vec::with_capacity(triangles.len() * 4);

        for (i, t) in triangles.chunks_exact(3).enumerate() {
            let (a, b, c) = (t[0], t[1], t[2]);
            let ab = self.add_midpoint(a, b);
            let bc = self.add_midpoint(b, c);
            let ca = self.add_midpoint(c, a);
            split.extend_from_slice(&[a, ab, ca, ab, b, bc, ab, bc, ca, ca, bc, c]);
            self.progress().set_fraction(i, total);
        }

        self.triangle_indices = split;
        self.progress().set_fraction(total, total);
    }

    /// Splits every line into `2^level` segments.
    ///
    /// Triangles are unchanged.
    pub fn tesselate_lines(&mut self, level: u32) {
        for _ in 0..level {
            let lines = std::mem::take(&mut self.line_indices);
            let mut split = Vec::with_capacity(lines.len() * 2);
            for l in lines.chunks_exact(2) {
                let m = self.add_midpoint(l[0], l[1]);
                split.extend_from_slice(&[l[0], m, m, l[1]]);
            }
            self.line_indices = split;
        }
    }

    fn add_midpoint(&mut self, a: IndexType, b: IndexType) -> IndexType {
        let midpoint = self.vertex(a).midpoint(&self.vertex(b));
        self.add_vertex(midpoint)
    }
}
