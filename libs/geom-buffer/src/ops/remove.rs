//! # Random Removal
//!
//! Seeded, reproducible removal of primitives.

use crate::buffer::MeshBuffer;

impl MeshBuffer {
    /// Drops each triangle and each line independently with `probability`.
    ///
    /// One `fastrand` generator seeded with `seed` draws a value in `[0, 1)`
    /// per triangle, then per line; a primitive is kept when the draw is at
    /// least `probability`. Identical input, probability and seed give an
    /// identical result. Vertices are not touched.
    ///
    /// # Example
    ///
    /// ```rust
    /// use geom_buffer::MeshBuffer;
    /// use glam::Vec3;
    ///
    /// let mut buffer = MeshBuffer::new();
    /// let a = buffer.add_vertex_at(Vec3::ZERO);
    /// let b = buffer.add_vertex_at(Vec3::X);
    /// buffer.add_line(a, b);
    /// buffer.remove_primitives_randomly(1.0, 7);
    /// assert_eq!(buffer.num_lines(), 0);
    /// ```
    pub fn remove_primitives_randomly(&mut self, probability: f32, seed: u64) {
        let mut rng = fastrand::Rng::with_seed(seed);

        let triangles: Vec<u32> = self
            .triangle_indices
            .chunks_exact(3)
            .filter(|_| rng.f32() >= probability)
            .flatten()
            .copied()
            .collect();
        let lines: Vec<u32> = self
            .line_indices
            .chunks_exact(2)
            .filter(|_| rng.f32() >= probability)
            .flatten()
            .copied()
            .collect();

        log::debug!(
            "random removal kept {}/{} triangles, {}/{} lines",
            triangles.len() / 3,
            self.num_triangles(),
            lines.len() / 2,
            self.num_lines()
        );
        self.triangle_indices = triangles;
        self.line_indices = lines;
    }
}
