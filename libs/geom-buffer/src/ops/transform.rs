//! # Transforms
//!
//! Affine transforms of positions and normals, sphere normalization and
//! texture coordinate edits.
//!
//! Positions get the full affine matrix. Normals get the inverse transpose
//! of its linear part and are renormalized, so they stay unit directions
//! under non-uniform scale and are never translated.

use glam::{Mat3, Mat4, Vec2, Vec3};

use crate::buffer::MeshBuffer;

/// Determinant below which a matrix is treated as singular for normals.
const SINGULAR_DETERMINANT: f32 = 1e-12;

impl MeshBuffer {
    /// Moves every position by `offset`. Normals are unchanged.
    pub fn translate(&mut self, offset: Vec3) {
        for p in self.positions.chunks_exact_mut(3) {
            (Vec3::from_slice(p) + offset).write_to_slice(p);
        }
        self.refresh_share_index();
    }

    /// Scales every position per axis.
    ///
    /// # Example
    ///
    /// ```rust
    /// use geom_buffer::MeshBuffer;
    /// use glam::Vec3;
    ///
    /// let mut buffer = MeshBuffer::new();
    /// buffer.add_vertex_at(Vec3::new(1.0, 1.0, 1.0));
    /// buffer.scale(Vec3::new(2.0, 3.0, 4.0));
    /// assert_eq!(buffer.position(0), Vec3::new(2.0, 3.0, 4.0));
    /// ```
    pub fn scale(&mut self, factors: Vec3) {
        self.apply_matrix(&Mat4::from_scale(factors));
    }

    /// Applies an affine matrix to positions and normals.
    ///
    /// If the linear part is singular the normals are left untouched.
    pub fn apply_matrix(&mut self, matrix: &Mat4) {
        for p in self.positions.chunks_exact_mut(3) {
            matrix.transform_point3(Vec3::from_slice(p)).write_to_slice(p);
        }

        let linear = Mat3::from_mat4(*matrix);
        if linear.determinant().abs() > SINGULAR_DETERMINANT {
            let normal_matrix = linear.inverse().transpose();
            for n in self.normals.chunks_exact_mut(3) {
                (normal_matrix * Vec3::from_slice(n))
                    .normalize_or_zero()
                    .write_to_slice(n);
            }
        }

        self.refresh_share_index();
    }

    /// Pulls every position toward the sphere of radius `scale`.
    ///
    /// Each position moves linearly toward `scale * normalize(position)` by
    /// `amount`: `0` leaves it, `1` puts it on the sphere. Positions at the
    /// origin have no direction and stay put.
    pub fn normalize_sphere(&mut self, scale: f32, amount: f32) {
        for p in self.positions.chunks_exact_mut(3) {
            let position = Vec3::from_slice(p);
            if let Some(direction) = position.try_normalize() {
                position.lerp(direction * scale, amount).write_to_slice(p);
            }
        }
        self.refresh_share_index();
    }

    // =========================================================================
    // TEXTURE COORDINATES
    // =========================================================================

    /// Mirrors texture coordinates: `s -> 1 - s` and/or `t -> 1 - t`.
    pub fn invert_tex_coords(&mut self, invert_s: bool, invert_t: bool) {
        for st in self.tex_coords.chunks_exact_mut(2) {
            if invert_s {
                st[0] = 1.0 - st[0];
            }
            if invert_t {
                st[1] = 1.0 - st[1];
            }
        }
    }

    /// Adds `offset` to every texture coordinate.
    pub fn shift_tex_coords(&mut self, offset: Vec2) {
        for st in self.tex_coords.chunks_exact_mut(2) {
            (Vec2::from_slice(st) + offset).write_to_slice(st);
        }
    }

    /// Multiplies every texture coordinate by `factors`.
    pub fn scale_tex_coords(&mut self, factors: Vec2) {
        for st in self.tex_coords.chunks_exact_mut(2) {
            (Vec2::from_slice(st) * factors).write_to_slice(st);
        }
    }
}
