//! # Vertex and Pen
//!
//! Value types for a single vertex and for the ambient attribute "pen".
//!
//! The pen is an explicit cursor: [`Pen::vertex`] stamps the current normal,
//! color and texture coordinate onto a position. [`crate::MeshBuffer`] keeps
//! one for the shorthand [`crate::MeshBuffer::add_vertex_at`].

use config::constants::{DEFAULT_PEN_COLOR, DEFAULT_PEN_NORMAL, DEFAULT_PEN_TEX_COORD};
use glam::{Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};

// =============================================================================
// VERTEX
// =============================================================================

/// All attributes of one vertex.
///
/// # Example
///
/// ```rust
/// use geom_buffer::Vertex;
/// use glam::{Vec3, Vec4};
///
/// let v = Vertex::at(Vec3::X).with_color(Vec4::new(1.0, 0.0, 0.0, 1.0));
/// assert_eq!(v.position, Vec3::X);
/// assert_eq!(v.color.x, 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub color: Vec4,
    pub tex_coord: Vec2,
}

impl Vertex {
    /// Vertex at `position` with the default pen attributes.
    pub fn at(position: Vec3) -> Self {
        Pen::default().vertex(position)
    }

    /// Replaces the normal.
    pub fn with_normal(mut self, normal: Vec3) -> Self {
        self.normal = normal;
        self
    }

    /// Replaces the color.
    pub fn with_color(mut self, color: Vec4) -> Self {
        self.color = color;
        self
    }

    /// Replaces the texture coordinate.
    pub fn with_tex_coord(mut self, tex_coord: Vec2) -> Self {
        self.tex_coord = tex_coord;
        self
    }

    /// Linear interpolation of every attribute.
    ///
    /// Normals are interpolated linearly and not renormalized.
    pub fn lerp(&self, other: &Vertex, t: f32) -> Vertex {
        Vertex {
            position: self.position.lerp(other.position, t),
            normal: self.normal.lerp(other.normal, t),
            color: self.color.lerp(other.color, t),
            tex_coord: self.tex_coord.lerp(other.tex_coord, t),
        }
    }

    /// Midpoint of two vertices.
    #[inline]
    pub fn midpoint(&self, other: &Vertex) -> Vertex {
        self.lerp(other, 0.5)
    }
}

// =============================================================================
// PEN
// =============================================================================

/// Ambient attributes applied to positions added without explicit attributes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pen {
    pub normal: Vec3,
    pub color: Vec4,
    pub tex_coord: Vec2,
}

impl Default for Pen {
    fn default() -> Self {
        Self {
            normal: Vec3::from_array(DEFAULT_PEN_NORMAL),
            color: Vec4::from_array(DEFAULT_PEN_COLOR),
            tex_coord: Vec2::from_array(DEFAULT_PEN_TEX_COORD),
        }
    }
}

impl Pen {
    /// Builds a vertex at `position` carrying the pen's attributes.
    #[inline]
    pub fn vertex(&self, position: Vec3) -> Vertex {
        Vertex {
            position,
            normal: self.normal,
            color: self.color,
            tex_coord: self.tex_coord,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pen() {
        let pen = Pen::default();
        assert_eq!(pen.normal, Vec3::Z);
        assert_eq!(pen.color, Vec4::ONE);
        assert_eq!(pen.tex_coord, Vec2::ZERO);
    }

    #[test]
    fn test_midpoint_averages_all_attributes() {
        let a = Vertex::at(Vec3::ZERO).with_tex_coord(Vec2::ZERO).with_color(Vec4::ZERO);
        let b = Vertex::at(Vec3::new(2.0, 4.0, 6.0))
            .with_tex_coord(Vec2::ONE)
            .with_color(Vec4::ONE);
        let m = a.midpoint(&b);
        assert_eq!(m.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(m.tex_coord, Vec2::splat(0.5));
        assert_eq!(m.color, Vec4::splat(0.5));
    }

    #[test]
    fn test_vertex_bincode_snapshot() {
        let v = Vertex::at(Vec3::new(1.0, -2.0, 3.5)).with_normal(Vec3::Y);
        let bytes = bincode::serialize(&v).unwrap();
        let back: Vertex = bincode::deserialize(&bytes).unwrap();
        assert_eq!(v, back);
    }
}
