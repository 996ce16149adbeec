//! # Geometry Buffer
//!
//! Renderable triangle/line mesh buffer with spatial vertex sharing, and
//! the whole-buffer operations the modifier pipeline is built from.
//!
//! ## Architecture
//!
//! ```text
//! VertexShareIndex → MeshBuffer → ops (transform, normals, tesselate, ...)
//! ```
//!
//! ## Vertex Sharing
//!
//! With sharing enabled, [`MeshBuffer::add_vertex`] merges a new vertex into
//! an existing one within the share threshold and blends its attributes by
//! running average. See [`share`] for the key layout and range limits.
//!
//! ## Usage
//!
//! ```rust
//! use geom_buffer::MeshBuffer;
//! use glam::Vec3;
//!
//! let mut buffer = MeshBuffer::with_shared_vertices(0.01);
//! let a = buffer.add_vertex_at(Vec3::ZERO);
//! let b = buffer.add_vertex_at(Vec3::new(0.005, 0.0, 0.0));
//! assert_eq!(a, b);
//! assert_eq!(buffer.num_vertices(), 1);
//! ```

pub mod buffer;
pub mod error;
pub mod font;
pub mod ops;
pub mod progress;
pub mod share;
pub mod vertex;

pub use buffer::{IndexType, MeshBuffer};
pub use error::EquationError;
pub use ops::equation::{
    CompiledExpression, EquationEvaluator, Equations, ExpressionEvaluator, PRIMITIVE_VARIABLES,
    VERTEX_VARIABLES,
};
pub use ops::extrude::{ExtrudeParams, ExtrudeStats};
pub use ops::intersect::RayHit;
pub use progress::Progress;
pub use share::VertexShareIndex;
pub use vertex::{Pen, Vertex};
