//! # Mesh Operations
//!
//! Whole-buffer operations, each an `impl MeshBuffer` block.
//!
//! ## Modules
//!
//! - [`transform`]: Affine transforms, sphere normalization, texture coordinate edits
//! - [`normals`]: Smooth vertex normals and inversion
//! - [`topology`]: Ungrouping, regrouping and triangle-to-line conversion
//! - [`tesselate`]: Triangle and line subdivision
//! - [`remove`]: Seeded random primitive removal
//! - [`equation`]: Equation-driven deformation through an injected evaluator
//! - [`extrude`]: Triangle extrusion with adjacency-aware side walls
//! - [`intersect`]: Ray queries

pub mod equation;
pub mod extrude;
pub mod intersect;
pub mod normals;
pub mod remove;
pub mod tesselate;
pub mod topology;
pub mod transform;

#[cfg(test)]
mod tests;
