//! # Mesh Buffer
//!
//! Flat attribute arrays plus two independent index arrays referencing one
//! shared vertex pool.
//!
//! ## Layout
//!
//! | Array | Stride | Content |
//! |-------|--------|---------|
//! | positions | 3 | `x y z` |
//! | normals | 3 | `nx ny nz` |
//! | colors | 4 | `r g b a` |
//! | tex_coords | 2 | `s t` |
//! | triangle_indices | 3 | vertex indices |
//! | line_indices | 2 | vertex indices |
//!
//! All four attribute arrays always hold the same number of vertices, and
//! every index stored through the public API refers to an existing vertex.
//!
//! Operations that transform the whole buffer live in [`crate::ops`].

use std::mem::size_of;

use config::constants::{clip_share_threshold, DEGENERATE_EDGE_LENGTH};
use glam::{Vec2, Vec3, Vec4};

use crate::progress::Progress;
use crate::share::VertexShareIndex;
use crate::vertex::{Pen, Vertex};

/// Vertex index type of both index arrays.
pub type IndexType = u32;

/// A renderable triangle and line mesh.
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
/// let c = buffer.add_vertex_at(Vec3::Y);
/// buffer.add_triangle(a, b, c);
/// assert_eq!(buffer.num_triangles(), 1);
/// ```
#[derive(Debug)]
pub struct MeshBuffer {
    pub(crate) positions: Vec<f32>,
    pub(crate) normals: Vec<f32>,
    pub(crate) colors: Vec<f32>,
    pub(crate) tex_coords: Vec<f32>,
    pub(crate) triangle_indices: Vec<IndexType>,
    pub(crate) line_indices: Vec<IndexType>,
    pen: Pen,
    pub(crate) share: Option<VertexShareIndex>,
    progress: Progress,
}

impl Default for MeshBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for MeshBuffer {
    /// Deep copy of geometry, pen and share index. The copy gets its own
    /// progress counter.
    fn clone(&self) -> Self {
        Self {
            positions: self.positions.clone(),
            normals: self.normals.clone(),
            colors: self.colors.clone(),
            tex_coords: self.tex_coords.clone(),
            triangle_indices: self.triangle_indices.clone(),
            line_indices: self.line_indices.clone(),
            pen: self.pen,
            share: self.share.clone(),
            progress: Progress::new(),
        }
    }
}

impl MeshBuffer {
    /// Creates an empty buffer with sharing disabled.
    pub fn new() -> Self {
        Self {
            positions: Vec::new(),
            normals: Vec::new(),
            colors: Vec::new(),
            tex_coords: Vec::new(),
            triangle_indices: Vec::new(),
            line_indices: Vec::new(),
            pen: Pen::default(),
            share: None,
            progress: Progress::new(),
        }
    }

    /// Creates an empty buffer with sharing enabled at `threshold`.
    pub fn with_shared_vertices(threshold: f32) -> Self {
        let mut buffer = Self::new();
        buffer.set_shared_vertices(true, threshold);
        buffer
    }

    /// Creates an empty buffer with the same sharing mode and threshold.
    pub fn empty_like(&self) -> Self {
        let mut buffer = Self::new();
        if let Some(share) = &self.share {
            buffer.share = Some(VertexShareIndex::new(share.threshold()));
        }
        buffer
    }

    // =========================================================================
    // COUNTS AND RAW ARRAYS
    // =========================================================================

    /// Returns the number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.positions.len() / 3
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn num_triangles(&self) -> usize {
        self.triangle_indices.len() / 3
    }

    /// Returns the number of lines.
    #[inline]
    pub fn num_lines(&self) -> usize {
        self.line_indices.len() / 2
    }

    /// Returns true if the buffer has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Flat positions, three floats per vertex.
    #[inline]
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Flat normals, three floats per vertex.
    #[inline]
    pub fn normals(&self) -> &[f32] {
        &self.normals
    }

    /// Flat colors, four floats per vertex.
    #[inline]
    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    /// Flat texture coordinates, two floats per vertex.
    #[inline]
    pub fn tex_coords(&self) -> &[f32] {
        &self.tex_coords
    }

    /// Triangle indices, three per triangle.
    #[inline]
    pub fn triangle_indices(&self) -> &[IndexType] {
        &self.triangle_indices
    }

    /// Line indices, two per line.
    #[inline]
    pub fn line_indices(&self) -> &[IndexType] {
        &self.line_indices
    }

    /// Progress of the operation currently running on this buffer.
    #[inline]
    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    /// Removes all vertices and primitives.
    ///
    /// Sharing mode, threshold and pen are kept; the share index is emptied.
    pub fn clear(&mut self) {
        self.positions.clear();
        self.normals.clear();
        self.colors.clear();
        self.tex_coords.clear();
        self.triangle_indices.clear();
        self.line_indices.clear();
        if let Some(share) = &mut self.share {
            share.clear();
        }
    }

    // =========================================================================
    // PER-VERTEX ACCESS
    // =========================================================================

    /// Position of vertex `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[inline]
    pub fn position(&self, index: IndexType) -> Vec3 {
        let i = index as usize * 3;
        Vec3::from_slice(&self.positions[i..i + 3])
    }

    /// Normal of vertex `index`.
    #[inline]
    pub fn normal(&self, index: IndexType) -> Vec3 {
        let i = index as usize * 3;
        Vec3::from_slice(&self.normals[i..i + 3])
    }

    /// Color of vertex `index`.
    #[inline]
    pub fn color(&self, index: IndexType) -> Vec4 {
        let i = index as usize * 4;
        Vec4::from_slice(&self.colors[i..i + 4])
    }

    /// Texture coordinate of vertex `index`.
    #[inline]
    pub fn tex_coord(&self, index: IndexType) -> Vec2 {
        let i = index as usize * 2;
        Vec2::from_slice(&self.tex_coords[i..i + 2])
    }

    /// All attributes of vertex `index`.
    pub fn vertex(&self, index: IndexType) -> Vertex {
        Vertex {
            position: self.position(index),
            normal: self.normal(index),
            color: self.color(index),
            tex_coord: self.tex_coord(index),
        }
    }

    /// Moves vertex `index`, keeping the share index consistent.
    pub fn set_vertex_position(&mut self, index: IndexType, position: Vec3) {
        let old = self.position(index);
        let i = index as usize * 3;
        position.write_to_slice(&mut self.positions[i..i + 3]);
        if let Some(share) = &mut self.share {
            share.relocate(index, old, position);
        }
    }

    /// Replaces the normal of vertex `index`.
    pub fn set_vertex_normal(&mut self, index: IndexType, normal: Vec3) {
        let i = index as usize * 3;
        normal.write_to_slice(&mut self.normals[i..i + 3]);
    }

    /// Replaces the color of vertex `index`.
    pub fn set_vertex_color(&mut self, index: IndexType, color: Vec4) {
        let i = index as usize * 4;
        color.write_to_slice(&mut self.colors[i..i + 4]);
    }

    /// Replaces the texture coordinate of vertex `index`.
    pub fn set_vertex_tex_coord(&mut self, index: IndexType, tex_coord: Vec2) {
        let i = index as usize * 2;
        tex_coord.write_to_slice(&mut self.tex_coords[i..i + 2]);
    }

    /// Vertex indices of triangle `index`.
    #[inline]
    pub fn triangle(&self, index: usize) -> [IndexType; 3] {
        let i = index * 3;
        [
            self.triangle_indices[i],
            self.triangle_indices[i + 1],
            self.triangle_indices[i + 2],
        ]
    }

    /// Vertex indices of line `index`.
    #[inline]
    pub fn line(&self, index: usize) -> [IndexType; 2] {
        let i = index * 2;
        [self.line_indices[i], self.line_indices[i + 1]]
    }

    /// Iterates over all triangles.
    pub fn triangles(&self) -> impl Iterator<Item = [IndexType; 3]> + '_ {
        self.triangle_indices
            .chunks_exact(3)
            .map(|t| [t[0], t[1], t[2]])
    }

    /// Iterates over all lines.
    pub fn lines(&self) -> impl Iterator<Item = [IndexType; 2]> + '_ {
        self.line_indices.chunks_exact(2).map(|l| [l[0], l[1]])
    }

    // =========================================================================
    // PEN
    // =========================================================================

    /// Current pen.
    #[inline]
    pub fn pen(&self) -> &Pen {
        &self.pen
    }

    /// Replaces the pen.
    pub fn set_pen(&mut self, pen: Pen) {
        self.pen = pen;
    }

    /// Sets the pen color used by [`MeshBuffer::add_vertex_at`].
    pub fn set_color(&mut self, color: Vec4) {
        self.pen.color = color;
    }

    /// Sets the pen normal used by [`MeshBuffer::add_vertex_at`].
    pub fn set_normal(&mut self, normal: Vec3) {
        self.pen.normal = normal;
    }

    /// Sets the pen texture coordinate used by [`MeshBuffer::add_vertex_at`].
    pub fn set_tex_coord(&mut self, tex_coord: Vec2) {
        self.pen.tex_coord = tex_coord;
    }

    // =========================================================================
    // VERTEX SHARING
    // =========================================================================

    /// Returns true if vertex sharing is enabled.
    #[inline]
    pub fn shared_vertices(&self) -> bool {
        self.share.is_some()
    }

    /// Effective share threshold, if sharing is enabled.
    pub fn share_threshold(&self) -> Option<f32> {
        self.share.as_ref().map(VertexShareIndex::threshold)
    }

    /// Enables or disables vertex sharing.
    ///
    /// The threshold is clipped to `MINIMUM_SHARE_THRESHOLD`. Enabling on a
    /// buffer that already has vertices registers none of them; changing the
    /// threshold while enabled re-keys the registered vertices so existing
    /// indices stay valid. Disabling drops the index.
    ///
    /// # Example
    ///
    /// ```rust
    /// use geom_buffer::MeshBuffer;
    ///
    /// let mut buffer = MeshBuffer::new();
    /// buffer.set_shared_vertices(true, 0.0);
    /// assert_eq!(buffer.share_threshold(), Some(0.001));
    /// ```
    pub fn set_shared_vertices(&mut self, enable: bool, threshold: f32) {
        if !enable {
            self.share = None;
            return;
        }
        let threshold = clip_share_threshold(threshold);
        match &mut self.share {
            Some(share) if share.threshold() != threshold => {
                share.rekey(&self.positions, threshold);
            }
            Some(_) => {}
            None => self.share = Some(VertexShareIndex::new(threshold)),
        }
    }

    /// Re-keys the share index after positions moved in bulk.
    pub(crate) fn refresh_share_index(&mut self) {
        if let Some(share) = &mut self.share {
            let threshold = share.threshold();
            share.rekey(&self.positions, threshold);
        }
    }

    /// Finds a registered vertex within the threshold of `position`.
    ///
    /// Always `None` when sharing is disabled.
    pub fn find_vertex(&self, position: Vec3) -> Option<IndexType> {
        self.share
            .as_ref()
            .and_then(|share| share.find(position, &self.positions))
            .map(|hit| hit.index)
    }

    // =========================================================================
    // ADDING VERTICES
    // =========================================================================

    /// Adds a vertex, merging with a nearby one when sharing is enabled.
    ///
    /// On a merge the stored position is kept and normal, color and texture
    /// coordinate become the running average of every sample merged into
    /// the vertex so far. Normals are not renormalized.
    ///
    /// # Returns
    ///
    /// Index of the new or merged vertex.
    pub fn add_vertex(&mut self, vertex: Vertex) -> IndexType {
        let hit = self
            .share
            .as_ref()
            .and_then(|share| share.find(vertex.position, &self.positions));

        if let Some(hit) = hit {
            let count = self.share.as_mut().map_or(1, |share| share.record_hit(hit));
            self.blend(hit.index, &vertex, count);
            return hit.index;
        }

        let index = self.push_vertex(&vertex);
        if let Some(share) = &mut self.share {
            share.insert(vertex.position, index);
        }
        index
    }

    /// Adds a vertex at `position` with the pen's attributes.
    pub fn add_vertex_at(&mut self, position: Vec3) -> IndexType {
        let vertex = self.pen.vertex(position);
        self.add_vertex(vertex)
    }

    /// Appends a vertex regardless of sharing mode.
    ///
    /// The vertex is not registered in the share index, so later adds never
    /// merge into it.
    pub fn add_vertex_always(&mut self, vertex: Vertex) -> IndexType {
        self.push_vertex(&vertex)
    }

    fn push_vertex(&mut self, vertex: &Vertex) -> IndexType {
        let index = self.num_vertices() as IndexType;
        self.positions.extend_from_slice(&vertex.position.to_array());
        self.normals.extend_from_slice(&vertex.normal.to_array());
        self.colors.extend_from_slice(&vertex.color.to_array());
        self.tex_coords.extend_from_slice(&vertex.tex_coord.to_array());
        index
    }

    /// Running-average blend of a merged sample into vertex `index`.
    fn blend(&mut self, index: IndexType, sample: &Vertex, count: u32) {
        let m2 = 1.0 / count.max(1) as f32;
        let m1 = 1.0 - m2;
        let normal = self.normal(index) * m1 + sample.normal * m2;
        let color = self.color(index) * m1 + sample.color * m2;
        let tex_coord = self.tex_coord(index) * m1 + sample.tex_coord * m2;
        self.set_vertex_normal(index, normal);
        self.set_vertex_color(index, color);
        self.set_vertex_tex_coord(index, tex_coord);
    }

    // =========================================================================
    // ADDING PRIMITIVES
    // =========================================================================

    /// Adds a triangle from existing vertex indices.
    ///
    /// Indices are a precondition and only checked in debug builds.
    #[inline]
    pub fn add_triangle(&mut self, a: IndexType, b: IndexType, c: IndexType) {
        debug_assert!(
            (a.max(b).max(c) as usize) < self.num_vertices(),
            "triangle index out of range"
        );
        self.triangle_indices.extend_from_slice(&[a, b, c]);
    }

    /// Adds a line from existing vertex indices.
    ///
    /// Indices are a precondition and only checked in debug builds.
    #[inline]
    pub fn add_line(&mut self, a: IndexType, b: IndexType) {
        debug_assert!(
            (a.max(b) as usize) < self.num_vertices(),
            "line index out of range"
        );
        self.line_indices.extend_from_slice(&[a, b]);
    }

    /// Returns true if no edge of the triangle is shorter than
    /// `DEGENERATE_EDGE_LENGTH`.
    pub fn check_triangle(&self, a: IndexType, b: IndexType, c: IndexType) -> bool {
        let (pa, pb, pc) = (self.position(a), self.position(b), self.position(c));
        pa.distance(pb) >= DEGENERATE_EDGE_LENGTH
            && pb.distance(pc) >= DEGENERATE_EDGE_LENGTH
            && pa.distance(pc) >= DEGENERATE_EDGE_LENGTH
    }

    /// Adds a triangle unless it is degenerate.
    ///
    /// # Returns
    ///
    /// `true` if the triangle was added.
    pub fn add_triangle_checked(&mut self, a: IndexType, b: IndexType, c: IndexType) -> bool {
        if !self.check_triangle(a, b, c) {
            return false;
        }
        self.add_triangle(a, b, c);
        true
    }

    /// Appends another buffer's primitives, shifted by `offset`.
    ///
    /// Vertices go through [`MeshBuffer::add_vertex`], so they merge
    /// according to this buffer's sharing mode. Vertices referenced by no
    /// primitive are copied too.
    pub fn add_geometry(&mut self, other: &MeshBuffer, offset: Vec3) {
        let remap: Vec<IndexType> = (0..other.num_vertices() as IndexType)
            .map(|i| {
                let mut vertex = other.vertex(i);
                vertex.position += offset;
                self.add_vertex(vertex)
            })
            .collect();

        for [a, b, c] in other.triangles() {
            self.add_triangle(remap[a as usize], remap[b as usize], remap[c as usize]);
        }
        for [a, b] in other.lines() {
            self.add_line(remap[a as usize], remap[b as usize]);
        }
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// Axis-aligned bounding box as `(min, max)`, or `None` when empty.
    pub fn extent(&self) -> Option<(Vec3, Vec3)> {
        let mut points = self.positions.chunks_exact(3).map(Vec3::from_slice);
        let first = points.next()?;
        Some(points.fold((first, first), |(min, max), p| (min.min(p), max.max(p))))
    }

    /// Bytes used by the attribute and index arrays.
    pub fn memory(&self) -> usize {
        (self.positions.len() + self.normals.len() + self.colors.len() + self.tex_coords.len())
            * size_of::<f32>()
            + (self.triangle_indices.len() + self.line_indices.len()) * size_of::<IndexType>()
    }

    /// One-line human readable summary.
    ///
    /// # Example
    ///
    /// ```rust
    /// use geom_buffer::MeshBuffer;
    ///
    /// let buffer = MeshBuffer::new();
    /// assert!(buffer.info_string().starts_with("0 vertices"));
    /// ```
    pub fn info_string(&self) -> String {
        let mut info = format!(
            "{} vertices, {} triangles, {} lines, {} bytes",
            self.num_vertices(),
            self.num_triangles(),
            self.num_lines(),
            self.memory()
        );
        if let Some(threshold) = self.share_threshold() {
            info.push_str(&format!(", shared at {threshold}"));
        }
        info
    }

    /// Checks the array invariants.
    ///
    /// Returns true when all attribute arrays hold the same vertex count and
    /// every index is in range.
    pub fn validate(&self) -> bool {
        let n = self.num_vertices();
        let lengths_ok = self.positions.len() == n * 3
            && self.normals.len() == n * 3
            && self.colors.len() == n * 4
            && self.tex_coords.len() == n * 2
            && self.triangle_indices.len() % 3 == 0
            && self.line_indices.len() % 2 == 0;
        lengths_ok
            && self
                .triangle_indices
                .iter()
                .chain(&self.line_indices)
                .all(|&i| (i as usize) < n)
    }

    /// Takes over the vertices and primitives of `other`.
    ///
    /// Pen, progress and sharing mode of this buffer are kept. With sharing
    /// enabled the index is rebuilt by registering every vertex once, so
    /// coincident vertices of `other` stay separate.
    pub fn replace_geometry(&mut self, other: MeshBuffer) {
        self.positions = other.positions;
        self.normals = other.normals;
        self.colors = other.colors;
        self.tex_coords = other.tex_coords;
        self.triangle_indices = other.triangle_indices;
        self.line_indices = other.line_indices;
        if let Some(share) = &mut self.share {
            share.clear();
            for (i, p) in self.positions.chunks_exact(3).enumerate() {
                share.insert(Vec3::from_slice(p), i as IndexType);
            }
        }
    }
}
