//! # Topology
//!
//! Operations that rebuild the vertex pool or the index arrays:
//! ungrouping, regrouping and triangle-to-line conversion.

use std::collections::HashSet;

use crate::buffer::{IndexType, MeshBuffer};

impl MeshBuffer {
    /// Gives every primitive corner its own vertex.
    ///
    /// Triangles are rebuilt first, then lines, each corner copied in order.
    /// Vertices referenced by no primitive are dropped. Sharing is disabled
    /// afterwards so no later add merges into the copies.
    pub fn un_group_vertices(&mut self) {
        let mut ungrouped = MeshBuffer::new();

        for [a, b, c] in self.triangles() {
            let ia = ungrouped.add_vertex_always(self.vertex(a));
            let ib = ungrouped.add_vertex_always(self.vertex(b));
            let ic = ungrouped.add_vertex_always(self.vertex(c));
            ungrouped.add_triangle(ia, ib, ic);
        }
        for [a, b] in self.lines() {
            let ia = ungrouped.add_vertex_always(self.vertex(a));
            let ib = ungrouped.add_vertex_always(self.vertex(b));
            ungrouped.add_line(ia, ib);
        }

        self.share = None;
        self.replace_geometry(ungrouped);
    }

    /// Merges vertices closer than `threshold` into one.
    ///
    /// The buffer is rebuilt with sharing enabled at `threshold` (clipped to
    /// the minimum). Triangles or lines whose corners collapse onto the same
    /// vertex are dropped.
    pub fn group_vertices(&mut self, threshold: f32) {
        let mut grouped = MeshBuffer::with_shared_vertices(threshold);
        let remap: Vec<IndexType> = (0..self.num_vertices() as IndexType)
            .map(|i| grouped.add_vertex(self.vertex(i)))
            .collect();

        for [a, b, c] in self.triangles() {
            let (a, b, c) = (remap[a as usize], remap[b as usize], remap[c as usize]);
            if a != b && b != c && a != c {
                grouped.add_triangle(a, b, c);
            }
        }
        for [a, b] in self.lines() {
            let (a, b) = (remap[a as usize], remap[b as usize]);
            if a != b {
                grouped.add_line(a, b);
            }
        }

        self.share = grouped.share.take();
        self.replace_geometry(grouped);
    }

    /// Turns every triangle edge into a line and removes the triangles.
    ///
    /// Edges shared by several triangles (by index) become one line. Lines
    /// already in the buffer are kept.
    pub fn convert_to_lines(&mut self) {
        if self.num_triangles() == 0 {
            return;
        }

        let mut seen: HashSet<(IndexType, IndexType)> = HashSet::new();
        let triangles: Vec<[IndexType; 3]> = self.triangles().collect();
        for [a, b, c] in triangles {
            for (p, q) in [(a, b), (a, c), (b, c)] {
                if seen.insert((p.min(q), p.max(q))) {
                    self.add_line(p, q);
                }
            }
        }

        self.triangle_indices.clear();
    }
}
