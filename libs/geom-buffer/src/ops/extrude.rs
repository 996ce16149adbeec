//! # Triangle Extrusion
//!
//! Offsets every triangle along its face normal and optionally closes the
//! gap to the original surface with side walls.
//!
//! ## Side Walls
//!
//! A wall is a quad (two triangles) between an original edge and the same
//! edge of the extruded front face. Edge adjacency is keyed by the unordered
//! pair of quantized corner *positions*, so buffers without shared vertices
//! still find their neighbors. With `recognize_edges` a wall is suppressed
//! only when its edge has exactly one neighboring triangle and that
//! neighbor is coplanar:
//!
//! ```text
//!   boundary edge          -> wall
//!   edge between coplanar  -> no wall
//!   edge between creased   -> wall
//!   edge with 2+ neighbors -> wall
//! ```

use std::collections::HashMap;

use config::constants::{COPLANAR_NORMAL_EPSILON, EDGE_KEY_QUANTUM};
use glam::Vec3;

use crate::buffer::{IndexType, MeshBuffer};

/// Parameters of [`MeshBuffer::extrude_triangles`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtrudeParams {
    /// Fixed offset along the face normal.
    pub constant: f32,
    /// Offset per unit of triangle size (two thirds of the perimeter).
    pub factor: f32,
    /// Pulls the front face toward its centroid, `0` none, `1` collapsed.
    pub shift_center: f32,
    /// Emit side walls.
    pub create_outer_faces: bool,
    /// Suppress walls between coplanar neighbors.
    pub recognize_edges: bool,
}

impl Default for ExtrudeParams {
    fn default() -> Self {
        Self {
            constant: 0.1,
            factor: 0.0,
            shift_center: 0.0,
            create_outer_faces: true,
            recognize_edges: false,
        }
    }
}

/// Counts of what an extrusion emitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtrudeStats {
    /// Extruded front faces.
    pub front_faces: usize,
    /// Side walls, each made of two triangles.
    pub side_walls: usize,
}

type PointKey = [i64; 3];
type EdgeKey = (PointKey, PointKey);

fn point_key(p: Vec3) -> PointKey {
    let q = |v: f32| (v / EDGE_KEY_QUANTUM).round() as i64;
    [q(p.x), q(p.y), q(p.z)]
}

fn edge_key(a: Vec3, b: Vec3) -> EdgeKey {
    let (ka, kb) = (point_key(a), point_key(b));
    if ka <= kb {
        (ka, kb)
    } else {
        (kb, ka)
    }
}

fn coplanar(a: Vec3, b: Vec3) -> bool {
    (a - b).abs().max_element() <= COPLANAR_NORMAL_EPSILON
}

/// A non-degenerate source triangle.
struct Face {
    corners: [IndexType; 3],
    normal: Vec3,
}

impl MeshBuffer {
    /// Extrudes every triangle of this buffer into `out`.
    ///
    /// For each triangle the offset is `constant + factor * size`, where
    /// size is two thirds of the perimeter. The front face is the triangle
    /// moved along its unit face normal by the offset, then pulled toward
    /// its centroid by `shift_center`. Corners keep their normal, color and
    /// texture coordinate. Triangles with a zero-area face are skipped.
    ///
    /// Vertices go through `out.add_vertex`, so they merge according to
    /// `out`'s sharing mode. This buffer is not modified.
    ///
    /// # Example
    ///
    /// ```rust
    /// use geom_buffer::{ExtrudeParams, MeshBuffer};
    /// use glam::Vec3;
    ///
    /// let mut quad = MeshBuffer::new();
    /// let a = quad.add_vertex_at(Vec3::new(0.0, 0.0, 0.0));
    /// let b = quad.add_vertex_at(Vec3::new(1.0, 0.0, 0.0));
    /// let c = quad.add_vertex_at(Vec3::new(1.0, 1.0, 0.0));
    /// let d = quad.add_vertex_at(Vec3::new(0.0, 1.0, 0.0));
    /// quad.add_triangle(a, b, c);
    /// quad.add_triangle(a, c, d);
    ///
    /// let mut out = MeshBuffer::new();
    /// let params = ExtrudeParams { recognize_edges: true, ..Default::default() };
    /// let stats = quad.extrude_triangles(&mut out, &params);
    /// assert_eq!(stats.side_walls, 4);
    /// ```
    pub fn extrude_triangles(&self, out: &mut MeshBuffer, params: &ExtrudeParams) -> ExtrudeStats {
        let faces: Vec<Face> = self
            .triangles()
            .filter_map(|corners| {
                let [a, b, c] = corners.map(|i| self.position(i));
                let normal = (b - a).cross(c - a).try_normalize()?;
                Some(Face { corners, normal })
            })
            .collect();

        let adjacency = if params.create_outer_faces && params.recognize_edges {
            self.edge_adjacency(&faces)
        } else {
            HashMap::new()
        };

        let mut stats = ExtrudeStats::default();
        let total = faces.len();

        for (f, face) in faces.iter().enumerate() {
            let source = face.corners.map(|i| self.vertex(i));
            let [pa, pb, pc] = source.map(|v| v.position);
            let size = (pa.distance(pb) + pb.distance(pc) + pc.distance(pa)) * (2.0 / 3.0);
            let shift = face.normal * (params.constant + params.factor * size);
            let centroid = (pa + pb + pc) / 3.0 + shift;

            let front = source.map(|mut v| {
                let moved = v.position + shift;
                v.position = moved + (centroid - moved) * params.shift_center;
                out.add_vertex(v)
            });
            if out.add_triangle_checked(front[0], front[1], front[2]) {
                stats.front_faces += 1;
            }

            if params.create_outer_faces {
                for k in 0..3 {
                    let (e0, e1) = (k, (k + 1) % 3);
                    if params.recognize_edges
                        && Self::edge_is_hidden(&adjacency, &faces, f, source[e0].position, source[e1].position)
                    {
                        continue;
                    }
                    let d0 = out.add_vertex(source[e0]);
                    let d1 = out.add_vertex(source[e1]);
                    let wall_a = out.add_triangle_checked(d0, d1, front[e1]);
                    let wall_b = out.add_triangle_checked(d0, front[e1], front[e0]);
                    if wall_a || wall_b {
                        stats.side_walls += 1;
                    }
                }
            }

            self.progress().set_fraction(f, total);
        }

        self.progress().set_fraction(total, total);
        log::debug!(
            "extruded {} front faces, {} side walls",
            stats.front_faces,
            stats.side_walls
        );
        stats
    }

    /// Maps each edge to the faces that contain it.
    fn edge_adjacency(&self, faces: &[Face]) -> HashMap<EdgeKey, Vec<usize>> {
        let mut adjacency: HashMap<EdgeKey, Vec<usize>> = HashMap::new();
        for (f, face) in faces.iter().enumerate() {
            let p = face.corners.map(|i| self.position(i));
            for k in 0..3 {
                adjacency
                    .entry(edge_key(p[k], p[(k + 1) % 3]))
                    .or_default()
                    .push(f);
            }
        }
        adjacency
    }

    /// True when the edge has exactly one other face and it is coplanar.
    fn edge_is_hidden(
        adjacency: &HashMap<EdgeKey, Vec<usize>>,
        faces: &[Face],
        face: usize,
        a: Vec3,
        b: Vec3,
    ) -> bool {
        let Some(users) = adjacency.get(&edge_key(a, b)) else {
            return false;
        };
        let mut neighbors = users.iter().filter(|&&other| other != face);
        match (neighbors.next(), neighbors.next()) {
            (Some(&other), None) => coplanar(faces[face].normal, faces[other].normal),
            _ => false,
        }
    }
}
