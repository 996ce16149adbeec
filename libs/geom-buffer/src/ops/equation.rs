//! # Equation Transforms
//!
//! Per-vertex and per-primitive-corner deformation driven by user
//! equations. The evaluator is injected through [`ExpressionEvaluator`];
//! [`EquationEvaluator`] adapts the `geom-equation` crate.
//!
//! Every equation is compiled before the buffer is touched, so a compile
//! error leaves the buffer unchanged.
//!
//! ## Vertex Variables
//!
//! | Name | Meaning |
//! |------|---------|
//! | `x y z` | position |
//! | `nx ny nz` | normal |
//! | `s t` | texture coordinate |
//! | `red green blue alpha` | color |
//! | `bright` | brightness multiplier, starts at `1` |
//! | `i` | vertex index |
//!
//! ## Primitive Variables
//!
//! All vertex variables for the current corner, plus the whole primitive:
//! `x1 y1 z1 .. x3 y3 z3`, `nx1 .. nz3`, `s1 t1 .. s3 t3`,
//! `red1 green1 blue1 alpha1 .. alpha3`, `i` (triangle or line index) and
//! `p` (corner index). Lines fill corners 1 and 2; corner 3 reads zero.

use glam::{Vec2, Vec3, Vec4};

use crate::buffer::{IndexType, MeshBuffer};
use crate::error::EquationError;
use crate::vertex::Vertex;

// =============================================================================
// EVALUATOR SEAM
// =============================================================================

/// A compiled expression bound to a fixed variable list.
pub trait CompiledExpression: Send + Sync {
    /// Runs the expression.
    ///
    /// `slots[k]` holds the k-th variable given at compile time; the
    /// expression may overwrite them. Returns the expression's value.
    fn evaluate(&self, slots: &mut [f64]) -> f64;
}

/// Compiles expression strings against named variables.
pub trait ExpressionEvaluator {
    /// Compiles `source`.
    ///
    /// # Arguments
    ///
    /// * `source` - Expression text
    /// * `variables` - Names bound to slot positions, in order
    /// * `constants` - Extra named values folded into the expression
    ///
    /// # Errors
    ///
    /// A human readable parse error message.
    fn compile(
        &self,
        source: &str,
        variables: &[&str],
        constants: &[(&str, f64)],
    ) -> Result<Box<dyn CompiledExpression>, String>;
}

/// Evaluator backed by [`geom_equation::Program`].
#[derive(Debug, Clone, Copy, Default)]
pub struct EquationEvaluator;

impl ExpressionEvaluator for EquationEvaluator {
    fn compile(
        &self,
        source: &str,
        variables: &[&str],
        constants: &[(&str, f64)],
    ) -> Result<Box<dyn CompiledExpression>, String> {
        geom_equation::Program::compile_with_constants(source, variables, constants)
            .map(|program| Box::new(program) as Box<dyn CompiledExpression>)
            .map_err(|e| e.to_string())
    }
}

impl CompiledExpression for geom_equation::Program {
    fn evaluate(&self, slots: &mut [f64]) -> f64 {
        self.run(slots)
    }
}

/// How the new position is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Equations<'a> {
    /// One program that reads and writes any of the variables.
    Program(&'a str),
    /// One expression per position axis. Each sees the unmodified inputs
    /// and its value becomes the new coordinate.
    Components([&'a str; 3]),
}

// =============================================================================
// VARIABLE LAYOUT
// =============================================================================

/// Variables of per-vertex equations.
pub const VERTEX_VARIABLES: [&str; 14] = [
    "x", "y", "z", "nx", "ny", "nz", "s", "t", "red", "green", "blue", "alpha", "bright", "i",
];

/// Variables of per-primitive equations.
pub const PRIMITIVE_VARIABLES: [&str; 51] = [
    "x", "y", "z", "nx", "ny", "nz", "s", "t", "red", "green", "blue", "alpha", "bright",
    "x1", "y1", "z1", "x2", "y2", "z2", "x3", "y3", "z3",
    "nx1", "ny1", "nz1", "nx2", "ny2", "nz2", "nx3", "ny3", "nz3",
    "s1", "t1", "s2", "t2", "s3", "t3",
    "red1", "green1", "blue1", "alpha1",
    "red2", "green2", "blue2", "alpha2",
    "red3", "green3", "blue3", "alpha3",
    "i", "p",
];

/// Slots shared by both layouts: the current vertex or corner.
const CURRENT_SLOTS: usize = 13;
const BRIGHT_SLOT: usize = 12;
const VERTEX_INDEX_SLOT: usize = 13;
const CORNER_POSITIONS: usize = 13;
const CORNER_NORMALS: usize = 22;
const CORNER_TEX_COORDS: usize = 31;
const CORNER_COLORS: usize = 37;
const PRIMITIVE_INDEX_SLOT: usize = 49;
const CORNER_INDEX_SLOT: usize = 50;

/// Writes the current vertex into slots `0..13`.
fn load_current(slots: &mut [f64], v: &Vertex) {
    let values = [
        v.position.x,
        v.position.y,
        v.position.z,
        v.normal.x,
        v.normal.y,
        v.normal.z,
        v.tex_coord.x,
        v.tex_coord.y,
        v.color.x,
        v.color.y,
        v.color.z,
        v.color.w,
        1.0,
    ];
    for (slot, value) in slots.iter_mut().zip(values) {
        *slot = value as f64;
    }
}

/// Reads the current vertex back from slots `0..13`.
///
/// Colors are clamped to `[0, 1]`; red, green and blue are then multiplied
/// by `bright`.
fn store_current(slots: &[f64], v: &mut Vertex) {
    let f = |k: usize| slots[k] as f32;
    let bright = f(BRIGHT_SLOT);
    v.position = Vec3::new(f(0), f(1), f(2));
    v.normal = Vec3::new(f(3), f(4), f(5));
    v.tex_coord = Vec2::new(f(6), f(7));
    v.color = Vec4::new(
        f(8).clamp(0.0, 1.0) * bright,
        f(9).clamp(0.0, 1.0) * bright,
        f(10).clamp(0.0, 1.0) * bright,
        f(11).clamp(0.0, 1.0),
    );
}

/// Writes the corners of a triangle or line into the primitive slots.
fn load_corners(slots: &mut [f64], corners: &[Vertex]) {
    slots[CORNER_POSITIONS..PRIMITIVE_INDEX_SLOT].fill(0.0);
    for (k, v) in corners.iter().enumerate() {
        for (axis, value) in v.position.to_array().into_iter().enumerate() {
            slots[CORNER_POSITIONS + k * 3 + axis] = value as f64;
        }
        for (axis, value) in v.normal.to_array().into_iter().enumerate() {
            slots[CORNER_NORMALS + k * 3 + axis] = value as f64;
        }
        for (axis, value) in v.tex_coord.to_array().into_iter().enumerate() {
            slots[CORNER_TEX_COORDS + k * 2 + axis] = value as f64;
        }
        for (axis, value) in v.color.to_array().into_iter().enumerate() {
            slots[CORNER_COLORS + k * 4 + axis] = value as f64;
        }
    }
}

fn compile_all<E: ExpressionEvaluator + ?Sized>(
    evaluator: &E,
    sources: &[(&str, &str)],
    variables: &[&str],
    constants: &[(&str, f64)],
) -> Result<Vec<Box<dyn CompiledExpression>>, EquationError> {
    sources
        .iter()
        .map(|(target, source)| {
            evaluator
                .compile(source, variables, constants)
                .map_err(|message| EquationError::compile(*target, message))
        })
        .collect()
}

/// Compiled form of [`Equations`].
enum Compiled {
    Program(Box<dyn CompiledExpression>),
    Components(Vec<Box<dyn CompiledExpression>>),
}

impl Compiled {
    fn new<E: ExpressionEvaluator + ?Sized>(
        evaluator: &E,
        equations: Equations<'_>,
        variables: &[&str],
        constants: &[(&str, f64)],
    ) -> Result<Self, EquationError> {
        match equations {
            Equations::Program(source) => {
                let mut compiled =
                    compile_all(evaluator, &[("program", source)], variables, constants)?;
                match compiled.pop() {
                    Some(program) => Ok(Self::Program(program)),
                    None => Err(EquationError::compile("program", "nothing compiled")),
                }
            }
            Equations::Components([x, y, z]) => Ok(Self::Components(compile_all(
                evaluator,
                &[("x", x), ("y", y), ("z", z)],
                variables,
                constants,
            )?)),
        }
    }

    /// Runs on freshly loaded `slots` and returns the updated vertex.
    fn apply(&self, slots: &mut [f64], scratch: &mut [f64], mut vertex: Vertex) -> Vertex {
        match self {
            Self::Program(program) => {
                program.evaluate(slots);
                store_current(slots, &mut vertex);
            }
            Self::Components(axes) => {
                let mut position = [0.0f32; 3];
                for (coord, expression) in position.iter_mut().zip(axes) {
                    scratch.copy_from_slice(slots);
                    *coord = expression.evaluate(scratch) as f32;
                }
                vertex.position = Vec3::from_array(position);
            }
        }
        vertex
    }
}

// =============================================================================
// TRANSFORMS
// =============================================================================

impl MeshBuffer {
    /// Computes new vertex data with an equation per vertex.
    ///
    /// # Errors
    ///
    /// [`EquationError`] naming the first equation that failed to compile.
    /// The buffer is unchanged in that case.
    ///
    /// # Example
    ///
    /// ```rust
    /// use geom_buffer::{EquationEvaluator, Equations, MeshBuffer};
    /// use glam::Vec3;
    ///
    /// let mut buffer = MeshBuffer::new();
    /// buffer.add_vertex_at(Vec3::new(1.0, 2.0, 3.0));
    /// buffer
    ///     .transform_with_equation(&EquationEvaluator, Equations::Components(["x * k", "y", "z + i"]), &[("k", 2.0)])
    ///     .unwrap();
    /// assert_eq!(buffer.position(0), Vec3::new(2.0, 2.0, 3.0));
    /// ```
    pub fn transform_with_equation<E: ExpressionEvaluator + ?Sized>(
        &mut self,
        evaluator: &E,
        equations: Equations<'_>,
        constants: &[(&str, f64)],
    ) -> Result<(), EquationError> {
        let compiled = Compiled::new(evaluator, equations, &VERTEX_VARIABLES, constants)?;

        let total = self.num_vertices();
        let mut slots = [0.0f64; VERTEX_VARIABLES.len()];
        let mut scratch = [0.0f64; VERTEX_VARIABLES.len()];

        for i in 0..total {
            let index = i as IndexType;
            let vertex = self.vertex(index);
            load_current(&mut slots, &vertex);
            slots[VERTEX_INDEX_SLOT] = i as f64;
            let updated = compiled.apply(&mut slots, &mut scratch, vertex);
            self.write_attributes(index, &updated);
            self.progress().set_fraction(i, total);
        }

        self.refresh_share_index();
        self.progress().set_fraction(total, total);
        Ok(())
    }

    /// Computes new corner data with an equation per triangle corner.
    ///
    /// The buffer is ungrouped first so that every corner owns its vertex;
    /// sharing is disabled afterwards. Triangles run first, then lines. All
    /// corners of a primitive see the primitive as it was before the call.
    ///
    /// # Errors
    ///
    /// [`EquationError`] naming the first equation that failed to compile.
    /// The buffer is unchanged in that case.
    pub fn transform_primitives_with_equation<E: ExpressionEvaluator + ?Sized>(
        &mut self,
        evaluator: &E,
        equations: Equations<'_>,
        constants: &[(&str, f64)],
    ) -> Result<(), EquationError> {
        let compiled = Compiled::new(evaluator, equations, &PRIMITIVE_VARIABLES, constants)?;

        let mut work = self.clone();
        work.un_group_vertices();

        let triangles = work.num_triangles();
        let total = triangles + work.num_lines();
        let mut slots = [0.0f64; PRIMITIVE_VARIABLES.len()];
        let mut scratch = [0.0f64; PRIMITIVE_VARIABLES.len()];

        for t in 0..triangles {
            let indices = work.triangle(t);
            work.transform_corners(&compiled, indices, t, &mut slots, &mut scratch);
            self.progress().set_fraction(t, total);
        }
        for l in 0..work.num_lines() {
            let indices = work.line(l);
            work.transform_corners(&compiled, indices, l, &mut slots, &mut scratch);
            self.progress().set_fraction(triangles + l, total);
        }

        self.share = None;
        self.replace_geometry(work);
        self.progress().set_fraction(total, total);
        Ok(())
    }

    /// Computes new texture coordinates with one equation per component.
    ///
    /// Both equations see the vertex variables with the unmodified inputs;
    /// their values become the new `s` and `t`.
    ///
    /// # Errors
    ///
    /// [`EquationError`] naming the equation that failed to compile. The
    /// buffer is unchanged in that case.
    pub fn transform_tex_coords_with_equation<E: ExpressionEvaluator + ?Sized>(
        &mut self,
        evaluator: &E,
        equation_s: &str,
        equation_t: &str,
        constants: &[(&str, f64)],
    ) -> Result<(), EquationError> {
        let compiled = compile_all(
            evaluator,
            &[("s", equation_s), ("t", equation_t)],
            &VERTEX_VARIABLES,
            constants,
        )?;

        let total = self.num_vertices();
        let mut slots = [0.0f64; VERTEX_VARIABLES.len()];
        let mut scratch = [0.0f64; VERTEX_VARIABLES.len()];

        for i in 0..total {
            let index = i as IndexType;
            load_current(&mut slots, &self.vertex(index));
            slots[VERTEX_INDEX_SLOT] = i as f64;
            let mut st = [0.0f32; 2];
            for (value, expression) in st.iter_mut().zip(&compiled) {
                scratch.copy_from_slice(&slots);
                *value = expression.evaluate(&mut scratch) as f32;
            }
            self.set_vertex_tex_coord(index, Vec2::from_array(st));
        }
        Ok(())
    }

    /// Runs `compiled` on every corner of one primitive.
    fn transform_corners<const N: usize>(
        &mut self,
        compiled: &Compiled,
        indices: [IndexType; N],
        primitive: usize,
        slots: &mut [f64],
        scratch: &mut [f64],
    ) {
        let corners = indices.map(|i| self.vertex(i));
        let mut updated = corners;

        for (p, corner) in corners.iter().enumerate() {
            load_current(&mut slots[..CURRENT_SLOTS], corner);
            load_corners(slots, &corners);
            slots[PRIMITIVE_INDEX_SLOT] = primitive as f64;
            slots[CORNER_INDEX_SLOT] = p as f64;
            updated[p] = compiled.apply(slots, scratch, *corner);
        }

        for (index, vertex) in indices.iter().zip(&updated) {
            self.write_attributes(*index, vertex);
        }
    }

    /// Writes every attribute without touching the share index.
    fn write_attributes(&mut self, index: IndexType, vertex: &Vertex) {
        let i = index as usize;
        vertex.position.write_to_slice(&mut self.positions[i * 3..i * 3 + 3]);
        self.set_vertex_normal(index, vertex.normal);
        self.set_vertex_color(index, vertex.color);
        self.set_vertex_tex_coord(index, vertex.tex_coord);
    }
}
