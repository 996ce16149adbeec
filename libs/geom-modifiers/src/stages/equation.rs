//! Equation-driven deformation stages.
//!
//! All three evaluate with [`EquationEvaluator`]. Variable names are listed
//! in [`geom_buffer::VERTEX_VARIABLES`] and
//! [`geom_buffer::PRIMITIVE_VARIABLES`]. A compile error fails the stage
//! and leaves the buffer unchanged.

use geom_buffer::{EquationEvaluator, Equations, MeshBuffer};

use crate::error::{ModifierError, PropertyError};
use crate::modifier::{modifier_common, Modifier, ModifierBase};
use crate::property::Properties;

fn equation_properties(program: &str) -> Properties {
    let mut props = Properties::new();
    props
        .define(
            "single",
            "single equation",
            "One program assigning any variable, instead of one expression per axis",
            false,
        )
        .define("equation", "equation", "Program run per vertex", program)
        .define("equation_x", "x", "New x coordinate", "x")
        .define("equation_y", "y", "New y coordinate", "y")
        .define("equation_z", "z", "New z coordinate", "z");
    props
}

fn equations(props: &Properties) -> Result<Equations<'_>, PropertyError> {
    if props.get_bool("single")? {
        Ok(Equations::Program(props.get_text("equation")?))
    } else {
        Ok(Equations::Components([
            props.get_text("equation_x")?,
            props.get_text("equation_y")?,
            props.get_text("equation_z")?,
        ]))
    }
}

/// Computes new vertex data per vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexEquation {
    base: ModifierBase,
}

impl VertexEquation {
    /// Registry class name.
    pub const CLASS: &'static str = "VertexEquation";

    /// Creates the stage with default properties.
    pub fn new() -> Self {
        Self {
            base: ModifierBase::new("vertex equation", equation_properties("x = x; y = y; z = z")),
        }
    }
}

impl Default for VertexEquation {
    fn default() -> Self {
        Self::new()
    }
}

impl Modifier for VertexEquation {
    modifier_common!();

    fn execute(&self, buffer: &mut MeshBuffer) -> Result<(), ModifierError> {
        let equations = equations(self.properties()).map_err(|e| self.property_error(e))?;
        buffer
            .transform_with_equation(&EquationEvaluator, equations, &[])
            .map_err(|e| ModifierError::equation(Self::CLASS, e))
    }
}

/// Computes new corner data per triangle corner.
///
/// The triangles end up ungrouped. With `calc_normals_before` smooth
/// normals are computed first, so equations can read them.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimitiveEquation {
    base: ModifierBase,
}

impl PrimitiveEquation {
    /// Registry class name.
    pub const CLASS: &'static str = "PrimitiveEquation";

    /// Creates the stage with default properties.
    pub fn new() -> Self {
        let mut props = equation_properties("x = x + nx * 0.1; y = y + ny * 0.1; z = z + nz * 0.1");
        props.define(
            "calc_normals_before",
            "calculate normals before",
            "Recompute smooth normals before evaluating",
            false,
        );
        Self {
            base: ModifierBase::new("primitive equation", props),
        }
    }
}

impl Default for PrimitiveEquation {
    fn default() -> Self {
        Self::new()
    }
}

impl Modifier for PrimitiveEquation {
    modifier_common!();

    fn execute(&self, buffer: &mut MeshBuffer) -> Result<(), ModifierError> {
        let props = self.properties();
        let equations = equations(props).map_err(|e| self.property_error(e))?;
        let calc_normals = props
            .get_bool("calc_normals_before")
            .map_err(|e| self.property_error(e))?;
        let fail = |e| ModifierError::equation(Self::CLASS, e);

        if !calc_normals {
            return buffer
                .transform_primitives_with_equation(&EquationEvaluator, equations, &[])
                .map_err(fail);
        }

        // Normals are recomputed on a copy so a compile error changes nothing
        let mut work = buffer.clone();
        work.calculate_triangle_normals();
        work.transform_primitives_with_equation(&EquationEvaluator, equations, &[])
            .map_err(fail)?;
        buffer.set_shared_vertices(false, 0.0);
        buffer.replace_geometry(work);
        Ok(())
    }
}

/// Computes new texture coordinates per vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct TexCoordEquation {
    base: ModifierBase,
}

impl TexCoordEquation {
    /// Registry class name.
    pub const CLASS: &'static str = "TexCoordEquation";

    /// Creates the stage with default properties.
    pub fn new() -> Self {
        let mut props = Properties::new();
        props
            .define("equation_s", "s", "New s coordinate", "s")
            .define("equation_t", "t", "New t coordinate", "t");
        Self {
            base: ModifierBase::new("texture coordinate equation", props),
        }
    }
}

impl Default for TexCoordEquation {
    fn default() -> Self {
        Self::new()
    }
}

impl Modifier for TexCoordEquation {
    modifier_common!();

    fn execute(&self, buffer: &mut MeshBuffer) -> Result<(), ModifierError> {
        let props = self.properties();
        let s = props.get_text("equation_s").map_err(|e| self.property_error(e))?;
        let t = props.get_text("equation_t").map_err(|e| self.property_error(e))?;
        buffer
            .transform_tex_coords_with_equation(&EquationEvaluator, s, t, &[])
            .map_err(|e| ModifierError::equation(Self::CLASS, e))
    }
}
