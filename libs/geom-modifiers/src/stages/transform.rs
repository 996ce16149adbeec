//! Affine transform stages.

use geom_buffer::MeshBuffer;
use glam::{Mat4, Vec3};

use crate::error::{ModifierError, PropertyError};
use crate::modifier::{modifier_common, Modifier, ModifierBase};
use crate::property::Properties;

fn define_axes(props: &mut Properties, what: &str, default: f64) {
    for axis in ["x", "y", "z"] {
        props.define(axis, axis, &format!("{what} along {axis}"), default);
    }
}

fn read_axes(props: &Properties) -> Result<Vec3, PropertyError> {
    Ok(Vec3::new(
        props.get_float("x")? as f32,
        props.get_float("y")? as f32,
        props.get_float("z")? as f32,
    ))
}

/// Moves every position.
#[derive(Debug, Clone, PartialEq)]
pub struct Translate {
    base: ModifierBase,
}

impl Translate {
    /// Registry class name.
    pub const CLASS: &'static str = "Translate";

    /// Creates the stage with default properties.
    pub fn new() -> Self {
        let mut props = Properties::new();
        define_axes(&mut props, "Offset", 0.0);
        Self {
            base: ModifierBase::new("translate", props),
        }
    }
}

impl Default for Translate {
    fn default() -> Self {
        Self::new()
    }
}

impl Modifier for Translate {
    modifier_common!();

    fn execute(&self, buffer: &mut MeshBuffer) -> Result<(), ModifierError> {
        let offset = read_axes(self.properties()).map_err(|e| self.property_error(e))?;
        buffer.translate(offset);
        Ok(())
    }
}

/// Scales uniformly by `all`, then per axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Scale {
    base: ModifierBase,
}

impl Scale {
    /// Registry class name.
    pub const CLASS: &'static str = "Scale";

    /// Creates the stage with default properties.
    pub fn new() -> Self {
        let mut props = Properties::new();
        props.define("all", "all", "Uniform factor", 1.0);
        define_axes(&mut props, "Factor", 1.0);
        Self {
            base: ModifierBase::new("scale", props),
        }
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self::new()
    }
}

impl Modifier for Scale {
    modifier_common!();

    fn execute(&self, buffer: &mut MeshBuffer) -> Result<(), ModifierError> {
        let props = self.properties();
        let all = props.get_float("all").map_err(|e| self.property_error(e))? as f32;
        let axes = read_axes(props).map_err(|e| self.property_error(e))?;
        buffer.scale(axes * all);
        Ok(())
    }
}

/// Rotates around an axis through the origin.
///
/// A zero axis leaves the buffer unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct Rotate {
    base: ModifierBase,
}

impl Rotate {
    /// Registry class name.
    pub const CLASS: &'static str = "Rotate";

    /// Creates the stage with default properties.
    pub fn new() -> Self {
        let mut props = Properties::new();
        props
            .define("angle", "angle", "Rotation in degrees", 0.0)
            .define("x", "x", "Rotation axis x", 0.0)
            .define("y", "y", "Rotation axis y", 0.0)
            .define("z", "z", "Rotation axis z", 1.0);
        Self {
            base: ModifierBase::new("rotate", props),
        }
    }
}

impl Default for Rotate {
    fn default() -> Self {
        Self::new()
    }
}

impl Modifier for Rotate {
    modifier_common!();

    fn execute(&self, buffer: &mut MeshBuffer) -> Result<(), ModifierError> {
        let props = self.properties();
        let angle = props.get_float("angle").map_err(|e| self.property_error(e))?;
        let axis = read_axes(props).map_err(|e| self.property_error(e))?;
        if let Some(axis) = axis.try_normalize() {
            let matrix = Mat4::from_axis_angle(axis, (angle as f32).to_radians());
            buffer.apply_matrix(&matrix);
        }
        Ok(())
    }
}
