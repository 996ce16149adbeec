//! Normal and sphere stages.

use geom_buffer::MeshBuffer;

use crate::error::ModifierError;
use crate::modifier::{modifier_common, Modifier, ModifierBase};
use crate::property::Properties;

/// Recomputes and/or flips vertex normals.
#[derive(Debug, Clone, PartialEq)]
pub struct Normals {
    base: ModifierBase,
}

impl Normals {
    /// Registry class name.
    pub const CLASS: &'static str = "Normals";

    /// Creates the stage with default properties.
    pub fn new() -> Self {
        let mut props = Properties::new();
        props
            .define(
                "calc",
                "calculate",
                "Smooth normals from the triangle faces",
                true,
            )
            .define("invert", "invert", "Flip every normal", false);
        Self {
            base: ModifierBase::new("normals", props),
        }
    }
}

impl Default for Normals {
    fn default() -> Self {
        Self::new()
    }
}

impl Modifier for Normals {
    modifier_common!();

    fn execute(&self, buffer: &mut MeshBuffer) -> Result<(), ModifierError> {
        let props = self.properties();
        let calc = props.get_bool("calc").map_err(|e| self.property_error(e))?;
        let invert = props.get_bool("invert").map_err(|e| self.property_error(e))?;
        if calc {
            buffer.calculate_triangle_normals();
        }
        if invert {
            buffer.invert_normals();
        }
        Ok(())
    }
}

/// Pulls positions toward a sphere around the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalize {
    base: ModifierBase,
}

impl Normalize {
    /// Registry class name.
    pub const CLASS: &'static str = "Normalize";

    /// Creates the stage with default properties.
    pub fn new() -> Self {
        let mut props = Properties::new();
        props
            .define("scale", "radius", "Radius of the target sphere", 1.0)
            .define(
                "amount",
                "amount",
                "0 keeps positions, 1 puts them on the sphere",
                1.0,
            );
        props.set_range("amount", 0.0, 1.0);
        Self {
            base: ModifierBase::new("normalize", props),
        }
    }
}

impl Default for Normalize {
    fn default() -> Self {
        Self::new()
    }
}

impl Modifier for Normalize {
    modifier_common!();

    fn execute(&self, buffer: &mut MeshBuffer) -> Result<(), ModifierError> {
        let props = self.properties();
        let scale = props.get_float("scale").map_err(|e| self.property_error(e))?;
        let amount = props.get_float("amount").map_err(|e| self.property_error(e))?;
        buffer.normalize_sphere(scale as f32, amount as f32);
        Ok(())
    }
}
