//! Stages that rebuild primitives or the vertex pool.

use config::constants::{DEFAULT_SHARE_THRESHOLD, MINIMUM_SHARE_THRESHOLD};
use geom_buffer::MeshBuffer;

use crate::error::ModifierError;
use crate::modifier::{modifier_common, Modifier, ModifierBase};
use crate::property::Properties;

/// Turns triangles into their edge lines.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertLines {
    base: ModifierBase,
}

impl ConvertLines {
    /// Registry class name.
    pub const CLASS: &'static str = "ConvertLines";

    /// Creates the stage with default properties.
    pub fn new() -> Self {
        Self {
            base: ModifierBase::new("convert to lines", Properties::new()),
        }
    }
}

impl Default for ConvertLines {
    fn default() -> Self {
        Self::new()
    }
}

impl Modifier for ConvertLines {
    modifier_common!();

    fn execute(&self, buffer: &mut MeshBuffer) -> Result<(), ModifierError> {
        buffer.convert_to_lines();
        Ok(())
    }
}

/// Drops triangles and lines at random, reproducibly per seed.
#[derive(Debug, Clone, PartialEq)]
pub struct Remove {
    base: ModifierBase,
}

impl Remove {
    /// Registry class name.
    pub const CLASS: &'static str = "Remove";

    /// Creates the stage with default properties.
    pub fn new() -> Self {
        let mut props = Properties::new();
        props
            .define(
                "probability",
                "probability",
                "Chance of each primitive being removed",
                0.5,
            )
            .define("seed", "random seed", "Same seed, same selection", 1i64);
        props.set_range("probability", 0.0, 1.0);
        Self {
            base: ModifierBase::new("random removal", props),
        }
    }
}

impl Default for Remove {
    fn default() -> Self {
        Self::new()
    }
}

impl Modifier for Remove {
    modifier_common!();

    fn execute(&self, buffer: &mut MeshBuffer) -> Result<(), ModifierError> {
        let props = self.properties();
        let probability = props
            .get_float("probability")
            .map_err(|e| self.property_error(e))?;
        let seed = props.get_int("seed").map_err(|e| self.property_error(e))?;
        // Negative seeds keep their bit pattern
        buffer.remove_primitives_randomly(probability as f32, seed as u64);
        Ok(())
    }
}

/// Merges nearby vertices or gives every corner its own vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexGroup {
    base: ModifierBase,
}

impl VertexGroup {
    /// Registry class name.
    pub const CLASS: &'static str = "VertexGroup";

    /// Creates the stage with default properties.
    pub fn new() -> Self {
        let mut props = Properties::new();
        props
            .define(
                "group",
                "group",
                "Merge vertices closer than the threshold, or split all when off",
                true,
            )
            .define(
                "threshold",
                "threshold",
                "Distance below which vertices merge",
                DEFAULT_SHARE_THRESHOLD as f64,
            );
        props.set_range("threshold", MINIMUM_SHARE_THRESHOLD as f64, f64::MAX);
        Self {
            base: ModifierBase::new("vertex grouping", props),
        }
    }
}

impl Default for VertexGroup {
    fn default() -> Self {
        Self::new()
    }
}

impl Modifier for VertexGroup {
    modifier_common!();

    fn execute(&self, buffer: &mut MeshBuffer) -> Result<(), ModifierError> {
        let props = self.properties();
        let group = props.get_bool("group").map_err(|e| self.property_error(e))?;
        if group {
            let threshold = props
                .get_float("threshold")
                .map_err(|e| self.property_error(e))?;
            buffer.group_vertices(threshold as f32);
        } else {
            buffer.un_group_vertices();
        }
        Ok(())
    }
}
