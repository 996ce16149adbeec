//! Subdivision stages.

use config::constants::{clamp_tesselation_level, MAX_TESSELATION_LEVEL};
use geom_buffer::MeshBuffer;

use crate::error::ModifierError;
use crate::modifier::{modifier_common, Modifier, ModifierBase};
use crate::property::Properties;

fn level_properties(tip: &str) -> Properties {
    let mut props = Properties::new();
    props.define("level", "level", tip, 1i64);
    props.set_range("level", 1.0, MAX_TESSELATION_LEVEL as f64);
    props
}

/// Splits every triangle into four, `level` times.
#[derive(Debug, Clone, PartialEq)]
pub struct Tesselate {
    base: ModifierBase,
}

impl Tesselate {
    /// Registry class name.
    pub const CLASS: &'static str = "Tesselate";

    /// Creates the stage with default properties.
    pub fn new() -> Self {
        Self {
            base: ModifierBase::new(
                "tesselate",
                level_properties("Number of 1-to-4 triangle subdivision passes"),
            ),
        }
    }
}

impl Default for Tesselate {
    fn default() -> Self {
        Self::new()
    }
}

impl Modifier for Tesselate {
    modifier_common!();

    fn execute(&self, buffer: &mut MeshBuffer) -> Result<(), ModifierError> {
        let level = self
            .properties()
            .get_int("level")
            .map_err(|e| self.property_error(e))?;
        buffer.tesselate(clamp_tesselation_level(level));
        Ok(())
    }
}

/// Splits every line into `2^level` segments.
#[derive(Debug, Clone, PartialEq)]
pub struct TesselateLines {
    base: ModifierBase,
}

impl TesselateLines {
    /// Registry class name.
    pub const CLASS: &'static str = "TesselateLines";

    /// Creates the stage with default properties.
    pub fn new() -> Self {
        Self {
            base: ModifierBase::new(
                "tesselate lines",
                level_properties("Number of line halving passes"),
            ),
        }
    }
}

impl Default for TesselateLines {
    fn default() -> Self {
        Self::new()
    }
}

impl Modifier for TesselateLines {
    modifier_common!();

    fn execute(&self, buffer: &mut MeshBuffer) -> Result<(), ModifierError> {
        let level = self
            .properties()
            .get_int("level")
            .map_err(|e| self.property_error(e))?;
        buffer.tesselate_lines(clamp_tesselation_level(level));
        Ok(())
    }
}
