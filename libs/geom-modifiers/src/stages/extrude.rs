//! Triangle extrusion stage.

use geom_buffer::{ExtrudeParams, MeshBuffer};
use glam::Vec3;

use crate::error::{ModifierError, PropertyError};
use crate::modifier::{modifier_common, Modifier, ModifierBase};
use crate::property::Properties;

/// Replaces the triangles with their extrusion.
///
/// The result is built in a buffer with the same sharing mode. With
/// `keep_original` the source triangles and lines are added first, so an
/// extruded shell closes against the original surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Extrude {
    base: ModifierBase,
}

impl Extrude {
    /// Registry class name.
    pub const CLASS: &'static str = "Extrude";

    /// Creates the stage with default properties.
    pub fn new() -> Self {
        let defaults = ExtrudeParams::default();
        let mut props = Properties::new();
        props
            .define(
                "constant",
                "constant",
                "Fixed offset along the face normal",
                defaults.constant as f64,
            )
            .define(
                "factor",
                "factor",
                "Offset per unit of triangle size",
                defaults.factor as f64,
            )
            .define(
                "shift_center",
                "shift center",
                "Pulls the extruded face toward its center, 0 to 1",
                defaults.shift_center as f64,
            )
            .define(
                "create_outer_faces",
                "create outer faces",
                "Emit side walls between original and extruded edges",
                defaults.create_outer_faces,
            )
            .define(
                "recognize_edges",
                "recognize edges",
                "Skip side walls between coplanar neighbors",
                defaults.recognize_edges,
            )
            .define(
                "keep_original",
                "keep original",
                "Keep the source primitives in the result",
                false,
            );
        props.set_range("shift_center", 0.0, 1.0);
        Self {
            base: ModifierBase::new("extrude", props),
        }
    }

    fn params(&self) -> Result<ExtrudeParams, PropertyError> {
        let props = self.properties();
        Ok(ExtrudeParams {
            constant: props.get_float("constant")? as f32,
            factor: props.get_float("factor")? as f32,
            shift_center: props.get_float("shift_center")? as f32,
            create_outer_faces: props.get_bool("create_outer_faces")?,
            recognize_edges: props.get_bool("recognize_edges")?,
        })
    }
}

impl Default for Extrude {
    fn default() -> Self {
        Self::new()
    }
}

impl Modifier for Extrude {
    modifier_common!();

    fn execute(&self, buffer: &mut MeshBuffer) -> Result<(), ModifierError> {
        let params = self.params().map_err(|e| self.property_error(e))?;
        let keep_original = self
            .properties()
            .get_bool("keep_original")
            .map_err(|e| self.property_error(e))?;

        let mut out = buffer.empty_like();
        if keep_original {
            out.add_geometry(buffer, Vec3::ZERO);
        }
        buffer.extrude_triangles(&mut out, &params);
        buffer.replace_geometry(out);
        Ok(())
    }
}
