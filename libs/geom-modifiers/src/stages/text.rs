//! Text-to-lines stage.

use geom_buffer::MeshBuffer;
use glam::{Vec3, Vec4};

use crate::error::{ModifierError, PropertyError};
use crate::modifier::{modifier_common, Modifier, ModifierBase};
use crate::property::Properties;

/// Appends text drawn with the built-in line font.
///
/// The first glyph starts at the origin; rows run down along -y. The
/// buffer's pen is restored afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    base: ModifierBase,
}

impl Text {
    /// Registry class name.
    pub const CLASS: &'static str = "Text";

    /// Creates the stage with default properties.
    pub fn new() -> Self {
        let mut props = Properties::new();
        props
            .define("text", "text", "Characters to draw, newline starts a row", "text")
            .define("size", "size", "Glyph height", 1.0)
            .define(
                "color",
                "color",
                "Line color as red, green, blue, alpha",
                vec![1.0, 1.0, 1.0, 1.0],
            );
        Self {
            base: ModifierBase::new("text", props),
        }
    }

    fn color(&self) -> Result<Vec4, PropertyError> {
        let values = self.properties().get_floats("color")?;
        let channel = |k: usize| values.get(k).copied().unwrap_or(1.0) as f32;
        Ok(Vec4::new(channel(0), channel(1), channel(2), channel(3)))
    }
}

impl Default for Text {
    fn default() -> Self {
        Self::new()
    }
}

impl Modifier for Text {
    modifier_common!();

    fn execute(&self, buffer: &mut MeshBuffer) -> Result<(), ModifierError> {
        let props = self.properties();
        let text = props.get_text("text").map_err(|e| self.property_error(e))?;
        let size = props.get_float("size").map_err(|e| self.property_error(e))?;
        let color = self.color().map_err(|e| self.property_error(e))?;

        let pen = *buffer.pen();
        buffer.set_color(color);
        let lines = buffer.add_text(text, Vec3::ZERO, size as f32);
        buffer.set_pen(pen);
        log::debug!("text stage drew {} lines", lines);
        Ok(())
    }
}
