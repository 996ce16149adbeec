//! # Built-in Stages
//!
//! Every stage the registry knows at startup.
//!
//! | Class | Operation |
//! |-------|-----------|
//! | `Tesselate` | [`MeshBuffer::tesselate`](geom_buffer::MeshBuffer::tesselate) |
//! | `TesselateLines` | line subdivision |
//! | `Extrude` | triangle extrusion, replaces the buffer |
//! | `Normals` | smooth normals and/or inversion |
//! | `Normalize` | pull toward a sphere |
//! | `ConvertLines` | triangles to edge lines |
//! | `Remove` | seeded random removal |
//! | `VertexGroup` | merge or split vertices |
//! | `VertexEquation` | per-vertex equations |
//! | `PrimitiveEquation` | per-corner equations |
//! | `TexCoordEquation` | texture coordinate equations |
//! | `Translate`, `Scale`, `Rotate` | affine transforms |
//! | `Text` | line font text |
//! | `Script` | external script host |

pub mod equation;
pub mod extrude;
pub mod normals;
pub mod script;
pub mod tesselate;
pub mod text;
pub mod topology;
pub mod transform;

pub use equation::{PrimitiveEquation, TexCoordEquation, VertexEquation};
pub use extrude::Extrude;
pub use normals::{Normalize, Normals};
pub use script::{script_host, set_script_host, Script, ScriptHost};
pub use tesselate::{Tesselate, TesselateLines};
pub use text::Text;
pub use topology::{ConvertLines, Remove, VertexGroup};
pub use transform::{Rotate, Scale, Translate};

use crate::modifier::Modifier;

/// One prototype of every built-in stage.
pub fn builtin() -> Vec<Box<dyn Modifier>> {
    vec![
        Box::new(Tesselate::new()),
        Box::new(TesselateLines::new()),
        Box::new(Extrude::new()),
        Box::new(Normals::new()),
        Box::new(Normalize::new()),
        Box::new(ConvertLines::new()),
        Box::new(Remove::new()),
        Box::new(VertexGroup::new()),
        Box::new(VertexEquation::new()),
        Box::new(PrimitiveEquation::new()),
        Box::new(TexCoordEquation::new()),
        Box::new(Translate::new()),
        Box::new(Scale::new()),
        Box::new(Rotate::new()),
        Box::new(Text::new()),
        Box::new(Script::new()),
    ]
}

#[cfg(test)]
mod tests;
