//! # Geometry Modifiers
//!
//! Ordered pipeline of composable mesh transformation stages.
//!
//! ## Architecture
//!
//! ```text
//! registry (class name → prototype)
//!     ↓ create
//! ModifierChain [stage, stage, ...] → execute(&mut MeshBuffer)
//!     ↓ serialize
//! record (tag + version headers, length-prefixed blocks)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use geom_modifiers::{Modifier, ModifierChain};
//!
//! let mut chain = ModifierChain::new();
//! let id = chain.add_by_name("Extrude").unwrap();
//! chain
//!     .get_mut(id)
//!     .unwrap()
//!     .properties_mut()
//!     .change("recognize_edges", true)
//!     .unwrap();
//!
//! let bytes = chain.to_bytes().unwrap();
//! assert_eq!(ModifierChain::from_bytes(&bytes).unwrap(), chain);
//! ```

pub mod chain;
pub mod error;
pub mod modifier;
pub mod property;
pub mod record;
pub mod registry;
pub mod stages;

pub use chain::ModifierChain;
pub use error::{ModifierError, PropertyError, RecordError};
pub use modifier::{deserialize_modifier, serialize_modifier, Modifier, ModifierBase, ModifierId};
pub use property::{Properties, Property, PropertyValue};
pub use record::{RecordReader, RecordWriter};
