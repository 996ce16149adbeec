//! # Modifier Trait
//!
//! The pipeline unit: a named transformation applied in place to a
//! [`MeshBuffer`], configured through a [`Properties`] bag.
//!
//! ## Record Layout
//!
//! ```text
//! "geommod" v1   enabled: bool, properties
//! <class> v<n>   stage header, version from Modifier::record_version
//! ```
//!
//! The base part is always written and read first, so the stage header can
//! gate version-specific handling.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use geom_buffer::{MeshBuffer, Progress};

use crate::error::{ModifierError, PropertyError, RecordError};
use crate::property::Properties;
use crate::record::{RecordReader, RecordWriter};

const BASE_TAG: &str = "geommod";
const BASE_VERSION: u32 = 1;

/// Process-unique identity of a modifier instance.
///
/// Chains address their modifiers by id. Clones get a fresh id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModifierId(u64);

impl ModifierId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ModifierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// =============================================================================
// BASE STATE
// =============================================================================

/// State every modifier carries.
#[derive(Debug)]
pub struct ModifierBase {
    id: ModifierId,
    label: &'static str,
    enabled: bool,
    properties: Properties,
    progress: Progress,
}

impl ModifierBase {
    /// Creates enabled base state with the given label and defaults.
    pub fn new(label: &'static str, properties: Properties) -> Self {
        Self {
            id: ModifierId::next(),
            label,
            enabled: true,
            properties,
            progress: Progress::new(),
        }
    }

    /// Identity of this instance.
    pub fn id(&self) -> ModifierId {
        self.id
    }

    /// Human readable name.
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Returns true if the chain should run this modifier.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Includes or skips this modifier on the next chain run.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Configuration values.
    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// Configuration values, for editing.
    pub fn properties_mut(&mut self) -> &mut Properties {
        &mut self.properties
    }

    /// Progress of the last or current run, `0..=100`.
    pub fn progress(&self) -> &Progress {
        &self.progress
    }
}

impl Clone for ModifierBase {
    /// Copies label, flag and properties; identity and progress are new.
    fn clone(&self) -> Self {
        Self {
            id: ModifierId::next(),
            label: self.label,
            enabled: self.enabled,
            properties: self.properties.clone(),
            progress: Progress::new(),
        }
    }
}

impl PartialEq for ModifierBase {
    /// Equal when enabled flag and property values match.
    fn eq(&self, other: &Self) -> bool {
        self.enabled == other.enabled && self.properties == other.properties
    }
}

// =============================================================================
// TRAIT
// =============================================================================

/// A mesh transformation stage.
///
/// Implementations keep their configuration in the base property bag, so
/// cloning and serialization need no per-stage code.
///
/// `execute` must be transactional: on error the buffer is unchanged.
pub trait Modifier: fmt::Debug + Send + Sync {
    /// Stable registry key, stored in chain files.
    fn class_name(&self) -> &'static str;

    /// Shared identity and configuration state.
    fn base(&self) -> &ModifierBase;

    /// Mutable access to the shared state.
    fn base_mut(&mut self) -> &mut ModifierBase;

    /// Transforms `buffer` in place.
    fn execute(&self, buffer: &mut MeshBuffer) -> Result<(), ModifierError>;

    /// Deep copy including property values, with a new identity.
    fn clone_boxed(&self) -> Box<dyn Modifier>;

    /// Fresh instance of the same class with default properties.
    fn new_boxed(&self) -> Box<dyn Modifier>;

    /// Version of this stage's record header.
    fn record_version(&self) -> u32 {
        1
    }

    // ----- provided -----

    /// Identity of this instance, see [`ModifierBase::id`].
    fn id(&self) -> ModifierId {
        self.base().id()
    }

    /// Human readable name.
    fn label(&self) -> &'static str {
        self.base().label()
    }

    /// Returns true if the chain should run this modifier.
    fn is_enabled(&self) -> bool {
        self.base().is_enabled()
    }

    /// Includes or skips this modifier on the next chain run.
    fn set_enabled(&mut self, enabled: bool) {
        self.base_mut().set_enabled(enabled);
    }

    /// Configuration values.
    fn properties(&self) -> &Properties {
        self.base().properties()
    }

    /// Configuration values, for editing.
    fn properties_mut(&mut self) -> &mut Properties {
        self.base_mut().properties_mut()
    }

    /// Wraps a property lookup failure with this stage's class name.
    fn property_error(&self, source: PropertyError) -> ModifierError {
        ModifierError::property(self.class_name(), source)
    }
}

impl PartialEq for dyn Modifier {
    fn eq(&self, other: &Self) -> bool {
        self.class_name() == other.class_name() && self.base() == other.base()
    }
}

/// Implements the boilerplate part of [`Modifier`] for a stage struct with
/// a `base: ModifierBase` field, a `CLASS` constant and a `new()`
/// constructor.
macro_rules! modifier_common {
    () => {
        fn class_name(&self) -> &'static str {
            Self::CLASS
        }

        fn base(&self) -> &$crate::modifier::ModifierBase {
            &self.base
        }

        fn base_mut(&mut self) -> &mut $crate::modifier::ModifierBase {
            &mut self.base
        }

        fn clone_boxed(&self) -> Box<dyn $crate::modifier::Modifier> {
            Box::new(self.clone())
        }

        fn new_boxed(&self) -> Box<dyn $crate::modifier::Modifier> {
            Box::new(Self::new())
        }
    };
}
pub(crate) use modifier_common;

// =============================================================================
// SERIALIZATION
// =============================================================================

/// Writes base state, then the stage header.
pub fn serialize_modifier(
    modifier: &dyn Modifier,
    writer: &mut RecordWriter,
) -> Result<(), RecordError> {
    writer.write_header(BASE_TAG, BASE_VERSION)?;
    writer.write(&modifier.is_enabled())?;
    modifier.properties().serialize(writer)?;
    writer.write_header(modifier.class_name(), modifier.record_version())
}

/// Reads base state, then the stage header, into an existing instance.
///
/// # Returns
///
/// The stored stage version.
pub fn deserialize_modifier(
    modifier: &mut dyn Modifier,
    reader: &mut RecordReader<'_>,
) -> Result<u32, RecordError> {
    reader.read_header(BASE_TAG, BASE_VERSION)?;
    let enabled: bool = reader.read()?;
    modifier.set_enabled(enabled);
    modifier.properties_mut().deserialize(reader)?;
    let class = modifier.class_name();
    let version = modifier.record_version();
    reader.read_header(class, version)
}
