//! # Modifier Chain
//!
//! Ordered, owned sequence of stages applied one after another to a single
//! buffer.
//!
//! ## Editing
//!
//! Stages are addressed by [`ModifierId`]. Operations on an id that is not
//! in the chain do nothing and report failure (`false` or `None`).
//!
//! ## File Layout
//!
//! ```text
//! "geommodchain" v1
//! count: u32
//! count × { class: string, block: u64 length + stage record }
//! ```
//!
//! A stage whose class is not registered is skipped by its block length and
//! loading continues. Known stages are read from their block and the reader
//! then moves to the block end, so fields appended by newer builds are
//! ignored.

use config::constants::PROGRESS_MAX;
use geom_buffer::{MeshBuffer, Progress};

use crate::error::{ModifierError, RecordError};
use crate::modifier::{deserialize_modifier, serialize_modifier, Modifier, ModifierId};
use crate::record::{RecordReader, RecordWriter};
use crate::registry;

const CHAIN_TAG: &str = "geommodchain";
const CHAIN_VERSION: u32 = 1;

/// Ordered pipeline of modifiers.
///
/// # Example
///
/// ```rust
/// use geom_buffer::MeshBuffer;
/// use geom_modifiers::ModifierChain;
/// use glam::Vec3;
///
/// let mut chain = ModifierChain::new();
/// chain.add_by_name("Tesselate").unwrap();
/// chain.add_by_name("Normals").unwrap();
///
/// let mut buffer = MeshBuffer::new();
/// let a = buffer.add_vertex_at(Vec3::ZERO);
/// let b = buffer.add_vertex_at(Vec3::X);
/// let c = buffer.add_vertex_at(Vec3::Y);
/// buffer.add_triangle(a, b, c);
///
/// chain.execute(&mut buffer).unwrap();
/// assert_eq!(buffer.num_triangles(), 4);
/// ```
#[derive(Debug, Default)]
pub struct ModifierChain {
    modifiers: Vec<Box<dyn Modifier>>,
    progress: Progress,
}

impl Clone for ModifierChain {
    /// Deep copy; every stage gets a new id.
    fn clone(&self) -> Self {
        Self {
            modifiers: self.modifiers.iter().map(|m| m.clone_boxed()).collect(),
            progress: Progress::new(),
        }
    }
}

impl PartialEq for ModifierChain {
    /// Equal when both hold the same classes in the same order with equal
    /// enabled flags and property values.
    fn eq(&self, other: &Self) -> bool {
        self.modifiers.len() == other.modifiers.len()
            && self
                .modifiers
                .iter()
                .zip(&other.modifiers)
                .all(|(a, b)| **a == **b)
    }
}

impl ModifierChain {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stages.
    pub fn len(&self) -> usize {
        self.modifiers.len()
    }

    /// Returns true if the chain has no stages.
    pub fn is_empty(&self) -> bool {
        self.modifiers.is_empty()
    }

    /// Removes every stage.
    pub fn clear(&mut self) {
        self.modifiers.clear();
    }

    /// Stages in execution order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Modifier> {
        self.modifiers.iter().map(|m| m.as_ref())
    }

    /// Stage ids in execution order.
    pub fn ids(&self) -> Vec<ModifierId> {
        self.modifiers.iter().map(|m| m.id()).collect()
    }

    /// Position of stage `id`.
    pub fn index_of(&self, id: ModifierId) -> Option<usize> {
        self.modifiers.iter().position(|m| m.id() == id)
    }

    /// Stage `id`, if it is in this chain.
    pub fn get(&self, id: ModifierId) -> Option<&dyn Modifier> {
        self.index_of(id).map(|i| self.modifiers[i].as_ref())
    }

    /// Stage `id` for editing, if it is in this chain.
    pub fn get_mut(&mut self, id: ModifierId) -> Option<&mut (dyn Modifier + 'static)> {
        let i = self.index_of(id)?;
        Some(self.modifiers[i].as_mut())
    }

    /// Overall progress of [`ModifierChain::execute`], `0..=100`.
    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    // =========================================================================
    // EDITING
    // =========================================================================

    /// Appends a stage.
    pub fn add(&mut self, modifier: Box<dyn Modifier>) -> ModifierId {
        let id = modifier.id();
        self.modifiers.push(modifier);
        id
    }

    /// Inserts a stage at `index`, clamped to the chain length.
    pub fn insert_at(&mut self, index: usize, modifier: Box<dyn Modifier>) -> ModifierId {
        let id = modifier.id();
        self.modifiers.insert(index.min(self.modifiers.len()), modifier);
        id
    }

    /// Appends a new stage of `class_name`.
    ///
    /// # Returns
    ///
    /// The new stage's id, or `None` (with a warning) for an unknown class.
    pub fn add_by_name(&mut self, class_name: &str) -> Option<ModifierId> {
        let modifier = Self::create(class_name)?;
        Some(self.add(modifier))
    }

    /// Inserts a new stage of `class_name` in front of stage `before`.
    ///
    /// Appends if `before` is not in the chain.
    pub fn insert_by_name(&mut self, class_name: &str, before: ModifierId) -> Option<ModifierId> {
        let modifier = Self::create(class_name)?;
        let index = self.index_of(before).unwrap_or(self.modifiers.len());
        Some(self.insert_at(index, modifier))
    }

    fn create(class_name: &str) -> Option<Box<dyn Modifier>> {
        let modifier = registry::create(class_name);
        if modifier.is_none() {
            log::warn!("request for unknown modifier class '{}'", class_name);
        }
        modifier
    }

    /// Moves stage `id` one place toward the front.
    ///
    /// Returns false if it is absent or already first.
    pub fn move_up(&mut self, id: ModifierId) -> bool {
        match self.index_of(id) {
            Some(i) if i > 0 => {
                self.modifiers.swap(i, i - 1);
                true
            }
            _ => false,
        }
    }

    /// Moves stage `id` one place toward the back.
    ///
    /// Returns false if it is absent or already last.
    pub fn move_down(&mut self, id: ModifierId) -> bool {
        match self.index_of(id) {
            Some(i) if i + 1 < self.modifiers.len() => {
                self.modifiers.swap(i, i + 1);
                true
            }
            _ => false,
        }
    }

    /// Removes stage `id` and returns it.
    pub fn remove(&mut self, id: ModifierId) -> Option<Box<dyn Modifier>> {
        let i = self.index_of(id)?;
        Some(self.modifiers.remove(i))
    }

    // =========================================================================
    // EXECUTION
    // =========================================================================

    /// Applies every enabled stage in order.
    ///
    /// # Errors
    ///
    /// The first stage failure. Stages before it have been applied; the
    /// failing stage left the buffer as it found it; later stages did not
    /// run.
    pub fn execute(&self, buffer: &mut MeshBuffer) -> Result<(), ModifierError> {
        let enabled: Vec<&dyn Modifier> = self.iter().filter(|m| m.is_enabled()).collect();
        let total = enabled.len();
        self.progress.reset();

        for (done, modifier) in enabled.into_iter().enumerate() {
            log::debug!(
                "running modifier {} '{}' on {}",
                modifier.id(),
                modifier.class_name(),
                buffer.info_string()
            );
            let stage_progress = modifier.base().progress();
            stage_progress.reset();
            buffer.progress().reset();
            modifier.execute(buffer)?;
            stage_progress.set(PROGRESS_MAX);
            self.progress.set_fraction(done + 1, total);
        }

        self.progress.set(PROGRESS_MAX);
        Ok(())
    }

    // =========================================================================
    // SERIALIZATION
    // =========================================================================

    /// Writes the chain.
    pub fn serialize(&self, writer: &mut RecordWriter) -> Result<(), RecordError> {
        writer.write_header(CHAIN_TAG, CHAIN_VERSION)?;
        writer.write(&(self.modifiers.len() as u32))?;
        for modifier in &self.modifiers {
            writer.write(modifier.class_name())?;
            let block = writer.begin_block();
            serialize_modifier(modifier.as_ref(), writer)?;
            writer.end_block(block);
        }
        Ok(())
    }

    /// Reads a chain, replacing the current stages.
    ///
    /// On error the chain is left unchanged.
    pub fn deserialize(&mut self, reader: &mut RecordReader<'_>) -> Result<(), RecordError> {
        reader.read_header(CHAIN_TAG, CHAIN_VERSION)?;
        let count: u32 = reader.read()?;
        // Every entry takes at least a class name and a block length
        let mut modifiers = Vec::with_capacity((count as usize).min(reader.remaining() / 16));

        for _ in 0..count {
            let class_name: String = reader.read()?;
            let length = reader.read_block_len()?;
            let end = reader.position() + length as usize;

            let Some(mut modifier) = registry::create(&class_name) else {
                log::warn!("skipped unknown modifier '{}' ({} bytes)", class_name, length);
                reader.skip(length)?;
                continue;
            };

            let version = deserialize_modifier(modifier.as_mut(), reader)?;
            if reader.position() > end {
                return Err(RecordError::Truncated {
                    needed: (reader.position() - end) as u64,
                    available: 0,
                });
            }
            reader.seek(end)?;
            log::debug!("loaded modifier '{}' v{}", class_name, version);
            modifiers.push(modifier);
        }

        self.modifiers = modifiers;
        Ok(())
    }

    /// Serializes into a new byte vector.
    pub fn to_bytes(&self) -> Result<Vec<u8>, RecordError> {
        let mut writer = RecordWriter::new();
        self.serialize(&mut writer)?;
        Ok(writer.into_bytes())
    }

    /// Reads a chain from bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, RecordError> {
        let mut chain = Self::new();
        chain.deserialize(&mut RecordReader::new(bytes))?;
        Ok(chain)
    }
}
