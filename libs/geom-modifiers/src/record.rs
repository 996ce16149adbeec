//! # Binary Records
//!
//! Versioned, length-prefixed records on top of `bincode`.
//!
//! ## Layout
//!
//! ```text
//! header  = tag: string, version: u32
//! block   = length: u64, payload: [u8; length]
//! ```
//!
//! Values are `bincode` 1.x encoded (little endian, fixed width integers,
//! strings as `u64` length + UTF-8). Decoding is limited to the bytes left
//! in the input, so a corrupt length fails instead of allocating. A block's length is patched in after
//! its payload is written, so readers can always skip a block without
//! understanding its content.
//!
//! ## Example
//!
//! ```rust
//! use geom_modifiers::record::{RecordReader, RecordWriter};
//!
//! let mut writer = RecordWriter::new();
//! writer.write_header("demo", 2).unwrap();
//! let block = writer.begin_block();
//! writer.write(&42u32).unwrap();
//! writer.end_block(block);
//! let bytes = writer.into_bytes();
//!
//! let mut reader = RecordReader::new(&bytes);
//! assert_eq!(reader.read_header("demo", 2).unwrap(), 2);
//! let length = reader.read_block_len().unwrap();
//! reader.skip(length).unwrap();
//! assert!(reader.is_at_end());
//! ```

use bincode::Options;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::RecordError;

/// Encoding shared by writer and reader.
fn codec() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .allow_trailing_bytes()
}

// =============================================================================
// WRITER
// =============================================================================

/// Handle of an open block, returned by [`RecordWriter::begin_block`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "an open block must be closed with end_block"]
pub struct BlockStart(usize);

/// Appends records to an in-memory byte buffer.
#[derive(Debug, Default)]
pub struct RecordWriter {
    bytes: Vec<u8>,
}

impl RecordWriter {
    /// Creates an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Encodes one value.
    pub fn write<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), RecordError> {
        codec().serialize_into(&mut self.bytes, value)?;
        Ok(())
    }

    /// Writes a `tag` + `version` header.
    pub fn write_header(&mut self, tag: &str, version: u32) -> Result<(), RecordError> {
        self.write(tag)?;
        self.write(&version)
    }

    /// Reserves the length prefix of a block.
    pub fn begin_block(&mut self) -> BlockStart {
        let start = self.bytes.len();
        self.bytes.extend_from_slice(&0u64.to_le_bytes());
        BlockStart(start)
    }

    /// Patches the length prefix of `block` with the bytes written since.
    pub fn end_block(&mut self, block: BlockStart) {
        let payload = (self.bytes.len() - block.0 - 8) as u64;
        self.bytes[block.0..block.0 + 8].copy_from_slice(&payload.to_le_bytes());
    }

    /// Bytes written so far.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if nothing was written.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Finishes writing.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

// =============================================================================
// READER
// =============================================================================

/// Reads records from a byte slice.
#[derive(Debug, Clone)]
pub struct RecordReader<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> RecordReader<'a> {
    /// Creates a reader positioned at the start of `bytes`.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    /// Decodes one value.
    ///
    /// # Errors
    ///
    /// [`RecordError::Codec`] for malformed data, including lengths that
    /// claim more bytes than remain.
    pub fn read<T: DeserializeOwned>(&mut self) -> Result<T, RecordError> {
        let mut rest = &self.bytes[self.position..];
        let value = codec()
            .with_limit(rest.len() as u64)
            .deserialize_from(&mut rest)?;
        self.position = self.bytes.len() - rest.len();
        Ok(value)
    }

    /// Reads a header and checks it.
    ///
    /// # Returns
    ///
    /// The stored version, at most `max_version`.
    ///
    /// # Errors
    ///
    /// [`RecordError::TagMismatch`] if the tag differs,
    /// [`RecordError::VersionTooNew`] if the version is above `max_version`.
    pub fn read_header(&mut self, tag: &str, max_version: u32) -> Result<u32, RecordError> {
        let found: String = self.read()?;
        if found != tag {
            return Err(RecordError::tag_mismatch(tag, found));
        }
        let version: u32 = self.read()?;
        if version > max_version {
            return Err(RecordError::VersionTooNew {
                tag: found,
                version,
                supported: max_version,
            });
        }
        Ok(version)
    }

    /// Reads a block length prefix and checks it against the remaining data.
    pub fn read_block_len(&mut self) -> Result<u64, RecordError> {
        let length: u64 = self.read()?;
        self.check_available(length)?;
        Ok(length)
    }

    /// Skips `length` bytes.
    pub fn skip(&mut self, length: u64) -> Result<(), RecordError> {
        self.check_available(length)?;
        self.position += length as usize;
        Ok(())
    }

    /// Current byte offset.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Moves to byte offset `position`, which may not lie past the end.
    pub fn seek(&mut self, position: usize) -> Result<(), RecordError> {
        if position > self.bytes.len() {
            return Err(RecordError::Truncated {
                needed: (position - self.position) as u64,
                available: self.remaining(),
            });
        }
        self.position = position;
        Ok(())
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.position
    }

    /// Returns true if every byte was consumed.
    pub fn is_at_end(&self) -> bool {
        self.remaining() == 0
    }

    fn check_available(&self, length: u64) -> Result<(), RecordError> {
        if length > self.remaining() as u64 {
            return Err(RecordError::Truncated {
                needed: length,
                available: self.remaining(),
            });
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
