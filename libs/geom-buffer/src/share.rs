//! # Vertex Share Index
//!
//! Quantized spatial hash used to merge near-coincident vertices.
//!
//! ## Key Layout
//!
//! Each coordinate is quantized to the grid cell `floor(coord / threshold)`.
//! The signed cell index is biased by `2^(SHARE_KEY_BITS - 1)` and packed
//! into `SHARE_KEY_BITS` bits per axis:
//!
//! ```text
//! bit 63 | 62 ........ 42 | 41 ........ 21 | 20 ......... 0
//!   0    |     cell z     |     cell y     |     cell x
//! ```
//!
//! The representable range per axis is therefore
//! `[-2^20 * threshold, 2^20 * threshold)`. Positions outside that range
//! (and non-finite positions) get no key and are never shared.
//!
//! ## Matching
//!
//! A lookup probes the position's own cell and its 26 neighbors and picks
//! the closest registered vertex whose Euclidean distance is at most the
//! threshold. Two positions within the threshold of each other therefore
//! always match, even across a cell boundary.

use std::collections::HashMap;

use config::constants::{clip_share_threshold, share_cell_limit, SHARE_KEY_BITS};
use glam::Vec3;

// =============================================================================
// CELL COORDINATE
// =============================================================================

/// Signed grid cell of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CellCoord {
    x: i64,
    y: i64,
    z: i64,
}

impl CellCoord {
    /// Quantizes a position, or `None` when it is out of range.
    fn from_position(position: Vec3, threshold: f32) -> Option<Self> {
        let quantize = |v: f32| -> Option<i64> {
            let cell = (v as f64 / threshold as f64).floor();
            let limit = share_cell_limit() as f64;
            (cell.is_finite() && cell >= -limit && cell < limit).then_some(cell as i64)
        };
        Some(Self {
            x: quantize(position.x)?,
            y: quantize(position.y)?,
            z: quantize(position.z)?,
        })
    }

    /// Packs the cell into a key, or `None` when it is out of range.
    fn key(self) -> Option<u64> {
        let limit = share_cell_limit();
        let mask = (1u64 << SHARE_KEY_BITS) - 1;
        let axis = |c: i64| -> Option<u64> {
            (-limit..limit).contains(&c).then(|| ((c + limit) as u64) & mask)
        };
        Some(axis(self.x)? | (axis(self.y)? << SHARE_KEY_BITS) | (axis(self.z)? << (2 * SHARE_KEY_BITS)))
    }

    /// This cell and its 26 neighbors, skipping those out of range.
    fn neighborhood(self) -> impl Iterator<Item = u64> {
        (-1..=1).flat_map(move |dz| {
            (-1..=1).flat_map(move |dy| {
                (-1..=1).filter_map(move |dx| {
                    CellCoord {
                        x: self.x + dx,
                        y: self.y + dy,
                        z: self.z + dz,
                    }
                    .key()
                })
            })
        })
    }
}

// =============================================================================
// SHARE INDEX
// =============================================================================

/// A registered vertex and how many adds have been merged into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ShareEntry {
    index: u32,
    count: u32,
}

/// Location of a matched entry, used to bump its sample count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShareHit {
    /// Matched vertex index.
    pub index: u32,
    key: u64,
    slot: usize,
}

/// Spatial hash from quantized position to `(vertex index, sample count)`.
///
/// The index does not own positions; lookups compare against the caller's
/// flat position array.
///
/// # Example
///
/// ```rust
/// use geom_buffer::VertexShareIndex;
/// use glam::Vec3;
///
/// let mut index = VertexShareIndex::new(0.01);
/// let positions = vec![1.0, 2.0, 3.0];
/// index.insert(Vec3::new(1.0, 2.0, 3.0), 0);
///
/// let hit = index.find(Vec3::new(1.004, 2.0, 3.0), &positions).unwrap();
/// assert_eq!(hit.index, 0);
/// ```
#[derive(Debug, Clone)]
pub struct VertexShareIndex {
    threshold: f32,
    cells: HashMap<u64, Vec<ShareEntry>>,
    len: usize,
}

impl VertexShareIndex {
    /// Creates an empty index. The threshold is clipped to the minimum.
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold: clip_share_threshold(threshold),
            cells: HashMap::new(),
            len: 0,
        }
    }

    /// Effective merge distance.
    #[inline]
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Number of registered vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if nothing is registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Removes every entry. The threshold is kept.
    pub fn clear(&mut self) {
        self.cells.clear();
        self.len = 0;
    }

    /// Returns true if `position` can be registered at this threshold.
    pub fn in_range(&self, position: Vec3) -> bool {
        CellCoord::from_position(position, self.threshold).is_some()
    }

    /// Finds the closest registered vertex within the threshold.
    ///
    /// # Arguments
    ///
    /// * `position` - Query position
    /// * `positions` - Flat `xyz` array the registered indices refer to
    pub fn find(&self, position: Vec3, positions: &[f32]) -> Option<ShareHit> {
        let cell = CellCoord::from_position(position, self.threshold)?;
        let mut best: Option<(f32, ShareHit)> = None;

        for key in cell.neighborhood() {
            let Some(entries) = self.cells.get(&key) else {
                continue;
            };
            for (slot, entry) in entries.iter().enumerate() {
                let Some(stored) = read_position(positions, entry.index) else {
                    continue;
                };
                let distance = stored.distance(position);
                if distance > self.threshold {
                    continue;
                }
                if best.map_or(true, |(d, _)| distance < d) {
                    best = Some((
                        distance,
                        ShareHit {
                            index: entry.index,
                            key,
                            slot,
                        },
                    ));
                }
            }
        }

        best.map(|(_, hit)| hit)
    }

    /// Records one more merged sample for a hit.
    ///
    /// # Returns
    ///
    /// The new sample count (at least 2).
    pub fn record_hit(&mut self, hit: ShareHit) -> u32 {
        match self.cells.get_mut(&hit.key).and_then(|e| e.get_mut(hit.slot)) {
            Some(entry) => {
                entry.count = entry.count.saturating_add(1);
                entry.count
            }
            None => 1,
        }
    }

    /// Registers a new vertex with a sample count of one.
    ///
    /// # Returns
    ///
    /// `false` if the position is out of range and was not registered.
    pub fn insert(&mut self, position: Vec3, index: u32) -> bool {
        self.insert_with_count(position, index, 1)
    }

    fn insert_with_count(&mut self, position: Vec3, index: u32, count: u32) -> bool {
        let Some(key) = CellCoord::from_position(position, self.threshold).and_then(CellCoord::key)
        else {
            return false;
        };
        self.cells.entry(key).or_default().push(ShareEntry { index, count });
        self.len += 1;
        true
    }

    /// Rebuilds every key from current positions.
    ///
    /// Registered vertices keep their sample counts; unregistered ones stay
    /// unregistered. Used after positions move or the threshold changes.
    pub fn rekey(&mut self, positions: &[f32], threshold: f32) {
        let mut entries: Vec<ShareEntry> = self.cells.drain().flat_map(|(_, e)| e).collect();
        self.threshold = clip_share_threshold(threshold);
        self.len = 0;

        entries.sort_unstable_by_key(|e| e.index);
        for entry in entries {
            if let Some(position) = read_position(positions, entry.index) {
                self.insert_with_count(position, entry.index, entry.count);
            }
        }
    }

    /// Moves one registered vertex from `old` to `new`.
    pub fn relocate(&mut self, index: u32, old: Vec3, new: Vec3) {
        let Some(key) = CellCoord::from_position(old, self.threshold).and_then(CellCoord::key) else {
            return;
        };
        let Some(entries) = self.cells.get_mut(&key) else {
            return;
        };
        let Some(slot) = entries.iter().position(|e| e.index == index) else {
            return;
        };
        let entry = entries.swap_remove(slot);
        if entries.is_empty() {
            self.cells.remove(&key);
        }
        self.len -= 1;
        self.insert_with_count(new, index, entry.count);
    }
}

/// Reads position `index` from a flat `xyz` array.
#[inline]
fn read_position(positions: &[f32], index: u32) -> Option<Vec3> {
    let i = index as usize * 3;
    positions.get(i..i + 3).map(Vec3::from_slice)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use config::constants::MINIMUM_SHARE_THRESHOLD;

    fn flat(points: &[Vec3]) -> Vec<f32> {
        points.iter().flat_map(|p| p.to_array()).collect()
    }

    #[test]
    fn test_threshold_is_clipped() {
        assert_eq!(VertexShareIndex::new(0.0).threshold(), MINIMUM_SHARE_THRESHOLD);
    }

    #[test]
    fn test_match_across_cell_boundary() {
        let a = Vec3::new(0.0099, 0.0, 0.0);
        let b = Vec3::new(0.0101, 0.0, 0.0);
        let positions = flat(&[a]);
        let mut index = VertexShareIndex::new(0.01);
        assert!(index.insert(a, 0));
        assert_eq!(index.find(b, &positions).map(|h| h.index), Some(0));
    }

    #[test]
    fn test_no_match_beyond_threshold() {
        let a = Vec3::ZERO;
        let positions = flat(&[a]);
        let mut index = VertexShareIndex::new(0.01);
        index.insert(a, 0);
        assert!(index.find(Vec3::new(0.011, 0.0, 0.0), &positions).is_none());
    }

    #[test]
    fn test_closest_entry_wins() {
        let a = Vec3::ZERO;
        let b = Vec3::new(0.015, 0.0, 0.0);
        let positions = flat(&[a, b]);
        let mut index = VertexShareIndex::new(0.01);
        index.insert(a, 0);
        index.insert(b, 1);
        let hit = index.find(Vec3::new(0.009, 0.0, 0.0), &positions).unwrap();
        assert_eq!(hit.index, 1);
    }

    #[test]
    fn test_out_of_range_is_not_registered() {
        let mut index = VertexShareIndex::new(0.001);
        let far = Vec3::new(5000.0, 0.0, 0.0);
        assert!(!index.in_range(far));
        assert!(!index.insert(far, 0));
        assert!(!index.insert(Vec3::new(f32::NAN, 0.0, 0.0), 0));
        assert!(index.is_empty());
    }

    #[test]
    fn test_record_hit_counts() {
        let mut index = VertexShareIndex::new(0.01);
        let positions = flat(&[Vec3::ONE]);
        index.insert(Vec3::ONE, 0);
        let hit = index.find(Vec3::ONE, &positions).unwrap();
        assert_eq!(index.record_hit(hit), 2);
        assert_eq!(index.record_hit(hit), 3);
    }

    #[test]
    fn test_rekey_follows_moved_positions() {
        let mut index = VertexShareIndex::new(0.01);
        index.insert(Vec3::ZERO, 0);
        let moved = flat(&[Vec3::new(10.0, 0.0, 0.0)]);
        index.rekey(&moved, 0.01);
        assert_eq!(index.len(), 1);
        assert!(index.find(Vec3::ZERO, &moved).is_none());
        assert_eq!(index.find(Vec3::new(10.0, 0.0, 0.0), &moved).map(|h| h.index), Some(0));
    }

    #[test]
    fn test_relocate_single_vertex() {
        let mut index = VertexShareIndex::new(0.01);
        index.insert(Vec3::ZERO, 0);
        let new = Vec3::new(1.0, 1.0, 1.0);
        index.relocate(0, Vec3::ZERO, new);
        let positions = flat(&[new]);
        assert_eq!(index.len(), 1);
        assert_eq!(index.find(new, &positions).map(|h| h.index), Some(0));
    }

    #[test]
    fn test_keys_are_distinct_per_axis() {
        let a = CellCoord { x: 1, y: 0, z: 0 }.key();
        let b = CellCoord { x: 0, y: 1, z: 0 }.key();
        let c = CellCoord { x: 0, y: 0, z: 1 }.key();
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_ne!(a, c);
        assert!(CellCoord { x: -1, y: -1, z: -1 }.key().unwrap() < 1 << 63);
    }
}
