//! # Configuration Constants
//!
//! Centralized constants for the geometry modifier pipeline. Vertex sharing,
//! adjacency tolerances, pen defaults and stage limits are defined here.
//!
//! ## Categories
//!
//! - **Vertex Sharing**: Share threshold limits and spatial key layout
//! - **Precision**: Tolerances for degenerate and coplanar tests
//! - **Pen**: Default ambient vertex attributes
//! - **Limits**: Upper bounds for expensive stages

// =============================================================================
// VERTEX SHARING CONSTANTS
// =============================================================================

/// Smallest allowed threshold for vertex sharing.
///
/// Thresholds passed to `set_shared_vertices` are clipped to this value so
/// the grid cell count per axis stays within the key's bit width.
///
/// # Example
///
/// ```rust
/// use config::constants::MINIMUM_SHARE_THRESHOLD;
///
/// let requested: f32 = 0.0;
/// let threshold = requested.max(MINIMUM_SHARE_THRESHOLD);
/// assert_eq!(threshold, MINIMUM_SHARE_THRESHOLD);
/// ```
pub const MINIMUM_SHARE_THRESHOLD: f32 = 0.001;

/// Threshold used when sharing is enabled without an explicit value.
pub const DEFAULT_SHARE_THRESHOLD: f32 = 0.001;

/// Number of bits per axis in a packed vertex share key.
///
/// Three axes of 21 bits fit into a 63-bit key. Each axis stores the signed
/// grid cell `floor(coord / threshold)` biased by `2^20`, so the representable
/// coordinate range is `±2^20 * threshold` (about ±1048 units at the minimum
/// threshold). Vertices outside that range are never shared.
///
/// # Example
///
/// ```rust
/// use config::constants::{share_cell_limit, SHARE_KEY_BITS};
///
/// assert_eq!(SHARE_KEY_BITS * 3, 63);
/// assert_eq!(share_cell_limit(), 1 << 20);
/// ```
pub const SHARE_KEY_BITS: u32 = 21;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Tolerance for treating two unit face normals as equal.
///
/// Compared component-wise. Used by extrusion edge recognition to decide
/// whether two adjacent triangles are coplanar.
pub const COPLANAR_NORMAL_EPSILON: f32 = 1e-4;

/// Grid size used to quantize positions when building edge adjacency keys.
///
/// Adjacency is keyed on positions rather than indices, so unshared meshes
/// still find their neighbors.
pub const EDGE_KEY_QUANTUM: f32 = 0.001;

/// Edges shorter than this mark a triangle as degenerate.
///
/// # Example
///
/// ```rust
/// use config::constants::DEGENERATE_EDGE_LENGTH;
///
/// let edge: f32 = 1e-7;
/// assert!(edge < DEGENERATE_EDGE_LENGTH);
/// ```
pub const DEGENERATE_EDGE_LENGTH: f32 = 1e-5;

// =============================================================================
// PEN CONSTANTS
// =============================================================================

/// Initial pen color (RGBA in `[0, 1]`).
pub const DEFAULT_PEN_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Initial pen normal.
pub const DEFAULT_PEN_NORMAL: [f32; 3] = [0.0, 0.0, 1.0];

/// Initial pen texture coordinate.
pub const DEFAULT_PEN_TEX_COORD: [f32; 2] = [0.0, 0.0];

// =============================================================================
// LIMIT CONSTANTS
// =============================================================================

/// Highest tesselation level a stage will request.
///
/// Each level multiplies the triangle count by four, so level 10 already
/// turns one triangle into about a million.
pub const MAX_TESSELATION_LEVEL: u32 = 10;

/// Upper bound of the progress counter.
pub const PROGRESS_MAX: u32 = 100;

/// Padding inside the unit box of a line font glyph.
pub const LINE_FONT_PADDING: f32 = 0.075;

/// Horizontal advance of one glyph, relative to the glyph height.
pub const LINE_FONT_ADVANCE: f32 = 0.8;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Largest absolute grid cell index representable in a share key axis.
///
/// # Example
///
/// ```rust
/// use config::constants::share_cell_limit;
///
/// let cell: i64 = 5000;
/// assert!(cell.abs() < share_cell_limit());
/// ```
#[inline]
pub const fn share_cell_limit() -> i64 {
    1 << (SHARE_KEY_BITS - 1)
}

/// Clips a requested share threshold to the supported minimum.
///
/// Non-finite requests fall back to [`DEFAULT_SHARE_THRESHOLD`].
///
/// # Example
///
/// ```rust
/// use config::constants::{clip_share_threshold, MINIMUM_SHARE_THRESHOLD};
///
/// assert_eq!(clip_share_threshold(0.0), MINIMUM_SHARE_THRESHOLD);
/// assert_eq!(clip_share_threshold(0.5), 0.5);
/// ```
#[inline]
pub fn clip_share_threshold(threshold: f32) -> f32 {
    if threshold.is_finite() {
        threshold.max(MINIMUM_SHARE_THRESHOLD)
    } else {
        DEFAULT_SHARE_THRESHOLD
    }
}

/// Clamps a tesselation level to `0..=MAX_TESSELATION_LEVEL`.
#[inline]
pub fn clamp_tesselation_level(level: i64) -> u32 {
    level.clamp(0, MAX_TESSELATION_LEVEL as i64) as u32
}
