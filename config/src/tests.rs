//! # Tests for Config Constants
//!
//! Unit tests verifying the correctness of configuration constants
//! and helper functions.

use crate::constants::*;

// =============================================================================
// VERTEX SHARING TESTS
// =============================================================================

#[test]
fn test_minimum_threshold_is_positive() {
    assert!(MINIMUM_SHARE_THRESHOLD > 0.0, "threshold must be positive");
}

#[test]
fn test_default_threshold_not_below_minimum() {
    assert!(DEFAULT_SHARE_THRESHOLD >= MINIMUM_SHARE_THRESHOLD);
}

#[test]
fn test_share_key_fits_u64() {
    assert!(SHARE_KEY_BITS * 3 <= 64, "packed key must fit in 64 bits");
}

#[test]
fn test_share_cell_limit() {
    assert_eq!(share_cell_limit(), 1_048_576);
}

#[test]
fn test_clip_share_threshold() {
    assert_eq!(clip_share_threshold(-1.0), MINIMUM_SHARE_THRESHOLD);
    assert_eq!(clip_share_threshold(0.25), 0.25);
    assert_eq!(clip_share_threshold(f32::NAN), DEFAULT_SHARE_THRESHOLD);
}

// =============================================================================
// PRECISION TESTS
// =============================================================================

#[test]
fn test_coplanar_epsilon_is_small() {
    assert!(COPLANAR_NORMAL_EPSILON > 0.0);
    assert!(COPLANAR_NORMAL_EPSILON < 0.01);
}

#[test]
fn test_degenerate_edge_below_share_threshold() {
    // Degenerate detection must be finer than vertex merging
    assert!(DEGENERATE_EDGE_LENGTH < MINIMUM_SHARE_THRESHOLD);
}

// =============================================================================
// PEN TESTS
// =============================================================================

#[test]
fn test_default_pen_normal_is_unit() {
    let [x, y, z] = DEFAULT_PEN_NORMAL;
    let len = (x * x + y * y + z * z).sqrt();
    assert!((len - 1.0).abs() < 1e-6);
}

#[test]
fn test_default_pen_color_in_range() {
    for c in DEFAULT_PEN_COLOR {
        assert!((0.0..=1.0).contains(&c));
    }
}

// =============================================================================
// LIMIT TESTS
// =============================================================================

#[test]
fn test_clamp_tesselation_level() {
    assert_eq!(clamp_tesselation_level(-3), 0);
    assert_eq!(clamp_tesselation_level(2), 2);
    assert_eq!(clamp_tesselation_level(99), MAX_TESSELATION_LEVEL);
}

#[test]
fn test_progress_max() {
    assert_eq!(PROGRESS_MAX, 100);
}
