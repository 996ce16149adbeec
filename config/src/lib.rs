//! # Config Crate
//!
//! Centralized configuration constants for the geometry modifier pipeline.
//! Share thresholds, tolerances and stage limits are defined here so every
//! crate agrees on the same values.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{clip_share_threshold, MINIMUM_SHARE_THRESHOLD};
//!
//! // Requested thresholds below the minimum are clipped
//! let threshold = clip_share_threshold(0.0001);
//! assert_eq!(threshold, MINIMUM_SHARE_THRESHOLD);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Explicit Limits**: Key widths and coordinate ranges are spelled out

pub mod constants;

#[cfg(test)]
mod tests;
