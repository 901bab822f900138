//! `nav-accuracy` — decide whether a fix is good enough to show or act on.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`thresholds`]  | `AccuracyThresholds` (serde-loadable configuration)        |
//! | [`policy`]      | `is_position_accurate`, `is_bearing_accurate`, `AccuracyState` |
//!
//! # Gating order
//!
//! ```text
//! accuracy missing or > max_position_error_m        → PositionInaccurate
//! else bearing/speed missing or speed < min_speed   → BearingInaccurate
//! else                                              → Accurate
//! ```
//!
//! Every function here is pure and never fails.

pub mod policy;
pub mod thresholds;


pub use policy::{AccuracyState, classify, is_bearing_accurate, is_position_accurate};
pub use thresholds::AccuracyThresholds;
