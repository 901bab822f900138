//! The accuracy predicates and the display state derived from them.
//!
//! Both predicates are total: when a measurement is missing the answer is
//! `false`.  Unknown quality is never assumed good.

use std::fmt;

use serde::{Deserialize, Serialize};

use nav_core::LocationSnapshot;

use crate::AccuracyThresholds;

/// `true` iff the fix reports a horizontal accuracy and it is within
/// `max_position_error_m`.
pub fn is_position_accurate(snapshot: &LocationSnapshot, thresholds: &AccuracyThresholds) -> bool {
    snapshot
        .accuracy()
        .is_some_and(|accuracy| accuracy <= thresholds.max_position_error_m)
}

/// `true` iff the fix reports a bearing *and* a ground speed of at least
/// `min_speed_for_bearing_mps`.
/// The bearing value itself is not inspected.
pub fn is_bearing_accurate(snapshot: &LocationSnapshot, thresholds: &AccuracyThresholds) -> bool {
    snapshot.bearing().is_some()
        && snapshot
            .speed()
            .is_some_and(|speed| speed >= thresholds.min_speed_for_bearing_mps)
}

/// What the display layer should warn about for one fix.
///
/// Recomputed from scratch for every snapshot; there is no transition
/// history.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccuracyState {
    /// Position and bearing can both be shown without a warning.
    Accurate,
    /// The position itself is unreliable.  Dominates any bearing problem.
    PositionInaccurate,
    /// Position is fine; the direction of travel is not.
    BearingInaccurate,
}

impl AccuracyState {
    /// Classify `snapshot`.  Position is checked first; a bearing problem is
    /// reported only for an accurate position.
    pub fn classify(snapshot: &LocationSnapshot, thresholds: &AccuracyThresholds) -> Self {
        if !is_position_accurate(snapshot, thresholds) {
            AccuracyState::PositionInaccurate
        } else if !is_bearing_accurate(snapshot, thresholds) {
            AccuracyState::BearingInaccurate
        } else {
            AccuracyState::Accurate
        }
    }

    #[inline]
    pub fn is_accurate(self) -> bool {
        self == AccuracyState::Accurate
    }

    /// Warning text for the display layer, `None` when nothing is wrong.
    pub fn warning(self) -> Option<&'static str> {
        match self {
            AccuracyState::Accurate => None,
            AccuracyState::PositionInaccurate => Some("inaccurate location"),
            AccuracyState::BearingInaccurate => Some("inaccurate direction"),
        }
    }

    /// Short machine-friendly label (used in CSV output).
    pub fn as_str(self) -> &'static str {
        match self {
            AccuracyState::Accurate => "accurate",
            AccuracyState::PositionInaccurate => "position_inaccurate",
            AccuracyState::BearingInaccurate => "bearing_inaccurate",
        }
    }
}

/// Free-function form of [`AccuracyState::classify`].
#[inline]
pub fn classify(snapshot: &LocationSnapshot, thresholds: &AccuracyThresholds) -> AccuracyState {
    AccuracyState::classify(snapshot, thresholds)
}

impl fmt::Display for AccuracyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.warning().unwrap_or("accurate"))
    }
}
