//! The consumer that turns snapshots into navigation reports.
//!
//! A [`Navigator`] keeps two snapshots: the latest fix (*current*) and the
//! location the user asked to come back to (*stored*).  Persisting the
//! stored location is somebody else's job; the navigator only receives it
//! ([`Navigator::set_stored_location`]) and hands it back
//! ([`Navigator::stored`]).

use log::{debug, info};

use nav_accuracy::{AccuracyState, AccuracyThresholds, is_bearing_accurate};
use nav_core::geo::normalize_bearing;
use nav_core::{GeoCoordinate, GeoPoint, LocationSnapshot, NavError, NavResult};

// ── Report types ──────────────────────────────────────────────────────────────

/// Directions from the current fix back to the stored location.
#[derive(Clone, Debug, PartialEq)]
pub struct Guidance {
    pub target:           GeoPoint,
    pub target_latitude:  GeoCoordinate,
    pub target_longitude: GeoCoordinate,
    /// Great-circle distance to the target, metres.
    pub distance_m:       f64,
    /// Initial bearing to the target, degrees from true north.
    pub bearing_deg:      f64,
    /// Target direction relative to the direction of travel, `[0, 360)`.
    /// `None` unless the current bearing passed the accuracy gate.
    pub relative_bearing_deg: Option<f64>,
}

/// Everything the display layer needs for one fix.
#[derive(Clone, Debug, PartialEq)]
pub struct NavigationReport {
    pub snapshot:  LocationSnapshot,
    pub latitude:  GeoCoordinate,
    pub longitude: GeoCoordinate,
    pub state:     AccuracyState,
    /// Present once a stored location exists.
    pub guidance:  Option<Guidance>,
}

// ── Navigator ─────────────────────────────────────────────────────────────────

pub struct Navigator {
    thresholds: AccuracyThresholds,
    current:    Option<LocationSnapshot>,
    stored:     Option<LocationSnapshot>,
}

impl Navigator {
    pub fn new(thresholds: AccuracyThresholds) -> Self {
        Self { thresholds, current: None, stored: None }
    }

    #[inline]
    pub fn thresholds(&self) -> &AccuracyThresholds {
        &self.thresholds
    }

    /// Latest fix, if any has arrived.
    #[inline]
    pub fn current(&self) -> Option<&LocationSnapshot> {
        self.current.as_ref()
    }

    /// The location being navigated back to.
    #[inline]
    pub fn stored(&self) -> Option<&LocationSnapshot> {
        self.stored.as_ref()
    }

    /// Storing is only possible once a fix is known.
    #[inline]
    pub fn can_store_location(&self) -> bool {
        self.current.is_some()
    }

    /// Remember the current fix as the navigation target.
    pub fn store_current_location(&mut self) -> NavResult<&LocationSnapshot> {
        let current = self.current.as_ref().ok_or(NavError::NoLocation)?;
        info!("storing location {}", current.point());
        Ok(self.stored.insert(current.clone()))
    }

    /// Seed the target from an external store (e.g. at startup).
    pub fn set_stored_location(&mut self, snapshot: LocationSnapshot) {
        debug!("stored location set to {}", snapshot.point());
        self.stored = Some(snapshot);
    }

    pub fn clear_stored_location(&mut self) {
        self.stored = None;
    }

    /// Replace the current fix with `snapshot` and report on it.
    pub fn update(&mut self, snapshot: LocationSnapshot) -> NavigationReport {
        let report = self.report_for(&snapshot);
        self.current = Some(snapshot);
        report
    }

    /// Report on the current fix without replacing it.
    pub fn report(&self) -> Option<NavigationReport> {
        self.current.as_ref().map(|s| self.report_for(s))
    }

    fn report_for(&self, snapshot: &LocationSnapshot) -> NavigationReport {
        let state = AccuracyState::classify(snapshot, &self.thresholds);
        let guidance = self.stored.as_ref().map(|target| self.guidance(snapshot, target));

        NavigationReport {
            snapshot:  snapshot.clone(),
            latitude:  snapshot.latitude_coordinate(),
            longitude: snapshot.longitude_coordinate(),
            state,
            guidance,
        }
    }

    fn guidance(&self, from: &LocationSnapshot, target: &LocationSnapshot) -> Guidance {
        let here = from.point();
        let there = target.point();
        let bearing_deg = here.initial_bearing_deg(there);

        let relative_bearing_deg = if is_bearing_accurate(from, &self.thresholds) {
            from.bearing().map(|heading| normalize_bearing(bearing_deg - heading))
        } else {
            None
        };

        Guidance {
            target:           there,
            target_latitude:  target.latitude_coordinate(),
            target_longitude: target.longitude_coordinate(),
            distance_m:       here.distance_m(there),
            bearing_deg,
            relative_bearing_deg,
        }
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(AccuracyThresholds::default())
    }
}
