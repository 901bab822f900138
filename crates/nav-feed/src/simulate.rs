//! Deterministic stand-in for a platform location provider.
//!
//! Walks a straight line from `start` at a constant heading and speed,
//! reporting one fix every `interval_secs`.  Each fix is displaced from the
//! true track by a random offset inside its reported accuracy radius, and
//! the reported speed is jittered.  The same seed always produces the same
//! track.

use chrono::{DateTime, Duration, Utc};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use nav_core::geo::normalize_bearing;
use nav_core::{GeoPoint, LocationSnapshot, NavError, NavResult};

/// Parameters for [`SimulatedProvider`].
#[derive(Clone, Debug)]
pub struct SimulationConfig {
    pub start:            GeoPoint,
    pub start_time:       DateTime<Utc>,
    /// Direction of travel, degrees from true north.
    pub heading_deg:      f64,
    /// Nominal ground speed, m/s.  Zero simulates a stationary device.
    pub speed_mps:        f64,
    /// Reported speed is `speed_mps ± speed_jitter_mps` (never negative).
    pub speed_jitter_mps: f64,
    pub interval_secs:    u32,
    /// Reported accuracy is drawn uniformly from this range, metres.
    pub accuracy_m:       (f64, f64),
    /// Probability that a fix carries no accuracy (and no bearing).
    pub dropout:          f64,
}

impl SimulationConfig {
    fn validate(&self) -> NavResult<()> {
        let (lo, hi) = self.accuracy_m;
        let ok = self.start.lat.is_finite()
            && self.start.lon.is_finite()
            && (-90.0..=90.0).contains(&self.start.lat)
            && self.speed_mps.is_finite()
            && self.speed_mps >= 0.0
            && self.speed_jitter_mps.is_finite()
            && self.speed_jitter_mps >= 0.0
            && self.heading_deg.is_finite()
            && lo.is_finite()
            && hi.is_finite()
            && 0.0 <= lo
            && lo <= hi
            && (0.0..=1.0).contains(&self.dropout);
        if ok {
            Ok(())
        } else {
            Err(NavError::Config(format!("invalid simulation parameters: {self:?}")))
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            start:            GeoPoint::new(51.2194, 4.4025),
            start_time:       DateTime::UNIX_EPOCH,
            heading_deg:      90.0,
            speed_mps:        1.4,
            speed_jitter_mps: 0.3,
            interval_secs:    1,
            accuracy_m:       (3.0, 15.0),
            dropout:          0.05,
        }
    }
}

/// Seeded generator of noisy [`LocationSnapshot`]s.
///
/// As an iterator it never ends on its own; use [`Iterator::take`] to bound
/// it.
pub struct SimulatedProvider {
    config: SimulationConfig,
    rng:    SmallRng,
    truth:  GeoPoint,
    time:   DateTime<Utc>,
}

impl SimulatedProvider {
    pub const PROVIDER_NAME: &'static str = "simulated";

    pub fn new(config: SimulationConfig, seed: u64) -> NavResult<Self> {
        config.validate()?;
        Ok(Self {
            truth: config.start,
            time:  config.start_time,
            rng:   SmallRng::seed_from_u64(seed),
            config,
        })
    }

    /// Where the device really is (before noise) at the next fix.
    #[inline]
    pub fn true_position(&self) -> GeoPoint {
        self.truth
    }

    /// Produce the next fix and advance the track by one interval.
    pub fn next_snapshot(&mut self) -> NavResult<LocationSnapshot> {
        let cfg = &self.config;
        let (lo, hi) = cfg.accuracy_m;
        let dropped = self.rng.gen_bool(cfg.dropout);
        let accuracy = if hi > lo { self.rng.gen_range(lo..=hi) } else { lo };

        let offset_dir = self.rng.gen_range(0.0..360.0);
        let offset_m = self.rng.gen_range(0.0..=accuracy);
        let reported = self.truth.destination(offset_dir, offset_m);

        let jitter = if cfg.speed_jitter_mps > 0.0 {
            self.rng.gen_range(-cfg.speed_jitter_mps..=cfg.speed_jitter_mps)
        } else {
            0.0
        };
        let speed = (cfg.speed_mps + jitter).max(0.0);

        let mut builder = LocationSnapshot::builder(reported.lat, reported.lon, self.time)
            .speed(speed)
            .provider(Self::PROVIDER_NAME);
        if !dropped {
            builder = builder
                .accuracy(accuracy)
                .bearing(normalize_bearing(cfg.heading_deg));
        }

        let step_m = cfg.speed_mps * f64::from(cfg.interval_secs);
        self.truth = self.truth.destination(cfg.heading_deg, step_m);
        self.time += Duration::seconds(i64::from(cfg.interval_secs));

        builder.build()
    }
}

impl Iterator for SimulatedProvider {
    type Item = LocationSnapshot;

    fn next(&mut self) -> Option<LocationSnapshot> {
        self.next_snapshot().ok()
    }
}
