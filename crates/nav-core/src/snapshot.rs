//! Immutable location fixes.
//!
//! A [`LocationSnapshot`] is copied out of the platform's location object in
//! one step ([`LocationSnapshot::capture`]), so everything downstream sees a
//! mutually consistent set of fields.  Later fixes replace a snapshot; nothing mutates one.
//!
//! Measurements the provider did not supply are `None`.  There is no
//! sentinel (`0.0`, `NaN`) standing in for "unknown".

use std::fmt;

use chrono::{DateTime, Utc};

use crate::geo::GeoPoint;
use crate::{CoordinateKind, GeoCoordinate, NavError, NavResult};

// ── LocationSource ────────────────────────────────────────────────────────────

/// The view of a platform location object that [`LocationSnapshot::capture`]
/// reads from.
///
/// Optional measurements default to "not available" so adapters only need
/// to override what their provider reports.
pub trait LocationSource {
    fn latitude(&self) -> f64;
    fn longitude(&self) -> f64;
    fn time(&self) -> DateTime<Utc>;

    fn altitude(&self) -> Option<f64> {
        None
    }
    fn bearing(&self) -> Option<f64> {
        None
    }
    fn speed(&self) -> Option<f64> {
        None
    }
    fn accuracy(&self) -> Option<f64> {
        None
    }
    fn provider(&self) -> Option<&str> {
        None
    }
}

// ── LocationSnapshot ──────────────────────────────────────────────────────────

/// A complete set of location measurements captured at one instant.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LocationSnapshot {
    latitude:  f64,
    longitude: f64,
    altitude:  Option<f64>,
    bearing:   Option<f64>,
    speed:     Option<f64>,
    accuracy:  Option<f64>,
    timestamp: DateTime<Utc>,
    provider:  Option<String>,
}

impl LocationSnapshot {
    /// Copy every field from `source` at once and validate the result.
    pub fn capture<S: LocationSource + ?Sized>(source: &S) -> NavResult<Self> {
        let mut builder = Self::builder(source.latitude(), source.longitude(), source.time());
        builder.altitude = source.altitude();
        builder.bearing = source.bearing();
        builder.speed = source.speed();
        builder.accuracy = source.accuracy();
        builder.provider = source.provider().map(str::to_owned);
        builder.build()
    }

    /// Start assembling a snapshot field by field.
    pub fn builder(latitude: f64, longitude: f64, timestamp: DateTime<Utc>) -> LocationSnapshotBuilder {
        LocationSnapshotBuilder {
            latitude,
            longitude,
            timestamp,
            altitude: None,
            bearing:  None,
            speed:    None,
            accuracy: None,
            provider: None,
        }
    }

    #[inline]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    #[inline]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Metres above the WGS-84 ellipsoid.
    #[inline]
    pub fn altitude(&self) -> Option<f64> {
        self.altitude
    }

    /// Direction of travel in degrees, `[0, 360)`.
    #[inline]
    pub fn bearing(&self) -> Option<f64> {
        self.bearing
    }

    /// Ground speed in m/s.
    #[inline]
    pub fn speed(&self) -> Option<f64> {
        self.speed
    }

    /// Horizontal accuracy radius in metres.
    #[inline]
    pub fn accuracy(&self) -> Option<f64> {
        self.accuracy
    }

    #[inline]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Name of the provider that produced the fix (e.g. `gps`, `network`).
    #[inline]
    pub fn provider(&self) -> Option<&str> {
        self.provider.as_deref()
    }

    #[inline]
    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    /// Latitude as a formattable coordinate.
    pub fn latitude_coordinate(&self) -> GeoCoordinate {
        GeoCoordinate::from_finite(self.latitude, CoordinateKind::Latitude)
    }

    /// Longitude as a formattable coordinate.
    pub fn longitude_coordinate(&self) -> GeoCoordinate {
        GeoCoordinate::from_finite(self.longitude, CoordinateKind::Longitude)
    }
}

impl fmt::Display for LocationSnapshot {
    /// Multi-line summary; optional fields appear only when present.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(provider) = &self.provider {
            writeln!(f, "provider: {provider}")?;
        }
        writeln!(f, "latitude: {}° ({})", self.latitude, self.latitude_coordinate())?;
        writeln!(f, "longitude: {}° ({})", self.longitude, self.longitude_coordinate())?;
        if let Some(altitude) = self.altitude {
            writeln!(f, "altitude: {altitude}m")?;
        }
        if let Some(bearing) = self.bearing {
            writeln!(f, "bearing: {bearing}°")?;
        }
        if let Some(speed) = self.speed {
            writeln!(f, "speed: {speed}m/s")?;
        }
        if let Some(accuracy) = self.accuracy {
            writeln!(f, "accuracy: {accuracy}m")?;
        }
        write!(f, "timestamp: {}", self.timestamp.format("%Y-%m-%dT%H:%M:%S%.3f%Z"))
    }
}

// ── LocationSnapshotBuilder ───────────────────────────────────────────────────

/// Field-by-field constructor for [`LocationSnapshot`].
///
/// ```rust,ignore
/// let fix = LocationSnapshot::builder(51.2194, 4.4025, Utc::now())
///     .accuracy(5.0)
///     .bearing(90.0)
///     .speed(2.0)
///     .build()?;
/// ```
#[derive(Clone, Debug)]
pub struct LocationSnapshotBuilder {
    latitude:  f64,
    longitude: f64,
    timestamp: DateTime<Utc>,
    altitude:  Option<f64>,
    bearing:   Option<f64>,
    speed:     Option<f64>,
    accuracy:  Option<f64>,
    provider:  Option<String>,
}

impl LocationSnapshotBuilder {
    pub fn altitude(mut self, metres: f64) -> Self {
        self.altitude = Some(metres);
        self
    }

    pub fn bearing(mut self, degrees: f64) -> Self {
        self.bearing = Some(degrees);
        self
    }

    pub fn speed(mut self, mps: f64) -> Self {
        self.speed = Some(mps);
        self
    }

    pub fn accuracy(mut self, metres: f64) -> Self {
        self.accuracy = Some(metres);
        self
    }

    pub fn provider(mut self, name: impl Into<String>) -> Self {
        self.provider = Some(name.into());
        self
    }

    /// Validate and freeze.
    ///
    /// A bearing of exactly 360° is stored as 0°.
    pub fn build(self) -> NavResult<LocationSnapshot> {
        require_finite("latitude", self.latitude)?;
        require_finite("longitude", self.longitude)?;
        if let Some(altitude) = self.altitude {
            require_finite("altitude", altitude)?;
        }
        if let Some(accuracy) = self.accuracy {
            require_non_negative("accuracy", accuracy)?;
        }
        if let Some(speed) = self.speed {
            require_non_negative("speed", speed)?;
        }
        let bearing = match self.bearing {
            Some(b) if b == 360.0 => Some(0.0),
            Some(b) if (0.0..360.0).contains(&b) => Some(b),
            Some(b) => {
                return Err(NavError::InvalidSnapshot(format!(
                    "bearing {b} outside [0, 360)"
                )));
            }
            None => None,
        };

        Ok(LocationSnapshot {
            latitude:  self.latitude,
            longitude: self.longitude,
            altitude:  self.altitude,
            bearing,
            speed:     self.speed,
            accuracy:  self.accuracy,
            timestamp: self.timestamp,
            provider:  self.provider,
        })
    }
}

// ── serde ─────────────────────────────────────────────────────────────────────

/// Wire shape of a snapshot.  Deserialized snapshots go through
/// [`LocationSnapshotBuilder::build`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct SnapshotFields {
    latitude:  f64,
    longitude: f64,
    altitude:  Option<f64>,
    bearing:   Option<f64>,
    speed:     Option<f64>,
    accuracy:  Option<f64>,
    timestamp: DateTime<Utc>,
    provider:  Option<String>,
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for LocationSnapshot {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let f = <SnapshotFields as serde::Deserialize>::deserialize(deserializer)?;
        LocationSnapshotBuilder {
            latitude:  f.latitude,
            longitude: f.longitude,
            timestamp: f.timestamp,
            altitude:  f.altitude,
            bearing:   f.bearing,
            speed:     f.speed,
            accuracy:  f.accuracy,
            provider:  f.provider,
        }
        .build()
        .map_err(<D::Error as serde::de::Error>::custom)
    }
}

fn require_finite(field: &str, value: f64) -> NavResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(NavError::InvalidSnapshot(format!("{field} {value} is not finite")))
    }
}

fn require_non_negative(field: &str, value: f64) -> NavResult<()> {
    require_finite(field, value)?;
    if value < 0.0 {
        return Err(NavError::InvalidSnapshot(format!("{field} {value} is negative")));
    }
    Ok(())
}
