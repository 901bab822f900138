//! Great-circle geometry between two positions.
//!
//! `GeoPoint` uses `f64` latitude/longitude, matching the precision of the
//! fixes delivered by a location provider.  The spherical model (mean Earth
//! radius) is accurate to about 0.5 % which is plenty for "how far and which
//! way back to the stored location".

use std::fmt;

use crate::GeoCoordinate;

/// Mean Earth radius, metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A WGS-84 position in decimal degrees.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Haversine great-circle distance in metres.
    pub fn distance_m(self, other: GeoPoint) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_M * c
    }

    /// Initial great-circle bearing from `self` towards `other`, in degrees
    /// clockwise from true north, normalised to `[0, 360)`.
    ///
    /// Identical points yield `0.0`.
    pub fn initial_bearing_deg(self, other: GeoPoint) -> f64 {
        if self == other {
            return 0.0;
        }
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let y = d_lon.sin() * lat2.cos();
        let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();

        normalize_bearing(y.atan2(x).to_degrees())
    }

    /// Point reached after travelling `distance_m` from `self` along the
    /// initial bearing `bearing_deg`.
    pub fn destination(self, bearing_deg: f64, distance_m: f64) -> GeoPoint {
        let delta = distance_m / EARTH_RADIUS_M;
        let theta = bearing_deg.to_radians();
        let lat1 = self.lat.to_radians();
        let lon1 = self.lon.to_radians();

        let lat2 = (lat1.sin() * delta.cos() + lat1.cos() * delta.sin() * theta.cos()).asin();
        let lon2 = lon1
            + (theta.sin() * delta.sin() * lat1.cos()).atan2(delta.cos() - lat1.sin() * lat2.sin());

        GeoPoint::new(lat2.to_degrees(), normalize_longitude(lon2.to_degrees()))
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (GeoCoordinate::latitude(self.lat), GeoCoordinate::longitude(self.lon)) {
            (Ok(lat), Ok(lon)) => write!(f, "{lat}, {lon}"),
            _ => write!(f, "({}, {})", self.lat, self.lon),
        }
    }
}

/// Map any angle onto `[0, 360)`.
pub fn normalize_bearing(deg: f64) -> f64 {
    let b = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs.
    if b >= 360.0 { 0.0 } else { b }
}

fn normalize_longitude(deg: f64) -> f64 {
    (deg + 540.0).rem_euclid(360.0) - 180.0
}
