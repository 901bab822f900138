//! Decimal-degree angles rendered as degrees–minutes–seconds.
//!
//! # Format
//!
//! ```text
//! 51.2194 (latitude)    →  51° 13' 9.8" N
//! -4.4025 (longitude)   →  4° 24' 9.0" W
//! 0.0     (latitude)    →  0° 0' 0.0" N
//! ```
//!
//! The sign never appears in the text; it is carried by the segment unit.
//!
//! # Rounding
//!
//! Seconds are shown with one decimal.  Rounding is done once, on the total
//! number of tenths of an arc-second (half-up on the absolute value), and
//! the result is then split into degrees, minutes and seconds.  Rounding the
//! whole quantity rather than the seconds field alone means a value such as
//! `1° 59' 59.96"` carries cleanly to `2° 0' 0.0"` and never shows `60.0"`.

use std::fmt;
use std::str::FromStr;

use crate::{NavError, NavResult};

const TENTHS_PER_MINUTE: u64 = 600;
const TENTHS_PER_DEGREE: u64 = 36_000;

// ── CoordinateKind ────────────────────────────────────────────────────────────

/// Which axis a [`GeoCoordinate`] measures.  Determines the segment labels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoordinateKind {
    Latitude,
    Longitude,
}

impl fmt::Display for CoordinateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordinateKind::Latitude => f.write_str("latitude"),
            CoordinateKind::Longitude => f.write_str("longitude"),
        }
    }
}

// ── Segment ───────────────────────────────────────────────────────────────────

/// Hemisphere label attached to a coordinate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Segment {
    North,
    South,
    East,
    West,
}

impl Segment {
    /// One-letter unit shown after the formatted angle.
    pub fn unit(self) -> &'static str {
        match self {
            Segment::North => "N",
            Segment::South => "S",
            Segment::East => "E",
            Segment::West => "W",
        }
    }

    /// `true` for the segments that hold non-negative values.
    #[inline]
    pub fn is_positive(self) -> bool {
        matches!(self, Segment::North | Segment::East)
    }

    /// The coordinate axis this segment belongs to.
    pub fn kind(self) -> CoordinateKind {
        match self {
            Segment::North | Segment::South => CoordinateKind::Latitude,
            Segment::East | Segment::West => CoordinateKind::Longitude,
        }
    }

    /// Inverse of [`unit`][Self::unit].  Case-insensitive.
    pub fn from_unit(unit: &str) -> Option<Segment> {
        match unit.trim().to_ascii_uppercase().as_str() {
            "N" => Some(Segment::North),
            "S" => Some(Segment::South),
            "E" => Some(Segment::East),
            "W" => Some(Segment::West),
            _ => None,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.unit())
    }
}

// ── Dms ───────────────────────────────────────────────────────────────────────

/// Degrees, minutes and tenths of an arc-second of an absolute angle,
/// after rounding.
///
/// `minutes < 60` and `tenths_of_second < 600` always hold.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Dms {
    pub degrees:          u64,
    pub minutes:          u8,
    pub tenths_of_second: u16,
}

impl Dms {
    /// Largest angle, in degrees, decomposed exactly.  Anything larger is
    /// clamped to the DMS value of this limit.
    pub const MAX_DEGREES: f64 = (u64::MAX / TENTHS_PER_DEGREE) as f64;

    /// Decompose `|angle|` (decimal degrees), rounding to a tenth of a second.
    ///
    /// Angles above [`MAX_DEGREES`][Self::MAX_DEGREES] are clamped.
    pub fn from_degrees(angle: f64) -> Self {
        let max_tenths = (u64::MAX / TENTHS_PER_DEGREE) * TENTHS_PER_DEGREE;
        let tenths = (angle.abs() * TENTHS_PER_DEGREE as f64).round();
        let total = if tenths >= max_tenths as f64 { max_tenths } else { tenths as u64 };
        let rest = total % TENTHS_PER_DEGREE;
        Self {
            degrees:          total / TENTHS_PER_DEGREE,
            minutes:          (rest / TENTHS_PER_MINUTE) as u8,
            tenths_of_second: (rest % TENTHS_PER_MINUTE) as u16,
        }
    }

    /// Seconds as a float (one significant decimal).
    #[inline]
    pub fn seconds(&self) -> f64 {
        f64::from(self.tenths_of_second) / 10.0
    }

    /// Back to an unsigned decimal angle.
    pub fn to_degrees(&self) -> f64 {
        self.degrees as f64 + f64::from(self.minutes) / 60.0 + self.seconds() / 3_600.0
    }
}

impl fmt::Display for Dms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}° {}' {}.{}\"",
            self.degrees,
            self.minutes,
            self.tenths_of_second / 10,
            self.tenths_of_second % 10,
        )
    }
}

// ── GeoCoordinate ─────────────────────────────────────────────────────────────

/// A latitude or longitude in decimal degrees.
///
/// The segment is derived from the sign of the value every time it is asked
/// for; nothing but the raw value and the kind is stored.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoCoordinate {
    value: f64,
    kind:  CoordinateKind,
}

impl GeoCoordinate {
    /// Wrap `value`.  Fails only for NaN or infinite input.
    pub fn new(value: f64, kind: CoordinateKind) -> NavResult<Self> {
        check_finite(value)?;
        Ok(Self { value, kind })
    }

    /// Skip the finiteness check for values validated elsewhere (snapshot
    /// fields are checked when the snapshot is built).
    #[inline]
    pub(crate) fn from_finite(value: f64, kind: CoordinateKind) -> Self {
        debug_assert!(value.is_finite());
        Self { value, kind }
    }

    #[inline]
    pub fn latitude(value: f64) -> NavResult<Self> {
        Self::new(value, CoordinateKind::Latitude)
    }

    #[inline]
    pub fn longitude(value: f64) -> NavResult<Self> {
        Self::new(value, CoordinateKind::Longitude)
    }

    /// The raw, unformatted decimal value.
    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[inline]
    pub fn kind(&self) -> CoordinateKind {
        self.kind
    }

    /// Replace the value.  A non-finite value is rejected and the old value
    /// is kept.
    pub fn set_value(&mut self, value: f64) -> NavResult<()> {
        check_finite(value)?;
        self.value = value;
        Ok(())
    }

    /// Hemisphere of the value.  Zero (and negative zero) belongs to the
    /// positive segment.
    pub fn segment(&self) -> Segment {
        // -0.0 >= 0.0 holds under IEEE 754.
        let positive = self.value >= 0.0;
        match (self.kind, positive) {
            (CoordinateKind::Latitude, true) => Segment::North,
            (CoordinateKind::Latitude, false) => Segment::South,
            (CoordinateKind::Longitude, true) => Segment::East,
            (CoordinateKind::Longitude, false) => Segment::West,
        }
    }

    #[inline]
    pub fn segment_unit(&self) -> &'static str {
        self.segment().unit()
    }

    /// Rounded DMS decomposition of the absolute value.
    #[inline]
    pub fn dms(&self) -> Dms {
        Dms::from_degrees(self.value)
    }

    /// Render as `{deg}° {min}' {sec}" {unit}`.
    ///
    /// Magnitudes beyond [`Dms::MAX_DEGREES`] (about 5.1e14) render as that
    /// limit.
    pub fn format(&self) -> String {
        self.to_string()
    }

    /// Parse a string in the [`format`][Self::format] layout.
    ///
    /// The kind and sign are taken from the trailing segment unit, so
    /// `"4° 24' 9.0\" W"` yields a longitude of about `-4.4025`.
    pub fn parse(s: &str) -> NavResult<Self> {
        let mut parts = s.split_whitespace();
        let (Some(deg), Some(min), Some(sec), Some(unit), None) = (
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
        ) else {
            return Err(NavError::Parse(format!(
                "expected `D° M' S\" U`, got {s:?}"
            )));
        };

        let degrees = parse_component(deg, '°', f64::INFINITY, s)?;
        let minutes = parse_component(min, '\'', 60.0, s)?;
        let seconds = parse_component(sec, '"', 60.0, s)?;
        let segment = Segment::from_unit(unit).ok_or_else(|| {
            NavError::Parse(format!("unknown segment unit {unit:?} in {s:?}"))
        })?;

        let magnitude = degrees + minutes / 60.0 + seconds / 3_600.0;
        let value = if segment.is_positive() { magnitude } else { -magnitude };
        Self::new(value, segment.kind())
    }
}

impl fmt::Display for GeoCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.dms(), self.segment_unit())
    }
}

impl FromStr for GeoCoordinate {
    type Err = NavError;

    fn from_str(s: &str) -> NavResult<Self> {
        Self::parse(s)
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn check_finite(value: f64) -> NavResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(NavError::InvalidValue(value))
    }
}

fn parse_component(token: &str, suffix: char, upper: f64, whole: &str) -> NavResult<f64> {
    let number = token.strip_suffix(suffix).ok_or_else(|| {
        NavError::Parse(format!("missing `{suffix}` after {token:?} in {whole:?}"))
    })?;
    let n: f64 = number
        .parse()
        .map_err(|_| NavError::Parse(format!("invalid number {number:?} in {whole:?}")))?;
    if !(0.0..upper).contains(&n) {
        return Err(NavError::Parse(format!(
            "{number} out of range [0, {upper}) in {whole:?}"
        )));
    }
    Ok(n)
}
