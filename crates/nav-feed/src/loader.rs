//! CSV snapshot loader, for replaying recorded tracks.
//!
//! # CSV format
//!
//! One row per fix, in delivery order.  Empty optional cells mean the
//! provider did not report that measurement.
//!
//! ```csv
//! timestamp_ms,latitude,longitude,altitude,bearing,speed,accuracy,provider
//! 1362234600000,51.2194,4.4025,12.0,90.0,2.0,5.0,gps
//! 1362234601000,51.2194,4.4028,,,0.3,,network
//! ```
//!
//! `timestamp_ms` is milliseconds since the Unix epoch (UTC).

use std::io::Read;
use std::path::Path;

use chrono::DateTime;
use log::warn;
use serde::Deserialize;

use nav_core::{LocationSnapshot, NavResult};

use crate::{FeedError, FeedResult};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct SnapshotRecord {
    timestamp_ms: i64,
    latitude:     f64,
    longitude:    f64,
    altitude:     Option<f64>,
    bearing:      Option<f64>,
    speed:        Option<f64>,
    accuracy:     Option<f64>,
    provider:     Option<String>,
}

impl SnapshotRecord {
    fn into_snapshot(self) -> FeedResult<NavResult<LocationSnapshot>> {
        let timestamp = DateTime::from_timestamp_millis(self.timestamp_ms).ok_or_else(|| {
            FeedError::Parse(format!("timestamp_ms {} out of range", self.timestamp_ms))
        })?;

        let mut builder = LocationSnapshot::builder(self.latitude, self.longitude, timestamp);
        if let Some(altitude) = self.altitude {
            builder = builder.altitude(altitude);
        }
        if let Some(bearing) = self.bearing {
            builder = builder.bearing(bearing);
        }
        if let Some(speed) = self.speed {
            builder = builder.speed(speed);
        }
        if let Some(accuracy) = self.accuracy {
            builder = builder.accuracy(accuracy);
        }
        if let Some(provider) = self.provider.filter(|p| !p.trim().is_empty()) {
            builder = builder.provider(provider.trim());
        }
        Ok(builder.build())
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load every fix from a CSV file.  Fails on the first invalid row.
pub fn load_snapshots_csv(path: &Path) -> FeedResult<Vec<LocationSnapshot>> {
    let file = std::fs::File::open(path)?;
    load_snapshots_reader(file)
}

/// Like [`load_snapshots_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or loading from network
/// streams.
pub fn load_snapshots_reader<R: Read>(reader: R) -> FeedResult<Vec<LocationSnapshot>> {
    let mut snapshots = Vec::new();
    for (line, row) in records(reader)? {
        let snapshot = row?
            .into_snapshot()?
            .map_err(|source| FeedError::Snapshot { line, source })?;
        snapshots.push(snapshot);
    }
    Ok(snapshots)
}

/// Load fixes, skipping rows that violate snapshot invariants (negative
/// accuracy, bearing out of range, …).
///
/// Malformed CSV still fails.  Returns the snapshots and the number of rows
/// skipped; each skipped row is logged at `warn` level.
pub fn load_snapshots_lossy<R: Read>(reader: R) -> FeedResult<(Vec<LocationSnapshot>, usize)> {
    let mut snapshots = Vec::new();
    let mut skipped = 0;
    for (line, row) in records(reader)? {
        match row?.into_snapshot()? {
            Ok(snapshot) => snapshots.push(snapshot),
            Err(e) => {
                warn!("skipping line {line}: {e}");
                skipped += 1;
            }
        }
    }
    Ok((snapshots, skipped))
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Deserialized rows paired with the line each record starts on (header is
/// line 1).
fn records<R: Read>(
    reader: R,
) -> FeedResult<impl Iterator<Item = (u64, FeedResult<SnapshotRecord>)>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let headers = rdr.headers()?.clone();

    Ok(rdr.into_records().map(move |row| {
        let record = match row {
            Ok(record) => record,
            Err(e) => {
                let line = e.position().map_or(0, |p| p.line());
                return (line, Err(FeedError::Parse(format!("line {line}: {e}"))));
            }
        };
        let line = record.position().map_or(0, |p| p.line());
        let parsed = record
            .deserialize(Some(&headers))
            .map_err(|e| FeedError::Parse(format!("line {line}: {e}")));
        (line, parsed)
    }))
}
