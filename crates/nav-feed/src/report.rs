//! CSV recording of navigation reports.
//!
//! One row per report:
//!
//! ```csv
//! timestamp_ms,latitude,longitude,latitude_dms,longitude_dms,state,distance_m,bearing_to_target_deg
//! 1362234600000,51.2194,4.4025,"51° 13' 9.8"" N","4° 24' 9.0"" E",accurate,152.3,271.8
//! ```
//!
//! `distance_m` and `bearing_to_target_deg` are empty while no location is
//! stored.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::Writer;

use crate::{FeedError, FeedObserver, FeedResult, FeedSummary, NavigationReport};

const HEADER: [&str; 8] = [
    "timestamp_ms",
    "latitude",
    "longitude",
    "latitude_dms",
    "longitude_dms",
    "state",
    "distance_m",
    "bearing_to_target_deg",
];

/// Writes navigation reports to CSV.
///
/// Also usable directly as a [`FeedObserver`].  Errors from the writer are
/// stored internally because observer methods have no return value; check
/// with [`take_error`][Self::take_error] after the feed ends.
pub struct CsvReportWriter<W: Write> {
    writer:     Writer<W>,
    rows:       usize,
    finished:   bool,
    last_error: Option<FeedError>,
}

impl CsvReportWriter<File> {
    /// Create (or truncate) `path` and write the header row.
    pub fn new(path: &Path) -> FeedResult<Self> {
        Self::from_writer(File::create(path)?)
    }
}

impl<W: Write> CsvReportWriter<W> {
    pub fn from_writer(inner: W) -> FeedResult<Self> {
        let mut writer = Writer::from_writer(inner);
        writer.write_record(HEADER)?;
        Ok(Self { writer, rows: 0, finished: false, last_error: None })
    }

    pub fn write_report(&mut self, report: &NavigationReport) -> FeedResult<()> {
        let (distance, bearing) = match &report.guidance {
            Some(g) => (format!("{:.1}", g.distance_m), format!("{:.1}", g.bearing_deg)),
            None => (String::new(), String::new()),
        };
        self.writer.write_record(&[
            report.snapshot.timestamp().timestamp_millis().to_string(),
            report.latitude.value().to_string(),
            report.longitude.value().to_string(),
            report.latitude.format(),
            report.longitude.format(),
            report.state.as_str().to_owned(),
            distance,
            bearing,
        ])?;
        self.rows += 1;
        Ok(())
    }

    /// Rows written so far (header excluded).
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flush the underlying writer.
    ///
    /// Idempotent.
    pub fn finish(&mut self) -> FeedResult<()> {
        if self.finished {
            return Ok(());
        }
        self.writer.flush()?;
        self.finished = true;
        Ok(())
    }

    /// Take the stored write error (if any) after the feed ends.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<FeedError> {
        self.last_error.take()
    }

    /// Flush and unwrap the inner writer.
    pub fn into_inner(mut self) -> FeedResult<W> {
        self.finish()?;
        self.writer
            .into_inner()
            .map_err(|e| FeedError::Io(std::io::Error::new(e.error().kind(), e.to_string())))
    }

    fn store_err(&mut self, result: FeedResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: Write> FeedObserver for CsvReportWriter<W> {
    fn on_report(&mut self, report: &NavigationReport) {
        let result = self.write_report(report);
        self.store_err(result);
    }

    fn on_feed_end(&mut self, _summary: &FeedSummary) {
        let result = self.finish();
        self.store_err(result);
    }
}
