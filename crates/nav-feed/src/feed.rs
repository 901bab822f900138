//! Channel delivery of snapshots and the single consumer loop.
//!
//! ```text
//! location provider ──SnapshotSender──▶ bounded channel ──▶ run_feed
//!                                                            │
//!                                     Navigator::update ◀────┘
//!                                            │
//!                                            ▼
//!                                      FeedObserver hooks
//! ```
//!
//! Ownership of each snapshot moves through the channel, so a snapshot is
//! never visible to the producer and the consumer at the same time.

use std::sync::mpsc::{self, Receiver, SyncSender};

use log::{debug, info, trace};

use nav_accuracy::{AccuracyState, AccuracyThresholds};
use nav_core::LocationSnapshot;

use crate::{FeedError, FeedObserver, FeedResult, Navigator};

// ── Channel ───────────────────────────────────────────────────────────────────

/// Producer half.  Cheap to clone; the feed ends when every clone is dropped.
#[derive(Clone)]
pub struct SnapshotSender {
    inner: SyncSender<LocationSnapshot>,
}

/// Consumer half, handed to [`run_feed`].
pub struct SnapshotReceiver {
    inner: Receiver<LocationSnapshot>,
}

/// Create a bounded snapshot channel.
///
/// `capacity` is the number of snapshots that may wait before `send` blocks.
/// A capacity of zero makes every send a rendezvous with the consumer.
pub fn snapshot_channel(capacity: usize) -> (SnapshotSender, SnapshotReceiver) {
    let (tx, rx) = mpsc::sync_channel(capacity);
    (SnapshotSender { inner: tx }, SnapshotReceiver { inner: rx })
}

impl SnapshotSender {
    /// Deliver one snapshot, blocking while the channel is full.
    pub fn send(&self, snapshot: LocationSnapshot) -> FeedResult<()> {
        trace!("sending snapshot at {}", snapshot.timestamp());
        self.inner.send(snapshot).map_err(|_| FeedError::Disconnected)
    }

    /// Deliver every snapshot from `snapshots` in order.
    ///
    /// Returns the number sent.  Stops at the first failure.
    pub fn send_all<I>(&self, snapshots: I) -> FeedResult<usize>
    where
        I: IntoIterator<Item = LocationSnapshot>,
    {
        let mut sent = 0;
        for snapshot in snapshots {
            self.send(snapshot)?;
            sent += 1;
        }
        Ok(sent)
    }
}

// ── Consumer loop ─────────────────────────────────────────────────────────────

/// Per-state counts for one run of [`run_feed`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FeedSummary {
    pub snapshots:           usize,
    pub accurate:            usize,
    pub position_inaccurate: usize,
    pub bearing_inaccurate:  usize,
    /// Number of `on_state_change` notifications (the first snapshot counts).
    pub state_changes:       usize,
    /// State of the last snapshot processed.
    pub last_state:          Option<AccuracyState>,
}

impl FeedSummary {
    fn record(&mut self, state: AccuracyState) {
        self.snapshots += 1;
        match state {
            AccuracyState::Accurate => self.accurate += 1,
            AccuracyState::PositionInaccurate => self.position_inaccurate += 1,
            AccuracyState::BearingInaccurate => self.bearing_inaccurate += 1,
        }
    }
}

/// Drain `receiver` into `navigator`, notifying `observer` for each snapshot.
///
/// Returns when every [`SnapshotSender`] has been dropped.  Snapshots are
/// processed strictly in the order they were sent.
pub fn run_feed<O: FeedObserver>(
    receiver: SnapshotReceiver,
    navigator: &mut Navigator,
    observer: &mut O,
) -> FeedSummary {
    let mut summary = FeedSummary::default();

    for snapshot in receiver.inner.iter() {
        let report = navigator.update(snapshot);
        let previous = summary.last_state;

        debug!(
            "fix {} {}: {}",
            report.latitude,
            report.longitude,
            report.state,
        );

        summary.record(report.state);
        observer.on_report(&report);

        if previous != Some(report.state) {
            summary.state_changes += 1;
            observer.on_state_change(previous, report.state);
        }
        summary.last_state = Some(report.state);
    }

    info!(
        "feed ended after {} snapshots ({} accurate, {} position inaccurate, {} bearing inaccurate)",
        summary.snapshots, summary.accurate, summary.position_inaccurate, summary.bearing_inaccurate,
    );
    observer.on_feed_end(&summary);
    summary
}

// ── Batch classification ──────────────────────────────────────────────────────

/// Classify a batch of snapshots without a navigator.
///
/// Output order matches input order.  With the `parallel` Cargo feature the
/// work runs on Rayon's thread pool; the predicates are pure, so the result
/// is identical either way.
pub fn evaluate_batch(
    snapshots: &[LocationSnapshot],
    thresholds: &AccuracyThresholds,
) -> Vec<AccuracyState> {
    #[cfg(not(feature = "parallel"))]
    {
        snapshots
            .iter()
            .map(|s| AccuracyState::classify(s, thresholds))
            .collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        snapshots
            .par_iter()
            .map(|s| AccuracyState::classify(s, thresholds))
            .collect()
    }
}
