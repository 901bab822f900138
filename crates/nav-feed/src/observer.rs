//! Feed observer trait for display updates and data collection.

use nav_accuracy::AccuracyState;

use crate::{FeedSummary, NavigationReport};

/// Callbacks invoked by [`run_feed`][crate::run_feed] for every delivered
/// snapshot.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: warning banner
///
/// ```rust,ignore
/// struct Banner;
///
/// impl FeedObserver for Banner {
///     fn on_state_change(&mut self, _prev: Option<AccuracyState>, now: AccuracyState) {
///         match now.warning() {
///             Some(text) => show_banner(text),
///             None => hide_banner(),
///         }
///     }
/// }
/// ```
pub trait FeedObserver {
    /// Called once per snapshot, in delivery order.
    fn on_report(&mut self, _report: &NavigationReport) {}

    /// Called when the accuracy state differs from the previous snapshot's.
    ///
    /// `previous` is `None` for the first snapshot of a feed.  Fired after
    /// `on_report` for the same snapshot.
    fn on_state_change(&mut self, _previous: Option<AccuracyState>, _current: AccuracyState) {}

    /// Called once after every sender has been dropped and the channel is
    /// drained.
    fn on_feed_end(&mut self, _summary: &FeedSummary) {}
}

/// A [`FeedObserver`] that does nothing.
pub struct NoopObserver;

impl FeedObserver for NoopObserver {}

impl<O: FeedObserver + ?Sized> FeedObserver for &mut O {
    fn on_report(&mut self, report: &NavigationReport) {
        (**self).on_report(report);
    }

    fn on_state_change(&mut self, previous: Option<AccuracyState>, current: AccuracyState) {
        (**self).on_state_change(previous, current);
    }

    fn on_feed_end(&mut self, summary: &FeedSummary) {
        (**self).on_feed_end(summary);
    }
}

/// Fan out to two observers, first `A` then `B`.
impl<A: FeedObserver, B: FeedObserver> FeedObserver for (A, B) {
    fn on_report(&mut self, report: &NavigationReport) {
        self.0.on_report(report);
        self.1.on_report(report);
    }

    fn on_state_change(&mut self, previous: Option<AccuracyState>, current: AccuracyState) {
        self.0.on_state_change(previous, current);
        self.1.on_state_change(previous, current);
    }

    fn on_feed_end(&mut self, summary: &FeedSummary) {
        self.0.on_feed_end(summary);
        self.1.on_feed_end(summary);
    }
}
