//! `nav-feed` — deliver snapshots to a navigator and report on them.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                     |
//! |---------------|--------------------------------------------------------------|
//! | [`navigator`] | `Navigator`, `NavigationReport`, `Guidance`                  |
//! | [`feed`]      | `snapshot_channel`, `run_feed`, `FeedSummary`, `evaluate_batch` |
//! | [`observer`]  | `FeedObserver` trait, `NoopObserver`                         |
//! | [`loader`]    | `load_snapshots_csv`, `load_snapshots_reader`, `load_snapshots_lossy` |
//! | [`report`]    | `CsvReportWriter`                                            |
//! | [`simulate`]  | `SimulatedProvider`, `SimulationConfig`                      |
//! | [`error`]     | `FeedError`, `FeedResult<T>`                                 |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | `evaluate_batch` runs on Rayon's thread pool.          |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use nav_accuracy::AccuracyThresholds;
//! use nav_feed::{Navigator, NoopObserver, run_feed, snapshot_channel};
//!
//! let (tx, rx) = snapshot_channel(64);
//! std::thread::spawn(move || tx.send_all(fixes));
//!
//! let mut navigator = Navigator::new(AccuracyThresholds::default());
//! let summary = run_feed(rx, &mut navigator, &mut NoopObserver);
//! ```

pub mod error;
pub mod feed;
pub mod loader;
pub mod navigator;
pub mod observer;
pub mod report;
pub mod simulate;


pub use error::{FeedError, FeedResult};
pub use feed::{FeedSummary, SnapshotReceiver, SnapshotSender, evaluate_batch, run_feed, snapshot_channel};
pub use loader::{load_snapshots_csv, load_snapshots_lossy, load_snapshots_reader};
pub use navigator::{Guidance, NavigationReport, Navigator};
pub use observer::{FeedObserver, NoopObserver};
pub use report::CsvReportWriter;
pub use simulate::{SimulatedProvider, SimulationConfig};
