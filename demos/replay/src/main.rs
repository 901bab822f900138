//! replay — feed a recorded or simulated track through the navigator.
//!
//! ```text
//! replay [TRACK_CSV] [--config CONFIG_JSON]
//! cargo run -p replay -- demos/replay/track.csv --config demos/replay/config.json
//! ```
//!
//! Without a track file the seeded simulated provider is used.  Reports are
//! written to `<output_dir>/reports.csv` and a run summary to
//! `<output_dir>/summary.json`.  Set `RUST_LOG=debug` for per-fix logging.

mod config;

use std::path::{Path, PathBuf};
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use chrono::Utc;
use clap::Parser;
use log::info;
use serde_json::json;

use nav_accuracy::AccuracyState;
use nav_core::LocationSnapshot;
use nav_feed::{
    CsvReportWriter, FeedObserver, FeedSummary, NavigationReport, Navigator, SimulatedProvider,
    SimulationConfig, load_snapshots_csv, run_feed, snapshot_channel,
};

use config::ReplayConfig;

// ── Console observer ──────────────────────────────────────────────────────────

/// Prints one line per fix and the warning whenever accuracy degrades.
struct ConsoleObserver;

impl FeedObserver for ConsoleObserver {
    fn on_report(&mut self, report: &NavigationReport) {
        let snap = &report.snapshot;
        let guidance = match &report.guidance {
            Some(g) => match g.relative_bearing_deg {
                Some(rel) => format!("  → {:.0} m, {:.0}° (turn {:.0}°)", g.distance_m, g.bearing_deg, rel),
                None => format!("  → {:.0} m, {:.0}°", g.distance_m, g.bearing_deg),
            },
            None => String::new(),
        };
        println!(
            "{}  {}  {}{}",
            snap.timestamp().format("%H:%M:%S"),
            report.latitude,
            report.longitude,
            guidance,
        );
    }

    fn on_state_change(&mut self, _previous: Option<AccuracyState>, current: AccuracyState) {
        if let Some(warning) = current.warning() {
            println!("!! {warning}");
        }
    }
}

// ── Arguments ─────────────────────────────────────────────────────────────────

/// Replay a location track through the navigator.
#[derive(Debug, Parser)]
#[command(name = "replay", version, about)]
struct Args {
    /// Track CSV to replay.  Without one the simulated provider is used.
    #[arg(value_name = "TRACK_CSV")]
    track: Option<PathBuf>,

    /// JSON configuration file.
    #[arg(long, value_name = "CONFIG_JSON")]
    config: Option<PathBuf>,
}

fn load_track(args: &Args, config: &ReplayConfig) -> Result<Vec<LocationSnapshot>> {
    if let Some(path) = &args.track {
        let fixes = load_snapshots_csv(path)
            .with_context(|| format!("loading track {}", path.display()))?;
        info!("loaded {} fixes from {}", fixes.len(), path.display());
        return Ok(fixes);
    }

    let sim = SimulationConfig {
        start_time: Utc::now(),
        dropout: config.simulation.dropout,
        ..SimulationConfig::default()
    };
    let provider = SimulatedProvider::new(sim, config.simulation.seed)?;
    info!(
        "simulating {} fixes (seed {})",
        config.simulation.fixes, config.simulation.seed
    );
    Ok(provider.take(config.simulation.fixes).collect())
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => ReplayConfig::load(path)?,
        None => ReplayConfig::default(),
    };

    let fixes = load_track(&args, &config)?;

    let mut navigator = Navigator::new(config.thresholds);
    if let Some(stored) = config.stored_location {
        let target = LocationSnapshot::builder(stored.latitude, stored.longitude, Utc::now())
            .build()
            .context("stored_location")?;
        navigator.set_stored_location(target);
    }

    std::fs::create_dir_all(&config.output_dir)?;
    let reports_path = config.output_dir.join("reports.csv");
    let writer = CsvReportWriter::new(&reports_path)?;
    let mut observers = (ConsoleObserver, writer);

    let (tx, rx) = snapshot_channel(config.channel_capacity);
    let producer = thread::spawn(move || tx.send_all(fixes));

    let t0 = Instant::now();
    let summary = run_feed(rx, &mut navigator, &mut observers);
    let elapsed = t0.elapsed();

    match producer.join() {
        Ok(sent) => {
            sent?;
        }
        Err(_) => bail!("producer thread panicked"),
    }
    if let Some(e) = observers.1.take_error() {
        eprintln!("output error: {e}");
    }

    // Without a configured target, offer the last fix as the one to return to.
    if navigator.stored().is_none() && navigator.can_store_location() {
        let stored = navigator.store_current_location()?;
        println!("stored location: {}", stored.point());
    }

    println!();
    println!("Replay complete in {:.3} s", elapsed.as_secs_f64());
    println!("  {} : {} rows", reports_path.display(), observers.1.rows());
    write_summary(&config.output_dir, &summary)?;
    Ok(())
}

fn write_summary(dir: &Path, summary: &FeedSummary) -> Result<()> {
    let value = json!({
        "snapshots":           summary.snapshots,
        "accurate":            summary.accurate,
        "position_inaccurate": summary.position_inaccurate,
        "bearing_inaccurate":  summary.bearing_inaccurate,
        "state_changes":       summary.state_changes,
        "last_state":          summary.last_state.map(AccuracyState::as_str),
    });
    let path = dir.join("summary.json");
    std::fs::write(&path, serde_json::to_string_pretty(&value)?)?;
    println!("  {} written", path.display());
    Ok(())
}
