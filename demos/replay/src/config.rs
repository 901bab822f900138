//! JSON configuration for the replay demo.
//!
//! Every key is optional:
//!
//! ```json
//! {
//!   "thresholds": { "max_position_error_m": 10.0, "min_speed_for_bearing_mps": 1.0 },
//!   "channel_capacity": 64,
//!   "stored_location": { "latitude": 51.2194, "longitude": 4.4025 },
//!   "output_dir": "output/replay",
//!   "simulation": { "seed": 42, "fixes": 120, "dropout": 0.05 }
//! }
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use nav_accuracy::AccuracyThresholds;

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
    pub thresholds:       AccuracyThresholds,
    pub channel_capacity: usize,
    /// Location to navigate back to.  Without one, no guidance is produced.
    pub stored_location:  Option<StoredLocation>,
    pub output_dir:       PathBuf,
    /// Used only when no track file is given.
    pub simulation:       SimulationSettings,
}

#[derive(Copy, Clone, Debug, Deserialize)]
pub struct StoredLocation {
    pub latitude:  f64,
    pub longitude: f64,
}

#[derive(Copy, Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    pub seed:    u64,
    pub fixes:   usize,
    pub dropout: f64,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            thresholds:       AccuracyThresholds::default(),
            channel_capacity: 64,
            stored_location:  None,
            output_dir:       PathBuf::from("output/replay"),
            simulation:       SimulationSettings::default(),
        }
    }
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self { seed: 42, fixes: 120, dropout: 0.05 }
    }
}

impl ReplayConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.thresholds.validate()?;
        Ok(config)
    }
}
