use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;
use std::sync::mpsc;
use std::sync::{Arc, atomic::AtomicBool};

use serde::{Deserialize, Serialize};

use crate::error::{NetError, Result};
use crate::optim::sgd::Sgd;
use crate::train::epoch_stats::EpochStats;

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `epochs`        — total number of full passes over the training data
/// - `learning_rate` — rate used for the first epoch
/// - `lr_decay`      — factor applied to the rate after every epoch
/// - `lr_min`        — the rate is no longer decayed once it is at or below this
/// - `report_every`  — log an `info` line every this many epochs (0 = never)
/// - `shuffle`       — visit samples in a fresh random order every epoch
/// - `seed`          — seed for the shuffle; entropy-seeded when absent
/// - `progress_tx`   — optional channel sender; one `EpochStats` is sent per
///                     completed epoch.  If the receiver is dropped the loop
///                     terminates early.
/// - `stop_flag`     — optional atomic flag; when set to `true` from another
///                     thread the loop terminates after the current epoch.
///
/// Only the numeric fields are read from / written to JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    pub epochs: usize,
    pub learning_rate: f64,
    pub lr_decay: f64,
    pub lr_min: f64,
    pub report_every: usize,
    pub shuffle: bool,
    pub seed: Option<u64>,
    #[serde(skip)]
    pub progress_tx: Option<mpsc::Sender<EpochStats>>,
    #[serde(skip)]
    pub stop_flag: Option<Arc<AtomicBool>>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            epochs: 10_000,
            learning_rate: 0.5,
            lr_decay: 0.9999,
            lr_min: 0.001,
            report_every: 1000,
            shuffle: false,
            seed: None,
            progress_tx: None,
            stop_flag: None,
        }
    }
}

impl TrainConfig {
    /// Creates a `TrainConfig` with the default decay schedule, no progress
    /// channel and no stop flag.
    pub fn new(epochs: usize, learning_rate: f64) -> Self {
        TrainConfig {
            epochs,
            learning_rate,
            ..TrainConfig::default()
        }
    }

    /// The optimizer this configuration starts training with.
    pub fn optimizer(&self) -> Sgd {
        Sgd::new(self.learning_rate).with_decay(self.lr_decay, self.lr_min)
    }

    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)
            .map_err(io::Error::from)?;
        writer.flush()?;
        Ok(())
    }

    /// Deserializes a config from a JSON file; missing fields take their defaults.
    pub fn load_json(path: impl AsRef<Path>) -> Result<TrainConfig> {
        let file = File::open(path)?;
        serde_json::from_reader(BufReader::new(file))
            .map_err(|e| NetError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config: TrainConfig = serde_json::from_str(r#"{ "epochs": 50, "shuffle": true }"#).unwrap();
        assert_eq!(config.epochs, 50);
        assert!(config.shuffle);
        assert_eq!(config.learning_rate, 0.5);
        assert_eq!(config.lr_decay, 0.9999);
        assert!(config.progress_tx.is_none());
    }

    #[test]
    fn json_file_round_trip() {
        let path = std::env::temp_dir().join(format!("sigmoid-nn-config-{}.json", std::process::id()));
        let mut config = TrainConfig::new(123, 0.25);
        config.seed = Some(9);

        config.save_json(&path).unwrap();
        let loaded = TrainConfig::load_json(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.epochs, 123);
        assert_eq!(loaded.learning_rate, 0.25);
        assert_eq!(loaded.seed, Some(9));
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let path = std::env::temp_dir().join(format!("sigmoid-nn-bad-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "epochs": "many" }"#).unwrap();
        let result = TrainConfig::load_json(&path);
        std::fs::remove_file(&path).ok();

        assert!(matches!(result, Err(NetError::Config(_))));
        assert!(matches!(TrainConfig::load_json(&path), Err(NetError::Io(_))));
    }
}
