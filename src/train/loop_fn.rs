use std::sync::atomic::Ordering;
use std::time::Instant;

use log::{info, warn};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::data::dataset::Dataset;
use crate::error::{NetError, Result};
use crate::network::network::Network;
use crate::optim::sgd::Sgd;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;
use crate::train::trainer::accuracy;

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Trains `network` for `config.epochs` epochs and returns the mean training
/// loss of the **last completed epoch**.
///
/// Every epoch trains each sample once with `train_one`, then decays the
/// learning rate. Progress is logged every `config.report_every` epochs.
///
/// # Early termination
/// The loop breaks early if:
/// - the `progress_tx` receiver has been dropped, **or**
/// - `config.stop_flag` is set to `true`.
///
/// # Errors
/// `ShapeMismatch` if the dataset widths disagree with the network.
pub fn train_loop(network: &mut Network, dataset: &Dataset, config: &TrainConfig) -> Result<f64> {
    if dataset.inputs() != network.inputs() {
        return Err(NetError::ShapeMismatch { what: "dataset inputs", got: dataset.inputs(), expected: network.inputs() });
    }
    if dataset.outputs() != network.outputs() {
        return Err(NetError::ShapeMismatch { what: "dataset targets", got: dataset.outputs(), expected: network.outputs() });
    }

    let mut optimizer = config.optimizer();
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut order: Vec<usize> = (0..dataset.len()).collect();
    let mut last_train_loss = 0.0;

    info!(
        "training {} on {} samples for {} epochs (lr {}, decay {}, min {})",
        network.topology(), dataset.len(), config.epochs, config.learning_rate, config.lr_decay, config.lr_min
    );

    for epoch in 1..=config.epochs {
        if stop_requested(config) {
            info!("stop requested before epoch {epoch}");
            break;
        }

        let t_start = Instant::now();

        if config.shuffle {
            order.shuffle(&mut rng);
        }

        let learning_rate = optimizer.learning_rate;
        let train_loss = run_one_epoch(network, dataset, &order, &optimizer)?;
        last_train_loss = train_loss;
        optimizer.decay();

        let elapsed_ms = t_start.elapsed().as_millis() as u64;

        if !train_loss.is_finite() {
            warn!("epoch {epoch}: loss is {train_loss}, learning rate {learning_rate} may be too high");
        }

        if config.report_every > 0 && epoch % config.report_every == 0 {
            info!("epoch {epoch}/{}: loss = {train_loss:.6}, lr = {learning_rate:.6}", config.epochs);
        }

        if let Some(ref tx) = config.progress_tx {
            let hit_rate = if network.outputs() > 1 {
                Some(accuracy(network, dataset)?)
            } else {
                None
            };

            let stats = EpochStats {
                epoch,
                total_epochs: config.epochs,
                train_loss,
                learning_rate,
                accuracy: hit_rate,
                elapsed_ms,
            };

            // If the receiver has been dropped, stop training.
            if tx.send(stats).is_err() {
                break;
            }
        }
    }

    info!("training finished: loss = {last_train_loss:.6}, lr = {:.6}", optimizer.learning_rate);

    Ok(last_train_loss)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn stop_requested(config: &TrainConfig) -> bool {
    config.stop_flag
        .as_ref()
        .map(|flag| flag.load(Ordering::Relaxed))
        .unwrap_or(false)
}

/// Trains every sample once in `order`. Returns the mean loss.
fn run_one_epoch(network: &mut Network, dataset: &Dataset, order: &[usize], optimizer: &Sgd) -> Result<f64> {
    let mut total_loss = 0.0;

    for &idx in order {
        if let Some((input, target)) = dataset.get(idx) {
            total_loss += optimizer.step(network, input, target)?;
        }
    }

    Ok(if order.is_empty() { 0.0 } else { total_loss / order.len() as f64 })
}
