use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::network::network::Network;

/// Plain SGD with a multiplicative learning-rate decay.
///
/// The decay is applied by the caller, normally once per epoch, and stops
/// once the rate has dropped to `min`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sgd {
    pub learning_rate: f64,
    pub decay: f64,
    pub min: f64,
}

impl Sgd {
    /// Constant learning rate.
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate, decay: 1.0, min: 0.0 }
    }

    pub fn with_decay(mut self, decay: f64, min: f64) -> Sgd {
        self.decay = decay;
        self.min = min;
        self
    }

    /// Trains `network` on one sample at the current rate; returns its error.
    pub fn step(&self, network: &mut Network, input: &[f64], target: &[f64]) -> Result<f64> {
        network.train_one(input, target, self.learning_rate)
    }

    pub fn decay(&mut self) {
        if self.learning_rate > self.min {
            self.learning_rate *= self.decay;
        }
    }
}
