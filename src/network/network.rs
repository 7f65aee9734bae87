use log::debug;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::error::{NetError, Result};
use crate::layers::dense::Layer;
use crate::loss::mse::MseLoss;
use crate::math::matrix::Matrix;
use crate::network::topology::Topology;

/// A feedforward sigmoid network with 0–2 equally wide hidden layers.
///
/// The network owns its weights and the activation cache of the last
/// forward pass. Both `forward` and `train_one` take `&mut self` because
/// they overwrite that cache.
#[derive(Debug, Clone)]
pub struct Network {
    topology: Topology,
    input: Vec<f64>, // echo of the last input, layer 0 of the cache
    layers: Vec<Layer>,
}

impl Network {
    /// Builds a network with weights drawn uniformly from `[-0.5, 0.5)`.
    pub fn new<R: Rng + ?Sized>(
        inputs: usize,
        hidden_layers: usize,
        hidden_width: usize,
        outputs: usize,
        rng: &mut R,
    ) -> Result<Network> {
        let topology = Topology::new(inputs, hidden_layers, hidden_width, outputs);
        let weight_count = topology.checked_weight_count()?;

        let layers = topology.layer_widths()
            .windows(2)
            .map(|pair| Layer::new(pair[1], pair[0], &mut *rng))
            .collect();

        debug!("built network {topology} with {weight_count} weights");

        Ok(Network {
            topology,
            input: vec![0.0; inputs],
            layers,
        })
    }

    /// Same as `new` with a deterministic `StdRng`.
    pub fn with_seed(
        inputs: usize,
        hidden_layers: usize,
        hidden_width: usize,
        outputs: usize,
        seed: u64,
    ) -> Result<Network> {
        Network::new(inputs, hidden_layers, hidden_width, outputs, &mut StdRng::seed_from_u64(seed))
    }

    /// Same as `new` with the thread-local RNG.
    pub fn random(inputs: usize, hidden_layers: usize, hidden_width: usize, outputs: usize) -> Result<Network> {
        Network::new(inputs, hidden_layers, hidden_width, outputs, &mut rand::thread_rng())
    }

    /// Rebuilds a network from weights in serialization order.
    pub fn from_weights(topology: Topology, weights: Vec<f64>) -> Result<Network> {
        let expected = topology.checked_weight_count()?;
        if weights.len() != expected {
            return Err(NetError::ShapeMismatch { what: "weights", got: weights.len(), expected });
        }

        let mut rest = weights.as_slice();
        let mut layers = Vec::with_capacity(topology.hidden_layers + 1);

        for pair in topology.layer_widths().windows(2) {
            let (src, dst) = (pair[0], pair[1]);
            let (segment, tail) = rest.split_at((src + 1) * dst);
            rest = tail;

            // segment length is (src + 1) * dst by construction
            let matrix = Matrix::from_flat(dst, src + 1, segment.to_vec())
                .ok_or(NetError::ShapeMismatch { what: "layer weights", got: segment.len(), expected: (src + 1) * dst })?;

            layers.push(Layer::from_weights(dst, src, matrix));
        }

        Ok(Network {
            topology,
            input: vec![0.0; topology.inputs],
            layers,
        })
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn inputs(&self) -> usize {
        self.topology.inputs
    }

    pub fn hidden_layers(&self) -> usize {
        self.topology.hidden_layers
    }

    pub fn hidden_width(&self) -> usize {
        self.topology.hidden_width
    }

    pub fn outputs(&self) -> usize {
        self.topology.outputs
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn weight_count(&self) -> usize {
        self.layers.iter().map(|layer| layer.weights().len()).sum()
    }

    /// Iterates every weight in serialization order.
    pub fn weights(&self) -> impl Iterator<Item = f64> + '_ {
        self.layers.iter().flat_map(|layer| layer.weights().as_slice().iter().copied())
    }

    /// The activation cache: the last input followed by every layer's outputs.
    pub fn activations(&self) -> impl Iterator<Item = f64> + '_ {
        self.input.iter()
            .copied()
            .chain(self.layers.iter().flat_map(|layer| layer.activations().iter().copied()))
    }

    /// Runs the network on `input` and returns the output layer.
    ///
    /// Weights are untouched; the activation cache is overwritten.
    pub fn forward(&mut self, input: &[f64]) -> Result<&[f64]> {
        check_len("input", input, self.topology.inputs)?;

        self.input.copy_from_slice(input);

        for i in 0..self.layers.len() {
            let (done, rest) = self.layers.split_at_mut(i);
            let source = match done.last() {
                Some(prev) => prev.activations(),
                None => self.input.as_slice(),
            };

            rest[0].feed_from(source);
        }

        Ok(self.output())
    }

    /// One step of stochastic gradient descent on a single sample.
    ///
    /// Returns the mean squared error of the prediction made before the
    /// update. Nothing is modified when a vector has the wrong length.
    pub fn train_one(&mut self, input: &[f64], target: &[f64], learning_rate: f64) -> Result<f64> {
        check_len("input", input, self.topology.inputs)?;
        check_len("target", target, self.topology.outputs)?;

        self.forward(input)?;

        let last = self.layers.len() - 1;
        let error = MseLoss::loss(self.layers[last].activations(), target);

        self.layers[last].output_deltas(target);
        for i in (0..last).rev() {
            let (head, tail) = self.layers.split_at_mut(i + 1);
            head[i].hidden_deltas(&tail[0]);
        }

        for i in 0..self.layers.len() {
            let (done, rest) = self.layers.split_at_mut(i);
            let source = match done.last() {
                Some(prev) => prev.activations(),
                None => self.input.as_slice(),
            };

            rest[0].apply_gradients(source, learning_rate);
        }

        Ok(error)
    }

    fn output(&self) -> &[f64] {
        // validated topologies always have an output layer
        self.layers.last().map(Layer::activations).unwrap_or(&[])
    }
}

fn check_len(what: &'static str, values: &[f64], expected: usize) -> Result<()> {
    if values.len() != expected {
        return Err(NetError::ShapeMismatch { what, got: values.len(), expected });
    }

    Ok(())
}
