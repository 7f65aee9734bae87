use rand::Rng;

use crate::activation::{sigmoid, sigmoid_derivative};
use crate::loss::mse::MseLoss;
use crate::math::matrix::Matrix;

/// Half-width of the uniform range new weights are drawn from.
pub const INIT_RANGE: f64 = 0.5;

/// One fully connected sigmoid layer.
///
/// `weights` is `size × (input_size + 1)`: row `j` holds the bias of neuron
/// `j` in column 0 followed by one weight per input. The flat storage of the
/// matrix is therefore exactly the on-disk order of this layer's weights.
#[derive(Debug, Clone)]
pub struct Layer {
    size: usize,
    input_size: usize,
    weights: Matrix,
    neurons: Vec<f64>, // activations from the last forward pass
    deltas: Vec<f64>,  // error signal from the last backward pass
}

impl Layer {
    pub fn new<R: Rng + ?Sized>(size: usize, input_size: usize, rng: &mut R) -> Layer {
        Layer::from_weights(size, input_size, Matrix::random(size, input_size + 1, INIT_RANGE, rng))
    }

    /// Wraps a pre-filled weight matrix. The caller guarantees its shape is
    /// `size × (input_size + 1)`.
    pub fn from_weights(size: usize, input_size: usize, weights: Matrix) -> Layer {
        debug_assert_eq!(weights.rows, size);
        debug_assert_eq!(weights.cols, input_size + 1);

        Layer {
            size,
            input_size,
            weights,
            neurons: vec![0.0; size],
            deltas: vec![0.0; size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    pub fn weights(&self) -> &Matrix {
        &self.weights
    }

    pub fn activations(&self) -> &[f64] {
        &self.neurons
    }

    /// Computes `sigmoid(bias + Σ input * weight)` for every neuron and
    /// caches the result.
    pub fn feed_from(&mut self, input: &[f64]) -> &[f64] {
        for (j, out) in self.neurons.iter_mut().enumerate() {
            let row = self.weights.row(j);
            let sum = row[1..]
                .iter()
                .zip(input)
                .fold(row[0], |acc, (w, x)| acc + w * x);

            *out = sigmoid(sum);
        }

        &self.neurons
    }

    /// Error signal of an output layer against `target`.
    pub fn output_deltas(&mut self, target: &[f64]) {
        for ((delta, &out), &expected) in self.deltas.iter_mut().zip(&self.neurons).zip(target) {
            *delta = MseLoss::derivative(out, expected) * sigmoid_derivative(out);
        }
    }

    /// Error signal of a hidden layer, pulled back through `next`'s weights.
    /// Must run before `next` applies its own update.
    pub fn hidden_deltas(&mut self, next: &Layer) {
        for (j, delta) in self.deltas.iter_mut().enumerate() {
            let pulled: f64 = (0..next.size)
                .map(|k| next.deltas[k] * next.weights[(k, j + 1)])
                .sum();

            *delta = pulled * sigmoid_derivative(self.neurons[j]);
        }
    }

    /// Plain gradient descent step; `inputs` are the activations that fed
    /// this layer on the last forward pass.
    pub fn apply_gradients(&mut self, inputs: &[f64], lr: f64) {
        for (j, &delta) in self.deltas.iter().enumerate() {
            let step = lr * delta;
            let row = self.weights.row_mut(j);

            row[0] -= step;
            for (w, x) in row[1..].iter_mut().zip(inputs) {
                *w -= step * x;
            }
        }
    }
}
