use serde::{Deserialize, Serialize};

use crate::error::{NetError, Result};

/// Largest supported number of hidden layers.
pub const MAX_HIDDEN_LAYERS: usize = 2;

/// Layer sizes of a network, fixed once the network is built.
///
/// Every hidden layer has the same width. With `hidden_layers == 0` the
/// inputs feed the outputs directly and `hidden_width` is carried along
/// unused (it is still written to the model header).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topology {
    pub inputs: usize,
    pub hidden_layers: usize,
    pub hidden_width: usize,
    pub outputs: usize,
}

impl Topology {
    pub fn new(inputs: usize, hidden_layers: usize, hidden_width: usize, outputs: usize) -> Topology {
        Topology { inputs, hidden_layers, hidden_width, outputs }
    }

    pub fn validate(&self) -> Result<()> {
        let hidden_ok = self.hidden_layers == 0 || self.hidden_width > 0;
        let sizes_fit = self.weight_count().is_some() && self.neuron_count().is_some();

        if self.inputs == 0 || self.outputs == 0 || self.hidden_layers > MAX_HIDDEN_LAYERS || !hidden_ok || !sizes_fit {
            return Err(self.invalid());
        }

        Ok(())
    }

    /// Validates the topology and returns its weight count.
    pub fn checked_weight_count(&self) -> Result<usize> {
        self.validate()?;
        self.weight_count().ok_or_else(|| self.invalid())
    }

    fn invalid(&self) -> NetError {
        NetError::InvalidTopology {
            inputs: self.inputs,
            hidden_layers: self.hidden_layers,
            hidden_width: self.hidden_width,
            outputs: self.outputs,
        }
    }

    /// Widths of every layer, input first and output last.
    ///
    /// At most `MAX_HIDDEN_LAYERS` hidden widths are listed, so an unchecked
    /// header never drives a huge allocation here.
    pub fn layer_widths(&self) -> Vec<usize> {
        let hidden = self.hidden_layers.min(MAX_HIDDEN_LAYERS);
        let mut widths = Vec::with_capacity(hidden + 2);
        widths.push(self.inputs);
        widths.extend(std::iter::repeat(self.hidden_width).take(hidden));
        widths.push(self.outputs);
        widths
    }

    /// Number of weights, one `(src + 1) * dst` block per layer transition.
    /// `None` when the count does not fit in `usize`.
    pub fn weight_count(&self) -> Option<usize> {
        self.layer_widths()
            .windows(2)
            .try_fold(0usize, |total, pair| {
                pair[0].checked_add(1)
                    .and_then(|src| src.checked_mul(pair[1]))
                    .and_then(|block| total.checked_add(block))
            })
    }

    /// Size of the activation cache, input layer included.
    /// `None` when the count does not fit in `usize`.
    pub fn neuron_count(&self) -> Option<usize> {
        self.layer_widths()
            .iter()
            .try_fold(0usize, |total, &width| total.checked_add(width))
    }
}

impl std::fmt::Display for Topology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}x{}-{}", self.inputs, self.hidden_layers, self.hidden_width, self.outputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_count_includes_bias_per_neuron() {
        assert_eq!(Topology::new(2, 1, 8, 1).weight_count(), Some(3 * 8 + 9 * 1));
        assert_eq!(Topology::new(6, 2, 8, 2).weight_count(), Some(7 * 8 + 9 * 8 + 9 * 2));
        assert_eq!(Topology::new(3, 0, 0, 2).weight_count(), Some(4 * 2));
    }

    #[test]
    fn neuron_count_sums_all_layers() {
        assert_eq!(Topology::new(5, 2, 8, 3).neuron_count(), Some(5 + 8 + 8 + 3));
        assert_eq!(Topology::new(5, 0, 8, 3).layer_widths(), vec![5, 3]);
    }

    #[test]
    fn rejects_unsupported_shapes() {
        assert!(Topology::new(0, 1, 4, 1).validate().is_err());
        assert!(Topology::new(2, 1, 4, 0).validate().is_err());
        assert!(Topology::new(2, 3, 4, 1).validate().is_err());
        assert!(Topology::new(2, 1, 0, 1).validate().is_err());
        assert!(Topology::new(2, 0, 0, 1).validate().is_ok());
    }

    #[test]
    fn oversized_counts_are_none_not_a_panic() {
        assert_eq!(Topology::new(2, 1, usize::MAX, 1).weight_count(), None);
        assert_eq!(Topology::new(usize::MAX, 0, 0, 1).weight_count(), None);
        assert_eq!(Topology::new(usize::MAX, 0, 0, 1).neuron_count(), None);
        assert_eq!(Topology::new(2, usize::MAX, 4, 1).layer_widths().len(), 4);

        assert!(matches!(
            Topology::new(usize::MAX, 0, 0, 1).validate(),
            Err(NetError::InvalidTopology { .. })
        ));
        assert!(Topology::new(usize::MAX / 2, 2, usize::MAX / 2, 1).validate().is_err());
    }
}
