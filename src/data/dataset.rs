//! Sample storage for the training drivers.
//!
//! Text format (the one the training programs read):
//! - one sample per line, numbers separated by any whitespace
//! - the first `inputs` numbers are the input vector, the next `outputs`
//!   numbers the target vector
//! - blank lines and lines starting with `#` are skipped

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{NetError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    inputs: usize,
    outputs: usize,
    samples: Vec<(Vec<f64>, Vec<f64>)>,
}

impl Dataset {
    /// Empty dataset for samples of the given widths; both must be non-zero.
    pub fn new(inputs: usize, outputs: usize) -> Result<Dataset> {
        if inputs == 0 || outputs == 0 {
            return Err(NetError::InvalidTopology { inputs, hidden_layers: 0, hidden_width: 0, outputs });
        }

        Ok(Dataset { inputs, outputs, samples: Vec::new() })
    }

    /// Builds a dataset from parallel input/target lists.
    pub fn from_pairs(
        inputs: usize,
        outputs: usize,
        pairs: impl IntoIterator<Item = (Vec<f64>, Vec<f64>)>,
    ) -> Result<Dataset> {
        let mut dataset = Dataset::new(inputs, outputs)?;
        for (input, target) in pairs {
            dataset.push(input, target)?;
        }
        Ok(dataset)
    }

    /// Appends a sample. Vectors of the wrong width are rejected, never padded.
    pub fn push(&mut self, input: Vec<f64>, target: Vec<f64>) -> Result<()> {
        if input.len() != self.inputs {
            return Err(NetError::ShapeMismatch { what: "sample input", got: input.len(), expected: self.inputs });
        }
        if target.len() != self.outputs {
            return Err(NetError::ShapeMismatch { what: "sample target", got: target.len(), expected: self.outputs });
        }

        self.samples.push((input, target));
        Ok(())
    }

    pub fn read_from<R: BufRead>(reader: R, inputs: usize, outputs: usize) -> Result<Dataset> {
        let mut dataset = Dataset::new(inputs, outputs)?;
        let width = inputs + outputs;

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let values = line.split_whitespace()
                .map(|cell| {
                    cell.parse::<f64>().map_err(|_| NetError::Dataset {
                        line: idx + 1,
                        reason: format!("{cell:?} is not a number"),
                    })
                })
                .collect::<Result<Vec<f64>>>()?;

            if values.len() != width {
                return Err(NetError::Dataset {
                    line: idx + 1,
                    reason: format!("expected {width} values ({inputs} inputs + {outputs} targets), got {}", values.len()),
                });
            }

            let (input, target) = values.split_at(inputs);
            dataset.samples.push((input.to_vec(), target.to_vec()));
        }

        Ok(dataset)
    }

    pub fn load(path: impl AsRef<Path>, inputs: usize, outputs: usize) -> Result<Dataset> {
        let file = File::open(path)?;
        Dataset::read_from(BufReader::new(file), inputs, outputs)
    }

    pub fn inputs(&self) -> usize {
        self.inputs
    }

    pub fn outputs(&self) -> usize {
        self.outputs
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<(&[f64], &[f64])> {
        self.samples.get(index).map(|(x, y)| (x.as_slice(), y.as_slice()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&[f64], &[f64])> + '_ {
        self.samples.iter().map(|(x, y)| (x.as_slice(), y.as_slice()))
    }
}
