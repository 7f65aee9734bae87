//! Plain-text and JSON persistence for [`Network`].
//!
//! Text layout:
//!
//! ```text
//! inputs hidden_layers hidden_width outputs
//! <weight>
//! <weight>
//! ...
//! ```
//!
//! Weights follow the layer order, and within a layer every neuron's bias
//! comes first followed by its incoming weights. They are written with 20
//! significant digits so reading them back is exact. The reader only looks
//! at whitespace-separated tokens, so files that put everything on one line
//! load too.

use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{NetError, Result};
use crate::network::network::Network;
use crate::network::topology::Topology;

/// JSON form of a trained network.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    pub topology: Topology,
    pub weights: Vec<f64>,
}

/// Formats the network in the text model layout.
impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = self.topology();
        writeln!(f, "{} {} {} {}", t.inputs, t.hidden_layers, t.hidden_width, t.outputs)?;

        for weight in self.weights() {
            writeln!(f, "{weight:.19e}")?;
        }

        Ok(())
    }
}

impl Network {
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        write!(writer, "{self}")?;
        writer.flush()?;
        Ok(())
    }

    pub fn read_from<R: Read>(mut reader: R) -> Result<Network> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;

        let text = std::str::from_utf8(&bytes)
            .map_err(|_| NetError::CorruptModel("model is not valid UTF-8".into()))?;

        Network::from_text(text)
    }

    pub fn to_text(&self) -> String {
        self.to_string()
    }

    pub fn from_text(text: &str) -> Result<Network> {
        let mut tokens = text.split_whitespace();

        let mut header = [0usize; 4];
        for (i, field) in ["inputs", "hidden_layers", "hidden_width", "outputs"].iter().enumerate() {
            let token = tokens.next()
                .ok_or_else(|| NetError::CorruptModel(format!("header ends before `{field}`")))?;

            header[i] = token.parse()
                .map_err(|_| NetError::CorruptModel(format!("`{field}` is not a count: {token:?}")))?;
        }

        let topology = Topology::new(header[0], header[1], header[2], header[3]);
        let expected = topology.checked_weight_count()
            .map_err(|e| NetError::CorruptModel(e.to_string()))?;

        let weights = tokens
            .enumerate()
            .map(|(i, token)| {
                token.parse::<f64>()
                    .map_err(|_| NetError::CorruptModel(format!("weight #{i} is not a number: {token:?}")))
            })
            .collect::<Result<Vec<f64>>>()?;

        if weights.len() != expected {
            return Err(NetError::CorruptModel(format!(
                "topology {topology} needs {expected} weights, found {}",
                weights.len()
            )));
        }

        let network = Network::from_weights(topology, weights)
            .map_err(|e| NetError::CorruptModel(e.to_string()))?;

        debug!("loaded network {topology} with {expected} weights");

        Ok(network)
    }

    /// Writes the text form to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path)?;
        self.write_to(BufWriter::new(file))
    }

    /// Reads a network written by `save`.
    pub fn load(path: impl AsRef<Path>) -> Result<Network> {
        let file = File::open(path)?;
        Network::read_from(BufReader::new(file))
    }

    pub fn snapshot(&self) -> NetworkSnapshot {
        NetworkSnapshot {
            topology: self.topology(),
            weights: self.weights().collect(),
        }
    }

    /// Serializes the network to a pretty-printed JSON file.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &self.snapshot())
            .map_err(io::Error::from)?;
        writer.flush()?;
        Ok(())
    }

    /// Deserializes a network from a JSON file previously written by `save_json`.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Network> {
        let file = File::open(path)?;
        let snapshot: NetworkSnapshot = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| NetError::CorruptModel(e.to_string()))?;

        Network::try_from(snapshot)
    }
}

impl TryFrom<NetworkSnapshot> for Network {
    type Error = NetError;

    fn try_from(snapshot: NetworkSnapshot) -> Result<Network> {
        Network::from_weights(snapshot.topology, snapshot.weights)
            .map_err(|e| NetError::CorruptModel(e.to_string()))
    }
}
