use std::{
    error::Error,
    fmt::{self, Display},
    io,
};

/// The result type used across the crate.
pub type Result<T> = std::result::Result<T, NetError>;

/// Everything the engine and its drivers can fail with.
#[derive(Debug)]
pub enum NetError {
    /// A layer width is zero or the hidden-layer count is unsupported.
    InvalidTopology {
        inputs: usize,
        hidden_layers: usize,
        hidden_width: usize,
        outputs: usize,
    },
    /// A vector handed to the network has the wrong length.
    ShapeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    /// Persisted model data could not be turned back into a network.
    CorruptModel(String),
    /// A dataset line could not be parsed.
    Dataset { line: usize, reason: String },
    /// A training config file could not be parsed.
    Config(String),
    Io(io::Error),
}

impl Display for NetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetError::InvalidTopology {
                inputs,
                hidden_layers,
                hidden_width,
                outputs,
            } => write!(
                f,
                "invalid topology {inputs}-{hidden_layers}x{hidden_width}-{outputs}: \
                 widths must be non-zero and at most 2 hidden layers are supported"
            ),
            NetError::ShapeMismatch { what, got, expected } => {
                write!(f, "shape mismatch for {what}: got {got}, expected {expected}")
            }
            NetError::CorruptModel(reason) => write!(f, "corrupt model: {reason}"),
            NetError::Dataset { line, reason } => write!(f, "dataset line {line}: {reason}"),
            NetError::Config(reason) => write!(f, "invalid training config: {reason}"),
            NetError::Io(e) => write!(f, "i/o error: {e}"),
        }
    }
}

impl Error for NetError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            NetError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for NetError {
    fn from(e: io::Error) -> Self {
        NetError::Io(e)
    }
}
