pub mod error;
pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod optim;
pub mod data;
pub mod train;

// Convenience re-exports
pub use error::{NetError, Result};
pub use math::matrix::Matrix;
pub use activation::{sigmoid, sigmoid_derivative};
pub use layers::dense::Layer;
pub use network::network::Network;
pub use network::persist::NetworkSnapshot;
pub use network::topology::Topology;
pub use loss::mse::MseLoss;
pub use optim::sgd::Sgd;
pub use data::dataset::Dataset;
pub use train::{train_network, train_loop, evaluate, TrainConfig, EpochStats};
