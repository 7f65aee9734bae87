//! Obstacle-avoidance controller: six sensor/state flags in, two motor
//! speeds out, two hidden layers of eight neurons.

use sigmoid_nn::{train_loop, Dataset, Network, TrainConfig};

fn main() -> sigmoid_nn::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let lines = [
        // normal drive
        "0 0 0 0 0 0   0.5 0.5",
        "1 0 0 0 0 0   1.0 1.0",
        "0 1 0 0 0 0   0.5 1.0",
        "0 0 1 0 0 0   0.0 0.0",
        "0 0 0 1 0 0   1.0 0.5",
        // sensor stop
        "0 0 0 0 1 0   0.5 0.5",
        "1 0 0 0 1 0   0.5 0.5",
        "0 1 0 0 1 0   0.5 0.5",
        "0 0 1 0 1 0   0.0 0.0",
        "0 0 0 1 1 0   0.5 0.5",
        // remote stop
        "0 0 0 0 0 1   0.5 0.5",
        "1 0 0 0 0 1   0.5 0.5",
        "0 1 0 0 0 1   0.5 0.5",
        "0 0 1 0 0 1   0.0 0.0",
        "0 0 0 1 0 1   0.5 0.5",
        // both
        "0 0 0 0 1 1   0.5 0.5",
        "1 0 0 0 1 1   0.5 0.5",
        "0 1 0 0 1 1   0.5 0.5",
        "0 0 1 0 1 1   0.0 0.0",
        "0 0 0 1 1 1   0.5 0.5",
    ];
    let dataset = Dataset::read_from(lines.join("\n").as_bytes(), 6, 2)?;

    let mut network = Network::random(6, 2, 8, 2)?;

    let mut config = TrainConfig::new(20_000, 0.5);
    config.report_every = 2000;
    train_loop(&mut network, &dataset, &config)?;

    for (i, (input, _)) in dataset.iter().take(6).enumerate() {
        let output = network.forward(input)?;
        println!("Output for {i} is [{:.2}, {:.2}]", output[0], output[1]);
    }

    let path = std::env::temp_dir().join("CarNN-6-2-8-2.model");
    network.save(&path)?;
    println!("saved to {}", path.display());

    Ok(())
}
