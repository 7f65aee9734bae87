use sigmoid_nn::{train_network, Dataset, Network, Sgd};

fn main() -> sigmoid_nn::Result<()> {
    let dataset = Dataset::from_pairs(2, 1, [
        (vec![0.0, 0.0], vec![0.0]),
        (vec![0.0, 1.0], vec![1.0]),
        (vec![1.0, 0.0], vec![1.0]),
        (vec![1.0, 1.0], vec![0.0]),
    ])?;

    let mut network = Network::with_seed(2, 1, 8, 1, 2024)?;
    let mut optimizer = Sgd::new(0.5).with_decay(0.9999, 0.001);
    let epochs = 10000;

    for epoch in 0..epochs {
        let loss = train_network(&mut network, &dataset, optimizer.learning_rate)?;
        optimizer.decay();
        if epoch % 1000 == 0 {
            println!("Epoch {epoch}: loss = {loss:.6}, lr = {:.6}", optimizer.learning_rate);
        }
    }

    let path = std::env::temp_dir().join("xor.model");
    network.save(&path)?;
    let mut loaded = Network::load(&path)?;

    for (input, _) in dataset.iter() {
        println!("Input: {:?} -> Output: {:.4}", input, loaded.forward(input)?[0]);
    }

    Ok(())
}
