use crate::{
    data::dataset::Dataset,
    error::Result,
    loss::mse::MseLoss,
    network::network::Network,
};

/// One in-order pass over `dataset` at a fixed learning rate.
///
/// Returns the mean of the per-sample errors reported by `train_one`.
pub fn train_network(network: &mut Network, dataset: &Dataset, learning_rate: f64) -> Result<f64> {
    let mut total_loss = 0.0;

    for (input, target) in dataset.iter() {
        total_loss += network.train_one(input, target, learning_rate)?;
    }

    Ok(mean(total_loss, dataset.len()))
}

/// Mean error over `dataset` without touching the weights.
pub fn evaluate(network: &mut Network, dataset: &Dataset) -> Result<f64> {
    let mut total_loss = 0.0;

    for (input, target) in dataset.iter() {
        let output = network.forward(input)?;
        total_loss += MseLoss::loss(output, target);
    }

    Ok(mean(total_loss, dataset.len()))
}

/// Fraction of samples whose strongest output matches the strongest target.
pub fn accuracy(network: &mut Network, dataset: &Dataset) -> Result<f64> {
    let mut correct = 0;

    for (input, target) in dataset.iter() {
        if argmax(network.forward(input)?) == argmax(target) {
            correct += 1;
        }
    }

    Ok(mean(correct as f64, dataset.len()))
}

/// Index of the maximum element in a slice.
pub fn argmax(v: &[f64]) -> usize {
    v.iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)
        .unwrap_or(0)
}

fn mean(total: f64, n: usize) -> f64 {
    if n == 0 { 0.0 } else { total / n as f64 }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn and_gate() -> Dataset {
        Dataset::from_pairs(2, 1, [
            (vec![0.0, 0.0], vec![0.0]),
            (vec![0.0, 1.0], vec![0.0]),
            (vec![1.0, 0.0], vec![0.0]),
            (vec![1.0, 1.0], vec![1.0]),
        ]).unwrap()
    }

    #[test]
    fn epochs_reduce_the_error() {
        let data = and_gate();
        let mut net = Network::with_seed(2, 1, 4, 1, 3).unwrap();

        let before = evaluate(&mut net, &data).unwrap();
        for _ in 0..500 {
            train_network(&mut net, &data, 0.5).unwrap();
        }
        let after = evaluate(&mut net, &data).unwrap();

        assert!(after < before, "{after} >= {before}");
    }

    #[test]
    fn evaluate_does_not_train() {
        let data = and_gate();
        let mut net = Network::with_seed(2, 1, 4, 1, 3).unwrap();
        let weights: Vec<f64> = net.weights().collect();

        evaluate(&mut net, &data).unwrap();
        assert!(net.weights().eq(weights));
    }

    #[test]
    fn mismatched_dataset_is_reported() {
        let data = and_gate();
        let mut net = Network::with_seed(3, 1, 4, 1, 3).unwrap();
        assert!(train_network(&mut net, &data, 0.5).is_err());
    }

    #[test]
    fn argmax_picks_the_largest_value() {
        assert_eq!(argmax(&[0.1, 0.7, 0.2]), 1);
        assert_eq!(argmax(&[]), 0);
    }
}
