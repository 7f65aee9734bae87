use sigmoid_nn::{
    evaluate, train::argmax, train_loop, Dataset, NetError, Network, Sgd, Topology, TrainConfig,
};

fn xor() -> Dataset {
    Dataset::from_pairs(2, 1, [
        (vec![0.0, 0.0], vec![0.0]),
        (vec![0.0, 1.0], vec![1.0]),
        (vec![1.0, 0.0], vec![1.0]),
        (vec![1.0, 1.0], vec![0.0]),
    ])
    .unwrap()
}

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("sigmoid-nn-{}-{name}", std::process::id()))
}

#[test]
fn fresh_networks_produce_sigmoid_range_outputs() {
    for (seed, (i, l, h, o)) in [(2, 0, 0, 3), (2, 1, 8, 1), (6, 2, 8, 2), (5, 1, 8, 3)].into_iter().enumerate() {
        let mut net = Network::with_seed(i, l, h, o, seed as u64).unwrap();
        let input: Vec<f64> = (0..i).map(|k| k as f64 * 0.5 - 1.0).collect();

        let output = net.forward(&input).unwrap();
        assert_eq!(output.len(), o);
        assert!(output.iter().all(|y| !y.is_nan() && *y > 0.0 && *y < 1.0), "{output:?}");
    }
}

#[test]
fn inference_is_idempotent() {
    let mut net = Network::with_seed(4, 2, 6, 3, 17).unwrap();
    let input = [0.3, -1.2, 0.0, 2.5];

    let first = net.forward(&input).unwrap().to_vec();
    let second = net.forward(&input).unwrap().to_vec();
    assert_eq!(first, second);
}

#[test]
fn shape_mismatches_are_reported() {
    let mut net = Network::with_seed(2, 1, 8, 1, 0).unwrap();

    assert!(matches!(net.forward(&[1.0]), Err(NetError::ShapeMismatch { got: 1, expected: 2, .. })));
    assert!(matches!(net.forward(&[1.0, 0.0, 0.0]), Err(NetError::ShapeMismatch { got: 3, expected: 2, .. })));
    assert!(matches!(
        net.train_one(&[1.0, 0.0], &[1.0, 1.0], 0.5),
        Err(NetError::ShapeMismatch { got: 2, expected: 1, .. })
    ));
}

#[test]
fn xor_converges_with_decaying_rate() {
    let data = xor();
    let mut net = Network::with_seed(2, 1, 8, 1, 2024).unwrap();
    let mut sgd = Sgd::new(0.5).with_decay(0.9999, 0.001);

    for _ in 0..10_000 {
        for (input, target) in data.iter() {
            sgd.step(&mut net, input, target).unwrap();
        }
        sgd.decay();
    }

    for (input, target) in data.iter() {
        let y = net.forward(input).unwrap()[0];
        assert!((y - target[0]).abs() < 0.1, "{input:?} -> {y}, want {}", target[0]);
    }
}

#[test]
fn one_hot_classes_are_learned() {
    let classes = [2, 2, 1, 0, 2];
    let data = Dataset::from_pairs(5, 3, classes.iter().enumerate().map(|(i, &c)| {
        let mut input = vec![0.0; 5];
        let mut target = vec![0.0; 3];
        input[i] = 1.0;
        target[c] = 1.0;
        (input, target)
    }))
    .unwrap();

    let mut net = Network::with_seed(5, 1, 8, 3, 7).unwrap();
    let mut config = TrainConfig::new(2000, 0.5);
    config.seed = Some(7);
    train_loop(&mut net, &data, &config).unwrap();

    for (input, target) in data.iter() {
        let output = net.forward(input).unwrap();
        assert_eq!(argmax(output), argmax(target), "{input:?} -> {output:?}");
    }
}

#[test]
fn trained_network_survives_text_file_round_trip() {
    let data = xor();
    let mut net = Network::with_seed(2, 2, 5, 1, 99).unwrap();
    train_loop(&mut net, &data, &TrainConfig::new(200, 0.5)).unwrap();

    let path = temp_path("round-trip.model");
    net.save(&path).unwrap();
    let mut loaded = Network::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded.topology(), net.topology());
    assert_eq!(loaded.hidden_layers(), 2);
    assert_eq!(loaded.hidden_width(), 5);
    assert!(loaded.weights().map(f64::to_bits).eq(net.weights().map(f64::to_bits)));

    assert_eq!(evaluate(&mut loaded, &data).unwrap(), evaluate(&mut net, &data).unwrap());
}

#[test]
fn json_snapshot_round_trip() {
    let net = Network::with_seed(3, 1, 4, 2, 5).unwrap();

    let path = temp_path("snapshot.json");
    net.save_json(&path).unwrap();
    let loaded = Network::load_json(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded.topology(), Topology::new(3, 1, 4, 2));
    for (a, b) in loaded.weights().zip(net.weights()) {
        assert!((a - b).abs() <= f64::EPSILON * b.abs().max(1.0));
    }
}

#[test]
fn truncated_model_is_corrupt() {
    let topology = Topology::new(6, 2, 8, 2);
    let weights: Vec<String> = (0..topology.weight_count().unwrap() - 10).map(|i| format!("{}", i as f64 * 0.001)).collect();
    let text = format!("6 2 8 2\n{}\n", weights.join("\n"));

    match Network::from_text(&text) {
        Err(NetError::CorruptModel(reason)) => assert!(reason.contains("weights"), "{reason}"),
        other => panic!("expected CorruptModel, got {other:?}"),
    }
}

#[test]
fn missing_model_file_is_an_io_error() {
    let result = Network::load(temp_path("does-not-exist.model"));
    assert!(matches!(result, Err(NetError::Io(_))));
}

#[test]
fn dataset_file_feeds_training() {
    let path = temp_path("xor.txt");
    std::fs::write(&path, "0 0 0\n0 1 1\n1 0 1\n1 1 0\n").unwrap();
    let data = Dataset::load(&path, 2, 1).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(data, xor());
}
