use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use log::info;

use sigmoid_nn::{train_loop, Dataset, Network, TrainConfig};

#[derive(Debug, Parser)]
#[command(name = "sigmoid-nn", about = "Train and run small sigmoid networks")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Train a fresh network on a whitespace-separated dataset and save it
    Train(TrainArgs),

    /// Load a model and print its outputs
    Run {
        #[arg(long)]
        model: PathBuf,

        /// Single input vector, e.g. "0 1"
        #[arg(long, conflicts_with = "data")]
        input: Option<String>,

        /// File with one input vector per line; rows may carry trailing target columns
        #[arg(long)]
        data: Option<PathBuf>,
    },

    /// Print the topology of a saved model
    Inspect {
        #[arg(long)]
        model: PathBuf,
    },
}

#[derive(Debug, Args)]
struct TrainArgs {
    #[arg(long)]
    data: PathBuf,

    #[arg(long)]
    inputs: usize,

    #[arg(long, default_value_t = 1)]
    hidden_layers: usize,

    #[arg(long, default_value_t = 8)]
    hidden_width: usize,

    #[arg(long)]
    outputs: usize,

    /// Output path; `.json` writes a JSON snapshot, anything else the text format
    #[arg(long)]
    model: PathBuf,

    /// JSON training config; the flags below override its fields
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    epochs: Option<usize>,

    #[arg(long)]
    learning_rate: Option<f64>,

    #[arg(long)]
    lr_decay: Option<f64>,

    #[arg(long)]
    lr_min: Option<f64>,

    /// Seeds both the initial weights and the shuffle
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    shuffle: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Cli::parse().command {
        Command::Train(args) => train(args),
        Command::Run { model, input, data } => run(&model, input, data),
        Command::Inspect { model } => {
            let network = load_model(&model)?;
            println!("topology: {}", network.topology());
            println!("weights:  {}", network.weight_count());
            Ok(())
        }
    }
}

fn train(args: TrainArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => TrainConfig::load_json(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => TrainConfig::default(),
    };

    if let Some(epochs) = args.epochs { config.epochs = epochs; }
    if let Some(lr) = args.learning_rate { config.learning_rate = lr; }
    if let Some(decay) = args.lr_decay { config.lr_decay = decay; }
    if let Some(min) = args.lr_min { config.lr_min = min; }
    if args.seed.is_some() { config.seed = args.seed; }
    config.shuffle |= args.shuffle;

    let dataset = Dataset::load(&args.data, args.inputs, args.outputs)
        .with_context(|| format!("reading dataset {}", args.data.display()))?;
    if dataset.is_empty() {
        bail!("dataset {} has no samples", args.data.display());
    }

    let mut network = match config.seed {
        Some(seed) => Network::with_seed(args.inputs, args.hidden_layers, args.hidden_width, args.outputs, seed)?,
        None => Network::random(args.inputs, args.hidden_layers, args.hidden_width, args.outputs)?,
    };

    let loss = train_loop(&mut network, &dataset, &config)?;

    save_model(&network, &args.model)?;
    info!("saved {} to {} (final loss {loss:.6})", network.topology(), args.model.display());

    Ok(())
}

fn run(model: &Path, input: Option<String>, data: Option<PathBuf>) -> anyhow::Result<()> {
    let mut network = load_model(model)?;

    let (rows, with_targets) = match (input, data) {
        (Some(line), _) => (vec![line], false),
        (None, Some(path)) => {
            let rows = std::fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?
                .lines()
                .map(str::to_owned)
                .filter(|line| !line.trim().is_empty() && !line.trim_start().starts_with('#'))
                .collect();
            (rows, true)
        }
        (None, None) => bail!("either --input or --data is required"),
    };

    for row in rows {
        let values = row.split_whitespace()
            .map(|cell| cell.parse::<f64>().with_context(|| format!("{cell:?} is not a number")))
            .collect::<anyhow::Result<Vec<f64>>>()?;

        let input = if with_targets {
            input_columns(&values, network.inputs(), network.outputs())?
        } else {
            values.as_slice()
        };

        let output = network.forward(input)?;
        let formatted: Vec<String> = output.iter().map(|y| format!("{y:.4}")).collect();

        println!("{input:?} -> [{}]", formatted.join(", "));
    }

    Ok(())
}

/// Picks the input columns of a data row, which holds either the inputs
/// alone or the inputs followed by their targets.
fn input_columns(values: &[f64], inputs: usize, outputs: usize) -> anyhow::Result<&[f64]> {
    if values.len() != inputs && values.len() != inputs + outputs {
        bail!(
            "expected {inputs} input values or {} input and target values, got {}",
            inputs + outputs,
            values.len()
        );
    }

    Ok(&values[..inputs])
}

fn is_json(path: &Path) -> bool {
    path.extension().map(|ext| ext == "json").unwrap_or(false)
}

fn load_model(path: &Path) -> anyhow::Result<Network> {
    let network = if is_json(path) {
        Network::load_json(path)
    } else {
        Network::load(path)
    };

    network.with_context(|| format!("loading model {}", path.display()))
}

fn save_model(network: &Network, path: &Path) -> anyhow::Result<()> {
    let result = if is_json(path) {
        network.save_json(path)
    } else {
        network.save(path)
    };

    result.with_context(|| format!("saving model {}", path.display()))
}
