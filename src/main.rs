use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;

use crop_recommender::data::download::ensure_dataset;
use crop_recommender::data::preprocessing::load_dataset;
use crop_recommender::utils::input::prediction_loop;
use crop_recommender::utils::io::save_artifact;
use crop_recommender::utils::plot::create_plot;
use crop_recommender::{train_model, CropRecommender, TrainConfig};

#[derive(Parser, Debug)]
#[command(author, version, about = "crop-train: fit crop classifiers and keep the most accurate")]
struct Cli {
    /// Labelled CSV with N,P,K,temperature,humidity,ph,rainfall,label columns
    #[arg(long, default_value = "crop_recommendation.csv")]
    dataset: PathBuf,

    /// Where to download the CSV from when it is not present locally.
    ///
    /// There is no built-in source: without this flag a missing --dataset
    /// file stops the run before training.
    #[arg(long, env = "CROP_DATASET_URL")]
    dataset_url: Option<String>,

    /// Output path for the winning classifier
    #[arg(long, default_value = "ml_model/best_model.bin")]
    model_out: PathBuf,

    /// Output path for the fitted scaler
    #[arg(long, default_value = "ml_model/scaler.bin")]
    scaler_out: PathBuf,

    /// Fraction of rows held out for scoring
    #[arg(long, default_value = "0.2")]
    test_size: f64,

    /// Seed for the split and the randomized models
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Write an accuracy bar chart to this PNG
    #[arg(long)]
    plot: Option<PathBuf>,

    /// Skip the interactive prediction prompt after training
    #[arg(long)]
    no_interactive: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    anyhow::ensure!(
        cli.test_size > 0.0 && cli.test_size < 1.0,
        "--test-size must be between 0 and 1, got {}",
        cli.test_size
    );

    println!("Downloading/Loading dataset...");
    ensure_dataset(&cli.dataset, cli.dataset_url.as_deref())
        .with_context(|| format!("failed to obtain dataset {}", cli.dataset.display()))?;
    let dataset = load_dataset(&cli.dataset)
        .with_context(|| format!("failed to read {}", cli.dataset.display()))?;

    let config = TrainConfig {
        test_size: cli.test_size,
        seed: cli.seed,
        ..TrainConfig::default()
    };
    let outcome = train_model(&dataset, &config).context("training failed")?;

    println!("\nTraining Models:");
    for (kind, accuracy) in outcome.history.iter() {
        println!("{}: {:.2}%", kind, accuracy * 100.0);
    }

    println!("\nSaving best model ({}) and scaler...", outcome.model.kind());
    save_artifact(&cli.model_out, &outcome.model)
        .with_context(|| format!("failed to write {}", cli.model_out.display()))?;
    save_artifact(&cli.scaler_out, &outcome.scaler)
        .with_context(|| format!("failed to write {}", cli.scaler_out.display()))?;
    println!("Artifacts saved successfully.");

    if let Some(plot_path) = &cli.plot {
        create_plot(&outcome.history, plot_path)
            .with_context(|| format!("failed to draw {}", plot_path.display()))?;
        println!("Accuracy chart written to {}", plot_path.display());
    }

    if !cli.no_interactive {
        let recommender = CropRecommender::new(outcome.model, outcome.scaler)?;
        let stdin = io::stdin();
        prediction_loop(&recommender, &mut stdin.lock(), &mut io::stdout())?;
    }

    Ok(())
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(io::stderr)
        .init();
}
