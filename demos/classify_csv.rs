//! Splits a labeled CSV dataset, classifies the held-out rows and prints the accuracy.
//!
//! Every row holds the features followed by an integer class index. Run with
//! `RUST_LOG=sdr_knn=trace` to see the nearest neighbors of every query.
use clap::Parser;
use rand::SeedableRng;
use sdr_knn::{extract_labels, load_rows_from_path, score, Classifier, FeatureVector, Knn};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(about = "k-nearest-neighbor classification of a labeled CSV dataset")]
struct Args {
    /// Comma separated rows, the last column being the class index.
    dataset: PathBuf,

    /// Number of voting neighbors.
    #[arg(short, long, default_value_t = 3)]
    k: usize,

    /// Share of the rows used for training.
    #[arg(long, default_value_t = 0.7)]
    train_ratio: f64,

    /// Seed of the shuffle that splits the dataset.
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sdr_knn=info".into()),
        )
        .init();

    let args = Args::parse();
    let dataset = load_rows_from_path(&args.dataset)?;
    let labeled = dataset.labeled()?;

    let mut rng = rand_xoshiro::Xoshiro256PlusPlus::seed_from_u64(args.seed);
    let indices = sdr_knn::split_indices(labeled.len(), args.train_ratio, &mut rng)?;
    let training = indices.training.iter().map(|&i| labeled[i].clone()).collect();
    let testing: Vec<&Vec<f64>> = indices.testing.iter().map(|&i| &dataset.rows()[i]).collect();
    if testing.is_empty() {
        eprintln!("No rows left for testing; lower --train-ratio.");
        return Ok(());
    }

    let knn = Knn::new(training)?.k(args.k);
    let queries: Vec<FeatureVector> = indices
        .testing
        .iter()
        .map(|&i| labeled[i].features.clone())
        .collect();
    let predicted = knn.classify(&queries)?;
    let actual = extract_labels(&testing)?;

    for (query, (p, a)) in indices.testing.iter().zip(predicted.iter().zip(&actual)) {
        println!("row {:>5}: predicted {:>3}, actual {:>3}", query + 1, p, a);
    }
    let score = score(&predicted, &actual)?;
    println!(
        "Accuracy: {:.2}% ({} of {})",
        score.percent(),
        score.correct(),
        score.total()
    );
    Ok(())
}
