//! K-fold data-source planner CLI
//!
//! # Usage
//!
//! ```bash
//! # Plan folds from a settings file and write the manifest
//! kfold-datasource plan --config config/kfold.toml
//!
//! # Override the dataset and fold count from the command line
//! kfold-datasource plan --kfolds 4 --name banking \
//!     --location s3://bucket/banking.csv --schema-file banking.schema
//!
//! # Decode a split name
//! kfold-datasource name "banking [percentBegin=0, percentEnd=25, complement=true]"
//!
//! # Generate split IDs
//! kfold-datasource ids --count 3
//! ```

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use kfold_datasource::config::load_settings;
use kfold_datasource::datasource::{create_all, FoldManifest, InMemoryDataSources};
use kfold_datasource::fold::{generate_split_id, parse_descriptive_name, SplitStrategy};
use kfold_datasource::DatasetSpec;

const SEPARATOR: &str = "============================================================";

#[derive(Parser)]
#[command(name = "kfold-datasource")]
#[command(about = "Plan k-fold train/evaluation data-source splits")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build every fold's split pair and record the requests
    Plan {
        /// Path to settings file (defaults to kfold.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Number of folds
        #[arg(short, long)]
        kfolds: Option<u32>,

        /// Splitting strategy (sequential or random)
        #[arg(long)]
        strategy: Option<SplitStrategy>,

        /// Seed for the random strategy
        #[arg(long)]
        random_seed: Option<u64>,

        /// Dataset name
        #[arg(long)]
        name: Option<String>,

        /// Dataset location (e.g. s3://bucket/data.csv)
        #[arg(long)]
        location: Option<String>,

        /// File containing the dataset schema
        #[arg(long)]
        schema_file: Option<PathBuf>,

        /// Manifest output path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Decode a descriptive split name
    Name {
        /// Name produced for a split
        name: String,
    },

    /// Generate fresh split IDs
    Ids {
        /// How many IDs to print
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
    },
}

#[allow(clippy::too_many_arguments)]
fn cmd_plan(
    config: Option<PathBuf>,
    kfolds: Option<u32>,
    strategy: Option<SplitStrategy>,
    random_seed: Option<u64>,
    name: Option<String>,
    location: Option<String>,
    schema_file: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<()> {
    let mut settings = load_settings(config.as_deref())?;
    if let Some(k) = kfolds {
        settings.kfolds = k;
    }
    if let Some(s) = strategy {
        settings.strategy = s;
    }
    if let Some(seed) = random_seed {
        settings.random_seed = seed;
    }
    if output.is_some() {
        settings.output = output;
    }

    // Reject bad fold counts before anything else happens
    let partitioner = settings.partitioner().context("Invalid k-fold settings")?;

    let dataset = match (name, location, schema_file, settings.dataset.take()) {
        (Some(name), Some(location), Some(schema_file), _) => {
            let schema = fs::read_to_string(&schema_file)
                .with_context(|| format!("Failed to read schema from {}", schema_file.display()))?;
            DatasetSpec::new(name, location, schema)
        }
        (None, None, None, Some(dataset)) => dataset,
        (None, None, None, None) => bail!("No dataset configured: set [dataset] in settings or pass --name, --location and --schema-file"),
        _ => bail!("--name, --location and --schema-file must be given together"),
    };

    info!(
        "Planning {} folds of {} ({} strategy)",
        partitioner.total_folds(),
        dataset.name,
        partitioner.strategy()
    );

    let mut store = InMemoryDataSources::new();
    let folds = create_all(&mut store, &partitioner, &dataset)?;

    println!("{}", SEPARATOR);
    println!("{}: {} folds of {}", settings.app_name, folds.len(), dataset.name);
    println!("{}", SEPARATOR);
    for fold in &folds {
        println!("\n{}", fold);
    }
    println!("\n{}", SEPARATOR);

    let manifest = FoldManifest::new(&settings.app_name, &partitioner, &dataset, folds);
    match &settings.output {
        Some(path) => {
            manifest.save(path)?;
            info!("Wrote manifest to {}", path.display());
        }
        None => println!("{}", manifest.to_json()?),
    }

    Ok(())
}

fn cmd_name(name: &str) -> Result<()> {
    let parsed = parse_descriptive_name(name)?;
    println!("Dataset:    {}", parsed.base_name);
    println!("Range:      [{}, {})", parsed.range.begin, parsed.range.end);
    println!(
        "Role:       {}",
        if parsed.is_complement { "training (complement)" } else { "evaluation" }
    );
    Ok(())
}

fn cmd_ids(count: usize) -> Result<()> {
    for _ in 0..count {
        println!("{}", generate_split_id()?);
    }
    Ok(())
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("kfold_datasource=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Plan {
            config,
            kfolds,
            strategy,
            random_seed,
            name,
            location,
            schema_file,
            output,
        } => cmd_plan(config, kfolds, strategy, random_seed, name, location, schema_file, output)?,
        Commands::Name { name } => cmd_name(&name)?,
        Commands::Ids { count } => cmd_ids(count)?,
    }

    Ok(())
}
