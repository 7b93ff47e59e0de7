use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use log::{info, LevelFilter};
use rust_icu::{
    build_bed_dataset, build_patient_dataset, category_counts, save_record_batch, Dataset,
    GeneratorConfig, OutputFormat, RecordBatch,
};

/// Generate synthetic ICU patient and bed datasets
#[derive(Parser)]
#[command(name = "synth_data")]
#[command(version)]
struct Cli {
    /// YAML configuration file (defaults reproduce the reference datasets)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Global random seed
    #[arg(long, global = true)]
    seed: Option<u64>,
    /// Output format (csv or parquet)
    #[arg(long, global = true)]
    format: Option<OutputFormat>,
    /// Print the number of records per category after writing
    #[arg(long, global = true)]
    summary: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the ICU patient admissions dataset
    Patients(PatientArgs),
    /// Generate the ICU bed inventory dataset
    Beds(BedArgs),
    /// Generate both datasets (patients, then beds)
    All,
}

#[derive(Args)]
struct PatientArgs {
    /// Number of patients
    #[arg(long)]
    count: Option<usize>,
    /// First day of the arrival window (YYYY-MM-DD)
    #[arg(long)]
    start_date: Option<String>,
    /// Output file
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct BedArgs {
    /// Number of beds
    #[arg(long)]
    count: Option<usize>,
    /// Output file
    #[arg(long)]
    output: Option<PathBuf>,
}

fn load_config(cli: &Cli) -> anyhow::Result<GeneratorConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let file = fs::File::open(path)
                .with_context(|| format!("Failed to open configuration {}", path.display()))?;
            GeneratorConfig::from_reader(file)
                .with_context(|| format!("Failed to read configuration {}", path.display()))?
        }
        None => GeneratorConfig::default(),
    };

    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(format) = cli.format {
        config.format = format;
    }
    match &cli.command {
        Some(Commands::Patients(args)) => {
            if let Some(count) = args.count {
                config.patients.count = count;
            }
            if let Some(start_date) = &args.start_date {
                config.patients.start_date = start_date.clone();
            }
            if let Some(output) = &args.output {
                config.patients.output_path = output.clone();
            }
        }
        Some(Commands::Beds(args)) => {
            if let Some(count) = args.count {
                config.beds.count = count;
            }
            if let Some(output) = &args.output {
                config.beds.output_path = output.clone();
            }
        }
        Some(Commands::All) | None => (),
    }
    Ok(config)
}

/// Write a generated table and report it, optionally with the
/// number of records in each category.
async fn write_dataset(
    dataset: Dataset,
    batch: RecordBatch,
    path: &Path,
    format: OutputFormat,
    summary: bool,
) -> anyhow::Result<()> {
    save_record_batch(path, &batch, format)
        .with_context(|| format!("Failed to write {dataset} to {}", path.display()))?;
    info!("Wrote {dataset} to {}", path.display());
    println!("{dataset} generated successfully.");
    println!("Total records: {}", batch.num_rows());

    if summary {
        let counts = category_counts(batch, dataset.category_column())
            .await
            .with_context(|| format!("Failed to summarise {dataset}"))?;
        for (category, n) in counts {
            println!("  {category}: {n}");
        }
    }
    Ok(())
}

async fn run_patients(config: &GeneratorConfig, summary: bool) -> anyhow::Result<()> {
    let dataset = Dataset::Patients;
    let batch = build_patient_dataset(config.seed, &config.patients)
        .with_context(|| format!("Failed to generate {dataset}"))?;
    write_dataset(
        dataset,
        batch,
        &config.patients.output_path,
        config.format,
        summary,
    )
    .await
}

async fn run_beds(config: &GeneratorConfig, summary: bool) -> anyhow::Result<()> {
    let dataset = Dataset::Beds;
    let batch = build_bed_dataset(config.seed, &config.beds)
        .with_context(|| format!("Failed to generate {dataset}"))?;
    write_dataset(
        dataset,
        batch,
        &config.beds.output_path,
        config.format,
        summary,
    )
    .await
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    info!("Using seed {} and {} output", config.seed, config.format);

    match cli.command {
        Some(Commands::Patients(_)) => {
            config.patients.validate().context("Invalid patient settings")?;
            run_patients(&config, cli.summary).await
        }
        Some(Commands::Beds(_)) => {
            config.beds.validate().context("Invalid bed settings")?;
            run_beds(&config, cli.summary).await
        }
        Some(Commands::All) | None => {
            config.validate().context("Invalid settings")?;
            run_patients(&config, cli.summary).await?;
            run_beds(&config, cli.summary).await
        }
    }
}
