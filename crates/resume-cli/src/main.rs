//! resume-gen: генерация датасета резюме для тестирования OCR
//!
//! Usage: resume-gen [--config config.json] [--seed 42] [--plan standard=2,noisy=2]

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use resume_core::{parse_plan, DatasetGenerator, DocumentFormat, GeneratorConfig, Variation};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Pdf,
    Png,
}

impl From<FormatArg> for DocumentFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Pdf => DocumentFormat::Pdf,
            FormatArg::Png => DocumentFormat::Png,
        }
    }
}

/// Synthetic resume pages with scan defects and ground-truth labels
#[derive(Debug, Parser)]
#[command(name = "resume-gen", version, about)]
struct Cli {
    /// JSON config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for generated documents
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Manifest (JSONL) path
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// Storage prefix written into `input_pdf`
    #[arg(long)]
    prefix: Option<String>,

    /// Fixed RNG seed for reproducible content
    #[arg(long)]
    seed: Option<u64>,

    /// Variation plan, e.g. `standard=2,noisy=2`
    #[arg(long)]
    plan: Option<String>,

    #[arg(long)]
    serif_font: Option<PathBuf>,

    #[arg(long)]
    sans_font: Option<PathBuf>,

    #[arg(long)]
    handwriting_font: Option<PathBuf>,

    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Print the variation table as JSON and exit
    #[arg(long)]
    list_variations: bool,
}

fn build_config(cli: &Cli) -> Result<GeneratorConfig> {
    let mut config = match &cli.config {
        Some(path) => GeneratorConfig::from_json_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => GeneratorConfig::default(),
    };

    if let Some(dir) = &cli.out_dir {
        config.output_dir = dir.clone();
    }
    if let Some(path) = &cli.manifest {
        config.manifest_path = path.clone();
    }
    if let Some(prefix) = &cli.prefix {
        config.storage_prefix = prefix.clone();
    }
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if let Some(plan) = &cli.plan {
        config.plan = parse_plan(plan).context("invalid --plan")?;
    }
    if let Some(path) = &cli.serif_font {
        config.fonts.serif = path.clone();
    }
    if let Some(path) = &cli.sans_font {
        config.fonts.sans = path.clone();
    }
    if let Some(path) = &cli.handwriting_font {
        config.fonts.handwriting = Some(path.clone());
    }
    if let Some(format) = cli.format {
        config.format = format.into();
    }

    Ok(config)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if cli.list_variations {
        println!("{}", serde_json::to_string_pretty(Variation::table())?);
        return Ok(());
    }

    let config = build_config(&cli)?;
    log::debug!("Effective config: {:?}", config);

    let generator = DatasetGenerator::new(config).context("failed to initialize generator")?;
    let summary = generator.run().context("dataset generation failed")?;

    println!();
    for (variation, count) in summary.per_variation() {
        println!("  {:<12} {:>3}  ({})", variation.id(), count, variation.difficulty());
    }
    println!(
        "Generated {} documents (seed {})",
        summary.records.len(),
        summary.seed
    );
    println!("Manifest saved to: {}", summary.manifest_path.display());

    Ok(())
}
