//! webview-compat CLI - WebView support data and reports from the command line.

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;
use webview_compat::report::{compat_key_rows, detailed_feature_rows, feature_rows, write_csv};
use webview_compat::{
    catalog_to_json, load_feature_catalog, CompatDataset, EnrichOptions, FeatureCatalog,
    FeatureEntry, Overrides, WebviewCompatCore, WebviewStats,
};

#[derive(Parser)]
#[command(name = "webview-compat")]
#[command(about = "WebView support for web-features, derived from browser compat data", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct InputArgs {
    /// web-features data (bare catalog or package data.json)
    #[arg(long, value_name = "FILE")]
    features: PathBuf,

    /// Browser compat data JSON
    #[arg(long, value_name = "FILE")]
    bcd: PathBuf,

    /// Overrides JSON (defaults to the built-in overrides)
    #[arg(long, value_name = "FILE", conflicts_with = "no_overrides")]
    overrides: Option<PathBuf>,

    /// Do not apply any overrides
    #[arg(long)]
    no_overrides: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the enriched catalog as JSON
    Generate {
        #[command(flatten)]
        input: InputArgs,

        /// Output file (stdout when omitted)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Pretty-print JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Write a CSV report
    Csv {
        #[command(flatten)]
        input: InputArgs,

        /// Table layout
        #[arg(short, long, value_enum, default_value = "features")]
        mode: CsvMode,

        /// Output file (stdout when omitted)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Omit the UTF-8 byte order mark
        #[arg(long)]
        no_bom: bool,
    },

    /// Print unsupported-feature counts
    Stats {
        #[command(flatten)]
        input: InputArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },

    /// Enrich a single feature and print it as JSON
    Feature {
        /// Feature id (a moved id is followed to its target)
        #[arg(value_name = "ID")]
        id: String,

        #[command(flatten)]
        input: InputArgs,
    },
}

#[derive(Clone, ValueEnum)]
enum CsvMode {
    /// One row per feature
    Features,
    /// One row per feature, with main browser support
    Detailed,
    /// One row per feature and compat key
    ByCompatKey,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Generate {
            input,
            output,
            pretty,
        } => handle_generate(&input, output.as_deref(), pretty),
        Commands::Csv {
            input,
            mode,
            output,
            no_bom,
        } => handle_csv(&input, &mode, output.as_deref(), !no_bom),
        Commands::Stats { input, format } => handle_stats(&input, &format),
        Commands::Feature { id, input } => handle_feature(&input, &id),
    };

    let exit_code = match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    };
    process::exit(exit_code);
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_options(input: &InputArgs) -> anyhow::Result<EnrichOptions> {
    let overrides = if input.no_overrides {
        Overrides::empty()
    } else if let Some(path) = &input.overrides {
        Overrides::from_path(path)
            .with_context(|| format!("failed to load overrides from {}", path.display()))?
    } else {
        Overrides::builtin()?
    };
    Ok(EnrichOptions {
        overrides,
        ..EnrichOptions::default()
    })
}

fn load_inputs(input: &InputArgs) -> anyhow::Result<(FeatureCatalog, CompatDataset, EnrichOptions)> {
    let catalog = load_feature_catalog(&input.features)
        .with_context(|| format!("failed to load features from {}", input.features.display()))?;
    let dataset = CompatDataset::from_path(&input.bcd)
        .with_context(|| format!("failed to load compat data from {}", input.bcd.display()))?;
    Ok((catalog, dataset, load_options(input)?))
}

fn enriched_catalog(input: &InputArgs) -> anyhow::Result<FeatureCatalog> {
    let (catalog, dataset, options) = load_inputs(input)?;
    Ok(WebviewCompatCore::enrich(&catalog, &dataset, &options)?.catalog)
}

fn open_output(output: Option<&Path>) -> anyhow::Result<Box<dyn Write>> {
    Ok(match output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    })
}

fn handle_generate(input: &InputArgs, output: Option<&Path>, pretty: bool) -> anyhow::Result<()> {
    let catalog = enriched_catalog(input)?;
    let json = catalog_to_json(&catalog, pretty)?;
    tracing::debug!("Serialized {} catalog entries", catalog.len());

    let mut writer = open_output(output)?;
    writeln!(writer, "{}", json)?;
    writer.flush()?;

    if let Some(path) = output {
        eprintln!("{} generated successfully.", path.display());
    }
    Ok(())
}

fn handle_csv(
    input: &InputArgs,
    mode: &CsvMode,
    output: Option<&Path>,
    bom: bool,
) -> anyhow::Result<()> {
    let catalog = enriched_catalog(input)?;
    let writer = open_output(output)?;

    match mode {
        CsvMode::Features => write_csv(writer, &feature_rows(&catalog), bom)?,
        CsvMode::Detailed => write_csv(writer, &detailed_feature_rows(&catalog), bom)?,
        CsvMode::ByCompatKey => write_csv(writer, &compat_key_rows(&catalog), bom)?,
    }

    if let Some(path) = output {
        eprintln!("{} generated successfully.", path.display());
    }
    Ok(())
}

fn handle_stats(input: &InputArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let catalog = enriched_catalog(input)?;
    let stats = WebviewStats::from_catalog(&catalog);

    match format {
        OutputFormat::Human => print!("{}", stats.render_text()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
    }
    Ok(())
}

fn handle_feature(input: &InputArgs, id: &str) -> anyhow::Result<()> {
    let (catalog, dataset, options) = load_inputs(input)?;
    let feature = WebviewCompatCore::enrich_feature(&catalog, &dataset, &options, id)?;
    println!(
        "{}",
        serde_json::to_string_pretty(&FeatureEntry::Feature(feature))?
    );
    Ok(())
}
