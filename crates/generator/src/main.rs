//! CKKS Parameter Generator CLI
//!
//! Command-line tool for generating CKKS parameter tables and querying them.
//!
//! - **Generate**: Enumerate every valid tuple of a search space into `big_table.json`
//! - **Bounds**: Print the bound rows of a search space
//! - **Query**: Degrading search for a security level, depth and precision
//! - **Merge**: Attach measured precision to a generated table
//! - **List**: Show the available presets
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use ckks_params::utils::{fmt_bound, fmt_tuple, init_logging};
use ckks_params::{
    PrecisionMeasurement, QueryEngine, TableGenerator, merge_achieved_precision,
    select_from_result,
};
use shared::config::PRESETS;
use shared::validation::validate_query;
use shared::{JsonDocument, ParameterTable, QueryRequest, SearchSpaceConfig, load_json};

/// Main CLI structure using clap for argument parsing
#[derive(Parser)]
#[command(name = "ckks-generator")]
#[command(about = "Generate and query CKKS parameter tables")]
struct Cli {
    /// Print debug messages
    #[arg(long, short, global = true)]
    verbose: bool,

    /// The subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
enum Commands {
    /// Generate the parameter table for a search space
    ///
    /// Writes `big_table.json` and `bounds.json` into the output directory.
    Generate {
        /// Preset search space (dev, test, prod)
        ///
        /// Ignored when `--config` is given. Defaults to "prod".
        #[arg(long, short)]
        preset: Option<String>,

        /// TOML file describing the search space
        #[arg(long, short)]
        config: Option<PathBuf>,

        /// Output directory for generated files
        #[arg(long, short, default_value = ".")]
        output: PathBuf,
    },

    /// Print the bounds of a search space without enumerating tuples
    Bounds {
        /// Preset search space (dev, test, prod)
        #[arg(long, short)]
        preset: Option<String>,

        /// TOML file describing the search space
        #[arg(long, short)]
        config: Option<PathBuf>,
    },

    /// Find the closest tuples for a security level, depth and precision
    ///
    /// Writes the full match, the per-ring-dimension optima and the single
    /// optimum into the output directory.
    Query {
        /// Parameter table produced by `generate`
        #[arg(long, short, default_value = "big_table.json")]
        table: PathBuf,

        /// Security level λ
        #[arg(long, short = 'l')]
        security_level: u32,

        /// Requested multiplicative depth L
        #[arg(long, short)]
        depth: u32,

        /// Requested bits of precision
        #[arg(long, short = 'r')]
        precision: u32,

        /// Output directory for result files
        #[arg(long, short, default_value = ".")]
        output: PathBuf,
    },

    /// Merge measured precision into a parameter table
    Merge {
        /// Parameter table produced by `generate`
        #[arg(long, short, default_value = "big_table.json")]
        table: PathBuf,

        /// JSON array of precision measurements
        #[arg(long, short)]
        measurements: PathBuf,

        /// Path of the merged table (defaults to overwriting `--table`)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// List available presets
    List,
}

/// Resolve the search space from a config file or a preset name.
fn load_search_space(preset: Option<&str>, config: Option<&Path>) -> anyhow::Result<SearchSpaceConfig> {
    let search_space = match config {
        Some(path) => SearchSpaceConfig::from_toml_file(path)
            .map_err(|e| anyhow::anyhow!("Invalid config {}: {}", path.display(), e))?,
        None => SearchSpaceConfig::preset(preset.unwrap_or("prod"))?,
    };
    Ok(search_space)
}

fn print_search_space(config: &SearchSpaceConfig) {
    println!(
        "🔐 Search space: λ={:?} log2(N)={:?} h={:?}",
        config.security_levels, config.log2_ring_dims, config.hamming_weights
    );
    println!(
        "   σ={} log2(delta) ≤ {} log2(q0) ≤ {} L ≤ {}",
        config.sigma, config.log2_qi_upper, config.log2_q0_upper, config.max_depth
    );
}

/// Generate the parameter table and bounds for a search space
fn generate_table(search_space: SearchSpaceConfig, output_dir: &Path) -> anyhow::Result<()> {
    print_search_space(&search_space);

    let generator = TableGenerator::new(search_space)?;
    println!(
        "⚙️  Enumerating {} combinations...",
        generator.config().combination_count()
    );
    let report = generator.generate();

    for skipped in &report.skipped {
        println!(
            "⚠️  Skipped λ={} log2(N)={} h={}: {}",
            skipped.security_level, skipped.log2_ring_dim, skipped.hamming_weight, skipped.reason
        );
    }
    println!(
        "✅ {} tuples from {} feasible combinations",
        report.table.len(),
        report.bounds.rows.len()
    );

    let bounds_path = report.bounds.write_json(output_dir)?;
    println!("📄 Bounds saved to {}", bounds_path.display());
    let table_path = report.table.write_json(output_dir)?;
    println!("📄 Table saved to {}", table_path.display());

    Ok(())
}

fn print_bounds(search_space: SearchSpaceConfig) -> anyhow::Result<()> {
    print_search_space(&search_space);

    let generator = TableGenerator::new(search_space)?;
    for (security_level, log2_ring_dim, hamming_weight) in generator.combinations() {
        match generator
            .calculator()
            .bound(security_level, log2_ring_dim, hamming_weight)
        {
            Ok(bound) => println!("  {}", fmt_bound(&bound)),
            Err(e) => println!("  ⚠️  λ={security_level} log2(N)={log2_ring_dim} h={hamming_weight}: {e}"),
        }
    }
    Ok(())
}

/// Run a query and write the full, per-ring-dimension and optimal result files
fn run_query(table_path: &Path, request: QueryRequest, output_dir: &Path) -> anyhow::Result<()> {
    validate_query(&request)?;

    let table: ParameterTable = load_json(table_path)
        .map_err(|e| anyhow::anyhow!("Failed to load {}: {}", table_path.display(), e))?;
    println!(
        "🔍 Querying {} rows: λ={} L={} precision={}",
        table.len(),
        request.security_level,
        request.requested_depth,
        request.requested_precision
    );

    let result = QueryEngine::new(&table).query(&request);
    if !result.is_match() {
        println!("❌ No matching rows found for λ={}", request.security_level);
        return Ok(());
    }

    let selection = select_from_result(&result);
    let (depth, precision) = (
        result.actual_depth.unwrap_or_default(),
        result.actual_precision.unwrap_or_default(),
    );
    println!("✅ {} rows at L={depth}, precision={precision}", result.row_count);
    if depth != request.requested_depth {
        println!("   (requested depth {} is not available)", request.requested_depth);
    }

    let full_path = output_dir.join("query_full.json");
    std::fs::write(&full_path, serde_json::to_string_pretty(&result)?)?;
    println!("📄 Full result saved to {}", full_path.display());

    println!("📐 Best tuple per ring dimension:");
    for tuple in &selection.per_ring_dim {
        println!("   {}", fmt_tuple(tuple));
    }
    let per_ring_path = output_dir.join("query_log2n.json");
    std::fs::write(
        &per_ring_path,
        serde_json::to_string_pretty(&selection.per_ring_dim)?,
    )?;

    if let Some(optimum) = &selection.optimum {
        println!("🏆 Optimal: {}", fmt_tuple(optimum));
        let opt_path = output_dir.join("query_opt.json");
        std::fs::write(&opt_path, serde_json::to_string_pretty(optimum)?)?;
        println!("📄 Optimal tuple saved to {}", opt_path.display());
    }

    Ok(())
}

fn merge_measurements(
    table_path: &Path,
    measurements_path: &Path,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let table: ParameterTable = load_json(table_path)?;
    let measurements: Vec<PrecisionMeasurement> = load_json(measurements_path)?;
    println!(
        "🔧 Merging {} measurements into {} rows",
        measurements.len(),
        table.len()
    );

    let merged = merge_achieved_precision(&table, &measurements);
    let enriched = merged
        .rows
        .iter()
        .filter(|row| row.achieved_precision.is_some())
        .count();

    let output_path = output.unwrap_or(table_path);
    merged.write_json_to(output_path)?;
    println!(
        "✅ {enriched} rows carry a measured precision; saved to {}",
        output_path.display()
    );
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    println!("🚀 CKKS Parameter Generator\n");

    match cli.command {
        Commands::Generate {
            preset,
            config,
            output,
        } => {
            let search_space = load_search_space(preset.as_deref(), config.as_deref())?;

            // Ensure output directory exists
            std::fs::create_dir_all(&output)?;

            generate_table(search_space, &output)?;
        }
        Commands::Bounds { preset, config } => {
            let search_space = load_search_space(preset.as_deref(), config.as_deref())?;
            print_bounds(search_space)?;
        }
        Commands::Query {
            table,
            security_level,
            depth,
            precision,
            output,
        } => {
            std::fs::create_dir_all(&output)?;
            let request = QueryRequest::new(security_level, depth, precision);
            run_query(&table, request, &output)?;
        }
        Commands::Merge {
            table,
            measurements,
            output,
        } => {
            merge_measurements(&table, &measurements, output.as_deref())?;
        }
        Commands::List => {
            println!("⚙️  Available presets:");
            for (name, description) in PRESETS {
                println!("  • {name:<5} - {description}");
            }
        }
    }

    Ok(())
}
