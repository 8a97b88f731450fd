//! Nexus CLI: derive the philosopher orb from raw records.
//!
//! Usage:
//!   nexus layout    [--config P] [--input F | --url U | --db P] [--fallback F] [--seed N] [--pretty]
//!   nexus normalize --input F [--pretty]
//!   nexus facets    [--config P] [--input F | --url U | --db P] [--fallback F]

use clap::{Args, Parser, Subcommand};
use nexus::{Facets, FileSource, NexusConfig, NexusEngine, Normalizer, RecordSource, SourceSpec};
use serde::Serialize;
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(name = "nexus", version, about = "Philosopher knowledge orb core")]
struct Cli {
    /// Log debug detail to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load records, lay them out, and print the graph as JSON
    Layout {
        #[command(flatten)]
        sources: SourceArgs,
        /// Pin the layout seed
        #[arg(long)]
        seed: Option<u64>,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Normalize a raw record file and print canonical records as JSON
    Normalize {
        /// JSON file of raw records
        #[arg(long)]
        input: PathBuf,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Load records and print the distinct eras, domains and spiral stages
    Facets {
        #[command(flatten)]
        sources: SourceArgs,
    },
}

#[derive(Args)]
struct SourceArgs {
    /// Path to a YAML config file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Read records from a JSON file
    #[arg(long, conflicts_with_all = ["url", "db"])]
    input: Option<PathBuf>,
    /// Fetch records from an HTTP endpoint
    #[arg(long, conflicts_with = "db")]
    url: Option<String>,
    /// Read records from a SQLite database
    #[arg(long)]
    db: Option<PathBuf>,
    /// JSON file to use when the primary source fails
    #[arg(long)]
    fallback: Option<PathBuf>,
}

impl SourceArgs {
    /// Config file values with command-line flags applied on top.
    fn resolve(&self) -> Result<NexusConfig, String> {
        let mut config = NexusConfig::load_or_default(self.config.as_deref())
            .map_err(|e| format!("Failed to load configuration: {}", e))?;

        if let Some(path) = &self.input {
            config.sources.primary = Some(SourceSpec::File { path: path.clone() });
        } else if let Some(url) = &self.url {
            config.sources.primary = Some(SourceSpec::http(url.clone()));
        } else if let Some(path) = &self.db {
            config.sources.primary = Some(SourceSpec::Sqlite { path: path.clone() });
        }
        if let Some(path) = &self.fallback {
            config.sources.fallback = Some(SourceSpec::File { path: path.clone() });
        }

        config.validate().map_err(|e| e.to_string())?;
        Ok(config)
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> i32 {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    match rendered {
        Ok(json) => {
            println!("{}", json);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn runtime() -> Result<tokio::runtime::Runtime, String> {
    tokio::runtime::Runtime::new().map_err(|e| format!("failed to create tokio runtime: {}", e))
}

fn cmd_layout(sources: &SourceArgs, seed: Option<u64>, pretty: bool) -> i32 {
    let config = match sources.resolve() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    let loader = match config.build_loader() {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    let mut engine = match NexusEngine::new().with_layout(config.layout.clone()) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    if let Some(seed) = seed.or(config.seed) {
        engine = engine.with_seed(seed);
    }

    let rt = match runtime() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("{}", e);
            return 1;
        }
    };
    match rt.block_on(engine.load(&loader)) {
        Ok(graph) => match graph.to_json(pretty) {
            Ok(json) => {
                println!("{}", json);
                0
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                1
            }
        },
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_normalize(input: &PathBuf, pretty: bool) -> i32 {
    let rt = match runtime() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("{}", e);
            return 1;
        }
    };
    let raw = match rt.block_on(FileSource::new(input).fetch()) {
        Ok(raw) => raw,
        Err(e) => {
            eprintln!("Error: cannot read '{}': {}", input.display(), e);
            return 1;
        }
    };

    // Rejections are logged by the normalizer
    let batch = Normalizer::new().normalize_batch(&raw);
    print_json(&batch.records, pretty)
}

fn cmd_facets(sources: &SourceArgs) -> i32 {
    let config = match sources.resolve() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    let loader = match config.build_loader() {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    let rt = match runtime() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("{}", e);
            return 1;
        }
    };

    match rt.block_on(loader.load()) {
        Ok(fetched) => {
            let batch = Normalizer::new().normalize_batch(&fetched.records);
            print_json(&Facets::from_records(&batch.records), true)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let code = match cli.command {
        Commands::Layout { sources, seed, pretty } => cmd_layout(&sources, seed, pretty),
        Commands::Normalize { input, pretty } => cmd_normalize(&input, pretty),
        Commands::Facets { sources } => cmd_facets(&sources),
    };
    std::process::exit(code);
}
