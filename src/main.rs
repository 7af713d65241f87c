//! Binary entrypoint for the questcart CLI.
//!
//! Commands:
//! - (none) or `build` - scan the quest folders and write the catalog
//! - `init` - create a starter `questcart.toml` with the default category table
//! - `stats [--catalog <path>]` - print quest counts of a written catalog as JSON
//!
//! See the library crate docs for module‑level details: `questcart::`.
use anyhow::Result;
use clap::{Parser, Subcommand};
use log::{error, info, warn};
use std::path::Path;
use std::str::FromStr;

use questcart::catalog::{CatalogCache, CatalogError, CatalogStats};
use questcart::config::Config;
use questcart::storage::write_catalog;

#[derive(Parser)]
#[command(name = "questcart")]
#[command(about = "Builds the quest catalog from raw quest definition files")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path; defaults apply when the file does not exist
    #[arg(short, long, default_value = "questcart.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan the quest directories and write the catalog (default)
    Build,
    /// Write a default configuration file
    Init,
    /// Show quest counts by status and tier for a written catalog
    Stats {
        /// Catalog file (defaults to the configured output path)
        #[arg(long)]
        catalog: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Build) {
        Commands::Build => {
            let config = Config::load_or_default(&cli.config).await?;
            init_logging(&Some(config.clone()), cli.verbose);
            if !run_build(&config)? {
                std::process::exit(1);
            }
        }
        Commands::Init => {
            init_logging(&None, cli.verbose);
            if Path::new(&cli.config).exists() {
                warn!("Configuration file {} already exists, leaving it untouched", cli.config);
                return Ok(());
            }
            Config::create_default(&cli.config).await?;
            info!("Configuration file created at {}", cli.config);
        }
        Commands::Stats { catalog } => {
            let config = Config::load_or_default(&cli.config).await?;
            init_logging(&Some(config.clone()), cli.verbose);
            let path = catalog.unwrap_or_else(|| config.paths.output.clone());
            let cache = CatalogCache::new(&path);
            let catalog = cache.get()?;
            let stats = CatalogStats::for_catalog(&catalog);
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }

    Ok(())
}

/// Returns `false` when the run aborted without writing a catalog.
fn run_build(config: &Config) -> Result<bool> {
    let builder = config.builder();
    let (catalog, report) = match builder.build() {
        Ok(built) => built,
        Err(CatalogError::MissingRoot(path)) => {
            error!("Quests directory not found: {}", path.display());
            return Ok(false);
        }
        Err(e) => return Err(e.into()),
    };

    let artifact = write_catalog(Path::new(&config.paths.output), &catalog, config.catalog.pretty)?;
    info!("{}", report);
    for directory in &report.unreadable_directories {
        warn!("Could not list {}", directory);
    }
    for skipped in &report.skipped_files {
        warn!("Skipped {}/{}", skipped.directory, skipped.file);
    }
    info!(
        "Output written to: {} ({} bytes, sha256 {})",
        artifact.path.display(),
        artifact.bytes,
        artifact.sha256
    );
    Ok(true)
}

fn init_logging(config: &Option<Config>, verbosity: u8) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    // CLI verbosity overrides the configured level
    let configured = config
        .as_ref()
        .and_then(|cfg| log::LevelFilter::from_str(&cfg.logging.level).ok())
        .unwrap_or(log::LevelFilter::Info);
    let base_level = match verbosity {
        0 => configured,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(base_level);

    let log_file = config
        .as_ref()
        .and_then(|cfg| cfg.logging.file.as_ref())
        .and_then(|file| {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(file)
                .ok()
        });

    if let Some(f) = log_file {
        let write_mutex = std::sync::Arc::new(std::sync::Mutex::new(f));
        // Echo to the console only when attached to a terminal
        let is_tty = atty::is(atty::Stream::Stdout);
        builder.format(move |fmt, record| {
            let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
            let line = format!("{} [{}] {}", ts, record.level(), record.args());
            if let Ok(mut guard) = write_mutex.lock() {
                let _ = writeln!(guard, "{}", line);
            }
            if is_tty {
                writeln!(fmt, "{}", line)
            } else {
                Ok(())
            }
        });
    } else {
        builder.format(|fmt, record| {
            let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
            writeln!(fmt, "{} [{}] {}", ts, record.level(), record.args())
        });
    }
    let _ = builder.try_init();
}
