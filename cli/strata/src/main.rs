//! Strata CLI: resolve multiplatform module declarations into fragments and artifacts.

mod commands;
mod manifest;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use manifest::{ProjectManifest, MANIFEST_FILE};

#[derive(Parser)]
#[command(name = "strata", version, about = "Multiplatform build model resolver")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new Strata project
    Init {
        /// Project name
        name: String,
    },
    /// Resolve modules and print their fragments and artifacts
    Resolve {
        /// Only resolve the module with this name
        #[arg(long)]
        module: Option<String>,
        /// Output format (text, json)
        #[arg(long)]
        format: Option<String>,
    },
    /// Validate every module declaration
    Check,
    /// Show the platform hierarchy
    Platforms {
        /// Show the leaf platforms supported by a product type (e.g., jvm/app)
        #[arg(long)]
        product: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;

    match cli.command {
        Commands::Init { name } => commands::init::run(&name),

        Commands::Resolve { module, format } => {
            let (manifest, project_dir) = load_manifest_required(&cwd)?;
            commands::resolve::run(&project_dir, &manifest, module.as_deref(), format.as_deref())
        }

        Commands::Check => {
            let (manifest, project_dir) = load_manifest_required(&cwd)?;
            commands::check::run(&project_dir, &manifest)
        }

        Commands::Platforms { product } => commands::platforms::run(product.as_deref()),
    }
}

/// Load manifest, returning error if not found.
fn load_manifest_required(cwd: &Path) -> anyhow::Result<(ProjectManifest, PathBuf)> {
    match ProjectManifest::find_and_load(cwd)? {
        Some((manifest, dir)) => Ok((manifest, dir)),
        None => anyhow::bail!("no {MANIFEST_FILE} found (run `strata init` first)"),
    }
}
