use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use folio::config::{CONFIG_FILE, FolioConfig};
use folio::telemetry;
use folio_graph::BranchName;

mod commands;

/// Commit-history graphs for folio workspaces
///
/// Reads a workspace snapshot (the branch listing plus one newest-first log
/// per branch, as JSON) and rebuilds the branch graph: one lane per branch,
/// forks joined to the commit they branched from, every commit drawn once.
///
/// QUICK START:
///
///   folio graph snapshot.json
///   folio graph snapshot.json --select 3f9c2ab
///   curl -s "$BACKEND/workspaces/thesis/snapshot" | folio ops -
///   folio check snapshot.json --format json
///
/// CONFIGURATION:
///
///   folio.toml in the working directory (or --config / FOLIO_CONFIG).
///   Logging: FOLIO_LOG or RUST_LOG, e.g. FOLIO_LOG=folio_graph=debug
#[derive(Parser)]
#[command(name = "folio")]
#[command(version, about)]
#[command(propagate_version = true)]
#[command(after_help = "See 'folio <command> --help' for more information on a specific command.")]
struct Cli {
    /// Config file (default: ./folio.toml, optional)
    #[arg(long, global = true, env = "FOLIO_CONFIG")]
    config: Option<PathBuf>,

    /// Base (trunk) branch, overriding [graph] base_branch
    #[arg(long, global = true, env = "FOLIO_BASE_BRANCH")]
    base_branch: Option<BranchName>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw the branch graph
    ///
    /// Text output is a lane diagram, oldest commit first. JSON output is
    /// the op sequence plus build stats.
    Graph(commands::GraphArgs),

    /// Print the graph construction ops, one per line
    Ops(commands::OpsArgs),

    /// Validate a snapshot and print build stats
    ///
    /// Exits non-zero when the history cannot be reconstructed (no root,
    /// ambiguous root, or unreachable commits).
    Check(commands::OpsArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    telemetry::init(&config.log);

    let base_branch = cli
        .base_branch
        .unwrap_or_else(|| config.graph.base_branch.clone());
    let ctx = commands::Context {
        base_branch,
        format: config.output.format,
    };

    match cli.command {
        Commands::Graph(args) => commands::graph(&ctx, &args),
        Commands::Ops(args) => commands::ops(&ctx, &args),
        Commands::Check(args) => commands::check(&ctx, &args),
    }
}

fn load_config(explicit: Option<&Path>) -> Result<FolioConfig> {
    match explicit {
        Some(path) => {
            if !path.exists() {
                bail!("config file not found: {}", path.display());
            }
            Ok(FolioConfig::load(path)?)
        }
        None => Ok(FolioConfig::load(Path::new(CONFIG_FILE))?),
    }
}
