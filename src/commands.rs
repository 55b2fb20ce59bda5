use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Args;
use folio::format::OutputFormat;
use folio::render::LaneRenderer;
use folio::snapshot::WorkspaceSnapshot;
use folio_graph::{BranchName, CommitId, GraphOp, GraphStats};
use serde::Serialize;

/// Settings resolved from config, env, and global flags.
pub struct Context {
    pub base_branch: BranchName,
    pub format: OutputFormat,
}

#[derive(Args)]
pub struct GraphArgs {
    /// Snapshot JSON file, or `-` for stdin
    pub snapshot: PathBuf,

    /// Report the branch that owns this commit
    ///
    /// The full commit id as it appears in the snapshot.
    #[arg(long)]
    pub select: Option<CommitId>,

    /// Output format: text or json
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// Shorthand for --format json
    #[arg(long, hide = true, conflicts_with = "format")]
    pub json: bool,
}

#[derive(Args)]
pub struct OpsArgs {
    /// Snapshot JSON file, or `-` for stdin
    pub snapshot: PathBuf,

    /// Output format: text or json
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// Shorthand for --format json
    #[arg(long, hide = true, conflicts_with = "format")]
    pub json: bool,
}

#[derive(Serialize)]
struct GraphOutput<'a> {
    workspace: &'a str,
    base_branch: &'a BranchName,
    ops: &'a [GraphOp],
    stats: GraphStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    selected_branch: Option<BranchName>,
}

#[derive(Serialize)]
struct CheckOutput<'a> {
    workspace: &'a str,
    base_branch: &'a BranchName,
    #[serde(flatten)]
    stats: GraphStats,
}

pub fn graph(ctx: &Context, args: &GraphArgs) -> Result<()> {
    let format = OutputFormat::resolve(args.format, args.json, ctx.format);
    let snapshot = WorkspaceSnapshot::load(&args.snapshot)?;
    let build = folio::build_snapshot(&snapshot, &ctx.base_branch)?;

    let mut selected = None;
    let mut renderer = LaneRenderer::new().on_select(|branch: &BranchName| {
        selected = Some(branch.clone());
    });
    folio::draw(&build, &mut renderer)?;
    if let Some(commit) = &args.select
        && renderer.select(commit).is_none()
    {
        bail!(
            "commit {commit} is not in the history of workspace '{}'",
            snapshot.name()
        );
    }
    let drawing = renderer.render();
    drop(renderer);

    match format {
        OutputFormat::Text => {
            print!("{drawing}");
            if let (Some(commit), Some(branch)) = (&args.select, &selected) {
                println!();
                println!("selected {} on branch {branch}", commit.short());
            }
        }
        OutputFormat::Json => {
            let output = GraphOutput {
                workspace: snapshot.name(),
                base_branch: &ctx.base_branch,
                ops: &build.ops,
                stats: build.stats,
                selected_branch: selected,
            };
            println!("{}", format.serialize(&output)?);
        }
    }
    Ok(())
}

pub fn ops(ctx: &Context, args: &OpsArgs) -> Result<()> {
    let format = OutputFormat::resolve(args.format, args.json, ctx.format);
    let snapshot = WorkspaceSnapshot::load(&args.snapshot)?;
    let build = folio::build_snapshot(&snapshot, &ctx.base_branch)?;

    match format {
        OutputFormat::Text => {
            for op in &build.ops {
                println!("{op}");
            }
        }
        OutputFormat::Json => println!("{}", format.serialize(&build.ops)?),
    }
    Ok(())
}

pub fn check(ctx: &Context, args: &OpsArgs) -> Result<()> {
    let format = OutputFormat::resolve(args.format, args.json, ctx.format);
    let snapshot = WorkspaceSnapshot::load(&args.snapshot)?;
    let build = folio::build_snapshot(&snapshot, &ctx.base_branch)?;
    folio::draw(&build, &mut LaneRenderer::new())?;

    let stats = build.stats;
    match format {
        OutputFormat::Text => {
            println!("workspace '{}': ok", snapshot.name());
            println!("  base branch:        {}", ctx.base_branch);
            println!("  branches:           {}", stats.branches);
            println!("  log entries:        {}", stats.linked_entries);
            println!("  duplicates dropped: {}", stats.duplicates_dropped);
            println!("  lanes opened:       {}", stats.lanes_opened);
            println!("  commits placed:     {}", stats.commits_placed);
        }
        OutputFormat::Json => {
            let output = CheckOutput {
                workspace: snapshot.name(),
                base_branch: &ctx.base_branch,
                stats,
            };
            println!("{}", format.serialize(&output)?);
        }
    }
    Ok(())
}
