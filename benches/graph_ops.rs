//! History graph pipeline benchmarks.
//!
//! Measures op-sequence construction and lane rendering for synthetic
//! workspaces where every branch log repeats its full ancestry, the way the
//! backend reports it.
//!
//! # Running
//!
//! ```bash
//! cargo bench --bench graph_ops
//! # With a custom filter:
//! cargo bench --bench graph_ops -- build
//! ```

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

use folio::render::LaneRenderer;
use folio_graph::{BranchLog, BranchLogs, BranchName, CommitId, HistoryGraph, replay};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const MASTER_LEN: usize = 50;
const OWN_COMMITS: usize = 5;

/// `branches` feature branches, each forking from master and adding
/// [`OWN_COMMITS`] commits. Returns the logs and the total log entry count.
fn make_workspace(branches: usize) -> (BranchLogs, usize) {
    let commit = |id: String| CommitId::new(&id).expect("commit id");
    let master: Vec<CommitId> = (0..MASTER_LEN).map(|i| commit(format!("m{i}"))).collect();

    let mut logs = BranchLogs::new();
    logs.push(BranchLog::with_commits(
        BranchName::new("master").expect("branch"),
        master.iter().rev().map(|c| (c.clone(), "master work")),
    ));

    for b in 0..branches {
        let fork_at = (b * 7) % MASTER_LEN;
        let own = (0..OWN_COMMITS).map(|i| commit(format!("b{b}-{i}")));
        let chain: Vec<CommitId> = master[..=fork_at].iter().cloned().chain(own).collect();
        logs.push(BranchLog::with_commits(
            BranchName::new(&format!("branch-{b}")).expect("branch"),
            chain.into_iter().rev().map(|c| (c, "branch work")),
        ));
    }

    let entries = logs.entry_count();
    (logs, entries)
}

// ---------------------------------------------------------------------------
// Benchmark: op sequence construction
// ---------------------------------------------------------------------------

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    let graph = HistoryGraph::new(BranchName::new("master").expect("branch"));

    for &n in &[5_usize, 20, 80] {
        let (logs, entries) = make_workspace(n);
        group.throughput(Throughput::Elements(entries as u64));
        group.bench_with_input(BenchmarkId::new("branches", n), &logs, |b, logs| {
            b.iter(|| graph.build(black_box(logs)).expect("build"));
        });
    }

    group.finish();
}

// ---------------------------------------------------------------------------
// Benchmark: lane rendering
// ---------------------------------------------------------------------------

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    let graph = HistoryGraph::new(BranchName::new("master").expect("branch"));

    for &n in &[5_usize, 20, 80] {
        let (logs, _) = make_workspace(n);
        let build = graph.build(&logs).expect("build");
        group.throughput(Throughput::Elements(build.ops.len() as u64));
        group.bench_with_input(BenchmarkId::new("branches", n), &build, |b, build| {
            b.iter(|| {
                let mut renderer = LaneRenderer::new();
                replay(&build.ops, &mut renderer).expect("replay");
                renderer.render()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_build, bench_render);
criterion_main!(benches);
