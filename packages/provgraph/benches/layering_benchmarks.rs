//! Performance benchmarks for session load and relayout
//!
//! Synthetic datasets: a chain of analyses, each running one of three
//! workflows over a short chain of files.
//! - Load: build, partition, assemble, static layout, motifs, DOI init
//! - Relayout: interaction events that trigger the dynamic view
//! - Policy switch: motif rediscovery plus full relayout

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use provgraph::features::graph_builder::{AnalysisRecord, NodeRecord};
use provgraph::features::motifs::LayeringPolicy;
use provgraph::{ProvSession, SessionEvent, VisConfig};

const FILES_PER_ANALYSIS: usize = 5;

// ============================================================================
// Fixtures
// ============================================================================

fn synthetic_dataset(analyses: usize) -> (Vec<NodeRecord>, Vec<AnalysisRecord>) {
    let mut nodes = vec![NodeRecord::new("source", "Source Name")];
    let mut runs = Vec::with_capacity(analyses);
    let mut previous = "source".to_string();

    for a in 0..analyses {
        let analysis = format!("an-{}", a);
        let workflow = format!("wf-{}", a % 3);
        let start = format!("2016-01-01T{:02}:{:02}:00", 10 + a / 60, a % 60);
        let payload = format!("{{u'name': u'{}', u'steps': {{}}}}", workflow);
        runs.push(AnalysisRecord::new(&analysis, &workflow, start).with_workflow_copy(payload));

        for f in 0..FILES_PER_ANALYSIS {
            let uuid = format!("{}-f{}", analysis, f);
            nodes.push(
                NodeRecord::new(&uuid, "Derived Data File")
                    .with_parents([previous.clone()])
                    .with_analysis(&analysis),
            );
            previous = uuid;
        }
    }

    (nodes, runs)
}

fn loaded(analyses: usize, config: VisConfig) -> ProvSession {
    let (nodes, runs) = synthetic_dataset(analyses);
    ProvSession::load(nodes, runs, Vec::new(), config).unwrap()
}

// ============================================================================
// Load
// ============================================================================

fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("session_load");

    for analyses in [10, 50, 200] {
        let (nodes, runs) = synthetic_dataset(analyses);
        group.throughput(Throughput::Elements(nodes.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(analyses), &analyses, |b, _| {
            b.iter(|| {
                let session = ProvSession::load(
                    nodes.clone(),
                    runs.clone(),
                    Vec::new(),
                    VisConfig::default(),
                )
                .unwrap();
                black_box(session)
            });
        });
    }

    group.finish();
}

// ============================================================================
// Dynamic relayout
// ============================================================================

fn bench_select_relayout(c: &mut Criterion) {
    let mut group = c.benchmark_group("select_relayout");

    for analyses in [10, 50, 200] {
        let config = VisConfig::default().with_auto_update(true);
        let base = loaded(analyses, config.clone());
        let target = base.graph().nodes[base.graph().nodes.len() / 2];

        group.bench_with_input(BenchmarkId::from_parameter(analyses), &analyses, |b, _| {
            b.iter_batched(
                || loaded(analyses, config.clone()),
                |mut session| {
                    session.handle(SessionEvent::Select { node: target }).unwrap();
                    black_box(session)
                },
                criterion::BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

fn bench_policy_switch(c: &mut Criterion) {
    let mut session = loaded(50, VisConfig::default());

    c.bench_function("policy_switch_50", |b| {
        let mut strict = true;
        b.iter(|| {
            let policy = if strict {
                LayeringPolicy::Strict
            } else {
                LayeringPolicy::Weak
            };
            strict = !strict;
            session
                .handle(SessionEvent::SetLayeringPolicy { policy })
                .unwrap();
            black_box(session.graph().layers.len())
        });
    });
}

criterion_group!(benches, bench_load, bench_select_relayout, bench_policy_switch);
criterion_main!(benches);
