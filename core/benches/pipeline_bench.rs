use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use stemdex_core::{Corpus, Document, Pipeline, PipelineConfig};

fn synthetic_corpus(num_docs: u32) -> Corpus {
    let sample = Corpus::sample();
    let docs = (1..=num_docs)
        .map(|id| {
            let base = &sample.documents()[(id as usize) % sample.len()];
            Document::new(id, base.text.clone())
        })
        .collect();
    Corpus::new(docs).expect("ids are unique")
}

fn bench_build(c: &mut Criterion) {
    let corpus = synthetic_corpus(2_000);
    let mut group = c.benchmark_group("build_index");
    for block in [None, Some(256), Some(4096)] {
        let pipeline = Pipeline::new(PipelineConfig { block_size: block, ..Default::default() }).expect("valid config");
        let label = block.map_or_else(|| "in_memory".to_string(), |n| format!("blocks_{n}"));
        group.bench_with_input(BenchmarkId::from_parameter(label), &corpus, |b, corpus| b.iter(|| pipeline.build(corpus)));
    }
    group.finish();
}

criterion_group!(benches, bench_build);
criterion_main!(benches);
