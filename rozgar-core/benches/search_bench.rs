use criterion::{criterion_group, criterion_main, Criterion};
use rozgar_core::index::LexicalIndex;
use rozgar_core::tokenizer::tokenize;
use rozgar_core::types::{ContentType, Document};

fn synthetic_corpus(n: usize) -> Vec<Document> {
    let sectors = ["electrician", "plumber", "nurse", "clerk", "driver", "welder"];
    let districts = ["ludhiana", "amritsar", "patiala", "jalandhar", "bathinda"];
    (0..n)
        .map(|i| {
            let content = format!(
                "ROLE: {} \nLOCATION: {} district\nQUALIFICATION: matric pass, \
                 two years experience\nSALARY: {} per month",
                sectors[i % sectors.len()],
                districts[i % districts.len()],
                12_000 + (i % 7) * 1_000,
            );
            Document::new(format!("job-{i}"), content, ContentType::Job)
        })
        .collect()
}

fn bench_tokenize(c: &mut Criterion) {
    let text = synthetic_corpus(1)
        .pop()
        .map(|d| d.content.repeat(50))
        .unwrap();
    c.bench_function("tokenize_job_block", |b| b.iter(|| tokenize(&text)));
}

fn bench_build_and_query(c: &mut Criterion) {
    let corpus = synthetic_corpus(2_000);
    c.bench_function("index_build_2k", |b| {
        b.iter(|| LexicalIndex::build(corpus.clone()))
    });

    let index = LexicalIndex::build(corpus);
    c.bench_function("bm25_query_2k", |b| {
        b.iter(|| index.query("electrician vacancy ludhiana salary", 10))
    });
}

criterion_group!(benches, bench_tokenize, bench_build_and_query);
criterion_main!(benches);
