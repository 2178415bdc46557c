use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use serde_json::{json, Value};

use kumarmind::{Cognition, MemorySink, SkillLinks};

fn make_cognition(answers: usize) -> Cognition {
    // Answers shaped like real findings: a phrase, a skill and one data row.
    let answers: Vec<Value> = (0..answers)
        .map(|i| {
            json!({
                "data": [{"_topic": format!("topic {i}"), "_count": i, "city": "Basel"}],
                "actions": [{"type": "answer", "phrases": [format!("answer {i}")]}],
                "skills": [format!("/kumar_skill_data/en/skill_{i}.txt")]
            })
        })
        .collect();
    let doc = json!({
        "query": "what is the weather in basel",
        "count": answers.len(),
        "client_id": "aG9zdDoxMjcuMC4wLjE=",
        "query_date": "2016-07-24T09:00:00.000Z",
        "answers": answers,
        "answer_date": "2016-07-24T09:00:00.042Z",
        "answer_time": 42,
        "language": "en"
    });
    doc.to_string().parse().unwrap()
}

fn bench_recall(c: &mut Criterion) {
    let mut group = c.benchmark_group("recall");
    for size in [1usize, 16] {
        let cognition = make_cognition(size);
        let links = SkillLinks::default();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(format!("dispute/{size}"), |b| {
            b.iter(|| {
                let sink = MemorySink::new();
                black_box(cognition.recall_dispute_with(&links, &sink))
            });
        });
    }
    group.finish();
}

fn bench_readers(c: &mut Criterion) {
    let cognition = make_cognition(16);
    c.bench_function("readers/expression", |b| {
        b.iter(|| black_box(cognition.expression()));
    });
    c.bench_function("readers/parse_display", |b| {
        let text = cognition.to_string();
        b.iter(|| {
            let parsed: Cognition = black_box(&text).parse().unwrap();
            black_box(parsed.to_string())
        });
    });
}

criterion_group!(benches, bench_recall, bench_readers);
criterion_main!(benches);
