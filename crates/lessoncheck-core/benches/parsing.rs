use std::path::Path;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use lessoncheck_core::parser::{parse_lesson_str, LoadOptions};

fn lesson_toml(questions: usize) -> String {
    let mut s = String::from("[quiz]\ntitle = \"Bench Quiz\"\npassing_score = 70\n");
    for i in 0..questions {
        s.push_str(&format!(
            "\n[[questions]]\nid = {i}\nprompt = \"Question {i}?\"\n\
             options = [\"A {i}\", \"B {i}\", \"C {i}\", \"D {i}\"]\n\
             correct_answer = {}\nexplanation = \"Because.\"\n",
            i % 4
        ));
    }
    s
}

fn lesson_json_literal(questions: usize) -> String {
    let items: Vec<String> = (0..questions)
        .map(|i| {
            format!(
                r#"{{"id": {i}, "question": "Q{i}", "options": ["1%", "2.5%", "3.5%", "5%"], "correctAnswer": "3.5%"}}"#
            )
        })
        .collect();
    format!(
        r#"{{"quiz": {{"title": "Bench"}}, "questions": [{}]}}"#,
        items.join(",")
    )
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_lesson");
    let options = LoadOptions::default();

    let small = lesson_toml(8);
    let large = lesson_toml(200);
    let literal = lesson_json_literal(200);

    group.bench_function("toml/8", |b| {
        b.iter(|| parse_lesson_str(black_box(&small), Path::new("bench.toml"), &options))
    });

    group.bench_function("toml/200", |b| {
        b.iter(|| parse_lesson_str(black_box(&large), Path::new("bench.toml"), &options))
    });

    group.bench_function("json_literal/200", |b| {
        b.iter(|| parse_lesson_str(black_box(&literal), Path::new("bench.json"), &options))
    });

    group.finish();
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
