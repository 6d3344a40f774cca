use std::path::Path;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use fistest_core::parser::{parse_test_definition_str, validate_test_definition};

fn make_toml(standalone: usize, case_studies: usize, per_case: usize) -> String {
    let mut s = String::from("[test]\ntopic_number = 1\ntopic_name = \"Bench topic\"\n");
    for i in 0..standalone {
        s.push_str(&format!(
            "\n[[questions]]\nprompt = \"Standalone {i}\"\noptions = [\"a{i}\", \"b{i}\", \"c{i}\", \"d{i}\"]\ncorrect = {}\nexplanation = \"Because {i}\"\n",
            i % 4
        ));
    }
    for c in 0..case_studies {
        s.push_str(&format!(
            "\n[[case_studies]]\ntitle = \"Case {c}\"\nscenario = \"\"\"\nScenario text for case {c}.\n\"\"\"\n"
        ));
        for q in 0..per_case {
            s.push_str(&format!(
                "\n[[case_studies.questions]]\nprompt = \"Case {c} question {q}\"\noptions = [\"w\", \"x\", \"y\", \"z\"]\ncorrect = {}\n",
                q % 4
            ));
        }
    }
    s
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_test_definition");

    let small = make_toml(10, 2, 3);
    let large = make_toml(150, 10, 10);

    group.bench_function("small", |b| {
        b.iter(|| parse_test_definition_str(black_box(&small), Path::new("bench.toml")))
    });

    group.bench_function("large", |b| {
        b.iter(|| parse_test_definition_str(black_box(&large), Path::new("bench.toml")))
    });

    group.finish();
}

fn bench_validate(c: &mut Criterion) {
    let large = make_toml(150, 10, 10);
    let def = parse_test_definition_str(&large, Path::new("bench.toml")).unwrap();

    c.bench_function("validate_test_definition", |b| {
        b.iter(|| validate_test_definition(black_box(&def)))
    });
}

criterion_group!(benches, bench_parse, bench_validate);
criterion_main!(benches);
