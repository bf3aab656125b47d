use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_toml_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("toml_parsing");

    // Generate catalog TOML strings of various sizes
    let small_toml = generate_catalog_toml(5, 5);
    let medium_toml = generate_catalog_toml(20, 20);
    let large_toml = generate_catalog_toml(100, 50);

    group.bench_function("5x5", |b| {
        b.iter(|| {
            duoquiz_core::parser::parse_catalog_str(
                black_box(&small_toml),
                black_box("bench.toml".as_ref()),
            )
        })
    });

    group.bench_function("20x20", |b| {
        b.iter(|| {
            duoquiz_core::parser::parse_catalog_str(
                black_box(&medium_toml),
                black_box("bench.toml".as_ref()),
            )
        })
    });

    group.bench_function("100x50", |b| {
        b.iter(|| {
            duoquiz_core::parser::parse_catalog_str(
                black_box(&large_toml),
                black_box("bench.toml".as_ref()),
            )
        })
    });

    group.finish();
}

fn quoted(items: impl Iterator<Item = String>) -> String {
    items
        .map(|s| format!("\"{s}\""))
        .collect::<Vec<_>>()
        .join(", ")
}

fn generate_catalog_toml(levels: usize, questions: usize) -> String {
    let mut s = String::from("[catalog]\nname = \"Benchmark\"\n");
    for l in 0..levels {
        let correct = (0..questions)
            .map(|q| (q % 6).to_string())
            .collect::<Vec<_>>()
            .join(", ");
        s.push_str(&format!(
            r#"
[[levels]]
id = "level_{l}"
name = "Level {l}"
intro_animation = "anim/intro_{l}"
questions = [{}]
answers = [{}]
correct_sequence = [{correct}]
wrong_answers = [{}]
wrong_answer_animations = ["anim/shake", "anim/buzz"]
"#,
            quoted((0..questions).map(|q| format!("Question {q}?"))),
            quoted((0..questions).map(|q| format!("Answer {q}"))),
            quoted((0..6).map(|w| format!("Wrong {w}"))),
        ));
    }
    s
}

criterion_group!(benches, bench_toml_parsing);
criterion_main!(benches);
