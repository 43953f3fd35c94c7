use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ldiff_core::{levenshtein, DiffEngine};

fn source_file(lines: usize, edit_every: usize) -> (String, String) {
    let old: Vec<String> = (0..lines)
        .map(|i| format!("    let value_{i} = compute(input_{i}, {i});"))
        .collect();
    let new: Vec<String> = old
        .iter()
        .enumerate()
        .map(|(i, line)| {
            if i % edit_every == 0 {
                line.replace("compute", "recompute")
            } else {
                line.clone()
            }
        })
        .collect();
    (old.join("\n"), new.join("\n"))
}

fn bench_diff(c: &mut Criterion) {
    let engine = DiffEngine::new();

    let (old, new) = source_file(2_000, 10);
    c.bench_function("diff_2k_lines_sparse_edits", |b| {
        b.iter(|| engine.diff_strings(black_box(&old), black_box(&new)))
    });

    let (old, new) = source_file(2_000, 1);
    c.bench_function("diff_2k_lines_every_line_edited", |b| {
        b.iter(|| engine.diff_strings(black_box(&old), black_box(&new)))
    });
}

fn bench_levenshtein(c: &mut Criterion) {
    let a = "x".repeat(200) + "abc";
    let b = "x".repeat(190) + "abd";
    c.bench_function("levenshtein_200_units", |bench| {
        bench.iter(|| levenshtein(black_box(&a), black_box(&b)))
    });
}

criterion_group!(benches, bench_diff, bench_levenshtein);
criterion_main!(benches);
