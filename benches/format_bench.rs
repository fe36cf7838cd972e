use criterion::{Criterion, black_box, criterion_group, criterion_main};

use dialplan::{ENGINE, NumberFormat, ParsedNumber};

fn setup_numbers() -> Vec<ParsedNumber> {
    [
        ("(650) 253-0000", Some("US")),
        ("+44 20 8765 4321", None),
        ("020 8765 4321", Some("GB")),
        ("8 (495) 123-45-67", Some("RU")),
        ("02 3661 8300", Some("IT")),
        ("1-800-FLOWERS", Some("US")),
        ("+41 44 668 1800 ext. 101", None),
        ("+800 1234 5678", None),
    ]
    .iter()
    .map(|(number, region)| ENGINE.parse(number, *region).unwrap())
    .collect()
}

fn formatting_benchmark(c: &mut Criterion) {
    let numbers = setup_numbers();

    let mut group = c.benchmark_group("Formatting");

    for format in [
        NumberFormat::E164,
        NumberFormat::International,
        NumberFormat::National,
        NumberFormat::Rfc3966,
    ] {
        group.bench_function(format!("format({:?})", format), |b| {
            b.iter(|| {
                for number in &numbers {
                    ENGINE.format(black_box(number), black_box(format));
                }
            })
        });
    }

    group.bench_function("format_for_calling_from", |b| {
        b.iter(|| {
            for number in &numbers {
                ENGINE.format_for_calling_from(black_box(number), black_box("CH"));
            }
        })
    });
    group.finish();
}

criterion_group!(benches, formatting_benchmark);
criterion_main!(benches);
