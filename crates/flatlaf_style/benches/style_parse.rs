use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use flatlaf_style::{parse, parse_color_or_function, NoopResolver, ParsedStyleCache, UiDefaults};

const STYLES: &[(&str, &str)] = &[
    ("simple", "arc: 8; borderWidth: 1"),
    ("colors", "background: #f2f2f2; foreground: #000; focusedBorderColor: lighten(@accent,10%)"),
    (
        "nested",
        "background: saturate(darken(#fff,20%),10%); selectionBackground: shade(shade(@accent,10%),10%); \
         foreground: contrast(@accent,#000,#fff)",
    ),
    ("mixed", "margin: 2,14,2,14; iconTextGap: 6; font: +1 bold; [dark]background: mix(@accent,#000,40%)"),
];

fn defaults() -> UiDefaults {
    let mut defaults = UiDefaults::new();
    defaults.put_variable("@accent", "#2675bf");
    defaults
}

fn bench_parse(c: &mut Criterion) {
    let defaults = defaults();
    let mut group = c.benchmark_group("parse_style");

    for (name, style) in STYLES {
        group.throughput(Throughput::Bytes(style.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), style, |b, style| {
            b.iter(|| parse(black_box(*style), &defaults))
        });
    }
    group.finish();
}

fn bench_cached_parse(c: &mut Criterion) {
    let defaults = defaults();
    let mut cache = ParsedStyleCache::new(64);

    c.bench_function("parse_style_cached", |b| {
        b.iter(|| {
            for (_, style) in STYLES {
                let _ = cache.parse(black_box(style), &defaults);
            }
        })
    });
}

fn bench_color_functions(c: &mut Criterion) {
    let mut group = c.benchmark_group("color_function");
    for value in ["#2675bf", "lighten(#f00,20%)", "shade(shade(shade(#f0f,10%),10%),10%)"] {
        group.bench_with_input(BenchmarkId::from_parameter(value), value, |b, value| {
            b.iter(|| parse_color_or_function(black_box(value), &NoopResolver))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_parse, bench_cached_parse, bench_color_functions);
criterion_main!(benches);
