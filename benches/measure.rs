//! Measurement benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use termtext::style::{Color, Style};
use termtext::{units, Measurer, Text};

fn bench_line_widths(c: &mut Criterion) {
    let mut group = c.benchmark_group("measure");

    let text = "\tname\x1b[1m:\x1b[0m value ｗｉｄｅ\x08\r\n".repeat(500);
    let units = units(&text);
    let measurer = Measurer::default();
    group.throughput(Throughput::Elements(units.len() as u64));

    group.bench_function("line_widths", |b| {
        b.iter(|| measurer.line_widths(black_box(&units)))
    });

    group.bench_function("measurements", |b| {
        b.iter(|| measurer.measure(black_box(&units)).map(|a| a.columns).sum::<isize>())
    });

    group.finish();
}

fn bench_style(c: &mut Criterion) {
    let mut group = c.benchmark_group("measure");

    let text = Text::new(&"one line of text\n".repeat(500));
    let style = Style::new()
        .color(Color::Rgb(255, 128, 0))
        .background(Color::Default);

    group.bench_function("style_rewrap", |b| b.iter(|| black_box(&text).style(&style)));

    group.finish();
}

criterion_group!(benches, bench_line_widths, bench_style);
criterion_main!(benches);
