//! Benchmarks for the interaction engine's hot paths.
//!
//! Run with: cargo bench
//!
//! Results are saved to `target/criterion/` with HTML reports.
#![allow(clippy::expect_used, clippy::unwrap_used)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use cellgrid::clipboard::{encode_range, parse_payload, tile_block};
use cellgrid::layout::cell_at_offset;
use cellgrid::render::{paint_frame, RecordingSurface};
use cellgrid::types::{CellRef, Range, Sheet};
use cellgrid::GridState;

/// Hit-testing: the linear band scan at the far corner of a large sheet.
fn bench_cell_at_offset(c: &mut Criterion) {
    let sheet = Sheet::blank(1000, 1000);
    c.bench_function("cell_at_offset_far_corner", |b| {
        b.iter(|| cell_at_offset(black_box(&sheet), black_box(79_999.0), black_box(23_999.0)))
    });
}

/// Clipboard round trip over a 100×100 range.
fn bench_clipboard_round_trip(c: &mut Criterion) {
    let mut sheet = Sheet::blank(100, 100);
    for row in 0..100 {
        for col in 0..100 {
            if let Some(cell) = sheet.cell_mut(CellRef::new(row, col)) {
                cell.set_value(format!("r{row}c{col}").as_str().into());
            }
        }
    }
    let range = Range::new(CellRef::new(0, 0), CellRef::new(99, 99));

    c.bench_function("encode_100x100", |b| {
        b.iter(|| encode_range(black_box(&sheet), black_box(range)))
    });

    let text = encode_range(&sheet, range);
    c.bench_function("parse_100x100", |b| {
        b.iter(|| parse_payload(black_box(&text)))
    });

    let block = parse_payload(&text);
    c.bench_function("tile_100x100_into_200x200", |b| {
        b.iter(|| tile_block(black_box(&block), 200, 200))
    });
}

/// One frame over a screen-sized viewport into a large sheet.
fn bench_paint_frame(c: &mut Criterion) {
    let mut state = GridState::new();
    state
        .attach(Sheet::blank(10_000, 100))
        .expect("sheet attaches");
    state.set_viewport(1280.0, 720.0);
    state.set_scroll(2000.0, 100_000.0);
    let mut surface = RecordingSurface::new(1280.0, 720.0);

    c.bench_function("paint_frame_viewport", |b| {
        b.iter(|| {
            surface.clear_ops();
            paint_frame(black_box(&mut state), &mut surface);
        })
    });
}

criterion_group!(
    benches,
    bench_cell_at_offset,
    bench_clipboard_round_trip,
    bench_paint_frame
);
criterion_main!(benches);
