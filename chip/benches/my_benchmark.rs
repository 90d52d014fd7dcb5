use chip::{chip8::ChipSet, resources::Rom};
use criterion::{criterion_group, criterion_main, Criterion};

/// Counts V0 up, draws the matching glyph and jumps back to the start.
const COUNTER: [u8; 12] = [
    0x70, 0x01, // ADD V0, 0x01
    0xF0, 0x29, // LD F, V0
    0x00, 0xE0, // CLS
    0xD1, 0x25, // DRW V1, V2, 5
    0x81, 0x04, // ADD V1, V0
    0x12, 0x00, // JP 0x200
];

static BASE_ROM: once_cell::sync::Lazy<Rom> = once_cell::sync::Lazy::new(|| {
    Rom::new("counter", &COUNTER).expect("The counter rom fits into memory.")
});

/// will setup the default configured chip
fn get_default_chip() -> ChipSet {
    ChipSet::new(BASE_ROM.clone())
}

pub fn step_bench(c: &mut Criterion) {
    let mut chip = get_default_chip();
    c.bench_function("step_bench", |b| {
        b.iter(|| {
            let _ = chip.next();
            chip.consume_draw_flag()
        });
    });
}

pub fn print_bench(c: &mut Criterion) {
    let chip = get_default_chip();
    c.bench_function("print_bench", |b| {
        b.iter(|| {
            let _ = format!("{}", chip);
        });
    });
}

criterion_group!(benches, step_bench, print_bench);
criterion_main!(benches);
