//! Benchmarks for the layout pipeline
//!
//! Run with: cargo bench layout

use eighty::layout::breaker::break_lines;
use eighty::layout::layout;
use eighty::tokenizer::tokenize;
use eighty::FormatOptions;

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

const PROSE: &str = "The quick brown fox jumps over the lazy dog, while (somewhat) \
    reluctantly reading http://example.com/docs/index.html for the third time. ";

const CJK: &str = "天地玄黄，宇宙洪荒。日月盈昃，辰宿列张。寒来暑往，秋收冬藏。";

fn document(paragraph: &str, repeats: usize) -> String {
    let mut text = String::with_capacity(paragraph.len() * repeats + repeats / 8);
    for i in 0..repeats {
        text.push_str(paragraph);
        if i % 8 == 7 {
            text.push('\n');
        }
    }
    text
}

// ============================================================================
// Tokenizer
// ============================================================================

#[divan::bench(args = [10, 100, 400])]
fn tokenize_prose(bencher: divan::Bencher, repeats: usize) {
    let text = document(PROSE, repeats);
    bencher.bench(|| tokenize(divan::black_box(text.as_bytes()), 4));
}

#[divan::bench(args = [10, 100, 400])]
fn tokenize_cjk(bencher: divan::Bencher, repeats: usize) {
    let text = document(CJK, repeats);
    bencher.bench(|| tokenize(divan::black_box(text.as_bytes()), 4));
}

// ============================================================================
// Line breaking
// ============================================================================

#[divan::bench(args = [40, 80, 120])]
fn break_prose(bencher: divan::Bencher, columns: usize) {
    let tokens = tokenize(document(PROSE, 100).as_bytes(), 4);
    bencher
        .with_inputs(|| tokens.clone())
        .bench_values(|tokens| break_lines(tokens, columns));
}

// ============================================================================
// Full pipeline
// ============================================================================

#[divan::bench(args = [40, 80, 120])]
fn layout_prose(bencher: divan::Bencher, columns: usize) {
    let text = document(PROSE, 100);
    let options = FormatOptions::default();
    bencher.bench(|| layout(divan::black_box(text.as_bytes()), columns, &options));
}

#[divan::bench(args = [40, 80, 120])]
fn layout_mixed(bencher: divan::Bencher, columns: usize) {
    let mut text = String::from("#### Prose\n");
    text.push_str(&document(PROSE, 50));
    text.push_str("\n#### CJK\n");
    text.push_str(&document(CJK, 50));
    text.push_str("\n```\n");
    text.push_str(&"let x = compute(a, b) + 1; ".repeat(40));
    text.push_str("\n```\n");

    let options = FormatOptions::default();
    bencher.bench(|| layout(divan::black_box(text.as_bytes()), columns, &options));
}
