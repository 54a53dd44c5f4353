//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::sync::Arc;

use eighty::layout::breaker::break_lines;
use eighty::layout::{layout, Document, Line};
use eighty::render::glyphs::{Glyph, GlyphSource};
use eighty::render::RasterOptions;
use eighty::token::Mark;
use eighty::tokenizer::tokenize;
use eighty::FormatOptions;

/// Default options with the TOC switched off
pub fn plain_options() -> FormatOptions {
    FormatOptions {
        toc: false,
        ..FormatOptions::default()
    }
}

/// Full pipeline with [`plain_options`]
pub fn lay(text: &str, columns: usize) -> Document {
    layout(text.as_bytes(), columns, &plain_options()).unwrap()
}

/// Full pipeline, one string per output line
pub fn texts(text: &str, columns: usize) -> Vec<String> {
    lay(text, columns).texts()
}

/// Tokenize and break, without post-processing or justification
pub fn broken(text: &str, columns: usize) -> Vec<Line> {
    break_lines(tokenize(text.as_bytes(), 4), columns)
}

pub fn broken_texts(text: &str, columns: usize) -> Vec<String> {
    broken(text, columns).iter().map(Line::text).collect()
}

/// Line text with continuation markers removed
pub fn unmarked_text(line: &Line) -> String {
    line.tokens()
        .iter()
        .filter(|t| t.mark() != Mark::Continuation)
        .map(|t| t.text())
        .collect()
}

/// Glyph source that draws every code point as a solid box
pub struct BoxGlyphs;

pub const BOX_CELL: f32 = 8.0;

impl GlyphSource for BoxGlyphs {
    fn cache_key(&self) -> u64 {
        0xB0C5
    }

    fn ascent(&self, _px: f32) -> f32 {
        12.0
    }

    fn rasterize(&self, ch: char, _px: f32) -> Glyph {
        let width = if (ch as u32) <= 0xFF { 6 } else { 14 };
        let height = 10;
        Glyph {
            width,
            height,
            xmin: 1,
            ymin: 0,
            advance: BOX_CELL * if (ch as u32) <= 0xFF { 1.0 } else { 2.0 },
            coverage: vec![255; width * height],
        }
    }

    fn cell_width(&self, _px: f32) -> f32 {
        BOX_CELL
    }
}

pub fn box_raster_options() -> RasterOptions {
    RasterOptions::new(Arc::new(BoxGlyphs))
}
