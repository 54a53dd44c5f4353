//! Glyph sources and the per-canvas glyph cache
//!
//! The raster renderer never talks to a font library directly. It asks a
//! [`GlyphSource`] for coverage bitmaps; [`FontFace`] is the fontdue-backed
//! implementation. Rasterized glyphs are cached on the canvas that drew them,
//! keyed by source, code point and pixel size.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::path::Path;

use fontdue::{Font, FontSettings};

use super::frame::Frame;
use crate::error::FormatError;

/// Coverage bitmap plus placement metrics for one code point
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Glyph {
    pub width: usize,
    pub height: usize,
    /// Offset from the pen position to the bitmap's left edge
    pub xmin: i32,
    /// Offset from the baseline to the bitmap's bottom edge
    pub ymin: i32,
    /// Horizontal advance in pixels
    pub advance: f32,
    /// `width * height` alpha values, row-major
    pub coverage: Vec<u8>,
}

/// Anything that can rasterize code points
pub trait GlyphSource: Send + Sync {
    /// Stable identity, so two sources never share cache entries
    fn cache_key(&self) -> u64;

    /// Distance from the top of a row to the baseline at `px`
    fn ascent(&self, px: f32) -> f32;

    fn rasterize(&self, ch: char, px: f32) -> Glyph;

    /// Pen advance of one single-width cell
    fn cell_width(&self, px: f32) -> f32 {
        self.rasterize('M', px).advance
    }
}

/// A parsed TrueType/OpenType font
pub struct FontFace {
    font: Font,
    key: u64,
}

impl FontFace {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FormatError> {
        let font = Font::from_bytes(bytes, FontSettings::default())
            .map_err(|e| FormatError::Font(e.to_string()))?;
        let mut hasher = DefaultHasher::new();
        bytes.hash(&mut hasher);
        Ok(Self {
            font,
            key: hasher.finish(),
        })
    }

    pub fn load(path: &Path) -> Result<Self, FormatError> {
        let bytes = std::fs::read(path)
            .map_err(|e| FormatError::Font(format!("{}: {}", path.display(), e)))?;
        tracing::info!("Loaded font from {}", path.display());
        Self::from_bytes(&bytes)
    }
}

impl GlyphSource for FontFace {
    fn cache_key(&self) -> u64 {
        self.key
    }

    fn ascent(&self, px: f32) -> f32 {
        self.font
            .horizontal_line_metrics(px)
            .map_or(px * 0.8, |m| m.ascent)
    }

    fn rasterize(&self, ch: char, px: f32) -> Glyph {
        let (metrics, coverage) = self.font.rasterize(ch, px);
        Glyph {
            width: metrics.width,
            height: metrics.height,
            xmin: metrics.xmin,
            ymin: metrics.ymin,
            advance: metrics.advance_width,
            coverage,
        }
    }
}

/// (source key, code point, pixel size bits)
pub type GlyphCacheKey = (u64, char, u32);
pub type GlyphCache = HashMap<GlyphCacheKey, Glyph>;

/// Draws code points from one source through a canvas's glyph cache
pub struct GlyphPainter<'a> {
    source: &'a dyn GlyphSource,
    cache: &'a mut GlyphCache,
    px: f32,
    ascent: f32,
}

impl<'a> GlyphPainter<'a> {
    pub fn new(source: &'a dyn GlyphSource, cache: &'a mut GlyphCache, px: f32) -> Self {
        Self {
            source,
            cache,
            px,
            ascent: source.ascent(px),
        }
    }

    /// Draw `ch` with its pen at `x`, in the row starting at `y`
    pub fn draw(&mut self, frame: &mut Frame, x: f32, y: usize, ch: char, color: u32) {
        let key = (self.source.cache_key(), ch, self.px.to_bits());
        let glyph = self
            .cache
            .entry(key)
            .or_insert_with(|| self.source.rasterize(ch, self.px));
        frame.draw_glyph(x, y as f32 + self.ascent, glyph, color);
    }
}
