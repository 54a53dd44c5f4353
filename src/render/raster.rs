//! Raster renderer
//!
//! Draws a justified document onto a pooled [`Canvas`], one fixed-pitch cell
//! per column: single-width code points advance the pen by one cell, wide
//! ones by two. Continuation markers are drawn as a corner arrow rather than
//! as text.

use std::io::Cursor;
use std::sync::Arc;

use image::{ImageBuffer, ImageFormat, Rgba, RgbaImage};

use super::glyphs::{GlyphPainter, GlyphSource};
use super::pool::Canvas;
use crate::error::FormatError;
use crate::layout::Document;
use crate::theme::{PaintClass, Theme};
use crate::token::{CodeMarker, Mark, Token, TokenKind};
use crate::width::char_width;

pub struct RasterOptions {
    pub glyphs: Arc<dyn GlyphSource>,
    pub theme: Theme,
    /// Pixel size passed to the glyph source
    pub font_size: f32,
    /// Row pitch in pixels
    pub line_height: u32,
    /// Blank border around the text, in pixels
    pub margin: u32,
    /// Number source lines in a left gutter
    pub line_numbers: bool,
    /// Color comments, strings, numbers and symbols
    pub syntax_coloring: bool,
}

impl RasterOptions {
    pub fn new(glyphs: Arc<dyn GlyphSource>) -> Self {
        Self {
            glyphs,
            theme: Theme::default(),
            font_size: 16.0,
            line_height: 19,
            margin: 8,
            line_numbers: false,
            syntax_coloring: true,
        }
    }
}

pub struct RasterOutput {
    /// Cropped to the rows actually drawn
    pub image: RgbaImage,
    pub rows: usize,
    /// Set when the document had more rows than fit on the canvas
    pub truncated: bool,
}

impl RasterOutput {
    pub fn encode_png(&self) -> Result<Vec<u8>, FormatError> {
        let mut bytes = Vec::new();
        self.image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|e| FormatError::Encode(e.to_string()))?;
        Ok(bytes)
    }
}

impl std::fmt::Debug for RasterOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterOutput")
            .field("width", &self.image.width())
            .field("height", &self.image.height())
            .field("rows", &self.rows)
            .field("truncated", &self.truncated)
            .finish()
    }
}

/// Literal or comment region the painter is inside
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Literal {
    #[default]
    None,
    LineComment,
    BlockComment,
    Str(char),
}

/// Picks a paint class per token from the code markers seen so far
struct Highlighter {
    enabled: bool,
    state: Literal,
}

impl Highlighter {
    fn new(enabled: bool) -> Self {
        Self {
            enabled,
            state: Literal::None,
        }
    }

    fn paint(&mut self, token: &Token) -> PaintClass {
        if !self.enabled {
            return PaintClass::Normal;
        }

        if token.kind() == TokenKind::Newline {
            if matches!(self.state, Literal::LineComment | Literal::Str(_)) {
                self.state = Literal::None;
            }
            return PaintClass::Normal;
        }

        match (self.state, token.code()) {
            (Literal::None, Some(CodeMarker::LineComment)) => {
                self.state = Literal::LineComment;
                PaintClass::Comment
            }
            (Literal::None, Some(CodeMarker::BlockOpen)) => {
                self.state = Literal::BlockComment;
                PaintClass::Comment
            }
            (Literal::None, Some(CodeMarker::Quote(q))) => {
                self.state = Literal::Str(q);
                PaintClass::String
            }
            (Literal::BlockComment, Some(CodeMarker::BlockClose)) => {
                self.state = Literal::None;
                PaintClass::Comment
            }
            (Literal::Str(open), Some(CodeMarker::Quote(q))) if q == open => {
                self.state = Literal::None;
                PaintClass::String
            }
            (Literal::LineComment | Literal::BlockComment, _) => PaintClass::Comment,
            (Literal::Str(_), _) => PaintClass::String,
            (Literal::None, _) => base_class(token),
        }
    }
}

fn base_class(token: &Token) -> PaintClass {
    match token.kind() {
        TokenKind::Latin if token.text().bytes().all(|b| b.is_ascii_digit()) => PaintClass::Number,
        TokenKind::NarrowDelim | TokenKind::WideDelim => PaintClass::Symbol,
        _ => PaintClass::Normal,
    }
}

/// Rows that begin a new source line: the first, and any after a natural
/// end or an image
fn source_line_starts(doc: &Document) -> impl Iterator<Item = bool> + '_ {
    std::iter::once(true).chain(
        doc.lines
            .iter()
            .map(|line| line.is_natural() || line.is_image()),
    )
}

/// Draw `doc` onto `canvas` and return the cropped image
pub fn render_raster(
    doc: &Document,
    canvas: &mut Canvas,
    options: &RasterOptions,
) -> Result<RasterOutput, FormatError> {
    let source = options.glyphs.as_ref();
    let theme = &options.theme;
    let px = options.font_size;
    let cell = source.cell_width(px).max(1.0);
    let line_height = options.line_height.max(1) as usize;
    let margin = options.margin as usize;

    let (digits, gutter) = if options.line_numbers {
        let count = source_line_starts(doc)
            .take(doc.lines.len())
            .filter(|&s| s)
            .count();
        let digits = count.to_string().len().max(2);
        (digits, ((digits + 1) as f32 * cell).ceil() as usize)
    } else {
        (0, 0)
    };
    let text_left = margin + gutter;
    let full_width = text_left + (doc.columns as f32 * cell).ceil() as usize + margin;

    let background = theme.color(PaintClass::Background).to_argb_u32();
    let wrap_color = theme.color(PaintClass::WrapMarker).to_argb_u32();
    let number_color = theme.color(PaintClass::LineNumber).to_argb_u32();

    let (mut frame, cache) = canvas.parts();
    frame.clear(background);
    let mut painter = GlyphPainter::new(source, cache, px);
    let mut highlighter = Highlighter::new(options.syntax_coloring);

    let mut rows = 0;
    let mut truncated = false;
    let mut source_line = 0;

    for (line, starts_source_line) in doc.lines.iter().zip(source_line_starts(doc)) {
        let y = margin + rows * line_height;
        if y + line_height > frame.height() {
            truncated = true;
            break;
        }

        if options.line_numbers && starts_source_line {
            source_line += 1;
            let label = source_line.to_string();
            let left = margin as f32 + digits.saturating_sub(label.len()) as f32 * cell;
            for (k, ch) in label.chars().enumerate() {
                painter.draw(&mut frame, left + k as f32 * cell, y, ch, number_color);
            }
        }

        let mut x = text_left as f32;
        for token in line.tokens() {
            if token.mark() == Mark::Continuation {
                frame.draw_wrap_arrow(x as usize, y, cell as usize, line_height, wrap_color);
                x += cell;
                continue;
            }

            let color = theme.color(highlighter.paint(token)).to_argb_u32();
            for ch in token.text().chars() {
                if ch != ' ' {
                    painter.draw(&mut frame, x, y, ch, color);
                }
                x += cell * char_width(ch) as f32;
            }
        }

        rows += 1;
    }

    if truncated {
        tracing::warn!(
            "Raster output truncated at {} of {} rows",
            rows,
            doc.lines.len()
        );
    }

    let width = full_width.min(frame.width());
    let height = (2 * margin + rows * line_height).min(frame.height());
    let pixels = frame.to_rgba(width, height);
    let image: RgbaImage = ImageBuffer::<Rgba<u8>, Vec<u8>>::from_raw(width as u32, height as u32, pixels)
        .ok_or_else(|| FormatError::Encode("canvas region does not match image size".into()))?;

    Ok(RasterOutput {
        image,
        rows,
        truncated,
    })
}
