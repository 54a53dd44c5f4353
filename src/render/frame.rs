//! Frame abstraction for drawing primitives
//!
//! A thin, bounds-checked view over a canvas's ARGB pixel buffer. Every
//! drawing call clips silently at the frame edge.

use super::glyphs::Glyph;

/// Blend a foreground color onto a background color using alpha compositing.
///
/// Both colors are in ARGB format (0xAARRGGBB). Returns the blended color with
/// full opacity.
#[inline]
pub fn blend_colors(bg: u32, fg: u32, alpha: f32) -> u32 {
    let bg_r = ((bg >> 16) & 0xFF) as f32;
    let bg_g = ((bg >> 8) & 0xFF) as f32;
    let bg_b = (bg & 0xFF) as f32;

    let fg_r = ((fg >> 16) & 0xFF) as f32;
    let fg_g = ((fg >> 8) & 0xFF) as f32;
    let fg_b = (fg & 0xFF) as f32;

    let final_r = (bg_r * (1.0 - alpha) + fg_r * alpha) as u32;
    let final_g = (bg_g * (1.0 - alpha) + fg_g * alpha) as u32;
    let final_b = (bg_b * (1.0 - alpha) + fg_b * alpha) as u32;

    0xFF000000 | (final_r << 16) | (final_g << 8) | final_b
}

pub struct Frame<'a> {
    buffer: &'a mut [u32],
    width: usize,
    height: usize,
}

impl<'a> Frame<'a> {
    /// Wrap a pixel buffer. A buffer shorter than `width * height` shrinks the
    /// height to fit.
    pub fn new(buffer: &'a mut [u32], width: usize, height: usize) -> Self {
        let height = if width > 0 {
            height.min(buffer.len() / width)
        } else {
            0
        };
        Self {
            buffer,
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Clear the entire buffer with a solid color
    #[inline]
    pub fn clear(&mut self, color: u32) {
        self.buffer.fill(color);
    }

    /// Fill a rectangle specified by pixel coordinates
    pub fn fill_rect_px(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        let x0 = x.min(self.width);
        let y0 = y.min(self.height);
        let x1 = (x + w).min(self.width);
        let y1 = (y + h).min(self.height);

        for py in y0..y1 {
            let row_start = py * self.width;
            self.buffer[row_start + x0..row_start + x1].fill(color);
        }
    }

    /// Get a single pixel (bounds-checked, returns 0 if out of bounds)
    #[inline]
    pub fn get_pixel(&self, x: usize, y: usize) -> u32 {
        if x < self.width && y < self.height {
            self.buffer[y * self.width + x]
        } else {
            0
        }
    }

    /// Composite a coverage bitmap with its origin at `(x, baseline)`
    pub fn draw_glyph(&mut self, x: f32, baseline: f32, glyph: &Glyph, color: u32) {
        let glyph_top = baseline - glyph.height as f32 - glyph.ymin as f32;

        for gy in 0..glyph.height {
            for gx in 0..glyph.width {
                let Some(&alpha) = glyph.coverage.get(gy * glyph.width + gx) else {
                    continue;
                };
                if alpha == 0 {
                    continue;
                }

                let px = x as isize + gx as isize + glyph.xmin as isize;
                let py = (glyph_top + gy as f32) as isize;
                if px < 0 || py < 0 {
                    continue;
                }
                let (px, py) = (px as usize, py as usize);
                if px < self.width && py < self.height {
                    let idx = py * self.width + px;
                    self.buffer[idx] = blend_colors(self.buffer[idx], color, alpha as f32 / 255.0);
                }
            }
        }
    }

    /// Corner arrow (↲) filling one cell: a stroke down the right side that
    /// turns left into an arrow head
    pub fn draw_wrap_arrow(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        let stroke = (w / 8).max(1);
        let right = x + w * 3 / 4;
        let left = x + w / 4;
        let top = y + h / 4;
        let mid = y + h / 2;

        self.fill_rect_px(right, top, stroke, mid - top + stroke, color);
        self.fill_rect_px(left, mid, right - left + stroke, stroke, color);

        // Head: tip at `left`, widening to the right
        let head = (w / 4).max(1);
        for i in 0..=head {
            self.fill_rect_px(left + i, mid.saturating_sub(i), 1, 2 * i + stroke, color);
        }
    }

    /// Copy out the top-left `width × height` region as RGBA bytes
    pub fn to_rgba(&self, width: usize, height: usize) -> Vec<u8> {
        let width = width.min(self.width);
        let height = height.min(self.height);
        let mut out = Vec::with_capacity(width * height * 4);
        for y in 0..height {
            let row = &self.buffer[y * self.width..y * self.width + width];
            for &argb in row {
                out.extend_from_slice(&[
                    ((argb >> 16) & 0xFF) as u8,
                    ((argb >> 8) & 0xFF) as u8,
                    (argb & 0xFF) as u8,
                    ((argb >> 24) & 0xFF) as u8,
                ]);
            }
        }
        out
    }
}
