mod common;

use std::time::Duration;

use common::{box_raster_options, lay, plain_options, BOX_CELL};
use eighty::render::{format, render_raster, CanvasPool, Rendered, Target};
use eighty::theme::{Color, PaintClass, Theme};
use eighty::FormatError;
use image::Rgba;

fn rgba(color: Color) -> Rgba<u8> {
    Rgba([color.r, color.g, color.b, color.a])
}

fn pool(width: usize, height: usize) -> CanvasPool {
    CanvasPool::new(1, width, height, Duration::from_millis(50))
}

#[test]
fn test_output_cropped_to_rows_drawn() {
    let pool = pool(400, 200);
    let options = box_raster_options();
    let mut canvas = pool.checkout().unwrap();
    let out = render_raster(&lay("hello\nworld", 10), &mut canvas, &options).unwrap();

    assert_eq!(out.rows, 2);
    assert!(!out.truncated);
    assert_eq!(out.image.width(), 8 * 2 + 10 * BOX_CELL as u32);
    assert_eq!(out.image.height(), 8 * 2 + 2 * 19);
}

#[test]
fn test_background_and_glyph_colors() {
    let pool = pool(400, 200);
    let options = box_raster_options();
    let theme = Theme::default();
    let mut canvas = pool.checkout().unwrap();
    let out = render_raster(&lay("hello", 10), &mut canvas, &options).unwrap();

    assert_eq!(*out.image.get_pixel(0, 0), rgba(theme.color(PaintClass::Background)));
    // First box spans x 9..15, y 10..20
    assert_eq!(*out.image.get_pixel(10, 12), rgba(theme.color(PaintClass::Normal)));
    // Gap between the first and second box
    assert_eq!(*out.image.get_pixel(16, 12), rgba(theme.color(PaintClass::Background)));
}

#[test]
fn test_truncates_at_canvas_height() {
    let pool = pool(200, 60);
    let options = box_raster_options();
    let mut canvas = pool.checkout().unwrap();
    let out = render_raster(&lay("a\nb\nc\nd", 10), &mut canvas, &options).unwrap();

    assert_eq!(out.rows, 2);
    assert!(out.truncated);
    assert_eq!(out.image.height(), 54);
}

#[test]
fn test_width_clamped_to_canvas() {
    let pool = pool(50, 100);
    let options = box_raster_options();
    let mut canvas = pool.checkout().unwrap();
    let out = render_raster(&lay("x", 80), &mut canvas, &options).unwrap();
    assert_eq!(out.image.width(), 50);
}

#[test]
fn test_continuation_draws_arrow() {
    let pool = pool(400, 200);
    let options = box_raster_options();
    let theme = Theme::default();
    let mut canvas = pool.checkout().unwrap();
    let out = render_raster(&lay("abcdefghij", 4), &mut canvas, &options).unwrap();

    // Marker cell starts at x 40; the arrow's vertical stroke is at x 46
    assert_eq!(*out.image.get_pixel(46, 14), rgba(theme.color(PaintClass::WrapMarker)));
}

#[test]
fn test_line_number_gutter() {
    let pool = pool(400, 200);
    let mut options = box_raster_options();
    options.line_numbers = true;
    let theme = Theme::default();
    let mut canvas = pool.checkout().unwrap();
    let out = render_raster(&lay("a\nb", 10), &mut canvas, &options).unwrap();

    // Two digit columns plus one spacer column
    assert_eq!(out.image.width(), 8 + 24 + 80 + 8);
    // "1" is right-aligned in the gutter, starting at x 16
    assert_eq!(*out.image.get_pixel(18, 12), rgba(theme.color(PaintClass::LineNumber)));
    // Text starts after the gutter
    assert_eq!(*out.image.get_pixel(34, 12), rgba(theme.color(PaintClass::Normal)));
}

#[test]
fn test_syntax_coloring_through_format() {
    let pool = pool(400, 200);
    let options = box_raster_options();
    let theme = Theme::default();
    let target = Target::Raster {
        pool: &pool,
        options: &options,
    };

    let Ok(Rendered::Raster(out)) = format(b"x // hi", 20, &plain_options(), target) else {
        panic!("raster render failed");
    };
    assert_eq!(*out.image.get_pixel(10, 12), rgba(theme.color(PaintClass::Normal)));
    assert_eq!(*out.image.get_pixel(26, 12), rgba(theme.color(PaintClass::Comment)));
    assert_eq!(*out.image.get_pixel(50, 12), rgba(theme.color(PaintClass::Comment)));
    assert_eq!(pool.available(), 1);
}

#[test]
fn test_syntax_coloring_off_paints_normal() {
    let pool = pool(400, 200);
    let mut options = box_raster_options();
    options.syntax_coloring = false;
    let theme = Theme::default();
    let target = Target::Raster {
        pool: &pool,
        options: &options,
    };

    let Ok(Rendered::Raster(out)) = format(b"x // 42", 20, &plain_options(), target) else {
        panic!("raster render failed");
    };
    assert_eq!(*out.image.get_pixel(26, 12), rgba(theme.color(PaintClass::Normal)));
    assert_eq!(*out.image.get_pixel(50, 12), rgba(theme.color(PaintClass::Normal)));
}

#[test]
fn test_numbers_and_symbols() {
    let pool = pool(400, 200);
    let options = box_raster_options();
    let theme = Theme::default();
    let target = Target::Raster {
        pool: &pool,
        options: &options,
    };

    let Ok(Rendered::Raster(out)) = format(b"42 + x", 20, &plain_options(), target) else {
        panic!("raster render failed");
    };
    assert_eq!(*out.image.get_pixel(10, 12), rgba(theme.color(PaintClass::Number)));
    assert_eq!(*out.image.get_pixel(34, 12), rgba(theme.color(PaintClass::Symbol)));
    assert_eq!(*out.image.get_pixel(50, 12), rgba(theme.color(PaintClass::Normal)));
}

#[test]
fn test_format_fails_when_pool_exhausted() {
    let pool = pool(100, 100);
    let options = box_raster_options();
    let _held = pool.checkout().unwrap();
    let target = Target::Raster {
        pool: &pool,
        options: &options,
    };
    let err = format(b"x", 10, &plain_options(), target).err();
    assert!(matches!(err, Some(FormatError::PoolExhausted { .. })));
}

#[test]
fn test_glyphs_cached_on_canvas() {
    let pool = pool(400, 200);
    let options = box_raster_options();
    {
        let mut canvas = pool.checkout().unwrap();
        render_raster(&lay("abab", 10), &mut canvas, &options).unwrap();
        assert_eq!(canvas.cached_glyphs(), 2);
    }
    let canvas = pool.checkout().unwrap();
    assert_eq!(canvas.cached_glyphs(), 2);
}

#[test]
fn test_encode_png_signature() {
    let pool = pool(100, 100);
    let options = box_raster_options();
    let mut canvas = pool.checkout().unwrap();
    let out = render_raster(&lay("x", 5), &mut canvas, &options).unwrap();
    let png = out.encode_png().unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
}
