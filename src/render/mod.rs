//! Rendering: HTML markup or a PNG-ready raster image from a laid-out document

pub mod frame;
pub mod glyphs;
pub mod html;
pub mod pool;
pub mod raster;

pub use glyphs::{FontFace, Glyph, GlyphSource};
pub use html::{render_html, HtmlOptions};
pub use pool::{Canvas, CanvasLease, CanvasPool};
pub use raster::{render_raster, RasterOptions, RasterOutput};

use crate::error::FormatError;
use crate::layout::{layout, layout_code};
use crate::options::FormatOptions;

/// Where a format pass draws to
pub enum Target<'a> {
    Html(HtmlOptions),
    Raster {
        pool: &'a CanvasPool,
        options: &'a RasterOptions,
    },
}

#[derive(Debug)]
pub enum Rendered {
    Html(String),
    Raster(RasterOutput),
}

/// Lay out `source` at `columns` and render it to `target`.
///
/// Raster targets with syntax coloring use the code-aware tokenizer. The
/// canvas is leased only after layout succeeds and is returned to the pool
/// when this call ends.
pub fn format(
    source: &[u8],
    columns: usize,
    options: &FormatOptions,
    target: Target<'_>,
) -> Result<Rendered, FormatError> {
    match target {
        Target::Html(html_options) => {
            let doc = layout(source, columns, options)?;
            Ok(Rendered::Html(render_html(
                &doc,
                options.link_target.as_deref(),
                &html_options,
            )))
        }
        Target::Raster {
            pool,
            options: raster_options,
        } => {
            let doc = if raster_options.syntax_coloring {
                layout_code(source, columns, options)?
            } else {
                layout(source, columns, options)?
            };
            let mut canvas = pool.checkout()?;
            let output = render_raster(&doc, &mut canvas, raster_options)?;
            Ok(Rendered::Raster(output))
        }
    }
}
