//! eighty - fixed-width typesetting engine
//!
//! Turns plain text into justified lines of exactly N columns and renders
//! them as HTML or as a raster image. Single-width code points take one
//! column, everything else takes two.

pub mod cli;
pub mod config;
pub mod config_paths;
pub mod error;
pub mod layout;
pub mod options;
pub mod render;
pub mod theme;
pub mod token;
pub mod tokenizer;
pub mod tracing;
pub mod width;

// Re-export commonly used types
pub use config::EngineConfig;
pub use error::FormatError;
pub use layout::{layout, layout_code, Document, Line, UrlTable};
pub use options::{FormatOptions, MAX_COLUMNS};
pub use render::{format, render_html, render_raster, Rendered, Target};
pub use theme::Theme;
pub use token::{Mark, Token, TokenKind};
