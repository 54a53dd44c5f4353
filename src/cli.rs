//! Command-line argument parsing
//!
//! Flags override the values loaded from `config.yaml`; anything not given
//! on the command line keeps its configured value.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::EngineConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Html,
    Png,
    /// Justified lines as JSON, for debugging layout
    Json,
}

/// Typeset plain text into justified fixed-width pages
#[derive(Parser, Debug)]
#[command(
    name = "eighty",
    version,
    about = "Typeset plain text into justified fixed-width pages"
)]
pub struct CliArgs {
    /// Input file (reads stdin when omitted)
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Column budget per line
    #[arg(short, long, value_name = "N")]
    pub columns: Option<usize>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Html)]
    pub format: OutputFormat,

    /// Write here instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Theme id, built-in or from the themes directory
    #[arg(long, value_name = "ID")]
    pub theme: Option<String>,

    /// TrueType/OpenType font for PNG output
    #[arg(long, value_name = "PATH")]
    pub font: Option<PathBuf>,

    #[arg(long, value_name = "PX")]
    pub font_size: Option<f32>,

    #[arg(long, value_name = "PX")]
    pub line_height: Option<u32>,

    /// Document id embedded in TOC anchors
    #[arg(long, value_name = "ID", default_value_t = 0)]
    pub id: u64,

    /// Do not prepend a table of contents
    #[arg(long)]
    pub no_toc: bool,

    #[arg(long, value_name = "PREFIX")]
    pub heading_prefix: Option<String>,

    /// `target` attribute for external links (empty string disables it)
    #[arg(long, value_name = "TARGET")]
    pub link_target: Option<String>,

    /// Emit a complete HTML page with an embedded stylesheet
    #[arg(long)]
    pub standalone: bool,

    /// Number source lines in PNG output
    #[arg(long)]
    pub line_numbers: bool,

    /// Print the available themes and exit
    #[arg(long)]
    pub list_themes: bool,
}

impl CliArgs {
    /// Overlay the flags that were given onto `config`
    pub fn apply_to(&self, config: &mut EngineConfig) {
        if let Some(columns) = self.columns {
            config.columns = columns;
        }
        if let Some(theme) = &self.theme {
            config.theme = theme.clone();
        }
        if let Some(font) = &self.font {
            config.font = Some(font.clone());
        }
        if let Some(size) = self.font_size {
            config.font_size = size;
        }
        if let Some(height) = self.line_height {
            config.line_height = height;
        }
        if self.no_toc {
            config.toc = false;
        }
        if let Some(prefix) = &self.heading_prefix {
            config.heading_prefix = prefix.clone();
        }
        if let Some(target) = &self.link_target {
            config.link_target = (!target.is_empty()).then(|| target.clone());
        }
        if self.line_numbers {
            config.line_numbers = true;
        }
    }
}
