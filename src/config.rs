//! Engine configuration persistence
//!
//! Stores defaults for the CLI in `~/.config/eighty/config.yaml`. Every field
//! is optional in the file; missing ones take their default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::options::{FormatOptions, DEFAULT_HEADING_PREFIX, DEFAULT_MAX_INPUT_BYTES};
use crate::theme::DEFAULT_THEME_ID;
use crate::width::DEFAULT_TAB_WIDTH;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub columns: usize,
    pub tab_width: usize,
    pub indent_unit: usize,
    pub heading_prefix: String,
    pub toc: bool,
    pub link_target: Option<String>,
    pub max_input_bytes: usize,

    /// Theme id (e.g., "white", "pure-black")
    pub theme: String,
    /// TrueType/OpenType file used for PNG output
    pub font: Option<PathBuf>,
    /// Pixel size of a single-width glyph's em
    pub font_size: f32,
    /// Row pitch in pixels
    pub line_height: u32,
    pub margin: u32,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub pool_size: usize,
    pub pool_wait_ms: u64,
    pub line_numbers: bool,
    pub syntax_coloring: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            columns: 80,
            tab_width: DEFAULT_TAB_WIDTH,
            indent_unit: 4,
            heading_prefix: DEFAULT_HEADING_PREFIX.to_string(),
            toc: true,
            link_target: Some("_blank".to_string()),
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            theme: DEFAULT_THEME_ID.to_string(),
            font: None,
            font_size: 16.0,
            line_height: 19,
            margin: 8,
            canvas_width: 1024,
            canvas_height: 4096,
            pool_size: 2,
            pool_wait_ms: 2000,
            line_numbers: false,
            syntax_coloring: true,
        }
    }
}

impl EngineConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        Self::load_from(&path)
    }

    /// Load config from a specific file, falling back to defaults on error
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    /// Save config to `path`, creating the parent directory if needed
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Layout options for one document
    pub fn format_options(&self, document_id: u64) -> FormatOptions {
        FormatOptions {
            heading_prefix: self.heading_prefix.clone(),
            toc: self.toc,
            document_id,
            link_target: self.link_target.clone(),
            tab_width: self.tab_width,
            indent_unit: self.indent_unit,
            max_input_bytes: self.max_input_bytes,
        }
    }
}
