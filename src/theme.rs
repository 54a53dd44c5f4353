//! Render themes
//!
//! A theme is eight colors indexed by [`PaintClass`]. Themes are YAML files;
//! four are compiled into the binary and user files take priority.
//!
//! Theme loading priority:
//! 1. User config: `~/.config/eighty/themes/{id}.yaml`
//! 2. Embedded: Built-in themes compiled into binary

use std::path::Path;

use serde::Deserialize;

// Embed theme YAML files at compile time
pub const WHITE_YAML: &str = include_str!("../themes/white.yaml");
pub const BLACK_YAML: &str = include_str!("../themes/black.yaml");
pub const PURE_WHITE_YAML: &str = include_str!("../themes/pure-white.yaml");
pub const PURE_BLACK_YAML: &str = include_str!("../themes/pure-black.yaml");

/// Theme used when nothing else is configured
pub const DEFAULT_THEME_ID: &str = "white";

/// A built-in theme entry
pub struct BuiltinTheme {
    /// Stable identifier for config (e.g. "white", "pure-black")
    pub id: &'static str,
    /// Embedded YAML content
    pub yaml: &'static str,
}

/// Registry of all built-in themes
pub const BUILTIN_THEMES: &[BuiltinTheme] = &[
    BuiltinTheme {
        id: "white",
        yaml: WHITE_YAML,
    },
    BuiltinTheme {
        id: "black",
        yaml: BLACK_YAML,
    },
    BuiltinTheme {
        id: "pure-white",
        yaml: PURE_WHITE_YAML,
    },
    BuiltinTheme {
        id: "pure-black",
        yaml: PURE_BLACK_YAML,
    },
];

/// Where the theme came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeSource {
    /// User-defined theme in ~/.config/eighty/themes/
    User,
    /// Built-in theme embedded in binary
    Builtin,
}

/// Information about an available theme
#[derive(Debug, Clone)]
pub struct ThemeInfo {
    pub id: String,
    /// Display name from YAML
    pub name: String,
    pub source: ThemeSource,
}

/// Load a theme from a YAML file
pub fn from_file(path: &Path) -> Result<Theme, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read theme file {}: {}", path.display(), e))?;
    Theme::from_yaml(&content)
}

/// Load theme by id with priority: user → builtin
pub fn load_theme(id: &str) -> Result<Theme, String> {
    if let Some(user_path) = crate::config_paths::user_theme_file(id) {
        if user_path.exists() {
            tracing::info!("Loading user theme from {}", user_path.display());
            return from_file(&user_path);
        }
    }

    tracing::info!("Loading builtin theme: {}", id);
    Theme::from_builtin(id)
}

/// List all available themes; user themes override builtins with the same id
pub fn list_available_themes() -> Vec<ThemeInfo> {
    let mut themes = Vec::new();
    let mut seen_ids = std::collections::HashSet::new();

    if let Some(user_dir) = crate::config_paths::themes_dir() {
        if let Ok(entries) = std::fs::read_dir(&user_dir) {
            for entry in entries.filter_map(|e| e.ok()) {
                let path = entry.path();
                if path
                    .extension()
                    .is_some_and(|ext| ext == "yaml" || ext == "yml")
                {
                    if let Some(id) = path.file_stem().and_then(|s| s.to_str()) {
                        if seen_ids.insert(id.to_string()) {
                            let name = extract_theme_name(&path).unwrap_or_else(|| id.to_string());
                            themes.push(ThemeInfo {
                                id: id.to_string(),
                                name,
                                source: ThemeSource::User,
                            });
                        }
                    }
                }
            }
        }
    }

    for builtin in BUILTIN_THEMES {
        if seen_ids.insert(builtin.id.to_string()) {
            let name = Theme::from_yaml(builtin.yaml)
                .map(|t| t.name)
                .unwrap_or_else(|_| builtin.id.to_string());
            themes.push(ThemeInfo {
                id: builtin.id.to_string(),
                name,
                source: ThemeSource::Builtin,
            });
        }
    }

    themes
}

/// Extract theme name from YAML file without full parsing
fn extract_theme_name(path: &Path) -> Option<String> {
    let content = std::fs::read_to_string(path).ok()?;
    for line in content.lines() {
        if let Some(value) = line.trim().strip_prefix("name:") {
            let value = value.trim().trim_matches('"').trim_matches('\'');
            return Some(value.to_string());
        }
    }
    None
}

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create a new color from RGB values (alpha defaults to 255)
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Pack as ARGB, the canvas pixel format
    pub fn to_argb_u32(&self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    /// `#rrggbb`, or `#rrggbbaa` when not opaque
    pub fn to_css(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// Parse from "#RRGGBB" or "#RRGGBBAA" hex string
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let s = s.trim_start_matches('#');
        if !s.is_ascii() {
            return Err(format!("Invalid color format: {}", s));
        }
        let channel = |i: usize| u8::from_str_radix(&s[i..i + 2], 16).map_err(|e| e.to_string());
        match s.len() {
            6 => Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Ok(Color::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => Err(format!("Invalid color format: {}", s)),
        }
    }
}

/// Semantic class selecting a theme color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaintClass {
    Background,
    Normal,
    WrapMarker,
    LineNumber,
    Symbol,
    String,
    Number,
    Comment,
}

impl PaintClass {
    pub const ALL: [PaintClass; 8] = [
        PaintClass::Background,
        PaintClass::Normal,
        PaintClass::WrapMarker,
        PaintClass::LineNumber,
        PaintClass::Symbol,
        PaintClass::String,
        PaintClass::Number,
        PaintClass::Comment,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Raw theme data as parsed from YAML
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeData {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub paint: PaintData,
}

/// The eight colors (raw strings from YAML)
#[derive(Debug, Clone, Deserialize)]
pub struct PaintData {
    pub background: String,
    pub normal: String,
    pub wrap_marker: String,
    pub line_number: String,
    /// Defaults to `normal`
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub string: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Resolved theme: one color per [`PaintClass`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: String,
    palette: [Color; 8],
}

impl Theme {
    pub fn new(name: impl Into<String>, palette: [Color; 8]) -> Self {
        Self {
            name: name.into(),
            palette,
        }
    }

    #[inline]
    pub fn color(&self, class: PaintClass) -> Color {
        self.palette[class.index()]
    }

    /// Load theme from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        let data: ThemeData =
            serde_yaml::from_str(yaml).map_err(|e| format!("YAML parse error: {}", e))?;
        Self::from_data(data)
    }

    /// Load a built-in theme by id
    pub fn from_builtin(id: &str) -> Result<Self, String> {
        let entry = BUILTIN_THEMES
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| format!("Unknown theme id: {}", id))?;
        Theme::from_yaml(entry.yaml)
    }

    /// Convert raw theme data to resolved theme
    pub fn from_data(data: ThemeData) -> Result<Self, String> {
        let paint = &data.paint;
        let normal = Color::from_hex(&paint.normal)?;
        let or_normal = |value: &Option<String>| -> Result<Color, String> {
            value
                .as_ref()
                .map(|s| Color::from_hex(s))
                .transpose()
                .map(|c| c.unwrap_or(normal))
        };

        Ok(Theme {
            name: data.name.clone(),
            palette: [
                Color::from_hex(&paint.background)?,
                normal,
                Color::from_hex(&paint.wrap_marker)?,
                Color::from_hex(&paint.line_number)?,
                or_normal(&paint.symbol)?,
                or_normal(&paint.string)?,
                or_normal(&paint.number)?,
                or_normal(&paint.comment)?,
            ],
        })
    }

    /// Default white theme (YAML-backed with Rust fallback)
    pub fn default_white() -> Self {
        match Theme::from_yaml(WHITE_YAML) {
            Ok(theme) => theme,
            Err(_) => Theme::new(
                "White",
                [
                    Color::rgb(0xF6, 0xF7, 0xEB),
                    Color::rgb(0x2B, 0x2B, 0x2B),
                    Color::rgb(0xC0, 0x39, 0x2B),
                    Color::rgb(0xA0, 0xA0, 0x96),
                    Color::rgb(0x6F, 0x42, 0xC1),
                    Color::rgb(0x2E, 0x7D, 0x32),
                    Color::rgb(0xB3, 0x5C, 0x00),
                    Color::rgb(0x8E, 0x8E, 0x86),
                ],
            ),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_white()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paint_class_indices_are_dense() {
        for (i, class) in PaintClass::ALL.iter().enumerate() {
            assert_eq!(class.index(), i);
        }
    }

    #[test]
    fn test_optional_paint_defaults_to_normal() {
        let yaml = r##"
version: 1
name: "Sparse"
paint:
  background: "#000000"
  normal: "#112233"
  wrap_marker: "#FF0000"
  line_number: "#444444"
"##;
        let theme = Theme::from_yaml(yaml).unwrap();
        assert_eq!(theme.color(PaintClass::Comment), Color::rgb(0x11, 0x22, 0x33));
        assert_eq!(theme.color(PaintClass::WrapMarker), Color::rgb(0xFF, 0, 0));
    }
}
