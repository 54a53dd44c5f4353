//! Per-call layout options

use crate::error::FormatError;
use crate::width::DEFAULT_TAB_WIDTH;

/// Largest accepted column budget
pub const MAX_COLUMNS: usize = 1024;

/// Default heading marker at the start of a line
pub const DEFAULT_HEADING_PREFIX: &str = "####";

/// Default input clip (64 KiB)
pub const DEFAULT_MAX_INPUT_BYTES: usize = 64 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    /// Lines whose first token starts with this become headings
    pub heading_prefix: String,
    /// Prepend a table of contents when headings exist
    pub toc: bool,
    /// Embedded in TOC anchors (`#toc-f-<id>-<n>`)
    pub document_id: u64,
    /// `target` attribute for external links, e.g. `_blank`
    pub link_target: Option<String>,
    pub tab_width: usize,
    /// Leading indentation that is a multiple of this survives justification
    pub indent_unit: usize,
    /// Input beyond this many bytes is ignored
    pub max_input_bytes: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            heading_prefix: DEFAULT_HEADING_PREFIX.to_string(),
            toc: true,
            document_id: 0,
            link_target: None,
            tab_width: DEFAULT_TAB_WIDTH,
            indent_unit: 4,
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
        }
    }
}

impl FormatOptions {
    /// Check the options against a column budget before any work is done
    pub fn validate(&self, columns: usize) -> Result<(), FormatError> {
        if columns == 0 || columns > MAX_COLUMNS {
            return Err(FormatError::InvalidColumns {
                columns,
                max: MAX_COLUMNS,
            });
        }
        if self.tab_width == 0 {
            return Err(FormatError::InvalidOption("tab width must be at least 1".into()));
        }
        if self.indent_unit == 0 {
            return Err(FormatError::InvalidOption("indent unit must be at least 1".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(FormatOptions::default().validate(80).is_ok());
    }

    #[test]
    fn test_rejects_zero_values() {
        let options = FormatOptions::default();
        assert!(matches!(
            options.validate(0),
            Err(FormatError::InvalidColumns { columns: 0, .. })
        ));
        assert!(options.validate(MAX_COLUMNS + 1).is_err());

        let options = FormatOptions {
            tab_width: 0,
            ..FormatOptions::default()
        };
        assert!(matches!(options.validate(80), Err(FormatError::InvalidOption(_))));
    }
}
