//! Errors surfaced to callers of the engine
//!
//! Malformed input never produces an error; it is clipped or truncated.
//! Only caller-side misconfiguration and resource failures end up here.

use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    /// Column budget outside `1..=MAX_COLUMNS`
    InvalidColumns { columns: usize, max: usize },
    /// A zero or otherwise unusable option value
    InvalidOption(String),
    /// No canvas became free within the configured wait
    PoolExhausted { waited: Duration },
    /// Font bytes could not be parsed
    Font(String),
    /// PNG encoding failed
    Encode(String),
}

impl std::fmt::Display for FormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidColumns { columns, max } => {
                write!(f, "invalid column budget {} (expected 1..={})", columns, max)
            }
            Self::InvalidOption(msg) => write!(f, "invalid option: {}", msg),
            Self::PoolExhausted { waited } => {
                write!(f, "no canvas available after {} ms", waited.as_millis())
            }
            Self::Font(msg) => write!(f, "unusable font: {}", msg),
            Self::Encode(msg) => write!(f, "png encode failed: {}", msg),
        }
    }
}

impl std::error::Error for FormatError {}
