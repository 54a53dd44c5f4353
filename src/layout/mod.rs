//! Layout pipeline
//!
//! Tokenizer → [`breaker`] → [`postprocess`] → [`justify`]. The output is a
//! [`Document`]: display-ready lines plus the URL table their tokens point
//! into. Both renderers consume the same document.

pub mod breaker;
pub mod justify;
pub mod postprocess;

use std::collections::HashMap;

use serde::Serialize;

use crate::error::FormatError;
use crate::options::FormatOptions;
use crate::token::{Mark, Token, UrlId};
use crate::tokenizer::Tokenizer;

/// One output row
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Line {
    tokens: Vec<Token>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    heading: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    verbatim: bool,
}

impl Line {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            heading: false,
            verbatim: false,
        }
    }

    #[inline]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    #[inline]
    pub fn tokens_mut(&mut self) -> &mut Vec<Token> {
        &mut self.tokens
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Ends in a Newline or End token rather than a forced break
    pub fn is_natural(&self) -> bool {
        self.tokens.last().is_some_and(|t| t.kind().is_terminator())
    }

    /// Set by the heading pass; survives later passes that drop lines
    #[inline]
    pub fn is_heading(&self) -> bool {
        self.heading
    }

    pub(crate) fn set_heading(&mut self) {
        self.heading = true;
    }

    /// Closed inside a fenced region; justification leaves it alone
    #[inline]
    pub fn is_verbatim(&self) -> bool {
        self.verbatim
    }

    pub(crate) fn set_verbatim(&mut self) {
        self.verbatim = true;
    }

    /// Collapsed to a single image token
    pub fn is_image(&self) -> bool {
        self.tokens.first().is_some_and(|t| t.mark() == Mark::Image)
    }

    /// Sum of token widths, trailers included
    pub fn width(&self) -> usize {
        self.tokens.iter().map(Token::width).sum()
    }

    /// Concatenated token text
    pub fn text(&self) -> String {
        self.tokens.iter().map(Token::text).collect()
    }
}

/// Append-only, interned URL strings for one document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct UrlTable {
    entries: Vec<String>,
    #[serde(skip)]
    index: HashMap<String, UrlId>,
}

impl UrlTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id for `url`, reusing the existing one when the string was seen before
    pub fn intern(&mut self, url: impl Into<String>) -> UrlId {
        let url = url.into();
        if let Some(&id) = self.index.get(&url) {
            return id;
        }
        let id = UrlId::from_index(self.entries.len());
        self.entries.push(url.clone());
        self.index.insert(url, id);
        id
    }

    pub fn get(&self, id: UrlId) -> Option<&str> {
        self.entries.get(id.index()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}

/// Justified lines plus the URL table their tokens reference
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    pub columns: usize,
    pub lines: Vec<Line>,
    pub urls: UrlTable,
}

impl Document {
    /// URL attached to `token`, if any
    pub fn url_of(&self, token: &Token) -> Option<&str> {
        token.url().and_then(|id| self.urls.get(id))
    }

    /// Lines as plain strings, for tests and debugging
    pub fn texts(&self) -> Vec<String> {
        self.lines.iter().map(Line::text).collect()
    }
}

/// Cut `source` to at most `max` bytes without splitting a UTF-8 sequence
pub fn clip_input(source: &[u8], max: usize) -> &[u8] {
    if source.len() <= max {
        return source;
    }
    let mut end = max;
    while end > 0 && (source[end] & 0xC0) == 0x80 {
        end -= 1;
    }
    tracing::warn!("Input clipped from {} to {} bytes", source.len(), end);
    &source[..end]
}

/// Run the full layout pipeline on plain text
pub fn layout(
    source: &[u8],
    columns: usize,
    options: &FormatOptions,
) -> Result<Document, FormatError> {
    options.validate(columns)?;
    let source = clip_input(source, options.max_input_bytes);
    Ok(layout_tokens(
        Tokenizer::new(source, options.tab_width),
        columns,
        options,
    ))
}

/// Same as [`layout`] but with comment/quote markers kept for syntax coloring
pub fn layout_code(
    source: &[u8],
    columns: usize,
    options: &FormatOptions,
) -> Result<Document, FormatError> {
    options.validate(columns)?;
    let source = clip_input(source, options.max_input_bytes);
    Ok(layout_tokens(
        Tokenizer::code_aware(source, options.tab_width),
        columns,
        options,
    ))
}

/// Break, post-process and justify an already tokenized stream.
///
/// `options` is assumed to be validated.
#[cfg_attr(feature = "profile-tracing", tracing::instrument(skip(tokens, options)))]
pub fn layout_tokens(
    tokens: impl IntoIterator<Item = Token>,
    columns: usize,
    options: &FormatOptions,
) -> Document {
    let lines = breaker::break_lines(tokens, columns);
    tracing::debug!("Broke input into {} lines at {} columns", lines.len(), columns);

    let mut urls = UrlTable::new();
    let lines = postprocess::run(lines, &mut urls, options);
    tracing::debug!(
        "Post-processed to {} lines, {} urls",
        lines.len(),
        urls.len()
    );

    let lines = lines
        .into_iter()
        .map(|line| justify::justify(line, columns, options.indent_unit))
        .collect();

    Document {
        columns,
        lines,
        urls,
    }
}
