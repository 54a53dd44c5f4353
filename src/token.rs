//! Tokens: the atomic unit of layout
//!
//! A token is a run of code points sharing one lexical kind. Its display
//! width is cached and kept in sync by every mutating method, so callers
//! never touch the text directly.

use std::num::NonZeroU32;

use serde::Serialize;

use crate::width::{self, char_width, str_width};

/// Text of a continuation marker. The renderers draw an arrow instead.
pub const CONTINUATION_TEXT: &str = "\\";

/// Lexical kind assigned by the tokenizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    Space,
    Newline,
    NarrowDelim,
    WideDelim,
    Latin,
    Wide,
    /// End-of-stream sentinel
    End,
}

impl TokenKind {
    /// Newline and End carry no text and terminate a line naturally
    #[inline]
    pub fn is_terminator(self) -> bool {
        matches!(self, TokenKind::Newline | TokenKind::End)
    }

    #[inline]
    pub fn is_delim(self) -> bool {
        matches!(self, TokenKind::NarrowDelim | TokenKind::WideDelim)
    }
}

/// Layout role of a token, rewritten in place by the breaker and post-processor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize)]
pub enum Mark {
    #[default]
    Plain,
    /// Closing punctuation allowed past the right margin
    HangAtEnd,
    /// Synthetic marker at a forced break inside a word or fenced region
    Continuation,
    /// Leading token of a collapsed image line
    Image,
}

/// Syntax markers emitted by the code-aware tokenizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CodeMarker {
    /// `//` or `#`
    LineComment,
    /// `/*`
    BlockOpen,
    /// `*/`
    BlockClose,
    /// An unescaped `"` or `'`
    Quote(char),
}

/// 1-based index into a document's [`UrlTable`](crate::layout::UrlTable)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct UrlId(NonZeroU32);

impl UrlId {
    pub(crate) fn from_index(index: usize) -> Self {
        let raw = u32::try_from(index + 1).unwrap_or(u32::MAX);
        Self(NonZeroU32::new(raw).unwrap_or(NonZeroU32::MAX))
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0.get() as usize - 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    text: String,
    width: usize,
    kind: TokenKind,
    mark: Mark,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<UrlId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<CodeMarker>,
}

impl Token {
    /// Create a token, computing its width from `text`
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        let text = text.into();
        let width = str_width(&text);
        Self {
            text,
            width,
            kind,
            mark: Mark::Plain,
            url: None,
            code: None,
        }
    }

    /// `n` ordinary spaces
    pub fn spaces(n: usize) -> Self {
        Self::new(TokenKind::Space, " ".repeat(n))
    }

    pub fn newline() -> Self {
        Self::new(TokenKind::Newline, "")
    }

    pub fn end() -> Self {
        Self::new(TokenKind::End, "")
    }

    /// The one-column marker placed at a forced break
    pub fn continuation() -> Self {
        let mut token = Self::new(TokenKind::NarrowDelim, CONTINUATION_TEXT);
        token.mark = Mark::Continuation;
        token
    }

    pub(crate) fn with_code(mut self, code: CodeMarker) -> Self {
        self.code = Some(code);
        self
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    #[inline]
    pub fn mark(&self) -> Mark {
        self.mark
    }

    #[inline]
    pub fn set_mark(&mut self, mark: Mark) {
        self.mark = mark;
    }

    #[inline]
    pub fn url(&self) -> Option<UrlId> {
        self.url
    }

    #[inline]
    pub fn set_url(&mut self, url: UrlId) {
        self.url = Some(url);
    }

    #[inline]
    pub fn code(&self) -> Option<CodeMarker> {
        self.code
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Hang-at-end and continuation tokens live past the column budget
    #[inline]
    pub fn is_trailer(&self) -> bool {
        matches!(self.mark, Mark::HangAtEnd | Mark::Continuation)
    }

    pub fn starts_with(&self, prefix: &str) -> bool {
        !prefix.is_empty() && self.text.starts_with(prefix)
    }

    pub fn is_spaces_only(&self) -> bool {
        !self.text.is_empty() && self.text.bytes().all(|b| b == b' ')
    }

    /// Count of leading and trailing `' '` characters
    pub fn surrounding_spaces(&self) -> (usize, usize) {
        let leading = self.text.bytes().take_while(|&b| b == b' ').count();
        if leading == self.text.len() {
            return (leading, leading);
        }
        let trailing = self.text.bytes().rev().take_while(|&b| b == b' ').count();
        (leading, trailing)
    }

    /// Text with surrounding spaces removed
    pub fn trimmed(&self) -> &str {
        self.text.trim_matches(' ')
    }

    /// True when the space-trimmed text is non-empty and every char passes `pred`
    pub fn trimmed_all(&self, pred: impl Fn(char) -> bool) -> bool {
        let trimmed = self.trimmed();
        !trimmed.is_empty() && trimmed.chars().all(pred)
    }

    /// Remove `n` leading spaces (spaces are one column each)
    pub fn strip_leading_spaces(&mut self, n: usize) {
        let n = n.min(self.text.len());
        self.text.drain(..n);
        self.width -= n;
    }

    /// Remove every trailing space
    pub fn strip_trailing_spaces(&mut self) {
        let kept = self.text.trim_end_matches(' ').len();
        self.width -= self.text.len() - kept;
        self.text.truncate(kept);
    }

    /// Append `n` spaces on the right
    pub fn push_spaces(&mut self, n: usize) {
        self.text.extend(std::iter::repeat(' ').take(n));
        self.width += n;
    }

    /// Pad with `n` spaces. One space, or `right_only`, appends on the right;
    /// otherwise the spaces are split around the text, the smaller half first.
    pub fn pad(&mut self, n: usize, right_only: bool) {
        if n == 1 || right_only {
            self.push_spaces(n);
            return;
        }
        let left = n / 2;
        let mut text = String::with_capacity(self.text.len() + n);
        text.extend(std::iter::repeat(' ').take(left));
        text.push_str(&self.text);
        text.extend(std::iter::repeat(' ').take(n - left));
        self.text = text;
        self.width += n;
    }

    /// Split off the longest prefix no wider than `columns`.
    ///
    /// Returns `None` when the whole token fits or when not even the first
    /// code point fits.
    pub fn split_at_width(&self, columns: usize) -> Option<(Token, Token)> {
        if self.width <= columns {
            return None;
        }
        let mut used = 0;
        let mut cut = 0;
        for (idx, ch) in self.text.char_indices() {
            let w = char_width(ch);
            if used + w > columns {
                break;
            }
            used += w;
            cut = idx + ch.len_utf8();
        }
        if cut == 0 {
            return None;
        }
        Some((self.fragment(&self.text[..cut]), self.fragment(&self.text[cut..])))
    }

    /// Split an oversize token for the breaker.
    ///
    /// The first fragment is at most `first` columns wide, every later one at
    /// most `rest`. Returns `None` unless the token is wider than both. A
    /// first fragment that would be empty is skipped.
    pub fn split(&self, first: usize, rest: usize) -> Option<Vec<Token>> {
        if self.width <= first || self.width <= rest {
            return None;
        }

        let mut fragments = Vec::with_capacity(self.width / rest.max(1) + 2);
        let mut remainder = self.clone();
        let mut limit = first;
        while remainder.width > limit {
            match remainder.split_at_width(limit) {
                Some((head, tail)) => {
                    fragments.push(head);
                    remainder = tail;
                }
                None if limit == first && fragments.is_empty() && first < rest => {}
                None => {
                    // A single code point wider than the budget: emit it alone
                    let ch_len = remainder.text.chars().next().map_or(0, char::len_utf8);
                    if ch_len == 0 || ch_len == remainder.text.len() {
                        break;
                    }
                    let (head, tail) = remainder.text.split_at(ch_len);
                    let (head, tail) = (remainder.fragment(head), remainder.fragment(tail));
                    fragments.push(head);
                    remainder = tail;
                }
            }
            limit = rest;
        }
        fragments.push(remainder);
        Some(fragments)
    }

    fn fragment(&self, text: &str) -> Token {
        Token {
            text: text.to_string(),
            width: str_width(text),
            kind: self.kind,
            mark: self.mark,
            url: self.url,
            code: self.code,
        }
    }
}

/// Hangable closing punctuation no wider than three columns
pub fn is_hangable(token: &Token) -> bool {
    token.width() <= 3 && token.trimmed_all(width::is_hangable)
}

/// Opening punctuation that should move to the next line with its word
pub fn is_leading_punct(token: &Token) -> bool {
    token.trimmed_all(width::is_leading_punct)
}
