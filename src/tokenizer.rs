//! Tokenizer
//!
//! Turns a byte buffer into a forward-only stream of [`Token`]s. Runs of
//! spaces, narrow delimiters, wide delimiters and Latin letters/digits merge
//! into one token each; wide glyphs are always emitted one at a time so CJK
//! text can break between any two characters.
//!
//! The code-aware variant additionally cuts out comment and quote markers
//! (`//`, `/*`, `*/`, `#`, `"`, `'`) as singleton tokens for the raster
//! renderer's syntax coloring.

use std::borrow::Cow;

use crate::token::{CodeMarker, Token, TokenKind};
use crate::width::{classify, CharClass, IDEOGRAPHIC_SPACE};

pub struct Tokenizer<'a> {
    src: Cow<'a, str>,
    pos: usize,
    tab_width: usize,
    code_aware: bool,
    /// The two most recently consumed code points, newest first
    prev: [Option<char>; 2],
    finished: bool,
}

impl<'a> Tokenizer<'a> {
    /// Plain tokenizer. Invalid UTF-8 decodes to U+FFFD.
    pub fn new(source: &'a [u8], tab_width: usize) -> Self {
        Self {
            src: String::from_utf8_lossy(source),
            pos: 0,
            tab_width,
            code_aware: false,
            prev: [None; 2],
            finished: false,
        }
    }

    /// Tokenizer that also emits comment/quote markers
    pub fn code_aware(source: &'a [u8], tab_width: usize) -> Self {
        Self {
            code_aware: true,
            ..Self::new(source, tab_width)
        }
    }

    #[inline]
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        self.prev = [Some(ch), self.prev[0]];
        Some(ch)
    }

    /// Marker starting at the cursor, with its length in bytes
    fn marker_here(&self) -> Option<(CodeMarker, usize)> {
        if !self.code_aware {
            return None;
        }
        let rest = &self.src[self.pos..];
        if rest.starts_with("//") {
            return Some((CodeMarker::LineComment, 2));
        }
        if rest.starts_with("/*") {
            return Some((CodeMarker::BlockOpen, 2));
        }
        if rest.starts_with("*/") {
            return Some((CodeMarker::BlockClose, 2));
        }
        match rest.chars().next()? {
            '#' => Some((CodeMarker::LineComment, 1)),
            q @ ('"' | '\'') if !self.escaped() => Some((CodeMarker::Quote(q), 1)),
            _ => None,
        }
    }

    /// A quote is escaped by one backslash, but not by an escaped backslash
    fn escaped(&self) -> bool {
        self.prev[0] == Some('\\') && self.prev[1] != Some('\\')
    }

    fn expand_space(&self, ch: char, out: &mut String) {
        let n = match ch {
            '\t' => self.tab_width,
            IDEOGRAPHIC_SPACE => 2,
            _ => 1,
        };
        out.extend(std::iter::repeat(' ').take(n));
    }

    /// Consume following code points of the same class into `text`
    fn merge_run(&mut self, class: CharClass, text: &mut String) {
        while let Some(ch) = self.peek() {
            if classify(ch) != class || self.marker_here().is_some() {
                break;
            }
            self.bump();
            if class == CharClass::Space {
                self.expand_space(ch, text);
            } else {
                text.push(ch);
            }
        }
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }

        loop {
            if self.peek().is_none() {
                self.finished = true;
                return Some(Token::end());
            }

            if let Some((marker, len)) = self.marker_here() {
                let text = self.src[self.pos..self.pos + len].to_string();
                for _ in text.chars() {
                    self.bump();
                }
                return Some(Token::new(TokenKind::NarrowDelim, text).with_code(marker));
            }

            let ch = self.bump()?;
            let class = classify(ch);
            let kind = match class {
                CharClass::Unknown => continue,
                CharClass::Newline => return Some(Token::newline()),
                CharClass::Wide => return Some(Token::new(TokenKind::Wide, ch.to_string())),
                CharClass::Space => TokenKind::Space,
                CharClass::NarrowDelim => TokenKind::NarrowDelim,
                CharClass::WideDelim => TokenKind::WideDelim,
                CharClass::Latin => TokenKind::Latin,
            };

            let mut text = String::new();
            if class == CharClass::Space {
                self.expand_space(ch, &mut text);
            } else {
                text.push(ch);
            }
            self.merge_run(class, &mut text);
            return Some(Token::new(kind, text));
        }
    }
}

/// Tokenize a whole buffer
pub fn tokenize(source: &[u8], tab_width: usize) -> Vec<Token> {
    Tokenizer::new(source, tab_width).collect()
}
