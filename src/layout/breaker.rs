//! Line breaking
//!
//! Greedy first-fit over the token stream with three refinements: short
//! closing punctuation may hang past the margin, an opening bracket left at
//! the end of a full line moves down with the word it opens, and fenced
//! regions (between ```` ``` ```` tokens) wrap at exact column counts.

use super::Line;
use crate::token::{is_hangable, is_leading_punct, Mark, Token, TokenKind};

/// Token text that toggles fenced (no-break) mode
pub const FENCE: &str = "```";

pub struct LineBreaker {
    columns: usize,
    lines: Vec<Line>,
    line: Vec<Token>,
    /// Width of `line`
    length: usize,
    fenced: bool,
}

impl LineBreaker {
    pub fn new(columns: usize) -> Self {
        Self {
            columns,
            lines: Vec::new(),
            line: Vec::with_capacity(16),
            length: 0,
            fenced: false,
        }
    }

    /// Feed one token from the tokenizer
    pub fn push(&mut self, token: Token) {
        if token.starts_with(FENCE) {
            self.fenced = !self.fenced;
            return;
        }

        let room = self.columns.saturating_sub(self.length);
        // Continued fenced lines open with a one-column marker
        let rest = if self.fenced {
            self.columns.saturating_sub(1).max(1)
        } else {
            self.columns
        };
        match token.split(room, rest) {
            Some(fragments) => {
                for fragment in fragments {
                    self.place(fragment, true);
                }
            }
            None => self.place(token, false),
        }
    }

    /// Flush the last open line and return every line
    pub fn finish(mut self) -> Vec<Line> {
        if !self.line.is_empty() {
            self.close();
        }
        self.lines
    }

    fn close(&mut self) {
        let tokens = std::mem::replace(&mut self.line, Vec::with_capacity(16));
        let mut line = Line::new(tokens);
        if self.fenced {
            line.set_verbatim();
        }
        self.lines.push(line);
        self.length = 0;
    }

    /// Anything besides a leading continuation marker on the open line
    fn has_content(&self) -> bool {
        self.line.iter().any(|t| t.mark() != Mark::Continuation)
    }

    fn place(&mut self, mut token: Token, pre_split: bool) {
        let mut pulled = false;

        while token.width() > 0
            && self.has_content()
            && self.length + token.width() > self.columns
        {
            let room = self.columns.saturating_sub(self.length);

            if self.fenced {
                // Cut at the exact column and mark both sides of the break
                if let Some((head, tail)) = token.split_at_width(room) {
                    self.line.push(head);
                    token = tail;
                }
                self.line.push(Token::continuation());
                self.close();
                self.length = 1;
                self.line.push(Token::continuation());
                continue;
            }

            if is_hangable(&token) {
                token.set_mark(Mark::HangAtEnd);
                self.line.push(token);
                self.close();
                return;
            }

            if !pulled
                && self.line.len() > 1
                && self.line.last().is_some_and(is_leading_punct)
            {
                if let Some(last) = self.line.pop() {
                    self.close();
                    self.length = last.width();
                    self.line.push(last);
                }
                pulled = true;
                continue;
            }

            if pre_split {
                self.line.push(Token::continuation());
            }
            self.close();
        }

        self.length += token.width();
        let newline = token.kind() == TokenKind::Newline;
        self.line.push(token);
        if newline {
            self.close();
        }
    }
}

/// Break a token stream into lines of at most `columns` columns
pub fn break_lines(tokens: impl IntoIterator<Item = Token>, columns: usize) -> Vec<Line> {
    let mut breaker = LineBreaker::new(columns);
    for token in tokens {
        breaker.push(token);
    }
    breaker.finish()
}
