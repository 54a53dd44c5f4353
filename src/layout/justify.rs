//! Space justification
//!
//! Stretches a force-broken line to exactly the column budget by inserting
//! single spaces. Delimiter and Latin tokens absorb the extra columns first;
//! when there are too few of them the gap is spread over token boundaries.
//! Naturally terminated lines and fenced lines are never touched.

use super::Line;
use crate::token::{Token, TokenKind};
use crate::width::is_optically_narrow;

/// Justify one line to `columns`
pub fn justify(line: Line, columns: usize, indent_unit: usize) -> Line {
    if line.is_natural() || line.is_verbatim() {
        return line;
    }

    let heading = line.is_heading();
    let mut tokens = line.into_tokens();
    strip_edges(&mut tokens, indent_unit);

    let trailer = if tokens.last().is_some_and(Token::is_trailer) {
        tokens.pop()
    } else {
        None
    };

    distribute(&mut tokens, columns, indent_unit);

    tokens.extend(trailer);
    let mut line = Line::new(tokens);
    if heading {
        line.set_heading();
    }
    line
}

/// Drop leading spaces that are not a whole indent and all trailing spaces
fn strip_edges(tokens: &mut Vec<Token>, indent_unit: usize) {
    if let Some(first) = tokens.first_mut() {
        let (leading, _) = first.surrounding_spaces();
        if leading % indent_unit != 0 {
            first.strip_leading_spaces(leading);
        }
    }
    if let Some(last) = tokens.last_mut() {
        last.strip_trailing_spaces();
    }
    tokens.retain(|t| !t.is_empty());
}

/// Indices of stretchable tokens: delimiters, then Latin runs. The last
/// token and URL-bearing tokens never stretch.
fn candidates(tokens: &[Token]) -> Vec<usize> {
    let body = &tokens[..tokens.len().saturating_sub(1)];
    let stretchable = |t: &Token| t.url().is_none();

    let delims = body
        .iter()
        .enumerate()
        .filter(|(_, t)| t.kind().is_delim() && stretchable(t));
    let latins = body
        .iter()
        .enumerate()
        .filter(|(_, t)| t.kind() == TokenKind::Latin && stretchable(t));

    delims.chain(latins).map(|(i, _)| i).collect()
}

fn distribute(tokens: &mut [Token], columns: usize, indent_unit: usize) {
    let content: usize = tokens.iter().map(Token::width).sum();
    let mut gap = columns.saturating_sub(content);
    if tokens
        .last()
        .is_some_and(|t| t.trimmed_all(is_optically_narrow))
    {
        gap += 1;
    }

    if tokens.len() <= 1 || gap == 0 {
        return;
    }

    // A preserved indent is not a stretch point
    let fillstart = usize::from(tokens[0].surrounding_spaces().0 >= indent_unit);
    let boundaries = tokens.len() - 1 - fillstart;
    if boundaries == 0 {
        return;
    }

    let candidates = candidates(tokens);

    if candidates.len() >= gap {
        if gap == 1 {
            tokens[candidates[candidates.len() / 2]].push_spaces(1);
            return;
        }
        let stride = candidates.len() / gap;
        for &i in candidates.iter().step_by(stride) {
            tokens[i].push_spaces(1);
            gap -= 1;
            if gap == 0 {
                break;
            }
        }
    } else if gap < boundaries {
        let stride = boundaries / (gap + 1);
        for i in (fillstart + stride..tokens.len()).step_by(stride) {
            tokens[i].push_spaces(1);
            gap -= 1;
            if gap == 0 {
                break;
            }
        }
    } else {
        for i in fillstart..tokens.len() - 1 {
            let remaining = boundaries - (i - fillstart);
            let n = gap.div_ceil(remaining);
            tokens[i].pad(n, i == fillstart);
            gap -= n;
            if gap == 0 {
                break;
            }
        }
    }
}
