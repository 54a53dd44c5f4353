//! Display width model
//!
//! Every code point occupies one or two columns. The rule is deliberately
//! coarse: anything in the single-byte range (U+0000..=U+00FF) is narrow,
//! everything else is wide. This misclassifies Greek and Cyrillic as
//! double-width; column alignment of rendered pages depends on the exact
//! result, so the heuristic is kept as-is.

use unicode_properties::{GeneralCategory, GeneralCategoryGroup, UnicodeGeneralCategory};

/// Default tab stop in columns
pub const DEFAULT_TAB_WIDTH: usize = 4;

/// Ideographic space, laid out as two ordinary spaces
pub const IDEOGRAPHIC_SPACE: char = '\u{3000}';

/// Lexical class of a single code point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    /// `' '`, `'\t'` and the ideographic space
    Space,
    /// `'\n'`
    Newline,
    /// Punctuation or symbol of width 1
    NarrowDelim,
    /// Punctuation or symbol of width 2
    WideDelim,
    /// Letter or decimal digit of width 1
    Latin,
    /// Any other width-2 code point (CJK ideographs, kana, hangul, ...)
    Wide,
    /// Control characters, combining marks and everything else that is dropped
    Unknown,
}

/// Columns occupied by `ch`.
///
/// Tabs report [`DEFAULT_TAB_WIDTH`]; the tokenizer expands tabs to its own
/// configured stop before any width is cached on a token.
#[inline]
pub fn char_width(ch: char) -> usize {
    if ch == '\t' {
        DEFAULT_TAB_WIDTH
    } else if (ch as u32) <= 0xFF {
        1
    } else {
        2
    }
}

/// Sum of [`char_width`] over a string
pub fn str_width(s: &str) -> usize {
    s.chars().map(char_width).sum()
}

/// Classify a code point.
///
/// Priority: whitespace, newline, punctuation/symbol, wide glyph,
/// letter/digit. Anything left over (including `'\r'`) is `Unknown`.
pub fn classify(ch: char) -> CharClass {
    if ch == ' ' || ch == '\t' || ch == IDEOGRAPHIC_SPACE {
        return CharClass::Space;
    }
    if ch == '\n' {
        return CharClass::Newline;
    }

    let group = ch.general_category_group();
    if matches!(
        group,
        GeneralCategoryGroup::Punctuation | GeneralCategoryGroup::Symbol
    ) {
        return if char_width(ch) == 1 {
            CharClass::NarrowDelim
        } else {
            CharClass::WideDelim
        };
    }

    if char_width(ch) == 2 {
        return CharClass::Wide;
    }

    if group == GeneralCategoryGroup::Letter
        || ch.general_category() == GeneralCategory::DecimalNumber
    {
        return CharClass::Latin;
    }

    CharClass::Unknown
}

/// Hangable trailing punctuation: allowed to stick out past the right margin
pub fn is_hangable(ch: char) -> bool {
    matches!(
        ch,
        '.' | ','
            | ':'
            | ')'
            | ']'
            | '}'
            | '。'
            | '，'
            | '：'
            | '．'
            | '、'
            | '”'
            | '）'
            | '〉'
            | '》'
            | '」'
            | '』'
            | '】'
            | '〕'
            | '〗'
            | '〙'
            | '〛'
    )
}

/// Opening punctuation that must not be left dangling at the end of a line
pub fn is_leading_punct(ch: char) -> bool {
    matches!(
        ch,
        '(' | '['
            | '{'
            | '"'
            | '“'
            | '〈'
            | '《'
            | '「'
            | '『'
            | '【'
            | '〔'
            | '〖'
            | '〘'
            | '〚'
    )
}

/// Wide punctuation whose glyph only fills the left half of its cell
pub fn is_optically_narrow(ch: char) -> bool {
    matches!(ch, '。' | '，' | '：' | '．' | '、')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_byte_range_is_narrow() {
        assert_eq!(char_width('a'), 1);
        assert_eq!(char_width('é'), 1);
        assert_eq!(char_width('\u{FF}'), 1);
        assert_eq!(char_width('\u{100}'), 2);
    }

    #[test]
    fn test_cyrillic_and_greek_are_wide() {
        assert_eq!(char_width('Ж'), 2);
        assert_eq!(char_width('λ'), 2);
        assert_eq!(classify('Ж'), CharClass::Wide);
    }

    #[test]
    fn test_classify_basics() {
        assert_eq!(classify(' '), CharClass::Space);
        assert_eq!(classify('\t'), CharClass::Space);
        assert_eq!(classify('\u{3000}'), CharClass::Space);
        assert_eq!(classify('\n'), CharClass::Newline);
        assert_eq!(classify('\r'), CharClass::Unknown);
        assert_eq!(classify('x'), CharClass::Latin);
        assert_eq!(classify('7'), CharClass::Latin);
        assert_eq!(classify(','), CharClass::NarrowDelim);
        assert_eq!(classify('+'), CharClass::NarrowDelim);
        assert_eq!(classify('`'), CharClass::NarrowDelim);
        assert_eq!(classify('。'), CharClass::WideDelim);
        assert_eq!(classify('中'), CharClass::Wide);
    }

    #[test]
    fn test_str_width_mixed() {
        assert_eq!(str_width("ab中"), 4);
        assert_eq!(str_width(""), 0);
    }
}
