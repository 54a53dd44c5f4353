mod common;

use common::{broken, broken_texts, unmarked_text};
use eighty::layout::breaker::LineBreaker;
use eighty::token::{Mark, Token, TokenKind};

#[test]
fn test_greedy_first_fit() {
    assert_eq!(
        broken_texts("hello world foo", 11),
        vec!["hello world", " foo"]
    );
}

#[test]
fn test_newline_closes_line() {
    let lines = broken("a\nb", 10);
    assert_eq!(lines.len(), 2);
    assert!(lines[0].is_natural());
    assert!(lines[1].is_natural());
    assert_eq!(lines[0].text(), "a");
    assert_eq!(lines[1].text(), "b");
}

#[test]
fn test_oversize_word_is_split_with_markers() {
    let lines = broken("abcdefghij", 4);
    let texts: Vec<_> = lines.iter().map(|l| l.text()).collect();
    assert_eq!(texts, vec!["abcd\\", "efgh\\", "ij"]);
    assert_eq!(lines[0].tokens()[1].mark(), Mark::Continuation);

    let rejoined: String = lines.iter().map(unmarked_text).collect();
    assert_eq!(rejoined, "abcdefghij");
}

#[test]
fn test_short_closing_punct_hangs() {
    let lines = broken("abcd.", 4);
    assert_eq!(lines[0].text(), "abcd.");
    assert_eq!(lines[0].tokens()[1].mark(), Mark::HangAtEnd);
    assert_eq!(lines[0].width(), 5);
}

#[test]
fn test_opening_bracket_moves_down() {
    assert_eq!(broken_texts("ab (cd", 4), vec!["ab ", "(cd"]);
}

#[test]
fn test_lone_opening_bracket_is_not_pulled() {
    // Only the bracket is on the line, so there is nothing to pull it away from
    assert_eq!(broken_texts("(abcd", 4), vec!["(", "abcd"]);
}

#[test]
fn test_cjk_breaks_between_glyphs() {
    assert_eq!(broken_texts("中文字符", 4), vec!["中文", "字符"]);
}

#[test]
fn test_fenced_region_wraps_at_exact_columns() {
    let lines = broken("```\nabcdefgh\n```", 4);
    let texts: Vec<_> = lines.iter().map(|l| l.text()).collect();
    assert_eq!(texts, vec!["", "abcd\\", "\\efg\\", "\\h", ""]);

    let rejoined: String = lines.iter().map(unmarked_text).collect();
    assert_eq!(rejoined, "abcdefgh");
}

#[test]
fn test_fence_tokens_are_dropped() {
    assert!(broken_texts("```\nx\n```", 10)
        .iter()
        .all(|t| !t.contains("```")));
}

#[test]
fn test_fenced_wide_glyphs_never_split() {
    let lines = broken("```\n中文字\n```", 3);
    for line in &lines {
        for token in line.tokens() {
            assert!(token.width() <= 3, "fragment {:?} too wide", token.text());
        }
    }
    let rejoined: String = lines.iter().map(unmarked_text).collect();
    assert_eq!(rejoined, "中文字");
}

#[test]
fn test_token_wider_than_budget_still_placed() {
    let mut breaker = LineBreaker::new(1);
    breaker.push(Token::new(TokenKind::Wide, "中"));
    breaker.push(Token::end());
    let lines = breaker.finish();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].text(), "中");
}

#[test]
fn test_finish_on_empty_stream() {
    assert!(LineBreaker::new(10).finish().is_empty());
}

#[test]
fn test_split_fragments_rejoin() {
    for (text, first, rest) in [
        ("abcdefghijklmnop", 3, 5),
        ("中文字符混排abc", 3, 4),
        ("abcdef", 0, 2),
        ("x中y文z", 1, 3),
    ] {
        let token = Token::new(TokenKind::Latin, text);
        let fragments = token.split(first, rest).unwrap();
        let rejoined: String = fragments.iter().map(|t| t.text()).collect();
        assert_eq!(rejoined, text);
        for fragment in &fragments[1..] {
            assert!(fragment.width() <= rest.max(2), "{:?}", fragment.text());
        }
    }
}

#[test]
fn test_leading_punct_never_left_at_forced_break() {
    let text = "see (this) and [that] or {other} and “quoted” words (again) here";
    for columns in 5..20 {
        let lines = broken(text, columns);
        for line in lines.iter().filter(|l| !l.is_natural() && l.len() > 1) {
            let last = line.tokens().iter().rev().find(|t| !t.is_spaces_only());
            let dangling = last.is_some_and(|t| matches!(t.text(), "(" | "[" | "{" | "“"));
            assert!(!dangling, "{:?} at {} columns", line.text(), columns);
        }
    }
}
