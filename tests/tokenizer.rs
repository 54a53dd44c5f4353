use eighty::token::{CodeMarker, TokenKind};
use eighty::tokenizer::{tokenize, Tokenizer};

fn kinds_and_texts(source: &str) -> Vec<(TokenKind, String)> {
    tokenize(source.as_bytes(), 4)
        .into_iter()
        .map(|t| (t.kind(), t.text().to_string()))
        .collect()
}

#[test]
fn test_empty_input_yields_only_end() {
    assert_eq!(kinds_and_texts(""), vec![(TokenKind::End, String::new())]);
}

#[test]
fn test_runs_merge_by_class() {
    assert_eq!(
        kinds_and_texts("hello, world"),
        vec![
            (TokenKind::Latin, "hello".into()),
            (TokenKind::NarrowDelim, ",".into()),
            (TokenKind::Space, " ".into()),
            (TokenKind::Latin, "world".into()),
            (TokenKind::End, String::new()),
        ]
    );
}

#[test]
fn test_wide_glyphs_are_singletons() {
    assert_eq!(
        kinds_and_texts("中文。，"),
        vec![
            (TokenKind::Wide, "中".into()),
            (TokenKind::Wide, "文".into()),
            (TokenKind::WideDelim, "。，".into()),
            (TokenKind::End, String::new()),
        ]
    );
}

#[test]
fn test_latin_includes_accented_letters_and_digits() {
    let tokens = tokenize("café42".as_bytes(), 4);
    assert_eq!(tokens[0].kind(), TokenKind::Latin);
    assert_eq!(tokens[0].text(), "café42");
    assert_eq!(tokens[0].width(), 6);
}

#[test]
fn test_tab_expands_to_tab_width() {
    let tokens = tokenize(b"\tx", 8);
    assert_eq!(tokens[0].kind(), TokenKind::Space);
    assert_eq!(tokens[0].width(), 8);
    assert_eq!(tokens[0].text(), " ".repeat(8));
}

#[test]
fn test_ideographic_space_becomes_two_spaces() {
    let tokens = tokenize("a\u{3000}b".as_bytes(), 4);
    assert_eq!(tokens[1].text(), "  ");
    assert_eq!(tokens[1].width(), 2);
}

#[test]
fn test_carriage_return_is_dropped() {
    assert_eq!(
        kinds_and_texts("a\r\nb"),
        vec![
            (TokenKind::Latin, "a".into()),
            (TokenKind::Newline, String::new()),
            (TokenKind::Latin, "b".into()),
            (TokenKind::End, String::new()),
        ]
    );
}

#[test]
fn test_invalid_utf8_does_not_panic() {
    let tokens = tokenize(b"a\xffb", 4);
    assert_eq!(tokens.first().map(|t| t.text()), Some("a"));
    assert_eq!(tokens.last().map(|t| t.kind()), Some(TokenKind::End));
}

#[test]
fn test_iterator_stops_after_end() {
    let mut tokenizer = Tokenizer::new(b"x", 4);
    assert_eq!(tokenizer.next().map(|t| t.kind()), Some(TokenKind::Latin));
    assert_eq!(tokenizer.next().map(|t| t.kind()), Some(TokenKind::End));
    assert!(tokenizer.next().is_none());
    assert!(tokenizer.next().is_none());
}

#[test]
fn test_plain_tokenizer_emits_no_code_markers() {
    assert!(tokenize(b"x // \"y\" /* z */", 4)
        .iter()
        .all(|t| t.code().is_none()));
}

#[test]
fn test_code_aware_cuts_out_markers() {
    let markers: Vec<_> = Tokenizer::code_aware(b"x = \"a\"; // done /* b */ # c", 4)
        .filter_map(|t| t.code().map(|c| (c, t.text().to_string())))
        .collect();
    assert_eq!(
        markers,
        vec![
            (CodeMarker::Quote('"'), "\"".to_string()),
            (CodeMarker::Quote('"'), "\"".to_string()),
            (CodeMarker::LineComment, "//".to_string()),
            (CodeMarker::BlockOpen, "/*".to_string()),
            (CodeMarker::BlockClose, "*/".to_string()),
            (CodeMarker::LineComment, "#".to_string()),
        ]
    );
}

#[test]
fn test_code_aware_marker_splits_delimiter_run() {
    let texts: Vec<_> = Tokenizer::code_aware(b"=//", 4)
        .map(|t| t.text().to_string())
        .collect();
    assert_eq!(texts, vec!["=", "//", ""]);
}
