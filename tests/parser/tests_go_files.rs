//! Whole-file parsing tests.

use handlergen::parser::{AstNode, SyntaxKind, parse_go, tokenize};
use rstest::rstest;

use crate::helpers::source_fixtures::*;

#[rstest]
#[case(MSG_TYPES)]
#[case(GREET_HANDLER)]
#[case(REQUEST_ONLY_HANDLER)]
#[case(STREAM_HANDLER)]
#[case(FREE_FUNCTION)]
#[case(NOT_HANDLERS)]
#[case(MIXED_PACKAGE)]
fn test_fixture_parses_losslessly(#[case] source: &str) {
    let parse = parse_go(source);
    assert!(parse.ok(), "unexpected errors: {:?}", parse.errors);
    assert_eq!(parse.syntax().to_string(), source);
}

#[test]
fn test_syntax_error_is_reported() {
    let parse = parse_go(SYNTAX_ERROR);
    assert!(!parse.ok());
    // The tree stays lossless even when broken.
    assert_eq!(parse.syntax().to_string(), SYNTAX_ERROR);
}

#[test]
fn test_tokens_cover_input() {
    let tokens = tokenize(MIXED_PACKAGE);
    let joined: String = tokens.iter().map(|t| t.text).collect();
    assert_eq!(joined, MIXED_PACKAGE);
    assert!(tokens.iter().all(|t| t.kind != SyntaxKind::ERROR));
}

#[rstest]
#[case("'a'", SyntaxKind::RUNE)]
#[case("`raw\nstring`", SyntaxKind::RAW_STRING)]
#[case("\"quoted\"", SyntaxKind::STRING)]
#[case("0x2a", SyntaxKind::INT_NUMBER)]
#[case("...", SyntaxKind::ELLIPSIS)]
#[case("<-", SyntaxKind::ARROW)]
#[case("// note", SyntaxKind::LINE_COMMENT)]
fn test_single_token(#[case] input: &str, #[case] kind: SyntaxKind) {
    let tokens = tokenize(input);
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, kind);
}

#[test]
fn test_mixed_package_declarations() {
    let parse = parse_go(MIXED_PACKAGE);
    let file = parse.source_file();

    assert_eq!(file.package_name().as_deref(), Some("api"));

    let imports: Vec<_> = file.import_specs().filter_map(|s| s.path()).collect();
    assert_eq!(imports, vec!["net/http".to_string()]);

    let types: Vec<_> = file
        .type_specs()
        .filter_map(|s| s.name())
        .map(|n| n.text().to_string())
        .collect();
    assert_eq!(types, vec!["Report", "Store"]);

    let funcs: Vec<_> = file
        .func_decls()
        .filter_map(|f| f.name())
        .map(|n| n.text().to_string())
        .collect();
    assert_eq!(funcs, vec!["Get", "Put", "Dump", "helper"]);
}

#[test]
fn test_parameter_groups_and_results() {
    let parse = parse_go(MIXED_PACKAGE);
    let file = parse.source_file();
    let put = file
        .func_decls()
        .find(|f| f.name().is_some_and(|n| n.text() == "Put"))
        .unwrap();

    let params = put.params().unwrap();
    assert_eq!(
        params.to_string(),
        "(id string, meta interface{}, tags ...string)"
    );
    assert_eq!(put.result().unwrap().to_string(), "(Report, int)");
    assert!(put.body().is_some());
    assert_eq!(put.syntax().kind(), SyntaxKind::FUNC_DECL);
}

#[test]
fn test_mimetype_comment_is_attached() {
    let parse = parse_go(MIXED_PACKAGE);
    let file = parse.source_file();
    let comments: Vec<_> = file
        .type_specs()
        .map(|s| s.leading_comment().map(|c| c.text().to_string()))
        .collect();
    assert_eq!(
        comments,
        vec![
            Some("//mimetype application/json".to_string()),
            Some("// Store keeps reports.".to_string()),
        ]
    );
}

#[test]
fn test_token_classes() {
    let kinds: Vec<_> = tokenize("func (x) // c").iter().map(|t| t.kind).collect();
    assert!(kinds[0].is_keyword());
    assert!(kinds[1].is_trivia());
    assert!(kinds[2].is_punct());
    assert!(!kinds[3].is_punct());
    assert!(kinds[6].is_trivia());
    assert!(!kinds[6].is_keyword());
}

const BLOCK_COMMENTS: &str = r#"/*
 * Copyright 2024 The Authors.
 */

/** Package main serves greetings. */
package main

type Msg string /* plain text */ //mimetype text/plain

type H struct{}

func (h *H) Greet(name /* caller */ string, count int /* ignored */) (Msg, int) {
	return "", 200
}
"#;

#[test]
fn test_block_comments_are_trivia() {
    let parse = parse_go(BLOCK_COMMENTS);
    assert!(parse.ok(), "unexpected errors: {:?}", parse.errors);
    assert_eq!(parse.syntax().to_string(), BLOCK_COMMENTS);

    let file = parse.source_file();
    assert_eq!(file.package_name().as_deref(), Some("main"));

    let greet = file.func_decls().next().unwrap();
    assert_eq!(
        greet.params().unwrap().to_string(),
        "(name string, count int)"
    );
}

#[test]
fn test_trailing_mimetype_after_block_comment() {
    let parse = parse_go(BLOCK_COMMENTS);
    let msg = parse.source_file().type_specs().next().unwrap();
    assert_eq!(
        msg.trailing_comment().map(|c| c.text().to_string()),
        Some("//mimetype text/plain".to_string())
    );
}

#[test]
fn test_leading_byte_order_mark() {
    let source = format!("\u{feff}{}", GREET_HANDLER);
    let parse = parse_go(&source);
    assert!(parse.ok(), "unexpected errors: {:?}", parse.errors);
    assert_eq!(parse.syntax().to_string(), source);
    assert_eq!(parse.source_file().package_name().as_deref(), Some("main"));
}
