#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;

use phpdoc_lexer::tokenize;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn stream(source: &str) -> TokenStream {
    TokenStream::new(tokenize(source))
}

#[test]
fn test_skips_single_leading_whitespace() {
    let s = stream("  int");
    assert_eq!(s.current_kind(), TokenKind::Identifier);
    assert_eq!(s.current_index(), 1);
    assert_eq!(s.current_offset(), 2);
}

#[test]
fn test_unsealed_input_gets_end() {
    let s = TokenStream::new(TokenList::new());
    assert!(s.is_at_end());
}

#[test]
fn test_consume_absorbs_one_whitespace() {
    let mut s = stream("int   $x");
    assert_eq!(s.consume(TokenKind::Identifier), Ok("int".to_owned()));
    assert_eq!(s.current_kind(), TokenKind::Variable);
    assert!(s.is_preceded_by_horizontal_whitespace());
}

#[test]
fn test_consume_does_not_cross_line_breaks() {
    let mut s = stream("int\n * $x");
    s.advance();
    assert_eq!(s.current_kind(), TokenKind::PhpDocEol);
}

#[test]
fn test_consume_error_reports_token_and_offset() {
    let mut s = stream("int $x");
    s.advance();
    let error = s.consume(TokenKind::Identifier).unwrap_err();

    assert_eq!(error.found_value, "$x");
    assert_eq!(error.found_kind, TokenKind::Variable);
    assert_eq!(error.offset, 4);
    assert_eq!(error.line, 1);
    assert_eq!(error.expected, Expected::kind(TokenKind::Identifier));
    assert_eq!(s.current_index(), 2, "a failed consume must not move the cursor");
}

#[test]
fn test_consume_value() {
    let mut s = stream("T of U");
    s.advance();
    assert!(s.consume_value(TokenKind::Identifier, "as").is_err());
    assert!(s.consume_value(TokenKind::Identifier, "of").is_ok());
    assert!(s.is_current_value("U"));
}

#[test]
fn test_try_consume() {
    let mut s = stream("static foo");
    assert!(!s.try_consume("public"));
    assert!(s.try_consume("static"));
    assert!(!s.try_consume_kind(TokenKind::Variable));
    assert!(s.try_consume_kind(TokenKind::Identifier));
    assert!(s.is_at_end());
}

#[test]
fn test_join_until_keeps_spacing() {
    let mut s = stream("some  text | here\n * next");
    let text = s.join_until(TokenSet::single(TokenKind::PhpDocEol));
    assert_eq!(text, "some  text | here");
    assert!(s.is_current(TokenKind::PhpDocEol));
}

#[test]
fn test_join_until_stops_at_end() {
    let mut s = stream("no stops");
    let text = s.join_until(TokenSet::new());
    assert_eq!(text, "no stops");
    assert!(s.is_at_end());
}

#[test]
fn test_advance_stays_on_end() {
    let mut s = stream("a");
    s.advance();
    s.advance();
    s.advance();
    assert!(s.is_at_end());
}

#[test]
fn test_fast_forward_to_end() {
    let mut s = stream("a b c");
    s.fast_forward_to_end();
    assert!(s.is_at_end());
    assert_eq!(s.current_offset(), 5);
}

#[test]
fn test_rollback_restores_innermost() {
    let mut s = stream("a b c d");
    s.push_save_point();
    s.advance();
    s.push_save_point();
    s.advance();
    assert!(s.is_current_value("c"));

    s.rollback();
    assert!(s.is_current_value("b"));
    s.rollback();
    assert!(s.is_current_value("a"));
    assert_eq!(s.save_point_depth(), 0);
}

#[test]
fn test_drop_keeps_position() {
    let mut s = stream("a b");
    s.push_save_point();
    s.advance();
    s.drop_save_point();
    assert!(s.is_current_value("b"));
    assert_eq!(s.save_point_depth(), 0);
}

#[test]
#[should_panic(expected = "rollback without a save point")]
fn test_rollback_without_save_point_panics() {
    let mut s = stream("a");
    s.rollback();
}

#[test]
#[should_panic(expected = "drop_save_point without a save point")]
fn test_drop_without_save_point_panics() {
    let mut s = stream("a");
    s.drop_save_point();
}

#[test]
fn test_end_index_of_last_relevant_token() {
    let mut s = stream("int \n * $x");
    s.advance();
    s.advance();
    assert!(s.is_current(TokenKind::Variable));
    assert_eq!(s.end_index_of_last_relevant_token(), 0);
}

#[test]
fn test_offsets_count_bytes() {
    let mut s = stream("ü x");
    s.advance();
    assert_eq!(s.current_offset(), 3);
    assert_eq!(s.line_at(usize::MAX), 1);
}

#[test]
fn test_offset_follows_rollback() {
    let mut s = stream("a, bb, ccc");
    s.push_save_point();
    s.advance();
    s.advance();
    s.advance();
    assert_eq!(s.current_offset(), 5);
    s.rollback();
    assert_eq!(s.current_offset(), 0);
    s.fast_forward_to_end();
    assert_eq!(s.current_offset(), 10);
}

#[test]
fn test_error_offset_after_many_tokens() {
    let source = "a ".repeat(1000);
    let mut s = stream(&source);
    while s.try_consume_kind(TokenKind::Identifier) {}
    let error = s.consume(TokenKind::Identifier).unwrap_err();
    assert_eq!(error.offset, source.len());
}

#[derive(Clone, Debug)]
enum Op {
    Advance,
    Nested(Vec<Op>, bool),
}

fn ops() -> impl Strategy<Value = Vec<Op>> {
    let leaf = Just(Op::Advance);
    let op = leaf.prop_recursive(4, 32, 6, |inner| {
        prop_oneof![
            Just(Op::Advance),
            (prop::collection::vec(inner, 0..6), any::<bool>())
                .prop_map(|(body, rollback)| Op::Nested(body, rollback)),
        ]
    });
    prop::collection::vec(op, 0..8)
}

/// Run `ops`, checking that every rollback restores its own save point.
fn run(s: &mut TokenStream, ops: &[Op]) {
    for op in ops {
        match op {
            Op::Advance => s.advance(),
            Op::Nested(body, rollback) => {
                let before = s.current_index();
                s.push_save_point();
                run(s, body);
                if *rollback {
                    s.rollback();
                    assert_eq!(s.current_index(), before);
                } else {
                    s.drop_save_point();
                }
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    })]

    #[test]
    fn prop_balanced_save_points_are_lifo(ops in ops()) {
        let mut s = stream("a b c d e f g h i j k l m n o p q r s t");
        let before = s.current_index();
        s.push_save_point();
        run(&mut s, &ops);
        prop_assert_eq!(s.save_point_depth(), 1);
        s.rollback();
        prop_assert_eq!(s.current_index(), before);
        prop_assert_eq!(s.save_point_depth(), 0);
    }
}
