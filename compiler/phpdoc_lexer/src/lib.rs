//! Lexer for PHPDoc comments using logos.
//!
//! Produces a lossless `TokenList`: whitespace and line breaks are tokens,
//! and text no rule accepts becomes `Other` instead of an error.

use logos::{Lexer, Logos};
use phpdoc_ir::{Token, TokenKind, TokenList};

/// Raw token from logos (before line tracking).
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum RawToken {
    /// Resolves to `Reference` or `Intersection` by looking ahead.
    #[token("&", ampersand)]
    Ampersand(TokenKind),
    #[token("|")]
    Union,
    #[token("?")]
    Nullable,
    #[token("-")]
    Minus,
    #[token("(")]
    OpenParen,
    #[token(")")]
    CloseParen,
    #[token("<")]
    OpenAngle,
    #[token(">")]
    CloseAngle,
    #[token("[")]
    OpenSquare,
    #[token("]")]
    CloseSquare,
    #[token("{")]
    OpenCurly,
    #[token("}")]
    CloseCurly,
    #[token(",")]
    Comma,
    #[token("...")]
    Variadic,
    #[token("::")]
    DoubleColon,
    #[token("=>")]
    DoubleArrow,
    #[token("=")]
    Equal,
    #[token(":")]
    Colon,

    #[token("/**", open_phpdoc)]
    OpenPhpDoc,
    #[token("*/")]
    ClosePhpDoc,
    #[regex(r"@[a-zA-Z][a-zA-Z0-9\-\\]*")]
    PhpDocTag,
    #[regex(r"\r?\n[ \t]*", eol_gutter)]
    PhpDocEol,

    #[regex(r"-?[0-9]+(_[0-9]+)*\.([0-9]+(_[0-9]+)*)?([eE]-?[0-9]+(_[0-9]+)*)?")]
    #[regex(r"-?\.[0-9]+(_[0-9]+)*([eE]-?[0-9]+(_[0-9]+)*)?")]
    #[regex(r"-?[0-9]+(_[0-9]+)*[eE]-?[0-9]+(_[0-9]+)*")]
    Float,
    #[regex(r"-?0[bB][01]+(_[01]+)*")]
    #[regex(r"-?0[oO][0-7]+(_[0-7]+)*")]
    #[regex(r"-?0[xX][0-9a-fA-F]+(_[0-9a-fA-F]+)*")]
    #[regex(r"-?[0-9]+(_[0-9]+)*")]
    Integer,
    #[regex(r"'(\\[^\r\n]|[^'\r\n\\])*'")]
    SingleQuotedString,
    #[regex(r#""(\\[^\r\n]|[^"\r\n\\])*""#)]
    DoubleQuotedString,

    #[regex(r"(\\?[a-zA-Z_\x{80}-\x{10FFFF}][0-9a-zA-Z_\x{80}-\x{10FFFF}\-]*)+")]
    Identifier,
    #[regex(r"\$[tT][hH][iI][sS]", priority = 10)]
    ThisVariable,
    #[regex(r"\$[a-zA-Z_\x{80}-\x{10FFFF}][0-9a-zA-Z_\x{80}-\x{10FFFF}]*")]
    Variable,

    #[regex(r"[ \t]+")]
    HorizontalWhitespace,
    #[token("*")]
    Wildcard,
}

/// `/**` only opens a comment when whitespace follows.
fn open_phpdoc(lex: &mut Lexer<RawToken>) -> bool {
    lex.remainder().starts_with(is_space)
}

/// Swallow the `*` gutter of a comment line, unless it starts `*/`.
fn eol_gutter(lex: &mut Lexer<RawToken>) {
    let rest = lex.remainder();
    if rest.starts_with('*') && !rest.starts_with("*/") {
        lex.bump(1);
    }
}

/// `&` is a by-reference marker when a parameter, `...`, `=`, `,` or `)`
/// follows; between types it is an intersection.
fn ampersand(lex: &mut Lexer<RawToken>) -> TokenKind {
    let rest = lex.remainder().trim_start_matches(is_space);
    let is_reference = match rest.as_bytes().first() {
        Some(b'.' | b',' | b'=' | b')') => true,
        Some(b'$') => !is_this_variable(&rest[1..]),
        _ => false,
    };
    if is_reference {
        TokenKind::Reference
    } else {
        TokenKind::Intersection
    }
}

/// Whether `rest` (after a `$`) spells exactly `this`.
fn is_this_variable(rest: &str) -> bool {
    let Some(head) = rest.get(..4) else {
        return false;
    };
    head.eq_ignore_ascii_case("this") && !rest[4..].starts_with(is_identifier_char)
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || !c.is_ascii()
}

fn is_space(c: char) -> bool {
    c.is_ascii_whitespace() || c == '\x0B'
}

/// Length of an `Other` run starting at `rest`: non-whitespace, stopping
/// before `*/`. Never zero for non-empty input.
fn other_len(rest: &str) -> usize {
    for (i, c) in rest.char_indices() {
        if is_space(c) || rest[i..].starts_with("*/") {
            if i > 0 {
                return i;
            }
            // A lone whitespace character no rule accepts, e.g. a bare `\r`.
            return c.len_utf8();
        }
    }
    rest.len()
}

fn convert(raw: RawToken) -> TokenKind {
    match raw {
        RawToken::Ampersand(kind) => kind,
        RawToken::Union => TokenKind::Union,
        RawToken::Nullable => TokenKind::Nullable,
        RawToken::Minus => TokenKind::Minus,
        RawToken::OpenParen => TokenKind::OpenParen,
        RawToken::CloseParen => TokenKind::CloseParen,
        RawToken::OpenAngle => TokenKind::OpenAngle,
        RawToken::CloseAngle => TokenKind::CloseAngle,
        RawToken::OpenSquare => TokenKind::OpenSquare,
        RawToken::CloseSquare => TokenKind::CloseSquare,
        RawToken::OpenCurly => TokenKind::OpenCurly,
        RawToken::CloseCurly => TokenKind::CloseCurly,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Variadic => TokenKind::Variadic,
        RawToken::DoubleColon => TokenKind::DoubleColon,
        RawToken::DoubleArrow => TokenKind::DoubleArrow,
        RawToken::Equal => TokenKind::Equal,
        RawToken::Colon => TokenKind::Colon,
        RawToken::OpenPhpDoc => TokenKind::OpenPhpDoc,
        RawToken::ClosePhpDoc => TokenKind::ClosePhpDoc,
        RawToken::PhpDocTag => TokenKind::PhpDocTag,
        RawToken::PhpDocEol => TokenKind::PhpDocEol,
        RawToken::Float => TokenKind::Float,
        RawToken::Integer => TokenKind::Integer,
        RawToken::SingleQuotedString => TokenKind::SingleQuotedString,
        RawToken::DoubleQuotedString => TokenKind::DoubleQuotedString,
        RawToken::Identifier => TokenKind::Identifier,
        RawToken::ThisVariable => TokenKind::ThisVariable,
        RawToken::Variable => TokenKind::Variable,
        RawToken::HorizontalWhitespace => TokenKind::HorizontalWhitespace,
        RawToken::Wildcard => TokenKind::Wildcard,
    }
}

/// Tokenize `source` into a sealed `TokenList`.
///
/// Never fails. The values of the returned tokens concatenate back to
/// `source`, followed by an empty `End` token.
pub fn tokenize(source: &str) -> TokenList {
    let mut tokens = TokenList::with_capacity(source.len() / 2 + 1);
    let mut line = 1;
    let mut offset = 0;

    // Restart after every unrecognized run so its extent is ours, not logos'.
    'restart: while offset < source.len() {
        let mut lexer = RawToken::lexer(&source[offset..]);
        while let Some(result) = lexer.next() {
            match result {
                Ok(raw) => {
                    let kind = convert(raw);
                    tokens.push(Token::new(kind, lexer.slice(), line));
                    if kind == TokenKind::PhpDocEol {
                        line += 1;
                    }
                }
                Err(()) => {
                    let start = offset + lexer.span().start;
                    let len = other_len(&source[start..]);
                    tokens.push(Token::new(
                        TokenKind::Other,
                        &source[start..start + len],
                        line,
                    ));
                    offset = start + len;
                    continue 'restart;
                }
            }
        }
        break;
    }

    tokens.seal();
    tokens
}
