//! Token kind enumeration.

/// Token kinds produced by the PHPDoc lexer.
///
/// The discriminant doubles as the bit index inside [`super::TokenSet`],
/// so the enum must stay below 64 variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TokenKind {
    /// `&` before a parameter: `&$x`, `&...$x`, `&=`.
    Reference,
    /// `|`
    Union,
    /// `&` between types.
    Intersection,
    /// `?`
    Nullable,
    /// `-`
    Minus,
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
    /// `<`
    OpenAngle,
    /// `>`
    CloseAngle,
    /// `[`
    OpenSquare,
    /// `]`
    CloseSquare,
    /// `{`
    OpenCurly,
    /// `}`
    CloseCurly,
    /// `,`
    Comma,
    /// `...`
    Variadic,
    /// `::`
    DoubleColon,
    /// `=>`
    DoubleArrow,
    /// `=`
    Equal,
    /// `:`
    Colon,
    /// `/**`
    OpenPhpDoc,
    /// `*/`
    ClosePhpDoc,
    /// `@name`
    PhpDocTag,
    /// A line break plus the leading `*` gutter of the next line.
    PhpDocEol,
    Float,
    Integer,
    SingleQuotedString,
    DoubleQuotedString,
    Identifier,
    /// `$this`
    ThisVariable,
    /// `$name`
    Variable,
    /// Spaces and tabs.
    HorizontalWhitespace,
    /// `*`
    Wildcard,
    /// Anything the other rules do not accept.
    Other,
    /// End of input.
    End,
}

impl TokenKind {
    /// Number of variants.
    pub const COUNT: usize = 34;

    /// Bit index of this kind inside a `TokenSet`.
    #[inline]
    pub const fn discriminant_index(self) -> u8 {
        self as u8
    }

    /// Human-readable name used in diagnostics.
    pub fn display_name(self) -> &'static str {
        match self {
            TokenKind::Reference => "`&`",
            TokenKind::Union => "`|`",
            TokenKind::Intersection => "`&`",
            TokenKind::Nullable => "`?`",
            TokenKind::Minus => "`-`",
            TokenKind::OpenParen => "`(`",
            TokenKind::CloseParen => "`)`",
            TokenKind::OpenAngle => "`<`",
            TokenKind::CloseAngle => "`>`",
            TokenKind::OpenSquare => "`[`",
            TokenKind::CloseSquare => "`]`",
            TokenKind::OpenCurly => "`{`",
            TokenKind::CloseCurly => "`}`",
            TokenKind::Comma => "`,`",
            TokenKind::Variadic => "`...`",
            TokenKind::DoubleColon => "`::`",
            TokenKind::DoubleArrow => "`=>`",
            TokenKind::Equal => "`=`",
            TokenKind::Colon => "`:`",
            TokenKind::OpenPhpDoc => "`/**`",
            TokenKind::ClosePhpDoc => "`*/`",
            TokenKind::PhpDocTag => "tag",
            TokenKind::PhpDocEol => "end of line",
            TokenKind::Float => "float",
            TokenKind::Integer => "integer",
            TokenKind::SingleQuotedString | TokenKind::DoubleQuotedString => "string",
            TokenKind::Identifier => "type",
            TokenKind::ThisVariable => "`$this`",
            TokenKind::Variable => "variable",
            TokenKind::HorizontalWhitespace => "whitespace",
            TokenKind::Wildcard => "`*`",
            TokenKind::Other => "text",
            TokenKind::End => "end of input",
        }
    }

    /// Whether this kind is spacing (horizontal whitespace or a line break).
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            TokenKind::HorizontalWhitespace | TokenKind::PhpDocEol
        )
    }
}
