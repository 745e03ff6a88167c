//! Bitset of token kinds.

use super::TokenKind;

/// A set of token kinds with O(1) membership testing.
///
/// Each bit in the `u64` corresponds to a `TokenKind` discriminant index.
///
/// ```
/// use phpdoc_ir::{TokenKind, TokenSet};
///
/// const LINE_END: TokenSet = TokenSet::new()
///     .with(TokenKind::PhpDocEol)
///     .with(TokenKind::ClosePhpDoc);
///
/// assert!(LINE_END.contains(TokenKind::ClosePhpDoc));
/// assert!(!LINE_END.contains(TokenKind::Identifier));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct TokenSet(u64);

impl TokenSet {
    /// Create an empty token set.
    #[inline]
    pub const fn new() -> Self {
        Self(0)
    }

    /// Create a token set containing a single token kind.
    #[inline]
    pub const fn single(kind: TokenKind) -> Self {
        Self(1u64 << kind.discriminant_index())
    }

    /// Add a token kind to this set (builder for const contexts).
    #[inline]
    #[must_use]
    pub const fn with(self, kind: TokenKind) -> Self {
        Self(self.0 | (1u64 << kind.discriminant_index()))
    }

    /// Union of two token sets.
    #[inline]
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[inline]
    pub const fn contains(self, kind: TokenKind) -> bool {
        (self.0 & (1u64 << kind.discriminant_index())) != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of kinds in the set.
    #[inline]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }
}
