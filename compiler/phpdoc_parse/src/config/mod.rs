//! Parser configuration.
//!
//! Position attributes cost a few map insertions per node, so they are
//! opt-in. Flags combine with `with`:
//!
//! ```
//! use phpdoc_parse::ParserConfig;
//!
//! let config = ParserConfig::new().with(ParserConfig::LINES);
//! assert!(config.lines());
//! assert!(!config.indexes());
//! ```

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ParserConfig(u8);

impl ParserConfig {
    /// Plain trees, no position attributes.
    pub const NONE: Self = Self(0);

    /// Record `start_line` and `end_line` on every node.
    pub const LINES: Self = Self(1 << 0);

    /// Record `start_index` and `end_index` (token indexes) on every node.
    pub const INDEXES: Self = Self(1 << 1);

    /// Every flag.
    pub const ALL: Self = Self(Self::LINES.0 | Self::INDEXES.0);

    #[inline]
    pub const fn new() -> Self {
        Self::NONE
    }

    #[inline]
    pub const fn has(self, flag: Self) -> bool {
        (self.0 & flag.0) != 0
    }

    #[inline]
    #[must_use]
    pub const fn with(self, flag: Self) -> Self {
        Self(self.0 | flag.0)
    }

    #[inline]
    #[must_use]
    pub const fn without(self, flag: Self) -> Self {
        Self(self.0 & !flag.0)
    }

    #[inline]
    pub const fn lines(self) -> bool {
        self.has(Self::LINES)
    }

    #[inline]
    pub const fn indexes(self) -> bool {
        self.has(Self::INDEXES)
    }

    /// Whether any position attribute is recorded.
    #[inline]
    pub const fn tracks_positions(self) -> bool {
        self.0 != 0
    }
}
