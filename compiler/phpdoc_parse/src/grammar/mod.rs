//! Grammar productions, one module per layer.
//!
//! - `doc`: the comment body, split into text and tags
//! - `tag`: tag name dispatch and the tag-value grammars
//! - `ty`: type expressions
//! - `const_expr`: literals, arrays and constant fetches

mod const_expr;
mod doc;
mod tag;
mod ty;
