//! Out-of-band node metadata.
//!
//! Every node embeds one [`Attributes`] map. Attributes are set after
//! construction and never take part in equality, hashing or printing, so
//! annotating a node (source lines, token indexes, analyzer flags) cannot
//! change what the tree means.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

/// Keys set by the parser when position tracking is enabled.
pub mod keys {
    /// 1-based line of the first token of the node.
    pub const START_LINE: &str = "start_line";
    /// 1-based line of the last non-whitespace token of the node.
    pub const END_LINE: &str = "end_line";
    /// Token index of the first token of the node.
    pub const START_INDEX: &str = "start_index";
    /// Token index of the last non-whitespace token of the node.
    pub const END_INDEX: &str = "end_index";
    /// The parse error behind an invalid tag value or type.
    pub const ERROR: &str = "error";
}

/// An attached value. Shared so cloned nodes stay cheap.
pub type AttributeValue = Arc<dyn Any + Send + Sync>;

/// String-keyed attribute map owned by a single node.
#[derive(Clone, Default)]
pub struct Attributes {
    map: FxHashMap<String, AttributeValue>,
}

impl Attributes {
    pub fn new() -> Self {
        Attributes::default()
    }

    /// Attach `value` under `key`, replacing any previous value.
    pub fn set<V: Any + Send + Sync>(&mut self, key: impl Into<String>, value: V) {
        self.map.insert(key.into(), Arc::new(value));
    }

    /// Attach an already shared value.
    pub fn set_shared(&mut self, key: impl Into<String>, value: AttributeValue) {
        self.map.insert(key.into(), value);
    }

    pub fn has(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    /// Raw attribute value, `None` when the key was never set.
    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.map.get(key)
    }

    /// Attribute value downcast to `V`.
    ///
    /// Returns `None` when the key is absent or holds a different type.
    pub fn get_as<V: Any>(&self, key: &str) -> Option<&V> {
        self.map.get(key).and_then(|v| v.downcast_ref::<V>())
    }

    pub fn remove(&mut self, key: &str) -> Option<AttributeValue> {
        self.map.remove(key)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Attribute keys in unspecified order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.map.keys().map(String::as_str)
    }
}

/// Attributes are annotations, not content: any two maps compare equal.
impl PartialEq for Attributes {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for Attributes {}

impl fmt::Debug for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.keys().collect();
        keys.sort_unstable();
        f.debug_set().entries(keys).finish()
    }
}
