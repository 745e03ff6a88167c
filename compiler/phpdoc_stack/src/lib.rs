//! Stack growth for deeply nested input.
//!
//! Type and constant expressions nest once per level, so a tree like
//! `array<array<array<...>>>` is bounded only by the length of its source.
//! Everything that walks such a tree recursively (parsing, printing,
//! comparing, cloning and dropping) runs each level inside
//! [`ensure_sufficient_stack`], which moves to a fresh segment when the
//! remaining stack gets short.

/// Grow when less than this remains.
const RED_ZONE: usize = 64 * 1024;

/// Size of each new stack segment.
const SEGMENT_SIZE: usize = 1024 * 1024;

#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// wasm manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
