//! Stack growth for recursive walks over scope trees.
//!
//! Scope nesting follows the input, so a pathological file (thousands of
//! nested braces) would otherwise overflow the native stack when sizing,
//! flattening or rendering the tree.

/// Remaining stack below which the next call runs on a fresh segment.
const RED_ZONE: usize = 100 * 1024;

/// Size of each freshly allocated stack segment.
const SEGMENT_SIZE: usize = 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
///
/// Wrap the body of every function that recurses once per nesting level.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// WASM manages its own stack; call straight through.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
