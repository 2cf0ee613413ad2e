//! Centralized limits and thresholds for the lowering engine.
//!
//! Both values are defaults; the CLI configuration can override the depth
//! limit per run.

// =============================================================================
// Recursion Depth Limits
// =============================================================================

/// Maximum nesting depth for a single lowering pass.
///
/// The dispatcher recurses once per sub-expression. A tree nested deeper
/// than this fails with a depth error instead of overflowing the stack.
///
/// ```groovy
/// def x = f(f(f(f(f(f(f(f(/* ... hundreds of levels ... */))))))))
/// ```
pub const MAX_LOWERING_DEPTH: u32 = 256;

// =============================================================================
// Capacity Limits
// =============================================================================

/// Upper bound for numeric suffixes tried when picking a fresh temporary name.
pub const MAX_NAME_SUFFIX: u32 = 10_000;
