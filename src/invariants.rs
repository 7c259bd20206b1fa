//! Debug assertion macros for tone queue invariants.
//!
//! These macros provide runtime checks for the invariants documented in
//! `spec.md` §3. They are only active in debug builds
//! (`#[cfg(debug_assertions)]`), so there is zero overhead in release
//! builds.

// =============================================================================
// INV-Q-01: Bounded Length
// =============================================================================

/// Assert that `len` never exceeds `capacity`.
///
/// **Invariant**: `0 <= len <= capacity`
///
/// Used in: `enqueue`, `dequeue`, after any mutation of `len`.
macro_rules! debug_assert_bounded_len {
    ($len:expr, $capacity:expr) => {
        debug_assert!(
            $len <= $capacity,
            "INV-Q-01 violated: len {} exceeds capacity {}",
            $len,
            $capacity
        )
    };
}

// =============================================================================
// INV-Q-02: Idle Implies Empty
// =============================================================================

/// Assert that the automaton being `Idle` implies `len == 0`.
///
/// **Invariant**: `state == Idle => len == 0` (`spec.md` §3, invariant 3).
///
/// Used in: `dequeue`, immediately after the `Busy -> Idle` transition.
macro_rules! debug_assert_idle_implies_empty {
    ($state:expr, $len:expr) => {
        debug_assert!(
            !$state.is_idle() || $len == 0,
            "INV-Q-02 violated: state is Idle but len is {}",
            $len
        )
    };
}

// =============================================================================
// INV-Q-03: Empty/Full Tie-break By Length, Not Indices
// =============================================================================

/// Assert that `head == tail` whenever `len == 0`.
///
/// **Invariant**: an empty queue has `head == tail`; this does not by
/// itself distinguish empty from full (`spec.md` §4.1) — `len` is the
/// tie-break, but `head == tail` must still hold on the empty side.
///
/// Used in: `dequeue`, right after the automaton transitions to `Idle`.
macro_rules! debug_assert_empty_implies_head_eq_tail {
    ($len:expr, $head:expr, $tail:expr) => {
        debug_assert!(
            $len != 0 || $head == $tail,
            "INV-Q-03 violated: len is 0 but head {} != tail {}",
            $head,
            $tail
        )
    };
}

// =============================================================================
// INV-Q-04: At-Most-One Low-Water Callback Per Crossing
// =============================================================================

/// Assert that a low-water callback fire was a genuine downward crossing.
///
/// **Invariant**: the callback fires iff `len_before > low_water_mark &&
/// len_after <= low_water_mark` (`spec.md` §3, invariant 5).
///
/// Used in: `dequeue`, at the point `should_callback` is computed.
macro_rules! debug_assert_low_water_crossing {
    ($should_callback:expr, $len_before:expr, $len_after:expr, $mark:expr) => {
        debug_assert!(
            !$should_callback || ($len_before > $mark && $len_after <= $mark),
            "INV-Q-04 violated: callback fired outside a downward crossing \
             (len_before {}, len_after {}, mark {})",
            $len_before,
            $len_after,
            $mark
        )
    };
}

// =============================================================================
// INV-Q-05: Index Arithmetic Is Its Own Inverse
// =============================================================================

/// Assert that `prev(next(i)) == i` for the ring's modular index arithmetic.
///
/// Used in: `RingStorage` unit tests, not on the hot path (index arithmetic
/// is simple enough that asserting it on every call would be redundant with
/// the property tests in `tests/property_tests.rs`).
macro_rules! debug_assert_index_roundtrip {
    ($i:expr, $next:expr, $prev_of_next:expr) => {
        debug_assert_eq!(
            $i, $prev_of_next,
            "INV-Q-05 violated: prev(next({})) == {} but expected {}",
            $i, $prev_of_next, $i
        )
    };
}

pub(crate) use debug_assert_bounded_len;
pub(crate) use debug_assert_empty_implies_head_eq_tail;
pub(crate) use debug_assert_idle_implies_empty;
pub(crate) use debug_assert_index_roundtrip;
pub(crate) use debug_assert_low_water_crossing;
