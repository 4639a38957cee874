//! Deterministic float ordering.
//!
//! Time stamps and coordinates are sorted in several places. Sorting with
//! `partial_cmp` would panic or shuffle on NaN, so everything goes through
//! [`stable_total_cmp_f64`].

use core::cmp::Ordering;

/// Canonicalize a floating-point value for deterministic ordering.
///
/// Rules:
/// - `-0.0` becomes `0.0`
/// - all NaNs become a single canonical NaN
pub fn canonical_f64(v: f64) -> f64 {
    if v == 0.0 {
        0.0
    } else if v.is_nan() {
        f64::NAN
    } else {
        v
    }
}

/// Total ordering for floats; NaN sorts after `+inf`.
pub fn stable_total_cmp_f64(a: f64, b: f64) -> Ordering {
    canonical_f64(a).total_cmp(&canonical_f64(b))
}

/// Smaller of two values under [`stable_total_cmp_f64`].
pub fn stable_min(a: f64, b: f64) -> f64 {
    if stable_total_cmp_f64(b, a) == Ordering::Less {
        b
    } else {
        a
    }
}

/// Larger of two values under [`stable_total_cmp_f64`], ignoring NaN.
pub fn stable_max(a: f64, b: f64) -> f64 {
    if b.is_nan() {
        return a;
    }
    if a.is_nan() || stable_total_cmp_f64(b, a) == Ordering::Greater {
        b
    } else {
        a
    }
}
