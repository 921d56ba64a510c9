//! Tolerance-based floating point comparisons.
//!
//! Coordinates and zoom scales accumulate rounding error as they pass through
//! scroll/zoom arithmetic, so every threshold decision in this crate goes
//! through these helpers instead of raw `<` / `==`. Only [`is_less`] and
//! [`is_equal`] define the tolerance; everything else is derived from them so
//! the comparators can never disagree with each other.

/// Comparison tolerance shared by all helpers.
pub const EPSILON: f64 = 1e-5;

/// Returns true if `a` is less than `b` beyond the tolerance.
pub fn is_less(a: f64, b: f64) -> bool {
    b - a > EPSILON
}

/// Returns true if `a` and `b` are equal within the tolerance.
pub fn is_equal(a: f64, b: f64) -> bool {
    (a - b).abs() <= EPSILON
}

/// Returns true if `a` is less than or equal to `b` within the tolerance.
pub fn is_less_or_equal(a: f64, b: f64) -> bool {
    is_less(a, b) || is_equal(a, b)
}

/// Returns true if `a` is greater than `b` beyond the tolerance.
pub fn is_greater(a: f64, b: f64) -> bool {
    is_less(b, a)
}

/// Returns true if `a` is greater than or equal to `b` within the tolerance.
pub fn is_greater_or_equal(a: f64, b: f64) -> bool {
    is_less_or_equal(b, a)
}

/// Returns true if `a` is zero within the tolerance.
pub fn is_zero(a: f64) -> bool {
    is_equal(a, 0.0)
}

/// Returns true if `a` is positive beyond the tolerance.
pub fn is_positive(a: f64) -> bool {
    is_greater(a, 0.0)
}

/// Returns true if `a` is negative beyond the tolerance.
pub fn is_negative(a: f64) -> bool {
    is_less(a, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_within_tolerance_compare_equal() {
        assert!(is_equal(1.0, 1.0));
        assert!(is_equal(1.0, 1.0 + 1e-6));
        assert!(is_equal(1.0, 1.0 - 1e-6));
        assert!(!is_equal(1.0, 1.0 + 1e-4));
    }

    #[test]
    fn less_requires_difference_beyond_tolerance() {
        assert!(is_less(1.0, 1.1));
        assert!(!is_less(1.0, 1.0 + 1e-6));
        assert!(!is_less(1.1, 1.0));
    }

    #[test]
    fn derived_comparators_agree_at_the_boundary() {
        // A difference inside the tolerance is "equal": not less, not greater.
        let a = 2.0;
        let b = 2.0 + 1e-6;
        assert!(is_less_or_equal(a, b));
        assert!(is_greater_or_equal(a, b));
        assert!(!is_greater(a, b));
        assert!(!is_less(a, b));
    }

    #[test]
    fn zero_variants_follow_the_tolerance() {
        assert!(is_zero(0.0));
        assert!(is_zero(1e-6));
        assert!(is_positive(1e-4));
        assert!(!is_positive(1e-6));
        assert!(is_negative(-1e-4));
        assert!(!is_negative(-1e-6));
    }
}
