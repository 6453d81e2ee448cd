//! Natural-order comparator for rack identifiers.
//!
//! Splits a string into a non-digit prefix and a trailing run of decimal
//! digits, then compares the digit runs numerically so that `R2` sorts
//! before `R10`. Falls back to lexicographic comparison when either side
//! has no trailing digits, and always tie-breaks on the full string so the
//! order stays total.

use std::cmp::Ordering;

/// Splits `s` into `(prefix, digits)` where `digits` is the longest
/// trailing run of ASCII digits (possibly empty).
fn split_trailing_digits(s: &str) -> (&str, &str) {
    let split_at = s
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    s.split_at(split_at)
}

/// Compares two digit runs numerically, ignoring leading zeros.
fn cmp_numeric(a: &str, b: &str) -> Ordering {
    let a_trimmed = a.trim_start_matches('0');
    let b_trimmed = b.trim_start_matches('0');
    a_trimmed
        .len()
        .cmp(&b_trimmed.len())
        .then_with(|| a_trimmed.cmp(b_trimmed))
}

/// Total order on nonempty strings: numeric trailing-digit comparison with
/// lexicographic fallback and a full-string tie-break.
pub fn compare(a: &str, b: &str) -> Ordering {
    let (prefix_a, digits_a) = split_trailing_digits(a);
    let (prefix_b, digits_b) = split_trailing_digits(b);
    if !digits_a.is_empty() && !digits_b.is_empty() {
        prefix_a
            .cmp(prefix_b)
            .then_with(|| cmp_numeric(digits_a, digits_b))
            .then_with(|| a.cmp(b))
    } else {
        a.cmp(b)
    }
}

/// Returns the two inputs ordered `(lo, hi)` by [`compare`].
pub fn order_pair<'a>(a: &'a str, b: &'a str) -> (&'a str, &'a str) {
    if compare(a, b) == Ordering::Greater {
        (b, a)
    } else {
        (a, b)
    }
}

/// Sorts `items` in place by natural order, keyed by `key`.
pub fn sort_by_key<T>(items: &mut [T], key: impl Fn(&T) -> &str) {
    items.sort_by(|a, b| compare(key(a), key(b)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_suffix_beats_lexicographic() {
        assert_eq!(compare("R2", "R10"), Ordering::Less);
        assert_eq!(compare("R10", "R2"), Ordering::Greater);
    }

    #[test]
    fn leading_zeros_do_not_change_numeric_value_but_tie_break_does() {
        // "R01" and "R1" carry the same numeric suffix (1), so the
        // full-string lexicographic tie-break decides between them.
        assert_eq!(compare("R01", "R1"), "R01".cmp("R1"));
    }

    #[test]
    fn no_digit_suffix_falls_back_to_lexicographic() {
        assert_eq!(compare("RackA", "RackB"), Ordering::Less);
    }

    #[test]
    fn one_sided_digit_suffix_falls_back_to_lexicographic() {
        // "Rack" has no trailing digits, so comparison isn't numeric at all.
        assert_eq!(compare("R2", "Rack"), "R2".cmp("Rack"));
    }

    #[test]
    fn equal_strings_are_equal() {
        assert_eq!(compare("R10", "R10"), Ordering::Equal);
    }

    #[test]
    fn order_pair_orders_lo_hi() {
        assert_eq!(order_pair("R10", "R2"), ("R2", "R10"));
        assert_eq!(order_pair("R2", "R10"), ("R2", "R10"));
    }

    #[test]
    fn sort_by_key_orders_naturally() {
        let mut v = vec!["R10".to_string(), "R2".to_string(), "R1".to_string()];
        sort_by_key(&mut v, |s| s.as_str());
        assert_eq!(v, vec!["R1", "R2", "R10"]);
    }
}
