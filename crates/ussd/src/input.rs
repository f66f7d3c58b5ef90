//! Selection grammar for each stage.
//!
//! All parsers return `None` for anything outside their grammar; the machine
//! maps that to the stage's rejection message.

use std::collections::BTreeSet;

use pizzeria_orders::MAX_QUANTITY;

/// Reply at SELECT_TOPPINGS meaning "no toppings".
pub const NO_TOPPINGS: &str = "0";

fn parse_digits(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

/// 1-based position into a listing of `len` entries, returned 0-based.
pub fn listing_index(raw: &str, len: usize) -> Option<usize> {
    let n = parse_digits(raw)?;
    let n = usize::try_from(n).ok()?;
    if n == 0 || n > len {
        return None;
    }
    Some(n - 1)
}

/// Unit count in `1..=MAX_QUANTITY`.
pub fn quantity(raw: &str) -> Option<u32> {
    let n = u32::try_from(parse_digits(raw)?).ok()?;
    (1..=MAX_QUANTITY).contains(&n).then_some(n)
}

/// Comma-separated 1-based positions, returned 0-based and de-duplicated.
///
/// A lone `0` selects nothing. Any empty, non-numeric or out-of-range entry
/// rejects the whole selection.
pub fn topping_indices(raw: &str, len: usize) -> Option<BTreeSet<usize>> {
    if raw.trim() == NO_TOPPINGS {
        return Some(BTreeSet::new());
    }
    raw.split(',').map(|part| listing_index(part, len)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn listing_index_is_one_based_and_bounded() {
        assert_eq!(listing_index("1", 2), Some(0));
        assert_eq!(listing_index(" 2 ", 2), Some(1));
        assert_eq!(listing_index("0", 2), None);
        assert_eq!(listing_index("3", 2), None);
        assert_eq!(listing_index("99", 2), None);
        assert_eq!(listing_index("-1", 2), None);
        assert_eq!(listing_index("+1", 2), None);
        assert_eq!(listing_index("one", 2), None);
        assert_eq!(listing_index("", 2), None);
        assert_eq!(listing_index("1", 0), None);
    }

    #[test]
    fn quantity_must_be_positive_integer() {
        assert_eq!(quantity("2"), Some(2));
        assert_eq!(quantity(" 10"), Some(10));
        assert_eq!(quantity("0"), None);
        assert_eq!(quantity("-3"), None);
        assert_eq!(quantity("1.5"), None);
        assert_eq!(quantity("99999999999"), None);
        assert_eq!(quantity("abc"), None);
    }

    #[test]
    fn quantity_is_capped() {
        assert_eq!(quantity(&MAX_QUANTITY.to_string()), Some(MAX_QUANTITY));
        assert_eq!(quantity(&(MAX_QUANTITY + 1).to_string()), None);
        assert_eq!(quantity("2147483648"), None);
    }

    #[test]
    fn topping_indices_accept_lists_and_dedupe() {
        let got = topping_indices("1,2", 3).unwrap();
        assert_eq!(got.into_iter().collect::<Vec<_>>(), vec![0, 1]);

        let got = topping_indices(" 3 , 1, 3", 3).unwrap();
        assert_eq!(got.into_iter().collect::<Vec<_>>(), vec![0, 2]);
    }

    #[test]
    fn topping_indices_reject_any_bad_entry() {
        assert_eq!(topping_indices("1,4", 3), None);
        assert_eq!(topping_indices("1,,2", 3), None);
        assert_eq!(topping_indices("1,x", 3), None);
        assert_eq!(topping_indices("", 3), None);
        assert_eq!(topping_indices("0,1", 3), None);
    }

    #[test]
    fn lone_zero_means_no_toppings() {
        assert_eq!(topping_indices("0", 3), Some(BTreeSet::new()));
        assert_eq!(topping_indices(" 0 ", 0), Some(BTreeSet::new()));
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: every index accepted by `listing_index` lies inside the listing.
        #[test]
        fn accepted_indices_are_in_range(n in 0u64..10_000u64, len in 0usize..50usize) {
            match listing_index(&n.to_string(), len) {
                Some(i) => {
                    prop_assert!(i < len);
                    prop_assert_eq!(i as u64 + 1, n);
                }
                None => prop_assert!(n == 0 || n as usize > len),
            }
        }
    }
}
