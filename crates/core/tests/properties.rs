//! Property-based tests for the number codec and the stack
//!
//! Uses proptest to check invariants across generated bases, precisions
//! and values.

use proptest::prelude::*;
use rpn_core::Stack;
use rpn_core::radix::{self, MAX_BASE, MIN_BASE};

/// A base together with a precision it can carry
fn base_and_precision() -> impl Strategy<Value = (u32, u32)> {
    (MIN_BASE..=MAX_BASE).prop_flat_map(|base| (Just(base), 0..=radix::significant_digits(base)))
}

proptest! {
    /// Formatting then parsing lands within half a unit in the last place.
    ///
    /// Integer digits consume precision, so the bound is checked on values
    /// with no integer part.
    #[test]
    fn prop_fraction_round_trip(
        (base, precision) in base_and_precision(),
        x in -0.999_999f64..0.999_999,
    ) {
        let text = radix::format(x, base, precision as i32).unwrap();
        let back = radix::parse(&text, base).unwrap();
        let tolerance = 0.5 * f64::from(base).powi(-(precision as i32)) + 1e-12;
        prop_assert!(
            (back - x).abs() <= tolerance,
            "{} -> '{}' -> {} in base {} at precision {}",
            x, text, back, base, precision
        );
    }

    /// Whole numbers survive a round trip exactly at any precision
    #[test]
    fn prop_integer_round_trip(
        (base, precision) in base_and_precision(),
        n in any::<i32>(),
    ) {
        let x = f64::from(n);
        let text = radix::format(x, base, precision as i32).unwrap();
        prop_assert_eq!(radix::parse(&text, base).unwrap(), x, "'{}' in base {}", text, base);
    }

    /// Formatted output only uses characters the parser accepts
    #[test]
    fn prop_format_uses_base_digits(
        (base, precision) in base_and_precision(),
        x in -1.0e6f64..1.0e6,
    ) {
        let text = radix::format(x, base, precision as i32).unwrap();
        for c in text.bytes() {
            prop_assert!(
                c == b'-' || c == b'.' || radix::digit_value(c, base).is_some(),
                "'{}' has a stray byte for base {}",
                text, base
            );
        }
        prop_assert!(!text.ends_with('.'));
    }

    /// Push then pop returns the value and restores the depth
    #[test]
    fn prop_push_pop_round_trip(
        prefix in prop::collection::vec(any::<f64>(), 0..8),
        val in any::<f64>(),
    ) {
        let mut stack = Stack::new(8).unwrap();
        for v in &prefix {
            stack.push(*v).unwrap();
        }
        let depth = stack.depth();
        if stack.is_full() {
            prop_assert!(stack.push(val).is_err());
        } else {
            stack.push(val).unwrap();
            let popped = stack.pop().unwrap();
            prop_assert!(popped == val || (popped.is_nan() && val.is_nan()));
        }
        prop_assert_eq!(stack.depth(), depth);
    }

    /// Replace changes depth by one minus the number of operands taken
    #[test]
    fn prop_replace_depth(depth in 1usize..8, how_many in 0usize..4, val in any::<i32>()) {
        let mut stack = Stack::new(8).unwrap();
        for i in 0..depth {
            stack.push(i as f64).unwrap();
        }
        let result = stack.replace(how_many, f64::from(val));
        if how_many > depth {
            prop_assert!(result.is_err());
            prop_assert_eq!(stack.depth(), depth);
        } else {
            prop_assert!(result.is_ok());
            prop_assert_eq!(stack.depth(), depth + 1 - how_many);
            prop_assert_eq!(stack.peek(0).unwrap(), f64::from(val));
        }
    }
}
