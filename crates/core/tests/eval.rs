//! Whole-line evaluation tests
//!
//! These drive the calculator only through `eval`, the way a front end
//! does, and check the stack, the outcome and the formatted output.

use rpn_core::{CalcError, Calculator, Clock, Outcome, RandomVariates};
use std::cell::Cell;
use std::rc::Rc;

fn calc() -> Calculator {
    Calculator::new(10).unwrap()
}

/// Deterministic generators that record the parameters they were given
#[derive(Default)]
struct ScriptedRandom {
    params: Rc<Cell<(f64, f64)>>,
    draws: f64,
}

impl RandomVariates for ScriptedRandom {
    fn set_uniform(&mut self, a: f64, b: f64) {
        self.params.set((a, b));
    }

    fn set_normal(&mut self, mean: f64, sd: f64) {
        self.params.set((mean, sd));
    }

    fn set_exponential(&mut self, sd: f64) {
        self.params.set((sd, 0.0));
    }

    fn uniform(&mut self) -> f64 {
        self.draws += 1.0;
        self.draws
    }

    fn normal(&mut self) -> f64 {
        -1.0
    }

    fn exponential(&mut self) -> f64 {
        0.25
    }
}

struct FixedClock(f64);

impl Clock for FixedClock {
    fn now(&self) -> f64 {
        self.0
    }
}

#[test]
fn test_divide_formats_at_precision() {
    let mut c = calc();
    assert_eq!(c.eval("2 =prec 5.0 2.0 /"), Outcome::Ok);
    assert_eq!(c.format_stack().unwrap(), "2.5");
}

#[test]
fn test_divide_by_zero_keeps_operands() {
    let mut c = calc();
    assert_eq!(c.eval("5 0 /"), Outcome::Error(CalcError::DomainError("/")));
    assert_eq!(c.stack().as_slice(), &[5.0, 0.0]);
}

#[test]
fn test_failed_line_keeps_prefix() {
    let mut c = calc();
    let outcome = c.eval("1 2 + 7 sto bogus 9 9");
    assert_eq!(outcome, Outcome::Error(CalcError::Unrecognized("bogus".to_string())));
    assert_eq!(c.stack().as_slice(), &[3.0]);
    assert_eq!(c.memory(), 7.0);
}

#[test]
fn test_base_change_applies_to_rest_of_line() {
    let mut c = calc();
    assert_eq!(c.eval("hex FF 10 +"), Outcome::Ok);
    assert_eq!(c.stack().as_slice(), &[271.0]);
    assert_eq!(c.format_stack().unwrap(), "10F");

    assert_eq!(c.eval("dec 10"), Outcome::Ok);
    assert_eq!(c.stack().as_slice(), &[271.0, 10.0]);
}

#[test]
fn test_uppercase_literal_is_not_an_operator() {
    let mut c = calc();
    assert_eq!(c.eval("hex DEC dec"), Outcome::Ok);
    assert_eq!(c.stack().as_slice(), &[3564.0]);
}

#[test]
fn test_binary_round_trip() {
    let mut c = calc();
    assert_eq!(c.eval("bin 1010 11 *"), Outcome::Ok);
    assert_eq!(c.format_stack().unwrap(), "11110");
    assert_eq!(c.pop(), Ok(30.0));
}

#[test]
fn test_help_and_quit_stop_the_line() {
    let mut c = calc();
    assert_eq!(c.eval("1 ? 2"), Outcome::Help);
    assert_eq!(c.stack().as_slice(), &[1.0]);
    assert_eq!(c.eval("3 q 4"), Outcome::Quit);
    assert_eq!(c.stack().as_slice(), &[1.0, 3.0]);
    // Only bare tokens count
    assert!(matches!(c.eval("?x"), Outcome::Error(_)));
}

#[test]
fn test_empty_and_blank_lines() {
    let mut c = calc();
    assert_eq!(c.eval(""), Outcome::Ok);
    assert_eq!(c.eval(" \t \r\n"), Outcome::Ok);
    assert_eq!(c.depth(), 0);
}

#[test]
fn test_state_persists_across_lines() {
    let mut c = calc();
    c.eval("3");
    c.eval("4");
    assert_eq!(c.eval("*"), Outcome::Ok);
    assert_eq!(c.pop(), Ok(12.0));
}

#[test]
fn test_regression_from_pairs() {
    let mut c = calc();
    assert_eq!(c.eval("1 2 3 4 stat"), Outcome::Ok);
    assert_eq!(c.depth(), 0);
    assert_eq!(c.eval("n sx sy sxy a b r"), Outcome::Ok);
    let values = c.stack().as_slice().to_vec();
    assert_eq!(&values[..4], &[2.0, 4.0, 6.0, 14.0]);
    for v in &values[4..] {
        assert!((v - 1.0).abs() < 1e-12, "{:?}", values);
    }
}

#[test]
fn test_singles_extend_pairs() {
    let mut c = calc();
    assert_eq!(c.eval("10 20 30 xstat n sx"), Outcome::Ok);
    assert_eq!(c.stack().as_slice(), &[3.0, 3.0]);
    assert_eq!(c.eval("c 40 xstat sx a b"), Outcome::Ok);
    assert_eq!(c.stack().as_slice(), &[6.0, 10.0, 10.0]);
}

#[test]
fn test_stats_survive_clear_but_not_all_clear() {
    let mut c = calc();
    c.eval("1 2 3 5 stat 42 c n");
    assert_eq!(c.stack().as_slice(), &[2.0]);
    c.eval("ac n");
    assert_eq!(c.stack().as_slice(), &[0.0]);
}

#[test]
fn test_precision_survives_base_round_trip() {
    let mut c = calc();
    assert_eq!(c.eval("14 =prec hex ?prec dec ?prec"), Outcome::Ok);
    assert_eq!(c.stack().as_slice(), &[13.0, 14.0]);

    let mut c = calc();
    assert_eq!(c.eval("20 =prec hex ?prec dec ?prec"), Outcome::Ok);
    assert_eq!(c.stack().as_slice(), &[13.0, 15.0]);
}

#[test]
fn test_rot_moves_bottom_to_top() {
    let mut c = calc();
    assert_eq!(c.eval("1 2 3 rot"), Outcome::Ok);
    assert_eq!(c.stack().as_slice(), &[2.0, 3.0, 1.0]);
}

#[test]
fn test_stack_operator_errors() {
    let mut c = calc();
    assert_eq!(c.eval("dup"), Outcome::Error(CalcError::StackEmpty));
    assert_eq!(c.eval("1 swap"), Outcome::Error(CalcError::Underflow));
    assert_eq!(c.eval("+"), Outcome::Error(CalcError::Underflow));
    assert_eq!(c.eval("drop drop"), Outcome::Error(CalcError::StackEmpty));

    let mut full = Calculator::new(2).unwrap();
    assert_eq!(full.eval("1 dup dup"), Outcome::Error(CalcError::StackFull));
    assert_eq!(full.stack().as_slice(), &[1.0, 1.0]);
}

#[test]
fn test_nan_operand_is_a_domain_error() {
    // 1e309 overflows to inf, and inf - inf is NaN
    let mut c = calc();
    assert_eq!(
        c.eval("10 308 pow 10 * dup - !"),
        Outcome::Error(CalcError::DomainError("!"))
    );
    assert_eq!(c.depth(), 1);

    let mut c = calc();
    assert_eq!(
        c.eval("10 308 pow 10 * dup - 2 mod"),
        Outcome::Error(CalcError::DomainError("mod"))
    );
    assert_eq!(c.depth(), 2);
}

#[test]
fn test_exponent_digits_are_ignored() {
    let mut c = calc();
    assert_eq!(c.eval("1.2e4"), Outcome::Ok);
    assert_eq!(c.pop(), Ok(1.2));
    assert!(matches!(c.eval("1e-4"), Outcome::Error(CalcError::ParseError(_))));
}

#[test]
fn test_negative_literals_and_negate() {
    let mut c = calc();
    assert_eq!(c.eval("-3 +- -.5 -+ +"), Outcome::Ok);
    assert_eq!(c.pop(), Ok(3.5));
}

#[test]
fn test_injected_random_generators() {
    let params = Rc::new(Cell::new((0.0, 0.0)));
    let random = ScriptedRandom {
        params: Rc::clone(&params),
        draws: 0.0,
    };
    let mut c = calc().with_random(random);

    assert_eq!(c.eval("3 8 =urand"), Outcome::Ok);
    assert_eq!(params.get(), (3.0, 8.0));
    assert_eq!(c.eval("100 15 =nrand"), Outcome::Ok);
    assert_eq!(params.get(), (100.0, 15.0));
    assert_eq!(c.eval("2 =erand"), Outcome::Ok);
    assert_eq!(params.get(), (2.0, 0.0));
    assert_eq!(c.depth(), 0);

    assert_eq!(c.eval("urand urand nrand erand"), Outcome::Ok);
    assert_eq!(c.stack().as_slice(), &[1.0, 2.0, -1.0, 0.25]);
}

#[test]
fn test_injected_clock() {
    let mut c = calc().with_clock(FixedClock(1_700_000_000.5));
    assert_eq!(c.eval("time"), Outcome::Ok);
    assert_eq!(c.pop(), Ok(1_700_000_000.5));
}

#[test]
fn test_default_random_is_reproducible() {
    let mut a = calc();
    let mut b = calc();
    a.eval("urand nrand erand");
    b.eval("urand nrand erand");
    assert_eq!(a.stack().as_slice(), b.stack().as_slice());
}

#[test]
fn test_eval_once() {
    assert_eq!(Calculator::eval_once("2 10 ^"), Ok(1024.0));
    assert_eq!(
        Calculator::eval_once("1 0 /"),
        Err(CalcError::DomainError("/"))
    );
}

#[test]
fn test_caller_supplied_buffer() {
    let mut c = Calculator::from_buffer([0.0; 3]).unwrap();
    assert_eq!(c.eval("1 2 3 4"), Outcome::Error(CalcError::StackFull));
    assert_eq!(c.depth(), 3);
    assert_eq!(
        Calculator::from_buffer(Vec::<f64>::new()).unwrap_err(),
        CalcError::InvalidCapacity(0)
    );
}
