//! Calculator state and the line evaluator
//!
//! A [`Calculator`] owns everything one evaluation session needs: the value
//! stack, the memory register, the statistics sums, the number base and
//! precision, the angle mode, and its random and clock collaborators. State
//! persists across [`Calculator::eval`] calls, so a caller can feed partial
//! expressions line by line and pop the result at the end.
//!
//! # Line evaluation
//!
//! Each whitespace-separated token is first looked up as an operator and
//! otherwise parsed as a number in the *current* base. A base change takes
//! effect for the very next token on the same line. The first failing token
//! stops the line; everything before it stays applied.

use crate::collaborators::{Clock, RandomVariates, SystemClock, VariateSet};
use crate::config::{AngleMode, CalcConfig, Constants, Conversions};
use crate::error::{CalcError, CalcResult};
use crate::ops::Op;
use crate::radix;
use crate::stack::{DEFAULT_STACK_CAPACITY, Stack};
use crate::stats::Statistics;
use tracing::{debug, trace};

/// Result of evaluating one line
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Every token was consumed
    Ok,
    /// A token failed; the tokens before it were applied
    Error(CalcError),
    /// A bare `?` was reached
    Help,
    /// A bare `q` was reached
    Quit,
}

pub struct Calculator {
    pub(crate) stack: Stack,
    pub(crate) memory: f64,
    pub(crate) stats: Statistics,
    base: u32,
    sig_digits: u32,
    requested_precision: i64,
    precision: u32,
    pub(crate) angle_mode: AngleMode,
    pub(crate) constants: Constants,
    pub(crate) conversions: Conversions,
    pub(crate) random: Box<dyn RandomVariates>,
    pub(crate) clock: Box<dyn Clock>,
}

impl std::fmt::Debug for Calculator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Calculator")
            .field("stack", &self.stack.as_slice())
            .field("memory", &self.memory)
            .field("stats", &self.stats)
            .field("base", &self.base)
            .field("precision", &self.precision)
            .field("angle_mode", &self.angle_mode)
            .finish_non_exhaustive()
    }
}

impl Calculator {
    /// Calculator with `capacity` stack slots and default settings
    pub fn new(capacity: usize) -> CalcResult<Self> {
        Self::build(Stack::new(capacity)?, &CalcConfig::default())
    }

    /// Calculator whose stack lives in `buffer`; its length is the capacity
    pub fn from_buffer(buffer: impl Into<Box<[f64]>>) -> CalcResult<Self> {
        Self::build(Stack::from_buffer(buffer)?, &CalcConfig::default())
    }

    /// Calculator configured from `config`
    pub fn with_config(config: &CalcConfig) -> CalcResult<Self> {
        config.validate()?;
        Self::build(Stack::new(config.stack_capacity)?, config)
    }

    fn build(stack: Stack, config: &CalcConfig) -> CalcResult<Self> {
        let random = &config.random;
        let mut calc = Calculator {
            stack,
            memory: 0.0,
            stats: Statistics::new(),
            base: 10,
            sig_digits: radix::significant_digits(10),
            requested_precision: 0,
            precision: 0,
            angle_mode: config.angle_mode,
            constants: config.constants,
            conversions: config.conversions,
            random: Box::new(VariateSet::new(
                (random.uniform[0], random.uniform[1]),
                (random.normal[0], random.normal[1]),
                random.exponential_sd,
            )),
            clock: Box::new(SystemClock),
        };
        calc.set_base(config.base)?;
        let precision = config
            .precision
            .unwrap_or_else(|| i64::from(calc.sig_digits));
        calc.set_precision(precision);
        Ok(calc)
    }

    /// Replace the random-variate collaborator
    pub fn with_random(mut self, random: impl RandomVariates + 'static) -> Self {
        self.random = Box::new(random);
        self
    }

    /// Replace the clock collaborator
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    // =========================================================================
    // State
    // =========================================================================

    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    pub fn push(&mut self, val: f64) -> CalcResult<()> {
        self.stack.push(val)
    }

    /// Pop the top value, typically the result of the last line
    pub fn pop(&mut self) -> CalcResult<f64> {
        self.stack.pop()
    }

    pub fn memory(&self) -> f64 {
        self.memory
    }

    pub fn statistics(&self) -> &Statistics {
        &self.stats
    }

    pub fn angle_mode(&self) -> AngleMode {
        self.angle_mode
    }

    pub fn set_angle_mode(&mut self, mode: AngleMode) {
        self.angle_mode = mode;
    }

    /// Empty the stack; memory and statistics survive
    pub fn clear(&mut self) {
        self.stack.clear();
    }

    /// Empty the stack and reset memory and statistics. Base, precision and
    /// angle mode are kept.
    pub fn all_clear(&mut self) {
        self.stack.clear();
        self.memory = 0.0;
        self.stats.reset();
    }

    pub fn base(&self) -> u32 {
        self.base
    }

    /// Switch the number base. The requested precision is re-clamped to
    /// the new base's significant digits; the stack is untouched.
    pub fn set_base(&mut self, base: i64) -> CalcResult<()> {
        if !radix::is_valid_base(base) {
            return Err(CalcError::InvalidBase(base));
        }
        // Range-checked above
        self.base = base as u32;
        self.sig_digits = radix::significant_digits(self.base);
        self.precision = clamp_precision(self.requested_precision, self.sig_digits);
        debug!(base = self.base, precision = self.precision, "base changed");
        Ok(())
    }

    /// Effective precision: the requested one clamped to `0..=significant_digits`
    pub fn precision(&self) -> u32 {
        self.precision
    }

    pub fn requested_precision(&self) -> i64 {
        self.requested_precision
    }

    /// Record a requested precision. It is remembered as given and clamped
    /// again on every base change.
    pub fn set_precision(&mut self, precision: i64) {
        self.requested_precision = precision;
        self.precision = clamp_precision(precision, self.sig_digits);
        debug!(requested = precision, precision = self.precision, "precision changed");
    }

    /// Digits a double carries in the current base
    pub fn significant_digits(&self) -> u32 {
        self.sig_digits
    }

    // =========================================================================
    // Evaluation
    // =========================================================================

    /// Evaluate one line of tokens against the persistent state
    pub fn eval(&mut self, line: &str) -> Outcome {
        for token in line.split_whitespace() {
            match token {
                "?" => return Outcome::Help,
                "q" => return Outcome::Quit,
                _ => {}
            }
            if let Err(err) = self.eval_token(token) {
                debug!(token, error = %err, "line failed");
                return Outcome::Error(err);
            }
        }
        Outcome::Ok
    }

    fn eval_token(&mut self, token: &str) -> CalcResult<()> {
        if let Some(op) = Op::lookup(token) {
            trace!(token, ?op, depth = self.stack.depth(), "operator");
            return self.apply(op);
        }

        debug!(token, base = self.base, "not an operator, parsing as number");
        match radix::parse(token, self.base) {
            Ok(val) => self.stack.push(val),
            Err(err) if looks_numeric(token, self.base) => Err(err),
            Err(_) => Err(CalcError::Unrecognized(token.to_string())),
        }
    }

    /// Evaluate `line` on a fresh calculator and return the value left on top
    ///
    /// `?` and `q` have no meaning here and are reported as unrecognized.
    pub fn eval_once(line: &str) -> CalcResult<f64> {
        let mut calc = Calculator::new(DEFAULT_STACK_CAPACITY)?;
        match calc.eval(line) {
            Outcome::Ok => calc.pop(),
            Outcome::Error(err) => Err(err),
            Outcome::Help => Err(CalcError::Unrecognized("?".to_string())),
            Outcome::Quit => Err(CalcError::Unrecognized("q".to_string())),
        }
    }

    // =========================================================================
    // Output
    // =========================================================================

    /// Format `x` in the current base and precision
    pub fn format_value(&self, x: f64) -> CalcResult<String> {
        radix::format(x, self.base, self.precision as i32)
    }

    /// Live stack values, bottom first, separated by single spaces
    pub fn format_stack(&self) -> CalcResult<String> {
        let values = self
            .stack
            .as_slice()
            .iter()
            .map(|&v| self.format_value(v))
            .collect::<CalcResult<Vec<_>>>()?;
        Ok(values.join(" "))
    }
}

fn clamp_precision(requested: i64, sig_digits: u32) -> u32 {
    // Bounded by sig_digits, so the cast cannot truncate
    requested.clamp(0, i64::from(sig_digits)) as u32
}

/// Whether a failed literal still started like a number, so the caller gets
/// a parse error instead of "unrecognized"
fn looks_numeric(token: &str, base: u32) -> bool {
    token
        .bytes()
        .next()
        .is_some_and(|c| matches!(c, b'+' | b'-' | b'.') || radix::digit_value(c, base).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calc() -> Calculator {
        Calculator::new(10).unwrap()
    }

    #[test]
    fn test_defaults() {
        let c = calc();
        assert_eq!(c.base(), 10);
        assert_eq!(c.significant_digits(), 15);
        assert_eq!(c.precision(), 15);
        assert_eq!(c.angle_mode(), AngleMode::Radians);
        assert_eq!(c.depth(), 0);
    }

    #[test]
    fn test_precision_clamps() {
        let mut c = calc();
        c.set_precision(-3);
        assert_eq!(c.precision(), 0);
        c.set_precision(40);
        assert_eq!(c.precision(), 15);
        assert_eq!(c.requested_precision(), 40);
    }

    #[test]
    fn test_base_change_restores_requested_precision() {
        let mut c = calc();
        c.set_precision(14);
        c.set_base(16).unwrap();
        assert_eq!(c.precision(), 13);
        c.set_base(10).unwrap();
        assert_eq!(c.precision(), 14);
    }

    #[test]
    fn test_invalid_base_leaves_state() {
        let mut c = calc();
        assert_eq!(c.set_base(1), Err(CalcError::InvalidBase(1)));
        assert_eq!(c.set_base(37), Err(CalcError::InvalidBase(37)));
        assert_eq!(c.base(), 10);
    }

    #[test]
    fn test_clear_strengths() {
        let mut c = calc();
        assert_eq!(c.eval("5 sto 1 2 stat 3 4"), Outcome::Ok);
        c.set_base(16).unwrap();
        c.clear();
        assert_eq!(c.depth(), 0);
        assert_eq!(c.memory(), 5.0);
        assert_eq!(c.statistics().n, 1.0);

        c.push(1.0).unwrap();
        c.all_clear();
        assert_eq!(c.depth(), 0);
        assert_eq!(c.memory(), 0.0);
        assert_eq!(c.statistics().n, 0.0);
        assert_eq!(c.base(), 16);
    }

    #[test]
    fn test_literal_vs_unrecognized() {
        let mut c = calc();
        assert_eq!(
            c.eval("12G"),
            Outcome::Error(CalcError::ParseError("12G".to_string()))
        );
        assert_eq!(
            c.eval("bogus"),
            Outcome::Error(CalcError::Unrecognized("bogus".to_string()))
        );
    }

    #[test]
    fn test_literal_on_full_stack() {
        let mut c = Calculator::new(2).unwrap();
        assert_eq!(c.eval("1 2 3"), Outcome::Error(CalcError::StackFull));
        assert_eq!(c.stack().as_slice(), &[1.0, 2.0]);
    }

    #[test]
    fn test_format_stack() {
        let mut c = calc();
        assert_eq!(c.format_stack().unwrap(), "");
        c.eval("1.5 255 hex");
        assert_eq!(c.format_stack().unwrap(), "1.8 FF");
    }

    #[test]
    fn test_with_config() {
        let config = CalcConfig::from_toml("stack_capacity = 3\nbase = 2\nprecision = 4").unwrap();
        let c = Calculator::with_config(&config).unwrap();
        assert_eq!(c.stack().capacity(), 3);
        assert_eq!(c.base(), 2);
        assert_eq!(c.precision(), 4);
    }

    #[test]
    fn test_capacity_bounds() {
        assert_eq!(
            Calculator::new(usize::MAX).unwrap_err(),
            CalcError::InvalidCapacity(usize::MAX)
        );
        assert_eq!(Calculator::new(0).unwrap_err(), CalcError::InvalidCapacity(0));

        let config = CalcConfig {
            stack_capacity: usize::MAX,
            ..CalcConfig::default()
        };
        assert_eq!(
            Calculator::with_config(&config).unwrap_err(),
            CalcError::InvalidCapacity(usize::MAX)
        );
    }

    #[test]
    fn test_eval_once() {
        assert_eq!(Calculator::eval_once("2 3 +"), Ok(5.0));
        assert_eq!(Calculator::eval_once(""), Err(CalcError::StackEmpty));
        assert!(Calculator::eval_once("1 ?").is_err());
    }
}
