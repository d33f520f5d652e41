//! RPN Core: a Reverse Polish Notation evaluator
//!
//! A [`Calculator`] keeps a bounded stack of doubles and evaluates lines of
//! whitespace-separated tokens against it. Tokens are operators (looked up
//! by exact spelling) or numeric literals in the current base, 2 to 36.
//! State persists between lines: stack, memory register, running
//! statistics, base, precision and angle mode.
//!
//! ```
//! use rpn_core::{Calculator, Outcome};
//!
//! let mut calc = Calculator::new(10).unwrap();
//! assert_eq!(calc.eval("5 2 /"), Outcome::Ok);
//! calc.set_precision(2);
//! assert_eq!(calc.format_stack().unwrap(), "2.5");
//! ```
//!
//! # Modules
//!
//! - `stack`: fixed-capacity value stack
//! - `radix`: base-N number parsing and formatting
//! - `stats`: running sums and least-squares regression
//! - `ops`: the operator vocabulary and its help text
//! - `dispatch`: what each operator does
//! - `calculator`: calculator state and the line evaluator
//! - `collaborators`: random-variate and clock seams
//! - `config`: TOML configuration with embedded defaults
//! - `error`: the error taxonomy

pub mod calculator;
pub mod collaborators;
pub mod config;
mod dispatch;
pub mod error;
pub mod ops;
pub mod radix;
pub mod stack;
pub mod stats;

pub use calculator::{Calculator, Outcome};
pub use collaborators::{Clock, RandomVariates, SystemClock, VariateSet};
pub use config::{AngleMode, CalcConfig, Constants, Conversions, RandomDefaults};
pub use error::{CalcError, CalcResult};
pub use ops::{OPERATORS, Op, OpInfo};
pub use stack::{DEFAULT_STACK_CAPACITY, MAX_STACK_CAPACITY, Stack};
pub use stats::Statistics;
