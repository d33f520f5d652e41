//! Operator dispatch
//!
//! Every operator reads its operands with [`Stack::peek`](crate::Stack::peek),
//! checks its preconditions, and only then commits with `replace`, `push`
//! or `drop_top`. A failing operator therefore leaves the stack exactly as
//! it found it.
//!
//! Functions that can leave their domain are passed through [`checked`]:
//! a NaN produced from non-NaN operands, or an infinity produced from
//! finite ones, is a [`CalcError::DomainError`] naming the operator.

use crate::calculator::Calculator;
use crate::config::AngleMode;
use crate::error::{CalcError, CalcResult};
use crate::ops::Op;
use crate::stats;

impl Calculator {
    /// Apply one operator to the calculator state
    pub fn apply(&mut self, op: Op) -> CalcResult<()> {
        match op {
            // =================================================================
            // Stack and state
            // =================================================================
            Op::Clear => {
                self.clear();
                Ok(())
            }
            Op::AllClear => {
                self.all_clear();
                Ok(())
            }
            Op::Decimal => self.set_base(10),
            Op::Hexadecimal => self.set_base(16),
            Op::Binary => self.set_base(2),
            Op::Dup => self.stack.dup(),
            Op::Swap => self.stack.swap(),
            Op::Rot => {
                self.stack.rot();
                Ok(())
            }
            Op::Drop => self.stack.drop_top(),
            Op::Depth => self.stack.push(self.stack.depth() as f64),
            Op::SetBase => {
                // The operand is consumed even when the base is rejected
                let x = self.stack.pop()?;
                self.set_base(x as i64)
            }
            Op::SetPrecision => {
                let x = self.stack.pop()?;
                self.set_precision(x as i64);
                Ok(())
            }
            Op::QueryBase => self.stack.push(f64::from(self.base())),
            Op::QueryPrecision => self.stack.push(f64::from(self.precision())),
            Op::QuerySignificant => self.stack.push(f64::from(self.significant_digits())),

            // =================================================================
            // Memory
            // =================================================================
            Op::Store => {
                self.memory = self.stack.pop()?;
                Ok(())
            }
            Op::Recall => self.stack.push(self.memory),
            Op::MemoryAdd => {
                self.memory += self.stack.pop()?;
                Ok(())
            }
            Op::MemoryExchange => {
                let x = self.stack.peek(0)?;
                self.stack.replace(1, self.memory)?;
                self.memory = x;
                Ok(())
            }

            // =================================================================
            // Arithmetic
            // =================================================================
            Op::Add => self.binary(|y, x| y + x),
            Op::Subtract => self.binary(|y, x| y - x),
            Op::Multiply => self.binary(|y, x| y * x),
            Op::Divide => {
                let (y, x) = self.operands()?;
                require_divisor(op, x)?;
                self.stack.replace(2, y / x)
            }
            Op::IntDivide => self.integer_binary(op, |i, j| {
                if j == 0 { None } else { i.checked_div(j) }
            }),
            Op::Modulo => self.integer_binary(op, |i, j| {
                if j == 0 { None } else { i.checked_rem(j) }
            }),
            Op::FloatModulo => self.checked_binary(op, |y, x| y % x),
            Op::Power => self.checked_binary(op, f64::powf),
            Op::Inverse => {
                let x = self.stack.peek(0)?;
                require_divisor(op, x)?;
                self.stack.replace(1, 1.0 / x)
            }
            Op::Square => self.unary(|x| x * x),
            Op::SquareRoot => self.checked_unary(op, f64::sqrt),
            Op::Factorial => {
                let x = self.stack.peek(0)?;
                let f = factorial(x).ok_or(CalcError::DomainError(op.spelling()))?;
                self.stack.replace(1, f)
            }
            Op::Negate => self.unary(|x| -x),
            Op::Abs => self.unary(f64::abs),
            Op::Round => self.unary(f64::round),
            Op::Floor => self.unary(f64::floor),
            Op::Ceil => self.unary(f64::ceil),

            // =================================================================
            // Bitwise on rounded operands
            // =================================================================
            Op::ShiftRight => self.integer_binary(op, |i, j| shift_count(j).map(|n| i >> n)),
            Op::ShiftLeft => self.integer_binary(op, |i, j| shift_count(j).map(|n| i << n)),
            Op::BitOr => self.integer_binary(op, |i, j| Some(i | j)),
            Op::BitAnd => self.integer_binary(op, |i, j| Some(i & j)),
            Op::BitNot => {
                let x = self.stack.peek(0)?;
                let i = to_integer(x).ok_or(CalcError::DomainError(op.spelling()))?;
                self.stack.replace(1, !i as f64)
            }

            // =================================================================
            // Transcendental
            // =================================================================
            Op::Sin => self.trig(f64::sin),
            Op::Cos => self.trig(f64::cos),
            Op::Tan => self.trig(f64::tan),
            Op::Sinh => self.checked_unary(op, f64::sinh),
            Op::Cosh => self.checked_unary(op, f64::cosh),
            Op::Tanh => self.checked_unary(op, f64::tanh),
            Op::Asin => self.inverse_trig(op, f64::asin),
            Op::Acos => self.inverse_trig(op, f64::acos),
            Op::Atan => self.inverse_trig(op, f64::atan),
            Op::Atan2 => {
                let (y, x) = self.operands()?;
                let angle = self.angle_out(y.atan2(x));
                self.stack.replace(2, angle)
            }
            Op::Exp => self.checked_unary(op, f64::exp),
            Op::Ln => self.checked_unary(op, f64::ln),
            Op::Log10 => self.checked_unary(op, f64::log10),
            Op::LogN => {
                let (y, x) = self.operands()?;
                if y <= 0.0 || x <= 0.0 {
                    return Err(CalcError::DomainError(op.spelling()));
                }
                let val = checked(op, &[y, x], y.ln() / x.ln())?;
                self.stack.replace(2, val)
            }

            // =================================================================
            // Angles, coordinates and units
            // =================================================================
            Op::Radians => {
                self.angle_mode = AngleMode::Radians;
                Ok(())
            }
            Op::Degrees => {
                self.angle_mode = AngleMode::Degrees;
                Ok(())
            }
            Op::ToDegrees => self.unary(f64::to_degrees),
            Op::ToRadians => self.unary(f64::to_radians),
            Op::ToFahrenheit => self.unary(|c| 9.0 / 5.0 * c + 32.0),
            Op::ToCelsius => self.unary(|f| 5.0 / 9.0 * (f - 32.0)),
            Op::ToRectangular => {
                let (r, theta) = self.operands()?;
                let theta = self.angle_in(theta);
                self.stack.discard(2)?;
                self.stack.push(r * theta.cos())?;
                self.stack.push(r * theta.sin())
            }
            Op::ToPolar => {
                let (x, y) = self.operands()?;
                let theta = self.angle_out(y.atan2(x));
                self.stack.discard(2)?;
                self.stack.push((x * x + y * y).sqrt())?;
                self.stack.push(theta)
            }
            Op::MileToMeter => self.stack.push(self.conversions.mile_to_meter),
            Op::FootToMeter => self.stack.push(self.conversions.foot_to_meter),
            Op::InchToMillimeter => self.stack.push(self.conversions.inch_to_millimeter),

            // =================================================================
            // Statistics over the live stack
            // =================================================================
            Op::Average => {
                let avg = stats::mean(self.stack.as_slice()).ok_or(CalcError::StackEmpty)?;
                self.stack.push(avg)
            }
            Op::StdDev => {
                if self.stack.is_empty() {
                    return Err(CalcError::StackEmpty);
                }
                self.stack.push(stats::sample_stddev(self.stack.as_slice()))
            }

            // =================================================================
            // Accumulated statistics
            // =================================================================
            Op::StatPairs => {
                let values = self.stack.as_slice();
                if values.is_empty() || values.len() % 2 != 0 {
                    return Err(CalcError::Imbalanced);
                }
                for pair in values.chunks_exact(2) {
                    self.stats.add_point(pair[0], pair[1]);
                }
                self.stack.clear();
                Ok(())
            }
            Op::StatSingles => {
                if self.stack.is_empty() {
                    return Err(CalcError::StackEmpty);
                }
                for &y in self.stack.as_slice() {
                    self.stats.add_single(y);
                }
                self.stack.clear();
                Ok(())
            }
            Op::StatCount => self.stack.push(self.stats.n),
            Op::SumX => self.stack.push(self.stats.sum_x),
            Op::SumY => self.stack.push(self.stats.sum_y),
            Op::SumXX => self.stack.push(self.stats.sum_xx),
            Op::SumYY => self.stack.push(self.stats.sum_yy),
            Op::SumXY => self.stack.push(self.stats.sum_xy),
            Op::MeanX => {
                let mean = self.stats.mean_x().ok_or(CalcError::DomainError(op.spelling()))?;
                self.stack.push(mean)
            }
            Op::MeanY => {
                let mean = self.stats.mean_y().ok_or(CalcError::DomainError(op.spelling()))?;
                self.stack.push(mean)
            }
            Op::StdDevX => self.push_derived(op, |s| s.stddev_x()),
            Op::StdDevY => self.push_derived(op, |s| s.stddev_y()),
            Op::RegressionA => self.push_derived(op, |s| s.slope()),
            Op::RegressionB => self.push_derived(op, |s| s.intercept()),
            Op::Correlation => self.push_derived(op, |s| s.correlation()),

            // =================================================================
            // Constants and time
            // =================================================================
            Op::Pi => self.stack.push(self.constants.pi),
            Op::E => self.stack.push(self.constants.e),
            Op::SpeedOfLight => self.stack.push(self.constants.speed_of_light),
            Op::Time => {
                self.require_room()?;
                let now = self.clock.now();
                self.stack.push(now)
            }

            // =================================================================
            // Random variates
            // =================================================================
            Op::SetUniform => {
                let (a, b) = self.operands()?;
                self.stack.discard(2)?;
                self.random.set_uniform(a, b);
                Ok(())
            }
            Op::SetNormal => {
                let (mean, sd) = self.operands()?;
                self.stack.discard(2)?;
                self.random.set_normal(mean, sd);
                Ok(())
            }
            Op::SetExponential => {
                let sd = self.stack.pop()?;
                self.random.set_exponential(sd);
                Ok(())
            }
            Op::Uniform => {
                self.require_room()?;
                let v = self.random.uniform();
                self.stack.push(v)
            }
            Op::Normal => {
                self.require_room()?;
                let v = self.random.normal();
                self.stack.push(v)
            }
            Op::Exponential => {
                self.require_room()?;
                let v = self.random.exponential();
                self.stack.push(v)
            }
        }
    }

    // =========================================================================
    // Operand helpers
    // =========================================================================

    /// (Y, X): the value below the top and the top itself
    fn operands(&self) -> CalcResult<(f64, f64)> {
        let x = self.stack.peek(0)?;
        let y = self.stack.peek(1)?;
        Ok((y, x))
    }

    fn unary(&mut self, f: impl FnOnce(f64) -> f64) -> CalcResult<()> {
        let x = self.stack.peek(0)?;
        self.stack.replace(1, f(x))
    }

    fn binary(&mut self, f: impl FnOnce(f64, f64) -> f64) -> CalcResult<()> {
        let (y, x) = self.operands()?;
        self.stack.replace(2, f(y, x))
    }

    fn checked_unary(&mut self, op: Op, f: impl FnOnce(f64) -> f64) -> CalcResult<()> {
        let x = self.stack.peek(0)?;
        let val = checked(op, &[x], f(x))?;
        self.stack.replace(1, val)
    }

    fn checked_binary(&mut self, op: Op, f: impl FnOnce(f64, f64) -> f64) -> CalcResult<()> {
        let (y, x) = self.operands()?;
        let val = checked(op, &[y, x], f(y, x))?;
        self.stack.replace(2, val)
    }

    /// Round both operands to integers; an operand out of `i64` range or
    /// `None` from `f` is a domain error
    fn integer_binary(&mut self, op: Op, f: impl FnOnce(i64, i64) -> Option<i64>) -> CalcResult<()> {
        let (y, x) = self.operands()?;
        let val = to_integer(y)
            .zip(to_integer(x))
            .and_then(|(i, j)| f(i, j))
            .ok_or(CalcError::DomainError(op.spelling()))?;
        self.stack.replace(2, val as f64)
    }

    /// Forward trig: the operand is in the current angle unit
    fn trig(&mut self, f: impl FnOnce(f64) -> f64) -> CalcResult<()> {
        let x = self.stack.peek(0)?;
        let val = f(self.angle_in(x));
        self.stack.replace(1, val)
    }

    /// Inverse trig: the result is in the current angle unit
    fn inverse_trig(&mut self, op: Op, f: impl FnOnce(f64) -> f64) -> CalcResult<()> {
        let x = self.stack.peek(0)?;
        let val = checked(op, &[x], f(x))?;
        let angle = self.angle_out(val);
        self.stack.replace(1, angle)
    }

    /// Push a regression-derived value; needs at least two points
    fn push_derived(&mut self, op: Op, f: impl FnOnce(&stats::Statistics) -> f64) -> CalcResult<()> {
        if self.stats.n < 2.0 {
            return Err(CalcError::DomainError(op.spelling()));
        }
        let val = f(&self.stats);
        self.stack.push(val)
    }

    /// Fail before a collaborator is consulted for a value that cannot be pushed
    fn require_room(&self) -> CalcResult<()> {
        if self.stack.is_full() {
            return Err(CalcError::StackFull);
        }
        Ok(())
    }

    fn angle_in(&self, angle: f64) -> f64 {
        match self.angle_mode {
            AngleMode::Radians => angle,
            AngleMode::Degrees => angle.to_radians(),
        }
    }

    fn angle_out(&self, radians: f64) -> f64 {
        match self.angle_mode {
            AngleMode::Radians => radians,
            AngleMode::Degrees => radians.to_degrees(),
        }
    }
}

/// Reject a result that left the function's domain
fn checked(op: Op, operands: &[f64], result: f64) -> CalcResult<f64> {
    let nan_from_numbers = result.is_nan() && !operands.iter().any(|v| v.is_nan());
    let overflow = result.is_infinite() && operands.iter().all(|v| v.is_finite());
    if nan_from_numbers || overflow {
        return Err(CalcError::DomainError(op.spelling()));
    }
    Ok(result)
}

fn require_divisor(op: Op, x: f64) -> CalcResult<()> {
    if x.abs() > f64::MIN_POSITIVE {
        Ok(())
    } else {
        Err(CalcError::DomainError(op.spelling()))
    }
}

/// 2^63, the first magnitude past `i64::MAX`
const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;

/// Round half away from zero; `None` for NaN, infinities and values past `i64`
fn to_integer(x: f64) -> Option<i64> {
    let n = x.round();
    (n >= -I64_LIMIT && n < I64_LIMIT).then_some(n as i64)
}

fn shift_count(n: i64) -> Option<u32> {
    u32::try_from(n).ok().filter(|&n| n < i64::BITS)
}

/// x! for a non-negative integer x, `None` otherwise or on overflow
fn factorial(x: f64) -> Option<f64> {
    if !x.is_finite() {
        return None;
    }
    let n = x.round();
    if (x - n).abs() > f64::MIN_POSITIVE || n < 0.0 {
        return None;
    }
    let mut product = 1.0;
    let mut k = n;
    while k >= 2.0 {
        product *= k;
        if product.is_infinite() {
            return None;
        }
        k -= 1.0;
    }
    Some(product)
}
