//! Operator vocabulary
//!
//! Every operator has exactly one spelling, matched exactly and
//! case-sensitively against a whole token. Spellings are lowercase or
//! punctuation so they never collide with numeric literals, whose digits
//! above 9 are uppercase.
//!
//! The table also carries the one-line help shown by front ends. In the
//! help text X is the top of the stack and Y the value below it.

/// A named calculator operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    // Stack and state
    Clear,
    AllClear,
    Decimal,
    Hexadecimal,
    Binary,
    Dup,
    Swap,
    Rot,
    Drop,
    Depth,
    SetBase,
    SetPrecision,
    QueryBase,
    QueryPrecision,
    QuerySignificant,

    // Memory register
    Store,
    Recall,
    MemoryAdd,
    MemoryExchange,

    // Arithmetic
    Add,
    Subtract,
    Multiply,
    Divide,
    IntDivide,
    Modulo,
    FloatModulo,
    Power,
    Inverse,
    Square,
    SquareRoot,
    Factorial,
    Negate,
    Abs,
    Round,
    Floor,
    Ceil,

    // Bitwise
    ShiftRight,
    ShiftLeft,
    BitOr,
    BitAnd,
    BitNot,

    // Transcendental
    Sin,
    Cos,
    Tan,
    Sinh,
    Cosh,
    Tanh,
    Asin,
    Acos,
    Atan,
    Atan2,
    Exp,
    Ln,
    Log10,
    LogN,

    // Angles, coordinates and units
    Radians,
    Degrees,
    ToDegrees,
    ToRadians,
    ToFahrenheit,
    ToCelsius,
    ToRectangular,
    ToPolar,
    MileToMeter,
    FootToMeter,
    InchToMillimeter,

    // Statistics over the live stack
    Average,
    StdDev,

    // Accumulated statistics
    StatPairs,
    StatSingles,
    StatCount,
    SumX,
    SumY,
    SumXX,
    SumYY,
    SumXY,
    MeanX,
    MeanY,
    StdDevX,
    StdDevY,
    RegressionA,
    RegressionB,
    Correlation,

    // Constants
    Pi,
    E,
    SpeedOfLight,

    // Time
    Time,

    // Random variates
    SetUniform,
    SetNormal,
    SetExponential,
    Uniform,
    Normal,
    Exponential,
}

/// One entry of the vocabulary
#[derive(Debug, Clone, Copy)]
pub struct OpInfo {
    pub spelling: &'static str,
    pub op: Op,
    pub help: &'static str,
}

macro_rules! vocabulary {
    ($($spelling:literal => $op:ident, $help:literal;)+) => {
        /// The complete operator vocabulary, in help order
        pub const OPERATORS: &[OpInfo] = &[
            $(OpInfo { spelling: $spelling, op: Op::$op, help: $help },)+
        ];
    };
}

vocabulary! {
    "c"      => Clear,            "clear the stack (memory and statistics kept)";
    "ac"     => AllClear,         "all clear: stack, memory and statistics";
    "dec"    => Decimal,          "use decimal, base 10";
    "hex"    => Hexadecimal,      "use hexadecimal, base 16";
    "bin"    => Binary,           "use binary, base 2";
    "dup"    => Dup,              "duplicate X";
    "swap"   => Swap,             "swap X and Y";
    "rot"    => Rot,              "move the bottom of the stack to the top";
    "drop"   => Drop,             "drop X";
    "."      => Drop,             "drop X";
    "depth"  => Depth,            "push the depth of the stack";
    "=base"  => SetBase,          "set the base to X (2-36)";
    "=prec"  => SetPrecision,     "set the precision to X";
    "?base"  => QueryBase,        "push the base";
    "?prec"  => QueryPrecision,   "push the precision";
    "?sf"    => QuerySignificant, "push the number of significant figures of the base";

    "sto"    => Store,            "copy X into memory and drop it";
    "rcl"    => Recall,           "push the contents of memory";
    "sum"    => MemoryAdd,        "add X to memory and drop it";
    "exc"    => MemoryExchange,   "exchange X with memory";

    "+"      => Add,              "replace Y X with Y + X";
    "-"      => Subtract,         "replace Y X with Y - X";
    "*"      => Multiply,         "replace Y X with Y * X";
    "x"      => Multiply,         "replace Y X with Y * X";
    "/"      => Divide,           "replace Y X with Y / X";
    "div"    => IntDivide,        "replace Y X with the integer quotient of Y / X";
    "mod"    => Modulo,           "replace Y X with the integer remainder of Y / X";
    "fmod"   => FloatModulo,      "replace Y X with the floating remainder of Y / X";
    "pow"    => Power,            "replace Y X with Y raised to X";
    "^"      => Power,            "replace Y X with Y raised to X";
    "inv"    => Inverse,          "replace X with 1/X";
    "sq"     => Square,           "replace X with its square";
    "sqr"    => SquareRoot,       "replace X with its square root";
    "!"      => Factorial,        "replace X with X factorial";
    "+-"     => Negate,           "change the sign of X";
    "-+"     => Negate,           "change the sign of X";
    "abs"    => Abs,              "replace X with its absolute value";
    "round"  => Round,            "round X to the nearest integer";
    "floor"  => Floor,            "round X down";
    "ceil"   => Ceil,             "round X up";

    ">>"     => ShiftRight,       "replace Y X with Y shifted right by X";
    "<<"     => ShiftLeft,        "replace Y X with Y shifted left by X";
    "|"      => BitOr,            "replace Y X with Y bitwise-or X";
    "&"      => BitAnd,           "replace Y X with Y bitwise-and X";
    "~"      => BitNot,           "replace X with its bitwise negation";

    "sin"    => Sin,              "replace X with its sine";
    "cos"    => Cos,              "replace X with its cosine";
    "tan"    => Tan,              "replace X with its tangent";
    "sinh"   => Sinh,             "replace X with its hyperbolic sine";
    "cosh"   => Cosh,             "replace X with its hyperbolic cosine";
    "tanh"   => Tanh,             "replace X with its hyperbolic tangent";
    "asin"   => Asin,             "replace X with its arcsine";
    "acos"   => Acos,             "replace X with its arccosine";
    "atan"   => Atan,             "replace X with its arctangent";
    "atan2"  => Atan2,            "replace Y X with the arctangent of Y/X";
    "exp"    => Exp,              "replace X with e raised to X";
    "ln"     => Ln,               "replace X with its natural log";
    "log"    => Log10,            "replace X with its base-10 log";
    "logn"   => LogN,             "replace Y X with the log of Y in base X";

    "rad"    => Radians,          "angles are in radians";
    "deg"    => Degrees,          "angles are in degrees";
    "todeg"  => ToDegrees,        "convert X from radians to degrees";
    "torad"  => ToRadians,        "convert X from degrees to radians";
    "tof"    => ToFahrenheit,     "convert X from Celsius to Fahrenheit";
    "toc"    => ToCelsius,        "convert X from Fahrenheit to Celsius";
    "toxy"   => ToRectangular,    "convert r (Y) and theta (X) to x and y";
    "tort"   => ToPolar,          "convert x (Y) and y (X) to r and theta";
    "mi2m"   => MileToMeter,      "push meters per mile";
    "ft2m"   => FootToMeter,      "push meters per foot";
    "in2mm"  => InchToMillimeter, "push millimeters per inch";

    "avg"    => Average,          "push the average of the numbers on the stack";
    "std"    => StdDev,           "push the std dev of the numbers on the stack";

    "stat"   => StatPairs,        "x y ... pairs go into the cumulative statistics";
    "xstat"  => StatSingles,      "y ... singles go into the cumulative statistics";
    "n"      => StatCount,        "push the number of statistics points";
    "sx"     => SumX,             "push the sum of x";
    "sy"     => SumY,             "push the sum of y";
    "sxx"    => SumXX,            "push the sum of x squared";
    "syy"    => SumYY,            "push the sum of y squared";
    "sxy"    => SumXY,            "push the sum of x times y";
    "mx"     => MeanX,            "push the mean of x";
    "my"     => MeanY,            "push the mean of y";
    "sdx"    => StdDevX,          "push the std dev of x";
    "sdy"    => StdDevY,          "push the std dev of y";
    "a"      => RegressionA,      "push the linear regression slope a of ax+b";
    "b"      => RegressionB,      "push the linear regression intercept b of ax+b";
    "r"      => Correlation,      "push the correlation coefficient";

    "pi"     => Pi,               "push pi";
    "e"      => E,                "push e, the base of the natural log";
    "vc"     => SpeedOfLight,     "push the speed of light in m/s";

    "time"   => Time,             "push the current time in seconds";

    "=urand" => SetUniform,       "set the uniform generator range to Y X";
    "=nrand" => SetNormal,        "set the normal generator mean and sd to Y X";
    "=erand" => SetExponential,   "set the exponential generator mean to X";
    "urand"  => Uniform,          "push a uniform random number";
    "nrand"  => Normal,           "push a normal random number";
    "erand"  => Exponential,      "push an exponential random number";
}

impl Op {
    /// Look up a whole token. Only exact matches count: `atan` does not
    /// match `atan2`, and neither matches `atan2x`.
    pub fn lookup(token: &str) -> Option<Op> {
        OPERATORS
            .iter()
            .find(|info| info.spelling == token)
            .map(|info| info.op)
    }

    /// Primary spelling of this operator
    pub fn spelling(self) -> &'static str {
        OPERATORS
            .iter()
            .find(|info| info.op == self)
            .map(|info| info.spelling)
            .unwrap_or("?")
    }
}

/// Render the vocabulary as aligned help lines, one per spelling
pub fn help_lines() -> impl Iterator<Item = String> {
    OPERATORS
        .iter()
        .map(|info| format!("{:<8} {}", info.spelling, info.help))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_spellings_are_unique() {
        let mut seen = HashSet::new();
        for info in OPERATORS {
            assert!(seen.insert(info.spelling), "duplicate spelling '{}'", info.spelling);
        }
    }

    #[test]
    fn test_spellings_cannot_be_literals() {
        // No spelling may contain an uppercase digit letter
        for info in OPERATORS {
            assert!(
                !info.spelling.bytes().any(|b| b.is_ascii_uppercase()),
                "'{}' would shadow a numeric literal",
                info.spelling
            );
            assert!(!info.spelling.chars().any(char::is_whitespace));
        }
    }

    #[test]
    fn test_prefix_neighbours_are_distinct() {
        assert_eq!(Op::lookup("atan"), Some(Op::Atan));
        assert_eq!(Op::lookup("atan2"), Some(Op::Atan2));
        assert_eq!(Op::lookup("atan2x"), None);
        assert_eq!(Op::lookup("tort"), Some(Op::ToPolar));
        assert_eq!(Op::lookup("torad"), Some(Op::ToRadians));
        assert_eq!(Op::lookup("sqr"), Some(Op::SquareRoot));
        assert_eq!(Op::lookup("sq"), Some(Op::Square));
    }

    #[test]
    fn test_aliases() {
        assert_eq!(Op::lookup("."), Some(Op::Drop));
        assert_eq!(Op::lookup("x"), Some(Op::Multiply));
        assert_eq!(Op::lookup("^"), Some(Op::Power));
        assert_eq!(Op::lookup("-+"), Some(Op::Negate));
        assert_eq!(Op::Drop.spelling(), "drop");
    }

    #[test]
    fn test_case_sensitive() {
        assert_eq!(Op::lookup("dec"), Some(Op::Decimal));
        assert_eq!(Op::lookup("DEC"), None);
        assert_eq!(Op::lookup("Pi"), None);
    }

    #[test]
    fn test_help_covers_every_spelling() {
        assert_eq!(help_lines().count(), OPERATORS.len());
        assert!(help_lines().any(|line| line.starts_with("=base")));
    }
}
