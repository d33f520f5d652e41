//! Calculator error taxonomy
//!
//! Every failure is reported synchronously by the operation that detects
//! it. Nothing is retried, and nothing already committed is rolled back:
//! a line that fails halfway keeps the effects of the tokens before the
//! failing one.

/// Error raised by stack, codec, statistics or dispatch operations
#[derive(Debug, Clone, PartialEq)]
pub enum CalcError {
    /// Push onto a stack already at capacity
    StackFull,
    /// Pop, drop or duplicate on an empty stack
    StackEmpty,
    /// Too few operands for the operation
    Underflow,
    /// Paired statistics need an even, non-zero number of values
    Imbalanced,
    /// Operand outside the operation's domain; carries the operator spelling
    DomainError(&'static str),
    /// Malformed numeric literal
    ParseError(String),
    /// Formatted output did not fit; carries what was written before truncation
    BufferTooSmall { partial: String },
    /// Token is neither an operator nor a number in the current base
    Unrecognized(String),
    /// Stack capacity must be at least one slot
    InvalidCapacity(usize),
    /// Base outside 2..=36
    InvalidBase(i64),
    /// Configuration could not be read or parsed
    Config(String),
}

impl std::fmt::Display for CalcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CalcError::StackFull => write!(f, "stack is full"),
            CalcError::StackEmpty => write!(f, "stack is empty"),
            CalcError::Underflow => write!(f, "not enough operands on the stack"),
            CalcError::Imbalanced => {
                write!(f, "statistics need x y pairs: stack depth must be even")
            }
            CalcError::DomainError(op) => write!(f, "'{}': argument out of domain", op),
            CalcError::ParseError(s) => write!(f, "malformed number '{}'", s),
            CalcError::BufferTooSmall { partial } => {
                write!(f, "formatted number does not fit (truncated to '{}')", partial)
            }
            CalcError::Unrecognized(s) => write!(f, "unrecognized token '{}'", s),
            CalcError::InvalidCapacity(n) => write!(f, "invalid stack capacity {}", n),
            CalcError::InvalidBase(b) => write!(f, "base {} is outside 2..36", b),
            CalcError::Config(msg) => write!(f, "configuration error: {}", msg),
        }
    }
}

impl std::error::Error for CalcError {}

impl From<toml::de::Error> for CalcError {
    fn from(e: toml::de::Error) -> Self {
        CalcError::Config(e.to_string())
    }
}

/// Result alias used throughout the crate
pub type CalcResult<T> = Result<T, CalcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_operator() {
        let msg = CalcError::DomainError("/").to_string();
        assert!(msg.contains("'/'"));
    }

    #[test]
    fn test_display_keeps_partial_output() {
        let err = CalcError::BufferTooSmall {
            partial: "12.3".to_string(),
        };
        assert!(err.to_string().contains("12.3"));
    }

    #[test]
    fn test_toml_error_converts_to_config() {
        let err: CalcError = toml::from_str::<toml::Value>("= nope").unwrap_err().into();
        assert!(matches!(err, CalcError::Config(_)));
    }
}
