//! Error type shared by the field engine, the polynomial arithmetic, the
//! GF(2) elimination routines and the BCH matrix builder.

use thiserror::Error;

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The request itself is invalid (bad field degree, bad code length, ...)
    Configuration,
    /// An algebraic identity that must hold did not hold
    ArithmeticInconsistency,
    /// A field element or exponent lies outside its domain
    OutOfRange,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Input too large: {length} exceeds maximum of {max_length}")]
    InputTooLarge { length: usize, max_length: usize },

    #[error("Division by the zero polynomial")]
    DivisionByZero,

    #[error("Inexact division: {dividend:#b} mod {divisor:#b} = {remainder:#b}")]
    InexactDivision {
        dividend: u128,
        divisor: u128,
        remainder: u128,
    },

    #[error("Polynomial degree {degree} exceeds the supported maximum of {max_degree}")]
    PolynomialOverflow { degree: usize, max_degree: usize },

    #[error("Coefficient of x^{degree} collapsed to {value}, expected 0 or 1")]
    NonBinaryCoefficient { degree: usize, value: usize },

    #[error("Parity-check matrix has rank {actual}, expected {expected}")]
    RankMismatch { expected: usize, actual: usize },

    #[error("Generator row {generator_row} is not orthogonal to parity-check row {parity_row}")]
    NotOrthogonal {
        generator_row: usize,
        parity_row: usize,
    },

    #[error("Value {value} is out of range (must be below {limit})")]
    OutOfRange { value: usize, limit: usize },

    #[error("Zero has no multiplicative inverse or discrete logarithm")]
    ZeroElement,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Configuration(_) | Error::InvalidInput(_) | Error::InputTooLarge { .. } => {
                ErrorKind::Configuration
            }
            Error::DivisionByZero
            | Error::InexactDivision { .. }
            | Error::PolynomialOverflow { .. }
            | Error::NonBinaryCoefficient { .. }
            | Error::RankMismatch { .. }
            | Error::NotOrthogonal { .. } => ErrorKind::ArithmeticInconsistency,
            Error::OutOfRange { .. } | Error::ZeroElement => ErrorKind::OutOfRange,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            Error::Configuration("bad".to_string()).kind(),
            ErrorKind::Configuration
        );
        assert_eq!(
            Error::InputTooLarge {
                length: 255,
                max_length: 127
            }
            .kind(),
            ErrorKind::Configuration
        );
        assert_eq!(
            Error::DivisionByZero.kind(),
            ErrorKind::ArithmeticInconsistency
        );
        assert_eq!(
            Error::OutOfRange { value: 9, limit: 8 }.kind(),
            ErrorKind::OutOfRange
        );
    }

    #[test]
    fn test_error_messages() {
        let err = Error::InexactDivision {
            dividend: 0b1001,
            divisor: 0b11,
            remainder: 0b1,
        };
        assert_eq!(
            err.to_string(),
            "Inexact division: 0b1001 mod 0b11 = 0b1"
        );
        assert_eq!(
            Error::OutOfRange { value: 9, limit: 8 }.to_string(),
            "Value 9 is out of range (must be below 8)"
        );
    }
}
