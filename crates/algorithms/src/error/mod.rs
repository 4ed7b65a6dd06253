//! Error handling for the arithmetic layer

use std::borrow::Cow;
use std::fmt;

use ecsign_api::Error as CoreError;

/// The error type for field, scalar and point arithmetic
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Parameter validation error
    Parameter {
        /// Name of the invalid parameter
        name: Cow<'static, str>,
        /// Reason why the parameter is invalid
        reason: Cow<'static, str>,
    },

    /// Length validation error
    Length {
        /// Context where the length error occurred
        context: &'static str,
        /// Expected length in bytes
        expected: usize,
        /// Actual length in bytes
        actual: usize,
    },

    /// Inverse of zero requested
    NotInvertible {
        /// Operation that needed the inverse
        context: &'static str,
    },

    /// Scalar outside its permitted range
    InvalidScalar {
        /// Operation that rejected the scalar
        context: &'static str,
        /// Why it was rejected
        reason: &'static str,
    },

    /// Point encoding or coordinates rejected
    InvalidPoint {
        /// Operation that rejected the point
        context: &'static str,
        /// Why it was rejected
        reason: &'static str,
    },

    /// The random source failed or never produced an acceptable value
    RandomSource {
        /// Operation that was sampling
        context: &'static str,
    },
}

impl Error {
    /// Shorthand to create a Parameter error
    pub fn param<N: Into<Cow<'static, str>>, R: Into<Cow<'static, str>>>(
        name: N,
        reason: R,
    ) -> Self {
        Error::Parameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for arithmetic operations
pub type Result<T> = core::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parameter { name, reason } => {
                write!(f, "Invalid parameter '{}': {}", name, reason)
            }
            Error::Length {
                context,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Invalid length for {}: expected {}, got {}",
                    context, expected, actual
                )
            }
            Error::NotInvertible { context } => write!(f, "{}: zero has no inverse", context),
            Error::InvalidScalar { context, reason } => {
                write!(f, "Invalid scalar in {}: {}", context, reason)
            }
            Error::InvalidPoint { context, reason } => {
                write!(f, "Invalid point in {}: {}", context, reason)
            }
            Error::RandomSource { context } => {
                write!(f, "Random source failure in {}", context)
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<Error> for CoreError {
    fn from(err: Error) -> Self {
        match err {
            Error::Parameter { name, reason } => CoreError::InvalidParameter {
                context: "curve parameters",
                message: format!("{}: {}", name, reason),
            },
            Error::Length {
                context,
                expected,
                actual,
            } => CoreError::InvalidLength {
                context,
                expected,
                actual,
            },
            Error::NotInvertible { context } => CoreError::NotInvertible { context },
            Error::InvalidScalar { context, reason } => CoreError::InvalidScalar {
                context,
                message: reason.to_string(),
            },
            Error::InvalidPoint { context, reason } => CoreError::InvalidPublicKey {
                context,
                message: reason.to_string(),
            },
            Error::RandomSource { context } => CoreError::RandomSourceFailure {
                context,
                message: "no acceptable value was produced".to_string(),
            },
        }
    }
}

/// Convert an arithmetic result to a core result with additional context
#[inline]
pub fn to_core_result<T>(r: Result<T>, ctx: &'static str) -> ecsign_api::Result<T> {
    r.map_err(|e| CoreError::from(e).with_context(ctx))
}

pub mod validate;

#[cfg(test)]
mod tests;
