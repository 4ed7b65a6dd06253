//! Error type definitions for ECDSA operations

use thiserror::Error;

/// Primary error type for ECDSA operations
///
/// A signature that simply does not match its digest and key is *not* an
/// error: verification reports it as `Ok(false)`. These variants describe
/// inputs that are structurally unusable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Private key or nonce outside `[1, n-1]`
    #[error("Invalid scalar: {context}: {message}")]
    InvalidScalar {
        context: &'static str,
        message: String,
    },

    /// Point not on the curve, at infinity, or outside the subgroup
    #[error("Invalid public key: {context}: {message}")]
    InvalidPublicKey {
        context: &'static str,
        message: String,
    },

    /// Inverse of the zero element was requested
    #[error("{context}: element is not invertible")]
    NotInvertible { context: &'static str },

    /// Malformed signature bytes or components of the wrong width
    #[error("Invalid signature encoding: {context}: {message}")]
    InvalidSignatureEncoding {
        context: &'static str,
        message: String,
    },

    /// Entropy source failed or retries were exhausted
    #[error("Random source failure: {context}: {message}")]
    RandomSourceFailure {
        context: &'static str,
        message: String,
    },

    /// Invalid length error with context
    #[error("{context}: invalid length (expected {expected}, got {actual})")]
    InvalidLength {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Invalid parameter error (curve definitions, configuration)
    #[error("{context}: {message}")]
    InvalidParameter {
        context: &'static str,
        message: String,
    },
}

/// Result type for ECDSA operations
pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    /// Replace the context of an existing error, keeping its details
    pub fn with_context(self, context: &'static str) -> Self {
        match self {
            Self::InvalidScalar { message, .. } => Self::InvalidScalar { context, message },
            Self::InvalidPublicKey { message, .. } => Self::InvalidPublicKey { context, message },
            Self::NotInvertible { .. } => Self::NotInvertible { context },
            Self::InvalidSignatureEncoding { message, .. } => {
                Self::InvalidSignatureEncoding { context, message }
            }
            Self::RandomSourceFailure { message, .. } => {
                Self::RandomSourceFailure { context, message }
            }
            Self::InvalidLength {
                expected, actual, ..
            } => Self::InvalidLength {
                context,
                expected,
                actual,
            },
            Self::InvalidParameter { message, .. } => Self::InvalidParameter { context, message },
        }
    }

    /// Shorthand for an [`Error::InvalidScalar`]
    pub fn scalar(context: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidScalar {
            context,
            message: message.into(),
        }
    }

    /// Shorthand for an [`Error::InvalidPublicKey`]
    pub fn public_key(context: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidPublicKey {
            context,
            message: message.into(),
        }
    }

    /// Shorthand for an [`Error::InvalidSignatureEncoding`]
    pub fn encoding(context: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidSignatureEncoding {
            context,
            message: message.into(),
        }
    }

    /// Shorthand for an [`Error::RandomSourceFailure`]
    pub fn random(context: &'static str, message: impl Into<String>) -> Self {
        Self::RandomSourceFailure {
            context,
            message: message.into(),
        }
    }

    /// Shorthand for an [`Error::InvalidParameter`]
    pub fn param(context: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            context,
            message: message.into(),
        }
    }
}
