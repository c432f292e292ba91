use crate::call::Method;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// A required argument was not supplied.
    #[error("not enough arguments to {method}: expected {expected}, found {found}")]
    MissingArgument {
        method: Method,
        expected: usize,
        found: usize,
    },

    /// An argument was not a finite number.
    #[error("argument {index} of {method} is not a finite floating-point value")]
    Type { method: Method, index: usize },

    /// The curve argument was not a usable sequence of samples.
    #[error("invalid curve passed to {method}: {reason}")]
    InvalidCurve { method: Method, reason: &'static str },

    /// A numeric argument was outside of its legal range.
    #[error("{method}: {reason}")]
    Range { method: Method, reason: &'static str },
}

pub type Result<T> = std::result::Result<T, Error>;
