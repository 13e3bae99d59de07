use std::error;
use std::fmt::{self, Display};

/// Convenience alias for results over [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by grammar, derivation and automaton operations.
///
/// All of them are synchronous and deterministic: the same input fails the
/// same way every time, and a failed constructor never leaves a partially
/// built value behind.
#[derive(Debug)]
pub enum Error {
    /// A production line failed to parse, or a production was built with an
    /// empty left-hand side.
    MalformedProduction(String),
    /// A grammar could not be inferred from its production block.
    MalformedGrammar(String),
    /// A transition line failed to parse.
    MalformedTransition(String),
    /// A structural precondition of a constructor was violated.
    InvalidArgument(String),
    /// A requested derivation step does not apply to the current form.
    IllegalStep(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::MalformedProduction(msg) => write!(f, "malformed production: {}", msg),
            Error::MalformedGrammar(msg) => write!(f, "malformed grammar: {}", msg),
            Error::MalformedTransition(msg) => write!(f, "malformed transition: {}", msg),
            Error::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
            Error::IllegalStep(msg) => write!(f, "illegal step: {}", msg),
        }
    }
}

impl error::Error for Error {}
