use thiserror::Error;

/// Everything the automaton and the analyzer can reject.
///
/// All checks run before any work starts, so an error never comes with a
/// partially built matrix or a partial density curve.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

impl Error {
    pub(crate) fn invalid<S: Into<String>>(msg: S) -> Self {
        Error::InvalidParameter(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
