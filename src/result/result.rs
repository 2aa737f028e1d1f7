use thiserror::Error;

/// The outcome type delivered to signal subscribers.
///
/// `Ok` is a successful payload, `Err` a collaborator-reported error.
/// Mapping a `Result` transforms the success payload and passes the error
/// through unchanged.
pub type Result<A, E = Error> = std::result::Result<A, E>;

/// Errors a collaborator can report through a signal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Value is absent")]
    Absent,

    #[error("Unable to convert value. input: '{input}', reason: {reason}")]
    Conversion { input: String, reason: String },

    #[error("{0}")]
    Message(String),
}

impl Error {
    /// Build a [`Error::Conversion`] from the offending input and any displayable reason.
    pub fn conversion(input: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::Conversion {
            input: input.into(),
            reason: reason.to_string(),
        }
    }
}

/// Build a result from an optional value, falling back to `fallback` when absent.
///
/// # Examples
///
/// ```
/// use signalwire::result::{from_option, Error};
///
/// assert_eq!(from_option(Some(5), Error::Absent), Ok(5));
/// assert_eq!(from_option(None::<i32>, Error::Absent), Err(Error::Absent));
/// ```
pub fn from_option<A, E>(value: Option<A>, fallback: E) -> Result<A, E> {
    match value {
        Some(value) => Ok(value),
        None => Err(fallback),
    }
}
