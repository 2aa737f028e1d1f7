//! Payload outcomes carried by signals.
//!
//! Every value delivered through a [`Signal`](crate::Signal) is a
//! [`Result`]: either a successful payload or an [`Error`] produced by
//! whatever collaborator fed the signal. Errors are ordinary values here,
//! the core never raises them as control flow.

mod result;

pub use result::{from_option, Error, Result};
