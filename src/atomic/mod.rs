//! Serialized access to a shared value.

mod atomic;

pub use atomic::Atomic;
