//! Push-based signals.
//!
//! This module provides the publish/subscribe building blocks:
//! - [`pipe`]: creates a [`Producer`] and the [`Signal`] it feeds
//! - [`Signal::subscribe`]: registers a callback, returning a [`Disposable`](crate::Disposable)
//! - [`Signal::map`] / [`Signal::try_map`]: derived signals that own their
//!   upstream subscription
//! - [`Signal::keep_alive`]: ties an arbitrary object's lifetime to a signal

mod signal;

pub use signal::{pipe, Producer, Signal, SubscriptionKey};
