//! # Signalwire
//!
//! Thread-safe push signals for wiring event sources to consumers.
//!
//! ## Core
//!
//! - `Signal<A>` - Multi-subscriber source of `Result<A>` values
//! - `Producer<A>` - The sending side of a signal; holds it only weakly
//! - `Disposable` - Release handle returned by `subscribe`, runs once
//! - `Atomic<A>` - Serialized access to the registries behind a signal
//!
//! ## Data flow
//!
//! An event source (a timer, a watched property, a UI field) obtains a
//! `(producer, signal)` pair from [`pipe`] and calls `producer.send(..)`
//! whenever it has something to report. Every callback registered on the
//! signal runs synchronously on the sending thread. [`Signal::map`] derives
//! new signals; a derived signal owns its upstream subscription and releases
//! it when dropped.
//!
//! ```
//! use signalwire::{pipe, result::Error};
//! use std::sync::{Arc, Mutex};
//!
//! let (producer, text) = pipe::<String>();
//! let numbers = text.try_map(|s| s.parse::<i32>().map_err(|e| Error::conversion(s.as_str(), e)));
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let _subscription = numbers.subscribe({
//!     let seen = seen.clone();
//!     move |value| seen.lock().unwrap().push(value.is_ok())
//! });
//!
//! producer.send(Ok("17".to_string()));
//! producer.send(Ok("abc".to_string()));
//!
//! assert_eq!(*seen.lock().unwrap(), vec![true, false]);
//! ```

pub mod atomic;
pub mod disposable;
pub mod result;
pub mod signal;

// Re-export main types for convenience
pub use atomic::Atomic;
pub use disposable::{Disposable, DisposeBag};
pub use result::{Error, Result};
pub use signal::{pipe, Producer, Signal, SubscriptionKey};
