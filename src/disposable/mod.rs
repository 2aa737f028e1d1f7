//! Scoped release of subscriptions and other resources.
//!
//! - [`Disposable`]: a handle whose release action runs exactly once, either
//!   through [`Disposable::dispose`] or when the handle is dropped.
//! - [`DisposeBag`]: an owner for many disposables, released together.

mod disposable;

pub use disposable::{Disposable, DisposeBag};
