use crate::atomic::Atomic;
use crate::disposable::Disposable;
use crate::result::{Error, Result};
use slotmap::{new_key_type, SlotMap};
use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::sync::{Arc, Weak};

new_key_type! {
    /// Token identifying one subscription in a signal's registry.
    pub struct SubscriptionKey;
}

type Callback<A, E> = Arc<dyn Fn(&Result<A, E>) + Send + Sync>;

const DEFAULT_LABEL: &str = "signal";

struct SignalInner<A, E> {
    label: Cow<'static, str>,
    callbacks: Atomic<SlotMap<SubscriptionKey, Callback<A, E>>>,
    keep_alive: Atomic<Vec<Box<dyn Any + Send>>>,
}

impl<A, E> SignalInner<A, E> {
    fn new(label: Cow<'static, str>) -> Self {
        Self {
            label,
            callbacks: Atomic::new(SlotMap::with_key()),
            keep_alive: Atomic::new(Vec::new()),
        }
    }

    fn send(&self, value: &Result<A, E>) {
        // Snapshot under the lock, deliver without it so callbacks may
        // subscribe, dispose or send re-entrantly.
        let snapshot: Vec<(SubscriptionKey, Callback<A, E>)> = self.callbacks.with(|callbacks| {
            callbacks
                .iter()
                .map(|(key, callback)| (key, Arc::clone(callback)))
                .collect()
        });

        tracing::trace!(
            label = %self.label,
            subscribers = snapshot.len(),
            is_ok = value.is_ok(),
            "sending"
        );

        for (key, callback) in snapshot {
            // skip anything disposed earlier in this send
            if self.callbacks.with(|callbacks| callbacks.contains_key(key)) {
                callback(value);
            }
        }
    }
}

impl<A, E> Drop for SignalInner<A, E> {
    fn drop(&mut self) {
        tracing::trace!(label = %self.label, "signal dropped");
    }
}

/// A multi-subscriber source of [`Result`] values.
///
/// Signals are created in pairs with a [`Producer`] by [`pipe`]. Values sent
/// through the producer are delivered synchronously, on the sending thread,
/// to every callback registered at that moment. Cloning a `Signal` creates a
/// new handle to the **same** registry.
///
/// # Lifetime
///
/// A signal lives while any `Signal` handle, any undisposed subscription
/// [`Disposable`], or any derived signal from [`map`](Signal::map) refers to
/// it. The producer only holds a weak reference, so sending after the signal
/// is gone is a no-op.
///
/// # Examples
///
/// ```
/// use signalwire::pipe;
/// use std::sync::{Arc, Mutex};
///
/// let (producer, signal) = pipe::<i32>();
/// let log = Arc::new(Mutex::new(Vec::new()));
///
/// let mut subscription = signal.subscribe({
///     let log = log.clone();
///     move |value| log.lock().unwrap().push(value.clone())
/// });
///
/// producer.send(Ok(5));
/// subscription.dispose();
/// producer.send(Ok(6));
///
/// assert_eq!(*log.lock().unwrap(), vec![Ok(5)]);
/// ```
pub struct Signal<A, E = Error> {
    inner: Arc<SignalInner<A, E>>,
}

impl<A, E> Clone for Signal<A, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A: 'static, E: 'static> Signal<A, E> {
    /// Create a signal and the producer that feeds it.
    pub fn pipe() -> (Producer<A, E>, Self) {
        Self::pipe_labeled(DEFAULT_LABEL)
    }

    /// Like [`pipe`](Signal::pipe), attaching `label` to this signal's trace events.
    pub fn pipe_labeled(label: impl Into<Cow<'static, str>>) -> (Producer<A, E>, Self) {
        let signal = Self {
            inner: Arc::new(SignalInner::new(label.into())),
        };
        let producer = Producer {
            signal: Arc::downgrade(&signal.inner),
        };
        (producer, signal)
    }

    /// Register `callback` for every value sent from now on.
    ///
    /// Deliveries continue until the returned [`Disposable`] is disposed or
    /// dropped. The disposable holds this signal alive.
    pub fn subscribe<F>(&self, callback: F) -> Disposable
    where
        F: Fn(&Result<A, E>) + Send + Sync + 'static,
    {
        let key = self
            .inner
            .callbacks
            .mutate(|callbacks| callbacks.insert(Arc::new(callback)));
        tracing::trace!(label = %self.inner.label, ?key, "subscribed");

        let inner = Arc::clone(&self.inner);
        Disposable::new(move || {
            let removed = inner.callbacks.mutate(|callbacks| callbacks.remove(key));
            tracing::trace!(label = %inner.label, ?key, "unsubscribed");
            // the callback may own other signals; release it outside the lock
            drop(removed);
        })
    }

    /// Register `callback` for successful values only.
    pub fn subscribe_values<F>(&self, callback: F) -> Disposable
    where
        F: Fn(&A) + Send + Sync + 'static,
    {
        self.subscribe(move |result| {
            if let Ok(value) = result {
                callback(value);
            }
        })
    }

    /// Keep `object` alive for at least as long as this signal.
    pub fn keep_alive<T>(&self, object: T)
    where
        T: Send + 'static,
    {
        self.inner
            .keep_alive
            .mutate(|objects| objects.push(Box::new(object)));
    }

    /// Derive a signal whose values are this signal's values passed through
    /// `transform`. Errors pass through unchanged without calling `transform`.
    ///
    /// The derived signal owns its subscription to `self`; dropping it
    /// unsubscribes.
    ///
    /// # Examples
    ///
    /// ```
    /// use signalwire::pipe;
    /// use std::sync::{Arc, Mutex};
    ///
    /// let (producer, signal) = pipe::<i32>();
    /// let doubled = signal.map(|n| n * 2);
    /// let last = Arc::new(Mutex::new(None));
    ///
    /// let _subscription = doubled.subscribe_values({
    ///     let last = last.clone();
    ///     move |n| *last.lock().unwrap() = Some(*n)
    /// });
    ///
    /// producer.send(Ok(21));
    /// assert_eq!(*last.lock().unwrap(), Some(42));
    /// ```
    pub fn map<B, F>(&self, transform: F) -> Signal<B, E>
    where
        B: 'static,
        E: Clone,
        F: Fn(&A) -> B + Send + Sync + 'static,
    {
        self.derive("map", move |result| {
            result.as_ref().map(&transform).map_err(Clone::clone)
        })
    }

    /// Like [`map`](Signal::map) with a fallible transform; a transform error
    /// is delivered downstream as an ordinary error value.
    pub fn try_map<B, F>(&self, transform: F) -> Signal<B, E>
    where
        B: 'static,
        E: Clone,
        F: Fn(&A) -> Result<B, E> + Send + Sync + 'static,
    {
        self.derive("try_map", move |result| match result {
            Ok(value) => transform(value),
            Err(error) => Err(error.clone()),
        })
    }

    fn derive<B, F>(&self, operator: &str, forward: F) -> Signal<B, E>
    where
        B: 'static,
        F: Fn(&Result<A, E>) -> Result<B, E> + Send + Sync + 'static,
    {
        let (producer, derived) = Signal::pipe_labeled(format!("{}.{operator}", self.inner.label));
        let subscription = self.subscribe(move |result| {
            producer.send(forward(result));
        });
        derived.keep_alive(subscription);
        derived
    }
}

impl<A, E> Signal<A, E> {
    /// Number of subscriptions currently registered.
    pub fn subscriber_count(&self) -> usize {
        self.inner.callbacks.with(|callbacks| callbacks.len())
    }

    /// The label used in this signal's trace events.
    pub fn label(&self) -> &str {
        &self.inner.label
    }
}

impl<A, E> fmt::Debug for Signal<A, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("label", &self.label())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Create a signal carrying [`Error`] payload errors and the producer that feeds it.
///
/// Shorthand for [`Signal::pipe`]; use `Signal::<A, E>::pipe()` for a custom
/// error type.
pub fn pipe<A: 'static>() -> (Producer<A>, Signal<A>) {
    Signal::pipe()
}

/// The sending side of a [`Signal`].
///
/// Holds only a weak reference: once every owner of the signal is gone,
/// [`send`](Producer::send) does nothing and returns `false`. Producers can be
/// cloned and sent to other threads.
pub struct Producer<A, E = Error> {
    signal: Weak<SignalInner<A, E>>,
}

impl<A, E> Clone for Producer<A, E> {
    fn clone(&self) -> Self {
        Self {
            signal: Weak::clone(&self.signal),
        }
    }
}

impl<A, E> Producer<A, E> {
    /// Deliver `value` to every current subscriber of the signal.
    ///
    /// Returns `false`, without delivering, when the signal no longer exists.
    pub fn send(&self, value: Result<A, E>) -> bool {
        match self.signal.upgrade() {
            Some(signal) => {
                signal.send(&value);
                true
            }
            None => {
                tracing::trace!("signal gone, value discarded");
                false
            }
        }
    }

    /// Whether the signal still exists.
    ///
    /// Event sources can poll this to stop producing once nobody listens.
    pub fn is_connected(&self) -> bool {
        self.signal.strong_count() > 0
    }

    /// Turn this producer into a plain sink closure.
    pub fn into_sink(self) -> impl Fn(Result<A, E>) + Clone {
        move |value| {
            self.send(value);
        }
    }
}

impl<A, E> fmt::Debug for Producer<A, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Producer")
            .field("connected", &self.is_connected())
            .finish()
    }
}
