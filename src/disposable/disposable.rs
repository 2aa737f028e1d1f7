use crate::atomic::Atomic;
use std::fmt;

type Action = Box<dyn FnOnce() + Send>;

/// RAII handle around a release action.
///
/// The action runs at most once: on the first call to
/// [`dispose`](Disposable::dispose), or on drop if it was never disposed.
///
/// # Examples
///
/// ```
/// use signalwire::Disposable;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// let released = Arc::new(AtomicUsize::new(0));
/// let mut disposable = Disposable::new({
///     let released = released.clone();
///     move || {
///         released.fetch_add(1, Ordering::SeqCst);
///     }
/// });
///
/// disposable.dispose();
/// drop(disposable);
///
/// assert_eq!(released.load(Ordering::SeqCst), 1);
/// ```
#[must_use = "dropping a Disposable runs its release action immediately"]
pub struct Disposable {
    action: Option<Action>,
}

impl Disposable {
    /// Create a handle that runs `action` when released.
    pub fn new<F>(action: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            action: Some(Box::new(action)),
        }
    }

    /// A handle with nothing to release.
    pub fn empty() -> Self {
        Self { action: None }
    }

    /// Run the release action if it has not run yet.
    pub fn dispose(&mut self) {
        if let Some(action) = self.action.take() {
            tracing::trace!("disposing");
            action();
        }
    }

    /// Whether the release action has already run (or there never was one).
    pub fn is_disposed(&self) -> bool {
        self.action.is_none()
    }
}

impl Drop for Disposable {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl fmt::Debug for Disposable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Disposable")
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

/// A thread-safe collection of [`Disposable`]s released together.
///
/// Everything in the bag is disposed when the bag is dropped or
/// [`clear`](DisposeBag::clear)ed, in insertion order.
#[derive(Default)]
pub struct DisposeBag {
    disposables: Atomic<Vec<Disposable>>,
}

impl DisposeBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of `disposable` until the bag is cleared or dropped.
    pub fn insert(&self, disposable: Disposable) {
        self.disposables.mutate(|disposables| disposables.push(disposable));
    }

    pub fn len(&self) -> usize {
        self.disposables.with(Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Dispose everything currently held.
    pub fn clear(&self) {
        // Release actions may touch other `Atomic`s, so run them outside the lock.
        let disposables = self.disposables.mutate(std::mem::take);
        for mut disposable in disposables {
            disposable.dispose();
        }
    }
}

impl Extend<Disposable> for DisposeBag {
    fn extend<T: IntoIterator<Item = Disposable>>(&mut self, iter: T) {
        self.disposables.mutate(|disposables| disposables.extend(iter));
    }
}

impl Drop for DisposeBag {
    fn drop(&mut self) {
        self.clear();
    }
}

impl fmt::Debug for DisposeBag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisposeBag").field("len", &self.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    fn counting(counter: &Arc<AtomicUsize>) -> Disposable {
        let counter = counter.clone();
        Disposable::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn dispose_runs_once() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut disposable = counting(&counter);

        assert!(!disposable.is_disposed());
        disposable.dispose();
        disposable.dispose();
        assert!(disposable.is_disposed());
        drop(disposable);

        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn drop_runs_action() {
        let counter = Arc::new(AtomicUsize::new(0));
        {
            let _disposable = counting(&counter);
            assert_eq!(counter.load(Ordering::SeqCst), 0);
        }
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn empty_is_disposed() {
        let disposable = Disposable::empty();
        assert!(disposable.is_disposed());
    }

    #[test]
    fn bag_disposes_in_insertion_order() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let bag = DisposeBag::new();

        for i in 0..3 {
            let order = order.clone();
            bag.insert(Disposable::new(move || order.lock().unwrap().push(i)));
        }
        assert_eq!(bag.len(), 3);

        drop(bag);

        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn bag_clear_empties_and_releases() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut bag = DisposeBag::new();
        bag.extend([counting(&counter), counting(&counter)]);

        bag.clear();

        assert!(bag.is_empty());
        assert_eq!(counter.load(Ordering::SeqCst), 2);

        drop(bag);
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }
}
