use parking_lot::Mutex;
use std::fmt;

/// A value whose reads and mutations are strictly serialized.
///
/// Every [`get`](Atomic::get), [`with`](Atomic::with) and
/// [`mutate`](Atomic::mutate) on one instance is totally ordered with respect
/// to the others: no two mutations interleave and a read never observes a
/// partially applied mutation. Callers block only while another thread holds
/// the same instance.
///
/// # Misuse
///
/// The lock is not reentrant. Calling `get`, `with` or `mutate` on the same
/// instance from inside a `with` or `mutate` closure deadlocks.
///
/// # Examples
///
/// ```
/// use signalwire::Atomic;
/// use std::sync::Arc;
/// use std::thread;
///
/// let counter = Arc::new(Atomic::new(0));
///
/// let handles: Vec<_> = (0..4)
///     .map(|_| {
///         let counter = Arc::clone(&counter);
///         thread::spawn(move || counter.mutate(|n| *n += 1))
///     })
///     .collect();
///
/// for handle in handles {
///     handle.join().unwrap();
/// }
///
/// assert_eq!(counter.get(), 4);
/// ```
#[derive(Default)]
pub struct Atomic<A> {
    value: Mutex<A>,
}

impl<A> Atomic<A> {
    /// Create a new cell holding `initial`.
    pub fn new(initial: A) -> Self {
        Self {
            value: Mutex::new(initial),
        }
    }

    /// Read the value with a function without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&A) -> R) -> R {
        let value = self.value.lock();
        f(&*value)
    }

    /// Apply `f` to the value in place.
    ///
    /// The change is visible to every `get`/`with`/`mutate` that starts after
    /// this call returns.
    pub fn mutate<R>(&self, f: impl FnOnce(&mut A) -> R) -> R {
        let mut value = self.value.lock();
        f(&mut *value)
    }

    /// Consume the cell and return the value.
    pub fn into_inner(self) -> A {
        self.value.into_inner()
    }
}

impl<A: Clone> Atomic<A> {
    /// Get a clone of the current value.
    pub fn get(&self) -> A {
        self.value.lock().clone()
    }
}

impl<A: fmt::Debug> fmt::Debug for Atomic<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.with(|value| f.debug_struct("Atomic").field("value", value).finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn get_and_mutate() {
        let atomic = Atomic::new(vec![1, 2]);

        atomic.mutate(|values| values.push(3));

        assert_eq!(atomic.get(), vec![1, 2, 3]);
    }

    #[test]
    fn mutate_returns_closure_result() {
        let atomic = Atomic::new(10);

        let previous = atomic.mutate(|n| std::mem::replace(n, 20));

        assert_eq!(previous, 10);
        assert_eq!(atomic.get(), 20);
    }

    #[test]
    fn with_reads_without_clone() {
        struct NotClone(u32);
        let atomic = Atomic::new(NotClone(7));

        assert_eq!(atomic.with(|v| v.0), 7);
        assert_eq!(atomic.into_inner().0, 7);
    }

    #[test]
    fn concurrent_increments_are_not_lost() {
        const THREADS: usize = 16;
        const PER_THREAD: usize = 1_000;

        let counter = Arc::new(Atomic::new(0usize));

        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let counter = Arc::clone(&counter);
                thread::spawn(move || {
                    for _ in 0..PER_THREAD {
                        counter.mutate(|n| *n += 1);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(counter.get(), THREADS * PER_THREAD);
    }

    #[test]
    fn debug_shows_value() {
        let atomic = Atomic::new(3);
        assert_eq!(format!("{atomic:?}"), "Atomic { value: 3 }");
    }
}
