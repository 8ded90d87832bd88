//! Observable fields, so a UI layer can react to state changes without polling.

use core::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies one observer on one [`Observable`], so it can be removed again.
///
/// Ids are unique across every observable in the process, so a holder of several fields can take an id and try each
/// of them in turn.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct ObserverId(u64);

impl ObserverId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        ObserverId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

type Observer<T> = Box<dyn FnMut(&T) + Send>;

/// A value plus the callbacks that want to hear about it changing.
///
/// Every [`Self::set`] notifies every observer, in the order they subscribed, even if the new value is equal to the
/// old one. New observers are immediately handed the current value, so they never have to read it separately.
pub struct Observable<T> {
    value: T,
    observers: Vec<(ObserverId, Observer<T>)>,
}

impl<T> Observable<T> {
    /// Create an observable with an initial value and no observers.
    pub fn new(value: T) -> Self {
        Self {
            value,
            observers: vec![],
        }
    }

    /// The current value.
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Replace the value and notify everyone.
    pub(crate) fn set(&mut self, value: T) {
        self.value = value;
        for (_, observer) in self.observers.iter_mut() {
            observer(&self.value);
        }
    }

    /// Start observing. `observer` is called right away with the current value, then again on every change.
    pub fn subscribe(&mut self, mut observer: impl FnMut(&T) + Send + 'static) -> ObserverId {
        observer(&self.value);
        let id = ObserverId::next();
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Stop observing. Returns whether `id` was actually subscribed here.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(oid, _)| *oid != id);
        self.observers.len() != before
    }

    /// How many observers are currently attached.
    pub fn observers(&self) -> usize {
        self.observers.len()
    }
}

impl<T: Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Observable({:?}, {} observers)", self.value, self.observers.len())
    }
}
