use std::any::Any;
use std::sync::{Arc, RwLock};

type Subscriber<T> = Box<dyn Fn(Option<&T>) + Send + Sync>;

/// A shared reactive value cell.
///
/// A cell starts empty and holds at most one value. Cloning a cell is cheap
/// and produces a handle to the *same* underlying storage, so a write through
/// any clone is immediately visible to every other holder. Subscribers run
/// synchronously whenever the contents change.
pub struct StateCell<T> {
    inner: Arc<CellInner<T>>,
}

struct CellInner<T> {
    value: RwLock<Option<T>>,
    subscribers: RwLock<Vec<Subscriber<T>>>,
}

impl<T: Clone> StateCell<T> {
    /// Create a cell holding no value.
    pub fn empty() -> Self {
        Self::from_option(None)
    }

    /// Create a cell holding `value`.
    pub fn with_value(value: T) -> Self {
        Self::from_option(Some(value))
    }

    fn from_option(value: Option<T>) -> Self {
        Self {
            inner: Arc::new(CellInner {
                value: RwLock::new(value),
                subscribers: RwLock::new(Vec::new()),
            }),
        }
    }

    /// Get a clone of the current value, or `None` if the cell is empty.
    pub fn get(&self) -> Option<T> {
        self.inner.value.read().unwrap().clone()
    }

    /// Read the contents with a function without cloning.
    pub fn with<R>(&self, f: impl FnOnce(Option<&T>) -> R) -> R {
        let value = self.inner.value.read().unwrap();
        f(value.as_ref())
    }

    /// Whether the cell currently holds no value.
    pub fn is_empty(&self) -> bool {
        self.inner.value.read().unwrap().is_none()
    }

    /// Put a new value in the cell and notify subscribers.
    pub fn set(&self, value: T) {
        *self.inner.value.write().unwrap() = Some(value);
        self.notify();
    }

    /// Empty the cell and notify subscribers.
    pub fn clear(&self) {
        *self.inner.value.write().unwrap() = None;
        self.notify();
    }

    /// Update the contents in place and notify subscribers.
    pub fn update(&self, f: impl FnOnce(&mut Option<T>)) {
        {
            let mut value = self.inner.value.write().unwrap();
            f(&mut *value);
        }
        self.notify();
    }

    /// Subscribe to changes.
    ///
    /// The callback is called with the new contents after every `set`,
    /// `clear` or `update`, for as long as the cell is alive.
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(Option<&T>) + Send + Sync + 'static,
    {
        self.inner
            .subscribers
            .write()
            .unwrap()
            .push(Box::new(callback));
    }

    /// Whether two cells share the same underlying storage.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }

    fn notify(&self) {
        let value = self.inner.value.read().unwrap();
        let subscribers = self.inner.subscribers.read().unwrap();
        for subscriber in subscribers.iter() {
            subscriber(value.as_ref());
        }
    }
}

impl<T: Clone + Send + Sync + 'static> StateCell<T> {
    /// Erase the value type so cells of different types can share a map.
    pub(crate) fn erase(&self) -> Arc<dyn Any + Send + Sync> {
        Arc::clone(&self.inner) as Arc<dyn Any + Send + Sync>
    }

    /// Recover a typed cell from erased storage.
    ///
    /// Returns `None` when the storage was erased from a cell of a
    /// different value type.
    pub(crate) fn from_erased(erased: &Arc<dyn Any + Send + Sync>) -> Option<Self> {
        Arc::clone(erased)
            .downcast::<CellInner<T>>()
            .ok()
            .map(|inner| Self { inner })
    }
}

impl<T> std::fmt::Debug for StateCell<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateCell").finish_non_exhaustive()
    }
}

impl<T> Clone for StateCell<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn cell_starts_empty() {
        let cell: StateCell<i32> = StateCell::empty();
        assert!(cell.is_empty());
        assert_eq!(cell.get(), None);
    }

    #[test]
    fn cell_set_get() {
        let cell = StateCell::empty();
        cell.set(42);
        assert_eq!(cell.get(), Some(42));

        cell.set(7);
        assert_eq!(cell.get(), Some(7));

        cell.clear();
        assert_eq!(cell.get(), None);
    }

    #[test]
    fn clones_share_storage() {
        let cell = StateCell::with_value("hello".to_string());
        let alias = cell.clone();

        assert!(StateCell::ptr_eq(&cell, &alias));

        alias.set("world".to_string());
        assert_eq!(cell.get(), Some("world".to_string()));
    }

    #[test]
    fn independent_cells_are_not_aliases() {
        let a: StateCell<i32> = StateCell::empty();
        let b: StateCell<i32> = StateCell::empty();
        assert!(!StateCell::ptr_eq(&a, &b));
    }

    #[test]
    fn subscribers_run_on_every_write() {
        let cell = StateCell::empty();
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = calls.clone();

        cell.subscribe(move |_value| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(calls.load(Ordering::SeqCst), 0);

        cell.set(1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        cell.update(|value| *value = Some(2));
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        cell.clear();
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn subscriber_observes_new_contents() {
        let cell = StateCell::empty();
        let seen = Arc::new(RwLock::new(Vec::new()));
        let seen_clone = seen.clone();

        cell.subscribe(move |value| {
            seen_clone.write().unwrap().push(value.copied());
        });

        cell.set(10);
        cell.set(20);
        cell.clear();

        assert_eq!(*seen.read().unwrap(), vec![Some(10), Some(20), None]);
    }

    #[test]
    fn with_borrows_without_cloning() {
        let cell = StateCell::with_value(vec![1, 2, 3]);
        let sum = cell.with(|value| value.map(|v| v.iter().sum::<i32>()));
        assert_eq!(sum, Some(6));
    }

    #[test]
    fn erase_round_trips_at_the_same_type() {
        let cell = StateCell::with_value(5i32);
        let erased = cell.erase();

        let recovered = StateCell::<i32>::from_erased(&erased).unwrap();
        assert!(StateCell::ptr_eq(&cell, &recovered));
        assert_eq!(recovered.get(), Some(5));
    }

    #[test]
    fn erase_rejects_a_different_type() {
        let cell = StateCell::with_value(5i32);
        let erased = cell.erase();

        assert!(StateCell::<String>::from_erased(&erased).is_none());
    }
}
