use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use super::key::{entry_id, StateKey};
use crate::cell::StateCell;
use crate::error::StateError;
use crate::registry::StateRegistry;

/// Per-consumer entry point to a [`StateRegistry`].
///
/// Each consumer owns exactly one handle. The handle remembers every entry id
/// it has touched and registers interest in each one at most once, no matter
/// how often it is accessed. When the consumer goes away, via an explicit
/// [`release`](StateHandle::release) or by dropping the handle, all of that
/// interest is withdrawn in one pass, and entries nobody else references are
/// torn down with it.
///
/// A released handle rejects every further `get`/`set` with
/// [`StateError::UseAfterRelease`].
///
/// # Example
///
/// ```
/// use multistate::StateRegistry;
///
/// let registry = StateRegistry::new();
///
/// let sidebar = registry.named_handle("Sidebar");
/// let toolbar = registry.named_handle("Toolbar");
///
/// toolbar.set("user", 1, "alice".to_string()).unwrap();
///
/// let cell = sidebar.get::<String>("user", 1).unwrap();
/// assert_eq!(cell.get(), Some("alice".to_string()));
///
/// sidebar.release();
/// assert!(registry.contains("user-1")); // toolbar still holds it
///
/// toolbar.release();
/// assert!(!registry.contains("user-1"));
/// ```
pub struct StateHandle {
    registry: StateRegistry,
    name: Option<String>,
    // Every entry id this consumer has registered interest in
    ref_set: Mutex<HashSet<String>>,
    released: AtomicBool,
}

impl StateHandle {
    pub(crate) fn new(registry: StateRegistry, name: Option<String>) -> Self {
        Self {
            registry,
            name,
            ref_set: Mutex::new(HashSet::new()),
            released: AtomicBool::new(false),
        }
    }

    /// The consumer name given at creation, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Whether this handle has been released.
    pub fn is_released(&self) -> bool {
        self.released.load(Ordering::SeqCst)
    }

    /// Resolve the shared cell for `(category, key)`.
    ///
    /// The entry is created empty on first access by anyone; every later
    /// call with the same address, from this handle or any other, returns
    /// a cell aliasing the same storage, so writes are observed live.
    pub fn get<T>(&self, category: &str, key: impl Into<StateKey>) -> Result<StateCell<T>, StateError>
    where
        T: Clone + Send + Sync + 'static,
    {
        self.lookup(entry_id(category, Some(&key.into())))
    }

    /// Like [`get`](StateHandle::get), for a category addressed without a key.
    pub fn get_unkeyed<T>(&self, category: &str) -> Result<StateCell<T>, StateError>
    where
        T: Clone + Send + Sync + 'static,
    {
        self.lookup(entry_id(category, None))
    }

    /// Write `value` into the entry for `(category, key)`.
    ///
    /// Writes through the existing cell in place, so every holder observes
    /// the new value; creates the entry if it does not exist yet.
    pub fn set<T>(&self, category: &str, key: impl Into<StateKey>, value: T) -> Result<(), StateError>
    where
        T: Clone + Send + Sync + 'static,
    {
        let cell = self.lookup::<T>(entry_id(category, Some(&key.into())))?;
        cell.set(value);
        Ok(())
    }

    /// Like [`set`](StateHandle::set), for a category addressed without a key.
    pub fn set_unkeyed<T>(&self, category: &str, value: T) -> Result<(), StateError>
    where
        T: Clone + Send + Sync + 'static,
    {
        let cell = self.lookup::<T>(entry_id(category, None))?;
        cell.set(value);
        Ok(())
    }

    fn lookup<T>(&self, id: String) -> Result<StateCell<T>, StateError>
    where
        T: Clone + Send + Sync + 'static,
    {
        if self.is_released() {
            return Err(StateError::UseAfterRelease {
                consumer: self
                    .name
                    .clone()
                    .unwrap_or_else(|| "unknown".to_string()),
                id,
            });
        }
        let cell = self.registry.cell_for::<T>(&id)?;
        self.ref_add(id);
        Ok(cell)
    }

    /// Register interest in `id` exactly once per handle.
    fn ref_add(&self, id: String) {
        let mut ref_set = self.ref_set.lock().unwrap();
        if !ref_set.contains(&id) {
            self.registry.retain(&id);
            ref_set.insert(id);
        }
    }

    /// Withdraw this consumer's interest in everything it touched.
    ///
    /// The released flag is raised first, so any accessor observing it fails
    /// from then on; each id in the ref set is then decremented by one, and
    /// entries whose count reaches zero are removed from the registry.
    /// Calling `release` again is a safe no-op. Dropping the handle releases
    /// it automatically.
    pub fn release(&self) {
        if self.released.swap(true, Ordering::SeqCst) {
            return;
        }
        let ref_set = std::mem::take(&mut *self.ref_set.lock().unwrap());
        self.registry.release(&ref_set);
    }
}

impl Drop for StateHandle {
    fn drop(&mut self) {
        self.release();
    }
}
