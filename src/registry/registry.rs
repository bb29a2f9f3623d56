use std::any::Any;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, OnceLock};

use crate::cell::StateCell;
use crate::error::StateError;
use crate::handle::StateHandle;

/// Cells of different value types share one map behind type erasure.
type ErasedCell = Arc<dyn Any + Send + Sync>;

/// Registry state shared by every clone of a [`StateRegistry`].
struct RegistryState {
    // Map from entry id to the shared cell holding its value
    cells: HashMap<String, ErasedCell>,
    // Map from entry id to the number of live handles interested in it
    ref_counts: HashMap<String, usize>,
}

impl RegistryState {
    fn new() -> Self {
        Self {
            cells: HashMap::new(),
            ref_counts: HashMap::new(),
        }
    }

    fn clear(&mut self) {
        self.cells.clear();
        self.ref_counts.clear();
    }
}

/// A reference-counted shared state registry.
///
/// The registry maps string entry ids to shared reactive cells and keeps a
/// reference count per id. Consumers never touch the maps directly; they go
/// through a [`StateHandle`], which registers interest in every id it
/// accesses and releases all of it in one pass when the consumer goes away.
/// An entry lives exactly as long as its reference count is positive.
///
/// Cloning a registry is cheap and yields a view onto the same shared maps.
///
/// # Examples
///
/// Using an explicit registry:
///
/// ```
/// use multistate::StateRegistry;
///
/// let registry = StateRegistry::new();
/// let handle = registry.handle();
///
/// handle.set("counter", 0, 41).unwrap();
/// let cell = handle.get::<i32>("counter", 0).unwrap();
/// assert_eq!(cell.get(), Some(41));
/// ```
///
/// Using the process-wide registry:
///
/// ```
/// use multistate::StateRegistry;
///
/// let handle = StateRegistry::global().handle();
/// let _cell = handle.get::<String>("session", "token").unwrap();
/// ```
pub struct StateRegistry {
    inner: Arc<Mutex<RegistryState>>,
}

impl StateRegistry {
    /// Create a new empty registry, independent of any other.
    ///
    /// Useful for testing or for keeping unrelated subsystems isolated.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(RegistryState::new())),
        }
    }

    /// Get the process-wide registry (fallback).
    ///
    /// Handles created from it share state with every other `global()`
    /// caller for the lifetime of the process.
    pub fn global() -> Self {
        static REGISTRY: OnceLock<StateRegistry> = OnceLock::new();
        REGISTRY.get_or_init(StateRegistry::new).clone()
    }

    /// Create an anonymous handle bound to this registry.
    ///
    /// The registry is untouched until the handle first accesses an entry.
    pub fn handle(&self) -> StateHandle {
        StateHandle::new(self.clone(), None)
    }

    /// Create a handle carrying a consumer name for diagnostics.
    ///
    /// The name appears in [`StateError::UseAfterRelease`] messages.
    pub fn named_handle(&self, name: impl Into<String>) -> StateHandle {
        StateHandle::new(self.clone(), Some(name.into()))
    }

    /// Resolve the cell for `id`, creating an empty one on first access.
    ///
    /// Every call with the same id returns a cell aliasing the same storage.
    pub(crate) fn cell_for<T>(&self, id: &str) -> Result<StateCell<T>, StateError>
    where
        T: Clone + Send + Sync + 'static,
    {
        let mut state = self.inner.lock().unwrap();
        match state.cells.get(id) {
            Some(erased) => {
                StateCell::from_erased(erased).ok_or_else(|| StateError::TypeMismatch {
                    id: id.to_string(),
                    expected: std::any::type_name::<T>(),
                })
            }
            None => {
                let cell = StateCell::<T>::empty();
                state.cells.insert(id.to_string(), cell.erase());
                Ok(cell)
            }
        }
    }

    /// Count one more live handle interested in `id`.
    pub(crate) fn retain(&self, id: &str) {
        let mut state = self.inner.lock().unwrap();
        *state.ref_counts.entry(id.to_string()).or_insert(0) += 1;
    }

    /// Drop one reference from every id in `ids`.
    ///
    /// Ids whose count reaches zero lose both their count entry and their
    /// cell; an absent count is treated as zero, never driven negative.
    pub(crate) fn release(&self, ids: &HashSet<String>) {
        let mut state = self.inner.lock().unwrap();
        for id in ids {
            let count = state.ref_counts.get(id).copied().unwrap_or(0);
            if count <= 1 {
                state.ref_counts.remove(id);
                state.cells.remove(id);
            } else {
                state.ref_counts.insert(id.clone(), count - 1);
            }
        }
    }

    /// Number of live entries.
    pub fn entry_count(&self) -> usize {
        self.inner.lock().unwrap().cells.len()
    }

    /// Current reference count for `id` (zero when absent).
    pub fn ref_count(&self, id: &str) -> usize {
        self.inner
            .lock()
            .unwrap()
            .ref_counts
            .get(id)
            .copied()
            .unwrap_or(0)
    }

    /// Whether an entry currently exists for `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.inner.lock().unwrap().cells.contains_key(id)
    }

    /// Remove every entry and reference count.
    ///
    /// Useful for resetting shared state between tests. Handles created
    /// before the reset keep working; their entries are simply recreated
    /// empty on the next access.
    pub fn reset(&self) {
        self.inner.lock().unwrap().clear();
    }
}

impl Default for StateRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for StateRegistry {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
