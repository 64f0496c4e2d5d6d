// Shared instance with one-time initialisation.
// Owned by whoever composes the program and passed by reference; there is no
// global accessor.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};
use tracing::debug;

pub struct SharedInstance<T> {
    cell: OnceLock<Arc<T>>,
    init_runs: AtomicUsize,
}

impl<T> SharedInstance<T> {
    pub const fn new() -> Self {
        Self {
            cell: OnceLock::new(),
            init_runs: AtomicUsize::new(0),
        }
    }

    /// Runs `init` only for the first caller; everyone gets the same `Arc`.
    pub fn get_or_init<F>(&self, init: F) -> Arc<T>
    where
        F: FnOnce() -> T,
    {
        let instance = self.cell.get_or_init(|| {
            self.init_runs.fetch_add(1, Ordering::SeqCst);
            debug!(type_name = std::any::type_name::<T>(), "initialising shared instance");
            Arc::new(init())
        });
        Arc::clone(instance)
    }

    pub fn get(&self) -> Option<Arc<T>> {
        self.cell.get().cloned()
    }

    pub fn init_count(&self) -> usize {
        self.init_runs.load(Ordering::SeqCst)
    }
}

impl<T> Default for SharedInstance<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for SharedInstance<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedInstance")
            .field("initialised", &self.cell.get().is_some())
            .field("init_runs", &self.init_count())
            .finish()
    }
}
