//! Non-owning observer registry
//!
//! The registry keeps an insertion-ordered list of observers for one
//! notification contract. It stores [`Weak`] references only: the container
//! never keeps an observer alive, and an observer dropped by its owner is
//! pruned instead of being resurrected.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagestore_core::registry::ObserverRegistry;
//! use pagestore_core::DataObserver;
//! use std::sync::Arc;
//!
//! let mut registry: ObserverRegistry<dyn DataObserver> = ObserverRegistry::new();
//!
//! let memory = Arc::new(UsedMemory::new(log));
//! let weak = Arc::downgrade(&memory) as std::sync::Weak<dyn DataObserver>;
//! registry.attach(weak);
//!
//! registry.notify(|observer| observer.on_raw_data_load(&[], &lines));
//! ```

use std::sync::Weak;

/// Insertion-ordered list of non-owning observer references
///
/// Identity is the address of the shared allocation, so attaching the same
/// `Arc` twice is a no-op and detaching works with any clone of it.
pub struct ObserverRegistry<T: ?Sized> {
    observers: Vec<Weak<T>>,
}

impl<T: ?Sized> ObserverRegistry<T> {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            observers: Vec::new(),
        }
    }

    /// Register an observer
    ///
    /// # Returns
    ///
    /// `true` if the observer was added, `false` if it was already registered
    pub fn attach(&mut self, observer: Weak<T>) -> bool {
        if self.position(&observer).is_some() {
            return false;
        }
        self.observers.push(observer);
        true
    }

    /// Remove an observer
    ///
    /// Removing an observer that was never registered is a no-op.
    ///
    /// # Returns
    ///
    /// `true` if the observer was registered and has been removed
    pub fn detach(&mut self, observer: &Weak<T>) -> bool {
        match self.position(observer) {
            Some(index) => {
                self.observers.remove(index);
                true
            }
            None => false,
        }
    }

    /// Invoke `f` on every live observer, in registration order
    ///
    /// Observers whose owners dropped them are removed before dispatch.
    pub fn notify(&mut self, mut f: impl FnMut(&T)) {
        self.observers.retain(|observer| observer.strong_count() > 0);
        for observer in &self.observers {
            if let Some(observer) = observer.upgrade() {
                f(&*observer);
            }
        }
    }

    /// Number of registered observers that are still alive
    pub fn len(&self) -> usize {
        self.observers
            .iter()
            .filter(|observer| observer.strong_count() > 0)
            .count()
    }

    /// Check if no live observer is registered
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn position(&self, observer: &Weak<T>) -> Option<usize> {
        let target = observer.as_ptr() as *const ();
        self.observers
            .iter()
            .position(|registered| registered.as_ptr() as *const () == target)
    }
}

impl<T: ?Sized> Default for ObserverRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}
