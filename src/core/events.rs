//! Change notifications for external observers.
//!
//! Observers register a closure on [`Observers`] and receive every
//! [`ChangeEvent`]. Callbacks run on the thread that emitted the event, after
//! the asset index lock has been released.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent {
    /// The selected directory changed
    DirectoryChanged(PathBuf),
    /// A new listing was published
    ListingChanged { generation: u64 },
}

type Callback = Arc<dyn Fn(&ChangeEvent) + Send + Sync>;

#[derive(Default)]
pub struct Observers {
    callbacks: Mutex<Vec<Callback>>,
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("count", &self.len())
            .finish()
    }
}

impl Observers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&ChangeEvent) + Send + Sync + 'static,
    {
        self.callbacks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(Arc::new(callback));
    }

    pub fn emit(&self, event: ChangeEvent) {
        // Clone the list so a callback may subscribe without deadlocking
        let callbacks: Vec<Callback> = self
            .callbacks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone();

        log::debug!("Emitting {:?} to {} observers", event, callbacks.len());
        for callback in callbacks {
            callback(&event);
        }
    }

    pub fn len(&self) -> usize {
        self.callbacks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
