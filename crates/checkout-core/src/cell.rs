//! Observable State Cell
//!
//! A single mutable value with change notification. Mutation is synchronous;
//! subscribers are woken through a tokio `watch` channel, which works on both
//! native and `wasm32` targets.

use tokio::sync::watch;

/// Shared mutable value with subscriber notification
#[derive(Debug)]
pub struct StateCell<T> {
    tx: watch::Sender<T>,
}

impl<T> StateCell<T> {
    pub fn new(value: T) -> Self {
        let (tx, _rx) = watch::channel(value);
        Self { tx }
    }

    /// Mutate in place and notify subscribers
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        self.tx.send_modify(f);
    }

    /// Replace the value, returning the previous one
    pub fn replace(&self, value: T) -> T {
        self.tx.send_replace(value)
    }

    /// Read through a closure without cloning
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.tx.borrow())
    }

    /// Receiver that observes every later change
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }
}

impl<T: Clone> StateCell<T> {
    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }
}

impl<T: Default> Default for StateCell<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
