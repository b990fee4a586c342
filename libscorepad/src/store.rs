//! Single-slot observable state container
//!
//! `StateStore` is the reactive primitive every screen controller writes
//! into: it holds at most one current state, hands the latest value to
//! readers, and signals observers on every write.
//!
//! # Emission guarantee
//!
//! Every call to [`StateStore::write`] produces exactly one observable
//! signal, even when the written value is structurally equal to the current
//! one (re-confirming an identical score must still re-render). The original
//! implementation forced this by writing an empty sentinel before rewriting
//! the value; here each write instead bumps a version counter stored
//! alongside the state, so equal values remain distinguishable emissions.
//!
//! # Latest-value semantics
//!
//! The store is not a queue. An observer that falls behind skips the
//! intermediate values and resumes at the most recent state; it never sees a
//! stale or out-of-order one.

use tokio::sync::watch;

use crate::error::StateError;

#[derive(Debug, Clone)]
struct Slot<S> {
    seq: u64,
    state: Option<S>,
}

/// Single-owner observable holder of the latest UI-facing state.
#[derive(Debug)]
pub struct StateStore<S> {
    tx: watch::Sender<Slot<S>>,
}

impl<S: Clone> StateStore<S> {
    /// Create an empty store. [`StateStore::read`] fails until the first
    /// write; controllers normally use [`StateStore::with_initial`].
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Slot { seq: 0, state: None });
        Self { tx }
    }

    /// Create a store seeded with an initial state.
    pub fn with_initial(state: S) -> Self {
        let (tx, _rx) = watch::channel(Slot {
            seq: 1,
            state: Some(state),
        });
        Self { tx }
    }

    /// Replace the current state and signal all observers.
    pub fn write(&self, state: S) {
        self.tx.send_modify(|slot| {
            slot.seq += 1;
            slot.state = Some(state);
        });
    }

    /// The current state.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::Uninitialized`] if no value has ever been
    /// written.
    pub fn read(&self) -> Result<S, StateError> {
        self.tx
            .borrow()
            .state
            .clone()
            .ok_or(StateError::Uninitialized)
    }

    /// Number of writes observed so far, counting the initial seed.
    pub fn version(&self) -> u64 {
        self.tx.borrow().seq
    }

    /// Attach an observer. Late observers see only the current and future
    /// values, never history.
    pub fn observe(&self) -> StateObserver<S> {
        StateObserver {
            rx: self.tx.subscribe(),
        }
    }
}

impl<S: Clone> Default for StateStore<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Observer handle over a [`StateStore`].
#[derive(Debug)]
pub struct StateObserver<S> {
    rx: watch::Receiver<Slot<S>>,
}

impl<S: Clone> StateObserver<S> {
    /// Wait for the next write and return its state.
    ///
    /// Returns `None` once the store has been dropped.
    pub async fn next(&mut self) -> Option<S> {
        loop {
            self.rx.changed().await.ok()?;
            let state = self.rx.borrow_and_update().state.clone();
            // Skip the empty slot of a store created without an initial state
            if let Some(state) = state {
                return Some(state);
            }
        }
    }

    /// The state as of the latest write, without waiting.
    pub fn current(&self) -> Option<S> {
        self.rx.borrow().state.clone()
    }
}
