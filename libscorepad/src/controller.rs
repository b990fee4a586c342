//! Generic screen controller: one reducer, one supervised task
//!
//! Each screen owns a `Controller` composing a [`crate::store::StateStore`]
//! with a [`Reducer`]. The controller runs the reducer on a single tokio task
//! that drains an event queue, so all state writes for one screen are
//! linearized in the order `obtain_event` was called; suspension happens only
//! at awaited collaborator calls inside the reducer.
//!
//! # Supervision
//!
//! A reducer error never crashes the loop and never rolls back an applied
//! state write. It is logged and forwarded on a broadcast error channel so
//! callers (and tests) can assert that a failure occurred; to the user,
//! nothing visibly changes. Dropping the controller aborts the task,
//! cancelling any in-flight collaborator call without surfacing an error.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, error};

use crate::error::ScorepadError;

/// Receiver half of a controller's error channel.
pub type ErrorReceiver = broadcast::Receiver<Arc<ScorepadError>>;

/// Per-screen event handler: maps one event to state writes and side effects.
///
/// Events are closed per-screen enums, so an unhandled variant is a
/// compile-time impossibility. Returning an error hands the failure to the
/// controller's supervision; it is not a control-flow signal.
#[async_trait]
pub trait Reducer: Send + 'static {
    type Event: Send + 'static;

    async fn reduce(&mut self, event: Self::Event) -> crate::Result<()>;
}

/// Handle to a running screen controller.
pub struct Controller<E> {
    name: &'static str,
    events: mpsc::UnboundedSender<E>,
    errors: broadcast::Sender<Arc<ScorepadError>>,
    task: JoinHandle<()>,
}

impl<E: Send + 'static> Controller<E> {
    /// Spawn the controller task owning `reducer`.
    pub fn spawn<R>(name: &'static str, mut reducer: R) -> Self
    where
        R: Reducer<Event = E>,
    {
        debug!(controller = name, "created");
        let (events, mut queue) = mpsc::unbounded_channel::<E>();
        let (errors, _) = broadcast::channel(16);
        let error_sink = errors.clone();

        let task = tokio::spawn(async move {
            while let Some(event) = queue.recv().await {
                if let Err(e) = reducer.reduce(event).await {
                    error!(controller = name, error = %e, "reducer failed");
                    // Nobody listening is fine; the error has been logged
                    let _ = error_sink.send(Arc::new(e));
                }
            }
        });

        Self {
            name,
            events,
            errors,
            task,
        }
    }

    /// Queue an event for the reducer. Fire-and-forget: processing happens
    /// asynchronously on the controller task, in call order.
    pub fn obtain_event(&self, event: E) {
        if self.events.send(event).is_err() {
            error!(controller = self.name, "event dropped, controller task gone");
        }
    }

    /// Subscribe to reducer failures.
    pub fn errors(&self) -> ErrorReceiver {
        self.errors.subscribe()
    }

    /// A sender feeding this controller's event queue, for bridging
    /// subscriptions into events.
    pub(crate) fn clone_sender(&self) -> mpsc::UnboundedSender<E> {
        self.events.clone()
    }
}

impl<E> Drop for Controller<E> {
    fn drop(&mut self) {
        debug!(controller = self.name, "dropped");
        self.task.abort();
    }
}
