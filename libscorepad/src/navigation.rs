//! Navigation boundary
//!
//! Controllers request navigation through the [`Navigator`] trait and never
//! inspect the outcome; the navigation stack itself belongs to the
//! application shell. Each controller receives its navigator explicitly at
//! construction, there is no ambient singleton.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::CollaboratorError;
use crate::types::GameId;

/// Closed set of navigation requests a controller can emit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationCommand {
    Back,
    ToGame(GameId),
    ToPlayers,
    ToEndGame,
}

#[async_trait]
pub trait Navigator: Send + Sync {
    /// Request a navigation. The completion signal carries no outcome beyond
    /// success or failure.
    async fn navigate(&self, command: NavigationCommand) -> Result<(), CollaboratorError>;
}

/// Recording navigator for tests and integration use
///
/// Records every command and optionally fails each call, in the spirit of a
/// configurable mock collaborator.
#[derive(Default)]
pub struct RecordingNavigator {
    commands: Mutex<Vec<NavigationCommand>>,
    fail: bool,
}

impl RecordingNavigator {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// A navigator whose every call fails.
    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            commands: Mutex::new(Vec::new()),
            fail: true,
        })
    }

    /// Commands recorded so far, in request order.
    pub fn commands(&self) -> Vec<NavigationCommand> {
        self.commands.lock().unwrap().clone()
    }
}

#[async_trait]
impl Navigator for RecordingNavigator {
    async fn navigate(&self, command: NavigationCommand) -> Result<(), CollaboratorError> {
        if self.fail {
            return Err(CollaboratorError::Navigation(format!(
                "navigation rejected: {command:?}"
            )));
        }
        self.commands.lock().unwrap().push(command);
        Ok(())
    }
}
