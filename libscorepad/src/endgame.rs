//! End-game splash: show the final standing briefly, then leave
//!
//! This screen has no events; its only behavior is a timed navigation back.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, error};

use crate::navigation::{NavigationCommand, Navigator};

/// How long the end-game screen stays up before navigating back.
pub const SPLASH_DELAY: Duration = Duration::from_secs(2);

pub struct EndGameController {
    task: JoinHandle<()>,
}

impl EndGameController {
    pub fn new(navigator: Arc<dyn Navigator>, delay: Duration) -> Self {
        debug!(controller = "endgame", "created");
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(e) = navigator.navigate(NavigationCommand::Back).await {
                error!(controller = "endgame", error = %e, "navigation failed");
            }
        });
        Self { task }
    }
}

impl Drop for EndGameController {
    fn drop(&mut self) {
        debug!(controller = "endgame", "dropped");
        self.task.abort();
    }
}
