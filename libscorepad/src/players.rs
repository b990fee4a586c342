//! Players screen: roster editing over the repository
//!
//! The repository owns the durable player list; this screen mutates it
//! through awaited calls and mirrors its snapshots into the view state. The
//! subscription is bridged back into the event queue so every state write
//! stays on the controller's single task.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::task::JoinHandle;

use crate::controller::{Controller, ErrorReceiver, Reducer};
use crate::error::StateError;
use crate::navigation::{NavigationCommand, Navigator};
use crate::repository::PlayerRepository;
use crate::store::{StateObserver, StateStore};
use crate::types::{Player, PlayersViewState};

/// Events of the players screen.
#[derive(Debug, Clone)]
pub enum PlayersEvent {
    /// Open the new-player dialog.
    AddPlayerButton,
    /// Persist a new player with the given name, then close the dialog.
    CreatePlayer(String),
    UpdatePlayersSelection(Player),
    DeletePlayer(Player),
    DismissDialog,
    NavigateBack,
    /// Fresh snapshot from the repository subscription.
    PlayersUpdated(Vec<Player>),
}

pub struct PlayersReducer {
    store: Arc<StateStore<PlayersViewState>>,
    repository: Arc<dyn PlayerRepository>,
    navigator: Arc<dyn Navigator>,
}

#[async_trait]
impl Reducer for PlayersReducer {
    type Event = PlayersEvent;

    async fn reduce(&mut self, event: PlayersEvent) -> crate::Result<()> {
        match event {
            PlayersEvent::AddPlayerButton => {
                let mut state = self.store.read()?;
                state.dialog_open = true;
                self.store.write(state);
            }
            PlayersEvent::CreatePlayer(name) => {
                self.repository.add_player(Player::new(name)).await?;
                let mut state = self.store.read()?;
                state.dialog_open = false;
                self.store.write(state);
            }
            PlayersEvent::UpdatePlayersSelection(player) => {
                self.repository.update_player(player).await?;
            }
            PlayersEvent::DeletePlayer(player) => {
                self.repository.delete_player(player.id).await?;
            }
            PlayersEvent::DismissDialog => {
                let mut state = self.store.read()?;
                state.dialog_open = false;
                self.store.write(state);
            }
            PlayersEvent::NavigateBack => {
                self.navigator.navigate(NavigationCommand::Back).await?;
            }
            PlayersEvent::PlayersUpdated(players) => {
                let mut state = self.store.read()?;
                state.players = players;
                self.store.write(state);
            }
        }
        Ok(())
    }
}

/// Controller of the players screen.
///
/// Besides the reducer task it owns a watcher task that forwards repository
/// snapshots (current list first, then every change) into the event queue.
pub struct PlayersController {
    store: Arc<StateStore<PlayersViewState>>,
    controller: Controller<PlayersEvent>,
    watcher: JoinHandle<()>,
}

impl PlayersController {
    pub fn new(repository: Arc<dyn PlayerRepository>, navigator: Arc<dyn Navigator>) -> Self {
        let store = Arc::new(StateStore::with_initial(PlayersViewState::default()));
        let controller = Controller::spawn(
            "players",
            PlayersReducer {
                store: Arc::clone(&store),
                repository: Arc::clone(&repository),
                navigator,
            },
        );

        let events = controller.clone_sender();
        let mut subscription = repository.observe();
        let watcher = tokio::spawn(async move {
            let current = subscription.borrow_and_update().clone();
            if events.send(PlayersEvent::PlayersUpdated(current)).is_err() {
                return;
            }
            while subscription.changed().await.is_ok() {
                let players = subscription.borrow_and_update().clone();
                if events.send(PlayersEvent::PlayersUpdated(players)).is_err() {
                    break;
                }
            }
        });

        Self {
            store,
            controller,
            watcher,
        }
    }

    pub fn obtain_event(&self, event: PlayersEvent) {
        self.controller.obtain_event(event);
    }

    pub fn observe(&self) -> StateObserver<PlayersViewState> {
        self.store.observe()
    }

    pub fn state(&self) -> Result<PlayersViewState, StateError> {
        self.store.read()
    }

    pub fn errors(&self) -> ErrorReceiver {
        self.controller.errors()
    }
}

impl Drop for PlayersController {
    fn drop(&mut self) {
        self.watcher.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CollaboratorError;
    use crate::navigation::RecordingNavigator;
    use crate::repository::MemoryPlayerRepository;
    use crate::ScorepadError;

    #[tokio::test]
    async fn test_initial_snapshot_reaches_view_state() {
        let repo = MemoryPlayerRepository::with_players(vec![Player::new("Alice")]);
        let controller = PlayersController::new(repo, RecordingNavigator::new());
        let mut observer = controller.observe();

        let state = observer.next().await.unwrap();
        assert_eq!(state.players.len(), 1);
        assert_eq!(state.players[0].name, "Alice");
    }

    #[tokio::test]
    async fn test_create_player_round_trips_through_repository() {
        let repo = MemoryPlayerRepository::new();
        let controller = PlayersController::new(repo.clone(), RecordingNavigator::new());
        let mut observer = controller.observe();

        controller.obtain_event(PlayersEvent::AddPlayerButton);
        controller.obtain_event(PlayersEvent::CreatePlayer("Bob".to_string()));

        loop {
            let state = observer.next().await.unwrap();
            if state.players.iter().any(|p| p.name == "Bob") && !state.dialog_open {
                break;
            }
        }
    }

    #[tokio::test]
    async fn test_delete_player_removes_from_view_state() {
        let alice = Player::new("Alice");
        let bob = Player::new("Bob");
        let repo = MemoryPlayerRepository::with_players(vec![alice.clone(), bob.clone()]);
        let controller = PlayersController::new(repo, RecordingNavigator::new());
        let mut observer = controller.observe();

        controller.obtain_event(PlayersEvent::DeletePlayer(alice));

        loop {
            let state = observer.next().await.unwrap();
            if state.players == vec![bob.clone()] {
                break;
            }
        }
    }

    #[tokio::test]
    async fn test_delete_absent_player_produces_no_error() {
        let repo = MemoryPlayerRepository::with_players(vec![Player::new("Alice")]);
        let controller = PlayersController::new(repo, RecordingNavigator::new());
        let mut observer = controller.observe();
        let mut errors = controller.errors();

        controller.obtain_event(PlayersEvent::DeletePlayer(Player::new("Ghost")));
        // Force a subsequent emission so we know the delete was processed
        controller.obtain_event(PlayersEvent::AddPlayerButton);

        loop {
            let state = observer.next().await.unwrap();
            if state.dialog_open {
                break;
            }
        }
        assert!(errors.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_repository_failure_is_swallowed_and_reported() {
        let repo = MemoryPlayerRepository::new();
        repo.set_fail_writes(true);
        let controller = PlayersController::new(repo, RecordingNavigator::new());
        let mut errors = controller.errors();

        controller.obtain_event(PlayersEvent::AddPlayerButton);
        controller.obtain_event(PlayersEvent::CreatePlayer("Bob".to_string()));

        let error = errors.recv().await.unwrap();
        assert!(matches!(
            &*error,
            ScorepadError::Collaborator(CollaboratorError::Repository(_))
        ));
        // The failed create leaves the dialog visibly open: nothing changed
        assert!(controller.state().unwrap().dialog_open);
    }

    #[tokio::test]
    async fn test_dismiss_dialog_closes_without_creating() {
        let repo = MemoryPlayerRepository::new();
        let store = Arc::new(StateStore::with_initial(PlayersViewState::default()));
        let mut reducer = PlayersReducer {
            store: Arc::clone(&store),
            repository: repo.clone(),
            navigator: RecordingNavigator::new(),
        };

        reducer.reduce(PlayersEvent::AddPlayerButton).await.unwrap();
        assert!(store.read().unwrap().dialog_open);

        reducer.reduce(PlayersEvent::DismissDialog).await.unwrap();

        let state = store.read().unwrap();
        assert!(!state.dialog_open);
        assert!(repo.observe().borrow().is_empty());
    }

    #[tokio::test]
    async fn test_navigate_back_is_forwarded() {
        let repo = MemoryPlayerRepository::new();
        let navigator = RecordingNavigator::new();
        let controller = PlayersController::new(repo, navigator.clone());
        let mut observer = controller.observe();

        controller.obtain_event(PlayersEvent::NavigateBack);
        controller.obtain_event(PlayersEvent::AddPlayerButton);

        loop {
            let state = observer.next().await.unwrap();
            if state.dialog_open {
                break;
            }
        }
        assert_eq!(navigator.commands(), vec![NavigationCommand::Back]);
    }
}
