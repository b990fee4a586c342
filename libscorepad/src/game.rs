//! Game screen: round editing and winner tracking
//!
//! The reducer implements the edit-dialog sub-state machine over the current
//! round. Guard violations (editing a declared winner's score, advancing the
//! round while the dialog is open) are silent no-ops, and malformed numeric
//! input degrades to a delta of 0; the user never sees an error from this
//! screen.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::controller::{Controller, ErrorReceiver, Reducer};
use crate::error::StateError;
use crate::navigation::{NavigationCommand, Navigator};
use crate::store::{StateObserver, StateStore};
use crate::types::{Game, GameViewState, Player, Round};

/// Events of the game screen.
#[derive(Debug, Clone)]
pub enum GameEvent {
    NavigateBack,
    /// Open the score dialog for a player, unless they are the declared
    /// winner of the current round.
    EditScore(Player),
    /// Commit the dialog's raw input as the selected player's delta for the
    /// current round. Non-numeric input commits 0.
    ConfirmEdition(String),
    DismissDialog,
    /// Declare (or re-declare) the current round's winner. Leaves the dialog
    /// and any entered scores untouched.
    SetWinner(Player),
    /// Archive the current round and start a fresh one. Ignored while the
    /// dialog is open; a winner is not required.
    NextRound,
}

pub struct GameReducer {
    store: Arc<StateStore<GameViewState>>,
    navigator: Arc<dyn Navigator>,
}

#[async_trait]
impl Reducer for GameReducer {
    type Event = GameEvent;

    async fn reduce(&mut self, event: GameEvent) -> crate::Result<()> {
        match event {
            GameEvent::NavigateBack => {
                self.navigator.navigate(NavigationCommand::Back).await?;
            }
            GameEvent::EditScore(player) => {
                let mut state = self.store.read()?;
                if state.current_round.winner == Some(player.id) {
                    debug!(player = %player.id, "edit refused, round winner is locked");
                    return Ok(());
                }
                state.selected_player = Some(player);
                state.dialog_open = true;
                self.store.write(state);
            }
            GameEvent::ConfirmEdition(raw) => {
                let mut state = self.store.read()?;
                let Some(player) = state.selected_player.take() else {
                    return Ok(());
                };
                // Fail soft: malformed input commits a delta of 0
                let delta = raw.trim().parse::<i32>().unwrap_or(0);
                state.current_round.result.insert(player.id, delta);
                state.dialog_open = false;
                self.store.write(state);
            }
            GameEvent::DismissDialog => {
                let mut state = self.store.read()?;
                state.selected_player = None;
                state.dialog_open = false;
                self.store.write(state);
            }
            GameEvent::SetWinner(player) => {
                let mut state = self.store.read()?;
                if !state.game.players.iter().any(|p| p.id == player.id) {
                    debug!(player = %player.id, "winner refused, not a member of this game");
                    return Ok(());
                }
                state.current_round.winner = Some(player.id);
                self.store.write(state);
            }
            GameEvent::NextRound => {
                let mut state = self.store.read()?;
                if state.dialog_open {
                    return Ok(());
                }
                let finished = std::mem::replace(&mut state.current_round, Round::new());
                state.game.rounds.push(finished);
                self.store.write(state);
            }
        }
        Ok(())
    }
}

/// Controller of the game screen. Owns the game aggregate exclusively; no
/// other component mutates it.
pub struct GameController {
    store: Arc<StateStore<GameViewState>>,
    controller: Controller<GameEvent>,
}

impl GameController {
    pub fn new(game: Game, navigator: Arc<dyn Navigator>) -> Self {
        let store = Arc::new(StateStore::with_initial(GameViewState::new(game)));
        let controller = Controller::spawn(
            "game",
            GameReducer {
                store: Arc::clone(&store),
                navigator,
            },
        );
        Self { store, controller }
    }

    pub fn obtain_event(&self, event: GameEvent) {
        self.controller.obtain_event(event);
    }

    pub fn observe(&self) -> StateObserver<GameViewState> {
        self.store.observe()
    }

    pub fn state(&self) -> Result<GameViewState, StateError> {
        self.store.read()
    }

    pub fn errors(&self) -> ErrorReceiver {
        self.controller.errors()
    }
}
