//! Core types for Scorepad

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_type! {
    /// Opaque identifier for a player, stable for the player's lifetime.
    PlayerId
}
id_type!(GameId);
id_type!(RoundId);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: PlayerId::new(),
            name: name.into(),
        }
    }
}

/// One scored unit of play.
///
/// `result` maps each player to their score delta for this round; the map
/// keys give the at-most-one-entry-per-player guarantee structurally. Both
/// fields start empty and are filled in entry by entry as the user edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub id: RoundId,
    pub result: BTreeMap<PlayerId, i32>,
    pub winner: Option<PlayerId>,
}

impl Round {
    pub fn new() -> Self {
        Self {
            id: RoundId::new(),
            result: BTreeMap::new(),
            winner: None,
        }
    }
}

impl Default for Round {
    fn default() -> Self {
        Self::new()
    }
}

/// Ordered, append-only round history for a fixed set of players.
///
/// The player set is fixed at creation; rounds are appended in chronological
/// order and never reordered or rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub players: Vec<Player>,
    pub rounds: Vec<Round>,
    pub created_at: i64,
}

impl Game {
    pub fn new(players: Vec<Player>) -> Self {
        Self {
            id: GameId::new(),
            players,
            rounds: Vec::new(),
            created_at: chrono::Utc::now().timestamp(),
        }
    }
}

/// Projection of the game screen rendered by the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameViewState {
    pub game: Game,
    /// The round currently being edited; appended to `game.rounds` on
    /// advancing, never a member of it before that.
    pub current_round: Round,
    pub dialog_open: bool,
    /// `Some` only while `dialog_open` is true.
    pub selected_player: Option<Player>,
}

impl GameViewState {
    pub fn new(game: Game) -> Self {
        Self {
            game,
            current_round: Round::new(),
            dialog_open: false,
            selected_player: None,
        }
    }
}

/// Projection of the players screen rendered by the UI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayersViewState {
    pub players: Vec<Player>,
    pub dialog_open: bool,
}
