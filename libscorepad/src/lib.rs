//! Scorepad - reactive score tracking for round-based card games
//!
//! This library provides the headless core shared by every screen of a
//! score-counter application: a versioned observable state container,
//! per-screen event controllers with supervised task scopes, and the pure
//! score-aggregation domain logic. Rendering, navigation-stack mechanics and
//! dependency wiring live in the surrounding application shell.

pub mod config;
pub mod controller;
pub mod db;
pub mod endgame;
pub mod error;
pub mod game;
pub mod logging;
pub mod navigation;
pub mod players;
pub mod repository;
pub mod score;
pub mod service;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use controller::{Controller, Reducer};
pub use error::{Result, ScorepadError};
pub use navigation::{NavigationCommand, Navigator};
pub use repository::PlayerRepository;
pub use service::ScorepadService;
pub use store::StateStore;
pub use types::{Game, GameId, Player, PlayerId, Round, RoundId};
