//! Service facade wiring config, persistence and controllers
//!
//! `ScorepadService` is the single entry point an application shell needs:
//! it resolves configuration, opens the player database and hands out
//! screen controllers sharing those resources.

use std::sync::Arc;
use std::time::Duration;

use crate::config::{resolve_db_path, Config};
use crate::db::SqlitePlayerRepository;
use crate::endgame::EndGameController;
use crate::game::GameController;
use crate::navigation::Navigator;
use crate::players::PlayersController;
use crate::repository::PlayerRepository;
use crate::types::Game;
use crate::Result;

pub struct ScorepadService {
    repository: Arc<SqlitePlayerRepository>,
}

impl ScorepadService {
    /// Create a service from the default configuration location.
    pub async fn new() -> Result<Self> {
        let config = Config::load()?;
        Self::from_config(config).await
    }

    /// Create a service from a pre-built configuration.
    pub async fn from_config(config: Config) -> Result<Self> {
        let db_path = resolve_db_path(Some(&config.database.path))?;
        let db_path = db_path.to_str().ok_or_else(|| {
            crate::error::ConfigError::MissingField("invalid database path".to_string())
        })?;
        let repository = Arc::new(SqlitePlayerRepository::new(db_path).await?);

        Ok(Self { repository })
    }

    /// The shared player repository.
    pub fn player_repository(&self) -> Arc<dyn PlayerRepository> {
        Arc::clone(&self.repository) as Arc<dyn PlayerRepository>
    }

    pub fn players_controller(&self, navigator: Arc<dyn Navigator>) -> PlayersController {
        PlayersController::new(self.player_repository(), navigator)
    }

    pub fn game_controller(&self, game: Game, navigator: Arc<dyn Navigator>) -> GameController {
        GameController::new(game, navigator)
    }

    pub fn end_game_controller(
        &self,
        navigator: Arc<dyn Navigator>,
        delay: Duration,
    ) -> EndGameController {
        EndGameController::new(navigator, delay)
    }
}
