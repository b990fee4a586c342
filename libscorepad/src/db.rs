//! Sqlite-backed player repository

use std::path::Path;
use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::SqlitePool;
use sqlx::Row;
use tokio::sync::watch;
use uuid::Uuid;

use crate::error::{CollaboratorError, DbError, Result};
use crate::repository::PlayerRepository;
use crate::types::{Player, PlayerId};

/// Durable player roster backed by sqlite.
///
/// The observable snapshot is refreshed by re-querying after every mutation,
/// so subscribers always see the list the database holds, not an optimistic
/// local copy.
pub struct SqlitePlayerRepository {
    pool: SqlitePool,
    snapshot: watch::Sender<Vec<Player>>,
}

impl SqlitePlayerRepository {
    /// Open (creating if needed) the database at `db_path` and run
    /// migrations.
    pub async fn new(db_path: &str) -> Result<Self> {
        // Expand path and create parent directories
        let expanded_path = shellexpand::tilde(db_path).to_string();
        let path = Path::new(&expanded_path);

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(DbError::IoError)?;
        }

        // Use forward slashes for the sqlite URL and mode=rwc so the file is
        // created on first open
        let db_url = format!("sqlite://{}?mode=rwc", expanded_path.replace('\\', "/"));

        let pool = SqlitePool::connect(&db_url)
            .await
            .map_err(DbError::SqlxError)?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(DbError::MigrationError)?;

        let players = load_players(&pool).await?;
        let (snapshot, _) = watch::channel(players);

        Ok(Self { pool, snapshot })
    }

    async fn refresh(&self) -> std::result::Result<(), CollaboratorError> {
        let players = load_players(&self.pool)
            .await
            .map_err(|e| CollaboratorError::Repository(e.to_string()))?;
        let _ = self.snapshot.send(players);
        Ok(())
    }
}

async fn load_players(pool: &SqlitePool) -> Result<Vec<Player>> {
    let rows = sqlx::query("SELECT id, name FROM players ORDER BY created_at, id")
        .fetch_all(pool)
        .await
        .map_err(DbError::SqlxError)?;

    let mut players = Vec::with_capacity(rows.len());
    for row in rows {
        let id: String = row.get("id");
        let uuid = Uuid::from_str(&id)
            .map_err(|e| DbError::DecodeError(format!("player id '{id}': {e}")))?;
        players.push(Player {
            id: PlayerId::from(uuid),
            name: row.get("name"),
        });
    }
    Ok(players)
}

#[async_trait]
impl PlayerRepository for SqlitePlayerRepository {
    fn observe(&self) -> watch::Receiver<Vec<Player>> {
        self.snapshot.subscribe()
    }

    async fn add_player(&self, player: Player) -> std::result::Result<(), CollaboratorError> {
        sqlx::query("INSERT INTO players (id, name, created_at) VALUES (?, ?, ?)")
            .bind(player.id.to_string())
            .bind(&player.name)
            .bind(chrono::Utc::now().timestamp())
            .execute(&self.pool)
            .await
            .map_err(|e| CollaboratorError::Repository(format!("add_player failed: {e}")))?;

        self.refresh().await
    }

    async fn update_player(&self, player: Player) -> std::result::Result<(), CollaboratorError> {
        sqlx::query("UPDATE players SET name = ? WHERE id = ?")
            .bind(&player.name)
            .bind(player.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| CollaboratorError::Repository(format!("update_player failed: {e}")))?;

        self.refresh().await
    }

    async fn delete_player(&self, id: PlayerId) -> std::result::Result<(), CollaboratorError> {
        // Deleting an absent id matches zero rows and is not an error
        sqlx::query("DELETE FROM players WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| CollaboratorError::Repository(format!("delete_player failed: {e}")))?;

        self.refresh().await
    }
}
