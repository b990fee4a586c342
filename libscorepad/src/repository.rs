//! Player repository boundary
//!
//! The repository owns the durable player list independently of any screen;
//! controllers observe it through a conflated subscription and mutate it
//! through awaited calls. All calls may fail; controller supervision swallows
//! those failures.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::watch;

use crate::error::CollaboratorError;
use crate::types::{Player, PlayerId};

#[async_trait]
pub trait PlayerRepository: Send + Sync {
    /// Subscribe to the player list. The receiver holds the current list
    /// immediately and signals on every change; subscriptions are independent
    /// and restartable.
    fn observe(&self) -> watch::Receiver<Vec<Player>>;

    async fn add_player(&self, player: Player) -> Result<(), CollaboratorError>;

    /// Update an existing player by id. Updating an absent player is a no-op.
    async fn update_player(&self, player: Player) -> Result<(), CollaboratorError>;

    /// Delete by id. Deleting an absent player completes without error.
    async fn delete_player(&self, id: PlayerId) -> Result<(), CollaboratorError>;
}

/// In-memory repository for tests and ephemeral sessions
///
/// Behaves like the durable one, with a switch to make every write fail for
/// exercising the swallow-and-log supervision path.
pub struct MemoryPlayerRepository {
    players: Mutex<Vec<Player>>,
    snapshot: watch::Sender<Vec<Player>>,
    fail_writes: AtomicBool,
}

impl MemoryPlayerRepository {
    pub fn new() -> Arc<Self> {
        let (snapshot, _) = watch::channel(Vec::new());
        Arc::new(Self {
            players: Mutex::new(Vec::new()),
            snapshot,
            fail_writes: AtomicBool::new(false),
        })
    }

    pub fn with_players(players: Vec<Player>) -> Arc<Self> {
        let (snapshot, _) = watch::channel(players.clone());
        Arc::new(Self {
            players: Mutex::new(players),
            snapshot,
            fail_writes: AtomicBool::new(false),
        })
    }

    /// Make every subsequent write call fail.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self, operation: &str) -> Result<(), CollaboratorError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(CollaboratorError::Repository(format!(
                "{operation} failed: repository unavailable"
            )));
        }
        Ok(())
    }

    fn publish(&self, players: &[Player]) {
        let _ = self.snapshot.send(players.to_vec());
    }
}

#[async_trait]
impl PlayerRepository for MemoryPlayerRepository {
    fn observe(&self) -> watch::Receiver<Vec<Player>> {
        self.snapshot.subscribe()
    }

    async fn add_player(&self, player: Player) -> Result<(), CollaboratorError> {
        self.check_writable("add_player")?;
        let mut players = self.players.lock().unwrap();
        players.push(player);
        self.publish(&players);
        Ok(())
    }

    async fn update_player(&self, player: Player) -> Result<(), CollaboratorError> {
        self.check_writable("update_player")?;
        let mut players = self.players.lock().unwrap();
        if let Some(existing) = players.iter_mut().find(|p| p.id == player.id) {
            *existing = player;
            self.publish(&players);
        }
        Ok(())
    }

    async fn delete_player(&self, id: PlayerId) -> Result<(), CollaboratorError> {
        self.check_writable("delete_player")?;
        let mut players = self.players.lock().unwrap();
        let before = players.len();
        players.retain(|p| p.id != id);
        if players.len() != before {
            self.publish(&players);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_add_player_appears_in_snapshot() {
        let repo = MemoryPlayerRepository::new();
        let rx = repo.observe();

        repo.add_player(Player::new("Alice")).await.unwrap();

        let players = rx.borrow().clone();
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].name, "Alice");
    }

    #[tokio::test]
    async fn test_update_replaces_by_id() {
        let mut alice = Player::new("Alice");
        let repo = MemoryPlayerRepository::with_players(vec![alice.clone()]);

        alice.name = "Alicia".to_string();
        repo.update_player(alice.clone()).await.unwrap();

        let players = repo.observe().borrow().clone();
        assert_eq!(players, vec![alice]);
    }

    #[tokio::test]
    async fn test_update_absent_player_is_noop() {
        let repo = MemoryPlayerRepository::with_players(vec![Player::new("Alice")]);
        repo.update_player(Player::new("Ghost")).await.unwrap();

        assert_eq!(repo.observe().borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_absent_player_succeeds() {
        let repo = MemoryPlayerRepository::with_players(vec![Player::new("Alice")]);

        let result = repo.delete_player(PlayerId::new()).await;

        assert!(result.is_ok());
        assert_eq!(repo.observe().borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_fail_writes_rejects_all_mutations() {
        let repo = MemoryPlayerRepository::new();
        repo.set_fail_writes(true);

        assert!(repo.add_player(Player::new("Alice")).await.is_err());
        assert!(repo.update_player(Player::new("Alice")).await.is_err());
        assert!(repo.delete_player(PlayerId::new()).await.is_err());
    }

    #[tokio::test]
    async fn test_observe_signals_on_change() {
        let repo = MemoryPlayerRepository::new();
        let mut rx = repo.observe();

        repo.add_player(Player::new("Bob")).await.unwrap();

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().len(), 1);
    }
}
