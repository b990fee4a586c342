//! Score aggregation over a game's round history
//!
//! Totals are always re-derived from the recorded rounds; no running-total
//! field exists anywhere in the data model, so these functions are the single
//! authority on cumulative scores.

use crate::types::{Game, Player, PlayerId};

impl Game {
    /// Cumulative total per player, in `players` order.
    ///
    /// Every player of the game appears in the output, defaulting to 0 when
    /// they have no entry in any round. A player absent from a given round's
    /// result contributes 0 for that round.
    pub fn players_total(&self) -> Vec<(Player, i32)> {
        self.players
            .iter()
            .map(|player| (player.clone(), self.player_total(player.id)))
            .collect()
    }

    /// Cumulative total for a single player across all recorded rounds.
    pub fn player_total(&self, id: PlayerId) -> i32 {
        self.rounds
            .iter()
            .map(|round| round.result.get(&id).copied().unwrap_or(0))
            .sum()
    }
}
