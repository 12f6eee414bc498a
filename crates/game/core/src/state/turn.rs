//! Turn Ledger: player move-points, turn phase and the global turn counter.
//!
//! AI actors carry their own [`ApPool`](super::ApPool) on their actor state; the
//! ledger only tracks the human player's budget.

use super::EntityId;

/// Phase within a single game turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TurnPhase {
    #[default]
    PlayerTurn,
    AiTurn,
    TurnEnd,
}

/// Shared counter of player move-points, turn phase and turn number.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnLedger {
    pub player_moves: u32,
    pub phase: TurnPhase,
    /// Monotonic; only [`TurnLedger::end_turn`] advances it.
    pub turn_number: u64,
}

impl TurnLedger {
    pub fn new(player_moves: u32) -> Self {
        Self {
            player_moves,
            phase: TurnPhase::PlayerTurn,
            turn_number: 1,
        }
    }

    pub fn player_can_afford(&self, cost: u32) -> bool {
        self.player_moves >= cost
    }

    /// Withdraws player move-points, saturating at zero.
    pub fn debit_player_moves(&mut self, amount: u32) {
        self.player_moves = self.player_moves.saturating_sub(amount);
    }

    /// Starts the player's phase with a fresh move budget.
    pub fn begin_player_turn(&mut self, moves: u32) {
        self.player_moves = moves;
        self.phase = TurnPhase::PlayerTurn;
    }

    pub fn begin_ai_turn(&mut self) {
        self.phase = TurnPhase::AiTurn;
    }

    /// Closes the current turn and advances the counter.
    pub fn end_turn(&mut self) -> u64 {
        self.phase = TurnPhase::TurnEnd;
        self.turn_number += 1;
        self.turn_number
    }
}

impl Default for TurnLedger {
    fn default() -> Self {
        Self::new(0)
    }
}

/// The two ledger operations the Action API is allowed to perform.
pub trait ApLedger {
    /// Debits the human player's move-points.
    fn debit_player_moves(&mut self, amount: u32);

    /// Debits an AI actor's own AP pool. Returns false when the actor is
    /// missing, declares no pool, or cannot afford the cost.
    fn debit_actor_ap(&mut self, actor: EntityId, amount: u32) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_turn_is_monotonic() {
        let mut ledger = TurnLedger::new(100);
        assert_eq!(ledger.turn_number, 1);
        assert_eq!(ledger.end_turn(), 2);
        assert_eq!(ledger.end_turn(), 3);
        assert_eq!(ledger.phase, TurnPhase::TurnEnd);
    }

    #[test]
    fn player_moves_saturate() {
        let mut ledger = TurnLedger::new(100);
        ledger.debit_player_moves(60);
        assert!(!ledger.player_can_afford(50));
        ledger.debit_player_moves(60);
        assert_eq!(ledger.player_moves, 0);

        ledger.begin_player_turn(150);
        assert_eq!(ledger.player_moves, 150);
        assert_eq!(ledger.phase, TurnPhase::PlayerTurn);
    }
}
