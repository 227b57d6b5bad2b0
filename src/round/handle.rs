//! Shared, single-writer access to a round.
//!
//! Team formation, the wager ledger and settlement share invariants, so
//! the whole round sits behind one lock. Each call holds it for the full
//! validate-mutate-settle step; two actions arriving together are applied
//! one after the other, never interleaved.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::core::{Action, ActionError, ActionKind, PlayerId};

use super::controller::Round;
use super::snapshot::RoundSnapshot;

/// Cloneable handle to one round.
///
/// ```
/// use wolf_goat_pig::core::{Action, HoleDefinition, Player, PlayerId, RoundConfig};
/// use wolf_goat_pig::handicap::Handicap;
/// use wolf_goat_pig::round::{Round, SharedRound};
///
/// let players = (0..4)
///     .map(|i| Player::new(PlayerId::new(i), format!("P{i}"), Handicap::default()))
///     .collect();
/// let holes = (1..=18).map(|n| HoleDefinition::new(n, 4, n, 400)).collect();
/// let round = Round::create(players, holes, RoundConfig::default()).unwrap();
///
/// let handle = SharedRound::new(round);
/// let other = handle.clone();
/// other.apply(PlayerId::new(0), Action::DeclareSolo).unwrap();
/// assert!(handle.snapshot().hole.unwrap().formation.is_resolved());
/// ```
#[derive(Clone, Debug)]
pub struct SharedRound {
    inner: Arc<Mutex<Round>>,
}

impl SharedRound {
    /// Take ownership of a round.
    #[must_use]
    pub fn new(round: Round) -> Self {
        Self {
            inner: Arc::new(Mutex::new(round)),
        }
    }

    /// Apply an action under the lock.
    pub fn apply(&self, player: PlayerId, action: Action) -> Result<RoundSnapshot, ActionError> {
        self.lock().apply(player, action)
    }

    /// Current public state.
    #[must_use]
    pub fn snapshot(&self) -> RoundSnapshot {
        self.lock().snapshot()
    }

    /// Operations the player could perform right now.
    #[must_use]
    pub fn valid_actions(&self, player: PlayerId) -> Vec<ActionKind> {
        self.lock().valid_actions(player)
    }

    /// Run a closure with exclusive access to the round.
    pub fn with_round<R>(&self, f: impl FnOnce(&mut Round) -> R) -> R {
        f(&mut self.lock())
    }

    // Round mutations commit whole, so a poisoned lock still holds a
    // consistent round.
    fn lock(&self) -> MutexGuard<'_, Round> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{HoleDefinition, Player, PlayerMap, RoundConfig};
    use crate::handicap::Handicap;
    use std::thread;

    fn p(id: u8) -> PlayerId {
        PlayerId::new(id)
    }

    fn shared() -> SharedRound {
        let players = (0..4)
            .map(|i| Player::new(p(i), format!("P{i}"), Handicap::default()))
            .collect();
        let holes = (1..=18).map(|n| HoleDefinition::new(n, 4, n, 400)).collect();
        SharedRound::new(Round::create(players, holes, RoundConfig::default()).unwrap())
    }

    #[test]
    fn test_concurrent_submissions_apply_once() {
        let handle = shared();
        handle.apply(p(0), Action::DeclareSolo).unwrap();

        let workers: Vec<_> = (0..4)
            .map(|i| {
                let handle = handle.clone();
                thread::spawn(move || {
                    let gross = PlayerMap::from_vec(vec![4, 4, 4, 4]);
                    handle.apply(p(i), Action::SubmitScores { gross }).is_ok()
                })
            })
            .collect();
        let accepted = workers
            .into_iter()
            .map(|w| w.join().unwrap())
            .filter(|&ok| ok)
            .count();

        // The first submission settles hole 1; the rest hit hole 2, whose
        // teams are still pending.
        assert_eq!(accepted, 1);
        let snapshot = handle.snapshot();
        assert_eq!(snapshot.settlements.len(), 1);
        assert_eq!(snapshot.hole.map(|h| h.number), Some(2));
    }

    #[test]
    fn test_with_round() {
        let handle = shared();
        let closed = handle.with_round(|round| round.close_wagering()).unwrap();
        assert!(closed);
        assert!(handle.with_round(|round| round.ledger().is_some_and(|l| l.is_closed())));
    }
}
