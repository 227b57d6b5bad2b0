//! Public, serializable views of a round.

use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, PlayerMap, Quarters};
use crate::settlement::SettlementRecord;
use crate::teams::{FormationStage, TeamFormation};
use crate::wager::{Stake, WagerLedger};

use super::phase::Phase;

/// Everything a caller may show about the round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    pub phase: Phase,
    /// The open hole. `None` once the round is complete.
    pub hole: Option<HoleSnapshot>,
    pub standings: PlayerMap<Quarters>,
    /// Pool the open hole inherited from halved holes.
    pub carry_over: Quarters,
    pub float_used: PlayerMap<bool>,
    /// Every settled hole, in order.
    pub settlements: Vec<SettlementRecord>,
}

impl RoundSnapshot {
    /// Record for the most recently settled hole.
    #[must_use]
    pub fn last_settlement(&self) -> Option<&SettlementRecord> {
        self.settlements.last()
    }

    /// True after hole 18 settles.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }
}

/// The open hole.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoleSnapshot {
    pub number: u8,
    pub par: u8,
    pub stroke_index: u8,
    /// Hitting order; the first player is captain.
    pub order: Vec<PlayerId>,
    pub captain: PlayerId,
    pub aardvarks: Vec<PlayerId>,
    /// Last-place player during the final phase.
    pub goat: Option<PlayerId>,
    /// True until the Goat has picked a hitting position.
    pub awaiting_goat: bool,
    pub formation: TeamFormation,
    pub stage: FormationStage,
    pub ledger: WagerLedger,
    pub current_wager: Quarters,
    pub stake: Stake,
    pub line_of_scrimmage: Option<u32>,
}
