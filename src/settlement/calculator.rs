//! Hole settlement: best ball, halves, carry-over and payouts.
//!
//! ## Amount moved on a decided hole
//!
//! With `w` the current wager and `W = w + carry-over pool`:
//!
//! | formation          | total moved                               |
//! |--------------------|-------------------------------------------|
//! | partners           | `W × size of the smaller side`            |
//! | solo               | `2W` per opponent                         |
//! | Duncan / Tunkarri  | `3w/2` half up, plus the pool, per opponent |
//!
//! A halved hole moves nothing and adds the current wager to the pool. A
//! conceded hole settles at the wager standing when the double was
//! declined, with the conceding side as loser.

use serde::{Deserialize, Serialize};

use crate::core::{InvariantViolation, PlayerId, PlayerMap, Quarters};
use crate::handicap::NetScore;
use crate::teams::{TeamFormation, TeamId};
use crate::wager::{SoloSpecial, WagerLedger};

use super::distribution::distribute;

/// How a hole ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HoleOutcome {
    /// One side had the lower best ball.
    Won { winner: TeamId, best: NetScore },
    /// Both best balls were equal.
    Halved { best: NetScore },
    /// A side declined a double.
    Conceded { by: TeamId },
}

impl HoleOutcome {
    /// Winning side, if the hole was not halved.
    #[must_use]
    pub fn winner(self) -> Option<TeamId> {
        match self {
            HoleOutcome::Won { winner, .. } => Some(winner),
            HoleOutcome::Conceded { by } => Some(by.other()),
            HoleOutcome::Halved { .. } => None,
        }
    }
}

/// Immutable result of settling one hole.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementRecord {
    pub hole: u8,
    pub outcome: HoleOutcome,
    /// Wager after all doubling, before the solo multiplier.
    pub wager: Quarters,
    pub special: Option<SoloSpecial>,
    /// Quarters that changed hands.
    pub transferred: Quarters,
    /// Pool inherited from earlier halved holes.
    pub carry_in: Quarters,
    /// Pool handed to the next hole.
    pub carry_out: Quarters,
    pub deltas: PlayerMap<Quarters>,
}

impl SettlementRecord {
    /// A player's change for the hole.
    #[must_use]
    pub fn delta(&self, player: PlayerId) -> Quarters {
        self.deltas.get(player).copied().unwrap_or(0)
    }

    /// Sum of all deltas. Always zero for a valid record.
    #[must_use]
    pub fn sum(&self) -> Quarters {
        self.deltas.values().sum()
    }
}

/// Everything settlement reads for one hole.
#[derive(Clone, Copy, Debug)]
pub struct HoleSettlement<'a> {
    pub hole: u8,
    pub formation: &'a TeamFormation,
    pub ledger: &'a WagerLedger,
    /// Net scores by seat. Not needed for a conceded hole.
    pub net_scores: Option<&'a PlayerMap<NetScore>>,
    /// Cumulative standings before this hole.
    pub standings: &'a PlayerMap<Quarters>,
}

/// Settle a hole.
///
/// Fails only on an engine defect: an unresolved or inconsistent
/// formation, missing scores, overflow, or deltas that do not balance.
pub fn settle(input: HoleSettlement<'_>) -> Result<SettlementRecord, InvariantViolation> {
    let player_count = input.standings.player_count();
    check_assignment(input.formation, player_count)?;

    let team_one = input.formation.members(TeamId::One);
    let team_two = input.formation.members(TeamId::Two);
    let ledger = input.ledger;
    let wager = ledger.current_wager();
    let carry_in = ledger.carry_over();

    let outcome = match ledger.conceded_by() {
        Some(by) => HoleOutcome::Conceded { by },
        None => {
            let net = input
                .net_scores
                .ok_or(InvariantViolation::MissingScores { hole: input.hole })?;
            compare(best_ball(&team_one, net)?, best_ball(&team_two, net)?)
        }
    };

    let Some(winner) = outcome.winner() else {
        let carry_out = carry_in
            .checked_add(wager)
            .ok_or(InvariantViolation::WagerOverflow)?;
        return Ok(SettlementRecord {
            hole: input.hole,
            outcome,
            wager,
            special: ledger.special(),
            transferred: 0,
            carry_in,
            carry_out,
            deltas: PlayerMap::with_value(player_count, 0),
        });
    };

    let transferred = amount_moved(
        input.formation,
        ledger.special(),
        wager,
        carry_in,
        &team_one,
        &team_two,
    )?;

    let (winners, losers) = match winner {
        TeamId::One => (&team_one, &team_two),
        TeamId::Two => (&team_two, &team_one),
    };
    let deltas = distribute(transferred, winners, losers, input.standings);

    let record = SettlementRecord {
        hole: input.hole,
        outcome,
        wager,
        special: ledger.special(),
        transferred,
        carry_in,
        carry_out: 0,
        deltas,
    };

    let sum = record.sum();
    if sum != 0 {
        return Err(InvariantViolation::UnbalancedSettlement {
            hole: input.hole,
            sum,
        });
    }
    Ok(record)
}

/// Lowest net score on a side.
pub fn best_ball(side: &[PlayerId], net: &PlayerMap<NetScore>) -> Result<NetScore, InvariantViolation> {
    let mut best: Option<NetScore> = None;
    for &player in side {
        let score = net
            .get(player)
            .copied()
            .ok_or(InvariantViolation::UnassignedPlayer { player })?;
        best = Some(best.map_or(score, |b| b.min(score)));
    }
    best.ok_or(InvariantViolation::UnresolvedFormation)
}

fn compare(one: NetScore, two: NetScore) -> HoleOutcome {
    match one.cmp(&two) {
        std::cmp::Ordering::Less => HoleOutcome::Won {
            winner: TeamId::One,
            best: one,
        },
        std::cmp::Ordering::Greater => HoleOutcome::Won {
            winner: TeamId::Two,
            best: two,
        },
        std::cmp::Ordering::Equal => HoleOutcome::Halved { best: one },
    }
}

fn amount_moved(
    formation: &TeamFormation,
    special: Option<SoloSpecial>,
    wager: Quarters,
    carry_in: Quarters,
    team_one: &[PlayerId],
    team_two: &[PlayerId],
) -> Result<Quarters, InvariantViolation> {
    let pot = wager.checked_add(carry_in);
    let total = match formation {
        TeamFormation::Pending => return Err(InvariantViolation::UnresolvedFormation),
        TeamFormation::Partners { .. } => {
            let smaller = team_one.len().min(team_two.len()) as Quarters;
            pot.and_then(|pot| pot.checked_mul(smaller))
        }
        TeamFormation::Solo { opponents, .. } => {
            // The 3-for-2 multiplier applies to the wager; the pool rides on top.
            let per_opponent = match special {
                Some(_) => wager
                    .checked_mul(3)
                    .map(|x| (x + 1) / 2)
                    .and_then(|x| x.checked_add(carry_in)),
                None => pot.and_then(|pot| pot.checked_mul(2)),
            };
            per_opponent.and_then(|per| per.checked_mul(opponents.len() as Quarters))
        }
    };
    total.ok_or(InvariantViolation::WagerOverflow)
}

fn check_assignment(formation: &TeamFormation, player_count: usize) -> Result<(), InvariantViolation> {
    if !formation.is_resolved() {
        return Err(InvariantViolation::UnresolvedFormation);
    }
    let team_one = formation.members(TeamId::One);
    let team_two = formation.members(TeamId::Two);
    for player in PlayerId::all(player_count) {
        match (team_one.contains(&player), team_two.contains(&player)) {
            (true, true) => return Err(InvariantViolation::DuplicateAssignment { player }),
            (false, false) => return Err(InvariantViolation::UnassignedPlayer { player }),
            _ => {}
        }
    }
    Ok(())
}
