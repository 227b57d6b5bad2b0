//! Team formation state machine for one hole.
//!
//! ## Flow
//!
//! ```text
//! AwaitingCaptainDecision ──request──▶ AwaitingPartnerResponse
//!        ▲                                  │
//!        └──────────── decline ─────────────┤
//!                                           │ accept
//!        solo ──────────────────────────────┤
//!                                           ▼
//!                     (aardvarks?) AwaitingAardvarkDecision ──▶ Resolved
//! ```
//!
//! The first four players in hitting order form the base group. The
//! captain either takes one of them as partner or goes solo. In five and
//! six player rounds each aardvark then asks to join a side (the side's
//! leader may toss them) or goes solo against everyone else.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{InvariantViolation, PlayerId, RejectReason, Rejection};

/// Players on one side of a hole, in hitting order.
pub type Side = SmallVec<[PlayerId; 6]>;

/// Size of the base group that the captain picks from.
pub const BASE_GROUP: usize = 4;

/// One of the two sides on a hole.
///
/// Side one is the captain's side, or the soloist when someone plays alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TeamId {
    One,
    Two,
}

impl TeamId {
    /// The opposing side.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            TeamId::One => TeamId::Two,
            TeamId::Two => TeamId::One,
        }
    }
}

/// How the hole's players split into competing sides.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TeamFormation {
    /// Decisions still outstanding.
    Pending,
    /// Two sides of one or more players, neither playing solo.
    Partners { team1: Side, team2: Side },
    /// One player against all others.
    Solo { soloist: PlayerId, opponents: Side },
}

impl TeamFormation {
    /// True once every player is on a side.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        !matches!(self, TeamFormation::Pending)
    }

    /// The solo player, if any.
    #[must_use]
    pub fn soloist(&self) -> Option<PlayerId> {
        match self {
            TeamFormation::Solo { soloist, .. } => Some(*soloist),
            TeamFormation::Partners { .. } | TeamFormation::Pending => None,
        }
    }

    /// Members of a side. Empty while pending.
    #[must_use]
    pub fn members(&self, team: TeamId) -> Side {
        match (self, team) {
            (TeamFormation::Pending, _) => Side::new(),
            (TeamFormation::Partners { team1, .. }, TeamId::One) => team1.clone(),
            (TeamFormation::Partners { team2, .. }, TeamId::Two) => team2.clone(),
            (TeamFormation::Solo { soloist, .. }, TeamId::One) => smallvec::smallvec![*soloist],
            (TeamFormation::Solo { opponents, .. }, TeamId::Two) => opponents.clone(),
        }
    }

    /// Which side a player is on.
    #[must_use]
    pub fn team_of(&self, player: PlayerId) -> Option<TeamId> {
        [TeamId::One, TeamId::Two]
            .into_iter()
            .find(|&team| self.members(team).contains(&player))
    }
}

/// Where the formation currently stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormationStage {
    /// Captain must request a partner or go solo.
    AwaitingCaptainDecision,
    /// Requested player must accept or decline.
    AwaitingPartnerResponse { requested: PlayerId },
    /// An aardvark must pick a side or go solo; `requested` is set while a
    /// side's answer is outstanding.
    AwaitingAardvarkDecision {
        aardvark: PlayerId,
        requested: Option<TeamId>,
    },
    /// Sides are final for the rest of the hole.
    Resolved,
}

/// Team formation for one hole.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormationMachine {
    order: Side,
    aardvarks: SmallVec<[PlayerId; 2]>,
    stage: FormationStage,
    team_one: Side,
    team_two: Side,
    soloist: Option<PlayerId>,
    excluded: Side,
    tossed: SmallVec<[(PlayerId, TeamId); 4]>,
    next_aardvark: usize,
}

impl FormationMachine {
    /// Start a hole with the given hitting order. The first player is
    /// captain; players beyond the base four are aardvarks.
    pub fn new(order: &[PlayerId]) -> Self {
        assert!(!order.is_empty(), "Hitting order must not be empty");

        Self {
            order: order.iter().copied().collect(),
            aardvarks: order.iter().skip(BASE_GROUP).copied().collect(),
            stage: FormationStage::AwaitingCaptainDecision,
            team_one: Side::new(),
            team_two: Side::new(),
            soloist: None,
            excluded: Side::new(),
            tossed: SmallVec::new(),
            next_aardvark: 0,
        }
    }

    // === Queries ===

    /// Hitting order for the hole.
    #[must_use]
    pub fn order(&self) -> &[PlayerId] {
        &self.order
    }

    /// The captain (first to hit).
    #[must_use]
    pub fn captain(&self) -> PlayerId {
        self.order[0]
    }

    /// Aardvarks, in hitting order.
    #[must_use]
    pub fn aardvarks(&self) -> &[PlayerId] {
        &self.aardvarks
    }

    /// True if the player hits after the base four.
    #[must_use]
    pub fn is_aardvark(&self, player: PlayerId) -> bool {
        self.aardvarks.contains(&player)
    }

    /// Current stage.
    #[must_use]
    pub fn stage(&self) -> FormationStage {
        self.stage
    }

    /// True once sides are final.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.stage == FormationStage::Resolved
    }

    /// Player playing alone, once declared.
    #[must_use]
    pub fn soloist(&self) -> Option<PlayerId> {
        self.soloist
    }

    /// Resolved formation, or `Pending`.
    #[must_use]
    pub fn formation(&self) -> TeamFormation {
        if !self.is_resolved() {
            return TeamFormation::Pending;
        }
        match self.soloist {
            Some(soloist) => TeamFormation::Solo {
                soloist,
                opponents: self.team_two.clone(),
            },
            None => TeamFormation::Partners {
                team1: self.team_one.clone(),
                team2: self.team_two.clone(),
            },
        }
    }

    /// Side a player has joined so far.
    #[must_use]
    pub fn team_of(&self, player: PlayerId) -> Option<TeamId> {
        if self.team_one.contains(&player) {
            Some(TeamId::One)
        } else if self.team_two.contains(&player) {
            Some(TeamId::Two)
        } else {
            None
        }
    }

    /// First member of a side in hitting order; answers aardvark requests.
    #[must_use]
    pub fn leader(&self, team: TeamId) -> Option<PlayerId> {
        self.side(team).first().copied()
    }

    /// Players the captain may still ask.
    #[must_use]
    pub fn partner_candidates(&self) -> Side {
        self.order
            .iter()
            .take(BASE_GROUP)
            .skip(1)
            .filter(|p| !self.excluded.contains(p))
            .copied()
            .collect()
    }

    /// Sides the current aardvark may still ask to join.
    #[must_use]
    pub fn open_sides(&self, aardvark: PlayerId) -> SmallVec<[TeamId; 2]> {
        [TeamId::One, TeamId::Two]
            .into_iter()
            .filter(|&team| self.side_open_to(aardvark, team).is_ok())
            .collect()
    }

    // === Captain decisions ===

    /// Captain asks `partner` to join.
    pub fn request_partner(&mut self, actor: PlayerId, partner: PlayerId) -> Result<(), Rejection> {
        self.expect_stage_captain()?;
        self.expect_captain(actor)?;

        if partner == actor {
            return Err(Rejection::new(
                RejectReason::SelfPartner,
                "the captain cannot partner with themselves",
            )
            .with_field("partner"));
        }
        if !self.order.contains(&partner) {
            return Err(Rejection::new(
                RejectReason::UnknownPlayer,
                format!("{partner} is not playing this hole"),
            )
            .with_field("partner"));
        }
        if self.is_aardvark(partner) {
            return Err(Rejection::new(
                RejectReason::PlayerExcluded,
                format!("{partner} is an aardvark and picks their own side"),
            )
            .with_field("partner"));
        }
        if self.excluded.contains(&partner) {
            return Err(Rejection::new(
                RejectReason::PlayerExcluded,
                format!("{partner} already declined this hole"),
            )
            .with_field("partner"));
        }

        self.stage = FormationStage::AwaitingPartnerResponse { requested: partner };
        Ok(())
    }

    /// Requested player accepts the partnership.
    pub fn accept_partner(&mut self, actor: PlayerId) -> Result<(), Rejection> {
        let requested = self.expect_partner_response(actor)?;
        let captain = self.captain();

        self.team_one = self.in_order(|p| p == captain || p == requested);
        self.team_two = self.base_excluding(&[captain, requested]);
        self.after_captain_resolution();
        Ok(())
    }

    /// Requested player refuses; the captain decides again.
    pub fn decline_partner(&mut self, actor: PlayerId) -> Result<(), Rejection> {
        let requested = self.expect_partner_response(actor)?;

        self.excluded.push(requested);
        self.stage = FormationStage::AwaitingCaptainDecision;
        Ok(())
    }

    /// Captain or current aardvark plays alone.
    pub fn declare_solo(&mut self, actor: PlayerId) -> Result<(), Rejection> {
        match self.stage {
            FormationStage::Resolved => Err(already_resolved()),
            FormationStage::AwaitingCaptainDecision => {
                self.expect_captain(actor)?;
                self.soloist = Some(actor);
                self.team_one = smallvec::smallvec![actor];
                self.team_two = self.base_excluding(&[actor]);
                self.after_captain_resolution();
                Ok(())
            }
            FormationStage::AwaitingAardvarkDecision { aardvark, requested } => {
                if actor != aardvark {
                    return Err(wrong_actor(actor, "it is not their decision"));
                }
                if requested.is_some() {
                    return Err(join_pending());
                }
                if let Some(soloist) = self.soloist {
                    return Err(Rejection::new(
                        RejectReason::SoloTaken,
                        format!("{soloist} is already playing solo"),
                    ));
                }
                self.soloist = Some(actor);
                self.team_one = smallvec::smallvec![actor];
                self.team_two = self.in_order(|p| p != actor);
                self.stage = FormationStage::Resolved;
                Ok(())
            }
            FormationStage::AwaitingPartnerResponse { requested } => Err(Rejection::new(
                RejectReason::WrongPhase,
                format!("waiting for {requested} to answer the partner request"),
            )),
        }
    }

    // === Aardvark decisions ===

    /// Current aardvark asks to join `team`.
    pub fn aardvark_request(&mut self, actor: PlayerId, team: TeamId) -> Result<(), Rejection> {
        let aardvark = self.expect_aardvark_turn(actor)?;
        self.side_open_to(aardvark, team)?;

        self.stage = FormationStage::AwaitingAardvarkDecision {
            aardvark,
            requested: Some(team),
        };
        Ok(())
    }

    /// Leader of the requested side takes the aardvark.
    pub fn aardvark_accept(&mut self, actor: PlayerId, aardvark: PlayerId) -> Result<(), Rejection> {
        let team = self.expect_join_response(actor, aardvark)?;

        let joined = self.side(team).iter().copied().chain([aardvark]).collect::<Side>();
        let side = self.in_order(|p| joined.contains(&p));
        *self.side_mut(team) = side;
        self.advance_aardvark();
        Ok(())
    }

    /// Leader of the requested side tosses the aardvark.
    pub fn aardvark_reject(&mut self, actor: PlayerId, aardvark: PlayerId) -> Result<(), Rejection> {
        let team = self.expect_join_response(actor, aardvark)?;

        let other_open = self.side_open_to(aardvark, team.other()).is_ok();
        if !other_open && self.soloist.is_some() {
            return Err(Rejection::new(
                RejectReason::LastSideForAardvark,
                format!("{aardvark} has nowhere else to go"),
            )
            .with_field("aardvark"));
        }

        self.tossed.push((aardvark, team));
        self.stage = FormationStage::AwaitingAardvarkDecision {
            aardvark,
            requested: None,
        };
        Ok(())
    }

    // === Invariants ===

    /// Every player in the hole sits on exactly one side.
    pub fn verify(&self) -> Result<(), InvariantViolation> {
        if !self.is_resolved() {
            return Err(InvariantViolation::UnresolvedFormation);
        }
        for &player in &self.order {
            match (self.team_one.contains(&player), self.team_two.contains(&player)) {
                (true, true) => return Err(InvariantViolation::DuplicateAssignment { player }),
                (false, false) => return Err(InvariantViolation::UnassignedPlayer { player }),
                _ => {}
            }
        }
        Ok(())
    }

    // === Helpers ===

    fn side(&self, team: TeamId) -> &Side {
        match team {
            TeamId::One => &self.team_one,
            TeamId::Two => &self.team_two,
        }
    }

    fn side_mut(&mut self, team: TeamId) -> &mut Side {
        match team {
            TeamId::One => &mut self.team_one,
            TeamId::Two => &mut self.team_two,
        }
    }

    fn in_order(&self, keep: impl Fn(PlayerId) -> bool) -> Side {
        self.order.iter().copied().filter(|&p| keep(p)).collect()
    }

    fn base_excluding(&self, players: &[PlayerId]) -> Side {
        self.order
            .iter()
            .take(BASE_GROUP)
            .filter(|p| !players.contains(p))
            .copied()
            .collect()
    }

    fn after_captain_resolution(&mut self) {
        self.stage = match self.aardvarks.first() {
            Some(&aardvark) => FormationStage::AwaitingAardvarkDecision {
                aardvark,
                requested: None,
            },
            None => FormationStage::Resolved,
        };
    }

    fn advance_aardvark(&mut self) {
        self.next_aardvark += 1;
        self.stage = match self.aardvarks.get(self.next_aardvark) {
            Some(&aardvark) => FormationStage::AwaitingAardvarkDecision {
                aardvark,
                requested: None,
            },
            None => FormationStage::Resolved,
        };
    }

    fn side_open_to(&self, aardvark: PlayerId, team: TeamId) -> Result<(), Rejection> {
        if self.tossed.contains(&(aardvark, team)) {
            return Err(Rejection::new(
                RejectReason::SideTossed,
                format!("that side already tossed {aardvark}"),
            )
            .with_field("team"));
        }
        if team == TeamId::One && self.soloist == Some(self.captain()) {
            return Err(Rejection::new(
                RejectReason::SideClosed,
                "the captain is playing solo",
            )
            .with_field("team"));
        }
        Ok(())
    }

    fn expect_stage_captain(&self) -> Result<(), Rejection> {
        match self.stage {
            FormationStage::AwaitingCaptainDecision => Ok(()),
            FormationStage::Resolved => Err(already_resolved()),
            _ => Err(Rejection::new(
                RejectReason::WrongPhase,
                "the captain has already made a decision",
            )),
        }
    }

    fn expect_captain(&self, actor: PlayerId) -> Result<(), Rejection> {
        if actor == self.captain() {
            Ok(())
        } else {
            Err(wrong_actor(actor, "only the captain decides"))
        }
    }

    fn expect_partner_response(&self, actor: PlayerId) -> Result<PlayerId, Rejection> {
        match self.stage {
            FormationStage::AwaitingPartnerResponse { requested } if requested == actor => {
                Ok(requested)
            }
            FormationStage::AwaitingPartnerResponse { .. } => {
                Err(wrong_actor(actor, "they were not asked"))
            }
            FormationStage::Resolved => Err(already_resolved()),
            _ => Err(Rejection::new(
                RejectReason::WrongPhase,
                "no partner request is outstanding",
            )),
        }
    }

    fn expect_aardvark_turn(&self, actor: PlayerId) -> Result<PlayerId, Rejection> {
        match self.stage {
            FormationStage::AwaitingAardvarkDecision {
                aardvark,
                requested: None,
            } if aardvark == actor => Ok(aardvark),
            FormationStage::AwaitingAardvarkDecision {
                requested: Some(_), ..
            } => Err(join_pending()),
            FormationStage::AwaitingAardvarkDecision { .. } => {
                Err(wrong_actor(actor, "it is not their decision"))
            }
            FormationStage::Resolved => Err(already_resolved()),
            _ => Err(Rejection::new(
                RejectReason::WrongPhase,
                "aardvarks decide after the captain",
            )),
        }
    }

    fn expect_join_response(&self, actor: PlayerId, aardvark: PlayerId) -> Result<TeamId, Rejection> {
        match self.stage {
            FormationStage::AwaitingAardvarkDecision {
                aardvark: current,
                requested: Some(team),
            } => {
                if aardvark != current {
                    return Err(Rejection::new(
                        RejectReason::WrongPhase,
                        format!("{aardvark} has no join request outstanding"),
                    )
                    .with_field("aardvark"));
                }
                if self.leader(team) != Some(actor) {
                    return Err(wrong_actor(actor, "only the side's leader answers"));
                }
                Ok(team)
            }
            FormationStage::Resolved => Err(already_resolved()),
            _ => Err(Rejection::new(
                RejectReason::WrongPhase,
                "no join request is outstanding",
            )),
        }
    }
}

fn already_resolved() -> Rejection {
    Rejection::new(RejectReason::AlreadyResolved, "teams are already set for this hole")
}

fn join_pending() -> Rejection {
    Rejection::new(RejectReason::WrongPhase, "a join request is waiting for an answer")
}

fn wrong_actor(actor: PlayerId, why: &str) -> Rejection {
    Rejection::new(RejectReason::WrongActor, format!("{actor} cannot act: {why}"))
}
