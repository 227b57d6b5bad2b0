//! Wager ledger for one hole.
//!
//! ## Stake arithmetic
//!
//! ```text
//! base    = unit × phase multiplier × 2 (Float) × 2 (Option)
//! current = base × 2^(accepted doubles)
//! stake   = current × 3/2 when a Duncan or Tunkarri is active
//! ```
//!
//! `unit` is the round's base wager, or the Goat's Joe's Special in the
//! final phase. The carry-over pool from halved holes rides alongside and
//! is paid to whoever wins the hole outright.
//!
//! ## Doubling
//!
//! Either side may offer the first double while wagering is open. After an
//! acceptance only the side that was just doubled may raise again. A
//! declined double concedes the hole at the pre-offer wager. Once wagering
//! closes, only a soloist may still offer.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{PlayerId, Quarters, RejectReason, Rejection};
use crate::teams::{FormationMachine, TeamId};

/// 3-for-2 solo declarations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoloSpecial {
    /// Declared by a soloing captain.
    Duncan,
    /// Declared by a soloing aardvark.
    Tunkarri,
}

/// The per-unit stake as an exact fraction of quarters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stake {
    pub numer: Quarters,
    pub denom: Quarters,
}

impl Stake {
    /// Decimal value.
    #[must_use]
    pub fn value(self) -> f64 {
        self.numer as f64 / self.denom as f64
    }
}

/// An unanswered double.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DoubleOffer {
    pub team: TeamId,
    pub offered_by: PlayerId,
}

/// One entry in the hole's wager history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WagerEvent {
    Float { by: PlayerId },
    Option,
    JoesSpecial { wager: Quarters },
    DoubleOffered { team: TeamId },
    DoubleAccepted { team: TeamId, wager: Quarters },
    DoubleDeclined { team: TeamId },
    Special { kind: SoloSpecial, by: PlayerId },
    Closed,
}

/// Stake, escalation and conventions for one hole.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WagerLedger {
    unit: Quarters,
    phase_multiplier: Quarters,
    float_by: Option<PlayerId>,
    option: bool,
    ping_pong: u32,
    offer: Option<DoubleOffer>,
    last_doubled: Option<TeamId>,
    special: Option<SoloSpecial>,
    carry_over: Quarters,
    closed: bool,
    conceded_by: Option<TeamId>,
    history: SmallVec<[WagerEvent; 8]>,
}

impl WagerLedger {
    /// Open a ledger with the hole's unit wager and inherited carry-over.
    #[must_use]
    pub fn new(unit: Quarters, phase_multiplier: Quarters, carry_over: Quarters) -> Self {
        Self {
            unit,
            phase_multiplier,
            float_by: None,
            option: false,
            ping_pong: 0,
            offer: None,
            last_doubled: None,
            special: None,
            carry_over,
            closed: false,
            conceded_by: None,
            history: SmallVec::new(),
        }
    }

    // === Queries ===

    /// Unit wager before multipliers.
    #[must_use]
    pub fn unit(&self) -> Quarters {
        self.unit
    }

    /// Base wager after phase, Float and Option.
    #[must_use]
    pub fn base(&self) -> Quarters {
        let mut base = self.unit.saturating_mul(self.phase_multiplier);
        if self.float_by.is_some() {
            base = base.saturating_mul(2);
        }
        if self.option {
            base = base.saturating_mul(2);
        }
        base
    }

    /// Base wager after accepted doubles.
    #[must_use]
    pub fn current_wager(&self) -> Quarters {
        self.base().saturating_mul(2i64.saturating_pow(self.ping_pong))
    }

    /// Current wager including any 3-for-2 solo multiplier.
    #[must_use]
    pub fn stake(&self) -> Stake {
        match self.special {
            Some(_) => Stake {
                numer: self.current_wager().saturating_mul(3),
                denom: 2,
            },
            None => Stake {
                numer: self.current_wager(),
                denom: 1,
            },
        }
    }

    /// Number of accepted doubles.
    #[must_use]
    pub fn ping_pong(&self) -> u32 {
        self.ping_pong
    }

    /// Quarters inherited from halved holes.
    #[must_use]
    pub fn carry_over(&self) -> Quarters {
        self.carry_over
    }

    /// Captain who floated this hole.
    #[must_use]
    pub fn float_by(&self) -> Option<PlayerId> {
        self.float_by
    }

    /// True once the Option has doubled the base.
    #[must_use]
    pub fn option_applied(&self) -> bool {
        self.option
    }

    /// Active 3-for-2 declaration.
    #[must_use]
    pub fn special(&self) -> Option<SoloSpecial> {
        self.special
    }

    /// Unanswered double.
    #[must_use]
    pub fn pending_offer(&self) -> Option<DoubleOffer> {
        self.offer
    }

    /// True once ordinary wagering is over.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Side that declined a double and gave up the hole.
    #[must_use]
    pub fn conceded_by(&self) -> Option<TeamId> {
        self.conceded_by
    }

    /// Everything that changed the stake, in order.
    #[must_use]
    pub fn history(&self) -> &[WagerEvent] {
        &self.history
    }

    /// True before any player has raised the stake. The Option does not
    /// count; it is applied by the round, not a player.
    #[must_use]
    pub fn is_untouched(&self) -> bool {
        self.float_by.is_none() && self.ping_pong == 0 && self.offer.is_none()
    }

    /// True once any double has been offered on this hole.
    #[must_use]
    pub fn has_doubling(&self) -> bool {
        self.ping_pong > 0 || self.offer.is_some() || self.conceded_by.is_some()
    }

    // === Operations ===

    /// Replace the unit wager (Joe's Special). Only before any escalation.
    pub fn set_unit(&mut self, wager: Quarters) -> Result<(), Rejection> {
        self.expect_open()?;
        if !self.is_untouched() {
            return Err(Rejection::new(
                RejectReason::WrongPhase,
                "the wager has already been raised this hole",
            ));
        }
        self.unit = wager;
        self.history.push(WagerEvent::JoesSpecial { wager });
        Ok(())
    }

    /// Captain doubles the base wager. `used_this_round` is true if the
    /// captain floated on an earlier hole.
    pub fn invoke_float(
        &mut self,
        actor: PlayerId,
        teams: &FormationMachine,
        used_this_round: bool,
    ) -> Result<(), Rejection> {
        self.expect_open()?;
        if actor != teams.captain() {
            return Err(Rejection::new(
                RejectReason::WrongActor,
                format!("{actor} is not the captain"),
            ));
        }
        if self.float_by.is_some() {
            return Err(Rejection::new(
                RejectReason::AlreadyInvoked,
                "this hole has already been floated",
            ));
        }
        if used_this_round {
            return Err(Rejection::new(
                RejectReason::FloatAlreadyUsed,
                format!("{actor} has already used their Float this round"),
            ));
        }

        self.float_by = Some(actor);
        self.history.push(WagerEvent::Float { by: actor });
        Ok(())
    }

    /// Apply the Option. Returns false if it was already applied.
    pub fn invoke_option(&mut self) -> bool {
        if self.option {
            return false;
        }
        self.option = true;
        self.history.push(WagerEvent::Option);
        true
    }

    /// Offer to double on behalf of the actor's side.
    pub fn offer_double(&mut self, actor: PlayerId, teams: &FormationMachine) -> Result<(), Rejection> {
        let team = resolved_team(actor, teams)?;
        if self.conceded_by.is_some() {
            return Err(conceded());
        }
        if let Some(offer) = self.offer {
            return Err(Rejection::new(
                RejectReason::DoublePending,
                format!("{} has a double waiting for an answer", offer.offered_by),
            ));
        }
        if self.closed && teams.soloist() != Some(actor) {
            return Err(Rejection::new(
                RejectReason::WageringClosed,
                "wagering is closed; only a soloist may still double",
            ));
        }
        if let Some(doubled) = self.last_doubled {
            if doubled != team {
                return Err(Rejection::new(
                    RejectReason::NotYourRedouble,
                    "only the side that was just doubled may raise again",
                ));
            }
        }

        self.offer = Some(DoubleOffer {
            team,
            offered_by: actor,
        });
        self.history.push(WagerEvent::DoubleOffered { team });
        Ok(())
    }

    /// Accept the outstanding double on behalf of the actor's side.
    pub fn accept_double(&mut self, actor: PlayerId, teams: &FormationMachine) -> Result<(), Rejection> {
        let team = self.expect_responder(actor, teams)?;

        self.offer = None;
        self.ping_pong += 1;
        self.last_doubled = Some(team);
        self.history.push(WagerEvent::DoubleAccepted {
            team,
            wager: self.current_wager(),
        });
        Ok(())
    }

    /// Decline the outstanding double; the actor's side concedes the hole.
    pub fn decline_double(&mut self, actor: PlayerId, teams: &FormationMachine) -> Result<TeamId, Rejection> {
        let team = self.expect_responder(actor, teams)?;

        self.offer = None;
        self.conceded_by = Some(team);
        self.history.push(WagerEvent::DoubleDeclined { team });
        self.close();
        Ok(team)
    }

    /// Soloing captain claims the 3-for-2 payout.
    pub fn invoke_duncan(&mut self, actor: PlayerId, teams: &FormationMachine) -> Result<(), Rejection> {
        if actor != teams.captain() {
            return Err(Rejection::new(
                RejectReason::WrongActor,
                "only the captain may call a Duncan",
            ));
        }
        self.invoke_special(SoloSpecial::Duncan, actor, teams)
    }

    /// Soloing aardvark claims the 3-for-2 payout.
    pub fn invoke_tunkarri(&mut self, actor: PlayerId, teams: &FormationMachine) -> Result<(), Rejection> {
        if !teams.is_aardvark(actor) {
            return Err(Rejection::new(
                RejectReason::WrongActor,
                "only an aardvark may call a Tunkarri",
            ));
        }
        self.invoke_special(SoloSpecial::Tunkarri, actor, teams)
    }

    /// Close ordinary wagering. Returns false if already closed.
    pub fn close(&mut self) -> bool {
        if self.closed {
            return false;
        }
        self.closed = true;
        self.history.push(WagerEvent::Closed);
        true
    }

    // === Helpers ===

    fn invoke_special(
        &mut self,
        kind: SoloSpecial,
        actor: PlayerId,
        teams: &FormationMachine,
    ) -> Result<(), Rejection> {
        self.expect_open()?;
        if teams.soloist() != Some(actor) {
            return Err(Rejection::new(
                RejectReason::NotSolo,
                format!("{actor} has not declared solo"),
            ));
        }
        if self.special.is_some() {
            return Err(Rejection::new(
                RejectReason::AlreadyInvoked,
                "a 3-for-2 declaration is already active",
            ));
        }

        self.special = Some(kind);
        self.history.push(WagerEvent::Special { kind, by: actor });
        Ok(())
    }

    fn expect_open(&self) -> Result<(), Rejection> {
        if self.conceded_by.is_some() {
            return Err(conceded());
        }
        if self.closed {
            return Err(Rejection::new(
                RejectReason::WageringClosed,
                "wagering is closed for this hole",
            ));
        }
        Ok(())
    }

    fn expect_responder(&self, actor: PlayerId, teams: &FormationMachine) -> Result<TeamId, Rejection> {
        let offer = self.offer.ok_or_else(|| {
            Rejection::new(RejectReason::NoDoublePending, "no double is waiting for an answer")
        })?;
        let team = resolved_team(actor, teams)?;
        if team == offer.team {
            return Err(Rejection::new(
                RejectReason::WrongActor,
                "the offering side cannot answer its own double",
            ));
        }
        Ok(team)
    }
}

fn resolved_team(actor: PlayerId, teams: &FormationMachine) -> Result<TeamId, Rejection> {
    if !teams.is_resolved() {
        return Err(Rejection::new(
            RejectReason::TeamsPending,
            "sides are not settled yet",
        ));
    }
    teams.team_of(actor).ok_or_else(|| {
        Rejection::new(
            RejectReason::UnknownPlayer,
            format!("{actor} is not playing this hole"),
        )
    })
}

fn conceded() -> Rejection {
    Rejection::new(RejectReason::WageringClosed, "the hole has been conceded")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(id: u8) -> PlayerId {
        PlayerId::new(id)
    }

    fn partners() -> FormationMachine {
        let order: Vec<_> = (0..4).map(p).collect();
        let mut teams = FormationMachine::new(&order);
        teams.request_partner(p(0), p(1)).unwrap();
        teams.accept_partner(p(1)).unwrap();
        teams
    }

    fn captain_solo() -> FormationMachine {
        let order: Vec<_> = (0..4).map(p).collect();
        let mut teams = FormationMachine::new(&order);
        teams.declare_solo(p(0)).unwrap();
        teams
    }

    #[test]
    fn test_base_multipliers() {
        let mut ledger = WagerLedger::new(1, 2, 0);
        assert_eq!(ledger.base(), 2);
        ledger.invoke_float(p(0), &partners(), false).unwrap();
        assert!(ledger.invoke_option());
        assert!(!ledger.invoke_option());
        assert_eq!(ledger.base(), 8);
        assert_eq!(ledger.current_wager(), 8);
    }

    #[test]
    fn test_float_rules() {
        let teams = partners();
        let mut ledger = WagerLedger::new(1, 1, 0);

        let err = ledger.invoke_float(p(1), &teams, false).unwrap_err();
        assert_eq!(err.reason, RejectReason::WrongActor);

        let err = ledger.invoke_float(p(0), &teams, true).unwrap_err();
        assert_eq!(err.reason, RejectReason::FloatAlreadyUsed);

        ledger.invoke_float(p(0), &teams, false).unwrap();
        let err = ledger.invoke_float(p(0), &teams, false).unwrap_err();
        assert_eq!(err.reason, RejectReason::AlreadyInvoked);
    }

    #[test]
    fn test_double_accept_and_redouble() {
        let teams = partners();
        let mut ledger = WagerLedger::new(1, 1, 0);

        ledger.offer_double(p(0), &teams).unwrap();
        let err = ledger.offer_double(p(2), &teams).unwrap_err();
        assert_eq!(err.reason, RejectReason::DoublePending);

        let err = ledger.accept_double(p(1), &teams).unwrap_err();
        assert_eq!(err.reason, RejectReason::WrongActor);

        ledger.accept_double(p(2), &teams).unwrap();
        assert_eq!(ledger.current_wager(), 2);
        assert_eq!(ledger.ping_pong(), 1);

        // The side that was doubled may redouble; the doubler may not.
        let err = ledger.offer_double(p(0), &teams).unwrap_err();
        assert_eq!(err.reason, RejectReason::NotYourRedouble);
        ledger.offer_double(p(3), &teams).unwrap();
        ledger.accept_double(p(1), &teams).unwrap();
        assert_eq!(ledger.current_wager(), 4);
        assert_eq!(ledger.ping_pong(), 2);
    }

    #[test]
    fn test_decline_concedes() {
        let teams = partners();
        let mut ledger = WagerLedger::new(1, 1, 0);
        ledger.offer_double(p(0), &teams).unwrap();
        let conceding = ledger.decline_double(p(3), &teams).unwrap();

        assert_eq!(conceding, TeamId::Two);
        assert_eq!(ledger.conceded_by(), Some(TeamId::Two));
        assert!(ledger.is_closed());
        assert_eq!(ledger.current_wager(), 1);
    }

    #[test]
    fn test_double_needs_teams() {
        let order: Vec<_> = (0..4).map(p).collect();
        let teams = FormationMachine::new(&order);
        let mut ledger = WagerLedger::new(1, 1, 0);
        let err = ledger.offer_double(p(0), &teams).unwrap_err();
        assert_eq!(err.reason, RejectReason::TeamsPending);
    }

    #[test]
    fn test_closed_wagering_only_soloist_doubles() {
        let teams = captain_solo();
        let mut ledger = WagerLedger::new(1, 1, 0);
        ledger.close();

        let err = ledger.offer_double(p(1), &teams).unwrap_err();
        assert_eq!(err.reason, RejectReason::WageringClosed);
        ledger.offer_double(p(0), &teams).unwrap();
        ledger.accept_double(p(1), &teams).unwrap();
        assert_eq!(ledger.current_wager(), 2);
    }

    #[test]
    fn test_closed_partners_cannot_double() {
        let teams = partners();
        let mut ledger = WagerLedger::new(1, 1, 0);
        ledger.close();
        for actor in 0..4 {
            let err = ledger.offer_double(p(actor), &teams).unwrap_err();
            assert_eq!(err.reason, RejectReason::WageringClosed);
        }
    }

    #[test]
    fn test_duncan() {
        let teams = captain_solo();
        let mut ledger = WagerLedger::new(2, 1, 0);

        let err = ledger.invoke_tunkarri(p(0), &teams).unwrap_err();
        assert_eq!(err.reason, RejectReason::WrongActor);

        ledger.invoke_duncan(p(0), &teams).unwrap();
        assert_eq!(ledger.special(), Some(SoloSpecial::Duncan));
        assert_eq!(ledger.stake(), Stake { numer: 6, denom: 2 });
        assert!((ledger.stake().value() - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_duncan_requires_solo_and_open() {
        let mut ledger = WagerLedger::new(1, 1, 0);
        let err = ledger.invoke_duncan(p(0), &partners()).unwrap_err();
        assert_eq!(err.reason, RejectReason::NotSolo);

        ledger.close();
        let err = ledger.invoke_duncan(p(0), &captain_solo()).unwrap_err();
        assert_eq!(err.reason, RejectReason::WageringClosed);
    }

    #[test]
    fn test_joes_special_only_before_escalation() {
        let teams = partners();
        let mut ledger = WagerLedger::new(1, 1, 0);
        ledger.set_unit(4).unwrap();
        assert_eq!(ledger.current_wager(), 4);

        ledger.invoke_float(p(0), &teams, false).unwrap();
        let err = ledger.set_unit(8).unwrap_err();
        assert_eq!(err.reason, RejectReason::WrongPhase);
    }

    #[test]
    fn test_joes_special_stacks_with_option() {
        let mut ledger = WagerLedger::new(1, 1, 0);
        ledger.invoke_option();
        ledger.set_unit(4).unwrap();
        assert_eq!(ledger.current_wager(), 8);
    }

    #[test]
    fn test_history_records_escalation() {
        let teams = partners();
        let mut ledger = WagerLedger::new(1, 1, 3);
        ledger.offer_double(p(2), &teams).unwrap();
        ledger.accept_double(p(0), &teams).unwrap();
        assert_eq!(ledger.carry_over(), 3);
        assert_eq!(
            ledger.history(),
            &[
                WagerEvent::DoubleOffered { team: TeamId::Two },
                WagerEvent::DoubleAccepted { team: TeamId::One, wager: 2 },
            ]
        );
    }
}
