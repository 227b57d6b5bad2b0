//! Round and phase controller.
//!
//! A `Round` owns everything for one 18-hole game: players, course,
//! standings, the Float register, the carry-over pool, and the state of
//! the open hole. Holes run one at a time. Every player action goes
//! through [`Round::apply`], which works on a copy of the round and only
//! commits when the whole step succeeds, so a rejected action leaves the
//! round exactly as it was.
//!
//! ## Hole flow
//!
//! ```text
//! open hole ─▶ (final phase: Goat picks position) ─▶ team formation
//!          ─▶ wagering (shots may close it) ─▶ submit-scores ─▶ settle
//!          ─▶ next hole, or Complete after 18
//! ```
//!
//! A declined double skips straight to settlement.

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::core::{
    validate_course, Action, ActionError, ActionKind, ActionRecord, HoleDefinition, PersistError,
    PhaseSchedule, Player, PlayerId, PlayerMap, Quarters, RejectReason, Rejection, RoundConfig,
    HOLES_PER_ROUND, MAX_PLAYERS, MIN_PLAYERS,
};
use crate::handicap::{net_score, NetScore};
use crate::settlement::{settle, HoleSettlement, SettlementRecord};
use crate::teams::{FormationMachine, FormationStage, Side, TeamFormation, TeamId};
use crate::wager::{Scrimmage, WagerLedger};

use super::phase::Phase;
use super::snapshot::{HoleSnapshot, RoundSnapshot};

/// Gross score used to test whether a score submission would pass.
const SAMPLE_GROSS: u8 = 4;

/// State of the hole in play.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
struct HoleState {
    number: u8,
    /// Default hitting order before any Goat choice.
    rotation: Side,
    goat: Option<PlayerId>,
    awaiting_goat: bool,
    joes_special: Option<Quarters>,
    teams: FormationMachine,
    ledger: WagerLedger,
    scrimmage: Scrimmage,
}

/// One round of Wolf Goat Pig.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Round {
    players: Vec<Player>,
    holes: Vec<HoleDefinition>,
    config: RoundConfig,
    schedule: PhaseSchedule,
    phase: Phase,
    standings: PlayerMap<Quarters>,
    float_used: PlayerMap<bool>,
    carry_over: Quarters,
    hole: Option<HoleState>,
    settlements: Vector<SettlementRecord>,
    action_log: Vector<ActionRecord>,
    sequence: u32,
}

impl Round {
    /// Set up a round and open hole 1.
    ///
    /// Players must be listed in seat order (`players[i].id == PlayerId(i)`).
    pub fn create(
        players: Vec<Player>,
        holes: Vec<HoleDefinition>,
        config: RoundConfig,
    ) -> Result<Self, Rejection> {
        validate_setup(&players, &holes, &config)?;

        let player_count = players.len();
        let schedule = config.schedule_for(player_count);
        let mut round = Self {
            players,
            holes,
            config,
            schedule,
            phase: Phase::Regular,
            standings: PlayerMap::with_value(player_count, 0),
            float_used: PlayerMap::with_value(player_count, false),
            carry_over: 0,
            hole: None,
            settlements: Vector::new(),
            action_log: Vector::new(),
            sequence: 0,
        };
        round.open_hole(1);

        info!(
            players = player_count,
            base_wager = round.config.base_wager,
            late_round_start = schedule.late_round_start,
            final_phase_start = schedule.final_phase_start,
            "round created"
        );
        Ok(round)
    }

    // === Queries ===

    /// Number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Registered players in seat order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Round configuration.
    #[must_use]
    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    /// Phase thresholds in effect.
    #[must_use]
    pub fn schedule(&self) -> PhaseSchedule {
        self.schedule
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True once hole 18 has settled.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }

    /// Number of the open hole.
    #[must_use]
    pub fn hole_number(&self) -> Option<u8> {
        self.hole.as_ref().map(|hole| hole.number)
    }

    /// Course definition for a hole number.
    #[must_use]
    pub fn hole_definition(&self, number: u8) -> Option<&HoleDefinition> {
        self.holes.get(usize::from(number).checked_sub(1)?)
    }

    /// Captain of the open hole.
    #[must_use]
    pub fn captain(&self) -> Option<PlayerId> {
        self.hole.as_ref().map(|hole| hole.teams.captain())
    }

    /// Goat of the open hole, during the final phase.
    #[must_use]
    pub fn goat(&self) -> Option<PlayerId> {
        self.hole.as_ref().and_then(|hole| hole.goat)
    }

    /// Team formation of the open hole.
    #[must_use]
    pub fn formation(&self) -> TeamFormation {
        self.hole
            .as_ref()
            .map_or(TeamFormation::Pending, |hole| hole.teams.formation())
    }

    /// Wager ledger of the open hole.
    #[must_use]
    pub fn ledger(&self) -> Option<&WagerLedger> {
        self.hole.as_ref().map(|hole| &hole.ledger)
    }

    /// Cumulative quarters per player.
    #[must_use]
    pub fn standings(&self) -> &PlayerMap<Quarters> {
        &self.standings
    }

    /// Pool waiting for the next decided hole.
    #[must_use]
    pub fn carry_over(&self) -> Quarters {
        self.carry_over
    }

    /// True if the player has floated a hole this round.
    #[must_use]
    pub fn float_used(&self, player: PlayerId) -> bool {
        self.float_used.get(player).copied().unwrap_or(false)
    }

    /// Settled holes, in order.
    #[must_use]
    pub fn settlements(&self) -> &Vector<SettlementRecord> {
        &self.settlements
    }

    /// Every accepted action, in order.
    #[must_use]
    pub fn action_log(&self) -> &Vector<ActionRecord> {
        &self.action_log
    }

    /// Public view of the whole round.
    #[must_use]
    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            phase: self.phase,
            hole: self.hole.as_ref().map(|hole| self.hole_snapshot(hole)),
            standings: self.standings.clone(),
            carry_over: self.carry_over,
            float_used: self.float_used.clone(),
            settlements: self.settlements.iter().cloned().collect(),
        }
    }

    /// Decisions the player could make right now, with payloads.
    ///
    /// Shots and scores carry data from the course, so they are reported
    /// by [`Round::valid_actions`] but not enumerated here.
    #[must_use]
    pub fn legal_actions(&self, player: PlayerId) -> Vec<Action> {
        if self.hole.is_none() || player.index() >= self.players.len() {
            return Vec::new();
        }
        self.candidate_actions()
            .into_iter()
            .filter(|action| self.would_accept(player, action))
            .collect()
    }

    /// Names of the operations the player could perform right now.
    #[must_use]
    pub fn valid_actions(&self, player: PlayerId) -> Vec<ActionKind> {
        let mut kinds: Vec<ActionKind> = Vec::new();
        for action in self.legal_actions(player) {
            let kind = action.kind();
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }
        if self.hole.is_none() {
            return kinds;
        }

        if self.would_accept(player, &Action::RecordShot { distance: 0 }) {
            kinds.push(ActionKind::RecordShot);
        }
        let sample = Action::SubmitScores {
            gross: PlayerMap::with_value(self.players.len(), SAMPLE_GROSS),
        };
        if self.would_accept(player, &sample) {
            kinds.push(ActionKind::SubmitScores);
        }
        kinds
    }

    // === Operations ===

    /// Apply a player's action atomically.
    ///
    /// Returns the new snapshot, or the reason nothing changed.
    pub fn apply(&mut self, player: PlayerId, action: Action) -> Result<RoundSnapshot, ActionError> {
        let hole = self.hole_number();
        let kind = action.kind();

        let mut next = self.clone();
        match next.dispatch(player, &action) {
            Ok(()) => {
                debug!(hole, player = %player, action = %kind, "action applied");
                next.record(player, action, hole.unwrap_or(0));
                *self = next;
                Ok(self.snapshot())
            }
            Err(ActionError::Rejected(rejection)) => {
                debug!(
                    hole,
                    player = %player,
                    action = %kind,
                    code = rejection.code(),
                    "action rejected"
                );
                Err(rejection.into())
            }
            Err(ActionError::Invariant(violation)) => {
                error!(hole, player = %player, action = %kind, %violation, "settlement aborted");
                Err(violation.into())
            }
        }
    }

    /// Close ordinary wagering on the open hole. Returns false if it was
    /// already closed.
    pub fn close_wagering(&mut self) -> Result<bool, Rejection> {
        let hole = self.active_hole_mut()?;
        let closed = hole.ledger.close();
        if closed {
            debug!(hole = hole.number, "wagering closed");
        }
        Ok(closed)
    }

    /// Apply the Option to the open hole on behalf of the round.
    ///
    /// Only allowed while the captain is last in uneven standings. Returns
    /// false if it was already applied.
    pub fn invoke_option(&mut self) -> Result<bool, Rejection> {
        let captain = self.active_hole()?.teams.captain();
        if !self.captain_trails(captain) {
            return Err(Rejection::new(
                RejectReason::WrongPhase,
                format!("the Option needs a last-place captain; {captain} is not last"),
            ));
        }
        let hole = self.active_hole_mut()?;
        if hole.ledger.is_closed() {
            return Err(Rejection::new(
                RejectReason::WageringClosed,
                "wagering is closed for this hole",
            ));
        }
        if hole.ledger.has_doubling() {
            return Err(Rejection::new(
                RejectReason::WrongPhase,
                "the Option applies before any doubling",
            ));
        }
        let applied = hole.ledger.invoke_option();
        if applied {
            debug!(hole = hole.number, "option applied");
        }
        Ok(applied)
    }

    /// Encode the round for storage between calls.
    pub fn to_bytes(&self) -> Result<Vec<u8>, PersistError> {
        bincode::serialize(self).map_err(PersistError::Encode)
    }

    /// Restore a round encoded with [`Round::to_bytes`].
    ///
    /// The decoded state goes through the same checks as
    /// [`Round::create`], plus consistency of the per-player state.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PersistError> {
        let round: Self = bincode::deserialize(bytes).map_err(PersistError::Decode)?;
        round.validate_state()?;
        Ok(round)
    }

    fn validate_state(&self) -> Result<(), Rejection> {
        validate_setup(&self.players, &self.holes, &self.config)?;

        let player_count = self.players.len();
        if self.standings.player_count() != player_count {
            return Err(Rejection::new(
                RejectReason::InvalidConfig,
                format!(
                    "standings cover {} players, the round has {player_count}",
                    self.standings.player_count()
                ),
            )
            .with_field("standings"));
        }
        if self.float_used.player_count() != player_count {
            return Err(Rejection::new(
                RejectReason::InvalidConfig,
                format!(
                    "float register covers {} players, the round has {player_count}",
                    self.float_used.player_count()
                ),
            )
            .with_field("float_used"));
        }
        if self.schedule != self.config.schedule_for(player_count) {
            return Err(Rejection::new(
                RejectReason::InvalidConfig,
                "phase schedule does not match the configuration",
            )
            .with_field("schedule"));
        }

        let settled = self.settlements.len();
        let consistent = match &self.hole {
            Some(hole) => usize::from(hole.number) == settled + 1 && self.phase != Phase::Complete,
            None => settled == HOLES_PER_ROUND && self.phase == Phase::Complete,
        };
        if !consistent {
            return Err(Rejection::new(
                RejectReason::InvalidConfig,
                format!("open hole does not follow the {settled} settled holes"),
            )
            .with_field("hole"));
        }
        Ok(())
    }

    // === Dispatch ===

    fn dispatch(&mut self, player: PlayerId, action: &Action) -> Result<(), ActionError> {
        if player.index() >= self.players.len() {
            return Err(Rejection::new(
                RejectReason::UnknownPlayer,
                format!("{player} is not in this round"),
            )
            .with_field("player")
            .into());
        }

        match action {
            Action::RequestPartner { partner } => {
                self.with_hole(|hole| hole.teams.request_partner(player, *partner))
            }
            Action::AcceptPartner => self.with_hole(|hole| hole.teams.accept_partner(player)),
            Action::DeclinePartner => self.with_hole(|hole| hole.teams.decline_partner(player)),
            Action::DeclareSolo => self.with_hole(|hole| hole.teams.declare_solo(player)),
            Action::AardvarkJoinRequest { team } => {
                self.with_hole(|hole| hole.teams.aardvark_request(player, *team))
            }
            Action::AardvarkJoinAccept { aardvark } => {
                self.with_hole(|hole| hole.teams.aardvark_accept(player, *aardvark))
            }
            Action::AardvarkJoinReject { aardvark } => {
                self.with_hole(|hole| hole.teams.aardvark_reject(player, *aardvark))
            }
            Action::InvokeFloat => self.invoke_float(player),
            Action::InvokeOption => Err(Rejection::new(
                RejectReason::SystemOnly,
                "the Option is applied by the round, not by a player",
            )
            .into()),
            Action::OfferDouble => self.with_hole(|hole| hole.ledger.offer_double(player, &hole.teams)),
            Action::AcceptDouble => {
                self.with_hole(|hole| hole.ledger.accept_double(player, &hole.teams))
            }
            Action::DeclineDouble => self.decline_double(player),
            Action::InvokeDuncan => {
                self.with_hole(|hole| hole.ledger.invoke_duncan(player, &hole.teams))
            }
            Action::InvokeTunkarri => {
                self.with_hole(|hole| hole.ledger.invoke_tunkarri(player, &hole.teams))
            }
            Action::RecordShot { distance } => self.record_shot(player, *distance),
            Action::ChooseHittingPosition { position } => {
                self.choose_hitting_position(player, *position)
            }
            Action::JoesSpecial { wager } => self.joes_special(player, *wager),
            Action::SubmitScores { gross } => self.submit_scores(gross),
        }
    }

    fn with_hole<T>(
        &mut self,
        f: impl FnOnce(&mut HoleState) -> Result<T, Rejection>,
    ) -> Result<T, ActionError> {
        let hole = self.active_hole_mut()?;
        Ok(f(hole)?)
    }

    fn invoke_float(&mut self, player: PlayerId) -> Result<(), ActionError> {
        let used = self.float_used(player);
        self.with_hole(|hole| hole.ledger.invoke_float(player, &hole.teams, used))?;
        self.float_used[player] = true;
        Ok(())
    }

    fn decline_double(&mut self, player: PlayerId) -> Result<(), ActionError> {
        let conceded = self.with_hole(|hole| hole.ledger.decline_double(player, &hole.teams))?;
        debug!(player = %player, team = ?conceded, "double declined, hole conceded");
        self.finish_hole(None)
    }

    fn record_shot(&mut self, player: PlayerId, distance: u32) -> Result<(), ActionError> {
        let hole = self.active_hole_mut()?;
        if hole.scrimmage.record_shot(player, distance)? && hole.ledger.close() {
            debug!(
                hole = hole.number,
                line = ?hole.scrimmage.line(),
                "every ball past the line of scrimmage, wagering closed"
            );
        }
        Ok(())
    }

    fn choose_hitting_position(&mut self, player: PlayerId, position: usize) -> Result<(), ActionError> {
        let player_count = self.players.len();
        let hole = self.hole.as_mut().ok_or_else(round_complete)?;

        let goat = match hole.goat {
            Some(goat) if hole.awaiting_goat => goat,
            Some(_) => {
                return Err(Rejection::new(
                    RejectReason::WrongPhase,
                    "the hitting order is already set for this hole",
                )
                .into())
            }
            None => {
                return Err(Rejection::new(
                    RejectReason::WrongPhase,
                    "hitting positions are only chosen in the final phase",
                )
                .into())
            }
        };
        if player != goat {
            return Err(Rejection::new(
                RejectReason::WrongActor,
                format!("{goat} is the Goat and chooses the position"),
            )
            .into());
        }
        if position >= player_count {
            return Err(Rejection::new(
                RejectReason::InvalidPosition,
                format!("position {position} outside 0..{player_count}"),
            )
            .with_field("position")
            .into());
        }

        let mut order: Side = hole.rotation.iter().copied().filter(|&p| p != goat).collect();
        order.insert(position, goat);
        hole.teams = FormationMachine::new(&order);
        hole.awaiting_goat = false;
        debug!(hole = hole.number, goat = %goat, position, "goat chose hitting position");

        self.apply_option();
        Ok(())
    }

    fn joes_special(&mut self, player: PlayerId, wager: Quarters) -> Result<(), ActionError> {
        let allowed = self.config.joes_special_values.contains(&wager);
        let hole = self.active_hole_mut()?;

        let Some(goat) = hole.goat else {
            return Err(Rejection::new(
                RejectReason::WrongPhase,
                "Joe's Special is only available in the final phase",
            )
            .into());
        };
        if player != goat {
            return Err(Rejection::new(
                RejectReason::WrongActor,
                format!("only the Goat ({goat}) may call Joe's Special"),
            )
            .into());
        }
        if hole.joes_special.is_some() {
            return Err(Rejection::new(
                RejectReason::AlreadyInvoked,
                "Joe's Special is already set for this hole",
            )
            .into());
        }
        if hole.teams.stage() != FormationStage::AwaitingCaptainDecision {
            return Err(Rejection::new(
                RejectReason::WrongPhase,
                "Joe's Special must be called before the captain decides",
            )
            .into());
        }
        if !allowed {
            return Err(Rejection::new(
                RejectReason::InvalidWager,
                format!("{wager} is not an allowed Joe's Special wager"),
            )
            .with_field("wager")
            .into());
        }

        hole.ledger.set_unit(wager)?;
        hole.joes_special = Some(wager);
        Ok(())
    }

    fn submit_scores(&mut self, gross: &PlayerMap<u8>) -> Result<(), ActionError> {
        let player_count = self.players.len();
        let hole = self.active_hole()?;

        if gross.player_count() != player_count {
            return Err(Rejection::new(
                RejectReason::InvalidScore,
                format!("expected {player_count} scores, got {}", gross.player_count()),
            )
            .with_field("gross")
            .into());
        }
        if let Some((player, _)) = gross.iter().find(|&(_, &strokes)| strokes == 0) {
            return Err(Rejection::new(
                RejectReason::InvalidScore,
                format!("{player} must have at least one stroke"),
            )
            .with_field("gross")
            .into());
        }
        if !hole.teams.is_resolved() {
            return Err(Rejection::new(
                RejectReason::TeamsPending,
                "sides must be settled before scores are submitted",
            )
            .into());
        }
        if let Some(offer) = hole.ledger.pending_offer() {
            return Err(Rejection::new(
                RejectReason::DoublePending,
                format!("{} has a double waiting for an answer", offer.offered_by),
            )
            .into());
        }

        let stroke_index = self
            .hole_definition(hole.number)
            .map_or(0, |definition| definition.stroke_index);
        let net = self
            .players
            .iter()
            .map(|player| net_score(gross[player.id], player.handicap, stroke_index))
            .collect::<Result<Vec<NetScore>, Rejection>>()?;

        self.active_hole_mut()?.ledger.close();
        self.finish_hole(Some(PlayerMap::from_vec(net)))
    }

    // === Hole lifecycle ===

    fn open_hole(&mut self, number: u8) {
        let phase = Phase::for_hole(number, self.schedule);
        if phase != self.phase {
            info!(hole = number, from = %self.phase, to = %phase, "phase change");
            self.phase = phase;
        }

        let player_count = self.players.len();
        let rotation = self.default_rotation(number);
        let goat = match phase {
            Phase::FinalPhase => self.goat_for(&rotation),
            Phase::Regular | Phase::LateRoundVariation | Phase::Complete => None,
        };
        let yards = self
            .hole_definition(number)
            .map_or(0, |definition| definition.yards);
        let ledger = WagerLedger::new(
            self.config.base_wager,
            phase.wager_multiplier(&self.config),
            self.carry_over,
        );

        self.hole = Some(HoleState {
            number,
            teams: FormationMachine::new(&rotation),
            rotation,
            goat,
            awaiting_goat: goat.is_some(),
            joes_special: None,
            ledger,
            scrimmage: Scrimmage::new(player_count, yards),
        });

        if goat.is_none() {
            self.apply_option();
        }
    }

    fn finish_hole(&mut self, net: Option<PlayerMap<NetScore>>) -> Result<(), ActionError> {
        let hole = self.hole.as_ref().ok_or_else(round_complete)?;
        hole.teams.verify()?;

        let number = hole.number;
        let formation = hole.teams.formation();
        let record = settle(HoleSettlement {
            hole: number,
            formation: &formation,
            ledger: &hole.ledger,
            net_scores: net.as_ref(),
            standings: &self.standings,
        })?;

        for (player, delta) in record.deltas.iter() {
            self.standings[player] += *delta;
        }
        self.carry_over = record.carry_out;
        info!(
            hole = number,
            outcome = ?record.outcome,
            wager = record.wager,
            transferred = record.transferred,
            carry_over = record.carry_out,
            "hole settled"
        );
        self.settlements.push_back(record);

        if usize::from(number) >= HOLES_PER_ROUND {
            self.hole = None;
            self.phase = Phase::Complete;
            info!(standings = ?self.standings, "round complete");
        } else {
            self.open_hole(number + 1);
        }
        Ok(())
    }

    /// Apply the Option if the captain is alone in last place or tied for it.
    fn apply_option(&mut self) {
        if !self.config.option_enabled {
            return;
        }
        let Some(captain) = self.captain() else {
            return;
        };
        if !self.captain_trails(captain) {
            return;
        }
        if let Some(hole) = self.hole.as_mut() {
            if hole.ledger.invoke_option() {
                debug!(hole = hole.number, captain = %captain, "option applied");
            }
        }
    }

    /// True if the captain holds the lowest of uneven standings.
    fn captain_trails(&self, captain: PlayerId) -> bool {
        let (Some(&low), Some(&high)) = (self.standings.values().min(), self.standings.values().max())
        else {
            return false;
        };
        low < high && self.standings.get(captain) == Some(&low)
    }

    // === Helpers ===

    fn default_rotation(&self, number: u8) -> Side {
        let player_count = self.players.len();
        let start = usize::from(number.saturating_sub(1)) % player_count;
        (0..player_count)
            .map(|offset| PlayerId::new(((start + offset) % player_count) as u8))
            .collect()
    }

    /// Lowest standing; ties go to whoever hits first in the rotation.
    fn goat_for(&self, rotation: &[PlayerId]) -> Option<PlayerId> {
        rotation
            .iter()
            .copied()
            .min_by_key(|&player| self.standings[player])
    }

    fn active_hole(&self) -> Result<&HoleState, Rejection> {
        let hole = self.hole.as_ref().ok_or_else(round_complete)?;
        if hole.awaiting_goat {
            return Err(awaiting_goat());
        }
        Ok(hole)
    }

    fn active_hole_mut(&mut self) -> Result<&mut HoleState, Rejection> {
        let hole = self.hole.as_mut().ok_or_else(round_complete)?;
        if hole.awaiting_goat {
            return Err(awaiting_goat());
        }
        Ok(hole)
    }

    fn record(&mut self, player: PlayerId, action: Action, hole: u8) {
        self.sequence += 1;
        self.action_log
            .push_back(ActionRecord::new(player, action, hole, self.sequence));
    }

    fn would_accept(&self, player: PlayerId, action: &Action) -> bool {
        self.clone().dispatch(player, action).is_ok()
    }

    fn candidate_actions(&self) -> Vec<Action> {
        let player_count = self.players.len();

        let mut actions: Vec<Action> = PlayerId::all(player_count)
            .map(|partner| Action::RequestPartner { partner })
            .collect();
        actions.extend([
            Action::AcceptPartner,
            Action::DeclinePartner,
            Action::DeclareSolo,
            Action::AardvarkJoinRequest { team: TeamId::One },
            Action::AardvarkJoinRequest { team: TeamId::Two },
        ]);
        actions.extend(PlayerId::all(player_count).flat_map(|aardvark| {
            [
                Action::AardvarkJoinAccept { aardvark },
                Action::AardvarkJoinReject { aardvark },
            ]
        }));
        actions.extend([
            Action::InvokeFloat,
            Action::OfferDouble,
            Action::AcceptDouble,
            Action::DeclineDouble,
            Action::InvokeDuncan,
            Action::InvokeTunkarri,
        ]);
        actions.extend((0..player_count).map(|position| Action::ChooseHittingPosition { position }));
        actions.extend(
            self.config
                .joes_special_values
                .iter()
                .map(|&wager| Action::JoesSpecial { wager }),
        );
        actions
    }

    fn hole_snapshot(&self, hole: &HoleState) -> HoleSnapshot {
        let definition = self.hole_definition(hole.number);
        HoleSnapshot {
            number: hole.number,
            par: definition.map_or(0, |d| d.par),
            stroke_index: definition.map_or(0, |d| d.stroke_index),
            order: hole.teams.order().to_vec(),
            captain: hole.teams.captain(),
            aardvarks: hole.teams.aardvarks().to_vec(),
            goat: hole.goat,
            awaiting_goat: hole.awaiting_goat,
            formation: hole.teams.formation(),
            stage: hole.teams.stage(),
            ledger: hole.ledger.clone(),
            current_wager: hole.ledger.current_wager(),
            stake: hole.ledger.stake(),
            line_of_scrimmage: hole.scrimmage.line(),
        }
    }
}

/// Checks shared by a new round and a restored one.
fn validate_setup(
    players: &[Player],
    holes: &[HoleDefinition],
    config: &RoundConfig,
) -> Result<(), Rejection> {
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&players.len()) {
        return Err(Rejection::new(
            RejectReason::InvalidPlayerCount,
            format!(
                "a round needs {MIN_PLAYERS} to {MAX_PLAYERS} players, got {}",
                players.len()
            ),
        )
        .with_field("players"));
    }
    if let Some((seat, player)) = players
        .iter()
        .enumerate()
        .find(|(seat, player)| player.id.index() != *seat)
    {
        return Err(Rejection::new(
            RejectReason::InvalidConfig,
            format!("seat {seat} holds {}; players must be in seat order", player.id),
        )
        .with_field("players"));
    }
    validate_course(holes)?;
    config.validate()
}

fn round_complete() -> Rejection {
    Rejection::new(RejectReason::RoundComplete, "all 18 holes have been settled")
}

fn awaiting_goat() -> Rejection {
    Rejection::new(
        RejectReason::AwaitingGoat,
        "the Goat must choose a hitting position first",
    )
}
