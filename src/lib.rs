//! # wolf-goat-pig
//!
//! Rules engine for Wolf Goat Pig, a golf betting game played by four to
//! six players over 18 holes.
//!
//! The engine takes the events of each hole in order (who partners with
//! whom, who doubles, what everyone scored) and computes every player's
//! quarters won or lost, rejecting any action that is not legal at that
//! moment.
//!
//! ## Design Principles
//!
//! 1. **Atomic actions**: `Round::apply` either applies a whole step or
//!    changes nothing and returns a `Rejection`.
//!
//! 2. **Zero-sum money**: every settlement record sums to exactly zero.
//!    A record that does not is an `InvariantViolation`, never a normal
//!    rejection.
//!
//! 3. **Round-scoped state**: Float usage, rotation and standings live in
//!    the `Round`. Nothing is global, so any number of rounds can run side
//!    by side.
//!
//! ## Modules
//!
//! - `core`: player ids, configuration, actions, errors, RNG
//! - `handicap`: strokes received per hole and net scores
//! - `teams`: captain, partner, solo and aardvark decisions
//! - `wager`: stake escalation and the line of scrimmage
//! - `settlement`: best ball, carry-over and fair distribution
//! - `round`: hole and phase progression, snapshots, shared handle
//! - `strategy`: pluggable automated players
//!
//! ## Example
//!
//! ```
//! use wolf_goat_pig::{Action, HoleDefinition, Player, PlayerId, PlayerMap, Round, RoundConfig};
//! use wolf_goat_pig::handicap::Handicap;
//!
//! let players = (0..4)
//!     .map(|i| Player::new(PlayerId::new(i), format!("P{i}"), Handicap::default()))
//!     .collect();
//! let holes = (1..=18).map(|n| HoleDefinition::new(n, 4, n, 400)).collect();
//! let mut round = Round::create(players, holes, RoundConfig::default()).unwrap();
//!
//! let captain = PlayerId::new(0);
//! round.apply(captain, Action::DeclareSolo).unwrap();
//! let snapshot = round
//!     .apply(captain, Action::SubmitScores { gross: PlayerMap::from_vec(vec![5, 4, 6, 6]) })
//!     .unwrap();
//!
//! // The soloist lost: two quarters to each of three opponents.
//! assert_eq!(snapshot.standings[captain], -6);
//! assert_eq!(snapshot.standings.values().sum::<i64>(), 0);
//! ```

pub mod core;
pub mod handicap;
pub mod round;
pub mod settlement;
pub mod strategy;
pub mod teams;
pub mod wager;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionError, ActionKind, ActionRecord, GameRng, HoleDefinition, InvariantViolation,
    PersistError, PhaseSchedule, Player, PlayerId, PlayerMap, Quarters, RejectReason, Rejection,
    RoundConfig, Scope,
};

pub use crate::handicap::{net_score, strokes_received, Handicap, NetScore, Strokes};

pub use crate::teams::{FormationMachine, FormationStage, TeamFormation, TeamId};

pub use crate::wager::{SoloSpecial, Stake, WagerLedger};

pub use crate::settlement::{distribute, settle, HoleOutcome, SettlementRecord};

pub use crate::round::{HoleSnapshot, Phase, Round, RoundSnapshot, SharedRound};

pub use crate::strategy::{ActionPolicy, FirstLegal, RandomPolicy};
