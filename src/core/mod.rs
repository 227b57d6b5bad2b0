//! Core engine types: players, configuration, actions, errors, RNG.
//!
//! These are the building blocks every component shares. Nothing here
//! knows about a specific hole's state.

pub mod action;
pub mod config;
pub mod error;
pub mod player;
pub mod rng;

/// Money unit. One quarter is the smallest amount that changes hands.
pub type Quarters = i64;

pub use action::{Action, ActionKind, ActionRecord};
pub use config::{
    validate_course, HoleDefinition, PhaseSchedule, RoundConfig, HOLES_PER_ROUND, MAX_PLAYERS,
    MIN_PLAYERS,
};
pub use error::{ActionError, InvariantViolation, PersistError, RejectReason, Rejection, Scope};
pub use player::{Player, PlayerId, PlayerMap};
pub use rng::GameRng;
