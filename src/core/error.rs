//! Rejection taxonomy and internal invariant failures.
//!
//! Player-facing errors are values: every refused operation returns a
//! `Rejection` carrying a stable reason code, an optional offending field
//! and a human-readable message. Reasons are split by `Scope`:
//!
//! - `Scope::Now`: not allowed in the current state (wrong phase, wrong
//!   actor, wagering closed). The same call may succeed later.
//! - `Scope::Ever`: never allowed (bad setup, partnering with oneself).
//!
//! `InvariantViolation` is different in kind. It signals an engine defect
//! (a settlement that does not balance, a player left without a side) and
//! is never turned into a `Rejection`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::player::PlayerId;

/// Whether a rejected operation could become legal later.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scope {
    /// Illegal in the current state only.
    Now,
    /// Illegal regardless of state.
    Ever,
}

/// Why an operation was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RejectReason {
    // === Illegal now ===
    WrongPhase,
    WrongActor,
    WageringClosed,
    AlreadyResolved,
    AlreadyInvoked,
    FloatAlreadyUsed,
    DoublePending,
    NoDoublePending,
    NotYourRedouble,
    TeamsPending,
    NotSolo,
    PlayerExcluded,
    SideTossed,
    SideClosed,
    LastSideForAardvark,
    SoloTaken,
    AwaitingGoat,
    BallHoled,
    RoundComplete,

    // === Illegal ever ===
    InvalidPlayerCount,
    InvalidHoleCount,
    InvalidHoleNumber,
    DuplicateStrokeIndex,
    StrokeIndexOutOfRange,
    HandicapOutOfRange,
    InvalidWager,
    InvalidConfig,
    SelfPartner,
    UnknownPlayer,
    InvalidPosition,
    InvalidScore,
    SystemOnly,
}

impl RejectReason {
    /// Stable machine-readable code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            RejectReason::WrongPhase => "wrong-phase",
            RejectReason::WrongActor => "wrong-actor",
            RejectReason::WageringClosed => "wagering-closed",
            RejectReason::AlreadyResolved => "already-resolved",
            RejectReason::AlreadyInvoked => "already-invoked",
            RejectReason::FloatAlreadyUsed => "float-already-used",
            RejectReason::DoublePending => "double-pending",
            RejectReason::NoDoublePending => "no-double-pending",
            RejectReason::NotYourRedouble => "not-your-redouble",
            RejectReason::TeamsPending => "teams-pending",
            RejectReason::NotSolo => "not-solo",
            RejectReason::PlayerExcluded => "player-excluded",
            RejectReason::SideTossed => "side-tossed",
            RejectReason::SideClosed => "side-closed",
            RejectReason::LastSideForAardvark => "last-side-for-aardvark",
            RejectReason::SoloTaken => "solo-taken",
            RejectReason::AwaitingGoat => "awaiting-goat",
            RejectReason::BallHoled => "ball-holed",
            RejectReason::RoundComplete => "round-complete",
            RejectReason::InvalidPlayerCount => "invalid-player-count",
            RejectReason::InvalidHoleCount => "invalid-hole-count",
            RejectReason::InvalidHoleNumber => "invalid-hole-number",
            RejectReason::DuplicateStrokeIndex => "duplicate-stroke-index",
            RejectReason::StrokeIndexOutOfRange => "stroke-index-out-of-range",
            RejectReason::HandicapOutOfRange => "handicap-out-of-range",
            RejectReason::InvalidWager => "invalid-wager",
            RejectReason::InvalidConfig => "invalid-config",
            RejectReason::SelfPartner => "self-partner",
            RejectReason::UnknownPlayer => "unknown-player",
            RejectReason::InvalidPosition => "invalid-position",
            RejectReason::InvalidScore => "invalid-score",
            RejectReason::SystemOnly => "system-only",
        }
    }

    /// Whether this reason is temporary or permanent.
    #[must_use]
    pub const fn scope(self) -> Scope {
        match self {
            RejectReason::WrongPhase
            | RejectReason::WrongActor
            | RejectReason::WageringClosed
            | RejectReason::AlreadyResolved
            | RejectReason::AlreadyInvoked
            | RejectReason::FloatAlreadyUsed
            | RejectReason::DoublePending
            | RejectReason::NoDoublePending
            | RejectReason::NotYourRedouble
            | RejectReason::TeamsPending
            | RejectReason::NotSolo
            | RejectReason::PlayerExcluded
            | RejectReason::SideTossed
            | RejectReason::SideClosed
            | RejectReason::LastSideForAardvark
            | RejectReason::SoloTaken
            | RejectReason::AwaitingGoat
            | RejectReason::BallHoled
            | RejectReason::RoundComplete => Scope::Now,
            RejectReason::InvalidPlayerCount
            | RejectReason::InvalidHoleCount
            | RejectReason::InvalidHoleNumber
            | RejectReason::DuplicateStrokeIndex
            | RejectReason::StrokeIndexOutOfRange
            | RejectReason::HandicapOutOfRange
            | RejectReason::InvalidWager
            | RejectReason::InvalidConfig
            | RejectReason::SelfPartner
            | RejectReason::UnknownPlayer
            | RejectReason::InvalidPosition
            | RejectReason::InvalidScore
            | RejectReason::SystemOnly => Scope::Ever,
        }
    }
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// A refused operation. The round state is unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{reason}: {message}")]
pub struct Rejection {
    pub reason: RejectReason,
    /// The offending input field, when one applies.
    pub field: Option<String>,
    pub message: String,
}

impl Rejection {
    /// Create a rejection with a message.
    pub fn new(reason: RejectReason, message: impl Into<String>) -> Self {
        Self {
            reason,
            field: None,
            message: message.into(),
        }
    }

    /// Attach the name of the offending field.
    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Stable reason code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        self.reason.code()
    }

    /// Whether the operation may become legal later.
    #[must_use]
    pub fn scope(&self) -> Scope {
        self.reason.scope()
    }
}

/// Engine defect detected while computing a result. Fatal for the hole.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("settlement for hole {hole} does not balance: deltas sum to {sum}")]
    UnbalancedSettlement { hole: u8, sum: i64 },
    #[error("{player} is not assigned to any side")]
    UnassignedPlayer { player: PlayerId },
    #[error("{player} is assigned to both sides")]
    DuplicateAssignment { player: PlayerId },
    #[error("settlement requested for unresolved team formation")]
    UnresolvedFormation,
    #[error("hole {hole} was played out but has no net scores")]
    MissingScores { hole: u8 },
    #[error("wager arithmetic overflowed")]
    WagerOverflow,
}

/// Error returned by round operations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ActionError {
    /// Player-facing refusal; render it.
    #[error(transparent)]
    Rejected(#[from] Rejection),
    /// Internal defect; escalate it.
    #[error("invariant violated: {0}")]
    Invariant(#[from] InvariantViolation),
}

impl ActionError {
    /// The rejection, if this is a player-facing error.
    #[must_use]
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            ActionError::Rejected(r) => Some(r),
            ActionError::Invariant(_) => None,
        }
    }
}

/// Round state could not be encoded or decoded.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("failed to encode round state: {0}")]
    Encode(#[source] bincode::Error),
    #[error("failed to decode round state: {0}")]
    Decode(#[source] bincode::Error),
    #[error("decoded round state is invalid: {0}")]
    Invalid(#[from] Rejection),
}
