//! Action representation: the closed set of per-hole operations.
//!
//! Each `Action` is a verb plus its payload. The acting player is passed
//! separately to `Round::apply`, so "who" and "what" stay independent and
//! the same action value can be validated for any player.
//!
//! `ActionKind` is the payload-free name of an action, used when a caller
//! only needs to know which operations are currently on offer.

use serde::{Deserialize, Serialize};

use super::player::{PlayerId, PlayerMap};
use super::Quarters;
use crate::teams::TeamId;

/// A complete per-hole action.
///
/// ## Example
///
/// ```
/// use wolf_goat_pig::core::{Action, ActionKind, PlayerId};
///
/// let ask = Action::RequestPartner { partner: PlayerId::new(2) };
/// assert_eq!(ask.kind(), ActionKind::RequestPartner);
/// assert_eq!(ask.kind().name(), "request-partner");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Captain asks another player to partner.
    RequestPartner { partner: PlayerId },
    /// Requested player agrees.
    AcceptPartner,
    /// Requested player refuses.
    DeclinePartner,
    /// Captain or aardvark plays alone.
    DeclareSolo,
    /// Aardvark asks to join a side.
    AardvarkJoinRequest { team: TeamId },
    /// Side leader takes the aardvark.
    AardvarkJoinAccept { aardvark: PlayerId },
    /// Side leader tosses the aardvark.
    AardvarkJoinReject { aardvark: PlayerId },
    /// Captain doubles the base wager (once per round).
    InvokeFloat,
    /// System-triggered base double for a last-place captain.
    InvokeOption,
    OfferDouble,
    AcceptDouble,
    DeclineDouble,
    /// Soloing captain claims the 3-for-2 payout.
    InvokeDuncan,
    /// Soloing aardvark claims the 3-for-2 payout.
    InvokeTunkarri,
    /// Player's ball now lies `distance` yards from the hole.
    RecordShot { distance: u32 },
    /// Final phase: the Goat picks a place in the hitting order.
    ChooseHittingPosition { position: usize },
    /// Final phase: the Goat sets the hole's wager.
    JoesSpecial { wager: Quarters },
    /// Gross strokes for every player, in seat order.
    SubmitScores { gross: PlayerMap<u8> },
}

impl Action {
    /// Payload-free name.
    #[must_use]
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::RequestPartner { .. } => ActionKind::RequestPartner,
            Action::AcceptPartner => ActionKind::AcceptPartner,
            Action::DeclinePartner => ActionKind::DeclinePartner,
            Action::DeclareSolo => ActionKind::DeclareSolo,
            Action::AardvarkJoinRequest { .. } => ActionKind::AardvarkJoinRequest,
            Action::AardvarkJoinAccept { .. } => ActionKind::AardvarkJoinAccept,
            Action::AardvarkJoinReject { .. } => ActionKind::AardvarkJoinReject,
            Action::InvokeFloat => ActionKind::InvokeFloat,
            Action::InvokeOption => ActionKind::InvokeOption,
            Action::OfferDouble => ActionKind::OfferDouble,
            Action::AcceptDouble => ActionKind::AcceptDouble,
            Action::DeclineDouble => ActionKind::DeclineDouble,
            Action::InvokeDuncan => ActionKind::InvokeDuncan,
            Action::InvokeTunkarri => ActionKind::InvokeTunkarri,
            Action::RecordShot { .. } => ActionKind::RecordShot,
            Action::ChooseHittingPosition { .. } => ActionKind::ChooseHittingPosition,
            Action::JoesSpecial { .. } => ActionKind::JoesSpecial,
            Action::SubmitScores { .. } => ActionKind::SubmitScores,
        }
    }
}

/// Name of an operation without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    RequestPartner,
    AcceptPartner,
    DeclinePartner,
    DeclareSolo,
    AardvarkJoinRequest,
    AardvarkJoinAccept,
    AardvarkJoinReject,
    InvokeFloat,
    InvokeOption,
    OfferDouble,
    AcceptDouble,
    DeclineDouble,
    InvokeDuncan,
    InvokeTunkarri,
    RecordShot,
    ChooseHittingPosition,
    JoesSpecial,
    SubmitScores,
}

impl ActionKind {
    /// Stable operation name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ActionKind::RequestPartner => "request-partner",
            ActionKind::AcceptPartner => "accept-partner",
            ActionKind::DeclinePartner => "decline-partner",
            ActionKind::DeclareSolo => "declare-solo",
            ActionKind::AardvarkJoinRequest => "aardvark-join-request",
            ActionKind::AardvarkJoinAccept => "aardvark-join-accept",
            ActionKind::AardvarkJoinReject => "aardvark-join-reject",
            ActionKind::InvokeFloat => "invoke-float",
            ActionKind::InvokeOption => "invoke-option",
            ActionKind::OfferDouble => "offer-double",
            ActionKind::AcceptDouble => "accept-double",
            ActionKind::DeclineDouble => "decline-double",
            ActionKind::InvokeDuncan => "invoke-duncan",
            ActionKind::InvokeTunkarri => "invoke-tunkarri",
            ActionKind::RecordShot => "record-shot",
            ActionKind::ChooseHittingPosition => "choose-hitting-position",
            ActionKind::JoesSpecial => "joes-special",
            ActionKind::SubmitScores => "submit-scores",
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// An accepted action with metadata for the round log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who acted.
    pub player: PlayerId,

    /// The action taken.
    pub action: Action,

    /// Hole number when the action was taken.
    pub hole: u8,

    /// Position in the round's action log, starting at 1.
    pub sequence: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(player: PlayerId, action: Action, hole: u8, sequence: u32) -> Self {
        Self {
            player,
            action,
            hole,
            sequence,
        }
    }
}
