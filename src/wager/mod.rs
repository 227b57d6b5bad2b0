//! Betting for one hole: stake escalation and the line of scrimmage.
//!
//! The ledger never decides who is on which side. Every operation that
//! depends on sides takes the hole's `FormationMachine` and checks the
//! actor against it.

pub mod ledger;
pub mod scrimmage;

pub use ledger::{DoubleOffer, SoloSpecial, Stake, WagerEvent, WagerLedger};
pub use scrimmage::{Ball, Scrimmage};
