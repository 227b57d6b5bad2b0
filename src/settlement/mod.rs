//! Settlement: turning a finished hole into quarters.
//!
//! `settle` reads the resolved formation, the hole's wager ledger and the
//! net scores, and produces a `SettlementRecord` whose deltas sum to zero.
//! `distribute` is the fair-distribution rule it uses to split amounts
//! between sides of different sizes.

pub mod calculator;
pub mod distribution;

pub use calculator::{best_ball, settle, HoleOutcome, HoleSettlement, SettlementRecord};
pub use distribution::distribute;
