//! Team formation: captain, partner, solo and aardvark decisions.
//!
//! A `FormationMachine` is created fresh for every hole from that hole's
//! hitting order. It only changes through the decision methods, and once
//! it reaches `Resolved` every method refuses with `already-resolved`.
//! Downstream components read the result as a `TeamFormation`.

pub mod formation;

pub use formation::{FormationMachine, FormationStage, Side, TeamFormation, TeamId, BASE_GROUP};
