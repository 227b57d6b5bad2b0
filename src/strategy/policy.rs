//! Automated players.
//!
//! A policy looks at the public snapshot and the actions the round says
//! are legal, and picks one. The round never calls a policy; the caller
//! asks it for a choice and submits that choice through `Round::apply`
//! like any human action.

use crate::core::{Action, GameRng, PlayerId};
use crate::round::RoundSnapshot;

/// Decision-making for a non-human player.
pub trait ActionPolicy: Send {
    /// Pick one of `options`, or `None` to pass.
    ///
    /// `options` comes from `Round::legal_actions` for `player`.
    fn choose(&mut self, snapshot: &RoundSnapshot, player: PlayerId, options: &[Action]) -> Option<Action>;
}

/// Always takes the first legal action. Deterministic.
#[derive(Clone, Debug, Default)]
pub struct FirstLegal;

impl ActionPolicy for FirstLegal {
    fn choose(&mut self, _snapshot: &RoundSnapshot, _player: PlayerId, options: &[Action]) -> Option<Action> {
        options.first().cloned()
    }
}

/// Picks uniformly at random, optionally passing.
///
/// Reproducible from its seed.
#[derive(Clone, Debug)]
pub struct RandomPolicy {
    rng: GameRng,
    pass_probability: f64,
}

impl RandomPolicy {
    /// Never passes while an action is available.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
            pass_probability: 0.0,
        }
    }

    /// Pass with the given probability, clamped to `[0, 1]`.
    #[must_use]
    pub fn with_pass_probability(mut self, probability: f64) -> Self {
        self.pass_probability = probability.clamp(0.0, 1.0);
        self
    }

    /// Independent policy for another seat, derived from this one's stream.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        Self {
            rng: self.rng.fork(),
            pass_probability: self.pass_probability,
        }
    }
}

impl ActionPolicy for RandomPolicy {
    fn choose(&mut self, _snapshot: &RoundSnapshot, _player: PlayerId, options: &[Action]) -> Option<Action> {
        if options.is_empty() {
            return None;
        }
        if self.pass_probability > 0.0 && self.rng.gen_bool(self.pass_probability) {
            return None;
        }
        self.rng.choose(options).cloned()
    }
}
