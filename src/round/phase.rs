//! Round phases.

use serde::{Deserialize, Serialize};

use crate::core::{PhaseSchedule, Quarters, RoundConfig};

/// Where the round stands. Only moves forward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Plain rotation and base wager.
    Regular,
    /// Base wager multiplied by the late-round multiplier.
    LateRoundVariation,
    /// The Goat picks a hitting position and may call a Joe's Special.
    FinalPhase,
    /// All 18 holes settled.
    Complete,
}

impl Phase {
    /// Phase in effect for a hole (1-based).
    ///
    /// ```
    /// use wolf_goat_pig::core::PhaseSchedule;
    /// use wolf_goat_pig::round::Phase;
    ///
    /// let schedule = PhaseSchedule::for_player_count(4);
    /// assert_eq!(Phase::for_hole(1, schedule), Phase::Regular);
    /// assert_eq!(Phase::for_hole(13, schedule), Phase::LateRoundVariation);
    /// assert_eq!(Phase::for_hole(18, schedule), Phase::FinalPhase);
    /// ```
    #[must_use]
    pub fn for_hole(hole: u8, schedule: PhaseSchedule) -> Self {
        if hole >= schedule.final_phase_start {
            Phase::FinalPhase
        } else if hole >= schedule.late_round_start {
            Phase::LateRoundVariation
        } else {
            Phase::Regular
        }
    }

    /// Multiplier on the base wager.
    #[must_use]
    pub fn wager_multiplier(self, config: &RoundConfig) -> Quarters {
        match self {
            Phase::LateRoundVariation => config.late_round_multiplier,
            Phase::Regular | Phase::FinalPhase | Phase::Complete => 1,
        }
    }

    /// Stable name for logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Phase::Regular => "regular",
            Phase::LateRoundVariation => "late-round-variation",
            Phase::FinalPhase => "final-phase",
            Phase::Complete => "complete",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedules_by_group_size() {
        let six = PhaseSchedule::for_player_count(6);
        assert_eq!(Phase::for_hole(8, six), Phase::Regular);
        assert_eq!(Phase::for_hole(9, six), Phase::LateRoundVariation);
        assert_eq!(Phase::for_hole(13, six), Phase::FinalPhase);

        let five = PhaseSchedule::for_player_count(5);
        assert_eq!(Phase::for_hole(15, five), Phase::LateRoundVariation);
        assert_eq!(Phase::for_hole(16, five), Phase::FinalPhase);
    }

    #[test]
    fn test_empty_late_stretch() {
        let schedule = PhaseSchedule {
            late_round_start: 17,
            final_phase_start: 17,
        };
        assert_eq!(Phase::for_hole(16, schedule), Phase::Regular);
        assert_eq!(Phase::for_hole(17, schedule), Phase::FinalPhase);
    }

    #[test]
    fn test_multiplier() {
        let config = RoundConfig::default().with_late_round_multiplier(3);
        assert_eq!(Phase::Regular.wager_multiplier(&config), 1);
        assert_eq!(Phase::LateRoundVariation.wager_multiplier(&config), 3);
        assert_eq!(Phase::FinalPhase.wager_multiplier(&config), 1);
        assert!(Phase::Regular < Phase::Complete);
    }
}
