//! Round configuration types.
//!
//! Rounds are configured at setup by providing:
//! - `HoleDefinition`: par, stroke index and yardage for each of 18 holes
//! - `PhaseSchedule`: where the late-round and final phases begin
//! - `RoundConfig`: wager unit and the optional conventions in play
//!
//! Validation happens once, in `RoundConfig::validate` and
//! `validate_course`; the rest of the engine trusts these values.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::error::{RejectReason, Rejection};
use super::Quarters;
use crate::handicap::validate_stroke_index;

/// Holes in a round.
pub const HOLES_PER_ROUND: usize = 18;

/// Smallest supported group.
pub const MIN_PLAYERS: usize = 4;

/// Largest supported group.
pub const MAX_PLAYERS: usize = 6;

/// One hole of the course, supplied by the course provider.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HoleDefinition {
    /// Hole number, 1-18.
    pub number: u8,
    pub par: u8,
    /// Difficulty ranking, 1 (hardest) to 18. Unique within a course.
    pub stroke_index: u8,
    pub yards: u32,
}

impl HoleDefinition {
    /// Create a hole definition.
    #[must_use]
    pub const fn new(number: u8, par: u8, stroke_index: u8, yards: u32) -> Self {
        Self {
            number,
            par,
            stroke_index,
            yards,
        }
    }
}

/// Check a course: exactly 18 holes numbered in order with unique,
/// in-range stroke indices.
pub fn validate_course(holes: &[HoleDefinition]) -> Result<(), Rejection> {
    if holes.len() != HOLES_PER_ROUND {
        return Err(Rejection::new(
            RejectReason::InvalidHoleCount,
            format!("a round needs {HOLES_PER_ROUND} holes, got {}", holes.len()),
        )
        .with_field("holes"));
    }

    let mut seen = FxHashSet::default();
    for (i, hole) in holes.iter().enumerate() {
        if usize::from(hole.number) != i + 1 {
            return Err(Rejection::new(
                RejectReason::InvalidHoleNumber,
                format!("hole at position {} is numbered {}", i + 1, hole.number),
            )
            .with_field("number"));
        }
        validate_stroke_index(hole.stroke_index)?;
        if !seen.insert(hole.stroke_index) {
            return Err(Rejection::new(
                RejectReason::DuplicateStrokeIndex,
                format!("stroke index {} appears more than once", hole.stroke_index),
            )
            .with_field("stroke_index"));
        }
        if hole.par == 0 {
            return Err(Rejection::new(
                RejectReason::InvalidConfig,
                format!("hole {} has par 0", hole.number),
            )
            .with_field("par"));
        }
    }

    Ok(())
}

/// Hole numbers where the later phases begin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhaseSchedule {
    /// First hole of the late-round variation.
    pub late_round_start: u8,
    /// First hole of the final phase.
    pub final_phase_start: u8,
}

impl PhaseSchedule {
    /// Default schedule for a group size.
    ///
    /// The final phase is longer for bigger groups so every player can be
    /// the Goat; the late stretch is the four holes before it.
    #[must_use]
    pub const fn for_player_count(player_count: usize) -> Self {
        let final_phase_start = match player_count {
            0..=4 => 17,
            5 => 16,
            _ => 13,
        };
        Self {
            late_round_start: final_phase_start - 4,
            final_phase_start,
        }
    }

    fn validate(&self) -> Result<(), Rejection> {
        let ordered = 1 <= self.late_round_start
            && self.late_round_start <= self.final_phase_start
            && usize::from(self.final_phase_start) <= HOLES_PER_ROUND;
        if ordered {
            Ok(())
        } else {
            Err(Rejection::new(
                RejectReason::InvalidConfig,
                format!(
                    "phase schedule {}..{} is not within 1..=18 in order",
                    self.late_round_start, self.final_phase_start
                ),
            )
            .with_field("schedule"))
        }
    }
}

/// Round-wide betting configuration.
///
/// ```
/// use wolf_goat_pig::core::RoundConfig;
///
/// let config = RoundConfig::default().with_base_wager(2).without_option();
/// assert_eq!(config.base_wager, 2);
/// assert!(!config.option_enabled);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundConfig {
    /// Quarters wagered per hole before any doubling.
    pub base_wager: Quarters,

    /// Auto-double when the captain is last in the standings.
    pub option_enabled: bool,

    /// Base wager multiplier during the late-round variation.
    pub late_round_multiplier: Quarters,

    /// Wagers the Goat may pick in the final phase.
    pub joes_special_values: Vec<Quarters>,

    /// Phase thresholds. `None` uses the default for the group size.
    pub schedule: Option<PhaseSchedule>,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            base_wager: 1,
            option_enabled: true,
            late_round_multiplier: 2,
            joes_special_values: vec![2, 4, 8],
            schedule: None,
        }
    }
}

impl RoundConfig {
    /// Set the base wager.
    #[must_use]
    pub fn with_base_wager(mut self, quarters: Quarters) -> Self {
        self.base_wager = quarters;
        self
    }

    /// Turn off the automatic Option.
    #[must_use]
    pub fn without_option(mut self) -> Self {
        self.option_enabled = false;
        self
    }

    /// Set the late-round multiplier.
    #[must_use]
    pub fn with_late_round_multiplier(mut self, multiplier: Quarters) -> Self {
        self.late_round_multiplier = multiplier;
        self
    }

    /// Set the allowed Joe's Special wagers.
    #[must_use]
    pub fn with_joes_special_values(mut self, values: Vec<Quarters>) -> Self {
        self.joes_special_values = values;
        self
    }

    /// Override the phase schedule.
    #[must_use]
    pub fn with_schedule(mut self, schedule: PhaseSchedule) -> Self {
        self.schedule = Some(schedule);
        self
    }

    /// Effective schedule for a group size.
    #[must_use]
    pub fn schedule_for(&self, player_count: usize) -> PhaseSchedule {
        self.schedule
            .unwrap_or_else(|| PhaseSchedule::for_player_count(player_count))
    }

    /// Check values that every hole relies on.
    pub fn validate(&self) -> Result<(), Rejection> {
        if self.base_wager <= 0 {
            return Err(Rejection::new(
                RejectReason::InvalidWager,
                format!("base wager must be positive, got {}", self.base_wager),
            )
            .with_field("base_wager"));
        }
        if self.late_round_multiplier <= 0 {
            return Err(Rejection::new(
                RejectReason::InvalidConfig,
                "late-round multiplier must be positive",
            )
            .with_field("late_round_multiplier"));
        }
        if self.joes_special_values.is_empty() || self.joes_special_values.iter().any(|&v| v <= 0) {
            return Err(Rejection::new(
                RejectReason::InvalidConfig,
                "Joe's Special values must be a non-empty set of positive wagers",
            )
            .with_field("joes_special_values"));
        }
        if let Some(schedule) = &self.schedule {
            schedule.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course() -> Vec<HoleDefinition> {
        (1..=18u8)
            .map(|n| HoleDefinition::new(n, 4, n, 380))
            .collect()
    }

    #[test]
    fn test_valid_course() {
        assert!(validate_course(&course()).is_ok());
    }

    #[test]
    fn test_short_course_rejected() {
        let mut holes = course();
        holes.pop();
        let err = validate_course(&holes).unwrap_err();
        assert_eq!(err.reason, RejectReason::InvalidHoleCount);
    }

    #[test]
    fn test_duplicate_stroke_index_rejected() {
        let mut holes = course();
        holes[5].stroke_index = 1;
        let err = validate_course(&holes).unwrap_err();
        assert_eq!(err.reason, RejectReason::DuplicateStrokeIndex);
        assert_eq!(err.field.as_deref(), Some("stroke_index"));
    }

    #[test]
    fn test_stroke_index_range_rejected() {
        let mut holes = course();
        holes[0].stroke_index = 19;
        let err = validate_course(&holes).unwrap_err();
        assert_eq!(err.reason, RejectReason::StrokeIndexOutOfRange);
    }

    #[test]
    fn test_default_schedules() {
        assert_eq!(PhaseSchedule::for_player_count(4).late_round_start, 13);
        assert_eq!(PhaseSchedule::for_player_count(4).final_phase_start, 17);
        assert_eq!(PhaseSchedule::for_player_count(5).final_phase_start, 16);
        assert_eq!(PhaseSchedule::for_player_count(6).final_phase_start, 13);
        assert_eq!(PhaseSchedule::for_player_count(6).late_round_start, 9);
    }

    #[test]
    fn test_config_validation() {
        assert!(RoundConfig::default().validate().is_ok());
        assert!(RoundConfig::default().with_base_wager(0).validate().is_err());
        assert!(RoundConfig::default()
            .with_joes_special_values(vec![])
            .validate()
            .is_err());
        let bad = PhaseSchedule {
            late_round_start: 15,
            final_phase_start: 12,
        };
        assert!(RoundConfig::default().with_schedule(bad).validate().is_err());
    }

    #[test]
    fn test_config_defaults_fill_missing_fields() {
        let config: RoundConfig = serde_json::from_str(r#"{"base_wager": 4}"#).unwrap();
        assert_eq!(config.base_wager, 4);
        assert!(config.option_enabled);
        assert_eq!(config.joes_special_values, vec![2, 4, 8]);
    }
}
