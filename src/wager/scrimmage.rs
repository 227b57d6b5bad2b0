//! Ball positions and the line of scrimmage.
//!
//! Every ball starts on the tee at the hole's full yardage. Once every
//! player has hit a tee shot, the line of scrimmage is fixed at the ball
//! furthest from the hole. Ordinary wagering closes when every ball lies
//! strictly inside that line or has been holed.

use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, PlayerMap, RejectReason, Rejection};

/// One player's ball on the current hole.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ball {
    /// Yards from the hole. Zero once holed.
    pub distance: u32,
    /// Strokes played so far.
    pub strokes: u8,
}

impl Ball {
    /// True once the ball is in the hole.
    #[must_use]
    pub fn is_holed(&self) -> bool {
        self.strokes > 0 && self.distance == 0
    }
}

/// Shot tracking for one hole.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scrimmage {
    balls: PlayerMap<Ball>,
    line: Option<u32>,
}

impl Scrimmage {
    /// All balls on the tee.
    #[must_use]
    pub fn new(player_count: usize, yards: u32) -> Self {
        Self {
            balls: PlayerMap::with_value(
                player_count,
                Ball {
                    distance: yards,
                    strokes: 0,
                },
            ),
            line: None,
        }
    }

    /// The line, once every tee shot is in.
    #[must_use]
    pub fn line(&self) -> Option<u32> {
        self.line
    }

    /// A player's ball.
    #[must_use]
    pub fn ball(&self, player: PlayerId) -> Option<&Ball> {
        self.balls.get(player)
    }

    /// True when every ball is past the line.
    #[must_use]
    pub fn all_past_line(&self) -> bool {
        match self.line {
            Some(line) => self
                .balls
                .values()
                .all(|ball| ball.is_holed() || ball.distance < line),
            None => false,
        }
    }

    /// Record a stroke leaving `player`'s ball `distance` yards out.
    ///
    /// Returns true when this shot put the last ball past the line.
    pub fn record_shot(&mut self, player: PlayerId, distance: u32) -> Result<bool, Rejection> {
        let was_past = self.all_past_line();
        let ball = self.balls.get_mut(player).ok_or_else(|| {
            Rejection::new(
                RejectReason::UnknownPlayer,
                format!("{player} is not playing this hole"),
            )
        })?;
        if ball.is_holed() {
            return Err(Rejection::new(
                RejectReason::BallHoled,
                format!("{player} has already holed out"),
            ));
        }

        ball.distance = distance;
        ball.strokes = ball.strokes.saturating_add(1);

        if self.line.is_none() && self.balls.values().all(|b| b.strokes > 0) {
            self.line = self.balls.values().map(|b| b.distance).max();
        }

        Ok(!was_past && self.all_past_line())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(id: u8) -> PlayerId {
        PlayerId::new(id)
    }

    #[test]
    fn test_line_set_after_tee_shots() {
        let mut s = Scrimmage::new(4, 400);
        assert!(!s.record_shot(p(0), 150).unwrap());
        assert!(!s.record_shot(p(1), 170).unwrap());
        assert!(!s.record_shot(p(2), 140).unwrap());
        assert_eq!(s.line(), None);
        assert!(!s.record_shot(p(3), 200).unwrap());
        assert_eq!(s.line(), Some(200));
    }

    #[test]
    fn test_closes_when_furthest_ball_advances() {
        let mut s = Scrimmage::new(4, 400);
        for (i, d) in [150, 170, 140, 200].into_iter().enumerate() {
            s.record_shot(p(i as u8), d).unwrap();
        }
        assert!(!s.all_past_line());
        assert!(s.record_shot(p(3), 30).unwrap());
        assert!(s.all_past_line());
        // Already closed; later shots do not report closure again.
        assert!(!s.record_shot(p(0), 10).unwrap());
    }

    #[test]
    fn test_holed_ball_cannot_play() {
        let mut s = Scrimmage::new(4, 150);
        s.record_shot(p(0), 0).unwrap();
        assert!(s.ball(p(0)).is_some_and(Ball::is_holed));
        let err = s.record_shot(p(0), 10).unwrap_err();
        assert_eq!(err.reason, RejectReason::BallHoled);
    }

    #[test]
    fn test_unknown_player() {
        let mut s = Scrimmage::new(4, 150);
        let err = s.record_shot(p(7), 10).unwrap_err();
        assert_eq!(err.reason, RejectReason::UnknownPlayer);
    }
}
