//! Stroke allocation by hole stroke index.

use serde::{Deserialize, Serialize};

use crate::core::{RejectReason, Rejection};

/// Highest handicap the allocator accepts.
pub const MAX_HANDICAP: f64 = 40.0;

/// Number of holes strokes are spread across.
pub const HOLES_PER_ALLOCATION: u16 = 18;

/// Playing handicap, stored in tenths of a stroke.
///
/// ```
/// use wolf_goat_pig::handicap::Handicap;
///
/// let h = Handicap::new(10.5).unwrap();
/// assert_eq!(h.whole(), 10);
/// assert!(h.has_half());
/// assert!(Handicap::new(40.1).is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Handicap(u16);

impl Handicap {
    /// Create a handicap from a decimal value in `[0, 40]`.
    pub fn new(value: f64) -> Result<Self, Rejection> {
        if !value.is_finite() || !(0.0..=MAX_HANDICAP).contains(&value) {
            return Err(Rejection::new(
                RejectReason::HandicapOutOfRange,
                format!("handicap {value} outside 0..={MAX_HANDICAP}"),
            )
            .with_field("handicap"));
        }
        Ok(Self((value * 10.0).round() as u16))
    }

    /// Create a handicap from tenths of a stroke (185 = 18.5).
    pub fn from_tenths(tenths: u16) -> Result<Self, Rejection> {
        Self::new(f64::from(tenths) / 10.0)
    }

    /// Tenths of a stroke.
    #[must_use]
    pub const fn tenths(self) -> u16 {
        self.0
    }

    /// Whole strokes (floor).
    #[must_use]
    pub const fn whole(self) -> u16 {
        self.0 / 10
    }

    /// True when the fractional part earns a half stroke (≥ .5).
    #[must_use]
    pub const fn has_half(self) -> bool {
        self.0 % 10 >= 5
    }

    /// Decimal value.
    #[must_use]
    pub fn value(self) -> f64 {
        f64::from(self.0) / 10.0
    }
}

impl std::fmt::Display for Handicap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}

/// Strokes received on one hole, counted in half strokes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Strokes {
    halves: u16,
}

impl Strokes {
    /// No strokes.
    pub const ZERO: Strokes = Strokes { halves: 0 };

    /// Build from a count of half strokes.
    #[must_use]
    pub const fn from_halves(halves: u16) -> Self {
        Self { halves }
    }

    /// Half-stroke count.
    #[must_use]
    pub const fn halves(self) -> u16 {
        self.halves
    }

    /// Full strokes, ignoring any half.
    #[must_use]
    pub const fn full(self) -> u16 {
        self.halves / 2
    }

    /// True when a half stroke is included.
    #[must_use]
    pub const fn has_half(self) -> bool {
        self.halves % 2 == 1
    }

    /// Decimal value.
    #[must_use]
    pub fn value(self) -> f64 {
        f64::from(self.halves) / 2.0
    }
}

/// Net score for a hole, in half strokes. Lower is better.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NetScore(i32);

impl NetScore {
    /// Gross strokes minus strokes received.
    #[must_use]
    pub fn new(gross: u8, strokes: Strokes) -> Self {
        Self(i32::from(gross) * 2 - i32::from(strokes.halves()))
    }

    /// Half-stroke count.
    #[must_use]
    pub const fn halves(self) -> i32 {
        self.0
    }

    /// Decimal value.
    #[must_use]
    pub fn value(self) -> f64 {
        f64::from(self.0) / 2.0
    }
}

impl std::fmt::Display for NetScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0 % 2 == 0 {
            write!(f, "{}", self.0 / 2)
        } else {
            write!(f, "{:.1}", self.value())
        }
    }
}

/// Strokes a player with `handicap` receives on the hole with `stroke_index`.
///
/// Every whole 18 of handicap gives one stroke on every hole; the remainder
/// gives one more stroke on each hole whose stroke index is at or below it.
/// A fractional part of .5 or more adds a half stroke on the next hole in
/// stroke-index order.
///
/// ```
/// use wolf_goat_pig::handicap::{strokes_received, Handicap};
///
/// let s = strokes_received(Handicap::new(18.0).unwrap(), 10).unwrap();
/// assert_eq!(s.full(), 1);
/// let s = strokes_received(Handicap::new(9.0).unwrap(), 10).unwrap();
/// assert_eq!(s.full(), 0);
/// ```
pub fn strokes_received(handicap: Handicap, stroke_index: u8) -> Result<Strokes, Rejection> {
    validate_stroke_index(stroke_index)?;

    let whole = handicap.whole();
    let index = u16::from(stroke_index);
    let remainder = whole % HOLES_PER_ALLOCATION;

    let mut full = whole / HOLES_PER_ALLOCATION;
    if index <= remainder {
        full += 1;
    }

    let mut halves = full * 2;
    if handicap.has_half() && index == remainder + 1 {
        halves += 1;
    }

    Ok(Strokes::from_halves(halves))
}

/// Net score for a gross score on a hole.
pub fn net_score(gross: u8, handicap: Handicap, stroke_index: u8) -> Result<NetScore, Rejection> {
    Ok(NetScore::new(gross, strokes_received(handicap, stroke_index)?))
}

/// Reject stroke indices outside `1..=18`.
pub fn validate_stroke_index(stroke_index: u8) -> Result<(), Rejection> {
    if (1..=HOLES_PER_ALLOCATION as u8).contains(&stroke_index) {
        Ok(())
    } else {
        Err(Rejection::new(
            RejectReason::StrokeIndexOutOfRange,
            format!("stroke index {stroke_index} outside 1..=18"),
        )
        .with_field("stroke_index"))
    }
}
