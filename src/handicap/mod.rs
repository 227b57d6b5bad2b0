//! Handicap stroke allocation.
//!
//! Pure functions from (handicap, hole stroke index) to strokes received,
//! and the net-score arithmetic settlement uses. Half strokes are carried
//! exactly by counting in half-stroke units.

pub mod allocator;

pub use allocator::{
    net_score, strokes_received, validate_stroke_index, Handicap, NetScore, Strokes,
    MAX_HANDICAP,
};
