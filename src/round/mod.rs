//! Round and phase control.
//!
//! - [`Round`]: one 18-hole game, applying actions atomically
//! - [`Phase`]: Regular, LateRoundVariation, FinalPhase, Complete
//! - [`RoundSnapshot`]: the serializable public view
//! - [`SharedRound`]: a lock-guarded handle for multi-threaded callers

pub mod controller;
pub mod handle;
pub mod phase;
pub mod snapshot;

pub use controller::Round;
pub use handle::SharedRound;
pub use phase::Phase;
pub use snapshot::{HoleSnapshot, RoundSnapshot};
