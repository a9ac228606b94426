//! Error taxonomy for the game core.
//!
//! Every condition here is local and recoverable. A failed operation
//! never partially mutates state; the caller's only recovery is to
//! issue a corrected request.

use crate::peg::{Disk, PegId};
use derive_more::{Display, From};

/// A move rejected by the engine. The board is unchanged whenever one
/// of these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum MoveError {
    /// Source and destination name the same peg. Rejected rather than
    /// silently accepted so a no-op can never count as progress.
    #[display("Source and destination are both peg {}", _0)]
    SamePeg(PegId),

    /// The source peg has no disk to move.
    #[display("Peg {} is empty", _0)]
    EmptySource(PegId),

    /// The move would rest a larger disk on a smaller one.
    #[display("Cannot place disk {} on smaller disk {}", disk, onto)]
    IllegalStacking {
        /// The disk being moved.
        disk: Disk,
        /// The smaller disk already on top of the destination.
        onto: Disk,
    },
}

impl std::error::Error for MoveError {}

/// A request rejected by the round controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, From, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum RoundError {
    /// A move arrived before the round was started.
    #[display("Start the game before moving disks")]
    GameNotStarted,

    /// The requested round number is outside 1..=3.
    #[display("Round {} does not exist, rounds run 1 through 3", _0)]
    InvalidRound(u8),

    /// Advance was requested before the round was won.
    #[display("The round is not won yet")]
    RoundNotWon,

    /// A move arrived after the round was already won.
    #[display("The round is already won, advance or reset to keep playing")]
    RoundOver,

    /// The engine rejected the move itself.
    #[display("{}", _0)]
    #[from]
    Move(MoveError),
}

impl std::error::Error for RoundError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RoundError::Move(inner) => Some(inner),
            _ => None,
        }
    }
}

impl RoundError {
    /// Stable snake_case name of the failing kind, for wire payloads.
    ///
    /// Wrapped engine rejections report the inner kind, so callers see
    /// `illegal_stacking` rather than `move`.
    pub fn kind(&self) -> &'static str {
        match self {
            RoundError::Move(inner) => inner.into(),
            other => other.into(),
        }
    }
}
