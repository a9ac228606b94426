//! The game engine: single source of truth for move legality and the
//! win condition.

use crate::board::Board;
use crate::error::MoveError;
use crate::invariants::{BoardInvariants, InvariantSet};
use crate::peg::PegId;
use tracing::{debug, instrument, warn};

/// Owns the board for the current round and arbitrates every move.
///
/// The engine is pure synchronous state-transition logic: no I/O, no
/// locking, no time. Callers are expected to serialize moves against a
/// single engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameEngine {
    board: Board,
}

impl GameEngine {
    /// The peg a round is won on.
    pub const GOAL_PEG: PegId = PegId::C;

    /// Creates an engine with a fresh board of `disk_count` disks.
    #[instrument]
    pub fn new(disk_count: u8) -> Self {
        Self {
            board: Board::new(disk_count),
        }
    }

    /// Replaces the entire board with a fresh one of `disk_count`
    /// disks stacked on peg `A`.
    #[instrument(skip(self))]
    pub fn initialize(&mut self, disk_count: u8) {
        debug!(disk_count, "Initializing fresh board");
        self.board = Board::new(disk_count);
    }

    /// Returns the board for rendering.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Number of disks in play this round.
    pub fn disk_count(&self) -> u8 {
        self.board.disk_count()
    }

    /// Moves the top disk of `from` onto `to`.
    ///
    /// Validation is check-then-commit: both tops are peeked and the
    /// move fully validated before anything is popped, so a rejected
    /// move can never lose a disk or leave the board half-changed.
    ///
    /// # Errors
    ///
    /// - [`MoveError::SamePeg`] if `from == to`.
    /// - [`MoveError::EmptySource`] if `from` holds no disks.
    /// - [`MoveError::IllegalStacking`] if the top of `from` is larger
    ///   than the top of `to`.
    #[instrument(skip(self), fields(%from, %to))]
    pub fn move_disk(&mut self, from: PegId, to: PegId) -> Result<&Board, MoveError> {
        if from == to {
            warn!("Rejected degenerate move");
            return Err(MoveError::SamePeg(from));
        }

        let moving = self
            .board
            .peg(from)
            .peek_top()
            .ok_or(MoveError::EmptySource(from))?;

        if let Some(top) = self.board.peg(to).peek_top() {
            if top < moving {
                warn!(disk = moving, onto = top, "Rejected illegal stacking");
                return Err(MoveError::IllegalStacking {
                    disk: moving,
                    onto: top,
                });
            }
        }

        // Validated above; pop and push cannot fail past this point.
        let disk = self
            .board
            .peg_mut(from)
            .pop()
            .ok_or(MoveError::EmptySource(from))?;
        self.board.peg_mut(to).push(disk)?;

        debug_assert!(BoardInvariants::check_all(&self.board).is_ok());

        debug!(disk, "Moved disk");
        Ok(&self.board)
    }

    /// True iff the goal peg holds every disk in canonical order,
    /// largest at the bottom.
    ///
    /// A goal peg of the right height but wrong order reports `false`
    /// rather than failing, even though stacking enforcement makes
    /// that state unreachable through moves.
    pub fn is_won(&self) -> bool {
        let goal = self.board.peg(Self::GOAL_PEG);
        let n = self.board.disk_count();
        goal.len() == usize::from(n) && goal.disks().iter().copied().eq((1..=n).rev())
    }

    /// Minimum number of legal moves to solve `disk_count` disks.
    ///
    /// Closed form `2^n - 1`; a known property of the puzzle, not a
    /// search result.
    pub fn minimum_moves(disk_count: u8) -> u64 {
        2_u64.pow(u32::from(disk_count)) - 1
    }
}
