//! Conservation invariant: every disk exists exactly once.

use super::Invariant;
use crate::board::Board;

/// Invariant: the disks across all three pegs are exactly `{1..=n}`.
///
/// A move relocates a disk; it can never duplicate or drop one. An
/// engine that popped before validating could lose a disk on a
/// rejected move, which is precisely the corruption this detects.
pub struct DiskConservationInvariant;

impl Invariant<Board> for DiskConservationInvariant {
    fn holds(board: &Board) -> bool {
        let mut disks: Vec<u8> = board
            .pegs()
            .flat_map(|(_, peg)| peg.disks().iter().copied())
            .collect();
        disks.sort_unstable();

        disks.iter().copied().eq(1..=board.disk_count())
    }

    fn description() -> &'static str {
        "The disks across all pegs are exactly 1..=n, each exactly once"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::GameEngine;
    use crate::peg::PegId;

    #[test]
    fn test_fresh_board_holds() {
        let engine = GameEngine::new(5);
        assert!(DiskConservationInvariant::holds(engine.board()));
    }

    #[test]
    fn test_holds_after_rejected_move() {
        let mut engine = GameEngine::new(3);
        engine.move_disk(PegId::A, PegId::B).unwrap();
        engine.move_disk(PegId::A, PegId::B).unwrap_err();

        assert!(DiskConservationInvariant::holds(engine.board()));
    }

    #[test]
    fn test_detects_missing_disk() {
        let mut engine = GameEngine::new(3);
        engine.move_disk(PegId::A, PegId::B).unwrap();

        let mut board = engine.board().clone();
        // Simulate corruption: a disk vanishes from the board entirely.
        board.peg_mut(PegId::B).pop();

        assert!(!DiskConservationInvariant::holds(&board));
    }
}
