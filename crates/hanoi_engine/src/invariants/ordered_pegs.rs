//! Ordering invariant: every peg is strictly decreasing bottom-to-top.

use super::Invariant;
use crate::board::Board;

/// Invariant: no disk ever rests on a smaller disk.
///
/// Enforced at the mutation point by `PegStack::push`; checked here
/// over whole pegs so corruption is detectable independently of how it
/// was introduced.
pub struct OrderedPegsInvariant;

impl Invariant<Board> for OrderedPegsInvariant {
    fn holds(board: &Board) -> bool {
        board.pegs().all(|(_, peg)| peg.is_strictly_decreasing())
    }

    fn description() -> &'static str {
        "Every peg is strictly decreasing from bottom to top"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::GameEngine;
    use crate::peg::PegId;

    #[test]
    fn test_fresh_board_holds() {
        let engine = GameEngine::new(8);
        assert!(OrderedPegsInvariant::holds(engine.board()));
    }

    #[test]
    fn test_holds_with_disks_spread_across_pegs() {
        let mut engine = GameEngine::new(3);
        engine.move_disk(PegId::A, PegId::C).unwrap();
        engine.move_disk(PegId::A, PegId::B).unwrap();

        assert!(OrderedPegsInvariant::holds(engine.board()));
    }

    #[test]
    fn test_out_of_order_stack_detected() {
        // Checked pushes cannot produce this stack; deserialization can.
        let peg: crate::peg::PegStack = serde_json::from_str("[1, 3, 2]").unwrap();
        assert!(!peg.is_strictly_decreasing());
    }
}
