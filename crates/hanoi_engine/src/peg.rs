//! Pegs and the disk stacks they hold.

use crate::error::MoveError;
use serde::{Deserialize, Serialize};

/// A disk, identified by its size. Larger disks may never rest on
/// smaller ones. Disks are fungible by size: a round with `n` disks
/// holds exactly one disk of each size in `1..=n`.
pub type Disk = u8;

/// One of the three named pegs.
///
/// Parses from its letter (case-insensitive, so `"a"` and `"A"` both
/// name the first peg) and displays as its letter.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum PegId {
    /// The left peg; every round starts with all disks here.
    A,
    /// The middle helper peg.
    B,
    /// The right peg; the goal peg for every round.
    C,
}

/// A stack of disks on one peg, ordered bottom-to-top.
///
/// The stack owns the strict-ordering rule: each disk must be strictly
/// smaller than the disk below it. [`PegStack::push`] checks the rule
/// before mutating, so a rejected push leaves the stack unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PegStack {
    disks: Vec<Disk>,
}

impl PegStack {
    /// Creates an empty peg.
    pub fn new() -> Self {
        Self { disks: Vec::new() }
    }

    /// Places a disk on top of the stack.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::IllegalStacking`] if the stack is non-empty
    /// and its top disk is not strictly larger than `disk`. The stack
    /// is unchanged on failure.
    pub fn push(&mut self, disk: Disk) -> Result<(), MoveError> {
        if let Some(top) = self.peek_top() {
            if disk >= top {
                return Err(MoveError::IllegalStacking { disk, onto: top });
            }
        }
        self.disks.push(disk);
        Ok(())
    }

    /// Removes and returns the top disk, or `None` if the peg is empty.
    pub fn pop(&mut self) -> Option<Disk> {
        self.disks.pop()
    }

    /// Returns the top disk without removing it.
    pub fn peek_top(&self) -> Option<Disk> {
        self.disks.last().copied()
    }

    /// Returns true if the peg holds no disks.
    pub fn is_empty(&self) -> bool {
        self.disks.is_empty()
    }

    /// Returns the number of disks on the peg.
    pub fn len(&self) -> usize {
        self.disks.len()
    }

    /// Returns the disks bottom-to-top. Read-only, for rendering.
    pub fn disks(&self) -> &[Disk] {
        &self.disks
    }

    /// Checks the strict-ordering rule over the whole stack.
    ///
    /// Holds trivially for empty and single-disk pegs. Every push is
    /// already guarded, so this is the independently testable form of
    /// the same rule.
    pub fn is_strictly_decreasing(&self) -> bool {
        self.disks.windows(2).all(|pair| pair[1] < pair[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_onto_empty() {
        let mut peg = PegStack::new();
        assert!(peg.push(3).is_ok());
        assert_eq!(peg.peek_top(), Some(3));
        assert_eq!(peg.len(), 1);
    }

    #[test]
    fn test_push_smaller_onto_larger() {
        let mut peg = PegStack::new();
        peg.push(3).unwrap();
        peg.push(2).unwrap();
        peg.push(1).unwrap();
        assert_eq!(peg.disks(), &[3, 2, 1]);
        assert!(peg.is_strictly_decreasing());
    }

    #[test]
    fn test_push_larger_rejected_without_mutation() {
        let mut peg = PegStack::new();
        peg.push(2).unwrap();

        let result = peg.push(3);
        assert_eq!(
            result,
            Err(MoveError::IllegalStacking { disk: 3, onto: 2 })
        );
        assert_eq!(peg.disks(), &[2]);
    }

    #[test]
    fn test_push_equal_rejected() {
        let mut peg = PegStack::new();
        peg.push(2).unwrap();
        assert!(peg.push(2).is_err());
    }

    #[test]
    fn test_pop_order() {
        let mut peg = PegStack::new();
        peg.push(2).unwrap();
        peg.push(1).unwrap();
        assert_eq!(peg.pop(), Some(1));
        assert_eq!(peg.pop(), Some(2));
        assert_eq!(peg.pop(), None);
        assert!(peg.is_empty());
    }

    #[test]
    fn test_peg_id_parses_case_insensitively() {
        assert_eq!("A".parse::<PegId>().unwrap(), PegId::A);
        assert_eq!("b".parse::<PegId>().unwrap(), PegId::B);
        assert_eq!("c".parse::<PegId>().unwrap(), PegId::C);
        assert!("D".parse::<PegId>().is_err());
    }

    #[test]
    fn test_peg_id_displays_as_letter() {
        assert_eq!(PegId::A.to_string(), "A");
        assert_eq!(PegId::C.to_string(), "C");
    }
}
